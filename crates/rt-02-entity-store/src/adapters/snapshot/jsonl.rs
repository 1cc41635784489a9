use super::collapse_latest;
use crate::domain::entity::Entity;
use crate::domain::errors::SnapshotError;
use crate::domain::identifier::EntityKind;
use crate::ports::outbound::SnapshotStore;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Line-delimited JSON snapshot files, one per entity kind.
///
/// `<dir>/items.jsonl`, `<dir>/boxes.jsonl`, ... Each line is a complete
/// entity record. Flushes append; the last line for an id is current.
pub struct JsonLinesSnapshotStore {
    dir: PathBuf,
}

impl JsonLinesSnapshotStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref().to_path_buf();

        #[cfg(feature = "tracing-log")]
        tracing::info!("[rt-02] 📁 Snapshot directory: {}", dir.display());

        Self { dir }
    }

    /// File holding the `kind` collection.
    pub fn path_for(&self, kind: EntityKind) -> PathBuf {
        self.dir.join(format!("{}.jsonl", kind.collection()))
    }
}

impl SnapshotStore for JsonLinesSnapshotStore {
    fn load(&self, kind: EntityKind) -> Result<Vec<Entity>, SnapshotError> {
        let path = self.path_for(kind);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for (line_no, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Entity>(&line) {
                Ok(entity) if entity.kind() == kind => records.push(entity),
                #[allow(unused_variables)]
                Ok(entity) => {
                    #[cfg(feature = "tracing-log")]
                    tracing::warn!(
                        "[rt-02] skipping {} in {}:{}: wrong collection",
                        entity.id(),
                        path.display(),
                        line_no + 1
                    );
                }
                #[allow(unused_variables)]
                Err(e) => {
                    #[cfg(feature = "tracing-log")]
                    tracing::warn!(
                        "[rt-02] skipping unreadable record {}:{}: {}",
                        path.display(),
                        line_no + 1,
                        e
                    );
                }
            }
        }

        let latest = collapse_latest(records);

        #[cfg(feature = "tracing-log")]
        tracing::info!(
            "[rt-02] 💾 Loaded {} {} from {}",
            latest.len(),
            kind.collection(),
            path.display()
        );

        Ok(latest)
    }

    fn append_all(&mut self, kind: EntityKind, entities: &[Entity]) -> Result<(), SnapshotError> {
        if entities.is_empty() {
            return Ok(());
        }
        std::fs::create_dir_all(&self.dir)?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path_for(kind))?;
        let mut writer = BufWriter::new(file);

        for entity in entities {
            let line =
                serde_json::to_string(entity).map_err(|e| SnapshotError::EncodingError {
                    message: e.to_string(),
                })?;
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        }

        let file = writer
            .into_inner()
            .map_err(|e| SnapshotError::from(e.into_error()))?;
        file.sync_data()?;
        Ok(())
    }
}
