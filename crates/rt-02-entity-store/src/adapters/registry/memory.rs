use crate::domain::errors::SnapshotError;
use crate::domain::identifier::ClassId;
use crate::ports::outbound::{ClassInfo, ClassRegistry};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::BufRead;

/// In-memory class registry.
///
/// Several codes may resolve to the same class (EAN, vendor part number).
#[derive(Debug, Default)]
pub struct InMemoryClassRegistry {
    classes: HashMap<ClassId, ClassInfo>,
    codes: HashMap<String, ClassId>,
}

/// One registry line: `{"id": "...", "name": "...", "codes": ["..."]}`.
#[derive(Debug, Deserialize)]
struct ClassRecord {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    codes: Vec<String>,
}

impl InMemoryClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class and the codes that resolve to it.
    pub fn register<I, S>(&mut self, id: ClassId, name: impl Into<String>, codes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for code in codes {
            self.codes.insert(code.into(), id.clone());
        }
        self.classes.insert(
            id.clone(),
            ClassInfo {
                id,
                name: name.into(),
            },
        );
    }

    /// Load line-delimited JSON class records. Blank lines are ignored.
    pub fn from_json_lines<R: BufRead>(reader: R) -> Result<Self, SnapshotError> {
        let mut registry = Self::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: ClassRecord =
                serde_json::from_str(&line).map_err(|e| SnapshotError::EncodingError {
                    message: e.to_string(),
                })?;
            registry.register(ClassId::new(record.id), record.name, record.codes);
        }
        Ok(registry)
    }

    /// Number of registered classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ClassRegistry for InMemoryClassRegistry {
    fn lookup(&self, code: &str) -> Option<ClassId> {
        self.codes.get(code).cloned()
    }

    fn describe(&self, id: &ClassId) -> Option<ClassInfo> {
        self.classes.get(id).cloned()
    }
}
