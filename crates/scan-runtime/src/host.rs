//! # Scan Host
//!
//! Owns the scan context and snapshot store for one process.
//!
//! ## Concurrency
//!
//! Every command runs to completion under one lock on the [`ScanContext`],
//! so scans from several sources never interleave inside a drain. Snapshot
//! writes take a copy of the dirty records under the lock and write them on
//! the blocking pool; the scan path never waits on disk.
//!
//! Flushes are serialized: one flush drains and writes before the next one
//! drains, so snapshot files only ever see batches in mutation order.

use crate::config::RuntimeConfig;
use crate::console::Command;
use anyhow::{Context, Result};
use parking_lot::Mutex;
use rt_01_token_codec::TokenCodec;
use rt_02_entity_store::{
    write_batch, EntityKind, EntityStore, InMemoryClassRegistry, JsonLinesSnapshotStore,
    SystemTimeSource,
};
use rt_03_scan_dispatch::{Outcome, ScanContext, ScanDispatcher};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;
use tracing::{info, warn};

/// Dispatcher as wired by the runtime.
pub type Dispatcher = ScanDispatcher<InMemoryClassRegistry, SystemTimeSource>;

/// Process-wide scan state.
pub struct ScanHost {
    ctx: Arc<Mutex<ScanContext>>,
    dispatcher: Arc<Dispatcher>,
    snapshots: Arc<Mutex<JsonLinesSnapshotStore>>,
    flush_gate: tokio::sync::Mutex<()>,
}

impl ScanHost {
    /// Load the class registry, restore snapshots and build the dispatcher.
    pub fn open(config: &RuntimeConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.data_dir)
            .with_context(|| format!("Failed to create {}", config.data_dir.display()))?;

        let registry = load_registry(config)?;
        let snapshots = JsonLinesSnapshotStore::new(&config.data_dir);

        let mut store = EntityStore::new();
        let restored = store
            .restore(&snapshots)
            .context("Failed to restore snapshots")?;
        info!("Restored {} entities", restored);

        let codec = TokenCodec::new(config.codec.clone()).context("Invalid codec config")?;
        let dispatcher = ScanDispatcher::new(
            codec,
            registry,
            SystemTimeSource,
            config.dispatch.clone(),
        )
        .context("Invalid dispatch config")?;

        Ok(Self {
            ctx: Arc::new(Mutex::new(ScanContext::new(store))),
            dispatcher: Arc::new(dispatcher),
            snapshots: Arc::new(Mutex::new(snapshots)),
            flush_gate: tokio::sync::Mutex::new(()),
        })
    }

    /// Shared scan context.
    pub fn context(&self) -> Arc<Mutex<ScanContext>> {
        Arc::clone(&self.ctx)
    }

    /// Run one console command and render the reply.
    pub async fn handle(&self, command: Command) -> Result<String> {
        if command == Command::Flush {
            let written = self.flush().await?;
            return Ok(format!("flushed {} records", written));
        }
        self.execute(command)
    }

    /// Run a command that needs no I/O.
    pub fn execute(&self, command: Command) -> Result<String> {
        let mut ctx = self.ctx.lock();
        let reply = match command {
            Command::Scan(raw) => render(&self.dispatcher.submit(&mut ctx, &raw)?),
            Command::Annotate(text) => match self.dispatcher.annotate(&mut ctx, &text)? {
                Some((target, attribute)) => {
                    format!("{} += {} {:?}", target, attribute.field, attribute.values)
                }
                None => String::new(),
            },
            Command::Pending => [EntityKind::Item, EntityKind::Box, EntityKind::Place]
                .into_iter()
                .map(|kind| {
                    let ids: Vec<String> =
                        ctx.pending(kind).iter().map(ToString::to_string).collect();
                    format!("{}: [{}]", kind.collection(), ids.join(", "))
                })
                .collect::<Vec<_>>()
                .join("\n"),
            Command::Clear => {
                ctx.clear_pending();
                "pending cleared".to_string()
            }
            Command::Path(id) => ctx
                .store
                .full_path(&id)?
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" > "),
            Command::Show(id) => serde_json::to_string_pretty(ctx.store.require(&id)?)?,
            Command::Mint(id) => self.dispatcher.mint_label(&id)?,
            Command::Flush => "use :flush".to_string(),
        };
        Ok(reply)
    }

    /// Write every entity changed since the last flush.
    ///
    /// Waits for any flush already in progress before draining.
    pub async fn flush(&self) -> Result<usize> {
        let _writer = self.flush_gate.lock().await;
        let batch = self.ctx.lock().store.drain_dirty();
        if batch.is_empty() {
            return Ok(0);
        }

        let snapshots = Arc::clone(&self.snapshots);
        let (batch, result) = tokio::task::spawn_blocking(move || {
            let result = write_batch(&mut *snapshots.lock(), &batch);
            (batch, result)
        })
        .await
        .context("Snapshot writer task failed")?;

        match result {
            Ok(written) => {
                info!("Flushed {} records", written);
                Ok(written)
            }
            Err((err, failed_from)) => {
                let unwritten: BTreeMap<_, _> = batch
                    .into_iter()
                    .filter(|(kind, _)| *kind >= failed_from)
                    .collect();
                self.ctx.lock().store.mark_dirty(&unwritten);
                Err(err).context("Snapshot flush failed")
            }
        }
    }
}

fn load_registry(config: &RuntimeConfig) -> Result<InMemoryClassRegistry> {
    let path = config.class_path();
    let file = match File::open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("No class registry at {}; raw barcodes will not bind classes", path.display());
            return Ok(InMemoryClassRegistry::new());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to open {}", path.display()));
        }
    };
    let registry = InMemoryClassRegistry::from_json_lines(BufReader::new(file))
        .with_context(|| format!("Failed to read {}", path.display()))?;
    info!("Loaded {} classes", registry.len());
    Ok(registry)
}

/// One-line summary of a scan outcome.
pub fn render(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Buffered { id, created, op, .. } => {
            format!("{}{} {:?}", id, if *created { " (new)" } else { "" }, op)
        }
        Outcome::Drained {
            container,
            committed,
            ..
        } => format!("{} <- {} entries", container, committed.len()),
        Outcome::UserSeen { id, .. } => format!("user {}", id),
        Outcome::ClassBound {
            item,
            class,
            changed,
        } => {
            if *changed {
                format!("{} is now {}", item, class)
            } else {
                format!("{} already {}", item, class)
            }
        }
        Outcome::BarcodeRecorded { target, code } => format!("{} brc {}", target, code),
        Outcome::Unclassified { code } => format!("unclassified {}", code),
    }
}
