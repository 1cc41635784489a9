//! # Pending Buffers
//!
//! Ordered lists of scanned-but-uncommitted identifiers. Each entry carries
//! an `active` selection flag that only affects the toggle rules below; a
//! drain commits every entry whatever its flag.
//!
//! ## Toggle Rules
//!
//! Scanning `id` into a buffer:
//!
//! 1. `id` present and active at index `k`: deactivate every *active* entry
//!    from `k` to the end ("cut from here forward"). Inactive entries in that
//!    range keep their state.
//! 2. `id` present and inactive: activate it in place.
//! 3. Otherwise: append `id` as active.

use rt_02_entity_store::Identifier;

/// One buffered identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingEntry {
    /// Buffered entity.
    pub id: Identifier,
    /// Operator selection flag.
    pub active: bool,
    /// Session-wide sequence number of the last activation.
    pub seq: u64,
}

/// What a toggle did to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferOp {
    /// New entry at the end, active.
    Appended,
    /// Existing inactive entry flipped to active.
    Activated,
    /// Cut forward from `index`; `deactivated` entries were switched off.
    CutFrom { index: usize, deactivated: usize },
}

/// An ordered pending list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingBuffer {
    entries: Vec<PendingEntry>,
}

impl PendingBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in buffer order.
    pub fn entries(&self) -> &[PendingEntry] {
        &self.entries
    }

    /// Identifiers in buffer order.
    pub fn ids(&self) -> Vec<Identifier> {
        self.entries.iter().map(|e| e.id).collect()
    }

    /// Most recently buffered entry, regardless of flag.
    pub fn last(&self) -> Option<&PendingEntry> {
        self.entries.last()
    }

    /// Active entry with the highest activation sequence.
    pub fn latest_active(&self) -> Option<&PendingEntry> {
        self.entries
            .iter()
            .filter(|e| e.active)
            .max_by_key(|e| e.seq)
    }

    /// Apply the toggle rules for a scan of `id`.
    ///
    /// `seq` stamps the entry when it becomes active.
    pub fn toggle(&mut self, id: Identifier, seq: u64) -> BufferOp {
        match self.entries.iter().position(|e| e.id == id) {
            Some(index) if self.entries[index].active => {
                let mut deactivated = 0;
                for entry in self.entries[index..].iter_mut().filter(|e| e.active) {
                    entry.active = false;
                    deactivated += 1;
                }
                BufferOp::CutFrom { index, deactivated }
            }
            Some(index) => {
                let entry = &mut self.entries[index];
                entry.active = true;
                entry.seq = seq;
                BufferOp::Activated
            }
            None => {
                self.entries.push(PendingEntry {
                    id,
                    active: true,
                    seq,
                });
                BufferOp::Appended
            }
        }
    }

    /// Remove and return every entry.
    pub fn drain(&mut self) -> Vec<PendingEntry> {
        std::mem::take(&mut self.entries)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
