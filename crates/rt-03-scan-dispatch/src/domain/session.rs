//! # Scan Session
//!
//! The three pending buffers of one operator session, plus the activation
//! counter that orders entries across buffers.

use crate::domain::buffer::{BufferOp, PendingBuffer};
use rt_02_entity_store::{EntityKind, Identifier};

/// Session-scoped selection state.
#[derive(Debug, Clone, Default)]
pub struct ScanSession {
    items: PendingBuffer,
    boxes: PendingBuffer,
    places: PendingBuffer,
    next_seq: u64,
}

impl ScanSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer for `kind`. Orders and users are never buffered.
    pub fn pending(&self, kind: EntityKind) -> Option<&PendingBuffer> {
        match kind {
            EntityKind::Item => Some(&self.items),
            EntityKind::Box => Some(&self.boxes),
            EntityKind::Place => Some(&self.places),
            EntityKind::Order | EntityKind::User => None,
        }
    }

    pub(crate) fn pending_mut(&mut self, kind: EntityKind) -> Option<&mut PendingBuffer> {
        match kind {
            EntityKind::Item => Some(&mut self.items),
            EntityKind::Box => Some(&mut self.boxes),
            EntityKind::Place => Some(&mut self.places),
            EntityKind::Order | EntityKind::User => None,
        }
    }

    fn bump(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Apply the toggle rules to the buffer of `id`'s kind.
    pub(crate) fn toggle(&mut self, id: Identifier) -> Option<BufferOp> {
        let seq = self.bump();
        self.pending_mut(id.kind()).map(|buffer| buffer.toggle(id, seq))
    }

    /// Toggle an item in the items buffer.
    pub(crate) fn buffer_item(&mut self, id: Identifier) -> BufferOp {
        let seq = self.bump();
        self.items.toggle(id, seq)
    }

    /// The most recently activated entry still active, across all buffers.
    ///
    /// Free-text attributes are applied here.
    pub fn current_target(&self) -> Option<Identifier> {
        [&self.items, &self.boxes, &self.places]
            .into_iter()
            .filter_map(PendingBuffer::latest_active)
            .max_by_key(|e| e.seq)
            .map(|e| e.id)
    }

    /// Total buffered entries.
    pub fn len(&self) -> usize {
        self.items.len() + self.boxes.len() + self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every buffered entry without committing.
    pub fn clear(&mut self) {
        self.items.clear();
        self.boxes.clear();
        self.places.clear();
    }
}
