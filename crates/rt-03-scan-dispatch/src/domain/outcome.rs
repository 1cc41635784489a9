//! # Scan Outcomes

use crate::domain::buffer::BufferOp;
use crate::domain::scan::ScanSource;
use rt_02_entity_store::{ClassId, Identifier};

/// What a single `submit` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Item scanned into the pending items buffer.
    Buffered {
        id: Identifier,
        source: ScanSource,
        created: bool,
        op: BufferOp,
    },

    /// Container scanned: pending entries committed into it.
    ///
    /// `op` is the container's own buffer toggle; orders have no buffer.
    Drained {
        container: Identifier,
        source: ScanSource,
        created: bool,
        committed: Vec<Identifier>,
        op: Option<BufferOp>,
    },

    /// User scanned: upsert only.
    UserSeen { id: Identifier, created: bool },

    /// Raw barcode resolved to a class and bound to the last buffered item.
    ClassBound {
        item: Identifier,
        class: ClassId,
        changed: bool,
    },

    /// Raw barcode kept on the last buffered item or box.
    BarcodeRecorded { target: Identifier, code: String },

    /// Raw barcode with nothing buffered to attach it to.
    Unclassified { code: String },
}

impl Outcome {
    /// Entity the scan was about, if any.
    pub fn subject(&self) -> Option<Identifier> {
        match self {
            Outcome::Buffered { id, .. } | Outcome::UserSeen { id, .. } => Some(*id),
            Outcome::Drained { container, .. } => Some(*container),
            Outcome::ClassBound { item, .. } => Some(*item),
            Outcome::BarcodeRecorded { target, .. } => Some(*target),
            Outcome::Unclassified { .. } => None,
        }
    }
}
