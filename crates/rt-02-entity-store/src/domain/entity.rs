//! # Entity Records
//!
//! Every tracked entity is a serial record plus append-only event logs.
//! The current value of a log is its last entry; nothing is overwritten.

use crate::domain::identifier::{ClassId, EntityKind, Identifier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Milliseconds since the Unix epoch.
pub type Timestamp = u64;

/// Event log attached to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventField {
    /// Location history (child side of a containment edge).
    Loc,
    /// Children placed inside (container side).
    Cont,
    /// Outward association to an order.
    In,
    /// Audit actions: check, cause, result, note, condition.
    Actn,
    /// Unrecognized raw barcodes seen while this entity was buffered.
    Brc,
    /// Class binding history.
    Cls,
    /// Quantity multiplier.
    Mult,
    /// Dimensions.
    Siz,
    /// Mass.
    Mas,
    /// Free-form description.
    Desc,
}

impl EventField {
    /// Whether entities of `kind` carry this log.
    pub fn applies_to(self, kind: EntityKind) -> bool {
        use EntityKind as K;
        match self {
            EventField::Loc => matches!(kind, K::Item | K::Box),
            EventField::Cont => kind.is_container(),
            EventField::In => kind == K::Box,
            EventField::Brc => matches!(kind, K::Item | K::Box),
            EventField::Cls => kind == K::Item,
            EventField::Actn
            | EventField::Mult
            | EventField::Siz
            | EventField::Mas
            | EventField::Desc => kind != K::User,
        }
    }

    /// Logs that only containment edges and class binding may write.
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            EventField::Loc | EventField::Cont | EventField::In | EventField::Cls
        )
    }

    /// Wire name of the log.
    pub fn name(self) -> &'static str {
        match self {
            EventField::Loc => "loc",
            EventField::Cont => "cont",
            EventField::In => "in",
            EventField::Actn => "actn",
            EventField::Brc => "brc",
            EventField::Cls => "cls",
            EventField::Mult => "mult",
            EventField::Siz => "siz",
            EventField::Mas => "mas",
            EventField::Desc => "desc",
        }
    }
}

impl fmt::Display for EventField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One `[value…, timestamp]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Recorded values.
    pub values: Vec<String>,
    /// When the entry was appended.
    pub at: Timestamp,
}

impl LogEntry {
    /// Create an entry.
    pub fn new(values: Vec<String>, at: Timestamp) -> Self {
        Self { values, at }
    }

    /// First value, if any.
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// First value parsed as an identifier.
    pub fn target(&self) -> Option<Identifier> {
        self.value().and_then(|v| v.parse().ok())
    }
}

/// A tracked entity.
///
/// `sn` is fixed at creation. Logs only grow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// `[identifier, created_at]`.
    pub sn: (Identifier, Timestamp),

    /// Current class binding (items only).
    #[serde(default, rename = "class", skip_serializing_if = "Option::is_none")]
    pub class_ref: Option<ClassId>,

    /// Event logs by field.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub logs: BTreeMap<EventField, Vec<LogEntry>>,
}

impl Entity {
    /// Create an empty record.
    pub fn new(id: Identifier, created_at: Timestamp) -> Self {
        Self {
            sn: (id, created_at),
            class_ref: None,
            logs: BTreeMap::new(),
        }
    }

    /// Identifier.
    pub fn id(&self) -> Identifier {
        self.sn.0
    }

    /// Kind.
    pub fn kind(&self) -> EntityKind {
        self.sn.0.kind()
    }

    /// Creation time.
    pub fn created_at(&self) -> Timestamp {
        self.sn.1
    }

    /// Full history of a log.
    pub fn log(&self, field: EventField) -> &[LogEntry] {
        self.logs.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Last entry of a log.
    pub fn current(&self, field: EventField) -> Option<&LogEntry> {
        self.log(field).last()
    }

    /// Most recent location (`loc`), if any.
    pub fn location(&self) -> Option<Identifier> {
        self.current(EventField::Loc).and_then(LogEntry::target)
    }

    /// Most recent order association (`in`), if any.
    pub fn order(&self) -> Option<Identifier> {
        self.current(EventField::In).and_then(LogEntry::target)
    }

    /// Append to a log. Callers check applicability.
    pub(crate) fn push(&mut self, field: EventField, entry: LogEntry) {
        self.logs.entry(field).or_default().push(entry);
    }
}
