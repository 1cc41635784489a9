//! # Identifiers
//!
//! `{tag}{18 zero-padded decimal digits}`, e.g. `i000000000000000042`.
//!
//! | Tag | Kind |
//! |-----|------|
//! | `i` | Item |
//! | `b` | Box |
//! | `p` | Place |
//! | `o` | Order |
//! | `u` | User |
//!
//! The canonical text is exactly 19 ASCII bytes, which is also the token
//! payload carried by a label.

use crate::domain::errors::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of decimal digits after the tag.
pub const DIGITS: usize = 18;

/// Canonical identifier length (tag + digits).
pub const IDENTIFIER_LEN: usize = DIGITS + 1;

/// Largest serial that fits the digit field.
pub const MAX_SERIAL: u64 = 999_999_999_999_999_999;

/// Kind of tracked entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A device under repair.
    Item,
    /// A shipping box.
    Box,
    /// A storage place (shelf, bay).
    Place,
    /// An RMA order.
    Order,
    /// An operator.
    User,
}

impl EntityKind {
    /// All kinds, in snapshot order.
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Item,
        EntityKind::Box,
        EntityKind::Place,
        EntityKind::Order,
        EntityKind::User,
    ];

    /// Identifier tag character.
    pub fn tag(self) -> char {
        match self {
            EntityKind::Item => 'i',
            EntityKind::Box => 'b',
            EntityKind::Place => 'p',
            EntityKind::Order => 'o',
            EntityKind::User => 'u',
        }
    }

    /// Kind for a lowercase tag character.
    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'i' => Some(EntityKind::Item),
            'b' => Some(EntityKind::Box),
            'p' => Some(EntityKind::Place),
            'o' => Some(EntityKind::Order),
            'u' => Some(EntityKind::User),
            _ => None,
        }
    }

    /// Collection name, used for snapshot files.
    pub fn collection(self) -> &'static str {
        match self {
            EntityKind::Item => "items",
            EntityKind::Box => "boxes",
            EntityKind::Place => "places",
            EntityKind::Order => "orders",
            EntityKind::User => "users",
        }
    }

    /// Whether entities of this kind hold other entities.
    pub fn is_container(self) -> bool {
        matches!(self, EntityKind::Box | EntityKind::Place | EntityKind::Order)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Item => "item",
            EntityKind::Box => "box",
            EntityKind::Place => "place",
            EntityKind::Order => "order",
            EntityKind::User => "user",
        };
        f.write_str(name)
    }
}

/// Typed entity identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier {
    kind: EntityKind,
    serial: u64,
}

impl Identifier {
    /// Create an identifier. Fails if `serial` needs more than 18 digits.
    pub fn new(kind: EntityKind, serial: u64) -> Result<Self, StoreError> {
        if serial > MAX_SERIAL {
            return Err(StoreError::InvalidIdentifier(format!(
                "serial {} exceeds {} digits",
                serial, DIGITS
            )));
        }
        Ok(Self { kind, serial })
    }

    /// Entity kind.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Numeric part.
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Canonical 19-byte form, used as the token payload.
    pub fn to_payload(&self) -> [u8; IDENTIFIER_LEN] {
        let mut payload = [0u8; IDENTIFIER_LEN];
        payload.copy_from_slice(self.to_string().as_bytes());
        payload
    }

    /// Parse a decoded token payload.
    pub fn from_payload(payload: &[u8; IDENTIFIER_LEN]) -> Result<Self, StoreError> {
        let text = std::str::from_utf8(payload)
            .map_err(|_| StoreError::InvalidIdentifier("payload is not UTF-8".to_string()))?;
        text.parse()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:018}", self.kind.tag(), self.serial)
    }
}

impl FromStr for Identifier {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || StoreError::InvalidIdentifier(s.to_string());

        if s.len() != IDENTIFIER_LEN || !s.is_ascii() {
            return Err(invalid());
        }
        let mut chars = s.chars();
        let kind = chars
            .next()
            .and_then(EntityKind::from_tag)
            .ok_or_else(invalid)?;
        let digits = &s[1..];
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let serial = digits.parse::<u64>().map_err(|_| invalid())?;

        Ok(Self { kind, serial })
    }
}

impl TryFrom<String> for Identifier {
    type Error = StoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.to_string()
    }
}

/// Reference into the class registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(pub String);

impl ClassId {
    /// Create a class id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
