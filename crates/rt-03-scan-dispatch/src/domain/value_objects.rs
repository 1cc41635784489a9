//! # Value Objects
//!
//! Dispatcher configuration.

use crate::domain::errors::ConfigError;
use rt_02_entity_store::{EntityKind, IDENTIFIER_LEN};

/// Default short-code width (digits).
pub const DEFAULT_SHORT_CODE_WIDTH: usize = 7;

/// Scan dispatcher configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Exact digit count of a numeric short code.
    pub short_code_width: usize,
    /// Kind a short code expands to.
    pub short_code_kind: EntityKind,
    /// Accept plain identifier text when no token decodes.
    pub accept_plain: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            short_code_width: DEFAULT_SHORT_CODE_WIDTH,
            short_code_kind: EntityKind::Item,
            accept_plain: true,
        }
    }
}

impl DispatchConfig {
    pub fn with_short_code_width(mut self, width: usize) -> Self {
        self.short_code_width = width;
        self
    }

    pub fn with_short_code_kind(mut self, kind: EntityKind) -> Self {
        self.short_code_kind = kind;
        self
    }

    pub fn with_accept_plain(mut self, accept: bool) -> Self {
        self.accept_plain = accept;
        self
    }

    /// Short codes must fit the identifier's digit field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.short_code_width == 0 || self.short_code_width >= IDENTIFIER_LEN {
            return Err(ConfigError::ShortCodeWidth {
                width: self.short_code_width,
                max: IDENTIFIER_LEN - 1,
            });
        }
        Ok(())
    }
}
