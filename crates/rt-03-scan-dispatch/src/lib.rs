//! # Scan Dispatcher (rt-03)
//!
//! Consumes raw scans and drives the containment state machine over the
//! Entity Store.
//!
//! ```text
//! raw scan ──→ token decode ──→ short code ──→ plain id ──→ raw barcode
//!                    │               │             │             │
//!                    └───────────────┴─────────────┘             │
//!                              typed id                          │
//!                                 │                              ↓
//!          Item ──→ pending items (toggle)         class rebind / brc log
//!          Box/Place/Order ──→ drain buffers ──→ loc/in + cont edges
//!          User ──→ upsert
//! ```
//!
//! ## Session Rules
//!
//! | Rule | Description |
//! |------|-------------|
//! | Drain All | A container scan commits every buffered entry, active or not |
//! | Cut Forward | Rescanning an active entry deactivates active entries from it onward |
//! | One Timestamp | Both halves of every edge from one scan share a timestamp |
//! | Lazy Upsert | Every scanned identifier is created on first sight |
//!
//! The session lives in an explicit [`ScanContext`]; nothing is global.
//!
//! ## Usage
//!
//! ```ignore
//! use rt_03_scan_dispatch::{DispatchConfig, ScanContext, ScanDispatcher};
//!
//! let dispatcher = ScanDispatcher::new(codec, registry, clock, DispatchConfig::default())?;
//! let mut ctx = ScanContext::default();
//!
//! dispatcher.submit(&mut ctx, "i000000000000000042")?;
//! dispatcher.submit(&mut ctx, "b000000000000000007")?;
//! dispatcher.annotate(&mut ctx, "30x20x10")?;
//! ```

#![warn(clippy::all)]

pub mod domain;
pub mod service;

// Re-export key types for convenience
pub use domain::attribute::Attribute;
pub use domain::buffer::{BufferOp, PendingBuffer, PendingEntry};
pub use domain::errors::{ConfigError, ScanError};
pub use domain::outcome::Outcome;
pub use domain::scan::{ScanSource, ScannedCode};
pub use domain::session::ScanSession;
pub use domain::value_objects::DispatchConfig;
pub use service::{ScanContext, ScanDispatcher};
