//! # Repair-Track Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Fixtures shared with benches/
//! └── integration/      # Cross-crate scan scenarios
//!     ├── scan_flows.rs
//!     ├── label_security.rs
//!     └── persistence.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p rt-tests
//! cargo test -p rt-tests integration::label_security
//! cargo bench -p rt-tests
//! ```

pub mod benchmarks;
pub mod integration;
