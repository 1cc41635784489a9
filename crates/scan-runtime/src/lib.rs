//! # Repair-Track Scan Runtime
//!
//! Host process for the scan console.
//!
//! ## Modular Structure
//!
//! - `config` - Runtime configuration (defaults, env, CLI)
//! - `console` - Line grammar for scans, attributes and commands
//! - `host` - Scan context, dispatcher and snapshot flushing
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (env, then CLI flags)
//! 2. Validate the codec key is not default
//! 3. Load the class registry and restore snapshots
//! 4. Read scans from stdin; flush snapshots periodically
//! 5. Flush once more on shutdown

pub mod config;
pub mod console;
pub mod host;

pub use config::{ConfigError, RuntimeConfig};
pub use console::{Command, ConsoleError};
pub use host::ScanHost;
