//! # Integration Tests
//!
//! Codec, store and dispatcher wired together the way a host wires them.

pub mod label_security;
pub mod persistence;
pub mod scan_flows;
