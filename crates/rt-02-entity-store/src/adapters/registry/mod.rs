//! Class Registry Adapters
//!
//! Implementations of the `ClassRegistry` trait.

mod memory;

pub use memory::InMemoryClassRegistry;
