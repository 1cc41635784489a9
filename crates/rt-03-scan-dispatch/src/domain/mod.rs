//! # Domain Layer
//!
//! Pure selection-buffer logic, scan resolution and attribute parsing.
//! No store or codec access.

pub mod attribute;
pub mod buffer;
pub mod errors;
pub mod outcome;
pub mod scan;
pub mod session;
pub mod value_objects;
