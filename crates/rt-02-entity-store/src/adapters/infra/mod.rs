//! Infrastructure Adapters

mod time;

pub use time::{ManualClock, SystemTimeSource};
