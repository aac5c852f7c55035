//! # SuperDev Core
//!
//! Shared primitives for the SuperDevAgent monitoring workspace.

pub mod clock;
pub mod types;

pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use types::{AlertId, Metadata, Tags, TraceId};
