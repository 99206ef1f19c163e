//! Ready-made observers
//!
//! - **CapturingObserver**: keeps owned snapshots of every entry for tests
//!   and debugging tools
//! - **TracingObserver**: re-emits entries through `tracing`

pub mod capturing;
pub mod tracing_observer;

pub use capturing::{CaptureCallback, CapturedEntry, CapturingObserver, EntryFilter};
pub use tracing_observer::TracingObserver;
