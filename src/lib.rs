pub mod config;
pub mod error;
pub mod net_log;
pub mod observers;

pub use error::{NetLogError, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::NetLogConfig;
    pub use crate::error::{NetLogError, Result};
    pub use crate::net_log::{
        BoundNetLog, CaptureMode, Entry, EventPhase, EventType, NetLog, NetLogObserver,
        ObserverAttachment, Source, SourceType,
    };
    pub use crate::observers::{CapturingObserver, TracingObserver};
}
