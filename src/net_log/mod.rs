//! Event logging for the network stack
//!
//! Components emit structured, timestamped events tagged with the source
//! (request, socket, session) that produced them. Attached observers receive
//! the events live, each at its own capture granularity. With no observer
//! attached, logging is a single atomic load and the event's parameters are
//! never computed.
//!
//! # Architecture
//!
//! - **Source**: type and numeric id of the entity behind an event
//! - **ParametersCallback**: borrowed closure computing an event's parameters
//!   for a given capture mode, evaluated only if someone looks
//! - **Entry**: one event bound to one observer's capture mode
//! - **ObserverRegistry**: locked, ordered observer set plus the lock-free
//!   capturing flag
//! - **NetLog**: id generator and fan-out coordinator
//! - **BoundNetLog**: a source paired with a NetLog, with begin/end/instant
//!   and net-error helpers
//!
//! # Usage Example
//!
//! ```rust
//! use netlog::net_log::{int_callback, BoundNetLog, CaptureMode, EventType, NetLog, SourceType};
//! use netlog::observers::CapturingObserver;
//! use std::sync::Arc;
//!
//! let net_log = NetLog::new();
//! let observer = Arc::new(CapturingObserver::new());
//! net_log.add_observer(observer.clone(), CaptureMode::Default).unwrap();
//!
//! let socket = BoundNetLog::make(Some(&net_log), SourceType::Socket);
//! socket.begin_event_with_params(EventType::TcpConnect, &int_callback("port", 443));
//! socket.end_event(EventType::TcpConnect);
//!
//! assert_eq!(observer.len(), 2);
//! net_log.remove_observer(&*observer).unwrap();
//! ```
//!
//! # Re-entrancy
//!
//! Observers are called with the NetLog's observer lock held. An observer
//! must never call back into the NetLog it is watching; doing so deadlocks.

pub mod bound_net_log;
pub mod capture_mode;
pub mod catalog;
pub mod entry;
pub mod log;
pub mod net_error;
pub mod observer;
pub mod params;
pub mod registry;
pub mod source;

// Re-export main types
pub use bound_net_log::BoundNetLog;
pub use capture_mode::CaptureMode;
pub use catalog::{EventPhase, EventType, SourceType};
pub use entry::{tick_count_to_string, Entry, EntryData};
pub use log::NetLog;
pub use observer::{NetLogId, NetLogObserver, ObserverAttachment};
pub use params::{
    bool_callback, bytes_transferred_callback, int64_callback, int_callback, net_error_callback,
    string16_callback, string_callback, ParametersCallback,
};
pub use registry::ObserverRegistry;
pub use source::Source;
