//! The NetLog: source ids, entry construction and fan-out.
//!
//! A NetLog is the destination for events generated by the network stack.
//! It hands out source ids, and when at least one observer is attached it
//! turns each event into an entry and delivers it to every observer. When no
//! observer is attached, adding an event costs one atomic load.
//!
//! There is no global instance: components receive a `&NetLog` (usually
//! wrapped in a [`BoundNetLog`](super::BoundNetLog)) from whoever creates
//! them.

use super::capture_mode::CaptureMode;
use super::catalog::{EventPhase, EventType, SourceType};
use super::entry::{self, EntryData};
use super::observer::{NetLogId, NetLogObserver};
use super::params::ParametersCallback;
use super::registry::ObserverRegistry;
use super::source::Source;
use crate::error::Result;
use serde_json::Value;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

static NEXT_NET_LOG_ID: AtomicU64 = AtomicU64::new(1);

/// Thread-safe event log with synchronous observer fan-out.
///
/// All methods may be called from any thread, except that nothing on a
/// NetLog may be called from inside an observer's `on_add_entry`: the
/// observer lock is held during delivery and re-entry deadlocks.
pub struct NetLog {
    id: NetLogId,
    last_id: AtomicU32,
    registry: ObserverRegistry,
}

impl NetLog {
    pub fn new() -> Self {
        Self::with_last_id(0)
    }

    fn with_last_id(last_id: u32) -> Self {
        // Pin the time origin before any entry can be timestamped.
        entry::time_origin();
        let id = NEXT_NET_LOG_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            id,
            last_id: AtomicU32::new(last_id),
            registry: ObserverRegistry::new(id),
        }
    }

    /// Identity of this NetLog, as reported by attached observers'
    /// [`NetLogObserver::net_log_id`].
    pub fn id(&self) -> NetLogId {
        self.id
    }

    /// Returns a fresh source id. Never returns [`Source::INVALID_ID`], also
    /// when the counter wraps around.
    pub fn next_id(&self) -> u32 {
        loop {
            let id = self.last_id.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
            if id != Source::INVALID_ID {
                return id;
            }
        }
    }

    /// True if any observer is attached. Callers can use this to skip
    /// preparing data that nobody will see.
    pub fn is_capturing(&self) -> bool {
        self.registry.is_capturing()
    }

    /// Attaches `observer` at `capture_mode`.
    ///
    /// The observer must not be watching any NetLog, including this one.
    /// Observing the log is meant for a small set of vetted sinks (log
    /// exporters, debugging tools), not for arbitrary components.
    pub fn add_observer(
        &self,
        observer: Arc<dyn NetLogObserver>,
        capture_mode: CaptureMode,
    ) -> Result<()> {
        self.registry.add_observer(observer, capture_mode)
    }

    /// Changes the capture mode of an observer watching this NetLog.
    pub fn set_observer_capture_mode(
        &self,
        observer: &dyn NetLogObserver,
        capture_mode: CaptureMode,
    ) -> Result<()> {
        self.registry.set_capture_mode(observer, capture_mode)
    }

    /// Detaches an observer watching this NetLog.
    pub fn remove_observer(&self, observer: &dyn NetLogObserver) -> Result<()> {
        self.registry.remove_observer(observer)
    }

    pub fn observer_count(&self) -> usize {
        self.registry.observer_count()
    }

    /// Adds an entry for `source`. Returns immediately, without evaluating
    /// `parameters`, when nobody is observing.
    pub fn add_entry(
        &self,
        event_type: EventType,
        source: Source,
        phase: EventPhase,
        parameters: Option<&ParametersCallback<'_>>,
    ) {
        if !self.is_capturing() {
            return;
        }
        let data = EntryData::new(event_type, source, phase, Instant::now(), parameters);
        self.registry.notify_all(&data);
    }

    /// Emits an instantaneous event with its own global source id.
    pub fn add_global_entry(&self, event_type: EventType) {
        self.add_global_entry_with_params(event_type, None);
    }

    pub fn add_global_entry_with_params(
        &self,
        event_type: EventType,
        parameters: Option<&ParametersCallback<'_>>,
    ) {
        let source = Source::new(SourceType::Global, self.next_id());
        self.add_entry(event_type, source, EventPhase::None, parameters);
    }

    pub fn tick_count_to_string(time: Instant) -> String {
        entry::tick_count_to_string(time)
    }

    pub fn event_type_to_string(event_type: EventType) -> &'static str {
        event_type.name()
    }

    /// Every event type name mapped to its value.
    pub fn event_types_as_value() -> Value {
        EventType::all_as_value()
    }

    pub fn source_type_to_string(source_type: SourceType) -> &'static str {
        source_type.name()
    }

    /// Every source type name mapped to its value.
    pub fn source_types_as_value() -> Value {
        SourceType::all_as_value()
    }

    pub fn event_phase_to_string(phase: EventPhase) -> &'static str {
        phase.name()
    }
}

impl Default for NetLog {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NetLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetLog")
            .field("id", &self.id)
            .field("last_id", &self.last_id.load(Ordering::Relaxed))
            .field("is_capturing", &self.is_capturing())
            .finish()
    }
}

impl Drop for NetLog {
    fn drop(&mut self) {
        self.registry.remove_all();
    }
}
