//! Entries as delivered to observers.

use super::capture_mode::CaptureMode;
use super::catalog::{EventPhase, EventType};
use super::params::ParametersCallback;
use super::source::Source;
use crate::error::Result;
use serde_json::{Map, Value};
use std::sync::OnceLock;
use std::time::Instant;

static TIME_ORIGIN: OnceLock<Instant> = OnceLock::new();

/// The instant entry times are measured from. Fixed the first time it is
/// asked for, which happens no later than the creation of the first NetLog.
pub(crate) fn time_origin() -> Instant {
    *TIME_ORIGIN.get_or_init(Instant::now)
}

/// Renders a monotonic time as milliseconds since the time origin.
///
/// Times are strings on the wire since consumers may not be able to hold the
/// full integer range.
pub fn tick_count_to_string(time: Instant) -> String {
    time.saturating_duration_since(time_origin()).as_millis().to_string()
}

/// Everything about one logged event, shared by all observers it is fanned
/// out to. Borrows the caller's parameters callback, so it cannot outlive
/// the logging call that created it.
pub struct EntryData<'a> {
    pub event_type: EventType,
    pub source: Source,
    pub phase: EventPhase,
    pub time: Instant,
    pub parameters: Option<&'a ParametersCallback<'a>>,
}

impl<'a> EntryData<'a> {
    pub fn new(
        event_type: EventType,
        source: Source,
        phase: EventPhase,
        time: Instant,
        parameters: Option<&'a ParametersCallback<'a>>,
    ) -> Self {
        Self {
            event_type,
            source,
            phase,
            time,
            parameters,
        }
    }
}

/// An [`EntryData`] bound to the capture mode of the observer receiving it,
/// so that each observer serializes parameters at its own granularity.
///
/// Deliberately neither `Clone` nor `'static`: observers that want to keep
/// an entry must serialize it.
pub struct Entry<'a> {
    data: &'a EntryData<'a>,
    capture_mode: CaptureMode,
}

impl<'a> Entry<'a> {
    pub fn new(data: &'a EntryData<'a>, capture_mode: CaptureMode) -> Self {
        Self { data, capture_mode }
    }

    pub fn event_type(&self) -> EventType {
        self.data.event_type
    }

    pub fn source(&self) -> Source {
        self.data.source
    }

    pub fn phase(&self) -> EventPhase {
        self.data.phase
    }

    pub fn time(&self) -> Instant {
        self.data.time
    }

    pub fn capture_mode(&self) -> CaptureMode {
        self.capture_mode
    }

    /// Runs the parameters callback at this entry's capture mode.
    ///
    /// Returns `None` when the event has no parameters.
    pub fn parameters_to_serializable(&self) -> Option<Value> {
        let callback = self.data.parameters?;
        callback(self.capture_mode)
    }

    /// The full entry record: `time`, `type`, `source` (when valid), `phase`
    /// and `params` (when the callback produced anything).
    pub fn to_serializable(&self) -> Value {
        entry_record(
            self.data.time,
            self.data.event_type,
            self.data.source,
            self.data.phase,
            self.parameters_to_serializable(),
        )
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_serializable())?)
    }
}

/// Builds the serialized record for one event. Shared by every place that
/// writes entries out so they all agree on the format.
pub(crate) fn entry_record(
    time: Instant,
    event_type: EventType,
    source: Source,
    phase: EventPhase,
    params: Option<Value>,
) -> Value {
    let mut record = Map::new();
    record.insert("time".to_string(), Value::String(tick_count_to_string(time)));
    record.insert("type".to_string(), Value::String(event_type.name().to_string()));
    if source.is_valid() {
        record.insert("source".to_string(), source.id_and_type());
    }
    record.insert("phase".to_string(), Value::String(phase.name().to_string()));

    if let Some(params) = params.filter(|params| !is_empty_params(params)) {
        record.insert("params".to_string(), params);
    }

    Value::Object(record)
}

pub(crate) fn is_empty_params(params: &Value) -> bool {
    match params {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
