//! A NetLog handle bound to one source.

use super::catalog::{EventPhase, EventType, SourceType};
use super::net_error::ERR_IO_PENDING;
use super::log::NetLog;
use super::params::{bytes_transferred_callback, net_error_callback, ParametersCallback};
use super::source::Source;

/// Pairs a [`Source`] with the NetLog it logs to, so call sites do not have
/// to pass the source on every call.
///
/// Cheap to copy and does not own the NetLog. A handle without a NetLog
/// (`BoundNetLog::default()`, or [`BoundNetLog::make`] with `None`) is a
/// valid null logger: every method is a no-op and `is_capturing` is false.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundNetLog<'a> {
    source: Source,
    net_log: Option<&'a NetLog>,
}

impl<'a> BoundNetLog<'a> {
    /// Creates a handle for a new entity of type `source_type`, with a fresh
    /// id from `net_log`.
    pub fn make(net_log: Option<&'a NetLog>, source_type: SourceType) -> Self {
        match net_log {
            Some(net_log) => Self {
                source: Source::new(source_type, net_log.next_id()),
                net_log: Some(net_log),
            },
            None => Self::default(),
        }
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn net_log(&self) -> Option<&'a NetLog> {
        self.net_log
    }

    pub fn is_capturing(&self) -> bool {
        self.net_log.is_some_and(|net_log| net_log.is_capturing())
    }

    pub fn add_entry(&self, event_type: EventType, phase: EventPhase) {
        self.add(event_type, phase, None);
    }

    pub fn add_entry_with_params(
        &self,
        event_type: EventType,
        phase: EventPhase,
        parameters: &ParametersCallback<'_>,
    ) {
        self.add(event_type, phase, Some(parameters));
    }

    pub fn begin_event(&self, event_type: EventType) {
        self.add(event_type, EventPhase::Begin, None);
    }

    pub fn begin_event_with_params(&self, event_type: EventType, parameters: &ParametersCallback<'_>) {
        self.add(event_type, EventPhase::Begin, Some(parameters));
    }

    pub fn end_event(&self, event_type: EventType) {
        self.add(event_type, EventPhase::End, None);
    }

    pub fn end_event_with_params(&self, event_type: EventType, parameters: &ParametersCallback<'_>) {
        self.add(event_type, EventPhase::End, Some(parameters));
    }

    pub fn add_event(&self, event_type: EventType) {
        self.add(event_type, EventPhase::None, None);
    }

    pub fn add_event_with_params(&self, event_type: EventType, parameters: &ParametersCallback<'_>) {
        self.add(event_type, EventPhase::None, Some(parameters));
    }

    /// Adds an instantaneous event carrying `{"net_error": net_error}` when
    /// `net_error` is negative, and no parameters otherwise.
    ///
    /// `net_error` must not be `ERR_IO_PENDING`; that is checked in debug
    /// builds.
    pub fn add_event_with_net_error_code(&self, event_type: EventType, net_error: i32) {
        self.add_with_net_error_code(event_type, EventPhase::None, net_error);
    }

    /// Like [`BoundNetLog::add_event_with_net_error_code`] for the end of an
    /// interval.
    pub fn end_event_with_net_error_code(&self, event_type: EventType, net_error: i32) {
        self.add_with_net_error_code(event_type, EventPhase::End, net_error);
    }

    /// Logs a transfer of `byte_count` bytes. The bytes themselves are only
    /// materialized for observers whose capture mode includes socket bytes.
    pub fn add_byte_transfer_event(&self, event_type: EventType, byte_count: usize, bytes: &[u8]) {
        if !self.is_capturing() {
            return;
        }
        let callback = bytes_transferred_callback(byte_count, bytes);
        self.add(event_type, EventPhase::None, Some(&callback));
    }

    fn add_with_net_error_code(&self, event_type: EventType, phase: EventPhase, net_error: i32) {
        debug_assert_ne!(net_error, ERR_IO_PENDING, "ERR_IO_PENDING is not a result");
        if net_error >= 0 {
            self.add(event_type, phase, None);
        } else {
            let callback = net_error_callback(net_error);
            self.add(event_type, phase, Some(&callback));
        }
    }

    fn add(&self, event_type: EventType, phase: EventPhase, parameters: Option<&ParametersCallback<'_>>) {
        if let Some(net_log) = self.net_log {
            net_log.add_entry(event_type, self.source, phase, parameters);
        }
    }
}
