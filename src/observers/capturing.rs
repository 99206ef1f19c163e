//! In-memory capture of entries with callbacks and filtering
//!
//! This module provides an observer that snapshots every entry it receives
//! so it can be inspected after the logging call has returned, with support
//! for filtering by source, time range and custom predicates.

use crate::net_log::entry::{entry_record, is_empty_params};
use crate::net_log::{
    CaptureMode, Entry, EventPhase, EventType, NetLogObserver, ObserverAttachment, Source,
};
use chrono::{DateTime, Local};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// Type alias for capture callback functions
pub type CaptureCallback = Arc<dyn Fn(&CapturedEntry) + Send + Sync>;

/// Trait for filtering captured entries
///
/// Implemented for any matching closure, so callers can pass
/// `&|entry: &CapturedEntry| ...` directly.
pub trait EntryFilter: Send + Sync {
    /// Test whether an entry passes the filter
    fn matches(&self, entry: &CapturedEntry) -> bool;
}

impl<F> EntryFilter for F
where
    F: Fn(&CapturedEntry) -> bool + Send + Sync,
{
    fn matches(&self, entry: &CapturedEntry) -> bool {
        self(entry)
    }
}

/// An owned snapshot of one entry, with its parameters already evaluated at
/// the observer's capture mode.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedEntry {
    pub event_type: EventType,
    pub source: Source,
    pub phase: EventPhase,
    pub time: Instant,
    pub capture_mode: CaptureMode,
    pub params: Option<Value>,
    /// Wall-clock time at which the entry was captured
    pub captured_at: DateTime<Local>,
}

impl CapturedEntry {
    pub fn from_entry(entry: &Entry<'_>) -> Self {
        Self {
            event_type: entry.event_type(),
            source: entry.source(),
            phase: entry.phase(),
            time: entry.time(),
            capture_mode: entry.capture_mode(),
            params: entry.parameters_to_serializable(),
            captured_at: Local::now(),
        }
    }

    /// The same record [`Entry::to_serializable`] produces.
    pub fn to_serializable(&self) -> Value {
        entry_record(
            self.time,
            self.event_type,
            self.source,
            self.phase,
            self.params.clone(),
        )
    }

    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.as_ref()?.get(name)
    }

    pub fn param_str(&self, name: &str) -> Option<&str> {
        self.param(name)?.as_str()
    }

    pub fn param_i64(&self, name: &str) -> Option<i64> {
        self.param(name)?.as_i64()
    }

    /// The `net_error` parameter, if present.
    pub fn net_error_code(&self) -> Option<i32> {
        self.param_i64("net_error").and_then(|code| i32::try_from(code).ok())
    }

    /// Get a formatted string summary of the entry
    pub fn printable_summary(&self) -> String {
        let time_str = self.captured_at.format("%H:%M:%S%.3f").to_string();

        let mut summary = format!(
            "[{}] {} {} (source: {} {})",
            time_str,
            self.event_type.name(),
            self.phase.name(),
            self.source.source_type.name(),
            self.source.id
        );

        if let Some(params) = self.params.as_ref().filter(|p| !is_empty_params(p)) {
            summary.push_str(&format!("\n   Params: {}", params));
        }

        summary
    }
}

/// Observer that keeps every entry it sees
///
/// CapturingObserver provides thread-safe storage for captured entries with
/// support for:
/// - Callbacks triggered on each captured entry
/// - Filtering by source
/// - Filtering by time range
/// - Custom filter predicates
/// - Query for the last N entries
///
/// The capture callback runs inside the NetLog's fan-out and must not call
/// back into the NetLog.
pub struct CapturingObserver {
    attachment: ObserverAttachment,
    entries: Mutex<Vec<CapturedEntry>>,
    on_capture_callback: Option<CaptureCallback>,
}

impl CapturingObserver {
    pub fn new() -> Self {
        Self::with_callback(None)
    }

    /// Create a capturing observer
    ///
    /// # Arguments
    ///
    /// * `on_capture_callback` - Optional callback function called whenever an entry is captured
    pub fn with_callback(on_capture_callback: Option<CaptureCallback>) -> Self {
        Self {
            attachment: ObserverAttachment::new(),
            entries: Mutex::new(Vec::new()),
            on_capture_callback,
        }
    }

    /// A copy of every captured entry, in capture order.
    pub fn entries(&self) -> Vec<CapturedEntry> {
        self.entries.lock().clone()
    }

    /// Captured entries whose source is `source`.
    pub fn entries_for_source(&self, source: Source) -> Vec<CapturedEntry> {
        self.entries.lock().iter().filter(|e| e.source == source).cloned().collect()
    }

    /// Count entries matching filters
    ///
    /// # Arguments
    ///
    /// * `since` - Include entries with time >= since
    /// * `until` - Include entries with time <= until
    /// * `filter` - Custom filter to apply to entries
    pub fn count_entries(
        &self,
        since: Option<Instant>,
        until: Option<Instant>,
        filter: Option<&dyn EntryFilter>,
    ) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|entry| in_range(entry, since, until))
            .filter(|entry| filter.map_or(true, |f| f.matches(entry)))
            .count()
    }

    /// Get summaries of entries matching filters
    ///
    /// # Arguments
    ///
    /// * `since` - Include entries with time >= since
    /// * `until` - Include entries with time <= until
    /// * `filter` - Custom filter to apply to entries
    pub fn summaries(
        &self,
        since: Option<Instant>,
        until: Option<Instant>,
        filter: Option<&dyn EntryFilter>,
    ) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .filter(|entry| in_range(entry, since, until))
            .filter(|entry| filter.map_or(true, |f| f.matches(entry)))
            .map(CapturedEntry::printable_summary)
            .collect()
    }

    /// Get the last N entry summaries, optionally filtered
    pub fn last_n_summaries(&self, n: usize, filter: Option<&dyn EntryFilter>) -> Vec<String> {
        let entries = self.entries.lock();

        let filtered: Vec<_> = entries
            .iter()
            .filter(|entry| filter.map_or(true, |f| f.matches(entry)))
            .collect();

        let start_idx = filtered.len().saturating_sub(n);

        filtered[start_idx..].iter().map(|e| e.printable_summary()).collect()
    }

    /// Clear all captured entries
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Default for CapturingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl NetLogObserver for CapturingObserver {
    fn on_add_entry(&self, entry: &Entry<'_>) {
        let captured = CapturedEntry::from_entry(entry);

        if let Some(callback) = &self.on_capture_callback {
            callback(&captured);
        }

        self.entries.lock().push(captured);
    }

    fn attachment(&self) -> &ObserverAttachment {
        &self.attachment
    }
}

fn in_range(entry: &CapturedEntry, since: Option<Instant>, until: Option<Instant>) -> bool {
    if let Some(since) = since {
        if entry.time < since {
            return false;
        }
    }
    if let Some(until) = until {
        if entry.time > until {
            return false;
        }
    }
    true
}
