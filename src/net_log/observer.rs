//! The observer capability and the per-observer attachment state.

use super::capture_mode::CaptureMode;
use super::entry::Entry;
use parking_lot::Mutex;

/// Unique identity of a [`NetLog`](super::NetLog) instance.
pub type NetLogId = u64;

/// Receives every entry added to the NetLog it is attached to.
///
/// `on_add_entry` runs on whichever thread added the entry, with the
/// NetLog's observer lock held. Two consequences:
///
/// - calls are never concurrent with any other observer call on the same
///   NetLog, so implementations need no extra synchronization for that;
/// - an implementation must not call back into the NetLog (adding, removing
///   or changing observers, or logging). Doing so deadlocks.
pub trait NetLogObserver: Send + Sync {
    fn on_add_entry(&self, entry: &Entry<'_>);

    /// State owned by the NetLog while this observer is attached.
    /// Implementations embed an [`ObserverAttachment`] and return it here.
    fn attachment(&self) -> &ObserverAttachment;

    /// The capture mode this observer was attached with, or `None` when it
    /// is not watching any NetLog.
    fn capture_mode(&self) -> Option<CaptureMode> {
        self.attachment().capture_mode()
    }

    /// The NetLog this observer is watching, if any.
    fn net_log_id(&self) -> Option<NetLogId> {
        self.attachment().net_log_id()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Attached {
    net_log: NetLogId,
    capture_mode: CaptureMode,
}

/// Where an observer is attached and at which capture mode.
///
/// Only the observer registry writes to this, and only while holding its own
/// lock; the inner mutex makes attaching to two NetLogs at once from two
/// threads fail cleanly for one of them.
#[derive(Debug, Default)]
pub struct ObserverAttachment {
    state: Mutex<Option<Attached>>,
}

impl ObserverAttachment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capture_mode(&self) -> Option<CaptureMode> {
        (*self.state.lock()).map(|attached| attached.capture_mode)
    }

    pub fn net_log_id(&self) -> Option<NetLogId> {
        (*self.state.lock()).map(|attached| attached.net_log)
    }

    pub fn is_attached(&self) -> bool {
        self.state.lock().is_some()
    }

    /// Marks the observer as watching `net_log`. Fails with the id of the
    /// NetLog it is already watching.
    pub(crate) fn attach(
        &self,
        net_log: NetLogId,
        capture_mode: CaptureMode,
    ) -> std::result::Result<(), NetLogId> {
        let mut state = self.state.lock();
        if let Some(current) = *state {
            return Err(current.net_log);
        }
        *state = Some(Attached {
            net_log,
            capture_mode,
        });
        Ok(())
    }

    /// Updates the capture mode if attached to `net_log`.
    pub(crate) fn set_capture_mode(&self, net_log: NetLogId, capture_mode: CaptureMode) -> bool {
        let mut state = self.state.lock();
        match state.as_mut() {
            Some(attached) if attached.net_log == net_log => {
                attached.capture_mode = capture_mode;
                true
            }
            _ => false,
        }
    }

    /// Clears the attachment if attached to `net_log`.
    pub(crate) fn detach(&self, net_log: NetLogId) -> bool {
        let mut state = self.state.lock();
        match *state {
            Some(attached) if attached.net_log == net_log => {
                *state = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_attachment_is_detached() {
        let attachment = ObserverAttachment::new();
        assert!(!attachment.is_attached());
        assert_eq!(attachment.capture_mode(), None);
        assert_eq!(attachment.net_log_id(), None);
    }

    #[test]
    fn test_attach_once() {
        let attachment = ObserverAttachment::new();
        assert_eq!(attachment.attach(1, CaptureMode::Default), Ok(()));
        assert_eq!(attachment.net_log_id(), Some(1));

        assert_eq!(attachment.attach(1, CaptureMode::Default), Err(1));
        assert_eq!(attachment.attach(2, CaptureMode::Default), Err(1));
        assert_eq!(attachment.net_log_id(), Some(1));
    }

    #[test]
    fn test_set_capture_mode_requires_matching_net_log() {
        let attachment = ObserverAttachment::new();
        assert!(!attachment.set_capture_mode(1, CaptureMode::IncludeSocketBytes));

        attachment.attach(1, CaptureMode::Default).unwrap();
        assert!(!attachment.set_capture_mode(2, CaptureMode::IncludeSocketBytes));
        assert_eq!(attachment.capture_mode(), Some(CaptureMode::Default));

        assert!(attachment.set_capture_mode(1, CaptureMode::IncludeSocketBytes));
        assert_eq!(attachment.capture_mode(), Some(CaptureMode::IncludeSocketBytes));
    }

    #[test]
    fn test_detach_requires_matching_net_log() {
        let attachment = ObserverAttachment::new();
        attachment.attach(5, CaptureMode::Default).unwrap();

        assert!(!attachment.detach(6));
        assert!(attachment.is_attached());

        assert!(attachment.detach(5));
        assert!(!attachment.is_attached());
        assert!(!attachment.detach(5));
    }
}
