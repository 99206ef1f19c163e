//! The set of observers attached to one NetLog.

use super::capture_mode::CaptureMode;
use super::entry::{Entry, EntryData};
use super::observer::{NetLogId, NetLogObserver};
use crate::error::{NetLogError, Result};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

struct ObserverSlot {
    observer: Arc<dyn NetLogObserver>,
    // Mirrors the observer's attachment so fan-out does not take a second
    // lock per observer. Both are only written under the registry lock.
    capture_mode: CaptureMode,
}

fn same_observer(a: &dyn NetLogObserver, b: &dyn NetLogObserver) -> bool {
    std::ptr::eq(a.attachment(), b.attachment())
}

/// Thread-safe, insertion-ordered set of observers plus the lock-free
/// "is anyone watching" flag.
///
/// Every mutation and every fan-out happens under one mutex, so observer
/// callbacks for a given NetLog never run concurrently and the set cannot
/// change while an entry is being delivered.
pub struct ObserverRegistry {
    net_log: NetLogId,
    observers: Mutex<Vec<ObserverSlot>>,
    is_capturing: AtomicBool,
}

impl ObserverRegistry {
    pub fn new(net_log: NetLogId) -> Self {
        Self {
            net_log,
            observers: Mutex::new(Vec::new()),
            is_capturing: AtomicBool::new(false),
        }
    }

    /// True if at least one observer is attached.
    ///
    /// Lock-free. The flag is only written under the observer lock, after
    /// the set has changed, so a reader can briefly see `true` after the last
    /// observer left but never `false` while an observer is attached.
    pub fn is_capturing(&self) -> bool {
        self.is_capturing.load(Ordering::Relaxed)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.lock().len()
    }

    /// Attaches `observer` at `capture_mode`. Fails if it is already watching
    /// any NetLog, this one included.
    pub fn add_observer(
        &self,
        observer: Arc<dyn NetLogObserver>,
        capture_mode: CaptureMode,
    ) -> Result<()> {
        let mut observers = self.observers.lock();

        if let Err(current) = observer.attachment().attach(self.net_log, capture_mode) {
            warn!(
                net_log = self.net_log,
                attached_to = current,
                "rejected observer that is already attached"
            );
            return Err(NetLogError::ObserverAlreadyAttached(current));
        }

        observers.push(ObserverSlot {
            observer,
            capture_mode,
        });
        self.update_is_capturing(&observers);

        debug!(
            net_log = self.net_log,
            capture_mode = %capture_mode,
            observers = observers.len(),
            "observer attached"
        );
        Ok(())
    }

    /// Changes the capture mode of an attached observer without changing
    /// its position in the notification order.
    pub fn set_capture_mode(
        &self,
        observer: &dyn NetLogObserver,
        capture_mode: CaptureMode,
    ) -> Result<()> {
        let mut observers = self.observers.lock();

        if !observer.attachment().set_capture_mode(self.net_log, capture_mode) {
            warn!(net_log = self.net_log, "capture mode change for an observer that is not attached");
            return Err(NetLogError::ObserverNotAttached(self.net_log));
        }

        if let Some(slot) = observers
            .iter_mut()
            .find(|slot| same_observer(slot.observer.as_ref(), observer))
        {
            slot.capture_mode = capture_mode;
        }

        debug!(net_log = self.net_log, capture_mode = %capture_mode, "observer capture mode changed");
        Ok(())
    }

    /// Detaches `observer`. Fails if it is not watching this NetLog.
    pub fn remove_observer(&self, observer: &dyn NetLogObserver) -> Result<()> {
        let mut observers = self.observers.lock();

        if !observer.attachment().detach(self.net_log) {
            warn!(net_log = self.net_log, "removal of an observer that is not attached");
            return Err(NetLogError::ObserverNotAttached(self.net_log));
        }

        observers.retain(|slot| !same_observer(slot.observer.as_ref(), observer));
        self.update_is_capturing(&observers);

        debug!(net_log = self.net_log, observers = observers.len(), "observer detached");
        Ok(())
    }

    /// Detaches every observer, leaving them free to watch another NetLog.
    pub fn remove_all(&self) {
        let mut observers = self.observers.lock();
        for slot in observers.drain(..) {
            slot.observer.attachment().detach(self.net_log);
        }
        self.update_is_capturing(&observers);
    }

    /// Delivers one entry to every observer, each at its own capture mode,
    /// in attach order. The observer lock is held throughout.
    pub fn notify_all(&self, data: &EntryData<'_>) {
        let observers = self.observers.lock();
        for slot in observers.iter() {
            let entry = Entry::new(data, slot.capture_mode);
            slot.observer.on_add_entry(&entry);
        }
    }

    // Must be called with the observer lock held.
    fn update_is_capturing(&self, observers: &[ObserverSlot]) {
        self.is_capturing.store(!observers.is_empty(), Ordering::Relaxed);
    }
}
