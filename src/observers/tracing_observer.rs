//! Forwards entries to `tracing`.

use crate::net_log::{Entry, NetLogObserver, ObserverAttachment};
use tracing::Level;

/// Observer that re-emits every entry as a `tracing` event at a fixed level.
///
/// Parameters are evaluated at the observer's capture mode and recorded as
/// a JSON string field, so whatever subscriber is installed decides where
/// the entries end up.
#[derive(Debug)]
pub struct TracingObserver {
    attachment: ObserverAttachment,
    level: Level,
}

impl TracingObserver {
    pub fn new(level: Level) -> Self {
        Self {
            attachment: ObserverAttachment::new(),
            level,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new(Level::DEBUG)
    }
}

impl NetLogObserver for TracingObserver {
    fn on_add_entry(&self, entry: &Entry<'_>) {
        let event_type = entry.event_type().name();
        let source = entry.source();
        let phase = entry.phase().name();

        // Parameters are only evaluated once the subscriber wants the event.
        macro_rules! emit {
            ($macro:ident, $level:expr) => {{
                if !tracing::enabled!($level) {
                    return;
                }
                let params = entry
                    .parameters_to_serializable()
                    .map(|params| params.to_string())
                    .unwrap_or_default();
                tracing::$macro!(
                    event_type,
                    source_id = source.id,
                    source_type = source.source_type.name(),
                    phase,
                    params = params.as_str(),
                    "net log entry"
                )
            }};
        }

        if self.level == Level::ERROR {
            emit!(error, Level::ERROR);
        } else if self.level == Level::WARN {
            emit!(warn, Level::WARN);
        } else if self.level == Level::INFO {
            emit!(info, Level::INFO);
        } else if self.level == Level::DEBUG {
            emit!(debug, Level::DEBUG);
        } else {
            emit!(trace, Level::TRACE);
        }
    }

    fn attachment(&self) -> &ObserverAttachment {
        &self.attachment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net_log::{
        bytes_transferred_callback, BoundNetLog, CaptureMode, EventType, NetLog, SourceType,
    };
    use serde_json::{json, Value};
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for SharedBuffer {
        type Writer = SharedBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_default_level() {
        assert_eq!(TracingObserver::default().level(), Level::DEBUG);
    }

    #[test]
    fn test_entries_are_forwarded() {
        let buffer = SharedBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .with_max_level(Level::TRACE)
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let net_log = NetLog::new();
            let observer = Arc::new(TracingObserver::new(Level::INFO));
            net_log.add_observer(observer.clone(), CaptureMode::IncludeSocketBytes).unwrap();

            let bound = BoundNetLog::make(Some(&net_log), SourceType::Socket);
            let payload = [0xDEu8, 0xAD];
            bound.add_event_with_params(
                EventType::SocketBytesSent,
                &bytes_transferred_callback(2, &payload),
            );

            net_log.remove_observer(&*observer).unwrap();
        });

        let output = buffer.contents();
        assert!(output.contains("net log entry"));
        assert!(output.contains("SOCKET_BYTES_SENT"));
        assert!(output.contains("source_type=\"SOCKET\"") || output.contains("source_type=SOCKET"));
        assert!(output.contains("DEAD"));
    }

    #[test]
    fn test_level_filtering_is_left_to_the_subscriber() {
        let buffer = SharedBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .with_max_level(Level::INFO)
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let net_log = NetLog::new();
            let observer = Arc::new(TracingObserver::new(Level::TRACE));
            net_log.add_observer(observer.clone(), CaptureMode::Default).unwrap();
            net_log.add_global_entry(EventType::NetworkChanged);
            net_log.remove_observer(&*observer).unwrap();
        });

        assert!(!buffer.contents().contains("NETWORK_CHANGED"));
    }

    #[test]
    fn test_filtered_level_skips_parameter_evaluation() {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(SharedBuffer::default())
            .with_max_level(Level::INFO)
            .finish();
        let calls = AtomicUsize::new(0);
        let callback = |_mode: CaptureMode| -> Option<Value> {
            calls.fetch_add(1, Ordering::SeqCst);
            Some(json!({"expensive": true}))
        };

        tracing::subscriber::with_default(subscriber, || {
            let net_log = NetLog::new();
            let quiet = Arc::new(TracingObserver::new(Level::TRACE));
            net_log.add_observer(quiet.clone(), CaptureMode::Default).unwrap();
            net_log.add_global_entry_with_params(EventType::NetworkChanged, Some(&callback));
            assert_eq!(calls.load(Ordering::SeqCst), 0);

            net_log.remove_observer(&*quiet).unwrap();
            let loud = Arc::new(TracingObserver::new(Level::WARN));
            net_log.add_observer(loud.clone(), CaptureMode::Default).unwrap();
            net_log.add_global_entry_with_params(EventType::NetworkChanged, Some(&callback));
            net_log.remove_observer(&*loud).unwrap();
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
