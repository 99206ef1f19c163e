//! Event type, source type and phase tables.
//!
//! Each enumeration carries a stable integer value and a symbolic name. The
//! names are what serialized entries carry; the "as value" mappings let
//! log viewers translate between the two.

use serde_json::{Map, Value};

macro_rules! net_log_types {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal => $label:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u32)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $value, )+
        }

        impl $name {
            /// Every known value, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Symbolic name used in serialized entries.
            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                }
            }

            pub fn value(self) -> u32 {
                self as u32
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $( $label => Some($name::$variant), )+
                    _ => None,
                }
            }

            pub fn from_value(value: u64) -> Option<Self> {
                Self::ALL.iter().copied().find(|t| u64::from(t.value()) == value)
            }

            /// A mapping from every symbolic name to its integer value.
            pub fn all_as_value() -> Value {
                let map: Map<String, Value> = Self::ALL
                    .iter()
                    .map(|t| (t.name().to_string(), Value::from(t.value())))
                    .collect();
                Value::Object(map)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

net_log_types! {
    /// What happened.
    pub enum EventType {
        /// The operation was cancelled by its owner.
        Cancelled = 0 => "CANCELLED",
        /// Spans the whole lifetime of a request.
        RequestAlive = 1 => "REQUEST_ALIVE",
        HostResolverImplRequest = 2 => "HOST_RESOLVER_IMPL_REQUEST",
        HostResolverImplJob = 3 => "HOST_RESOLVER_IMPL_JOB",
        ProxyService = 4 => "PROXY_SERVICE",
        ProxyServiceResolvedProxyList = 5 => "PROXY_SERVICE_RESOLVED_PROXY_LIST",
        SocketAlive = 6 => "SOCKET_ALIVE",
        TcpConnect = 7 => "TCP_CONNECT",
        TcpConnectAttempt = 8 => "TCP_CONNECT_ATTEMPT",
        SslConnect = 9 => "SSL_CONNECT",
        SocketReadError = 10 => "SOCKET_READ_ERROR",
        SocketWriteError = 11 => "SOCKET_WRITE_ERROR",
        SocketBytesSent = 12 => "SOCKET_BYTES_SENT",
        SocketBytesReceived = 13 => "SOCKET_BYTES_RECEIVED",
        UdpBytesSent = 14 => "UDP_BYTES_SENT",
        UdpBytesReceived = 15 => "UDP_BYTES_RECEIVED",
        SocketPoolConnectJob = 16 => "SOCKET_POOL_CONNECT_JOB",
        UrlRequestStartJob = 17 => "URL_REQUEST_START_JOB",
        HttpTransactionSendRequest = 18 => "HTTP_TRANSACTION_SEND_REQUEST",
        HttpTransactionReadHeaders = 19 => "HTTP_TRANSACTION_READ_HEADERS",
        Http2Session = 20 => "HTTP2_SESSION",
        QuicSession = 21 => "QUIC_SESSION",
        QuicSessionPacketSent = 22 => "QUIC_SESSION_PACKET_SENT",
        QuicSessionPacketReceived = 23 => "QUIC_SESSION_PACKET_RECEIVED",
        QuicSessionClosed = 24 => "QUIC_SESSION_CLOSED",
        /// Emitted with a global source when the default network changes.
        NetworkChanged = 25 => "NETWORK_CHANGED",
    }
}

net_log_types! {
    /// Which kind of entity produced an event.
    pub enum SourceType {
        None = 0 => "NONE",
        /// Process-wide events that belong to no particular entity.
        Global = 1 => "GLOBAL",
        UrlRequest = 2 => "URL_REQUEST",
        HostResolverImplJob = 3 => "HOST_RESOLVER_IMPL_JOB",
        ProxyScriptDecider = 4 => "PROXY_SCRIPT_DECIDER",
        ConnectJob = 5 => "CONNECT_JOB",
        Socket = 6 => "SOCKET",
        UdpSocket = 7 => "UDP_SOCKET",
        HttpStreamJob = 8 => "HTTP_STREAM_JOB",
        Http2Session = 9 => "HTTP2_SESSION",
        QuicSession = 10 => "QUIC_SESSION",
    }
}

/// Whether an entry opens an interval, closes one, or stands alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventPhase {
    Begin,
    End,
    /// An instantaneous event.
    None,
}

impl EventPhase {
    pub fn name(self) -> &'static str {
        match self {
            EventPhase::Begin => "BEGIN",
            EventPhase::End => "END",
            EventPhase::None => "NONE",
        }
    }
}

impl std::fmt::Display for EventPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for event_type in EventType::ALL {
            assert_eq!(EventType::from_name(event_type.name()), Some(*event_type));
            assert_eq!(EventType::from_value(u64::from(event_type.value())), Some(*event_type));
        }
        for source_type in SourceType::ALL {
            assert_eq!(SourceType::from_name(source_type.name()), Some(*source_type));
        }
    }

    #[test]
    fn test_unknown_lookups() {
        assert_eq!(EventType::from_name("NOT_AN_EVENT"), None);
        assert_eq!(SourceType::from_value(9999), None);
    }

    #[test]
    fn test_values_are_unique() {
        let mut values: Vec<u32> = EventType::ALL.iter().map(|t| t.value()).collect();
        values.sort_unstable();
        values.dedup();
        assert_eq!(values.len(), EventType::ALL.len());
    }

    #[test]
    fn test_all_as_value() {
        let types = SourceType::all_as_value();
        assert_eq!(types["NONE"], 0);
        assert_eq!(types["GLOBAL"], 1);
        assert_eq!(types["SOCKET"], SourceType::Socket.value());
        assert_eq!(types.as_object().unwrap().len(), SourceType::ALL.len());
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(EventPhase::Begin.name(), "BEGIN");
        assert_eq!(EventPhase::End.to_string(), "END");
        assert_eq!(EventPhase::None.name(), "NONE");
    }
}
