//! Identity of the entity behind an event.

use super::catalog::SourceType;
use super::capture_mode::CaptureMode;
use serde_json::{json, Map, Value};

/// Identifies the entity that generated an entry: a request, a socket, a
/// session. Ids come from [`NetLog::next_id`](super::NetLog::next_id) and are
/// what log consumers use to group entries together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Source {
    pub source_type: SourceType,
    pub id: u32,
}

impl Source {
    pub const INVALID_ID: u32 = 0;

    pub fn new(source_type: SourceType, id: u32) -> Self {
        Self { source_type, id }
    }

    pub fn is_valid(&self) -> bool {
        self.id != Self::INVALID_ID
    }

    /// The `{"id", "type"}` pair used both in entry records and in
    /// dependency references.
    pub(crate) fn id_and_type(&self) -> Value {
        json!({
            "id": self.id,
            "type": self.source_type.name(),
        })
    }

    /// A single-key mapping `{"source_dependency": {"id", "type"}}`, for
    /// embedding a reference to this source in another event's parameters.
    pub fn to_serializable(&self) -> Value {
        let mut params = Map::new();
        self.add_to_event_parameters(&mut params);
        Value::Object(params)
    }

    /// Adds the `source_dependency` key to an existing parameter map.
    pub fn add_to_event_parameters(&self, params: &mut Map<String, Value>) {
        params.insert("source_dependency".to_string(), self.id_and_type());
    }

    /// A parameters callback that yields [`Source::to_serializable`] at any
    /// capture mode.
    pub fn to_event_parameters_callback(&self) -> impl Fn(CaptureMode) -> Option<Value> + '_ {
        move |_mode| Some(self.to_serializable())
    }

    /// Extracts a source from event parameters produced by
    /// [`Source::to_serializable`].
    ///
    /// Returns `None` for anything that is not a well-formed, valid source
    /// reference. The source type may be given by name or by value.
    pub fn from_serializable(params: &Value) -> Option<Source> {
        let dependency = params.get("source_dependency")?.as_object()?;

        let id = dependency.get("id")?.as_u64()?;
        let id = u32::try_from(id).ok()?;

        let source_type = match dependency.get("type")? {
            Value::String(name) => SourceType::from_name(name)?,
            Value::Number(value) => SourceType::from_value(value.as_u64()?)?,
            _ => return None,
        };

        let source = Source::new(source_type, id);
        source.is_valid().then_some(source)
    }
}

impl Default for Source {
    fn default() -> Self {
        Self::new(SourceType::None, Self::INVALID_ID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_invalid() {
        let source = Source::default();
        assert!(!source.is_valid());
        assert_eq!(source.source_type, SourceType::None);
    }

    #[test]
    fn test_is_valid() {
        assert!(Source::new(SourceType::Socket, 1).is_valid());
        assert!(!Source::new(SourceType::Socket, Source::INVALID_ID).is_valid());
    }

    #[test]
    fn test_to_serializable_shape() {
        let source = Source::new(SourceType::UrlRequest, 42);
        let value = source.to_serializable();

        assert_eq!(
            value,
            json!({"source_dependency": {"id": 42, "type": "URL_REQUEST"}})
        );
    }

    #[test]
    fn test_round_trip() {
        for (i, source_type) in SourceType::ALL.iter().enumerate() {
            let source = Source::new(*source_type, i as u32 + 1);
            let restored = Source::from_serializable(&source.to_serializable());
            assert_eq!(restored, Some(source));
        }

        let max = Source::new(SourceType::QuicSession, u32::MAX);
        assert_eq!(Source::from_serializable(&max.to_serializable()), Some(max));
    }

    #[test]
    fn test_from_serializable_accepts_numeric_type() {
        let value = json!({"source_dependency": {"id": 9, "type": SourceType::Socket.value()}});
        assert_eq!(
            Source::from_serializable(&value),
            Some(Source::new(SourceType::Socket, 9))
        );
    }

    #[test]
    fn test_from_serializable_malformed() {
        let malformed = [
            json!(null),
            json!(17),
            json!("source_dependency"),
            json!({}),
            json!({"source_dependency": null}),
            json!({"source_dependency": []}),
            json!({"source_dependency": {"type": "SOCKET"}}),
            json!({"source_dependency": {"id": 5}}),
            json!({"source_dependency": {"id": -5, "type": "SOCKET"}}),
            json!({"source_dependency": {"id": 1.5, "type": "SOCKET"}}),
            json!({"source_dependency": {"id": "5", "type": "SOCKET"}}),
            json!({"source_dependency": {"id": 5_000_000_000u64, "type": "SOCKET"}}),
            json!({"source_dependency": {"id": 5, "type": "NO_SUCH_TYPE"}}),
            json!({"source_dependency": {"id": 5, "type": 4096}}),
            json!({"source_dependency": {"id": 5, "type": true}}),
            json!({"source_dependency": {"id": 0, "type": "SOCKET"}}),
        ];

        for value in &malformed {
            assert_eq!(Source::from_serializable(value), None, "accepted {}", value);
        }
    }

    #[test]
    fn test_add_to_event_parameters_keeps_existing_keys() {
        let mut params = Map::new();
        params.insert("byte_count".to_string(), json!(10));

        Source::new(SourceType::Socket, 3).add_to_event_parameters(&mut params);

        assert_eq!(params["byte_count"], 10);
        assert_eq!(params["source_dependency"]["id"], 3);
    }

    #[test]
    fn test_event_parameters_callback() {
        let source = Source::new(SourceType::ConnectJob, 11);
        let callback = source.to_event_parameters_callback();

        assert_eq!(callback(CaptureMode::Default), Some(source.to_serializable()));
        assert_eq!(callback(CaptureMode::IncludeSocketBytes), Some(source.to_serializable()));
    }
}
