//! Lazily evaluated event parameters.
//!
//! A parameters callback turns a capture mode into the parameters of one
//! event. It is only ever invoked while the logging call that supplied it is
//! still on the stack, so it can borrow whatever the caller has at hand
//! instead of copying it up front. When nobody is observing, it is never
//! invoked at all.

use super::capture_mode::CaptureMode;
use serde_json::{Map, Value};

/// The parameters of one event, computed on demand for a given capture mode.
///
/// May be called zero, one or several times (once per observer that asks for
/// parameters) and may return `None` when there is nothing to record.
pub type ParametersCallback<'a> = dyn Fn(CaptureMode) -> Option<Value> + 'a;

fn single_entry(name: &str, value: Value) -> Value {
    let mut params = Map::with_capacity(1);
    params.insert(name.to_string(), value);
    Value::Object(params)
}

/// `{name: value}` for a boolean.
pub fn bool_callback(name: &str, value: bool) -> impl Fn(CaptureMode) -> Option<Value> + '_ {
    move |_mode| Some(single_entry(name, Value::Bool(value)))
}

/// `{name: value}` for a 32-bit integer.
pub fn int_callback(name: &str, value: i32) -> impl Fn(CaptureMode) -> Option<Value> + '_ {
    move |_mode| Some(single_entry(name, Value::from(value)))
}

/// `{name: "value"}` for a 64-bit integer.
///
/// The value is rendered as a string so consumers limited to 32-bit or
/// double-precision numbers do not lose precision.
pub fn int64_callback(name: &str, value: i64) -> impl Fn(CaptureMode) -> Option<Value> + '_ {
    move |_mode| Some(single_entry(name, Value::String(value.to_string())))
}

/// `{name: value}` for a UTF-8 string. The string is borrowed, not copied,
/// until the callback actually runs.
pub fn string_callback<'a>(
    name: &'a str,
    value: &'a str,
) -> impl Fn(CaptureMode) -> Option<Value> + 'a {
    move |_mode| Some(single_entry(name, Value::String(value.to_string())))
}

/// `{name: value}` for a UTF-16 string. Unpaired surrogates are replaced
/// with U+FFFD.
pub fn string16_callback<'a>(
    name: &'a str,
    value: &'a [u16],
) -> impl Fn(CaptureMode) -> Option<Value> + 'a {
    move |_mode| Some(single_entry(name, Value::String(String::from_utf16_lossy(value))))
}

/// `{"net_error": code}`.
pub fn net_error_callback(net_error: i32) -> impl Fn(CaptureMode) -> Option<Value> {
    move |_mode| Some(single_entry("net_error", Value::from(net_error)))
}

/// `{"byte_count": n}`, plus `"hex_encoded_bytes"` when the capture mode
/// includes socket bytes and there is anything to encode.
pub fn bytes_transferred_callback(
    byte_count: usize,
    bytes: &[u8],
) -> impl Fn(CaptureMode) -> Option<Value> + '_ {
    move |mode| {
        let mut params = Map::new();
        params.insert("byte_count".to_string(), Value::from(byte_count));
        if mode.include_socket_bytes() && byte_count > 0 {
            let shown = &bytes[..byte_count.min(bytes.len())];
            params.insert(
                "hex_encoded_bytes".to_string(),
                Value::String(hex::encode_upper(shown)),
            );
        }
        Some(Value::Object(params))
    }
}
