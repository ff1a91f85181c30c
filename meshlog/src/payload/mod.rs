//! Payload formatting for diagnostic output.
//!
//! [`format_payload`] renders any [`Serialize`] value as text:
//!
//! - mappings and sequences become indented JSON
//! - scalars become their plain textual form (strings are not quoted)
//! - non-finite floats render as `NaN`, `inf` or `-inf`, never `null`; inside a
//!   collection they appear as JSON strings
//! - anything that fails to serialize falls back to its `Debug` form
//!
//! The fallback applies to the whole payload: one leaf that cannot be
//! serialized turns the entire value into `Debug` text, structure included.
//! Wrap such leaves in [`Opaque`] to keep the rest of the payload as JSON.
//!
//! Formatting never fails. Bounding the length of the result is left to the
//! caller, see [`crate::truncate`].
//!
//! # Example
//!
//! ```rust
//! use meshlog::payload::{format_payload, DEFAULT_INDENT};
//! use serde_json::json;
//!
//! let text = format_payload(&json!({"a": 1}), DEFAULT_INDENT);
//! assert_eq!(text, "{\n  \"a\": 1\n}");
//! assert_eq!(format_payload("plain", DEFAULT_INDENT), "plain");
//! ```

mod finite;

use std::fmt;

use finite::Finite;
use serde::{Serialize, Serializer};
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

/// Spaces per nesting level used when the caller has no preference.
pub const DEFAULT_INDENT: usize = 2;

/// Render a value as bounded-effort, human-readable text.
///
/// See the [module documentation](self) for the rules. The returned string is
/// never empty for values whose `Debug` form is empty; the type name is used
/// instead.
#[must_use]
pub fn format_payload<T>(value: &T, indent: usize) -> String
where
    T: Serialize + fmt::Debug + ?Sized,
{
    match serde_json::to_value(Finite(value)) {
        Ok(value @ (Value::Object(_) | Value::Array(_))) => {
            pretty(&value, indent).unwrap_or_else(|| fallback(&value))
        }
        Ok(scalar) => scalar_text(&scalar),
        Err(err) => {
            tracing::trace!(error = %err, "payload not serializable, using debug form");
            fallback(value)
        }
    }
}

/// Render an already-dynamic JSON value.
///
/// Equivalent to [`format_payload`] without the intermediate conversion. A
/// [`Value`] cannot hold a non-finite float, so no special case applies here.
#[must_use]
pub fn format_value(value: &Value, indent: usize) -> String {
    match value {
        Value::Object(_) | Value::Array(_) => {
            pretty(value, indent).unwrap_or_else(|| fallback(value))
        }
        scalar => scalar_text(scalar),
    }
}

fn pretty(value: &Value, indent: usize) -> Option<String> {
    let spaces = " ".repeat(indent);
    let formatter = PrettyFormatter::with_indent(spaces.as_bytes());
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser).ok()?;
    String::from_utf8(buf).ok()
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn fallback<T: fmt::Debug + ?Sized>(value: &T) -> String {
    let text = format!("{value:?}");
    if text.is_empty() {
        format!("<{}>", std::any::type_name::<T>())
    } else {
        text
    }
}

/// Wrapper that serializes any [`Display`](fmt::Display) value as a string.
///
/// Use it for leaves that have no serde representation (handles, foreign
/// error types, timestamps from other crates) so they are rendered as text
/// instead of forcing the whole payload onto the `Debug` fallback.
///
/// ```rust
/// use meshlog::payload::{format_payload, Opaque};
/// use std::collections::BTreeMap;
///
/// let addr: std::net::SocketAddr = "127.0.0.1:8080".parse().unwrap();
/// let mut map = BTreeMap::new();
/// map.insert("peer", Opaque(addr));
/// assert!(format_payload(&map, 2).contains("\"127.0.0.1:8080\""));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opaque<T>(pub T);

impl<T: fmt::Display> Serialize for Opaque<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}
