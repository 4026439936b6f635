//! Raw notification records as handed over by the transport.
//!
//! Records have no fixed schema. Which keys are present depends on the
//! event type and on the server, so every accessor here fails soft and
//! returns `None` instead of an error.

use serde_json::{Map, Value};

/// A borrowed, untyped notification record.
///
/// The record only reads from the caller's value; it is never modified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawEventRecord<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> RawEventRecord<'a> {
    /// Wraps a field map.
    #[must_use]
    pub const fn new(fields: &'a Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Wraps a JSON value, returning `None` unless it is an object.
    #[must_use]
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(Self::new)
    }

    /// Returns true if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns true if the key is present with a non-null value.
    ///
    /// Servers write `"key": null` for fields they do not fill in.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some_and(|value| !value.is_null())
    }

    /// Returns the raw value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields.get(key)
    }

    /// Returns a string field. Non-string values yield `None`.
    #[must_use]
    pub fn str(&self, key: &str) -> Option<&'a str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Returns a scalar field rendered as text.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(value_text)
    }

    /// Returns a field converted to an integer.
    ///
    /// See [`value_int`] for the conversion rules.
    #[must_use]
    pub fn int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(value_int)
    }
}

/// Renders a scalar JSON value as text.
///
/// Strings are returned verbatim, numbers and booleans in their JSON form.
/// Null, arrays and objects yield `None`.
#[must_use]
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Converts a JSON value to an integer the way servers' loose counters
/// are usually meant.
///
/// - integers are taken as is, floats are truncated toward zero
/// - strings are read from their leading optional sign and digits, a
///   string without leading digits counts as `0`
/// - booleans map to `0` and `1`
/// - null, arrays and objects yield `None`
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn value_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|u| i64::try_from(u).unwrap_or(i64::MAX)))
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => Some(leading_int(s)),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Parses the leading integer of a string, saturating on overflow.
fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut n: i64 = 0;
    for d in digits.bytes().take_while(u8::is_ascii_digit) {
        let d = i64::from(d - b'0');
        n = match n.checked_mul(10).and_then(|n| {
            if negative {
                n.checked_sub(d)
            } else {
                n.checked_add(d)
            }
        }) {
            Some(n) => n,
            None if negative => return i64::MIN,
            None => return i64::MAX,
        };
    }
    n
}
