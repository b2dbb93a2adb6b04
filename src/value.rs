//! Dynamically-typed configuration values.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// A dynamically-typed configuration payload.
///
/// This is a closed union over every concrete type a layer can store. Values
/// keep the exact type their source produced (file codec, environment string
/// or programmatic caller); conversion only happens when a typed getter asks
/// for a different shape (see [`crate::coerce`]).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Duration(Duration),
    StrList(Vec<String>),
    IntList(Vec<i64>),
    Map(BTreeMap<String, Value>),
    /// An explicit null from a source document.
    Nil,
}

/// A single stored entry: the key as originally written plus its payload.
///
/// Layers index entries by lower-cased key; the original casing is kept here
/// so persisted documents round-trip with the casing the source used.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub original_key: String,
    pub value: Value,
}

impl Entry {
    pub fn new(original_key: impl Into<String>, value: Value) -> Self {
        Self {
            original_key: original_key.into(),
            value,
        }
    }
}

impl fmt::Display for Value {
    /// The default textual representation used by string coercion.
    ///
    /// This is a human-readable rendering, not a serialization format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::Duration(d) => f.write_str(&format_duration(*d)),
            Value::StrList(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    f.write_str(item)?;
                }
                f.write_str("]")
            }
            Value::IntList(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(map) => {
                f.write_str("map[")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{k}:{v}")?;
                }
                f.write_str("]")
            }
            Value::Nil => Ok(()),
        }
    }
}

/// Formats a duration in compact unit notation: `5ns`, `1.5ms`, `1h30m5s`.
///
/// The counterpart of the parsing grammar in [`crate::coerce::parse_duration`].
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < 1_000 {
        return format!("{nanos}ns");
    }
    if nanos < 1_000_000 {
        return format_scaled(nanos, 1_000, "µs");
    }
    if nanos < 1_000_000_000 {
        return format_scaled(nanos, 1_000_000, "ms");
    }

    let total_secs = nanos / 1_000_000_000;
    let frac_nanos = (nanos % 1_000_000_000) as u64;
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if mins > 0 || hours > 0 {
        out.push_str(&format!("{mins}m"));
    }
    if frac_nanos == 0 {
        out.push_str(&format!("{secs}s"));
    } else {
        let mut frac = format!("{frac_nanos:09}");
        while frac.ends_with('0') {
            frac.pop();
        }
        out.push_str(&format!("{secs}.{frac}s"));
    }
    out
}

/// Renders `value / scale` with the fractional part trimmed of trailing zeros.
fn format_scaled(value: u128, scale: u128, unit: &str) -> String {
    let whole = value / scale;
    let rem = value % scale;
    if rem == 0 {
        return format!("{whole}{unit}");
    }
    let width = scale.ilog10() as usize;
    let mut frac = format!("{rem:0width$}");
    while frac.ends_with('0') {
        frac.pop();
    }
    format!("{whole}.{frac}{unit}")
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Str(s) => serializer.serialize_str(s),
            // Durations persist as a nanosecond count, which the numeric
            // duration coercion reads back on load.
            Value::Duration(d) => {
                serializer.serialize_i64(i64::try_from(d.as_nanos()).unwrap_or(i64::MAX))
            }
            Value::StrList(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::IntList(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => {
                let mut m = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    m.serialize_entry(k, v)?;
                }
                m.end()
            }
            Value::Nil => serializer.serialize_unit(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u16> for Value {
    fn from(i: u16) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(f64::from(x))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Duration> for Value {
    fn from(d: Duration) -> Self {
        Value::Duration(d)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::StrList(items)
    }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Value::StrList(items.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<i64>> for Value {
    fn from(items: Vec<i64>) -> Self {
        Value::IntList(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Map(map)
    }
}
