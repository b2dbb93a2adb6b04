//! Best-effort conversion of stored values into requested types.
//!
//! Scalar targets (bool, int, duration, string) are permissive: values that
//! round-tripped through a serialization format which blurs types (a numeric
//! flag standing in for a bool, a quoted integer) still convert. Composite
//! targets (maps, lists) only match their exact stored shape; structural
//! coercion would be ambiguous, so none is attempted.
//!
//! Nothing here returns an error. A value that cannot be converted resolves
//! to the target type's zero value, and callers probing for an absent key get
//! the same. Tests pin this down per type.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::value::Value;

/// Converts a stored value to a boolean.
///
/// Strings convert by case-insensitive comparison against `"true"`; every
/// other string is false. Numbers are false at zero and true otherwise,
/// negatives included. Durations are true when positive.
pub fn to_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Str(s) => s.eq_ignore_ascii_case("true"),
        Value::Int(i) => *i != 0,
        Value::Float(x) => *x != 0.0,
        Value::Duration(d) => !d.is_zero(),
        Value::Nil | Value::StrList(_) | Value::IntList(_) | Value::Map(_) => false,
    }
}

/// Converts a stored value to an integer.
///
/// Floats truncate toward zero. Strings parse as decimal integers; an empty
/// or non-numeric string yields 0.
pub fn to_int(value: &Value) -> i64 {
    match value {
        Value::Int(i) => *i,
        Value::Float(x) => *x as i64,
        Value::Str(s) => s.parse().unwrap_or(0),
        Value::Bool(_)
        | Value::Duration(_)
        | Value::Nil
        | Value::StrList(_)
        | Value::IntList(_)
        | Value::Map(_) => 0,
    }
}

/// Converts a stored value to a duration.
///
/// Strings use the duration-literal grammar of [`parse_duration`]. Numbers
/// are read as a nanosecond count, truncating floats; a negative count is
/// unrepresentable and yields zero, as does an unparseable string.
pub fn to_duration(value: &Value) -> Duration {
    match value {
        Value::Duration(d) => *d,
        Value::Str(s) => parse_duration(s).unwrap_or(Duration::ZERO),
        Value::Int(i) => u64::try_from(*i).map_or(Duration::ZERO, Duration::from_nanos),
        Value::Float(x) => {
            if *x >= 0.0 {
                Duration::from_nanos(*x as u64)
            } else {
                Duration::ZERO
            }
        }
        Value::Bool(_)
        | Value::Nil
        | Value::StrList(_)
        | Value::IntList(_)
        | Value::Map(_) => Duration::ZERO,
    }
}

/// Converts a stored value to a string via its default textual rendering.
pub fn to_string(value: &Value) -> String {
    match value {
        Value::Str(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Returns the stored map when the payload is exactly a string-keyed map.
pub fn to_string_map(value: &Value) -> Option<BTreeMap<String, Value>> {
    match value {
        Value::Map(map) => Some(map.clone()),
        _ => None,
    }
}

/// Returns the stored list when the payload is exactly a list of strings.
pub fn to_string_slice(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::StrList(items) => Some(items.clone()),
        _ => None,
    }
}

/// Returns the stored list when the payload is exactly a list of integers.
pub fn to_int_slice(value: &Value) -> Option<Vec<i64>> {
    match value {
        Value::IntList(items) => Some(items.clone()),
        _ => None,
    }
}

/// Nanoseconds per unit suffix, longest suffixes first so `ms` wins over `s`.
const UNITS: &[(&str, u128)] = &[
    ("ns", 1),
    ("us", 1_000),
    ("µs", 1_000),
    ("μs", 1_000),
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
    ("m", 60_000_000_000),
    ("h", 3_600_000_000_000),
];

/// Parses a duration literal such as `"5s"`, `"10m"`, `"1h30m"` or `"1.5ms"`.
///
/// The grammar is a signed sequence of decimal numbers, each with an optional
/// fraction and a mandatory unit suffix (`ns`, `us`/`µs`, `ms`, `s`, `m`,
/// `h`). The bare literal `"0"` is accepted without a unit. A negative
/// duration cannot be represented and yields `None`.
pub fn parse_duration(input: &str) -> Option<Duration> {
    let mut s = input;
    let mut negative = false;
    if let Some(rest) = s.strip_prefix('-') {
        negative = true;
        s = rest;
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }

    if s == "0" {
        return Some(Duration::ZERO);
    }
    if s.is_empty() {
        return None;
    }

    let mut total: u128 = 0;
    while !s.is_empty() {
        let (segment_nanos, rest) = parse_segment(s)?;
        total = total.checked_add(segment_nanos)?;
        s = rest;
    }

    if negative {
        // "-0s" and friends still mean zero.
        return (total == 0).then_some(Duration::ZERO);
    }
    let secs = u64::try_from(total / 1_000_000_000).ok()?;
    Some(Duration::new(secs, (total % 1_000_000_000) as u32))
}

/// Parses one `number[.fraction]unit` segment, returning its nanoseconds and
/// the unconsumed remainder.
fn parse_segment(s: &str) -> Option<(u128, &str)> {
    let int_end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let int_part = &s[..int_end];
    let mut rest = &s[int_end..];

    let mut frac_part = "";
    if let Some(after_dot) = rest.strip_prefix('.') {
        let frac_end = after_dot
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(after_dot.len());
        frac_part = &after_dot[..frac_end];
        rest = &after_dot[frac_end..];
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let (unit, rest) = match UNITS
        .iter()
        .filter(|(suffix, _)| rest.starts_with(suffix))
        .max_by_key(|(suffix, _)| suffix.len())
    {
        Some((suffix, nanos)) => (*nanos, &rest[suffix.len()..]),
        None => return None,
    };

    let whole: u128 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().ok()?
    };
    let mut nanos = whole.checked_mul(unit)?;

    if !frac_part.is_empty() {
        let mut scale = unit;
        for digit in frac_part.bytes() {
            scale /= 10;
            nanos = nanos.checked_add(u128::from(digit - b'0').checked_mul(scale)?)?;
        }
    }

    Some((nanos, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_passthrough_and_strings() {
        assert!(to_bool(&Value::Bool(true)));
        assert!(!to_bool(&Value::Bool(false)));
        assert!(to_bool(&Value::Str("true".into())));
        assert!(to_bool(&Value::Str("TRUE".into())));
        assert!(to_bool(&Value::Str("True".into())));
        assert!(!to_bool(&Value::Str("yes".into())));
        assert!(!to_bool(&Value::Str("1".into())));
        assert!(!to_bool(&Value::Str("".into())));
    }

    #[test]
    fn test_bool_from_numbers() {
        assert!(to_bool(&Value::Int(1)));
        assert!(to_bool(&Value::Int(-3)));
        assert!(!to_bool(&Value::Int(0)));
        assert!(to_bool(&Value::Float(0.5)));
        assert!(!to_bool(&Value::Float(0.0)));
    }

    #[test]
    fn test_bool_from_duration_and_unsupported_shapes() {
        assert!(to_bool(&Value::Duration(Duration::from_secs(1))));
        assert!(!to_bool(&Value::Duration(Duration::ZERO)));
        assert!(!to_bool(&Value::Nil));
        assert!(!to_bool(&Value::StrList(vec!["true".into()])));
        assert!(!to_bool(&Value::Map(Default::default())));
    }

    #[test]
    fn test_int_passthrough_and_truncation() {
        assert_eq!(to_int(&Value::Int(8080)), 8080);
        assert_eq!(to_int(&Value::Float(5.9)), 5);
        assert_eq!(to_int(&Value::Float(-5.9)), -5);
    }

    #[test]
    fn test_int_from_strings() {
        assert_eq!(to_int(&Value::Str("5".into())), 5);
        assert_eq!(to_int(&Value::Str("-12".into())), -12);
        assert_eq!(to_int(&Value::Str("".into())), 0);
        assert_eq!(to_int(&Value::Str("5x".into())), 0);
        assert_eq!(to_int(&Value::Str("5.5".into())), 0);
    }

    #[test]
    fn test_int_unsupported_shapes() {
        assert_eq!(to_int(&Value::Bool(true)), 0);
        assert_eq!(to_int(&Value::Nil), 0);
        assert_eq!(to_int(&Value::IntList(vec![1])), 0);
    }

    #[test]
    fn test_duration_from_numbers_is_nanoseconds() {
        assert_eq!(to_duration(&Value::Int(5)), Duration::from_nanos(5));
        assert_eq!(to_duration(&Value::Float(5.5)), Duration::from_nanos(5));
        assert_eq!(to_duration(&Value::Int(-5)), Duration::ZERO);
        assert_eq!(to_duration(&Value::Float(-0.5)), Duration::ZERO);
    }

    #[test]
    fn test_duration_from_strings() {
        assert_eq!(to_duration(&Value::Str("5s".into())), Duration::from_secs(5));
        assert_eq!(to_duration(&Value::Str("10m".into())), Duration::from_secs(600));
        assert_eq!(to_duration(&Value::Str("bogus".into())), Duration::ZERO);
        assert_eq!(to_duration(&Value::Str("".into())), Duration::ZERO);
    }

    #[test]
    fn test_duration_unsupported_shapes() {
        assert_eq!(to_duration(&Value::Nil), Duration::ZERO);
        assert_eq!(to_duration(&Value::Bool(true)), Duration::ZERO);
        assert_eq!(to_duration(&Value::StrList(vec!["5s".into()])), Duration::ZERO);
    }

    #[test]
    fn test_string_rendering() {
        assert_eq!(to_string(&Value::Str("config".into())), "config");
        assert_eq!(to_string(&Value::Int(8080)), "8080");
        assert_eq!(to_string(&Value::Bool(true)), "true");
        assert_eq!(to_string(&Value::Duration(Duration::from_secs(5))), "5s");
        assert_eq!(to_string(&Value::Nil), "");
    }

    #[test]
    fn test_composite_shape_strictness() {
        let list = Value::StrList(vec!["a".into(), "b".into()]);
        assert_eq!(to_string_slice(&list), Some(vec!["a".into(), "b".into()]));
        assert_eq!(to_int_slice(&list), None);
        assert_eq!(to_string_map(&list), None);

        let ints = Value::IntList(vec![1, 2, 3]);
        assert_eq!(to_int_slice(&ints), Some(vec![1, 2, 3]));
        assert_eq!(to_string_slice(&ints), None);

        assert_eq!(to_string_slice(&Value::Str("a".into())), None);
        assert_eq!(to_string_map(&Value::Int(1)), None);
    }

    #[test]
    fn test_parse_duration_basic_units() {
        assert_eq!(parse_duration("5s"), Some(Duration::from_secs(5)));
        assert_eq!(parse_duration("300ms"), Some(Duration::from_millis(300)));
        assert_eq!(parse_duration("10m"), Some(Duration::from_secs(600)));
        assert_eq!(parse_duration("2h"), Some(Duration::from_secs(7200)));
        assert_eq!(parse_duration("7ns"), Some(Duration::from_nanos(7)));
        assert_eq!(parse_duration("4us"), Some(Duration::from_micros(4)));
        assert_eq!(parse_duration("4µs"), Some(Duration::from_micros(4)));
    }

    #[test]
    fn test_parse_duration_composite_and_fractions() {
        assert_eq!(parse_duration("1h30m"), Some(Duration::from_secs(5400)));
        assert_eq!(parse_duration("1m30s"), Some(Duration::from_secs(90)));
        assert_eq!(parse_duration("1.5s"), Some(Duration::from_millis(1500)));
        assert_eq!(parse_duration(".5s"), Some(Duration::from_millis(500)));
        assert_eq!(parse_duration("1.5h"), Some(Duration::from_secs(5400)));
    }

    #[test]
    fn test_parse_duration_zero_and_signs() {
        assert_eq!(parse_duration("0"), Some(Duration::ZERO));
        assert_eq!(parse_duration("+5s"), Some(Duration::from_secs(5)));
        assert_eq!(parse_duration("-0s"), Some(Duration::ZERO));
        // Negative durations are unrepresentable.
        assert_eq!(parse_duration("-5s"), None);
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("5"), None);
        assert_eq!(parse_duration("s"), None);
        assert_eq!(parse_duration("five seconds"), None);
        assert_eq!(parse_duration("5 s"), None);
        assert_eq!(parse_duration("5x"), None);
    }
}
