//! Runtime value types for field comparison.
//!
//! [`Value`] is what a field accessor hands back for one field of one
//! record. [`FieldValue`] is its owned counterpart, used as the required
//! value of a select filter.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Format used when a date is rendered for search or string comparison.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format used when a date-time is rendered for search or string comparison.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Runtime value of a record field, borrowed from the source record.
///
/// # Example
///
/// ```
/// use ems_filter::{Value, Number};
///
/// struct Employee {
///     name: String,
///     grade: u8,
/// }
///
/// fn accessor<'a>(employee: &'a Employee, field: &str) -> Value<'a> {
///     match field {
///         "name" => Value::String(&employee.name),
///         "grade" => Value::Number(Number::U64(employee.grade as u64)),
///         _ => Value::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed). Enum-like fields are strings too.
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Calendar date.
    Date(NaiveDate),
    /// Date and time of day, without timezone.
    DateTime(NaiveDateTime),
    /// Boolean value.
    Bool(bool),
    /// Field not present, null, or unsupported.
    None,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the calendar date of a `Date` or `DateTime` value.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            Value::DateTime(dt) => Some(dt.date()),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the text a search box sees for this value.
    ///
    /// Strings are borrowed as is; other kinds are rendered in their
    /// display form. `None` has no text and never matches a search.
    pub fn to_text(&self) -> Option<Cow<'a, str>> {
        match self {
            Value::String(s) => Some(Cow::Borrowed(s)),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Date(d) => Some(Cow::Owned(d.format(DATE_FORMAT).to_string())),
            Value::DateTime(dt) => Some(Cow::Owned(dt.format(DATETIME_FORMAT).to_string())),
            Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            Value::None => None,
        }
    }

    /// Returns the kind name, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
            Value::Bool(_) => "bool",
            Value::None => "none",
        }
    }
}

/// Numeric value preserving the precision of the source field.
///
/// Comparisons between different representations go through `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{}", n),
            Number::U64(n) => write!(f, "{}", n),
            Number::F64(n) => write!(f, "{}", n),
        }
    }
}

macro_rules! number_from {
    ($variant:ident, $target:ty; $($source:ty),*) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }
        )*
    };
}

number_from!(I64, i64; i8, i16, i32, i64, isize);
number_from!(U64, u64; u8, u16, u32, u64, usize);
number_from!(F64, f64; f32, f64);

/// Owned value a select filter requires a field to equal.
///
/// Select controls produce strings, so deserialization yields `Bool`,
/// `Number` or `String`. A `String` filter value also matches non-string
/// fields whose display form is identical, which is how a select of
/// dates or numbers behaves when its options are plain text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(Number),
    /// String value, compared case-sensitively.
    String(String),
    /// Calendar date.
    Date(NaiveDate),
    /// Date and time of day.
    DateTime(NaiveDateTime),
}

impl FieldValue {
    /// Returns `true` if a record field holds exactly this value.
    ///
    /// Missing fields never match.
    pub fn matches(&self, field: &Value<'_>) -> bool {
        match (self, field) {
            (_, Value::None) => false,
            (FieldValue::String(want), Value::String(have)) => want == have,
            (FieldValue::String(want), other) => {
                other.to_text().is_some_and(|text| text == want.as_str())
            }
            (FieldValue::Number(want), Value::Number(have)) => {
                have.compare(*want) == Some(Ordering::Equal)
            }
            (FieldValue::Bool(want), Value::Bool(have)) => want == have,
            (FieldValue::Date(want), Value::Date(have)) => want == have,
            (FieldValue::Date(want), Value::DateTime(have)) => *want == have.date(),
            (FieldValue::DateTime(want), Value::DateTime(have)) => want == have,
            _ => false,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::String(s) => f.write_str(s),
            FieldValue::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            FieldValue::DateTime(dt) => write!(f, "{}", dt.format(DATETIME_FORMAT)),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<Number> for FieldValue {
    fn from(n: Number) -> Self {
        FieldValue::Number(n)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(d: NaiveDate) -> Self {
        FieldValue::Date(d)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(dt: NaiveDateTime) -> Self {
        FieldValue::DateTime(dt)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(Number::from(n))
    }
}

impl From<u64> for FieldValue {
    fn from(n: u64) -> Self {
        FieldValue::Number(Number::from(n))
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Number(Number::from(n))
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        FieldValue::Number(Number::from(n))
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(Number::from(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn value_extractors() {
        assert_eq!(Value::String("hello").as_str(), Some("hello"));
        assert_eq!(
            Value::Number(Number::I64(42)).as_number(),
            Some(Number::I64(42))
        );
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::String("test").as_number(), None);
        assert!(Value::None.is_none());
    }

    #[test]
    fn as_date_covers_datetimes() {
        let dt = date(2024, 3, 5).and_hms_opt(14, 30, 0).unwrap();
        assert_eq!(Value::Date(date(2024, 3, 5)).as_date(), Some(date(2024, 3, 5)));
        assert_eq!(Value::DateTime(dt).as_date(), Some(date(2024, 3, 5)));
        assert_eq!(Value::String("2024-03-05").as_date(), None);
    }

    #[test]
    fn to_text_renders_every_kind() {
        assert_eq!(Value::String("Sarah").to_text().as_deref(), Some("Sarah"));
        assert_eq!(Value::Number(Number::U64(7)).to_text().as_deref(), Some("7"));
        assert_eq!(
            Value::Date(date(2024, 6, 1)).to_text().as_deref(),
            Some("2024-06-01")
        );
        assert_eq!(Value::Bool(false).to_text().as_deref(), Some("false"));
        assert_eq!(Value::None.to_text(), None);
    }

    #[test]
    fn number_comparisons_mixed_types() {
        assert_eq!(
            Number::I64(5).compare(Number::U64(10)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::I64(5).compare(Number::F64(5.0)),
            Some(Ordering::Equal)
        );
        assert_eq!(Number::F64(f64::NAN).compare(Number::F64(1.0)), None);
    }

    #[test]
    fn number_conversions() {
        assert_eq!(Number::from(42i32), Number::I64(42));
        assert_eq!(Number::from(42u32), Number::U64(42));
        assert_eq!(Number::from(42.5f64), Number::F64(42.5));
    }

    #[test]
    fn field_value_string_is_case_sensitive() {
        let hr = FieldValue::from("HR");
        assert!(hr.matches(&Value::String("HR")));
        assert!(!hr.matches(&Value::String("hr")));
        assert!(!hr.matches(&Value::None));
    }

    #[test]
    fn field_value_string_matches_display_form() {
        assert!(FieldValue::from("2024-06-01").matches(&Value::Date(date(2024, 6, 1))));
        assert!(FieldValue::from("12").matches(&Value::Number(Number::U64(12))));
        assert!(FieldValue::from("true").matches(&Value::Bool(true)));
    }

    #[test]
    fn field_value_numbers_compare_across_representations() {
        assert!(FieldValue::from(3i64).matches(&Value::Number(Number::F64(3.0))));
        assert!(!FieldValue::from(3i64).matches(&Value::Number(Number::U64(4))));
        assert!(!FieldValue::from(3i64).matches(&Value::String("3")));
    }

    #[test]
    fn field_value_date_matches_same_day_datetime() {
        let dt = date(2024, 1, 15).and_hms_opt(9, 0, 0).unwrap();
        assert!(FieldValue::from(date(2024, 1, 15)).matches(&Value::DateTime(dt)));
        assert!(!FieldValue::from(date(2024, 1, 16)).matches(&Value::DateTime(dt)));
    }

    #[test]
    fn field_value_deserializes_scalars() {
        let values: Vec<FieldValue> = serde_json::from_str(r#"[true, 3, "HR"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                FieldValue::Bool(true),
                FieldValue::Number(Number::I64(3)),
                FieldValue::String("HR".to_string()),
            ]
        );
    }
}
