//! Sort direction and sort specification.
//!
//! Provides [`Dir`] for sort direction and [`SortSpec`] for field-based
//! ordering of filtered results.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{FilterError, Result};
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Applies this direction to an ordering.
    ///
    /// For `Asc`, returns the ordering unchanged.
    /// For `Desc`, reverses the ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the opposite direction, as a column header toggle does.
    pub fn toggle(self) -> Dir {
        match self {
            Dir::Asc => Dir::Desc,
            Dir::Desc => Dir::Asc,
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Dir {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Dir::Asc),
            "desc" => Ok(Dir::Desc),
            _ => Err(FilterError::InvalidDirection(s.to_string())),
        }
    }
}

/// The requested ordering of a result: a field and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    #[serde(default)]
    pub dir: Dir,
}

impl SortSpec {
    /// Creates a new ascending ordering for the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        SortSpec::new(field, Dir::Asc)
    }

    /// Creates a new descending ordering for the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        SortSpec::new(field, Dir::Desc)
    }

    /// Creates a new ordering with the given direction.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        SortSpec {
            field: field.into(),
            dir,
        }
    }

    /// Compares two values according to this ordering.
    ///
    /// Returns `None` if the values cannot be compared (kind mismatch or NaN).
    pub fn compare(&self, a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
        let base_ordering = compare_values(a, b)?;
        Some(self.dir.apply(base_ordering))
    }

    /// Compares two records by this ordering's field.
    ///
    /// Always a total order: values of different kinds are grouped by
    /// kind and NaN sorts by `f64::total_cmp`, so sorting never panics on
    /// inconsistent data.
    pub fn compare_records<T, F>(&self, a: &T, b: &T, accessor: &F) -> Ordering
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        let val_a = accessor(a, &self.field);
        let val_b = accessor(b, &self.field);
        let base = compare_values(&val_a, &val_b).unwrap_or_else(|| fallback(&val_a, &val_b));
        self.dir.apply(base)
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.dir)
    }
}

/// Parses `field`, `field:asc` or `field:desc`.
impl FromStr for SortSpec {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        let (field, dir) = match s.split_once(':') {
            Some((field, dir)) => (field.trim(), dir.parse()?),
            None => (s.trim(), Dir::Asc),
        };

        if field.is_empty() {
            return Err(FilterError::InvalidSort(s.to_string()));
        }

        Ok(SortSpec::new(field, dir))
    }
}

/// Compares two values of the same kind.
///
/// Dates and date-times compare with each other on the timeline, a date
/// standing for its midnight. Missing values sort after present ones.
/// Returns `None` if the kinds don't match or comparison is not possible (NaN).
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Number(a), Value::Number(b)) => a.compare(*b),
        (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
        (Value::DateTime(a), Value::DateTime(b)) => Some(a.cmp(b)),
        (Value::Date(a), Value::DateTime(b)) => Some(a.and_time(NaiveTime::MIN).cmp(b)),
        (Value::DateTime(a), Value::Date(b)) => Some(a.cmp(&b.and_time(NaiveTime::MIN))),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),

        // None values sort last
        (Value::None, Value::None) => Some(Ordering::Equal),
        (Value::None, _) => Some(Ordering::Greater),
        (_, Value::None) => Some(Ordering::Less),

        _ => None,
    }
}

fn fallback(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => x.to_f64().total_cmp(&y.to_f64()),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn kind_rank(value: &Value<'_>) -> u8 {
    match value {
        Value::String(_) => 0,
        Value::Number(_) => 1,
        Value::Date(_) | Value::DateTime(_) => 2,
        Value::Bool(_) => 3,
        Value::None => 4,
    }
}
