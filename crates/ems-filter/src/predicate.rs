//! The three predicate kinds a filter combines.
//!
//! - [`SearchPredicate`]: case-insensitive substring search over a list
//!   of fields, any of which may match
//! - [`ExactPredicate`]: a select control, case-sensitive equality
//! - [`DateRange`]: inclusive bounds on a date field
//!
//! Each one reports whether it is active. An inactive predicate accepts
//! every record.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{FilterError, Result};
use crate::value::{FieldValue, Value, DATE_FORMAT};

/// Sentinel a select control sends when it has no constraint.
pub const ALL: &str = "all";

/// Text search over one or more fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchPredicate {
    /// Text typed by the user. Empty disables the predicate.
    pub text: String,
    /// Fields tested, in order.
    pub fields: Vec<String>,
}

impl SearchPredicate {
    /// Creates a search over the given fields.
    pub fn new<I, S>(text: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SearchPredicate {
            text: text.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` when there is text to search for.
    pub fn is_active(&self) -> bool {
        !self.text.is_empty()
    }

    /// Returns the case-folded needle, or `None` when inactive.
    pub fn needle(&self) -> Option<String> {
        self.is_active().then(|| self.text.to_lowercase())
    }

    /// Tests one record, given a pre-folded needle from [`needle`](Self::needle).
    pub fn matches_folded<T, F>(&self, needle: &str, item: &T, accessor: &F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        self.fields.iter().any(|field| {
            accessor(item, field)
                .to_text()
                .is_some_and(|text| text.to_lowercase().contains(needle))
        })
    }

    /// Tests one record. Inactive searches match everything.
    pub fn matches<T, F>(&self, item: &T, accessor: &F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        match self.needle() {
            Some(needle) => self.matches_folded(&needle, item, accessor),
            None => true,
        }
    }
}

/// State of one select control.
///
/// `All` is the `"all"` sentinel: the control is present but imposes no
/// constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "FieldValue", into = "FieldValue")]
pub enum Selection {
    /// No constraint.
    #[default]
    All,
    /// The field must equal this value.
    Only(FieldValue),
}

impl Selection {
    /// Returns `true` unless this is the sentinel.
    pub fn is_active(&self) -> bool {
        matches!(self, Selection::Only(_))
    }

    /// Tests a field value. `All` matches anything, including missing fields.
    pub fn matches(&self, value: &Value<'_>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(want) => want.matches(value),
        }
    }
}

impl From<FieldValue> for Selection {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::String(s) if s == ALL => Selection::All,
            other => Selection::Only(other),
        }
    }
}

impl From<Selection> for FieldValue {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::All => FieldValue::String(ALL.to_string()),
            Selection::Only(value) => value,
        }
    }
}

impl From<&str> for Selection {
    fn from(s: &str) -> Self {
        Selection::from(FieldValue::from(s))
    }
}

impl From<String> for Selection {
    fn from(s: String) -> Self {
        Selection::from(FieldValue::from(s))
    }
}

impl From<bool> for Selection {
    fn from(b: bool) -> Self {
        Selection::Only(FieldValue::Bool(b))
    }
}

impl From<i64> for Selection {
    fn from(n: i64) -> Self {
        Selection::Only(FieldValue::from(n))
    }
}

impl From<u32> for Selection {
    fn from(n: u32) -> Self {
        Selection::Only(FieldValue::from(n))
    }
}

impl From<NaiveDate> for Selection {
    fn from(d: NaiveDate) -> Self {
        Selection::Only(FieldValue::Date(d))
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str(ALL),
            Selection::Only(value) => write!(f, "{}", value),
        }
    }
}

/// A select filter bound to a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExactPredicate {
    /// Field the select control constrains.
    pub field: String,
    /// Current selection.
    pub selection: Selection,
}

impl ExactPredicate {
    /// Creates a select filter.
    pub fn new(field: impl Into<String>, selection: impl Into<Selection>) -> Self {
        ExactPredicate {
            field: field.into(),
            selection: selection.into(),
        }
    }

    /// Returns `true` unless the selection is the sentinel.
    pub fn is_active(&self) -> bool {
        self.selection.is_active()
    }

    /// Tests one record.
    pub fn matches<T, F>(&self, item: &T, accessor: &F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        if !self.is_active() {
            return true;
        }
        self.selection.matches(&accessor(item, &self.field))
    }
}

/// Parses `field=value` as typed on a command line or in a query string.
impl FromStr for ExactPredicate {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('=') {
            Some((field, value)) if !field.trim().is_empty() => {
                Ok(ExactPredicate::new(field.trim(), value))
            }
            _ => Err(FilterError::InvalidSelection(s.to_string())),
        }
    }
}

/// Inclusive date bounds. A missing bound is open on that side.
///
/// Bounds are calendar dates; date-time fields are compared on their
/// date, so an `end` of 2024-08-31 keeps an entry logged at 23:59 that day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateRange {
    /// Earliest date kept.
    pub start: Option<NaiveDate>,
    /// Latest date kept.
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Creates a range from optional bounds.
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        DateRange { start, end }
    }

    /// Creates a range bounded on both sides.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange::new(Some(start), Some(end))
    }

    /// Creates a range with only a lower bound.
    pub fn since(start: NaiveDate) -> Self {
        DateRange::new(Some(start), None)
    }

    /// Creates a range with only an upper bound.
    pub fn until(end: NaiveDate) -> Self {
        DateRange::new(None, Some(end))
    }

    /// Parses bounds as date pickers hand them over.
    ///
    /// `None` and empty strings are open bounds.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self> {
        Ok(DateRange::new(parse_bound(start)?, parse_bound(end)?))
    }

    /// Returns `true` when at least one bound is set.
    pub fn is_active(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Tests a date against both bounds.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }

    /// Tests a field value. Values without a date fail an active range.
    pub fn matches(&self, value: &Value<'_>) -> bool {
        if !self.is_active() {
            return true;
        }
        value.as_date().is_some_and(|date| self.contains(date))
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound = |d: Option<NaiveDate>| {
            d.map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default()
        };
        write!(f, "{}..{}", bound(self.start), bound(self.end))
    }
}

/// Parses a single `YYYY-MM-DD` bound.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|source| {
        FilterError::InvalidDate {
            input: input.to_string(),
            source,
        }
    })
}

fn parse_bound(input: Option<&str>) -> Result<Option<NaiveDate>> {
    match input.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_date(s).map(Some),
    }
}
