//! Filter builder.
//!
//! A [`FilterSpec`] is the state of a view's filter controls: a search
//! box, any number of select controls, and a date range. A record passes
//! when it passes every active control:
//!
//! ```text
//! match = (search empty OR any search field contains the text)
//!       ∧ (every non-"all" select equals its field)
//!       ∧ (date field within [start, end], open sides ignored)
//! ```

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::predicate::{DateRange, ExactPredicate, SearchPredicate, Selection};
use crate::value::Value;

/// Date field used when none is named.
pub const DEFAULT_DATE_FIELD: &str = "date";

/// The active filter controls for one query.
///
/// Every part defaults to "no constraint", so `FilterSpec::default()`
/// keeps every record.
///
/// # Example
///
/// ```
/// use ems_filter::{FilterSpec, Value};
///
/// struct Employee {
///     name: &'static str,
///     department: &'static str,
/// }
///
/// fn accessor<'a>(e: &'a Employee, field: &str) -> Value<'a> {
///     match field {
///         "name" => Value::String(e.name),
///         "department" => Value::String(e.department),
///         _ => Value::None,
///     }
/// }
///
/// let filter = FilterSpec::new()
///     .search("smith")
///     .search_field("name")
///     .exact("department", "Engineering")
///     .build();
///
/// let john = Employee { name: "John Smith", department: "Engineering" };
/// assert!(filter.matches(&john, accessor));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    search: SearchPredicate,
    exact: BTreeMap<String, Selection>,
    date_field: String,
    date_range: DateRange,
}

impl Default for FilterSpec {
    fn default() -> Self {
        FilterSpec {
            search: SearchPredicate::default(),
            exact: BTreeMap::new(),
            date_field: DEFAULT_DATE_FIELD.to_string(),
            date_range: DateRange::default(),
        }
    }
}

impl FilterSpec {
    /// Creates a filter with no active constraint.
    pub fn new() -> Self {
        FilterSpec::default()
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Sets the search text. Empty text disables the search.
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search.text = text.into();
        self
    }

    /// Appends a field to the searched fields.
    pub fn search_field(mut self, field: impl Into<String>) -> Self {
        self.search.fields.push(field.into());
        self
    }

    /// Replaces the searched fields.
    pub fn search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    // ========================================================================
    // Selects
    // ========================================================================

    /// Sets the select control for a field, replacing any earlier one.
    ///
    /// Passing `"all"` (or [`Selection::All`]) keeps the control inactive.
    pub fn exact(mut self, field: impl Into<String>, selection: impl Into<Selection>) -> Self {
        self.exact.insert(field.into(), selection.into());
        self
    }

    /// Adds a parsed `field=value` select.
    pub fn with_exact(self, predicate: ExactPredicate) -> Self {
        self.exact(predicate.field, predicate.selection)
    }

    // ========================================================================
    // Date range
    // ========================================================================

    /// Names the field the date range applies to.
    pub fn date_field(mut self, field: impl Into<String>) -> Self {
        self.date_field = field.into();
        self
    }

    /// Sets the date range.
    pub fn date_range(mut self, range: DateRange) -> Self {
        self.date_range = range;
        self
    }

    /// Sets a date range bounded on both sides.
    pub fn between(self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_range(DateRange::between(start, end))
    }

    /// Finalizes the filter.
    pub fn build(self) -> Self {
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the search text.
    pub fn search_text(&self) -> &str {
        &self.search.text
    }

    /// Returns the searched fields, in order.
    pub fn searched_fields(&self) -> &[String] {
        &self.search.fields
    }

    /// Returns the search predicate.
    pub fn search_predicate(&self) -> &SearchPredicate {
        &self.search
    }

    /// Returns every select control, including inactive ones.
    pub fn exact_filters(&self) -> &BTreeMap<String, Selection> {
        &self.exact
    }

    /// Returns the date field name.
    pub fn get_date_field(&self) -> &str {
        &self.date_field
    }

    /// Returns the date range.
    pub fn get_date_range(&self) -> DateRange {
        self.date_range
    }

    /// Number of predicates that actually constrain records.
    pub fn active_count(&self) -> usize {
        usize::from(self.search.is_active())
            + self.exact.values().filter(|s| s.is_active()).count()
            + usize::from(self.date_range.is_active())
    }

    /// Returns `true` if this filter keeps every record.
    pub fn is_identity(&self) -> bool {
        self.active_count() == 0
    }

    /// Describes the active predicates, e.g.
    /// `search 'smith' in name, email; department=HR`.
    ///
    /// Returns `None` for an identity filter.
    pub fn summary(&self) -> Option<String> {
        let mut parts = Vec::new();

        if self.search.is_active() {
            if self.search.fields.is_empty() {
                parts.push(format!("search '{}' (no fields)", self.search.text));
            } else {
                parts.push(format!(
                    "search '{}' in {}",
                    self.search.text,
                    self.search.fields.join(", ")
                ));
            }
        }

        for (field, selection) in &self.exact {
            if selection.is_active() {
                parts.push(format!("{}={}", field, selection));
            }
        }

        if self.date_range.is_active() {
            parts.push(format!("{} {}", self.date_field, self.date_range));
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("; "))
        }
    }

    // ========================================================================
    // Evaluation
    // ========================================================================

    /// Prepares the filter for evaluation over many records.
    ///
    /// The search text is case-folded once here instead of per record.
    pub fn matcher(&self) -> Matcher<'_> {
        Matcher {
            spec: self,
            needle: self.search.needle(),
        }
    }

    /// Tests a single record.
    pub fn matches<T, F>(&self, item: &T, accessor: F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        self.matcher().matches(item, &accessor)
    }
}

/// A [`FilterSpec`] ready to be evaluated against records.
#[derive(Debug, Clone)]
pub struct Matcher<'s> {
    spec: &'s FilterSpec,
    needle: Option<String>,
}

impl Matcher<'_> {
    /// Tests a single record against every active predicate.
    pub fn matches<T, F>(&self, item: &T, accessor: &F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        if let Some(needle) = &self.needle {
            if !self.spec.search.matches_folded(needle, item, accessor) {
                return false;
            }
        }

        let exact_pass = self
            .spec
            .exact
            .iter()
            .all(|(field, selection)| !selection.is_active() || selection.matches(&accessor(item, field)));

        if !exact_pass {
            return false;
        }

        !self.spec.date_range.is_active()
            || self
                .spec
                .date_range
                .matches(&accessor(item, &self.spec.date_field))
    }
}
