//! Filter-then-sort execution.
//!
//! [`apply`] is the whole engine: keep the records that pass every active
//! predicate of a [`FilterSpec`], then optionally stable-sort them by a
//! [`SortSpec`]. [`RecordFilterEngine`] binds a field accessor so views can
//! call it repeatedly with only the changing filter state.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::filter::FilterSpec;
use crate::ordering::SortSpec;
use crate::value::Value;

/// Filters and optionally sorts a slice, returning references into it.
///
/// Without a sort, survivors keep their input order. With a sort, records
/// with equal keys also keep their input order. The input is never
/// modified, and unknown field names simply fail to match.
///
/// # Example
///
/// ```
/// use ems_filter::{apply, FilterSpec, SortSpec, Value};
///
/// let statuses = ["approved", "pending", "approved", "rejected", "approved"];
/// fn accessor<'a>(status: &'a &'static str, field: &str) -> Value<'a> {
///     match field {
///         "status" => Value::String(status),
///         _ => Value::None,
///     }
/// }
///
/// let filter = FilterSpec::new().exact("status", "approved").build();
/// let kept = apply(&statuses, &filter, None, accessor);
/// assert_eq!(kept.len(), 3);
/// ```
pub fn apply<'a, T, F>(
    records: &'a [T],
    filter: &FilterSpec,
    sort: Option<&SortSpec>,
    accessor: F,
) -> Vec<&'a T>
where
    for<'b> F: Fn(&'b T, &str) -> Value<'b>,
{
    let matcher = filter.matcher();
    let mut results: Vec<&'a T> = records
        .iter()
        .filter(|item| matcher.matches(*item, &accessor))
        .collect();

    if let Some(sort) = sort {
        trace!(field = %sort.field, dir = %sort.dir, "sorting filtered records");
        // sort_by is stable, which keeps equal keys in input order.
        results.sort_by(|a, b| sort.compare_records(*a, *b, &accessor));
    }

    debug!(
        input = records.len(),
        kept = results.len(),
        active = filter.active_count(),
        sorted = sort.is_some(),
        "applied record filter"
    );

    results
}

/// A window into a filtered result.
///
/// Views page through results client-side; this only slices what
/// [`apply`] returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    /// Number of records to skip.
    pub offset: usize,
    /// Maximum number of records to keep. `None` keeps the rest.
    pub limit: Option<usize>,
}

impl Page {
    /// Creates a page from an offset and an optional limit.
    pub fn new(offset: usize, limit: Option<usize>) -> Self {
        Page { offset, limit }
    }

    /// Creates the 1-based page `number` of `size` records.
    ///
    /// Page 0 is treated as page 1.
    pub fn number(number: usize, size: usize) -> Self {
        Page::new(number.saturating_sub(1).saturating_mul(size), Some(size))
    }

    /// Returns the part of `items` this page covers.
    pub fn slice<'s, T>(&self, items: &'s [T]) -> &'s [T] {
        let start = self.offset.min(items.len());
        let end = match self.limit {
            Some(limit) => start.saturating_add(limit).min(items.len()),
            None => items.len(),
        };
        &items[start..end]
    }
}

/// One page of a filtered result, with the count before slicing.
#[derive(Debug, Clone, PartialEq)]
pub struct Paged<'a, T> {
    /// Records on this page.
    pub items: Vec<&'a T>,
    /// Number of records that passed the filter.
    pub total: usize,
    /// The page that was taken.
    pub page: Page,
}

impl<T> Paged<'_, T> {
    /// Returns `true` if this page holds no records.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` if records remain after this page.
    pub fn has_more(&self) -> bool {
        self.page.offset + self.items.len() < self.total
    }
}

/// Filter engine bound to a field accessor.
///
/// The engine holds no state besides the accessor; every call is an
/// independent pure evaluation.
///
/// # Example
///
/// ```
/// use ems_filter::{FilterSpec, Record, SortSpec, Value};
///
/// #[derive(Clone)]
/// struct Employee {
///     name: String,
///     department: String,
/// }
///
/// impl Record for Employee {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "name" => Value::String(&self.name),
///             "department" => Value::String(&self.department),
///             _ => Value::None,
///         }
///     }
/// }
///
/// let staff = vec![
///     Employee { name: "John Smith".into(), department: "Engineering".into() },
///     Employee { name: "Sarah Lee".into(), department: "HR".into() },
/// ];
///
/// let engine = Employee::filter_engine();
/// let filter = FilterSpec::new().search("smith").search_field("name").build();
/// let found = engine.apply(&staff, &filter, Some(&SortSpec::asc("name")));
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].name, "John Smith");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RecordFilterEngine<F> {
    accessor: F,
}

/// Accessor type of engines built by [`Record::filter_engine`].
pub type RecordAccessor<T> = for<'a, 'b> fn(&'a T, &'b str) -> Value<'a>;

impl<F> RecordFilterEngine<F> {
    /// Creates an engine with the given field accessor.
    pub fn new(accessor: F) -> Self {
        RecordFilterEngine { accessor }
    }

    /// Returns the field accessor.
    pub fn accessor(&self) -> &F {
        &self.accessor
    }

    /// Filters and optionally sorts, see [`apply`].
    pub fn apply<'a, T>(
        &self,
        records: &'a [T],
        filter: &FilterSpec,
        sort: Option<&SortSpec>,
    ) -> Vec<&'a T>
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        apply(records, filter, sort, &self.accessor)
    }

    /// Filters and sorts, then clones the survivors.
    pub fn apply_cloned<T>(
        &self,
        records: &[T],
        filter: &FilterSpec,
        sort: Option<&SortSpec>,
    ) -> Vec<T>
    where
        T: Clone,
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        self.apply(records, filter, sort)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Filters and sorts, then takes one page of the result.
    pub fn apply_paged<'a, T>(
        &self,
        records: &'a [T],
        filter: &FilterSpec,
        sort: Option<&SortSpec>,
        page: Page,
    ) -> Paged<'a, T>
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        let all = self.apply(records, filter, sort);
        let total = all.len();
        let items = page.slice(&all).to_vec();
        Paged { items, total, page }
    }

    /// Counts the records passing the filter.
    pub fn count<T>(&self, records: &[T], filter: &FilterSpec) -> usize
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        let matcher = filter.matcher();
        records
            .iter()
            .filter(|item| matcher.matches(*item, &self.accessor))
            .count()
    }

    /// Tests a single record.
    pub fn matches<T>(&self, item: &T, filter: &FilterSpec) -> bool
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        filter.matcher().matches(item, &self.accessor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::SortSpec;
    use crate::value::Number;

    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        actor: &'static str,
        action: &'static str,
        severity: u8,
    }

    fn accessor<'a>(entry: &'a Entry, field: &str) -> Value<'a> {
        match field {
            "actor" => Value::String(entry.actor),
            "action" => Value::String(entry.action),
            "severity" => Value::Number(Number::from(entry.severity)),
            _ => Value::None,
        }
    }

    fn entries() -> Vec<Entry> {
        vec![
            Entry { actor: "admin", action: "login", severity: 1 },
            Entry { actor: "jsmith", action: "update", severity: 2 },
            Entry { actor: "admin", action: "delete", severity: 3 },
            Entry { actor: "slee", action: "login", severity: 1 },
            Entry { actor: "admin", action: "update", severity: 2 },
        ]
    }

    #[test]
    fn identity_keeps_order() {
        let entries = entries();
        let kept = apply(&entries, &FilterSpec::new(), None, accessor);
        let expected: Vec<&Entry> = entries.iter().collect();
        assert_eq!(kept, expected);
    }

    #[test]
    fn filter_keeps_input_order() {
        let entries = entries();
        let filter = FilterSpec::new().exact("actor", "admin").build();
        let kept = apply(&entries, &filter, None, accessor);
        let actions: Vec<_> = kept.iter().map(|e| e.action).collect();
        assert_eq!(actions, ["login", "delete", "update"]);
    }

    #[test]
    fn sort_is_stable() {
        let entries = entries();
        let sort = SortSpec::asc("severity");
        let kept = apply(&entries, &FilterSpec::new(), Some(&sort), accessor);
        let order: Vec<_> = kept.iter().map(|e| (e.severity, e.actor)).collect();
        assert_eq!(
            order,
            [(1, "admin"), (1, "slee"), (2, "jsmith"), (2, "admin"), (3, "admin")]
        );
    }

    #[test]
    fn sort_desc_keeps_ties_in_input_order() {
        let entries = entries();
        let sort = SortSpec::desc("severity");
        let kept = apply(&entries, &FilterSpec::new(), Some(&sort), accessor);
        let order: Vec<_> = kept.iter().map(|e| (e.severity, e.actor)).collect();
        assert_eq!(
            order,
            [(3, "admin"), (2, "jsmith"), (2, "admin"), (1, "admin"), (1, "slee")]
        );
    }

    #[test]
    fn sort_by_unknown_field_keeps_order() {
        let entries = entries();
        let sort = SortSpec::asc("nope");
        let kept = apply(&entries, &FilterSpec::new(), Some(&sort), accessor);
        let expected: Vec<&Entry> = entries.iter().collect();
        assert_eq!(kept, expected);
    }

    #[test]
    fn engine_count_and_matches() {
        let entries = entries();
        let engine = RecordFilterEngine::new(accessor);
        let filter = FilterSpec::new().exact("action", "login").build();
        assert_eq!(engine.count(&entries, &filter), 2);
        assert!(engine.matches(&entries[0], &filter));
        assert!(!engine.matches(&entries[1], &filter));
    }

    #[test]
    fn engine_apply_cloned() {
        let entries = entries();
        let engine = RecordFilterEngine::new(accessor);
        let filter = FilterSpec::new().search("SLEE").search_field("actor").build();
        let owned = engine.apply_cloned(&entries, &filter, None);
        assert_eq!(owned, vec![entries[3].clone()]);
    }

    #[test]
    fn page_slicing() {
        let items = [1, 2, 3, 4, 5];
        assert_eq!(Page::new(1, Some(2)).slice(&items), &[2, 3]);
        assert_eq!(Page::new(4, Some(10)).slice(&items), &[5]);
        assert_eq!(Page::new(9, None).slice(&items), &[] as &[i32]);
        assert_eq!(Page::number(2, 2).slice(&items), &[3, 4]);
        assert_eq!(Page::number(0, 2), Page::number(1, 2));
        assert_eq!(Page::default().slice(&items), &items);
    }

    #[test]
    fn engine_apply_paged() {
        let entries = entries();
        let engine = RecordFilterEngine::new(accessor);
        let filter = FilterSpec::new().exact("actor", "admin").build();

        let first = engine.apply_paged(&entries, &filter, None, Page::number(1, 2));
        assert_eq!(first.total, 3);
        assert_eq!(first.items.len(), 2);
        assert!(first.has_more());

        let second = engine.apply_paged(&entries, &filter, None, Page::number(2, 2));
        assert_eq!(second.items.len(), 1);
        assert!(!second.has_more());

        let past_end = engine.apply_paged(&entries, &filter, None, Page::number(5, 2));
        assert!(past_end.is_empty());
        assert_eq!(past_end.total, 3);
    }
}
