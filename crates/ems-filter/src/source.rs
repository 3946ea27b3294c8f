//! Record sources.
//!
//! Views never own their data. They get it from a [`RecordSource`], which
//! only knows how to list records, and hand the listing to the engine.

use crate::engine::apply;
use crate::filter::FilterSpec;
use crate::ordering::SortSpec;
use crate::record::Record;

/// Something that can list records.
pub trait RecordSource {
    /// The record type.
    type Item;

    /// Returns every record, in source order.
    fn list(&self) -> &[Self::Item];

    /// Number of records the source holds.
    fn len(&self) -> usize {
        self.list().len()
    }

    /// Returns `true` if the source holds no records.
    fn is_empty(&self) -> bool {
        self.list().is_empty()
    }
}

/// An in-memory source over a fixed set of records.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticSource<T> {
    records: Vec<T>,
}

impl<T> StaticSource<T> {
    /// Wraps the given records.
    pub fn new(records: Vec<T>) -> Self {
        StaticSource { records }
    }

    /// Consumes the source and returns its records.
    pub fn into_inner(self) -> Vec<T> {
        self.records
    }
}

impl<T> Default for StaticSource<T> {
    fn default() -> Self {
        StaticSource::new(Vec::new())
    }
}

impl<T> From<Vec<T>> for StaticSource<T> {
    fn from(records: Vec<T>) -> Self {
        StaticSource::new(records)
    }
}

impl<T> FromIterator<T> for StaticSource<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        StaticSource::new(iter.into_iter().collect())
    }
}

impl<T> RecordSource for StaticSource<T> {
    type Item = T;

    fn list(&self) -> &[T] {
        &self.records
    }
}

/// Lists a source and runs the engine over it.
///
/// # Example
///
/// ```
/// use ems_filter::{query, FilterSpec, Record, StaticSource, Value};
///
/// struct Entry {
///     actor: &'static str,
/// }
///
/// impl Record for Entry {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "actor" => Value::String(self.actor),
///             _ => Value::None,
///         }
///     }
/// }
///
/// let log: StaticSource<Entry> = vec![Entry { actor: "admin" }, Entry { actor: "slee" }].into();
/// let filter = FilterSpec::new().exact("actor", "admin").build();
/// assert_eq!(query(&log, &filter, None).len(), 1);
/// ```
pub fn query<'s, S>(source: &'s S, filter: &FilterSpec, sort: Option<&SortSpec>) -> Vec<&'s S::Item>
where
    S: RecordSource + ?Sized,
    S::Item: Record + Sized,
{
    apply(source.list(), filter, sort, S::Item::accessor)
}
