//! The list views: employee directory, leave history and audit log.
//!
//! A view turns the state of its controls ([`ViewQuery`]) and its preset
//! into a [`FilterSpec`] and a sort, runs the filter engine over its
//! record source and keeps one page of the result.

use std::fmt;

use ems_filter::{
    DateRange, ExactPredicate, FilterSpec, Page, Record, RecordSource, SortSpec,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{Config, ViewPreset};
use crate::fixtures::Fixtures;
use crate::model::{AuditEntry, Employee, LeaveRequest};

/// Which list view to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ViewKind {
    Directory,
    Leave,
    Audit,
}

impl ViewKind {
    /// Every view.
    pub const ALL: [ViewKind; 3] = [ViewKind::Directory, ViewKind::Leave, ViewKind::Audit];

    /// Name used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            ViewKind::Directory => "directory",
            ViewKind::Leave => "leave",
            ViewKind::Audit => "audit",
        }
    }

    /// Field names the view's records answer for.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            ViewKind::Directory => Employee::FIELDS,
            ViewKind::Leave => LeaveRequest::FIELDS,
            ViewKind::Audit => AuditEntry::FIELDS,
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of a view's controls.
///
/// Everything is optional; unset controls fall back to the preset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewQuery {
    /// Search box text.
    pub search: Option<String>,
    /// Select controls, applied after the preset's.
    pub filters: Vec<ExactPredicate>,
    /// Date range on the preset's date field.
    pub dates: DateRange,
    /// Sort replacing the preset's.
    pub sort: Option<SortSpec>,
    /// 1-based page number. 0 is treated as 1.
    pub page: usize,
    /// Page size replacing the preset's.
    pub page_size: Option<usize>,
}

/// One rendered page of a view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListView<T> {
    pub title: String,
    pub items: Vec<T>,
    /// Records passing the filter, across all pages.
    pub total: usize,
    pub page: usize,
    pub pages: usize,
    /// Description of the active filter, if any.
    pub filter: Option<String>,
    pub sort: Option<String>,
    /// No record passed the filter.
    pub empty: bool,
    /// Records passed the filter but the page starts after the last one.
    pub past_end: bool,
}

impl<T> ListView<T> {
    /// Number of records on this page.
    pub fn shown(&self) -> usize {
        self.items.len()
    }
}

/// Builds the filter a view runs from its preset and control state.
pub fn build_filter(preset: &ViewPreset, query: &ViewQuery, fields: &[&str]) -> FilterSpec {
    let mut filter = FilterSpec::new()
        .search(query.search.as_deref().unwrap_or_default().trim())
        .search_fields(preset.search_fields.iter().cloned())
        .date_field(preset.date_field.clone())
        .date_range(query.dates);

    for (field, selection) in &preset.filters {
        filter = filter.exact(field.clone(), selection.clone());
    }
    for predicate in &query.filters {
        if !fields.is_empty() && !fields.contains(&predicate.field.as_str()) {
            warn!(field = %predicate.field, "filtering on unknown field matches nothing");
        }
        filter = filter.with_exact(predicate.clone());
    }

    filter.build()
}

/// Runs a view over any record source.
pub fn list<S>(source: &S, preset: &ViewPreset, query: &ViewQuery) -> ListView<S::Item>
where
    S: RecordSource,
    S::Item: Record + Clone,
{
    let fields = <S::Item as Record>::field_names();
    let filter = build_filter(preset, query, fields);
    let sort = query.sort.clone().or_else(|| preset.sort.clone());
    if let Some(sort) = &sort {
        if !fields.is_empty() && !fields.contains(&sort.field.as_str()) {
            warn!(field = %sort.field, "sorting on unknown field keeps input order");
        }
    }

    let size = query.page_size.unwrap_or(preset.page_size).max(1);
    let number = query.page.max(1);
    let engine = <S::Item as Record>::filter_engine();
    let paged = engine.apply_paged(source.list(), &filter, sort.as_ref(), Page::number(number, size));

    debug!(
        title = %preset.title,
        total = paged.total,
        page = number,
        "built list view"
    );

    ListView {
        title: preset.title.clone(),
        empty: paged.total == 0,
        past_end: paged.total > 0 && paged.is_empty(),
        items: paged.items.into_iter().cloned().collect(),
        total: paged.total,
        page: number,
        pages: paged.total.div_ceil(size).max(1),
        filter: filter.summary(),
        sort: sort.map(|s| s.to_string()),
    }
}

/// The employee directory.
pub fn directory(data: &Fixtures, config: &Config, query: &ViewQuery) -> ListView<Employee> {
    list(&data.employees, config.preset(ViewKind::Directory), query)
}

/// The leave history.
pub fn leave(data: &Fixtures, config: &Config, query: &ViewQuery) -> ListView<LeaveRequest> {
    list(&data.leave, config.preset(ViewKind::Leave), query)
}

/// The audit log.
pub fn audit(data: &Fixtures, config: &Config, query: &ViewQuery) -> ListView<AuditEntry> {
    list(&data.audit, config.preset(ViewKind::Audit), query)
}
