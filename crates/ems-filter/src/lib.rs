//! Search, select and date-range filtering for in-memory record collections.
//!
//! `ems-filter` is the one filtering primitive behind every list view:
//! a search box over a few text fields, any number of select controls,
//! and a date range, followed by an optional sort. It is generic over the
//! record type; records expose their fields through an accessor function
//! or the [`Record`] trait.
//!
//! # Quick Start
//!
//! ```rust
//! use ems_filter::{apply, FilterSpec, Number, SortSpec, Value};
//! use chrono::NaiveDate;
//!
//! struct LeaveRequest {
//!     employee: String,
//!     status: String,
//!     start: NaiveDate,
//!     days: u32,
//! }
//!
//! fn accessor<'a>(leave: &'a LeaveRequest, field: &str) -> Value<'a> {
//!     match field {
//!         "employee" => Value::String(&leave.employee),
//!         "status" => Value::String(&leave.status),
//!         "start" => Value::Date(leave.start),
//!         "days" => Value::Number(Number::from(leave.days)),
//!         _ => Value::None,
//!     }
//! }
//!
//! let date = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap();
//! let requests = vec![
//!     LeaveRequest { employee: "John Smith".into(), status: "approved".into(), start: date(7, 1), days: 5 },
//!     LeaveRequest { employee: "Sarah Lee".into(), status: "pending".into(), start: date(7, 15), days: 2 },
//!     LeaveRequest { employee: "Maria Garcia".into(), status: "approved".into(), start: date(3, 4), days: 10 },
//! ];
//!
//! let filter = FilterSpec::new()
//!     .exact("status", "approved")
//!     .date_field("start")
//!     .between(date(6, 1), date(8, 31))
//!     .build();
//!
//! let kept = apply(&requests, &filter, Some(&SortSpec::desc("days")), accessor);
//! assert_eq!(kept.len(), 1);
//! assert_eq!(kept[0].employee, "John Smith");
//! ```
//!
//! # Filter Semantics
//!
//! A record is kept when it passes every active control:
//!
//! ```text
//! match = (search empty OR any search field contains the text)
//!       ∧ (every non-"all" select equals its field)
//!       ∧ (date field within [start, end], open sides ignored)
//! ```
//!
//! - **Search** is case-insensitive substring matching over the listed fields.
//! - **Selects** are case-sensitive equality; the value `"all"` disables one.
//! - **Date ranges** are inclusive and compare calendar dates.
//!
//! Unknown field names never error. They read as [`Value::None`], which
//! fails an active predicate and sorts last.
//!
//! # Ordering
//!
//! Without a [`SortSpec`], results keep input order. With one, the sort is
//! stable: records with equal keys keep their input order.
//!
//! # Derive
//!
//! With the `derive` feature, `#[derive(Record)]` generates the accessor:
//!
//! ```rust,ignore
//! use ems_filter::Record;
//!
//! #[derive(Record)]
//! struct Employee {
//!     #[record(String)]
//!     name: String,
//!     #[record(Enum)]
//!     status: EmployeeStatus,
//!     #[record(Date)]
//!     hire_date: NaiveDate,
//!     #[record(skip)]
//!     notes: Vec<String>,
//! }
//!
//! let engine = Employee::filter_engine();
//! let filter = FilterSpec::new().exact(Employee::STATUS, "active").build();
//! ```

mod debounce;
mod engine;
mod error;
mod filter;
mod ordering;
mod predicate;
mod record;
mod source;
mod value;

// Re-export public API
pub use debounce::{SearchDebouncer, Ticket};
pub use engine::{apply, Page, Paged, RecordAccessor, RecordFilterEngine};
pub use error::{FilterError, Result};
pub use filter::{FilterSpec, Matcher, DEFAULT_DATE_FIELD};
pub use ordering::{compare_values, Dir, SortSpec};
pub use predicate::{parse_date, DateRange, ExactPredicate, SearchPredicate, Selection, ALL};
pub use record::{Record, RecordDate, RecordEnum};
pub use source::{query, RecordSource, StaticSource};
pub use value::{FieldValue, Number, Value, DATETIME_FORMAT, DATE_FORMAT};

#[cfg(feature = "derive")]
pub use ems_macros::Record;
