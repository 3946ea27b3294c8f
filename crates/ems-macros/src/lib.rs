//! Proc macros for `ems-filter`.
//!
//! - [`Record`] - Generate the field accessor the filter engine reads records through
//!
//! Use the macro through the `derive` feature of `ems-filter`, which
//! re-exports it next to the trait of the same name. The generated code
//! refers to `::ems_filter`, so that crate must be a dependency.

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `ems_filter::Record` for a struct with named fields.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `String` | Text field, searched and compared as a string |
/// | `Number` | Numeric field (any primitive integer or float) |
/// | `Date` | `NaiveDate`, `NaiveDateTime` or any `RecordDate` type |
/// | `Bool` | Boolean field |
/// | `Enum` | Enum-like field, read as a string via `RecordEnum` |
/// | `skip` | Leave the field out of the accessor |
/// | `rename = "..."` | Name the field differently in filters |
/// | `ty = "..."` | Give the kind as a string (`ty = "enum"`) |
///
/// Unannotated fields of type `String`, `&str`, `bool`, a primitive number,
/// `NaiveDate` or `NaiveDateTime` are included with the matching kind.
/// Unannotated fields of any other type are left out. `Option<T>` fields
/// read as `Value::None` when empty.
///
/// # Generated Code
///
/// 1. A constant per field name (`Employee::HIRE_DATE`)
/// 2. `Employee::FIELDS`, every field name in declaration order
/// 3. `impl Record for Employee`
///
/// # Example
///
/// ```ignore
/// use chrono::NaiveDate;
/// use ems_filter::{FilterSpec, Record, RecordEnum};
///
/// enum EmployeeStatus { Active, OnLeave }
///
/// impl RecordEnum for EmployeeStatus {
///     fn as_field_str(&self) -> &'static str {
///         match self {
///             EmployeeStatus::Active => "active",
///             EmployeeStatus::OnLeave => "on-leave",
///         }
///     }
/// }
///
/// #[derive(Record)]
/// struct Employee {
///     name: String,
///     #[record(rename = "dept")]
///     department: String,
///     #[record(Enum)]
///     status: EmployeeStatus,
///     hire_date: NaiveDate,
///     #[record(skip)]
///     salary: u32,
/// }
///
/// let filter = FilterSpec::new()
///     .exact(Employee::DEPT, "HR")
///     .exact(Employee::STATUS, "active")
///     .build();
/// let found = Employee::filter_engine().apply(&staff, &filter, None);
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
