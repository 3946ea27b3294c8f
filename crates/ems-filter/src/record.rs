//! Field access traits.
//!
//! The engine never looks inside a record itself. It asks an accessor
//! for one field at a time, either a plain function or the [`Record`]
//! implementation of the record type.

use chrono::{NaiveDate, NaiveDateTime};

use crate::engine::{RecordAccessor, RecordFilterEngine};
use crate::value::Value;

/// Trait for types the filter engine can read fields from.
///
/// Usually derived with `#[derive(Record)]` (feature `derive`), but it is
/// a single method and easy to write by hand.
///
/// # Manual Implementation
///
/// ```
/// use ems_filter::{Record, Value};
///
/// struct LeaveRequest {
///     employee: String,
///     status: String,
/// }
///
/// impl Record for LeaveRequest {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "employee" => Value::String(&self.employee),
///             "status" => Value::String(&self.status),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Returns the value of a field, or [`Value::None`] when the record
    /// has no such field.
    fn field_value(&self, field: &str) -> Value<'_>;

    /// Names of the fields this type answers for.
    ///
    /// Derived impls list every field. The default is empty, meaning the
    /// names are not known up front.
    fn field_names() -> &'static [&'static str]
    where
        Self: Sized,
    {
        &[]
    }

    /// Accessor function form of [`Record::field_value`], for passing to
    /// [`apply`](crate::apply) and [`RecordFilterEngine::new`](crate::RecordFilterEngine::new).
    fn accessor<'a>(item: &'a Self, field: &str) -> Value<'a>
    where
        Self: Sized,
    {
        item.field_value(field)
    }

    /// Creates a filter engine reading fields through this impl.
    fn filter_engine() -> RecordFilterEngine<RecordAccessor<Self>>
    where
        Self: Sized,
    {
        RecordFilterEngine::new(Self::accessor as RecordAccessor<Self>)
    }
}

impl<T: Record + ?Sized> Record for &T {
    fn field_value(&self, field: &str) -> Value<'_> {
        (**self).field_value(field)
    }
}

/// Enum-like string fields.
///
/// Select filters compare against the string form, so the strings must
/// be the ones the select control offers (`"approved"`, `"pending"`...).
///
/// # Example
///
/// ```
/// use ems_filter::RecordEnum;
///
/// enum LeaveStatus {
///     Approved,
///     Pending,
/// }
///
/// impl RecordEnum for LeaveStatus {
///     fn as_field_str(&self) -> &'static str {
///         match self {
///             LeaveStatus::Approved => "approved",
///             LeaveStatus::Pending => "pending",
///         }
///     }
/// }
/// ```
pub trait RecordEnum {
    /// Returns the string this variant is filtered and sorted by.
    fn as_field_str(&self) -> &'static str;
}

/// Date-like field types usable in a date range.
pub trait RecordDate {
    /// Converts the field to a [`Value::Date`] or [`Value::DateTime`].
    fn record_date(&self) -> Value<'_>;
}

impl RecordDate for NaiveDate {
    fn record_date(&self) -> Value<'_> {
        Value::Date(*self)
    }
}

impl RecordDate for NaiveDateTime {
    fn record_date(&self) -> Value<'_> {
        Value::DateTime(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Number;

    struct Employee {
        name: String,
        grade: u8,
        hired: NaiveDate,
    }

    impl Record for Employee {
        fn field_value(&self, field: &str) -> Value<'_> {
            match field {
                "name" => Value::String(&self.name),
                "grade" => Value::Number(Number::from(self.grade)),
                "hired" => self.hired.record_date(),
                _ => Value::None,
            }
        }
    }

    fn sample() -> Employee {
        Employee {
            name: "Sarah Lee".to_string(),
            grade: 4,
            hired: NaiveDate::from_ymd_opt(2021, 2, 1).unwrap(),
        }
    }

    #[test]
    fn manual_impl() {
        let employee = sample();
        assert_eq!(employee.field_value("name"), Value::String("Sarah Lee"));
        assert_eq!(employee.field_value("grade"), Value::Number(Number::U64(4)));
        assert_eq!(employee.field_value("unknown"), Value::None);
    }

    #[test]
    fn accessor_and_reference_impl() {
        let employee = sample();
        assert_eq!(Employee::accessor(&employee, "name"), Value::String("Sarah Lee"));

        let by_ref = &employee;
        assert_eq!(
            by_ref.field_value("hired").as_date(),
            NaiveDate::from_ymd_opt(2021, 2, 1)
        );
    }

    #[test]
    fn record_date_kinds() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let at = day.and_hms_opt(8, 15, 0).unwrap();
        assert_eq!(day.record_date(), Value::Date(day));
        assert_eq!(at.record_date(), Value::DateTime(at));
    }
}
