//! Property-based tests for the filter engine using proptest.

use chrono::NaiveDate;
use proptest::prelude::*;
use ems_filter::{apply, DateRange, FilterSpec, Number, Record, SortSpec, Value, ALL};

// ============================================================================
// Test helpers
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Employee {
    name: String,
    department: String,
    grade: i64,
    hired: NaiveDate,
}

impl Record for Employee {
    fn field_value(&self, field: &str) -> Value<'_> {
        match field {
            "name" => Value::String(&self.name),
            "department" => Value::String(&self.department),
            "grade" => Value::Number(Number::I64(self.grade)),
            "date" => Value::Date(self.hired),
            _ => Value::None,
        }
    }
}

const DEPARTMENTS: [&str; 4] = ["Engineering", "HR", "Sales", "Finance"];

fn day_strategy() -> impl Strategy<Value = NaiveDate> {
    (1u32..=365).prop_map(|ordinal| NaiveDate::from_yo_opt(2024, ordinal).unwrap())
}

// Strategy to generate employees
fn employee_strategy() -> impl Strategy<Value = Employee> {
    (
        "[A-Za-z]{1,8} [A-Za-z]{1,8}",
        prop::sample::select(DEPARTMENTS.to_vec()),
        0i64..5,
        day_strategy(),
    )
        .prop_map(|(name, department, grade, hired)| Employee {
            name,
            department: department.to_string(),
            grade,
            hired,
        })
}

fn range_strategy() -> impl Strategy<Value = DateRange> {
    (prop::option::of(day_strategy()), prop::option::of(day_strategy()))
        .prop_map(|(start, end)| DateRange::new(start, end))
}

fn filter_strategy() -> impl Strategy<Value = FilterSpec> {
    (
        prop::option::of("[a-zA-Z]{1,3}"),
        prop::option::of(prop::sample::select(DEPARTMENTS.to_vec())),
        range_strategy(),
    )
        .prop_map(|(search, department, range)| {
            FilterSpec::new()
                .search(search.unwrap_or_default())
                .search_field("name")
                .exact("department", department.unwrap_or(ALL))
                .date_range(range)
                .build()
        })
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Kept records satisfy every predicate; dropped records fail at least one.
    #[test]
    fn and_semantics(
        staff in prop::collection::vec(employee_strategy(), 0..60),
        filter in filter_strategy(),
    ) {
        let kept = apply(&staff, &filter, None, Employee::accessor);

        let text = filter.search_text().to_string();
        let department = &filter.exact_filters()["department"];
        let range = filter.get_date_range();

        let passes = |e: &Employee| {
            (text.is_empty() || contains_folded(&e.name, &text))
                && department.matches(&Value::String(&e.department))
                && range.contains(e.hired)
        };

        for e in &kept {
            prop_assert!(passes(e));
        }
        let expected = staff.iter().filter(|e| passes(e)).count();
        prop_assert_eq!(kept.len(), expected);
    }

    /// Empty search and "all" selects keep everything, in order.
    #[test]
    fn identity_filter(
        staff in prop::collection::vec(employee_strategy(), 0..60),
    ) {
        let filter = FilterSpec::new()
            .search("")
            .search_fields(["name", "department"])
            .exact("department", ALL)
            .exact("grade", ALL)
            .build();

        let kept = apply(&staff, &filter, None, Employee::accessor);
        let expected: Vec<&Employee> = staff.iter().collect();
        prop_assert_eq!(kept, expected);
    }

    /// Re-sorting a sorted sequence by the same field changes nothing.
    #[test]
    fn sort_is_stable(
        staff in prop::collection::vec(employee_strategy(), 0..60),
        desc in any::<bool>(),
    ) {
        let sort = if desc { SortSpec::desc("grade") } else { SortSpec::asc("grade") };
        let filter = FilterSpec::new();

        let once: Vec<Employee> = apply(&staff, &filter, Some(&sort), Employee::accessor)
            .into_iter()
            .cloned()
            .collect();
        let twice = apply(&once, &filter, Some(&sort), Employee::accessor);

        let expected: Vec<&Employee> = once.iter().collect();
        prop_assert_eq!(twice, expected);

        // Equal grades keep their input order.
        for pair in once.windows(2) {
            if pair[0].grade == pair[1].grade {
                let first = staff.iter().position(|e| e == &pair[0]);
                let second = staff.iter().rposition(|e| e == &pair[1]);
                prop_assert!(first <= second);
            }
        }
    }

    /// Search text case does not change the result.
    #[test]
    fn search_ignores_case(
        staff in prop::collection::vec(employee_strategy(), 0..60),
        text in "[a-zA-Z]{1,3}",
    ) {
        let lower = FilterSpec::new().search(text.to_lowercase()).search_field("name").build();
        let upper = FilterSpec::new().search(text.to_uppercase()).search_field("name").build();

        prop_assert_eq!(
            apply(&staff, &lower, None, Employee::accessor),
            apply(&staff, &upper, None, Employee::accessor)
        );
    }

    /// Filtering a filtered result again changes nothing.
    #[test]
    fn filter_is_idempotent(
        staff in prop::collection::vec(employee_strategy(), 0..60),
        filter in filter_strategy(),
    ) {
        let once = apply(&staff, &filter, None, Employee::accessor);
        let twice = apply(&once, &filter, None, <&Employee>::accessor);

        let twice: Vec<&Employee> = twice.into_iter().copied().collect();
        prop_assert_eq!(twice, once);
    }

    /// Filtering never grows the collection or touches the input.
    #[test]
    fn filter_never_grows_or_mutates(
        staff in prop::collection::vec(employee_strategy(), 0..60),
        filter in filter_strategy(),
    ) {
        let before = staff.clone();
        let kept = apply(&staff, &filter, Some(&SortSpec::desc("name")), Employee::accessor);
        prop_assert!(kept.len() <= staff.len());
        prop_assert_eq!(staff, before);
    }
}

// ============================================================================
// Additional edge case tests
// ============================================================================

#[test]
fn unknown_fields_never_match() {
    let staff = vec![Employee {
        name: "John Smith".into(),
        department: "Engineering".into(),
        grade: 2,
        hired: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
    }];

    let by_search = FilterSpec::new().search("john").search_field("nickname").build();
    assert!(apply(&staff, &by_search, None, Employee::accessor).is_empty());

    let by_select = FilterSpec::new().exact("office", "Berlin").build();
    assert!(apply(&staff, &by_select, None, Employee::accessor).is_empty());

    let by_date = FilterSpec::new()
        .date_field("left_on")
        .date_range(DateRange::since(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()))
        .build();
    assert!(apply(&staff, &by_date, None, Employee::accessor).is_empty());
}
