//! Tests for `#[derive(Record)]` against the engine.

use chrono::{NaiveDate, NaiveDateTime};
use ems_filter::{FilterSpec, Number, Record, RecordEnum, SortSpec, Value};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Severity {
    Info,
    Warning,
    Critical,
}

impl RecordEnum for Severity {
    fn as_field_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, ems_macros::Record)]
struct AuditEntry {
    id: u32,
    #[record(rename = "date")]
    timestamp: NaiveDateTime,
    actor: String,
    #[record(Enum)]
    severity: Severity,
    #[record(String)]
    target: Box<str>,
    reviewed: bool,
    #[record(Date)]
    resolved_on: Option<NaiveDate>,
    #[record(skip)]
    details: String,
    tags: Vec<String>,
}

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn log() -> Vec<AuditEntry> {
    vec![
        AuditEntry {
            id: 1,
            timestamp: at(2, 9),
            actor: "admin".into(),
            severity: Severity::Info,
            target: "employee/17".into(),
            reviewed: true,
            resolved_on: None,
            details: "login".into(),
            tags: vec![],
        },
        AuditEntry {
            id: 2,
            timestamp: at(3, 23),
            actor: "jsmith".into(),
            severity: Severity::Critical,
            target: "payroll".into(),
            reviewed: false,
            resolved_on: NaiveDate::from_ymd_opt(2024, 5, 4),
            details: "export".into(),
            tags: vec!["finance".into()],
        },
        AuditEntry {
            id: 3,
            timestamp: at(4, 7),
            actor: "admin".into(),
            severity: Severity::Warning,
            target: "employee/9".into(),
            reviewed: false,
            resolved_on: None,
            details: "role change".into(),
            tags: vec![],
        },
    ]
}

#[test]
fn generates_field_constants() {
    assert_eq!(AuditEntry::ID, "id");
    assert_eq!(AuditEntry::DATE, "date");
    assert_eq!(AuditEntry::SEVERITY, "severity");
    assert_eq!(AuditEntry::RESOLVED_ON, "resolved_on");
    assert_eq!(
        AuditEntry::FIELDS,
        &["id", "date", "actor", "severity", "target", "reviewed", "resolved_on"]
    );
}

#[test]
fn reads_each_kind() {
    let entry = &log()[1];
    assert_eq!(entry.field_value("id"), Value::Number(Number::U64(2)));
    assert_eq!(entry.field_value("date"), Value::DateTime(at(3, 23)));
    assert_eq!(entry.field_value("actor"), Value::String("jsmith"));
    assert_eq!(entry.field_value("severity"), Value::String("critical"));
    assert_eq!(entry.field_value("target"), Value::String("payroll"));
    assert_eq!(entry.field_value("reviewed"), Value::Bool(false));
    assert_eq!(
        entry.field_value("resolved_on"),
        Value::Date(NaiveDate::from_ymd_opt(2024, 5, 4).unwrap())
    );
}

#[test]
fn skipped_and_unsupported_fields_read_none() {
    let entry = &log()[0];
    assert_eq!(entry.field_value("details"), Value::None);
    assert_eq!(entry.field_value("tags"), Value::None);
    assert_eq!(entry.field_value("timestamp"), Value::None);
    assert_eq!(entry.field_value("resolved_on"), Value::None);
}

#[test]
fn derived_engine_filters_and_sorts() {
    let entries = log();
    let engine = AuditEntry::filter_engine();

    let filter = FilterSpec::new()
        .exact(AuditEntry::ACTOR, "admin")
        .between(
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
        )
        .build();
    let ids: Vec<_> = engine.apply(&entries, &filter, None).iter().map(|e| e.id).collect();
    assert_eq!(ids, [1]);

    let by_severity = FilterSpec::new()
        .search("CRIT")
        .search_field(AuditEntry::SEVERITY)
        .build();
    assert_eq!(engine.count(&entries, &by_severity), 1);

    let newest_first = engine.apply(&entries, &FilterSpec::new(), Some(&SortSpec::desc(AuditEntry::DATE)));
    let ids: Vec<_> = newest_first.iter().map(|e| e.id).collect();
    assert_eq!(ids, [3, 2, 1]);
}
