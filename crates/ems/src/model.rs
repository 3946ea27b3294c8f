//! Records shown by the three list views.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use ems_filter::{Record, RecordEnum};
use serde::{Deserialize, Serialize};

/// Implements `RecordEnum` and `Display` for an enum whose serde names
/// are the given strings, and lists its variants in `VARIANTS`.
macro_rules! record_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            /// Every variant, in declaration order.
            pub const VARIANTS: &'static [$name] = &[$($name::$variant),+];
        }

        impl RecordEnum for $name {
            fn as_field_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_field_str())
            }
        }
    };
}

// ============================================================================
// Employee directory
// ============================================================================

/// Employment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmployeeStatus {
    Active,
    OnLeave,
    Terminated,
}

record_enum!(EmployeeStatus {
    Active => "active",
    OnLeave => "on-leave",
    Terminated => "terminated",
});

/// An entry of the employee directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
pub struct Employee {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub department: String,
    pub role: String,
    pub location: String,
    #[record(Enum)]
    pub status: EmployeeStatus,
    pub hire_date: NaiveDate,
}

// ============================================================================
// Leave history
// ============================================================================

/// Approval state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeaveStatus {
    Approved,
    Pending,
    Rejected,
}

record_enum!(LeaveStatus {
    Approved => "approved",
    Pending => "pending",
    Rejected => "rejected",
});

/// Kind of leave requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeaveType {
    Annual,
    Sick,
    Personal,
    Parental,
    Unpaid,
}

record_enum!(LeaveType {
    Annual => "annual",
    Sick => "sick",
    Personal => "personal",
    Parental => "parental",
    Unpaid => "unpaid",
});

/// A leave request as listed in the leave history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
pub struct LeaveRequest {
    pub id: u32,
    pub employee: String,
    #[record(Enum, rename = "type")]
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    #[record(Enum)]
    pub status: LeaveStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: u32,
    pub reason: String,
}

// ============================================================================
// Audit log
// ============================================================================

/// What an audited user did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuditAction {
    Login,
    Logout,
    Create,
    Update,
    Delete,
    Approve,
    Reject,
    Export,
}

record_enum!(AuditAction {
    Login => "login",
    Logout => "logout",
    Create => "create",
    Update => "update",
    Delete => "delete",
    Approve => "approve",
    Reject => "reject",
    Export => "export",
});

/// How much attention an audit entry needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

record_enum!(Severity {
    Info => "info",
    Warning => "warning",
    Critical => "critical",
});

/// One line of the audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
pub struct AuditEntry {
    pub id: u32,
    pub timestamp: NaiveDateTime,
    pub actor: String,
    #[record(Enum)]
    pub action: AuditAction,
    pub target: String,
    pub details: String,
    #[record(Enum)]
    pub severity: Severity,
}
