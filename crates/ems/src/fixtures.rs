//! Mock data behind the views.
//!
//! The data ships inside the binary. A data directory can replace any of
//! the three files; files it does not contain keep the embedded data.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ems_filter::{RecordSource, StaticSource};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info};

use crate::model::{AuditEntry, Employee, LeaveRequest};

/// File name of the employee directory data.
pub const EMPLOYEES_FILE: &str = "employees.json";
/// File name of the leave history data.
pub const LEAVE_FILE: &str = "leave.json";
/// File name of the audit log data.
pub const AUDIT_FILE: &str = "audit.json";

const EMBEDDED_EMPLOYEES: &str = include_str!("../data/employees.json");
const EMBEDDED_LEAVE: &str = include_str!("../data/leave.json");
const EMBEDDED_AUDIT: &str = include_str!("../data/audit.json");

/// Errors from loading mock data.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("data directory {0} does not exist")]
    MissingDir(PathBuf),

    #[error("invalid data in {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The records of all three views.
#[derive(Debug, Clone)]
pub struct Fixtures {
    pub employees: StaticSource<Employee>,
    pub leave: StaticSource<LeaveRequest>,
    pub audit: StaticSource<AuditEntry>,
}

impl Fixtures {
    /// Loads the data compiled into the binary.
    pub fn embedded() -> Result<Self, FixtureError> {
        Ok(Fixtures {
            employees: parse(EMPLOYEES_FILE, EMBEDDED_EMPLOYEES)?,
            leave: parse(LEAVE_FILE, EMBEDDED_LEAVE)?,
            audit: parse(AUDIT_FILE, EMBEDDED_AUDIT)?,
        })
    }

    /// Loads data from `dir`, falling back to embedded data per file.
    pub fn from_dir(dir: &Path) -> Result<Self, FixtureError> {
        if !dir.is_dir() {
            return Err(FixtureError::MissingDir(dir.to_path_buf()));
        }

        Ok(Fixtures {
            employees: load_or_embedded(dir, EMPLOYEES_FILE, EMBEDDED_EMPLOYEES)?,
            leave: load_or_embedded(dir, LEAVE_FILE, EMBEDDED_LEAVE)?,
            audit: load_or_embedded(dir, AUDIT_FILE, EMBEDDED_AUDIT)?,
        })
    }

    /// Loads from `dir` when given, otherwise the embedded data.
    pub fn load(dir: Option<&Path>) -> Result<Self, FixtureError> {
        match dir {
            Some(dir) => Fixtures::from_dir(dir),
            None => Fixtures::embedded(),
        }
    }
}

fn load_or_embedded<T: DeserializeOwned>(
    dir: &Path,
    name: &str,
    embedded: &str,
) -> Result<StaticSource<T>, FixtureError> {
    let path = dir.join(name);
    if !path.exists() {
        debug!(file = name, "no override, using embedded data");
        return parse(name, embedded);
    }

    let text = fs::read_to_string(&path).map_err(|source| FixtureError::Io {
        path: path.clone(),
        source,
    })?;
    let source: StaticSource<T> = parse(&path.display().to_string(), &text)?;
    info!(path = %path.display(), records = source.len(), "loaded data file");
    Ok(source)
}

fn parse<T: DeserializeOwned>(name: &str, text: &str) -> Result<StaticSource<T>, FixtureError> {
    let records: Vec<T> = serde_json::from_str(text).map_err(|source| FixtureError::Parse {
        name: name.to_string(),
        source,
    })?;
    Ok(StaticSource::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EmployeeStatus, LeaveStatus};
    use std::collections::BTreeSet;

    #[test]
    fn embedded_data_parses() {
        let data = Fixtures::embedded().unwrap();
        assert_eq!(data.employees.len(), 24);
        assert_eq!(data.leave.len(), 22);
        assert_eq!(data.audit.len(), 20);

        let first = &data.employees.list()[0];
        assert_eq!(first.name, "John Smith");
        assert_eq!(first.status, EmployeeStatus::Active);
        assert_eq!(data.leave.list()[3].status, LeaveStatus::Rejected);
    }

    #[test]
    fn ids_are_unique() {
        let data = Fixtures::embedded().unwrap();
        let employees: BTreeSet<u32> = data.employees.list().iter().map(|e| e.id).collect();
        assert_eq!(employees.len(), data.employees.len());

        let leave: BTreeSet<u32> = data.leave.list().iter().map(|l| l.id).collect();
        assert_eq!(leave.len(), data.leave.len());

        let audit: BTreeSet<u32> = data.audit.list().iter().map(|a| a.id).collect();
        assert_eq!(audit.len(), data.audit.len());
    }
}
