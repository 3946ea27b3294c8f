//! EMS list views: employee directory, leave history and audit log.
//!
//! Each view loads its records from JSON fixtures, narrows them with the
//! [`ems_filter`] engine (search, selects and a date range), sorts, pages,
//! and prints through a MiniJinja template or as JSON, YAML or CSV.
//!
//! ```text
//! ems directory --search smith -f department=Engineering
//! ems leave -f status=approved --from 2024-06-01 --to 2024-08-31 --sort days:desc
//! ems audit -f severity=critical -o json
//! ems fields leave
//! ```
//!
//! View presets (search fields, date field, default sort, page size and
//! fixed selects) come from `config/default.yaml`, overridable with
//! `--config` or `EMS_CONFIG`.

pub mod cli;
pub mod config;
pub mod fixtures;
pub mod model;
pub mod render;
pub mod views;

pub use cli::{run, Cli, Command, ViewArgs};
pub use config::{Config, ConfigError, ViewPreset};
pub use fixtures::{FixtureError, Fixtures};
pub use views::{ListView, ViewKind, ViewQuery};
