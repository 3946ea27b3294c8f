//! Error types for the filter crate.
//!
//! Filtering itself never fails. These errors come from turning raw
//! caller input (form strings, CLI arguments) into filter values.

use thiserror::Error;

/// Errors that can occur when building filters from raw input.
#[derive(Debug, Error)]
pub enum FilterError {
    /// A date bound was not a valid `YYYY-MM-DD` date.
    #[error("invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Sort direction other than `asc` or `desc`.
    #[error("invalid sort direction '{0}': expected 'asc' or 'desc'")]
    InvalidDirection(String),

    /// Sort expression that does not name a field.
    #[error("invalid sort '{0}': expected FIELD or FIELD:DIR")]
    InvalidSort(String),

    /// Select filter expression without a `field=value` shape.
    #[error("invalid select filter '{0}': expected FIELD=VALUE")]
    InvalidSelection(String),
}

/// Result type for filter construction.
pub type Result<T> = std::result::Result<T, FilterError>;
