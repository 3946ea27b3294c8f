//! Structured serialization of view records.
//!
//! JSON, YAML and CSV bypass templates entirely.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::OutputMode;

/// Errors from serializing records.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("{0:?} is not a structured output mode")]
    NotStructured(OutputMode),
}

/// Serializes data in the given structured mode.
pub fn serialize_structured<T: Serialize + ?Sized>(
    data: &T,
    mode: OutputMode,
) -> Result<String, SerializeError> {
    match mode {
        OutputMode::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputMode::Yaml => Ok(serde_yaml::to_string(data)?),
        OutputMode::Csv => to_csv(data),
        other => Err(SerializeError::NotStructured(other)),
    }
}

/// Serializes data as CSV.
///
/// A sequence of records becomes one row per record, with a header row
/// taken from the first record. Nested objects are flattened into
/// dotted column names (`manager.name`).
pub fn to_csv<T: Serialize + ?Sized>(data: &T) -> Result<String, SerializeError> {
    let rows: Vec<Map<String, Value>> = match serde_json::to_value(data)? {
        Value::Array(items) => items.into_iter().map(flatten_row).collect(),
        Value::Null => Vec::new(),
        other => vec![flatten_row(other)],
    };

    let mut writer = csv::Writer::from_writer(vec![]);
    if let Some(first) = rows.first() {
        let headers: Vec<&String> = first.keys().collect();
        writer.write_record(&headers)?;

        for row in &rows {
            let cells = headers
                .iter()
                .map(|h| row.get(h.as_str()).map(cell).unwrap_or_default());
            writer.write_record(cells)?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

fn flatten_row(value: Value) -> Map<String, Value> {
    let mut row = Map::new();
    match value {
        Value::Object(object) => flatten_into(&mut row, "", object),
        scalar => {
            row.insert("value".to_string(), scalar);
        }
    }
    row
}

fn flatten_into(row: &mut Map<String, Value>, prefix: &str, object: Map<String, Value>) {
    for (key, value) in object {
        let column = if prefix.is_empty() {
            key
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::Object(nested) => flatten_into(row, &column, nested),
            other => {
                row.insert(column, other);
            }
        }
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join(";"),
        other => other.to_string(),
    }
}
