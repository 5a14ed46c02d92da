//! Rows loaded from a JSON file.

use std::fs;
use std::path::Path;

use ngs360_lib::{CellValue, TableRow};
use serde_json::{Map, Value};

use crate::error::CliError;

/// One JSON object used as a table row.
#[derive(Debug, Clone)]
pub struct JsonRow(Map<String, Value>);

impl JsonRow {
    /// Field names in file order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl TableRow for JsonRow {
    fn field(&self, key: &str) -> CellValue {
        self.0.get(key).map(CellValue::from).unwrap_or_default()
    }
}

/// Load a JSON array of objects.
pub fn load(path: &Path) -> Result<Vec<JsonRow>, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text)
}

/// Parse a JSON array of objects.
pub fn parse(text: &str) -> Result<Vec<JsonRow>, CliError> {
    let Value::Array(items) = serde_json::from_str(text)? else {
        return Err(CliError::NotAnArray);
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(map) => Ok(JsonRow(map)),
            _ => Err(CliError::NotAnArray),
        })
        .collect()
}
