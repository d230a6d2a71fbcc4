//! Schema model and the boundary that turns raw JSON into it.
//!
//! Everything past `parse_schema` assumes well-formed tables; shape problems
//! are reported here with the index of the offending entry.

use crate::error::{FinderError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Vec<String>>,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            constraints: None,
        }
    }

    pub fn with_constraints(mut self, constraints: Vec<String>) -> Self {
        self.constraints = Some(constraints);
        self
    }
}

/// A table as supplied by the user. `columns` is required but may be empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }
}

/// Ordered list of tables. Names are not required to be unique.
pub type Schema = Vec<Table>;

/// Parse a schema document. The top level must be a JSON array and every
/// element must carry a string `name` and a `columns` array.
pub fn parse_schema(content: &str) -> Result<Schema> {
    let value: Value = serde_json::from_str(content)?;

    let items = match value {
        Value::Array(items) => items,
        other => return Err(FinderError::InvalidSchemaFormat(describe(&other).to_string())),
    };

    let tables = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Table>(item).map_err(|e| FinderError::InvalidTable {
                index,
                reason: e.to_string(),
            })
        })
        .collect::<Result<Schema>>()?;

    debug!("Parsed schema with {} tables", tables.len());
    Ok(tables)
}

/// Read and parse a schema file.
pub fn load_schema(path: impl AsRef<Path>) -> Result<Schema> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| FinderError::SchemaRead {
        path: path.display().to_string(),
        source,
    })?;
    parse_schema(&content)
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
