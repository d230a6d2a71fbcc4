use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinderError {
    #[error("Query is empty: type a question about your data")]
    EmptyQuery,

    #[error("Schema contains no tables")]
    EmptySchema,

    #[error("Invalid schema format: expected a JSON array of tables, found {0}")]
    InvalidSchemaFormat(String),

    #[error("Invalid table at index {index}: {reason}")]
    InvalidTable { index: usize, reason: String },

    #[error("Failed to read schema file {path}: {source}")]
    SchemaRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FinderError>;
