//! table-finder: point a natural-language question at a database schema and
//! get back the tables worth looking at.

pub mod config;
pub mod error;
pub mod relevance;
pub mod report;
pub mod schema;

pub use config::{AnalyzerConfig, ConfidenceMode};
pub use error::{FinderError, Result};
pub use relevance::{AnalysisResult, MatchDetails, RelevanceAnalyzer, TableScoreDetail};
pub use schema::{load_schema, parse_schema, Column, Schema, Table};
