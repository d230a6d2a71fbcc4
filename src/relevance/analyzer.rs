//! Ranks every table of a schema against one query.

use super::lexicon::Lexicon;
use super::scorer::{score_table, TableScore};
use super::tokenizer::query_words;
use crate::config::{AnalyzerConfig, ConfidenceMode};
use crate::error::{FinderError, Result};
use crate::schema::Table;
use itertools::Itertools;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Scores and matched columns keyed by table name. When names repeat, the
/// later table wins; `AnalysisResult::table_scores` keeps every entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetails {
    pub table_matches: BTreeMap<String, f64>,
    pub column_matches: BTreeMap<String, Vec<String>>,
}

/// Score breakdown of one table, in schema order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableScoreDetail {
    pub index: usize,
    pub name: String,
    pub total: f64,
    pub name_score: f64,
    pub column_score: f64,
    pub semantic_score: f64,
    pub column_matches: Vec<String>,
}

impl From<(usize, &TableScore<'_>)> for TableScoreDetail {
    fn from((index, score): (usize, &TableScore<'_>)) -> Self {
        Self {
            index,
            name: score.table.name.clone(),
            total: score.total,
            name_score: score.name_score,
            column_score: score.column_score,
            semantic_score: score.semantic_score,
            column_matches: score.column_matches.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult<'a> {
    /// Tables above the threshold, highest score first
    pub relevant_tables: Vec<&'a Table>,
    /// Schema index of each entry in `relevant_tables`
    pub relevant_indices: Vec<usize>,
    pub query: String,
    pub confidence: f64,
    pub match_details: MatchDetails,
    pub table_scores: Vec<TableScoreDetail>,
}

impl<'a> AnalysisResult<'a> {
    pub fn is_empty(&self) -> bool {
        self.relevant_tables.is_empty()
    }

    /// Relevant tables in rank order, each with its own score detail.
    /// Unlike `match_details`, this stays correct when table names repeat.
    pub fn ranked(&self) -> impl Iterator<Item = (&'a Table, &TableScoreDetail)> + '_ {
        self.relevant_tables
            .iter()
            .zip(&self.relevant_indices)
            .map(|(&table, &index)| (table, &self.table_scores[index]))
    }

    pub fn top_table(&self) -> Option<&'a Table> {
        self.relevant_tables.first().copied()
    }
}

/// Relevance analyzer holding immutable settings. Analysis borrows `&self`,
/// so one analyzer can serve any number of callers.
#[derive(Debug, Clone)]
pub struct RelevanceAnalyzer {
    config: AnalyzerConfig,
    lexicon: Lexicon,
}

impl Default for RelevanceAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

impl RelevanceAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        let lexicon = config.lexicon();
        Self { config, lexicon }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Analyze `query` against `schema`.
    ///
    /// A blank query or an empty schema produces no result.
    pub fn analyze<'a>(&self, schema: &'a [Table], query: &str) -> Result<AnalysisResult<'a>> {
        if query.trim().is_empty() {
            return Err(FinderError::EmptyQuery);
        }
        if schema.is_empty() {
            return Err(FinderError::EmptySchema);
        }
        Ok(self.rank(schema, query))
    }

    /// Score, threshold and rank all tables. Callers must have ruled out a
    /// blank query and an empty schema; see [`RelevanceAnalyzer::analyze`].
    pub fn rank<'a>(&self, schema: &'a [Table], query: &str) -> AnalysisResult<'a> {
        let words = query_words(query, &self.lexicon);
        debug!("Query words after filtering: {:?}", words);

        let duplicates: Vec<&str> = schema.iter().map(|t| t.name.as_str()).duplicates().collect();
        if !duplicates.is_empty() {
            warn!(
                "Duplicate table names {:?}: name-keyed match details keep only the last of each",
                duplicates
            );
        }

        let scores: Vec<TableScore<'a>> = schema
            .iter()
            .map(|table| score_table(table, &words, &self.lexicon))
            .collect();

        for score in &scores {
            debug!(
                "Table {}: total={:.2} (name={:.2}, columns={:.2}, semantic={:.2}) columns={:?}",
                score.table.name,
                score.total,
                score.name_score,
                score.column_score,
                score.semantic_score,
                score.column_matches
            );
        }

        // sorted_by is stable, so equal scores keep schema order
        let ranked: Vec<(usize, &TableScore<'a>)> = scores
            .iter()
            .enumerate()
            .filter(|(_, s)| s.total > self.config.threshold)
            .sorted_by(|(_, a), (_, b)| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal))
            .collect();
        let relevant: Vec<&TableScore<'a>> = ranked.iter().map(|&(_, s)| s).collect();

        let confidence = self.confidence(&scores, &relevant);

        let mut match_details = MatchDetails::default();
        for score in &scores {
            match_details
                .table_matches
                .insert(score.table.name.clone(), score.total);
            match_details
                .column_matches
                .insert(score.table.name.clone(), score.column_matches.clone());
        }

        info!(
            "Analyzed {} tables: {} relevant, confidence {:.2}",
            scores.len(),
            relevant.len(),
            confidence
        );

        AnalysisResult {
            relevant_tables: relevant.iter().map(|s| s.table).collect(),
            relevant_indices: ranked.iter().map(|&(index, _)| index).collect(),
            query: query.to_string(),
            confidence,
            match_details,
            table_scores: scores
                .iter()
                .enumerate()
                .map(TableScoreDetail::from)
                .collect(),
        }
    }

    fn confidence(&self, scores: &[TableScore<'_>], relevant: &[&TableScore<'_>]) -> f64 {
        if relevant.is_empty() {
            return 0.0;
        }
        let basis = match self.config.confidence_mode {
            ConfidenceMode::FirstScanned => scores.first().map(|s| s.total),
            ConfidenceMode::TopRanked => relevant.first().map(|s| s.total),
        };
        (basis.unwrap_or(0.0) / 2.0).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Column;

    fn shop_schema() -> Vec<Table> {
        vec![
            Table::new(
                "users",
                vec![Column::new("id", "uuid"), Column::new("email", "text")],
            ),
            Table::new(
                "orders",
                vec![
                    Column::new("id", "uuid"),
                    Column::new("user_id", "uuid"),
                    Column::new("total", "decimal"),
                ],
            ),
        ]
    }

    #[test]
    fn test_orders_with_user_information() {
        let schema = shop_schema();
        let result = RelevanceAnalyzer::default()
            .analyze(&schema, "find all orders with user information")
            .unwrap();

        let names: Vec<&str> = result.relevant_tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["orders", "users"]);
        assert_eq!(result.match_details.table_matches["orders"], 1.5);
        assert_eq!(result.match_details.table_matches["users"], 1.0);
        assert_eq!(result.match_details.column_matches["orders"], vec!["user_id"]);
        assert!(result.match_details.column_matches["users"].is_empty());
        // first table in the schema is "users"
        assert_eq!(result.confidence, 0.5);
        assert_eq!(result.query, "find all orders with user information");
    }

    #[test]
    fn test_top_ranked_confidence() {
        let schema = shop_schema();
        let config = AnalyzerConfig {
            confidence_mode: ConfidenceMode::TopRanked,
            ..Default::default()
        };
        let result = RelevanceAnalyzer::new(config)
            .analyze(&schema, "find all orders with user information")
            .unwrap();
        assert_eq!(result.confidence, 0.75);
    }

    #[test]
    fn test_blank_query_produces_no_result() {
        let schema = shop_schema();
        let analyzer = RelevanceAnalyzer::default();
        assert!(matches!(analyzer.analyze(&schema, "   "), Err(FinderError::EmptyQuery)));
        assert!(matches!(analyzer.analyze(&schema, ""), Err(FinderError::EmptyQuery)));
    }

    #[test]
    fn test_empty_schema_produces_no_result() {
        let analyzer = RelevanceAnalyzer::default();
        assert!(matches!(analyzer.analyze(&[], "orders"), Err(FinderError::EmptySchema)));
    }

    #[test]
    fn test_threshold_is_strict() {
        let schema = vec![
            // one matching column: exactly 0.5
            Table::new("ledger", vec![Column::new("order_ref", "text")]),
            // one matching column plus a semantic bonus: 0.8
            Table::new("ledger_sales", vec![Column::new("order_ref", "text")]),
        ];
        let result = RelevanceAnalyzer::default().analyze(&schema, "order").unwrap();

        assert_eq!(result.match_details.table_matches["ledger"], 0.5);
        let names: Vec<&str> = result.relevant_tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["ledger_sales"]);
    }

    #[test]
    fn test_nothing_relevant() {
        let schema = shop_schema();
        let result = RelevanceAnalyzer::default()
            .analyze(&schema, "weather forecast")
            .unwrap();
        assert!(result.is_empty());
        assert_eq!(result.top_table(), None);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.match_details.table_matches.len(), 2);
    }

    #[test]
    fn test_only_stop_words() {
        let schema = shop_schema();
        let result = RelevanceAnalyzer::default()
            .analyze(&schema, "show all of the list")
            .unwrap();
        assert!(result.is_empty());
        assert!(result.table_scores.iter().all(|s| s.total == 0.0));
    }

    #[test]
    fn test_duplicate_names_keep_every_score() {
        let schema = vec![
            Table::new("events", vec![Column::new("order_id", "uuid")]),
            Table::new("events", vec![]),
        ];
        let result = RelevanceAnalyzer::default().analyze(&schema, "order events").unwrap();

        // later table overwrites the earlier one in the name-keyed map
        assert_eq!(result.match_details.table_matches["events"], 1.0);
        assert_eq!(result.table_scores.len(), 2);
        assert_eq!(result.table_scores[0].total, 1.5);
        assert_eq!(result.table_scores[1].index, 1);
        assert_eq!(result.relevant_tables.len(), 2);
        assert_eq!(result.relevant_indices, vec![0, 1]);

        let totals: Vec<f64> = result.ranked().map(|(_, detail)| detail.total).collect();
        assert_eq!(totals, vec![1.5, 1.0]);
        let (first, detail) = result.ranked().next().unwrap();
        assert_eq!(first.columns.len(), 1);
        assert_eq!(detail.column_matches, vec!["order_id"]);
    }

    #[test]
    fn test_relevant_indices_follow_rank() {
        let schema = vec![
            Table::new("users", vec![]),
            Table::new("audit_log", vec![]),
            Table::new("orders", vec![Column::new("user_id", "uuid")]),
        ];
        let result = RelevanceAnalyzer::default().analyze(&schema, "user orders").unwrap();

        assert_eq!(result.relevant_indices, vec![2, 0]);
        let names: Vec<&str> = result.ranked().map(|(_, d)| d.name.as_str()).collect();
        assert_eq!(names, vec!["orders", "users"]);
    }

    #[test]
    fn test_configured_threshold() {
        let schema = shop_schema();
        let config = AnalyzerConfig {
            threshold: 1.0,
            ..Default::default()
        };
        let result = RelevanceAnalyzer::new(config)
            .analyze(&schema, "orders for each user")
            .unwrap();
        assert_eq!(result.relevant_tables.len(), 1);
        assert_eq!(result.top_table().map(|t| t.name.as_str()), Some("orders"));
    }

    #[test]
    fn test_serialized_shape() {
        let schema = shop_schema();
        let result = RelevanceAnalyzer::default().analyze(&schema, "orders").unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["relevantTables"][0]["name"], "orders");
        assert_eq!(json["relevantTables"][0]["columns"][1]["type"], "uuid");
        assert_eq!(json["relevantIndices"][0], 1);
        assert_eq!(json["matchDetails"]["tableMatches"]["orders"], 1.0);
        assert!(json["matchDetails"]["columnMatches"]["users"].is_array());
        assert_eq!(json["tableScores"][1]["nameScore"], 1.0);
        assert_eq!(json["query"], "orders");
    }
}
