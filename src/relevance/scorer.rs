//! Per-table relevance scoring.
//!
//! A table collects points from three places:
//! 1. each word of its name that matches a query word (1.0 each)
//! 2. each column with a word matching a query word (0.5 each, once per column)
//! 3. the semantic bonus for related terms
//!
//! Matching is bidirectional substring containment on lowercased words, so
//! `user` matches `users` and `information` matches `info`.

use super::lexicon::Lexicon;
use super::semantic::semantic_bonus;
use crate::schema::Table;
use lazy_static::lazy_static;
use regex::Regex;

pub const NAME_MATCH_WEIGHT: f64 = 1.0;
pub const COLUMN_MATCH_WEIGHT: f64 = 0.5;

lazy_static! {
    static ref WORD_SEPARATOR: Regex = Regex::new(r"[_\s]+").unwrap();
}

#[derive(Debug, Clone)]
pub struct TableScore<'a> {
    pub table: &'a Table,
    pub total: f64,
    pub name_score: f64,
    pub column_score: f64,
    pub semantic_score: f64,
    /// Original (non-lowercased) names of the matching columns, in column order
    pub column_matches: Vec<String>,
}

/// Lowercased words of an identifier, split on runs of `_` or whitespace.
pub fn identifier_words(identifier: &str) -> Vec<String> {
    WORD_SEPARATOR
        .split(&identifier.to_lowercase())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

fn contains_either(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

fn matches_any(word: &str, query_words: &[String]) -> bool {
    query_words.iter().any(|q| contains_either(q, word))
}

pub fn score_table<'a>(table: &'a Table, query_words: &[String], lexicon: &Lexicon) -> TableScore<'a> {
    let name_hits = identifier_words(&table.name)
        .iter()
        .filter(|word| matches_any(word, query_words))
        .count();
    let name_score = name_hits as f64 * NAME_MATCH_WEIGHT;

    let column_matches: Vec<String> = table
        .columns
        .iter()
        .filter(|column| {
            identifier_words(&column.name)
                .iter()
                .any(|word| matches_any(word, query_words))
        })
        .map(|column| column.name.clone())
        .collect();
    let column_score = column_matches.len() as f64 * COLUMN_MATCH_WEIGHT;

    let semantic_score = semantic_bonus(table, query_words, lexicon);

    TableScore {
        table,
        total: name_score + column_score + semantic_score,
        name_score,
        column_score,
        semantic_score,
        column_matches,
    }
}
