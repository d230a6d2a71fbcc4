use super::lexicon::Lexicon;
use crate::schema::Table;

pub const SEMANTIC_BONUS: f64 = 0.3;

/// Bonus for query words whose related terms appear inside the table name or
/// any column name. A word earns at most one bonus per table.
pub fn semantic_bonus(table: &Table, query_words: &[String], lexicon: &Lexicon) -> f64 {
    let table_name = table.name.to_lowercase();
    let column_names: Vec<String> = table
        .columns
        .iter()
        .map(|c| c.name.to_lowercase())
        .collect();

    let matched_words = query_words
        .iter()
        .filter(|word| {
            lexicon.related_terms(word).iter().any(|term| {
                table_name.contains(term.as_str())
                    || column_names.iter().any(|c| c.contains(term.as_str()))
            })
        })
        .count();

    matched_words as f64 * SEMANTIC_BONUS
}
