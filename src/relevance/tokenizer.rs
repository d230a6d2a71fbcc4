use super::lexicon::Lexicon;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PUNCTUATION: Regex = Regex::new(r"[.,?!]").unwrap();
}

/// Lowercase the query, delete `. , ? !`, split on whitespace and drop
/// single-character tokens. Repeated words stay repeated.
pub fn tokenize(query: &str) -> Vec<String> {
    let lowered = query.to_lowercase();
    let stripped = PUNCTUATION.replace_all(&lowered, "");
    stripped
        .split_whitespace()
        .filter(|token| token.chars().count() > 1)
        .map(str::to_string)
        .collect()
}

pub fn filter_stop_words(tokens: Vec<String>, lexicon: &Lexicon) -> Vec<String> {
    tokens
        .into_iter()
        .filter(|token| !lexicon.is_stop_word(token))
        .collect()
}

/// Tokens of `query` that take part in scoring.
pub fn query_words(query: &str, lexicon: &Lexicon) -> Vec<String> {
    filter_stop_words(tokenize(query), lexicon)
}
