//! Built-in vocabulary: the stop-words dropped from every query and the
//! concept → related-terms table behind the semantic bonus.

use lazy_static::lazy_static;
use std::collections::{BTreeMap, HashMap, HashSet};

lazy_static! {
    static ref STOP_WORDS: HashSet<&'static str> = [
        "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
        "from", "up", "about", "into", "over", "after", "all", "find", "get", "show", "list",
        "display", "where", "which",
    ]
    .into_iter()
    .collect();

    static ref SYNONYMS: HashMap<&'static str, &'static [&'static str]> = {
        let mut m: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
        m.insert("user", &["customer", "client", "person", "account"]);
        m.insert("customer", &["user", "client", "buyer", "consumer"]);
        m.insert("order", &["purchase", "transaction", "sale"]);
        m.insert("product", &["item", "goods", "merchandise"]);
        m.insert("payment", &["transaction", "purchase", "sale"]);
        m
    };
}

/// Stop-words and synonyms used by one analyzer.
///
/// `Lexicon::default()` is the built-in vocabulary. Overrides replace a
/// table wholesale; entries are lowercased on the way in since query tokens
/// always are.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexicon {
    stop_words: HashSet<String>,
    synonyms: HashMap<String, Vec<String>>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            synonyms: SYNONYMS
                .iter()
                .map(|(concept, terms)| {
                    (
                        concept.to_string(),
                        terms.iter().map(|t| t.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }
}

impl Lexicon {
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_words = words
            .into_iter()
            .map(|w| w.as_ref().to_lowercase())
            .collect();
        self
    }

    pub fn with_synonyms(mut self, synonyms: &BTreeMap<String, Vec<String>>) -> Self {
        self.synonyms = synonyms
            .iter()
            .map(|(concept, terms)| {
                (
                    concept.to_lowercase(),
                    terms.iter().map(|t| t.to_lowercase()).collect(),
                )
            })
            .collect();
        self
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    /// Related terms for an exact concept key; empty when the word is not a key.
    pub fn related_terms(&self, word: &str) -> &[String] {
        self.synonyms.get(word).map(Vec::as_slice).unwrap_or(&[])
    }
}
