pub mod analyzer;
pub mod lexicon;
pub mod scorer;
pub mod semantic;
pub mod tokenizer;

pub use analyzer::*;
pub use lexicon::Lexicon;
pub use scorer::{score_table, TableScore};
pub use semantic::semantic_bonus;
pub use tokenizer::{filter_stop_words, query_words, tokenize};
