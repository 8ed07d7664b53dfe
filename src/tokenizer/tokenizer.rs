use std::collections::HashSet;

use crate::config::TokenizerConfig;

/// Field-value tokenizer with a stop-word list
///
/// Text is lower-cased and split on a fixed delimiter set. Stop words are
/// dropped, except when a value consists of nothing but stop words: then the
/// stop words are kept so names like "Aux" stay searchable.
#[derive(Clone, Debug)]
pub struct Tokenizer {
    config: TokenizerConfig,
    stopwords: HashSet<String>,
}

impl Tokenizer {
    /// Create a new tokenizer from configuration
    pub fn new(config: &TokenizerConfig) -> Self {
        let stopwords = config
            .stop_words
            .iter()
            .map(|s| s.to_lowercase())
            .collect();

        Self {
            config: config.clone(),
            stopwords,
        }
    }

    /// Tokenize text into a vector of terms
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let text = if self.config.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let (stopwords, tokens): (Vec<String>, Vec<String>) = text
            .split(|c: char| self.config.delimiters.contains(&c))
            .filter(|word| !word.is_empty())
            .map(str::to_string)
            .partition(|word| self.is_stopword(word));

        if tokens.is_empty() {
            stopwords
        } else {
            tokens
        }
    }

    /// Tokenize and re-join with single spaces: the key of full-string indices
    pub fn normalize(&self, text: &str) -> String {
        self.tokenize(text).join(" ")
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(&TokenizerConfig::default())
    }
}
