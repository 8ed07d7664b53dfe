use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{GeoSearchError, Result};

/// Default B+Tree fan-out: a node splits once it holds more keys than this
pub const DEFAULT_MAX_KEY_SIZE: usize = 16;

/// Default bucket count for inverted index dictionaries (a prime)
pub const DEFAULT_DICTIONARY_CAPACITY: usize = 100_003;

/// Index settings configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexSettings {
    /// Maximum number of keys a B+Tree node holds before splitting
    pub max_key_size: usize,
    /// Number of hash buckets in each inverted index dictionary
    pub dictionary_capacity: usize,
    pub tokenizer: TokenizerConfig,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            max_key_size: DEFAULT_MAX_KEY_SIZE,
            dictionary_capacity: DEFAULT_DICTIONARY_CAPACITY,
            tokenizer: TokenizerConfig::default(),
        }
    }
}

impl IndexSettings {
    /// Set the B+Tree fan-out
    pub fn with_max_key_size(mut self, max_key_size: usize) -> Self {
        self.max_key_size = max_key_size;
        self
    }

    /// Set the dictionary bucket count
    pub fn with_dictionary_capacity(mut self, capacity: usize) -> Self {
        self.dictionary_capacity = capacity;
        self
    }

    /// Set the tokenizer configuration
    pub fn with_tokenizer(mut self, tokenizer: TokenizerConfig) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Check the settings can build an index
    pub fn validate(&self) -> Result<()> {
        if self.max_key_size < 1 {
            return Err(GeoSearchError::InvalidMaxKeySize(self.max_key_size));
        }
        Ok(())
    }

    /// Load settings from a JSON file. Missing keys keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let settings: IndexSettings = serde_json::from_str(raw)?;
        settings.validate()?;
        Ok(settings)
    }
}

/// Tokenizer configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    pub lowercase: bool,
    /// Characters that end a token
    pub delimiters: Vec<char>,
    /// Words dropped from token lists unless nothing else remains
    pub stop_words: Vec<String>,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            delimiters: vec![' ', ';', ',', '(', ')', '|'],
            stop_words: ["a", "aux", "des", "du", "of", "la", "sur", "de", "the", "à"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
