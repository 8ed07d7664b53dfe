use std::fmt::Write;

use crate::index::chained_map::ChainedHashMap;
use crate::index::sets;
use crate::models::DocumentId;

/// Term to document-id postings
///
/// Postings are appended without checking for duplicates: a document that
/// repeats a term posts its id once per occurrence. Queries deduplicate.
#[derive(Clone, Debug)]
pub struct InvertedIndex {
    postings: ChainedHashMap<String, Vec<DocumentId>>,
}

impl InvertedIndex {
    /// Create an index whose dictionary has `capacity` buckets
    pub fn new(capacity: usize) -> Self {
        Self {
            postings: ChainedHashMap::with_capacity(capacity),
        }
    }

    /// Append `id` to the posting list of `term`
    pub fn add_term(&mut self, id: &str, term: &str) {
        self.postings
            .get_or_insert_with(term.to_string(), Vec::new)
            .push(id.to_string());
    }

    /// Distinct ids posted under `term`; empty if the term is unknown
    pub fn query_term(&self, term: &str) -> Vec<DocumentId> {
        self.postings
            .get(term)
            .map(|ids| sets::dedup(ids))
            .unwrap_or_default()
    }

    /// Number of distinct terms
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Diagnostic dump, terms sorted lexicographically
    pub fn print_index(&self) -> String {
        let mut terms: Vec<&String> = self.postings.keys().collect();
        terms.sort();

        let mut out = String::new();
        let _ = writeln!(out, "total terms: {}", terms.len());
        out.push_str(
            "list of terms are printed in the format: term -> list of document ids containing that term\n",
        );
        for term in terms {
            let _ = writeln!(out, "{} -> [{}]", term, self.query_term(term).join(", "));
        }
        out
    }
}

impl Default for InvertedIndex {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_DICTIONARY_CAPACITY)
    }
}
