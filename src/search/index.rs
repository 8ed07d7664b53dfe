use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::IndexSettings;
use crate::error::{GeoSearchError, Result};
use crate::index::BalancedTree;
use crate::models::{Document, DocumentId};
use crate::query::{Query, QueryContext, QueryExecutor};
use crate::search::field_index::{GeoIndex, TextFieldIndex};
use crate::tokenizer::Tokenizer;

/// Which sub-index `print_index` dumps
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexSelector {
    Id,
    Name,
    Region,
    Type,
}

impl IndexSelector {
    fn header(&self) -> &'static str {
        match self {
            IndexSelector::Id => "PRINTING Balanced binary search tree of ids",
            IndexSelector::Name => "PRINTING inverted index of the names of places",
            IndexSelector::Region => "PRINTING inverted index of the region names of places",
            IndexSelector::Type => "PRINTING inverted index of the type of places",
        }
    }
}

impl FromStr for IndexSelector {
    type Err = GeoSearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "id" => Ok(IndexSelector::Id),
            "name" => Ok(IndexSelector::Name),
            "region" => Ok(IndexSelector::Region),
            "type" => Ok(IndexSelector::Type),
            other => Err(GeoSearchError::UnknownSelector(other.to_string())),
        }
    }
}

impl fmt::Display for IndexSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IndexSelector::Id => "id",
            IndexSelector::Name => "name",
            IndexSelector::Region => "region",
            IndexSelector::Type => "type",
        };
        f.write_str(name)
    }
}

/// In-memory geographic document index
///
/// Documents live in an AVL tree keyed by id; every other sub-index stores
/// ids only and results are resolved through that tree. The index is built
/// by appending documents and is never modified otherwise.
pub struct SearchIndex {
    settings: IndexSettings,
    tokenizer: Tokenizer,
    documents: BalancedTree<DocumentId, Arc<Document>>,
    names: TextFieldIndex,
    regions: TextFieldIndex,
    types: TextFieldIndex,
    geo: GeoIndex,
}

impl SearchIndex {
    pub fn new(settings: IndexSettings) -> Result<Self> {
        settings.validate()?;
        let capacity = settings.dictionary_capacity.max(1);

        Ok(Self {
            tokenizer: Tokenizer::new(&settings.tokenizer),
            documents: BalancedTree::new(),
            names: TextFieldIndex::new(capacity),
            regions: TextFieldIndex::new(capacity),
            types: TextFieldIndex::new(capacity),
            geo: GeoIndex::new(settings.max_key_size)?,
            settings,
        })
    }

    /// Index one document
    ///
    /// Coordinates are validated first; a rejected document leaves the
    /// index untouched.
    pub fn add_document(&mut self, document: Document) -> Result<()> {
        let coordinate = document.coordinate()?;
        let id = document.id.clone();

        self.names.add(&id, &document.name, &self.tokenizer);
        self.regions.add(&id, &document.region, &self.tokenizer);
        self.types.add(&id, &document.place_type, &self.tokenizer);
        self.geo.add(&id, coordinate);

        if self.documents.contains_key(&id) {
            warn!(
                "Document {} replaced; earlier postings now resolve to the new document",
                id
            );
        }
        debug!("Indexed document {}", id);
        self.documents.insert(id, Arc::new(document));
        Ok(())
    }

    /// Index documents in order, stopping at the first rejected one
    pub fn add_documents<I>(&mut self, documents: I) -> Result<usize>
    where
        I: IntoIterator<Item = Document>,
    {
        let start = Instant::now();
        let mut count = 0;
        for document in documents {
            self.add_document(document)?;
            count += 1;
        }
        info!(
            "Indexed {} documents in {}ms ({} total)",
            count,
            start.elapsed().as_millis(),
            self.len()
        );
        Ok(count)
    }

    /// Evaluate a parsed query
    pub fn search_query(&self, query: &Query) -> Result<Vec<Arc<Document>>> {
        let ids = QueryExecutor::execute(query, &self.context())?;

        let documents = ids
            .iter()
            .filter_map(|id| {
                let document = self.documents.get(id).cloned();
                if document.is_none() {
                    warn!("Query '{}' produced unknown document id {}", query, id);
                }
                document
            })
            .collect();
        Ok(documents)
    }

    /// Parse and evaluate a query string
    pub fn search(&self, text: &str) -> Result<Vec<Arc<Document>>> {
        self.search_query(&Query::parse(text)?)
    }

    pub fn get(&self, id: &str) -> Option<Arc<Document>> {
        self.documents.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn settings(&self) -> &IndexSettings {
        &self.settings
    }

    /// Borrowed view of the sub-indices for query evaluation
    pub fn context(&self) -> QueryContext<'_> {
        QueryContext::new(
            &self.tokenizer,
            &self.names,
            &self.regions,
            &self.types,
            &self.geo,
        )
    }

    /// Diagnostic dump of one sub-index, selected by name
    pub fn print_index(&self, selector: &str) -> Result<String> {
        let selector: IndexSelector = selector.parse()?;
        let body = match selector {
            IndexSelector::Id => self.documents.print_tree(),
            IndexSelector::Name => self.names.tokens.print_index(),
            IndexSelector::Region => self.regions.tokens.print_index(),
            IndexSelector::Type => self.types.full.print_index(),
        };
        Ok(format!("{}\n{}", selector.header(), body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TokenizerConfig;

    fn lake() -> Document {
        Document::new("A1", "Lac Long", "Lake", "45.5N", "73.6W", "Quebec")
    }

    #[test]
    fn test_add_and_get() {
        let mut index = SearchIndex::new(IndexSettings::default()).unwrap();
        index.add_document(lake()).unwrap();

        assert_eq!(index.len(), 1);
        assert_eq!(index.get("A1").unwrap().name, "Lac Long");
        assert!(index.get("B2").is_none());
    }

    #[test]
    fn test_invalid_settings() {
        let settings = IndexSettings::default().with_max_key_size(0);
        assert!(matches!(
            SearchIndex::new(settings),
            Err(GeoSearchError::InvalidMaxKeySize(0))
        ));
    }

    #[test]
    fn test_rejected_document_leaves_index_unchanged() {
        let mut index = SearchIndex::new(IndexSettings::default()).unwrap();
        let bad = Document::new("B2", "Lac Rond", "Lake", "95.0", "10.0", "Quebec");
        assert!(index.add_document(bad).is_err());

        assert!(index.is_empty());
        assert!(index.search("name:rond").unwrap().is_empty());
        assert!(index.print_index("name").unwrap().contains("total terms: 0"));
    }

    #[test]
    fn test_unknown_ids_are_dropped() {
        let mut index = SearchIndex::new(IndexSettings::default()).unwrap();
        index.add_document(lake()).unwrap();

        assert!(index.search("id:Z9").unwrap().is_empty());
        assert_eq!(index.search("id:A1").unwrap().len(), 1);
    }

    #[test]
    fn test_print_index_headers() {
        let mut index = SearchIndex::new(IndexSettings::default()).unwrap();
        index.add_document(lake()).unwrap();

        let names = index.print_index("name").unwrap();
        assert!(names.starts_with("PRINTING inverted index of the names of places\n"));
        assert!(names.contains("lac -> [A1]"));

        let regions = index.print_index("region").unwrap();
        assert!(regions.starts_with("PRINTING inverted index of the region names of places\n"));
        assert!(regions.contains("quebec -> [A1]"));

        let types = index.print_index("type").unwrap();
        assert!(types.contains("lake -> [A1]"));

        let ids = index.print_index("id").unwrap();
        assert!(ids.starts_with("PRINTING Balanced binary search tree of ids\nroot node: key=A1"));

        assert!(matches!(
            index.print_index("all"),
            Err(GeoSearchError::UnknownSelector(_))
        ));
    }

    #[test]
    fn test_duplicate_id_replaces_document() {
        let mut index = SearchIndex::new(IndexSettings::default()).unwrap();
        index.add_document(lake()).unwrap();
        index
            .add_document(Document::new("A1", "Mont", "Mountain", "46.0N", "74.0W", "Quebec"))
            .unwrap();

        assert_eq!(index.len(), 1);
        assert_eq!(index.get("A1").unwrap().name, "Mont");

        let results = index.search("name:lac").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Mont");
        assert_eq!(index.search("name:mont").unwrap().len(), 1);
    }

    #[test]
    fn test_custom_tokenizer_settings() {
        let settings = IndexSettings::default().with_tokenizer(TokenizerConfig {
            stop_words: vec!["lac".to_string()],
            ..TokenizerConfig::default()
        });
        let mut index = SearchIndex::new(settings).unwrap();
        index.add_document(lake()).unwrap();

        assert_eq!(index.settings().tokenizer.stop_words, vec!["lac"]);
        assert_eq!(index.search("name:long").unwrap().len(), 1);
        assert!(!index.print_index("name").unwrap().contains("lac -> "));
    }

    #[test]
    fn test_selector_round_trip() {
        for name in ["id", "name", "region", "type"] {
            let selector: IndexSelector = name.parse().unwrap();
            assert_eq!(selector.to_string(), name);
        }
    }
}
