use ordered_float::OrderedFloat;

use crate::index::{sets, BPlusTree, InvertedIndex, VecStore};
use crate::models::{Coordinate, DocumentId};
use crate::tokenizer::Tokenizer;
use crate::Result;

/// Full-string and tokenized postings of one text field
#[derive(Clone, Debug)]
pub struct TextFieldIndex {
    /// Normalized whole value -> ids
    pub full: InvertedIndex,
    /// Single token -> ids
    pub tokens: InvertedIndex,
}

impl TextFieldIndex {
    pub fn new(capacity: usize) -> Self {
        Self {
            full: InvertedIndex::new(capacity),
            tokens: InvertedIndex::new(capacity),
        }
    }

    /// Index `value` for `id`. A value without tokens is not indexed.
    pub fn add(&mut self, id: &str, value: &str, tokenizer: &Tokenizer) {
        let tokens = tokenizer.tokenize(value);
        if tokens.is_empty() {
            return;
        }
        for token in &tokens {
            self.tokens.add_term(id, token);
        }
        self.full.add_term(id, &tokens.join(" "));
    }
}

/// Latitude, longitude and coordinate B+Trees over one shared value store
#[derive(Clone, Debug)]
pub struct GeoIndex {
    store: VecStore<DocumentId>,
    by_latitude: BPlusTree<OrderedFloat<f64>, DocumentId>,
    by_longitude: BPlusTree<OrderedFloat<f64>, DocumentId>,
    by_coordinate: BPlusTree<Coordinate, DocumentId>,
}

impl GeoIndex {
    pub fn new(max_key_size: usize) -> Result<Self> {
        Ok(Self {
            store: VecStore::new(),
            by_latitude: BPlusTree::new(max_key_size)?,
            by_longitude: BPlusTree::new(max_key_size)?,
            by_coordinate: BPlusTree::new(max_key_size)?,
        })
    }

    pub fn add(&mut self, id: &str, coordinate: Coordinate) {
        self.by_latitude.insert(
            OrderedFloat(coordinate.latitude()),
            id.to_string(),
            &mut self.store,
        );
        self.by_longitude.insert(
            OrderedFloat(coordinate.longitude()),
            id.to_string(),
            &mut self.store,
        );
        self.by_coordinate
            .insert(coordinate, id.to_string(), &mut self.store);
    }

    /// Ids located exactly at `coordinate`
    pub fn at(&self, coordinate: &Coordinate) -> Result<Vec<DocumentId>> {
        self.by_coordinate.find(coordinate, &self.store)
    }

    /// Ids inside the bounding box of two corners, edges included
    ///
    /// Each axis is range-scanned on its own tree and the two id sets are
    /// intersected.
    pub fn within(&self, first: &Coordinate, second: &Coordinate) -> Result<Vec<DocumentId>> {
        let (lower, upper) = Coordinate::bounding_box(first, second);
        let by_latitude = self.by_latitude.find_range(
            &OrderedFloat(lower.latitude()),
            &OrderedFloat(upper.latitude()),
            &self.store,
        )?;
        if by_latitude.is_empty() {
            return Ok(Vec::new());
        }
        let by_longitude = self.by_longitude.find_range(
            &OrderedFloat(lower.longitude()),
            &OrderedFloat(upper.longitude()),
            &self.store,
        )?;
        Ok(sets::intersect(&by_latitude, &by_longitude))
    }

    /// Number of indexed coordinates
    pub fn len(&self) -> usize {
        self.by_coordinate.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_coordinate.is_empty()
    }
}
