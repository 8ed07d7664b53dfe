//! Query execution context
//!
//! The `QueryContext` borrows the sub-indices a query reads. It is built by
//! [`SearchIndex`](crate::search::SearchIndex) for the duration of one query.

use crate::query::ast::TextField;
use crate::search::{GeoIndex, TextFieldIndex};
use crate::tokenizer::Tokenizer;

/// Read-only view of the index used while evaluating clauses
#[derive(Clone, Copy)]
pub struct QueryContext<'a> {
    tokenizer: &'a Tokenizer,
    names: &'a TextFieldIndex,
    regions: &'a TextFieldIndex,
    types: &'a TextFieldIndex,
    geo: &'a GeoIndex,
}

impl<'a> QueryContext<'a> {
    pub fn new(
        tokenizer: &'a Tokenizer,
        names: &'a TextFieldIndex,
        regions: &'a TextFieldIndex,
        types: &'a TextFieldIndex,
        geo: &'a GeoIndex,
    ) -> Self {
        Self {
            tokenizer,
            names,
            regions,
            types,
            geo,
        }
    }

    /// Tokenizer used at ingestion; queries must tokenize the same way
    pub fn tokenizer(&self) -> &'a Tokenizer {
        self.tokenizer
    }

    pub fn text_index(&self, field: TextField) -> &'a TextFieldIndex {
        match field {
            TextField::Name => self.names,
            TextField::Region => self.regions,
            TextField::Type => self.types,
        }
    }

    pub fn geo(&self) -> &'a GeoIndex {
        self.geo
    }
}
