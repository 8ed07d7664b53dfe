//! Query executor
//!
//! Every clause is converted to a [`ClauseQuery`] before anything is
//! evaluated, so a malformed clause fails the whole query without partial
//! work. Clause results are then intersected left to right.

use std::time::Instant;

use tracing::{debug, info};

use crate::index::sets;
use crate::index::InvertedIndex;
use crate::models::DocumentId;
use crate::query::ast::{ClauseQuery, LocationMatch, TextMatch};
use crate::query::context::QueryContext;
use crate::query::parser::Query;
use crate::tokenizer::Tokenizer;
use crate::Result;

/// Query executor for running queries
pub struct QueryExecutor;

impl QueryExecutor {
    /// Execute a query and return the ids of matching documents
    ///
    /// Ids come out in the order of the last evaluated clause and are
    /// distinct whenever the query has more than one clause.
    pub fn execute(query: &Query, ctx: &QueryContext<'_>) -> Result<Vec<DocumentId>> {
        let start = Instant::now();

        let clauses = query
            .clauses()
            .iter()
            .map(ClauseQuery::try_from)
            .collect::<Result<Vec<_>>>()?;

        let mut matches: Option<Vec<DocumentId>> = None;
        for (clause, raw) in clauses.iter().zip(query.clauses()) {
            let ids = Self::evaluate(clause, ctx)?;
            debug!(
                "Clause '{}' ({}) matched {} documents",
                raw,
                clause.query_type(),
                ids.len()
            );

            let combined = match matches {
                Some(previous) => sets::intersect(&previous, &ids),
                None => ids,
            };
            let exhausted = combined.is_empty();
            matches = Some(combined);
            if exhausted {
                break;
            }
        }

        let matches = matches.unwrap_or_default();
        info!(
            "Query '{}' matched {} documents in {}us",
            query,
            matches.len(),
            start.elapsed().as_micros()
        );
        Ok(matches)
    }

    /// Evaluate a single clause against the index
    pub fn evaluate(clause: &ClauseQuery, ctx: &QueryContext<'_>) -> Result<Vec<DocumentId>> {
        match clause {
            ClauseQuery::Id(id) => Ok(vec![id.clone()]),
            ClauseQuery::Text { field, matcher } => {
                let index = ctx.text_index(*field);
                let tokenizer = ctx.tokenizer();
                let ids = match matcher {
                    TextMatch::Exact(text) => index.full.query_term(&tokenizer.normalize(text)),
                    TextMatch::All(text) => match_all(&index.tokens, tokenizer, text),
                    TextMatch::Any(alternatives) => {
                        alternatives.iter().fold(Vec::new(), |acc, alternative| {
                            let ids = match_all(&index.tokens, tokenizer, alternative);
                            sets::union(&acc, &ids)
                        })
                    }
                };
                Ok(ids)
            }
            ClauseQuery::Location(LocationMatch::At(coordinate)) => ctx.geo().at(coordinate),
            ClauseQuery::Location(LocationMatch::Within(first, second)) => {
                ctx.geo().within(first, second)
            }
        }
    }
}

/// Ids posted under every token of `text`; empty when `text` has no tokens
fn match_all(index: &InvertedIndex, tokenizer: &Tokenizer, text: &str) -> Vec<DocumentId> {
    let mut tokens = tokenizer.tokenize(text).into_iter();
    let Some(first) = tokens.next() else {
        return Vec::new();
    };

    let mut ids = index.query_term(&first);
    for token in tokens {
        if ids.is_empty() {
            break;
        }
        ids = sets::intersect(&ids, &index.query_term(&token));
    }
    ids
}
