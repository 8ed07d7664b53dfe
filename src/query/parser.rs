//! Query string parser
//!
//! # Grammar
//!
//! ```text
//! query  := clause (" AND " clause)*
//! clause := field ":" value
//! ```
//!
//! `AND` is case-sensitive and must be surrounded by single spaces. Field and
//! value are trimmed and must both be non-empty; a clause holds exactly one
//! colon. Operators inside the value (`EXACT_MATCH(..)`, `WITHIN(..)`, ...)
//! are interpreted later, see [`ClauseQuery`](super::ast::ClauseQuery).
//!
//! # Example
//!
//! ```rust
//! use geosearch::query::Query;
//!
//! let query = Query::parse("name:lac AND region:Quebec").unwrap();
//! assert_eq!(query.clauses().len(), 2);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{GeoSearchError, Result};

const CLAUSE_SEPARATOR: &str = " AND ";
const FIELD_SEPARATOR: char = ':';

/// One `field:value` unit of a query
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clause {
    pub field: String,
    pub value: String,
}

impl Clause {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.value)
    }
}

/// A parsed query: clauses combined with AND, in the order written
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    text: String,
    clauses: Vec<Clause>,
}

impl Query {
    /// Parse a query string
    pub fn parse(text: &str) -> Result<Self> {
        let clauses = text
            .split(CLAUSE_SEPARATOR)
            .map(|raw| Self::parse_clause(text, raw))
            .collect::<Result<Vec<_>>>()?;

        if clauses.is_empty() {
            return Err(GeoSearchError::QueryParseError(format!(
                "{} has no clause",
                text
            )));
        }

        Ok(Self {
            text: text.to_string(),
            clauses,
        })
    }

    fn parse_clause(text: &str, raw: &str) -> Result<Clause> {
        let invalid = || GeoSearchError::QueryParseError(format!("{} is not a valid query", text));

        let mut parts = raw.split(FIELD_SEPARATOR);
        let (Some(field), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };

        let (field, value) = (field.trim(), value.trim());
        if field.is_empty() || value.is_empty() {
            return Err(invalid());
        }
        Ok(Clause::new(field, value))
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// The query as written
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl FromStr for Query {
    type Err = GeoSearchError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
