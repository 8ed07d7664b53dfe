//! Typed clause representation
//!
//! A [`Clause`] is plain text; `ClauseQuery` is what the executor runs. The
//! conversion checks the field name, strips the operator wrapper from the
//! value and parses any coordinates, so every validation error surfaces
//! before a query touches the index.

use std::fmt;

use super::parser::Clause;
use crate::error::{GeoSearchError, Result};
use crate::models::{Coordinate, DocumentId};

const EXACT_MATCH: &str = "EXACT_MATCH";
const MATCH_ANY: &str = "MATCH_ANY";
const MATCH_ALL: &str = "MATCH_ALL";
const AT: &str = "AT";
const WITHIN: &str = "WITHIN";
const ALTERNATIVE_SEPARATOR: char = '|';

/// Text fields with a full-string and a tokenized index
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextField {
    Name,
    Region,
    Type,
}

impl TextField {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextField::Name => "name",
            TextField::Region => "region",
            TextField::Type => "type",
        }
    }
}

impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a text clause matches; arguments are raw, tokenized at execution
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextMatch {
    /// `EXACT_MATCH(..)`: the whole normalized value
    Exact(String),
    /// `MATCH_ANY(a|b|..)`: any alternative, each alternative with all its tokens
    Any(Vec<String>),
    /// `MATCH_ALL(..)` or an untagged value: every token
    All(String),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LocationMatch {
    /// `AT(lat,lon)`: exact coordinate
    At(Coordinate),
    /// `WITHIN(lat,lon|lat,lon)`: bounding box of two corners, in any order
    Within(Coordinate, Coordinate),
}

/// An executable clause
#[derive(Clone, Debug, PartialEq)]
pub enum ClauseQuery {
    Id(DocumentId),
    Text { field: TextField, matcher: TextMatch },
    Location(LocationMatch),
}

impl ClauseQuery {
    /// Type name for logging
    pub fn query_type(&self) -> &'static str {
        match self {
            ClauseQuery::Id(_) => "id",
            ClauseQuery::Text {
                matcher: TextMatch::Exact(_),
                ..
            } => "exact_match",
            ClauseQuery::Text {
                matcher: TextMatch::Any(_),
                ..
            } => "match_any",
            ClauseQuery::Text {
                matcher: TextMatch::All(_),
                ..
            } => "match_all",
            ClauseQuery::Location(LocationMatch::At(_)) => "at",
            ClauseQuery::Location(LocationMatch::Within(..)) => "within",
        }
    }
}

impl TryFrom<&Clause> for ClauseQuery {
    type Error = GeoSearchError;

    fn try_from(clause: &Clause) -> Result<Self> {
        let value = clause.value.trim();
        let field = match clause.field.as_str() {
            "id" => return Ok(ClauseQuery::Id(value.to_string())),
            "location" => return parse_location(value).map(ClauseQuery::Location),
            "name" => TextField::Name,
            "region" => TextField::Region,
            "type" => TextField::Type,
            _ => {
                return Err(GeoSearchError::UnknownField {
                    field: clause.field.clone(),
                    value: clause.value.clone(),
                })
            }
        };
        Ok(ClauseQuery::Text {
            field,
            matcher: parse_text_match(value)?,
        })
    }
}

fn parse_text_match(value: &str) -> Result<TextMatch> {
    let matcher = if value.starts_with(EXACT_MATCH) {
        TextMatch::Exact(operator_argument(value)?.to_string())
    } else if value.starts_with(MATCH_ANY) {
        TextMatch::Any(
            operator_argument(value)?
                .split(ALTERNATIVE_SEPARATOR)
                .map(str::to_string)
                .collect(),
        )
    } else if value.starts_with(MATCH_ALL) {
        TextMatch::All(operator_argument(value)?.to_string())
    } else {
        TextMatch::All(value.to_string())
    };
    Ok(matcher)
}

fn parse_location(value: &str) -> Result<LocationMatch> {
    if value.starts_with(AT) {
        let coordinate = operator_argument(value)?.parse()?;
        Ok(LocationMatch::At(coordinate))
    } else if value.starts_with(WITHIN) {
        let argument = operator_argument(value)?;
        let corners: Vec<&str> = argument.split(ALTERNATIVE_SEPARATOR).collect();
        let [first, second] = corners.as_slice() else {
            return Err(GeoSearchError::QueryParseError(format!(
                "invalid within location query [{}]",
                argument
            )));
        };
        Ok(LocationMatch::Within(first.parse()?, second.parse()?))
    } else {
        Err(GeoSearchError::QueryParseError(format!(
            "location must be queried with AT or WITHIN; got {}",
            value
        )))
    }
}

/// Text strictly between the first `(` and the last `)`, trimmed
pub fn operator_argument(value: &str) -> Result<&str> {
    let invalid = || GeoSearchError::QueryParseError(format!("{} is not a valid query", value));
    let open = value.find('(').ok_or_else(invalid)?;
    let close = value.rfind(')').ok_or_else(invalid)?;
    if open > close {
        return Err(invalid());
    }
    Ok(value[open + 1..close].trim())
}
