//! Query language and evaluation
//!
//! A query is a conjunction of `field:value` clauses:
//!
//! ```text
//! name:MATCH_ANY(lac|mont) AND region:quebec AND location:WITHIN(46,-70|45,-75)
//! ```
//!
//! - `id`: literal document id
//! - `name`, `region`, `type`: `EXACT_MATCH(..)`, `MATCH_ANY(a|b)`,
//!   `MATCH_ALL(..)` or an untagged value (same as `MATCH_ALL`)
//! - `location`: `AT(lat,lon)` or `WITHIN(lat,lon|lat,lon)`

pub mod ast;
pub mod context;
pub mod executor;
pub mod parser;

pub use ast::{ClauseQuery, LocationMatch, TextField, TextMatch};
pub use context::QueryContext;
pub use executor::QueryExecutor;
pub use parser::{Clause, Query};
