pub mod config;
pub mod driver;
pub mod error;
pub mod index;
pub mod models;
pub mod query;
pub mod search;
pub mod tokenizer;

pub use config::{IndexSettings, TokenizerConfig};
pub use error::{GeoSearchError, Result};
pub use models::*;
pub use query::Query;
pub use search::{IndexSelector, SearchIndex};
pub use tokenizer::Tokenizer;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
