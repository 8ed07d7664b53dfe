//! The composed geographic search index
//!
//! `SearchIndex` owns one id tree, a full-string and a tokenized inverted
//! index for each of name, region and type, and the latitude, longitude and
//! coordinate B+Trees.

pub mod field_index;
pub mod index;

pub use field_index::{GeoIndex, TextFieldIndex};
pub use index::{IndexSelector, SearchIndex};
