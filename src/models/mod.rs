pub mod command;
pub mod document;

pub use command::Command;
pub use document::{parse_latitude, parse_longitude, Coordinate, Document, DocumentId};
