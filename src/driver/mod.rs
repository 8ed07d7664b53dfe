//! Batch driver: load a record file, run a command script, write a log

pub mod records;
pub mod script;

pub use records::{load_records, parse_record, read_records};
pub use script::{load_script, RunSummary, ScriptRunner};
