//! Record file loading
//!
//! The record file is comma-delimited with a header row. A `"` toggles
//! quoting: quote characters are dropped and commas between them stay in the
//! field. Only columns 0, 1, 4, 8, 9 and 10 are used.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::{GeoSearchError, Result};
use crate::models::Document;

const FIELD_SEPARATOR: char = ',';
const QUOTE: char = '"';

const ID_COLUMN: usize = 0;
const NAME_COLUMN: usize = 1;
const TYPE_COLUMN: usize = 4;
const LATITUDE_COLUMN: usize = 8;
const LONGITUDE_COLUMN: usize = 9;
const REGION_COLUMN: usize = 10;
const MIN_FIELDS: usize = REGION_COLUMN + 1;

/// Load every record of `path`, sorted by id
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<Document>> {
    let path = path.as_ref();
    let documents = read_records(BufReader::new(File::open(path)?))?;
    debug!("Loaded {} records from {:?}", documents.len(), path);
    Ok(documents)
}

/// Read records from any buffered source; the first line is the header
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<Document>> {
    let mut documents = Vec::new();
    for line in reader.lines().skip(1) {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        documents.push(parse_record(line)?);
    }
    documents.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(documents)
}

/// Build a document from one record line
pub fn parse_record(line: &str) -> Result<Document> {
    let mut fields = split_fields(line);
    if fields.len() < MIN_FIELDS {
        return Err(GeoSearchError::InvalidRecord(line.to_string()));
    }
    let mut take = |column: usize| std::mem::take(&mut fields[column]);

    Ok(Document {
        id: take(ID_COLUMN),
        name: take(NAME_COLUMN),
        place_type: take(TYPE_COLUMN),
        latitude: take(LATITUDE_COLUMN),
        longitude: take(LONGITUDE_COLUMN),
        region: take(REGION_COLUMN),
    })
}

/// Split a line on commas outside quotes
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;

    for c in line.chars() {
        match c {
            QUOTE => quoted = !quoted,
            FIELD_SEPARATOR if !quoted => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}
