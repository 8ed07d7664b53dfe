use std::fs;

use tempfile::TempDir;

use geosearch::config::IndexSettings;
use geosearch::driver::{load_records, load_script, ScriptRunner};
use geosearch::SearchIndex;

const RECORDS: &str = "\
CGNDB ID,Geographical Name,Language,Syllabic Form,Generic Term,Generic Category,Concise Code,Toponymic Feature ID,Latitude,Longitude,Province - Territory,Relevance at Scale,Decision Date,Source
FDBCX,Lac Long,French,,Lake,Water,LAKE,1,46.1N,74.2W,Quebec,250000,1968-01-01,Source
EAUUH,Aux,French,,Village,Populated Place,UNP,2,44.1N,77.3W,Ontario,50000,1970-01-01,Source
BAAAA,\"Lac Rond, Le\",French,,Lake,Water,LAKE,3,46.5N,73.9W,Quebec,250000,1968-01-01,Source
";

const SCRIPT: &str = "\
// sample script
QUERY name:lac
QUERY region:Ontario AND type:lake

PRINT type
PRINT nothing
LIST everything
QUERY location:WITHIN(46,-74|47,-75)
";

const EXPECTED_LOG: &str = "\
==> QUERY name:lac
2 matches
Geographic ID: BAAAA
Geographic Name: Lac Rond, Le
Geographic Region: Quebec
Geographic Type: Lake
Geographic Latitude: 46.5N
Geographic Longitude: 73.9W

Geographic ID: FDBCX
Geographic Name: Lac Long
Geographic Region: Quebec
Geographic Type: Lake
Geographic Latitude: 46.1N
Geographic Longitude: 74.2W


==> QUERY region:Ontario AND type:lake
No match


==> PRINT type
PRINTING inverted index of the type of places
total terms: 2
list of terms are printed in the format: term -> list of document ids containing that term
lake -> [BAAAA, FDBCX]
village -> [EAUUH]
==> PRINT nothing
Failed to execute command [PRINT nothing] reason [PRINT must be used with id or name or region or type; got nothing]
command must start with QUERY or PRINT; got LIST everything
==> QUERY location:WITHIN(46,-74|47,-75)
1 matches
Geographic ID: FDBCX
Geographic Name: Lac Long
Geographic Region: Quebec
Geographic Type: Lake
Geographic Latitude: 46.1N
Geographic Longitude: 74.2W


";

fn run_script(records: &str, script: &str) -> String {
    let tmp = TempDir::new().unwrap();
    let record_path = tmp.path().join("records.csv");
    let script_path = tmp.path().join("script.txt");
    fs::write(&record_path, records).unwrap();
    fs::write(&script_path, script).unwrap();

    let mut index = SearchIndex::new(IndexSettings::default()).unwrap();
    index.add_documents(load_records(&record_path).unwrap()).unwrap();

    let commands = load_script(&script_path).unwrap();
    let mut log = Vec::new();
    ScriptRunner::new(&index).run(&commands, &mut log).unwrap();
    String::from_utf8(log).unwrap()
}

#[test]
fn test_golden_log() {
    assert_eq!(run_script(RECORDS, SCRIPT), EXPECTED_LOG);
}

#[test]
fn test_records_sorted_by_id() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("records.csv");
    fs::write(&path, RECORDS).unwrap();

    let ids: Vec<String> = load_records(&path)
        .unwrap()
        .into_iter()
        .map(|doc| doc.id)
        .collect();
    assert_eq!(ids, vec!["BAAAA", "EAUUH", "FDBCX"]);
}

#[test]
fn test_print_id_tree() {
    let log = run_script(RECORDS, "PRINT id\n");
    let mut lines = log.lines();
    assert_eq!(lines.next(), Some("==> PRINT id"));
    assert_eq!(lines.next(), Some("PRINTING Balanced binary search tree of ids"));
    assert_eq!(
        lines.next(),
        Some("root node: key=EAUUH value=Document{id: EAUUH name: Aux type: Village latitude: 44.1N longitude: 77.3W region: Ontario}")
    );
    assert!(lines.next().unwrap_or_default().starts_with("left of node (EAUUH): key=BAAAA"));
    assert!(lines.next().unwrap_or_default().starts_with("right of node (EAUUH): key=FDBCX"));
    assert_eq!(lines.next(), None);
}

#[test]
fn test_missing_record_file() {
    let tmp = TempDir::new().unwrap();
    let err = load_records(tmp.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, geosearch::GeoSearchError::Io(_)));
}

#[test]
fn test_short_record_fails_load() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("records.csv");
    fs::write(&path, "header\nX1,Lac,French\n").unwrap();
    let err = load_records(&path).unwrap_err();
    assert_eq!(err.to_string(), "X1,Lac,French is not a valid record");
}
