use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{GeoSearchError, Result};
use crate::models::{Command, Document};
use crate::search::SearchIndex;

/// Read and parse a script file
pub fn load_script<P: AsRef<Path>>(path: P) -> Result<Vec<Command>> {
    let script = fs::read_to_string(path)?;
    Ok(Command::parse_script(&script))
}

/// Outcome counts of one script run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub executed: usize,
    pub failed: usize,
}

/// Runs script commands against an index and writes the log
pub struct ScriptRunner<'a> {
    index: &'a SearchIndex,
}

impl<'a> ScriptRunner<'a> {
    pub fn new(index: &'a SearchIndex) -> Self {
        Self { index }
    }

    /// Run every command, writing results to `out`
    ///
    /// A failing command is logged and the run moves on; only write errors
    /// abort it.
    pub fn run<W: Write>(&self, commands: &[Command], out: &mut W) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        for command in commands {
            if let Command::Unknown(line) = command {
                writeln!(out, "command must start with QUERY or PRINT; got {}", line)?;
                continue;
            }

            writeln!(out, "==> {}", command.text())?;
            summary.executed += 1;
            match self.execute(command, out) {
                Ok(()) => {}
                Err(GeoSearchError::Io(e)) => return Err(e.into()),
                Err(e) => {
                    warn!("Command '{}' failed: {}", command.text(), e);
                    writeln!(
                        out,
                        "Failed to execute command [{}] reason [{}]",
                        command.text(),
                        e
                    )?;
                    summary.failed += 1;
                }
            }
        }
        info!(
            "Script finished: {} commands executed, {} failed",
            summary.executed, summary.failed
        );
        Ok(summary)
    }

    fn execute<W: Write>(&self, command: &Command, out: &mut W) -> Result<()> {
        match command {
            Command::Print(selector) => {
                out.write_all(self.index.print_index(selector)?.as_bytes())?;
            }
            Command::Query(text) => {
                let documents = self.index.search(text)?;
                if documents.is_empty() {
                    writeln!(out, "No match\n")?;
                } else {
                    writeln!(out, "{} matches", documents.len())?;
                    for document in &documents {
                        write_document(out, document)?;
                    }
                }
                writeln!(out)?;
            }
            Command::Unknown(_) => {}
        }
        Ok(())
    }
}

fn write_document<W: Write>(out: &mut W, document: &Document) -> Result<()> {
    writeln!(out, "Geographic ID: {}", document.id)?;
    writeln!(out, "Geographic Name: {}", document.name)?;
    writeln!(out, "Geographic Region: {}", document.region)?;
    writeln!(out, "Geographic Type: {}", document.place_type)?;
    writeln!(out, "Geographic Latitude: {}", document.latitude)?;
    writeln!(out, "Geographic Longitude: {}", document.longitude)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndexSettings;

    fn index() -> SearchIndex {
        let mut index = SearchIndex::new(IndexSettings::default()).unwrap();
        index
            .add_document(Document::new("A1", "Lac Long", "Lake", "45.5N", "73.6W", "Quebec"))
            .unwrap();
        index
    }

    fn run(script: &str) -> (String, RunSummary) {
        let index = index();
        let mut out = Vec::new();
        let summary = ScriptRunner::new(&index)
            .run(&Command::parse_script(script), &mut out)
            .unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn test_query_with_match() {
        let (log, summary) = run("QUERY name:lac\n");
        let expected = "==> QUERY name:lac\n\
            1 matches\n\
            Geographic ID: A1\n\
            Geographic Name: Lac Long\n\
            Geographic Region: Quebec\n\
            Geographic Type: Lake\n\
            Geographic Latitude: 45.5N\n\
            Geographic Longitude: 73.6W\n\
            \n\
            \n";
        assert_eq!(log, expected);
        assert_eq!(summary, RunSummary { executed: 1, failed: 0 });
    }

    #[test]
    fn test_query_without_match() {
        let (log, _) = run("QUERY name:mont // nothing here\n");
        assert_eq!(log, "==> QUERY name:mont \nNo match\n\n\n");
    }

    #[test]
    fn test_failures_and_unknown_commands() {
        let (log, summary) = run("PRINT all\nDELETE id:A1\nQUERY id\n");
        let expected = "==> PRINT all\n\
            Failed to execute command [PRINT all] reason [PRINT must be used with id or name or region or type; got all]\n\
            command must start with QUERY or PRINT; got DELETE id:A1\n\
            ==> QUERY id\n\
            Failed to execute command [QUERY id] reason [invalid query: id is not a valid query]\n";
        assert_eq!(log, expected);
        assert_eq!(summary, RunSummary { executed: 2, failed: 2 });
    }

    #[test]
    fn test_print_command() {
        let (log, _) = run("PRINT type");
        assert!(log.starts_with("==> PRINT type\nPRINTING inverted index of the type of places\n"));
        assert!(log.ends_with("lake -> [A1]\n"));
    }
}
