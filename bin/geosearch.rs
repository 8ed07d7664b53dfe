use anyhow::{Context, Result};
use clap::Parser;
use geosearch::driver::{load_records, load_script, ScriptRunner};
use geosearch::{IndexSettings, SearchIndex};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "geosearch")]
#[command(about = "Geographic record search: load records, run a query script, write a log", long_about = None)]
struct Args {
    /// Record file (comma-delimited, with a header row)
    record_file: PathBuf,

    /// Script of PRINT / QUERY commands, one per line
    script_file: PathBuf,

    /// Log file receiving the command results
    log_file: PathBuf,

    /// JSON file with index settings
    #[arg(long, env = "GEOSEARCH_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("Starting geosearch v{}", geosearch::VERSION);

    let settings = match &args.config {
        Some(path) => IndexSettings::from_json_file(path)
            .with_context(|| format!("Config file [{}] could not be loaded", path.display()))?,
        None => IndexSettings::default(),
    };

    info!("Index settings:");
    info!("  Max key size: {}", settings.max_key_size);
    info!("  Dictionary capacity: {}", settings.dictionary_capacity);

    let documents = load_records(&args.record_file).with_context(|| {
        format!("Record file [{}] could not be read", args.record_file.display())
    })?;

    let mut index = SearchIndex::new(settings)?;
    index.add_documents(documents)?;

    let commands = load_script(&args.script_file).with_context(|| {
        format!("Script file [{}] could not be read", args.script_file.display())
    })?;

    let log = File::create(&args.log_file)
        .with_context(|| format!("Log file [{}] could not be created", args.log_file.display()))?;
    let mut log = BufWriter::new(log);
    let summary = ScriptRunner::new(&index).run(&commands, &mut log)?;
    log.flush()?;

    info!(
        "Wrote {} command results to {:?} ({} failed)",
        summary.executed, args.log_file, summary.failed
    );

    Ok(())
}
