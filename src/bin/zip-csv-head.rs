//! Print the first rows of the CSV file packed inside a zip archive.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::Level;

use zip_csv_ingest::ingestion::{
    ArchiveCsvLoader, CsvSearch, DataIngestor, IngestionOptions, TracingObserver,
};
use zip_csv_ingest::IngestionError;

#[derive(Debug, Parser)]
#[command(name = "zip-csv-head", version, about)]
struct Cli {
    /// Zip archive holding exactly one CSV file.
    archive: PathBuf,

    /// Number of rows to print.
    #[arg(short = 'n', long, default_value_t = 5)]
    rows: usize,

    /// Also look for the CSV file in subdirectories of the archive.
    #[arg(long)]
    recursive: bool,

    /// Print one JSON object per row instead of a table.
    #[arg(long)]
    json: bool,

    /// Log ingestion steps to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), IngestionError> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let loader = ArchiveCsvLoader::with_options(IngestionOptions {
        search: if cli.recursive {
            CsvSearch::Recursive
        } else {
            CsvSearch::TopLevel
        },
        observer: Some(Arc::new(TracingObserver)),
        ..Default::default()
    });

    let head = loader.ingest(&cli.archive)?.head(cli.rows);
    if cli.json {
        for record in head.records() {
            let line = serde_json::to_string(&record)
                .map_err(|e| IngestionError::Io(e.into()))?;
            println!("{line}");
        }
    } else {
        print!("{head}");
    }
    Ok(())
}
