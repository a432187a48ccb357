//! `zip-csv-ingest` extracts the single CSV file contained in a zip archive and loads it into an
//! in-memory [`types::DataSet`].
//!
//! The primary entrypoint is [`ingestion::ArchiveCsvLoader`] (an implementation of
//! [`ingestion::DataIngestor`]), or the free function [`ingestion::ingest_from_path`] it wraps.
//!
//! ## What an ingest call does
//!
//! 1. Checks that the path exists and ends in `.zip`.
//! 2. Unpacks the archive into a fresh scratch directory that is removed before the call returns,
//!    whether it succeeds or fails.
//! 3. Looks for `*.csv` files at the archive root (or in every directory with
//!    [`ingestion::CsvSearch::Recursive`]). Exactly one must exist.
//! 4. Parses it: comma-separated, header row first, standard quoting.
//!
//! ## Value types
//!
//! Column types are inferred from the values:
//!
//! - [`types::DataType::Int64`] if every value is an integer
//! - [`types::DataType::Float64`] if every value is a decimal or exponent literal (`inf`/`nan`
//!   words are text)
//! - [`types::DataType::Bool`] if every value is `true`/`false`
//! - [`types::DataType::Utf8`] otherwise
//!
//! Empty cells and the usual missing-value markers (`NA`, `N/A`, `NULL`, `NaN`, ... see
//! [`ingestion::csv::DEFAULT_NULL_VALUES`]) map to [`types::Value::Null`] and do not influence
//! inference.
//!
//! ## Quick example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use zip_csv_ingest::ingestion::{ArchiveCsvLoader, DataIngestor};
//!
//! # fn main() -> Result<(), zip_csv_ingest::IngestionError> {
//! let ds = ArchiveCsvLoader::new().ingest(Path::new("archive.zip"))?;
//! println!("columns={:?} rows={}", ds.column_names(), ds.row_count());
//! for record in ds.records().take(3) {
//!     println!("{}", serde_json::to_string(&record).unwrap());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Every failure is returned as an [`IngestionError`]; [`IngestionError::kind`] classifies it as
//! [`ErrorKind::NotFound`], [`ErrorKind::InvalidFormat`], [`ErrorKind::AmbiguousInput`],
//! [`ErrorKind::Parse`] or [`ErrorKind::Io`]. Nothing is retried.
//!
//! ## Modules
//!
//! - [`ingestion`]: the loader, archive handling and CSV parsing
//! - [`types`]: schema + in-memory dataset types
//! - [`error`]: error types used across ingestion

pub mod error;
pub mod ingestion;
pub mod types;

pub use error::{ErrorKind, IngestionError, IngestionResult};
