//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`ArchiveCsvLoader`] or [`ingest_from_path`] (from [`unified`]) which:
//!
//! - validates the archive path and unpacks it into a scoped scratch directory
//! - requires exactly one CSV file in the archive
//! - parses it into an in-memory [`crate::types::DataSet`]
//! - optionally reports success/failure/alerts to an [`IngestionObserver`]
//!
//! The building blocks are also available under:
//! - [`archive`]
//! - [`csv`]

pub mod archive;
pub mod csv;
pub mod loader;
pub mod observability;
pub mod unified;

pub use self::archive::{CsvSearch, ExtractionDir, ExtractionReport};
pub use self::csv::CsvOptions;
pub use loader::{ArchiveCsvLoader, DataIngestor};
pub use observability::{
    CompositeObserver, FileObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats,
    TracingObserver,
};
pub use unified::{ingest_from_path, IngestionOptions};
