//! The ingestor capability and its archive-backed implementation.

use std::path::Path;

use crate::error::IngestionResult;
use crate::types::DataSet;

use super::unified::{ingest_from_path, IngestionOptions};

/// Something that can turn a source location into a [`DataSet`].
pub trait DataIngestor {
    fn ingest(&self, source: &Path) -> IngestionResult<DataSet>;
}

/// Loads the single CSV file contained in a zip archive.
///
/// ```no_run
/// use std::path::Path;
///
/// use zip_csv_ingest::ingestion::{ArchiveCsvLoader, DataIngestor};
///
/// # fn main() -> Result<(), zip_csv_ingest::IngestionError> {
/// let loader = ArchiveCsvLoader::new();
/// let ds = loader.ingest(Path::new("archive.zip"))?;
/// print!("{}", ds.head(5));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArchiveCsvLoader {
    options: IngestionOptions,
}

impl ArchiveCsvLoader {
    /// Loader with default options (type inference, top-level search, system temp dir).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: IngestionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &IngestionOptions {
        &self.options
    }
}

impl DataIngestor for ArchiveCsvLoader {
    fn ingest(&self, source: &Path) -> IngestionResult<DataSet> {
        ingest_from_path(source, &self.options)
    }
}
