use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for ingestion operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Coarse classification of an [`IngestionError`].
///
/// Callers that only care about *which precondition failed* can match on this instead of the
/// individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input path is missing, or the archive holds no CSV file.
    NotFound,
    /// The input is not a zip archive (wrong extension, corrupt container, unsafe entry names).
    InvalidFormat,
    /// The archive holds more than one CSV file.
    AmbiguousInput,
    /// The CSV content was rejected (malformed records, missing header).
    Parse,
    /// Underlying filesystem failure.
    Io,
}

/// Error type returned by ingestion functions.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Underlying I/O error (e.g. permission denied while extracting).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The zip container could not be read.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// CSV ingestion error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The input path does not reference an existing filesystem object.
    #[error("file not found: {}", .path.display())]
    InputNotFound { path: PathBuf },

    /// The input path does not carry the `.zip` extension.
    #[error("source must be a .zip file: {}", .path.display())]
    NotAnArchive { path: PathBuf },

    /// An archive entry name would resolve outside the extraction directory.
    #[error("archive entry '{entry}' escapes the extraction directory")]
    UnsafeEntry { entry: String },

    /// The extracted archive contains no CSV file.
    #[error("no CSV file found in the zip archive: {}", .archive.display())]
    NoCsvFound { archive: PathBuf },

    /// The extracted archive contains more than one CSV file.
    #[error(
        "multiple CSV files found in the zip archive {}: {candidates:?}",
        .archive.display()
    )]
    MultipleCsvFound {
        archive: PathBuf,
        candidates: Vec<PathBuf>,
    },

    /// The selected CSV file is empty, so there is no header row to name the columns.
    #[error("csv has no header row")]
    MissingHeader,
}

impl IngestionError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Io,
            Self::Zip(zip::result::ZipError::Io(_)) => ErrorKind::Io,
            Self::Zip(_) => ErrorKind::InvalidFormat,
            Self::Csv(err) => match err.kind() {
                csv::ErrorKind::Io(_) => ErrorKind::Io,
                _ => ErrorKind::Parse,
            },
            Self::InputNotFound { .. } | Self::NoCsvFound { .. } => ErrorKind::NotFound,
            Self::NotAnArchive { .. } | Self::UnsafeEntry { .. } => ErrorKind::InvalidFormat,
            Self::MultipleCsvFound { .. } => ErrorKind::AmbiguousInput,
            Self::MissingHeader => ErrorKind::Parse,
        }
    }
}
