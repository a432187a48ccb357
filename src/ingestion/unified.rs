//! Unified ingestion entrypoint.
//!
//! Most callers should use [`ingest_from_path`] (or [`super::ArchiveCsvLoader`], which wraps it),
//! which turns a zip archive holding exactly one CSV file into an in-memory
//! [`crate::types::DataSet`].
//!
//! - Column types are inferred from the CSV values.
//! - If an [`super::observability::IngestionObserver`] is provided, success/failure/alerts are
//!   reported to it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{ErrorKind, IngestionError, IngestionResult};
use crate::types::DataSet;

use super::archive::{self, CsvSearch, ExtractionDir, ExtractionReport};
use super::csv::{self, CsvOptions};
use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};

/// Options controlling archive ingestion.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// CSV parsing options.
    pub csv: CsvOptions,
    /// Whether to look for the CSV file in subdirectories of the archive.
    pub search: CsvSearch,
    /// Directory under which the scratch extraction directory is created. `None` uses the
    /// system temp dir.
    pub scratch_root: Option<PathBuf>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("csv", &self.csv)
            .field("search", &self.search)
            .field("scratch_root", &self.scratch_root)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            csv: CsvOptions::default(),
            search: CsvSearch::default(),
            scratch_root: None,
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Ingest the single CSV file contained in the zip archive at `path`.
///
/// Steps:
///
/// 1. `path` must exist ([`IngestionError::InputNotFound`]) and carry the `.zip` extension
///    ([`IngestionError::NotAnArchive`]).
/// 2. The archive is unpacked into a fresh scratch directory, which is removed before this
///    function returns, on success and on every error path.
/// 3. CSV files are looked up according to [`IngestionOptions::search`]; exactly one must exist
///    ([`IngestionError::NoCsvFound`] / [`IngestionError::MultipleCsvFound`]).
/// 4. The CSV is parsed with a header row and column types are inferred from the values.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/column stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use zip_csv_ingest::ingestion::{ingest_from_path, IngestionOptions};
///
/// # fn main() -> Result<(), zip_csv_ingest::IngestionError> {
/// let ds = ingest_from_path("archive.zip", &IngestionOptions::default())?;
/// println!("rows={} columns={:?}", ds.row_count(), ds.column_names());
/// # Ok(())
/// # }
/// ```
///
/// Searching nested directories of a semicolon-delimited export:
///
/// ```no_run
/// use zip_csv_ingest::ingestion::{ingest_from_path, CsvOptions, CsvSearch, IngestionOptions};
///
/// # fn main() -> Result<(), zip_csv_ingest::IngestionError> {
/// let opts = IngestionOptions {
///     csv: CsvOptions {
///         delimiter: b';',
///         ..Default::default()
///     },
///     search: CsvSearch::Recursive,
///     ..Default::default()
/// };
/// let ds = ingest_from_path("export.zip", &opts)?;
/// println!("rows={}", ds.row_count());
/// # Ok(())
/// # }
/// ```
pub fn ingest_from_path(path: impl AsRef<Path>, options: &IngestionOptions) -> IngestionResult<DataSet> {
    let path = path.as_ref();
    let mut ctx = IngestionContext {
        path: path.to_path_buf(),
        member: None,
    };

    let result = ingest_archive(path, options, &mut ctx);

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok((ds, report)) => obs.on_success(
                &ctx,
                IngestionStats {
                    rows: ds.row_count(),
                    columns: ds.column_count(),
                    archive_entries: report.entries,
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result.map(|(ds, _)| ds)
}

fn ingest_archive(
    path: &Path,
    options: &IngestionOptions,
    ctx: &mut IngestionContext,
) -> IngestionResult<(DataSet, ExtractionReport)> {
    archive::validate_archive_path(path)?;

    // Dropping `scratch` on any early return below removes the directory.
    let scratch = ExtractionDir::create(options.scratch_root.as_deref())?;
    tracing::debug!(
        archive = %path.display(),
        scratch = %scratch.path().display(),
        "extracting archive"
    );

    let report = archive::extract_zip(path, scratch.path())?;
    let candidates = archive::find_csv_candidates(scratch.path(), options.search)?;
    tracing::debug!(
        entries = report.entries,
        bytes = report.bytes,
        candidates = candidates.len(),
        "archive extracted"
    );

    let csv_path = archive::select_single_csv(path, scratch.path(), candidates)?;
    ctx.member = csv_path
        .strip_prefix(scratch.path())
        .ok()
        .map(Path::to_path_buf);

    let dataset = csv::ingest_csv_from_path(&csv_path, &options.csv)?;

    scratch.close()?;
    Ok((dataset, report))
}

fn severity_for_error(e: &IngestionError) -> IngestionSeverity {
    match e {
        IngestionError::InputNotFound { .. } => IngestionSeverity::Critical,
        other if other.kind() == ErrorKind::Io => IngestionSeverity::Critical,
        _ => IngestionSeverity::Error,
    }
}
