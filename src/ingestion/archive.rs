//! Zip archive handling: input validation, scoped extraction and CSV discovery.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use walkdir::WalkDir;

use crate::error::{IngestionError, IngestionResult};

/// Suffix an input file name must end with (compared case-insensitively).
pub const ARCHIVE_SUFFIX: &str = ".zip";
/// Suffix identifying the CSV member of an archive (compared case-insensitively).
pub const CSV_SUFFIX: &str = ".csv";

const SCRATCH_PREFIX: &str = "zip-csv-ingest-";

/// Where to look for CSV files inside the extracted archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CsvSearch {
    /// Only entries at the archive root (default).
    #[default]
    TopLevel,
    /// The archive root and every subdirectory.
    Recursive,
}

/// Summary of an extraction pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtractionReport {
    /// Number of entries in the archive (files and directories).
    pub entries: usize,
    /// Number of regular files written.
    pub files: usize,
    /// Total uncompressed bytes written.
    pub bytes: u64,
}

/// Check that `path` exists and names a zip archive.
///
/// Existence is checked first, so a missing `data.txt` reports
/// [`IngestionError::InputNotFound`].
pub fn validate_archive_path(path: &Path) -> IngestionResult<()> {
    if !path.exists() {
        return Err(IngestionError::InputNotFound {
            path: path.to_path_buf(),
        });
    }
    if !has_suffix(path, ARCHIVE_SUFFIX) {
        return Err(IngestionError::NotAnArchive {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Suffix match on the whole file name, so a file called just `.zip` or `.csv` still counts.
fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_ascii_lowercase())
        .is_some_and(|name| name.ends_with(suffix))
}

/// A freshly created scratch directory that is deleted with everything in it when dropped.
///
/// Every ingest call gets its own directory; nothing is shared or reused between calls.
#[derive(Debug)]
pub struct ExtractionDir {
    dir: TempDir,
}

impl ExtractionDir {
    /// Create a new scratch directory under `root`, or under the system temp dir if `None`.
    pub fn create(root: Option<&Path>) -> IngestionResult<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(SCRATCH_PREFIX);
        let dir = match root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the directory now, surfacing any removal error. Dropping the guard removes it too,
    /// but silently.
    pub fn close(self) -> IngestionResult<()> {
        self.dir.close()?;
        Ok(())
    }
}

/// Unpack every entry of the zip archive at `archive` into `dest`.
///
/// Entries whose names are absolute or climb out of `dest` (`../x.csv`) are rejected with
/// [`IngestionError::UnsafeEntry`] before anything is written for them.
pub fn extract_zip(archive: &Path, dest: &Path) -> IngestionResult<ExtractionReport> {
    let reader = BufReader::new(File::open(archive)?);
    let mut zip = zip::ZipArchive::new(reader)?;
    let mut report = ExtractionReport {
        entries: zip.len(),
        ..Default::default()
    };

    for idx in 0..zip.len() {
        let mut entry = zip.by_index(idx)?;
        let out_path = match entry.enclosed_name() {
            Some(relative) => dest.join(relative),
            None => {
                return Err(IngestionError::UnsafeEntry {
                    entry: entry.name().to_owned(),
                });
            }
        };

        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&out_path)?;
        let written = io::copy(&mut entry, &mut out)?;
        tracing::trace!(entry = entry.name(), bytes = written, "extracted zip entry");

        report.files += 1;
        report.bytes += written;
    }

    Ok(report)
}

/// List extracted regular files whose names end in `.csv`, sorted by path.
pub fn find_csv_candidates(dir: &Path, search: CsvSearch) -> IngestionResult<Vec<PathBuf>> {
    let mut found = Vec::new();
    match search {
        CsvSearch::TopLevel => {
            for entry in fs::read_dir(dir)? {
                let entry = entry?;
                let path = entry.path();
                if entry.file_type()?.is_file() && has_suffix(&path, CSV_SUFFIX) {
                    found.push(path);
                }
            }
        }
        CsvSearch::Recursive => {
            for entry in WalkDir::new(dir).min_depth(1) {
                let entry = entry.map_err(io::Error::from)?;
                if entry.file_type().is_file() && has_suffix(entry.path(), CSV_SUFFIX) {
                    found.push(entry.into_path());
                }
            }
        }
    }
    found.sort();
    Ok(found)
}

/// Enforce the exactly-one-CSV rule on the candidates found in `dir`.
///
/// Zero candidates is [`IngestionError::NoCsvFound`]; more than one is
/// [`IngestionError::MultipleCsvFound`] (candidates reported relative to `dir`). The archive path is
/// only used for the error message.
pub fn select_single_csv(
    archive: &Path,
    dir: &Path,
    mut candidates: Vec<PathBuf>,
) -> IngestionResult<PathBuf> {
    match candidates.len() {
        0 => Err(IngestionError::NoCsvFound {
            archive: archive.to_path_buf(),
        }),
        1 => Ok(candidates.remove(0)),
        _ => Err(IngestionError::MultipleCsvFound {
            archive: archive.to_path_buf(),
            candidates: candidates
                .iter()
                .map(|p| p.strip_prefix(dir).unwrap_or(p).to_path_buf())
                .collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use zip::write::SimpleFileOptions;

    use super::*;
    use crate::error::ErrorKind;

    fn write_zip(path: &Path, entries: &[(&str, &str)]) {
        let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
        for (name, body) in entries {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn validate_rejects_missing_path_before_extension() {
        let tmp = tempfile::tempdir().unwrap();
        let err = validate_archive_path(&tmp.path().join("missing.txt")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn validate_rejects_existing_non_zip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("data.csv");
        fs::write(&path, "a,b\n1,2\n").unwrap();
        let err = validate_archive_path(&path).unwrap_err();
        assert!(matches!(err, IngestionError::NotAnArchive { .. }));
    }

    #[test]
    fn validate_accepts_uppercase_extension() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("DATA.ZIP");
        write_zip(&path, &[("a.csv", "a\n1\n")]);
        validate_archive_path(&path).unwrap();
    }

    #[test]
    fn bare_suffix_names_are_accepted() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(".zip");
        write_zip(&path, &[(".csv", "a\n1\n")]);
        validate_archive_path(&path).unwrap();

        let dest = tmp.path().join("out");
        fs::create_dir(&dest).unwrap();
        extract_zip(&path, &dest).unwrap();
        let found = find_csv_candidates(&dest, CsvSearch::TopLevel).unwrap();
        assert_eq!(found, vec![dest.join(".csv")]);
    }

    #[test]
    fn extraction_dir_is_removed_on_drop() {
        let root = tempfile::tempdir().unwrap();
        let scratch = ExtractionDir::create(Some(root.path())).unwrap();
        let path = scratch.path().to_path_buf();
        fs::write(path.join("x.csv"), "a\n").unwrap();
        assert!(path.exists());
        drop(scratch);
        assert!(!path.exists());
    }

    #[test]
    fn extract_writes_nested_entries_and_reports() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("in.zip");
        write_zip(&archive, &[("top.csv", "a\n1\n"), ("nested/inner.csv", "b\n2\n")]);

        let dest = tmp.path().join("out");
        fs::create_dir(&dest).unwrap();
        let report = extract_zip(&archive, &dest).unwrap();
        assert_eq!(report.files, 2);
        assert_eq!(report.bytes, 8);
        assert!(dest.join("nested/inner.csv").is_file());

        let top = find_csv_candidates(&dest, CsvSearch::TopLevel).unwrap();
        assert_eq!(top, vec![dest.join("top.csv")]);
        let all = find_csv_candidates(&dest, CsvSearch::Recursive).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn extract_rejects_entries_escaping_destination() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("evil.zip");
        write_zip(&archive, &[("../evil.csv", "a\n1\n")]);

        let dest = tmp.path().join("out");
        fs::create_dir(&dest).unwrap();
        let err = extract_zip(&archive, &dest).unwrap_err();
        assert!(matches!(err, IngestionError::UnsafeEntry { .. }));
        assert!(!tmp.path().join("evil.csv").exists());
    }

    #[test]
    fn extract_rejects_non_zip_content() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("fake.zip");
        fs::write(&archive, "definitely not a zip archive\n".repeat(8)).unwrap();
        let err = extract_zip(&archive, tmp.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn select_enforces_exactly_one() {
        let dir = Path::new("/scratch");
        let archive = Path::new("in.zip");

        let err = select_single_csv(archive, dir, Vec::new()).unwrap_err();
        assert!(matches!(err, IngestionError::NoCsvFound { .. }));

        let one = select_single_csv(archive, dir, vec![dir.join("a.csv")]).unwrap();
        assert_eq!(one, dir.join("a.csv"));

        let err = select_single_csv(archive, dir, vec![dir.join("a.csv"), dir.join("b.csv")])
            .unwrap_err();
        match err {
            IngestionError::MultipleCsvFound { candidates, .. } => {
                assert_eq!(candidates, vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
