#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// Write a zip archive at `path` holding the given `(name, contents)` entries.
pub fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
    for (name, body) in entries {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

/// A temp dir holding `name` as a zip of `entries`, plus an empty `scratch/` directory to pass as
/// the extraction root so tests can check it is left empty.
pub struct Fixture {
    pub dir: TempDir,
    pub archive: PathBuf,
    pub scratch: PathBuf,
}

impl Fixture {
    pub fn new(name: &str, entries: &[(&str, &str)]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join(name);
        write_zip(&archive, entries);
        let scratch = dir.path().join("scratch");
        fs::create_dir(&scratch).unwrap();
        Self {
            dir,
            archive,
            scratch,
        }
    }

    pub fn scratch_is_empty(&self) -> bool {
        fs::read_dir(&self.scratch).unwrap().next().is_none()
    }
}
