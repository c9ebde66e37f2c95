use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::util::write_atomic;

/// One direct child of a listed directory.
/// 目錄列舉所得的單一子項目。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub is_directory: bool,
    pub path: PathBuf,
}

impl DirectoryEntry {
    pub fn new(name: impl Into<String>, is_directory: bool, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            is_directory,
            path: path.into(),
        }
    }
}

/// Filesystem primitives consumed by the scanner, the search walk and the editor session.
/// 掃描器、搜尋與編輯工作階段所依賴的檔案系統操作。
///
/// Every call may fail with an [`io::Error`]; callers decide whether the failure is
/// contained (search) or surfaced (open/save).
pub trait FileSystem: Send + Sync {
    /// Lists the direct children of `path` in native order.
    fn list_directory(&self, path: &Path) -> io::Result<Vec<DirectoryEntry>>;

    /// Reads a file as UTF-8. Undecodable content fails with [`io::ErrorKind::InvalidData`].
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Replaces the file contents verbatim.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Size of the file in bytes.
    fn file_size(&self, path: &Path) -> io::Result<u64>;

    /// Creates an empty file, failing with [`io::ErrorKind::AlreadyExists`] if it is present.
    fn create_new(&self, path: &Path) -> io::Result<()>;
}

/// [`FileSystem`] backed by `std::fs`.
/// 以 `std::fs` 實作的檔案系統。
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn list_directory(&self, path: &Path) -> io::Result<Vec<DirectoryEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            // Symlinks report as non-directories so the walk never follows a cycle.
            let is_directory = entry.file_type()?.is_dir();
            entries.push(DirectoryEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_directory,
                path: entry.path(),
            });
        }
        Ok(entries)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        write_atomic(path, contents.as_bytes())
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        Ok(fs::metadata(path)?.len())
    }

    fn create_new(&self, path: &Path) -> io::Result<()> {
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map(|_| ())
    }
}
