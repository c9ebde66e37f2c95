//! Directory scanner.
//! 目錄掃描器。
//!
//! The scanner never recurses: callers drive recursion (the search walk) or expand one
//! level at a time (the explorer).

use std::cmp::Ordering;
use std::io;
use std::path::Path;

use log::debug;

use crate::{DirectoryEntry, FileSystem};

/// Lists the direct children of `path` in filesystem order.
/// 依檔案系統原生順序列出 `path` 的直接子項目。
pub fn list(fs: &dyn FileSystem, path: &Path) -> io::Result<Vec<DirectoryEntry>> {
    let entries = fs.list_directory(path)?;
    debug!("listed {} entries in {}", entries.len(), path.display());
    Ok(entries)
}

/// Lists the direct children of `path`, directories first, each group ordered by name
/// ignoring case.
/// 列出子項目：資料夾在前，各組依名稱排序（不分大小寫）。
pub fn list_sorted(fs: &dyn FileSystem, path: &Path) -> io::Result<Vec<DirectoryEntry>> {
    let mut entries = list(fs, path)?;
    sort_entries(&mut entries);
    Ok(entries)
}

/// Sorts entries in explorer order.
/// 以檔案總管順序排序。
pub fn sort_entries(entries: &mut [DirectoryEntry]) {
    entries.sort_by(explorer_order);
}

fn explorer_order(a: &DirectoryEntry, b: &DirectoryEntry) -> Ordering {
    b.is_directory
        .cmp(&a.is_directory)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StdFileSystem;
    use std::fs;
    use tempfile::tempdir;

    fn names(entries: &[DirectoryEntry]) -> Vec<&str> {
        entries.iter().map(|entry| entry.name.as_str()).collect()
    }

    #[test]
    fn list_sorted_puts_directories_first() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("b.txt"), "").unwrap();
        fs::write(tmp.path().join("a.txt"), "").unwrap();
        fs::create_dir(tmp.path().join("zeta")).unwrap();
        fs::create_dir(tmp.path().join("alpha")).unwrap();

        let entries = list_sorted(&StdFileSystem, tmp.path()).unwrap();
        assert_eq!(names(&entries), vec!["alpha", "zeta", "a.txt", "b.txt"]);
    }

    #[test]
    fn list_does_not_recurse() {
        let tmp = tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("outer").join("inner")).unwrap();
        fs::write(tmp.path().join("outer").join("inner").join("deep.txt"), "").unwrap();

        let entries = list(&StdFileSystem, tmp.path()).unwrap();
        assert_eq!(names(&entries), vec!["outer"]);
        assert!(entries[0].is_directory);
    }

    #[test]
    fn sort_entries_orders_by_name_within_groups() {
        let mut entries = vec![
            DirectoryEntry::new("z.md", false, "/w/z.md"),
            DirectoryEntry::new("lib", true, "/w/lib"),
            DirectoryEntry::new("A.md", false, "/w/A.md"),
            DirectoryEntry::new(".git", true, "/w/.git"),
        ];
        sort_entries(&mut entries);
        assert_eq!(names(&entries), vec![".git", "lib", "A.md", "z.md"]);
    }

    #[test]
    fn sort_entries_ignores_case_then_breaks_ties_bytewise() {
        let mut entries = vec![
            DirectoryEntry::new("Zed.txt", false, "/w/Zed.txt"),
            DirectoryEntry::new("readme.md", false, "/w/readme.md"),
            DirectoryEntry::new("alpha.txt", false, "/w/alpha.txt"),
            DirectoryEntry::new("README.md", false, "/w/README.md"),
            DirectoryEntry::new("Beta.txt", false, "/w/Beta.txt"),
            DirectoryEntry::new("docs", true, "/w/docs"),
            DirectoryEntry::new("Assets", true, "/w/Assets"),
        ];
        sort_entries(&mut entries);
        assert_eq!(
            names(&entries),
            vec!["Assets", "docs", "alpha.txt", "Beta.txt", "README.md", "readme.md", "Zed.txt"]
        );
    }
}
