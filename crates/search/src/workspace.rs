use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, warn};
use thiserror::Error;
use uclad_project::{scanner, DirectoryEntry, FileSystem};

use crate::{
    offset_to_line_column, QueryMatcher, SearchConfig, SearchError, SearchQuery, TextPosition,
};

/// Why a workspace search produced no usable result set.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WorkspaceSearchError {
    #[error("no directory is open")]
    NoDirectoryOpen,
    #[error("cannot read search root {}: {message}", .path.display())]
    RootUnreadable { path: PathBuf, message: String },
    #[error(transparent)]
    Query(#[from] SearchError),
}

/// How a workspace search ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    Completed,
    /// Stopped at a directory or file boundary; matches found so far are kept.
    Cancelled,
    Failed(WorkspaceSearchError),
}

/// First occurrence of the query inside one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchMatch {
    pub file_name: String,
    pub file_path: PathBuf,
    pub relative_path: PathBuf,
    pub file_content: String,
    /// Byte offset of the first case-insensitive occurrence.
    pub match_position: usize,
    pub match_end: usize,
    pub search_term: String,
}

impl SearchMatch {
    /// Line and column of the match within [`SearchMatch::file_content`].
    pub fn position(&self) -> TextPosition {
        offset_to_line_column(&self.file_content, self.match_position)
    }

    pub fn matched_text(&self) -> &str {
        &self.file_content[self.match_position..self.match_end]
    }

    /// The full line containing the match, without its line terminator.
    pub fn line_text(&self) -> &str {
        let content = self.file_content.as_str();
        let start = content[..self.match_position]
            .rfind('\n')
            .map_or(0, |idx| idx + 1);
        let end = content[self.match_position..]
            .find('\n')
            .map_or(content.len(), |idx| self.match_position + idx);
        content[start..end].trim_end_matches('\r')
    }
}

/// Counters collected during one walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub files_scanned: usize,
    pub oversize_skipped: usize,
    pub undecodable_skipped: usize,
    pub directories_excluded: usize,
    pub errors: usize,
}

/// Outcome of [`search`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkspaceSearch {
    pub matches: Vec<SearchMatch>,
    pub status: SearchStatus,
    pub stats: ScanStats,
}

impl WorkspaceSearch {
    fn failed(error: WorkspaceSearchError) -> Self {
        Self {
            matches: Vec::new(),
            status: SearchStatus::Failed(error),
            stats: ScanStats::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn error(&self) -> Option<&WorkspaceSearchError> {
        match &self.status {
            SearchStatus::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Shared flag that asks an in-flight search to stop.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Searches every eligible file below `root` for the first occurrence of `query`.
///
/// Traversal is depth-first pre-order with directories before files and siblings
/// ordered by name, which is also the order of the returned matches. Failures on
/// individual files or subdirectories are logged and skipped; only an unset or
/// unreadable root fails the whole search, and that is reported through
/// [`SearchStatus::Failed`] rather than returned as an error.
pub fn search(
    fs: &dyn FileSystem,
    root: Option<&Path>,
    query: &SearchQuery,
    config: &SearchConfig,
    cancel: &CancellationToken,
) -> WorkspaceSearch {
    let root = match root {
        Some(root) if !root.as_os_str().is_empty() => root,
        _ => return WorkspaceSearch::failed(WorkspaceSearchError::NoDirectoryOpen),
    };
    let matcher = match query.matcher() {
        Ok(matcher) => matcher,
        Err(err) => return WorkspaceSearch::failed(err.into()),
    };

    let entries = match scanner::list_sorted(fs, root) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("search root {} is unreadable: {err}", root.display());
            return WorkspaceSearch::failed(WorkspaceSearchError::RootUnreadable {
                path: root.to_path_buf(),
                message: err.to_string(),
            });
        }
    };

    let mut walk = Walk {
        fs,
        root,
        query,
        matcher,
        config,
        stack: Vec::new(),
        matches: Vec::new(),
        stats: ScanStats::default(),
    };
    walk.push_children(entries);
    let status = walk.run(cancel);
    debug!(
        "search for {:?} in {}: {} matches, {:?}",
        query.text(),
        root.display(),
        walk.matches.len(),
        walk.stats
    );

    WorkspaceSearch {
        matches: walk.matches,
        status,
        stats: walk.stats,
    }
}

enum Node {
    Directory(PathBuf),
    File(DirectoryEntry),
}

struct Walk<'a> {
    fs: &'a dyn FileSystem,
    root: &'a Path,
    query: &'a SearchQuery,
    matcher: QueryMatcher,
    config: &'a SearchConfig,
    stack: Vec<Node>,
    matches: Vec<SearchMatch>,
    stats: ScanStats,
}

impl Walk<'_> {
    fn run(&mut self, cancel: &CancellationToken) -> SearchStatus {
        while let Some(node) = self.stack.pop() {
            if cancel.is_cancelled() {
                debug!("search in {} cancelled", self.root.display());
                return SearchStatus::Cancelled;
            }
            match node {
                Node::Directory(path) => match scanner::list_sorted(self.fs, &path) {
                    Ok(entries) => self.push_children(entries),
                    Err(err) => {
                        warn!("skipping directory {}: {err}", path.display());
                        self.stats.errors += 1;
                    }
                },
                Node::File(entry) => {
                    if let Some(found) = self.scan_file(entry) {
                        self.matches.push(found);
                    }
                }
            }
        }
        SearchStatus::Completed
    }

    /// Pushes sorted children so that they pop in order.
    fn push_children(&mut self, entries: Vec<DirectoryEntry>) {
        for entry in entries.into_iter().rev() {
            if !entry.is_directory {
                self.stack.push(Node::File(entry));
            } else if self.config.is_excluded(&entry.name) {
                debug!("excluding directory {}", entry.path.display());
                self.stats.directories_excluded += 1;
            } else {
                self.stack.push(Node::Directory(entry.path));
            }
        }
    }

    fn scan_file(&mut self, entry: DirectoryEntry) -> Option<SearchMatch> {
        let size = match self.fs.file_size(&entry.path) {
            Ok(size) => size,
            Err(err) => {
                warn!("cannot stat {}: {err}", entry.path.display());
                self.stats.errors += 1;
                return None;
            }
        };
        if !self.config.accepts_size(size) {
            debug!("skipping {} ({size} bytes)", entry.path.display());
            self.stats.oversize_skipped += 1;
            return None;
        }

        let content = match self.fs.read_to_string(&entry.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                debug!("skipping undecodable {}", entry.path.display());
                self.stats.undecodable_skipped += 1;
                return None;
            }
            Err(err) => {
                warn!("cannot read {}: {err}", entry.path.display());
                self.stats.errors += 1;
                return None;
            }
        };
        self.stats.files_scanned += 1;

        let range = self.matcher.first_match(&content)?;
        let relative_path = entry
            .path
            .strip_prefix(self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| entry.path.clone());
        Some(SearchMatch {
            file_name: entry.name,
            file_path: entry.path,
            relative_path,
            file_content: content,
            match_position: range.start,
            match_end: range.end,
            search_term: self.query.text().to_string(),
        })
    }
}
