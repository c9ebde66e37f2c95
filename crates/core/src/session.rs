use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;
use uclad_project::FileSystem;
use uclad_search::{
    line_column_to_offset, offset_to_line_column, search, CancellationToken, ScanStats,
    SearchConfig, SearchMatch, SearchQuery, SearchStatus, TextPosition, WorkspaceSearch,
};

use crate::{FileKind, NavigatorError, ResultNavigator, Tab, TabSet};

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("no tab is active")]
    NoActiveTab,
    #[error("no tab is open for {}", .0.display())]
    TabNotOpen(PathBuf),
    #[error(transparent)]
    Navigator(#[from] NavigatorError),
}

impl SessionError {
    fn io(path: &Path, source: io::Error) -> Self {
        SessionError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Caret location in the live buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub offset: usize,
    pub position: TextPosition,
}

impl Cursor {
    /// Places a cursor at `offset`, clamped onto `text`.
    pub fn at(text: &str, offset: usize) -> Self {
        let position = offset_to_line_column(text, offset);
        Self {
            offset: line_column_to_offset(text, position.line, position.column),
            position,
        }
    }
}

/// Where a search navigation landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchJump {
    pub path: PathBuf,
    pub cursor: Cursor,
}

/// Result of applying a workspace search to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSummary {
    pub status: SearchStatus,
    pub stats: ScanStats,
    pub total_matches: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// The buffer had no unsaved edits; nothing was written.
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The tab was removed; `activated` names the tab that took focus, if any.
    Closed { activated: Option<PathBuf> },
    /// The caller declined to discard unsaved edits.
    Kept,
}

struct JumpTarget {
    path: PathBuf,
    title: String,
    offset: usize,
}

impl From<&SearchMatch> for JumpTarget {
    fn from(found: &SearchMatch) -> Self {
        Self {
            path: found.file_path.clone(),
            title: found.file_name.clone(),
            offset: found.match_position,
        }
    }
}

/// Process-wide editor state: workspace root, open tabs, the single live buffer and
/// the last search results.
///
/// Only the active tab has an in-memory buffer. Activating another tab reloads its
/// contents from storage and discards unsaved edits of the previous one.
#[derive(Debug, Default)]
pub struct EditorSession {
    root: Option<PathBuf>,
    config: SearchConfig,
    tabs: TabSet,
    buffer: String,
    cursor: Option<Cursor>,
    navigator: ResultNavigator,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Sets the workspace root used by [`EditorSession::search`].
    pub fn open_directory(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        info!("opened directory {}", path.display());
        self.root = Some(path);
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn tabs(&self) -> &TabSet {
        &self.tabs
    }

    pub fn active_file_path(&self) -> Option<&Path> {
        self.tabs.active_path()
    }

    pub fn active_file_type(&self) -> Option<FileKind> {
        self.active_file_path().map(FileKind::from_path)
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn is_dirty(&self) -> bool {
        self.tabs.active().map_or(false, Tab::is_dirty)
    }

    pub fn cursor(&self) -> Option<Cursor> {
        self.cursor
    }

    pub fn navigator(&self) -> &ResultNavigator {
        &self.navigator
    }

    /// Searches the open directory and replaces the current result set.
    pub fn search(
        &mut self,
        fs: &dyn FileSystem,
        query: &SearchQuery,
        cancel: &CancellationToken,
    ) -> SearchSummary {
        let outcome = search(fs, self.root.as_deref(), query, &self.config, cancel);
        self.apply_search(outcome)
    }

    /// Installs results produced elsewhere, e.g. by a search run on another thread.
    pub fn apply_search(&mut self, outcome: WorkspaceSearch) -> SearchSummary {
        let WorkspaceSearch {
            matches,
            status,
            stats,
        } = outcome;
        let total_matches = matches.len();
        self.navigator.set_results(matches);
        SearchSummary {
            status,
            stats,
            total_matches,
        }
    }

    /// Jumps to the next search result; `Ok(None)` when there are no results.
    ///
    /// The focused result only moves once its file has been opened.
    pub fn next_result(
        &mut self,
        fs: &dyn FileSystem,
    ) -> Result<Option<SearchJump>, SessionError> {
        match self.navigator.peek_next() {
            Some(index) => self.jump_to_result(fs, index).map(Some),
            None => Ok(None),
        }
    }

    /// Jumps to the previous search result; `Ok(None)` when there are no results.
    pub fn previous_result(
        &mut self,
        fs: &dyn FileSystem,
    ) -> Result<Option<SearchJump>, SessionError> {
        match self.navigator.peek_previous() {
            Some(index) => self.jump_to_result(fs, index).map(Some),
            None => Ok(None),
        }
    }

    /// Jumps to the result at `index`.
    pub fn select_result(
        &mut self,
        fs: &dyn FileSystem,
        index: usize,
    ) -> Result<SearchJump, SessionError> {
        self.jump_to_result(fs, index)
    }

    fn jump_to_result(
        &mut self,
        fs: &dyn FileSystem,
        index: usize,
    ) -> Result<SearchJump, SessionError> {
        let target = JumpTarget::from(self.navigator.result(index)?);
        let jump = self.jump_to(fs, target)?;
        self.navigator.select(index)?;
        Ok(jump)
    }

    fn jump_to(
        &mut self,
        fs: &dyn FileSystem,
        target: JumpTarget,
    ) -> Result<SearchJump, SessionError> {
        self.open_or_activate(fs, &target.path, Some(target.title.as_str()))?;
        let cursor = Cursor::at(&self.buffer, target.offset);
        self.cursor = Some(cursor);
        Ok(SearchJump {
            path: target.path,
            cursor,
        })
    }

    /// Opens `path` in a new tab or focuses its existing one.
    ///
    /// Focusing the already-active tab changes nothing. Otherwise the file is read
    /// first, so a failed read leaves the session untouched.
    pub fn open_or_activate(
        &mut self,
        fs: &dyn FileSystem,
        path: impl AsRef<Path>,
        title: Option<&str>,
    ) -> Result<(), SessionError> {
        let path = path.as_ref();
        if self.tabs.active_path() == Some(path) {
            return Ok(());
        }
        let contents = fs
            .read_to_string(path)
            .map_err(|err| SessionError::io(path, err))?;

        self.discard_active_edits();
        if !self.tabs.contains(path) {
            let title = title.map_or_else(|| default_title(path), str::to_owned);
            self.tabs.insert(path.to_path_buf(), title);
        }
        self.tabs.activate(path);
        self.buffer = contents;
        self.cursor = Some(Cursor::default());
        Ok(())
    }

    /// Flags the active tab as having unsaved edits. Returns whether a tab is active.
    pub fn mark_dirty(&mut self) -> bool {
        match self.tabs.active_path().map(Path::to_path_buf) {
            Some(path) => {
                self.tabs.set_dirty(&path, true);
                true
            }
            None => false,
        }
    }

    /// Replaces the live buffer as the user types and marks it dirty.
    pub fn set_buffer_text(&mut self, text: impl Into<String>) -> bool {
        if self.tabs.active().is_none() {
            return false;
        }
        self.buffer = text.into();
        if let Some(cursor) = self.cursor {
            self.cursor = Some(Cursor::at(&self.buffer, cursor.offset));
        }
        self.mark_dirty()
    }

    /// Moves the caret, clamping onto the buffer. `None` when no tab is active.
    pub fn move_cursor(&mut self, offset: usize) -> Option<Cursor> {
        self.tabs.active()?;
        let cursor = Cursor::at(&self.buffer, offset);
        self.cursor = Some(cursor);
        Some(cursor)
    }

    /// Writes the live buffer to the active file. On failure the tab stays dirty.
    pub fn save(&mut self, fs: &dyn FileSystem) -> Result<SaveOutcome, SessionError> {
        let tab = self.tabs.active().ok_or(SessionError::NoActiveTab)?;
        if !tab.is_dirty() {
            return Ok(SaveOutcome::Unchanged);
        }
        let path = tab.path().to_path_buf();
        fs.write(&path, &self.buffer)
            .map_err(|err| SessionError::io(&path, err))?;
        self.tabs.set_dirty(&path, false);
        info!("saved {}", path.display());
        Ok(SaveOutcome::Saved)
    }

    /// Closes the tab for `path`.
    ///
    /// A dirty tab is only closed when `confirm` agrees to discard its edits. Closing
    /// the active tab clears the buffer and focuses the most recently activated
    /// remaining tab; tabs whose contents can no longer be read are dropped.
    pub fn close_tab<F>(
        &mut self,
        fs: &dyn FileSystem,
        path: impl AsRef<Path>,
        confirm: F,
    ) -> Result<CloseOutcome, SessionError>
    where
        F: FnOnce(&Tab) -> bool,
    {
        let path = path.as_ref();
        let tab = self
            .tabs
            .get(path)
            .ok_or_else(|| SessionError::TabNotOpen(path.to_path_buf()))?;
        if tab.is_dirty() && !confirm(tab) {
            return Ok(CloseOutcome::Kept);
        }

        let was_active = self.tabs.active_path() == Some(path);
        self.tabs.remove(path);
        if !was_active {
            return Ok(CloseOutcome::Closed { activated: None });
        }

        self.buffer.clear();
        self.cursor = None;
        while let Some(next) = self.tabs.most_recent().map(|tab| tab.path().to_path_buf()) {
            match fs.read_to_string(&next) {
                Ok(contents) => {
                    self.tabs.activate(&next);
                    self.buffer = contents;
                    self.cursor = Some(Cursor::default());
                    return Ok(CloseOutcome::Closed {
                        activated: Some(next),
                    });
                }
                Err(err) => {
                    warn!("dropping tab {}: {err}", next.display());
                    self.tabs.remove(&next);
                }
            }
        }
        Ok(CloseOutcome::Closed { activated: None })
    }

    /// Creates an empty file in `directory` and opens it.
    pub fn create_file(
        &mut self,
        fs: &dyn FileSystem,
        directory: impl AsRef<Path>,
        name: &str,
    ) -> Result<PathBuf, SessionError> {
        let path = directory.as_ref().join(name);
        fs.create_new(&path)
            .map_err(|err| SessionError::io(&path, err))?;
        info!("created {}", path.display());
        self.open_or_activate(fs, &path, Some(name))?;
        Ok(path)
    }

    fn discard_active_edits(&mut self) {
        let Some(tab) = self.tabs.active() else {
            return;
        };
        if tab.is_dirty() {
            let path = tab.path().to_path_buf();
            warn!("discarding unsaved edits to {}", path.display());
            self.tabs.set_dirty(&path, false);
        }
    }
}

fn default_title(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
