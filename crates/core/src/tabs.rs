use std::path::{Path, PathBuf};

/// 標示未儲存分頁的標題後綴。 / Suffix appended to the title of a tab with unsaved edits.
pub const DIRTY_MARKER: &str = " *";

/// 單一開啟中的檔案分頁。 / One open file tab, keyed by its path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    path: PathBuf,
    title: String,
    dirty: bool,
    last_activated: u64,
}

impl Tab {
    /// 分頁對應的檔案路徑。 / Path of the file shown in this tab.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 不含未儲存標記的標題。 / Title without the dirty marker.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// 顯示用標題，未儲存時附加 ` *`。 / Title as shown on the tab strip.
    pub fn display_title(&self) -> String {
        if self.dirty {
            format!("{}{}", self.title, DIRTY_MARKER)
        } else {
            self.title.clone()
        }
    }
}

/// 開啟中分頁的集合，每個路徑至多一個。 / Open tabs in opening order, at most one per path.
///
/// Mutation is crate-private: the editor session is the only writer.
#[derive(Debug, Clone, Default)]
pub struct TabSet {
    tabs: Vec<Tab>,
    active: Option<PathBuf>,
    clock: u64,
}

impl TabSet {
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.get(path).is_some()
    }

    pub fn get(&self, path: &Path) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.path == path)
    }

    /// 依開啟順序列出分頁。 / Tabs in the order they were opened.
    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }

    pub fn active(&self) -> Option<&Tab> {
        self.active.as_deref().and_then(|path| self.get(path))
    }

    pub fn active_path(&self) -> Option<&Path> {
        self.active.as_deref()
    }

    /// 最近啟用的分頁。 / The tab activated most recently.
    pub fn most_recent(&self) -> Option<&Tab> {
        self.tabs.iter().max_by_key(|tab| tab.last_activated)
    }

    /// Adds a clean tab; returns `false` when the path already has one.
    pub(crate) fn insert(&mut self, path: PathBuf, title: String) -> bool {
        if self.contains(&path) {
            return false;
        }
        self.tabs.push(Tab {
            path,
            title,
            dirty: false,
            last_activated: 0,
        });
        true
    }

    pub(crate) fn activate(&mut self, path: &Path) -> bool {
        self.clock += 1;
        let clock = self.clock;
        match self.tabs.iter_mut().find(|tab| tab.path == path) {
            Some(tab) => {
                tab.last_activated = clock;
                self.active = Some(tab.path.clone());
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_dirty(&mut self, path: &Path, dirty: bool) {
        if let Some(tab) = self.tabs.iter_mut().find(|tab| tab.path == path) {
            tab.dirty = dirty;
        }
    }

    pub(crate) fn remove(&mut self, path: &Path) -> Option<Tab> {
        let idx = self.tabs.iter().position(|tab| tab.path == path)?;
        if self.active.as_deref() == Some(path) {
            self.active = None;
        }
        Some(self.tabs.remove(idx))
    }
}
