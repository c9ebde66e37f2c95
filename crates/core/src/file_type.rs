use std::fmt;
use std::path::Path;

/// 狀態列顯示的檔案類型。 / Language label shown in the status bar for the active file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    JavaScript,
    Json,
    Css,
    Html,
    Markdown,
    PlainText,
    Unknown,
}

impl FileKind {
    /// 依副檔名（不分大小寫）判斷類型。 / Classifies by extension, ignoring case.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase());
        match extension.as_deref() {
            Some("js") => FileKind::JavaScript,
            Some("json") => FileKind::Json,
            Some("css") => FileKind::Css,
            Some("html") => FileKind::Html,
            Some("md") => FileKind::Markdown,
            Some("txt") => FileKind::PlainText,
            _ => FileKind::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FileKind::JavaScript => "JavaScript",
            FileKind::Json => "JSON",
            FileKind::Css => "CSS",
            FileKind::Html => "HTML",
            FileKind::Markdown => "Markdown",
            FileKind::PlainText => "Plain Text",
            FileKind::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
