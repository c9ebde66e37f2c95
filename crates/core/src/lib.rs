//! Editor session model for Uclad: open tabs, the live buffer, and navigation over
//! workspace search results.

pub mod file_type;
pub mod navigator;
pub mod session;
pub mod tabs;

pub use file_type::FileKind;
pub use navigator::{NavigatorError, ResultNavigator};
pub use session::{
    CloseOutcome, Cursor, EditorSession, SaveOutcome, SearchJump, SearchSummary, SessionError,
};
pub use tabs::{Tab, TabSet, DIRTY_MARKER};
