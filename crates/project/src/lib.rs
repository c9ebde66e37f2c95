//! Filesystem access and directory listing for the Uclad explorer and search.
//! Uclad 檔案總管與搜尋所使用的檔案系統存取與目錄列舉。

mod fs;
mod util;

pub mod scanner;

pub use fs::{DirectoryEntry, FileSystem, StdFileSystem};
pub use scanner::{list, list_sorted, sort_entries};
