mod bookmark;
mod record;
mod trace;

pub use bookmark::{BookmarkForest, BookmarkNode, FolderNode, LeafNode, RootEntry, UNTITLED};
pub use record::{BookmarkRecord, SOURCE_CHROME, SOURCE_CHROME_TAB};
pub use trace::{DiagnosticEntry, DiagnosticStatus};
