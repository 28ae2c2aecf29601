//! Vista Overlay - file picker and error dialog for viewer demos
//!
//! - `DirectoryBrowser`: directory navigation with a selected-file result
//! - `AlertDialog`: modal one-line message with an OK button
//! - `FileSystem`: the directory-listing contract (`StdFileSystem`, `MemoryFileSystem`)
//! - `OverlayConfig`: layered TOML configuration for panel sizes and style

pub mod browser;
pub mod config;
pub mod dialog;
pub mod fs;
pub mod path;

pub use browser::{DirectoryBrowser, Entry, EntryKind, PARENT_ENTRY};
pub use config::{BrowserConfig, DialogConfig, OverlayConfig, StyleConfig};
pub use dialog::AlertDialog;
pub use fs::{DirEntry, FileSystem, MemoryFileSystem, StdFileSystem};
