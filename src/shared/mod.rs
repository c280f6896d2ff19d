//! Geteilte Typen für layer-übergreifende Verträge.

pub mod options;

pub use options::EditorOptions;
pub use options::{HISTORY_LIMIT, OPTIONS_FILE_NAME};
