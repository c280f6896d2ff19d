//! Use-Case-Funktionen für das Bearbeiten des hOCR-Baums.
//!
//! Aufgeteilt nach Operation:
//! - `delete_nodes`: Selektierte Knoten samt Nachfahren löschen
//! - `node_geometry`: Bounding-Boxen setzen und anpassen
//! - `word_text`: Worttext ändern
//! - `reorder`: Knoten innerhalb ihres Parents verschieben
//! - `insert_word`: Neues Wort einfügen
//!
//! Jede Mutation läuft als `Command` über die History des AppState.

mod delete_nodes;
mod insert_word;
mod node_geometry;
mod reorder;
mod word_text;

pub use delete_nodes::delete_selected_nodes;
pub use insert_word::insert_word;
pub use node_geometry::{fit_node_to_children, set_node_bbox};
pub use reorder::move_node_within_parent;
pub use word_text::set_word_text;
