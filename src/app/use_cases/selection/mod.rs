//! Use-Case-Funktionen für Knoten-Selektion.
//!
//! Selektionsänderungen laufen direkt auf dem Dokument und erzeugen keine
//! Undo-Schritte.
//! - `pick`: Einzelne Knoten selektieren
//! - `helpers`: Selektion leeren, alles selektieren

mod helpers;
mod pick;

pub use helpers::{clear_selection, select_all};
pub use pick::select_node;
