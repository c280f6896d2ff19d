//! Handler für Selektions-Operationen.
//!
//! Selektion ist nicht Teil der Undo-History.

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::NodeId;

/// Selektiert einen Knoten (additiv oder ersetzend).
pub fn select_node(state: &mut AppState, id: NodeId, additive: bool) {
    use_cases::selection::select_node(state, id, additive);
}

/// Hebt die aktuelle Selektion auf.
pub fn clear(state: &mut AppState) {
    use_cases::selection::clear_selection(state);
}

/// Selektiert alle Knoten des Dokuments.
pub fn select_all(state: &mut AppState) {
    use_cases::selection::select_all(state);
    log::info!("Alle {} Knoten selektiert", state.selection_count());
}
