//! Use-Case: Einzelnen Knoten selektieren.

use crate::app::AppState;
use crate::core::NodeId;

/// Selektiert einen Knoten.
///
/// Ohne `additive` ersetzt er die bisherige Selektion; additiv wird ein
/// bereits selektierter Knoten wieder abgewählt.
pub fn select_node(state: &mut AppState, id: NodeId, additive: bool) {
    if !state.document.contains(id) {
        log::warn!("Selektion: Knoten {} existiert nicht", id);
        return;
    }
    if !additive {
        state.document.clear_selection();
        state.document.select(id);
        return;
    }
    if !state.document.deselect(id) {
        state.document.select(id);
    }
}
