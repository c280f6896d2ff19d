//! Gemeinsame Hilfsfunktionen für Selektionslogik.

use crate::app::AppState;

/// Löscht die aktuelle Selektion explizit.
pub fn clear_selection(state: &mut AppState) {
    state.document.clear_selection();
}

/// Selektiert alle Knoten in Master-Listen-Reihenfolge.
pub fn select_all(state: &mut AppState) {
    let ids = state.document.node_list().to_vec();
    for id in ids {
        state.document.select(id);
    }
}
