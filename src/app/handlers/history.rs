//! Handler für Undo/Redo-Operationen.

use crate::app::AppState;

/// Führt einen Undo-Schritt aus, falls vorhanden.
pub fn undo(state: &mut AppState) -> anyhow::Result<()> {
    let label = state.history.undo_description().map(str::to_owned);
    if state.history.undo(&mut state.document)? {
        log::info!("Undo ausgeführt: {}", label.unwrap_or_default());
    } else {
        log::debug!("Undo: nichts zu tun");
    }
    Ok(())
}

/// Führt einen Redo-Schritt aus, falls vorhanden.
pub fn redo(state: &mut AppState) -> anyhow::Result<()> {
    let label = state.history.redo_description().map(str::to_owned);
    if state.history.redo(&mut state.document)? {
        log::info!("Redo ausgeführt: {}", label.unwrap_or_default());
    } else {
        log::debug!("Redo: nichts zu tun");
    }
    Ok(())
}

/// Verwirft alle Undo/Redo-Schritte.
pub fn clear(state: &mut AppState) {
    let count = state.history.len();
    state.history.clear();
    log::info!("History geleert ({} Schritte verworfen)", count);
}
