//! Handler für Laufzeit-Optionen.

use crate::app::AppState;
use crate::shared::EditorOptions;

/// Übernimmt neue Optionen und persistiert sie, falls ein Pfad gesetzt ist.
pub fn apply_options(state: &mut AppState, options: EditorOptions) -> anyhow::Result<()> {
    state.history.set_limit(options.history_limit);
    state.options = options;
    persist(state)
}

/// Setzt Optionen auf Standardwerte zurück und persistiert sie.
pub fn reset_options(state: &mut AppState) -> anyhow::Result<()> {
    apply_options(state, EditorOptions::default())
}

fn persist(state: &AppState) -> anyhow::Result<()> {
    match &state.options_path {
        Some(path) => state.options.save_to_file(path),
        None => {
            log::debug!("Optionen nicht gespeichert: kein Pfad gesetzt");
            Ok(())
        }
    }
}
