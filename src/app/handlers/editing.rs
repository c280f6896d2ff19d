//! Handler für strukturelle und Eigenschafts-Änderungen am Dokument.

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::{BBox, NodeId};

/// Löscht alle aktuell selektierten Knoten.
pub fn delete_selected(state: &mut AppState) -> anyhow::Result<()> {
    use_cases::editing::delete_selected_nodes(state)
}

/// Setzt die Bounding-Box eines Knotens.
pub fn set_bbox(state: &mut AppState, id: NodeId, bbox: BBox) -> anyhow::Result<()> {
    use_cases::editing::set_node_bbox(state, id, bbox)
}

/// Passt die Box eines Knotens an seine Kinder an.
pub fn fit_to_children(state: &mut AppState, id: NodeId) -> anyhow::Result<()> {
    use_cases::editing::fit_node_to_children(state, id)
}

/// Ändert den Text eines Wortes.
pub fn set_word_text(state: &mut AppState, id: NodeId, text: String) -> anyhow::Result<()> {
    use_cases::editing::set_word_text(state, id, text)
}

/// Verschiebt einen Knoten unter seinen Geschwistern.
pub fn move_within_parent(state: &mut AppState, id: NodeId, to_index: usize) -> anyhow::Result<()> {
    use_cases::editing::move_node_within_parent(state, id, to_index)
}

/// Fügt ein neues Wort ein.
pub fn insert_word(
    state: &mut AppState,
    parent: NodeId,
    index: usize,
    bbox: BBox,
    text: &str,
) -> anyhow::Result<()> {
    use_cases::editing::insert_word(state, parent, index, bbox, text)?;
    Ok(())
}
