//! Use-Case: Neues Wort in eine Zeile einfügen.

use crate::app::AppState;
use crate::command::{Command, InsertNode};
use crate::core::{BBox, NodeId};

/// Fügt ein Wort an `index` unter `parent` ein und gibt seine Id zurück.
///
/// Mit `options.select_inserted_nodes` wird das neue Wort danach einzige
/// Selektion (außerhalb der History).
pub fn insert_word(
    state: &mut AppState,
    parent: NodeId,
    index: usize,
    bbox: BBox,
    text: &str,
) -> anyhow::Result<Option<NodeId>> {
    let Some(parent_node) = state.document.node(parent) else {
        log::warn!("Wort nicht eingefügt: Parent {} existiert nicht", parent);
        return Ok(None);
    };
    if parent_node.kind.is_leaf() {
        log::warn!("Wort nicht eingefügt: {} kann keine Kinder haben", parent);
        return Ok(None);
    }
    let len = parent_node.children.len();
    if index > len {
        log::warn!(
            "Wort nicht eingefügt: Index {} außerhalb von 0..={}",
            index,
            len
        );
        return Ok(None);
    }

    let command = InsertNode::word(&mut state.document, parent, index, bbox, text);
    let id = command.root();
    state
        .history
        .execute_command(command.boxed(), &mut state.document)?;

    if state.options.select_inserted_nodes {
        state.document.clear_selection();
        state.document.select(id);
    }
    log::info!("Wort {} in {} an Position {} eingefügt", id, parent, index);
    Ok(Some(id))
}
