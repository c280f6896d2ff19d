//! Use-Case: Text eines Wortes ändern.

use crate::app::AppState;
use crate::command::{Command, NewValue, Property, PropertyChange};
use crate::core::{NodeId, NodeKind};

/// Setzt den Text eines Wortes.
pub fn set_word_text(state: &mut AppState, id: NodeId, text: String) -> anyhow::Result<()> {
    let Some(node) = state.document.node(id) else {
        log::warn!("Text nicht gesetzt: Knoten {} existiert nicht", id);
        return Ok(());
    };
    if node.kind != NodeKind::Word {
        log::warn!("Text nicht gesetzt: {} ist kein Wort ({:?})", id, node.kind);
        return Ok(());
    }
    if node.text == text {
        log::debug!("Text von {} unverändert", id);
        return Ok(());
    }

    let command = PropertyChange::capture(
        Property::node_text(id),
        NewValue::Fixed(text),
        &state.document,
    )?;
    state
        .history
        .execute_command(command.boxed(), &mut state.document)?;
    log::info!("Text von {} geändert", id);
    Ok(())
}
