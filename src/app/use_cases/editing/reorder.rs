//! Use-Case: Knoten innerhalb der Kinderliste seines Parents verschieben.

use crate::app::AppState;
use crate::command::{Command, Move, Target};
use crate::core::NodeId;

/// Verschiebt einen Knoten an `to_index` unter seinen Geschwistern.
///
/// Die Quellposition wird erst beim Anwenden ermittelt.
pub fn move_node_within_parent(
    state: &mut AppState,
    id: NodeId,
    to_index: usize,
) -> anyhow::Result<()> {
    let Some(parent) = state.document.parent(id) else {
        log::warn!("Verschieben nicht möglich: {} hat keinen Parent", id);
        return Ok(());
    };
    let len = state.document.children(parent).len();
    if to_index >= len {
        log::warn!(
            "Verschieben nicht möglich: Zielindex {} außerhalb von 0..{}",
            to_index,
            len
        );
        return Ok(());
    }
    if state.document.index_in_parent(id) == Some(to_index) {
        log::debug!("{} liegt bereits an Position {}", id, to_index);
        return Ok(());
    }

    let command = Move::item(Target::children_of(parent), id, to_index);
    state
        .history
        .execute_command(command.boxed(), &mut state.document)?;
    log::info!("{} nach Position {} in {} verschoben", id, to_index, parent);
    Ok(())
}
