//! Use-Case: Selektierte Knoten löschen (inkl. aller Nachfahren).

use crate::app::AppState;
use crate::command::{Command, NewValue, Property, PropertyChange, RemoveNodes};
use crate::core::NodeId;
use anyhow::Context;
use indexmap::IndexSet;
use std::collections::HashSet;

/// Löscht alle selektierten Knoten samt Nachfahren als einen Undo-Schritt.
///
/// Wenn `options.fit_parent_bbox_on_delete` aktiv ist, wird die Box jedes
/// verbleibenden Parents im selben Schritt an seine restlichen Kinder
/// angepasst.
pub fn delete_selected_nodes(state: &mut AppState) -> anyhow::Result<()> {
    let targets = state.document.selected_ids();
    if targets.is_empty() {
        log::debug!("Nichts zum Löschen selektiert");
        return Ok(());
    }

    let mut removed: HashSet<NodeId> = targets.iter().copied().collect();
    removed.extend(state.document.descendant_closure(&targets));

    // Parents, die das Löschen überleben; tiefste zuerst, damit äußere
    // Boxen bereits angepasste Kinder sehen
    let mut surviving_parents: Vec<NodeId> = targets
        .iter()
        .filter_map(|id| state.document.parent(*id))
        .filter(|parent| !removed.contains(parent))
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect();
    surviving_parents.sort_by_key(|p| std::cmp::Reverse(state.document.depth(*p)));

    let count = targets.len();
    let mut commands = vec![RemoveNodes::new(targets).boxed()];
    if state.options.fit_parent_bbox_on_delete {
        commands.extend(surviving_parents.iter().map(|&parent| {
            PropertyChange::new(
                Property::node_bbox(parent),
                NewValue::fit_to_children(parent),
            )
            .boxed()
        }));
    }

    state
        .history
        .begin_batch_with_label(format!("{} Knoten löschen", count));
    state
        .history
        .execute_commands(commands, &mut state.document)?;
    state
        .history
        .execute_batch(&mut state.document)
        .context("Löschen nur teilweise ausgeführt")?;

    log::info!("{} Knoten gelöscht ({} inkl. Nachfahren)", count, removed.len());
    Ok(())
}
