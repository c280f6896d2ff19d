//! Use-Case: Bounding-Boxen von Knoten ändern.

use crate::app::AppState;
use crate::command::{Command, NewValue, Property, PropertyChange};
use crate::core::{BBox, NodeId};

/// Setzt die Box eines Knotens auf einen festen Wert.
///
/// Unveränderte Boxen erzeugen keinen Undo-Schritt.
pub fn set_node_bbox(state: &mut AppState, id: NodeId, bbox: BBox) -> anyhow::Result<()> {
    let Some(current) = state.document.node(id).map(|n| n.bbox) else {
        log::warn!("Box nicht gesetzt: Knoten {} existiert nicht", id);
        return Ok(());
    };
    if current == bbox {
        log::debug!("Box von {} unverändert", id);
        return Ok(());
    }

    let command = PropertyChange::with_old_value(
        Property::node_bbox(id),
        current,
        NewValue::Fixed(bbox),
    );
    state
        .history
        .execute_command(command.boxed(), &mut state.document)?;
    log::info!("Box von {}: {} → {}", id, current, bbox);
    Ok(())
}

/// Passt die Box eines Knotens an die Vereinigung seiner Kinder an.
///
/// Der Wert wird bei jeder Anwendung neu berechnet.
pub fn fit_node_to_children(state: &mut AppState, id: NodeId) -> anyhow::Result<()> {
    if !state.document.contains(id) {
        log::warn!("Box nicht angepasst: Knoten {} existiert nicht", id);
        return Ok(());
    }
    if state.document.children(id).is_empty() {
        log::debug!("{} hat keine Kinder, Box bleibt", id);
        return Ok(());
    }

    let command = PropertyChange::new(Property::node_bbox(id), NewValue::fit_to_children(id));
    state
        .history
        .execute_command(command.boxed(), &mut state.document)?;
    log::info!("Box von {} an Kinder angepasst", id);
    Ok(())
}
