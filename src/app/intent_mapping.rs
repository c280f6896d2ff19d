//! Mapping von UI-Intents auf mutierende App-Commands.

use super::{AppCommand, AppIntent, AppState};

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    match intent {
        AppIntent::DeleteSelectedRequested => vec![AppCommand::DeleteSelectedNodes],
        AppIntent::SetNodeBBoxRequested { id, bbox } => {
            vec![AppCommand::SetNodeBBox { id, bbox }]
        }
        AppIntent::FitNodeToChildrenRequested { id } => {
            vec![AppCommand::FitNodeToChildren { id }]
        }
        AppIntent::SetWordTextRequested { id, text } => {
            vec![AppCommand::SetWordText { id, text }]
        }
        AppIntent::MoveNodeRequested { id, to_index } => {
            vec![AppCommand::MoveNodeWithinParent { id, to_index }]
        }
        AppIntent::InsertWordRequested {
            parent,
            index,
            bbox,
            text,
        } => {
            // Ohne Index wird hinter dem letzten Kind eingefügt
            let index = index.unwrap_or_else(|| state.document.children(parent).len());
            vec![AppCommand::InsertWord {
                parent,
                index,
                bbox,
                text,
            }]
        }
        AppIntent::NodePickRequested { id, additive } => {
            vec![AppCommand::SelectNode { id, additive }]
        }
        AppIntent::ClearSelectionRequested => vec![AppCommand::ClearSelection],
        AppIntent::SelectAllRequested => vec![AppCommand::SelectAllNodes],
        AppIntent::UndoRequested => vec![AppCommand::Undo],
        AppIntent::RedoRequested => vec![AppCommand::Redo],
        AppIntent::ClearHistoryRequested => vec![AppCommand::ClearHistory],
        AppIntent::OptionsChanged { options } => vec![AppCommand::ApplyOptions { options }],
        AppIntent::ResetOptionsRequested => vec![AppCommand::ResetOptions],
    }
}
