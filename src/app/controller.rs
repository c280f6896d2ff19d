//! Application Controller für zentrale Event-Verarbeitung.

use super::{AppCommand, AppIntent, AppState};

/// Orchestriert UI-Events und Use-Cases auf den AppState.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Editing ===
            AppCommand::DeleteSelectedNodes => handlers::editing::delete_selected(state)?,
            AppCommand::SetNodeBBox { id, bbox } => handlers::editing::set_bbox(state, id, bbox)?,
            AppCommand::FitNodeToChildren { id } => handlers::editing::fit_to_children(state, id)?,
            AppCommand::SetWordText { id, text } => {
                handlers::editing::set_word_text(state, id, text)?
            }
            AppCommand::MoveNodeWithinParent { id, to_index } => {
                handlers::editing::move_within_parent(state, id, to_index)?
            }
            AppCommand::InsertWord {
                parent,
                index,
                bbox,
                text,
            } => handlers::editing::insert_word(state, parent, index, bbox, &text)?,

            // === Selektion ===
            AppCommand::SelectNode { id, additive } => {
                handlers::selection::select_node(state, id, additive)
            }
            AppCommand::ClearSelection => handlers::selection::clear(state),
            AppCommand::SelectAllNodes => handlers::selection::select_all(state),

            // === History ===
            AppCommand::Undo => handlers::history::undo(state)?,
            AppCommand::Redo => handlers::history::redo(state)?,
            AppCommand::ClearHistory => handlers::history::clear(state),

            // === Optionen ===
            AppCommand::ApplyOptions { options } => {
                handlers::options::apply_options(state, options)?
            }
            AppCommand::ResetOptions => handlers::options::reset_options(state)?,
        }

        Ok(())
    }
}
