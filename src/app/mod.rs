//! Application-Layer: Controller, State, Events, Use-Cases und History.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod handlers;
pub mod history;
mod intent_mapping;
/// Application State
///
/// Dieses Modul verwaltet den Zustand der Anwendung (Dokument, History, Optionen).
pub mod state;
pub mod use_cases;

pub use command_log::CommandLog;
pub use controller::AppController;
pub use events::{AppCommand, AppIntent};
pub use history::{CommandBatch, EditError, HistoryEvent, ListenerId, UndoRedoManager};
pub use state::AppState;
