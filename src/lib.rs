//! hOCR-Editor Library: umkehrbare Bearbeitung von OCR-Ergebnisbäumen.
//! Core-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod command;
pub mod core;
pub mod shared;

pub use app::{
    AppCommand, AppController, AppIntent, AppState, CommandBatch, EditError, HistoryEvent,
    UndoRedoManager,
};
pub use command::{BoxedCommand, Command, CommandError, Target};
pub use core::{BBox, Document, Node, NodeId, NodeKind};
pub use shared::EditorOptions;
