//! Application State: zentrale Datenhaltung.

use super::history::UndoRedoManager;
use super::CommandLog;
use crate::core::Document;
use crate::shared::EditorOptions;
use std::path::PathBuf;

/// Zentraler Anwendungszustand
pub struct AppState {
    /// Geladenes hOCR-Dokument
    pub document: Document,
    /// Undo/Redo-History über dem Dokument
    pub history: UndoRedoManager<Document>,
    /// Laufzeit-Optionen
    pub options: EditorOptions,
    /// Ziel für persistierte Optionen (`None` = nicht speichern)
    pub options_path: Option<PathBuf>,
    /// Protokoll ausgeführter App-Commands
    pub command_log: CommandLog,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Erstellt einen leeren AppState mit Standard-Optionen.
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    /// Erstellt einen leeren AppState mit den übergebenen Optionen.
    pub fn with_options(options: EditorOptions) -> Self {
        Self {
            document: Document::new(),
            history: UndoRedoManager::with_limit(options.history_limit),
            options,
            options_path: None,
            command_log: CommandLog::new(),
        }
    }

    /// Ersetzt das Dokument; die History des alten Dokuments wird verworfen.
    pub fn load_document(&mut self, document: Document) {
        self.document = document;
        self.history.clear();
        log::info!("Dokument mit {} Knoten geladen", self.document.node_count());
    }

    /// Prüft ob Undo möglich ist.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Prüft ob Redo möglich ist.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Anzahl selektierter Knoten
    pub fn selection_count(&self) -> usize {
        self.document.selection().len()
    }
}
