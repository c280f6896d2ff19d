use crate::core::{BBox, NodeId};
use crate::shared::EditorOptions;

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Selektierte Knoten löschen
    DeleteSelectedNodes,
    /// Bounding-Box setzen
    SetNodeBBox { id: NodeId, bbox: BBox },
    /// Box aus den Kindern berechnen
    FitNodeToChildren { id: NodeId },
    /// Worttext setzen
    SetWordText { id: NodeId, text: String },
    /// Knoten innerhalb der Kinderliste seines Parents verschieben
    MoveNodeWithinParent { id: NodeId, to_index: usize },
    /// Wort an fester Position einfügen
    InsertWord {
        parent: NodeId,
        index: usize,
        bbox: BBox,
        text: String,
    },
    /// Knoten selektieren (additiv oder ersetzend)
    SelectNode { id: NodeId, additive: bool },
    /// Selektion aufheben
    ClearSelection,
    /// Alle Knoten selektieren
    SelectAllNodes,
    /// Undo: Letzte Aktion rückgängig machen
    Undo,
    /// Redo: Rückgängig gemachte Aktion wiederherstellen
    Redo,
    /// History verwerfen
    ClearHistory,
    /// Optionen anwenden und speichern
    ApplyOptions { options: EditorOptions },
    /// Optionen auf Standardwerte zurücksetzen
    ResetOptions,
}
