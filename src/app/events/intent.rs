use crate::core::{BBox, NodeId};
use crate::shared::EditorOptions;

/// App-Intent und App-Command Events.
/// Intents sind Eingaben aus UI/System ohne direkte Mutationslogik.
#[derive(Debug, Clone)]
pub enum AppIntent {
    /// Selektierte Knoten (samt Nachfahren) löschen
    DeleteSelectedRequested,
    /// Bounding-Box eines Knotens setzen
    SetNodeBBoxRequested { id: NodeId, bbox: BBox },
    /// Box eines Knotens an seine Kinder anpassen
    FitNodeToChildrenRequested { id: NodeId },
    /// Text eines Wortes ändern
    SetWordTextRequested { id: NodeId, text: String },
    /// Knoten innerhalb seines Parents verschieben
    MoveNodeRequested { id: NodeId, to_index: usize },
    /// Neues Wort einfügen (`index: None` = am Ende)
    InsertWordRequested {
        parent: NodeId,
        index: Option<usize>,
        bbox: BBox,
        text: String,
    },
    /// Knoten per Klick selektieren
    NodePickRequested { id: NodeId, additive: bool },
    /// Selektion aufheben
    ClearSelectionRequested,
    /// Alle Knoten selektieren
    SelectAllRequested,
    /// Undo: Letzte Aktion rückgängig machen
    UndoRequested,
    /// Redo: Rückgängig gemachte Aktion wiederherstellen
    RedoRequested,
    /// Undo-History verwerfen
    ClearHistoryRequested,
    /// Optionen wurden geändert (sofortige Anwendung)
    OptionsChanged { options: EditorOptions },
    /// Optionen auf Standardwerte zurücksetzen
    ResetOptionsRequested,
}
