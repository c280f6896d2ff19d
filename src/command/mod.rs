//! Umkehrbare Commands auf dem Dokumentmodell.
//!
//! Ein [`Command`] kennt genau einen Sender innerhalb eines Kontexts `D`
//! (z.B. eine Liste im [`Document`](crate::core::Document) oder das Dokument
//! selbst) und kann seine Mutation anwenden (`redo`) und rückgängig machen
//! (`undo`). Den benötigten Vorzustand hält der Command selbst.

pub mod collection;
pub mod property;
pub mod structure;
pub mod typed;

pub use collection::{Append, Clear, InsertAt, Move, MoveSource, OrderedCollection, Remove, RemoveAt, Replace};
pub use property::{NewValue, Property, PropertyChange};
pub use structure::{InsertNode, RemoveNodes};
pub use typed::{AddItems, ContainerKind, ItemContainer, RemoveItems};

use thiserror::Error;

/// Fehler bei Anwendung oder Rücknahme eines Commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Undo ohne vorheriges Redo: der benötigte Vorzustand fehlt.
    #[error("{command}: Undo ohne vorheriges Redo")]
    NotApplied {
        /// Name des Commands
        command: &'static str,
    },
    /// Das adressierte Element liegt nicht (mehr) in der Collection.
    #[error("{command}: Element nicht in der Collection")]
    ItemNotFound {
        /// Name des Commands
        command: &'static str,
    },
    /// Fester oder aufgezeichneter Index liegt außerhalb der Collection.
    #[error("{command}: Index {index} außerhalb von 0..={len}")]
    IndexOutOfRange {
        /// Name des Commands
        command: &'static str,
        /// Angefragter Index
        index: usize,
        /// Aktuelle Länge
        len: usize,
    },
    /// Ein einzufügender Knoten trägt eine Id, die im Dokument schon lebt.
    #[error("Knoten-Id {id} ist bereits vergeben")]
    IdInUse {
        /// Kollidierende Id
        id: crate::core::NodeId,
    },
    /// Der Sender konnte im Kontext nicht aufgelöst werden.
    #[error("Ziel nicht gefunden: {what}")]
    TargetMissing {
        /// Beschreibung des fehlenden Ziels
        what: String,
    },
}

/// Abstrakte, umkehrbare Mutation gegen einen Kontext `D`.
///
/// `undo` nach `redo` (und umgekehrt) ist auf dem beobachtbaren Zustand des
/// Senders die Identität.
pub trait Command<D> {
    /// Wendet die Mutation an (erstmalig oder erneut).
    fn redo(&mut self, target: &mut D) -> Result<(), CommandError>;

    /// Nimmt die Wirkung des letzten `redo` zurück.
    fn undo(&mut self, target: &mut D) -> Result<(), CommandError>;

    /// Kurzbeschreibung für History-Anzeige und Logging.
    fn description(&self) -> String;

    /// Boxt den Command für die History.
    fn boxed(self) -> BoxedCommand<D>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

/// Command im History-Speicher
pub type BoxedCommand<D> = Box<dyn Command<D>>;

type Accessor<D, C> = Box<dyn Fn(&mut D) -> Option<&mut C>>;

/// Typisierter Zugriff auf den Sender `C` eines Commands innerhalb von `D`.
///
/// Ersetzt die Laufzeit-Suche per Name: der Zugriff wird beim Erstellen des
/// Commands als Closure übergeben und zur Anwendungszeit ausgewertet.
pub struct Target<D, C: ?Sized> {
    label: String,
    access: Accessor<D, C>,
}

impl<D, C: ?Sized> Target<D, C> {
    /// Erstellt einen Zugriff mit Beschreibung für Fehlermeldungen.
    pub fn new<F>(label: impl Into<String>, access: F) -> Self
    where
        F: Fn(&mut D) -> Option<&mut C> + 'static,
    {
        Self {
            label: label.into(),
            access: Box::new(access),
        }
    }

    /// Löst den Sender im Kontext auf.
    pub fn resolve<'a>(&self, context: &'a mut D) -> Result<&'a mut C, CommandError> {
        (self.access)(context).ok_or_else(|| CommandError::TargetMissing {
            what: self.label.clone(),
        })
    }

    /// Beschreibung des Senders
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<C: 'static> Target<C, C> {
    /// Der Kontext ist selbst der Sender.
    pub fn itself() -> Self {
        Self::new("Kontext", |c| Some(c))
    }
}

impl<D, C: ?Sized> std::fmt::Debug for Target<D, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Target").field("label", &self.label).finish()
    }
}

impl Target<crate::core::Document, Vec<crate::core::NodeId>> {
    /// Kinderliste eines Knotens im Dokument.
    pub fn children_of(parent: crate::core::NodeId) -> Self {
        Self::new(format!("Kinder von {}", parent), move |doc| {
            doc.children_mut(parent)
        })
    }
}

impl Target<crate::core::Document, indexmap::IndexSet<crate::core::NodeId>> {
    /// Selektionsmenge des Dokuments.
    pub fn selection() -> Self {
        Self::new("Selektion", |doc| Some(doc.selection_mut()))
    }
}
