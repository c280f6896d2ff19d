//! Eigenschaftsänderungen über typisierte Getter/Setter-Paare.

use super::{Command, CommandError};
use crate::core::{BBox, Document, Node, NodeId};

type Getter<D, V> = Box<dyn Fn(&D) -> Result<V, CommandError>>;
type Setter<D, V> = Box<dyn Fn(&mut D, V) -> Result<(), CommandError>>;

/// Lesbare und schreibbare Eigenschaft eines Senders in `D`.
pub struct Property<D, V> {
    name: String,
    get: Getter<D, V>,
    set: Setter<D, V>,
}

impl<D, V> Property<D, V> {
    /// Erstellt eine Eigenschaft aus Getter und Setter.
    pub fn new<G, S>(name: impl Into<String>, get: G, set: S) -> Self
    where
        G: Fn(&D) -> Result<V, CommandError> + 'static,
        S: Fn(&mut D, V) -> Result<(), CommandError> + 'static,
    {
        Self {
            name: name.into(),
            get: Box::new(get),
            set: Box::new(set),
        }
    }

    /// Aktueller Wert
    pub fn get(&self, context: &D) -> Result<V, CommandError> {
        (self.get)(context)
    }

    /// Setzt den Wert.
    pub fn set(&self, context: &mut D, value: V) -> Result<(), CommandError> {
        (self.set)(context, value)
    }

    /// Name für Beschreibung und Fehlermeldungen
    pub fn name(&self) -> &str {
        &self.name
    }
}

fn node_field<V: 'static>(
    id: NodeId,
    field: &str,
    get: fn(&Node) -> V,
    set: fn(&mut Node, V),
) -> Property<Document, V> {
    let missing = move || CommandError::TargetMissing {
        what: format!("Knoten {}", id),
    };
    Property::new(
        format!("{} von {}", field, id),
        move |doc: &Document| doc.node(id).map(get).ok_or_else(missing),
        move |doc: &mut Document, value| {
            let node = doc.node_mut(id).ok_or_else(missing)?;
            set(node, value);
            Ok(())
        },
    )
}

impl Property<Document, BBox> {
    /// Bounding-Box eines Knotens.
    pub fn node_bbox(id: NodeId) -> Self {
        node_field(id, "bbox", |n| n.bbox, |n, v| n.bbox = v)
    }
}

impl Property<Document, String> {
    /// Text eines Knotens.
    pub fn node_text(id: NodeId) -> Self {
        node_field(id, "Text", |n| n.text.clone(), |n, v| n.text = v)
    }
}

impl Property<Document, Option<u8>> {
    /// Wort-Konfidenz eines Knotens.
    pub fn node_confidence(id: NodeId) -> Self {
        node_field(id, "Konfidenz", |n| n.confidence, |n, v| n.confidence = v)
    }
}

impl Property<Document, Option<String>> {
    /// Sprache eines Knotens.
    pub fn node_language(id: NodeId) -> Self {
        node_field(id, "Sprache", |n| n.language.clone(), |n, v| n.language = v)
    }
}

/// Neuer Wert einer Eigenschaftsänderung
pub enum NewValue<D, V> {
    /// Fester Wert
    Fixed(V),
    /// Wird bei jeder Anwendung aus dem aktuellen Zustand berechnet
    Computed(Getter<D, V>),
}

impl<D, V: Clone> NewValue<D, V> {
    /// Berechneter Wert aus einer reinen Funktion des Zustands.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&D) -> Result<V, CommandError> + 'static,
    {
        NewValue::Computed(Box::new(f))
    }

    fn evaluate(&self, context: &D) -> Result<V, CommandError> {
        match self {
            NewValue::Fixed(value) => Ok(value.clone()),
            NewValue::Computed(f) => f(context),
        }
    }
}

impl NewValue<Document, BBox> {
    /// Box, die alle aktuellen Kinder umschließt.
    ///
    /// Ohne Kinder bleibt die bisherige Box des Knotens.
    pub fn fit_to_children(id: NodeId) -> Self {
        Self::computed(move |doc: &Document| {
            doc.children_bbox(id)
                .or_else(|| doc.node(id).map(|n| n.bbox))
                .ok_or_else(|| CommandError::TargetMissing {
                    what: format!("Knoten {}", id),
                })
        })
    }
}

/// Setzt eine Eigenschaft auf einen neuen Wert; Undo stellt den alten her.
pub struct PropertyChange<D, V> {
    property: Property<D, V>,
    new_value: NewValue<D, V>,
    old_value: Option<V>,
}

impl<D, V: Clone> PropertyChange<D, V> {
    /// Alter Wert wird beim ersten `redo` gelesen.
    pub fn new(property: Property<D, V>, new_value: NewValue<D, V>) -> Self {
        Self {
            property,
            new_value,
            old_value: None,
        }
    }

    /// Alter Wert wird sofort aus dem Kontext gelesen.
    pub fn capture(
        property: Property<D, V>,
        new_value: NewValue<D, V>,
        context: &D,
    ) -> Result<Self, CommandError> {
        let old_value = property.get(context)?;
        Ok(Self::with_old_value(property, old_value, new_value))
    }

    /// Alter Wert wird vom Aufrufer geliefert.
    pub fn with_old_value(property: Property<D, V>, old_value: V, new_value: NewValue<D, V>) -> Self {
        Self {
            property,
            new_value,
            old_value: Some(old_value),
        }
    }

    /// Gesicherter alter Wert
    pub fn old_value(&self) -> Option<&V> {
        self.old_value.as_ref()
    }
}

impl<D, V: Clone> Command<D> for PropertyChange<D, V> {
    fn redo(&mut self, context: &mut D) -> Result<(), CommandError> {
        if self.old_value.is_none() {
            self.old_value = Some(self.property.get(context)?);
        }
        let value = self.new_value.evaluate(context)?;
        self.property.set(context, value)
    }

    fn undo(&mut self, context: &mut D) -> Result<(), CommandError> {
        let old = self
            .old_value
            .clone()
            .ok_or(CommandError::NotApplied {
                command: "PropertyChange",
            })?;
        self.property.set(context, old)
    }

    fn description(&self) -> String {
        format!("{} ändern", self.property.name())
    }
}
