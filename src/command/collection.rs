//! Commands auf geordneten Collections (Listen mit bedeutsamer Reihenfolge).

use super::{Command, CommandError, Target};
use std::collections::VecDeque;

/// Fähigkeit einer geordneten Collection, wie sie die Listen-Commands brauchen.
pub trait OrderedCollection<T> {
    /// Anzahl der Elemente
    fn len(&self) -> usize;

    /// Element an Position `index`
    fn item(&self, index: usize) -> Option<&T>;

    /// Fügt an `index` ein (`index <= len`, vom Aufrufer geprüft).
    fn insert_item(&mut self, index: usize, item: T);

    /// Entfernt das Element an `index`.
    fn remove_item_at(&mut self, index: usize) -> Option<T>;

    /// Hängt ein Element an.
    fn push_item(&mut self, item: T);

    /// Entnimmt alle Elemente in Reihenfolge.
    fn take_all(&mut self) -> Vec<T>;

    /// Hängt alle Elemente in einem Schritt an, falls die Collection das kann.
    ///
    /// Gibt `false` zurück, wenn kein Bereichs-Anhängen unterstützt wird;
    /// der Aufrufer hängt dann einzeln an.
    fn try_append_range(&mut self, _items: &[T]) -> bool
    where
        T: Clone,
    {
        false
    }

    /// `true` wenn leer
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Erste Position eines gleichen Elements.
    fn position_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        (0..self.len()).find(|&i| self.item(i) == Some(item))
    }

    /// Letzte Position eines gleichen Elements.
    fn rposition_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        (0..self.len()).rev().find(|&i| self.item(i) == Some(item))
    }
}

impl<T> OrderedCollection<T> for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn item(&self, index: usize) -> Option<&T> {
        self.get(index)
    }

    fn insert_item(&mut self, index: usize, item: T) {
        self.insert(index, item);
    }

    fn remove_item_at(&mut self, index: usize) -> Option<T> {
        (index < Vec::len(self)).then(|| self.remove(index))
    }

    fn push_item(&mut self, item: T) {
        self.push(item);
    }

    fn take_all(&mut self) -> Vec<T> {
        std::mem::take(self)
    }

    fn try_append_range(&mut self, items: &[T]) -> bool
    where
        T: Clone,
    {
        self.extend_from_slice(items);
        true
    }

    fn position_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|x| x == item)
    }

    fn rposition_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().rposition(|x| x == item)
    }
}

impl<T> OrderedCollection<T> for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn item(&self, index: usize) -> Option<&T> {
        self.get(index)
    }

    fn insert_item(&mut self, index: usize, item: T) {
        self.insert(index, item);
    }

    fn remove_item_at(&mut self, index: usize) -> Option<T> {
        self.remove(index)
    }

    fn push_item(&mut self, item: T) {
        self.push_back(item);
    }

    fn take_all(&mut self) -> Vec<T> {
        self.drain(..).collect()
    }
}

/// Hängt alle Elemente an; bevorzugt Bereichs-Anhängen.
pub(crate) fn append_all<C, T>(collection: &mut C, items: &[T])
where
    C: OrderedCollection<T> + ?Sized,
    T: Clone,
{
    if !collection.try_append_range(items) {
        for item in items {
            collection.push_item(item.clone());
        }
    }
}

fn check_insert_index(command: &'static str, index: usize, len: usize) -> Result<(), CommandError> {
    if index > len {
        return Err(CommandError::IndexOutOfRange {
            command,
            index,
            len,
        });
    }
    Ok(())
}

fn check_item_index(command: &'static str, index: usize, len: usize) -> Result<(), CommandError> {
    if index >= len {
        return Err(CommandError::IndexOutOfRange {
            command,
            index,
            len,
        });
    }
    Ok(())
}

// ── Append ─────────────────────────────────────────────────────────────

/// Hängt ein oder mehrere Elemente an.
pub struct Append<D, C, T> {
    target: Target<D, C>,
    items: Vec<T>,
}

impl<D, C, T> Append<D, C, T> {
    /// Ein einzelnes Element anhängen.
    pub fn single(target: Target<D, C>, item: T) -> Self {
        Self::many(target, vec![item])
    }

    /// Mehrere Elemente in Eingabereihenfolge anhängen.
    pub fn many(target: Target<D, C>, items: Vec<T>) -> Self {
        Self { target, items }
    }
}

impl<D, C, T> Command<D> for Append<D, C, T>
where
    C: OrderedCollection<T>,
    T: Clone + PartialEq,
{
    fn redo(&mut self, context: &mut D) -> Result<(), CommandError> {
        let collection = self.target.resolve(context)?;
        append_all(collection, &self.items);
        Ok(())
    }

    fn undo(&mut self, context: &mut D) -> Result<(), CommandError> {
        let collection = self.target.resolve(context)?;
        for item in self.items.iter().rev() {
            let index = collection
                .rposition_of(item)
                .ok_or(CommandError::ItemNotFound { command: "Append" })?;
            collection.remove_item_at(index);
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("{} Element(e) anhängen an {}", self.items.len(), self.target.label())
    }
}

// ── InsertAt ───────────────────────────────────────────────────────────

/// Fügt ein Element an einem festen Index ein.
pub struct InsertAt<D, C, T> {
    target: Target<D, C>,
    index: usize,
    item: T,
}

impl<D, C, T> InsertAt<D, C, T> {
    /// Index wird beim Erstellen festgelegt.
    pub fn new(target: Target<D, C>, index: usize, item: T) -> Self {
        Self {
            target,
            index,
            item,
        }
    }
}

impl<D, C, T> Command<D> for InsertAt<D, C, T>
where
    C: OrderedCollection<T>,
    T: Clone + PartialEq,
{
    fn redo(&mut self, context: &mut D) -> Result<(), CommandError> {
        let collection = self.target.resolve(context)?;
        check_insert_index("InsertAt", self.index, collection.len())?;
        collection.insert_item(self.index, self.item.clone());
        Ok(())
    }

    fn undo(&mut self, context: &mut D) -> Result<(), CommandError> {
        let collection = self.target.resolve(context)?;
        let index = if collection.item(self.index) == Some(&self.item) {
            self.index
        } else {
            collection
                .position_of(&self.item)
                .ok_or(CommandError::ItemNotFound { command: "InsertAt" })?
        };
        collection.remove_item_at(index);
        Ok(())
    }

    fn description(&self) -> String {
        format!("Einfügen an Position {} in {}", self.index, self.target.label())
    }
}

// ── RemoveAt ───────────────────────────────────────────────────────────

/// Entfernt das Element an einem festen Index.
pub struct RemoveAt<D, C, T> {
    target: Target<D, C>,
    index: usize,
    removed: Option<T>,
}

impl<D, C, T> RemoveAt<D, C, T> {
    /// Das Element wird erst beim ersten `redo` erfasst.
    pub fn new(target: Target<D, C>, index: usize) -> Self {
        Self {
            target,
            index,
            removed: None,
        }
    }
}

impl<D, C, T> Command<D> for RemoveAt<D, C, T>
where
    C: OrderedCollection<T>,
    T: Clone + PartialEq,
{
    fn redo(&mut self, context: &mut D) -> Result<(), CommandError> {
        let collection = self.target.resolve(context)?;
        check_item_index("RemoveAt", self.index, collection.len())?;
        self.removed = collection.remove_item_at(self.index);
        Ok(())
    }

    fn undo(&mut self, context: &mut D) -> Result<(), CommandError> {
        let item = self
            .removed
            .clone()
            .ok_or(CommandError::NotApplied { command: "RemoveAt" })?;
        let collection = self.target.resolve(context)?;
        check_insert_index("RemoveAt", self.index, collection.len())?;
        collection.insert_item(self.index, item);
        Ok(())
    }

    fn description(&self) -> String {
        format!("Position {} aus {} entfernen", self.index, self.target.label())
    }
}

// ── Remove ─────────────────────────────────────────────────────────────

/// Entfernt ein oder mehrere Elemente nach Wert.
///
/// Merkt sich die Positionen, damit Undo die ursprüngliche Reihenfolge
/// wiederherstellt. Fehlt ein Element, bleibt die Collection unverändert und
/// `redo` liefert [`CommandError::ItemNotFound`].
pub struct Remove<D, C, T> {
    target: Target<D, C>,
    items: Vec<T>,
    removed: Option<Vec<(usize, T)>>,
}

impl<D, C, T> Remove<D, C, T> {
    /// Ein Element entfernen.
    pub fn single(target: Target<D, C>, item: T) -> Self {
        Self::many(target, vec![item])
    }

    /// Mehrere Elemente entfernen.
    pub fn many(target: Target<D, C>, items: Vec<T>) -> Self {
        Self {
            target,
            items,
            removed: None,
        }
    }
}

impl<D, C, T> Command<D> for Remove<D, C, T>
where
    C: OrderedCollection<T>,
    T: Clone + PartialEq,
{
    fn redo(&mut self, context: &mut D) -> Result<(), CommandError> {
        self.removed = None;
        let collection = self.target.resolve(context)?;
        let mut removed = Vec::with_capacity(self.items.len());
        for item in &self.items {
            match collection.position_of(item) {
                Some(index) => {
                    collection.remove_item_at(index);
                    removed.push((index, item.clone()));
                }
                None => {
                    log::warn!("Remove: Element nicht in {}", self.target.label());
                    for (index, item) in removed.into_iter().rev() {
                        collection.insert_item(index, item);
                    }
                    return Err(CommandError::ItemNotFound { command: "Remove" });
                }
            }
        }
        self.removed = Some(removed);
        Ok(())
    }

    fn undo(&mut self, context: &mut D) -> Result<(), CommandError> {
        let removed = self
            .removed
            .as_ref()
            .ok_or(CommandError::NotApplied { command: "Remove" })?;
        let collection = self.target.resolve(context)?;
        for (index, item) in removed.iter().rev() {
            check_insert_index("Remove", *index, collection.len())?;
            collection.insert_item(*index, item.clone());
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("{} Element(e) aus {} entfernen", self.items.len(), self.target.label())
    }
}

// ── Move ───────────────────────────────────────────────────────────────

/// Quelle einer Verschiebung
#[derive(Debug, Clone, PartialEq)]
pub enum MoveSource<T> {
    /// Fester Quellindex
    Index(usize),
    /// Element, dessen Position erst beim Anwenden gesucht wird
    Item(T),
}

/// Verschiebt ein Element an eine Zielposition.
///
/// Bei [`MoveSource::Item`] wird die Quellposition bei jedem `redo` neu
/// bestimmt, damit zwischenzeitliche Verschiebungen berücksichtigt werden.
pub struct Move<D, C, T> {
    target: Target<D, C>,
    source: MoveSource<T>,
    destination: usize,
    recorded_source: Option<usize>,
}

impl<D, C, T> Move<D, C, T> {
    /// Verschiebung von festem Index `from` nach `to`.
    pub fn by_index(target: Target<D, C>, from: usize, to: usize) -> Self {
        Self {
            target,
            source: MoveSource::Index(from),
            destination: to,
            recorded_source: None,
        }
    }

    /// Verschiebung eines Elements nach `to`.
    pub fn item(target: Target<D, C>, item: T, to: usize) -> Self {
        Self {
            target,
            source: MoveSource::Item(item),
            destination: to,
            recorded_source: None,
        }
    }

    /// Beim letzten `redo` verwendete Quellposition
    pub fn recorded_source(&self) -> Option<usize> {
        self.recorded_source
    }
}

fn move_within<C, T>(
    collection: &mut C,
    from: usize,
    to: usize,
) -> Result<(), CommandError>
where
    C: OrderedCollection<T> + ?Sized,
{
    if from == to {
        return Ok(());
    }
    check_item_index("Move", from, collection.len())?;
    check_item_index("Move", to, collection.len())?;
    if let Some(item) = collection.remove_item_at(from) {
        collection.insert_item(to, item);
    }
    Ok(())
}

impl<D, C, T> Command<D> for Move<D, C, T>
where
    C: OrderedCollection<T>,
    T: Clone + PartialEq,
{
    fn redo(&mut self, context: &mut D) -> Result<(), CommandError> {
        let collection = self.target.resolve(context)?;
        let from = match &self.source {
            MoveSource::Index(index) => *index,
            MoveSource::Item(item) => collection
                .position_of(item)
                .ok_or(CommandError::ItemNotFound { command: "Move" })?,
        };
        move_within::<C, T>(collection, from, self.destination)?;
        self.recorded_source = Some(from);
        Ok(())
    }

    fn undo(&mut self, context: &mut D) -> Result<(), CommandError> {
        let from = self
            .recorded_source
            .ok_or(CommandError::NotApplied { command: "Move" })?;
        let collection = self.target.resolve(context)?;
        move_within::<C, T>(collection, self.destination, from)
    }

    fn description(&self) -> String {
        format!("Element in {} nach Position {} verschieben", self.target.label(), self.destination)
    }
}

// ── Replace ────────────────────────────────────────────────────────────

/// Ersetzt ein Element durch ein anderes an derselben Position.
///
/// Die Position wird bei jedem `redo`/`undo` neu gesucht.
pub struct Replace<D, C, T> {
    target: Target<D, C>,
    old: T,
    new: T,
    applied: bool,
}

impl<D, C, T> Replace<D, C, T> {
    /// `old` durch `new` ersetzen.
    pub fn new(target: Target<D, C>, old: T, new: T) -> Self {
        Self {
            target,
            old,
            new,
            applied: false,
        }
    }
}

impl<D, C, T> Command<D> for Replace<D, C, T>
where
    C: OrderedCollection<T>,
    T: Clone + PartialEq,
{
    fn redo(&mut self, context: &mut D) -> Result<(), CommandError> {
        let collection = self.target.resolve(context)?;
        let index = collection
            .position_of(&self.old)
            .ok_or(CommandError::ItemNotFound { command: "Replace" })?;
        collection.remove_item_at(index);
        collection.insert_item(index, self.new.clone());
        self.applied = true;
        Ok(())
    }

    fn undo(&mut self, context: &mut D) -> Result<(), CommandError> {
        if !self.applied {
            return Err(CommandError::NotApplied { command: "Replace" });
        }
        let collection = self.target.resolve(context)?;
        let index = collection
            .position_of(&self.new)
            .ok_or(CommandError::ItemNotFound { command: "Replace" })?;
        collection.remove_item_at(index);
        collection.insert_item(index, self.old.clone());
        Ok(())
    }

    fn description(&self) -> String {
        format!("Element in {} ersetzen", self.target.label())
    }
}

// ── Clear ──────────────────────────────────────────────────────────────

/// Leert die Collection; der Inhalt wird bei jedem `redo` neu gesichert.
pub struct Clear<D, C, T> {
    target: Target<D, C>,
    snapshot: Option<Vec<T>>,
}

impl<D, C, T> Clear<D, C, T> {
    /// Collection leeren.
    pub fn new(target: Target<D, C>) -> Self {
        Self {
            target,
            snapshot: None,
        }
    }

    /// Beim letzten `redo` gesicherter Inhalt
    pub fn snapshot(&self) -> Option<&[T]> {
        self.snapshot.as_deref()
    }
}

impl<D, C, T> Command<D> for Clear<D, C, T>
where
    C: OrderedCollection<T>,
    T: Clone + PartialEq,
{
    fn redo(&mut self, context: &mut D) -> Result<(), CommandError> {
        let collection = self.target.resolve(context)?;
        self.snapshot = Some(collection.take_all());
        Ok(())
    }

    fn undo(&mut self, context: &mut D) -> Result<(), CommandError> {
        let snapshot = self
            .snapshot
            .as_ref()
            .ok_or(CommandError::NotApplied { command: "Clear" })?;
        let collection = self.target.resolve(context)?;
        append_all(collection, snapshot);
        Ok(())
    }

    fn description(&self) -> String {
        format!("{} leeren", self.target.label())
    }
}
