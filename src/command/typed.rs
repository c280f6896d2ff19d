//! Typisierte Add/Remove-Commands für Mengen und Listen.
//!
//! Ob der Sender eine Menge oder eine Liste ist, legt die
//! [`ItemContainer`]-Implementierung statisch fest; der Command übernimmt die
//! Art beim Erstellen als [`ContainerKind`].

use super::{Command, CommandError, Target};
use indexmap::IndexSet;
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::hash::Hash;

/// Art des Containers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// Zugehörigkeit zählt, Reihenfolge nicht
    Set,
    /// Geordnete Liste, Gleichheit ohne Positionsbezug
    List,
}

/// Container, auf dem [`AddItems`]/[`RemoveItems`] arbeiten.
pub trait ItemContainer<T> {
    /// Menge oder Liste
    const KIND: ContainerKind;

    /// Fügt ein Element hinzu; `false` wenn eine Menge es schon enthielt.
    fn add_item(&mut self, item: T) -> bool;

    /// Bereichs-Anhängen für Listen; `false` wenn nicht unterstützt.
    fn try_add_range(&mut self, _items: &[T]) -> bool
    where
        T: Clone,
    {
        false
    }

    /// Entfernt ein gleiches Element und liefert seine bisherige Position.
    fn remove_item(&mut self, item: &T) -> Option<usize>;

    /// Entfernt das zuletzt hinzugefügte gleiche Element.
    fn remove_last_item(&mut self, item: &T) -> bool {
        self.remove_item(item).is_some()
    }

    /// Setzt ein entferntes Element wieder ein (Position nur bei geordneten Containern).
    fn restore_item(&mut self, position: usize, item: T);
}

impl<T: Eq + Hash> ItemContainer<T> for HashSet<T> {
    const KIND: ContainerKind = ContainerKind::Set;

    fn add_item(&mut self, item: T) -> bool {
        self.insert(item)
    }

    fn remove_item(&mut self, item: &T) -> Option<usize> {
        self.remove(item).then_some(0)
    }

    fn restore_item(&mut self, _position: usize, item: T) {
        self.insert(item);
    }
}

impl<T: Ord> ItemContainer<T> for BTreeSet<T> {
    const KIND: ContainerKind = ContainerKind::Set;

    fn add_item(&mut self, item: T) -> bool {
        self.insert(item)
    }

    fn remove_item(&mut self, item: &T) -> Option<usize> {
        self.remove(item).then_some(0)
    }

    fn restore_item(&mut self, _position: usize, item: T) {
        self.insert(item);
    }
}

impl<T: Eq + Hash> ItemContainer<T> for IndexSet<T> {
    const KIND: ContainerKind = ContainerKind::Set;

    fn add_item(&mut self, item: T) -> bool {
        self.insert(item)
    }

    fn remove_item(&mut self, item: &T) -> Option<usize> {
        self.shift_remove_full(item).map(|(index, _)| index)
    }

    fn restore_item(&mut self, position: usize, item: T) {
        if position <= self.len() {
            self.shift_insert(position, item);
        } else {
            self.insert(item);
        }
    }
}

impl<T: PartialEq> ItemContainer<T> for Vec<T> {
    const KIND: ContainerKind = ContainerKind::List;

    fn add_item(&mut self, item: T) -> bool {
        self.push(item);
        true
    }

    fn try_add_range(&mut self, items: &[T]) -> bool
    where
        T: Clone,
    {
        self.extend_from_slice(items);
        true
    }

    fn remove_item(&mut self, item: &T) -> Option<usize> {
        let index = self.iter().position(|x| x == item)?;
        self.remove(index);
        Some(index)
    }

    fn remove_last_item(&mut self, item: &T) -> bool {
        match self.iter().rposition(|x| x == item) {
            Some(index) => {
                self.remove(index);
                true
            }
            None => false,
        }
    }

    fn restore_item(&mut self, position: usize, item: T) {
        let position = position.min(self.len());
        self.insert(position, item);
    }
}

impl<T: PartialEq> ItemContainer<T> for VecDeque<T> {
    const KIND: ContainerKind = ContainerKind::List;

    fn add_item(&mut self, item: T) -> bool {
        self.push_back(item);
        true
    }

    fn remove_item(&mut self, item: &T) -> Option<usize> {
        let index = self.iter().position(|x| x == item)?;
        self.remove(index);
        Some(index)
    }

    fn remove_last_item(&mut self, item: &T) -> bool {
        match self.iter().rposition(|x| x == item) {
            Some(index) => self.remove(index).is_some(),
            None => false,
        }
    }

    fn restore_item(&mut self, position: usize, item: T) {
        let position = position.min(self.len());
        self.insert(position, item);
    }
}

/// Fügt Elemente einer Menge oder Liste hinzu.
///
/// Bei Mengen merkt sich der Command nur tatsächlich neue Elemente, damit
/// Undo keine vorher vorhandenen Mitglieder entfernt.
pub struct AddItems<D, C, T> {
    target: Target<D, C>,
    kind: ContainerKind,
    items: Vec<T>,
    added: Option<Vec<T>>,
}

impl<D, C, T> AddItems<D, C, T>
where
    C: ItemContainer<T>,
{
    /// Elemente hinzufügen.
    pub fn new(target: Target<D, C>, items: Vec<T>) -> Self {
        Self {
            target,
            kind: C::KIND,
            items,
            added: None,
        }
    }

    /// Art des Sender-Containers
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }
}

impl<D, C, T> Command<D> for AddItems<D, C, T>
where
    C: ItemContainer<T>,
    T: Clone,
{
    fn redo(&mut self, context: &mut D) -> Result<(), CommandError> {
        let container = self.target.resolve(context)?;
        let added = match self.kind {
            ContainerKind::Set => self
                .items
                .iter()
                .filter(|item| container.add_item((*item).clone()))
                .cloned()
                .collect(),
            ContainerKind::List => {
                if !container.try_add_range(&self.items) {
                    for item in &self.items {
                        container.add_item(item.clone());
                    }
                }
                self.items.clone()
            }
        };
        self.added = Some(added);
        Ok(())
    }

    fn undo(&mut self, context: &mut D) -> Result<(), CommandError> {
        let added = self
            .added
            .as_ref()
            .ok_or(CommandError::NotApplied { command: "AddItems" })?;
        let container = self.target.resolve(context)?;
        for item in added.iter().rev() {
            if !container.remove_last_item(item) {
                return Err(CommandError::ItemNotFound { command: "AddItems" });
            }
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("{} Element(e) zu {} hinzufügen", self.items.len(), self.target.label())
    }
}

/// Entfernt Elemente aus einer Menge oder Liste.
pub struct RemoveItems<D, C, T> {
    target: Target<D, C>,
    kind: ContainerKind,
    items: Vec<T>,
    removed: Option<Vec<(usize, T)>>,
}

impl<D, C, T> RemoveItems<D, C, T>
where
    C: ItemContainer<T>,
{
    /// Elemente entfernen.
    pub fn new(target: Target<D, C>, items: Vec<T>) -> Self {
        Self {
            target,
            kind: C::KIND,
            items,
            removed: None,
        }
    }

    /// Art des Sender-Containers
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }
}

impl<D, C, T> Command<D> for RemoveItems<D, C, T>
where
    C: ItemContainer<T>,
    T: Clone,
{
    fn redo(&mut self, context: &mut D) -> Result<(), CommandError> {
        let container = self.target.resolve(context)?;
        let removed = self
            .items
            .iter()
            .filter_map(|item| container.remove_item(item).map(|pos| (pos, item.clone())))
            .collect();
        self.removed = Some(removed);
        Ok(())
    }

    fn undo(&mut self, context: &mut D) -> Result<(), CommandError> {
        let removed = self
            .removed
            .as_ref()
            .ok_or(CommandError::NotApplied { command: "RemoveItems" })?;
        let container = self.target.resolve(context)?;
        for (position, item) in removed.iter().rev() {
            container.restore_item(*position, item.clone());
        }
        Ok(())
    }

    fn description(&self) -> String {
        let what = match self.kind {
            ContainerKind::Set => "Menge",
            ContainerKind::List => "Liste",
        };
        format!("{} Element(e) aus {} ({}) entfernen", self.items.len(), self.target.label(), what)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_is_fixed_by_container_type() {
        let set_cmd = AddItems::new(Target::<HashSet<u8>, HashSet<u8>>::itself(), vec![1]);
        let list_cmd = AddItems::new(Target::<Vec<u8>, Vec<u8>>::itself(), vec![1]);
        assert_eq!(set_cmd.kind(), ContainerKind::Set);
        assert_eq!(list_cmd.kind(), ContainerKind::List);
    }

    #[test]
    fn set_add_undo_keeps_preexisting_members() {
        let mut set: BTreeSet<u8> = [1, 2].into_iter().collect();
        let mut cmd = AddItems::new(Target::<BTreeSet<u8>, BTreeSet<u8>>::itself(), vec![2, 3]);
        cmd.redo(&mut set).expect("redo");
        assert_eq!(set, [1, 2, 3].into_iter().collect());
        cmd.undo(&mut set).expect("undo");
        assert_eq!(set, [1, 2].into_iter().collect());
    }

    #[test]
    fn list_add_allows_duplicates_and_undo_removes_appended() {
        let mut list = vec!['A', 'B', 'A'];
        let mut cmd = AddItems::new(Target::<Vec<char>, Vec<char>>::itself(), vec!['A']);
        cmd.redo(&mut list).expect("redo");
        assert_eq!(list, vec!['A', 'B', 'A', 'A']);
        cmd.undo(&mut list).expect("undo");
        assert_eq!(list, vec!['A', 'B', 'A']);
    }

    #[test]
    fn list_remove_restores_positions() {
        let mut list: VecDeque<char> = "ABCD".chars().collect();
        let mut cmd = RemoveItems::new(Target::<VecDeque<char>, VecDeque<char>>::itself(), vec!['B', 'D']);
        cmd.redo(&mut list).expect("redo");
        assert_eq!(list.iter().collect::<String>(), "AC");
        cmd.undo(&mut list).expect("undo");
        assert_eq!(list.iter().collect::<String>(), "ABCD");
    }

    #[test]
    fn index_set_remove_restores_selection_order() {
        let mut set: IndexSet<u32> = [10, 20, 30].into_iter().collect();
        let mut cmd = RemoveItems::new(Target::<IndexSet<u32>, IndexSet<u32>>::itself(), vec![20, 99]);
        cmd.redo(&mut set).expect("redo");
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![10, 30]);
        cmd.undo(&mut set).expect("undo");
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![10, 20, 30]);
    }

    #[test]
    fn undo_before_redo_is_reported() {
        let mut set: HashSet<u8> = HashSet::new();
        let mut cmd = RemoveItems::new(Target::<HashSet<u8>, HashSet<u8>>::itself(), vec![1]);
        assert_eq!(
            cmd.undo(&mut set),
            Err(CommandError::NotApplied {
                command: "RemoveItems"
            })
        );
    }
}
