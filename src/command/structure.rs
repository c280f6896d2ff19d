//! Strukturelle Commands: Teilbäume entfernen und einfügen.
//!
//! Beide arbeiten gleichzeitig auf Baum, NodeCache, Master-Liste und
//! Selektion des [`Document`].

use super::{Command, CommandError};
use crate::core::{BBox, Document, Node, NodeId};
use indexmap::IndexSet;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Aufgezeichnete Position eines entfernten Ziels
#[derive(Debug, Clone, PartialEq)]
struct DetachedTarget {
    id: NodeId,
    parent: Option<NodeId>,
    index: usize,
}

#[derive(Debug, Clone)]
struct Removal {
    targets: Vec<DetachedTarget>,
    taken: Vec<(usize, Node)>,
}

/// Entfernt Knoten samt aller Nachfahren.
///
/// Die Ziele müssen keine Geschwister sein. Undo stellt Knoten und
/// Nachfahren wieder her und hängt jedes Ziel an seiner alten Position ein;
/// die Selektion wird dabei nicht wiederhergestellt.
pub struct RemoveNodes {
    targets: Vec<NodeId>,
    removal: Option<Removal>,
}

impl RemoveNodes {
    /// Entfernt die angegebenen Knoten (Reihenfolge bleibt erhalten).
    ///
    /// Doppelte Ids zählen nur einmal, an ihrer ersten Position.
    pub fn new(targets: Vec<NodeId>) -> Self {
        let targets: IndexSet<NodeId> = targets.into_iter().collect();
        Self {
            targets: targets.into_iter().collect(),
            removal: None,
        }
    }

    /// Ziele in Eingabereihenfolge
    pub fn targets(&self) -> &[NodeId] {
        &self.targets
    }

    /// Anzahl beim letzten `redo` entfernter Knoten inkl. Nachfahren
    pub fn removed_count(&self) -> usize {
        self.removal.as_ref().map_or(0, |r| r.taken.len())
    }
}

impl Command<Document> for RemoveNodes {
    fn redo(&mut self, doc: &mut Document) -> Result<(), CommandError> {
        if let Some(missing) = self.targets.iter().find(|id| !doc.contains(**id)) {
            return Err(CommandError::TargetMissing {
                what: format!("Knoten {}", missing),
            });
        }

        let descendants = doc.descendant_closure(&self.targets);

        let selection = doc.selection_mut();
        for id in self.targets.iter().chain(&descendants) {
            selection.shift_remove(id);
        }

        let targets: Vec<DetachedTarget> = self
            .targets
            .iter()
            .map(|&id| DetachedTarget {
                id,
                parent: doc.parent(id),
                index: doc.index_in_parent(id).unwrap_or(0),
            })
            .collect();

        for target in &targets {
            doc.detach_from_parent(target.id);
        }

        let mut all = self.targets.clone();
        all.extend(descendants);
        let taken = doc.take_nodes(&all);

        log::debug!(
            "RemoveNodes: {} Ziel(e), {} Knoten insgesamt entfernt",
            targets.len(),
            taken.len()
        );
        self.removal = Some(Removal { targets, taken });
        Ok(())
    }

    fn undo(&mut self, doc: &mut Document) -> Result<(), CommandError> {
        let mut removal = self.removal.take().ok_or(CommandError::NotApplied {
            command: "RemoveNodes",
        })?;

        // Aufsteigend nach Index statt in Eingabereihenfolge: Ziele [B, A]
        // aus [A, B, C] landen sonst als [A, C, B]
        removal.targets.sort_by_key(|t| t.index);

        // Erst vollständig prüfen, damit ein Fehler nichts verändert und
        // ein späteres Undo erneut möglich ist
        if let Err(e) = check_restorable(&removal, doc) {
            self.removal = Some(removal);
            return Err(e);
        }

        // Erst Master-Liste und NodeCache befüllen, dann Parents verknüpfen
        doc.restore_nodes(removal.taken);

        for target in removal.targets {
            let Some(parent) = target.parent else {
                continue;
            };
            let len = doc.children(parent).len();
            if !doc.attach_child(parent, target.id, target.index) {
                return Err(CommandError::IndexOutOfRange {
                    command: "RemoveNodes",
                    index: target.index,
                    len,
                });
            }
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("{} Knoten löschen", self.targets.len())
    }
}

/// Prüft, ob alle Ziele an ihren aufgezeichneten Positionen einhängbar sind.
///
/// Frühere Ziele unter demselben Parent verlängern dessen Kinderliste; ein
/// Parent darf auch selbst unter den entfernten Knoten liegen.
fn check_restorable(removal: &Removal, doc: &Document) -> Result<(), CommandError> {
    if let Some((_, node)) = removal.taken.iter().find(|(_, n)| doc.contains(n.id)) {
        return Err(CommandError::IdInUse { id: node.id });
    }

    let mut lens: HashMap<NodeId, usize> = HashMap::new();
    for target in &removal.targets {
        let Some(parent) = target.parent else {
            continue;
        };
        let len = match lens.entry(parent) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let current = doc
                    .node(parent)
                    .or_else(|| {
                        removal
                            .taken
                            .iter()
                            .map(|(_, n)| n)
                            .find(|n| n.id == parent)
                    })
                    .map(|n| n.children.len())
                    .ok_or_else(|| CommandError::TargetMissing {
                        what: format!("Parent {} von {}", parent, target.id),
                    })?;
                entry.insert(current)
            }
        };
        if target.index > *len {
            return Err(CommandError::IndexOutOfRange {
                command: "RemoveNodes",
                index: target.index,
                len: *len,
            });
        }
        *len += 1;
    }
    Ok(())
}

/// Fügt einen neu aufgebauten Teilbaum unter `parent` ein.
///
/// Die Ids werden beim Erstellen vergeben; Redo nach Undo hängt dieselben
/// Knoten wieder ein.
pub struct InsertNode {
    parent: NodeId,
    index: usize,
    root: NodeId,
    pending: Option<Vec<(usize, Node)>>,
}

impl InsertNode {
    /// `nodes[0]` ist die Wurzel des Teilbaums, weitere Einträge ihre
    /// bereits verknüpften Nachfahren.
    ///
    /// Gibt `None` bei leerer Knotenliste zurück.
    pub fn new(parent: NodeId, index: usize, nodes: Vec<Node>) -> Option<Self> {
        let root = nodes.first()?.id;
        let pending = nodes
            .into_iter()
            .map(|mut node| {
                if node.id == root {
                    node.parent = Some(parent);
                }
                (usize::MAX, node)
            })
            .collect();
        Some(Self {
            parent,
            index,
            root,
            pending: Some(pending),
        })
    }

    /// Neues Wort mit frisch vergebener Id.
    pub fn word(doc: &mut Document, parent: NodeId, index: usize, bbox: BBox, text: &str) -> Self {
        let id = doc.allocate_id();
        Self {
            parent,
            index,
            root: id,
            pending: Some(vec![(usize::MAX, {
                let mut node = Node::word(id, bbox, text);
                node.parent = Some(parent);
                node
            })]),
        }
    }

    /// Id der eingefügten Teilbaum-Wurzel
    pub fn root(&self) -> NodeId {
        self.root
    }
}

impl Command<Document> for InsertNode {
    fn redo(&mut self, doc: &mut Document) -> Result<(), CommandError> {
        let Some(len) = doc.node(self.parent).map(|p| p.children.len()) else {
            return Err(CommandError::TargetMissing {
                what: format!("Parent {}", self.parent),
            });
        };
        if self.index > len {
            return Err(CommandError::IndexOutOfRange {
                command: "InsertNode",
                index: self.index,
                len,
            });
        }
        let Some(nodes) = self.pending.as_ref() else {
            return Err(CommandError::TargetMissing {
                what: format!("Teilbaum {} ist bereits eingefügt", self.root),
            });
        };
        if let Some((_, node)) = nodes.iter().find(|(_, n)| doc.contains(n.id)) {
            return Err(CommandError::IdInUse { id: node.id });
        }
        let pending = self.pending.take().unwrap_or_default();

        doc.restore_nodes(pending);
        doc.attach_child(self.parent, self.root, self.index);
        Ok(())
    }

    fn undo(&mut self, doc: &mut Document) -> Result<(), CommandError> {
        if self.pending.is_some() || !doc.contains(self.root) {
            return Err(CommandError::NotApplied {
                command: "InsertNode",
            });
        }
        doc.detach_from_parent(self.root);

        let mut ids = vec![self.root];
        ids.extend(doc.descendants(self.root));
        let selection = doc.selection_mut();
        for id in &ids {
            selection.shift_remove(id);
        }
        self.pending = Some(doc.take_nodes(&ids));
        Ok(())
    }

    fn description(&self) -> String {
        format!("Knoten {} in {} einfügen", self.root, self.parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NodeKind;

    struct Fixture {
        doc: Document,
        page: NodeId,
        par: NodeId,
        lines: Vec<NodeId>,
        words: Vec<NodeId>,
    }

    /// Seite → Absatz → drei Zeilen mit je zwei Wörtern
    fn fixture() -> Fixture {
        let mut doc = Document::new();
        let page = doc.add_root(NodeKind::Page, BBox::new(0, 0, 1000, 1000));
        let par = doc
            .append_child(page, NodeKind::Paragraph, BBox::new(0, 0, 500, 300))
            .expect("Absatz");
        let mut lines = Vec::new();
        let mut words = Vec::new();
        for row in 0..3 {
            let y = row * 100;
            let line = doc
                .append_child(par, NodeKind::Line, BBox::new(0, y, 500, y + 40))
                .expect("Zeile");
            for col in 0..2 {
                let x = col * 250;
                words.push(
                    doc.add_word(line, BBox::new(x, y, x + 200, y + 40), "w")
                        .expect("Wort"),
                );
            }
            lines.push(line);
        }
        Fixture {
            doc,
            page,
            par,
            lines,
            words,
        }
    }

    #[test]
    fn test_remove_cascades_to_descendants_and_undo_restores() {
        let Fixture {
            mut doc, par, lines, words, ..
        } = fixture();
        let before = doc.clone();

        let mut cmd = RemoveNodes::new(vec![lines[1]]);
        cmd.redo(&mut doc).expect("redo");
        assert_eq!(cmd.removed_count(), 3);
        assert!(!doc.contains(lines[1]));
        assert!(!doc.contains(words[2]));
        assert!(!doc.contains(words[3]));
        assert_eq!(doc.children(par), &[lines[0], lines[2]]);
        doc.check_consistency().expect("nach redo konsistent");

        cmd.undo(&mut doc).expect("undo");
        assert_eq!(doc.children(par), before.children(par));
        assert_eq!(doc.node_list(), before.node_list());
        assert_eq!(doc.node_count(), before.node_count());
        doc.check_consistency().expect("nach undo konsistent");
    }

    #[test]
    fn test_remove_siblings_in_reverse_input_order_restores_positions() {
        let Fixture {
            mut doc, par, lines, ..
        } = fixture();
        let mut cmd = RemoveNodes::new(vec![lines[2], lines[0]]);
        cmd.redo(&mut doc).expect("redo");
        assert_eq!(doc.children(par), &[lines[1]]);
        cmd.undo(&mut doc).expect("undo");
        assert_eq!(doc.children(par), lines.as_slice());
        doc.check_consistency().expect("konsistent");
    }

    #[test]
    fn test_nested_targets_are_not_double_counted() {
        let Fixture {
            mut doc, par, lines, words, ..
        } = fixture();
        let before = doc.clone();
        let mut cmd = RemoveNodes::new(vec![words[1], par, lines[0]]);
        cmd.redo(&mut doc).expect("redo");
        // Absatz + 3 Zeilen + 6 Wörter
        assert_eq!(cmd.removed_count(), 10);
        assert_eq!(doc.node_count(), 1);
        doc.check_consistency().expect("konsistent");

        cmd.undo(&mut doc).expect("undo");
        assert_eq!(doc.children(lines[0]), before.children(lines[0]));
        assert_eq!(doc.children(par), before.children(par));
        assert_eq!(doc.node_list(), before.node_list());
        doc.check_consistency().expect("konsistent");
    }

    #[test]
    fn test_removed_nodes_leave_selection_and_undo_does_not_reselect() {
        let Fixture {
            mut doc, lines, words, ..
        } = fixture();
        doc.select(lines[0]);
        doc.select(words[1]);
        doc.select(words[4]);

        let mut cmd = RemoveNodes::new(vec![lines[0]]);
        cmd.redo(&mut doc).expect("redo");
        assert_eq!(doc.selected_ids(), vec![words[4]]);
        doc.check_consistency().expect("konsistent");

        cmd.undo(&mut doc).expect("undo");
        assert_eq!(doc.selected_ids(), vec![words[4]]);
        assert!(!doc.is_selected(lines[0]));
    }

    #[test]
    fn test_root_removal_defaults_to_index_zero() {
        let Fixture { mut doc, page, .. } = fixture();
        let mut cmd = RemoveNodes::new(vec![page]);
        cmd.redo(&mut doc).expect("redo");
        assert_eq!(doc.node_count(), 0);
        cmd.undo(&mut doc).expect("undo");
        assert_eq!(doc.roots().collect::<Vec<_>>(), vec![page]);
        doc.check_consistency().expect("konsistent");
    }

    #[test]
    fn test_empty_target_list_is_noop() {
        let Fixture { mut doc, .. } = fixture();
        let count = doc.node_count();
        let mut cmd = RemoveNodes::new(Vec::new());
        cmd.redo(&mut doc).expect("redo");
        cmd.undo(&mut doc).expect("undo");
        assert_eq!(doc.node_count(), count);
    }

    #[test]
    fn test_undo_before_redo_fails() {
        let Fixture { mut doc, lines, .. } = fixture();
        let mut cmd = RemoveNodes::new(vec![lines[0]]);
        assert_eq!(
            cmd.undo(&mut doc),
            Err(CommandError::NotApplied {
                command: "RemoveNodes"
            })
        );
    }

    #[test]
    fn test_recorded_index_past_bounds_is_not_clamped() {
        let Fixture {
            mut doc, par, lines, ..
        } = fixture();
        let mut cmd = RemoveNodes::new(vec![lines[2]]);
        cmd.redo(&mut doc).expect("redo");
        // Unabhängige Änderung an derselben Kinderliste
        doc.children_mut(par).expect("Absatz").remove(0);
        assert_eq!(
            cmd.undo(&mut doc),
            Err(CommandError::IndexOutOfRange {
                command: "RemoveNodes",
                index: 2,
                len: 1
            })
        );
    }

    #[test]
    fn test_duplicate_targets_are_removed_and_restored_once() {
        let Fixture {
            mut doc, lines, words, ..
        } = fixture();
        let mut cmd = RemoveNodes::new(vec![words[1], words[1]]);
        assert_eq!(cmd.targets(), &[words[1]]);

        cmd.redo(&mut doc).expect("redo");
        assert_eq!(cmd.removed_count(), 1);
        cmd.undo(&mut doc).expect("undo");
        assert_eq!(doc.children(lines[0]), &[words[0], words[1]]);
        doc.check_consistency().expect("keine doppelten Kinder");
    }

    #[test]
    fn test_failed_undo_changes_nothing_and_can_be_retried() {
        let Fixture {
            mut doc, lines, words, ..
        } = fixture();
        let mut cmd = RemoveNodes::new(vec![words[1]]);
        cmd.redo(&mut doc).expect("redo");
        let count = doc.node_count();
        let list_len = doc.node_list().len();

        let saved = std::mem::take(doc.children_mut(lines[0]).expect("Zeile"));
        assert_eq!(
            cmd.undo(&mut doc),
            Err(CommandError::IndexOutOfRange {
                command: "RemoveNodes",
                index: 1,
                len: 0
            })
        );
        assert!(!doc.contains(words[1]));
        assert_eq!(doc.node_count(), count);
        assert_eq!(doc.node_list().len(), list_len);

        *doc.children_mut(lines[0]).expect("Zeile") = saved;
        doc.check_consistency().expect("konsistent vor erneutem Undo");
        cmd.undo(&mut doc).expect("erneutes Undo");
        assert_eq!(doc.children(lines[0]), &[words[0], words[1]]);
        doc.check_consistency().expect("konsistent");
    }

    #[test]
    fn test_undo_checks_growing_sibling_count_per_parent() {
        let Fixture {
            mut doc, par, lines, ..
        } = fixture();
        // Index 2 ist erst gültig, nachdem Index 0 wieder eingehängt wurde
        let mut cmd = RemoveNodes::new(vec![lines[2], lines[0]]);
        cmd.redo(&mut doc).expect("redo");
        cmd.undo(&mut doc).expect("undo");
        assert_eq!(doc.children(par), lines.as_slice());
        doc.check_consistency().expect("konsistent");
    }

    #[test]
    fn test_undo_rejects_id_reused_in_between() {
        let Fixture {
            mut doc, lines, words, ..
        } = fixture();
        let mut cmd = RemoveNodes::new(vec![words[1]]);
        cmd.redo(&mut doc).expect("redo");

        // Gleiche Id taucht außerhalb des Commands wieder auf
        doc.restore_nodes(vec![(usize::MAX, Node::word(words[1], BBox::default(), "fremd"))]);
        let count = doc.node_count();

        assert_eq!(
            cmd.undo(&mut doc),
            Err(CommandError::IdInUse { id: words[1] })
        );
        assert_eq!(doc.node_count(), count);
        assert_eq!(doc.children(lines[0]), &[words[0]]);
        doc.check_consistency().expect("konsistent");
    }

    #[test]
    fn test_missing_target_is_rejected_before_mutation() {
        let Fixture { mut doc, lines, .. } = fixture();
        let count = doc.node_count();
        let mut cmd = RemoveNodes::new(vec![lines[0], NodeId(4242)]);
        assert!(matches!(
            cmd.redo(&mut doc),
            Err(CommandError::TargetMissing { .. })
        ));
        assert_eq!(doc.node_count(), count);
    }

    #[test]
    fn test_insert_word_roundtrip_reuses_identity() {
        let Fixture {
            mut doc, lines, words, ..
        } = fixture();
        let mut cmd = InsertNode::word(&mut doc, lines[0], 1, BBox::new(210, 0, 240, 40), "neu");
        let id = cmd.root();

        cmd.redo(&mut doc).expect("redo");
        assert_eq!(doc.children(lines[0]), &[words[0], id, words[1]]);
        doc.select(id);
        doc.check_consistency().expect("konsistent");

        cmd.undo(&mut doc).expect("undo");
        assert!(!doc.contains(id));
        assert!(!doc.is_selected(id));
        assert_eq!(doc.children(lines[0]), &[words[0], words[1]]);
        doc.check_consistency().expect("konsistent");

        cmd.redo(&mut doc).expect("redo erneut");
        assert_eq!(doc.node(id).map(|n| n.text.as_str()), Some("neu"));
        doc.check_consistency().expect("konsistent");
    }

    #[test]
    fn test_insert_subtree_with_children() {
        let Fixture {
            mut doc, par, lines, ..
        } = fixture();
        let line_id = doc.allocate_id();
        let word_id = doc.allocate_id();
        let mut line = Node::new(line_id, NodeKind::Line, BBox::new(0, 400, 100, 440));
        line.children.push(word_id);
        let mut word = Node::word(word_id, BBox::new(0, 400, 100, 440), "x");
        word.parent = Some(line_id);

        let mut cmd = InsertNode::new(par, 3, vec![line, word]).expect("nicht leer");
        cmd.redo(&mut doc).expect("redo");
        assert_eq!(doc.children(par).len(), lines.len() + 1);
        assert_eq!(doc.parent(word_id), Some(line_id));
        doc.check_consistency().expect("konsistent");

        cmd.undo(&mut doc).expect("undo");
        assert!(!doc.contains(word_id));
        doc.check_consistency().expect("konsistent");
    }

    #[test]
    fn test_insert_with_id_in_use_is_rejected_before_mutation() {
        let Fixture {
            mut doc, lines, words, ..
        } = fixture();
        let list_len = doc.node_list().len();
        let mut cmd = InsertNode::new(
            lines[0],
            0,
            vec![Node::word(words[0], BBox::default(), "doppelt")],
        )
        .expect("nicht leer");

        assert_eq!(
            cmd.redo(&mut doc),
            Err(CommandError::IdInUse { id: words[0] })
        );
        assert_eq!(doc.node_list().len(), list_len);
        assert_eq!(doc.children(lines[0]), &[words[0], words[1]]);
        assert_eq!(doc.node(words[0]).map(|n| n.text.as_str()), Some("w"));
        doc.check_consistency().expect("konsistent");
    }

    #[test]
    fn test_insert_past_end_is_error() {
        let Fixture { mut doc, lines, .. } = fixture();
        let mut cmd = InsertNode::word(&mut doc, lines[0], 9, BBox::default(), "x");
        assert!(matches!(
            cmd.redo(&mut doc),
            Err(CommandError::IndexOutOfRange { index: 9, len: 2, .. })
        ));
    }
}
