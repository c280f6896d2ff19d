//! Das zentrale hOCR-Dokument: Knoten-Arena, Master-Liste und Selektion.

use super::{BBox, Node, NodeId, NodeKind};
use indexmap::IndexSet;
use std::collections::{HashMap, HashSet};

/// In-Memory-Baum eines hOCR-Dokuments.
///
/// Knoten liegen in einer Arena (`NodeCache`), Parent/Kinder werden als
/// [`NodeId`] referenziert. Die flache Master-Liste enthält jeden erreichbaren
/// Knoten genau einmal, die Selektion ist eine Teilmenge davon.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// NodeCache: alle erreichbaren Knoten, indexiert nach Id
    nodes: HashMap<NodeId, Node>,
    /// Flache Master-Liste aller erreichbaren Knoten
    node_list: Vec<NodeId>,
    /// Selektierte Knoten in Selektionsreihenfolge
    selection: IndexSet<NodeId>,
    /// Nächste zu vergebende Id (wird nie wiederverwendet)
    next_id: u64,
}

impl Document {
    /// Erstellt ein leeres Dokument.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            node_list: Vec::new(),
            selection: IndexSet::new(),
            next_id: 1,
        }
    }

    /// Reserviert eine neue, nie zuvor vergebene Knoten-Id.
    pub fn allocate_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        id
    }

    /// Fügt eine neue Wurzel (z.B. eine Seite) hinzu.
    pub fn add_root(&mut self, kind: NodeKind, bbox: BBox) -> NodeId {
        let id = self.allocate_id();
        self.insert_node(Node::new(id, kind, bbox));
        id
    }

    /// Hängt einen neuen Knoten als letztes Kind an `parent` an.
    pub fn append_child(&mut self, parent: NodeId, kind: NodeKind, bbox: BBox) -> Option<NodeId> {
        if !self.nodes.contains_key(&parent) {
            log::warn!("append_child: Parent {} existiert nicht", parent);
            return None;
        }
        let id = self.allocate_id();
        let mut node = Node::new(id, kind, bbox);
        node.parent = Some(parent);
        self.insert_node(node);
        self.nodes.get_mut(&parent)?.children.push(id);
        Some(id)
    }

    /// Hängt ein Wort mit Text als letztes Kind an `parent` an.
    pub fn add_word(&mut self, parent: NodeId, bbox: BBox, text: &str) -> Option<NodeId> {
        let id = self.append_child(parent, NodeKind::Word, bbox)?;
        if let Some(node) = self.nodes.get_mut(&id) {
            node.text = text.to_string();
        }
        Some(id)
    }

    fn insert_node(&mut self, node: Node) {
        self.next_id = self.next_id.max(node.id.0 + 1);
        self.node_list.push(node.id);
        self.nodes.insert(node.id, node);
    }

    // ── Abfragen ───────────────────────────────────────────────────────

    /// Knoten nach Id (nur erreichbare Knoten)
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Mutable Referenz auf einen Knoten.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Prüft, ob die Id in der NodeCache liegt.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Anzahl erreichbarer Knoten
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Flache Master-Liste
    pub fn node_list(&self) -> &[NodeId] {
        &self.node_list
    }

    /// Alle Wurzeln in Master-Listen-Reihenfolge.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.node_list
            .iter()
            .copied()
            .filter(move |id| self.nodes.get(id).is_some_and(|n| n.parent.is_none()))
    }

    /// Kinder eines Knotens (leer, wenn unbekannt).
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Mutable Kinderliste eines Knotens.
    pub fn children_mut(&mut self, id: NodeId) -> Option<&mut Vec<NodeId>> {
        self.nodes.get_mut(&id).map(|n| &mut n.children)
    }

    /// Parent-Referenz eines Knotens.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Anzahl Vorfahren (Wurzel = 0).
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.parent(id);
        while let Some(parent) = current {
            depth += 1;
            current = self.parent(parent);
        }
        depth
    }

    /// Position innerhalb der Kinderliste des Parents.
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|c| *c == id)
    }

    /// Alle Nachfahren in Pre-Order (ohne den Knoten selbst).
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Vereinigte Nachfahrenmenge mehrerer Ziele.
    ///
    /// Ziele selbst sind ausgeschlossen, auch wenn sie Nachfahre eines
    /// anderen Ziels sind; jede Id erscheint höchstens einmal.
    pub fn descendant_closure(&self, targets: &[NodeId]) -> Vec<NodeId> {
        let target_set: HashSet<NodeId> = targets.iter().copied().collect();
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for &target in targets {
            for desc in self.descendants(target) {
                if !target_set.contains(&desc) && seen.insert(desc) {
                    out.push(desc);
                }
            }
        }
        out
    }

    /// Umschließende Box aller direkten Kinder.
    pub fn children_bbox(&self, id: NodeId) -> Option<BBox> {
        BBox::union_all(
            self.children(id)
                .iter()
                .filter_map(|c| self.nodes.get(c).map(|n| &n.bbox)),
        )
    }

    // ── Primitive für strukturelle Commands ────────────────────────────

    /// Entfernt den Knoten aus der Kinderliste seines Parents.
    ///
    /// Die Parent-Referenz des Knotens bleibt bestehen, damit ein späteres
    /// Wiedereinhängen weiß, wohin. Gibt die bisherige Position zurück.
    pub fn detach_from_parent(&mut self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        let children = self.children_mut(parent)?;
        let index = children.iter().position(|c| *c == id)?;
        children.remove(index);
        Some(index)
    }

    /// Hängt `child` an Position `index` in die Kinderliste von `parent`.
    ///
    /// Gibt `false` zurück, wenn Parent oder Kind fehlen oder der Index
    /// hinter dem Listenende liegt; es wird nicht geklemmt.
    pub fn attach_child(&mut self, parent: NodeId, child: NodeId, index: usize) -> bool {
        if !self.nodes.contains_key(&child) {
            return false;
        }
        let Some(children) = self.children_mut(parent) else {
            return false;
        };
        if index > children.len() {
            return false;
        }
        children.insert(index, child);
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        true
    }

    /// Entfernt die Knoten in einem Schritt aus NodeCache und Master-Liste.
    ///
    /// Liefert jeden entfernten Knoten zusammen mit seiner bisherigen
    /// Master-Listen-Position, aufsteigend sortiert. Kinderlisten und
    /// Selektion bleiben unberührt.
    pub fn take_nodes(&mut self, ids: &[NodeId]) -> Vec<(usize, Node)> {
        let id_set: HashSet<NodeId> = ids.iter().copied().collect();
        let positions: Vec<(usize, NodeId)> = self
            .node_list
            .iter()
            .enumerate()
            .filter(|(_, id)| id_set.contains(id))
            .map(|(pos, id)| (pos, *id))
            .collect();
        self.node_list.retain(|id| !id_set.contains(id));

        positions
            .into_iter()
            .filter_map(|(pos, id)| self.nodes.remove(&id).map(|node| (pos, node)))
            .collect()
    }

    /// Fügt zuvor entnommene Knoten wieder in NodeCache und Master-Liste ein.
    ///
    /// Erwartet aufsteigend sortierte Positionen (wie von [`Self::take_nodes`]);
    /// Positionen hinter dem Listenende werden angehängt.
    pub fn restore_nodes(&mut self, entries: Vec<(usize, Node)>) {
        for (pos, node) in entries {
            let pos = pos.min(self.node_list.len());
            self.node_list.insert(pos, node.id);
            self.next_id = self.next_id.max(node.id.0 + 1);
            self.nodes.insert(node.id, node);
        }
    }

    // ── Selektion ──────────────────────────────────────────────────────

    /// Selektierte Ids in Selektionsreihenfolge
    pub fn selection(&self) -> &IndexSet<NodeId> {
        &self.selection
    }

    /// Mutable Selektionsmenge (für Commands auf der Selektion).
    pub fn selection_mut(&mut self) -> &mut IndexSet<NodeId> {
        &mut self.selection
    }

    /// Selektierte Ids als Vec (Selektionsreihenfolge).
    pub fn selected_ids(&self) -> Vec<NodeId> {
        self.selection.iter().copied().collect()
    }

    /// Selektiert einen erreichbaren Knoten; gibt `false` bei unbekannter Id.
    pub fn select(&mut self, id: NodeId) -> bool {
        if !self.nodes.contains_key(&id) {
            return false;
        }
        self.selection.insert(id);
        true
    }

    /// Hebt die Selektion eines Knotens auf.
    pub fn deselect(&mut self, id: NodeId) -> bool {
        self.selection.shift_remove(&id)
    }

    /// Leert die Selektion.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Prüft, ob ein Knoten selektiert ist.
    pub fn is_selected(&self, id: NodeId) -> bool {
        self.selection.contains(&id)
    }

    // ── Invarianten ────────────────────────────────────────────────────

    /// Prüft die strukturellen Invarianten des Baums.
    ///
    /// - Parent/Kind-Beziehungen sind symmetrisch
    /// - NodeCache enthält genau die von den Wurzeln erreichbaren Knoten
    /// - Master-Liste und NodeCache decken dieselben Ids genau einmal ab
    /// - Selektion ist Teilmenge der NodeCache
    pub fn check_consistency(&self) -> anyhow::Result<()> {
        for (id, node) in &self.nodes {
            anyhow::ensure!(node.id == *id, "Knoten {} unter Schlüssel {} abgelegt", node.id, id);
            if let Some(parent) = node.parent {
                let parent_node = self
                    .nodes
                    .get(&parent)
                    .ok_or_else(|| anyhow::anyhow!("Parent {} von {} fehlt", parent, id))?;
                let count = parent_node.children.iter().filter(|c| *c == id).count();
                anyhow::ensure!(count == 1, "{} erscheint {}x unter {}", id, count, parent);
            }
            for child in &node.children {
                let child_node = self
                    .nodes
                    .get(child)
                    .ok_or_else(|| anyhow::anyhow!("Kind {} von {} fehlt", child, id))?;
                anyhow::ensure!(
                    child_node.parent == Some(*id),
                    "Kind {} zeigt nicht auf Parent {}",
                    child,
                    id
                );
            }
        }

        let mut reachable = 0usize;
        for root in self.roots() {
            reachable += 1 + self.descendants(root).len();
        }
        anyhow::ensure!(
            reachable == self.nodes.len(),
            "NodeCache enthält {} Knoten, erreichbar sind {}",
            self.nodes.len(),
            reachable
        );

        let listed: HashSet<NodeId> = self.node_list.iter().copied().collect();
        anyhow::ensure!(
            listed.len() == self.node_list.len(),
            "Master-Liste enthält Duplikate"
        );
        anyhow::ensure!(
            listed.len() == self.nodes.len() && listed.iter().all(|id| self.nodes.contains_key(id)),
            "Master-Liste und NodeCache weichen voneinander ab"
        );

        if let Some(stale) = self.selection.iter().find(|id| !self.nodes.contains_key(id)) {
            anyhow::bail!("Selektion enthält entfernten Knoten {}", stale);
        }
        Ok(())
    }
}
