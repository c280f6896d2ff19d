//! Knoten des hOCR-Dokumentbaums.

use super::BBox;
use serde::{Deserialize, Serialize};

/// Stabile Identität eines Knotens für seine gesamte Lebensdauer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// hOCR-Elementklasse eines Knotens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// `ocr_page` (Wurzel)
    Page,
    /// `ocr_carea`
    Area,
    /// `ocr_par`
    Paragraph,
    /// `ocr_line`
    Line,
    /// `ocrx_word` (Blatt)
    Word,
}

impl NodeKind {
    /// Klassenname wie im hOCR-Markup
    pub fn hocr_class(self) -> &'static str {
        match self {
            NodeKind::Page => "ocr_page",
            NodeKind::Area => "ocr_carea",
            NodeKind::Paragraph => "ocr_par",
            NodeKind::Line => "ocr_line",
            NodeKind::Word => "ocrx_word",
        }
    }

    /// Wurzelknoten haben keinen Parent.
    pub fn is_root(self) -> bool {
        matches!(self, NodeKind::Page)
    }

    /// Blätter besitzen keine Kinder, dafür Text.
    pub fn is_leaf(self) -> bool {
        matches!(self, NodeKind::Word)
    }
}

/// Ein Knoten im Arena-Baum.
///
/// Parent und Kinder sind Id-Referenzen in die `NodeCache` des
/// [`Document`](super::Document); der Knoten besitzt seine Kinder nur logisch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Eindeutige Id
    pub id: NodeId,
    /// hOCR-Klasse
    pub kind: NodeKind,
    /// Besitzender Parent (None = Wurzel)
    pub parent: Option<NodeId>,
    /// Geordnete Kinder (Reihenfolge = Serialisierungs- und Z-Reihenfolge)
    pub children: Vec<NodeId>,
    /// Bounding-Box
    pub bbox: BBox,
    /// Erkannter Text (nur bei Wörtern belegt)
    pub text: String,
    /// Wort-Konfidenz `x_wconf` (0–100)
    pub confidence: Option<u8>,
    /// Sprache (`lang`-Attribut)
    pub language: Option<String>,
}

impl Node {
    /// Erstellt einen Knoten ohne Parent und Kinder.
    pub fn new(id: NodeId, kind: NodeKind, bbox: BBox) -> Self {
        Self {
            id,
            kind,
            parent: None,
            children: Vec::new(),
            bbox,
            text: String::new(),
            confidence: None,
            language: None,
        }
    }

    /// Erstellt ein Wort mit Text.
    pub fn word(id: NodeId, bbox: BBox, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::new(id, NodeKind::Word, bbox)
        }
    }
}
