//! Core-Domänentypen: Knoten, Bounding-Boxen und das hOCR-Dokument.

pub mod document;
pub mod geometry;
/// Knoten des hOCR-Baums
///
/// - NodeId: stabile, nie wiederverwendete Id
/// - NodeKind: hOCR-Klasse (Seite, Bereich, Absatz, Zeile, Wort)
/// - Node: Arena-Eintrag mit Parent/Kinder als Id-Referenzen
pub mod node;

pub use document::Document;
pub use geometry::BBox;
pub use node::{Node, NodeId, NodeKind};
