//! Bounding-Box-Geometrie für hOCR-Knoten (Pixel-Koordinaten der Seite).

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Achsenparalleles Rechteck wie im hOCR-`bbox x0 y0 x1 y1`-Attribut.
///
/// `min` ist die obere linke, `max` die untere rechte Ecke (exklusiv nicht
/// relevant, hOCR behandelt beide Ecken als Pixelgrenzen).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BBox {
    /// Obere linke Ecke
    pub min: IVec2,
    /// Untere rechte Ecke
    pub max: IVec2,
}

impl BBox {
    /// Erstellt eine Box aus den vier hOCR-Koordinaten.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: IVec2::new(x0.min(x1), y0.min(y1)),
            max: IVec2::new(x0.max(x1), y0.max(y1)),
        }
    }

    /// Breite in Pixeln
    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    /// Höhe in Pixeln
    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    /// `true` wenn die Box keine Fläche hat.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Kleinste Box, die beide Boxen umschließt.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Vereinigung beliebig vieler Boxen; `None` bei leerer Eingabe.
    pub fn union_all<'a>(boxes: impl IntoIterator<Item = &'a BBox>) -> Option<BBox> {
        boxes.into_iter().fold(None, |acc: Option<BBox>, b| {
            Some(acc.map_or(*b, |a| a.union(b)))
        })
    }

    /// Prüft, ob `other` vollständig innerhalb dieser Box liegt.
    pub fn contains(&self, other: &BBox) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && self.max.x >= other.max.x
            && self.max.y >= other.max.y
    }
}

impl std::fmt::Display for BBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "bbox {} {} {} {}",
            self.min.x, self.min.y, self.max.x, self.max.y
        )
    }
}
