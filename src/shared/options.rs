//! Laufzeit-Optionen des hOCR-Editors.
//!
//! `EditorOptions` wird als TOML neben der Binary abgelegt. Fehlende Felder
//! fallen auf die `const`-Defaults zurück.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Standard-Tiefe der Undo-History (Anzahl Schritte).
pub const HISTORY_LIMIT: usize = 200;

/// Dateiname der Optionen-Datei
pub const OPTIONS_FILE_NAME: &str = "hocr_editor.toml";

/// Alle zur Laufzeit änderbaren Editor-Optionen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    // ── History ─────────────────────────────────────────────────
    /// Maximale Anzahl Undo-Schritte (0 = unbegrenzt)
    pub history_limit: usize,

    // ── Editing ─────────────────────────────────────────────────
    /// Beim Löschen die Box verbleibender Parents an ihre Kinder anpassen
    pub fit_parent_bbox_on_delete: bool,
    /// Neu eingefügte Wörter selektieren
    pub select_inserted_nodes: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            history_limit: HISTORY_LIMIT,
            fit_parent_bbox_on_delete: true,
            select_inserted_nodes: false,
        }
    }
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei (Fallback auf Defaults).
    pub fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| PathBuf::from("hocr_editor"))
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(OPTIONS_FILE_NAME)
    }
}
