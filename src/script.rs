//! Dialog script — the file format the CLI plays.
//!
//! A script lists the blocks to show and optionally names a backdrop and a
//! portrait, both plain text art files relative to the script.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::backdrop::{ArtBackdrop, Backdrop, SolidBackdrop};
use crate::engine::block::TextBlock;
use crate::error::{Asset, DialogError};
use crate::types::{Style, Surface, TerminalContract};

fn default_width() -> u16 { 80 }
fn default_height() -> u16 { 24 }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogScript {
    #[serde(default = "default_width")]
    pub width: u16,
    #[serde(default = "default_height")]
    pub height: u16,
    pub blocks: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portrait: Option<PathBuf>,
}

/// A script together with the directory its paths are relative to.
#[derive(Debug, Clone)]
pub struct LoadedScript {
    pub script: DialogScript,
    pub base_dir: PathBuf,
}

impl DialogScript {
    pub fn load(path: &Path) -> Result<LoadedScript> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let script: DialogScript = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(LoadedScript { script, base_dir })
    }

    pub fn contract(&self) -> TerminalContract {
        TerminalContract {
            width: self.width,
            height: self.height,
        }
    }

    pub fn text_blocks(&self) -> Vec<TextBlock> {
        self.blocks.iter().map(|b| TextBlock::new(b.as_str())).collect()
    }
}

impl LoadedScript {
    pub fn backdrop(&self) -> Box<dyn Backdrop> {
        match &self.script.backdrop {
            Some(path) => Box::new(ArtBackdrop {
                path: self.base_dir.join(path),
                style: Style::default(),
            }),
            None => Box::new(SolidBackdrop::default()),
        }
    }

    /// The portrait art, or `None` when there is none or it cannot be read.
    pub fn portrait(&self) -> Option<Surface> {
        let path = self.base_dir.join(self.script.portrait.as_ref()?);
        match read_art(&path) {
            Ok(surface) => Some(surface),
            Err(e) => {
                tracing::warn!("{e}; showing the dialog without a portrait");
                None
            }
        }
    }
}

fn read_art(path: &Path) -> Result<Surface, DialogError> {
    let art = fs::read_to_string(path).map_err(|e| {
        DialogError::unavailable(Asset::Portrait, format!("{}: {e}", path.display()))
    })?;
    let lines: Vec<&str> = art.lines().collect();
    Ok(Surface::from_lines(&lines, &Style::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_script_uses_defaults() {
        let script: DialogScript = serde_json::from_str(r#"{ "blocks": ["Hi"] }"#).unwrap();
        assert_eq!(script.contract(), TerminalContract { width: 80, height: 24 });
        assert_eq!(script.text_blocks(), vec![TextBlock::new("Hi")]);
        assert!(script.backdrop.is_none());
    }

    #[test]
    fn unreadable_portrait_is_dropped() {
        let loaded = LoadedScript {
            script: DialogScript {
                width: 80,
                height: 24,
                blocks: vec![],
                backdrop: None,
                portrait: Some(PathBuf::from("missing-portrait.txt")),
            },
            base_dir: PathBuf::from("/nonexistent"),
        };
        assert!(loaded.portrait().is_none());
    }
}
