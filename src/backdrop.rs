//! Backdrop capability: whatever the surrounding scene shows behind the box.

use std::path::PathBuf;

use crate::error::{Asset, DialogError};
use crate::types::{Cell, Color, NamedColor, Style, Surface, TerminalContract};

pub trait Backdrop {
    fn paint(&self, surface: &mut Surface) -> Result<(), DialogError>;
}

/// Fills every cell with a background colour.
#[derive(Debug, Clone)]
pub struct SolidBackdrop {
    pub color: Color,
}

impl Default for SolidBackdrop {
    fn default() -> Self {
        SolidBackdrop {
            color: Color::Named(NamedColor::Black),
        }
    }
}

impl SolidBackdrop {
    fn cell(&self) -> Cell {
        Cell {
            ch: ' ',
            style: Style::bg(self.color.clone()),
        }
    }
}

impl Backdrop for SolidBackdrop {
    fn paint(&self, surface: &mut Surface) -> Result<(), DialogError> {
        surface.fill(&self.cell());
        Ok(())
    }
}

/// Text art read from a file, drawn from the top-left corner and clipped.
#[derive(Debug, Clone)]
pub struct ArtBackdrop {
    pub path: PathBuf,
    pub style: Style,
}

impl Backdrop for ArtBackdrop {
    fn paint(&self, surface: &mut Surface) -> Result<(), DialogError> {
        let art = std::fs::read_to_string(&self.path).map_err(|e| {
            DialogError::unavailable(Asset::Backdrop, format!("{}: {e}", self.path.display()))
        })?;
        for (y, line) in art.lines().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                if ch.is_control() {
                    continue;
                }
                surface.set(
                    x as u16,
                    y as u16,
                    Cell {
                        ch,
                        style: self.style.clone(),
                    },
                );
            }
        }
        Ok(())
    }
}

/// A previously captured screen used as-is.
impl Backdrop for Surface {
    fn paint(&self, surface: &mut Surface) -> Result<(), DialogError> {
        for (y, row) in self.cells.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                surface.set(x as u16, y as u16, cell.clone());
            }
        }
        Ok(())
    }
}

/// Paint `backdrop` onto a fresh surface of the contract's size.
///
/// A failing backdrop is replaced by a solid black one.
pub fn paint_backdrop(backdrop: &dyn Backdrop, contract: TerminalContract) -> Surface {
    let mut surface = Surface::for_contract(contract);
    if let Err(e) = backdrop.paint(&mut surface) {
        tracing::warn!("{e}; using a solid backdrop");
        surface = Surface::for_contract(contract);
        surface.fill(&SolidBackdrop::default().cell());
    }
    surface
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_art_falls_back_to_solid() {
        let art = ArtBackdrop {
            path: PathBuf::from("/nonexistent/backdrop.txt"),
            style: Style::default(),
        };
        let contract = TerminalContract { width: 4, height: 2 };
        let surface = paint_backdrop(&art, contract);
        assert!(surface.cells.iter().flatten().all(|c| {
            c.ch == ' ' && c.style.bg == Some(Color::Named(NamedColor::Black))
        }));
    }

    #[test]
    fn snapshot_backdrop_is_clipped() {
        let snapshot = Surface::from_lines(&["abcdef"], &Style::default());
        let surface = paint_backdrop(&snapshot, TerminalContract { width: 3, height: 1 });
        assert_eq!(surface.row_text(0), "abc");
    }
}
