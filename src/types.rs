//! Shared boundary types for the dialog box.
//!
//! This module defines the data contracts between the pieces:
//! - Engine → Compositor (in-memory): `ResolvedScene` containing `DrawOp`s
//! - Compositor → Host: `Frame`s, optionally collected into a
//!   `PlayablePresentation` when a session is recorded
//!
//! `Surface` is the one grid type used everywhere: render target, backdrop
//! snapshot and glyph bitmap.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Shared style primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    Named(NamedColor),
    Rgb { r: u8, g: u8, b: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<Color>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub dim: bool,
}

impl Style {
    pub fn is_default(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && !self.bold && !self.dim
    }

    pub fn fg(color: Color) -> Self {
        Style {
            fg: Some(color),
            ..Default::default()
        }
    }

    pub fn bg(color: Color) -> Self {
        Style {
            bg: Some(color),
            ..Default::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Engine → Compositor boundary (in-memory only, never serialized)
// ---------------------------------------------------------------------------

/// How a draw op combines with the cell already underneath it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Blend {
    /// Write the character. A missing background keeps the one underneath.
    #[default]
    Replace,
    /// Keep the character underneath, apply this op's background and dim it.
    Tint,
}

#[derive(Debug, Clone)]
pub struct DrawOp {
    pub x: u16,
    pub y: u16,
    pub ch: char,
    pub style: Style,
    pub z_order: i32,
    pub blend: Blend,
}

impl DrawOp {
    pub fn new(x: u16, y: u16, ch: char, style: &Style, z_order: i32) -> Self {
        DrawOp {
            x,
            y,
            ch,
            style: style.clone(),
            z_order,
            blend: Blend::Replace,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedScene {
    pub width: u16,
    pub height: u16,
    pub ops: Vec<DrawOp>,
}

// ---------------------------------------------------------------------------
// Cells and surfaces
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalContract {
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub ch: char,
    #[serde(default, skip_serializing_if = "Style::is_default")]
    pub style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            ch: ' ',
            style: Style::default(),
        }
    }
}

/// A fixed-size grid of cells, addressed as `cells[y][x]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    pub width: u16,
    pub height: u16,
    pub cells: Vec<Vec<Cell>>,
}

impl Surface {
    pub fn new(width: u16, height: u16) -> Self {
        Surface {
            width,
            height,
            cells: vec![vec![Cell::default(); width as usize]; height as usize],
        }
    }

    pub fn for_contract(contract: TerminalContract) -> Self {
        Self::new(contract.width, contract.height)
    }

    /// Build a surface from text rows. Width is the longest row; short rows
    /// are padded with spaces.
    pub fn from_lines<S: AsRef<str>>(lines: &[S], style: &Style) -> Self {
        let width = lines
            .iter()
            .map(|l| l.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        let mut surface = Self::new(width as u16, lines.len() as u16);
        for (y, line) in lines.iter().enumerate() {
            for (x, ch) in line.as_ref().chars().enumerate() {
                surface.cells[y][x] = Cell {
                    ch,
                    style: style.clone(),
                };
            }
        }
        surface
    }

    pub fn contract(&self) -> TerminalContract {
        TerminalContract {
            width: self.width,
            height: self.height,
        }
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.cells.get(y as usize)?.get(x as usize)
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(slot) = self
            .cells
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            *slot = cell;
        }
    }

    pub fn fill(&mut self, cell: &Cell) {
        for row in &mut self.cells {
            for c in row.iter_mut() {
                *c = cell.clone();
            }
        }
    }

    /// The characters of row `y` as a string, trailing spaces trimmed.
    pub fn row_text(&self, y: u16) -> String {
        self.cells
            .get(y as usize)
            .map(|row| row.iter().map(|c| c.ch).collect::<String>())
            .unwrap_or_default()
            .trim_end()
            .to_string()
    }
}

// ---------------------------------------------------------------------------
// Compositor → Host boundary (serialized when a session is recorded)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChange {
    pub x: u16,
    pub y: u16,
    pub cell: Cell,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Frame {
    Full { cells: Vec<Vec<Cell>> },
    Diff { changes: Vec<CellChange> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marker {
    pub frame_index: usize,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayablePresentation {
    pub contract: TerminalContract,
    pub frames: Vec<Frame>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<Marker>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_lines_pads_short_rows() {
        let s = Surface::from_lines(&["ab", "c"], &Style::default());
        assert_eq!((s.width, s.height), (2, 2));
        assert_eq!(s.cells[1][1].ch, ' ');
        assert_eq!(s.row_text(1), "c");
    }

    #[test]
    fn set_outside_bounds_is_ignored() {
        let mut s = Surface::new(2, 2);
        s.set(5, 0, Cell { ch: 'x', style: Style::default() });
        assert!(s.cells.iter().flatten().all(|c| c.ch == ' '));
        assert!(s.get(5, 0).is_none());
    }
}
