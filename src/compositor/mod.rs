//! Compositor — the deterministic rasterizer.
//!
//! Paints a `ResolvedScene` over a backdrop snapshot and turns the result
//! into presentable `Frame`s.
//!
//! Composition is pure: given the same backdrop and scene, it always produces
//! the same surface. The only state kept is the last presented grid, so that
//! frames after the first can be sent as diffs.

use crate::types::{Blend, Cell, CellChange, DrawOp, Frame, ResolvedScene, Surface};

#[derive(Debug, Default)]
pub struct Compositor {
    presented: Option<Surface>,
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rasterize `scene` on top of a copy of `backdrop`.
    ///
    /// Draw operations are sorted by z-order so that higher z values paint
    /// over lower ones; equal z values keep their emission order.
    pub fn compose(backdrop: &Surface, scene: &ResolvedScene) -> Surface {
        let mut surface = backdrop.clone();

        let mut ops: Vec<_> = scene.ops.iter().collect();
        ops.sort_by_key(|op| op.z_order);

        for op in ops {
            let x = op.x as usize;
            let y = op.y as usize;
            if let Some(cell) = surface.cells.get_mut(y).and_then(|row| row.get_mut(x)) {
                paint(cell, op);
            }
        }

        surface
    }

    /// The frame that brings the display from the last presented surface to
    /// `surface`. The first frame is always a full frame.
    pub fn present(&mut self, surface: &Surface) -> Frame {
        let frame = match &self.presented {
            Some(prev) if prev.contract() == surface.contract() => Frame::Diff {
                changes: Self::diff(&prev.cells, &surface.cells),
            },
            _ => Frame::Full {
                cells: surface.cells.clone(),
            },
        };
        self.presented = Some(surface.clone());
        frame
    }

    /// The surface last handed to `present`.
    pub fn presented(&self) -> Option<&Surface> {
        self.presented.as_ref()
    }

    /// Compute a cell-level diff between two grids.
    fn diff(prev: &[Vec<Cell>], next: &[Vec<Cell>]) -> Vec<CellChange> {
        let mut changes = Vec::new();
        for (y, (prev_row, next_row)) in prev.iter().zip(next.iter()).enumerate() {
            for (x, (prev_cell, next_cell)) in prev_row.iter().zip(next_row.iter()).enumerate() {
                if prev_cell != next_cell {
                    changes.push(CellChange {
                        x: x as u16,
                        y: y as u16,
                        cell: next_cell.clone(),
                    });
                }
            }
        }
        changes
    }
}

fn paint(cell: &mut Cell, op: &DrawOp) {
    match op.blend {
        Blend::Replace => {
            let bg = op.style.bg.clone().or_else(|| cell.style.bg.take());
            cell.ch = op.ch;
            cell.style = op.style.clone();
            cell.style.bg = bg;
        }
        Blend::Tint => {
            if op.style.bg.is_some() {
                cell.style.bg = op.style.bg.clone();
            }
            cell.style.dim = true;
        }
    }
}

/// Apply `frame` to `surface` in place, as a display would.
pub fn apply_frame(surface: &mut Surface, frame: &Frame) {
    match frame {
        Frame::Full { cells } => {
            surface.height = cells.len() as u16;
            surface.width = cells.first().map_or(0, |row| row.len() as u16);
            surface.cells = cells.clone();
        }
        Frame::Diff { changes } => {
            for change in changes {
                surface.set(change.x, change.y, change.cell.clone());
            }
        }
    }
}
