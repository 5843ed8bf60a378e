use crate::types::{DrawOp, Surface};

use super::{Resolve, Z_PORTRAIT};

/// Character art of the speaker. Space cells are transparent.
#[derive(Debug, Clone, Copy)]
pub struct Portrait<'a> {
    pub surface: &'a Surface,
    pub x: u16,
    pub y: u16,
}

impl Resolve for Portrait<'_> {
    fn resolve(&self, ops: &mut Vec<DrawOp>) {
        for (j, row) in self.surface.cells.iter().enumerate() {
            for (i, cell) in row.iter().enumerate() {
                if cell.ch == ' ' && cell.style.bg.is_none() {
                    continue;
                }
                ops.push(DrawOp::new(
                    self.x + i as u16,
                    self.y + j as u16,
                    cell.ch,
                    &cell.style,
                    Z_PORTRAIT,
                ));
            }
        }
    }
}
