use crate::glyphs::RenderedText;
use crate::types::{DrawOp, Surface};

use super::{Resolve, Z_PARTIAL, Z_TEXT};

/// Completed lines of the page, each in its own slot, followed by the line
/// being typed. Everything is clipped to the text area.
#[derive(Debug, Clone, Copy)]
pub struct TextLayer<'a> {
    pub lines: &'a [RenderedText],
    pub partial: Option<&'a RenderedText>,
    pub x: u16,
    pub y: u16,
    pub max_width: u16,
    pub max_rows: u16,
}

impl TextLayer<'_> {
    fn blit(&self, bitmap: &Surface, slot: u16, z_order: i32, ops: &mut Vec<DrawOp>) {
        for (j, row) in bitmap.cells.iter().enumerate() {
            let row_y = slot + j as u16;
            if row_y >= self.max_rows {
                return;
            }
            for (i, cell) in row.iter().enumerate().take(self.max_width as usize) {
                ops.push(DrawOp::new(
                    self.x + i as u16,
                    self.y + row_y,
                    cell.ch,
                    &cell.style,
                    z_order,
                ));
            }
        }
    }
}

impl Resolve for TextLayer<'_> {
    fn resolve(&self, ops: &mut Vec<DrawOp>) {
        for (slot, line) in self.lines.iter().enumerate() {
            self.blit(&line.bitmap, slot as u16, Z_TEXT, ops);
        }
        if let Some(partial) = self.partial {
            self.blit(&partial.bitmap, self.lines.len() as u16, Z_PARTIAL, ops);
        }
    }
}
