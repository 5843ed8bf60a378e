use crate::types::{Blend, Color, DrawOp, Style};

use super::{Resolve, Z_BORDER, Z_PANEL};

/// The box background. Translucent panels tint the backdrop instead of
/// covering it.
#[derive(Debug, Clone)]
pub struct Panel {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
    pub color: Color,
    pub translucent: bool,
}

impl Resolve for Panel {
    fn resolve(&self, ops: &mut Vec<DrawOp>) {
        let style = Style::bg(self.color.clone());
        let blend = if self.translucent { Blend::Tint } else { Blend::Replace };
        for j in 0..self.height {
            for i in 0..self.width {
                ops.push(DrawOp {
                    blend,
                    ..DrawOp::new(self.x + i, self.y + j, ' ', &style, Z_PANEL)
                });
            }
        }
    }
}

/// Single-line outline around the panel.
#[derive(Debug, Clone)]
pub struct Border {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
    pub style: Style,
}

impl Resolve for Border {
    fn resolve(&self, ops: &mut Vec<DrawOp>) {
        let (x, y, w, h) = (self.x, self.y, self.width, self.height);
        if w < 2 || h < 2 {
            return;
        }
        let s = &self.style;
        let z = Z_BORDER;

        ops.push(DrawOp::new(x,         y,         '┌', s, z));
        ops.push(DrawOp::new(x + w - 1, y,         '┐', s, z));
        ops.push(DrawOp::new(x,         y + h - 1, '└', s, z));
        ops.push(DrawOp::new(x + w - 1, y + h - 1, '┘', s, z));
        for i in 1..w - 1 {
            ops.push(DrawOp::new(x + i, y,         '─', s, z));
            ops.push(DrawOp::new(x + i, y + h - 1, '─', s, z));
        }
        for j in 1..h - 1 {
            ops.push(DrawOp::new(x,         y + j, '│', s, z));
            ops.push(DrawOp::new(x + w - 1, y + j, '│', s, z));
        }
    }
}
