use crate::types::{DrawOp, Style};

use super::{Resolve, Z_INDICATOR};

pub const INDICATOR_CH: char = '▼';

/// Shown while the box waits for the player to advance.
#[derive(Debug, Clone)]
pub struct Indicator {
    pub x: u16,
    pub y: u16,
    pub style: Style,
}

impl Resolve for Indicator {
    fn resolve(&self, ops: &mut Vec<DrawOp>) {
        ops.push(DrawOp::new(self.x, self.y, INDICATOR_CH, &self.style, Z_INDICATOR));
    }
}
