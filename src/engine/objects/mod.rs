//! Dialog box layers and their resolve implementations.
//!
//! Each layer lives in its own module with its struct definition and
//! `Resolve` implementation side by side. `DialogBox` stacks them into one
//! `ResolvedScene` per frame.

mod indicator;
mod panel;
mod portrait;
mod text;

pub use indicator::Indicator;
pub use panel::{Border, Panel};
pub use portrait::Portrait;
pub use text::TextLayer;

use crate::config::{LayoutConfig, Palette};
use crate::types::{DrawOp, ResolvedScene, Style, Surface, TerminalContract};

use super::FrameDescription;

pub const Z_PANEL: i32 = 10;
pub const Z_BORDER: i32 = 20;
pub const Z_PORTRAIT: i32 = 30;
pub const Z_TEXT: i32 = 40;
pub const Z_PARTIAL: i32 = 50;
pub const Z_INDICATOR: i32 = 60;

/// Resolve a layer into concrete `DrawOp`s.
pub trait Resolve {
    fn resolve(&self, ops: &mut Vec<DrawOp>);
}

/// Where the box and its text area sit on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogLayout {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
    pub text_x: u16,
    pub text_y: u16,
    pub text_width: u16,
    pub text_rows: u16,
}

impl DialogLayout {
    /// Full-width box resting on the bottom edge, one row per page line plus
    /// the border.
    ///
    /// Both the box and the indent are clamped to the surface.
    pub fn new(contract: TerminalContract, layout: &LayoutConfig) -> Self {
        let rows = u16::try_from(layout.lines_per_page.max(1)).unwrap_or(u16::MAX);
        let height = rows.saturating_add(2).min(contract.height);
        let width = contract.width;
        let indent = layout.text_indent.min(width.saturating_sub(2));
        let x = 0;
        let y = contract.height - height;
        DialogLayout {
            x,
            y,
            width,
            height,
            text_x: x + 1 + indent,
            text_y: y + 1,
            text_width: width.saturating_sub(2 + indent),
            text_rows: height.saturating_sub(2),
        }
    }
}

/// The dialog box chrome plus whatever text the engine says is visible.
#[derive(Debug, Clone)]
pub struct DialogBox {
    contract: TerminalContract,
    layout: DialogLayout,
    palette: Palette,
    portrait: Option<Surface>,
}

impl DialogBox {
    pub fn new(contract: TerminalContract, layout: &LayoutConfig, palette: &Palette) -> Self {
        DialogBox {
            contract,
            layout: DialogLayout::new(contract, layout),
            palette: palette.clone(),
            portrait: None,
        }
    }

    pub fn set_portrait(&mut self, portrait: Surface) {
        self.portrait = Some(portrait);
    }

    pub fn layout(&self) -> &DialogLayout {
        &self.layout
    }

    /// Text style handed to the glyph renderer.
    pub fn text_style(&self) -> Style {
        Style::fg(self.palette.text.clone())
    }

    pub fn scene(&self, frame: &FrameDescription<'_>) -> ResolvedScene {
        let l = &self.layout;
        let mut ops = Vec::new();

        Panel {
            x: l.x,
            y: l.y,
            width: l.width,
            height: l.height,
            color: self.palette.panel.clone(),
            translucent: self.palette.translucent,
        }
        .resolve(&mut ops);

        Border {
            x: l.x,
            y: l.y,
            width: l.width,
            height: l.height,
            style: Style::fg(self.palette.border.clone()),
        }
        .resolve(&mut ops);

        if let Some(portrait) = &self.portrait {
            Portrait {
                surface: portrait,
                x: l.x + 2,
                y: l.y.saturating_sub(portrait.height),
            }
            .resolve(&mut ops);
        }

        TextLayer {
            lines: frame.page,
            partial: frame.partial,
            x: l.text_x,
            y: l.text_y,
            max_width: l.text_width,
            max_rows: l.text_rows,
        }
        .resolve(&mut ops);

        if frame.awaiting_advance {
            Indicator {
                x: (l.x + l.width).saturating_sub(4),
                y: l.y + l.height.saturating_sub(1),
                style: Style {
                    bold: true,
                    ..Style::fg(self.palette.indicator.clone())
                },
            }
            .resolve(&mut ops);
        }

        ResolvedScene {
            width: self.contract.width,
            height: self.contract.height,
            ops,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_sits_on_bottom_edge() {
        let l = DialogLayout::new(
            TerminalContract { width: 80, height: 24 },
            &LayoutConfig::default(),
        );
        assert_eq!((l.y, l.height), (16, 8));
        assert_eq!((l.text_x, l.text_y), (3, 17));
        assert_eq!(l.text_rows, 6);
    }

    #[test]
    fn layout_is_clamped_to_short_surfaces() {
        let l = DialogLayout::new(
            TerminalContract { width: 10, height: 4 },
            &LayoutConfig::default(),
        );
        assert_eq!((l.y, l.height, l.text_rows), (0, 4, 2));
    }

    #[test]
    fn huge_indent_is_clamped_to_the_box() {
        let config = LayoutConfig {
            text_indent: u16::MAX,
            lines_per_page: usize::MAX,
        };
        let l = DialogLayout::new(TerminalContract { width: 20, height: 6 }, &config);
        assert_eq!((l.text_x, l.text_width), (19, 0));
        assert_eq!((l.y, l.text_rows), (0, 4));
    }
}
