//! Glyph rendering capability.
//!
//! The engine never draws characters itself: it asks a `GlyphRenderer` for a
//! bitmap of the text it wants to show and hands that bitmap to the
//! compositor. Any backend (plain cells, big block fonts, a test double) can
//! stand behind the trait.

use crate::error::{Asset, DialogError};
use crate::types::{Cell, Style, Surface};

/// Width and height of a rendered bitmap, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedText {
    pub bitmap: Surface,
    pub bounds: Bounds,
}

impl RenderedText {
    pub fn new(bitmap: Surface) -> Self {
        let bounds = Bounds {
            width: bitmap.width,
            height: bitmap.height,
        };
        RenderedText { bitmap, bounds }
    }

    /// Blank one-row stand-in used when a renderer fails.
    pub fn placeholder() -> Self {
        Self::new(Surface::new(0, 1))
    }

    /// The rendered characters of the first row.
    pub fn text(&self) -> String {
        self.bitmap.row_text(0)
    }
}

pub trait GlyphRenderer {
    fn render_text(&self, text: &str, style: &Style) -> Result<RenderedText, DialogError>;
}

/// Columns a tab expands to.
const TAB_WIDTH: usize = 4;

/// One cell per character, one row per string.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl GlyphRenderer for PlainRenderer {
    fn render_text(&self, text: &str, style: &Style) -> Result<RenderedText, DialogError> {
        let mut row = Vec::with_capacity(text.len());
        for ch in text.chars() {
            match ch {
                '\t' => row.extend(std::iter::repeat_n(' ', TAB_WIDTH)),
                c if c.is_control() => {
                    return Err(DialogError::unavailable(
                        Asset::Glyphs,
                        format!("no glyph for U+{:04X}", c as u32),
                    ));
                }
                c => row.push(c),
            }
        }

        let mut bitmap = Surface::new(row.len() as u16, 1);
        for (x, ch) in row.into_iter().enumerate() {
            bitmap.cells[0][x] = Cell {
                ch,
                style: style.clone(),
            };
        }
        Ok(RenderedText::new(bitmap))
    }
}

/// Render `text`, substituting a blank placeholder if the renderer fails.
///
/// Only the first failure is logged while `warned` stays set, so a line that
/// is re-rendered on every commit warns once.
pub fn render_or_placeholder(
    renderer: &dyn GlyphRenderer,
    text: &str,
    style: &Style,
    warned: &mut bool,
) -> RenderedText {
    match renderer.render_text(text, style) {
        Ok(rendered) => rendered,
        Err(e) => {
            if !*warned {
                tracing::warn!(text, "{e}; drawing a blank line instead");
                *warned = true;
            }
            RenderedText::placeholder()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_renderer_expands_tabs() {
        let r = PlainRenderer.render_text("a\tb", &Style::default()).unwrap();
        assert_eq!(r.bounds, Bounds { width: 6, height: 1 });
        assert_eq!(r.text(), "a    b");
    }

    #[test]
    fn control_characters_fall_back_to_placeholder() {
        assert!(PlainRenderer.render_text("bell\u{7}", &Style::default()).is_err());
        let mut warned = false;
        let r = render_or_placeholder(
            &PlainRenderer,
            "bell\u{7}",
            &Style::default(),
            &mut warned,
        );
        assert_eq!(r.bounds.width, 0);
        assert!(warned);
    }
}
