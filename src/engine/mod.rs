//! Engine — the text progression state machine.
//!
//! Owns the reveal cursor, the reveal timer and the page buffer for the block
//! being shown. It is driven from outside by `on_advance` (player input) and
//! `tick` (elapsed time), and describes what should be visible through
//! `frame`. It never draws, blocks or sleeps.

pub mod block;
pub mod objects;
pub mod timer;

use std::time::Duration;

use tracing::debug;

use crate::glyphs::{GlyphRenderer, RenderedText, render_or_placeholder};
use crate::types::Style;
use block::{Page, RevealCursor, TextBlock, char_prefix};
use timer::RevealTimer;

/// Logical player input, mapped from raw device events by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Advance,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    /// Characters are being revealed.
    Typing,
    /// The page is full; the indicator is shown until the player advances.
    LineFullAwaitingPage,
    /// Every line of the block is visible; waiting for the player to close it.
    BlockDone,
    /// Terminal.
    Closed,
}

impl DialogState {
    pub fn awaits_advance(self) -> bool {
        matches!(
            self,
            DialogState::LineFullAwaitingPage | DialogState::BlockDone
        )
    }
}

/// What an advance press asks of the owner of the block list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    None,
    /// The player dismissed a finished block.
    BlockFinished,
}

/// Everything the compositor needs to draw the text part of a frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameDescription<'a> {
    /// Completed lines of the current page, in slot order.
    pub page: &'a [RenderedText],
    /// The committed part of the line being typed.
    pub partial: Option<&'a RenderedText>,
    pub awaiting_advance: bool,
}

#[derive(Debug, Clone)]
pub struct Progression {
    lines: Vec<String>,
    cursor: RevealCursor,
    timer: RevealTimer,
    page: Page,
    partial: Option<RenderedText>,
    state: DialogState,
    page_flips: usize,
    style: Style,
    /// The renderer already failed on the current line.
    warned: bool,
}

impl Progression {
    pub fn new(char_delay: Duration, lines_per_page: usize, style: Style) -> Self {
        Progression {
            lines: Vec::new(),
            cursor: RevealCursor::default(),
            timer: RevealTimer::new(char_delay),
            page: Page::new(lines_per_page),
            partial: None,
            state: DialogState::Typing,
            page_flips: 0,
            style,
            warned: false,
        }
    }

    /// Start revealing `block` from its first character on a fresh page.
    pub fn load(&mut self, block: &TextBlock, block_index: usize) {
        self.lines = block.lines().map(str::to_owned).collect();
        self.cursor = RevealCursor::at_block(block_index);
        self.timer.reset();
        self.page.clear();
        self.partial = None;
        self.page_flips = 0;
        self.warned = false;
        self.state = DialogState::Typing;
        debug!(block_index, lines = self.lines.len(), "block loaded");
        self.settle();
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn cursor(&self) -> RevealCursor {
        self.cursor
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Page-full pauses entered since the block was loaded.
    pub fn page_flips(&self) -> usize {
        self.page_flips
    }

    pub fn frame(&self) -> FrameDescription<'_> {
        FrameDescription {
            page: self.page.lines(),
            partial: self.partial.as_ref(),
            awaiting_advance: self.state.awaits_advance(),
        }
    }

    /// Text currently visible in the box, one entry per row.
    pub fn visible_text(&self) -> Vec<String> {
        self.page
            .lines()
            .iter()
            .chain(self.partial.as_ref())
            .map(RenderedText::text)
            .collect()
    }

    pub fn on_advance(&mut self) -> Signal {
        match self.state {
            DialogState::Typing => {
                if !self.timer.is_fast_forward() {
                    debug!(line = self.cursor.line_index, "fast-forwarding line");
                }
                self.timer.fast_forward();
                Signal::None
            }
            DialogState::LineFullAwaitingPage => {
                self.page.clear();
                self.partial = None;
                self.timer.reset();
                self.state = DialogState::Typing;
                debug!(line = self.cursor.line_index, "page flipped");
                self.settle();
                Signal::None
            }
            DialogState::BlockDone => Signal::BlockFinished,
            DialogState::Closed => Signal::None,
        }
    }

    /// Let `dt` pass; commits at most one character.
    pub fn tick(&mut self, dt: Duration, renderer: &dyn GlyphRenderer) {
        if self.state != DialogState::Typing {
            return;
        }
        self.timer.accumulate(dt);
        self.settle();
        if self.state == DialogState::Typing && self.timer.is_ready() {
            self.commit(renderer);
        }
    }

    pub fn close(&mut self) {
        self.page.clear();
        self.partial = None;
        self.state = DialogState::Closed;
    }

    /// Nothing left to type means the block is done now, not next tick.
    fn settle(&mut self) {
        if self.state == DialogState::Typing && self.cursor.line_index >= self.lines.len() {
            self.state = DialogState::BlockDone;
            debug!(block_index = self.cursor.block_index, "block done");
        }
    }

    fn commit(&mut self, renderer: &dyn GlyphRenderer) {
        let line = &self.lines[self.cursor.line_index];
        let len = line.chars().count();
        if self.cursor.char_index < len {
            self.cursor.char_index += 1;
            self.partial = Some(render_or_placeholder(
                renderer,
                char_prefix(line, self.cursor.char_index),
                &self.style,
                &mut self.warned,
            ));
        }
        self.timer.restart();
        if self.cursor.char_index >= len {
            self.flush_line(renderer);
        }
    }

    fn flush_line(&mut self, renderer: &dyn GlyphRenderer) {
        let rendered = match self.partial.take() {
            Some(rendered) => rendered,
            // Only an empty line completes without a committed character.
            None => render_or_placeholder(renderer, "", &self.style, &mut self.warned),
        };
        self.page.push(rendered);
        self.cursor.next_line();
        self.warned = false;
        self.timer.reset();

        if self.cursor.line_index >= self.lines.len() {
            self.settle();
        } else if self.page.is_full() {
            self.state = DialogState::LineFullAwaitingPage;
            self.page_flips += 1;
            debug!(line = self.cursor.line_index, "page full");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::glyphs::PlainRenderer;

    #[test]
    fn zero_line_block_is_done_on_load() {
        let mut p = Progression::new(Duration::from_millis(30), 6, Style::default());
        p.load(&TextBlock::new(""), 0);
        assert_eq!(p.state(), DialogState::BlockDone);
        assert!(p.frame().awaiting_advance);
    }

    #[test]
    fn empty_line_takes_one_commit() {
        let mut p = Progression::new(Duration::ZERO, 6, Style::default());
        p.load(&TextBlock::new("\nx"), 0);
        p.tick(Duration::ZERO, &PlainRenderer);
        assert_eq!(p.page().len(), 1);
        assert_eq!(p.cursor().line_index, 1);
        p.tick(Duration::ZERO, &PlainRenderer);
        assert_eq!(p.state(), DialogState::BlockDone);
        assert_eq!(p.visible_text(), vec!["", "x"]);
    }

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn rejected_line_warns_once() {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut p = Progression::new(Duration::ZERO, 6, Style::default());
            p.load(&TextBlock::new("ding\u{7}dong\nding\u{7}"), 0);
            while p.state() == DialogState::Typing {
                p.tick(Duration::ZERO, &PlainRenderer);
            }
            assert_eq!(p.visible_text(), vec!["", ""]);
        });

        let log = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert_eq!(log.matches("drawing a blank line").count(), 2);
    }
}
