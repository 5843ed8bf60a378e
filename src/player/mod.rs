//! Player — hosts that a dialog session runs in.
//!
//! `TerminalHost` drives a real terminal: keys in, frames out, wall-clock
//! time. `RecordingHost` drives a session headlessly and keeps every frame.
//! Neither interprets dialog semantics; they only move inputs and frames.

pub mod record;

pub use record::RecordingHost;

use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, event, execute, queue, style, terminal};

use crate::config::{KeyBindings, matches_binding};
use crate::engine::Input;
use crate::menubar::print_menu_item;
use crate::session::Host;
use crate::types::{Color, Frame, NamedColor, Style, Surface, TerminalContract};

pub struct TerminalHost {
    stdout: io::Stdout,
    contract: TerminalContract,
    bindings: KeyBindings,
    /// Mirror of what is on screen, used to repaint after a resize.
    screen: Surface,
    last_wait: Instant,
    active: bool,
}

impl TerminalHost {
    pub fn new(contract: TerminalContract, bindings: KeyBindings) -> Self {
        Self {
            stdout: io::stdout(),
            contract,
            bindings,
            screen: Surface::for_contract(contract),
            last_wait: Instant::now(),
            active: false,
        }
    }

    /// Switch the terminal into dialog mode.
    ///
    /// Call `leave` afterwards, also on error paths.
    pub fn enter(&mut self) -> Result<()> {
        let (term_w, term_h) = terminal::size()?;
        let need_w = self.contract.width;
        let need_h = self.contract.height;
        // +1: one row for the key hints
        if term_w < need_w || term_h < need_h + 1 {
            bail!(
                "Terminal too small: need {}x{}, have {}x{}",
                need_w,
                need_h + 1,
                term_w,
                term_h,
            );
        }

        terminal::enable_raw_mode()?;
        self.active = true;
        execute!(
            self.stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;
        self.render_hints()?;
        self.last_wait = Instant::now();
        Ok(())
    }

    pub fn leave(&mut self) {
        if !self.active {
            return;
        }
        let _ = execute!(self.stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        self.active = false;
    }

    fn map_key(&self, key: &KeyEvent) -> Option<Input> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Input::Close);
        }
        if self.bindings.close.iter().any(|b| matches_binding(b, key)) {
            return Some(Input::Close);
        }
        if self.bindings.advance.iter().any(|b| matches_binding(b, key)) {
            return Some(Input::Advance);
        }
        None
    }

    // -----------------------------------------------------------------------
    // Terminal output
    // -----------------------------------------------------------------------

    fn render_hints(&mut self) -> Result<()> {
        let advance = self.bindings.advance.join("][");
        let close = self.bindings.close.join("][");
        let items = [format!("[{advance}] next"), format!("[{close}] close")];

        queue!(
            self.stdout,
            cursor::MoveTo(0, self.contract.height),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::Print(" "),
        )?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                queue!(self.stdout, style::Print("  "))?;
            }
            print_menu_item(&mut self.stdout, item)?;
        }
        self.stdout.flush()?;
        Ok(())
    }

    fn render_full(&mut self) -> Result<()> {
        for (y, row) in self.screen.cells.iter().enumerate() {
            queue!(self.stdout, cursor::MoveTo(0, y as u16))?;
            for cell in row {
                let cs = to_content_style(&cell.style);
                queue!(
                    self.stdout,
                    style::PrintStyledContent(style::StyledContent::new(cs, cell.ch))
                )?;
            }
        }
        self.stdout.flush()?;
        Ok(())
    }

    fn render_diff(&mut self, frame: &Frame) -> Result<()> {
        match frame {
            Frame::Diff { changes } => {
                for change in changes {
                    let cs = to_content_style(&change.cell.style);
                    queue!(
                        self.stdout,
                        cursor::MoveTo(change.x, change.y),
                        style::PrintStyledContent(style::StyledContent::new(cs, change.cell.ch)),
                    )?;
                }
                self.stdout.flush()?;
            }
            Frame::Full { .. } => self.render_full()?,
        }
        Ok(())
    }
}

impl Drop for TerminalHost {
    fn drop(&mut self) {
        self.leave();
    }
}

impl Host for TerminalHost {
    fn poll_inputs(&mut self) -> Result<Vec<Input>> {
        let mut inputs = Vec::new();
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                event::Event::Key(key) => inputs.extend(self.map_key(&key)),
                event::Event::Resize(_, _) => {
                    execute!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
                    self.render_full()?;
                    self.render_hints()?;
                }
                _ => {}
            }
        }
        Ok(inputs)
    }

    fn present(&mut self, frame: &Frame) -> Result<()> {
        crate::compositor::apply_frame(&mut self.screen, frame);
        self.render_diff(frame)
    }

    fn wait(&mut self, tick: Duration) -> Duration {
        let busy = self.last_wait.elapsed();
        if busy < tick {
            thread::sleep(tick - busy);
        }
        let now = Instant::now();
        let dt = now - self.last_wait;
        self.last_wait = now;
        dt
    }
}

// ---------------------------------------------------------------------------
// Style conversion
// ---------------------------------------------------------------------------

pub fn to_content_style(s: &Style) -> style::ContentStyle {
    let mut cs = style::ContentStyle::default();
    if let Some(fg) = &s.fg {
        cs.foreground_color = Some(to_ct_color(fg));
    }
    if let Some(bg) = &s.bg {
        cs.background_color = Some(to_ct_color(bg));
    }
    if s.bold {
        cs.attributes.set(style::Attribute::Bold);
    }
    if s.dim {
        cs.attributes.set(style::Attribute::Dim);
    }
    cs
}

pub fn to_ct_color(c: &Color) -> style::Color {
    match c {
        Color::Named(n) => match n {
            NamedColor::Black => style::Color::Black,
            NamedColor::Red => style::Color::Red,
            NamedColor::Green => style::Color::Green,
            NamedColor::Yellow => style::Color::Yellow,
            NamedColor::Blue => style::Color::Blue,
            NamedColor::Magenta => style::Color::Magenta,
            NamedColor::Cyan => style::Color::Cyan,
            NamedColor::White => style::Color::White,
        },
        Color::Rgb { r, g, b } => style::Color::Rgb {
            r: *r,
            g: *g,
            b: *b,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> TerminalHost {
        TerminalHost::new(
            TerminalContract { width: 10, height: 5 },
            KeyBindings::default(),
        )
    }

    #[test]
    fn keys_map_to_logical_inputs() {
        let h = host();
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(h.map_key(&press(KeyCode::Enter)), Some(Input::Advance));
        assert_eq!(h.map_key(&press(KeyCode::Char(' '))), Some(Input::Advance));
        assert_eq!(h.map_key(&press(KeyCode::Esc)), Some(Input::Close));
        assert_eq!(h.map_key(&press(KeyCode::Char('x'))), None);
        assert_eq!(
            h.map_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Input::Close)
        );
    }

    #[test]
    fn styles_convert_to_crossterm() {
        let cs = to_content_style(&Style {
            bg: Some(Color::Rgb { r: 1, g: 2, b: 3 }),
            dim: true,
            ..Default::default()
        });
        assert_eq!(cs.background_color, Some(style::Color::Rgb { r: 1, g: 2, b: 3 }));
        assert!(cs.attributes.has(style::Attribute::Dim));
        assert_eq!(cs.foreground_color, None);
    }
}
