use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

use crate::types::{Color, NamedColor};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DialogConfig {
    #[serde(default)]
    pub timing: Timing,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub palette: Palette,
    #[serde(default)]
    pub key_bindings: KeyBindings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timing {
    /// Delay between two revealed characters.
    #[serde(default = "default_char_delay_ms")]
    pub char_delay_ms: u64,
    /// Interval of the session loop.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

fn default_char_delay_ms() -> u64 { 30 }
fn default_tick_ms() -> u64 { 10 }

impl Default for Timing {
    fn default() -> Self {
        Timing {
            char_delay_ms: default_char_delay_ms(),
            tick_ms: default_tick_ms(),
        }
    }
}

impl Timing {
    pub fn char_delay(&self) -> Duration {
        Duration::from_millis(self.char_delay_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_lines_per_page")]
    pub lines_per_page: usize,
    /// Columns between the left border and the first character of a line.
    #[serde(default = "default_text_indent")]
    pub text_indent: u16,
}

fn default_lines_per_page() -> usize { 6 }
fn default_text_indent() -> u16 { 2 }

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            lines_per_page: default_lines_per_page(),
            text_indent: default_text_indent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Palette {
    #[serde(default = "default_panel")]
    pub panel: Color,
    #[serde(default = "default_white")]
    pub text: Color,
    #[serde(default = "default_white")]
    pub border: Color,
    #[serde(default = "default_indicator")]
    pub indicator: Color,
    /// Let the backdrop show through the panel, dimmed.
    #[serde(default = "default_translucent")]
    pub translucent: bool,
}

fn default_panel() -> Color { Color::Named(NamedColor::Blue) }
fn default_white() -> Color { Color::Named(NamedColor::White) }
fn default_indicator() -> Color { Color::Named(NamedColor::Yellow) }
fn default_translucent() -> bool { true }

impl Default for Palette {
    fn default() -> Self {
        Palette {
            panel: default_panel(),
            text: default_white(),
            border: default_white(),
            indicator: default_indicator(),
            translucent: default_translucent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(default = "default_advance")]
    pub advance: Vec<String>,
    #[serde(default = "default_close")]
    pub close: Vec<String>,
}

fn default_advance() -> Vec<String> { vec!["Enter".into(), "Space".into()] }
fn default_close() -> Vec<String> { vec!["Esc".into(), "q".into()] }

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            advance: default_advance(),
            close: default_close(),
        }
    }
}

impl DialogConfig {
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match std::fs::read_to_string(&config_path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(path = %config_path.display(), "invalid dialog config ({e}), using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn config_dir() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let mut path = PathBuf::from(home);
        path.push(".config");
        path.push("ascii-dialog");
        path
    }

    fn config_path() -> PathBuf {
        Self::config_dir().join("config.json")
    }
}

/// Check whether a crossterm `KeyEvent` matches a binding string from config.
pub fn matches_binding(binding: &str, event: &KeyEvent) -> bool {
    if let Some(rest) = binding.strip_prefix("Alt-") {
        if !event.modifiers.contains(KeyModifiers::ALT) {
            return false;
        }
        return match rest {
            "Enter" => event.code == KeyCode::Enter,
            other => match other.chars().next() {
                Some(c) => event.code == KeyCode::Char(c),
                None => false,
            },
        };
    }

    if let Some(rest) = binding.strip_prefix("Ctrl-") {
        if !event.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        return match rest.chars().next() {
            Some(c) => event.code == KeyCode::Char(c),
            None => false,
        };
    }

    // Plain bindings never fire while Ctrl or Alt is held.
    if event.modifiers.contains(KeyModifiers::CONTROL)
        || event.modifiers.contains(KeyModifiers::ALT)
    {
        return false;
    }

    match binding {
        "Right" => event.code == KeyCode::Right,
        "Left" => event.code == KeyCode::Left,
        "Up" => event.code == KeyCode::Up,
        "Down" => event.code == KeyCode::Down,
        "Enter" => event.code == KeyCode::Enter,
        "Esc" => event.code == KeyCode::Esc,
        "Space" => event.code == KeyCode::Char(' '),
        "Tab" => event.code == KeyCode::Tab,
        s => {
            if let Some(rest) = s.strip_prefix('F') {
                if let Ok(n) = rest.parse::<u8>() {
                    return event.code == KeyCode::F(n);
                }
            }
            match s.chars().next() {
                Some(c) => event.code == KeyCode::Char(c),
                None => false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn plain_binding_rejects_modifiers() {
        assert!(matches_binding("q", &key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(!matches_binding("q", &key(KeyCode::Char('q'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn named_and_prefixed_bindings() {
        assert!(matches_binding("Space", &key(KeyCode::Char(' '), KeyModifiers::NONE)));
        assert!(matches_binding("Ctrl-c", &key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(matches_binding("F2", &key(KeyCode::F(2), KeyModifiers::NONE)));
        assert!(!matches_binding("Alt-Enter", &key(KeyCode::Enter, KeyModifiers::NONE)));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: DialogConfig =
            serde_json::from_str(r#"{ "timing": { "char_delay_ms": 5 } }"#).unwrap();
        assert_eq!(config.timing.char_delay_ms, 5);
        assert_eq!(config.timing.tick_ms, 10);
        assert_eq!(config.layout.lines_per_page, 6);
        assert_eq!(config.key_bindings.advance, vec!["Enter", "Space"]);
    }
}
