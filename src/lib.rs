//! Dialog box text progression for terminal visual novels.
//!
//! Text blocks are revealed character by character inside a bordered box,
//! paginated when the box is full and advanced on player input, all drawn
//! over a frozen backdrop.

pub mod backdrop;
pub mod compositor;
pub mod config;
pub mod engine;
pub mod error;
pub mod glyphs;
pub mod logging;
pub mod menubar;
pub mod player;
pub mod script;
pub mod session;
pub mod types;
