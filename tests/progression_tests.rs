/// Progression state machine tests — reveal, pagination and fast-forward
/// without any display.

use std::time::Duration;

use ascii_dialog::engine::block::TextBlock;
use ascii_dialog::engine::{DialogState, Progression, Signal};
use ascii_dialog::error::{Asset, DialogError};
use ascii_dialog::glyphs::{GlyphRenderer, PlainRenderer, RenderedText};
use ascii_dialog::types::Style;

const MS_10: Duration = Duration::from_millis(10);

fn numbered_block(lines: usize) -> TextBlock {
    let text: Vec<String> = (1..=lines).map(|i| format!("line {i}")).collect();
    TextBlock::new(text.join("\n"))
}

fn instant(lines_per_page: usize) -> Progression {
    Progression::new(Duration::ZERO, lines_per_page, Style::default())
}

/// Tick until the state leaves `Typing`.
fn type_out(p: &mut Progression) {
    let mut guard = 0;
    while p.state() == DialogState::Typing {
        p.tick(Duration::ZERO, &PlainRenderer);
        guard += 1;
        assert!(guard < 10_000, "progression stalled");
    }
}

struct BrokenFont;

impl GlyphRenderer for BrokenFont {
    fn render_text(&self, _text: &str, _style: &Style) -> Result<RenderedText, DialogError> {
        Err(DialogError::unavailable(Asset::Glyphs, "font file missing"))
    }
}

#[test]
fn page_flips_match_line_count_over_capacity() {
    for capacity in 1..=7 {
        for lines in 0..=20 {
            let mut p = instant(capacity);
            p.load(&numbered_block(lines), 0);

            let mut flips = 0;
            let mut guard = 0;
            while p.state() != DialogState::BlockDone {
                if p.state() == DialogState::LineFullAwaitingPage {
                    flips += 1;
                    assert_eq!(p.on_advance(), Signal::None);
                } else {
                    p.tick(Duration::ZERO, &PlainRenderer);
                }
                guard += 1;
                assert!(guard < 10_000, "stalled at {lines} lines / {capacity}");
            }

            let expected = lines.div_ceil(capacity).saturating_sub(1);
            assert_eq!(flips, expected, "{lines} lines, capacity {capacity}");
            assert_eq!(p.page_flips(), expected);
        }
    }
}

#[test]
fn eight_lines_on_six_line_pages() {
    let mut p = instant(6);
    p.load(&numbered_block(8), 0);

    type_out(&mut p);
    assert_eq!(p.state(), DialogState::LineFullAwaitingPage);
    assert!(p.frame().awaiting_advance);
    assert_eq!(
        p.visible_text(),
        vec!["line 1", "line 2", "line 3", "line 4", "line 5", "line 6"]
    );

    // Time alone never flips the page.
    for _ in 0..100 {
        p.tick(MS_10, &PlainRenderer);
    }
    assert_eq!(p.state(), DialogState::LineFullAwaitingPage);
    assert_eq!(p.page().len(), 6);

    p.on_advance();
    assert_eq!(p.state(), DialogState::Typing);
    assert!(p.page().is_empty());
    assert!(!p.frame().awaiting_advance);

    type_out(&mut p);
    assert_eq!(p.state(), DialogState::BlockDone);
    assert!(p.frame().awaiting_advance);
    assert_eq!(p.visible_text(), vec!["line 7", "line 8"]);
}

#[test]
fn characters_wait_for_the_delay() {
    let mut p = Progression::new(Duration::from_millis(30), 6, Style::default());
    p.load(&TextBlock::new("ab"), 0);

    p.tick(MS_10, &PlainRenderer);
    p.tick(MS_10, &PlainRenderer);
    assert!(p.visible_text().is_empty());
    p.tick(MS_10, &PlainRenderer);
    assert_eq!(p.visible_text(), vec!["a"]);
    assert_eq!(p.cursor().char_index, 1);

    // One commit per tick even when far more time has passed.
    p.tick(Duration::from_secs(5), &PlainRenderer);
    assert_eq!(p.visible_text(), vec!["ab"]);
    assert_eq!(p.state(), DialogState::BlockDone);
}

#[test]
fn fast_forward_reveals_every_character_of_the_line() {
    let mut p = Progression::new(Duration::from_millis(30), 6, Style::default());
    p.load(&TextBlock::new("hello\nworld"), 0);
    for _ in 0..3 {
        p.tick(MS_10, &PlainRenderer);
    }
    assert_eq!(p.visible_text(), vec!["h"]);

    assert_eq!(p.on_advance(), Signal::None);
    assert_eq!(p.state(), DialogState::Typing);

    let mut seen = Vec::new();
    while p.page().is_empty() {
        p.tick(MS_10, &PlainRenderer);
        seen.push(p.visible_text().concat());
    }
    assert_eq!(seen, vec!["he", "hel", "hell", "hello"]);

    // The next line types at the normal pace again.
    p.tick(MS_10, &PlainRenderer);
    p.tick(MS_10, &PlainRenderer);
    assert_eq!(p.visible_text(), vec!["hello"]);
    p.tick(MS_10, &PlainRenderer);
    assert_eq!(p.visible_text(), vec!["hello", "w"]);
}

#[test]
fn page_boundary_line_is_visible_before_pausing() {
    let mut p = instant(2);
    p.load(&TextBlock::new("ab\ncd\nef"), 0);
    for _ in 0..3 {
        p.tick(Duration::ZERO, &PlainRenderer);
    }
    assert_eq!(p.state(), DialogState::Typing);
    assert_eq!(p.visible_text(), vec!["ab", "c"]);
    p.tick(Duration::ZERO, &PlainRenderer);
    assert_eq!(p.state(), DialogState::LineFullAwaitingPage);
    assert_eq!(p.visible_text(), vec!["ab", "cd"]);
}

#[test]
fn multibyte_text_is_committed_per_character() {
    let mut p = instant(6);
    p.load(&TextBlock::new("Привет"), 0);
    p.tick(Duration::ZERO, &PlainRenderer);
    p.tick(Duration::ZERO, &PlainRenderer);
    assert_eq!(p.visible_text(), vec!["Пр"]);
    type_out(&mut p);
    assert_eq!(p.visible_text(), vec!["Привет"]);
}

#[test]
fn nothing_left_to_type_finishes_in_the_same_tick() {
    let mut p = instant(6);
    assert_eq!(p.state(), DialogState::Typing);
    p.tick(Duration::ZERO, &PlainRenderer);
    assert_eq!(p.state(), DialogState::BlockDone);
}

#[test]
fn finished_block_asks_for_the_next_one() {
    let mut p = instant(6);
    p.load(&TextBlock::new("x"), 3);
    type_out(&mut p);
    assert_eq!(p.cursor().block_index, 3);
    assert_eq!(p.on_advance(), Signal::BlockFinished);
    assert_eq!(p.state(), DialogState::BlockDone);

    p.close();
    assert_eq!(p.state(), DialogState::Closed);
    assert!(p.visible_text().is_empty());
    assert_eq!(p.on_advance(), Signal::None);
}

#[test]
fn broken_renderer_degrades_to_blank_lines() {
    let mut p = instant(6);
    p.load(&numbered_block(3), 0);
    let mut guard = 0;
    while p.state() == DialogState::Typing {
        p.tick(Duration::ZERO, &BrokenFont);
        guard += 1;
        assert!(guard < 1_000);
    }
    assert_eq!(p.state(), DialogState::BlockDone);
    assert_eq!(p.visible_text(), vec!["", "", ""]);
}
