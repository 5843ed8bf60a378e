//! Dialog session — the public facade.
//!
//! A session owns the blocks to show, the progression state machine and the
//! compositor. `advance` is the whole engine in one non-blocking tick;
//! `run` is a convenience loop that drives `advance` from a `Host`.

use std::time::Duration;

use anyhow::Result;
use tracing::{debug, error, info, warn};

use crate::compositor::Compositor;
use crate::config::DialogConfig;
use crate::engine::block::TextBlock;
use crate::engine::objects::DialogBox;
use crate::engine::{DialogState, Input, Progression, Signal};
use crate::glyphs::{GlyphRenderer, PlainRenderer};
use crate::types::{Frame, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Finished(Outcome),
}

/// Result of one tick.
#[derive(Debug, Clone)]
pub struct Step {
    pub status: Status,
    /// What to present, if anything changed hands this tick.
    pub frame: Option<Frame>,
}

/// The environment a session runs in: where input comes from, where frames
/// go and how time passes.
pub trait Host {
    /// All logical inputs that arrived since the last call, in order.
    fn poll_inputs(&mut self) -> Result<Vec<Input>>;
    fn present(&mut self, frame: &Frame) -> Result<()>;
    /// Wait roughly `tick` and report how much time actually passed.
    fn wait(&mut self, tick: Duration) -> Duration;
    /// Block `index` is about to be shown.
    fn on_block(&mut self, _index: usize) {}
}

pub struct Session {
    blocks: Vec<TextBlock>,
    block_index: usize,
    progression: Progression,
    dialog: DialogBox,
    compositor: Compositor,
    renderer: Box<dyn GlyphRenderer>,
    backdrop: Surface,
    tick: Duration,
    outcome: Option<Outcome>,
    pending: Option<Frame>,
}

impl Session {
    /// Prepare a session over `blocks`, drawn on top of `backdrop`.
    ///
    /// Blocks without any line are skipped. Without content the session is
    /// already completed and will never present anything.
    pub fn begin(
        blocks: impl IntoIterator<Item = TextBlock>,
        backdrop: Surface,
        config: &DialogConfig,
    ) -> Self {
        let blocks: Vec<TextBlock> = blocks
            .into_iter()
            .filter(|block| {
                if block.is_empty() {
                    debug!("skipping block without lines");
                }
                !block.is_empty()
            })
            .collect();

        let dialog = DialogBox::new(backdrop.contract(), &config.layout, &config.palette);
        // A page never holds more lines than the box can show.
        let visible_rows = usize::from(dialog.layout().text_rows);
        let lines_per_page = config.layout.lines_per_page.min(visible_rows).max(1);
        if lines_per_page < config.layout.lines_per_page {
            warn!(
                configured = config.layout.lines_per_page,
                lines_per_page, "surface too short for the configured page size"
            );
        }
        let mut progression = Progression::new(
            config.timing.char_delay(),
            lines_per_page,
            dialog.text_style(),
        );

        let outcome = match blocks.first() {
            Some(first) => {
                progression.load(first, 0);
                info!(blocks = blocks.len(), "dialog session started");
                None
            }
            None => {
                info!("no dialog content, nothing to show");
                progression.close();
                Some(Outcome::Completed)
            }
        };

        Session {
            blocks,
            block_index: 0,
            progression,
            dialog,
            compositor: Compositor::new(),
            renderer: Box::new(PlainRenderer),
            backdrop,
            tick: config.timing.tick(),
            outcome,
            pending: None,
        }
    }

    pub fn with_renderer(mut self, renderer: Box<dyn GlyphRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_portrait(mut self, portrait: Surface) -> Self {
        self.dialog.set_portrait(portrait);
        self
    }

    pub fn state(&self) -> DialogState {
        self.progression.state()
    }

    pub fn block_index(&self) -> usize {
        self.block_index
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn backdrop(&self) -> &Surface {
        &self.backdrop
    }

    /// The surface most recently turned into a frame.
    pub fn screen(&self) -> Option<&Surface> {
        self.compositor.presented()
    }

    /// One tick: apply `inputs` in order, let `dt` pass, compose.
    pub fn advance(&mut self, dt: Duration, inputs: &[Input]) -> Step {
        if let Some(outcome) = self.outcome {
            return Step {
                status: Status::Finished(outcome),
                frame: self.pending.take(),
            };
        }

        for input in inputs {
            match input {
                Input::Close => {
                    self.cancel();
                    break;
                }
                Input::Advance => {
                    if self.progression.on_advance() == Signal::BlockFinished {
                        self.next_block();
                    }
                }
            }
            if self.outcome.is_some() {
                break;
            }
        }

        if let Some(outcome) = self.outcome {
            return Step {
                status: Status::Finished(outcome),
                frame: self.pending.take(),
            };
        }

        self.progression.tick(dt, self.renderer.as_ref());
        let scene = self.dialog.scene(&self.progression.frame());
        let surface = Compositor::compose(&self.backdrop, &scene);
        Step {
            status: Status::Running,
            frame: Some(self.compositor.present(&surface)),
        }
    }

    /// Close immediately, dropping the page, and queue a frame that puts the
    /// backdrop back.
    pub fn cancel(&mut self) {
        if self.outcome.is_some() {
            return;
        }
        self.finish(Outcome::Cancelled);
    }

    /// Drive the session from `host` until it is closed.
    pub fn run<H: Host + ?Sized>(&mut self, host: &mut H) -> Outcome {
        let mut announced = None;
        let mut dt = Duration::ZERO;
        loop {
            if self.outcome.is_none() && announced != Some(self.block_index) {
                host.on_block(self.block_index);
                announced = Some(self.block_index);
            }

            let inputs = match host.poll_inputs() {
                Ok(inputs) => inputs,
                Err(e) => {
                    error!("reading input failed: {e:#}");
                    self.cancel();
                    Vec::new()
                }
            };

            let step = self.advance(dt, &inputs);
            if let Some(frame) = &step.frame {
                if let Err(e) = host.present(frame) {
                    error!("presenting frame failed: {e:#}");
                    self.cancel();
                }
            }

            if let Status::Finished(outcome) = step.status {
                return outcome;
            }
            dt = host.wait(self.tick);
        }
    }

    fn next_block(&mut self) {
        if self.block_index + 1 < self.blocks.len() {
            self.block_index += 1;
            self.progression
                .load(&self.blocks[self.block_index], self.block_index);
        } else {
            self.finish(Outcome::Completed);
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.progression.close();
        self.outcome = Some(outcome);
        self.pending = Some(self.compositor.present(&self.backdrop));
        info!(?outcome, block = self.block_index, "dialog session finished");
    }
}
