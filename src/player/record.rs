use std::collections::VecDeque;
use std::time::Duration;

use anyhow::Result;

use crate::compositor::apply_frame;
use crate::engine::Input;
use crate::session::Host;
use crate::types::{Frame, Marker, PlayablePresentation, Surface, TerminalContract};

/// Idle ticks after which an auto-advancing recorder presses Advance.
pub const DEFAULT_IDLE_TICKS: usize = 50;
/// Ticks after which a recorder gives up and closes the dialog.
pub const DEFAULT_MAX_TICKS: usize = 100_000;

/// Headless host on virtual time.
///
/// Inputs come from a per-tick script; once the script runs out, the
/// recorder can stand in for a patient reader and press Advance whenever
/// the screen has not changed for a while.
#[derive(Debug)]
pub struct RecordingHost {
    contract: TerminalContract,
    script: VecDeque<Vec<Input>>,
    idle_ticks: Option<usize>,
    max_ticks: usize,
    ticks: usize,
    idle: usize,
    screen: Surface,
    frames: Vec<Frame>,
    markers: Vec<Marker>,
}

impl RecordingHost {
    /// Feed `script[i]` on tick `i`, then nothing.
    pub fn scripted(contract: TerminalContract, script: Vec<Vec<Input>>) -> Self {
        Self {
            contract,
            script: script.into(),
            idle_ticks: None,
            max_ticks: DEFAULT_MAX_TICKS,
            ticks: 0,
            idle: 0,
            screen: Surface::for_contract(contract),
            frames: Vec::new(),
            markers: Vec::new(),
        }
    }

    /// Press Advance after `idle_ticks` ticks without a visible change.
    pub fn auto_advance(contract: TerminalContract, idle_ticks: usize) -> Self {
        Self {
            idle_ticks: Some(idle_ticks.max(1)),
            ..Self::scripted(contract, Vec::new())
        }
    }

    /// Start from what the display shows before the session.
    pub fn with_screen(mut self, screen: Surface) -> Self {
        self.screen = screen;
        self
    }

    pub fn with_max_ticks(mut self, max_ticks: usize) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    /// The display as it looks after every presented frame.
    pub fn screen(&self) -> &Surface {
        &self.screen
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn into_presentation(self) -> PlayablePresentation {
        PlayablePresentation {
            contract: self.contract,
            frames: self.frames,
            markers: self.markers,
        }
    }
}

impl Host for RecordingHost {
    fn poll_inputs(&mut self) -> Result<Vec<Input>> {
        self.ticks += 1;
        if self.ticks > self.max_ticks {
            tracing::warn!(ticks = self.max_ticks, "recording ran too long, closing");
            return Ok(vec![Input::Close]);
        }
        if let Some(inputs) = self.script.pop_front() {
            return Ok(inputs);
        }
        match self.idle_ticks {
            Some(limit) if self.idle >= limit => {
                self.idle = 0;
                Ok(vec![Input::Advance])
            }
            _ => Ok(Vec::new()),
        }
    }

    fn present(&mut self, frame: &Frame) -> Result<()> {
        let changed = match frame {
            Frame::Full { .. } => true,
            Frame::Diff { changes } => !changes.is_empty(),
        };
        if changed {
            self.idle = 0;
        } else {
            self.idle += 1;
        }
        apply_frame(&mut self.screen, frame);
        self.frames.push(frame.clone());
        Ok(())
    }

    fn wait(&mut self, tick: Duration) -> Duration {
        tick
    }

    fn on_block(&mut self, index: usize) {
        self.markers.push(Marker {
            frame_index: self.frames.len(),
            label: format!("block {}", index + 1),
        });
    }
}
