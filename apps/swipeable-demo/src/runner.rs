//! Replays parsed scripts against a live controller.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{bail, Result};
use swipeable_button::{
    ButtonState, LogSideEffects, PointerEvent, SwipeController, SwipeableButtonOptions,
};
use swipeable_core::{Runtime, FRAME_INTERVAL_NANOS};
use web_time::Instant;

use crate::script::Command;

/// Upper bound for a single `settle` command.
pub const MAX_SETTLE_FRAMES: usize = 1_000;

/// Where frame timestamps come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pacing {
    /// Each frame advances a virtual clock by one 60 Hz interval.
    #[default]
    Virtual,
    /// Frames are spaced on the wall clock, so animations play in real time.
    Realtime,
}

/// Control snapshot taken after one command.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub step: usize,
    pub command: Command,
    pub state: ButtonState,
    pub position: f32,
    pub progress: f32,
    pub label: String,
    pub frame_nanos: u64,
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:>3}] {:<24} {:<10} offset {:>7.2} ({:>5.1}%) {:<10} t={:.1}ms",
            self.step,
            format!("{:?}", self.command),
            self.state.as_str(),
            self.position,
            self.progress * 100.0,
            self.label,
            self.frame_nanos as f64 / 1_000_000.0
        )
    }
}

pub struct ScriptRunner {
    runtime: Runtime,
    controller: SwipeController,
    pacing: Pacing,
    started: Instant,
    frame_nanos: u64,
    step: usize,
}

impl ScriptRunner {
    pub fn new(options: SwipeableButtonOptions, pacing: Pacing) -> Self {
        let runtime = Runtime::default();
        let controller = SwipeController::new(runtime.handle(), options)
            .with_side_effects(Rc::new(LogSideEffects))
            .with_on_success(|| log::info!("action confirmed"))
            .with_on_failure(|| log::info!("swipe abandoned"))
            .with_on_state_change(|from, to| log::info!("state {from} -> {to}"));
        Self {
            runtime,
            controller,
            pacing,
            started: Instant::now(),
            frame_nanos: 0,
            step: 0,
        }
    }

    pub fn controller(&self) -> &SwipeController {
        &self.controller
    }

    /// Runs every command, stopping at the first failed expectation.
    pub fn run(&mut self, commands: &[Command]) -> Result<Vec<StepReport>> {
        commands
            .iter()
            .map(|command| self.execute(command))
            .collect()
    }

    pub fn execute(&mut self, command: &Command) -> Result<StepReport> {
        self.step += 1;
        let controller = self.controller.clone();
        match *command {
            Command::Layout(width) => controller.on_layout(width),
            Command::Down(x) => {
                if !controller.handle_pointer_event(PointerEvent::down(x)) {
                    log::info!("grab ignored while {}", controller.state());
                }
            }
            Command::Move(x) => {
                controller.handle_pointer_event(PointerEvent::moved(x));
            }
            Command::Up(Some(x)) => {
                controller.handle_pointer_event(PointerEvent::up(x));
            }
            Command::Up(None) => {
                controller.pointer_up();
            }
            Command::Cancel => {
                controller.pointer_cancel();
            }
            Command::Frames(count) => {
                for _ in 0..count {
                    self.run_frame();
                }
            }
            Command::Settle => self.settle()?,
            Command::Reset => {
                controller.reset();
            }
            Command::Force => {
                controller.force_complete();
            }
            Command::Disable(disabled) => controller.set_disabled(disabled),
            Command::Expect(expected) => {
                let actual = controller.state();
                if actual != expected {
                    bail!("step {}: expected {expected}, found {actual}", self.step);
                }
            }
        }
        Ok(self.report(command.clone()))
    }

    fn settle(&mut self) -> Result<()> {
        let handle = self.runtime.handle();
        let mut frames = 0;
        while handle.has_frame_callbacks() {
            if frames == MAX_SETTLE_FRAMES {
                bail!(
                    "step {}: still {} after {MAX_SETTLE_FRAMES} frames",
                    self.step,
                    self.controller.state()
                );
            }
            self.run_frame();
            frames += 1;
        }
        log::debug!("settled after {frames} frames");
        Ok(())
    }

    fn run_frame(&mut self) {
        self.frame_nanos = match self.pacing {
            Pacing::Virtual => self.frame_nanos + FRAME_INTERVAL_NANOS,
            Pacing::Realtime => {
                let deadline = Duration::from_nanos(self.frame_nanos + FRAME_INTERVAL_NANOS);
                let elapsed = self.started.elapsed();
                if let Some(wait) = deadline.checked_sub(elapsed) {
                    std::thread::sleep(wait);
                }
                let now = self.started.elapsed().as_nanos();
                u64::try_from(now).unwrap_or(u64::MAX).max(self.frame_nanos + 1)
            }
        };
        log::trace!("frame at {}ns", self.frame_nanos);
        self.runtime.handle().drain_frame_callbacks(self.frame_nanos);
    }

    fn report(&self, command: Command) -> StepReport {
        StepReport {
            step: self.step,
            command,
            state: self.controller.state(),
            position: self.controller.position(),
            progress: self.controller.progress(),
            label: self.controller.label(),
            frame_nanos: self.frame_nanos,
        }
    }
}
