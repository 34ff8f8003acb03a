use std::time::Duration;

use tracing::info;

use crate::action::Action;
use crate::config::GameConfig;
use crate::engine::Engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepPlan {
    pub ticks_to_run: u32,
    pub remaining_accumulator: Duration,
}

/// Fixed-timestep driver: clamps frame time, banks it, and hands the engine
/// whole steps.
#[derive(Debug, Clone)]
pub struct GameLoop {
    state: LoopState,
    accumulator: Duration,
    fixed_dt: Duration,
    max_frame_delta: Duration,
    total_ticks: u64,
}

impl GameLoop {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            state: LoopState::Running,
            accumulator: Duration::ZERO,
            fixed_dt: config.fixed_dt(),
            max_frame_delta: config.max_frame_delta,
            total_ticks: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn accumulator(&self) -> Duration {
        self.accumulator
    }

    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    pub fn stop(&mut self, reason: &str) {
        if self.state == LoopState::Running {
            info!(reason, ticks = self.total_ticks, "shutdown_requested");
            self.state = LoopState::Stopped;
        }
    }

    /// Runs the update half of one frame and returns how many fixed steps ran.
    /// Actions after a `Quit` in the same batch are dropped.
    pub fn frame<I>(&mut self, engine: &mut Engine, elapsed: Duration, actions: I) -> u32
    where
        I: IntoIterator<Item = Action>,
    {
        if !self.is_running() {
            return 0;
        }
        self.accumulator = self
            .accumulator
            .saturating_add(clamp_frame_delta(elapsed, self.max_frame_delta));

        for action in actions {
            if action == Action::Quit {
                self.stop("escape_key");
                break;
            }
            engine.apply(action);
        }

        let plan = plan_sim_steps(self.accumulator, self.fixed_dt);
        for _ in 0..plan.ticks_to_run {
            engine.step_fixed();
        }
        self.accumulator = plan.remaining_accumulator;
        self.total_ticks = self.total_ticks.saturating_add(plan.ticks_to_run as u64);
        plan.ticks_to_run
    }
}

pub fn clamp_frame_delta(frame_dt: Duration, max_frame_delta: Duration) -> Duration {
    frame_dt.min(max_frame_delta)
}

pub fn plan_sim_steps(mut accumulator: Duration, fixed_dt: Duration) -> StepPlan {
    let mut ticks_to_run = 0u32;
    if fixed_dt.is_zero() {
        return StepPlan {
            ticks_to_run,
            remaining_accumulator: accumulator,
        };
    }
    while accumulator >= fixed_dt {
        accumulator = accumulator.saturating_sub(fixed_dt);
        ticks_to_run = ticks_to_run.saturating_add(1);
    }
    StepPlan {
        ticks_to_run,
        remaining_accumulator: accumulator,
    }
}

/// End-of-frame wait so rendering does not outrun the target rate.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    target: Duration,
}

impl FramePacer {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            target: config.frame_interval(),
        }
    }

    pub fn target(&self) -> Duration {
        self.target
    }

    pub fn remaining(&self, spent: Duration) -> Duration {
        self.target.saturating_sub(spent)
    }
}
