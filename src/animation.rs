//! Animation sequencer.
//!
//! An explicit Idle/Running state machine. While running, every tick sweeps a
//! little further along the sorted points and rebuilds the curve for the part
//! revealed so far, inside axis limits fixed to the full point set.
//!
//! The sequencer never sleeps or spawns anything. The event loop asks
//! [`Sequencer::time_until_tick`] how long it may block and calls
//! [`Sequencer::tick`] when woken.

use crate::curve::{linspace, Bounds, Frame, Interpolant, InterpolationKind, PlotConfiguration};
use crate::data::{Point, PointSet};
use crate::error::{PlotError, Result};
use std::time::{Duration, Instant};

/// Ticks in one full sweep. Each tick reveals another `1 / SWEEP_STEPS`.
pub const SWEEP_STEPS: u32 = 50;
/// Points sampled along the revealed part of the sweep.
pub const SWEEP_SAMPLES: usize = 100;
/// Default tick interval.
pub const DEFAULT_INTERVAL_MS: u64 = 500;
/// Fastest allowed tick interval.
pub const MIN_INTERVAL_MS: u64 = 50;
/// Slowest allowed tick interval.
pub const MAX_INTERVAL_MS: u64 = 2000;

/// Sequencer state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationState {
    /// Not animating.
    Idle,
    /// Animating.
    Running {
        /// Sweep cursor, `0..=SWEEP_STEPS`.
        step: u32,
        /// When the next frame is due.
        next_tick: Instant,
    },
}

/// Drives the progressive reveal.
#[derive(Debug, Clone)]
pub struct Sequencer {
    state: AnimationState,
    interval: Duration,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL_MS)
    }
}

impl Sequencer {
    /// Create an idle sequencer.
    pub fn new(interval_ms: u64) -> Self {
        Self {
            state: AnimationState::Idle,
            interval: Duration::from_millis(clamp_interval(interval_ms)),
        }
    }

    /// Current state.
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Whether the sequencer is running.
    pub fn is_running(&self) -> bool {
        matches!(self.state, AnimationState::Running { .. })
    }

    /// Current progress while running.
    pub fn progress(&self) -> Option<f64> {
        match self.state {
            AnimationState::Running { step, .. } => Some(step_progress(step)),
            AnimationState::Idle => None,
        }
    }

    /// Tick interval in milliseconds.
    pub fn interval_ms(&self) -> u64 {
        self.interval.as_millis() as u64
    }

    /// Idle to Running. The first frame is due immediately.
    ///
    /// Refuses with [`PlotError::InsufficientData`] on fewer than two points.
    /// Starting while already running changes nothing.
    pub fn start(&mut self, points: &PointSet, now: Instant) -> Result<()> {
        if points.len() < 2 {
            return Err(PlotError::insufficient(points.len()));
        }
        if !self.is_running() {
            self.state = AnimationState::Running {
                step: 0,
                next_tick: now,
            };
            tracing::debug!("Animation started ({} ms)", self.interval_ms());
        }
        Ok(())
    }

    /// Running to Idle, cancelling the pending tick. Returns whether it was running.
    pub fn stop(&mut self) -> bool {
        let was_running = self.is_running();
        self.state = AnimationState::Idle;
        if was_running {
            tracing::debug!("Animation stopped");
        }
        was_running
    }

    /// Change the tick interval. Progress and state are untouched.
    pub fn set_interval_ms(&mut self, interval_ms: u64) -> u64 {
        let ms = clamp_interval(interval_ms);
        self.interval = Duration::from_millis(ms);
        ms
    }

    /// How long the event loop may wait before the next frame is due.
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        match self.state {
            AnimationState::Running { next_tick, .. } => {
                Some(next_tick.saturating_duration_since(now))
            }
            AnimationState::Idle => None,
        }
    }

    /// Produce the next frame if one is due.
    ///
    /// Returns `None` when idle, when the tick is not yet due, or when the
    /// point set has fewer than two points. In that last case the sequencer
    /// keeps running and progress does not move.
    pub fn tick(
        &mut self,
        points: &PointSet,
        config: &PlotConfiguration,
        now: Instant,
    ) -> Option<Result<Frame>> {
        let AnimationState::Running { step, next_tick } = self.state else {
            return None;
        };
        if now < next_tick {
            return None;
        }

        let Some(bounds) = Bounds::of_points(points).filter(|_| points.len() >= 2) else {
            tracing::debug!("Animation tick skipped: {} points", points.len());
            return None;
        };

        let step = if step >= SWEEP_STEPS { 0 } else { step + 1 };
        self.state = AnimationState::Running {
            step,
            next_tick: now + self.interval,
        };

        let partial = reveal(points, step_progress(step));
        Some(Frame::within(&partial, config, bounds))
    }
}

fn step_progress(step: u32) -> f64 {
    f64::from(step) / f64::from(SWEEP_STEPS)
}

fn clamp_interval(ms: u64) -> u64 {
    ms.clamp(MIN_INTERVAL_MS, MAX_INTERVAL_MS)
}

/// Points along the first `progress` fraction of the sweep through `points`.
///
/// The sorted points are placed at evenly spaced parameters in `[0, 1]` and
/// [`SWEEP_SAMPLES`] parameters in `[0, progress]` are mapped through them by
/// straight-line interpolation.
pub fn reveal(points: &PointSet, progress: f64) -> PointSet {
    if points.len() < 2 {
        return points.clone();
    }

    let t = linspace(0.0, 1.0, points.len());
    let t_now = linspace(0.0, progress.clamp(0.0, 1.0), SWEEP_SAMPLES);

    let (Some(fx), Some(fy)) = (
        Interpolant::fit(InterpolationKind::Linear, &t, &points.xs()),
        Interpolant::fit(InterpolationKind::Linear, &t, &points.ys()),
    ) else {
        return points.clone();
    };

    PointSet::new(t_now.iter().map(|&s| Point::new(fx.eval(s), fy.eval(s))))
}
