//! Wall-clock driven animation progress as an explicit state machine.
//!
//! ```text
//! Idle --play--> Playing --elapsed >= duration--> Complete
//!  ^                |                                 |
//!  +----reset-------+---------------------------------+
//! any --seek(p)--> Seeking(p)      (programmatic capture)
//! ```
//!
//! Time comes from an injected [`Clock`], so tests drive it with [`ManualClock`].

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::style::config::AnimationPreset;

/// Monotonic time source with a blocking sleep.
pub trait Clock {
    /// Time elapsed since an arbitrary, fixed origin.
    fn now(&self) -> Duration;
    /// Suspend the caller for `d`.
    fn sleep(&self, d: Duration);
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> Duration {
        (**self).now()
    }

    fn sleep(&self, d: Duration) {
        (**self).sleep(d)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }

    fn sleep(&self, d: Duration) {
        (**self).sleep(d)
    }
}

/// Real time.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Clock whose origin is "now".
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, d: Duration) {
        std::thread::sleep(d);
    }
}

/// Simulated time. `sleep` advances the clock instead of blocking.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
    slept: Cell<Duration>,
}

impl ManualClock {
    /// Clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `d`.
    pub fn advance(&self, d: Duration) {
        self.now.set(self.now.get() + d);
    }

    /// Move time forward by `secs` seconds.
    pub fn advance_secs(&self, secs: f64) {
        self.advance(Duration::from_secs_f64(secs));
    }

    /// Total time spent in [`Clock::sleep`].
    pub fn total_slept(&self) -> Duration {
        self.slept.get()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn sleep(&self, d: Duration) {
        self.slept.set(self.slept.get() + d);
        self.advance(d);
    }
}

/// Timeline state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlayState {
    /// Not playing; everything fully visible (progress 1).
    Idle,
    /// Progress advancing from 0 with wall-clock time since `started`.
    Playing {
        /// Clock reading at the play trigger.
        started: Duration,
    },
    /// Playback finished; renders exactly like `Idle`.
    Complete,
    /// Progress pinned by the caller (frame-by-frame capture).
    Seeking {
        /// Pinned global progress.
        progress: f64,
    },
}

/// What the tile renderer reads about the animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationState {
    /// Global progress in `[0, 1]`.
    pub progress: f64,
    /// Active preset.
    pub preset: AnimationPreset,
    /// Configured duration, seconds.
    pub duration_secs: f64,
}

impl AnimationState {
    /// Fully revealed, static state (`progress == 1`, no preset).
    pub fn at_rest() -> Self {
        Self {
            progress: 1.0,
            preset: AnimationPreset::None,
            duration_secs: 0.0,
        }
    }

    /// `true` when a preset other than `none` should shape the output.
    pub fn is_animating(&self) -> bool {
        self.preset.is_animated()
    }
}

/// Normalized progress driver.
#[derive(Debug)]
pub struct Timeline<C: Clock> {
    clock: C,
    duration: Duration,
    state: PlayState,
    last_progress: f64,
}

impl<C: Clock> Timeline<C> {
    /// Idle timeline with the given duration.
    pub fn new(clock: C, duration_secs: f64) -> Self {
        Self {
            clock,
            duration: duration_from_secs(duration_secs),
            state: PlayState::Idle,
            last_progress: 1.0,
        }
    }

    /// Current state.
    pub fn state(&self) -> PlayState {
        self.state
    }

    /// Configured duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Change the duration. Takes effect for the next play; a running play keeps its length.
    pub fn set_duration_secs(&mut self, secs: f64) {
        if matches!(self.state, PlayState::Playing { .. }) {
            return;
        }
        self.duration = duration_from_secs(secs);
    }

    /// Borrow the clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Start (or restart) playback from progress 0.
    pub fn play(&mut self) {
        let started = self.clock.now();
        tracing::debug!(?started, duration = ?self.duration, "timeline play");
        self.state = PlayState::Playing { started };
        self.last_progress = 0.0;
    }

    /// Pin progress to `progress` (clamped to `[0, 1]`).
    pub fn seek(&mut self, progress: f64) {
        let progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            1.0
        };
        self.state = PlayState::Seeking { progress };
        self.last_progress = progress;
    }

    /// Return to the idle, fully visible state.
    pub fn reset(&mut self) {
        self.state = PlayState::Idle;
        self.last_progress = 1.0;
    }

    /// Advance the state machine and return current progress.
    ///
    /// While playing, progress never decreases, even if the clock does.
    pub fn tick(&mut self) -> f64 {
        let p = self.progress();
        if let PlayState::Playing { .. } = self.state {
            self.last_progress = p;
            if p >= 1.0 {
                tracing::debug!("timeline complete");
                self.state = PlayState::Complete;
            }
        }
        p
    }

    /// Current progress without changing state.
    pub fn progress(&self) -> f64 {
        match self.state {
            PlayState::Idle | PlayState::Complete => 1.0,
            PlayState::Seeking { progress } => progress,
            PlayState::Playing { started } => {
                let elapsed = self.clock.now().saturating_sub(started);
                let p = if self.duration.is_zero() || elapsed >= self.duration {
                    1.0
                } else {
                    (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
                };
                p.max(self.last_progress)
            }
        }
    }

    /// `true` while playing.
    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlayState::Playing { .. })
    }

    /// Snapshot for the renderer.
    pub fn animation_state(&self, preset: AnimationPreset) -> AnimationState {
        AnimationState {
            progress: self.progress(),
            preset,
            duration_secs: self.duration.as_secs_f64(),
        }
    }
}

fn duration_from_secs(secs: f64) -> Duration {
    if secs.is_finite() && secs > 0.0 {
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    } else {
        Duration::ZERO
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
