//! Time-driven strip animations.
//!
//! Time comes from an injected [`Clock`] so that tests can step animations
//! synchronously.  Neither animation owns a timer: the host asks for the
//! next deadline (`schedule`) and calls `tick` when it is reached.

use std::cell::Cell;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::config::HideAnimationConfig;
use crate::core::ItemId;

/// Duration of the slide that follows a live reorder swap.
pub const SLIDE_DURATION: Duration = Duration::from_millis(150);

pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Cell::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Quadratic ease-out: fast start, smooth deceleration.
pub fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t) * (1.0 - t)
}

// ── Hide / show ──────────────────────────────────────────────────────

/// Progress of a hide/show transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStep {
    NotAnimating,
    /// Requested; the first step has not been taken yet.
    JustStarted,
    /// Steps taken toward the target, `1..steps`.
    Step(u32),
}

/// Result of feeding the animator a request or a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorEvent {
    /// One intermediate step was taken.
    Stepped,
    /// The strip reached its target visibility.
    Settled { hidden: bool },
}

#[derive(Debug)]
pub struct HideShowAnimator {
    steps: u32,
    interval: Duration,
    step: AnimationStep,
    /// Settled visibility; only changes when a transition completes.
    hidden: bool,
    target_hidden: bool,
    next_tick: Option<Instant>,
}

impl HideShowAnimator {
    pub fn new(config: &HideAnimationConfig) -> Self {
        Self {
            steps: config.steps.max(1),
            interval: Duration::from_millis(config.step_interval_ms),
            step: AnimationStep::NotAnimating,
            hidden: false,
            target_hidden: false,
            next_tick: None,
        }
    }

    pub fn reconfigure(&mut self, config: &HideAnimationConfig) {
        self.steps = config.steps.max(1);
        self.interval = Duration::from_millis(config.step_interval_ms);
        if let AnimationStep::Step(k) = self.step {
            self.step = AnimationStep::Step(k.min(self.steps.saturating_sub(1)));
        }
    }

    pub fn step(&self) -> AnimationStep {
        self.step
    }

    pub fn is_animating(&self) -> bool {
        self.step != AnimationStep::NotAnimating
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Visibility the strip is heading to (or resting at).
    pub fn target_hidden(&self) -> bool {
        if self.is_animating() {
            self.target_hidden
        } else {
            self.hidden
        }
    }

    fn progress(&self) -> u32 {
        match self.step {
            AnimationStep::NotAnimating | AnimationStep::JustStarted => 0,
            AnimationStep::Step(k) => k,
        }
    }

    /// Fraction of the full cross-axis size currently shown, in `[0, 1]`.
    pub fn visible_fraction(&self) -> f64 {
        if !self.is_animating() {
            return if self.hidden { 0.0 } else { 1.0 };
        }
        let done = self.progress() as f64 / self.steps as f64;
        if self.target_hidden { 1.0 - done } else { done }
    }

    /// Requests a transition.  Returns `None` when the request is a no-op.
    pub fn request(&mut self, hide: bool, animate: bool, now: Instant) -> Option<AnimatorEvent> {
        if self.is_animating() {
            if self.target_hidden == hide {
                return None;
            }
            if !animate {
                return Some(self.settle(hide));
            }
            // Reverse from the current step.
            let remaining = self.steps - self.progress();
            self.target_hidden = hide;
            log::debug!("hide/show reversed toward hidden={hide} at {remaining}/{}", self.steps);
            if remaining >= self.steps {
                return Some(self.settle(hide));
            }
            self.step = AnimationStep::Step(remaining);
            return Some(AnimatorEvent::Stepped);
        }

        if self.hidden == hide {
            return None;
        }
        if !animate {
            return Some(self.settle(hide));
        }
        self.target_hidden = hide;
        self.step = AnimationStep::JustStarted;
        self.next_tick = Some(now + self.interval);
        log::debug!("hide/show started toward hidden={hide}");
        Some(AnimatorEvent::Stepped)
    }

    /// Takes at most one step when the deadline has been reached.
    pub fn tick(&mut self, now: Instant) -> Option<AnimatorEvent> {
        let deadline = self.next_tick?;
        if !self.is_animating() || now < deadline {
            return None;
        }
        let next = self.progress() + 1;
        if next >= self.steps {
            return Some(self.settle(self.target_hidden));
        }
        self.step = AnimationStep::Step(next);
        self.next_tick = Some(now + self.interval);
        Some(AnimatorEvent::Stepped)
    }

    pub fn schedule(&self) -> Option<Instant> {
        if self.is_animating() { self.next_tick } else { None }
    }

    /// Stops any transition, leaving the strip at its settled visibility.
    pub fn cancel(&mut self) {
        self.step = AnimationStep::NotAnimating;
        self.next_tick = None;
    }

    fn settle(&mut self, hidden: bool) -> AnimatorEvent {
        self.hidden = hidden;
        self.target_hidden = hidden;
        self.step = AnimationStep::NotAnimating;
        self.next_tick = None;
        log::debug!("hide/show settled: hidden={hidden}");
        AnimatorEvent::Settled { hidden }
    }
}

// ── Slide after reorder ──────────────────────────────────────────────

/// Per-item main-axis offsets that shrink toward zero after a reorder.
#[derive(Debug, Clone)]
pub struct SlideAnimation {
    started: Instant,
    duration: Duration,
    offsets: HashMap<ItemId, f64>,
}

impl SlideAnimation {
    pub fn new(started: Instant) -> Self {
        Self {
            started,
            duration: SLIDE_DURATION,
            offsets: HashMap::new(),
        }
    }

    /// Adds `delta` to the current offset of `item` and restarts the clock.
    pub fn push(&mut self, item: ItemId, delta: f64, now: Instant) {
        let current: HashMap<ItemId, f64> = self
            .offsets
            .keys()
            .map(|&id| (id, self.offset_at(id, now)))
            .collect();
        self.offsets = current;
        *self.offsets.entry(item).or_insert(0.0) += delta;
        self.started = now;
    }

    pub fn offset_at(&self, item: ItemId, now: Instant) -> f64 {
        let Some(start) = self.offsets.get(&item) else {
            return 0.0;
        };
        let elapsed = now.saturating_duration_since(self.started).as_secs_f64();
        let t = (elapsed / self.duration.as_secs_f64()).min(1.0);
        start * (1.0 - ease_out(t))
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }
}

#[cfg(test)]
#[path = "../../tests/unit/strip_animation.rs"]
mod tests;
