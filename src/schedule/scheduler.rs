//! Throttled, cancellable animation loop.
//!
//! The scheduler never sleeps. Every tick re-requests a frame from the [`FramePrimitive`]; ticks
//! arriving before the tier's frame interval has elapsed are throttled (no draw), so the draw
//! rate is capped below the primitive's native rate. Draws are strictly sequential: the draw
//! callback runs while the scheduler is mutably borrowed and the next frame is requested only
//! after it returns.

use crate::animation::fade::FadeIn;
use crate::blob::tier::{QualityTier, TierProfile, TierTable};
use crate::schedule::clock::AnimationClock;
use crate::schedule::primitive::{FrameRequestId, FramePrimitive};

/// Loop lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    /// No frame is requested; ticks are ignored.
    Stopped,
    /// A frame request is outstanding.
    Running,
}

/// Why a due frame or a ring was not drawn. Never surfaced as an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// No drawing surface is attached yet.
    MissingSurface,
    /// A normal could not be normalized; fallback lighting was used.
    DegenerateNormal,
}

/// Result reported by a draw callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    /// The frame was drawn.
    Drawn,
    /// The frame was skipped.
    Skipped(SkipReason),
}

/// Why a tick did no work at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The scheduler is stopped.
    Stopped,
    /// The callback was requested before a stop/restart and is no longer current.
    Stale,
}

/// What one tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Frame interval not reached; rescheduled without drawing.
    Throttled,
    /// The draw callback ran and drew.
    Drawn,
    /// The draw callback ran and skipped.
    Skipped(SkipReason),
    /// Nothing ran and nothing was rescheduled.
    Ignored(IgnoreReason),
}

/// Values handed to the draw callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameContext {
    /// Tick timestamp in milliseconds.
    pub now_ms: f64,
    /// Time since the previous draw reference, in milliseconds.
    pub elapsed_ms: f64,
    /// Rotation angle (radians); also the deformation time base.
    pub rotation_angle: f64,
    /// Fade-in opacity multiplier in `[0, 1]`.
    pub opacity: f64,
    /// Tier in effect for this frame.
    pub tier: QualityTier,
    /// Profile in effect for this frame.
    pub profile: TierProfile,
}

/// Counters accumulated over the scheduler's lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Ticks that reached the throttle check.
    pub ticks: u64,
    /// Ticks that drew.
    pub draws: u64,
    /// Ticks throttled.
    pub throttled: u64,
    /// Ticks whose draw callback skipped.
    pub skipped: u64,
    /// Ticks ignored (stopped or stale).
    pub ignored: u64,
    /// Stopped -> Running transitions.
    pub starts: u64,
    /// Running -> Stopped transitions.
    pub stops: u64,
}

/// Per-instance animation loop.
///
/// Owns its frame primitive, clock and tier configuration; no state is shared between instances.
pub struct FrameScheduler<P: FramePrimitive> {
    primitive: P,
    state: SchedulerState,
    pending: Option<FrameRequestId>,
    clock: AnimationClock,
    tiers: TierTable,
    tier: QualityTier,
    queued_tier: Option<QualityTier>,
    fade: FadeIn,
    stats: SchedulerStats,
}

impl<P: FramePrimitive> FrameScheduler<P> {
    /// Create a stopped scheduler.
    pub fn new(primitive: P, tiers: TierTable, tier: QualityTier, rotation_speed: f64) -> Self {
        Self {
            primitive,
            state: SchedulerState::Stopped,
            pending: None,
            clock: AnimationClock::new(rotation_speed),
            tiers,
            tier,
            queued_tier: None,
            fade: FadeIn {
                duration_ms: 0.0,
                ..FadeIn::default()
            },
            stats: SchedulerStats::default(),
        }
    }

    /// Apply a fade-in ramp after every start.
    pub fn with_fade(mut self, fade: FadeIn) -> Self {
        self.fade = fade;
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Return `true` while running.
    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    /// Tier in effect (a queued change is not visible until the next tick).
    pub fn tier(&self) -> QualityTier {
        self.tier
    }

    /// Profile for the tier in effect.
    pub fn profile(&self) -> TierProfile {
        self.tiers.get(self.tier)
    }

    /// Lifetime counters.
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// Timing state.
    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    /// Borrow the frame primitive.
    pub fn primitive(&self) -> &P {
        &self.primitive
    }

    /// Mutably borrow the frame primitive, e.g. to pump a [`crate::ManualFrames`].
    pub fn primitive_mut(&mut self) -> &mut P {
        &mut self.primitive
    }

    /// Begin requesting frames. Returns `false` (no-op) when already running.
    pub fn start(&mut self) -> bool {
        if self.state == SchedulerState::Running {
            return false;
        }
        self.state = SchedulerState::Running;
        self.clock.reset();
        self.pending = Some(self.primitive.request_frame());
        self.stats.starts += 1;
        tracing::debug!(tier = self.tier.as_str(), "frame scheduler started");
        true
    }

    /// Stop the loop and cancel the outstanding request. Returns `false` when already stopped.
    ///
    /// After this returns no draw happens, even for a callback the platform had already dequeued:
    /// such a tick finds the scheduler stopped and is ignored.
    pub fn stop(&mut self) -> bool {
        if self.state == SchedulerState::Stopped {
            return false;
        }
        self.state = SchedulerState::Stopped;
        if let Some(id) = self.pending.take() {
            self.primitive.cancel_frame(id);
        }
        self.stats.stops += 1;
        tracing::debug!(draws = self.stats.draws, "frame scheduler stopped");
        true
    }

    /// Switch tiers. While running the change applies at the start of the next tick.
    pub fn set_tier(&mut self, tier: QualityTier) {
        if self.state == SchedulerState::Stopped {
            self.tier = tier;
            self.queued_tier = None;
        } else {
            self.queued_tier = Some(tier);
        }
        tracing::debug!(tier = tier.as_str(), "quality tier change requested");
    }

    /// Replace the tier table. Profiles are read at tick start, so this applies from the next tick.
    pub fn set_tier_table(&mut self, tiers: TierTable) {
        self.tiers = tiers;
    }

    /// Handle a fired frame callback.
    ///
    /// `draw` runs only when the callback is current, the scheduler is running and the tier's
    /// frame interval has elapsed. The next frame is requested after `draw` returns.
    pub fn tick<F>(&mut self, id: FrameRequestId, now_ms: f64, draw: F) -> TickOutcome
    where
        F: FnOnce(&FrameContext) -> DrawOutcome,
    {
        if self.state != SchedulerState::Running {
            self.stats.ignored += 1;
            return TickOutcome::Ignored(IgnoreReason::Stopped);
        }
        if self.pending != Some(id) {
            self.stats.ignored += 1;
            return TickOutcome::Ignored(IgnoreReason::Stale);
        }
        self.pending = None;

        if let Some(tier) = self.queued_tier.take() {
            self.tier = tier;
            tracing::debug!(tier = tier.as_str(), "quality tier applied");
        }
        self.stats.ticks += 1;
        self.clock.observe(now_ms);

        let profile = self.tiers.get(self.tier);
        let Some(elapsed_ms) = self.clock.throttle(now_ms, profile.frame_interval_ms) else {
            self.stats.throttled += 1;
            self.reschedule();
            return TickOutcome::Throttled;
        };

        let ctx = FrameContext {
            now_ms,
            elapsed_ms,
            rotation_angle: self.clock.rotation_angle(now_ms),
            opacity: self.fade.opacity_at(self.clock.since_start_ms(now_ms)),
            tier: self.tier,
            profile,
        };
        let outcome = match draw(&ctx) {
            DrawOutcome::Drawn => {
                self.stats.draws += 1;
                tracing::trace!(now_ms, elapsed_ms, "frame drawn");
                TickOutcome::Drawn
            }
            DrawOutcome::Skipped(reason) => {
                self.stats.skipped += 1;
                tracing::trace!(now_ms, ?reason, "frame skipped");
                TickOutcome::Skipped(reason)
            }
        };
        self.reschedule();
        outcome
    }

    fn reschedule(&mut self) {
        self.pending = Some(self.primitive.request_frame());
    }
}

impl<P: FramePrimitive> Drop for FrameScheduler<P> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/scheduler.rs"]
mod tests;
