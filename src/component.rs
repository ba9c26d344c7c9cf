//! Page-facing lifecycle wrapper.
//!
//! The host page owns mount/unmount, scroll visibility and device signals. [`HeroBackground`]
//! turns those into scheduler start/stop and tier changes, and routes fired frame callbacks to
//! the renderer.

use crate::blob::device::DeviceSignal;
use crate::blob::tier::QualityTier;
use crate::config::OrbConfig;
use crate::foundation::error::OrbResult;
use crate::render::renderer::{FrameReport, Renderer};
use crate::render::surface::DrawSurface;
use crate::schedule::primitive::{FramePrimitive, FrameRequestId};
use crate::schedule::scheduler::{
    DrawOutcome, FrameScheduler, SchedulerStats, SkipReason, TickOutcome,
};

/// Animated hero-section background.
///
/// The loop runs while the hero region is visible. A missing surface does not stop it; due frames
/// are skipped until one is mounted.
pub struct HeroBackground<S: DrawSurface, P: FramePrimitive> {
    scheduler: FrameScheduler<P>,
    renderer: Renderer,
    surface: Option<S>,
    visible: bool,
    last_report: Option<FrameReport>,
}

impl<S: DrawSurface, P: FramePrimitive> HeroBackground<S, P> {
    /// Build a stopped, unmounted background.
    pub fn new(config: &OrbConfig, tier: QualityTier, primitive: P) -> OrbResult<Self> {
        config.validate()?;
        let renderer = config.renderer()?;
        let scheduler = FrameScheduler::new(primitive, config.tiers, tier, config.rotation_speed)
            .with_fade(config.fade);
        Ok(Self {
            scheduler,
            renderer,
            surface: None,
            visible: true,
            last_report: None,
        })
    }

    /// Attach a drawing surface and start the loop if the region is visible.
    ///
    /// Returns the previously mounted surface, if any.
    pub fn mount(&mut self, surface: S) -> Option<S> {
        let prev = self.surface.replace(surface);
        tracing::debug!(remount = prev.is_some(), "hero background mounted");
        if self.visible {
            self.scheduler.start();
        }
        prev
    }

    /// Stop the loop and detach the surface.
    pub fn unmount(&mut self) -> Option<S> {
        self.scheduler.stop();
        let surface = self.surface.take();
        if surface.is_some() {
            tracing::debug!("hero background unmounted");
        }
        surface
    }

    /// Scroll visibility of the hero region. Hidden tears the loop down; visible restarts it
    /// while a surface is mounted.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        tracing::debug!(visible, "hero visibility changed");
        if visible {
            if self.surface.is_some() {
                self.scheduler.start();
            }
        } else {
            self.scheduler.stop();
        }
    }

    /// Start the loop directly (no-op when running).
    pub fn start(&mut self) -> bool {
        self.scheduler.start()
    }

    /// Stop the loop directly (no-op when stopped).
    pub fn stop(&mut self) -> bool {
        self.scheduler.stop()
    }

    /// Push a new tier; applied from the next tick when running.
    pub fn set_tier(&mut self, tier: QualityTier) {
        self.scheduler.set_tier(tier);
    }

    /// Re-classify the device after a viewport change.
    pub fn on_device_signal(&mut self, signal: &DeviceSignal) -> QualityTier {
        let tier = signal.classify();
        self.scheduler.set_tier(tier);
        tier
    }

    /// Route a fired frame callback.
    pub fn on_frame(&mut self, id: FrameRequestId, now_ms: f64) -> TickOutcome {
        let Self {
            scheduler,
            renderer,
            surface,
            last_report,
            ..
        } = self;
        scheduler.tick(id, now_ms, |frame| {
            let Some(surface) = surface.as_mut() else {
                return DrawOutcome::Skipped(SkipReason::MissingSurface);
            };
            let report = renderer.draw_frame_with_opacity(
                surface,
                frame.rotation_angle,
                &frame.profile,
                frame.opacity,
            );
            *last_report = Some(report);
            DrawOutcome::Drawn
        })
    }

    /// Return `true` while the loop runs.
    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Current visibility flag.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Tier in effect.
    pub fn tier(&self) -> QualityTier {
        self.scheduler.tier()
    }

    /// Scheduler counters.
    pub fn stats(&self) -> SchedulerStats {
        self.scheduler.stats()
    }

    /// Report of the most recent drawn frame.
    pub fn last_report(&self) -> Option<FrameReport> {
        self.last_report
    }

    /// Borrow the mounted surface.
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Mutably borrow the mounted surface, e.g. to read back pixels.
    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Borrow the frame primitive.
    pub fn primitive(&self) -> &P {
        self.scheduler.primitive()
    }

    /// Mutably borrow the frame primitive.
    pub fn primitive_mut(&mut self) -> &mut P {
        self.scheduler.primitive_mut()
    }
}
