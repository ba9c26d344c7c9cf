//! Offline preview: drive a [`HeroBackground`] with a simulated display and capture its frames.
//!
//! The simulated display fires callbacks at `native_hz`, as a browser does at the monitor's
//! refresh rate. The scheduler throttles those down to the tier's budget; only drawn frames are
//! rasterized and handed to the sink.

use crate::blob::tier::QualityTier;
use crate::component::HeroBackground;
use crate::config::OrbConfig;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::error::{OrbError, OrbResult};
use crate::render::cpu::{CpuSurface, FrameRGBA};
use crate::render::surface::DrawSurface;
use crate::schedule::primitive::ManualFrames;
use crate::schedule::scheduler::{SchedulerStats, TickOutcome};

/// Timing of a preview run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreviewOpts {
    /// Simulated display refresh rate.
    pub native_hz: f64,
    /// Length of the run in milliseconds.
    pub duration_ms: f64,
    /// Timestamp of the first vsync.
    pub start_ms: f64,
}

impl Default for PreviewOpts {
    fn default() -> Self {
        Self {
            native_hz: 60.0,
            duration_ms: 2000.0,
            start_ms: 0.0,
        }
    }
}

impl PreviewOpts {
    /// Reject non-finite or non-positive timing.
    pub fn validate(&self) -> OrbResult<()> {
        if !self.native_hz.is_finite() || self.native_hz <= 0.0 {
            return Err(OrbError::validation("preview native_hz must be finite and > 0"));
        }
        if !self.duration_ms.is_finite() || self.duration_ms < 0.0 {
            return Err(OrbError::validation(
                "preview duration_ms must be finite and >= 0",
            ));
        }
        if !self.start_ms.is_finite() {
            return Err(OrbError::validation("preview start_ms must be finite"));
        }
        Ok(())
    }

    /// Milliseconds between simulated vsyncs.
    pub fn vsync_period_ms(&self) -> f64 {
        1000.0 / self.native_hz
    }

    /// Number of vsyncs in the run, including the one at `start_ms`.
    pub fn vsync_count(&self) -> u64 {
        // 1000 / 60 is inexact; divide once so whole periods are not lost to rounding.
        (self.duration_ms * self.native_hz / 1000.0 + 1e-9).floor() as u64 + 1
    }
}

/// Summary of a preview run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PreviewStats {
    /// Simulated vsyncs.
    pub vsyncs: u64,
    /// Frames drawn and pushed to the sink.
    pub frames: u64,
    /// Callbacks that fell inside the tier's frame interval.
    pub throttled: u64,
    /// Callbacks that were due but skipped.
    pub skipped: u64,
    /// Scheduler counters at the end of the run.
    pub scheduler: SchedulerStats,
}

/// A mounted background on a CPU surface, ready to be pumped.
pub struct PreviewSession {
    hero: HeroBackground<CpuSurface, ManualFrames>,
    opts: PreviewOpts,
    fps: f64,
}

impl PreviewSession {
    /// Build the background for `tier` and mount it on a fresh CPU surface.
    pub fn new(config: &OrbConfig, tier: QualityTier, opts: PreviewOpts) -> OrbResult<Self> {
        opts.validate()?;
        let surface = CpuSurface::new(config.canvas)?.with_background(config.background);
        let mut hero = HeroBackground::new(config, tier, ManualFrames::new())?;
        hero.mount(surface);
        Ok(Self {
            hero,
            opts,
            fps: config.tiers.get(tier).target_fps(),
        })
    }

    /// The mounted background.
    pub fn hero(&self) -> &HeroBackground<CpuSurface, ManualFrames> {
        &self.hero
    }

    /// Mutable access, e.g. to change tier or visibility mid-run.
    pub fn hero_mut(&mut self) -> &mut HeroBackground<CpuSurface, ManualFrames> {
        &mut self.hero
    }

    /// Pump every vsync of the run, pushing drawn frames to `sink`. The loop is stopped afterwards.
    #[tracing::instrument(skip_all, fields(duration_ms = self.opts.duration_ms))]
    pub fn run(&mut self, sink: &mut dyn FrameSink) -> OrbResult<PreviewStats> {
        let canvas = self
            .hero
            .surface()
            .map(|s| s.canvas())
            .ok_or_else(|| OrbError::render("preview surface is not mounted"))?;
        sink.begin(SinkConfig {
            width: canvas.width,
            height: canvas.height,
            fps: self.fps,
        })?;

        let period = self.opts.vsync_period_ms();
        let mut stats = PreviewStats::default();
        for k in 0..self.opts.vsync_count() {
            let now_ms = self.opts.start_ms + k as f64 * period;
            stats.vsyncs += 1;
            for id in self.hero.primitive_mut().take_due() {
                match self.hero.on_frame(id, now_ms) {
                    TickOutcome::Drawn => {
                        let frame = self.snapshot()?;
                        sink.push_frame(stats.frames, now_ms, &frame)?;
                        stats.frames += 1;
                    }
                    TickOutcome::Throttled => stats.throttled += 1,
                    TickOutcome::Skipped(_) => stats.skipped += 1,
                    TickOutcome::Ignored(_) => {}
                }
            }
        }

        self.hero.stop();
        sink.end()?;
        stats.scheduler = self.hero.stats();
        tracing::info!(
            vsyncs = stats.vsyncs,
            frames = stats.frames,
            throttled = stats.throttled,
            "preview finished"
        );
        Ok(stats)
    }

    fn snapshot(&mut self) -> OrbResult<FrameRGBA> {
        self.hero
            .surface_mut()
            .map(CpuSurface::snapshot)
            .ok_or_else(|| OrbError::render("preview surface is not mounted"))
    }
}

/// Render one frame at `time_ms` on `tier`, at full opacity, without scheduling.
pub fn render_still(config: &OrbConfig, tier: QualityTier, time_ms: f64) -> OrbResult<FrameRGBA> {
    config.validate()?;
    if !time_ms.is_finite() {
        return Err(OrbError::validation("time_ms must be finite"));
    }
    let renderer = config.renderer()?;
    let mut surface = CpuSurface::new(config.canvas)?.with_background(config.background);
    let angle = time_ms / 1000.0 * config.rotation_speed;
    let report = renderer.draw_frame(&mut surface, angle, &config.tiers.get(tier));
    tracing::debug!(tier = tier.as_str(), rings = report.rings, "rendered still");
    Ok(surface.snapshot())
}

#[cfg(test)]
#[path = "../../tests/unit/session/preview.rs"]
mod tests;
