//! Orbweave renders an animated, lit, deforming blob as the background of a hero section.
//!
//! The blob is a sphere perturbed by travelling harmonics, drawn as latitude rings with a small
//! 2.5D projection. A throttled, cancellable loop drives it at a per-device frame budget:
//!
//! - Sample surface points with a [`SurfaceSampler`]
//! - Light each ring with a [`LightingModel`]
//! - Stroke rings onto any [`DrawSurface`] with a [`Renderer`]
//! - Pace frames with a [`FrameScheduler`] over a host [`FramePrimitive`]
//! - Tie it to page lifecycle with [`HeroBackground`], or capture frames offline with a
//!   [`PreviewSession`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod blob;
pub(crate) mod component;
pub(crate) mod config;
pub(crate) mod encode;
pub(crate) mod render;
pub(crate) mod schedule;
pub(crate) mod session;

pub use crate::foundation::core::{
    BezPath, Canvas, Point, Point3D, Rgba8, Rgba8Premul, Vec3, Vector3D,
};
pub use crate::foundation::error::{OrbError, OrbResult};
pub use crate::foundation::math::{inverse_lerp, lerp};

pub use crate::animation::ease::Ease;
pub use crate::animation::fade::FadeIn;
pub use crate::blob::device::{DeviceSignal, MOBILE_MAX_WIDTH};
pub use crate::blob::shade::{
    LIGHT_DIRECTION_RAW, Lighting, LightingModel, VIEW_DIRECTION, dot, light_direction, normalize,
};
pub use crate::blob::surface::{
    Harmonic, MAX_DEFORMATION, PolarWave, SurfaceParams, SurfaceSampler,
};
pub use crate::blob::tier::{QualityTier, TierProfile, TierTable};
pub use crate::component::HeroBackground;
pub use crate::config::OrbConfig;
pub use crate::encode::sink::{
    CapturedFrame, FrameSink, InMemorySink, PngSequenceSink, SinkConfig,
};
pub use crate::render::cpu::{CpuSurface, FrameRGBA};
pub use crate::render::recording::{RecordingSurface, SurfaceOp};
pub use crate::render::renderer::{FrameReport, Palette, Projection, Renderer};
pub use crate::render::surface::{DrawSurface, GlowStop, GlowStyle, Shadow, StrokeStyle};
pub use crate::schedule::clock::AnimationClock;
pub use crate::schedule::primitive::{FramePrimitive, FrameRequestId, ManualFrames};
pub use crate::schedule::scheduler::{
    DrawOutcome, FrameContext, FrameScheduler, IgnoreReason, SchedulerState, SchedulerStats,
    SkipReason, TickOutcome,
};
pub use crate::session::preview::{PreviewOpts, PreviewSession, PreviewStats, render_still};
