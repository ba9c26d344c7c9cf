//! Latitude-ring renderer for the blob.
//!
//! Each frame strokes `ceil(resolution / step)` latitude rings. Ring vertices come from the
//! [`SurfaceSampler`], rotated about the vertical axis and flattened with a small z skew. Lighting
//! is evaluated once per ring at its back-facing midpoint longitude and drives stroke color,
//! width, alpha and shadow.

use crate::blob::shade::{Lighting, LightingModel, VIEW_DIRECTION, light_direction};
use crate::blob::surface::SurfaceSampler;
use crate::blob::tier::TierProfile;
use crate::foundation::core::{BezPath, Point, Point3D, Rgba8};
use crate::render::surface::{DrawSurface, GlowStop, GlowStyle, Shadow, StrokeStyle};
use std::f64::consts::{PI, TAU};

/// 2.5D projection weights: `y' = y * y_scale - z * z_skew`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Projection {
    /// Vertical compression.
    pub y_scale: f64,
    /// How much depth leaks into screen y.
    pub z_skew: f64,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            y_scale: 0.92,
            z_skew: 0.045,
        }
    }
}

impl Projection {
    /// Project an already rotated point to canvas space around `center`.
    pub fn project(&self, p: Point3D, center: Point) -> Point {
        Point::new(center.x + p.x, center.y + p.y * self.y_scale - p.z * self.z_skew)
    }
}

/// Warm orange presentation palette.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Ring stroke color (alpha is derived from lighting).
    pub ring: Rgba8,
    /// Ring shadow color.
    pub ring_shadow: Rgba8,
    /// Highlight stroke color (alpha is derived from lighting).
    pub highlight: Rgba8,
    /// Highlight shadow color.
    pub highlight_shadow: Rgba8,
    /// Ambient glow stops from inner to outer radius.
    pub glow: Vec<GlowStop>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            ring: Rgba8::rgb(245, 155, 120),
            ring_shadow: Rgba8::rgb(250, 175, 140).with_alpha(0.3),
            highlight: Rgba8::rgb(255, 210, 180),
            highlight_shadow: Rgba8::rgb(255, 220, 190).with_alpha(0.4),
            glow: vec![
                GlowStop {
                    offset: 0.0,
                    color: Rgba8::rgb(250, 180, 150).with_alpha(0.08),
                },
                GlowStop {
                    offset: 0.5,
                    color: Rgba8::rgb(255, 190, 160).with_alpha(0.05),
                },
                GlowStop {
                    offset: 1.0,
                    color: Rgba8::rgb(255, 220, 190).with_alpha(0.0),
                },
            ],
        }
    }
}

/// What one frame drew.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Latitude rings stroked.
    pub rings: u32,
    /// Highlight strokes drawn on top of rings.
    pub highlights: u32,
    /// Surface points sampled for ring paths.
    pub points: u32,
    /// Rings lit with fallback lighting because their normal was degenerate.
    pub degenerate_normals: u32,
    /// Whether the ambient glow was painted.
    pub glow: bool,
}

/// Draws the blob onto a [`DrawSurface`].
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    sampler: SurfaceSampler,
    lighting: LightingModel,
    projection: Projection,
    palette: Palette,
}

impl Renderer {
    /// Create a renderer with the default projection and palette.
    pub fn new(sampler: SurfaceSampler, lighting: LightingModel) -> Self {
        Self {
            sampler,
            lighting,
            projection: Projection::default(),
            palette: Palette::default(),
        }
    }

    /// Replace the projection weights.
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// Replace the palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Surface sampler in use.
    pub fn sampler(&self) -> &SurfaceSampler {
        &self.sampler
    }

    /// Lighting model in use.
    pub fn lighting(&self) -> &LightingModel {
        &self.lighting
    }

    /// Clear `surface` and draw one frame at `rotation_angle`.
    pub fn draw_frame<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        rotation_angle: f64,
        profile: &TierProfile,
    ) -> FrameReport {
        self.draw_frame_with_opacity(surface, rotation_angle, profile, 1.0)
    }

    /// [`Renderer::draw_frame`] with every alpha scaled by `opacity`.
    pub fn draw_frame_with_opacity<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        rotation_angle: f64,
        profile: &TierProfile,
        opacity: f64,
    ) -> FrameReport {
        surface.clear();
        let mut report = FrameReport::default();
        let opacity = if opacity.is_finite() {
            opacity.clamp(0.0, 1.0)
        } else {
            1.0
        };
        let angle = if rotation_angle.is_finite() {
            rotation_angle
        } else {
            0.0
        };
        let center = surface.canvas().center();

        if profile.glow {
            self.draw_glow(surface, center, opacity);
            report.glow = true;
        }

        let res = profile.resolution.max(2);
        let step = profile.step.max(1) as usize;
        let light = light_direction();

        for i in (0..res).step_by(step) {
            let theta = f64::from(i) / f64::from(res - 1) * PI;
            let mut path = BezPath::new();
            for j in (0..=res).step_by(step) {
                let phi = f64::from(j) / f64::from(res) * TAU + angle;
                let p = self.point(theta, phi, angle);
                let screen = self.projection.project(p, center);
                if j == 0 {
                    path.move_to(screen);
                } else {
                    path.line_to(screen);
                }
                report.points += 1;
            }

            let mid = self.point(theta, PI + angle, angle);
            let lit = match mid.try_normalize() {
                Some(normal) => self.lighting.compute(normal, light, VIEW_DIRECTION),
                None => {
                    report.degenerate_normals += 1;
                    tracing::trace!(theta, "degenerate ring normal, using fallback lighting");
                    self.lighting.fallback()
                }
            };

            surface.stroke_path(&path, &self.ring_style(lit, opacity));
            report.rings += 1;

            if profile.specular && self.lighting.wants_highlight(lit) {
                surface.stroke_path(&path, &self.highlight_style(lit, opacity));
                report.highlights += 1;
            }
        }
        report
    }

    /// Sample, then rotate about the vertical axis. The rotation angle doubles as the time base.
    fn point(&self, theta: f64, phi: f64, angle: f64) -> Point3D {
        self.sampler.sample_point(theta, phi, angle).rotate_y(angle)
    }

    /// Base stroke for a ring: brighter, wider and glowier with higher diffuse.
    pub fn ring_style(&self, lit: Lighting, opacity: f64) -> StrokeStyle {
        let d = lit.diffuse;
        StrokeStyle {
            color: self.palette.ring.with_alpha(0.45 + 0.15 * d),
            width: 3.5 + 1.5 * d,
            opacity: (0.5 + 0.1 * d) * opacity,
            shadow: Some(Shadow {
                color: self.palette.ring_shadow,
                blur: 12.0 + 8.0 * d,
            }),
        }
    }

    /// Highlight stroke laid over a ring, scaled by the specular term.
    pub fn highlight_style(&self, lit: Lighting, opacity: f64) -> StrokeStyle {
        let s = lit.specular;
        StrokeStyle {
            color: self.palette.highlight.with_alpha(s * 0.8),
            width: 2.0 + 8.0 * s,
            opacity: 0.3 * s * opacity,
            shadow: Some(Shadow {
                color: self.palette.highlight_shadow,
                blur: 15.0 * s,
            }),
        }
    }

    fn draw_glow<S: DrawSurface + ?Sized>(&self, surface: &mut S, center: Point, opacity: f64) {
        let r = self.sampler.base_radius();
        surface.fill_glow(&GlowStyle {
            center,
            inner_radius: r * 0.5,
            outer_radius: r * 1.6,
            stops: &self.palette.glow,
            opacity: 0.6 * opacity,
            blur: 30.0,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
