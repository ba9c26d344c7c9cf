use crate::foundation::core::{BezPath, Canvas, Point, Rgba8};
use crate::foundation::math::{inverse_lerp, lerp_u8};

/// Soft drop shadow drawn under a stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    /// Shadow color, straight alpha.
    pub color: Rgba8,
    /// Blur radius in pixels.
    pub blur: f64,
}

/// Stroke appearance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke color, straight alpha.
    pub color: Rgba8,
    /// Line width in pixels.
    pub width: f64,
    /// Global alpha multiplied into the color.
    pub opacity: f64,
    /// Optional glow under the stroke.
    pub shadow: Option<Shadow>,
}

impl StrokeStyle {
    /// Return `true` when every numeric field is finite.
    pub fn is_finite(&self) -> bool {
        self.width.is_finite()
            && self.opacity.is_finite()
            && self.shadow.is_none_or(|s| s.blur.is_finite())
    }

    /// Effective alpha after applying `opacity` to the color.
    pub fn effective_alpha(&self) -> f64 {
        self.color.alpha_f64() * self.opacity.clamp(0.0, 1.0)
    }
}

/// One color stop of a radial glow.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GlowStop {
    /// Position in `[0, 1]` from inner to outer radius.
    pub offset: f64,
    /// Color at this position, straight alpha.
    pub color: Rgba8,
}

/// Radial glow between two concentric circles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowStyle<'a> {
    /// Glow centre in canvas pixels.
    pub center: Point,
    /// Radius where the gradient starts.
    pub inner_radius: f64,
    /// Radius where the gradient ends.
    pub outer_radius: f64,
    /// Color stops sorted by offset.
    pub stops: &'a [GlowStop],
    /// Global alpha.
    pub opacity: f64,
    /// Nominal blur radius.
    pub blur: f64,
}

impl GlowStyle<'_> {
    /// Interpolated color at gradient position `t` in `[0, 1]`.
    pub fn color_at(&self, t: f64) -> Rgba8 {
        let Some(first) = self.stops.first() else {
            return Rgba8 {
                r: 0,
                g: 0,
                b: 0,
                a: 0,
            };
        };
        if t <= first.offset {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let u = inverse_lerp(a.offset, b.offset, t);
                return Rgba8 {
                    r: lerp_u8(a.color.r, b.color.r, u),
                    g: lerp_u8(a.color.g, b.color.g, u),
                    b: lerp_u8(a.color.b, b.color.b, u),
                    a: lerp_u8(a.color.a, b.color.a, u),
                };
            }
        }
        self.stops[self.stops.len() - 1].color
    }
}

/// 2D raster target the renderer draws into.
///
/// Coordinates are canvas pixels with the origin at the top left.
pub trait DrawSurface {
    /// Logical size.
    fn canvas(&self) -> Canvas;
    /// Erase everything drawn so far.
    fn clear(&mut self);
    /// Stroke a connected path.
    fn stroke_path(&mut self, path: &BezPath, style: &StrokeStyle);
    /// Paint a radial glow.
    fn fill_glow(&mut self, glow: &GlowStyle<'_>);
}
