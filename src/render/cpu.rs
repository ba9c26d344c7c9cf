use crate::foundation::core::{BezPath, Canvas, Point, Rgba8, Rgba8Premul};
use crate::foundation::error::{OrbError, OrbResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::render::surface::{DrawSurface, GlowStyle, StrokeStyle};
use kurbo::Shape;

/// Number of annular bands used to approximate a radial glow.
const GLOW_BANDS: u32 = 24;

/// Share of the stroke alpha given to the shadow under-stroke.
const SHADOW_ALPHA: f64 = 0.5;

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Copy with straight (non-premultiplied) alpha, as image encoders expect.
    pub fn to_straight(&self) -> FrameRGBA {
        let mut data = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut data);
        }
        FrameRGBA {
            width: self.width,
            height: self.height,
            data,
            premultiplied: false,
        }
    }

    /// Number of pixels with non-zero alpha.
    pub fn covered_pixels(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] != 0).count()
    }
}

/// CPU raster surface powered by `vello_cpu`.
///
/// Draw calls are recorded into a render context and rasterized on [`CpuSurface::snapshot`].
pub struct CpuSurface {
    canvas: Canvas,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    background: Option<Rgba8>,
}

impl CpuSurface {
    /// Create a transparent surface. Dimensions must fit `u16`.
    pub fn new(canvas: Canvas) -> OrbResult<Self> {
        canvas.validate()?;
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| OrbError::render("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| OrbError::render("surface height exceeds u16"))?;
        Ok(Self {
            canvas,
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
            background: None,
        })
    }

    /// Paint `background` after every clear instead of leaving the surface transparent.
    pub fn with_background(mut self, background: Option<Rgba8>) -> Self {
        self.background = background;
        self.paint_background();
        self
    }

    /// Rasterize everything drawn since the last clear.
    pub fn snapshot(&mut self) -> FrameRGBA {
        clear_pixmap(&mut self.pixmap, Rgba8Premul::transparent());
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    fn paint_background(&mut self) {
        let Some(bg) = self.background else {
            return;
        };
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color_to_cpu(bg));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.canvas.width),
            f64::from(self.canvas.height),
        ));
    }

    fn stroke_once(&mut self, path: &vello_cpu::kurbo::BezPath, width: f64, color: Rgba8) {
        if color.a == 0 || width <= 0.0 {
            return;
        }
        let stroke = vello_cpu::kurbo::Stroke::new(width)
            .with_join(vello_cpu::kurbo::Join::Round)
            .with_caps(vello_cpu::kurbo::Cap::Round);
        self.ctx.set_stroke(stroke);
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.stroke_path(path);
    }
}

impl DrawSurface for CpuSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn clear(&mut self) {
        self.ctx.reset();
        self.paint_background();
    }

    fn stroke_path(&mut self, path: &BezPath, style: &StrokeStyle) {
        if !style.is_finite() {
            return;
        }
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        let cpu_path = bezpath_to_cpu(path);
        let alpha = style.effective_alpha();

        // Shadow blur is approximated by a wider, fainter stroke underneath.
        if let Some(shadow) = style.shadow.filter(|s| s.blur > 0.0) {
            let a = shadow.color.alpha_f64() * style.opacity.clamp(0.0, 1.0) * SHADOW_ALPHA;
            self.stroke_once(
                &cpu_path,
                style.width + shadow.blur,
                shadow.color.with_alpha(a),
            );
        }
        self.stroke_once(&cpu_path, style.width, style.color.with_alpha(alpha));
    }

    fn fill_glow(&mut self, glow: &GlowStyle<'_>) {
        let span = glow.outer_radius - glow.inner_radius;
        if !span.is_finite() || span <= 0.0 || !glow.opacity.is_finite() {
            return;
        }
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        let opacity = glow.opacity.clamp(0.0, 1.0);
        // The blur radius widens the outer edge so the falloff reaches zero softly.
        let outer = glow.outer_radius + glow.blur.max(0.0) * 0.5;
        let band = (outer - glow.inner_radius) / f64::from(GLOW_BANDS);
        for k in 0..GLOW_BANDS {
            let r0 = glow.inner_radius + band * f64::from(k);
            let r1 = r0 + band;
            let t = (f64::from(k) + 0.5) / f64::from(GLOW_BANDS);
            let c = glow.color_at(t);
            let c = c.with_alpha(c.alpha_f64() * opacity);
            if c.a == 0 {
                continue;
            }
            let ring = kurbo::CircleSegment::new(glow.center, r1, r0, 0.0, std::f64::consts::TAU);
            self.ctx.set_paint(color_to_cpu(c));
            self.ctx.fill_path(&bezpath_to_cpu(&ring.to_path(0.25)));
        }
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, c: Rgba8Premul) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&[c.r, c.g, c.b, c.a]);
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
