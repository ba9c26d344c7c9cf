use crate::foundation::core::{BezPath, Canvas, Point};
use crate::render::surface::{DrawSurface, GlowStyle, StrokeStyle};
use kurbo::PathEl;

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceOp {
    /// Surface cleared.
    Clear,
    /// Path stroked; `points` are the path's on-curve vertices in order.
    Stroke {
        /// Path vertices.
        points: Vec<Point>,
        /// Style used.
        style: StrokeStyle,
    },
    /// Glow painted.
    Glow {
        /// Glow centre.
        center: Point,
        /// Inner gradient radius.
        inner_radius: f64,
        /// Outer gradient radius.
        outer_radius: f64,
        /// Global alpha.
        opacity: f64,
    },
}

/// Surface that records draw calls instead of rasterizing them.
///
/// Handy for inspecting renderer output without pixel comparisons.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    canvas: Canvas,
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    /// Create an empty recording for `canvas`.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            ops: Vec::new(),
        }
    }

    /// Every op since creation (clears included).
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Ops since the most recent clear.
    pub fn current_frame(&self) -> &[SurfaceOp] {
        let start = self
            .ops
            .iter()
            .rposition(|op| matches!(op, SurfaceOp::Clear))
            .map_or(0, |i| i + 1);
        &self.ops[start..]
    }

    /// Strokes since the most recent clear.
    pub fn strokes(&self) -> impl Iterator<Item = (&[Point], &StrokeStyle)> + '_ {
        self.current_frame().iter().filter_map(|op| match op {
            SurfaceOp::Stroke { points, style } => Some((points.as_slice(), style)),
            _ => None,
        })
    }

    /// Number of clears recorded.
    pub fn clear_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Clear))
            .count()
    }

    /// Drop all recorded ops.
    pub fn reset(&mut self) {
        self.ops.clear();
    }
}

impl DrawSurface for RecordingSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn clear(&mut self) {
        self.ops.push(SurfaceOp::Clear);
    }

    fn stroke_path(&mut self, path: &BezPath, style: &StrokeStyle) {
        let points = path
            .elements()
            .iter()
            .filter_map(|el| match *el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(p),
                PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => Some(p),
                PathEl::ClosePath => None,
            })
            .collect();
        self.ops.push(SurfaceOp::Stroke {
            points,
            style: *style,
        });
    }

    fn fill_glow(&mut self, glow: &GlowStyle<'_>) {
        self.ops.push(SurfaceOp::Glow {
            center: glow.center,
            inner_radius: glow.inner_radius,
            outer_radius: glow.outer_radius,
            opacity: glow.opacity,
        });
    }
}
