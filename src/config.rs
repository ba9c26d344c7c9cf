use crate::animation::fade::FadeIn;
use crate::blob::shade::LightingModel;
use crate::blob::surface::{SurfaceParams, SurfaceSampler};
use crate::blob::tier::TierTable;
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{OrbError, OrbResult};
use crate::render::renderer::{Palette, Projection, Renderer};
use std::path::Path;

/// Everything tunable about the background. Missing JSON fields take their defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrbConfig {
    /// Logical drawing surface size.
    pub canvas: Canvas,
    /// Radians of rotation per second of wall time.
    pub rotation_speed: f64,
    /// Blob shape.
    pub surface: SurfaceParams,
    /// Lighting constants.
    pub lighting: LightingModel,
    /// Per-tier frame budgets.
    pub tiers: TierTable,
    /// Opacity ramp after each start.
    pub fade: FadeIn,
    /// 2.5D projection weights.
    pub projection: Projection,
    /// Stroke and glow colors.
    pub palette: Palette,
    /// Opaque backdrop painted under the blob; `None` keeps the surface transparent.
    pub background: Option<Rgba8>,
}

impl Default for OrbConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            rotation_speed: 0.25,
            surface: SurfaceParams::default(),
            lighting: LightingModel::default(),
            tiers: TierTable::default(),
            fade: FadeIn::default(),
            projection: Projection::default(),
            palette: Palette::default(),
            background: None,
        }
    }
}

impl OrbConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> OrbResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| OrbError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_json_path(path: &Path) -> OrbResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            OrbError::config(format!("failed to read config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> OrbResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| OrbError::serde(e.to_string()))
    }

    /// Check every section.
    pub fn validate(&self) -> OrbResult<()> {
        self.canvas
            .validate()
            .map_err(|e| OrbError::config(format!("canvas: {e}")))?;
        if !self.rotation_speed.is_finite() {
            return Err(OrbError::config("rotation_speed must be finite"));
        }
        self.surface.validate()?;
        self.lighting.validate()?;
        self.tiers.validate()?;
        if !self.fade.duration_ms.is_finite() || self.fade.duration_ms < 0.0 {
            return Err(OrbError::config("fade duration_ms must be finite and >= 0"));
        }
        if !self.projection.y_scale.is_finite() || !self.projection.z_skew.is_finite() {
            return Err(OrbError::config("projection weights must be finite"));
        }
        let mut prev = f64::NEG_INFINITY;
        for stop in &self.palette.glow {
            if !(0.0..=1.0).contains(&stop.offset) || stop.offset < prev {
                return Err(OrbError::config(
                    "palette glow stops must have sorted offsets in [0, 1]",
                ));
            }
            prev = stop.offset;
        }
        Ok(())
    }

    /// Build a renderer for this configuration.
    pub fn renderer(&self) -> OrbResult<Renderer> {
        let sampler = SurfaceSampler::new(self.surface.clone())?;
        self.lighting.validate()?;
        Ok(Renderer::new(sampler, self.lighting)
            .with_projection(self.projection)
            .with_palette(self.palette.clone()))
    }
}
