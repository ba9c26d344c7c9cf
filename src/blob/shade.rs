//! Per-ring lighting: Lambert diffuse with a floor plus a Blinn-Phong highlight.

use crate::foundation::core::{Vec3, Vector3D};
use crate::foundation::error::{OrbError, OrbResult};
use std::sync::LazyLock;

/// Un-normalized key light direction (upper left, towards the viewer).
pub const LIGHT_DIRECTION_RAW: Vec3 = Vec3::new(-0.7, -1.0, 1.5);

/// Orthographic viewer looking down -z.
pub const VIEW_DIRECTION: Vec3 = Vec3::new(0.0, 0.0, 1.0);

static LIGHT_DIRECTION: LazyLock<Vec3> = LazyLock::new(|| normalize(LIGHT_DIRECTION_RAW));

/// Process-wide normalized light direction, computed on first use.
pub fn light_direction() -> Vector3D {
    *LIGHT_DIRECTION
}

/// Unit-length copy of `v`.
///
/// Zero-length or non-finite input yields [`Vec3::ZERO`] instead of NaN components; callers that
/// must distinguish that case use [`Vec3::try_normalize`].
pub fn normalize(v: Vector3D) -> Vector3D {
    v.try_normalize().unwrap_or(Vec3::ZERO)
}

/// Dot product.
pub fn dot(a: Vector3D, b: Vector3D) -> f64 {
    a.dot(b)
}

/// Lighting terms for one ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lighting {
    /// Diffuse intensity, never below the model's floor.
    pub diffuse: f64,
    /// Specular intensity, never negative.
    pub specular: f64,
}

/// Tunable lighting constants.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LightingModel {
    /// Minimum diffuse value so back-facing rings stay visible.
    pub diffuse_floor: f64,
    /// Blinn-Phong exponent; higher means a tighter highlight.
    pub shininess: f64,
    /// Multiplier applied to the raised specular term.
    pub specular_scale: f64,
    /// Specular value above which a highlight stroke is drawn.
    pub highlight_threshold: f64,
}

impl Default for LightingModel {
    fn default() -> Self {
        Self {
            diffuse_floor: 0.2,
            shininess: 20.0,
            specular_scale: 0.4,
            highlight_threshold: 0.15,
        }
    }
}

impl LightingModel {
    /// Check that every constant is finite and the floor is a unit value.
    pub fn validate(&self) -> OrbResult<()> {
        let finite = [
            self.diffuse_floor,
            self.shininess,
            self.specular_scale,
            self.highlight_threshold,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(OrbError::config("lighting constants must be finite"));
        }
        if !(0.0..=1.0).contains(&self.diffuse_floor) {
            return Err(OrbError::config("lighting diffuse_floor must be in [0, 1]"));
        }
        if self.shininess < 0.0 || self.specular_scale < 0.0 {
            return Err(OrbError::config(
                "lighting shininess and specular_scale must be >= 0",
            ));
        }
        Ok(())
    }

    /// Lighting used when the inputs are degenerate.
    pub fn fallback(&self) -> Lighting {
        Lighting {
            diffuse: self.diffuse_floor,
            specular: 0.0,
        }
    }

    /// Diffuse and specular terms for a surface `normal`.
    ///
    /// All three vectors are normalized here. A zero-length or non-finite input returns
    /// [`LightingModel::fallback`], so NaN never reaches stroke styling.
    pub fn compute(&self, normal: Vector3D, light_dir: Vector3D, view_dir: Vector3D) -> Lighting {
        let (Some(n), Some(l), Some(v)) = (
            normal.try_normalize(),
            light_dir.try_normalize(),
            view_dir.try_normalize(),
        ) else {
            return self.fallback();
        };
        // Light and view exactly opposed: no defined halfway vector.
        let Some(halfway) = (l + v).try_normalize() else {
            return Lighting {
                diffuse: dot(n, l).max(self.diffuse_floor),
                specular: 0.0,
            };
        };

        let diffuse = dot(n, l).max(self.diffuse_floor);
        let specular = dot(n, halfway).max(0.0).powf(self.shininess) * self.specular_scale;
        if !diffuse.is_finite() || !specular.is_finite() {
            return self.fallback();
        }
        Lighting {
            diffuse,
            specular: specular.max(0.0),
        }
    }

    /// Return `true` when `lighting` warrants a highlight stroke.
    pub fn wants_highlight(&self, lighting: Lighting) -> bool {
        lighting.specular > self.highlight_threshold
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blob/shade.rs"]
mod tests;
