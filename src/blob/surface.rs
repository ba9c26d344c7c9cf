//! Deformed-sphere surface sampling.
//!
//! The blob is a sphere whose radius is perturbed by a handful of travelling harmonics. Each
//! harmonic is a product of an azimuthal sine and a polar sine/cosine, both with their own phase
//! velocity, so the surface keeps deforming while it rotates.

use crate::foundation::core::Point3D;
use crate::foundation::error::{OrbError, OrbResult};

/// Largest allowed sum of harmonic amplitudes, as a fraction of the base radius.
pub const MAX_DEFORMATION: f64 = 0.3;

/// Polar factor of a [`Harmonic`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolarWave {
    /// `sin(freq * theta + speed * t)`; vanishes at the poles.
    Sin,
    /// `cos(freq * theta + speed * t)`.
    Cos,
}

/// One radial perturbation term.
///
/// Contributes `amplitude * sin(phi_freq * phi + phi_speed * t) * wave(theta_freq * theta +
/// theta_speed * t)` to the relative radius.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Harmonic {
    /// Peak contribution relative to the base radius.
    pub amplitude: f64,
    /// Azimuthal (lobe count) frequency.
    pub phi_freq: f64,
    /// Azimuthal phase velocity per unit of time.
    pub phi_speed: f64,
    /// Polar frequency.
    pub theta_freq: f64,
    /// Polar phase velocity per unit of time.
    #[serde(default)]
    pub theta_speed: f64,
    /// Polar factor shape.
    pub wave: PolarWave,
}

impl Harmonic {
    fn eval(&self, theta: f64, phi: f64, time: f64) -> f64 {
        let azimuthal = (self.phi_freq * phi + self.phi_speed * time).sin();
        let polar_arg = self.theta_freq * theta + self.theta_speed * time;
        let polar = match self.wave {
            PolarWave::Sin => polar_arg.sin(),
            PolarWave::Cos => polar_arg.cos(),
        };
        self.amplitude * azimuthal * polar
    }

    /// Upper bound of `|d(term)/dt|`.
    fn max_time_rate(&self) -> f64 {
        self.amplitude.abs() * (self.phi_speed.abs() + self.theta_speed.abs())
    }
}

/// Shape parameters of the blob.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SurfaceParams {
    /// Undeformed radius in canvas pixels.
    pub base_radius: f64,
    /// Radial perturbation terms. At least three, with distinct azimuthal frequencies.
    pub harmonics: Vec<Harmonic>,
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Self {
            base_radius: 350.0,
            harmonics: vec![
                // Slow twist.
                Harmonic {
                    amplitude: 0.08,
                    phi_freq: 2.0,
                    phi_speed: 0.2,
                    theta_freq: 2.0,
                    theta_speed: 0.0,
                    wave: PolarWave::Sin,
                },
                // Faster, finer twist.
                Harmonic {
                    amplitude: 0.04,
                    phi_freq: 3.0,
                    phi_speed: 0.15,
                    theta_freq: 3.0,
                    theta_speed: 0.0,
                    wave: PolarWave::Sin,
                },
                // Four diagonal bumps, drifting slowest.
                Harmonic {
                    amplitude: 0.1,
                    phi_freq: 4.0,
                    phi_speed: 0.1,
                    theta_freq: 1.0,
                    theta_speed: 0.05,
                    wave: PolarWave::Cos,
                },
            ],
        }
    }
}

impl SurfaceParams {
    /// Check the deformation bounds.
    pub fn validate(&self) -> OrbResult<()> {
        if !self.base_radius.is_finite() || self.base_radius <= 0.0 {
            return Err(OrbError::config("surface base_radius must be finite and > 0"));
        }
        if self.harmonics.len() < 3 {
            return Err(OrbError::config(
                "surface needs at least three harmonics to avoid a sphere-like outline",
            ));
        }
        for (i, h) in self.harmonics.iter().enumerate() {
            let finite = [h.amplitude, h.phi_freq, h.phi_speed, h.theta_freq, h.theta_speed]
                .iter()
                .all(|v| v.is_finite());
            if !finite {
                return Err(OrbError::config(format!(
                    "surface harmonic {i} has a non-finite coefficient"
                )));
            }
            let duplicate = self.harmonics[..i]
                .iter()
                .any(|o| (o.phi_freq - h.phi_freq).abs() < 1e-9);
            if duplicate {
                return Err(OrbError::config(format!(
                    "surface harmonic {i} repeats azimuthal frequency {}",
                    h.phi_freq
                )));
            }
        }
        let total = self.total_amplitude();
        if total > MAX_DEFORMATION {
            return Err(OrbError::config(format!(
                "surface harmonics sum to {total:.3}, above the {MAX_DEFORMATION} bound"
            )));
        }
        Ok(())
    }

    /// Sum of absolute harmonic amplitudes.
    pub fn total_amplitude(&self) -> f64 {
        self.harmonics.iter().map(|h| h.amplitude.abs()).sum()
    }
}

/// Pure sampler for points on the deforming blob.
#[derive(Clone, Debug)]
pub struct SurfaceSampler {
    params: SurfaceParams,
}

impl Default for SurfaceSampler {
    fn default() -> Self {
        Self {
            params: SurfaceParams::default(),
        }
    }
}

impl SurfaceSampler {
    /// Create a sampler from validated parameters.
    pub fn new(params: SurfaceParams) -> OrbResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Shape parameters in use.
    pub fn params(&self) -> &SurfaceParams {
        &self.params
    }

    /// Undeformed radius.
    pub fn base_radius(&self) -> f64 {
        self.params.base_radius
    }

    /// Perturbed radius at the given angles and time.
    pub fn radius(&self, theta: f64, phi: f64, time: f64) -> f64 {
        let offset: f64 = self
            .params
            .harmonics
            .iter()
            .map(|h| h.eval(theta, phi, time))
            .sum();
        self.params.base_radius * (1.0 + offset)
    }

    /// Surface point for polar angle `theta`, azimuth `phi` and `time`.
    ///
    /// Deterministic and side-effect free.
    pub fn sample_point(&self, theta: f64, phi: f64, time: f64) -> Point3D {
        let r = self.radius(theta, phi, time);
        let (sin_theta, cos_theta) = theta.sin_cos();
        let (sin_phi, cos_phi) = phi.sin_cos();
        Point3D::new(
            r * sin_theta * cos_phi,
            r * sin_theta * sin_phi,
            r * cos_theta,
        )
    }

    /// Upper bound on how fast any surface point moves per unit of time.
    ///
    /// A point can only move radially, so this is `base_radius * sum(|amp| * speed)`.
    pub fn max_speed(&self) -> f64 {
        self.params.base_radius
            * self
                .params
                .harmonics
                .iter()
                .map(Harmonic::max_time_rate)
                .sum::<f64>()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blob/surface.rs"]
mod tests;
