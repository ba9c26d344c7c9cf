use crate::foundation::error::{OrbError, OrbResult};

/// Device capability class selecting how much work each frame does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    /// Desktop-class device.
    #[default]
    High,
    /// Narrow viewport or mobile browser with power to spare.
    Mobile,
    /// Constrained device; secondary effects off.
    LowPower,
}

impl QualityTier {
    /// Every tier, in descending cost order.
    pub const ALL: [Self; 3] = [Self::High, Self::Mobile, Self::LowPower];

    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Mobile => "mobile",
            Self::LowPower => "low_power",
        }
    }

    /// Built-in profile for this tier.
    pub fn profile(self) -> TierProfile {
        match self {
            Self::High => TierProfile {
                frame_interval_ms: 1000.0 / 30.0,
                resolution: 65,
                step: 1,
                glow: true,
                specular: true,
            },
            Self::Mobile => TierProfile {
                frame_interval_ms: 1000.0 / 20.0,
                resolution: 40,
                step: 2,
                glow: true,
                specular: true,
            },
            Self::LowPower => TierProfile {
                frame_interval_ms: 1000.0 / 15.0,
                resolution: 30,
                step: 3,
                glow: false,
                specular: false,
            },
        }
    }
}

/// Per-tier frame budget and grid density.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TierProfile {
    /// Minimum time between draws, in milliseconds.
    pub frame_interval_ms: f64,
    /// Grid divisions in both latitude and longitude.
    pub resolution: u32,
    /// Sample stride over the grid; `k` draws every k-th ring and point.
    pub step: u32,
    /// Draw the ambient glow behind the blob.
    pub glow: bool,
    /// Draw specular highlight strokes.
    pub specular: bool,
}

impl TierProfile {
    /// Check grid and timing constraints.
    pub fn validate(&self) -> OrbResult<()> {
        if !self.frame_interval_ms.is_finite() || self.frame_interval_ms <= 0.0 {
            return Err(OrbError::config(
                "tier frame_interval_ms must be finite and > 0",
            ));
        }
        if self.resolution < 2 {
            return Err(OrbError::config("tier resolution must be >= 2"));
        }
        if self.step == 0 {
            return Err(OrbError::config("tier step must be >= 1"));
        }
        Ok(())
    }

    /// Number of latitude rings a frame draws: `ceil(resolution / step)`.
    pub fn ring_count(&self) -> u32 {
        self.resolution.div_ceil(self.step.max(1))
    }

    /// Effective frame rate cap.
    pub fn target_fps(&self) -> f64 {
        1000.0 / self.frame_interval_ms
    }
}

/// Resolved profiles for every tier.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TierTable {
    /// Profile for [`QualityTier::High`].
    pub high: TierProfile,
    /// Profile for [`QualityTier::Mobile`].
    pub mobile: TierProfile,
    /// Profile for [`QualityTier::LowPower`].
    pub low_power: TierProfile,
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            high: QualityTier::High.profile(),
            mobile: QualityTier::Mobile.profile(),
            low_power: QualityTier::LowPower.profile(),
        }
    }
}

impl TierTable {
    /// Profile for `tier`.
    pub fn get(&self, tier: QualityTier) -> TierProfile {
        match tier {
            QualityTier::High => self.high,
            QualityTier::Mobile => self.mobile,
            QualityTier::LowPower => self.low_power,
        }
    }

    /// Validate every profile.
    pub fn validate(&self) -> OrbResult<()> {
        for tier in QualityTier::ALL {
            self.get(tier).validate().map_err(|e| {
                OrbError::config(format!("tier '{}': {e}", tier.as_str()))
            })?;
        }
        Ok(())
    }
}
