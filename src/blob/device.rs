//! Maps host-reported device characteristics onto a [`QualityTier`].
//!
//! The renderer never inspects the platform itself; the host pushes a [`DeviceSignal`] whenever
//! the viewport changes and feeds the resulting tier into the scheduler.

use crate::blob::tier::QualityTier;
use regex::Regex;
use std::sync::LazyLock;

/// Viewports narrower than this (CSS pixels) count as mobile.
pub const MOBILE_MAX_WIDTH: u32 = 768;

static MOBILE_UA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Android|webOS|iPhone|iPad|iPod|BlackBerry|IEMobile|Opera Mini")
        .expect("mobile user-agent pattern must compile")
});

/// Device characteristics reported by the host page.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeviceSignal {
    /// Viewport width in CSS pixels.
    pub viewport_width: u32,
    /// Raw user-agent string.
    #[serde(default)]
    pub user_agent: String,
    /// Explicit power hint. `None` treats every mobile device as low power.
    #[serde(default)]
    pub low_power: Option<bool>,
}

impl DeviceSignal {
    /// Return `true` for narrow viewports or mobile user agents.
    pub fn is_mobile(&self) -> bool {
        if self.viewport_width < MOBILE_MAX_WIDTH {
            return true;
        }
        MOBILE_UA.is_match(&self.user_agent)
    }

    /// Tier for this device.
    pub fn classify(&self) -> QualityTier {
        if !self.is_mobile() {
            return QualityTier::High;
        }
        match self.low_power {
            Some(false) => QualityTier::Mobile,
            Some(true) | None => QualityTier::LowPower,
        }
    }
}
