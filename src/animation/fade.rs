use crate::animation::ease::Ease;

/// Opacity ramp applied after the loop (re)starts.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FadeIn {
    /// Ramp length in milliseconds. Zero disables the fade.
    pub duration_ms: f64,
    /// Easing applied to ramp progress.
    pub ease: Ease,
}

impl Default for FadeIn {
    fn default() -> Self {
        Self {
            duration_ms: 500.0,
            ease: Ease::OutCubic,
        }
    }
}

impl FadeIn {
    /// Opacity in `[0, 1]` after `elapsed_ms` since start.
    pub fn opacity_at(self, elapsed_ms: f64) -> f64 {
        if self.duration_ms.is_nan() || self.duration_ms <= 0.0 || !elapsed_ms.is_finite() {
            return 1.0;
        }
        self.ease.apply(elapsed_ms / self.duration_ms)
    }
}
