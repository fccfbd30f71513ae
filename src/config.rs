//! Configuration constants and settings for the gradient engines.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::InterpolationSpace;
use crate::error::{GradientError, Result};

/// Floating-point comparison epsilon.
pub const EPS: f64 = 0.0001;

/// Number of preview intervals (the preview holds one more color than this).
pub const DEFAULT_PREVIEW_STEPS: usize = 50;

/// Spacing of the picker axis ramps, in percent of the axis.
pub const DEFAULT_PICKER_RAMP_STEP: u32 = 10;

/// Upper end of the picker's chroma axis (OKLCH chroma units).
pub const MAX_PICKER_CHROMA: f64 = 0.4;

/// Default track width used to derive the handle radius.
pub const DEFAULT_TRACK_WIDTH_PX: f64 = 500.0;

/// Default handle diameter.
pub const DEFAULT_HANDLE_WIDTH_PX: f64 = 20.0;

/// Quiet period before typed numeric input is committed.
pub const DEFAULT_DEBOUNCE_MS: u64 = 400;

/// Duration of animated handle transitions (click-jump).
pub const DEFAULT_ANIMATION_MS: u64 = 200;

/// Default stop positions (left, mid, right) in percent.
pub const DEFAULT_STOPS: [f64; 3] = [25.0, 50.0, 75.0];

/// Engine configuration, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientConfig {
    /// Number of preview intervals.
    pub preview_steps: usize,
    /// Picker ramp spacing in percent.
    pub picker_ramp_step: u32,
    /// Width of the stop slider track in pixels.
    pub track_width_px: f64,
    /// Diameter of a stop handle in pixels.
    pub handle_width_px: f64,
    /// Numeric input debounce in milliseconds.
    pub debounce_ms: u64,
    /// Animated transition duration in milliseconds.
    pub animation_ms: u64,
    /// Interpolate along the shorter hue arc.
    pub short_path: bool,
    /// Color space used for the preview gradient.
    pub space: InterpolationSpace,
    /// Initial stop positions (left, mid, right) in percent.
    pub stops: [f64; 3],
    /// Initial start color as a CSS string. The picker starts on this color.
    pub color_a: String,
    /// Initial end color as a CSS string.
    pub color_z: String,
}

impl Default for GradientConfig {
    fn default() -> Self {
        Self {
            preview_steps: DEFAULT_PREVIEW_STEPS,
            picker_ramp_step: DEFAULT_PICKER_RAMP_STEP,
            track_width_px: DEFAULT_TRACK_WIDTH_PX,
            handle_width_px: DEFAULT_HANDLE_WIDTH_PX,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            animation_ms: DEFAULT_ANIMATION_MS,
            short_path: true,
            space: InterpolationSpace::default(),
            stops: DEFAULT_STOPS,
            color_a: "oklch(41% 0.2 336)".to_string(),
            color_z: "oklch(0 0.2 144)".to_string(),
        }
    }
}

impl GradientConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| GradientError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&text)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Half a handle's width as a percentage of the track width.
    pub fn handle_radius_percent(&self) -> f64 {
        if self.track_width_px <= 0.0 {
            return 0.0;
        }
        (self.handle_width_px / 2.0) / self.track_width_px * 100.0
    }

    /// Check that the configured stops are strictly ordered inside [0, 100]
    /// and satisfy the same handle spacing the slider enforces.
    pub fn validate_stops(&self) -> Result<()> {
        let [left, mid, right] = self.stops;
        let r = self.handle_radius_percent();
        let ordered = left >= 0.0 && left < mid && mid < right && right <= 100.0;
        let spaced = mid >= 2.0 * r && mid <= 100.0 - 2.0 * r && left <= mid - r && right >= mid + r;
        if ordered && spaced {
            Ok(())
        } else {
            Err(GradientError::InvalidStops { left, mid, right })
        }
    }
}

/// Utility functions for floating-point comparisons.
pub mod float_cmp {
    use super::EPS;

    /// Check if two floats are approximately equal.
    #[inline]
    pub fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    /// Replace NaN and infinities with zero.
    #[inline]
    pub fn finite_or_zero(a: f64) -> f64 {
        if a.is_finite() {
            a
        } else {
            0.0
        }
    }
}

/// Utility functions for angle operations.
pub mod angle {
    /// Normalize angle to 0-360 range (exclusive of 360).
    #[inline]
    pub fn normalize_degrees(angle: f64) -> f64 {
        if !angle.is_finite() {
            return 0.0;
        }
        let mut a = angle % 360.0;
        if a < 0.0 {
            a += 360.0;
        }
        // -0.0 and values that round up to 360.0
        if a >= 360.0 || a == 0.0 {
            a = 0.0;
        }
        a
    }
}
