//! Color values, conversions and interpolation.
//!
//! A [`Color`] is immutable. It is built from either device RGB or CIE LCH
//! and lazily derives the other representation on first access. Component
//! edits such as [`Color::with_hue`] produce a new value, so a memoized
//! representation always matches the one it was derived from.

pub mod convert;
pub mod css;

use std::cell::OnceCell;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::angle::normalize_degrees;

pub use css::parse_css_color;

/// Chroma below which a hue is treated as undefined during interpolation.
const ACHROMATIC_CHROMA: f64 = 1e-4;

/// Display-ready 8-bit RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS `rgb()` notation.
    pub fn to_css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Perceptual space in which two colors are blended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationSpace {
    /// CIE LCH (from CIE Lab, D65).
    #[default]
    Lch,
    /// OKLCH (from OKLab).
    Oklch,
}

/// A color with lazily derived RGB and LCH representations.
#[derive(Clone)]
pub struct Color {
    rgb: OnceCell<[f64; 3]>,
    lch: OnceCell<[f64; 3]>,
}

impl Color {
    /// Create a color from device RGB channels in `[0, 255]`.
    ///
    /// Channels outside that range are kept as-is and only clamped when the
    /// color is converted for display.
    pub fn from_rgb(r: f64, g: f64, b: f64) -> Self {
        Self {
            rgb: OnceCell::from([r, g, b]),
            lch: OnceCell::new(),
        }
    }

    pub fn from_rgb8(rgb: Rgb8) -> Self {
        Self::from_rgb(f64::from(rgb.r), f64::from(rgb.g), f64::from(rgb.b))
    }

    /// Create a color from CIE LCH. The hue is normalized into `[0, 360)`.
    pub fn from_lch(l: f64, c: f64, h: f64) -> Self {
        Self {
            rgb: OnceCell::new(),
            lch: OnceCell::from([l, c.max(0.0), normalize_degrees(h)]),
        }
    }

    /// Hue in degrees, saturation and lightness in `[0, 1]`.
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let [r, g, b] = convert::hsl_to_rgb([h, s.clamp(0.0, 1.0), l.clamp(0.0, 1.0)]);
        Self::from_rgb(r, g, b)
    }

    /// OKLCH with lightness in `[0, 1]` and chroma roughly in `[0, 0.4]`.
    pub fn from_oklch(l: f64, c: f64, h: f64) -> Self {
        let [r, g, b] = convert::oklch_to_rgb([l, c.max(0.0), normalize_degrees(h)]);
        Self::from_rgb(r, g, b)
    }

    /// Device RGB, derived from LCH on first access.
    pub fn to_rgb(&self) -> [f64; 3] {
        *self
            .rgb
            .get_or_init(|| convert::lch_to_rgb(*self.lch.get().unwrap_or(&[0.0; 3])))
    }

    /// CIE LCH, derived from RGB on first access.
    pub fn to_lch(&self) -> [f64; 3] {
        *self
            .lch
            .get_or_init(|| convert::rgb_to_lch(*self.rgb.get().unwrap_or(&[0.0; 3])))
    }

    pub fn to_lab(&self) -> [f64; 3] {
        convert::lch_to_lab(self.to_lch())
    }

    pub fn to_xyz(&self) -> [f64; 3] {
        convert::rgb_to_xyz(self.to_rgb())
    }

    pub fn to_hsl(&self) -> [f64; 3] {
        convert::rgb_to_hsl(self.to_rgb())
    }

    pub fn to_oklch(&self) -> [f64; 3] {
        convert::rgb_to_oklch(self.to_rgb())
    }

    pub fn lightness(&self) -> f64 {
        self.to_lch()[0]
    }

    pub fn chroma(&self) -> f64 {
        self.to_lch()[1]
    }

    pub fn hue(&self) -> f64 {
        self.to_lch()[2]
    }

    /// Copy of this color with a different LCH hue.
    #[must_use]
    pub fn with_hue(&self, h: f64) -> Self {
        let [l, c, _] = self.to_lch();
        Self::from_lch(l, c, h)
    }

    #[must_use]
    pub fn with_lightness(&self, l: f64) -> Self {
        let [_, c, h] = self.to_lch();
        Self::from_lch(l, c, h)
    }

    #[must_use]
    pub fn with_chroma(&self, c: f64) -> Self {
        let [l, _, h] = self.to_lch();
        Self::from_lch(l, c, h)
    }

    /// Whether every RGB channel lies in `[0, 255]` (within rounding).
    pub fn is_displayable(&self) -> bool {
        self.to_rgb()
            .iter()
            .all(|c| c.is_finite() && *c >= -0.5 && *c < 255.5)
    }

    /// RGB rounded and clamped per channel into the displayable range.
    pub fn to_gamut_rgb(&self) -> Rgb8 {
        let [r, g, b] = self.to_rgb();
        Rgb8::new(clamp_channel(r), clamp_channel(g), clamp_channel(b))
    }

    /// CSS `rgb()` for the gamut-clamped color.
    pub fn to_css(&self) -> String {
        self.to_gamut_rgb().to_css()
    }
}

fn clamp_channel(c: f64) -> u8 {
    if c.is_finite() {
        c.round().clamp(0.0, 255.0) as u8
    } else {
        0
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Color");
        if let Some(rgb) = self.rgb.get() {
            s.field("rgb", rgb);
        }
        if let Some(lch) = self.lch.get() {
            s.field("lch", lch);
        }
        s.finish()
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        match (self.rgb.get(), other.rgb.get()) {
            (Some(a), Some(b)) => a == b,
            _ => self.to_lch() == other.to_lch(),
        }
    }
}

impl From<Rgb8> for Color {
    fn from(rgb: Rgb8) -> Self {
        Self::from_rgb8(rgb)
    }
}

/// Interpolate two colors in CIE LCH.
///
/// `t <= 0` yields `a` and `t >= 1` yields `z` unchanged.
pub fn interpolate(a: &Color, z: &Color, short_path: bool, t: f64) -> Color {
    interpolate_in(InterpolationSpace::Lch, a, z, short_path, t)
}

/// Interpolate two colors in the given perceptual space.
pub fn interpolate_in(
    space: InterpolationSpace,
    a: &Color,
    z: &Color,
    short_path: bool,
    t: f64,
) -> Color {
    if t <= 0.0 || t.is_nan() {
        return a.clone();
    }
    if t >= 1.0 {
        return z.clone();
    }

    let (start, end) = match space {
        InterpolationSpace::Lch => (a.to_lch(), z.to_lch()),
        InterpolationSpace::Oklch => (a.to_oklch(), z.to_oklch()),
    };
    let [l, c, h] = lerp_lch(start, end, short_path, t);

    match space {
        InterpolationSpace::Lch => Color::from_lch(l, c, h),
        InterpolationSpace::Oklch => Color::from_oklch(l, c, h),
    }
}

fn lerp_lch([l1, c1, h1]: [f64; 3], [l2, c2, h2]: [f64; 3], short_path: bool, t: f64) -> [f64; 3] {
    // A gray endpoint has no hue of its own and takes the other one's.
    let h = match (c1 < ACHROMATIC_CHROMA, c2 < ACHROMATIC_CHROMA) {
        (true, false) => h2,
        (false, true) => h1,
        _ => lerp_hue(h1, h2, short_path, t),
    };

    [l1 + (l2 - l1) * t, c1 + (c2 - c1) * t, h]
}

/// Interpolate two hues along the short or long arc of the hue circle.
pub fn lerp_hue(h1: f64, h2: f64, short_path: bool, t: f64) -> f64 {
    let mut start = normalize_degrees(h1);
    let mut end = normalize_degrees(h2);
    let d = end - start;

    if short_path {
        if d > 180.0 {
            start += 360.0;
        } else if d < -180.0 {
            end += 360.0;
        }
    } else if d > 0.0 && d < 180.0 {
        end -= 360.0;
    } else if d <= 0.0 && d > -180.0 {
        end += 360.0;
    }

    normalize_degrees(start + (end - start) * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::float_cmp::approx_eq;

    fn hue_eq(a: f64, b: f64) -> bool {
        let d = normalize_degrees(a - b);
        d < 1e-6 || d > 360.0 - 1e-6
    }

    #[test]
    fn test_lazy_lch_matches_pipeline() {
        let color = Color::from_rgb(189.0, 22.0, 88.0);
        assert!(color.lch.get().is_none());
        let lch = color.to_lch();
        assert_eq!(Some(&lch), color.lch.get());
        assert_eq!(lch, convert::rgb_to_lch([189.0, 22.0, 88.0]));
    }

    #[test]
    fn test_from_lch_normalizes_hue() {
        let color = Color::from_lch(50.0, 20.0, -30.0);
        assert!(approx_eq(color.hue(), 330.0));
        let color = Color::from_lch(50.0, 20.0, 725.0);
        assert!(approx_eq(color.hue(), 5.0));
    }

    #[test]
    fn test_with_hue_returns_fresh_color() {
        let color = Color::from_rgb(189.0, 22.0, 88.0);
        let _ = color.to_lch();
        let shifted = color.with_hue(200.0);
        assert!(approx_eq(shifted.hue(), 200.0));
        assert_ne!(shifted.to_gamut_rgb(), color.to_gamut_rgb());
        assert_eq!(color.to_rgb(), [189.0, 22.0, 88.0]);
    }

    #[test]
    fn test_gamut_clamp() {
        let color = Color::from_rgb(300.0, -20.4, 127.6);
        assert!(!color.is_displayable());
        assert_eq!(color.to_gamut_rgb(), Rgb8::new(255, 0, 128));
        assert_eq!(color.to_css(), "rgb(255, 0, 128)");

        let nan = Color::from_rgb(f64::NAN, 10.0, 10.0);
        assert_eq!(nan.to_gamut_rgb(), Rgb8::new(0, 10, 10));
    }

    #[test]
    fn test_interpolate_boundaries() {
        let a = Color::from_rgb(189.0, 22.0, 88.0);
        let z = Color::from_rgb(48.0, 255.0, 82.0);
        for short_path in [true, false] {
            assert_eq!(interpolate(&a, &z, short_path, 0.0), a);
            assert_eq!(interpolate(&a, &z, short_path, 1.0), z);
            assert_eq!(
                interpolate_in(InterpolationSpace::Oklch, &a, &z, short_path, 0.0),
                a
            );
        }
    }

    #[test]
    fn test_short_path_wraps_through_zero() {
        let a = Color::from_lch(50.0, 40.0, 350.0);
        let z = Color::from_lch(50.0, 40.0, 10.0);
        let mid = interpolate(&a, &z, true, 0.5);
        assert!(hue_eq(mid.hue(), 0.0), "hue was {}", mid.hue());
        let quarter = interpolate(&a, &z, true, 0.25);
        assert!(hue_eq(quarter.hue(), 355.0));
    }

    #[test]
    fn test_long_path_goes_the_other_way() {
        let a = Color::from_lch(50.0, 40.0, 350.0);
        let z = Color::from_lch(50.0, 40.0, 10.0);
        let mid = interpolate(&a, &z, false, 0.5);
        assert!(hue_eq(mid.hue(), 180.0), "hue was {}", mid.hue());
    }

    #[test]
    fn test_lerp_hue_rules() {
        assert!(hue_eq(lerp_hue(10.0, 100.0, true, 0.5), 55.0));
        assert!(hue_eq(lerp_hue(10.0, 100.0, false, 0.5), 235.0));
        assert!(hue_eq(lerp_hue(100.0, 10.0, false, 0.5), 235.0));
        assert!(hue_eq(lerp_hue(0.0, 359.0, false, 0.5), 179.5));
        assert!(hue_eq(lerp_hue(0.0, 359.0, true, 0.5), 359.5));
    }

    #[test]
    fn test_gray_endpoint_borrows_hue() {
        let gray = Color::from_lch(50.0, 0.0, 0.0);
        let blue = Color::from_lch(50.0, 40.0, 270.0);
        let mid = interpolate(&gray, &blue, true, 0.5);
        assert!(approx_eq(mid.hue(), 270.0));
        assert!(approx_eq(mid.chroma(), 20.0));
    }

    #[test]
    fn test_hsl_constructor() {
        let red = Color::from_hsl(0.0, 1.0, 0.5);
        assert_eq!(red.to_gamut_rgb(), Rgb8::new(255, 0, 0));
    }
}
