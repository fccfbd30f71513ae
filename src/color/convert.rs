//! Color space conversion pipeline.
//!
//! Device RGB channels are in `[0, 255]`, CIE XYZ is scaled so that the
//! D65 white has `Y = 100`, Lab/LCH lightness is in `[0, 100]`. OKLab works
//! on linear sRGB in `[0, 1]`.
#![allow(clippy::many_single_char_names, clippy::excessive_precision)]

use crate::config::angle::normalize_degrees;

/// D65 reference white, 2° observer.
pub const REF_X: f64 = 95.047;
pub const REF_Y: f64 = 100.000;
pub const REF_Z: f64 = 108.883;

/// Lab linear segment threshold and slope.
pub const LAB_EPSILON: f64 = 0.008856;
const LAB_KAPPA: f64 = 7.787;
const LAB_OFFSET: f64 = 16.0 / 116.0;

/// sRGB companding thresholds.
const SRGB_DECODE_THRESHOLD: f64 = 0.04045;
const SRGB_ENCODE_THRESHOLD: f64 = 0.0031308;
const SRGB_GAMMA: f64 = 2.4;

/// Decode a companded sRGB channel in `[0, 1]` to linear light.
pub fn srgb_to_linear(n: f64) -> f64 {
    if n > SRGB_DECODE_THRESHOLD {
        ((n + 0.055) / 1.055).powf(SRGB_GAMMA)
    } else {
        n / 12.92
    }
}

/// Encode linear light to a companded sRGB channel.
pub fn linear_to_srgb(n: f64) -> f64 {
    if n > SRGB_ENCODE_THRESHOLD {
        1.055 * n.powf(1.0 / SRGB_GAMMA) - 0.055
    } else {
        12.92 * n
    }
}

pub fn rgb_to_xyz([r, g, b]: [f64; 3]) -> [f64; 3] {
    let r = srgb_to_linear(r / 255.0) * 100.0;
    let g = srgb_to_linear(g / 255.0) * 100.0;
    let b = srgb_to_linear(b / 255.0) * 100.0;

    [
        r * 0.4124 + g * 0.3576 + b * 0.1805,
        r * 0.2126 + g * 0.7152 + b * 0.0722,
        r * 0.0193 + g * 0.1192 + b * 0.9505,
    ]
}

pub fn xyz_to_rgb([x, y, z]: [f64; 3]) -> [f64; 3] {
    let x = x / 100.0;
    let y = y / 100.0;
    let z = z / 100.0;

    let r = x * 3.2406 + y * -1.5372 + z * -0.4986;
    let g = x * -0.9689 + y * 1.8758 + z * 0.0415;
    let b = x * 0.0557 + y * -0.2040 + z * 1.0570;

    [
        linear_to_srgb(r) * 255.0,
        linear_to_srgb(g) * 255.0,
        linear_to_srgb(b) * 255.0,
    ]
}

fn pivot_xyz(n: f64) -> f64 {
    if n > LAB_EPSILON {
        n.powf(1.0 / 3.0)
    } else {
        (LAB_KAPPA * n) + LAB_OFFSET
    }
}

fn unpivot_xyz(n: f64) -> f64 {
    let n3 = n * n * n;
    if n3 > LAB_EPSILON {
        n3
    } else {
        (n - LAB_OFFSET) / LAB_KAPPA
    }
}

pub fn xyz_to_lab([x, y, z]: [f64; 3]) -> [f64; 3] {
    let x = pivot_xyz(x / REF_X);
    let y = pivot_xyz(y / REF_Y);
    let z = pivot_xyz(z / REF_Z);

    [(116.0 * y) - 16.0, 500.0 * (x - y), 200.0 * (y - z)]
}

pub fn lab_to_xyz([l, a, b]: [f64; 3]) -> [f64; 3] {
    let y = (l + 16.0) / 116.0;
    let x = a / 500.0 + y;
    let z = y - b / 200.0;

    [
        unpivot_xyz(x) * REF_X,
        unpivot_xyz(y) * REF_Y,
        unpivot_xyz(z) * REF_Z,
    ]
}

pub fn lab_to_lch([l, a, b]: [f64; 3]) -> [f64; 3] {
    let c = a.hypot(b);
    let h = normalize_degrees(b.atan2(a).to_degrees());
    [l, c, h]
}

pub fn lch_to_lab([l, c, h]: [f64; 3]) -> [f64; 3] {
    let (sin, cos) = h.to_radians().sin_cos();
    [l, c * cos, c * sin]
}

pub fn rgb_to_lch(rgb: [f64; 3]) -> [f64; 3] {
    lab_to_lch(xyz_to_lab(rgb_to_xyz(rgb)))
}

pub fn lch_to_rgb(lch: [f64; 3]) -> [f64; 3] {
    xyz_to_rgb(lab_to_xyz(lch_to_lab(lch)))
}

/// Hue in degrees, saturation and lightness in `[0, 1]`.
pub fn rgb_to_hsl([r, g, b]: [f64; 3]) -> [f64; 3] {
    let r = r / 255.0;
    let g = g / 255.0;
    let b = b / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let delta = max - min;

    if delta == 0.0 {
        return [0.0, 0.0, l];
    }

    let s = if l > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };

    let h = if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    [normalize_degrees(h * 60.0), s, l]
}

pub fn hsl_to_rgb([h, s, l]: [f64; 3]) -> [f64; 3] {
    if s == 0.0 {
        return [l * 255.0; 3];
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;
    let h = normalize_degrees(h) / 360.0;

    let channel = |mut t: f64| {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };

    [
        channel(h + 1.0 / 3.0) * 255.0,
        channel(h) * 255.0,
        channel(h - 1.0 / 3.0) * 255.0,
    ]
}

pub fn linear_srgb_to_oklab([r, g, b]: [f64; 3]) -> [f64; 3] {
    let l = 0.412_221_470_8 * r + 0.536_332_536_3 * g + 0.051_445_992_9 * b;
    let m = 0.211_903_498_2 * r + 0.680_699_545_1 * g + 0.107_396_956_6 * b;
    let s = 0.088_302_461_9 * r + 0.281_718_837_6 * g + 0.629_978_700_5 * b;

    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    [
        0.210_454_255_3 * l_ + 0.793_617_785 * m_ - 0.004_072_046_8 * s_,
        1.977_998_495_1 * l_ - 2.428_592_205 * m_ + 0.450_593_709_9 * s_,
        0.025_904_037_1 * l_ + 0.782_771_766_2 * m_ - 0.808_675_766 * s_,
    ]
}

pub fn oklab_to_linear_srgb([l, a, b]: [f64; 3]) -> [f64; 3] {
    let l_ = l + 0.396_337_777_4 * a + 0.215_803_757_3 * b;
    let m_ = l - 0.105_561_345_8 * a - 0.063_854_172_8 * b;
    let s_ = l - 0.089_484_177_5 * a - 1.291_485_548 * b;

    let l = l_.powi(3);
    let m = m_.powi(3);
    let s = s_.powi(3);

    [
        4.076_741_662_1 * l - 3.307_711_591_3 * m + 0.230_969_929_2 * s,
        -1.268_438_004_6 * l + 2.609_757_401_1 * m - 0.341_319_396_5 * s,
        -0.004_196_086_3 * l - 0.703_418_614_7 * m + 1.707_614_701 * s,
    ]
}

pub fn rgb_to_oklch([r, g, b]: [f64; 3]) -> [f64; 3] {
    let linear = [
        srgb_to_linear(r / 255.0),
        srgb_to_linear(g / 255.0),
        srgb_to_linear(b / 255.0),
    ];
    lab_to_lch(linear_srgb_to_oklab(linear))
}

pub fn oklch_to_rgb(oklch: [f64; 3]) -> [f64; 3] {
    let [r, g, b] = oklab_to_linear_srgb(lch_to_lab(oklch));
    [
        linear_to_srgb(r) * 255.0,
        linear_to_srgb(g) * 255.0,
        linear_to_srgb(b) * 255.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 0.05;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_white_lab() {
        let [l, a, b] = xyz_to_lab(rgb_to_xyz([255.0, 255.0, 255.0]));
        assert!(approx_eq(l, 100.0));
        assert!(a.abs() < 0.05);
        assert!(b.abs() < 0.05);
    }

    #[test]
    fn test_black_lab() {
        let [l, _, _] = xyz_to_lab(rgb_to_xyz([0.0, 0.0, 0.0]));
        assert!(approx_eq(l, 0.0));
    }

    #[test]
    fn test_red_lch() {
        // Reference values for sRGB red with the D65 pipeline.
        let [l, c, h] = rgb_to_lch([255.0, 0.0, 0.0]);
        assert!((l - 53.24).abs() < 0.1);
        assert!((c - 104.55).abs() < 0.2);
        assert!((h - 40.0).abs() < 0.2);
    }

    #[test]
    fn test_lch_round_trip() {
        for rgb in [
            [189.0, 22.0, 88.0],
            [48.0, 255.0, 82.0],
            [10.0, 10.0, 10.0],
            [128.0, 64.0, 200.0],
        ] {
            let back = lch_to_rgb(rgb_to_lch(rgb));
            for i in 0..3 {
                assert!(approx_eq(back[i], rgb[i]), "{rgb:?} -> {back:?}");
            }
        }
    }

    #[test]
    fn test_hsl_round_trip() {
        let [h, s, l] = rgb_to_hsl([255.0, 0.0, 0.0]);
        assert!(approx_eq(h, 0.0));
        assert!(approx_eq(s, 1.0));
        assert!(approx_eq(l, 0.5));

        let rgb = [30.0, 144.0, 255.0];
        let back = hsl_to_rgb(rgb_to_hsl(rgb));
        for i in 0..3 {
            assert!(approx_eq(back[i], rgb[i]));
        }
    }

    #[test]
    fn test_oklch_white() {
        let [l, c, _] = rgb_to_oklch([255.0, 255.0, 255.0]);
        assert!((l - 1.0).abs() < 1e-3);
        assert!(c < 1e-3);
    }

    #[test]
    fn test_oklch_round_trip() {
        let rgb = [189.0, 22.0, 88.0];
        let back = oklch_to_rgb(rgb_to_oklch(rgb));
        for i in 0..3 {
            assert!(approx_eq(back[i], rgb[i]));
        }
    }
}
