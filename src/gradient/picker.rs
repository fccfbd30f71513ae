//! Three-axis hue / chroma / lightness picker.
//!
//! The axes are OKLCH: the chroma slider's percent spans `[0, 0.4]` and the
//! lightness slider's percent spans `[0, 1]`.

use std::time::Duration;

use crate::color::{lerp_hue, Color, Rgb8};
use crate::config::MAX_PICKER_CHROMA;
use crate::error::Result;
use crate::slider::{clamp, HandleSpec, Slider};

pub const HUE_HANDLE: &str = "hueHandle";
pub const CHROMA_HANDLE: &str = "chromaHandle";
pub const LIGHTNESS_HANDLE: &str = "lightnessHandle";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerAxis {
    Hue,
    Chroma,
    Lightness,
}

impl PickerAxis {
    pub const ALL: [PickerAxis; 3] = [PickerAxis::Hue, PickerAxis::Chroma, PickerAxis::Lightness];

    pub fn handle_id(&self) -> &'static str {
        match self {
            PickerAxis::Hue => HUE_HANDLE,
            PickerAxis::Chroma => CHROMA_HANDLE,
            PickerAxis::Lightness => LIGHTNESS_HANDLE,
        }
    }
}

/// Build a color from raw picker slider values.
pub fn picker_to_color(hue: f64, chroma_percent: f64, lightness_percent: f64) -> Color {
    Color::from_oklch(
        lightness_percent / 100.0,
        chroma_percent / 100.0 * MAX_PICKER_CHROMA,
        hue,
    )
}

/// Inverse of [`picker_to_color`]: `[hue, chroma %, lightness %]`.
///
/// Chroma beyond the picker's range is clamped to 100 %.
pub fn color_to_picker(color: &Color) -> [f64; 3] {
    let [l, c, h] = color.to_oklch();
    [
        h,
        clamp(c / MAX_PICKER_CHROMA * 100.0, 0.0, 100.0),
        clamp(l * 100.0, 0.0, 100.0),
    ]
}

/// Axis ramps sampled at the current picker state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PickerRamps {
    pub hue: Vec<Rgb8>,
    pub chroma: Vec<Rgb8>,
    pub lightness: Vec<Rgb8>,
}

#[derive(Debug, Clone)]
pub struct Picker {
    hue: Slider,
    chroma: Slider,
    lightness: Slider,
}

impl Picker {
    /// Create the three axis sliders at `[hue, chroma %, lightness %]`.
    pub fn new(initial: [f64; 3], debounce: Duration) -> Result<Self> {
        let [hue, chroma, lightness] = initial;
        let axis = |max: f64, id: &str, value: f64| -> Result<Slider> {
            let mut slider = Slider::new(0.0, max, 1.0)?.show_input(debounce);
            slider.add_handle(HandleSpec::new(id, value))?;
            Ok(slider)
        };

        Ok(Self {
            hue: axis(360.0, HUE_HANDLE, hue)?,
            chroma: axis(100.0, CHROMA_HANDLE, chroma)?,
            lightness: axis(100.0, LIGHTNESS_HANDLE, lightness)?,
        })
    }

    pub fn slider(&self, axis: PickerAxis) -> &Slider {
        match axis {
            PickerAxis::Hue => &self.hue,
            PickerAxis::Chroma => &self.chroma,
            PickerAxis::Lightness => &self.lightness,
        }
    }

    pub fn slider_mut(&mut self, axis: PickerAxis) -> &mut Slider {
        match axis {
            PickerAxis::Hue => &mut self.hue,
            PickerAxis::Chroma => &mut self.chroma,
            PickerAxis::Lightness => &mut self.lightness,
        }
    }

    /// Current `[hue, chroma %, lightness %]`.
    pub fn values(&self) -> Result<[f64; 3]> {
        Ok([
            self.hue.value(HUE_HANDLE)?,
            self.chroma.value(CHROMA_HANDLE)?,
            self.lightness.value(LIGHTNESS_HANDLE)?,
        ])
    }

    pub fn color(&self) -> Result<Color> {
        let [h, c, l] = self.values()?;
        Ok(picker_to_color(h, c, l))
    }

    /// Move the three handles to represent `color` without notifying.
    pub fn sync_from(&mut self, color: &Color) -> Result<()> {
        let [h, c, l] = color_to_picker(color);
        let hue_percent = self.hue.value_to_percent(h);
        self.hue.reposition(HUE_HANDLE, hue_percent)?;
        self.chroma.reposition(CHROMA_HANDLE, c)?;
        self.lightness.reposition(LIGHTNESS_HANDLE, l)?;
        Ok(())
    }

    /// Sample each axis every `step_percent` from 0 to 100 %.
    pub fn ramps(&self, step_percent: u32) -> Result<PickerRamps> {
        let [hue, chroma, lightness] = self.values()?;
        let l = lightness / 100.0;
        let c = chroma / 100.0 * MAX_PICKER_CHROMA;

        let step = step_percent.clamp(1, 100);
        let samples: Vec<f64> = (0..=100)
            .step_by(step as usize)
            .map(|i| f64::from(i) / 100.0)
            .collect();
        let sample = |f: &dyn Fn(f64) -> Color| -> Vec<Rgb8> {
            samples.iter().map(|&t| f(t).to_gamut_rgb()).collect()
        };

        Ok(PickerRamps {
            hue: sample(&|t| Color::from_oklch(l, c, lerp_hue(0.0, 359.0, false, t))),
            chroma: sample(&|t| Color::from_oklch(l, MAX_PICKER_CHROMA * t, hue)),
            lightness: sample(&|t| Color::from_oklch(t, c, hue)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::float_cmp::approx_eq;

    fn picker() -> Picker {
        Picker::new([336.0, 50.0, 41.0], Duration::from_millis(400)).unwrap()
    }

    #[test]
    fn test_picker_round_trip() {
        let color = picker_to_color(336.0, 50.0, 41.0);
        let [h, c, l] = color_to_picker(&color);
        assert!((h - 336.0).abs() < 0.01);
        assert!((c - 50.0).abs() < 0.01);
        assert!((l - 41.0).abs() < 0.01);
    }

    #[test]
    fn test_chroma_clamped_to_axis() {
        let vivid = Color::from_rgb(255.0, 0.0, 255.0);
        let [_, c, _] = color_to_picker(&vivid);
        assert!(c <= 100.0);
    }

    #[test]
    fn test_initial_values() {
        let picker = picker();
        assert_eq!(picker.values().unwrap(), [336.0, 50.0, 41.0]);
        assert_eq!(
            picker.slider(PickerAxis::Hue).input().unwrap().text(),
            "336"
        );
    }

    #[test]
    fn test_sync_from_color_is_silent() {
        let mut picker = picker();
        picker
            .sync_from(&picker_to_color(120.0, 20.0, 70.0))
            .unwrap();
        assert_eq!(picker.values().unwrap(), [120.0, 20.0, 70.0]);
        for axis in PickerAxis::ALL {
            assert!(picker.slider_mut(axis).drain_events().is_empty());
        }
    }

    #[test]
    fn test_ramp_shapes() {
        let ramps = picker().ramps(10).unwrap();
        assert_eq!(ramps.hue.len(), 11);
        assert_eq!(ramps.chroma.len(), 11);
        assert_eq!(ramps.lightness.len(), 11);
        let sum = |c: Rgb8| u32::from(c.r) + u32::from(c.g) + u32::from(c.b);
        assert!(sum(ramps.lightness[0]) < 15);
        assert!(sum(ramps.lightness[10]) > sum(ramps.lightness[5]));
        // zero chroma is gray
        let gray = ramps.chroma[0];
        assert!(gray.r.abs_diff(gray.g) <= 1 && gray.g.abs_diff(gray.b) <= 1);
    }

    #[test]
    fn test_picker_color_lightness_scale() {
        let black = picker_to_color(0.0, 0.0, 0.0);
        assert_eq!(black.to_gamut_rgb(), Rgb8::new(0, 0, 0));
        let white = picker_to_color(0.0, 0.0, 100.0);
        assert_eq!(white.to_gamut_rgb(), Rgb8::new(255, 255, 255));
        assert!((color_to_picker(&white)[2] - 100.0).abs() < 0.01);
        assert!(approx_eq(color_to_picker(&black)[2], 0.0));
    }
}
