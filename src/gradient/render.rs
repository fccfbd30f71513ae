//! Render output published after every state change.

use serde::Serialize;

use crate::color::Rgb8;

/// Every named color value the display layer shows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RenderFrame {
    /// Preview gradient samples, evenly spaced along the bar.
    pub preview: Vec<Rgb8>,
    /// Colors at fractions 0.25 / 0.5 / 0.75, shown on the stop handles.
    pub left_handle: Rgb8,
    pub mid_handle: Rgb8,
    pub right_handle: Rgb8,
    /// Picker axis ramps at the current picker state.
    pub hue_ramp: Vec<Rgb8>,
    pub chroma_ramp: Vec<Rgb8>,
    pub lightness_ramp: Vec<Rgb8>,
    pub picker_color: Rgb8,
}

impl RenderFrame {
    /// Named CSS custom properties for this frame.
    pub fn css_properties(&self) -> Vec<(&'static str, String)> {
        vec![
            ("--previewGradient", linear_gradient("90deg", &self.preview)),
            ("--leftHandleColor", self.left_handle.to_css()),
            ("--midHandleColor", self.mid_handle.to_css()),
            ("--rightHandleColor", self.right_handle.to_css()),
            ("--hueGradient", linear_gradient("to right", &self.hue_ramp)),
            ("--chromaGradient", linear_gradient("to right", &self.chroma_ramp)),
            (
                "--lightnessGradient",
                linear_gradient("to right", &self.lightness_ramp),
            ),
            ("--pickerColor", self.picker_color.to_css()),
        ]
    }
}

/// CSS `linear-gradient()` over evenly spaced colors.
pub fn linear_gradient(direction: &str, colors: &[Rgb8]) -> String {
    let stops: Vec<String> = colors.iter().map(Rgb8::to_css).collect();
    format!("linear-gradient({direction}, {})", stops.join(", "))
}

/// Display-layer collaborator receiving every recomputed frame.
pub trait RenderSink {
    fn publish(&mut self, frame: &RenderFrame);
}

impl<F: FnMut(&RenderFrame)> RenderSink for F {
    fn publish(&mut self, frame: &RenderFrame) {
        self(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_linear_gradient() {
        let css = linear_gradient("90deg", &[Rgb8::new(1, 2, 3), Rgb8::new(4, 5, 6)]);
        assert_eq!(css, "linear-gradient(90deg, rgb(1, 2, 3), rgb(4, 5, 6))");
    }

    #[test]
    fn test_css_property_names() {
        let names: Vec<&str> = RenderFrame::default()
            .css_properties()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(
            names,
            vec![
                "--previewGradient",
                "--leftHandleColor",
                "--midHandleColor",
                "--rightHandleColor",
                "--hueGradient",
                "--chromaGradient",
                "--lightnessGradient",
                "--pickerColor",
            ]
        );
    }
}
