//! gradient-gen - Headless engine for interactive two-color gradients.
//!
//! This library provides a perceptual color engine (RGB, CIE XYZ / Lab / LCH,
//! HSL and OKLCH), a constrained multi-handle slider driven by abstract input
//! events, and a gradient controller that ties both together: two endpoint
//! colors, three stop handles warping the 25 / 50 / 75 % interpolants, a
//! hue / chroma / lightness picker and a render sink receiving every frame.
//!
//! # Example
//!
//! ```no_run
//! use gradient_gen::{GradientConfig, GradientController, StopHandle};
//!
//! let mut controller = GradientController::new(&GradientConfig::default()).unwrap();
//! controller.set_sink(|frame: &gradient_gen::RenderFrame| {
//!     for (name, value) in frame.css_properties() {
//!         println!("{name}: {value};");
//!     }
//! });
//! controller.move_stop(StopHandle::Mid, 80.0).unwrap();
//! ```

pub mod color;
pub mod config;
pub mod error;
pub mod gradient;
pub mod slider;

// Re-exports for convenience
pub use color::{interpolate, interpolate_in, parse_css_color, Color, InterpolationSpace, Rgb8};
pub use config::GradientConfig;
pub use error::{ErrorCode, GradientError, Result};
pub use gradient::{
    compute_stop_fraction, Endpoint, GradientController, PickerAxis, RenderFrame, RenderSink,
    StopHandle, TextureCatalog, TextureEntry,
};
pub use slider::{ArrowKey, HandleSpec, Slider, SliderEvent, SliderEventKind, SliderInput, Track};

/// Render a gradient between two CSS colors as CSS custom properties.
///
/// This is the one-shot pipeline used by the command line tool:
/// 1. Parse both endpoint colors
/// 2. Build a controller with the given stops and hue path
/// 3. Collect the resulting frame
pub fn render_css_gradient(
    color_a: &str,
    color_z: &str,
    stops: [f64; 3],
    short_path: bool,
) -> Result<RenderFrame> {
    let config = GradientConfig {
        color_a: color_a.to_string(),
        color_z: color_z.to_string(),
        stops,
        short_path,
        ..GradientConfig::default()
    };
    let controller = GradientController::new(&config)?;
    Ok(controller.frame().clone())
}
