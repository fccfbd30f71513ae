//! Gradient controller.
//!
//! [`GradientController`] owns the two endpoint colors, the three-handle stop
//! slider and the hue / chroma / lightness picker. Every input is forwarded to
//! the owning slider, the resulting events are drained and applied, and a
//! fresh [`RenderFrame`] is published to the attached [`RenderSink`].
//!
//! Stop rules, with `r` the handle radius in percent of the track:
//!
//! - `Changed(left)` caps left at `mid - r` and records `left / mid`.
//! - `Changed(right)` floors right at `mid + r` and records
//!   `(right - mid) / (100 - mid)`.
//! - `Dragged(mid)` places left and right at their recorded ratios around the
//!   new mid, without notifying.

pub mod picker;
pub mod render;
pub mod stops;
pub mod texture;

use std::time::Duration;

use rand::Rng;
use tracing::{debug, warn};

use crate::color::{interpolate_in, parse_css_color, Color, InterpolationSpace, Rgb8};
use crate::config::float_cmp::finite_or_zero;
use crate::config::GradientConfig;
use crate::error::Result;
use crate::slider::{clamp, HandleSpec, Slider, SliderEvent, SliderEventKind, SliderInput, Track};

pub use picker::{color_to_picker, picker_to_color, Picker, PickerAxis, PickerRamps};
pub use render::{linear_gradient, RenderFrame, RenderSink};
pub use stops::{compute_stop_fraction, StopHandle};
pub use texture::{TextureCatalog, TextureEntry};

/// One of the two gradient endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endpoint {
    #[default]
    A,
    Z,
}

pub struct GradientController {
    color_a: Color,
    color_z: Color,
    texture_a: Option<String>,
    texture_z: Option<String>,
    short_path: bool,
    space: InterpolationSpace,
    stop_slider: Slider,
    left_relative: f64,
    right_relative: f64,
    handle_radius: f64,
    picker: Picker,
    editing: Endpoint,
    preview_steps: usize,
    picker_ramp_step: u32,
    sink: Option<Box<dyn RenderSink>>,
    frame: RenderFrame,
}

impl GradientController {
    /// Build a controller from `config`.
    ///
    /// Fails on malformed endpoint colors or a stop layout that is not
    /// strictly ordered and spaced by the handle radius. The picker starts on
    /// endpoint A.
    pub fn new(config: &GradientConfig) -> Result<Self> {
        config.validate_stops()?;
        let color_a = parse_css_color(&config.color_a)?;
        let color_z = parse_css_color(&config.color_z)?;

        let r = config.handle_radius_percent();
        let [left, mid, right] = config.stops;
        let mut stop_slider = Slider::new(0.0, 100.0, 1.0)?
            .click_to_jump(true)
            .animation(Duration::from_millis(config.animation_ms))
            .track(Track {
                left: 0.0,
                width: config.track_width_px,
            });
        stop_slider.add_handle(HandleSpec::new(StopHandle::Left.id(), left).max(mid - r))?;
        stop_slider.add_handle(
            HandleSpec::new(StopHandle::Mid.id(), mid)
                .min(2.0 * r)
                .max(100.0 - 2.0 * r),
        )?;
        stop_slider.add_handle(HandleSpec::new(StopHandle::Right.id(), right).min(mid + r))?;

        let picker = Picker::new(
            color_to_picker(&color_a),
            Duration::from_millis(config.debounce_ms),
        )?;

        let mut controller = Self {
            color_a,
            color_z,
            texture_a: None,
            texture_z: None,
            short_path: config.short_path,
            space: config.space,
            stop_slider,
            left_relative: 0.0,
            right_relative: 0.0,
            handle_radius: r,
            picker,
            editing: Endpoint::A,
            preview_steps: config.preview_steps,
            picker_ramp_step: config.picker_ramp_step,
            sink: None,
            frame: RenderFrame::default(),
        };
        controller.record_left_relative()?;
        controller.record_right_relative()?;
        controller.frame = controller.build_frame()?;
        debug!(
            "Created gradient controller (stops {:?}, radius {:.2}%)",
            config.stops, r
        );
        Ok(controller)
    }

    /// Attach the display collaborator and publish the current frame to it.
    pub fn set_sink(&mut self, sink: impl RenderSink + 'static) {
        let mut sink: Box<dyn RenderSink> = Box::new(sink);
        sink.publish(&self.frame);
        self.sink = Some(sink);
    }

    pub fn color_a(&self) -> &Color {
        &self.color_a
    }

    pub fn color_z(&self) -> &Color {
        &self.color_z
    }

    pub fn color(&self, endpoint: Endpoint) -> &Color {
        match endpoint {
            Endpoint::A => &self.color_a,
            Endpoint::Z => &self.color_z,
        }
    }

    pub fn texture(&self, endpoint: Endpoint) -> Option<&str> {
        match endpoint {
            Endpoint::A => self.texture_a.as_deref(),
            Endpoint::Z => self.texture_z.as_deref(),
        }
    }

    pub fn short_path(&self) -> bool {
        self.short_path
    }

    pub fn space(&self) -> InterpolationSpace {
        self.space
    }

    pub fn editing(&self) -> Endpoint {
        self.editing
    }

    pub fn stop_slider(&self) -> &Slider {
        &self.stop_slider
    }

    pub fn picker(&self) -> &Picker {
        &self.picker
    }

    /// Last published frame.
    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    /// Current left / mid / right stop positions in percent.
    pub fn stops(&self) -> Result<[f64; 3]> {
        Ok([
            self.stop_percent(StopHandle::Left)?,
            self.stop_percent(StopHandle::Mid)?,
            self.stop_percent(StopHandle::Right)?,
        ])
    }

    fn stop_percent(&self, handle: StopHandle) -> Result<f64> {
        self.stop_slider.percent(handle.id())
    }

    /// Interpolation fraction for position `p` in `[0, 1]` under the current stops.
    pub fn compute_stop_fraction(&self, p: f64) -> Result<f64> {
        Ok(compute_stop_fraction(self.stops()?, p))
    }

    /// Lazily sample the gradient at `steps + 1` evenly spaced positions.
    ///
    /// A step count of zero is treated as one.
    pub fn render_preview(&self, steps: usize) -> Result<impl Iterator<Item = Rgb8> + Clone + '_> {
        let stops = self.stops()?;
        let steps = steps.max(1);
        Ok((0..=steps).map(move |i| {
            let t = compute_stop_fraction(stops, i as f64 / steps as f64);
            self.interpolate(t).to_gamut_rgb()
        }))
    }

    fn interpolate(&self, t: f64) -> Color {
        interpolate_in(self.space, &self.color_a, &self.color_z, self.short_path, t)
    }

    /// Exchange the endpoints together with their textures.
    pub fn swap(&mut self) -> Result<()> {
        std::mem::swap(&mut self.color_a, &mut self.color_z);
        std::mem::swap(&mut self.texture_a, &mut self.texture_z);
        self.sync_picker()?;
        self.publish()
    }

    pub fn toggle_path_length(&mut self) -> Result<()> {
        self.set_short_path(!self.short_path)
    }

    pub fn set_short_path(&mut self, short_path: bool) -> Result<()> {
        self.short_path = short_path;
        self.publish()
    }

    pub fn set_space(&mut self, space: InterpolationSpace) -> Result<()> {
        self.space = space;
        self.publish()
    }

    /// Replace an endpoint color. Its texture association is dropped.
    pub fn set_endpoint(&mut self, endpoint: Endpoint, color: Color) -> Result<()> {
        match endpoint {
            Endpoint::A => {
                self.color_a = color;
                self.texture_a = None;
            }
            Endpoint::Z => {
                self.color_z = color;
                self.texture_z = None;
            }
        }
        if endpoint == self.editing {
            self.sync_picker()?;
        }
        self.publish()
    }

    /// Replace an endpoint from a CSS color string.
    ///
    /// A malformed string leaves the endpoint unchanged and returns the
    /// parse error.
    pub fn set_endpoint_css(&mut self, endpoint: Endpoint, css: &str) -> Result<()> {
        match parse_css_color(css) {
            Ok(color) => self.set_endpoint(endpoint, color),
            Err(e) => {
                warn!("Rejected color for endpoint {:?}: {}", endpoint, e);
                Err(e)
            }
        }
    }

    /// Point the picker at another endpoint and load its color silently.
    pub fn edit_endpoint(&mut self, endpoint: Endpoint) -> Result<()> {
        self.editing = endpoint;
        self.sync_picker()?;
        self.publish()
    }

    /// Assign a random pair of distinct textures to the endpoints.
    pub fn randomise<R: Rng + ?Sized>(&mut self, catalog: &TextureCatalog, rng: &mut R) -> Result<()> {
        let (a, z) = catalog.pick_random_pair(rng)?;
        debug!("Randomised endpoints: {} / {}", a.id, z.id);
        self.color_a = a.color();
        self.color_z = z.color();
        self.texture_a = Some(a.id.clone());
        self.texture_z = Some(z.id.clone());
        self.sync_picker()?;
        self.publish()
    }

    /// Feed an interaction input to the stop slider.
    pub fn stop_input(&mut self, input: SliderInput) -> Result<()> {
        self.stop_slider.apply(input)?;
        self.process_stop_events()
    }

    /// Move a stop programmatically. Neighbors are not repositioned, so mid
    /// stays at least one handle radius inside them.
    pub fn set_stop(&mut self, handle: StopHandle, percent: f64) -> Result<()> {
        let percent = match handle {
            StopHandle::Mid => {
                let [left, _, right] = self.stops()?;
                let r = self.handle_radius;
                clamp(percent, (left + r).max(2.0 * r), (right - r).min(100.0 - 2.0 * r))
            }
            _ => percent,
        };
        self.stop_slider.set_percent(handle.id(), percent, None)?;
        self.process_stop_events()
    }

    /// Move a stop programmatically with the same propagation as a drag.
    pub fn move_stop(&mut self, handle: StopHandle, percent: f64) -> Result<()> {
        self.stop_slider.set_percent(handle.id(), percent, None)?;
        let mut events = Vec::new();
        for event in self.stop_slider.drain_events() {
            if event.kind == SliderEventKind::Changed && event.handle == handle.id() {
                events.push(SliderEvent {
                    kind: SliderEventKind::Dragged,
                    ..event.clone()
                });
            }
            events.push(event);
        }
        self.apply_stop_events(events)
    }

    /// Feed an interaction input to one picker axis.
    pub fn picker_input(&mut self, axis: PickerAxis, input: SliderInput) -> Result<()> {
        self.picker.slider_mut(axis).apply(input)?;
        self.process_picker_events()
    }

    /// Type into a picker axis' numeric input; committed by a later [`tick`](Self::tick).
    pub fn picker_type(&mut self, axis: PickerAxis, text: &str, now: Duration) {
        self.picker.slider_mut(axis).type_input(text, now);
    }

    /// Arrow or wheel on a picker axis' numeric input.
    pub fn picker_nudge(&mut self, axis: PickerAxis, steps: i32) -> Result<()> {
        self.picker.slider_mut(axis).nudge_input(steps);
        self.process_picker_events()
    }

    /// Advance animations and input debounce on every slider to `now`.
    pub fn tick(&mut self, now: Duration) -> Result<()> {
        self.stop_slider.apply(SliderInput::Tick(now))?;
        for axis in PickerAxis::ALL {
            self.picker.slider_mut(axis).apply(SliderInput::Tick(now))?;
        }
        self.process_stop_events()?;
        self.process_picker_events()
    }

    fn process_stop_events(&mut self) -> Result<()> {
        let events = self.stop_slider.drain_events();
        self.apply_stop_events(events)
    }

    fn apply_stop_events(&mut self, events: Vec<SliderEvent>) -> Result<()> {
        let mut changed = false;
        for event in events {
            let Some(handle) = StopHandle::from_id(&event.handle) else {
                continue;
            };
            match (handle, event.kind) {
                (StopHandle::Left, SliderEventKind::Changed) => {
                    let mid = self.stop_percent(StopHandle::Mid)?;
                    self.stop_slider
                        .set_handle_max_percent(handle.id(), mid - self.handle_radius)?;
                    self.record_left_relative()?;
                }
                (StopHandle::Right, SliderEventKind::Changed) => {
                    let mid = self.stop_percent(StopHandle::Mid)?;
                    self.stop_slider
                        .set_handle_min_percent(handle.id(), mid + self.handle_radius)?;
                    self.record_right_relative()?;
                }
                (StopHandle::Mid, SliderEventKind::Changed) => self.tighten_neighbors()?,
                (StopHandle::Mid, SliderEventKind::Dragged) => self.follow_mid()?,
                _ => {}
            }
            changed |= event.kind == SliderEventKind::Changed;
        }
        if changed {
            self.publish()?;
        }
        Ok(())
    }

    fn record_left_relative(&mut self) -> Result<()> {
        let left = self.stop_percent(StopHandle::Left)?;
        let mid = self.stop_percent(StopHandle::Mid)?;
        self.left_relative = checked_ratio(left, mid, "left");
        Ok(())
    }

    fn record_right_relative(&mut self) -> Result<()> {
        let right = self.stop_percent(StopHandle::Right)?;
        let mid = self.stop_percent(StopHandle::Mid)?;
        self.right_relative = checked_ratio(right - mid, 100.0 - mid, "right");
        Ok(())
    }

    fn tighten_neighbors(&mut self) -> Result<()> {
        let mid = self.stop_percent(StopHandle::Mid)?;
        let r = self.handle_radius;
        self.stop_slider
            .set_handle_max_percent(StopHandle::Left.id(), mid - r)?;
        self.stop_slider
            .set_handle_min_percent(StopHandle::Right.id(), mid + r)?;
        Ok(())
    }

    /// Place left and right at their recorded ratios around mid.
    fn follow_mid(&mut self) -> Result<()> {
        self.tighten_neighbors()?;
        let mid = self.stop_percent(StopHandle::Mid)?;

        let left = mid * self.left_relative;
        let right = mid + self.right_relative * (100.0 - mid);
        let left = self.stop_slider.handle(StopHandle::Left.id())?.clamp(left);
        let right = self.stop_slider.handle(StopHandle::Right.id())?.clamp(right);
        self.stop_slider.reposition(StopHandle::Left.id(), left)?;
        self.stop_slider.reposition(StopHandle::Right.id(), right)?;
        debug!(
            "Mid at {:.2}% moved left to {:.2}% and right to {:.2}%",
            mid, left, right
        );
        Ok(())
    }

    fn process_picker_events(&mut self) -> Result<()> {
        let mut changed = false;
        for axis in PickerAxis::ALL {
            changed |= self
                .picker
                .slider_mut(axis)
                .drain_events()
                .iter()
                .any(|e| e.kind == SliderEventKind::Changed);
        }
        if !changed {
            return Ok(());
        }

        let color = self.picker.color()?;
        match self.editing {
            Endpoint::A => {
                self.color_a = color;
                self.texture_a = None;
            }
            Endpoint::Z => {
                self.color_z = color;
                self.texture_z = None;
            }
        }
        self.publish()
    }

    fn sync_picker(&mut self) -> Result<()> {
        let color = self.color(self.editing).clone();
        self.picker.sync_from(&color)
    }

    fn build_frame(&self) -> Result<RenderFrame> {
        let ramps = self.picker.ramps(self.picker_ramp_step)?;
        Ok(RenderFrame {
            preview: self.render_preview(self.preview_steps)?.collect(),
            left_handle: self.interpolate(StopHandle::Left.fraction()).to_gamut_rgb(),
            mid_handle: self.interpolate(StopHandle::Mid.fraction()).to_gamut_rgb(),
            right_handle: self.interpolate(StopHandle::Right.fraction()).to_gamut_rgb(),
            hue_ramp: ramps.hue,
            chroma_ramp: ramps.chroma,
            lightness_ramp: ramps.lightness,
            picker_color: self.picker.color()?.to_gamut_rgb(),
        })
    }

    /// Recompute the frame and hand it to the sink.
    fn publish(&mut self) -> Result<()> {
        self.frame = self.build_frame()?;
        if let Some(sink) = self.sink.as_mut() {
            sink.publish(&self.frame);
        }
        Ok(())
    }
}

/// `num / den`, or zero when the ratio is undefined.
fn checked_ratio(num: f64, den: f64, name: &str) -> f64 {
    let ratio = num / den;
    if !ratio.is_finite() {
        warn!("No {} stop ratio at {}/{}, using 0", name, num, den);
    }
    finite_or_zero(ratio)
}
