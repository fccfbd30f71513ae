//! Constrained multi-handle slider.
//!
//! A [`Slider`] maps a value range onto a percent track and owns any number of
//! named [`Handle`]s. Every accepted position update queues a
//! [`SliderEventKind::Changed`] event; direct user interactions (drag,
//! arrow keys, click-jump) additionally queue [`SliderEventKind::Dragged`]
//! ahead of it. The owner drains the queue with [`Slider::drain_events`]
//! after each call.

pub mod handle;
pub mod input;

use std::time::Duration;

use tracing::debug;

use crate::error::{GradientError, Result};

pub use handle::{clamp, Handle, HandleSpec, HandleState};
pub use input::NumericInput;

use handle::Animation;

/// Which notification channel an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderEventKind {
    /// The handle position was accepted (any source).
    Changed,
    /// The handle was moved by the user directly.
    Dragged,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SliderEvent {
    pub handle: String,
    pub kind: SliderEventKind,
    pub percent: f64,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Left,
    Right,
}

/// Raw interaction input. Touch events map onto the pointer variants.
#[derive(Debug, Clone, PartialEq)]
pub enum SliderInput {
    PointerDown { handle: String, x: f64 },
    PointerMove { x: f64 },
    PointerUp,
    Focus(String),
    Blur,
    Key(ArrowKey),
    Click { x: f64 },
    /// Advance animations and the numeric input debounce to `now`.
    Tick(Duration),
}

/// Horizontal placement of the track, in the same units as pointer x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub left: f64,
    pub width: f64,
}

impl Default for Track {
    fn default() -> Self {
        Self {
            left: 0.0,
            width: 100.0,
        }
    }
}

/// A one-dimensional positional control with multiple handles.
#[derive(Debug, Clone)]
pub struct Slider {
    min: f64,
    max: f64,
    step: f64,
    click_to_jump: bool,
    animation: Duration,
    track: Track,
    handles: Vec<Handle>,
    input: Option<NumericInput>,
    last_dragged: Option<usize>,
    events: Vec<SliderEvent>,
}

impl Slider {
    /// Create a slider over `[min, max]` quantized to `step`.
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self> {
        if !(min < max) || !min.is_finite() || !max.is_finite() {
            return Err(GradientError::InvalidRange { min, max });
        }
        if !(step > 0.0) || !step.is_finite() {
            return Err(GradientError::InvalidStep { step });
        }

        Ok(Self {
            min,
            max,
            step,
            click_to_jump: false,
            animation: Duration::ZERO,
            track: Track::default(),
            handles: Vec::new(),
            input: None,
            last_dragged: None,
            events: Vec::new(),
        })
    }

    /// Attach a numeric text input bound to the first handle.
    pub fn show_input(mut self, debounce: Duration) -> Self {
        self.input = Some(NumericInput::new(debounce));
        self
    }

    /// Clicking the track jumps a handle to the click position.
    pub fn click_to_jump(mut self, enabled: bool) -> Self {
        self.click_to_jump = enabled;
        self
    }

    /// Duration of the click-jump transition.
    pub fn animation(mut self, duration: Duration) -> Self {
        self.animation = duration;
        self
    }

    pub fn track(mut self, track: Track) -> Self {
        self.track = track;
        self
    }

    pub fn set_track(&mut self, track: Track) {
        self.track = track;
    }

    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn input(&self) -> Option<&NumericInput> {
        self.input.as_ref()
    }

    pub fn handles(&self) -> impl Iterator<Item = &Handle> {
        self.handles.iter()
    }

    /// Get value at given percent of the slider range, quantized to `step`.
    pub fn percent_to_value(&self, percent: f64) -> f64 {
        let value = (self.max - self.min) * (percent / 100.0) + self.min;
        (value / self.step).round() * self.step
    }

    /// Get percent of given value in the slider range.
    pub fn value_to_percent(&self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min) * 100.0
    }

    /// Register a handle. Fails if the id is already taken.
    pub fn add_handle(&mut self, spec: HandleSpec) -> Result<()> {
        if self.handles.iter().any(|h| h.id == spec.id) {
            return Err(GradientError::DuplicateHandle { id: spec.id });
        }

        let min = spec.min.map_or(0.0, |v| self.value_to_percent(v));
        let max = spec.max.map_or(100.0, |v| self.value_to_percent(v));
        let mut handle = Handle {
            id: spec.id,
            percent: 0.0,
            min,
            max,
            draggable: spec.draggable,
            state: HandleState::Idle,
            animation: None,
        };
        handle.percent = handle.clamp(self.value_to_percent(spec.value));
        debug!(
            "Added handle '{}' at {:.2}% (bounds {:.2}..{:.2})",
            handle.id, handle.percent, handle.min, handle.max
        );

        if self.handles.is_empty() {
            if let Some(input) = self.input.as_mut() {
                input.show(spec.value);
            }
        }
        self.handles.push(handle);
        Ok(())
    }

    pub fn handle(&self, id: &str) -> Result<&Handle> {
        self.handles
            .iter()
            .find(|h| h.id == id)
            .ok_or_else(|| not_found(id))
    }

    fn index(&self, id: &str) -> Result<usize> {
        self.handles
            .iter()
            .position(|h| h.id == id)
            .ok_or_else(|| not_found(id))
    }

    pub fn percent(&self, id: &str) -> Result<f64> {
        Ok(self.handle(id)?.percent)
    }

    pub fn value(&self, id: &str) -> Result<f64> {
        Ok(self.percent_to_value(self.handle(id)?.percent))
    }

    /// Move a handle programmatically.
    ///
    /// The percent is clamped into the handle's current bounds. Without an
    /// animation exactly one `Changed` event is queued; with one, a transition
    /// starts (replacing any running one) on the next [`SliderInput::Tick`]
    /// and `Changed` is queued for every frame after it.
    pub fn set_percent(&mut self, id: &str, percent: f64, animation: Option<Duration>) -> Result<()> {
        let idx = self.index(id)?;
        let target = self.handles[idx].clamp(percent);
        match animation {
            Some(duration) if !duration.is_zero() => self.animate(idx, target, duration, false),
            _ => {
                self.handles[idx].animation = None;
                self.commit(idx, target, false);
            }
        }
        Ok(())
    }

    pub fn set_value(&mut self, id: &str, value: f64, animation: Option<Duration>) -> Result<()> {
        let percent = self.value_to_percent(value);
        self.set_percent(id, percent, animation)
    }

    /// Change a handle's lower bound (value units). The handle does not move.
    pub fn set_handle_min(&mut self, id: &str, value: f64) -> Result<()> {
        let percent = self.value_to_percent(value);
        self.set_handle_min_percent(id, percent)
    }

    /// Change a handle's upper bound (value units). The handle does not move.
    pub fn set_handle_max(&mut self, id: &str, value: f64) -> Result<()> {
        let percent = self.value_to_percent(value);
        self.set_handle_max_percent(id, percent)
    }

    pub fn set_handle_min_percent(&mut self, id: &str, percent: f64) -> Result<()> {
        let idx = self.index(id)?;
        self.handles[idx].min = percent;
        Ok(())
    }

    pub fn set_handle_max_percent(&mut self, id: &str, percent: f64) -> Result<()> {
        let idx = self.index(id)?;
        self.handles[idx].max = percent;
        Ok(())
    }

    /// Place a handle without queuing any event.
    ///
    /// Used by an owner that recomputes dependent positions itself. Only the
    /// track range is enforced.
    pub fn reposition(&mut self, id: &str, percent: f64) -> Result<()> {
        let idx = self.index(id)?;
        let handle = &mut self.handles[idx];
        handle.percent = clamp(percent, 0.0, 100.0);
        handle.animation = None;
        let value = self.percent_to_value(self.handles[idx].percent);
        self.show_in_input(idx, value);
        Ok(())
    }

    /// Take all queued events in the order they were produced.
    pub fn drain_events(&mut self) -> Vec<SliderEvent> {
        std::mem::take(&mut self.events)
    }

    /// Feed one interaction input to the slider.
    pub fn apply(&mut self, input: SliderInput) -> Result<()> {
        match input {
            SliderInput::PointerDown { handle, x } => self.pointer_down(&handle, x)?,
            SliderInput::PointerMove { x } => self.pointer_move(x),
            SliderInput::PointerUp => self.pointer_up(),
            SliderInput::Focus(handle) => self.focus(&handle)?,
            SliderInput::Blur => self.blur(),
            SliderInput::Key(key) => self.key(key),
            SliderInput::Click { x } => self.click(x),
            SliderInput::Tick(now) => self.tick(now),
        }
        Ok(())
    }

    /// Type into the numeric input; the handle follows after the debounce.
    pub fn type_input(&mut self, text: &str, now: Duration) {
        if let Some(input) = self.input.as_mut() {
            input.type_text(text, now);
        }
    }

    /// Arrow or wheel on the numeric input: apply `steps` immediately.
    pub fn nudge_input(&mut self, steps: i32) {
        if self.handles.is_empty() {
            return;
        }
        let fallback = self.percent_to_value(self.handles[0].percent);
        let step = self.step;
        let Some(value) = self
            .input
            .as_mut()
            .map(|input| input.nudge(steps, step, fallback))
        else {
            return;
        };
        self.commit_input(value);
    }

    fn pointer_down(&mut self, id: &str, x: f64) -> Result<()> {
        let idx = self.index(id)?;
        if !self.handles[idx].draggable {
            return Ok(());
        }
        // a single pointer holds at most one handle
        for handle in self.handles.iter_mut().filter(|h| h.state.is_held()) {
            handle.state = HandleState::Idle;
        }
        let center = self.track.left + self.track.width * self.handles[idx].percent / 100.0;
        let handle = &mut self.handles[idx];
        handle.state = HandleState::Grabbed { offset: x - center };
        handle.animation = None;
        self.last_dragged = Some(idx);
        Ok(())
    }

    fn pointer_move(&mut self, x: f64) {
        let Some(idx) = self.handles.iter().position(|h| h.state.is_held()) else {
            return;
        };
        let Some(offset) = self.handles[idx].state.grab_offset() else {
            return;
        };
        self.handles[idx].state = HandleState::Dragging { offset };

        let width = self.track.width;
        if width <= 0.0 {
            return;
        }
        let handle = &self.handles[idx];
        let mut new_x = x - self.track.left - offset;
        new_x = clamp(new_x, width * handle.min / 100.0, width * handle.max / 100.0);
        new_x = clamp(new_x, 0.0, width);
        self.commit(idx, new_x / width * 100.0, true);
    }

    fn pointer_up(&mut self) {
        for handle in self.handles.iter_mut().filter(|h| h.state.is_held()) {
            handle.state = HandleState::Idle;
        }
    }

    fn focus(&mut self, id: &str) -> Result<()> {
        let idx = self.index(id)?;
        self.blur();
        if self.handles[idx].state == HandleState::Idle {
            self.handles[idx].state = HandleState::Focused;
        }
        Ok(())
    }

    fn blur(&mut self) {
        for handle in self
            .handles
            .iter_mut()
            .filter(|h| h.state == HandleState::Focused)
        {
            handle.state = HandleState::Idle;
        }
    }

    /// One step per arrow press, clamped to the handle's dynamic bounds.
    fn key(&mut self, key: ArrowKey) {
        let Some(idx) = self
            .handles
            .iter()
            .position(|h| h.state == HandleState::Focused && h.draggable)
        else {
            return;
        };
        let delta = match key {
            ArrowKey::Left => -self.step,
            ArrowKey::Right => self.step,
        };
        let step_percent = delta / (self.max - self.min) * 100.0;
        let percent = self.handles[idx].clamp(self.handles[idx].percent + step_percent);
        self.handles[idx].animation = None;
        self.last_dragged = Some(idx);
        self.commit(idx, percent, true);
    }

    /// Jump the nearest draggable handle to the click position.
    ///
    /// Ties go to the most recently dragged handle.
    fn click(&mut self, x: f64) {
        if !self.click_to_jump || self.track.width <= 0.0 {
            return;
        }
        let percent = clamp((x - self.track.left) / self.track.width * 100.0, 0.0, 100.0);

        let mut best: Option<(usize, f64)> = None;
        for (idx, handle) in self.handles.iter().enumerate() {
            if !handle.draggable {
                continue;
            }
            let distance = (handle.percent - percent).abs();
            let better = match best {
                None => true,
                Some((_, best_distance)) => {
                    distance < best_distance
                        || (distance == best_distance && self.last_dragged == Some(idx))
                }
            };
            if better {
                best = Some((idx, distance));
            }
        }
        let Some((idx, _)) = best else {
            return;
        };

        let target = self.handles[idx].clamp(percent);
        self.last_dragged = Some(idx);
        if self.animation.is_zero() {
            self.commit(idx, target, true);
        } else {
            self.animate(idx, target, self.animation, true);
        }
    }

    fn tick(&mut self, now: Duration) {
        for idx in 0..self.handles.len() {
            let Some(animation) = self.handles[idx].animation.as_mut() else {
                continue;
            };
            let user = animation.user;
            let Some((percent, done)) = animation.sample(now) else {
                continue;
            };
            if done {
                self.handles[idx].animation = None;
            }
            self.commit(idx, percent, user);
        }

        let committed = self.input.as_mut().and_then(|input| input.poll(now));
        if let Some(value) = committed {
            self.commit_input(value);
        }
    }

    fn animate(&mut self, idx: usize, target: f64, duration: Duration, user: bool) {
        let from = self.handles[idx].percent;
        self.handles[idx].animation = Some(Animation::new(from, target, duration, user));
    }

    fn commit_input(&mut self, value: f64) {
        if self.handles.is_empty() {
            return;
        }
        let percent = self.handles[0].clamp(self.value_to_percent(value));
        self.handles[0].animation = None;
        self.commit(0, percent, false);
        let shown = self.percent_to_value(percent);
        if let Some(input) = self.input.as_mut() {
            input.show(shown);
        }
    }

    fn commit(&mut self, idx: usize, percent: f64, user: bool) {
        self.handles[idx].percent = percent;
        let value = self.percent_to_value(percent);
        self.show_in_input(idx, value);

        let handle = self.handles[idx].id.clone();
        if user {
            self.events.push(SliderEvent {
                handle: handle.clone(),
                kind: SliderEventKind::Dragged,
                percent,
                value,
            });
        }
        self.events.push(SliderEvent {
            handle,
            kind: SliderEventKind::Changed,
            percent,
            value,
        });
    }

    /// Mirror the first handle's value in the input unless the user is typing.
    fn show_in_input(&mut self, idx: usize, value: f64) {
        if idx != 0 {
            return;
        }
        if let Some(input) = self.input.as_mut().filter(|input| !input.is_pending()) {
            input.show(value);
        }
    }
}

fn not_found(id: &str) -> GradientError {
    GradientError::HandleNotFound { id: id.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::float_cmp::approx_eq;
    use pretty_assertions::assert_eq;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn stop_slider() -> Slider {
        let mut slider = Slider::new(0.0, 100.0, 1.0).unwrap();
        slider.add_handle(HandleSpec::new("left", 25.0)).unwrap();
        slider.add_handle(HandleSpec::new("mid", 50.0)).unwrap();
        slider.add_handle(HandleSpec::new("right", 75.0)).unwrap();
        slider
    }

    fn kinds(events: &[SliderEvent]) -> Vec<(String, SliderEventKind)> {
        events.iter().map(|e| (e.handle.clone(), e.kind)).collect()
    }

    #[test]
    fn test_invalid_construction() {
        assert!(matches!(
            Slider::new(10.0, 10.0, 1.0),
            Err(GradientError::InvalidRange { .. })
        ));
        assert!(matches!(
            Slider::new(0.0, 10.0, 0.0),
            Err(GradientError::InvalidStep { .. })
        ));
    }

    #[test]
    fn test_duplicate_handle_rejected() {
        let mut slider = stop_slider();
        let err = slider.add_handle(HandleSpec::new("mid", 10.0)).unwrap_err();
        assert!(matches!(err, GradientError::DuplicateHandle { ref id } if id == "mid"));
    }

    #[test]
    fn test_unknown_handle() {
        let slider = stop_slider();
        assert!(matches!(
            slider.value("nope"),
            Err(GradientError::HandleNotFound { .. })
        ));
    }

    #[test]
    fn test_percent_value_round_trip() {
        let slider = Slider::new(0.0, 360.0, 1.0).unwrap();
        for v in [0.0, 1.0, 45.0, 180.0, 336.0, 359.0, 360.0] {
            assert_eq!(slider.percent_to_value(slider.value_to_percent(v)), v);
        }
        let slider = Slider::new(-10.0, 10.0, 5.0).unwrap();
        assert_eq!(slider.percent_to_value(slider.value_to_percent(3.0)), 5.0);
        assert_eq!(slider.percent_to_value(slider.value_to_percent(-7.0)), -5.0);
    }

    #[test]
    fn test_initial_value_clamped_into_bounds() {
        let mut slider = Slider::new(0.0, 200.0, 1.0).unwrap();
        slider
            .add_handle(HandleSpec::new("h", 180.0).min(20.0).max(100.0))
            .unwrap();
        assert_eq!(slider.percent("h").unwrap(), 50.0);
        assert_eq!(slider.value("h").unwrap(), 100.0);
    }

    #[test]
    fn test_set_percent_respects_handle_max() {
        let mut slider = stop_slider();
        slider.set_handle_max("left", 40.0).unwrap();
        slider.set_percent("left", 60.0, None).unwrap();
        assert!(slider.percent("left").unwrap() <= 40.0);
    }

    #[test]
    fn test_set_emits_exactly_one_changed() {
        let mut slider = stop_slider();
        slider.set_value("mid", 60.0, None).unwrap();
        let events = slider.drain_events();
        assert_eq!(
            kinds(&events),
            vec![("mid".to_string(), SliderEventKind::Changed)]
        );
        assert_eq!(events[0].value, 60.0);
        assert!(slider.drain_events().is_empty());
    }

    #[test]
    fn test_tightening_bounds_does_not_move_handle() {
        let mut slider = stop_slider();
        slider.set_handle_max_percent("right", 60.0).unwrap();
        assert_eq!(slider.percent("right").unwrap(), 75.0);
        assert!(slider.drain_events().is_empty());
    }

    #[test]
    fn test_pointer_drag_with_grab_offset() {
        let mut slider = stop_slider().track(Track {
            left: 100.0,
            width: 200.0,
        });
        // handle center at 150; grab 4px to its right
        slider
            .apply(SliderInput::PointerDown {
                handle: "left".into(),
                x: 154.0,
            })
            .unwrap();
        assert_eq!(
            slider.handle("left").unwrap().state(),
            HandleState::Grabbed { offset: 4.0 }
        );
        slider.apply(SliderInput::PointerMove { x: 184.0 }).unwrap();
        assert!(approx_eq(slider.percent("left").unwrap(), 40.0));
        assert_eq!(
            kinds(&slider.drain_events()),
            vec![
                ("left".to_string(), SliderEventKind::Dragged),
                ("left".to_string(), SliderEventKind::Changed),
            ]
        );

        slider.apply(SliderInput::PointerUp).unwrap();
        slider.apply(SliderInput::PointerMove { x: 250.0 }).unwrap();
        assert!(slider.drain_events().is_empty());
        assert_eq!(slider.handle("left").unwrap().state(), HandleState::Idle);
    }

    #[test]
    fn test_drag_clamped_to_bounds_and_track() {
        let mut slider = stop_slider();
        slider.set_handle_max_percent("left", 45.0).unwrap();
        slider
            .apply(SliderInput::PointerDown {
                handle: "left".into(),
                x: 25.0,
            })
            .unwrap();
        slider.apply(SliderInput::PointerMove { x: 90.0 }).unwrap();
        assert_eq!(slider.percent("left").unwrap(), 45.0);
        slider.apply(SliderInput::PointerMove { x: -30.0 }).unwrap();
        assert_eq!(slider.percent("left").unwrap(), 0.0);
    }

    #[test]
    fn test_undraggable_handle_ignores_pointer() {
        let mut slider = Slider::new(0.0, 100.0, 1.0).unwrap();
        slider
            .add_handle(HandleSpec::new("fixed", 30.0).draggable(false))
            .unwrap();
        slider
            .apply(SliderInput::PointerDown {
                handle: "fixed".into(),
                x: 30.0,
            })
            .unwrap();
        slider.apply(SliderInput::PointerMove { x: 70.0 }).unwrap();
        assert_eq!(slider.percent("fixed").unwrap(), 30.0);
    }

    #[test]
    fn test_keyboard_steps_within_dynamic_bounds() {
        let mut slider = stop_slider();
        slider.set_handle_max_percent("left", 26.0).unwrap();
        slider.apply(SliderInput::Focus("left".into())).unwrap();
        slider.apply(SliderInput::Key(ArrowKey::Right)).unwrap();
        assert_eq!(slider.value("left").unwrap(), 26.0);
        slider.apply(SliderInput::Key(ArrowKey::Right)).unwrap();
        assert_eq!(slider.value("left").unwrap(), 26.0);
        slider.apply(SliderInput::Key(ArrowKey::Left)).unwrap();
        assert_eq!(slider.value("left").unwrap(), 25.0);

        slider.apply(SliderInput::Blur).unwrap();
        slider.drain_events();
        slider.apply(SliderInput::Key(ArrowKey::Left)).unwrap();
        assert!(slider.drain_events().is_empty());
    }

    #[test]
    fn test_keyboard_steps_from_exact_position() {
        let mut slider = stop_slider();
        slider.reposition("left", 25.5).unwrap();
        slider.apply(SliderInput::Focus("left".into())).unwrap();
        slider.apply(SliderInput::Key(ArrowKey::Right)).unwrap();
        assert!(approx_eq(slider.percent("left").unwrap(), 26.5));
        slider.apply(SliderInput::Key(ArrowKey::Left)).unwrap();
        slider.apply(SliderInput::Key(ArrowKey::Left)).unwrap();
        assert!(approx_eq(slider.percent("left").unwrap(), 24.5));
    }

    #[test]
    fn test_click_jumps_nearest_handle_animated() {
        let mut slider = stop_slider().click_to_jump(true).animation(ms(200));
        slider.apply(SliderInput::Tick(ms(1000))).unwrap();
        slider.apply(SliderInput::Click { x: 90.0 }).unwrap();
        assert!(slider.handle("right").unwrap().is_animating());
        assert!(slider.drain_events().is_empty());

        slider.apply(SliderInput::Tick(ms(1100))).unwrap();
        assert_eq!(slider.percent("right").unwrap(), 75.0);
        slider.apply(SliderInput::Tick(ms(1200))).unwrap();
        assert!(approx_eq(slider.percent("right").unwrap(), 82.5));
        slider.apply(SliderInput::Tick(ms(1300))).unwrap();
        assert_eq!(slider.percent("right").unwrap(), 90.0);
        assert!(!slider.handle("right").unwrap().is_animating());

        let events = slider.drain_events();
        assert_eq!(events.len(), 4);
        assert!(events.iter().all(|e| e.handle == "right"));
        assert_eq!(slider.percent("left").unwrap(), 25.0);
    }

    #[test]
    fn test_click_after_idle_clock_still_animates() {
        let mut slider = stop_slider().click_to_jump(true).animation(ms(200));
        slider.apply(SliderInput::Tick(ms(1000))).unwrap();
        slider.apply(SliderInput::Click { x: 90.0 }).unwrap();

        // host stopped ticking for a while
        slider.apply(SliderInput::Tick(ms(5000))).unwrap();
        slider.apply(SliderInput::Tick(ms(5016))).unwrap();
        let percent = slider.percent("right").unwrap();
        assert!(approx_eq(percent, 76.2), "jumped to {percent}");
        assert!(slider.handle("right").unwrap().is_animating());

        slider.apply(SliderInput::Tick(ms(5200))).unwrap();
        assert_eq!(slider.percent("right").unwrap(), 90.0);
    }

    #[test]
    fn test_click_disabled_by_default() {
        let mut slider = stop_slider();
        slider.apply(SliderInput::Click { x: 90.0 }).unwrap();
        assert_eq!(slider.percent("right").unwrap(), 75.0);
    }

    #[test]
    fn test_new_animation_supersedes_previous() {
        let mut slider = stop_slider();
        slider.set_percent("mid", 90.0, Some(ms(100))).unwrap();
        slider.apply(SliderInput::Tick(ms(0))).unwrap();
        slider.apply(SliderInput::Tick(ms(50))).unwrap();
        assert!(approx_eq(slider.percent("mid").unwrap(), 70.0));
        slider.set_percent("mid", 10.0, Some(ms(100))).unwrap();
        slider.apply(SliderInput::Tick(ms(60))).unwrap();
        assert!(approx_eq(slider.percent("mid").unwrap(), 70.0));
        slider.apply(SliderInput::Tick(ms(160))).unwrap();
        assert_eq!(slider.percent("mid").unwrap(), 10.0);
        let events = slider.drain_events();
        assert!(events.iter().all(|e| e.kind == SliderEventKind::Changed));
    }

    #[test]
    fn test_numeric_input_debounced_commit() {
        let mut slider = Slider::new(0.0, 360.0, 1.0)
            .unwrap()
            .show_input(ms(400));
        slider.add_handle(HandleSpec::new("hue", 336.0)).unwrap();
        assert_eq!(slider.input().unwrap().text(), "336");

        slider.type_input("12", ms(0));
        slider.type_input("120", ms(100));
        slider.apply(SliderInput::Tick(ms(400))).unwrap();
        assert_eq!(slider.value("hue").unwrap(), 336.0);
        slider.apply(SliderInput::Tick(ms(500))).unwrap();
        assert_eq!(slider.value("hue").unwrap(), 120.0);
        assert_eq!(slider.drain_events().len(), 1);

        slider.nudge_input(1);
        assert_eq!(slider.value("hue").unwrap(), 121.0);
        assert_eq!(slider.input().unwrap().text(), "121");
    }

    #[test]
    fn test_numeric_input_clamped_and_rewritten() {
        let mut slider = Slider::new(0.0, 100.0, 1.0).unwrap().show_input(ms(0));
        slider.add_handle(HandleSpec::new("chroma", 50.0)).unwrap();
        slider.type_input("250", ms(0));
        slider.apply(SliderInput::Tick(ms(0))).unwrap();
        assert_eq!(slider.value("chroma").unwrap(), 100.0);
        assert_eq!(slider.input().unwrap().text(), "100");
    }

    #[test]
    fn test_reposition_is_silent() {
        let mut slider = stop_slider();
        slider.reposition("left", 10.0).unwrap();
        assert_eq!(slider.percent("left").unwrap(), 10.0);
        assert!(slider.drain_events().is_empty());
    }
}
