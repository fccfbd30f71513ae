//! Slider handles and their interaction state.

use std::time::Duration;

/// Registration data for a new handle.
///
/// Bounds are in slider value units and default to the slider's full range.
#[derive(Debug, Clone, PartialEq)]
pub struct HandleSpec {
    pub id: String,
    pub value: f64,
    pub draggable: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl HandleSpec {
    pub fn new(id: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            value,
            draggable: true,
            min: None,
            max: None,
        }
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }
}

/// Pointer and keyboard interaction state of a single handle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum HandleState {
    #[default]
    Idle,
    /// Pointer is down on the handle; `offset` is pointer x minus handle center.
    Grabbed { offset: f64 },
    /// Pointer has moved since it was grabbed.
    Dragging { offset: f64 },
    /// Handle has keyboard focus.
    Focused,
}

impl HandleState {
    pub fn is_held(&self) -> bool {
        matches!(self, HandleState::Grabbed { .. } | HandleState::Dragging { .. })
    }

    pub(crate) fn grab_offset(&self) -> Option<f64> {
        match self {
            HandleState::Grabbed { offset } | HandleState::Dragging { offset } => Some(*offset),
            _ => None,
        }
    }
}

/// Time-sliced transition towards a target percent.
///
/// The clock starts on the first tick after the transition is created, so an
/// idle gap before that tick does not eat into the duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Animation {
    pub from: f64,
    pub to: f64,
    pub started: Option<Duration>,
    pub duration: Duration,
    /// Started by a user interaction (frames also report `Dragged`).
    pub user: bool,
}

impl Animation {
    pub fn new(from: f64, to: f64, duration: Duration, user: bool) -> Self {
        Self {
            from,
            to,
            started: None,
            duration,
            user,
        }
    }

    /// Position at `now` and whether the transition has finished.
    ///
    /// The first call only anchors the start time and yields `None`.
    pub fn sample(&mut self, now: Duration) -> Option<(f64, bool)> {
        let Some(started) = self.started else {
            self.started = Some(now);
            return None;
        };
        let elapsed = now.saturating_sub(started);
        if self.duration.is_zero() || elapsed >= self.duration {
            return Some((self.to, true));
        }
        let progress = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        Some((self.from + (self.to - self.from) * progress, false))
    }
}

/// A positioned control point on a slider track.
#[derive(Debug, Clone, PartialEq)]
pub struct Handle {
    pub(crate) id: String,
    pub(crate) percent: f64,
    pub(crate) min: f64,
    pub(crate) max: f64,
    pub(crate) draggable: bool,
    pub(crate) state: HandleState,
    pub(crate) animation: Option<Animation>,
}

impl Handle {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Position in percent of the track.
    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// Lower travel bound in percent.
    pub fn min_percent(&self) -> f64 {
        self.min
    }

    /// Upper travel bound in percent.
    pub fn max_percent(&self) -> f64 {
        self.max
    }

    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    pub fn state(&self) -> HandleState {
        self.state
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Clamp a percent into this handle's bounds, then into the track.
    ///
    /// Bounds that cross (min above max) resolve to max, like
    /// `min(max(p, lo), hi)`.
    pub fn clamp(&self, percent: f64) -> f64 {
        clamp(clamp(percent, self.min, self.max), 0.0, 100.0)
    }
}

/// `min(max(num, lo), hi)` without panicking on crossed bounds or NaN.
pub fn clamp(num: f64, lo: f64, hi: f64) -> f64 {
    let num = if num.is_nan() { lo } else { num };
    num.max(lo).min(hi)
}
