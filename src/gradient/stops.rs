//! Stop handles and the piecewise-linear stop-to-fraction mapping.

/// One of the three movable stops on the preview bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopHandle {
    Left,
    Mid,
    Right,
}

impl StopHandle {
    pub const ALL: [StopHandle; 3] = [StopHandle::Left, StopHandle::Mid, StopHandle::Right];

    pub fn id(&self) -> &'static str {
        match self {
            StopHandle::Left => "handleLeft",
            StopHandle::Mid => "handleMid",
            StopHandle::Right => "handleRight",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.id() == id)
    }

    /// Interpolation fraction this stop pins its position to.
    pub fn fraction(&self) -> f64 {
        match self {
            StopHandle::Left => 0.25,
            StopHandle::Mid => 0.5,
            StopHandle::Right => 0.75,
        }
    }
}

/// Map a position `p` in `[0, 1]` along the bar to an interpolation fraction.
///
/// `stops` are the left/mid/right handle positions in percent. The curve
/// passes through `(0, 0)`, each stop at its pinned fraction, and `(1, 1)`,
/// linear in between. Positions outside `[0, 1]` are clamped. A stop that
/// sits before its predecessor is treated as coincident with it, so the
/// result never decreases as `p` grows.
pub fn compute_stop_fraction(stops: [f64; 3], p: f64) -> f64 {
    let [left, mid, right] = stops;
    let left = left.max(0.0).min(100.0);
    let mid = mid.max(left).min(100.0);
    let right = right.max(mid).min(100.0);
    // descending by position
    let anchors = [
        (1.0, 1.0),
        (right / 100.0, StopHandle::Right.fraction()),
        (mid / 100.0, StopHandle::Mid.fraction()),
        (left / 100.0, StopHandle::Left.fraction()),
        (0.0, 0.0),
    ];
    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };

    let Some(idx) = anchors.iter().position(|&(pos, _)| pos <= p) else {
        return 0.0;
    };
    if idx == 0 {
        return 1.0;
    }

    let (lower_pos, lower_frac) = anchors[idx];
    let (upper_pos, upper_frac) = anchors[idx - 1];
    let span = upper_pos - lower_pos;
    if span <= 0.0 {
        return lower_frac;
    }
    lower_frac + (p - lower_pos) / span * (upper_frac - lower_frac)
}
