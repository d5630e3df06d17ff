//! Pan gesture and tap interpretation.
//!
//! Gesture recognition itself happens elsewhere; this module only turns
//! recognized pan events and pointer presses into slider intents.

/// Deltas smaller than this (in pixels) are ignored.
pub const DEAD_ZONE: f64 = 20.0;

/// A released drag must exceed this percentage of the container to change page.
pub const COMMIT_THRESHOLD_PERCENT: f64 = 20.0;

/// A pointer moving less than this (in pixels) between press and release is a tap.
pub const TAP_THRESHOLD: f64 = 10.0;

/// Phase of a pan gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PanPhase {
    Start,
    Move,
    End,
    Cancel,
}

impl PanPhase {
    /// Parse a recognizer event name such as `"panmove"`.
    pub fn from_event_name(name: &str) -> Option<Self> {
        match name {
            "panstart" => Some(PanPhase::Start),
            "panmove" => Some(PanPhase::Move),
            "panend" => Some(PanPhase::End),
            "pancancel" => Some(PanPhase::Cancel),
            _ => None,
        }
    }

    /// Returns true for phases that finish the gesture.
    #[inline]
    pub fn is_final(&self) -> bool {
        matches!(self, PanPhase::End | PanPhase::Cancel)
    }
}

/// Axis the slider listens to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PanDirection {
    #[default]
    Horizontal,
    Vertical,
}

impl PanDirection {
    /// Pick the delta along this axis.
    #[inline]
    pub fn select(&self, delta_x: f64, delta_y: f64) -> f64 {
        match self {
            PanDirection::Horizontal => delta_x,
            PanDirection::Vertical => delta_y,
        }
    }
}

/// A recognized pan event with the cumulative delta since the gesture began.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanEvent {
    pub phase: PanPhase,
    pub delta_x: f64,
    pub delta_y: f64,
}

impl PanEvent {
    pub fn new(phase: PanPhase, delta_x: f64, delta_y: f64) -> Self {
        Self { phase, delta_x, delta_y }
    }

    /// Horizontal-only event.
    pub fn horizontal(phase: PanPhase, delta_x: f64) -> Self {
        Self::new(phase, delta_x, 0.0)
    }
}

/// One-page move requested by a gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Toward higher indices
    Forward,
    /// Toward lower indices
    Backward,
}

impl Step {
    /// Apply this step to `index`, staying within `page_count`.
    pub fn apply(&self, index: usize, page_count: usize) -> usize {
        match self {
            Step::Forward => (index + 1).min(page_count.saturating_sub(1)),
            Step::Backward => index.saturating_sub(1),
        }
    }
}

/// What a pan event asks the slider to do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanOutcome {
    /// Drag progress as a percentage of the container
    pub percent: f64,
    /// Whether to ease into the resulting position
    pub animate: bool,
    /// Page change committed by a released drag
    pub step: Option<Step>,
}

/// Interpret a pan event for a container of `container_size` pixels.
///
/// Returns `None` when the event falls inside the dead zone or when the
/// container has no width yet.
///
/// ## Example
///
/// ```rust
/// use fade_slider::gesture::{resolve_pan, PanDirection, PanEvent, PanPhase, Step};
///
/// let release = PanEvent::horizontal(PanPhase::End, -70.0);
/// let outcome = resolve_pan(&release, PanDirection::Horizontal, 300.0).unwrap();
/// assert_eq!(outcome.step, Some(Step::Forward));
/// assert_eq!(outcome.percent, 0.0);
/// assert!(outcome.animate);
///
/// let jitter = PanEvent::horizontal(PanPhase::Move, 15.0);
/// assert!(resolve_pan(&jitter, PanDirection::Horizontal, 300.0).is_none());
/// ```
pub fn resolve_pan(
    event: &PanEvent,
    direction: PanDirection,
    container_size: f64,
) -> Option<PanOutcome> {
    let delta = direction.select(event.delta_x, event.delta_y);
    if !delta.is_finite() || delta.abs() < DEAD_ZONE || container_size <= 0.0 {
        return None;
    }

    let percent = (100.0 / container_size) * delta;
    if !event.phase.is_final() {
        return Some(PanOutcome { percent, animate: false, step: None });
    }

    let step = if event.phase == PanPhase::End && percent.abs() > COMMIT_THRESHOLD_PERCENT {
        Some(if percent < 0.0 { Step::Forward } else { Step::Backward })
    } else {
        None
    };

    Some(PanOutcome { percent: 0.0, animate: true, step })
}

/// Tells taps apart from drags on individual pages.
#[derive(Clone, Debug, Default)]
pub struct TapTracker {
    press_x: Vec<f64>,
}

impl TapTracker {
    /// Create a tracker for `page_count` pages.
    pub fn new(page_count: usize) -> Self {
        Self { press_x: vec![0.0; page_count] }
    }

    /// Record a pointer press on a page.
    pub fn press(&mut self, page: usize, x: f64) {
        if let Some(slot) = self.press_x.get_mut(page) {
            *slot = x;
        }
    }

    /// Record a pointer release on a page. Returns true if it was a tap.
    pub fn release(&self, page: usize, x: f64) -> bool {
        match self.press_x.get(page) {
            Some(start) => (x - start).abs() < TAP_THRESHOLD,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dead_zone() {
        for phase in [PanPhase::Start, PanPhase::Move, PanPhase::End, PanPhase::Cancel] {
            let event = PanEvent::horizontal(phase, 15.0);
            assert!(resolve_pan(&event, PanDirection::Horizontal, 300.0).is_none());
            let event = PanEvent::horizontal(phase, -19.9);
            assert!(resolve_pan(&event, PanDirection::Horizontal, 300.0).is_none());
        }
    }

    #[test]
    fn test_move_percent() {
        let event = PanEvent::horizontal(PanPhase::Move, -150.0);
        let outcome = resolve_pan(&event, PanDirection::Horizontal, 300.0).unwrap();
        assert!((outcome.percent + 50.0).abs() < 1e-9);
        assert!(!outcome.animate);
        assert_eq!(outcome.step, None);
    }

    #[test]
    fn test_release_commits_direction() {
        let forward = PanEvent::horizontal(PanPhase::End, -70.0);
        let outcome = resolve_pan(&forward, PanDirection::Horizontal, 300.0).unwrap();
        assert_eq!(outcome.step, Some(Step::Forward));

        let backward = PanEvent::horizontal(PanPhase::End, 70.0);
        let outcome = resolve_pan(&backward, PanDirection::Horizontal, 300.0).unwrap();
        assert_eq!(outcome.step, Some(Step::Backward));
    }

    #[test]
    fn test_short_release_snaps_back() {
        // 50px on 300px is ~16.7%, under the commit threshold
        let event = PanEvent::horizontal(PanPhase::End, -50.0);
        let outcome = resolve_pan(&event, PanDirection::Horizontal, 300.0).unwrap();
        assert_eq!(outcome.step, None);
        assert_eq!(outcome.percent, 0.0);
        assert!(outcome.animate);
    }

    #[test]
    fn test_cancel_never_commits() {
        let event = PanEvent::horizontal(PanPhase::Cancel, -250.0);
        let outcome = resolve_pan(&event, PanDirection::Horizontal, 300.0).unwrap();
        assert_eq!(outcome.step, None);
        assert!(outcome.animate);
    }

    #[test]
    fn test_vertical_direction() {
        let event = PanEvent::new(PanPhase::Move, 200.0, -40.0);
        let outcome = resolve_pan(&event, PanDirection::Vertical, 400.0).unwrap();
        assert_eq!(outcome.percent, -10.0);
    }

    #[test]
    fn test_zero_width_container() {
        let event = PanEvent::horizontal(PanPhase::Move, -100.0);
        assert!(resolve_pan(&event, PanDirection::Horizontal, 0.0).is_none());
    }

    #[test]
    fn test_non_finite_delta_is_ignored() {
        for delta in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            for phase in [PanPhase::Move, PanPhase::End] {
                let event = PanEvent::horizontal(phase, delta);
                assert!(resolve_pan(&event, PanDirection::Horizontal, 300.0).is_none());
            }
        }
    }

    #[test]
    fn test_step_clamps() {
        assert_eq!(Step::Forward.apply(2, 3), 2);
        assert_eq!(Step::Forward.apply(0, 3), 1);
        assert_eq!(Step::Backward.apply(0, 3), 0);
        assert_eq!(Step::Backward.apply(2, 3), 1);
    }

    #[test]
    fn test_event_names() {
        assert_eq!(PanPhase::from_event_name("panend"), Some(PanPhase::End));
        assert_eq!(PanPhase::from_event_name("tap"), None);
    }

    #[test]
    fn test_tap_tracker() {
        let mut taps = TapTracker::new(2);
        taps.press(1, 100.0);
        assert!(taps.release(1, 109.0));
        assert!(!taps.release(1, 110.0));
        assert!(!taps.release(5, 100.0));
    }
}
