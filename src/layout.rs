//! Container measurement and resize handling.

use crate::transform::initial_offsets;
use crate::Surface;

/// Default resize throttle delay in milliseconds.
pub const DEFAULT_RESIZE_THROTTLE_MS: u64 = 50;

/// Delay before page heights are measured, letting the layout settle.
pub const HEIGHT_MEASURE_DELAY_MS: u64 = 1;

/// Rate limiter for resize recalculation.
///
/// Implementations decide whether a call runs right away and when a deferred
/// call is due.
pub trait Throttle: std::fmt::Debug {
    /// Register a call at `now_ms`. Returns true if it should run immediately.
    fn call(&mut self, now_ms: u64) -> bool;

    /// Returns true if a deferred call is due at `now_ms`.
    fn poll(&mut self, now_ms: u64) -> bool;

    /// Time of the pending deferred call, if any.
    fn deadline(&self) -> Option<u64> {
        None
    }
}

/// Leading-edge throttle with a trailing call.
///
/// The first call in a window runs immediately; further calls inside the
/// window collapse into a single call at the end of it.
///
/// ## Example
///
/// ```rust
/// use fade_slider::layout::{LeadingThrottle, Throttle};
///
/// let mut throttle = LeadingThrottle::new(50);
/// assert!(throttle.call(0));
/// assert!(!throttle.call(10));
/// assert!(!throttle.poll(49));
/// assert!(throttle.poll(50));
/// ```
#[derive(Clone, Debug)]
pub struct LeadingThrottle {
    delay_ms: u64,
    last_run: Option<u64>,
    trailing_at: Option<u64>,
}

impl LeadingThrottle {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            last_run: None,
            trailing_at: None,
        }
    }
}

impl Throttle for LeadingThrottle {
    fn call(&mut self, now_ms: u64) -> bool {
        match self.last_run {
            Some(last) if now_ms < last + self.delay_ms => {
                self.trailing_at.get_or_insert(last + self.delay_ms);
                false
            }
            _ => {
                self.last_run = Some(now_ms);
                self.trailing_at = None;
                true
            }
        }
    }

    fn poll(&mut self, now_ms: u64) -> bool {
        match self.trailing_at {
            Some(at) if at <= now_ms => {
                self.trailing_at = None;
                self.last_run = Some(at);
                true
            }
            _ => false,
        }
    }

    fn deadline(&self) -> Option<u64> {
        self.trailing_at
    }
}

/// Cached container geometry.
#[derive(Clone, Debug, Default)]
pub struct Layout {
    viewport_width: Option<f64>,
    container_size: f64,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached container width in pixels.
    #[inline]
    pub fn container_size(&self) -> f64 {
        self.container_size
    }

    /// Re-measure the container if the viewport width changed.
    ///
    /// Sets every page to the container width and lines the pages up
    /// edge to edge. Returns true if anything was recalculated.
    pub fn remeasure<S: Surface>(&mut self, surface: &mut S) -> bool {
        let viewport = surface.viewport_width();
        if self.viewport_width == Some(viewport) {
            return false;
        }

        self.viewport_width = Some(viewport);
        self.container_size = surface.container_width();
        log::debug!(
            "layout: viewport {}px, container {}px",
            viewport,
            self.container_size
        );

        let page_count = surface.page_count();
        for i in 0..page_count {
            surface.set_width(i, self.container_size);
        }
        for (i, transform) in initial_offsets(page_count, self.container_size) {
            surface.set_transform(i, transform);
        }
        true
    }

    /// Give the list and every page the height of the tallest page.
    ///
    /// Returns the applied height.
    pub fn apply_uniform_height<S: Surface>(surface: &mut S) -> f64 {
        let page_count = surface.page_count();
        let tallest = (0..page_count)
            .map(|i| surface.page_height(i))
            .fold(0.0, f64::max);

        surface.set_list_height(tallest);
        for i in 0..page_count {
            surface.set_height(i, tallest);
        }
        tallest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HeadlessSurface, Transform};

    #[test]
    fn test_throttle_leading_and_trailing() {
        let mut throttle = LeadingThrottle::new(50);
        assert!(throttle.call(100));
        assert!(!throttle.call(110));
        assert!(!throttle.call(140));
        assert_eq!(throttle.deadline(), Some(150));
        assert!(!throttle.poll(149));
        assert!(throttle.poll(150));
        assert!(!throttle.poll(151));

        // Window restarts at the trailing run
        assert!(!throttle.call(160));
        assert!(throttle.call(200));
    }

    #[test]
    fn test_throttle_without_burst_has_no_trailing() {
        let mut throttle = LeadingThrottle::new(50);
        assert!(throttle.call(0));
        assert!(!throttle.poll(1_000));
        assert!(throttle.call(1_000));
    }

    #[test]
    fn test_remeasure_only_on_viewport_change() {
        let mut surface = HeadlessSurface::new(3, 200.0);
        let mut layout = Layout::new();

        assert!(layout.remeasure(&mut surface));
        assert_eq!(layout.container_size(), 200.0);
        assert_eq!(surface.page(2).unwrap().transform, Transform::Translate(400.0));
        assert_eq!(surface.page(0).unwrap().width, Some(200.0));

        assert!(!layout.remeasure(&mut surface));

        surface.resize(800.0, 250.0);
        assert!(layout.remeasure(&mut surface));
        assert_eq!(layout.container_size(), 250.0);
        assert_eq!(surface.page(1).unwrap().transform, Transform::Translate(250.0));
    }

    #[test]
    fn test_container_change_without_viewport_change_is_ignored() {
        let mut surface = HeadlessSurface::new(2, 200.0);
        let mut layout = Layout::new();
        layout.remeasure(&mut surface);

        surface.resize(200.0, 180.0);
        assert!(!layout.remeasure(&mut surface));
        assert_eq!(layout.container_size(), 200.0);
    }

    #[test]
    fn test_uniform_height() {
        let mut surface =
            HeadlessSurface::new(3, 200.0).with_page_heights(vec![120.0, 180.0, 90.0]);
        assert_eq!(Layout::apply_uniform_height(&mut surface), 180.0);
        assert_eq!(surface.list_height(), Some(180.0));
        assert!(surface.pages().iter().all(|p| p.height == Some(180.0)));
    }
}
