//! Renderable surface abstraction.
//!
//! The slider never touches a rendering backend directly. It reads geometry
//! from and writes styles to a [`Surface`], so the same logic drives a DOM
//! (see the `web` feature), a native widget tree, or the in-memory
//! [`HeadlessSurface`].

use crate::Transform;

/// A container holding pages and indicators that the slider can style.
///
/// Page and indicator indices passed to the setters are always in range.
pub trait Surface {
    /// Number of pages in the container.
    fn page_count(&self) -> usize;

    /// Number of indicators. May be zero.
    fn indicator_count(&self) -> usize;

    /// Current container width in pixels.
    fn container_width(&self) -> f64;

    /// Current viewport width in pixels.
    fn viewport_width(&self) -> f64;

    /// Rendered height of a page in pixels.
    fn page_height(&self, index: usize) -> f64;

    fn set_transform(&mut self, index: usize, transform: Transform);

    fn set_opacity(&mut self, index: usize, opacity: f64);

    fn set_width(&mut self, index: usize, width: f64);

    fn set_height(&mut self, index: usize, height: f64);

    /// Set the height of the list wrapping the pages.
    fn set_list_height(&mut self, height: f64);

    /// Toggle eased transitions on the container.
    fn set_animated(&mut self, animated: bool);

    /// Toggle linear (uneased) transitions used during multi-page flips.
    fn set_linear_ease(&mut self, enabled: bool);

    fn set_indicator_active(&mut self, index: usize, active: bool);

    /// Called once the slider finished its initial layout.
    fn mark_initialized(&mut self) {}
}

/// Display state of one page on a [`HeadlessSurface`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageStyle {
    pub transform: Transform,
    pub opacity: f64,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl Default for PageStyle {
    fn default() -> Self {
        Self {
            transform: Transform::default(),
            opacity: 1.0,
            width: None,
            height: None,
        }
    }
}

/// In-memory surface that records every style it receives.
///
/// Useful for tests and for hosts that read the resulting styles back and
/// render them on their own.
///
/// ## Example
///
/// ```rust
/// use fade_slider::{HeadlessSurface, Slider, SliderConfig};
///
/// let surface = HeadlessSurface::new(3, 300.0);
/// let slider = Slider::new(surface, SliderConfig::default()).unwrap();
///
/// let pages = slider.surface().pages();
/// assert_eq!(pages[1].transform.offset(), 300.0);
/// assert_eq!(pages[1].width, Some(300.0));
/// ```
#[derive(Clone, Debug)]
pub struct HeadlessSurface {
    pages: Vec<PageStyle>,
    page_heights: Vec<f64>,
    indicators: Vec<bool>,
    container_width: f64,
    viewport_width: f64,
    list_height: Option<f64>,
    animated: bool,
    linear_ease: bool,
    initialized: bool,
}

impl HeadlessSurface {
    /// Create a surface with `page_count` pages, one indicator per page,
    /// and a viewport as wide as the container.
    pub fn new(page_count: usize, container_width: f64) -> Self {
        Self {
            pages: vec![PageStyle::default(); page_count],
            page_heights: vec![0.0; page_count],
            indicators: vec![false; page_count],
            container_width,
            viewport_width: container_width,
            list_height: None,
            animated: false,
            linear_ease: false,
            initialized: false,
        }
    }

    /// Replace the number of indicators.
    pub fn with_indicators(mut self, count: usize) -> Self {
        self.indicators = vec![false; count];
        self
    }

    /// Set the measured page heights. Missing entries count as 0.
    pub fn with_page_heights(mut self, heights: Vec<f64>) -> Self {
        self.page_heights = heights;
        self.page_heights.resize(self.pages.len(), 0.0);
        self
    }

    /// Simulate a window resize.
    pub fn resize(&mut self, viewport_width: f64, container_width: f64) {
        self.viewport_width = viewport_width;
        self.container_width = container_width;
    }

    /// Current style of every page.
    #[inline]
    pub fn pages(&self) -> &[PageStyle] {
        &self.pages
    }

    /// Current style of one page.
    #[inline]
    pub fn page(&self, index: usize) -> Option<&PageStyle> {
        self.pages.get(index)
    }

    /// Index of the active indicator, if exactly one is active.
    pub fn active_indicator(&self) -> Option<usize> {
        let mut active = self.indicators.iter().enumerate().filter(|(_, a)| **a);
        match (active.next(), active.next()) {
            (Some((i, _)), None) => Some(i),
            _ => None,
        }
    }

    #[inline]
    pub fn list_height(&self) -> Option<f64> {
        self.list_height
    }

    #[inline]
    pub fn is_animated(&self) -> bool {
        self.animated
    }

    #[inline]
    pub fn is_linear_ease(&self) -> bool {
        self.linear_ease
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl Surface for HeadlessSurface {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn indicator_count(&self) -> usize {
        self.indicators.len()
    }

    fn container_width(&self) -> f64 {
        self.container_width
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn page_height(&self, index: usize) -> f64 {
        self.page_heights.get(index).copied().unwrap_or(0.0)
    }

    fn set_transform(&mut self, index: usize, transform: Transform) {
        if let Some(page) = self.pages.get_mut(index) {
            page.transform = transform;
        }
    }

    fn set_opacity(&mut self, index: usize, opacity: f64) {
        if let Some(page) = self.pages.get_mut(index) {
            page.opacity = opacity;
        }
    }

    fn set_width(&mut self, index: usize, width: f64) {
        if let Some(page) = self.pages.get_mut(index) {
            page.width = Some(width);
        }
    }

    fn set_height(&mut self, index: usize, height: f64) {
        if let Some(page) = self.pages.get_mut(index) {
            page.height = Some(height);
        }
    }

    fn set_list_height(&mut self, height: f64) {
        self.list_height = Some(height);
    }

    fn set_animated(&mut self, animated: bool) {
        self.animated = animated;
    }

    fn set_linear_ease(&mut self, enabled: bool) {
        self.linear_ease = enabled;
    }

    fn set_indicator_active(&mut self, index: usize, active: bool) {
        if let Some(indicator) = self.indicators.get_mut(index) {
            *indicator = active;
        }
    }

    fn mark_initialized(&mut self) {
        self.initialized = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_defaults() {
        let surface = HeadlessSurface::new(3, 320.0);
        assert_eq!(surface.page_count(), 3);
        assert_eq!(surface.indicator_count(), 3);
        assert_eq!(surface.viewport_width(), 320.0);
        assert_eq!(surface.active_indicator(), None);
        assert!(!surface.is_initialized());
    }

    #[test]
    fn test_active_indicator_requires_exactly_one() {
        let mut surface = HeadlessSurface::new(3, 100.0);
        surface.set_indicator_active(1, true);
        assert_eq!(surface.active_indicator(), Some(1));

        surface.set_indicator_active(2, true);
        assert_eq!(surface.active_indicator(), None);
    }

    #[test]
    fn test_page_heights_padded() {
        let surface = HeadlessSurface::new(3, 100.0).with_page_heights(vec![10.0]);
        assert_eq!(surface.page_height(0), 10.0);
        assert_eq!(surface.page_height(2), 0.0);
        assert_eq!(surface.page_height(7), 0.0);
    }

    #[test]
    fn test_transform_replaces_previous() {
        let mut surface = HeadlessSurface::new(1, 100.0);
        surface.set_transform(0, Transform::Translate(40.0));
        surface.set_transform(0, Transform::Scale(0.5));
        let page = surface.page(0).unwrap();
        assert_eq!(page.transform.offset(), 0.0);
        assert_eq!(page.transform.scale(), 0.5);
    }
}
