//! DOM surface for browser hosts.
//!
//! Expects the usual slider markup:
//!
//! ```html
//! <div class="fade-slider">
//!   <ul class="fade-slider__list">
//!     <li class="fade-slider__page">...</li>
//!     <li class="fade-slider__page">...</li>
//!   </ul>
//!   <ul class="fade-slider__indicators">
//!     <li class="fade-slider__indicator"></li>
//!     <li class="fade-slider__indicator"></li>
//!   </ul>
//! </div>
//! ```
//!
//! Event wiring (pan recognizer, pointer and resize listeners, timers) stays
//! with the host; it forwards events to the [`Slider`](crate::Slider) and
//! calls `tick` with [`Clock::elapsed_ms`].

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::{SliderError, Surface, Transform};

const PAGE_SELECTOR: &str = ".fade-slider__page";
const INDICATOR_SELECTOR: &str = ".fade-slider__indicator";
const LIST_SELECTOR: &str = ".fade-slider__list";

const ANIMATE_CLASS: &str = "animate";
const LINEAR_EASE_CLASS: &str = "linear-ease";
const ACTIVE_CLASS: &str = "active";
const INITIALIZED_CLASS: &str = "initialized";

/// A [`Surface`] backed by DOM elements.
#[derive(Clone, Debug)]
pub struct DomSurface {
    container: HtmlElement,
    list: Option<HtmlElement>,
    pages: Vec<HtmlElement>,
    indicators: Vec<HtmlElement>,
}

impl DomSurface {
    /// Collect pages, indicators and the page list below `container`.
    pub fn from_container(container: &Element) -> Result<Self, SliderError> {
        let container = container
            .clone()
            .dyn_into::<HtmlElement>()
            .map_err(|_| SliderError::MissingElement("container is not an HTML element".into()))?;

        let pages = query_all(&container, PAGE_SELECTOR)?;
        if pages.is_empty() {
            return Err(SliderError::NoPages);
        }
        let indicators = query_all(&container, INDICATOR_SELECTOR)?;
        let list = container
            .query_selector(LIST_SELECTOR)
            .map_err(|_| SliderError::MissingElement(LIST_SELECTOR.into()))?
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        Ok(Self {
            container,
            list,
            pages,
            indicators,
        })
    }

    /// The slider container.
    #[inline]
    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    /// Index of a page element, if it belongs to this slider.
    pub fn page_index(&self, element: &Element) -> Option<usize> {
        self.pages
            .iter()
            .position(|page| page.unchecked_ref::<Element>() == element)
    }

    /// Index of an indicator element, if it belongs to this slider.
    pub fn indicator_index(&self, element: &Element) -> Option<usize> {
        self.indicators
            .iter()
            .position(|indicator| indicator.unchecked_ref::<Element>() == element)
    }
}

impl Surface for DomSurface {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn indicator_count(&self) -> usize {
        self.indicators.len()
    }

    fn container_width(&self) -> f64 {
        self.container.get_bounding_client_rect().width()
    }

    fn viewport_width(&self) -> f64 {
        web_sys::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0)
    }

    fn page_height(&self, index: usize) -> f64 {
        self.pages[index].get_bounding_client_rect().height()
    }

    fn set_transform(&mut self, index: usize, transform: Transform) {
        let css = transform.css();
        let style = self.pages[index].style();
        for property in ["transform", "-webkit-transform", "-moz-transform"] {
            if style.set_property(property, &css).is_err() {
                log::warn!("failed to set {} on page {}", property, index);
            }
        }
    }

    fn set_opacity(&mut self, index: usize, opacity: f64) {
        set_style(&self.pages[index], "opacity", &opacity.to_string());
    }

    fn set_width(&mut self, index: usize, width: f64) {
        set_style(&self.pages[index], "width", &format!("{width}px"));
    }

    fn set_height(&mut self, index: usize, height: f64) {
        set_style(&self.pages[index], "height", &format!("{height}px"));
    }

    fn set_list_height(&mut self, height: f64) {
        if let Some(list) = &self.list {
            set_style(list, "height", &format!("{height}px"));
        }
    }

    fn set_animated(&mut self, animated: bool) {
        toggle_class(&self.container, ANIMATE_CLASS, animated);
    }

    fn set_linear_ease(&mut self, enabled: bool) {
        toggle_class(&self.container, LINEAR_EASE_CLASS, enabled);
    }

    fn set_indicator_active(&mut self, index: usize, active: bool) {
        toggle_class(&self.indicators[index], ACTIVE_CLASS, active);
    }

    fn mark_initialized(&mut self) {
        toggle_class(&self.container, INITIALIZED_CLASS, true);
    }
}

/// Millisecond clock for driving [`Slider::tick`](crate::Slider::tick).
#[derive(Clone, Copy, Debug)]
pub struct Clock {
    origin: f64,
}

impl Clock {
    /// Start a clock at the current time. Create it alongside the slider.
    pub fn start() -> Self {
        Self {
            origin: js_sys::Date::now(),
        }
    }

    /// Milliseconds since [`start`](Self::start).
    pub fn elapsed_ms(&self) -> u64 {
        (js_sys::Date::now() - self.origin).max(0.0) as u64
    }
}

fn query_all(root: &HtmlElement, selector: &str) -> Result<Vec<HtmlElement>, SliderError> {
    let nodes = root
        .query_selector_all(selector)
        .map_err(|_| SliderError::MissingElement(selector.into()))?;

    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect())
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if element.style().set_property(property, value).is_err() {
        log::warn!("failed to set {} to {}", property, value);
    }
}

fn toggle_class(element: &HtmlElement, class: &str, enabled: bool) {
    let classes = element.class_list();
    let result = if enabled {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
    if result.is_err() {
        log::warn!("failed to toggle class {}", class);
    }
}
