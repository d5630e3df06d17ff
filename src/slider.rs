//! The slider: transform engine, gesture handling and navigation bound to
//! one surface.

use crate::gesture::{resolve_pan, PanEvent, PanPhase, TapTracker};
use crate::layout::{Layout, LeadingThrottle, Throttle, HEIGHT_MEASURE_DELAY_MS};
use crate::navigation::{NavigationSequencer, SequencerAction};
use crate::transform::{compute_layout, settled_layout, PageLayout, TransformParams};
use crate::{SliderConfig, SliderError, Surface};

/// Sent to the pan listener every time page transforms are applied.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PanNotification {
    /// Index the transforms were computed for (after clamping)
    pub index: usize,
    /// Drag percentage that produced them
    pub percent: f64,
    /// Whether the container was set to ease into them
    pub animate: bool,
}

/// Listener invoked synchronously after every transform application.
///
/// This is where lazy loaders hook in to reveal images as pages come into view.
pub type PanListener = Box<dyn FnMut(PanNotification)>;

/// Builds a [`Slider`] from its collaborators.
pub struct SliderBuilder<S: Surface> {
    surface: S,
    config: SliderConfig,
    throttle: Option<Box<dyn Throttle>>,
    listener: Option<PanListener>,
}

impl<S: Surface> SliderBuilder<S> {
    pub fn config(mut self, config: SliderConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the default leading-edge resize throttle.
    pub fn throttle(mut self, throttle: impl Throttle + 'static) -> Self {
        self.throttle = Some(Box::new(throttle));
        self
    }

    pub fn listener(mut self, listener: impl FnMut(PanNotification) + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    /// Validate the configuration and lay out the surface.
    pub fn build(self) -> Result<Slider<S>, SliderError> {
        self.config.validate(self.surface.page_count())?;

        let delay_ms = self.config.resize_throttle_delay_ms;
        let throttle = self
            .throttle
            .unwrap_or_else(|| Box::new(LeadingThrottle::new(delay_ms)) as Box<dyn Throttle>);
        let page_count = self.surface.page_count();

        let mut slider = Slider {
            surface: self.surface,
            config: self.config,
            layout: Layout::new(),
            throttle,
            sequencer: NavigationSequencer::new(),
            taps: TapTracker::new(page_count),
            listener: self.listener,
            current_index: 0,
            now_ms: 0,
            measure_height_at: None,
            auto_advance_at: None,
            dragging: false,
        };
        slider.initialize();
        Ok(slider)
    }
}

impl<S: Surface + std::fmt::Debug> std::fmt::Debug for SliderBuilder<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SliderBuilder")
            .field("surface", &self.surface)
            .field("config", &self.config)
            .field("throttle", &self.throttle)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

/// A fade slider bound to one surface.
///
/// The slider keeps no timers of its own. Time moves forward only through
/// [`tick`](Self::tick), which takes milliseconds elapsed since the slider
/// was built; every delayed step (flips, ease release, height measurement,
/// trailing resize, auto-advance) fires from there. Event handlers use the
/// time of the latest tick.
///
/// ## Example
///
/// ```rust
/// use fade_slider::{HeadlessSurface, PanEvent, PanPhase, Slider, SliderConfig};
///
/// let mut slider = Slider::new(HeadlessSurface::new(4, 300.0), SliderConfig::default()).unwrap();
///
/// // Drag left past the commit threshold and release
/// slider.on_pan(PanEvent::horizontal(PanPhase::Move, -70.0));
/// slider.on_pan(PanEvent::horizontal(PanPhase::End, -70.0));
/// assert_eq!(slider.current_index(), 1);
///
/// // Jump to the last page, one flip every 250ms
/// assert!(slider.go_to_index(3));
/// slider.tick(250);
/// assert_eq!(slider.current_index(), 3);
/// assert_eq!(slider.surface().active_indicator(), Some(3));
/// ```
pub struct Slider<S: Surface> {
    surface: S,
    config: SliderConfig,
    layout: Layout,
    throttle: Box<dyn Throttle>,
    sequencer: NavigationSequencer,
    taps: TapTracker,
    listener: Option<PanListener>,
    current_index: usize,
    now_ms: u64,
    measure_height_at: Option<u64>,
    auto_advance_at: Option<u64>,
    dragging: bool,
}

impl<S: Surface> Slider<S> {
    /// Create a slider with the given configuration and no listener.
    pub fn new(surface: S, config: SliderConfig) -> Result<Self, SliderError> {
        Self::builder(surface).config(config).build()
    }

    /// Start building a slider over `surface` with default options.
    pub fn builder(surface: S) -> SliderBuilder<S> {
        SliderBuilder {
            surface,
            config: SliderConfig::default(),
            throttle: None,
            listener: None,
        }
    }

    fn initialize(&mut self) {
        self.layout.remeasure(&mut self.surface);
        self.measure_height_at = Some(self.now_ms + HEIGHT_MEASURE_DELAY_MS);

        let start = self.config.start_index;
        if start > 0 {
            self.current_index = start;
            self.settle(start);
        }

        self.activate_indicator(self.current_index);
        self.surface.mark_initialized();
        self.restart_auto_advance();
        log::debug!(
            "slider initialized: {} pages, container {}px, start {}",
            self.page_count(),
            self.layout.container_size(),
            start
        );
    }

    /// Index of the page currently shown (or being flipped to).
    #[inline]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[inline]
    pub fn page_count(&self) -> usize {
        self.surface.page_count()
    }

    /// Cached container width in pixels.
    #[inline]
    pub fn container_size(&self) -> f64 {
        self.layout.container_size()
    }

    #[inline]
    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    /// Time of the latest tick, in milliseconds.
    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Returns true while a multi-page navigation still has flips to perform.
    #[inline]
    pub fn is_navigating(&self) -> bool {
        self.sequencer.is_in_flight()
    }

    /// Returns true between the first and final event of a pan gesture.
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    #[inline]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[inline]
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Install or replace the pan listener.
    pub fn set_listener(&mut self, listener: impl FnMut(PanNotification) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Earliest time at which [`tick`](Self::tick) has work to do.
    ///
    /// Hosts with real timers can sleep until then instead of ticking every frame.
    pub fn next_deadline(&self) -> Option<u64> {
        [
            self.sequencer.next_deadline(),
            self.throttle.deadline(),
            self.measure_height_at,
            self.auto_advance_at,
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Advance the clock to `now_ms` and run everything that became due.
    ///
    /// Times earlier than the latest tick are treated as the latest tick.
    pub fn tick(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
        let now = self.now_ms;

        let actions = self.sequencer.poll(now);
        self.apply_actions(actions);

        if self.throttle.poll(now) {
            self.recalculate();
        }

        if self.measure_height_at.is_some_and(|at| at <= now) {
            self.measure_height_at = None;
            let height = Layout::apply_uniform_height(&mut self.surface);
            log::trace!("list height set to {}px", height);
        }

        if self.auto_advance_at.is_some_and(|at| at <= now) {
            self.auto_advance();
        }
    }

    /// Compute and apply page transforms for `target` at `percent` drag.
    ///
    /// `target` is clamped into the page range. The pan listener is invoked
    /// once afterwards.
    pub fn show(&mut self, target: usize, percent: f64, animate: bool) {
        let layout = compute_layout(&self.transform_params(), target, percent, animate);
        self.surface.set_animated(animate);
        self.apply_layout(&layout);
        self.notify(layout.target, percent, animate);
    }

    /// Handle a recognized pan event.
    ///
    /// Returns true if the event moved the pages. Events inside the dead
    /// zone are ignored apart from tracking the drag state.
    pub fn on_pan(&mut self, event: PanEvent) -> bool {
        match event.phase {
            PanPhase::Start => {
                self.dragging = true;
                let actions = self.sequencer.cancel();
                self.apply_actions(actions);
            }
            PanPhase::End | PanPhase::Cancel => self.dragging = false,
            PanPhase::Move => {}
        }
        self.restart_auto_advance();

        let Some(outcome) =
            resolve_pan(&event, self.config.pan_direction, self.layout.container_size())
        else {
            return false;
        };

        if let Some(step) = outcome.step {
            let next = step.apply(self.current_index, self.page_count());
            log::debug!("pan released: {:?} {} -> {}", step, self.current_index, next);
            self.current_index = next;
        }

        self.show(self.current_index, outcome.percent, outcome.animate);
        self.activate_indicator(self.current_index);
        true
    }

    /// Navigate to `index`, flipping through every page in between.
    ///
    /// Out-of-range indices are ignored. A navigation already in flight is
    /// replaced by the new one, which starts from wherever the old one got
    /// to and keeps its next flip time unless it reverses direction. Asking
    /// for the page it got to just stops it. Returns true if a navigation
    /// started.
    pub fn go_to_index(&mut self, index: isize) -> bool {
        let Ok(destination) = usize::try_from(index) else {
            log::debug!("go_to_index({}) ignored: out of range", index);
            return false;
        };
        if destination >= self.page_count() {
            log::debug!("go_to_index({}) ignored: out of range", index);
            return false;
        }

        self.restart_auto_advance();
        self.navigate(destination)
    }

    /// Navigate one page forward. Does nothing on the last page.
    pub fn next(&mut self) -> bool {
        self.go_to_index(self.current_index as isize + 1)
    }

    /// Navigate one page back. Does nothing on the first page.
    pub fn previous(&mut self) -> bool {
        self.go_to_index(self.current_index as isize - 1)
    }

    /// Record a pointer press on a page.
    pub fn on_pointer_down(&mut self, page: usize, x: f64) {
        self.taps.press(page, x);
    }

    /// Record a pointer release on a page.
    ///
    /// A tap on the current page goes back one page; a tap on any other page
    /// goes to it. Releases after a drag are ignored.
    pub fn on_pointer_up(&mut self, page: usize, x: f64) -> bool {
        if !self.taps.release(page, x) {
            return false;
        }
        let target = if page == self.current_index {
            self.current_index as isize - 1
        } else {
            page as isize
        };
        self.go_to_index(target)
    }

    /// Handle a click on an indicator.
    pub fn on_indicator_click(&mut self, index: usize) -> bool {
        if index == self.current_index {
            return false;
        }
        self.go_to_index(index as isize)
    }

    /// Handle a window resize. Recalculation is throttled.
    pub fn on_resize(&mut self) {
        if self.throttle.call(self.now_ms) {
            self.recalculate();
        }
    }

    fn recalculate(&mut self) {
        if !self.layout.remeasure(&mut self.surface) {
            return;
        }
        self.measure_height_at = Some(self.now_ms + HEIGHT_MEASURE_DELAY_MS);
        if self.current_index > 0 {
            self.settle(self.current_index);
        }
    }

    fn navigate(&mut self, destination: usize) -> bool {
        let actions = self
            .sequencer
            .begin(self.current_index, destination, self.now_ms);
        let started = self.sequencer.is_in_flight()
            || actions
                .iter()
                .any(|a| matches!(a, SequencerAction::Flip(_)));
        self.apply_actions(actions);
        started
    }

    fn auto_advance(&mut self) {
        self.restart_auto_advance();
        if self.dragging || self.sequencer.is_in_flight() {
            return;
        }
        let next = (self.current_index + 1) % self.page_count();
        log::trace!("auto-advance {} -> {}", self.current_index, next);
        self.navigate(next);
    }

    fn restart_auto_advance(&mut self) {
        self.auto_advance_at = self
            .config
            .auto_advance_interval_ms
            .map(|interval| self.now_ms + interval);
    }

    fn apply_actions(&mut self, actions: Vec<SequencerAction>) {
        for action in actions {
            match action {
                SequencerAction::Flip(step) => {
                    self.current_index = step.apply(self.current_index, self.page_count());
                    self.show(self.current_index, 0.0, true);
                    self.activate_indicator(self.current_index);
                }
                SequencerAction::LinearEase(enabled) => self.surface.set_linear_ease(enabled),
            }
        }
    }

    fn settle(&mut self, target: usize) {
        let layout = settled_layout(&self.transform_params(), target);
        self.surface.set_animated(false);
        self.apply_layout(&layout);
        self.notify(layout.target, 0.0, false);
    }

    fn apply_layout(&mut self, layout: &PageLayout) {
        for update in &layout.updates {
            self.surface.set_opacity(update.index, update.opacity);
            self.surface.set_transform(update.index, update.transform);
        }
    }

    fn activate_indicator(&mut self, index: usize) {
        for i in 0..self.surface.indicator_count() {
            self.surface.set_indicator_active(i, i == index);
        }
    }

    fn notify(&mut self, index: usize, percent: f64, animate: bool) {
        if let Some(listener) = self.listener.as_mut() {
            listener(PanNotification { index, percent, animate });
        }
    }

    fn transform_params(&self) -> TransformParams {
        TransformParams {
            page_count: self.surface.page_count(),
            container_size: self.layout.container_size(),
            scale_modifier: self.config.scale_modifier,
        }
    }
}

impl<S: Surface + std::fmt::Debug> std::fmt::Debug for Slider<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slider")
            .field("surface", &self.surface)
            .field("config", &self.config)
            .field("layout", &self.layout)
            .field("sequencer", &self.sequencer)
            .field("current_index", &self.current_index)
            .field("now_ms", &self.now_ms)
            .field("dragging", &self.dragging)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}
