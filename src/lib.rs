//! # fade-slider
//!
//! Headless engine for fade pagers/sliders.
//!
//! This crate provides platform-agnostic logic for:
//! - Mapping pan gestures to per-page translation, opacity and scale
//! - Sequencing multi-page "go to page" flips
//! - Tap, indicator, prev/next and auto-advance navigation
//! - Container measurement with throttled resize handling
//!
//! Rendering goes through the [`Surface`] trait. [`HeadlessSurface`] keeps the
//! styles in memory; the `web` feature adds a DOM implementation.
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for data structures
//! - `toml` - Load [`SliderConfig`] from TOML
//! - `web` - Enable the web/WASM DOM surface
//!
//! ## Example
//!
//! ```rust
//! use fade_slider::{HeadlessSurface, PanEvent, PanPhase, Slider, SliderConfig};
//!
//! let surface = HeadlessSurface::new(5, 320.0);
//! let mut slider = Slider::builder(surface)
//!     .config(SliderConfig { scale_modifier: 0.3, ..Default::default() })
//!     .listener(|n| println!("showing page {} at {}%", n.index, n.percent))
//!     .build()?;
//!
//! // Forward recognized pan events
//! slider.on_pan(PanEvent::horizontal(PanPhase::Move, -120.0));
//! slider.on_pan(PanEvent::horizontal(PanPhase::End, -120.0));
//!
//! // Drive timers from your event loop
//! slider.go_to_index(4);
//! slider.tick(1_000);
//! assert_eq!(slider.current_index(), 4);
//! # Ok::<(), fade_slider::SliderError>(())
//! ```

mod config;
mod error;
pub mod gesture;
pub mod layout;
pub mod navigation;
mod slider;
mod surface;
pub mod transform;

#[cfg(feature = "web")]
pub mod web;

pub use config::SliderConfig;
pub use error::SliderError;
pub use gesture::{PanDirection, PanEvent, PanPhase};
pub use slider::{PanListener, PanNotification, Slider, SliderBuilder};
pub use surface::{HeadlessSurface, PageStyle, Surface};
pub use transform::Transform;

#[cfg(feature = "web")]
pub use web::DomSurface;
