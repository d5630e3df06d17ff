//! Error types for slider construction and configuration.

use thiserror::Error;

/// Errors raised while building a slider or loading its configuration.
///
/// Runtime operations (gestures, navigation, resizing) never fail; invalid
/// input there is clamped or ignored.
#[derive(Error, Debug)]
pub enum SliderError {
    #[error("Slider container has no pages")]
    NoPages,

    #[error("Invalid scale modifier {0}: expected a value between 0 and 1")]
    InvalidScaleModifier(f64),

    #[error("Start index {index} out of range for {page_count} pages")]
    StartIndexOutOfRange { index: usize, page_count: usize },

    #[error("Auto-advance interval must be greater than zero")]
    ZeroAutoAdvanceInterval,

    #[cfg(feature = "toml")]
    #[error("Invalid slider configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "web")]
    #[error("Missing slider element: {0}")]
    MissingElement(String),
}
