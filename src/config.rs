//! Slider configuration.

use crate::gesture::PanDirection;
use crate::layout::DEFAULT_RESIZE_THROTTLE_MS;
use crate::transform::DEFAULT_SCALE_MODIFIER;
use crate::SliderError;

/// Options recognized by [`Slider`](crate::Slider).
///
/// Every field has a default, so a configuration file only needs the keys it
/// wants to change.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SliderConfig {
    /// Scale a page shrinks to while fading out is `1 - scale_modifier`
    pub scale_modifier: f64,
    /// Minimum time between two resize recalculations, in milliseconds
    pub resize_throttle_delay_ms: u64,
    /// Axis that drives the pages
    pub pan_direction: PanDirection,
    /// Page shown after construction
    pub start_index: usize,
    /// Advance to the next page after this many idle milliseconds
    pub auto_advance_interval_ms: Option<u64>,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            scale_modifier: DEFAULT_SCALE_MODIFIER,
            resize_throttle_delay_ms: DEFAULT_RESIZE_THROTTLE_MS,
            pan_direction: PanDirection::Horizontal,
            start_index: 0,
            auto_advance_interval_ms: None,
        }
    }
}

impl SliderConfig {
    /// Parse a TOML string into `SliderConfig`.
    ///
    /// ```toml
    /// scale_modifier = 0.3
    /// auto_advance_interval_ms = 5000
    /// ```
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, SliderError> {
        let config: Self = toml::from_str(s)?;
        Ok(config)
    }

    /// Check the options against a container with `page_count` pages.
    pub fn validate(&self, page_count: usize) -> Result<(), SliderError> {
        if page_count == 0 {
            return Err(SliderError::NoPages);
        }
        if !(0.0..=1.0).contains(&self.scale_modifier) {
            return Err(SliderError::InvalidScaleModifier(self.scale_modifier));
        }
        if self.start_index >= page_count {
            return Err(SliderError::StartIndexOutOfRange {
                index: self.start_index,
                page_count,
            });
        }
        if self.auto_advance_interval_ms == Some(0) {
            return Err(SliderError::ZeroAutoAdvanceInterval);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SliderConfig::default();
        assert_eq!(config.scale_modifier, 0.25);
        assert_eq!(config.resize_throttle_delay_ms, 50);
        assert_eq!(config.pan_direction, PanDirection::Horizontal);
        assert_eq!(config.auto_advance_interval_ms, None);
        assert!(config.validate(1).is_ok());
    }

    #[test]
    fn rejects_empty_container() {
        assert!(matches!(SliderConfig::default().validate(0), Err(SliderError::NoPages)));
    }

    #[test]
    fn rejects_bad_scale_modifier() {
        let config = SliderConfig {
            scale_modifier: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(3),
            Err(SliderError::InvalidScaleModifier(m)) if m == 1.5
        ));

        let config = SliderConfig {
            scale_modifier: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate(3).is_err());
    }

    #[test]
    fn rejects_start_index_out_of_range() {
        let config = SliderConfig {
            start_index: 3,
            ..Default::default()
        };
        let err = config.validate(3).unwrap_err();
        assert_eq!(err.to_string(), "Start index 3 out of range for 3 pages");
    }

    #[test]
    fn rejects_zero_interval() {
        let config = SliderConfig {
            auto_advance_interval_ms: Some(0),
            ..Default::default()
        };
        assert!(matches!(config.validate(2), Err(SliderError::ZeroAutoAdvanceInterval)));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn from_toml_partial() {
        let config = SliderConfig::from_toml_str(
            "scale_modifier = 0.4\npan_direction = \"vertical\"\nauto_advance_interval_ms = 5000\n",
        )
        .unwrap();
        assert_eq!(config.scale_modifier, 0.4);
        assert_eq!(config.pan_direction, PanDirection::Vertical);
        assert_eq!(config.auto_advance_interval_ms, Some(5000));
        assert_eq!(config.resize_throttle_delay_ms, 50);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn from_toml_invalid() {
        assert!(matches!(
            SliderConfig::from_toml_str("scale_modifier = \"big\""),
            Err(SliderError::Toml(_))
        ));
    }
}
