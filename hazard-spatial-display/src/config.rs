use crate::{Error, LabelPlacement, Result};
use geo::Coord;
use serde::{Deserialize, Serialize};

/// Default distance between a label and its anchor, in screen pixels.
pub const DEFAULT_LABEL_OFFSET_PX: f64 = 10.0;

/// Default bound on undelivered geometry changes.
pub const DEFAULT_MAX_PENDING_CHANGES: usize = 1024;

/// Configuration for a spatial display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Distance between a label and its anchor (px).
    pub label_offset_px: f64,
    /// Maximum geometry changes held before a flush.
    pub max_pending_changes: usize,
    /// Placement used when a feature does not name one.
    pub default_label_placement: LabelPlacement,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            label_offset_px: DEFAULT_LABEL_OFFSET_PX,
            max_pending_changes: DEFAULT_MAX_PENDING_CHANGES,
            default_label_placement: LabelPlacement::Above,
        }
    }
}

impl DisplayConfig {
    /// Parses a config from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Screen position of a label annotating `anchor`.
    ///
    /// Uses `placement` when the feature names one, otherwise the configured
    /// default, at the configured offset.
    #[must_use]
    pub fn place_label(&self, anchor: Coord<f64>, placement: Option<LabelPlacement>) -> Coord<f64> {
        placement
            .unwrap_or(self.default_label_placement)
            .place(anchor, self.label_offset_px)
    }

    /// Checks the config for values the display cannot use.
    pub fn validate(&self) -> Result<()> {
        if !self.label_offset_px.is_finite() || self.label_offset_px < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "label_offset_px must be a finite non-negative number, got {}",
                self.label_offset_px
            )));
        }
        if self.max_pending_changes == 0 {
            return Err(Error::InvalidConfig(
                "max_pending_changes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
