//! Label placement relative to an anchor point.
//!
//! Offsets are in screen pixels with y growing downward, so `Above` moves the
//! label toward smaller y. Diagonal placements move the full distance along
//! both axes.

use crate::Error;
use geo::Coord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a label sits relative to the point it annotates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelPlacement {
    Centered,
    #[default]
    Above,
    Below,
    Left,
    Right,
    AboveLeft,
    AboveRight,
    BelowLeft,
    BelowRight,
}

impl LabelPlacement {
    pub const ALL: [LabelPlacement; 9] = [
        LabelPlacement::Centered,
        LabelPlacement::Above,
        LabelPlacement::Below,
        LabelPlacement::Left,
        LabelPlacement::Right,
        LabelPlacement::AboveLeft,
        LabelPlacement::AboveRight,
        LabelPlacement::BelowLeft,
        LabelPlacement::BelowRight,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            LabelPlacement::Centered => "centered",
            LabelPlacement::Above => "above",
            LabelPlacement::Below => "below",
            LabelPlacement::Left => "left",
            LabelPlacement::Right => "right",
            LabelPlacement::AboveLeft => "above_left",
            LabelPlacement::AboveRight => "above_right",
            LabelPlacement::BelowLeft => "below_left",
            LabelPlacement::BelowRight => "below_right",
        }
    }

    /// Unit direction of this placement as (x, y) signs.
    const fn direction(&self) -> (f64, f64) {
        match self {
            LabelPlacement::Centered => (0.0, 0.0),
            LabelPlacement::Above => (0.0, -1.0),
            LabelPlacement::Below => (0.0, 1.0),
            LabelPlacement::Left => (-1.0, 0.0),
            LabelPlacement::Right => (1.0, 0.0),
            LabelPlacement::AboveLeft => (-1.0, -1.0),
            LabelPlacement::AboveRight => (1.0, -1.0),
            LabelPlacement::BelowLeft => (-1.0, 1.0),
            LabelPlacement::BelowRight => (1.0, 1.0),
        }
    }

    /// Offset from the anchor for a label `distance` pixels away.
    #[must_use]
    pub fn offset(&self, distance: f64) -> Coord<f64> {
        let (dx, dy) = self.direction();
        Coord {
            x: dx * distance,
            y: dy * distance,
        }
    }

    /// Screen position of a label annotating `anchor`.
    #[must_use]
    pub fn place(&self, anchor: Coord<f64>, distance: f64) -> Coord<f64> {
        anchor + self.offset(distance)
    }
}

impl fmt::Display for LabelPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LabelPlacement {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| Error::UnknownPlacement(s.to_string()))
    }
}
