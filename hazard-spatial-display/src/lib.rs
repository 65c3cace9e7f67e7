//! In-process display layer over the hazard spatial identifier model.
//!
//! Provides the pieces a spatial display needs between the host's drawing
//! toolkit and its interaction handlers:
//! - [`SpatialFeatureRegistry`]: displayed features keyed by identifier
//! - [`GeometryChangeDispatcher`]: geometry edits delivered in selected-time order
//! - [`LabelPlacement`]: label offsets relative to an anchor point
//! - [`DisplayConfig`]: tunables for the above
//!
//! Nothing here reaches for host globals; the caller owns every value and
//! passes it where it is needed.

mod config;
mod dispatch;
mod label;
mod registry;

pub use config::DisplayConfig;
pub use dispatch::{GeometryChangeDispatcher, GeometryChangeListener};
pub use label::LabelPlacement;
pub use registry::SpatialFeatureRegistry;

/// Result type for display operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the display layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("geometry change queue full ({capacity} pending)")]
    QueueFull { capacity: usize },

    #[error("invalid display config: {0}")]
    InvalidConfig(String),

    #[error("unknown label placement: {0}")]
    UnknownPlacement(String),

    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),
}
