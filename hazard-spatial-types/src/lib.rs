//! Core value types for hazard spatial displays.
//!
//! This crate defines the identifier model and edit records shared by every
//! layer that draws or edits hazard geometry:
//! - Spatial identifiers (generic visual feature, hazard-derived, tool-derived)
//! - Tool types for transient tool-created features
//! - Edit timestamps and geometry change records
//! - Hit-test results over externally owned drawables
//!
//! Rendering, projection and drawing styles belong to the host display, not
//! here.

mod change;
mod drawable;
mod hash;
mod identifier;
mod timestamp;
mod tool;

pub use change::{EntityGeometryChange, EntityIdentifier};
pub use drawable::{MutableDrawableInfo, VertexIndex};
pub use identifier::{IdentifierKind, SpatialIdentifier, VisualFeatureKey};
pub use timestamp::EditTimestamp;
pub use tool::ToolType;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown tool type: {0}")]
    UnknownToolType(String),

    #[error("invalid vertex index: {0} (expected -1 or a non-negative index)")]
    InvalidVertexIndex(i64),
}
