//! Hit-test results over externally owned drawables.
//!
//! The drawing layer decides which drawable is near a query point and whether
//! the point is near an edge or a vertex. The result is handed straight to an
//! interaction handler and never stored.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of the vertex close to a query point, or none.
///
/// The raw form is `-1` for "no vertex is close", otherwise the index itself.
/// No other negative value can be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct VertexIndex(Option<usize>);

impl VertexIndex {
    /// No vertex is close.
    pub const NONE: VertexIndex = VertexIndex(None);

    /// Raw sentinel for [`VertexIndex::NONE`].
    pub const SENTINEL: i64 = -1;

    #[must_use]
    pub const fn at(index: usize) -> Self {
        Self(Some(index))
    }

    /// Converts a raw index, accepting `-1` as the sentinel.
    pub fn from_raw(raw: i64) -> Result<Self> {
        if raw == Self::SENTINEL {
            return Ok(Self::NONE);
        }
        usize::try_from(raw)
            .map(Self::at)
            .map_err(|_| Error::InvalidVertexIndex(raw))
    }

    /// Returns the raw form, `-1` when no vertex is close.
    ///
    /// Indices beyond `i64::MAX` cannot come from a real vertex sequence and
    /// saturate.
    #[must_use]
    pub fn raw(&self) -> i64 {
        self.0
            .map_or(Self::SENTINEL, |i| i64::try_from(i).unwrap_or(i64::MAX))
    }

    #[must_use]
    pub const fn get(&self) -> Option<usize> {
        self.0
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.0.is_none()
    }

    /// Returns true if this is the sentinel or an index into a sequence of
    /// `vertex_count` vertices.
    #[must_use]
    pub fn is_valid_for(&self, vertex_count: usize) -> bool {
        self.0.is_none_or(|i| i < vertex_count)
    }
}

impl TryFrom<i64> for VertexIndex {
    type Error = Error;

    fn try_from(raw: i64) -> Result<Self> {
        Self::from_raw(raw)
    }
}

impl From<VertexIndex> for i64 {
    fn from(index: VertexIndex) -> Self {
        index.raw()
    }
}

impl fmt::Display for VertexIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw())
    }
}

/// Drawable found by a hit test, with edge and vertex proximity.
///
/// `D` is the drawing layer's handle type; the drawable itself is owned
/// elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct MutableDrawableInfo<D> {
    drawable: Option<D>,
    is_close_to_edge: bool,
    vertex_index: VertexIndex,
}

impl<D> MutableDrawableInfo<D> {
    #[must_use]
    pub fn new(drawable: Option<D>, is_close_to_edge: bool, vertex_index: VertexIndex) -> Self {
        Self {
            drawable,
            is_close_to_edge,
            vertex_index,
        }
    }

    /// Result of a hit test that found nothing.
    #[must_use]
    pub fn none() -> Self {
        Self::new(None, false, VertexIndex::NONE)
    }

    #[must_use]
    pub fn drawable(&self) -> Option<&D> {
        self.drawable.as_ref()
    }

    #[must_use]
    pub fn is_close_to_edge(&self) -> bool {
        self.is_close_to_edge
    }

    #[must_use]
    pub fn vertex_index(&self) -> VertexIndex {
        self.vertex_index
    }

    /// Returns true if a drawable was hit.
    #[must_use]
    pub fn is_hit(&self) -> bool {
        self.drawable.is_some()
    }

    #[must_use]
    pub fn into_drawable(self) -> Option<D> {
        self.drawable
    }
}

impl<D> Default for MutableDrawableInfo<D> {
    fn default() -> Self {
        Self::none()
    }
}
