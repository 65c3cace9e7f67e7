//! Geometry change records.
//!
//! One [`EntityGeometryChange`] is produced per discrete user edit ("this
//! entity's geometry became X as of time T") and consumed once by a listener.
//! The geometry is opaque here; this crate never inspects it.

use crate::{EditTimestamp, SpatialIdentifier};
use geo::Geometry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the entity whose geometry changed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum EntityIdentifier {
    /// A hazard event as a whole.
    Event(String),
    /// A single spatial feature.
    Spatial(SpatialIdentifier),
}

impl EntityIdentifier {
    /// Returns the spatial identifier, if this addresses a single feature.
    #[must_use]
    pub fn as_spatial(&self) -> Option<&SpatialIdentifier> {
        match self {
            EntityIdentifier::Spatial(id) => Some(id),
            EntityIdentifier::Event(_) => None,
        }
    }
}

impl From<SpatialIdentifier> for EntityIdentifier {
    fn from(id: SpatialIdentifier) -> Self {
        EntityIdentifier::Spatial(id)
    }
}

impl From<&str> for EntityIdentifier {
    fn from(event: &str) -> Self {
        EntityIdentifier::Event(event.to_string())
    }
}

impl fmt::Display for EntityIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityIdentifier::Event(event) => write!(f, "event({event})"),
            EntityIdentifier::Spatial(id) => fmt::Display::fmt(id, f),
        }
    }
}

/// A single geometry edit to a spatial entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityGeometryChange {
    identifier: EntityIdentifier,
    geometry: Geometry<f64>,
    selected_time: EditTimestamp,
}

impl EntityGeometryChange {
    /// Creates a change record for one edit.
    #[must_use]
    pub fn new(
        identifier: impl Into<EntityIdentifier>,
        geometry: impl Into<Geometry<f64>>,
        selected_time: EditTimestamp,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            geometry: geometry.into(),
            selected_time,
        }
    }

    /// Returns the entity whose geometry changed.
    #[must_use]
    pub fn identifier(&self) -> &EntityIdentifier {
        &self.identifier
    }

    /// Returns the new geometry.
    #[must_use]
    pub fn geometry(&self) -> &Geometry<f64> {
        &self.geometry
    }

    /// Returns the selected time the edit applies to.
    #[must_use]
    pub fn selected_time(&self) -> EditTimestamp {
        self.selected_time
    }

    /// Returns true if this edit was made before the other.
    #[must_use]
    pub fn is_before(&self, other: &Self) -> bool {
        self.selected_time.is_before(&other.selected_time)
    }

    /// Consumes the record, returning its parts.
    #[must_use]
    pub fn into_parts(self) -> (EntityIdentifier, Geometry<f64>, EditTimestamp) {
        (self.identifier, self.geometry, self.selected_time)
    }
}
