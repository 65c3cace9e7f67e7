//! Registry of displayed spatial features.
//!
//! Maps each [`SpatialIdentifier`] to the caller's feature value (usually a
//! handle to the drawables rendering it). Features are removed when their
//! hazard event leaves the display or when the tool run that created them
//! completes.

use hazard_spatial_types::{IdentifierKind, SpatialIdentifier};
use std::collections::HashMap;
use tracing::{debug, info};

/// Displayed features keyed by spatial identifier.
#[derive(Debug, Clone)]
pub struct SpatialFeatureRegistry<D> {
    features: HashMap<SpatialIdentifier, D>,
}

impl<D> SpatialFeatureRegistry<D> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            features: HashMap::new(),
        }
    }

    /// Adds or replaces a feature. Returns the replaced value, if any.
    pub fn insert(&mut self, identifier: SpatialIdentifier, feature: D) -> Option<D> {
        debug!("Registering feature {}", identifier);
        self.features.insert(identifier, feature)
    }

    /// Returns the feature registered under an identifier.
    #[must_use]
    pub fn get(&self, identifier: &SpatialIdentifier) -> Option<&D> {
        self.features.get(identifier)
    }

    /// Returns true if a feature is registered under the identifier.
    #[must_use]
    pub fn contains(&self, identifier: &SpatialIdentifier) -> bool {
        self.features.contains_key(identifier)
    }

    /// Removes a feature, returning it if present.
    pub fn remove(&mut self, identifier: &SpatialIdentifier) -> Option<D> {
        let removed = self.features.remove(identifier);
        if removed.is_some() {
            debug!("Removed feature {}", identifier);
        }
        removed
    }

    /// Returns the number of registered features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns true if no features are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Iterates over all registered features.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = (&SpatialIdentifier, &D)> {
        self.features.iter()
    }

    /// Identifiers of every feature belonging to the given hazard event.
    #[must_use]
    pub fn identifiers_for_event(&self, event: &str) -> Vec<&SpatialIdentifier> {
        self.features
            .keys()
            .filter(|id| id.belongs_to_event(event))
            .collect()
    }

    /// Removes every feature belonging to the given hazard event.
    /// Returns the number removed.
    pub fn remove_event(&mut self, event: &str) -> usize {
        let removed = self.remove_where(|id| id.belongs_to_event(event));
        if removed > 0 {
            info!("Removed {} feature(s) of hazard event {}", removed, event);
        }
        removed
    }

    /// Removes the transient features created by one tool run.
    /// Returns the number removed.
    pub fn remove_tool_features(&mut self, tool_identifier: &str) -> usize {
        let removed = self.remove_where(|id| id.tool_identifier() == Some(tool_identifier));
        if removed > 0 {
            info!("Removed {} feature(s) of tool run {}", removed, tool_identifier);
        }
        removed
    }

    /// Removes every tool-created feature. Returns the number removed.
    pub fn remove_all_tool_features(&mut self) -> usize {
        let removed = self.remove_where(|id| id.kind() == IdentifierKind::Tool);
        if removed > 0 {
            info!("Removed {} tool feature(s)", removed);
        }
        removed
    }

    /// Removes every feature.
    pub fn clear(&mut self) {
        self.features.clear();
    }

    fn remove_where(&mut self, mut predicate: impl FnMut(&SpatialIdentifier) -> bool) -> usize {
        let before = self.features.len();
        self.features.retain(|id, _| !predicate(id));
        before - self.features.len()
    }
}

impl<D> Default for SpatialFeatureRegistry<D> {
    fn default() -> Self {
        Self::new()
    }
}
