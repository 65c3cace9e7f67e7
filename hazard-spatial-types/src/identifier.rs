//! Spatial identifier model.
//!
//! Every addressable feature on a spatial display is keyed by a
//! [`SpatialIdentifier`]. Three variants exist: a generic visual feature, a
//! feature of a rendered hazard event, and a transient feature created by a
//! running tool. All of them share a [`VisualFeatureKey`].
//!
//! Any field may be absent. Absent fields compare equal to each other, never
//! to a present value, and contribute zero to the hash code. The variant is
//! part of identity: a hazard identifier is never equal to a generic one even
//! when every shared field matches.

use crate::ToolType;
use crate::hash::{combine, field_hash, string_hash};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Fields shared by every spatial identifier variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualFeatureKey {
    hazard_event_identifier: Option<String>,
    visual_feature_identifier: Option<String>,
}

impl VisualFeatureKey {
    /// Creates a key from nullable parts.
    #[must_use]
    pub fn new(hazard_event_identifier: Option<&str>, visual_feature_identifier: Option<&str>) -> Self {
        Self {
            hazard_event_identifier: hazard_event_identifier.map(str::to_owned),
            visual_feature_identifier: visual_feature_identifier.map(str::to_owned),
        }
    }

    /// Identifier of the hazard event owning the feature, if any.
    #[must_use]
    pub fn hazard_event_identifier(&self) -> Option<&str> {
        self.hazard_event_identifier.as_deref()
    }

    /// Identifier of the visual feature within its owner, if any.
    #[must_use]
    pub fn visual_feature_identifier(&self) -> Option<&str> {
        self.visual_feature_identifier.as_deref()
    }

    /// Hash code over both fields.
    #[must_use]
    pub fn hash_code(&self) -> i32 {
        combine(&[
            field_hash(self.hazard_event_identifier()),
            field_hash(self.visual_feature_identifier()),
        ])
    }
}

/// Discriminant of a [`SpatialIdentifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierKind {
    VisualFeature,
    Hazard,
    Tool,
}

impl IdentifierKind {
    /// Returns the snake_case name, e.g. `"visual_feature"`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IdentifierKind::VisualFeature => "visual_feature",
            IdentifierKind::Hazard => "hazard",
            IdentifierKind::Tool => "tool",
        }
    }
}

/// Address of a spatial feature within a display layer.
///
/// Equality is a single match over the variant; mismatched variants are
/// unequal. `Hash` feeds [`SpatialIdentifier::hash_code`] to the hasher, so
/// equal identifiers always hash equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpatialIdentifier {
    /// Feature defined by a generic visual-feature definition.
    VisualFeature {
        #[serde(flatten)]
        feature: VisualFeatureKey,
    },

    /// Feature belonging to a rendered hazard event.
    Hazard {
        #[serde(flatten)]
        feature: VisualFeatureKey,
        event_identifier: Option<String>,
    },

    /// Feature created by an interactive tool that has not yet completed.
    Tool {
        #[serde(flatten)]
        feature: VisualFeatureKey,
        tool_type: Option<ToolType>,
        tool_identifier: Option<String>,
    },
}

impl SpatialIdentifier {
    /// Creates a generic visual feature identifier.
    #[must_use]
    pub fn visual_feature(
        hazard_event_identifier: Option<&str>,
        visual_feature_identifier: Option<&str>,
    ) -> Self {
        SpatialIdentifier::VisualFeature {
            feature: VisualFeatureKey::new(hazard_event_identifier, visual_feature_identifier),
        }
    }

    /// Creates a hazard feature identifier whose owning hazard event is the
    /// event itself.
    #[must_use]
    pub fn hazard(event_identifier: Option<&str>, visual_feature_identifier: Option<&str>) -> Self {
        Self::hazard_in_event(event_identifier, event_identifier, visual_feature_identifier)
    }

    /// Creates a hazard feature identifier with every field given explicitly.
    #[must_use]
    pub fn hazard_in_event(
        hazard_event_identifier: Option<&str>,
        event_identifier: Option<&str>,
        visual_feature_identifier: Option<&str>,
    ) -> Self {
        SpatialIdentifier::Hazard {
            feature: VisualFeatureKey::new(hazard_event_identifier, visual_feature_identifier),
            event_identifier: event_identifier.map(str::to_owned),
        }
    }

    /// Creates a tool feature identifier. Tool features have no owning hazard
    /// event.
    #[must_use]
    pub fn tool(
        tool_type: Option<ToolType>,
        tool_identifier: Option<&str>,
        visual_feature_identifier: Option<&str>,
    ) -> Self {
        SpatialIdentifier::Tool {
            feature: VisualFeatureKey::new(None, visual_feature_identifier),
            tool_type,
            tool_identifier: tool_identifier.map(str::to_owned),
        }
    }

    /// Creates a tool feature identifier for a new tool run, with a fresh
    /// time-ordered tool identifier.
    #[must_use]
    pub fn new_tool(tool_type: ToolType, visual_feature_identifier: &str) -> Self {
        let run = Uuid::now_v7().to_string();
        Self::tool(Some(tool_type), Some(&run), Some(visual_feature_identifier))
    }

    /// Returns the variant of this identifier.
    #[must_use]
    pub const fn kind(&self) -> IdentifierKind {
        match self {
            SpatialIdentifier::VisualFeature { .. } => IdentifierKind::VisualFeature,
            SpatialIdentifier::Hazard { .. } => IdentifierKind::Hazard,
            SpatialIdentifier::Tool { .. } => IdentifierKind::Tool,
        }
    }

    /// Returns the fields shared by all variants.
    #[must_use]
    pub const fn feature_key(&self) -> &VisualFeatureKey {
        match self {
            SpatialIdentifier::VisualFeature { feature }
            | SpatialIdentifier::Hazard { feature, .. }
            | SpatialIdentifier::Tool { feature, .. } => feature,
        }
    }

    /// Returns the owning hazard event identifier, if any.
    #[must_use]
    pub fn hazard_event_identifier(&self) -> Option<&str> {
        self.feature_key().hazard_event_identifier()
    }

    /// Returns the visual feature identifier, if any.
    #[must_use]
    pub fn visual_feature_identifier(&self) -> Option<&str> {
        self.feature_key().visual_feature_identifier()
    }

    /// Event identifier of a hazard feature; `None` for other variants.
    #[must_use]
    pub fn event_identifier(&self) -> Option<&str> {
        match self {
            SpatialIdentifier::Hazard { event_identifier, .. } => event_identifier.as_deref(),
            _ => None,
        }
    }

    /// Tool type of a tool feature; `None` for other variants.
    #[must_use]
    pub fn tool_type(&self) -> Option<ToolType> {
        match self {
            SpatialIdentifier::Tool { tool_type, .. } => *tool_type,
            _ => None,
        }
    }

    /// Tool run identifier of a tool feature; `None` for other variants.
    #[must_use]
    pub fn tool_identifier(&self) -> Option<&str> {
        match self {
            SpatialIdentifier::Tool { tool_identifier, .. } => tool_identifier.as_deref(),
            _ => None,
        }
    }

    /// Returns true if the feature belongs to the given hazard event, either
    /// as its owning hazard event or as its event identifier.
    #[must_use]
    pub fn belongs_to_event(&self, event: &str) -> bool {
        self.hazard_event_identifier() == Some(event) || self.event_identifier() == Some(event)
    }

    /// Sum of field hash contributions modulo `i32::MAX`.
    ///
    /// Absent fields contribute zero. Tool types contribute the string hash
    /// of their wire name.
    #[must_use]
    pub fn hash_code(&self) -> i32 {
        match self {
            SpatialIdentifier::VisualFeature { feature } => feature.hash_code(),
            SpatialIdentifier::Hazard { feature, event_identifier } => combine(&[
                i64::from(feature.hash_code()),
                field_hash(event_identifier.as_deref()),
            ]),
            SpatialIdentifier::Tool { feature, tool_type, tool_identifier } => combine(&[
                i64::from(feature.hash_code()),
                tool_type.map_or(0, |t| i64::from(string_hash(t.as_str()))),
                field_hash(tool_identifier.as_deref()),
            ]),
        }
    }
}

impl PartialEq for SpatialIdentifier {
    fn eq(&self, other: &Self) -> bool {
        use SpatialIdentifier::{Hazard, Tool, VisualFeature};

        match (self, other) {
            (VisualFeature { feature: a }, VisualFeature { feature: b }) => a == b,
            (
                Hazard { feature: a, event_identifier: ea },
                Hazard { feature: b, event_identifier: eb },
            ) => ea == eb && a == b,
            (
                Tool { feature: a, tool_type: ta, tool_identifier: ia },
                Tool { feature: b, tool_type: tb, tool_identifier: ib },
            ) => ta == tb && ia == ib && a == b,
            _ => false,
        }
    }
}

impl Eq for SpatialIdentifier {}

impl Hash for SpatialIdentifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

impl fmt::Display for SpatialIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |v: Option<&str>| v.unwrap_or("-").to_string();
        let key = self.feature_key();
        write!(
            f,
            "{}({}/{}",
            self.kind().as_str(),
            show(key.hazard_event_identifier()),
            show(key.visual_feature_identifier())
        )?;
        match self {
            SpatialIdentifier::VisualFeature { .. } => {}
            SpatialIdentifier::Hazard { event_identifier, .. } => {
                write!(f, "/{}", show(event_identifier.as_deref()))?;
            }
            SpatialIdentifier::Tool { tool_type, tool_identifier, .. } => {
                let tool_type = tool_type.map(|t| t.as_str());
                write!(f, "/{}/{}", show(tool_type), show(tool_identifier.as_deref()))?;
            }
        }
        f.write_str(")")
    }
}
