use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of interactive tool that can create transient spatial features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToolType {
    /// Hazard recommender run.
    Recommender,
    /// Product generator tied to hazard events.
    HazardProductGenerator,
    /// Product generator independent of hazard events.
    NonHazardProductGenerator,
}

impl ToolType {
    /// All tool types, in declaration order.
    pub const ALL: [ToolType; 3] = [
        ToolType::Recommender,
        ToolType::HazardProductGenerator,
        ToolType::NonHazardProductGenerator,
    ];

    /// Returns the wire name, e.g. `"RECOMMENDER"`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ToolType::Recommender => "RECOMMENDER",
            ToolType::HazardProductGenerator => "HAZARD_PRODUCT_GENERATOR",
            ToolType::NonHazardProductGenerator => "NON_HAZARD_PRODUCT_GENERATOR",
        }
    }
}

impl fmt::Display for ToolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::UnknownToolType(s.to_string()))
    }
}
