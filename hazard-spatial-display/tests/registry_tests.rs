use hazard_spatial_display::SpatialFeatureRegistry;
use hazard_spatial_types::{SpatialIdentifier, ToolType};
use pretty_assertions::assert_eq;

fn hazard(event: &str, feature: &str) -> SpatialIdentifier {
    SpatialIdentifier::hazard(Some(event), Some(feature))
}

fn tool(run: &str, feature: &str) -> SpatialIdentifier {
    SpatialIdentifier::tool(Some(ToolType::Recommender), Some(run), Some(feature))
}

fn populated() -> SpatialFeatureRegistry<&'static str> {
    let mut registry = SpatialFeatureRegistry::new();
    registry.insert(hazard("EVT1", "outline"), "evt1-outline");
    registry.insert(hazard("EVT1", "label"), "evt1-label");
    registry.insert(hazard("EVT2", "outline"), "evt2-outline");
    registry.insert(
        SpatialIdentifier::visual_feature(Some("EVT1"), Some("buffer")),
        "evt1-buffer",
    );
    registry.insert(tool("run-1", "swath"), "run1-swath");
    registry.insert(tool("run-1", "track"), "run1-track");
    registry.insert(tool("run-2", "swath"), "run2-swath");
    registry
}

// ── Basic map operations ─────────────────────────────────────────

#[test]
fn new_registry_is_empty() {
    let registry: SpatialFeatureRegistry<u32> = SpatialFeatureRegistry::default();
    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
}

#[test]
fn insert_and_get_by_equal_identifier() {
    let mut registry = SpatialFeatureRegistry::new();
    assert_eq!(registry.insert(hazard("EVT1", "outline"), 1), None);
    assert_eq!(registry.get(&hazard("EVT1", "outline")), Some(&1));
    assert!(registry.contains(&hazard("EVT1", "outline")));
}

#[test]
fn insert_replaces_existing() {
    let mut registry = SpatialFeatureRegistry::new();
    registry.insert(hazard("EVT1", "outline"), 1);
    assert_eq!(registry.insert(hazard("EVT1", "outline"), 2), Some(1));
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get(&hazard("EVT1", "outline")), Some(&2));
}

#[test]
fn variants_are_separate_keys() {
    let mut registry = SpatialFeatureRegistry::new();
    registry.insert(hazard("EVT1", "outline"), "hazard");
    registry.insert(
        SpatialIdentifier::visual_feature(Some("EVT1"), Some("outline")),
        "generic",
    );
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.get(&hazard("EVT1", "outline")), Some(&"hazard"));
}

#[test]
fn remove_returns_feature() {
    let mut registry = populated();
    assert_eq!(registry.remove(&hazard("EVT2", "outline")), Some("evt2-outline"));
    assert_eq!(registry.remove(&hazard("EVT2", "outline")), None);
    assert_eq!(registry.len(), 6);
}

// ── Event and tool purges ────────────────────────────────────────

#[test]
fn identifiers_for_event() {
    let registry = populated();
    let mut features: Vec<_> = registry
        .identifiers_for_event("EVT1")
        .into_iter()
        .filter_map(|id| id.visual_feature_identifier())
        .collect();
    features.sort_unstable();
    assert_eq!(features, vec!["buffer", "label", "outline"]);
}

#[test]
fn remove_event_drops_all_its_features() {
    let mut registry = populated();
    assert_eq!(registry.remove_event("EVT1"), 3);
    assert!(registry.identifiers_for_event("EVT1").is_empty());
    assert_eq!(registry.len(), 4);
    assert_eq!(registry.remove_event("EVT1"), 0);
}

#[test]
fn remove_tool_features_only_touches_that_run() {
    let mut registry = populated();
    assert_eq!(registry.remove_tool_features("run-1"), 2);
    assert!(registry.contains(&tool("run-2", "swath")));
    assert!(!registry.contains(&tool("run-1", "swath")));
}

#[test]
fn remove_all_tool_features() {
    let mut registry = populated();
    assert_eq!(registry.remove_all_tool_features(), 3);
    assert!(registry.iter().all(|(id, _)| id.tool_identifier().is_none()));
    assert_eq!(registry.len(), 4);
}

#[test]
fn clear_empties_registry() {
    let mut registry = populated();
    registry.clear();
    assert!(registry.is_empty());
}
