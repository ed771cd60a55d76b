//! Display policy for polygons being drawn

use mapdraw_core::{ACTIVE_FALSE, ACTIVE_TRUE, DisplayFeature, Feature, Geometry, META_FEATURE};
use serde_json::Value;

/// Turn a feature into its display record.
///
/// A polygon whose ring is still empty has nothing to draw. The feature being
/// drawn is tagged `active = "true"`, `meta = "feature"`, and is shown as a
/// line until its ring holds more than two coordinates. Any other feature
/// passes through with `active = "false"`.
pub fn render_polygon(feature: &Feature, is_active: bool) -> Option<DisplayFeature> {
    let ring = feature.geometry.outer_ring();
    if ring.is_some_and(<[_]>::is_empty) {
        return None;
    }

    let mut properties = feature.properties.clone();
    if !is_active {
        properties.insert("active".into(), Value::from(ACTIVE_FALSE));
        return Some(DisplayFeature::new(feature.geometry.clone(), properties));
    }

    properties.insert("active".into(), Value::from(ACTIVE_TRUE));
    properties.insert("meta".into(), Value::from(META_FEATURE));

    let geometry = match ring {
        Some(coords) if coords.len() <= 2 => Geometry::LineString(coords.to_vec()),
        _ => feature.geometry.clone(),
    };
    Some(DisplayFeature::new(geometry, properties))
}
