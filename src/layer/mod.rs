//! Hex layer state as seen by the renderer.
//!
//! Derived attributes live in two places: the queryable [`FeatureStore`] that
//! drives styling and popups, and the [`HoverCache`] used for tooltip lookups.
//! Only [`LayerSynchronizer`] writes derived attributes into either.

mod hover_cache;
mod memory;
mod synchronizer;

pub use hover_cache::HoverCache;
pub use memory::MemoryFeatureStore;
pub use synchronizer::{Generation, LayerSynchronizer, SyncReport, SyncRequest};

use serde::{Deserialize, Serialize};

use crate::aggregate::DerivedHexAttributes;
use crate::bins::assign_bin;
use crate::error::Result;
use crate::indicator::HexId;

/// Attributes carried by a hex feature. Freshly created features have zero
/// means, no composite key and an empty display string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HexAttributes {
    pub final_value_harms: f64,
    pub final_value_assets: f64,
    pub has_harms: bool,
    pub has_assets: bool,
    pub composite_key: Option<String>,
    pub display: String,
}

impl HexAttributes {
    pub fn harm_range(&self) -> &'static str {
        assign_bin(self.final_value_harms).label()
    }

    pub fn asset_range(&self) -> &'static str {
        assign_bin(self.final_value_assets).label()
    }

    /// Hover tooltip body
    pub fn tooltip_html(&self) -> String {
        format!(
            "<div><strong>Harms:</strong> {}</div><div><strong>Assets:</strong> {}</div>",
            self.harm_range(),
            self.asset_range()
        )
    }
}

impl From<&DerivedHexAttributes> for HexAttributes {
    fn from(derived: &DerivedHexAttributes) -> Self {
        HexAttributes {
            final_value_harms: derived.harm_value(),
            final_value_assets: derived.asset_value(),
            has_harms: derived.mean_harm.is_some(),
            has_assets: derived.mean_asset.is_some(),
            composite_key: Some(derived.composite_key.clone()),
            display: derived.display.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HexFeature {
    pub hex_id: HexId,
    pub attributes: HexAttributes,
    /// Closed `[lng, lat]` ring; empty when the id is not an H3 cell
    pub boundary: Vec<[f64; 2]>,
}

impl HexFeature {
    pub fn new(hex_id: HexId) -> Self {
        let boundary = boundary_ring(&hex_id);
        HexFeature {
            hex_id,
            attributes: HexAttributes::default(),
            boundary,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureEdit {
    pub hex_id: HexId,
    pub attributes: HexAttributes,
}

/// Queryable record store behind the rendered hex layer.
pub trait FeatureStore {
    /// Hex ids of the features currently rendered
    fn query_features(&self) -> Result<Vec<HexId>>;

    /// Apply a whole batch of edits. Either every edit lands or none does.
    fn apply_edits(&mut self, edits: Vec<FeatureEdit>) -> Result<()>;

    /// Ask the renderer to redraw
    fn refresh(&mut self);

    fn attributes(&self, hex: &str) -> Option<&HexAttributes>;
}

/// Closed boundary ring for an H3 hex id in `[lng, lat]` degrees.
pub fn boundary_ring(hex_id: &HexId) -> Vec<[f64; 2]> {
    let Some(cell) = hex_id.cell_index() else {
        return Vec::new();
    };
    let mut ring: Vec<[f64; 2]> = cell
        .boundary()
        .iter()
        .map(|ll| [ll.lng_radians().to_degrees(), ll.lat_radians().to_degrees()])
        .collect();
    if let Some(first) = ring.first().copied() {
        ring.push(first);
    }
    ring
}

#[cfg(test)]
mod tests {
    use super::*;
    use more_asserts::assert_ge;

    #[test]
    fn boundary_ring_is_closed() {
        let ring = boundary_ring(&HexId::new("8928308280fffff"));
        assert_ge!(ring.len(), 7);
        assert_eq!(ring.first(), ring.last());
        for [lng, lat] in &ring {
            assert!((-123.0..-122.0).contains(lng), "lng {}", lng);
            assert!((37.0..38.0).contains(lat), "lat {}", lat);
        }
    }

    #[test]
    fn opaque_ids_have_no_boundary() {
        assert!(boundary_ring(&HexId::new("hex-1")).is_empty());
    }

    #[test]
    fn tooltip_shows_ranges() {
        let attrs = HexAttributes {
            final_value_harms: 0.8,
            final_value_assets: 0.3,
            ..Default::default()
        };
        assert_eq!(
            attrs.tooltip_html(),
            "<div><strong>Harms:</strong> 75-100%</div><div><strong>Assets:</strong> 25-50%</div>"
        );
    }
}
