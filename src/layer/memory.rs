use std::collections::HashMap;
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::indicator::HexId;
use crate::layer::{FeatureEdit, FeatureStore, HexAttributes, HexFeature};

/// Feature store kept entirely in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryFeatureStore {
    features: Vec<HexFeature>,
    index: HashMap<HexId, usize>,
    apply_count: usize,
    refresh_count: usize,
}

impl MemoryFeatureStore {
    pub fn from_hex_ids<'a, I>(ids: I) -> Self
    where
        I: IntoIterator<Item = &'a HexId>,
    {
        let mut store = MemoryFeatureStore::default();
        for id in ids {
            if store.index.contains_key(id) {
                continue;
            }
            store.index.insert(id.clone(), store.features.len());
            store.features.push(HexFeature::new(id.clone()));
        }
        store
    }

    pub fn feature(&self, hex: &str) -> Option<&HexFeature> {
        self.index.get(hex).map(|&i| &self.features[i])
    }

    pub fn features(&self) -> &[HexFeature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Number of batches applied so far
    pub fn apply_count(&self) -> usize {
        self.apply_count
    }

    pub fn refresh_count(&self) -> usize {
        self.refresh_count
    }
}

impl FeatureStore for MemoryFeatureStore {
    fn query_features(&self) -> Result<Vec<HexId>> {
        Ok(self.features.iter().map(|f| f.hex_id.clone()).collect())
    }

    fn apply_edits(&mut self, edits: Vec<FeatureEdit>) -> Result<()> {
        if let Some(unknown) = edits.iter().find(|e| !self.index.contains_key(&e.hex_id)) {
            return Err(EngineError::Store(format!("no feature for hex {}", unknown.hex_id)));
        }
        debug!(edits = edits.len(), "applying feature edits");
        for edit in edits {
            let i = self.index[&edit.hex_id];
            self.features[i].attributes = edit.attributes;
        }
        self.apply_count += 1;
        Ok(())
    }

    fn refresh(&mut self) {
        self.refresh_count += 1;
    }

    fn attributes(&self, hex: &str) -> Option<&HexAttributes> {
        self.feature(hex).map(|f| &f.attributes)
    }
}
