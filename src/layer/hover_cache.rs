use std::collections::HashMap;

use crate::indicator::HexId;
use crate::layer::{FeatureStore, HexAttributes};

/// In-memory attributes per hex, read on pointer move.
#[derive(Debug, Clone, Default)]
pub struct HoverCache {
    items: HashMap<HexId, HexAttributes>,
}

impl HoverCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed one default item per hex
    pub fn from_hex_ids<'a, I>(ids: I) -> Self
    where
        I: IntoIterator<Item = &'a HexId>,
    {
        HoverCache {
            items: ids.into_iter().map(|id| (id.clone(), HexAttributes::default())).collect(),
        }
    }

    /// Mirror whatever the store currently holds
    pub fn from_store<S: FeatureStore + ?Sized>(store: &S) -> crate::error::Result<Self> {
        let mut cache = HoverCache::new();
        for id in store.query_features()? {
            let attrs = store.attributes(id.as_str()).cloned().unwrap_or_default();
            cache.items.insert(id, attrs);
        }
        Ok(cache)
    }

    pub fn get(&self, hex: &str) -> Option<&HexAttributes> {
        self.items.get(hex)
    }

    pub(crate) fn insert(&mut self, hex: HexId, attrs: HexAttributes) {
        self.items.insert(hex, attrs);
    }

    pub fn tooltip(&self, hex: &str) -> Option<String> {
        self.get(hex).map(HexAttributes::tooltip_html)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
