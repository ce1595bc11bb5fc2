use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

use crate::aggregate::HexAggregator;
use crate::dataset::Dataset;
use crate::error::{EngineError, Result};
use crate::format_name::NameFormatter;
use crate::indicator::{Baseline, HexId, IndicatorSet};
use crate::layer::{FeatureEdit, FeatureStore, HexAttributes, HoverCache};

/// Monotonic selection generation shared between the scheduler and anything
/// that can request a newer pass while one is running.
#[derive(Debug, Clone, Default)]
pub struct Generation(Arc<AtomicU64>);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    /// Advance and return the new generation
    pub fn bump(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }
}

pub struct SyncRequest<'a> {
    pub dataset: Option<&'a Dataset>,
    pub selected: &'a IndicatorSet,
    pub baseline: Baseline,
    /// Generation this pass computes for; checked against `latest`
    pub generation: u64,
    pub latest: Option<&'a Generation>,
}

impl<'a> SyncRequest<'a> {
    pub fn new(dataset: &'a Dataset, selected: &'a IndicatorSet, baseline: Baseline) -> Self {
        SyncRequest {
            dataset: Some(dataset),
            selected,
            baseline,
            generation: 0,
            latest: None,
        }
    }

    fn check_current(&self) -> Result<()> {
        match self.latest.map(Generation::current) {
            Some(latest) if latest != self.generation => Err(EngineError::Superseded {
                generation: self.generation,
                latest,
            }),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncReport {
    pub generation: u64,
    pub baseline: Baseline,
    pub updated: usize,
    /// Rendered hexes with no rows in the dataset; left as they were
    pub skipped: usize,
    pub excluded_rows: usize,
    /// Hexes per composite key
    pub composite_keys: BTreeMap<String, usize>,
}

/// Recomputes every rendered hex and writes the result to the store and the cache.
#[derive(Debug, Clone, Default)]
pub struct LayerSynchronizer {
    formatter: NameFormatter,
}

impl LayerSynchronizer {
    pub fn new(formatter: NameFormatter) -> Self {
        LayerSynchronizer { formatter }
    }

    /// One full pass. Each hex is aggregated once and that value feeds both the
    /// store edit and the cache item. Store edits go out as a single batch and
    /// the renderer is refreshed once. On any error neither the store nor the
    /// cache has been touched.
    pub fn synchronize<S: FeatureStore + ?Sized>(
        &self,
        request: &SyncRequest<'_>,
        store: &mut S,
        cache: &mut HoverCache,
    ) -> Result<SyncReport> {
        let dataset = request.dataset.ok_or(EngineError::NoDataset)?;
        let rows = dataset.rows();
        let aggregator = HexAggregator::with_formatter(request.baseline, self.formatter.clone());

        let hex_ids = store.query_features()?;
        request.check_current()?;

        let mut report = SyncReport {
            generation: request.generation,
            baseline: request.baseline,
            ..Default::default()
        };
        let mut edits = Vec::with_capacity(hex_ids.len());
        let mut mirror: Vec<(HexId, HexAttributes)> = Vec::with_capacity(hex_ids.len());

        for hex_id in hex_ids {
            let Some(hex_rows) = rows.get(hex_id.as_str()) else {
                debug!(hex = %hex_id, "no rows for rendered hex");
                report.skipped += 1;
                continue;
            };
            request.check_current()?;

            let derived = aggregator.aggregate(hex_rows, request.selected);
            report.excluded_rows += derived.excluded_rows;
            *report.composite_keys.entry(derived.composite_key.clone()).or_default() += 1;

            let attributes = HexAttributes::from(&derived);
            edits.push(FeatureEdit {
                hex_id: hex_id.clone(),
                attributes: attributes.clone(),
            });
            mirror.push((hex_id, attributes));
        }

        request.check_current()?;
        store.apply_edits(edits)?;

        report.updated = mirror.len();
        for (hex_id, attributes) in mirror {
            cache.insert(hex_id, attributes);
        }
        store.refresh();

        info!(
            generation = report.generation,
            baseline = %report.baseline,
            selected = request.selected.len(),
            updated = report.updated,
            skipped = report.skipped,
            excluded_rows = report.excluded_rows,
            "hex layer synchronized"
        );
        Ok(report)
    }
}
