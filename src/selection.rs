//! Selection state and the coalescing scheduler that drives synchronization.
//!
//! UI callbacks turn into [`SelectionEvent`]s. Events are folded into a
//! [`SelectionContext`] by pure transitions; the scheduler then runs at most
//! one synchronization per flush, for whatever state the last event left.

use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::flags::ScreenerLayers;
use crate::indicator::{Baseline, IndicatorSet};
use crate::layer::{FeatureStore, Generation, HoverCache, LayerSynchronizer, MemoryFeatureStore, SyncReport, SyncRequest};

#[derive(Debug, Clone)]
pub enum SelectionEvent {
    /// `None` or an empty list both mean nothing is selected
    IndicatorsChanged(Option<Vec<String>>),
    BaselineChanged(Baseline),
    DatasetLoaded(Arc<Dataset>),
    DatasetCleared,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionContext {
    pub dataset: Option<Arc<Dataset>>,
    pub selected: IndicatorSet,
    pub baseline: Baseline,
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub context: SelectionContext,
    /// A full recomputation is needed
    pub recompute: bool,
    /// The dataset was replaced or dropped, so the rendered layer must be rebuilt
    pub layer_changed: bool,
}

impl SelectionContext {
    pub fn new(baseline: Baseline) -> Self {
        SelectionContext {
            baseline,
            ..Default::default()
        }
    }

    pub fn apply(self, event: SelectionEvent) -> Transition {
        let mut context = self;
        let mut layer_changed = false;
        let recompute = match event {
            SelectionEvent::IndicatorsChanged(names) => {
                context.selected = names.unwrap_or_default().into_iter().collect();
                context.dataset.is_some()
            }
            SelectionEvent::BaselineChanged(baseline) => {
                context.baseline = baseline;
                context.dataset.is_some()
            }
            SelectionEvent::DatasetLoaded(dataset) => {
                context.dataset = Some(dataset);
                layer_changed = true;
                true
            }
            SelectionEvent::DatasetCleared => {
                context.dataset = None;
                layer_changed = true;
                false
            }
        };
        Transition {
            context,
            recompute,
            layer_changed,
        }
    }
}

/// The rendered state for the loaded dataset.
#[derive(Debug)]
pub struct HexLayer<S> {
    pub store: S,
    pub cache: HoverCache,
    pub screeners: ScreenerLayers,
}

type StoreBuilder<S> = Box<dyn Fn(&Dataset) -> S>;

pub struct SyncScheduler<S = MemoryFeatureStore> {
    context: SelectionContext,
    pending: VecDeque<SelectionEvent>,
    generation: Generation,
    dirty: bool,
    /// Set when the dataset changed and the layer has not been rebuilt yet
    layer_stale: bool,
    synchronizer: LayerSynchronizer,
    flag_variables: Vec<String>,
    build_store: StoreBuilder<S>,
    layer: Option<HexLayer<S>>,
}

impl SyncScheduler<MemoryFeatureStore> {
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_store_builder(config, |dataset| MemoryFeatureStore::from_hex_ids(dataset.hex_ids()))
    }
}

impl<S: FeatureStore> SyncScheduler<S> {
    pub fn with_store_builder<F>(config: &EngineConfig, build_store: F) -> Self
    where
        F: Fn(&Dataset) -> S + 'static,
    {
        SyncScheduler {
            context: SelectionContext::new(config.default_baseline),
            pending: VecDeque::new(),
            generation: Generation::new(),
            dirty: false,
            layer_stale: false,
            synchronizer: LayerSynchronizer::new(config.name_formatter()),
            flag_variables: config.flag_variables.clone(),
            build_store: Box::new(build_store),
            layer: None,
        }
    }

    /// Queue an event; returns the generation it belongs to. A pass still
    /// running for an older generation will abort instead of writing.
    pub fn submit(&mut self, event: SelectionEvent) -> u64 {
        self.pending.push_back(event);
        self.generation.bump()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Shared handle for callers that submit from inside a running pass
    pub fn generation(&self) -> Generation {
        self.generation.clone()
    }

    pub fn context(&self) -> &SelectionContext {
        &self.context
    }

    pub fn layer(&self) -> Option<&HexLayer<S>> {
        self.layer.as_ref()
    }

    pub fn toggle_screener(&mut self, name: &str, visible: bool) -> bool {
        self.layer.as_mut().is_some_and(|layer| layer.screeners.toggle(name, visible))
    }

    /// Fold every queued event and synchronize once if anything asked for it.
    /// A failed pass leaves the request outstanding for the next flush.
    pub fn flush(&mut self) -> Result<Option<SyncReport>> {
        let events = self.pending.len();
        while let Some(event) = self.pending.pop_front() {
            let transition = std::mem::take(&mut self.context).apply(event);
            self.context = transition.context;
            self.dirty |= transition.recompute;
            self.layer_stale |= transition.layer_changed;
        }
        if events > 1 {
            debug!(events, "coalesced selection events");
        }

        // a failed rebuild keeps the old layer and retries on the next flush
        if self.layer_stale {
            self.rebuild_layer()?;
            self.layer_stale = false;
        }

        if !self.dirty {
            return Ok(None);
        }
        let Some(layer) = self.layer.as_mut() else {
            self.dirty = false;
            return Ok(None);
        };

        let request = SyncRequest {
            dataset: self.context.dataset.as_deref(),
            selected: &self.context.selected,
            baseline: self.context.baseline,
            generation: self.generation.current(),
            latest: Some(&self.generation),
        };
        let report = self.synchronizer.synchronize(&request, &mut layer.store, &mut layer.cache)?;
        self.dirty = false;
        Ok(Some(report))
    }

    fn rebuild_layer(&mut self) -> Result<()> {
        self.layer = match self.context.dataset.as_deref() {
            Some(dataset) => {
                let store = (self.build_store)(dataset);
                let cache = HoverCache::from_store(&store)?;
                let screeners = ScreenerLayers::from_dataset(dataset, &self.flag_variables);
                info!(
                    dataset = dataset.name().unwrap_or("unnamed"),
                    hexes = cache.len(),
                    screeners = screeners.len(),
                    "built hex layer"
                );
                Some(HexLayer { store, cache, screeners })
            }
            None => {
                info!("cleared hex layer");
                None
            }
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Option<Vec<String>> {
        Some(list.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn selection_without_dataset_does_not_recompute() {
        let t = SelectionContext::default().apply(SelectionEvent::IndicatorsChanged(names(&["a"])));
        assert!(!t.recompute);
        assert!(t.context.selected.contains("a"));

        let t = t.context.apply(SelectionEvent::BaselineChanged(Baseline::State));
        assert!(!t.recompute);
        assert_eq!(t.context.baseline, Baseline::State);
    }

    #[test]
    fn dataset_load_recomputes_and_clear_does_not() {
        let t = SelectionContext::default().apply(SelectionEvent::DatasetLoaded(Arc::new(Dataset::default())));
        assert!(t.recompute);
        assert!(t.layer_changed);

        let t = t.context.apply(SelectionEvent::IndicatorsChanged(None));
        assert!(t.recompute);
        assert!(t.context.selected.is_empty());

        let t = t.context.apply(SelectionEvent::DatasetCleared);
        assert!(!t.recompute);
        assert!(t.layer_changed);
        assert!(t.context.dataset.is_none());
    }

    #[test]
    fn submit_bumps_generation() {
        let mut scheduler = SyncScheduler::new(&EngineConfig::default());
        assert_eq!(scheduler.submit(SelectionEvent::BaselineChanged(Baseline::County)), 1);
        assert_eq!(scheduler.submit(SelectionEvent::BaselineChanged(Baseline::State)), 2);
        assert_eq!(scheduler.pending(), 2);
        assert!(scheduler.flush().unwrap().is_none());
        assert_eq!(scheduler.context().baseline, Baseline::State);
        assert_eq!(scheduler.pending(), 0);
    }
}
