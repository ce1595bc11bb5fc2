pub mod aggregate;
pub mod bins;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod display;
pub mod error;
pub mod flags;
pub mod format_name;
pub mod indicator;
pub mod layer;
pub mod selection;

pub use aggregate::{DerivedHexAttributes, HexAggregator};
pub use bins::{Bin, assign_bin, label_for};
pub use config::EngineConfig;
pub use dataset::{Dataset, HexRowSet};
pub use error::{EngineError, Result};
pub use indicator::{Baseline, HexId, IndicatorRow, IndicatorSet, IndicatorType};
pub use layer::{FeatureStore, HoverCache, LayerSynchronizer, MemoryFeatureStore};
pub use selection::{SelectionContext, SelectionEvent, SyncScheduler};
