//! Per-hex harm/asset aggregation.
//!
//! The composite key bins the *mean* of each type, while the display string
//! shows every variable's own bin, so the two can disagree.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::bins::{Bin, assign_bin};
use crate::display::DisplayComposer;
use crate::format_name::NameFormatter;
use crate::indicator::{Baseline, IndicatorRow, IndicatorSet, IndicatorType};

/// Derived attributes for one hex, written to the feature store and the hover cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedHexAttributes {
    /// `None` when no selected harm row contributed
    pub mean_harm: Option<f64>,
    /// `None` when no selected asset row contributed
    pub mean_asset: Option<f64>,
    pub composite_key: String,
    pub display: String,
    /// Selected rows dropped for a missing or non-finite baseline value
    #[serde(default)]
    pub excluded_rows: usize,
}

impl DerivedHexAttributes {
    pub fn harm_value(&self) -> f64 {
        self.mean_harm.unwrap_or(0.0)
    }

    pub fn asset_value(&self) -> f64 {
        self.mean_asset.unwrap_or(0.0)
    }

    pub fn harm_bin(&self) -> Bin {
        assign_bin(self.harm_value())
    }

    pub fn asset_bin(&self) -> Bin {
        assign_bin(self.asset_value())
    }
}

/// `"<assetBin>,<harmBin>"`
pub fn composite_key(asset_bin: Bin, harm_bin: Bin) -> String {
    format!("{},{}", asset_bin, harm_bin)
}

#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

#[derive(Debug, Clone, Default)]
pub struct HexAggregator {
    baseline: Baseline,
    formatter: NameFormatter,
}

impl HexAggregator {
    pub fn new(baseline: Baseline) -> Self {
        HexAggregator {
            baseline,
            formatter: NameFormatter::new(),
        }
    }

    pub fn with_formatter(baseline: Baseline, formatter: NameFormatter) -> Self {
        HexAggregator { baseline, formatter }
    }

    pub fn baseline(&self) -> Baseline {
        self.baseline
    }

    pub fn aggregate(&self, rows: &[IndicatorRow], selected: &IndicatorSet) -> DerivedHexAttributes {
        let mut harms = Accumulator::default();
        let mut assets = Accumulator::default();
        let mut composer = DisplayComposer::new();
        let mut excluded_rows = 0;

        for row in rows {
            let acc = match row.kind {
                IndicatorType::Harm => &mut harms,
                IndicatorType::Asset => &mut assets,
                IndicatorType::Flag => continue,
            };
            if !selected.contains(&row.variable) {
                continue;
            }

            let Some(value) = row.percentile(self.baseline) else {
                warn!(
                    variable = %row.variable,
                    baseline = %self.baseline,
                    "excluding row without a numeric percentile"
                );
                excluded_rows += 1;
                continue;
            };

            composer.push(&self.formatter.format(&row.variable), assign_bin(value));
            acc.add(value);
        }

        let mean_harm = harms.mean();
        let mean_asset = assets.mean();

        DerivedHexAttributes {
            composite_key: composite_key(
                assign_bin(mean_asset.unwrap_or(0.0)),
                assign_bin(mean_harm.unwrap_or(0.0)),
            ),
            mean_harm,
            mean_asset,
            display: composer.compose(),
            excluded_rows,
        }
    }
}
