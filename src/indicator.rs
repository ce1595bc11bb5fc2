// src/indicator.rs - indicator rows, baselines and selections

use h3o::CellIndex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::constants::{COUNTY_PCT_FIELD, LOCAL_PCT_FIELD, STATE_PCT_FIELD};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorType {
    Harm,
    Asset,
    Flag,
}

/// Comparison population whose percentile rank is read for binning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Baseline {
    #[default]
    #[serde(rename = "ugb_pct_rank", alias = "local")]
    Local,
    #[serde(rename = "county_pct_rank", alias = "county")]
    County,
    #[serde(rename = "state_pct_rank", alias = "state")]
    State,
}

impl Baseline {
    pub const ALL: [Baseline; 3] = [Baseline::Local, Baseline::County, Baseline::State];

    pub fn field_name(&self) -> &'static str {
        match self {
            Baseline::Local => LOCAL_PCT_FIELD,
            Baseline::County => COUNTY_PCT_FIELD,
            Baseline::State => STATE_PCT_FIELD,
        }
    }

    pub fn from_field_name(s: &str) -> Option<Self> {
        match s {
            LOCAL_PCT_FIELD | "local" => Some(Baseline::Local),
            COUNTY_PCT_FIELD | "county" => Some(Baseline::County),
            STATE_PCT_FIELD | "state" => Some(Baseline::State),
            _ => None,
        }
    }
}

impl fmt::Display for Baseline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Opaque hex identifier. City datasets use H3 indexes written as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexId(String);

impl HexId {
    pub fn new(id: impl Into<String>) -> Self {
        HexId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The H3 cell behind this id, if it is one.
    pub fn cell_index(&self) -> Option<CellIndex> {
        let raw = u64::from_str_radix(&self.0, 16).ok()?;
        CellIndex::try_from(raw).ok()
    }
}

impl fmt::Display for HexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HexId {
    fn from(s: &str) -> Self {
        HexId(s.to_string())
    }
}

impl From<String> for HexId {
    fn from(s: String) -> Self {
        HexId(s)
    }
}

impl std::borrow::Borrow<str> for HexId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One observation of one variable for one hex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    #[serde(rename = "var")]
    pub variable: String,
    #[serde(rename = "type")]
    pub kind: IndicatorType,
    #[serde(default)]
    pub ugb_pct_rank: Option<f64>,
    #[serde(default)]
    pub county_pct_rank: Option<f64>,
    #[serde(default)]
    pub state_pct_rank: Option<f64>,
    /// Raw value; for flags, non-zero means the hex is flagged
    #[serde(default)]
    pub value: Option<f64>,
}

impl IndicatorRow {
    pub fn new(variable: impl Into<String>, kind: IndicatorType) -> Self {
        IndicatorRow {
            variable: variable.into(),
            kind,
            ugb_pct_rank: None,
            county_pct_rank: None,
            state_pct_rank: None,
            value: None,
        }
    }

    pub fn with_percentile(mut self, baseline: Baseline, pct: f64) -> Self {
        match baseline {
            Baseline::Local => self.ugb_pct_rank = Some(pct),
            Baseline::County => self.county_pct_rank = Some(pct),
            Baseline::State => self.state_pct_rank = Some(pct),
        }
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// Percentile for the baseline; missing and non-finite values read as `None`.
    pub fn percentile(&self, baseline: Baseline) -> Option<f64> {
        let pct = match baseline {
            Baseline::Local => self.ugb_pct_rank,
            Baseline::County => self.county_pct_rank,
            Baseline::State => self.state_pct_rank,
        };
        pct.filter(|v| v.is_finite())
    }

    /// Flag rows mark their hex only with a present, non-zero value; `null` does not.
    pub fn is_flagged(&self) -> bool {
        self.kind == IndicatorType::Flag && self.value.is_some_and(|v| v != 0.0)
    }
}

/// The user-selected indicator variable names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorSet(HashSet<String>);

impl IndicatorSet {
    pub fn new() -> Self {
        IndicatorSet(HashSet::new())
    }

    pub fn contains(&self, variable: &str) -> bool {
        self.0.contains(variable)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for IndicatorSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        IndicatorSet(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_field_names_round_trip() {
        for baseline in Baseline::ALL {
            assert_eq!(Baseline::from_field_name(baseline.field_name()), Some(baseline));
        }
        assert_eq!(Baseline::from_field_name("county"), Some(Baseline::County));
        assert_eq!(Baseline::from_field_name("ugb"), None);

        let b: Baseline = serde_json::from_str("\"state_pct_rank\"").unwrap();
        assert_eq!(b, Baseline::State);
        let b: Baseline = serde_json::from_str("\"local\"").unwrap();
        assert_eq!(b, Baseline::Local);
    }

    #[test]
    fn percentile_reads_active_field() {
        let row = IndicatorRow::new("burn_prob", IndicatorType::Harm)
            .with_percentile(Baseline::Local, 0.2)
            .with_percentile(Baseline::State, 0.8);
        assert_eq!(row.percentile(Baseline::Local), Some(0.2));
        assert_eq!(row.percentile(Baseline::County), None);
        assert_eq!(row.percentile(Baseline::State), Some(0.8));
    }

    #[test]
    fn nan_percentile_reads_as_missing() {
        let row = IndicatorRow::new("x", IndicatorType::Asset).with_percentile(Baseline::Local, f64::NAN);
        assert_eq!(row.percentile(Baseline::Local), None);
    }

    #[test]
    fn flagged_only_for_nonzero_flag_rows() {
        assert!(IndicatorRow::new("highway", IndicatorType::Flag).with_value(1.0).is_flagged());
        assert!(!IndicatorRow::new("highway", IndicatorType::Flag).with_value(0.0).is_flagged());
        assert!(!IndicatorRow::new("highway", IndicatorType::Flag).is_flagged());
        assert!(!IndicatorRow::new("highway", IndicatorType::Harm).with_value(1.0).is_flagged());
    }

    #[test]
    fn hex_id_parses_h3_cells() {
        let id = HexId::new("8928308280fffff");
        assert!(id.cell_index().is_some());
        assert!(HexId::new("not-a-cell").cell_index().is_none());
    }

    #[test]
    fn row_deserializes_from_record() {
        let row: IndicatorRow = serde_json::from_str(
            r#"{"var": "library_dist", "type": "asset", "ugb_pct_rank": 0.4, "county_pct_rank": null}"#,
        )
        .unwrap();
        assert_eq!(row.kind, IndicatorType::Asset);
        assert_eq!(row.percentile(Baseline::Local), Some(0.4));
        assert_eq!(row.percentile(Baseline::County), None);
    }
}
