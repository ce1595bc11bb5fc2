//! City datasets: per-hex indicator rows keyed by hex id.
//!
//! A dataset is built once per load and never mutated; a new city replaces it
//! wholesale.

mod hex_row_set;

pub use hex_row_set::HexRowSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{EngineError, Result};
use crate::indicator::{HexId, IndicatorRow};

/// One decoded record as delivered by the columnar reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub grid_id: HexId,
    #[serde(flatten)]
    pub row: IndicatorRow,
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    name: Option<String>,
    rows: HexRowSet,
    hex_ids: Vec<HexId>,
    flags: BTreeMap<String, Vec<HexId>>,
}

impl Dataset {
    pub fn from_records(records: Vec<RawRecord>) -> Self {
        let mut rows = HexRowSet::default();
        let mut hex_ids = Vec::new();
        let mut flags: BTreeMap<String, Vec<HexId>> = BTreeMap::new();

        for RawRecord { grid_id, row } in records {
            if row.is_flagged() {
                debug!(hex = %grid_id, flag = %row.variable, "flagged hex");
                flags.entry(row.variable.clone()).or_default().push(grid_id.clone());
            }
            if rows.push(grid_id.clone(), row) {
                hex_ids.push(grid_id);
            }
        }

        Dataset {
            name: None,
            rows,
            hex_ids,
            flags,
        }
    }

    /// Parse a JSON array of records. A record with a non-numeric percentile or
    /// an unknown type fails the whole load.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let values: Vec<Value> = serde_json::from_str(json)?;
        let mut records = Vec::with_capacity(values.len());
        for (index, value) in values.into_iter().enumerate() {
            let record: RawRecord = serde_json::from_value(value).map_err(|e| EngineError::InvalidRecord {
                index,
                reason: e.to_string(),
            })?;
            records.push(record);
        }
        let dataset = Self::from_records(records);
        info!(
            hexes = dataset.hex_count(),
            rows = dataset.rows.row_count(),
            flags = dataset.flags.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut dataset = Self::from_json_str(&json)?;
        dataset.name = path.file_stem().map(|s| s.to_string_lossy().into_owned());
        Ok(dataset)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn rows(&self) -> &HexRowSet {
        &self.rows
    }

    /// Unique hex ids in first-seen order
    pub fn hex_ids(&self) -> &[HexId] {
        &self.hex_ids
    }

    pub fn hex_count(&self) -> usize {
        self.hex_ids.len()
    }

    /// Hexes flagged per flag variable
    pub fn flags(&self) -> &BTreeMap<String, Vec<HexId>> {
        &self.flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::{Baseline, IndicatorType};

    const CITY: &str = r#"[
        {"grid_id": "8928308280fffff", "var": "burn_prob", "type": "harm", "value": 3.1,
         "ugb_pct_rank": 0.9, "county_pct_rank": 0.7, "state_pct_rank": 0.5},
        {"grid_id": "8928308280fffff", "var": "library_dist", "type": "asset", "value": 120,
         "ugb_pct_rank": 0.2, "county_pct_rank": 0.3, "state_pct_rank": 0.4},
        {"grid_id": "8928308283bffff", "var": "burn_prob", "type": "harm", "value": 1.0,
         "ugb_pct_rank": 0.1, "county_pct_rank": null, "state_pct_rank": 0.2},
        {"grid_id": "8928308283bffff", "var": "highway", "type": "flag", "value": 1},
        {"grid_id": "8928308280fffff", "var": "highway", "type": "flag", "value": 0}
    ]"#;

    #[test]
    fn groups_rows_by_hex() {
        let ds = Dataset::from_json_str(CITY).unwrap();
        assert_eq!(ds.hex_count(), 2);
        assert_eq!(ds.hex_ids()[0].as_str(), "8928308280fffff");
        assert_eq!(ds.hex_ids()[1].as_str(), "8928308283bffff");

        let rows = ds.rows().get(ds.hex_ids()[0].as_str()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].variable, "burn_prob");
        assert_eq!(rows[1].kind, IndicatorType::Asset);
        assert_eq!(rows[1].percentile(Baseline::State), Some(0.4));
    }

    #[test]
    fn collects_flagged_hexes() {
        let ds = Dataset::from_json_str(CITY).unwrap();
        assert_eq!(ds.flags().len(), 1);
        assert_eq!(ds.flags()["highway"], vec![HexId::new("8928308283bffff")]);
    }

    #[test]
    fn null_or_missing_flag_value_is_not_flagged() {
        let json = r#"[
            {"grid_id": "8928308280fffff", "var": "highway", "type": "flag", "value": null},
            {"grid_id": "8928308283bffff", "var": "highway", "type": "flag"},
            {"grid_id": "892830828cfffff", "var": "tsunami_zone", "type": "flag", "value": null}
        ]"#;
        let ds = Dataset::from_json_str(json).unwrap();
        assert!(ds.flags().is_empty());
        // the rows still load, they just do not mark the hex
        assert_eq!(ds.hex_count(), 3);
    }

    #[test]
    fn null_percentile_is_missing() {
        let ds = Dataset::from_json_str(CITY).unwrap();
        let rows = ds.rows().get("8928308283bffff").unwrap();
        assert_eq!(rows[0].percentile(Baseline::County), None);
    }

    #[test]
    fn non_numeric_percentile_fails_the_load() {
        let bad = r#"[
            {"grid_id": "a", "var": "x", "type": "harm", "ugb_pct_rank": 0.1},
            {"grid_id": "b", "var": "x", "type": "harm", "ugb_pct_rank": "high"}
        ]"#;
        match Dataset::from_json_str(bad) {
            Err(EngineError::InvalidRecord { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn unknown_type_fails_the_load() {
        let bad = r#"[{"grid_id": "a", "var": "x", "type": "hazard", "ugb_pct_rank": 0.1}]"#;
        assert!(matches!(
            Dataset::from_json_str(bad),
            Err(EngineError::InvalidRecord { index: 0, .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Dataset::from_json_file("/path/that/does/not/exist.json").unwrap_err();
        assert!(matches!(err, EngineError::Io { .. }));
    }
}
