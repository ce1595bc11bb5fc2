use std::collections::HashMap;

use crate::indicator::{HexId, IndicatorRow};

/// Indicator rows per hex, in load order.
#[derive(Debug, Clone, Default)]
pub struct HexRowSet {
    rows: HashMap<HexId, Vec<IndicatorRow>>,
}

impl HexRowSet {
    /// Append a row; returns true when this is the first row for the hex.
    pub(crate) fn push(&mut self, hex: HexId, row: IndicatorRow) -> bool {
        let entry = self.rows.entry(hex).or_default();
        entry.push(row);
        entry.len() == 1
    }

    pub fn get(&self, hex: &str) -> Option<&[IndicatorRow]> {
        self.rows.get(hex).map(Vec::as_slice)
    }

    pub fn contains(&self, hex: &str) -> bool {
        self.rows.contains_key(hex)
    }

    pub fn hex_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
