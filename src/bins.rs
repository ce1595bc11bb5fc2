//! Quartile binning for percentile-rank values.
//!
//! Boundaries belong to the lower bin, so exactly 0.25 is bin 1 and anything
//! above 0.75 (including out-of-range values) is bin 4.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{BIN_LABELS, BIN_Q1, BIN_Q2, BIN_Q3, UNKNOWN_BIN_LABEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Bin {
    First,
    Second,
    Third,
    Fourth,
}

impl Bin {
    /// Highest bin first, the order groups appear in a display string
    pub const DESCENDING: [Bin; 4] = [Bin::Fourth, Bin::Third, Bin::Second, Bin::First];

    pub fn number(self) -> u8 {
        match self {
            Bin::First => 1,
            Bin::Second => 2,
            Bin::Third => 3,
            Bin::Fourth => 4,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Bin::First),
            2 => Some(Bin::Second),
            3 => Some(Bin::Third),
            4 => Some(Bin::Fourth),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        BIN_LABELS[self.index()]
    }

    pub(crate) fn index(self) -> usize {
        self.number() as usize - 1
    }
}

impl fmt::Display for Bin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl From<Bin> for u8 {
    fn from(bin: Bin) -> u8 {
        bin.number()
    }
}

impl TryFrom<u8> for Bin {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Bin::from_number(n).ok_or_else(|| format!("bin out of range: {}", n))
    }
}

/// Assign a quartile bin to a percentile value.
pub fn assign_bin(value: f64) -> Bin {
    if value <= BIN_Q1 {
        Bin::First
    } else if value <= BIN_Q2 {
        Bin::Second
    } else if value <= BIN_Q3 {
        Bin::Third
    } else {
        Bin::Fourth
    }
}

/// Percentile range for a raw bin number; numbers outside 1..=4 map to "unknown".
pub fn label_for(bin: u8) -> &'static str {
    Bin::from_number(bin).map_or(UNKNOWN_BIN_LABEL, Bin::label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_fall_in_lower_bin() {
        assert_eq!(assign_bin(0.25), Bin::First);
        assert_eq!(assign_bin(0.2500001), Bin::Second);
        assert_eq!(assign_bin(0.5), Bin::Second);
        assert_eq!(assign_bin(0.75), Bin::Third);
        assert_eq!(assign_bin(1.0), Bin::Fourth);
    }

    #[test]
    fn out_of_range_values_still_bin() {
        assert_eq!(assign_bin(-5.0), Bin::First);
        assert_eq!(assign_bin(5.0), Bin::Fourth);
        assert_eq!(assign_bin(f64::NEG_INFINITY), Bin::First);
        assert_eq!(assign_bin(f64::INFINITY), Bin::Fourth);
    }

    #[test]
    fn every_value_lands_in_range() {
        for i in -20..=120 {
            let n = assign_bin(i as f64 / 100.0).number();
            assert!((1..=4).contains(&n), "bin {} for {}", n, i);
        }
    }

    #[test]
    fn labels() {
        assert_eq!(label_for(1), "0-25%");
        assert_eq!(label_for(2), "25-50%");
        assert_eq!(label_for(3), "50-75%");
        assert_eq!(label_for(4), "75-100%");
        assert_eq!(label_for(0), "unknown");
        assert_eq!(label_for(9), "unknown");
        assert_eq!(Bin::Third.label(), "50-75%");
    }

    #[test]
    fn serializes_as_number() {
        assert_eq!(serde_json::to_string(&Bin::Third).unwrap(), "3");
        let bin: Bin = serde_json::from_str("2").unwrap();
        assert_eq!(bin, Bin::Second);
        assert!(serde_json::from_str::<Bin>("7").is_err());
    }
}
