// src/flags.rs - screener outline layers for flagged hexes

use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::constants::{
    DEFAULT_SCREENER_COLOR, FLAG_HIGHWAY, FLAG_TRANSMISSION_LINES, FLAG_TSUNAMI_ZONE, HIGHWAY_COLOR,
    TRANSMISSION_LINES_COLOR, TSUNAMI_ZONE_COLOR,
};
use crate::dataset::Dataset;
use crate::indicator::HexId;
use crate::layer::boundary_ring;

pub fn outline_color(flag: &str) -> [u8; 4] {
    match flag {
        FLAG_TSUNAMI_ZONE => TSUNAMI_ZONE_COLOR,
        FLAG_TRANSMISSION_LINES => TRANSMISSION_LINES_COLOR,
        FLAG_HIGHWAY => HIGHWAY_COLOR,
        _ => DEFAULT_SCREENER_COLOR,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenerLayer {
    pub name: String,
    pub color: [u8; 4],
    pub hex_ids: Vec<HexId>,
    pub outlines: Vec<Vec<[f64; 2]>>,
    pub visible: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ScreenerLayers {
    layers: BTreeMap<String, ScreenerLayer>,
}

impl ScreenerLayers {
    /// One hidden layer per flag variable that flags at least one hex.
    /// An empty `only` list accepts every flag variable.
    pub fn from_dataset(dataset: &Dataset, only: &[String]) -> Self {
        let mut layers = BTreeMap::new();
        for (flag, hex_ids) in dataset.flags() {
            if hex_ids.is_empty() || (!only.is_empty() && !only.contains(flag)) {
                continue;
            }
            debug!(flag = %flag, hexes = hex_ids.len(), "adding screener layer");
            layers.insert(
                flag.clone(),
                ScreenerLayer {
                    name: flag.clone(),
                    color: outline_color(flag),
                    hex_ids: hex_ids.clone(),
                    outlines: hex_ids.iter().map(boundary_ring).collect(),
                    visible: false,
                },
            );
        }
        ScreenerLayers { layers }
    }

    pub fn get(&self, name: &str) -> Option<&ScreenerLayer> {
        self.layers.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.layers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Show or hide a layer; false if there is no such layer.
    pub fn toggle(&mut self, name: &str, visible: bool) -> bool {
        match self.layers.get_mut(name) {
            Some(layer) => {
                layer.visible = visible;
                true
            }
            None => {
                warn!(layer = %name, "screener layer not found");
                false
            }
        }
    }
}
