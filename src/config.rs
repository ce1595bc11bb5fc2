use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::constants::DEFAULT_FLAG_VARIABLES;
use crate::error::{EngineError, Result};
use crate::format_name::NameFormatter;
use crate::indicator::Baseline;

/// Engine settings. Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Baseline used until the user picks one
    pub default_baseline: Baseline,
    /// Flag variables that get a screener layer
    pub flag_variables: Vec<String>,
    /// Display names layered over the built-in overrides
    pub name_overrides: HashMap<String, String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            default_baseline: Baseline::Local,
            flag_variables: DEFAULT_FLAG_VARIABLES.iter().map(|s| s.to_string()).collect(),
            name_overrides: HashMap::new(),
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn name_formatter(&self) -> NameFormatter {
        NameFormatter::with_overrides(self.name_overrides.clone())
    }
}
