// src/format_name.rs - human-readable indicator names

use once_cell::sync::Lazy;
use std::collections::HashMap;

static NAME_OVERRIDES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("community_center_dist", "Community Center Distance");
    m.insert("library_dist", "Library Distance");
    m.insert("burn_prob", "Burn Probability");
    m.insert("flame_length", "Flame Length");
    m
});

/// Turns raw variable names like `park_access` into "Park Access".
#[derive(Debug, Clone, Default)]
pub struct NameFormatter {
    extra: HashMap<String, String>,
}

impl NameFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Formatter with additional overrides; these win over the built-in table.
    pub fn with_overrides(extra: HashMap<String, String>) -> Self {
        NameFormatter { extra }
    }

    pub fn format(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }
        if let Some(name) = self.extra.get(raw) {
            return name.clone();
        }
        if let Some(name) = NAME_OVERRIDES.get(raw) {
            return (*name).to_string();
        }
        title_case(raw)
    }
}

fn title_case(raw: &str) -> String {
    raw.replace('_', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
