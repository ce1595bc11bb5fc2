//! Popup description for a hex.
//!
//! Entries are grouped by bin and emitted highest bin first, so the most
//! extreme indicators lead. Inside a group the insertion order is kept.

use crate::bins::Bin;
use crate::constants::DISPLAY_LINE_BREAK;

#[derive(Debug, Clone, Default)]
pub struct DisplayComposer {
    groups: [Vec<String>; 4],
}

impl DisplayComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one variable; `name` is already formatted for display.
    pub fn push(&mut self, name: &str, bin: Bin) {
        let entry = format!("{}: {} {}", escape_html(name), bin.label(), DISPLAY_LINE_BREAK);
        self.groups[bin.index()].push(entry);
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn compose(&self) -> String {
        Bin::DESCENDING
            .iter()
            .flat_map(|bin| self.groups[bin.index()].iter())
            .map(String::as_str)
            .collect()
    }
}

/// Compose in one go from `(formatted name, bin)` pairs.
pub fn compose_display<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, Bin)>,
{
    let mut composer = DisplayComposer::new();
    for (name, bin) in entries {
        composer.push(name, bin);
    }
    composer.compose()
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
