use crate::model::Script;
use std::str::FromStr;

/// A user-facing ordinal for a script.
///
/// Ordinals are assigned over the whole catalogue, newest first, before any
/// filtering. A script keeps its number in every filtered view, so `copy 3`
/// means the same script whether or not a search is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisplayIndex(pub usize);

impl std::fmt::Display for DisplayIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DisplayIndex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<usize>()
            .map(DisplayIndex)
            .map_err(|_| format!("Invalid index format: {}", s))
    }
}

/// A user input to select a script, either by its ordinal or a search term
/// for its title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptSelector {
    Index(DisplayIndex),
    Title(String),
}

impl std::fmt::Display for ScriptSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptSelector::Index(idx) => write!(f, "{}", idx),
            ScriptSelector::Title(t) => write!(f, "\"{}\"", t),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DisplayScript {
    pub script: Script,
    pub index: DisplayIndex,
}

/// Assigns canonical ordinals to scripts, newest first. Timestamp ties
/// break on id so batch imports keep a stable order.
pub fn index_scripts(mut scripts: Vec<Script>) -> Vec<DisplayScript> {
    scripts.sort_by(|a, b| {
        b.metadata
            .created_at
            .cmp(&a.metadata.created_at)
            .then_with(|| a.metadata.id.cmp(&b.metadata.id))
    });

    scripts
        .into_iter()
        .enumerate()
        .map(|(i, script)| DisplayScript {
            script,
            index: DisplayIndex(i + 1),
        })
        .collect()
}

/// Parses a single input that may be an ordinal ("3") or a range ("3-5").
///
/// Range rules: start must be <= end; existence of the ordinals is checked
/// later during resolution.
pub fn parse_index_or_range(s: &str) -> Result<Vec<DisplayIndex>, String> {
    if let Some(dash_pos) = s.find('-') {
        if dash_pos > 0 {
            let start = DisplayIndex::from_str(&s[..dash_pos])?;
            let end = DisplayIndex::from_str(&s[dash_pos + 1..])?;
            if start.0 > end.0 {
                return Err(format!(
                    "Invalid range: start ({}) must be <= end ({})",
                    start, end
                ));
            }
            return Ok((start.0..=end.0).map(DisplayIndex).collect());
        }
    }

    DisplayIndex::from_str(s).map(|idx| vec![idx])
}
