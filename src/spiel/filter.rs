//! Script filtering.
//!
//! The deterministic core behind listings and live search. A query either
//! keeps a script or drops it; input order is preserved and nothing here
//! touches I/O.

use crate::model::{Script, ScriptMeta};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Policy for matching a script against the selected tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagMatch {
    /// Keep scripts carrying every selected tag.
    #[default]
    All,
    /// Keep scripts carrying at least one selected tag.
    Any,
}

/// Combined listing filter: free-text search, tag selection, category.
/// The default query matches everything.
#[derive(Debug, Clone, Default)]
pub struct ScriptQuery {
    pub search: String,
    pub tags: Vec<String>,
    pub tag_match: TagMatch,
    pub category_id: Option<Uuid>,
}

impl ScriptQuery {
    pub fn matches(&self, script: &Script) -> bool {
        self.matches_category(&script.metadata)
            && self.matches_search(script)
            && self.matches_tags(&script.metadata)
    }

    // Exact equality against the script's own category. Scripts filed in a
    // child category do not match the parent's id.
    fn matches_category(&self, meta: &ScriptMeta) -> bool {
        match self.category_id {
            Some(id) => meta.category_id == Some(id),
            None => true,
        }
    }

    // Case-insensitive substring over title and content only; category
    // names never participate in search.
    fn matches_search(&self, script: &Script) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let term = self.search.to_lowercase();
        script.metadata.title.to_lowercase().contains(&term)
            || script.content.to_lowercase().contains(&term)
    }

    // Tags compare verbatim. A script without tags never matches a
    // non-empty selection under either policy.
    fn matches_tags(&self, meta: &ScriptMeta) -> bool {
        if self.tags.is_empty() {
            return true;
        }
        match self.tag_match {
            TagMatch::All => self.tags.iter().all(|t| meta.tags.contains(t)),
            TagMatch::Any => self.tags.iter().any(|t| meta.tags.contains(t)),
        }
    }
}

/// Apply `query` over `scripts`, keeping survivors in input order.
pub fn filter_scripts(mut scripts: Vec<Script>, query: &ScriptQuery) -> Vec<Script> {
    scripts.retain(|s| query.matches(s));
    scripts
}

/// A tag with the number of scripts carrying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagUsage {
    pub name: String,
    pub count: usize,
}

/// Distinct tags across the given scripts with usage counts, sorted by name.
pub fn collect_tags(scripts: &[ScriptMeta]) -> Vec<TagUsage> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for meta in scripts {
        for tag in &meta.tags {
            *counts.entry(tag.clone()).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .map(|(name, count)| TagUsage { name, count })
        .collect()
}
