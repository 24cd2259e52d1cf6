use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::DisplayScript;
use crate::store::CatalogStore;

use super::helpers::indexed_scripts;

/// Ranked search: exact title beats title substring beats content
/// substring. Ties break on shorter title, then older script. Ordinals
/// stay canonical, only the row order changes.
pub fn run<S: CatalogStore>(store: &S, term: &str) -> Result<CmdResult> {
    let indexed = indexed_scripts(store)?;
    let term_lower = term.to_lowercase();

    let mut matches: Vec<(DisplayScript, u8)> = indexed
        .into_iter()
        .filter_map(|ds| {
            let title_lower = ds.script.metadata.title.to_lowercase();
            let content_lower = ds.script.content.to_lowercase();

            let score = if title_lower == term_lower {
                1
            } else if title_lower.contains(&term_lower) {
                2
            } else if content_lower.contains(&term_lower) {
                3
            } else {
                return None;
            };

            Some((ds, score))
        })
        .collect();

    matches.sort_by(|(a, score_a), (b, score_b)| match score_a.cmp(score_b) {
        std::cmp::Ordering::Equal => {
            let len_a = a.script.metadata.title.len();
            let len_b = b.script.metadata.title.len();
            match len_a.cmp(&len_b) {
                std::cmp::Ordering::Equal => a
                    .script
                    .metadata
                    .created_at
                    .cmp(&b.script.metadata.created_at),
                ord => ord,
            }
        }
        ord => ord,
    });

    let listed = matches.into_iter().map(|(ds, _)| ds).collect();
    Ok(CmdResult::default().with_listed_scripts(listed))
}
