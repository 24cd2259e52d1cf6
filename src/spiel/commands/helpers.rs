use crate::error::{Result, SpielError};
use crate::index::{index_scripts, DisplayIndex, DisplayScript, ScriptSelector};
use crate::model::Category;
use crate::store::CatalogStore;
use uuid::Uuid;

pub fn indexed_scripts<S: CatalogStore>(store: &S) -> Result<Vec<DisplayScript>> {
    let scripts = store.list_scripts(None)?;
    Ok(index_scripts(scripts))
}

/// Maps selectors to script ids against the canonical ordering. Ordinals
/// must exist; title terms must resolve uniquely (exact match first, then
/// substring), case-insensitively.
pub fn resolve_selectors<S: CatalogStore>(
    store: &S,
    selectors: &[ScriptSelector],
) -> Result<Vec<(DisplayIndex, Uuid)>> {
    let indexed = indexed_scripts(store)?;

    selectors
        .iter()
        .map(|selector| match selector {
            ScriptSelector::Index(idx) => indexed
                .iter()
                .find(|ds| &ds.index == idx)
                .map(|ds| (*idx, ds.script.metadata.id))
                .ok_or_else(|| SpielError::Api(format!("No script at index {}", idx))),
            ScriptSelector::Title(term) => resolve_title(&indexed, term),
        })
        .collect()
}

fn resolve_title(
    indexed: &[DisplayScript],
    term: &str,
) -> Result<(DisplayIndex, Uuid)> {
    let term_lower = term.to_lowercase();

    let exact: Vec<&DisplayScript> = indexed
        .iter()
        .filter(|ds| ds.script.metadata.title.to_lowercase() == term_lower)
        .collect();
    let candidates = if exact.is_empty() {
        indexed
            .iter()
            .filter(|ds| ds.script.metadata.title.to_lowercase().contains(&term_lower))
            .collect()
    } else {
        exact
    };

    match candidates.as_slice() {
        [] => Err(SpielError::Api(format!("No script matching \"{}\"", term))),
        [only] => Ok((only.index, only.script.metadata.id)),
        many => {
            let titles: Vec<String> = many
                .iter()
                .map(|ds| format!("{} ({})", ds.script.metadata.title, ds.index))
                .collect();
            Err(SpielError::Api(format!(
                "\"{}\" is ambiguous, matches: {}",
                term,
                titles.join(", ")
            )))
        }
    }
}

pub fn scripts_by_selectors<S: CatalogStore>(
    store: &S,
    selectors: &[ScriptSelector],
) -> Result<Vec<DisplayScript>> {
    let resolved = resolve_selectors(store, selectors)?;
    let mut scripts = Vec::with_capacity(resolved.len());
    for (index, id) in resolved {
        let script = store.get_script(&id)?;
        scripts.push(DisplayScript { script, index });
    }
    Ok(scripts)
}

/// Resolves a category reference given on the command line: a full id, or
/// a unique case-insensitive name.
pub fn resolve_category<S: CatalogStore>(store: &S, reference: &str) -> Result<Category> {
    let categories = store.list_categories()?;

    if let Ok(id) = Uuid::parse_str(reference) {
        if let Some(cat) = categories.iter().find(|c| c.id == id) {
            return Ok(cat.clone());
        }
    }

    let wanted = reference.to_lowercase();
    let matches: Vec<&Category> = categories
        .iter()
        .filter(|c| c.name.to_lowercase() == wanted)
        .collect();

    match matches.as_slice() {
        [] => Err(SpielError::CategoryNotFound(reference.to_string())),
        [only] => Ok((*only).clone()),
        _ => Err(SpielError::Api(format!(
            "Category name \"{}\" is ambiguous, use the id",
            reference
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn title_selector_prefers_exact_match() {
        let fixture = StoreFixture::default()
            .with_script("Intro", "")
            .with_script("Intro extended", "");

        let resolved = resolve_selectors(
            &fixture.store,
            &[ScriptSelector::Title("intro".to_string())],
        )
        .unwrap();
        assert_eq!(resolved.len(), 1);

        let script = fixture.store.get_script(&resolved[0].1).unwrap();
        assert_eq!(script.metadata.title, "Intro");
    }

    #[test]
    fn ambiguous_substring_names_the_candidates() {
        let fixture = StoreFixture::default()
            .with_script("Pricing pitch", "")
            .with_script("Pricing reply", "");

        let err = resolve_selectors(
            &fixture.store,
            &[ScriptSelector::Title("pricing".to_string())],
        )
        .unwrap_err();
        assert!(err.to_string().contains("ambiguous"));
    }

    #[test]
    fn missing_index_is_an_error() {
        let fixture = StoreFixture::default().with_scripts(1);
        let err = resolve_selectors(
            &fixture.store,
            &[ScriptSelector::Index(crate::index::DisplayIndex(9))],
        )
        .unwrap_err();
        assert!(err.to_string().contains("index 9"));
    }

    #[test]
    fn category_resolves_by_name_case_insensitively() {
        let fixture = StoreFixture::default().with_category("Sales");
        let cat = resolve_category(&fixture.store, "sales").unwrap();
        assert_eq!(cat.name, "Sales");

        assert!(resolve_category(&fixture.store, "nope").is_err());
    }

    #[test]
    fn category_resolves_by_id() {
        let fixture = StoreFixture::default().with_category("Sales");
        let id = fixture.category_id("Sales");
        let cat = resolve_category(&fixture.store, &id.to_string()).unwrap();
        assert_eq!(cat.id, id);
    }
}
