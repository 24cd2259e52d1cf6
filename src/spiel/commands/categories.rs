use crate::commands::{CategoryRow, CmdMessage, CmdResult};
use crate::error::{Result, SpielError};
use crate::model::Category;
use crate::store::CatalogStore;
use crate::tree::{build_category_tree, flatten_tree, script_count, CategoryNode};
use uuid::Uuid;

use super::helpers::resolve_category;

/// Categories in display order: `sort_order`, ties broken by age. Tree
/// consumers get sibling order for free since the builder preserves input
/// order.
pub fn ordered_categories<S: CatalogStore>(store: &S) -> Result<Vec<Category>> {
    let mut categories = store.list_categories()?;
    categories.sort_by(|a, b| {
        a.sort_order
            .cmp(&b.sort_order)
            .then_with(|| a.created_at.cmp(&b.created_at))
    });
    Ok(categories)
}

/// The category overview: the tree flattened to rows, each carrying its
/// depth and the script count including descendants.
pub fn list<S: CatalogStore>(store: &S) -> Result<CmdResult> {
    let categories = ordered_categories(store)?;
    let forest = build_category_tree(&categories);
    let scripts: Vec<_> = store
        .list_scripts(None)?
        .into_iter()
        .map(|s| s.metadata)
        .collect();

    let mut rows = Vec::new();
    collect_rows(&forest, 0, &scripts, &mut rows);

    let mut result = CmdResult::default().with_category_rows(rows);
    if categories.is_empty() {
        result.add_message(CmdMessage::info("No categories yet."));
    }
    Ok(result)
}

fn collect_rows(
    nodes: &[CategoryNode],
    depth: usize,
    scripts: &[crate::model::ScriptMeta],
    rows: &mut Vec<CategoryRow>,
) {
    for node in nodes {
        rows.push(CategoryRow {
            category: node.category.clone(),
            depth,
            script_count: script_count(node, scripts),
        });
        collect_rows(&node.children, depth + 1, scripts, rows);
    }
}

pub fn create<S: CatalogStore>(
    store: &mut S,
    name: String,
    parent: Option<&str>,
    sort_order: i64,
) -> Result<CmdResult> {
    let parent_id = match parent {
        Some(reference) => Some(resolve_category(store, reference)?.id),
        None => None,
    };

    let category = Category::new(name, parent_id, sort_order);
    store.save_category(&category)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Category created: {}",
        category.name
    )));
    Ok(result)
}

pub fn rename<S: CatalogStore>(store: &mut S, reference: &str, name: String) -> Result<CmdResult> {
    let mut category = resolve_category(store, reference)?;
    let old_name = std::mem::replace(&mut category.name, name);
    store.save_category(&category)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Category renamed: {} -> {}",
        old_name, category.name
    )));
    Ok(result)
}

/// Reparents a category. `None` moves it to the top level. Moving a
/// category under itself or one of its descendants is rejected, the tree
/// must stay a forest.
pub fn move_category<S: CatalogStore>(
    store: &mut S,
    reference: &str,
    parent: Option<&str>,
) -> Result<CmdResult> {
    let mut category = resolve_category(store, reference)?;

    let parent_id = match parent {
        Some(parent_ref) => {
            let target = resolve_category(store, parent_ref)?;
            if would_form_cycle(store, category.id, target.id)? {
                return Err(SpielError::Api(format!(
                    "Cannot move \"{}\" under its own subtree",
                    category.name
                )));
            }
            Some(target.id)
        }
        None => None,
    };

    category.parent_id = parent_id;
    store.save_category(&category)?;

    let mut result = CmdResult::default();
    let destination = match parent {
        Some(p) => format!("under {}", p),
        None => "to the top level".to_string(),
    };
    result.add_message(CmdMessage::success(format!(
        "Category moved {}: {}",
        destination, category.name
    )));
    Ok(result)
}

fn would_form_cycle<S: CatalogStore>(store: &S, moved: Uuid, new_parent: Uuid) -> Result<bool> {
    if moved == new_parent {
        return Ok(true);
    }
    let categories = store.list_categories()?;
    let forest = build_category_tree(&categories);
    for node in &forest {
        if let Some(subtree) = find_node(node, moved) {
            let descendants = flatten_tree(std::slice::from_ref(subtree));
            return Ok(descendants.iter().any(|(c, _)| c.id == new_parent));
        }
    }
    Ok(false)
}

fn find_node(node: &CategoryNode, id: Uuid) -> Option<&CategoryNode> {
    if node.category.id == id {
        return Some(node);
    }
    node.children.iter().find_map(|child| find_node(child, id))
}

/// Deletes a category without cascading. Children surface as roots and
/// scripts render uncategorized; the message says what now dangles so the
/// user can refile.
pub fn delete<S: CatalogStore>(store: &mut S, reference: &str) -> Result<CmdResult> {
    let category = resolve_category(store, reference)?;

    let orphaned_children = store
        .list_categories()?
        .iter()
        .filter(|c| c.parent_id == Some(category.id))
        .count();
    let orphaned_scripts = store.list_scripts(Some(&category.id))?.len();

    store.delete_category(&category.id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Category deleted: {}",
        category.name
    )));
    if orphaned_children > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} subcategorie(s) moved to the top level",
            orphaned_children
        )));
    }
    if orphaned_scripts > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} script(s) left uncategorized",
            orphaned_scripts
        )));
    }
    Ok(result)
}
