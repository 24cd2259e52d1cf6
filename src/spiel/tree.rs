//! Category tree assembly.
//!
//! Builds the display forest from the flat category records the store
//! returns. The builder never fails and never drops input: records with a
//! missing or self-referential parent surface as roots, duplicate ids
//! collapse to the latest record, and parent cycles are broken by promoting
//! the earliest member to a root.

use crate::model::{Category, ScriptMeta};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// A category with its resolved children, in display order.
#[derive(Debug, Clone)]
pub struct CategoryNode {
    pub category: Category,
    pub children: Vec<CategoryNode>,
}

/// Assemble flat records into a forest.
///
/// Roots keep first-encounter input order; children keep input order under
/// their parent. Callers wanting `sort_order` semantics sort the slice
/// before building.
pub fn build_category_tree(categories: &[Category]) -> Vec<CategoryNode> {
    // Deduplicate: the last record for an id wins, seated at the position
    // of the first occurrence.
    let mut slot_of: HashMap<Uuid, usize> = HashMap::new();
    let mut records: Vec<&Category> = Vec::new();
    for cat in categories {
        match slot_of.get(&cat.id) {
            Some(&slot) => records[slot] = cat,
            None => {
                slot_of.insert(cat.id, records.len());
                records.push(cat);
            }
        }
    }

    // Classify. A parent that is absent from the input, or equal to the
    // record itself, does not demote the record: it stays a root.
    let mut roots: Vec<usize> = Vec::new();
    let mut children: HashMap<Uuid, Vec<usize>> = HashMap::new();
    for (slot, cat) in records.iter().enumerate() {
        match cat.parent_id {
            Some(pid) if pid != cat.id && slot_of.contains_key(&pid) => {
                children.entry(pid).or_default().push(slot);
            }
            _ => roots.push(slot),
        }
    }

    let mut emitted = vec![false; records.len()];
    let mut forest: Vec<CategoryNode> = Vec::new();
    for &slot in &roots {
        forest.push(assemble(slot, &records, &children, &mut emitted));
    }

    // Anything still unemitted sits on a parent cycle. Promote the earliest
    // such record to a root; its subtree comes along with it.
    for slot in 0..records.len() {
        if !emitted[slot] {
            forest.push(assemble(slot, &records, &children, &mut emitted));
        }
    }

    forest
}

fn assemble(
    slot: usize,
    records: &[&Category],
    children: &HashMap<Uuid, Vec<usize>>,
    emitted: &mut Vec<bool>,
) -> CategoryNode {
    emitted[slot] = true;
    let category = records[slot].clone();
    let mut node = CategoryNode {
        children: Vec::new(),
        category,
    };
    if let Some(kids) = children.get(&node.category.id) {
        for &kid in kids {
            if !emitted[kid] {
                node.children.push(assemble(kid, records, children, emitted));
            }
        }
    }
    node
}

/// Walk the forest depth-first, yielding each category with its depth.
/// Rebuilding from the flattened order reproduces the same forest.
pub fn flatten_tree(forest: &[CategoryNode]) -> Vec<(&Category, usize)> {
    fn walk<'a>(nodes: &'a [CategoryNode], depth: usize, out: &mut Vec<(&'a Category, usize)>) {
        for node in nodes {
            out.push((&node.category, depth));
            walk(&node.children, depth + 1, out);
        }
    }
    let mut out = Vec::new();
    walk(forest, 0, &mut out);
    out
}

/// Scripts filed under this node or any descendant.
pub fn script_count(node: &CategoryNode, scripts: &[ScriptMeta]) -> usize {
    let direct = scripts
        .iter()
        .filter(|s| s.category_id == Some(node.category.id))
        .count();
    direct
        + node
            .children
            .iter()
            .map(|child| script_count(child, scripts))
            .sum::<usize>()
}

/// Category names from the root down to `id`. Stops at a missing parent or
/// on revisiting a node, so malformed chains still yield a finite path.
pub fn category_path(id: Uuid, categories: &[Category]) -> Vec<String> {
    let by_id: HashMap<Uuid, &Category> = categories.iter().map(|c| (c.id, c)).collect();
    let mut path = Vec::new();
    let mut visited: HashSet<Uuid> = HashSet::new();
    let mut cursor = Some(id);
    while let Some(cid) = cursor {
        if !visited.insert(cid) {
            break;
        }
        match by_id.get(&cid) {
            Some(cat) => {
                path.push(cat.name.clone());
                cursor = cat.parent_id;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(name: &str, parent: Option<Uuid>) -> Category {
        Category::new(name.to_string(), parent, 0)
    }

    fn names(forest: &[CategoryNode]) -> Vec<String> {
        forest.iter().map(|n| n.category.name.clone()).collect()
    }

    #[test]
    fn nested_categories_assemble_under_parents() {
        let root = cat("greetings", None);
        let child = cat("openers", Some(root.id));
        let grandchild = cat("cold-call", Some(child.id));
        let sibling = cat("closers", Some(root.id));

        let forest = build_category_tree(&[
            root.clone(),
            child.clone(),
            grandchild.clone(),
            sibling.clone(),
        ]);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].category.id, root.id);
        assert_eq!(forest[0].children.len(), 2);
        assert_eq!(forest[0].children[0].category.id, child.id);
        assert_eq!(forest[0].children[1].category.id, sibling.id);
        assert_eq!(forest[0].children[0].children[0].category.id, grandchild.id);

        let flat = flatten_tree(&forest);
        let depths: Vec<usize> = flat.iter().map(|(_, d)| *d).collect();
        assert_eq!(depths, vec![0, 1, 2, 1]);
    }

    #[test]
    fn roots_keep_first_encounter_order() {
        let a = cat("alpha", None);
        let b = cat("beta", None);
        let c = cat("gamma", None);
        let forest = build_category_tree(&[a.clone(), b.clone(), c.clone()]);
        assert_eq!(names(&forest), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn siblings_keep_input_order() {
        let root = cat("root", None);
        let one = cat("one", Some(root.id));
        let two = cat("two", Some(root.id));
        let three = cat("three", Some(root.id));
        let forest = build_category_tree(&[root, one, two, three]);
        assert_eq!(names(&forest[0].children), vec!["one", "two", "three"]);
    }

    #[test]
    fn dangling_parent_becomes_root() {
        let ghost = Uuid::new_v4();
        let orphan = cat("orphan", Some(ghost));
        let normal = cat("normal", None);
        let forest = build_category_tree(&[orphan.clone(), normal.clone()]);

        // The orphan is kept, surfacing as a root in encounter order.
        assert_eq!(names(&forest), vec!["orphan", "normal"]);
        assert!(forest.iter().all(|n| n.children.is_empty()));
    }

    #[test]
    fn self_parent_becomes_root() {
        let mut looped = cat("loop", None);
        looped.parent_id = Some(looped.id);
        let forest = build_category_tree(&[looped.clone()]);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].category.id, looped.id);
        assert!(forest[0].children.is_empty());
    }

    #[test]
    fn duplicate_ids_last_record_wins_in_place() {
        let first = cat("first", None);
        let mut renamed = first.clone();
        renamed.name = "renamed".to_string();
        let other = cat("other", None);

        let forest = build_category_tree(&[first, other, renamed]);
        assert_eq!(names(&forest), vec!["renamed", "other"]);
    }

    #[test]
    fn parent_cycle_emits_each_record_once() {
        let mut a = cat("a", None);
        let mut b = cat("b", None);
        a.parent_id = Some(b.id);
        b.parent_id = Some(a.id);
        let child = cat("child", Some(b.id));

        let forest = build_category_tree(&[a.clone(), b.clone(), child.clone()]);

        // The earliest cycle member is promoted; everything appears exactly once.
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].category.id, a.id);
        let flat = flatten_tree(&forest);
        assert_eq!(flat.len(), 3);
        let mut ids: Vec<Uuid> = flat.iter().map(|(c, _)| c.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn empty_input_builds_empty_forest() {
        assert!(build_category_tree(&[]).is_empty());
    }

    #[test]
    fn rebuild_from_flatten_is_stable() {
        let root = cat("root", None);
        let kid = cat("kid", Some(root.id));
        let other = cat("other", None);
        let forest = build_category_tree(&[root, kid, other]);

        let flat: Vec<Category> = flatten_tree(&forest)
            .into_iter()
            .map(|(c, _)| c.clone())
            .collect();
        let rebuilt = build_category_tree(&flat);

        assert_eq!(names(&forest), names(&rebuilt));
        let before: Vec<Uuid> = flatten_tree(&forest).iter().map(|(c, _)| c.id).collect();
        let after: Vec<Uuid> = flatten_tree(&rebuilt).iter().map(|(c, _)| c.id).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn script_count_includes_descendants() {
        let root = cat("root", None);
        let kid = cat("kid", Some(root.id));
        let forest = build_category_tree(&[root.clone(), kid.clone()]);

        let scripts = vec![
            ScriptMeta::new("in root".to_string(), Some(root.id)),
            ScriptMeta::new("in kid".to_string(), Some(kid.id)),
            ScriptMeta::new("unfiled".to_string(), None),
        ];

        assert_eq!(script_count(&forest[0], &scripts), 2);
        assert_eq!(script_count(&forest[0].children[0], &scripts), 1);
    }

    #[test]
    fn path_walks_from_root_to_leaf() {
        let root = cat("sales", None);
        let mid = cat("outbound", Some(root.id));
        let leaf = cat("voicemail", Some(mid.id));
        let all = vec![root, mid, leaf.clone()];

        assert_eq!(
            category_path(leaf.id, &all),
            vec!["sales", "outbound", "voicemail"]
        );
    }

    #[test]
    fn path_stops_at_missing_parent() {
        let ghost = Uuid::new_v4();
        let stranded = cat("stranded", Some(ghost));
        assert_eq!(category_path(stranded.id, &[stranded.clone()]), vec!["stranded"]);
    }
}
