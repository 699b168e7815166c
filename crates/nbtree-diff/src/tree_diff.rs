//! Tree diff: compare an original and an edited tag tree node by node.
//!
//! Compounds pair their children by name, lists by position. Typed arrays and
//! leaves compare by value. Wherever the two sides disagree on type, the whole
//! original subtree is deleted and the whole edited subtree added.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};

use nbtree_types::{Tag, TagPath, TagValue};

use crate::status::{DiffMaps, DiffStatus};

/// Compare `original` against `edited` and annotate both trees.
///
/// The roots themselves may be annotated. Structurally identical trees yield
/// two empty maps.
pub fn compute_diff_maps(original: &Tag, edited: &Tag) -> DiffMaps {
    let mut maps = DiffMaps::default();
    diff_nodes(original, TagPath::root(), edited, TagPath::root(), &mut maps);

    let summary = maps.summary();
    debug!(
        added = summary.added,
        modified = summary.modified,
        deleted = summary.deleted,
        "computed diff maps"
    );
    maps
}

fn diff_nodes(orig: &Tag, orig_path: TagPath, edit: &Tag, edit_path: TagPath, maps: &mut DiffMaps) {
    // Unknown types compare by their verbatim name, so this also catches
    // known-vs-unknown.
    if orig.value.type_name() != edit.value.type_name() {
        mark_all(orig, orig_path, DiffStatus::Deleted, &mut maps.original);
        mark_all(edit, edit_path, DiffStatus::Added, &mut maps.edited);
        return;
    }

    let changed = match (&orig.value, &edit.value) {
        (TagValue::Compound(a), TagValue::Compound(b)) => {
            diff_compounds(a, &orig_path, b, &edit_path, maps);
            return;
        }
        (TagValue::List(a), TagValue::List(b)) => {
            diff_lists(a, &orig_path, b, &edit_path, maps);
            return;
        }
        // Typed arrays flag the container itself; elements are not nodes.
        (TagValue::ByteArray(a), TagValue::ByteArray(b)) => a != b,
        (TagValue::IntArray(a), TagValue::IntArray(b)) => a != b,
        (TagValue::LongIntArray(a), TagValue::LongIntArray(b)) => a != b,
        (a, b) => !leaf_values_equal(a, b),
    };

    if changed {
        maps.original.insert(orig_path, DiffStatus::Modified);
        maps.edited.insert(edit_path, DiffStatus::Modified);
    }
}

/// Key a compound child is paired by. Terminators pair with each other and
/// never with a real child that happens to have an empty name.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum ChildKey<'a> {
    Terminator,
    Named(&'a str),
}

fn child_key(tag: &Tag) -> ChildKey<'_> {
    if tag.is_end() {
        ChildKey::Terminator
    } else {
        ChildKey::Named(&tag.name)
    }
}

/// Index children by key. On duplicate names the last occurrence wins.
fn index_children<'a>(children: &'a [Tag], path: &TagPath) -> HashMap<ChildKey<'a>, usize> {
    let index: HashMap<_, _> = children
        .iter()
        .enumerate()
        .map(|(i, c)| (child_key(c), i))
        .collect();
    if index.len() < children.len() {
        warn!(
            path = %path,
            children = children.len(),
            distinct = index.len(),
            "compound has duplicate child names; pairing by last occurrence"
        );
    }
    index
}

fn diff_compounds(
    orig: &[Tag],
    orig_path: &TagPath,
    edit: &[Tag],
    edit_path: &TagPath,
    maps: &mut DiffMaps,
) {
    let orig_index = index_children(orig, orig_path);
    let edit_index = index_children(edit, edit_path);

    for (i, child) in orig.iter().enumerate() {
        let key = child_key(child);
        // Shadowed duplicates take no part on either side.
        if orig_index.get(&key) != Some(&i) {
            continue;
        }
        match edit_index.get(&key) {
            Some(&j) => diff_nodes(child, orig_path.child(i), &edit[j], edit_path.child(j), maps),
            None => mark_all(child, orig_path.child(i), DiffStatus::Deleted, &mut maps.original),
        }
    }

    for (j, child) in edit.iter().enumerate() {
        if !orig_index.contains_key(&child_key(child)) {
            mark_all(child, edit_path.child(j), DiffStatus::Added, &mut maps.edited);
        }
    }
}

/// Pair list items by position. An insertion near the front shifts every
/// later pairing; no alignment is attempted.
fn diff_lists(
    orig: &[Tag],
    orig_path: &TagPath,
    edit: &[Tag],
    edit_path: &TagPath,
    maps: &mut DiffMaps,
) {
    for i in 0..orig.len().max(edit.len()) {
        match (orig.get(i), edit.get(i)) {
            (Some(o), Some(e)) => diff_nodes(o, orig_path.child(i), e, edit_path.child(i), maps),
            (Some(o), None) => mark_all(o, orig_path.child(i), DiffStatus::Deleted, &mut maps.original),
            (None, Some(e)) => mark_all(e, edit_path.child(i), DiffStatus::Added, &mut maps.edited),
            (None, None) => {}
        }
    }
}

/// Mark `tag` and every nested tag below it.
fn mark_all(tag: &Tag, path: TagPath, status: DiffStatus, map: &mut BTreeMap<TagPath, DiffStatus>) {
    for (rel, _) in tag.walk() {
        let mut steps = path.indices().to_vec();
        steps.extend_from_slice(rel.indices());
        map.insert(TagPath::from(steps), status);
    }
}

/// Leaf equality. Floats use IEEE equality except that NaN equals NaN, so a
/// tree always compares equal to itself.
fn leaf_values_equal(a: &TagValue, b: &TagValue) -> bool {
    match (a, b) {
        (TagValue::Float(x), TagValue::Float(y)) => x == y || (x.is_nan() && y.is_nan()),
        (TagValue::DoubleFloat(x), TagValue::DoubleFloat(y)) => {
            x == y || (x.is_nan() && y.is_nan())
        }
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(name: &str, v: i32) -> Tag {
        Tag::new(name, TagValue::Int(v))
    }

    fn path(steps: &[usize]) -> TagPath {
        TagPath::from(steps.to_vec())
    }

    #[test]
    fn identical_trees_have_no_entries() {
        let tree = Tag::compound(
            "",
            [
                int("a", 1),
                Tag::list("l", [Tag::compound("", [int("x", 2)])]),
                Tag::new("b", TagValue::LongIntArray(vec![i64::MAX, 0])),
                Tag::new("f", TagValue::Float(f32::NAN)),
            ],
        );
        let maps = compute_diff_maps(&tree, &tree.clone());
        assert!(maps.is_empty());
    }

    #[test]
    fn compound_added_and_deleted_children() {
        let original = Tag::compound("", [int("a", 1), int("b", 2)]);
        let edited = Tag::compound("", [int("a", 1), int("c", 3)]);
        let maps = compute_diff_maps(&original, &edited);

        assert_eq!(maps.original.len(), 1);
        assert_eq!(maps.original_status(&path(&[1])), Some(DiffStatus::Deleted));
        assert_eq!(maps.edited.len(), 1);
        assert_eq!(maps.edited_status(&path(&[1])), Some(DiffStatus::Added));
        assert_eq!(maps.original_status(&path(&[0])), None);
        assert_eq!(maps.edited_status(&path(&[0])), None);
    }

    #[test]
    fn compound_reorder_is_not_a_change() {
        let original = Tag::compound("", [int("a", 1), int("b", 2), int("c", 3)]);
        let edited = Tag::compound("", [int("c", 3), int("a", 1), int("b", 2)]);
        assert!(compute_diff_maps(&original, &edited).is_empty());
    }

    #[test]
    fn compound_match_uses_counterpart_paths() {
        let original = Tag::compound("", [int("a", 1), int("b", 2)]);
        let edited = Tag::compound("", [int("b", 5), int("a", 1)]);
        let maps = compute_diff_maps(&original, &edited);
        assert_eq!(maps.original_status(&path(&[1])), Some(DiffStatus::Modified));
        assert_eq!(maps.edited_status(&path(&[0])), Some(DiffStatus::Modified));
        assert_eq!(maps.original.len(), 1);
        assert_eq!(maps.edited.len(), 1);
    }

    #[test]
    fn modified_leaf_marks_both_sides() {
        let original = Tag::compound("", [Tag::new("s", TagValue::String("x".into()))]);
        let edited = Tag::compound("", [Tag::new("s", TagValue::String("y".into()))]);
        let maps = compute_diff_maps(&original, &edited);
        assert_eq!(maps.original_status(&path(&[0])), Some(DiffStatus::Modified));
        assert_eq!(maps.edited_status(&path(&[0])), Some(DiffStatus::Modified));
    }

    #[test]
    fn list_front_insert_cascades() {
        let original = Tag::list("", [int("", 1), int("", 2)]);
        let edited = Tag::list("", [int("", 9), int("", 1), int("", 2)]);
        let maps = compute_diff_maps(&original, &edited);

        assert_eq!(maps.original_status(&path(&[0])), Some(DiffStatus::Modified));
        assert_eq!(maps.original_status(&path(&[1])), Some(DiffStatus::Modified));
        assert_eq!(maps.edited_status(&path(&[0])), Some(DiffStatus::Modified));
        assert_eq!(maps.edited_status(&path(&[1])), Some(DiffStatus::Modified));
        assert_eq!(maps.edited_status(&path(&[2])), Some(DiffStatus::Added));
        assert_eq!(maps.summary().total(), 3);
    }

    #[test]
    fn list_truncation_deletes_tail_subtrees() {
        let original = Tag::list("", [int("", 1), Tag::compound("", [int("x", 1)])]);
        let edited = Tag::list("", [int("", 1)]);
        let maps = compute_diff_maps(&original, &edited);
        assert!(maps.edited.is_empty());
        assert_eq!(
            maps.original.keys().cloned().collect::<Vec<_>>(),
            vec![path(&[1]), path(&[1, 0]), path(&[1, 1])]
        );
        assert!(maps.original.values().all(|s| *s == DiffStatus::Deleted));
    }

    #[test]
    fn typed_array_change_flags_container_only() {
        let original = Tag::compound("", [Tag::new("b", TagValue::ByteArray(vec![1, 2]))]);
        let edited = Tag::compound("", [Tag::new("b", TagValue::ByteArray(vec![1, 2, 3]))]);
        let maps = compute_diff_maps(&original, &edited);
        assert_eq!(maps.original.len(), 1);
        assert_eq!(maps.original_status(&path(&[0])), Some(DiffStatus::Modified));
        assert_eq!(maps.edited_status(&path(&[0])), Some(DiffStatus::Modified));
    }

    #[test]
    fn type_change_replaces_whole_subtree() {
        let original = Tag::compound("", [Tag::compound("p", [int("x", 1), int("y", 2)])]);
        let edited = Tag::compound("", [Tag::list("p", [int("", 1)])]);
        let maps = compute_diff_maps(&original, &edited);

        // compound p, its two children and its terminator
        assert_eq!(maps.original.len(), 4);
        assert!(maps.original.values().all(|s| *s == DiffStatus::Deleted));
        assert_eq!(maps.edited.len(), 2);
        assert!(maps.edited.values().all(|s| *s == DiffStatus::Added));
    }

    #[test]
    fn root_type_change_annotates_every_node() {
        let original = Tag::compound("", [int("a", 1), Tag::list("l", [int("", 1)])]);
        let edited = Tag::list("", [int("", 1)]);
        let maps = compute_diff_maps(&original, &edited);

        assert_eq!(maps.original.len(), original.walk().len());
        assert_eq!(maps.original_status(&TagPath::root()), Some(DiffStatus::Deleted));
        assert_eq!(maps.edited.len(), edited.walk().len());
        assert_eq!(maps.edited_status(&TagPath::root()), Some(DiffStatus::Added));
    }

    #[test]
    fn long_values_differing_beyond_float_precision_are_modified() {
        let original = Tag::new("l", TagValue::LongInt(9_007_199_254_740_992));
        let edited = Tag::new("l", TagValue::LongInt(9_007_199_254_740_993));
        let maps = compute_diff_maps(&original, &edited);
        assert_eq!(maps.original_status(&TagPath::root()), Some(DiffStatus::Modified));
    }

    #[test]
    fn duplicate_names_pair_with_last_occurrence() {
        let original = Tag::compound("", [int("a", 1)]);
        let edited = Tag::compound("", [int("a", 1), int("a", 2)]);
        let maps = compute_diff_maps(&original, &edited);

        // original a pairs with edited a at index 1 (value 2)
        assert_eq!(maps.original_status(&path(&[0])), Some(DiffStatus::Modified));
        assert_eq!(maps.edited_status(&path(&[1])), Some(DiffStatus::Modified));
        // the shadowed first occurrence is neither visited nor added
        assert_eq!(maps.edited_status(&path(&[0])), None);
    }

    #[test]
    fn shadowed_original_duplicate_is_skipped() {
        let tree = Tag::compound("", [int("a", 1), int("a", 2)]);
        assert!(compute_diff_maps(&tree, &tree).is_empty());

        let edited = Tag::compound("", [int("a", 2)]);
        assert!(compute_diff_maps(&tree, &edited).is_empty());
    }

    #[test]
    fn empty_name_child_does_not_pair_with_terminator() {
        let original = Tag::compound("", [int("", 1)]);
        let edited = Tag::compound("", []);
        let maps = compute_diff_maps(&original, &edited);
        assert_eq!(maps.original.len(), 1);
        assert_eq!(maps.original_status(&path(&[0])), Some(DiffStatus::Deleted));
        assert!(maps.edited.is_empty());
    }

    #[test]
    fn unknown_tags_compare_by_name_and_raw_value() {
        let unknown = |raw: i32| {
            Tag::new(
                "u",
                TagValue::Unknown {
                    type_name: "shortArray".into(),
                    raw: serde_json::json!([raw]),
                },
            )
        };
        let same = compute_diff_maps(&unknown(1), &unknown(1));
        assert!(same.is_empty());
        let changed = compute_diff_maps(&unknown(1), &unknown(2));
        assert_eq!(changed.original_status(&TagPath::root()), Some(DiffStatus::Modified));
        let replaced = compute_diff_maps(&unknown(1), &int("u", 1));
        assert_eq!(replaced.original_status(&TagPath::root()), Some(DiffStatus::Deleted));
    }
}
