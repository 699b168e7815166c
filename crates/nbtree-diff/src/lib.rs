//! Structural diff for tag trees.
//!
//! Compares an original tree with its edited counterpart and annotates the
//! nodes of each side as added, modified or deleted. Unchanged nodes carry no
//! annotation.
//!
//! # Key Types
//!
//! - [`compute_diff_maps`] -- Entry point; pairs compounds by name and lists by position
//! - [`DiffMaps`] -- One path-keyed annotation map per side
//! - [`DiffStatus`] / [`DiffSummary`] -- Per-node status and totals

pub mod status;
pub mod tree_diff;

pub use status::{DiffMaps, DiffStatus, DiffSummary};
pub use tree_diff::compute_diff_maps;

#[cfg(test)]
mod tests {
    use super::*;
    use nbtree_types::{Tag, TagValue};
    use proptest::prelude::*;

    fn arb_leaf() -> impl Strategy<Value = TagValue> {
        prop_oneof![
            any::<i8>().prop_map(TagValue::Byte),
            any::<i32>().prop_map(TagValue::Int),
            any::<i64>().prop_map(TagValue::LongInt),
            any::<f64>().prop_map(TagValue::DoubleFloat),
            "[a-z]{0,4}".prop_map(TagValue::String),
            prop::collection::vec(any::<i32>(), 0..4).prop_map(TagValue::IntArray),
        ]
    }

    fn arb_tree() -> impl Strategy<Value = Tag> {
        let leaf = ("[a-c]", arb_leaf()).prop_map(|(name, value)| Tag::new(name, value));
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                ("[a-c]", prop::collection::vec(inner.clone(), 0..4))
                    .prop_map(|(name, children)| Tag::compound(name, children)),
                ("[a-c]", prop::collection::vec(inner, 0..4))
                    .prop_map(|(name, items)| Tag::list(name, items)),
            ]
        })
    }

    proptest! {
        #[test]
        fn self_diff_is_empty(tree in arb_tree()) {
            prop_assert!(compute_diff_maps(&tree, &tree).is_empty());
        }

        #[test]
        fn annotated_paths_exist_in_their_tree(a in arb_tree(), b in arb_tree()) {
            let maps = compute_diff_maps(&a, &b);
            for path in maps.original.keys() {
                prop_assert!(a.get(path).is_some());
            }
            for path in maps.edited.keys() {
                prop_assert!(b.get(path).is_some());
            }
            prop_assert!(maps.original.values().all(|s| *s != DiffStatus::Added));
            prop_assert!(maps.edited.values().all(|s| *s != DiffStatus::Deleted));
        }
    }
}
