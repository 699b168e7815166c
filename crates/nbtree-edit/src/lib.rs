//! Persistent edits on tag trees.
//!
//! Every operation takes a tree by reference and returns a new one. Rejected
//! edits return an [`EditError`] and no tree, so the caller's previous tree is
//! untouched by construction.
//!
//! # Key Items
//!
//! - [`add_child`] / [`remove_child_at`] / [`move_child`] -- Container edits
//! - [`try_remove_child_at`] / [`try_move_child`] / [`add_named_child`] -- The
//!   same edits, refusing ones that would misplace a terminator or name
//! - [`set_value_from_text`] / [`set_element_from_text`] -- Validated assignment
//! - [`update_at`] -- Lift an edit of a nested node to a new root
//! - [`EditSession`] / [`EditorMode`] -- Edited tree, its original and the view mode

pub mod assign;
pub mod error;
pub mod mutate;
pub mod session;

pub use assign::{rename, set_element_from_text, set_value_from_text, update_at};
pub use error::{EditError, EditResult};
pub use mutate::{
    add_child, add_named_child, default_tag, move_child, remove_child_at, try_move_child,
    try_remove_child_at,
};
pub use session::{EditSession, EditorMode};

#[cfg(test)]
mod tests {
    use super::*;
    use nbtree_types::{Element, Tag, TagType, TagValue};
    use proptest::prelude::*;

    fn arb_child() -> impl Strategy<Value = Tag> {
        let types: Vec<TagType> = TagType::ALL
            .into_iter()
            .filter(|t| t.is_addable())
            .collect();
        ("[a-z]{1,3}", prop::sample::select(types))
            .prop_map(|(name, t)| default_tag(t, name).unwrap())
    }

    fn well_formed_compound() -> impl Strategy<Value = Tag> {
        prop::collection::vec(arb_child(), 0..6).prop_map(|children| Tag::compound("", children))
    }

    fn int_list() -> impl Strategy<Value = Tag> {
        prop::collection::vec(any::<i32>(), 0..8).prop_map(|values| {
            Tag::list("", values.into_iter().map(|v| Tag::new("", TagValue::Int(v))))
        })
    }

    proptest! {
        #[test]
        fn add_child_keeps_one_trailing_terminator(
            compound in well_formed_compound(),
            additions in prop::collection::vec(arb_child(), 1..5),
        ) {
            let mut tree = compound;
            for child in additions {
                tree = add_child(&tree, Element::Tag(child)).unwrap();
                let children = tree.children();
                prop_assert!(children.last().is_some_and(Tag::is_end));
                prop_assert_eq!(children.iter().filter(|c| c.is_end()).count(), 1);
            }
        }

        #[test]
        fn move_onto_self_is_identity(list in int_list(), i in 0usize..10) {
            prop_assert_eq!(move_child(&list, i, i), list.clone());
            prop_assert_eq!(move_child(&list, i, i + 1), list.clone());
        }

        #[test]
        fn move_then_move_back_restores_order(list in int_list(), from in 0usize..8, to in 0usize..9) {
            let len = list.children().len();
            prop_assume!(from < len && to <= len);

            let moved = move_child(&list, from, to);
            // where the element landed, and the insert-before index that
            // returns it to `from`
            let landed = if from < to && to != from + 1 { to - 1 } else if to < from { to } else { from };
            let back = if landed < from { from + 1 } else { from };
            prop_assert_eq!(move_child(&moved, landed, back), list);
        }
    }
}
