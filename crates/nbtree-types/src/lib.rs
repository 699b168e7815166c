//! Tag model for named-tag hierarchical documents.
//!
//! This crate provides the recursive tree type every other `nbtree` crate
//! operates on, the closed set of tag types, and node addressing.
//!
//! # Key Types
//!
//! - [`Tag`] / [`TagValue`] -- A named node and its typed payload
//! - [`TagType`] -- Value or container type, with [`ValueType`] and [`ContainerType`]
//! - [`TagPath`] -- Child-index address of a node within one tree
//! - [`wire`] -- The `{name, type, value}` JSON form used for import and export

pub mod error;
pub mod kind;
pub mod path;
pub mod tag;
pub mod wire;

pub use error::{TypeError, TypeResult};
pub use kind::{ContainerType, TagType, ValueType, FLOAT_MAX};
pub use path::TagPath;
pub use tag::{is_container, is_value, Element, Tag, TagValue};
pub use wire::{from_json, to_json};

/// The value type implied for elements of `container`; `None` when elements
/// are self-typed tags.
pub fn element_value_type(container: ContainerType) -> Option<ValueType> {
    container.element_value_type()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn every_type_is_exactly_one_kind(idx in 0usize..TagType::ALL.len()) {
            let t = TagType::ALL[idx];
            prop_assert!(t.is_container() != t.is_value());
            if let TagType::Container(c) = t {
                let has_elem = element_value_type(c).is_some();
                prop_assert_eq!(has_elem, c.is_typed_array());
            }
        }
    }
}
