//! Value assignment and path-addressed edits.

use tracing::debug;

use nbtree_types::{Element, Tag, TagPath, TagType, TagValue};
use nbtree_validate::{parse_element, parse_value};

use crate::error::{EditError, EditResult};

/// A copy of the leaf `tag` holding the value parsed from `input`.
///
/// The text is validated against the tag's own type first; on rejection no
/// tag is produced.
pub fn set_value_from_text(tag: &Tag, input: &str) -> EditResult<Tag> {
    let ty = match tag.tag_type() {
        Some(TagType::Value(ty)) => ty,
        _ => return Err(EditError::NotALeaf(tag.value.type_name().to_string())),
    };
    let value = parse_value(ty, input)?;
    debug!(name = %tag.name, tag_type = ty_label(tag), "assigned value");
    Ok(Tag::new(tag.name.clone(), value))
}

/// A copy of the typed array `tag` with element `index` replaced by the value
/// parsed from `input`.
pub fn set_element_from_text(tag: &Tag, index: usize, input: &str) -> EditResult<Tag> {
    let kind = match tag.tag_type() {
        Some(TagType::Container(kind)) => kind,
        _ => return Err(EditError::NotAContainer(tag.value.type_name().to_string())),
    };
    let len = tag.element_count().unwrap_or_default();
    if index >= len {
        return Err(EditError::IndexOutOfRange { index, len });
    }
    let element = parse_element(kind, input)?;

    let mut out = tag.clone();
    match (&mut out.value, element) {
        (TagValue::ByteArray(v), Element::Byte(b)) => v[index] = b,
        (TagValue::IntArray(v), Element::Int(n)) => v[index] = n,
        (TagValue::LongIntArray(v), Element::LongInt(n)) => v[index] = n,
        _ => return Err(EditError::NotALeaf(tag.value.type_name().to_string())),
    }
    Ok(out)
}

/// A copy of `tag` under a new name.
pub fn rename(tag: &Tag, name: impl Into<String>) -> Tag {
    Tag::new(name, tag.value.clone())
}

/// Rebuild `root` with the node at `path` replaced by `f(node)`.
///
/// Every ancestor on the way down is copied; siblings are carried over
/// unchanged. An error from `f` or a dangling path leaves no new tree.
pub fn update_at<F>(root: &Tag, path: &TagPath, f: F) -> EditResult<Tag>
where
    F: FnOnce(&Tag) -> EditResult<Tag>,
{
    rebuild(root, path.indices(), path, f)
}

fn rebuild<F>(node: &Tag, steps: &[usize], path: &TagPath, f: F) -> EditResult<Tag>
where
    F: FnOnce(&Tag) -> EditResult<Tag>,
{
    let Some((&first, rest)) = steps.split_first() else {
        return f(node);
    };
    let child = node
        .children()
        .get(first)
        .ok_or_else(|| EditError::PathNotFound(path.clone()))?;
    let replaced = rebuild(child, rest, path, f)?;

    let mut out = node.clone();
    if let TagValue::List(items) | TagValue::Compound(items) = &mut out.value {
        if let Some(slot) = items.get_mut(first) {
            *slot = replaced;
        }
    }
    Ok(out)
}

fn ty_label(tag: &Tag) -> &'static str {
    tag.tag_type().map(TagType::label).unwrap_or("unknown")
}
