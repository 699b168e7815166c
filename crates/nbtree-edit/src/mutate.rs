//! Structural edits on a single container.
//!
//! Each operation takes the container by reference and returns a new one; the
//! input is never modified. Nested edits are lifted to the root with
//! [`update_at`](crate::assign::update_at).

use tracing::debug;

use nbtree_types::{ContainerType, Element, Tag, TagType, TagValue, ValueType};

use crate::error::{EditError, EditResult};

/// A copy of `container` without the element at `index`.
///
/// Out-of-range indices and non-container targets yield an unchanged copy.
/// Removing a compound's terminator is not prevented here; see
/// [`try_remove_child_at`].
pub fn remove_child_at(container: &Tag, index: usize) -> Tag {
    let mut out = container.clone();
    let removed = match &mut out.value {
        TagValue::ByteArray(v) => remove_from(v, index),
        TagValue::IntArray(v) => remove_from(v, index),
        TagValue::LongIntArray(v) => remove_from(v, index),
        TagValue::List(v) | TagValue::Compound(v) => remove_from(v, index),
        _ => false,
    };
    if !removed {
        debug!(index, tag_type = container.value.type_name(), "nothing to remove");
    }
    out
}

/// A copy of `container` with `item` appended.
///
/// For compounds the terminator is kept last by swapping the first terminator
/// with the new element, and appended if the compound had none. A compound
/// item is given a trailing terminator if it lacks one.
///
/// Fails without producing a tree when `container` is not a container, when
/// `item` is not of the container's element kind, or when `item` is a bare
/// terminator.
pub fn add_child(container: &Tag, item: Element) -> EditResult<Tag> {
    let kind = match container.tag_type() {
        Some(TagType::Container(kind)) => kind,
        _ => return Err(EditError::NotAContainer(container.value.type_name().to_string())),
    };
    if !item.fits(kind) {
        return Err(EditError::ElementMismatch {
            container: TagType::Container(kind).label().to_string(),
            element: element_label(&item),
        });
    }

    let mut out = container.clone();
    match (&mut out.value, item) {
        (TagValue::ByteArray(v), Element::Byte(b)) => v.push(b),
        (TagValue::IntArray(v), Element::Int(n)) => v.push(n),
        (TagValue::LongIntArray(v), Element::LongInt(n)) => v.push(n),
        (TagValue::List(items), Element::Tag(tag)) => items.push(prepare_child(tag)?),
        (TagValue::Compound(children), Element::Tag(tag)) => {
            children.push(prepare_child(tag)?);
            settle_terminator(children);
        }
        (_, item) => {
            return Err(EditError::ElementMismatch {
                container: TagType::Container(kind).label().to_string(),
                element: element_label(&item),
            })
        }
    }
    debug!(
        tag_type = TagType::Container(kind).label(),
        len = out.element_count().unwrap_or_default(),
        "added child"
    );
    Ok(out)
}

/// A copy of `container` with the element at `from` moved before the element
/// originally at `to`.
///
/// `to` ranges over `0..=len`, `len` meaning the end. Dropping an element onto
/// itself (`to == from` or `to == from + 1`) and out-of-range indices leave
/// the order unchanged.
pub fn move_child(container: &Tag, from: usize, to: usize) -> Tag {
    let mut out = container.clone();
    let moved = match &mut out.value {
        TagValue::ByteArray(v) => move_within(v, from, to),
        TagValue::IntArray(v) => move_within(v, from, to),
        TagValue::LongIntArray(v) => move_within(v, from, to),
        TagValue::List(v) | TagValue::Compound(v) => move_within(v, from, to),
        _ => false,
    };
    if moved {
        debug!(from, to, "moved child");
    }
    out
}

/// Checked form of [`remove_child_at`].
///
/// Refuses a non-container target, an index past the end, and a compound's
/// terminator.
pub fn try_remove_child_at(container: &Tag, index: usize) -> EditResult<Tag> {
    let len = checked_len(container)?;
    if index >= len {
        return Err(EditError::IndexOutOfRange { index, len });
    }
    if matches!(&container.value, TagValue::Compound(c) if c[index].is_end()) {
        return Err(EditError::TerminatorPinned { index });
    }
    Ok(remove_child_at(container, index))
}

/// Checked form of [`move_child`].
///
/// Besides the range checks, a compound's terminator cannot be picked up and
/// nothing can be dropped behind it.
pub fn try_move_child(container: &Tag, from: usize, to: usize) -> EditResult<Tag> {
    let len = checked_len(container)?;
    if from >= len {
        return Err(EditError::IndexOutOfRange { index: from, len });
    }
    if to > len {
        return Err(EditError::IndexOutOfRange { index: to, len });
    }
    if let TagValue::Compound(children) = &container.value {
        if let Some(end) = children.iter().position(Tag::is_end) {
            if from == end || to > end {
                return Err(EditError::TerminatorPinned { index: end });
            }
        }
    }
    Ok(move_child(container, from, to))
}

/// [`add_child`] for a named tag.
///
/// A compound child's name is trimmed and must be non-empty and unused by its
/// siblings. Other containers ignore names and take `tag` as is.
pub fn add_named_child(container: &Tag, mut tag: Tag) -> EditResult<Tag> {
    if let TagValue::Compound(children) = &container.value {
        let name = tag.name.trim();
        if name.is_empty() {
            return Err(EditError::EmptyName);
        }
        if children.iter().any(|c| !c.is_end() && c.name == name) {
            return Err(EditError::DuplicateName(name.to_string()));
        }
        tag.name = name.to_string();
    }
    add_child(container, Element::Tag(tag))
}

/// The tag a fresh "add child" of type `tag_type` starts out as: zero for
/// numbers, empty for strings and containers, and a compound holding only its
/// terminator.
pub fn default_tag(tag_type: TagType, name: impl Into<String>) -> EditResult<Tag> {
    let value = match tag_type {
        TagType::Value(v) => match v {
            ValueType::Byte => TagValue::Byte(0),
            ValueType::ShortInt => TagValue::ShortInt(0),
            ValueType::Int => TagValue::Int(0),
            ValueType::LongInt => TagValue::LongInt(0),
            ValueType::Float => TagValue::Float(0.0),
            ValueType::DoubleFloat => TagValue::DoubleFloat(0.0),
            ValueType::String => TagValue::String(String::new()),
            ValueType::CompoundEnd => return Err(EditError::SentinelNotAddable),
        },
        TagType::Container(c) => match c {
            ContainerType::ByteArray => TagValue::ByteArray(Vec::new()),
            ContainerType::IntArray => TagValue::IntArray(Vec::new()),
            ContainerType::LongIntArray => TagValue::LongIntArray(Vec::new()),
            ContainerType::List => TagValue::List(Vec::new()),
            ContainerType::Compound => return Ok(Tag::compound(name, [])),
        },
    };
    Ok(Tag::new(name, value))
}

fn element_label(item: &Element) -> &'static str {
    match item {
        Element::Byte(_) => "a byte element",
        Element::Int(_) => "an int element",
        Element::LongInt(_) => "a long element",
        Element::Tag(tag) if tag.is_end() => "a terminator",
        Element::Tag(_) => "a nested tag",
    }
}

fn prepare_child(mut tag: Tag) -> EditResult<Tag> {
    if tag.is_end() {
        return Err(EditError::SentinelNotAddable);
    }
    if let TagValue::Compound(children) = &mut tag.value {
        if !children.last().is_some_and(Tag::is_end) {
            settle_terminator(children);
        }
    }
    Ok(tag)
}

/// Swap the first terminator into the last slot, or append one if absent.
fn settle_terminator(children: &mut Vec<Tag>) {
    match children.iter().position(Tag::is_end) {
        Some(i) => {
            let last = children.len() - 1;
            children.swap(i, last);
        }
        None => children.push(Tag::end()),
    }
}

fn checked_len(container: &Tag) -> EditResult<usize> {
    container
        .element_count()
        .ok_or_else(|| EditError::NotAContainer(container.value.type_name().to_string()))
}

fn remove_from<T>(v: &mut Vec<T>, index: usize) -> bool {
    if index < v.len() {
        v.remove(index);
        true
    } else {
        false
    }
}

fn move_within<T>(v: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= v.len() || to > v.len() || to == from || to == from + 1 {
        return false;
    }
    let item = v.remove(from);
    let dest = if from < to { to - 1 } else { to };
    v.insert(dest, item);
    true
}
