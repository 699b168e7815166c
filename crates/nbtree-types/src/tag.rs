//! The recursive tag tree.

use serde::Deserialize;

use crate::kind::{ContainerType, TagType, ValueType};
use crate::path::TagPath;
use crate::wire::WireTag;

/// A named, typed node of a document tree.
///
/// The name is only meaningful for children of a compound; lists and typed
/// arrays ignore it.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "WireTag")]
pub struct Tag {
    pub name: String,
    pub value: TagValue,
}

/// Payload of a tag. The variant doubles as the tag's type discriminant.
#[derive(Clone, Debug, PartialEq)]
pub enum TagValue {
    Byte(i8),
    ShortInt(i16),
    Int(i32),
    LongInt(i64),
    Float(f32),
    DoubleFloat(f64),
    String(String),
    /// Compound terminator. Must be the last child of every compound.
    CompoundEnd,
    ByteArray(Vec<i8>),
    IntArray(Vec<i32>),
    LongIntArray(Vec<i64>),
    List(Vec<Tag>),
    Compound(Vec<Tag>),
    /// A tag whose type name is outside the known set. Kept verbatim so it
    /// survives a round trip and can be shown as an error placeholder.
    Unknown {
        type_name: String,
        raw: serde_json::Value,
    },
}

impl TagValue {
    /// The type of this payload, or `None` for [`TagValue::Unknown`].
    pub fn tag_type(&self) -> Option<TagType> {
        let t = match self {
            TagValue::Byte(_) => TagType::Value(ValueType::Byte),
            TagValue::ShortInt(_) => TagType::Value(ValueType::ShortInt),
            TagValue::Int(_) => TagType::Value(ValueType::Int),
            TagValue::LongInt(_) => TagType::Value(ValueType::LongInt),
            TagValue::Float(_) => TagType::Value(ValueType::Float),
            TagValue::DoubleFloat(_) => TagType::Value(ValueType::DoubleFloat),
            TagValue::String(_) => TagType::Value(ValueType::String),
            TagValue::CompoundEnd => TagType::Value(ValueType::CompoundEnd),
            TagValue::ByteArray(_) => TagType::Container(ContainerType::ByteArray),
            TagValue::IntArray(_) => TagType::Container(ContainerType::IntArray),
            TagValue::LongIntArray(_) => TagType::Container(ContainerType::LongIntArray),
            TagValue::List(_) => TagType::Container(ContainerType::List),
            TagValue::Compound(_) => TagType::Container(ContainerType::Compound),
            TagValue::Unknown { .. } => return None,
        };
        Some(t)
    }

    /// Wire name of the type, including the verbatim name of unknown types.
    pub fn type_name(&self) -> &str {
        match self {
            TagValue::Unknown { type_name, .. } => type_name,
            other => other.tag_type().map(TagType::as_str).unwrap_or_default(),
        }
    }
}

/// One element of a container: a primitive of a typed array, or a nested tag
/// of a list or compound.
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Byte(i8),
    Int(i32),
    LongInt(i64),
    Tag(Tag),
}

impl Element {
    /// Returns `true` if this element may be stored in a container of type `c`.
    pub fn fits(&self, c: ContainerType) -> bool {
        matches!(
            (self, c),
            (Element::Byte(_), ContainerType::ByteArray)
                | (Element::Int(_), ContainerType::IntArray)
                | (Element::LongInt(_), ContainerType::LongIntArray)
                | (Element::Tag(_), ContainerType::List | ContainerType::Compound)
        )
    }
}

impl From<Tag> for Element {
    fn from(tag: Tag) -> Self {
        Element::Tag(tag)
    }
}

/// Returns `true` iff the tag's type is one of the container types.
pub fn is_container(tag: &Tag) -> bool {
    tag.tag_type().is_some_and(TagType::is_container)
}

/// Returns `true` iff the tag's type is one of the value types, sentinel included.
pub fn is_value(tag: &Tag) -> bool {
    tag.tag_type().is_some_and(TagType::is_value)
}

impl Tag {
    pub fn new(name: impl Into<String>, value: TagValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// The compound terminator sentinel.
    pub fn end() -> Self {
        Self::new("", TagValue::CompoundEnd)
    }

    /// A compound holding `children` followed by its terminator.
    pub fn compound(name: impl Into<String>, children: impl IntoIterator<Item = Tag>) -> Self {
        let mut items: Vec<Tag> = children.into_iter().collect();
        items.push(Self::end());
        Self::new(name, TagValue::Compound(items))
    }

    pub fn list(name: impl Into<String>, items: impl IntoIterator<Item = Tag>) -> Self {
        Self::new(name, TagValue::List(items.into_iter().collect()))
    }

    pub fn tag_type(&self) -> Option<TagType> {
        self.value.tag_type()
    }

    pub fn is_compound(&self) -> bool {
        matches!(self.value, TagValue::Compound(_))
    }

    pub fn is_end(&self) -> bool {
        matches!(self.value, TagValue::CompoundEnd)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self.value, TagValue::Unknown { .. })
    }

    /// Nested tags of a list or compound. Empty for every other type.
    pub fn children(&self) -> &[Tag] {
        match &self.value {
            TagValue::List(items) | TagValue::Compound(items) => items,
            _ => &[],
        }
    }

    /// Number of elements held by a container, primitives included.
    /// `None` for non-containers.
    pub fn element_count(&self) -> Option<usize> {
        match &self.value {
            TagValue::ByteArray(v) => Some(v.len()),
            TagValue::IntArray(v) => Some(v.len()),
            TagValue::LongIntArray(v) => Some(v.len()),
            TagValue::List(v) | TagValue::Compound(v) => Some(v.len()),
            _ => None,
        }
    }

    /// Look up the node at `path`. Only list and compound children are
    /// addressable; typed array elements are not tags.
    pub fn get(&self, path: &TagPath) -> Option<&Tag> {
        path.indices()
            .iter()
            .try_fold(self, |node, &i| node.children().get(i))
    }

    /// Every node from the root down to `path`, both ends included.
    pub fn ancestors(&self, path: &TagPath) -> Option<Vec<&Tag>> {
        let mut trail = Vec::with_capacity(path.depth() + 1);
        let mut node = self;
        trail.push(node);
        for &i in path.indices() {
            node = node.children().get(i)?;
            trail.push(node);
        }
        Some(trail)
    }

    /// All nodes of the subtree in pre-order, each with its path relative to
    /// `self`.
    pub fn walk(&self) -> Vec<(TagPath, &Tag)> {
        let mut out = Vec::new();
        self.walk_into(TagPath::root(), &mut out);
        out
    }

    fn walk_into<'a>(&'a self, path: TagPath, out: &mut Vec<(TagPath, &'a Tag)>) {
        let children = self.children();
        out.push((path.clone(), self));
        for (i, child) in children.iter().enumerate() {
            child.walk_into(path.child(i), out);
        }
    }
}
