//! The closed set of tag types and their classification predicates.
//!
//! Every tag type is either a *value* type (a single primitive, or the
//! compound terminator) or a *container* type (an ordered sequence of
//! children). The two sets are disjoint and together cover [`TagType::ALL`].

use std::fmt;
use std::str::FromStr;

use crate::error::TypeError;

/// Tag types that carry a single primitive value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueType {
    Byte,
    ShortInt,
    Int,
    LongInt,
    Float,
    DoubleFloat,
    String,
    /// Terminator sentinel of a compound. Carries no value.
    CompoundEnd,
}

/// Tag types whose value is an ordered sequence of children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContainerType {
    ByteArray,
    IntArray,
    LongIntArray,
    List,
    Compound,
}

/// Any tag type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TagType {
    Value(ValueType),
    Container(ContainerType),
}

/// Largest magnitude accepted for Float tags: `f32::MAX` in its shortest
/// decimal form, so that a written maximum reads back.
pub const FLOAT_MAX: f64 = 3.402_823_5e38;

impl ValueType {
    pub const ALL: [ValueType; 8] = [
        ValueType::Byte,
        ValueType::ShortInt,
        ValueType::Int,
        ValueType::LongInt,
        ValueType::Float,
        ValueType::DoubleFloat,
        ValueType::String,
        ValueType::CompoundEnd,
    ];

    /// Returns `true` for the fixed-width integer types.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            ValueType::Byte | ValueType::ShortInt | ValueType::Int | ValueType::LongInt
        )
    }

    /// Returns `true` for the floating point types.
    pub fn is_float(self) -> bool {
        matches!(self, ValueType::Float | ValueType::DoubleFloat)
    }
}

impl ContainerType {
    pub const ALL: [ContainerType; 5] = [
        ContainerType::ByteArray,
        ContainerType::IntArray,
        ContainerType::LongIntArray,
        ContainerType::List,
        ContainerType::Compound,
    ];

    /// The value type implied for every element of this container.
    ///
    /// Typed arrays decode to a fixed primitive type. List and Compound return
    /// `None`: their children are self-describing tags.
    pub fn element_value_type(self) -> Option<ValueType> {
        match self {
            ContainerType::ByteArray => Some(ValueType::Byte),
            ContainerType::IntArray => Some(ValueType::Int),
            ContainerType::LongIntArray => Some(ValueType::LongInt),
            ContainerType::List | ContainerType::Compound => None,
        }
    }

    /// Returns `true` for the three typed primitive arrays.
    pub fn is_typed_array(self) -> bool {
        self.element_value_type().is_some()
    }
}

impl TagType {
    pub const ALL: [TagType; 13] = [
        TagType::Value(ValueType::Byte),
        TagType::Value(ValueType::ShortInt),
        TagType::Value(ValueType::Int),
        TagType::Value(ValueType::LongInt),
        TagType::Value(ValueType::Float),
        TagType::Value(ValueType::DoubleFloat),
        TagType::Value(ValueType::String),
        TagType::Value(ValueType::CompoundEnd),
        TagType::Container(ContainerType::ByteArray),
        TagType::Container(ContainerType::IntArray),
        TagType::Container(ContainerType::LongIntArray),
        TagType::Container(ContainerType::List),
        TagType::Container(ContainerType::Compound),
    ];

    pub const COMPOUND: TagType = TagType::Container(ContainerType::Compound);
    pub const LIST: TagType = TagType::Container(ContainerType::List);
    pub const END: TagType = TagType::Value(ValueType::CompoundEnd);

    pub fn is_container(self) -> bool {
        matches!(self, TagType::Container(_))
    }

    pub fn is_value(self) -> bool {
        matches!(self, TagType::Value(_))
    }

    /// Types a user may create as a new child. Everything but the sentinel.
    pub fn is_addable(self) -> bool {
        self != TagType::END
    }

    /// Name used in the JSON wire form.
    pub fn as_str(self) -> &'static str {
        match self {
            TagType::Value(v) => match v {
                ValueType::Byte => "byte",
                ValueType::ShortInt => "short",
                ValueType::Int => "int",
                ValueType::LongInt => "long",
                ValueType::Float => "float",
                ValueType::DoubleFloat => "double",
                ValueType::String => "string",
                ValueType::CompoundEnd => "end",
            },
            TagType::Container(c) => match c {
                ContainerType::ByteArray => "byteArray",
                ContainerType::IntArray => "intArray",
                ContainerType::LongIntArray => "longArray",
                ContainerType::List => "list",
                ContainerType::Compound => "compound",
            },
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            TagType::Value(v) => match v {
                ValueType::Byte => "Byte",
                ValueType::ShortInt => "Short",
                ValueType::Int => "Int",
                ValueType::LongInt => "Long",
                ValueType::Float => "Float",
                ValueType::DoubleFloat => "Double",
                ValueType::String => "String",
                ValueType::CompoundEnd => "End",
            },
            TagType::Container(c) => match c {
                ContainerType::ByteArray => "Byte[]",
                ContainerType::IntArray => "Int[]",
                ContainerType::LongIntArray => "Long[]",
                ContainerType::List => "List",
                ContainerType::Compound => "Compound",
            },
        }
    }
}

impl From<ValueType> for TagType {
    fn from(v: ValueType) -> Self {
        TagType::Value(v)
    }
}

impl From<ContainerType> for TagType {
    fn from(c: ContainerType) -> Self {
        TagType::Container(c)
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TagType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TagType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| TypeError::UnknownType(s.to_string()))
    }
}
