//! JSON wire form of a tag tree.
//!
//! Each node is `{"name": ..., "type": ..., "value": ...}`. Typed arrays carry
//! plain numbers, lists and compounds carry nested nodes, and the compound
//! terminator carries no value. Long values travel as exact JSON integers.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::error::{TypeError, TypeResult};
use crate::kind::{ContainerType, TagType, ValueType, FLOAT_MAX};
use crate::tag::{Tag, TagValue};

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct WireTag {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    tag_type: String,
    #[serde(default)]
    value: Value,
}

/// Parse a tree from its JSON wire form.
pub fn from_json(s: &str) -> TypeResult<Tag> {
    serde_json::from_str(s).map_err(|e| TypeError::Serialization(e.to_string()))
}

/// Render a tree in its JSON wire form.
///
/// Fails on a Float or Double that is not finite, which has no JSON number.
pub fn to_json(tag: &Tag, pretty: bool) -> TypeResult<String> {
    let value = encode_tag(tag)?;
    let out = if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    };
    out.map_err(|e| TypeError::Serialization(e.to_string()))
}

impl TryFrom<WireTag> for Tag {
    type Error = TypeError;

    fn try_from(wire: WireTag) -> Result<Self, Self::Error> {
        let tag_type = match wire.tag_type.parse::<TagType>() {
            Ok(t) => t,
            Err(_) => {
                return Ok(Tag::new(
                    wire.name,
                    TagValue::Unknown {
                        type_name: wire.tag_type,
                        raw: wire.value,
                    },
                ))
            }
        };
        let value = decode_value(tag_type, wire.value)?;
        Ok(Tag::new(wire.name, value))
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        encode_tag(self)
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

fn decode_value(tag_type: TagType, value: Value) -> TypeResult<TagValue> {
    let out = match tag_type {
        TagType::Value(v) => match v {
            ValueType::Byte => TagValue::Byte(decode_byte(&value)?),
            ValueType::ShortInt => TagValue::ShortInt(decode_int(tag_type, &value)?),
            ValueType::Int => TagValue::Int(decode_int(tag_type, &value)?),
            ValueType::LongInt => TagValue::LongInt(decode_int(tag_type, &value)?),
            ValueType::Float => TagValue::Float(decode_float(&value)?),
            ValueType::DoubleFloat => TagValue::DoubleFloat(decode_double(tag_type, &value)?),
            ValueType::String => match value {
                Value::String(s) => TagValue::String(s),
                other => return Err(TypeError::invalid("string", format!("expected string, got {other}"))),
            },
            ValueType::CompoundEnd => {
                if !value.is_null() {
                    return Err(TypeError::invalid("end", "terminator carries no value"));
                }
                TagValue::CompoundEnd
            }
        },
        TagType::Container(c) => {
            let items = match value {
                Value::Array(items) => items,
                Value::Null => Vec::new(),
                other => {
                    return Err(TypeError::invalid(
                        tag_type.as_str(),
                        format!("expected array, got {other}"),
                    ))
                }
            };
            match c {
                ContainerType::ByteArray => TagValue::ByteArray(
                    items.iter().map(decode_byte).collect::<TypeResult<_>>()?,
                ),
                ContainerType::IntArray => TagValue::IntArray(
                    items
                        .iter()
                        .map(|v| decode_int(ValueType::Int.into(), v))
                        .collect::<TypeResult<_>>()?,
                ),
                ContainerType::LongIntArray => TagValue::LongIntArray(
                    items
                        .iter()
                        .map(|v| decode_int(ValueType::LongInt.into(), v))
                        .collect::<TypeResult<_>>()?,
                ),
                ContainerType::List => TagValue::List(decode_children(items)?),
                ContainerType::Compound => TagValue::Compound(decode_children(items)?),
            }
        }
    };
    Ok(out)
}

fn decode_children(items: Vec<Value>) -> TypeResult<Vec<Tag>> {
    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(|e| TypeError::Serialization(e.to_string())))
        .collect()
}

fn as_i64(tag_type: TagType, value: &Value) -> TypeResult<i64> {
    match value {
        Value::Number(n) => n.as_i64().ok_or_else(|| TypeError::OutOfRange {
            tag_type: tag_type.as_str().into(),
            value: n.to_string(),
        }),
        other => Err(TypeError::invalid(
            tag_type.as_str(),
            format!("expected integer, got {other}"),
        )),
    }
}

fn decode_int<T: TryFrom<i64>>(tag_type: TagType, value: &Value) -> TypeResult<T> {
    let n = as_i64(tag_type, value)?;
    T::try_from(n).map_err(|_| TypeError::OutOfRange {
        tag_type: tag_type.as_str().into(),
        value: n.to_string(),
    })
}

/// Bytes arrive either signed (`-128..=127`) or as an unsigned byte
/// (`128..=255`); both are stored as the same two's-complement `i8`.
fn decode_byte(value: &Value) -> TypeResult<i8> {
    let tag_type = TagType::Value(ValueType::Byte);
    let n = as_i64(tag_type, value)?;
    match n {
        -128..=127 => Ok(n as i8),
        128..=255 => Ok(n as u8 as i8),
        _ => Err(TypeError::OutOfRange {
            tag_type: tag_type.as_str().into(),
            value: n.to_string(),
        }),
    }
}

fn decode_double(tag_type: TagType, value: &Value) -> TypeResult<f64> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| {
            TypeError::invalid(tag_type.as_str(), format!("{n} is not representable"))
        }),
        other => Err(TypeError::invalid(
            tag_type.as_str(),
            format!("expected number, got {other}"),
        )),
    }
}

fn decode_float(value: &Value) -> TypeResult<f32> {
    let tag_type = TagType::Value(ValueType::Float);
    let n = decode_double(tag_type, value)?;
    if n.abs() > FLOAT_MAX {
        return Err(TypeError::OutOfRange {
            tag_type: tag_type.as_str().into(),
            value: n.to_string(),
        });
    }
    Ok(n as f32)
}

/// `{"name", "type", "value"}`, with `value` left out when it is null.
fn encode_tag(tag: &Tag) -> TypeResult<Value> {
    let mut node = Map::new();
    node.insert("name".into(), Value::String(tag.name.clone()));
    node.insert("type".into(), Value::String(tag.value.type_name().to_string()));
    let value = encode_value(&tag.value)?;
    if !value.is_null() {
        node.insert("value".into(), value);
    }
    Ok(Value::Object(node))
}

fn encode_value(value: &TagValue) -> TypeResult<Value> {
    let out = match value {
        TagValue::Byte(v) => Value::from(*v),
        TagValue::ShortInt(v) => Value::from(*v),
        TagValue::Int(v) => Value::from(*v),
        TagValue::LongInt(v) => Value::from(*v),
        TagValue::Float(v) => encode_float(*v)?,
        TagValue::DoubleFloat(v) => encode_number(ValueType::DoubleFloat, *v)?,
        TagValue::String(s) => Value::String(s.clone()),
        TagValue::CompoundEnd => Value::Null,
        TagValue::ByteArray(v) => Value::from(v.clone()),
        TagValue::IntArray(v) => Value::from(v.clone()),
        TagValue::LongIntArray(v) => Value::from(v.clone()),
        TagValue::List(items) | TagValue::Compound(items) => Value::Array(
            items.iter().map(encode_tag).collect::<TypeResult<_>>()?,
        ),
        TagValue::Unknown { raw, .. } => raw.clone(),
    };
    Ok(out)
}

/// Widen through the shortest decimal form so `0.1f32` is written as `0.1`
/// rather than `0.10000000149011612`.
fn encode_float(v: f32) -> TypeResult<Value> {
    let widened = v.to_string().parse::<f64>().unwrap_or(f64::from(v));
    encode_number(ValueType::Float, widened)
}

fn encode_number(ty: ValueType, v: f64) -> TypeResult<Value> {
    Number::from_f64(v)
        .map(Value::Number)
        .ok_or_else(|| TypeError::invalid(TagType::Value(ty).as_str(), format!("{v} has no JSON form")))
}
