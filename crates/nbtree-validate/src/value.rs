//! Textual round trip of tag values.
//!
//! [`parse_value`] is the accept/reject gate for a user-entered value and
//! [`format_value`] the display form it is edited from. Parsing is pure: a
//! rejected input leaves whatever tag it was meant for untouched.

use nbtree_types::{ContainerType, Element, TagType, TagValue, ValueType};

use crate::error::{ValidationError, ValidationResult};
use crate::range::{float_within_range, within_range};

/// Parse `input` as a value of type `ty`.
///
/// - Byte: hexadecimal digits, either case, value at most `FF`. Stored as the
///   two's-complement `i8` of that byte.
/// - Short / Int / Long: optionally signed decimal integer within the type's
///   signed range.
/// - Float / Double: `[+-]?\d+(\.\d+)?([eE][+-]?\d+)?`, finite in the
///   type's precision. `1e39` is out of range for Float, `1e400` for Double.
/// - String: anything.
pub fn parse_value(ty: ValueType, input: &str) -> ValidationResult<TagValue> {
    let value = match ty {
        ValueType::Byte => TagValue::Byte(parse_hex_byte(input)?),
        ValueType::ShortInt => TagValue::ShortInt(parse_integer(ty, input)? as i16),
        ValueType::Int => TagValue::Int(parse_integer(ty, input)? as i32),
        ValueType::LongInt => TagValue::LongInt(parse_integer(ty, input)? as i64),
        ValueType::Float => TagValue::Float(parse_bounded_decimal(ty, input)? as f32),
        ValueType::DoubleFloat => TagValue::DoubleFloat(parse_bounded_decimal(ty, input)?),
        ValueType::String => TagValue::String(input.to_string()),
        ValueType::CompoundEnd => {
            return Err(ValidationError::NotAssignable {
                type_label: label(ty),
            })
        }
    };
    Ok(value)
}

/// Parse `input` as one element of the typed array `container`.
///
/// Array elements are edited as decimal integers, Byte arrays included, and
/// must fit the element type's signed range.
pub fn parse_element(container: ContainerType, input: &str) -> ValidationResult<Element> {
    let not_assignable = || ValidationError::NotAssignable {
        type_label: TagType::Container(container).label(),
    };
    let ty = container.element_value_type().ok_or_else(not_assignable)?;
    let n = parse_integer(ty, input)?;
    let element = match container {
        ContainerType::ByteArray => Element::Byte(n as i8),
        ContainerType::IntArray => Element::Int(n as i32),
        ContainerType::LongIntArray => Element::LongInt(n as i64),
        ContainerType::List | ContainerType::Compound => return Err(not_assignable()),
    };
    Ok(element)
}

/// Display form of a leaf value. `None` for the terminator, containers and
/// unknown tags, which have no single textual value.
pub fn format_value(value: &TagValue) -> Option<String> {
    let text = match value {
        TagValue::Byte(v) => format!("{:X}", *v as u8),
        TagValue::ShortInt(v) => v.to_string(),
        TagValue::Int(v) => v.to_string(),
        TagValue::LongInt(v) => v.to_string(),
        TagValue::Float(v) => v.to_string(),
        TagValue::DoubleFloat(v) => v.to_string(),
        TagValue::String(s) => s.clone(),
        _ => return None,
    };
    Some(text)
}

/// Display forms of the elements of a typed array, in order.
pub fn format_elements(value: &TagValue) -> Option<Vec<String>> {
    let out = match value {
        TagValue::ByteArray(v) => v.iter().map(i8::to_string).collect(),
        TagValue::IntArray(v) => v.iter().map(i32::to_string).collect(),
        TagValue::LongIntArray(v) => v.iter().map(i64::to_string).collect(),
        _ => return None,
    };
    Some(out)
}

fn label(ty: ValueType) -> &'static str {
    TagType::Value(ty).label()
}

fn syntax(ty: ValueType, input: &str, reason: &'static str) -> ValidationError {
    ValidationError::Syntax {
        type_label: label(ty),
        input: input.to_string(),
        reason,
    }
}

fn out_of_range(ty: ValueType, input: &str) -> ValidationError {
    ValidationError::OutOfRange {
        type_label: label(ty),
        input: input.to_string(),
    }
}

fn parse_hex_byte(input: &str) -> ValidationResult<i8> {
    let ty = ValueType::Byte;
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(syntax(ty, input, "expected hexadecimal digits"));
    }
    match u8::from_str_radix(input, 16) {
        Ok(b) => Ok(b as i8),
        Err(_) => Err(out_of_range(ty, input)),
    }
}

/// Strict `[+-]?\d+` followed by a range check against `ty`.
fn parse_integer(ty: ValueType, input: &str) -> ValidationResult<i128> {
    let digits = input.strip_prefix(&['+', '-'][..]).unwrap_or(input);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(syntax(ty, input, "expected a decimal integer"));
    }
    // More digits than fit in i128 are out of range for every type.
    let n = input
        .parse::<i128>()
        .map_err(|_| out_of_range(ty, input))?;
    if !within_range(n, ty) {
        return Err(out_of_range(ty, input));
    }
    Ok(n)
}

fn parse_bounded_decimal(ty: ValueType, input: &str) -> ValidationResult<f64> {
    let v = parse_decimal(ty, input)?;
    if !float_within_range(v, ty) {
        return Err(out_of_range(ty, input));
    }
    Ok(v)
}

fn parse_decimal(ty: ValueType, input: &str) -> ValidationResult<f64> {
    if !is_decimal_literal(input) {
        return Err(syntax(ty, input, "expected a decimal number"));
    }
    input
        .parse::<f64>()
        .map_err(|_| syntax(ty, input, "expected a decimal number"))
}

/// Matches `[+-]?\d+(\.\d+)?([eE][+-]?\d+)?` exactly.
fn is_decimal_literal(input: &str) -> bool {
    fn digits(s: &[u8]) -> usize {
        s.iter().take_while(|b| b.is_ascii_digit()).count()
    }

    let s = input.as_bytes();
    let mut i = 0;
    if matches!(s.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_len = digits(&s[i..]);
    if int_len == 0 {
        return false;
    }
    i += int_len;
    if s.get(i) == Some(&b'.') {
        let frac_len = digits(&s[i + 1..]);
        if frac_len == 0 {
            return false;
        }
        i += 1 + frac_len;
    }
    if matches!(s.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(s.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_len = digits(&s[i..]);
        if exp_len == 0 {
            return false;
        }
        i += exp_len;
    }
    i == s.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_hex_round_trip() {
        let v = parse_value(ValueType::Byte, "1f").unwrap();
        assert_eq!(v, TagValue::Byte(31));
        assert_eq!(format_value(&v).unwrap(), "1F");
    }

    #[test]
    fn byte_rejects_non_hex() {
        assert!(matches!(
            parse_value(ValueType::Byte, "zz"),
            Err(ValidationError::Syntax { .. })
        ));
        assert!(parse_value(ValueType::Byte, "").is_err());
        assert!(parse_value(ValueType::Byte, "-1").is_err());
    }

    #[test]
    fn byte_high_values_wrap_to_signed() {
        let v = parse_value(ValueType::Byte, "FF").unwrap();
        assert_eq!(v, TagValue::Byte(-1));
        assert_eq!(format_value(&v).unwrap(), "FF");
        assert_eq!(parse_value(ValueType::Byte, "0007").unwrap(), TagValue::Byte(7));
    }

    #[test]
    fn byte_beyond_one_byte_is_out_of_range() {
        assert!(matches!(
            parse_value(ValueType::Byte, "100"),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn int_range_is_enforced() {
        assert_eq!(
            parse_value(ValueType::Int, "2147483647").unwrap(),
            TagValue::Int(i32::MAX)
        );
        assert!(matches!(
            parse_value(ValueType::Int, "2147483648"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert_eq!(parse_value(ValueType::Int, "+5").unwrap(), TagValue::Int(5));
    }

    #[test]
    fn short_range_is_enforced() {
        assert_eq!(
            parse_value(ValueType::ShortInt, "-32768").unwrap(),
            TagValue::ShortInt(i16::MIN)
        );
        assert!(parse_value(ValueType::ShortInt, "32768").is_err());
    }

    #[test]
    fn long_keeps_full_precision() {
        assert_eq!(
            parse_value(ValueType::LongInt, "9223372036854775807").unwrap(),
            TagValue::LongInt(i64::MAX)
        );
        assert_eq!(
            parse_value(ValueType::LongInt, "9007199254740993").unwrap(),
            TagValue::LongInt(9_007_199_254_740_993)
        );
        assert!(parse_value(ValueType::LongInt, "9223372036854775808").is_err());
        assert!(parse_value(ValueType::LongInt, &"9".repeat(60)).is_err());
    }

    #[test]
    fn integers_reject_decimals_and_spaces() {
        assert!(parse_value(ValueType::Int, "1.0").is_err());
        assert!(parse_value(ValueType::Int, " 1").is_err());
        assert!(parse_value(ValueType::Int, "-").is_err());
        assert!(parse_value(ValueType::Int, "1e3").is_err());
    }

    #[test]
    fn decimal_literal_grammar() {
        for ok in ["0", "-1", "+2.5", "3.25e10", "1E-3", "7e+2"] {
            assert!(is_decimal_literal(ok), "{ok} should match");
        }
        for bad in ["", ".5", "5.", "1e", "1.2.3", "NaN", "inf", "--1", "1 "] {
            assert!(!is_decimal_literal(bad), "{bad} should not match");
        }
    }

    #[test]
    fn float_range_is_single_precision() {
        assert!(parse_value(ValueType::Float, "3.4e38").is_ok());
        assert!(matches!(
            parse_value(ValueType::Float, "3.5e38"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert_eq!(
            parse_value(ValueType::DoubleFloat, "3.5e38").unwrap(),
            TagValue::DoubleFloat(3.5e38)
        );
    }

    #[test]
    fn double_overflow_is_out_of_range() {
        for input in ["1e400", "-1e309"] {
            assert!(matches!(
                parse_value(ValueType::DoubleFloat, input),
                Err(ValidationError::OutOfRange { .. })
            ));
        }
        assert!(parse_value(ValueType::DoubleFloat, "1.7976931348623157e308").is_ok());
    }

    #[test]
    fn string_accepts_anything() {
        assert_eq!(
            parse_value(ValueType::String, "").unwrap(),
            TagValue::String(String::new())
        );
        assert_eq!(
            parse_value(ValueType::String, "zz 12").unwrap(),
            TagValue::String("zz 12".into())
        );
    }

    #[test]
    fn sentinel_is_not_assignable() {
        assert!(matches!(
            parse_value(ValueType::CompoundEnd, ""),
            Err(ValidationError::NotAssignable { .. })
        ));
    }

    #[test]
    fn array_elements_use_element_domain() {
        assert_eq!(
            parse_element(ContainerType::ByteArray, "-128").unwrap(),
            Element::Byte(-128)
        );
        assert!(parse_element(ContainerType::ByteArray, "128").is_err());
        assert_eq!(
            parse_element(ContainerType::LongIntArray, "-9223372036854775808").unwrap(),
            Element::LongInt(i64::MIN)
        );
        assert!(parse_element(ContainerType::List, "1").is_err());
    }

    #[test]
    fn format_elements_of_typed_arrays() {
        assert_eq!(
            format_elements(&TagValue::ByteArray(vec![-1, 16])).unwrap(),
            vec!["-1", "16"]
        );
        assert!(format_elements(&TagValue::List(vec![])).is_none());
    }

    #[test]
    fn format_value_of_non_leaves_is_none() {
        assert!(format_value(&TagValue::CompoundEnd).is_none());
        assert!(format_value(&TagValue::IntArray(vec![1])).is_none());
    }
}
