//! Numeric domains of the integer and floating point tag types.

use nbtree_types::{ValueType, FLOAT_MAX};

/// Returns `true` if `value` lies in the domain of the integer type `ty`.
///
/// Byte is the signed 8-bit range; Short, Int and Long are the signed 16, 32
/// and 64-bit ranges. Non-integer types always return `false`.
pub fn within_range(value: i128, ty: ValueType) -> bool {
    let (min, max) = match ty {
        ValueType::Byte => (i8::MIN as i128, i8::MAX as i128),
        ValueType::ShortInt => (i16::MIN as i128, i16::MAX as i128),
        ValueType::Int => (i32::MIN as i128, i32::MAX as i128),
        ValueType::LongInt => (i64::MIN as i128, i64::MAX as i128),
        _ => return false,
    };
    (min..=max).contains(&value)
}

/// Returns `true` if `value` lies in the domain of the floating point type
/// `ty`. NaN is never in range.
pub fn float_within_range(value: f64, ty: ValueType) -> bool {
    if value.is_nan() {
        return false;
    }
    match ty {
        ValueType::Float => (-FLOAT_MAX..=FLOAT_MAX).contains(&value),
        ValueType::DoubleFloat => (-f64::MAX..=f64::MAX).contains(&value),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_bounds() {
        assert!(within_range(2_147_483_647, ValueType::Int));
        assert!(!within_range(2_147_483_648, ValueType::Int));
        assert!(within_range(-2_147_483_648, ValueType::Int));
        assert!(!within_range(-2_147_483_649, ValueType::Int));
    }

    #[test]
    fn short_bounds() {
        assert!(within_range(32_767, ValueType::ShortInt));
        assert!(!within_range(32_768, ValueType::ShortInt));
        assert!(within_range(-32_768, ValueType::ShortInt));
    }

    #[test]
    fn long_bounds_are_exact() {
        assert!(within_range(i64::MAX as i128, ValueType::LongInt));
        assert!(!within_range(i64::MAX as i128 + 1, ValueType::LongInt));
        assert!(within_range(i64::MIN as i128, ValueType::LongInt));
        assert!(!within_range(i64::MIN as i128 - 1, ValueType::LongInt));
    }

    #[test]
    fn non_integer_types_reject() {
        assert!(!within_range(0, ValueType::String));
        assert!(!within_range(0, ValueType::Float));
    }

    #[test]
    fn float_bounds() {
        assert!(float_within_range(3.402_823_5e38, ValueType::Float));
        assert!(!float_within_range(3.5e38, ValueType::Float));
        assert!(float_within_range(3.5e38, ValueType::DoubleFloat));
        assert!(!float_within_range(f64::INFINITY, ValueType::DoubleFloat));
        assert!(!float_within_range(f64::NAN, ValueType::Float));
    }
}
