//! Conversion between native primitives and their structure wrappers.
//!
//! | native kind                | wrapper                         |
//! |----------------------------|---------------------------------|
//! | `bool`                     | [`BooleanValue`]                |
//! | `f32`, `f64`               | [`ScalarValue`] (double)        |
//! | `i8`..`i64`, `u8`..`u64`   | [`ScalarValue`] (32-bit int)    |
//! | text                       | [`StringValue`]                 |
//!
//! Anything else, including values that are already structures and `Null`,
//! passes through unchanged.

use std::convert::TryFrom;

use crate::runner::ds::error::ScriptErrorType;
use crate::runner::ds::value::{Primitive, StructureRef, Value};
use crate::runner::std_lib::boolean::BooleanValue;
use crate::runner::std_lib::scalar::{ScalarNumber, ScalarValue};
use crate::runner::std_lib::string::StringValue;

pub fn from_primitive(value: Value) -> Value {
    let primitive = match value {
        Value::Primitive(p) => p,
        other => return other,
    };
    match primitive {
        Primitive::Boolean(b) => BooleanValue::new(b).into_value(),
        Primitive::Float(n) => ScalarValue::double(n as f64).into_value(),
        Primitive::Double(n) => ScalarValue::double(n).into_value(),
        Primitive::Int8(n) => ScalarValue::int(n as i32).into_value(),
        Primitive::Int16(n) => ScalarValue::int(n as i32).into_value(),
        Primitive::Int32(n) => ScalarValue::int(n).into_value(),
        Primitive::UInt8(n) => ScalarValue::int(n as i32).into_value(),
        Primitive::UInt16(n) => ScalarValue::int(n as i32).into_value(),
        Primitive::Int64(n) => integral_scalar(i32::try_from(n).ok(), n as f64),
        Primitive::UInt32(n) => integral_scalar(i32::try_from(n).ok(), n as f64),
        Primitive::UInt64(n) => integral_scalar(i32::try_from(n).ok(), n as f64),
        Primitive::Text(s) => StringValue::new(s).into_value(),
        other @ Primitive::Char(_) => Value::Primitive(other),
    }
}

/// Integers outside the 32-bit range keep their magnitude as a double.
fn integral_scalar(narrowed: Option<i32>, wide: f64) -> Value {
    match narrowed {
        Some(n) => ScalarValue::int(n).into_value(),
        None => ScalarValue::double(wide).into_value(),
    }
}

/// Like [`from_primitive`], for callers that have already guaranteed convertibility.
/// A non-structure result is a defect, not a scripting error.
pub fn from_primitive_with_assert(value: Value) -> Result<StructureRef, ScriptErrorType> {
    let type_name = value.type_name();
    match from_primitive(value) {
        Value::Structure(s) => Ok(s),
        _ => Err(ScriptErrorType::Internal(format!(
            "value of type {} did not convert to a Structure",
            type_name
        ))),
    }
}

/// Unwrap scalar, boolean and string wrappers. Scalars come back as `Int32` or
/// `Double` whatever width they were built from; [`Primitive`] equality is by
/// numeric value, so round trips still compare equal.
pub fn to_primitive(value: Value) -> Value {
    if let Value::Structure(structure) = &value {
        let any = structure.as_any();
        if let Some(scalar) = any.downcast_ref::<ScalarValue>() {
            return match scalar.number() {
                ScalarNumber::Int(n) => Value::Primitive(Primitive::Int32(n)),
                ScalarNumber::Double(n) => Value::Primitive(Primitive::Double(n)),
            };
        }
        if let Some(boolean) = any.downcast_ref::<BooleanValue>() {
            return Value::Primitive(Primitive::Boolean(boolean.value()));
        }
        if let Some(string) = any.downcast_ref::<StringValue>() {
            return Value::Primitive(Primitive::Text(string.as_str().to_string()));
        }
    }
    value
}

/// Numeric view of a wrapped or native number.
pub fn to_number(value: &Value) -> Option<ScalarNumber> {
    match to_primitive(from_primitive(value.clone())) {
        Value::Primitive(Primitive::Int32(n)) => Some(ScalarNumber::Int(n)),
        Value::Primitive(Primitive::Double(n)) => Some(ScalarNumber::Double(n)),
        _ => None,
    }
}

/// Text view of a wrapped or native string.
pub fn to_text(value: &Value) -> Option<String> {
    match to_primitive(value.clone()) {
        Value::Primitive(Primitive::Text(s)) => Some(s),
        _ => None,
    }
}

pub fn to_boolean(value: &Value) -> Option<bool> {
    match to_primitive(value.clone()) {
        Value::Primitive(Primitive::Boolean(b)) => Some(b),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_large_integers_become_double_scalars() {
        let v = from_primitive(Value::Primitive(Primitive::Int64(1 << 40)));
        assert_eq!(
            to_primitive(v),
            Value::Primitive(Primitive::Double((1u64 << 40) as f64))
        );
    }

    #[test]
    fn test_small_integers_become_int_scalars() {
        let v = from_primitive(Value::Primitive(Primitive::UInt8(7)));
        assert_eq!(to_primitive(v), Value::Primitive(Primitive::Int32(7)));
    }

    #[test]
    fn test_float_widens_to_double() {
        let v = from_primitive(Value::Primitive(Primitive::Float(0.5)));
        assert_eq!(to_primitive(v), Value::Primitive(Primitive::Double(0.5)));
    }

    #[test]
    fn test_char_passes_through() {
        let v = from_primitive(Value::Primitive(Primitive::Char('k')));
        assert_eq!(v, Value::Primitive(Primitive::Char('k')));
    }

    #[test]
    fn test_assert_rejects_unconvertible() {
        match from_primitive_with_assert(Value::Primitive(Primitive::Char('k'))) {
            Err(ScriptErrorType::Internal(msg)) => assert!(msg.contains("char")),
            other => panic!("unexpected result: {:?}", other.map(|s| s.kind())),
        }
        assert!(from_primitive_with_assert(Value::Null).is_err());
    }

    #[test]
    fn test_to_number_accepts_native_and_wrapped() {
        assert_eq!(to_number(&Value::from(4)), Some(ScalarNumber::Int(4)));
        assert_eq!(
            to_number(&ScalarValue::double(1.5).into_value()),
            Some(ScalarNumber::Double(1.5))
        );
        assert_eq!(to_number(&Value::from("4")), None);
    }
}
