use crate::runner::ds::operations::type_conversion::from_primitive;
use crate::runner::ds::structure::Structure;
use crate::runner::ds::value::Value;

/// Identity: both references point at the same instance.
pub fn same_structure(a: &dyn Structure, b: &dyn Structure) -> bool {
    a.as_any() as *const _ as *const u8 == b.as_any() as *const _ as *const u8
}

/// Compare a structure with any runtime value, wrapping native primitives first.
pub fn structure_equals_value(this: &dyn Structure, other: &Value) -> bool {
    match from_primitive(other.clone()) {
        Value::Structure(s) => this.equals(s.as_ref()),
        _ => false,
    }
}

/// Equality between two runtime values as seen by script `==`.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (from_primitive(a.clone()), from_primitive(b.clone())) {
        (Value::Null, Value::Null) => true,
        (Value::Structure(a), Value::Structure(b)) => a.equals(b.as_ref()),
        (a, b) => a == b,
    }
}
