//! Scalar built-in.
//!
//! The single numeric wrapper of the language, holding either a 32-bit integer
//! or a double. Adds arithmetic and ordering operators on top of the base set.

use std::any::{Any, TypeId};
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::{Display, Formatter};

use crate::runner::ds::error::ScriptErrorType;
use crate::runner::ds::operations::operator::Operator;
use crate::runner::ds::operations::type_conversion::to_number;
use crate::runner::ds::structure::{
    apply_base_operator, unsupported_operator, wrap, Serializable, Structure, StructureBase,
};
use crate::runner::ds::value::{Primitive, Value};
use crate::runner::std_lib::boolean::BooleanValue;
use crate::runner::suffix::registry::SuffixRegistry;
use crate::runner::suffix::table::SuffixTable;

pub const TYPE_STR_SCALAR: &str = "Scalar";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarNumber {
    Int(i32),
    Double(f64),
}
impl ScalarNumber {
    pub fn as_f64(&self) -> f64 {
        match self {
            ScalarNumber::Int(n) => *n as f64,
            ScalarNumber::Double(n) => *n,
        }
    }
}
impl Display for ScalarNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScalarNumber::Int(n) => write!(f, "{}", n),
            ScalarNumber::Double(n) => write!(f, "{}", n),
        }
    }
}

pub struct ScalarValue {
    base: StructureBase,
    number: ScalarNumber,
}

/// Scalars expose only the universal suffixes; the table exists so type
/// suffixes added later by the host land somewhere.
fn register_type_suffixes(_table: &mut SuffixTable) {}

/// Install the Scalar type suffixes into `registry`, once.
pub fn register(registry: &SuffixRegistry) {
    registry.ensure_type_registered(
        TypeId::of::<ScalarValue>(),
        TYPE_STR_SCALAR,
        register_type_suffixes,
    );
}

impl ScalarValue {
    pub fn new(number: ScalarNumber) -> Self {
        register(SuffixRegistry::global());
        ScalarValue {
            base: StructureBase::new(),
            number,
        }
    }

    pub fn int(n: i32) -> Self {
        Self::new(ScalarNumber::Int(n))
    }

    pub fn double(n: f64) -> Self {
        Self::new(ScalarNumber::Double(n))
    }

    pub fn number(&self) -> ScalarNumber {
        self.number
    }

    pub fn into_value(self) -> Value {
        wrap(self)
    }
}

fn arithmetic(op: Operator, left: ScalarNumber, right: ScalarNumber) -> Option<ScalarNumber> {
    if let (ScalarNumber::Int(l), ScalarNumber::Int(r)) = (left, right) {
        let exact = match op {
            Operator::Add => l.checked_add(r),
            Operator::Subtract => l.checked_sub(r),
            Operator::Multiply => l.checked_mul(r),
            Operator::Divide if l.checked_rem(r) == Some(0) => l.checked_div(r),
            _ => None,
        };
        if let Some(n) = exact {
            return Some(ScalarNumber::Int(n));
        }
    }
    let (l, r) = (left.as_f64(), right.as_f64());
    let n = match op {
        Operator::Add => l + r,
        Operator::Subtract => l - r,
        Operator::Multiply => l * r,
        Operator::Divide => l / r,
        Operator::Power => l.powf(r),
        _ => return None,
    };
    Some(ScalarNumber::Double(n))
}

fn compare(op: Operator, left: ScalarNumber, right: ScalarNumber) -> Option<bool> {
    let (l, r) = (left.as_f64(), right.as_f64());
    match op {
        Operator::LessThan => Some(l < r),
        Operator::GreaterThan => Some(l > r),
        Operator::LessOrEqual => Some(l <= r),
        Operator::GreaterOrEqual => Some(l >= r),
        _ => None,
    }
}

impl Structure for ScalarValue {
    fn structure_base(&self) -> &StructureBase {
        &self.base
    }

    fn as_structure(&self) -> &dyn Structure {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> &'static str {
        TYPE_STR_SCALAR
    }

    fn to_display_string(&self) -> String {
        self.number.to_string()
    }

    fn equals(&self, other: &dyn Structure) -> bool {
        match other.as_any().downcast_ref::<ScalarValue>() {
            Some(o) => self.number.as_f64() == o.number.as_f64(),
            None => false,
        }
    }

    fn as_serializable(&self) -> Option<&dyn Serializable> {
        Some(self)
    }

    fn apply_operator(
        &self,
        op: Operator,
        other: &Value,
        reversed: bool,
    ) -> Result<Value, ScriptErrorType> {
        let other_number = match to_number(other) {
            Some(n) => n,
            // Non-numeric right-hand sides only get the base operators, e.g. 1 + "a".
            None => return apply_base_operator(self, op, other, reversed),
        };
        let (left, right) = if reversed {
            (other_number, self.number)
        } else {
            (self.number, other_number)
        };
        match op {
            Operator::Equal | Operator::NotEqual => apply_base_operator(self, op, other, reversed),
            Operator::Add
            | Operator::Subtract
            | Operator::Multiply
            | Operator::Divide
            | Operator::Power => match arithmetic(op, left, right) {
                Some(n) => Ok(ScalarValue::new(n).into_value()),
                None => Err(unsupported_operator(self, op, other, reversed)),
            },
            _ => match compare(op, left, right) {
                Some(b) => Ok(BooleanValue::new(b).into_value()),
                None => Err(unsupported_operator(self, op, other, reversed)),
            },
        }
    }
}

impl Serializable for ScalarValue {
    fn dump(&self) -> BTreeMap<String, Value> {
        let value = match self.number {
            ScalarNumber::Int(n) => Primitive::Int32(n),
            ScalarNumber::Double(n) => Primitive::Double(n),
        };
        let mut dump = BTreeMap::new();
        dump.insert("value".to_string(), Value::Primitive(value));
        dump
    }
}
