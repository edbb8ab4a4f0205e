use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use crate::runner::ds::structure::Structure;

pub type StructureRef = Rc<dyn Structure>;

/// A native, unwrapped host value.
///
/// Numeric variants compare by value, so `Int64(5) == Int32(5)` and
/// `Float(0.5) == Double(0.5)`.
#[derive(Debug, Clone)]
pub enum Primitive {
    Boolean(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float(f32),
    Double(f64),
    Char(char),
    Text(String),
}

/// The closed set of categories the conversion boundary understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Boolean,
    Integral,
    Floating,
    Text,
    /// Anything the boundary passes through unchanged.
    Other,
}

impl Primitive {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::Boolean(_) => PrimitiveKind::Boolean,
            Primitive::Int8(_)
            | Primitive::Int16(_)
            | Primitive::Int32(_)
            | Primitive::Int64(_)
            | Primitive::UInt8(_)
            | Primitive::UInt16(_)
            | Primitive::UInt32(_)
            | Primitive::UInt64(_) => PrimitiveKind::Integral,
            Primitive::Float(_) | Primitive::Double(_) => PrimitiveKind::Floating,
            Primitive::Text(_) => PrimitiveKind::Text,
            Primitive::Char(_) => PrimitiveKind::Other,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Primitive::Boolean(_) => "bool",
            Primitive::Int8(_) => "i8",
            Primitive::Int16(_) => "i16",
            Primitive::Int32(_) => "i32",
            Primitive::Int64(_) => "i64",
            Primitive::UInt8(_) => "u8",
            Primitive::UInt16(_) => "u16",
            Primitive::UInt32(_) => "u32",
            Primitive::UInt64(_) => "u64",
            Primitive::Float(_) => "f32",
            Primitive::Double(_) => "f64",
            Primitive::Char(_) => "char",
            Primitive::Text(_) => "string",
        }
    }
}
impl Primitive {
    fn as_i128(&self) -> Option<i128> {
        Some(match *self {
            Primitive::Int8(n) => n as i128,
            Primitive::Int16(n) => n as i128,
            Primitive::Int32(n) => n as i128,
            Primitive::Int64(n) => n as i128,
            Primitive::UInt8(n) => n as i128,
            Primitive::UInt16(n) => n as i128,
            Primitive::UInt32(n) => n as i128,
            Primitive::UInt64(n) => n as i128,
            _ => return None,
        })
    }

    fn as_f64(&self) -> Option<f64> {
        match *self {
            Primitive::Float(n) => Some(n as f64),
            Primitive::Double(n) => Some(n),
            _ => self.as_i128().map(|n| n as f64),
        }
    }
}
impl PartialEq for Primitive {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (self.as_i128(), other.as_i128()) {
            return a == b;
        }
        if let (Some(a), Some(b)) = (self.as_f64(), other.as_f64()) {
            return a == b;
        }
        match (self, other) {
            (Primitive::Boolean(a), Primitive::Boolean(b)) => a == b,
            (Primitive::Char(a), Primitive::Char(b)) => a == b,
            (Primitive::Text(a), Primitive::Text(b)) => a == b,
            _ => false,
        }
    }
}
impl Display for Primitive {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Boolean(b) => write!(f, "{}", b),
            Primitive::Int8(n) => write!(f, "{}", n),
            Primitive::Int16(n) => write!(f, "{}", n),
            Primitive::Int32(n) => write!(f, "{}", n),
            Primitive::Int64(n) => write!(f, "{}", n),
            Primitive::UInt8(n) => write!(f, "{}", n),
            Primitive::UInt16(n) => write!(f, "{}", n),
            Primitive::UInt32(n) => write!(f, "{}", n),
            Primitive::UInt64(n) => write!(f, "{}", n),
            Primitive::Float(n) => write!(f, "{}", n),
            Primitive::Double(n) => write!(f, "{}", n),
            Primitive::Char(c) => write!(f, "{}", c),
            Primitive::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Anything that crosses the boundary between the runtime and host code.
pub enum Value {
    Null,
    Primitive(Primitive),
    Structure(StructureRef),
}
impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_structure(&self) -> Option<&StructureRef> {
        match self {
            Value::Structure(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_primitive(&self) -> Option<&Primitive> {
        match self {
            Value::Primitive(p) => Some(p),
            _ => None,
        }
    }

    /// Name used in diagnostics: the script type for structures, the host type otherwise.
    pub fn type_name(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Primitive(p) => p.type_name().to_string(),
            Value::Structure(s) => s.kind().to_string(),
        }
    }
}
impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Value::Null => Value::Null,
            Value::Primitive(p) => Value::Primitive(p.clone()),
            Value::Structure(s) => Value::Structure(Rc::clone(s)),
        }
    }
}
impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Primitive(p) => write!(f, "{}", p),
            Value::Structure(s) => write!(f, "{}", s.to_display_string()),
        }
    }
}
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Value::Null"),
            Value::Primitive(p) => write!(f, "Value::Primitive({:?})", p),
            Value::Structure(s) => write!(
                f,
                "Value::Structure({}: {:?})",
                s.kind(),
                s.to_display_string()
            ),
        }
    }
}
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Primitive(a), Value::Primitive(b)) => a == b,
            (Value::Structure(a), Value::Structure(b)) => a.equals(b.as_ref()),
            _ => false,
        }
    }
}

impl From<Primitive> for Value {
    fn from(p: Primitive) -> Self {
        Value::Primitive(p)
    }
}
impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Primitive(Primitive::Boolean(b))
    }
}
impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Primitive(Primitive::Int32(n))
    }
}
impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Primitive(Primitive::Int64(n))
    }
}
impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Primitive(Primitive::Double(n))
    }
}
impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Primitive(Primitive::Text(s.to_string()))
    }
}
impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Primitive(Primitive::Text(s))
    }
}
impl From<StructureRef> for Value {
    fn from(s: StructureRef) -> Self {
        Value::Structure(s)
    }
}
