//! Built-in value types.
//!
//! The wrappers the primitive conversion boundary produces (scalar, boolean,
//! string) plus the list that `SUFFIXNAMES` returns.

pub mod core;
pub mod boolean;
pub mod list;
pub mod scalar;
pub mod string;

pub use self::core::register_core_types;
pub use boolean::BooleanValue;
pub use list::ListValue;
pub use scalar::{ScalarNumber, ScalarValue};
pub use string::StringValue;
