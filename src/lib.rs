//! # script_structure - Dynamic member dispatch for an embedded scripting language
//!
//! Every value a script can see is a [`Structure`](runner::ds::structure::Structure).
//! Structures expose named members ("suffixes") that are read, written or called
//! by string name at run time:
//! - Per-type suffix tables shared by all instances, held in a process-wide registry
//! - Per-instance suffix tables, seeded with the universal suffixes
//! - Case-insensitive name resolution
//! - Operator dispatch for script expressions
//! - A two-way boundary between native primitives and wrapped script values
//!
//! ## Quick Start
//!
//! ### Reading suffixes
//!
//! ```
//! use script_structure::runner::ds::structure::Structure;
//! use script_structure::runner::ds::value::Value;
//! use script_structure::runner::std_lib::StringValue;
//!
//! let name = StringValue::new("Jebediah");
//! let length = name.get_suffix("LENGTH").unwrap();
//! assert_eq!(length.to_string(), "8");
//!
//! let has = name.call_suffix("hasSuffix", vec![Value::from("toupper")]).unwrap();
//! assert_eq!(has.to_string(), "True");
//! ```
//!
//! ### Crossing the primitive boundary
//!
//! ```
//! use script_structure::runner::ds::operations::type_conversion::{from_primitive, to_primitive};
//! use script_structure::runner::ds::value::Value;
//!
//! let wrapped = from_primitive(Value::from(3.5));
//! assert!(wrapped.as_structure().is_some());
//! assert_eq!(to_primitive(wrapped), Value::from(3.5));
//! ```
//!
//! ### Operators
//!
//! ```
//! use script_structure::runner::ds::operations::operator::Operator;
//! use script_structure::runner::ds::structure::Structure;
//! use script_structure::runner::ds::value::Value;
//! use script_structure::runner::std_lib::ScalarValue;
//!
//! let ten = ScalarValue::int(10);
//! let op = Operator::from_symbol("-").unwrap();
//! assert_eq!(ten.apply_operator(op, &Value::from(4), false).unwrap().to_string(), "6");
//! assert_eq!(ten.apply_operator(op, &Value::from(4), true).unwrap().to_string(), "-6");
//! ```
//!
//! ## Resolution Order
//!
//! ```text
//! get / has:  instance table → type table → MemberNotFound
//! set:        type table → instance table → MemberNotFound
//! ```
//!
//! A read-only suffix refuses `set` with `NotSettable`.
//!
//! ## Architecture
//!
//! - **[`runner::ds`]** - Values, the `Structure` trait, errors, conversions and operators
//! - **[`runner::suffix`]** - Suffix descriptors, tables and the process-wide registry
//! - **[`runner::std_lib`]** - Built-in scalar, boolean, string and list values
//! - **[`runner::config`]** - Dispatch configuration

#[macro_use]
extern crate lazy_static;

pub mod runner;
