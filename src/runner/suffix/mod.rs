//! Suffixes: named, capability-tagged members resolved by name at run time.
//!
//! ## Scopes
//!
//! ```text
//! Instance table   one per Structure value, private to it
//!                  (starts with TOSTRING, HASSUFFIX, SUFFIXNAMES, ...)
//! Type table       one per concrete type, shared by every instance,
//!                  held in the process-wide SuffixRegistry
//! ```
//!
//! ### Key Components
//!
//! - **[`Suffix`]**: read-only or read-write descriptor wrapping host behavior
//! - **[`SuffixTable`]**: case-insensitive name → suffix map
//! - **[`SuffixRegistry`]**: per-type tables, copy-on-write, plus get / set / has / names
//!
//! ## Example
//!
//! ```
//! use script_structure::runner::ds::structure::Structure;
//! use script_structure::runner::ds::value::Value;
//! use script_structure::runner::std_lib::StringValue;
//! use script_structure::runner::suffix::{Suffix, SuffixRegistry};
//!
//! SuffixRegistry::global().register_for::<StringValue, _>(
//!     &["SHOUT"],
//!     Suffix::get(|this| Ok(Value::from(this.to_display_string().to_uppercase() + "!"))),
//! );
//!
//! let greeting = StringValue::new("hello");
//! assert_eq!(greeting.get_suffix("shout").unwrap().to_string(), "HELLO!");
//! ```

pub mod registry;
pub mod table;
pub mod types;

pub use registry::SuffixRegistry;
pub use table::SuffixTable;
pub use types::{ArgKind, GetFn, SetFn, Suffix, SuffixAccess};
