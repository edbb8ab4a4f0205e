//! The base abstraction every script-visible value implements.
//!
//! A concrete value type embeds a [`StructureBase`] (its instance suffix table,
//! pre-filled with the universal suffixes) and implements [`Structure`]. Type
//! suffixes shared by all instances live in the
//! [`SuffixRegistry`](crate::runner::suffix::SuffixRegistry).
//!
//! ```
//! use std::any::Any;
//! use script_structure::runner::ds::structure::{Structure, StructureBase};
//!
//! struct Probe {
//!     base: StructureBase,
//! }
//!
//! impl Structure for Probe {
//!     fn structure_base(&self) -> &StructureBase { &self.base }
//!     fn as_structure(&self) -> &dyn Structure { self }
//!     fn as_any(&self) -> &dyn Any { self }
//!     fn kind(&self) -> &'static str { "Probe" }
//!     fn to_display_string(&self) -> String { "PROBE".to_string() }
//! }
//!
//! let probe = Probe { base: StructureBase::new() };
//! assert!(probe.has_suffix("tostring"));
//! ```

use std::any::Any;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;

use crate::runner::ds::error::ScriptErrorType;
use crate::runner::ds::operations::operator::Operator;
use crate::runner::ds::operations::test_and_comparison::{same_structure, structure_equals_value};
use crate::runner::ds::operations::type_conversion::to_text;
use crate::runner::ds::value::{StructureRef, Value};
use crate::runner::std_lib::boolean::BooleanValue;
use crate::runner::std_lib::list::ListValue;
use crate::runner::std_lib::string::StringValue;
use crate::runner::suffix::registry::SuffixRegistry;
use crate::runner::suffix::table::SuffixTable;
use crate::runner::suffix::types::{ArgKind, Suffix};

pub const TYPE_STR_STRUCTURE: &str = "Structure";

lazy_static! {
    static ref UNIVERSAL_SUFFIXES: SuffixTable = universal_suffixes();
}

fn universal_suffixes() -> SuffixTable {
    let mut table = SuffixTable::new();
    table.add(
        &["TOSTRING"],
        Suffix::get(|this| Ok(StringValue::new(this.to_display_string()).into_value()))
            .with_description("Returns this value as a string"),
    );
    table.add(
        &["HASSUFFIX"],
        Suffix::get_with_args(vec![ArgKind::String], |this, args| {
            let name = suffix_name_arg("HASSUFFIX", &args)?;
            Ok(BooleanValue::new(this.has_suffix(&name)).into_value())
        })
        .with_description("True if the given suffix exists on this value"),
    );
    table.add(
        &["SUFFIXNAMES"],
        Suffix::get(|this| {
            let names = this
                .suffix_names()
                .into_iter()
                .map(|name| StringValue::new(name).into_value())
                .collect();
            Ok(ListValue::new(names).into_value())
        })
        .with_description("Alphabetical list of every suffix on this value"),
    );
    table.add(
        &["ISSERIALIZABLE"],
        Suffix::get(|this| Ok(BooleanValue::new(this.as_serializable().is_some()).into_value()))
            .with_description("True if this value can be serialized"),
    );
    table.add(
        &["TYPENAME"],
        Suffix::get(|this| Ok(StringValue::new(this.kind()).into_value()))
            .with_description("Name of this value's type"),
    );
    table.add(
        &["ISTYPE"],
        Suffix::get_with_args(vec![ArgKind::String], |this, args| {
            let name = suffix_name_arg("ISTYPE", &args)?;
            let is_type = name.eq_ignore_ascii_case(this.kind())
                || name.eq_ignore_ascii_case(TYPE_STR_STRUCTURE);
            Ok(BooleanValue::new(is_type).into_value())
        })
        .with_description("True if this value is of the named type"),
    );
    table
}

fn suffix_name_arg(member: &str, args: &[Value]) -> Result<String, ScriptErrorType> {
    args.first()
        .and_then(to_text)
        .ok_or_else(|| ScriptErrorType::ArgumentMismatch {
            member: member.to_string(),
            message: "expected a suffix name".to_string(),
        })
}

/// Per-instance state shared by every structure: the instance suffix table.
pub struct StructureBase {
    instance_suffixes: RefCell<SuffixTable>,
}

impl StructureBase {
    pub fn new() -> Self {
        StructureBase {
            instance_suffixes: RefCell::new(UNIVERSAL_SUFFIXES.clone()),
        }
    }

    /// Add or replace an instance suffix. Normally called while the owner is constructed.
    pub fn add_instance_suffix<S: AsRef<str>>(&self, names: &[S], suffix: Suffix) {
        self.instance_suffixes.borrow_mut().add(names, suffix);
    }

    pub fn instance_suffix(&self, name: &str) -> Option<Arc<Suffix>> {
        self.instance_suffixes.borrow().get(name)
    }

    pub fn has_instance_suffix(&self, name: &str) -> bool {
        self.instance_suffixes.borrow().contains(name)
    }

    pub fn instance_suffix_names(&self) -> Vec<String> {
        self.instance_suffixes
            .borrow()
            .names()
            .map(|name| name.to_string())
            .collect()
    }
}

impl Default for StructureBase {
    fn default() -> Self {
        Self::new()
    }
}

/// Capability marker for values the host can persist.
pub trait Serializable {
    /// Flat key → value form of this value.
    fn dump(&self) -> BTreeMap<String, Value>;
}

pub trait Structure: Any {
    fn structure_base(&self) -> &StructureBase;

    fn as_structure(&self) -> &dyn Structure;

    fn as_any(&self) -> &dyn Any;

    /// Script-visible type name, used in diagnostics and `TYPENAME`.
    fn kind(&self) -> &'static str;

    /// Canonical string rendering.
    fn to_display_string(&self) -> String;

    /// Value equality. Defaults to identity.
    fn equals(&self, other: &dyn Structure) -> bool {
        same_structure(self.as_structure(), other)
    }

    fn as_serializable(&self) -> Option<&dyn Serializable> {
        None
    }

    /// Evaluate `self op other`, or `other op self` when `reversed` is set.
    ///
    /// Types with their own operators handle them here and defer to
    /// [`apply_base_operator`] for the rest.
    fn apply_operator(
        &self,
        op: Operator,
        other: &Value,
        reversed: bool,
    ) -> Result<Value, ScriptErrorType> {
        apply_base_operator(self.as_structure(), op, other, reversed)
    }

    fn get_suffix(&self, name: &str) -> Result<Value, ScriptErrorType> {
        SuffixRegistry::global().get(self.as_structure(), name)
    }

    fn call_suffix(&self, name: &str, args: Vec<Value>) -> Result<Value, ScriptErrorType> {
        SuffixRegistry::global().call(self.as_structure(), name, args)
    }

    fn set_suffix(&self, name: &str, value: Value) -> Result<(), ScriptErrorType> {
        SuffixRegistry::global().set(self.as_structure(), name, value)
    }

    fn has_suffix(&self, name: &str) -> bool {
        SuffixRegistry::global().has(self.as_structure(), name)
    }

    fn suffix_names(&self) -> Vec<String> {
        SuffixRegistry::global().names(self.as_structure())
    }

    /// On a `dyn Structure`, go through [`Structure::structure_base`] instead.
    fn add_instance_suffix<S: AsRef<str>>(&self, names: &[S], suffix: Suffix)
    where
        Self: Sized,
    {
        self.structure_base().add_instance_suffix(names, suffix);
    }
}

/// Wrap a concrete structure as a runtime value.
pub fn wrap<S: Structure>(structure: S) -> Value {
    Value::Structure(Rc::new(structure) as StructureRef)
}

/// Operators every structure understands: `==`, `<>` and string concatenation.
pub fn apply_base_operator(
    this: &dyn Structure,
    op: Operator,
    other: &Value,
    reversed: bool,
) -> Result<Value, ScriptErrorType> {
    match op {
        Operator::Equal => Ok(BooleanValue::new(structure_equals_value(this, other)).into_value()),
        Operator::NotEqual => {
            Ok(BooleanValue::new(!structure_equals_value(this, other)).into_value())
        }
        Operator::Add => {
            let this_str = this.to_display_string();
            let other_str = other.to_string();
            let joined = if reversed {
                other_str + &this_str
            } else {
                this_str + &other_str
            };
            Ok(StringValue::new(joined).into_value())
        }
        _ => Err(unsupported_operator(this, op, other, reversed)),
    }
}

/// Build the unsupported-operator error, reporting it to the log first.
pub fn unsupported_operator(
    this: &dyn Structure,
    op: Operator,
    other: &Value,
    reversed: bool,
) -> ScriptErrorType {
    let (left, right) = if reversed {
        (other.type_name(), this.kind().to_string())
    } else {
        (this.kind().to_string(), other.type_name())
    };
    if SuffixRegistry::global().config().log_unsupported_operators {
        log::warn!(
            "unsupported operator '{}' between {} and {}",
            op,
            left,
            right
        );
    }
    ScriptErrorType::UnsupportedOperator {
        operator: op.symbol().to_string(),
        left,
        right,
    }
}
