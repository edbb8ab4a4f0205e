//! String built-in.
//!
//! Equality and the search suffixes ignore case, matching how suffix names
//! are resolved.

use std::any::{Any, TypeId};
use std::collections::BTreeMap;

use crate::runner::ds::error::ScriptErrorType;
use crate::runner::ds::operations::type_conversion::to_text;
use crate::runner::ds::structure::{wrap, Serializable, Structure, StructureBase};
use crate::runner::ds::value::{Primitive, Value};
use crate::runner::std_lib::boolean::BooleanValue;
use crate::runner::std_lib::scalar::ScalarValue;
use crate::runner::suffix::registry::SuffixRegistry;
use crate::runner::suffix::table::SuffixTable;
use crate::runner::suffix::types::{ArgKind, Suffix};

pub const TYPE_STR_STRING: &str = "String";

pub struct StringValue {
    base: StructureBase,
    value: String,
}

fn this_str(this: &dyn Structure) -> Result<&str, ScriptErrorType> {
    this.as_any()
        .downcast_ref::<StringValue>()
        .map(|s| s.as_str())
        .ok_or_else(|| {
            ScriptErrorType::Internal(format!(
                "String suffix invoked on {}",
                this.kind()
            ))
        })
}

fn text_arg(member: &str, args: &[Value]) -> Result<String, ScriptErrorType> {
    args.first()
        .and_then(to_text)
        .ok_or_else(|| ScriptErrorType::ArgumentMismatch {
            member: member.to_string(),
            message: "expected a string".to_string(),
        })
}

/// Register a one-string-argument predicate comparing lower-cased operands.
fn add_predicate(table: &mut SuffixTable, name: &'static str, test: fn(&str, &str) -> bool) {
    table.add(
        &[name],
        Suffix::get_with_args(vec![ArgKind::String], move |this, args| {
            let needle = text_arg(name, &args)?.to_lowercase();
            let haystack = this_str(this)?.to_lowercase();
            Ok(BooleanValue::new(test(&haystack, &needle)).into_value())
        }),
    );
}

fn register_type_suffixes(table: &mut SuffixTable) {
    table.add(
        &["LENGTH"],
        Suffix::get(|this| {
            let len = this_str(this)?.chars().count();
            Ok(ScalarValue::int(len as i32).into_value())
        })
        .with_description("Number of characters"),
    );
    table.add(
        &["TOUPPER"],
        Suffix::get(|this| Ok(StringValue::new(this_str(this)?.to_uppercase()).into_value())),
    );
    table.add(
        &["TOLOWER"],
        Suffix::get(|this| Ok(StringValue::new(this_str(this)?.to_lowercase()).into_value())),
    );
    add_predicate(table, "CONTAINS", |h, n| h.contains(n));
    add_predicate(table, "STARTSWITH", |h, n| h.starts_with(n));
    add_predicate(table, "ENDSWITH", |h, n| h.ends_with(n));
    table.add(
        &["INDEXOF", "FIND"],
        Suffix::get_with_args(vec![ArgKind::String], |this, args| {
            let needle = text_arg("INDEXOF", &args)?.to_lowercase();
            let haystack = this_str(this)?.to_lowercase();
            let index = match haystack.find(&needle) {
                Some(byte) => haystack[..byte].chars().count() as i32,
                None => -1,
            };
            Ok(ScalarValue::int(index).into_value())
        })
        .with_description("Character index of the first match, or -1"),
    );
}

/// Install the String type suffixes into `registry`, once.
pub fn register(registry: &SuffixRegistry) {
    registry.ensure_type_registered(
        TypeId::of::<StringValue>(),
        TYPE_STR_STRING,
        register_type_suffixes,
    );
}

impl StringValue {
    pub fn new(value: impl Into<String>) -> Self {
        register(SuffixRegistry::global());
        StringValue {
            base: StructureBase::new(),
            value: value.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_value(self) -> Value {
        wrap(self)
    }
}

impl Structure for StringValue {
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
        TYPE_STR_STRING
    }

    fn to_display_string(&self) -> String {
        self.value.clone()
    }

    fn equals(&self, other: &dyn Structure) -> bool {
        match other.as_any().downcast_ref::<StringValue>() {
            Some(o) => self.value.to_lowercase() == o.value.to_lowercase(),
            None => false,
        }
    }

    fn as_serializable(&self) -> Option<&dyn Serializable> {
        Some(self)
    }
}

impl Serializable for StringValue {
    fn dump(&self) -> BTreeMap<String, Value> {
        let mut dump = BTreeMap::new();
        dump.insert(
            "value".to_string(),
            Value::Primitive(Primitive::Text(self.value.clone())),
        );
        dump
    }
}
