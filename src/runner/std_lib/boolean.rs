//! Boolean built-in.

use std::any::{Any, TypeId};
use std::collections::BTreeMap;

use crate::runner::ds::structure::{wrap, Serializable, Structure, StructureBase};
use crate::runner::ds::value::{Primitive, Value};
use crate::runner::suffix::registry::SuffixRegistry;
use crate::runner::suffix::table::SuffixTable;

pub const TYPE_STR_BOOLEAN: &str = "Boolean";

pub struct BooleanValue {
    base: StructureBase,
    value: bool,
}

fn register_type_suffixes(_table: &mut SuffixTable) {}

/// Install the Boolean type suffixes into `registry`, once.
pub fn register(registry: &SuffixRegistry) {
    registry.ensure_type_registered(
        TypeId::of::<BooleanValue>(),
        TYPE_STR_BOOLEAN,
        register_type_suffixes,
    );
}

impl BooleanValue {
    pub fn new(value: bool) -> Self {
        register(SuffixRegistry::global());
        BooleanValue {
            base: StructureBase::new(),
            value,
        }
    }

    pub fn value(&self) -> bool {
        self.value
    }

    pub fn into_value(self) -> Value {
        wrap(self)
    }
}

impl Structure for BooleanValue {
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
        TYPE_STR_BOOLEAN
    }

    fn to_display_string(&self) -> String {
        if self.value {
            "True".to_string()
        } else {
            "False".to_string()
        }
    }

    fn equals(&self, other: &dyn Structure) -> bool {
        match other.as_any().downcast_ref::<BooleanValue>() {
            Some(o) => self.value == o.value,
            None => false,
        }
    }

    fn as_serializable(&self) -> Option<&dyn Serializable> {
        Some(self)
    }
}

impl Serializable for BooleanValue {
    fn dump(&self) -> BTreeMap<String, Value> {
        let mut dump = BTreeMap::new();
        dump.insert(
            "value".to_string(),
            Value::Primitive(Primitive::Boolean(self.value)),
        );
        dump
    }
}
