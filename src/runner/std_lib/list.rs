//! List built-in.
//!
//! Only what the universal suffixes need: `SUFFIXNAMES` hands its result back
//! as a list.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::runner::ds::error::ScriptErrorType;
use crate::runner::ds::operations::test_and_comparison::values_equal;
use crate::runner::ds::structure::{wrap, Serializable, Structure, StructureBase};
use crate::runner::ds::value::Value;
use crate::runner::std_lib::boolean::BooleanValue;
use crate::runner::std_lib::scalar::ScalarValue;
use crate::runner::suffix::registry::SuffixRegistry;
use crate::runner::suffix::table::SuffixTable;
use crate::runner::suffix::types::{ArgKind, Suffix};

pub const TYPE_STR_LIST: &str = "List";

pub struct ListValue {
    base: StructureBase,
    items: RefCell<Vec<Value>>,
}

fn with_items<T>(
    this: &dyn Structure,
    f: impl FnOnce(&[Value]) -> T,
) -> Result<T, ScriptErrorType> {
    match this.as_any().downcast_ref::<ListValue>() {
        Some(list) => Ok(f(&list.items.borrow())),
        None => Err(ScriptErrorType::Internal(format!(
            "List suffix invoked on {}",
            this.kind()
        ))),
    }
}

fn register_type_suffixes(table: &mut SuffixTable) {
    table.add(
        &["LENGTH"],
        Suffix::get(|this| {
            let len = with_items(this, |items| items.len())?;
            Ok(ScalarValue::int(len as i32).into_value())
        }),
    );
    table.add(
        &["EMPTY"],
        Suffix::get(|this| {
            let empty = with_items(this, |items| items.is_empty())?;
            Ok(BooleanValue::new(empty).into_value())
        }),
    );
    table.add(
        &["CONTAINS"],
        Suffix::get_with_args(vec![ArgKind::Any], |this, args| {
            let found = with_items(this, |items| {
                args.first()
                    .map(|needle| items.iter().any(|item| values_equal(item, needle)))
                    .unwrap_or(false)
            })?;
            Ok(BooleanValue::new(found).into_value())
        }),
    );
}

/// Install the List type suffixes into `registry`, once.
pub fn register(registry: &SuffixRegistry) {
    registry.ensure_type_registered(
        TypeId::of::<ListValue>(),
        TYPE_STR_LIST,
        register_type_suffixes,
    );
}

impl ListValue {
    pub fn new(items: Vec<Value>) -> Self {
        register(SuffixRegistry::global());
        ListValue {
            base: StructureBase::new(),
            items: RefCell::new(items),
        }
    }

    pub fn items(&self) -> Vec<Value> {
        self.items.borrow().clone()
    }

    pub fn push(&self, item: Value) {
        self.items.borrow_mut().push(item);
    }

    pub fn into_value(self) -> Value {
        wrap(self)
    }
}

impl Structure for ListValue {
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
        TYPE_STR_LIST
    }

    fn to_display_string(&self) -> String {
        let items = self.items.borrow();
        let rendered: Vec<String> = items.iter().map(|item| item.to_string()).collect();
        format!("LIST of {} items: [{}]", items.len(), rendered.join(", "))
    }

    fn equals(&self, other: &dyn Structure) -> bool {
        match other.as_any().downcast_ref::<ListValue>() {
            Some(o) => {
                let (a, b) = (self.items.borrow(), o.items.borrow());
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| values_equal(x, y))
            }
            None => false,
        }
    }

    fn as_serializable(&self) -> Option<&dyn Serializable> {
        Some(self)
    }
}

impl Serializable for ListValue {
    fn dump(&self) -> BTreeMap<String, Value> {
        self.items
            .borrow()
            .iter()
            .enumerate()
            .map(|(i, item)| (i.to_string(), item.clone()))
            .collect()
    }
}
