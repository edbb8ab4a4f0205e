//! Process-wide registry of type-scoped suffix tables, plus name resolution.
//!
//! Every concrete structure type owns at most one [`SuffixTable`] here, keyed
//! by its [`TypeId`]. Tables are immutable snapshots behind an `Arc`:
//!
//! ```text
//! register(T, names, suffix)
//!      ↓
//! 1. Take the mutation lock (one reentrant lock for the whole registry)
//! 2. Clone T's current snapshot (or start from empty)
//! 3. Insert / replace the names in the clone
//! 4. Swap the new snapshot in under a short write lock
//! ```
//!
//! A type's built-in suffixes are installed lazily by
//! [`SuffixRegistry::ensure_type_registered`]. Names the host registered for the
//! type before that point win over the built-ins.
//!
//! Readers only take the read side long enough to clone the `Arc`, so lookups
//! never block each other and never see a table halfway through an update.
//!
//! Resolution against an instance follows two different orders:
//!
//! - **get / has**: instance table first, then the type table.
//! - **set**: type table first, then the instance table.
//!
//! When a name lives in both scopes, reads therefore hit the instance suffix
//! while writes hit the type suffix.

use std::any::TypeId;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use parking_lot::{ReentrantMutex, RwLock};

use super::table::{fold_name, SuffixTable};
use super::types::Suffix;
use crate::runner::config::DispatchConfig;
use crate::runner::ds::error::{ScriptErrorType, SuffixOperation};
use crate::runner::ds::operations::type_conversion::from_primitive;
use crate::runner::ds::structure::Structure;
use crate::runner::ds::value::Value;

lazy_static! {
    static ref GLOBAL_REGISTRY: SuffixRegistry = SuffixRegistry::new();
    static ref EMPTY_TABLE: Arc<SuffixTable> = Arc::new(SuffixTable::new());
}

#[derive(Default)]
struct RegistryState {
    tables: HashMap<TypeId, Arc<SuffixTable>>,
    /// Types whose one-time initializer has already run.
    initialized: HashSet<TypeId>,
    /// Types whose initializer is running on the thread holding the mutation lock.
    initializing: HashSet<TypeId>,
}

pub struct SuffixRegistry {
    /// Serializes every mutation across all types. Reentrant so an initializer
    /// may construct values of other types or register suffixes itself.
    mutation: ReentrantMutex<()>,
    state: RwLock<RegistryState>,
    config: RwLock<DispatchConfig>,
}

impl SuffixRegistry {
    /// A private registry. Structures always resolve against [`SuffixRegistry::global`];
    /// standalone registries are useful for tooling and tests.
    pub fn new() -> Self {
        SuffixRegistry {
            mutation: ReentrantMutex::new(()),
            state: RwLock::new(RegistryState::default()),
            config: RwLock::new(DispatchConfig::default()),
        }
    }

    pub fn global() -> &'static SuffixRegistry {
        &GLOBAL_REGISTRY
    }

    pub fn configure(&self, config: DispatchConfig) {
        *self.config.write() = config;
    }

    pub fn config(&self) -> DispatchConfig {
        self.config.read().clone()
    }

    /// Insert or replace `names` in the table of `type_id`.
    pub fn register<S: AsRef<str>>(&self, type_id: TypeId, names: &[S], suffix: Suffix) {
        let _guard = self.mutation.lock();
        let mut table = self.snapshot(type_id);
        table.add(names, suffix);
        self.state.write().tables.insert(type_id, Arc::new(table));
    }

    /// [`SuffixRegistry::register`] keyed by a concrete structure type.
    pub fn register_for<T: Structure, S: AsRef<str>>(&self, names: &[S], suffix: Suffix) {
        self.register(TypeId::of::<T>(), names, suffix)
    }

    /// Run `init` against the table of `type_id` exactly once per registry.
    ///
    /// `init` builds the type's built-in suffixes into a fresh table. Anything
    /// already registered for the type, before or during `init`, is laid over
    /// the result, so explicit registrations are never replaced by built-ins.
    /// A nested call for a type whose initializer is already running returns
    /// immediately.
    pub fn ensure_type_registered<F>(&self, type_id: TypeId, type_name: &str, init: F)
    where
        F: FnOnce(&mut SuffixTable),
    {
        if self.state.read().initialized.contains(&type_id) {
            return;
        }
        let _guard = self.mutation.lock();
        {
            let mut state = self.state.write();
            if state.initialized.contains(&type_id) || !state.initializing.insert(type_id) {
                return;
            }
        }
        let mut table = SuffixTable::new();
        init(&mut table);
        let built_in = table.len();
        table.overlay(&self.snapshot(type_id));
        log::debug!(
            "registered {} built-in suffix name(s) for {}, {} in total",
            built_in,
            type_name,
            table.len()
        );
        let mut state = self.state.write();
        state.tables.insert(type_id, Arc::new(table));
        state.initializing.remove(&type_id);
        state.initialized.insert(type_id);
    }

    /// Current table for the type, or a shared empty table. Never creates an entry.
    pub fn table_for(&self, type_id: TypeId) -> Arc<SuffixTable> {
        match self.state.read().tables.get(&type_id) {
            Some(table) => Arc::clone(table),
            None => Arc::clone(&EMPTY_TABLE),
        }
    }

    fn snapshot(&self, type_id: TypeId) -> SuffixTable {
        self.state
            .read()
            .tables
            .get(&type_id)
            .map(|table| (**table).clone())
            .unwrap_or_default()
    }

    /// Find the suffix a read of `name` would use: instance scope, then type scope.
    pub fn resolve(
        &self,
        instance: &dyn Structure,
        name: &str,
    ) -> Result<Arc<Suffix>, ScriptErrorType> {
        if let Some(suffix) = instance.structure_base().instance_suffix(name) {
            return Ok(suffix);
        }
        self.table_for(instance.as_any().type_id())
            .get(name)
            .ok_or_else(|| {
                ScriptErrorType::member_not_found(SuffixOperation::Get, name, instance.kind())
            })
    }

    /// Read a member, invoking its get-behavior with no arguments.
    pub fn get(&self, instance: &dyn Structure, name: &str) -> Result<Value, ScriptErrorType> {
        self.call(instance, name, Vec::new())
    }

    /// Invoke a member with positional arguments the caller has already evaluated.
    /// Native primitives returned by the behavior are wrapped before they reach the caller.
    pub fn call(
        &self,
        instance: &dyn Structure,
        name: &str,
        args: Vec<Value>,
    ) -> Result<Value, ScriptErrorType> {
        let suffix = self.resolve(instance, name)?;
        let check_kinds = self.config.read().check_argument_kinds;
        suffix
            .invoke(name, instance, args, check_kinds)
            .map(from_primitive)
    }

    /// Write a member: type scope, then instance scope.
    pub fn set(
        &self,
        instance: &dyn Structure,
        name: &str,
        value: Value,
    ) -> Result<(), ScriptErrorType> {
        let suffix = match self.table_for(instance.as_any().type_id()).get(name) {
            Some(suffix) => suffix,
            None => instance
                .structure_base()
                .instance_suffix(name)
                .ok_or_else(|| {
                    ScriptErrorType::member_not_found(
                        SuffixOperation::Set,
                        name,
                        instance.kind(),
                    )
                })?,
        };
        suffix.assign(name, instance, value)
    }

    pub fn has(&self, instance: &dyn Structure, name: &str) -> bool {
        instance.structure_base().has_instance_suffix(name)
            || self.table_for(instance.as_any().type_id()).contains(name)
    }

    /// Sorted, de-duplicated union of instance and type suffix names.
    pub fn names(&self, instance: &dyn Structure) -> Vec<String> {
        let mut merged = BTreeMap::new();
        for name in instance.structure_base().instance_suffix_names() {
            merged.entry(fold_name(&name)).or_insert(name);
        }
        let table = self.table_for(instance.as_any().type_id());
        for name in table.names() {
            merged
                .entry(fold_name(name))
                .or_insert_with(|| name.to_string());
        }
        merged.into_iter().map(|(_, name)| name).collect()
    }
}

impl Default for SuffixRegistry {
    fn default() -> Self {
        Self::new()
    }
}
