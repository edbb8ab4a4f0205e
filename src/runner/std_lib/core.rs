//! Core type registration.
//!
//! Types register their suffixes lazily on first construction; call
//! [`register_core_types`] to warm the registry up front instead.

use crate::runner::suffix::registry::SuffixRegistry;

use super::boolean;
use super::list;
use super::scalar;
use super::string;

/// Register the suffix tables of every built-in value type.
pub fn register_core_types(registry: &SuffixRegistry) {
    scalar::register(registry);
    boolean::register(registry);
    string::register(registry);
    list::register(registry);
}
