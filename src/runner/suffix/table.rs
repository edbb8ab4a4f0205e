//! Case-insensitive name → suffix mapping.

use std::collections::HashMap;
use std::sync::Arc;

use super::types::Suffix;

struct SuffixEntry {
    /// Name as it was registered, used for listings.
    name: String,
    suffix: Arc<Suffix>,
}

/// Suffix table used both per type (inside the registry) and per instance.
///
/// Keys are folded to upper case; iteration order is unspecified.
#[derive(Default)]
pub struct SuffixTable {
    entries: HashMap<String, SuffixEntry>,
}

pub(crate) fn fold_name(name: &str) -> String {
    name.to_uppercase()
}

impl SuffixTable {
    pub fn new() -> Self {
        SuffixTable {
            entries: HashMap::new(),
        }
    }

    /// Insert under every given name, replacing any previous suffix with that name.
    pub fn add<S: AsRef<str>>(&mut self, names: &[S], suffix: Suffix) {
        let suffix = Arc::new(suffix);
        for name in names {
            let name = name.as_ref();
            let previous = self.entries.insert(
                fold_name(name),
                SuffixEntry {
                    name: name.to_string(),
                    suffix: Arc::clone(&suffix),
                },
            );
            if previous.is_some() {
                log::trace!("suffix '{}' replaced", name);
            }
        }
    }

    /// Copy every entry of `other` into this table, replacing names already present.
    pub fn overlay(&mut self, other: &SuffixTable) {
        for (key, entry) in &other.entries {
            self.entries.insert(
                key.clone(),
                SuffixEntry {
                    name: entry.name.clone(),
                    suffix: Arc::clone(&entry.suffix),
                },
            );
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<Suffix>> {
        self.entries
            .get(&fold_name(name))
            .map(|entry| Arc::clone(&entry.suffix))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&fold_name(name))
    }

    /// Registered names with their original casing, unordered.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|entry| entry.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Clone for SuffixTable {
    fn clone(&self) -> Self {
        SuffixTable {
            entries: self
                .entries
                .iter()
                .map(|(key, entry)| {
                    (
                        key.clone(),
                        SuffixEntry {
                            name: entry.name.clone(),
                            suffix: Arc::clone(&entry.suffix),
                        },
                    )
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ds::value::Value;

    fn constant(n: i32) -> Suffix {
        Suffix::get(move |_| Ok(Value::from(n)))
    }

    #[test]
    fn test_lookup_ignores_case() {
        let mut table = SuffixTable::new();
        table.add(&["Foo"], constant(1));
        assert!(table.contains("FOO"));
        assert!(table.contains("foo"));
        assert!(table.contains("Foo"));
        assert!(Arc::ptr_eq(
            &table.get("foo").unwrap(),
            &table.get("FOO").unwrap()
        ));
    }

    #[test]
    fn test_aliases_share_one_suffix() {
        let mut table = SuffixTable::new();
        table.add(&["LENGTH", "LEN"], constant(1));
        assert_eq!(table.len(), 2);
        assert!(Arc::ptr_eq(
            &table.get("len").unwrap(),
            &table.get("length").unwrap()
        ));
    }

    #[test]
    fn test_readd_replaces() {
        let mut table = SuffixTable::new();
        table.add(&["X"], constant(1));
        let first = table.get("X").unwrap();
        table.add(&["x"], constant(2));
        let second = table.get("X").unwrap();
        assert_eq!(table.len(), 1);
        assert!(!Arc::ptr_eq(&first, &second));
        let names: Vec<&str> = table.names().collect();
        assert_eq!(names, vec!["x"]);
    }

    #[test]
    fn test_overlay_prefers_other() {
        let mut base = SuffixTable::new();
        base.add(&["KEEP", "SHARED"], constant(1));
        let mut top = SuffixTable::new();
        top.add(&["shared"], constant(2));
        let shared = top.get("SHARED").unwrap();

        base.overlay(&top);
        assert_eq!(base.len(), 2);
        assert!(base.contains("KEEP"));
        assert!(Arc::ptr_eq(&base.get("SHARED").unwrap(), &shared));
    }
}
