//! Tests for suffix resolution: scopes, case folding, replacement and
//! concurrent registration.

extern crate script_structure;


use std::any::TypeId;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use script_structure::runner::ds::error::{ScriptErrorType, SuffixOperation};
use script_structure::runner::ds::structure::Structure;
use script_structure::runner::ds::value::Value;
use script_structure::runner::suffix::{ArgKind, Suffix, SuffixRegistry};
use structure_util::{constant, read_slot, scalar, slot, Probe};

// ============================================================================
// Read-only vs settable
// ============================================================================

mod capability_tests {
    use super::*;

    struct ReadOnlyTag;
    struct SettableTag;

    #[test]
    fn test_read_only_type_suffix_rejects_set() {
        SuffixRegistry::global()
            .register_for::<Probe<ReadOnlyTag>, _>(&["ALTITUDE"], read_slot::<ReadOnlyTag>());
        let p: Probe<ReadOnlyTag> = Probe::new(70);

        assert_eq!(scalar(&p.get_suffix("ALTITUDE").unwrap()), 70.0);
        assert_eq!(
            p.set_suffix("ALTITUDE", Value::from(1)).unwrap_err(),
            ScriptErrorType::not_settable("ALTITUDE", "Probe")
        );
        assert_eq!(p.value(), 70);
    }

    #[test]
    fn test_settable_type_suffix_writes_through() {
        SuffixRegistry::global()
            .register_for::<Probe<SettableTag>, _>(&["SLOT"], slot::<SettableTag>());
        let p: Probe<SettableTag> = Probe::new(1);

        p.set_suffix("slot", Value::from(42)).unwrap();
        assert_eq!(p.value(), 42);
        assert_eq!(scalar(&p.get_suffix("SLOT").unwrap()), 42.0);
    }

    #[test]
    fn test_universal_suffixes_are_read_only() {
        struct Tag;
        let p: Probe<Tag> = Probe::new(0);
        match p.set_suffix("TOSTRING", Value::from("x")) {
            Err(ScriptErrorType::NotSettable { member, .. }) => assert_eq!(member, "TOSTRING"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}

// ============================================================================
// Missing members
// ============================================================================

mod missing_member_tests {
    use super::*;

    struct Tag;

    #[test]
    fn test_unknown_name_is_not_found() {
        let p: Probe<Tag> = Probe::new(0);
        assert!(!p.has_suffix("WARPDRIVE"));
        assert_eq!(
            p.get_suffix("WARPDRIVE").unwrap_err(),
            ScriptErrorType::member_not_found(SuffixOperation::Get, "WARPDRIVE", "Probe")
        );
        assert_eq!(
            p.set_suffix("WARPDRIVE", Value::from(1)).unwrap_err(),
            ScriptErrorType::member_not_found(SuffixOperation::Set, "WARPDRIVE", "Probe")
        );
    }

    #[test]
    fn test_not_found_is_user_error() {
        let p: Probe<Tag> = Probe::new(0);
        let err = p.get_suffix("nope").unwrap_err();
        assert!(err.is_user_error());
        assert!(err.to_string().contains("Probe"));
        assert!(err.to_string().contains("nope"));
    }
}

// ============================================================================
// Case folding, replacement, listings
// ============================================================================

mod naming_tests {
    use super::*;

    struct CaseTag;
    struct ReplaceTag;
    struct ListingTag;

    #[test]
    fn test_lookup_is_case_insensitive() {
        SuffixRegistry::global().register_for::<Probe<CaseTag>, _>(&["Foo"], constant(7));
        let p: Probe<CaseTag> = Probe::new(0);
        for name in &["FOO", "foo", "Foo", "fOo"] {
            assert!(p.has_suffix(name));
            assert_eq!(scalar(&p.get_suffix(name).unwrap()), 7.0);
        }
    }

    #[test]
    fn test_reregistering_replaces() {
        let registry = SuffixRegistry::global();
        registry.register_for::<Probe<ReplaceTag>, _>(&["X"], constant(1));
        registry.register_for::<Probe<ReplaceTag>, _>(&["X"], constant(2));
        let p: Probe<ReplaceTag> = Probe::new(0);
        assert_eq!(scalar(&p.get_suffix("X").unwrap()), 2.0);
    }

    #[test]
    fn test_instance_suffix_readd_replaces() {
        struct Tag;
        let p: Probe<Tag> = Probe::new(0);
        p.add_instance_suffix(&["MINE"], constant(1));
        p.add_instance_suffix(&["mine"], constant(2));
        assert_eq!(scalar(&p.get_suffix("MINE").unwrap()), 2.0);
    }

    #[test]
    fn test_names_sorted_and_unique_across_scopes() {
        SuffixRegistry::global()
            .register_for::<Probe<ListingTag>, _>(&["ZULU", "Shared", "ALPHA"], constant(1));
        let p: Probe<ListingTag> = Probe::new(0);
        p.add_instance_suffix(&["SHARED", "middle"], constant(2));

        let names = p.suffix_names();
        let folded: Vec<String> = names.iter().map(|n| n.to_uppercase()).collect();
        let mut sorted = folded.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(folded, sorted);

        assert_eq!(folded.iter().filter(|n| *n == "SHARED").count(), 1);
        for expected in &["ALPHA", "MIDDLE", "ZULU", "TOSTRING", "SUFFIXNAMES", "HASSUFFIX"] {
            assert!(folded.iter().any(|n| n == expected), "missing {}", expected);
        }
        assert!(names.iter().any(|n| n == "middle"), "case not preserved");
    }
}

// ============================================================================
// Scope precedence
// ============================================================================

mod precedence_tests {
    use super::*;

    struct BothScopesTag;

    #[test]
    fn test_get_prefers_instance_set_prefers_type() {
        SuffixRegistry::global()
            .register_for::<Probe<BothScopesTag>, _>(&["SPEED"], slot::<BothScopesTag>());
        let p: Probe<BothScopesTag> = Probe::new(5);
        p.add_instance_suffix(&["SPEED"], constant(-1));

        assert_eq!(scalar(&p.get_suffix("SPEED").unwrap()), -1.0);

        p.set_suffix("SPEED", Value::from(99)).unwrap();
        assert_eq!(p.value(), 99);
        assert_eq!(scalar(&p.get_suffix("SPEED").unwrap()), -1.0);
    }

    #[test]
    fn test_set_falls_back_to_instance_scope() {
        struct Tag;
        let p: Probe<Tag> = Probe::new(0);
        p.add_instance_suffix(&["LOCAL"], slot::<Tag>());
        p.set_suffix("local", Value::from(3)).unwrap();
        assert_eq!(p.value(), 3);
    }
}

// ============================================================================
// Arguments
// ============================================================================

mod argument_tests {
    use super::*;

    struct Tag;

    fn doubler() -> Suffix {
        Suffix::get_with_args(vec![ArgKind::Scalar], |_, args| {
            Ok(Value::from(scalar(&args[0]) * 2.0))
        })
    }

    #[test]
    fn test_call_with_declared_arguments() {
        SuffixRegistry::global().register_for::<Probe<Tag>, _>(&["DOUBLE"], doubler());
        let p: Probe<Tag> = Probe::new(0);
        let v = p.call_suffix("DOUBLE", vec![Value::from(21)]).unwrap();
        assert!(v.as_structure().is_some(), "native results are wrapped");
        assert_eq!(scalar(&v), 42.0);
    }

    #[test]
    fn test_wrong_arity_is_distinguishable() {
        SuffixRegistry::global().register_for::<Probe<Tag>, _>(&["DOUBLE"], doubler());
        let p: Probe<Tag> = Probe::new(0);
        match p.get_suffix("DOUBLE") {
            Err(ScriptErrorType::ArgumentMismatch { member, .. }) => assert_eq!(member, "DOUBLE"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_private_registry_can_skip_kind_checks() {
        let registry = SuffixRegistry::new();
        let mut config = registry.config();
        config.check_argument_kinds = false;
        registry.configure(config);
        registry.register(
            TypeId::of::<Probe<Tag>>(),
            &["ECHO"],
            Suffix::get_with_args(vec![ArgKind::Scalar], |_, mut args| Ok(args.remove(0))),
        );
        let p: Probe<Tag> = Probe::new(0);
        let v = registry.call(&p, "ECHO", vec![Value::from("text")]).unwrap();
        assert_eq!(v.to_string(), "text");
    }
}

// ============================================================================
// Concurrency
// ============================================================================

mod concurrency_tests {
    use super::*;

    struct ThreadA;
    struct ThreadB;
    struct OnceTag;

    const COUNT: usize = 200;

    #[test]
    fn test_concurrent_registration_for_two_types() {
        let a = thread::spawn(|| {
            for i in 0..COUNT {
                SuffixRegistry::global()
                    .register_for::<Probe<ThreadA>, _>(&[format!("A{}", i)], constant(i as i32));
            }
        });
        let b = thread::spawn(|| {
            for i in 0..COUNT {
                SuffixRegistry::global()
                    .register_for::<Probe<ThreadB>, _>(&[format!("B{}", i)], constant(i as i32));
            }
        });
        a.join().unwrap();
        b.join().unwrap();

        let registry = SuffixRegistry::global();
        let table_a = registry.table_for(TypeId::of::<Probe<ThreadA>>());
        let table_b = registry.table_for(TypeId::of::<Probe<ThreadB>>());
        assert_eq!(table_a.len(), COUNT);
        assert_eq!(table_b.len(), COUNT);
        assert!(!table_a.contains("B0"));

        let p: Probe<ThreadB> = Probe::new(0);
        assert_eq!(scalar(&p.get_suffix("b150").unwrap()), 150.0);
    }

    #[test]
    fn test_type_initializer_runs_once_under_contention() {
        let runs = Arc::new(AtomicUsize::new(0));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let runs = Arc::clone(&runs);
                thread::spawn(move || {
                    SuffixRegistry::global().ensure_type_registered(
                        TypeId::of::<Probe<OnceTag>>(),
                        "Probe",
                        |table| {
                            runs.fetch_add(1, Ordering::SeqCst);
                            table.add(&["ONCE"], constant(1));
                        },
                    );
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        let p: Probe<OnceTag> = Probe::new(0);
        assert!(p.has_suffix("once"));
    }
}
