//! Diagnostic line for unsupported operators.
//!
//! Installs a process-wide logger and flips the global dispatch config, so it
//! lives in its own test binary with a single test.

extern crate script_structure;

use log::{Level, LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;

use script_structure::runner::ds::operations::operator::Operator;
use script_structure::runner::ds::structure::Structure;
use script_structure::runner::ds::value::Value;
use script_structure::runner::std_lib::StringValue;
use script_structure::runner::suffix::SuffixRegistry;

struct CaptureLogger;

lazy_static::lazy_static! {
    static ref WARNINGS: Mutex<Vec<String>> = Mutex::new(Vec::new());
}

static LOGGER: CaptureLogger = CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            WARNINGS.lock().push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

fn take_warnings() -> Vec<String> {
    std::mem::take(&mut *WARNINGS.lock())
}

#[test]
fn test_unsupported_operator_logs_once_unless_disabled() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let s = StringValue::new("x");
    take_warnings();

    let err = s
        .apply_operator(Operator::Divide, &Value::from(2), false)
        .unwrap_err();
    let warnings = take_warnings();
    assert_eq!(warnings.len(), 1, "{:?}", warnings);
    assert!(warnings[0].contains('/'));
    assert!(warnings[0].contains("String"));
    assert!(warnings[0].contains("i32"));
    assert!(err.to_string().contains('/'));

    // Supported operators stay quiet.
    s.apply_operator(Operator::Equal, &Value::from("x"), false)
        .unwrap();
    assert!(take_warnings().is_empty());

    let registry = SuffixRegistry::global();
    let mut config = registry.config();
    config.log_unsupported_operators = false;
    registry.configure(config);

    assert!(s
        .apply_operator(Operator::Divide, &Value::from(2), false)
        .is_err());
    assert!(take_warnings().is_empty());
}
