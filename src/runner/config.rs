//! Dispatch configuration file parsing.

use std::fmt;
use std::fs;
use std::path::Path;

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// File could not be read.
    Io(String),
    /// Line `usize` could not be understood.
    Parse(usize, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "Config read error: {}", msg),
            ConfigError::Parse(line, msg) => write!(f, "Config parse error at line {}: {}", line, msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Knobs for suffix dispatch, installed with
/// [`SuffixRegistry::configure`](crate::runner::suffix::SuffixRegistry::configure).
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchConfig {
    /// Emit a warning line before returning an unsupported-operator error.
    pub log_unsupported_operators: bool,
    /// Check declared argument kinds on invocation, not just arity.
    pub check_argument_kinds: bool,
}

impl DispatchConfig {
    pub fn new() -> Self {
        DispatchConfig {
            log_unsupported_operators: true,
            check_argument_kinds: true,
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read config file: {}", e)))?;

        Self::parse(&content)
    }

    /// Parse `key = value` lines. `#` starts a comment; a `[dispatch]` header is allowed.
    ///
    /// ```toml
    /// [dispatch]
    /// log_unsupported_operators = true
    /// check_argument_kinds = false
    /// ```
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config = DispatchConfig::new();

        for (index, line) in content.lines().enumerate() {
            let line_no = index + 1;
            let line = match line.find('#') {
                Some(pos) => &line[..pos],
                None => line,
            }
            .trim();

            if line.is_empty() {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let section = line[1..line.len() - 1].trim();
                if section != "dispatch" {
                    return Err(ConfigError::Parse(
                        line_no,
                        format!("unknown section '{}'", section),
                    ));
                }
                continue;
            }

            let (key, value) = Self::parse_entry(line)
                .ok_or_else(|| ConfigError::Parse(line_no, format!("expected key = value, got '{}'", line)))?;
            let flag = Self::parse_bool(value)
                .ok_or_else(|| ConfigError::Parse(line_no, format!("'{}' is not a boolean", value)))?;

            match key {
                "log_unsupported_operators" => config.log_unsupported_operators = flag,
                "check_argument_kinds" => config.check_argument_kinds = flag,
                _ => {
                    return Err(ConfigError::Parse(
                        line_no,
                        format!("unknown key '{}'", key),
                    ))
                }
            }
        }

        Ok(config)
    }

    fn parse_entry(line: &str) -> Option<(&str, &str)> {
        let mut parts = line.splitn(2, '=');
        let key = parts.next()?.trim();
        let value = parts.next()?.trim();
        if key.is_empty() || value.is_empty() {
            None
        } else {
            Some((key, value))
        }
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = DispatchConfig::parse("").unwrap();
        assert_eq!(config, DispatchConfig::default());
    }

    #[test]
    fn test_parse_overrides() {
        let config = DispatchConfig::parse(
            r#"
            # quiet operators
            [dispatch]
            log_unsupported_operators = false
            check_argument_kinds = false # arity only
            "#,
        )
        .unwrap();
        assert!(!config.log_unsupported_operators);
        assert!(!config.check_argument_kinds);
    }

    #[test]
    fn test_parse_rejects_unknown_key() {
        match DispatchConfig::parse("verbose = true") {
            Err(ConfigError::Parse(1, msg)) => assert!(msg.contains("verbose")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_non_boolean() {
        assert!(DispatchConfig::parse("check_argument_kinds = yes").is_err());
    }
}
