use std::fmt;
use std::fmt::{Display, Formatter};

/// Which member access was being attempted when resolution failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuffixOperation {
    Get,
    Set,
}
impl Display for SuffixOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SuffixOperation::Get => write!(f, "get"),
            SuffixOperation::Set => write!(f, "set"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptErrorType {
    /// No suffix with this name in either the instance or the type table.
    MemberNotFound {
        operation: SuffixOperation,
        member: String,
        type_name: String,
    },
    /// The suffix exists but carries no set-behavior.
    NotSettable { member: String, type_name: String },
    UnsupportedOperator {
        operator: String,
        left: String,
        right: String,
    },
    /// A suffix was invoked with the wrong number or kind of arguments.
    ArgumentMismatch { member: String, message: String },
    /// A defect in this crate or its caller, never a scripting mistake.
    Internal(String),
}
impl ScriptErrorType {
    pub fn member_not_found(
        operation: SuffixOperation,
        member: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        ScriptErrorType::MemberNotFound {
            operation,
            member: member.into(),
            type_name: type_name.into(),
        }
    }

    pub fn not_settable(member: impl Into<String>, type_name: impl Into<String>) -> Self {
        ScriptErrorType::NotSettable {
            member: member.into(),
            type_name: type_name.into(),
        }
    }

    /// Errors the script author can fix; the execution engine decides how to present them.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, ScriptErrorType::Internal(_))
    }
}
impl Display for ScriptErrorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptErrorType::MemberNotFound {
                operation,
                member,
                type_name,
            } => write!(
                f,
                "Cannot {} suffix '{}': no such suffix on type {}",
                operation, member, type_name
            ),
            ScriptErrorType::NotSettable { member, type_name } => write!(
                f,
                "Suffix '{}' on type {} is not settable",
                member, type_name
            ),
            ScriptErrorType::UnsupportedOperator {
                operator,
                left,
                right,
            } => write!(
                f,
                "Operator '{}' is not supported between {} and {}",
                operator, left, right
            ),
            ScriptErrorType::ArgumentMismatch { member, message } => {
                write!(f, "Bad arguments for suffix '{}': {}", member, message)
            }
            ScriptErrorType::Internal(m) => write!(f, "Internal error: {}", m),
        }
    }
}

impl std::error::Error for ScriptErrorType {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_not_found_message_names_type_and_member() {
        let e = ScriptErrorType::member_not_found(SuffixOperation::Set, "ALTITUDE", "Vessel");
        let msg = e.to_string();
        assert!(msg.contains("set"));
        assert!(msg.contains("ALTITUDE"));
        assert!(msg.contains("Vessel"));
        assert!(e.is_user_error());
    }

    #[test]
    fn test_internal_is_not_user_error() {
        assert!(!ScriptErrorType::Internal("oops".to_string()).is_user_error());
    }
}
