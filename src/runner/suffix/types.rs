//! Core types for suffix descriptors.

use std::fmt;
use std::sync::Arc;

use crate::runner::ds::error::ScriptErrorType;
use crate::runner::ds::structure::Structure;
use crate::runner::ds::value::{PrimitiveKind, Value};
use crate::runner::std_lib::boolean::BooleanValue;
use crate::runner::std_lib::scalar::ScalarValue;
use crate::runner::std_lib::string::StringValue;

/// Get-behavior. Receives the instance the suffix was resolved on and the
/// positional arguments already supplied by the execution engine.
pub type GetFn =
    Arc<dyn Fn(&dyn Structure, Vec<Value>) -> Result<Value, ScriptErrorType> + Send + Sync>;

/// Set-behavior. Receives the instance and the value being assigned.
pub type SetFn = Arc<dyn Fn(&dyn Structure, Value) -> Result<(), ScriptErrorType> + Send + Sync>;

/// Declared kind of a suffix parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Any,
    Scalar,
    Boolean,
    String,
}
impl ArgKind {
    /// Accepts both the wrapped form and the matching native primitive.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            ArgKind::Any => true,
            ArgKind::Scalar => match value {
                Value::Primitive(p) => matches!(
                    p.kind(),
                    PrimitiveKind::Integral | PrimitiveKind::Floating
                ),
                Value::Structure(s) => s.as_any().is::<ScalarValue>(),
                Value::Null => false,
            },
            ArgKind::Boolean => match value {
                Value::Primitive(p) => p.kind() == PrimitiveKind::Boolean,
                Value::Structure(s) => s.as_any().is::<BooleanValue>(),
                Value::Null => false,
            },
            ArgKind::String => match value {
                Value::Primitive(p) => p.kind() == PrimitiveKind::Text,
                Value::Structure(s) => s.as_any().is::<StringValue>(),
                Value::Null => false,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ArgKind::Any => "Structure",
            ArgKind::Scalar => "Scalar",
            ArgKind::Boolean => "Boolean",
            ArgKind::String => "String",
        }
    }
}

/// Capability tag. Only `GetSet` suffixes carry a set-behavior.
#[derive(Clone)]
pub enum SuffixAccess {
    Get(GetFn),
    GetSet(GetFn, SetFn),
}

/// A named member descriptor. Immutable once built; shared between tables via `Arc`.
#[derive(Clone)]
pub struct Suffix {
    params: Vec<ArgKind>,
    access: SuffixAccess,
    description: Option<String>,
}

impl Suffix {
    /// Read-only suffix taking no arguments.
    pub fn get<F>(get: F) -> Self
    where
        F: Fn(&dyn Structure) -> Result<Value, ScriptErrorType> + Send + Sync + 'static,
    {
        Suffix {
            params: Vec::new(),
            access: SuffixAccess::Get(Arc::new(move |this: &dyn Structure, _args: Vec<Value>| {
                get(this)
            })),
            description: None,
        }
    }

    /// Read-only suffix that is a callable with declared positional parameters.
    pub fn get_with_args<F>(params: Vec<ArgKind>, get: F) -> Self
    where
        F: Fn(&dyn Structure, Vec<Value>) -> Result<Value, ScriptErrorType>
            + Send
            + Sync
            + 'static,
    {
        Suffix {
            params,
            access: SuffixAccess::Get(Arc::new(get)),
            description: None,
        }
    }

    /// Readable and writable suffix.
    pub fn get_set<G, S>(get: G, set: S) -> Self
    where
        G: Fn(&dyn Structure) -> Result<Value, ScriptErrorType> + Send + Sync + 'static,
        S: Fn(&dyn Structure, Value) -> Result<(), ScriptErrorType> + Send + Sync + 'static,
    {
        Suffix {
            params: Vec::new(),
            access: SuffixAccess::GetSet(
                Arc::new(move |this: &dyn Structure, _args: Vec<Value>| get(this)),
                Arc::new(set),
            ),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn params(&self) -> &[ArgKind] {
        &self.params
    }

    pub fn is_settable(&self) -> bool {
        matches!(self.access, SuffixAccess::GetSet(..))
    }

    /// Run the get-behavior. Arity is always checked; argument kinds only when
    /// `check_kinds` is set.
    pub fn invoke(
        &self,
        name: &str,
        this: &dyn Structure,
        args: Vec<Value>,
        check_kinds: bool,
    ) -> Result<Value, ScriptErrorType> {
        if args.len() != self.params.len() {
            return Err(ScriptErrorType::ArgumentMismatch {
                member: name.to_string(),
                message: format!(
                    "expected {} argument(s), got {}",
                    self.params.len(),
                    args.len()
                ),
            });
        }
        if check_kinds {
            for (i, (kind, arg)) in self.params.iter().zip(args.iter()).enumerate() {
                if !kind.accepts(arg) {
                    return Err(ScriptErrorType::ArgumentMismatch {
                        member: name.to_string(),
                        message: format!(
                            "argument {} must be {}, got {}",
                            i + 1,
                            kind.name(),
                            arg.type_name()
                        ),
                    });
                }
            }
        }
        let get = match &self.access {
            SuffixAccess::Get(get) => get,
            SuffixAccess::GetSet(get, _) => get,
        };
        get(this, args)
    }

    /// Run the set-behavior, failing with `NotSettable` on a read-only suffix.
    pub fn assign(
        &self,
        name: &str,
        this: &dyn Structure,
        value: Value,
    ) -> Result<(), ScriptErrorType> {
        match &self.access {
            SuffixAccess::Get(_) => Err(ScriptErrorType::not_settable(name, this.kind())),
            SuffixAccess::GetSet(_, set) => set(this, value),
        }
    }
}

impl fmt::Debug for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suffix")
            .field("params", &self.params)
            .field("settable", &self.is_settable())
            .field("description", &self.description)
            .finish()
    }
}
