use std::fmt;
use std::fmt::{Display, Formatter};

use crate::runner::ds::error::ScriptErrorType;

/// Operators a script expression can apply to a structure.
///
/// The base structure understands only `Equal`, `NotEqual` and `Add`; the rest
/// exist so concrete types can opt into them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Equal,
    NotEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    LessThan,
    GreaterThan,
    LessOrEqual,
    GreaterOrEqual,
}

impl Operator {
    pub fn from_symbol(symbol: &str) -> Result<Operator, ScriptErrorType> {
        Ok(match symbol {
            "==" | "=" => Operator::Equal,
            "<>" => Operator::NotEqual,
            "+" => Operator::Add,
            "-" => Operator::Subtract,
            "*" => Operator::Multiply,
            "/" => Operator::Divide,
            "^" => Operator::Power,
            "<" => Operator::LessThan,
            ">" => Operator::GreaterThan,
            "<=" => Operator::LessOrEqual,
            ">=" => Operator::GreaterOrEqual,
            _ => {
                return Err(ScriptErrorType::UnsupportedOperator {
                    operator: symbol.to_string(),
                    left: "?".to_string(),
                    right: "?".to_string(),
                })
            }
        })
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Equal => "==",
            Operator::NotEqual => "<>",
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Power => "^",
            Operator::LessThan => "<",
            Operator::GreaterThan => ">",
            Operator::LessOrEqual => "<=",
            Operator::GreaterOrEqual => ">=",
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
