use std::fmt;

use thiserror::Error;

/// Everything that can go wrong while evaluating or executing one statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("undefined variable or invalid expression: {0}")]
    UndefinedVariable(String),

    #[error("variable '{name}' is not an integer: {found}")]
    TypeMismatch { name: String, found: String },

    #[error("unknown block type: {0}")]
    UnknownWorldUnit(String),

    #[error("unknown mob type: {0}")]
    UnknownEntityType(String),

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("invalid direction: {0}")]
    InvalidDirection(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("unsupported condition: {0}")]
    UnsupportedCondition(String),

    #[error("malformed statement: {0}")]
    MalformedStatement(String),

    #[error("loop exceeded maximum iteration limit ({0})")]
    IterationLimit(u64),
}

impl ScriptError {
    pub fn malformed(message: impl Into<String>) -> Self {
        ScriptError::MalformedStatement(message.into())
    }

    /// Stable short name of the error kind, used in reports and the CLI.
    pub fn kind(&self) -> &'static str {
        match self {
            ScriptError::UndefinedVariable(_) => "UndefinedVariable",
            ScriptError::TypeMismatch { .. } => "TypeMismatch",
            ScriptError::UnknownWorldUnit(_) => "UnknownWorldUnit",
            ScriptError::UnknownEntityType(_) => "UnknownEntityType",
            ScriptError::InvalidValue(_) => "InvalidValue",
            ScriptError::InvalidDirection(_) => "InvalidDirection",
            ScriptError::DivisionByZero => "DivisionByZero",
            ScriptError::UnsupportedCondition(_) => "UnsupportedCondition",
            ScriptError::MalformedStatement(_) => "MalformedStatement",
            ScriptError::IterationLimit(_) => "IterationLimit",
        }
    }
}

/// A reported error together with the 1-based script line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub error: ScriptError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error (line {}): {}", self.line, self.error)
    }
}
