use std::collections::HashMap;
use std::fmt;

use crate::error::ScriptError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Str(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{}", s),
        }
    }
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            Value::Int(_) => None,
        }
    }
}

/// Variable bindings of one interpreter session.
///
/// There is no block scoping: `define` overwrites an existing binding
/// rather than shadowing it.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn lookup(&self, name: &str) -> Result<&Value, ScriptError> {
        self.vars
            .get(name)
            .ok_or_else(|| ScriptError::UndefinedVariable(name.to_string()))
    }

    /// Integer value of `name`. Text is never coerced.
    pub fn lookup_int(&self, name: &str) -> Result<i64, ScriptError> {
        match self.lookup(name)? {
            Value::Int(n) => Ok(*n),
            Value::Str(s) => Err(ScriptError::TypeMismatch {
                name: name.to_string(),
                found: s.clone(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
