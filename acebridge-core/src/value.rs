use serde_json::Value;

use crate::error::{BridgeError, Result};

/// The result of evaluating a snippet in the embedded engine.
///
/// Engines hand back JSON; anything that isn't an integer, string or boolean
/// is flattened. Floats become `Int` by truncation, arrays and objects become
/// their JSON text, `null`/`undefined` become `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptValue {
    Int(i64),
    Str(String),
    Bool(bool),
    None,
}

impl ScriptValue {
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => ScriptValue::None,
            Value::Bool(b) => ScriptValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ScriptValue::Int(i),
                None => ScriptValue::Int(n.as_f64().map(|f| f as i64).unwrap_or(0)),
            },
            Value::String(s) => ScriptValue::Str(s),
            other => ScriptValue::Str(other.to_string()),
        }
    }

    /// Parse the JSON text an engine produced for a result. Empty text means
    /// the snippet had no value.
    pub fn from_json_str(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(ScriptValue::None);
        }
        Ok(Self::from_json(serde_json::from_str(json)?))
    }

    fn kind(&self) -> String {
        match self {
            ScriptValue::Int(i) => format!("integer {}", i),
            ScriptValue::Str(s) => format!("string {:?}", s),
            ScriptValue::Bool(b) => format!("boolean {}", b),
            ScriptValue::None => "no value".to_string(),
        }
    }

    // Lossy coercions. These follow JavaScript-ish truthiness rather than
    // failing, so a mistyped wrapper result degrades instead of erroring.

    pub fn to_int(&self) -> i64 {
        match self {
            ScriptValue::Int(i) => *i,
            ScriptValue::Bool(b) => *b as i64,
            ScriptValue::Str(s) => s.trim().parse().unwrap_or(0),
            ScriptValue::None => 0,
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            ScriptValue::Int(i) => i.to_string(),
            ScriptValue::Str(s) => s.clone(),
            ScriptValue::Bool(b) => b.to_string(),
            ScriptValue::None => String::new(),
        }
    }

    pub fn to_bool(&self) -> bool {
        match self {
            ScriptValue::Int(i) => *i != 0,
            ScriptValue::Bool(b) => *b,
            ScriptValue::Str(s) => !s.is_empty(),
            ScriptValue::None => false,
        }
    }

    // Strict variants.

    pub fn expect_int(&self) -> Result<i64> {
        match self {
            ScriptValue::Int(i) => Ok(*i),
            other => Err(BridgeError::TypeMismatch {
                expected: "integer",
                actual: other.kind(),
            }),
        }
    }

    pub fn expect_str(&self) -> Result<&str> {
        match self {
            ScriptValue::Str(s) => Ok(s),
            other => Err(BridgeError::TypeMismatch {
                expected: "string",
                actual: other.kind(),
            }),
        }
    }

    pub fn expect_bool(&self) -> Result<bool> {
        match self {
            ScriptValue::Bool(b) => Ok(*b),
            other => Err(BridgeError::TypeMismatch {
                expected: "boolean",
                actual: other.kind(),
            }),
        }
    }
}
