//! Runtime value universe.
//!
//! Every expression reduces to a [`Value`]. Values are freely cloned and may
//! be aliased across bindings, arrays, hashes, and closure frames; nothing
//! mutates a value in place (`push` returns a new array), so sharing is
//! safe without synchronization. `Display` is the language's inspect
//! rendering, used by the `puts` builtin and the REPL.

use std::collections::HashMap;
use std::fmt;

use crate::ast::{BlockStatement, Identifier};
use crate::builtins::Builtin;
use crate::evaluator::Environment;

#[derive(Clone)]
pub enum Value {
    /// The only numeric type: a signed 64-bit integer.
    Integer(i64),
    Boolean(bool),
    /// The "no value" sentinel produced by missing `else` arms, `let`
    /// statements, out-of-range indexing, and `puts`.
    Null,
    String(String),
    /// Ordered, heterogeneous, zero-indexed.
    Array(Vec<Value>),
    /// Keys are restricted to the hashable variants; see [`HashKey`].
    Hash(HashMap<HashKey, Value>),
    /// A function literal together with the environment enclosing its
    /// definition site. Calling it extends that environment, never the
    /// caller's.
    Function {
        parameters: Vec<Identifier>,
        body: BlockStatement,
        env: Environment,
    },
    /// A host-implemented function out of the fixed registry. Not
    /// user-constructible; produced only by identifier lookup.
    Builtin(&'static Builtin),
}

impl Value {
    /// The type tag used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Boolean(_) => "BOOLEAN",
            Value::Null => "NULL",
            Value::String(_) => "STRING",
            Value::Array(_) => "ARRAY",
            Value::Hash(_) => "HASH",
            Value::Function { .. } => "FUNCTION",
            Value::Builtin(_) => "BUILTIN",
        }
    }

    /// Everything is truthy except `null` and `false`; `0`, `""`, and `[]`
    /// all count as true.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Boolean(false))
    }

    /// The hash-key form of this value, or `None` for unhashable variants.
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Value::Integer(value) => Some(HashKey::Integer(*value)),
            Value::Boolean(value) => Some(HashKey::Boolean(*value)),
            Value::String(value) => Some(HashKey::String(value.clone())),
            _ => None,
        }
    }
}

/// A hashable value: the variant tag plus its content, so `1`, `true`, and
/// `"1"` are three distinct keys while any two equal strings collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    String(String),
}

impl fmt::Display for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashKey::Integer(value) => write!(f, "{value}"),
            HashKey::Boolean(value) => write!(f, "{value}"),
            HashKey::String(value) => write!(f, "{value}"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "Integer({value})"),
            Value::Boolean(value) => write!(f, "Boolean({value})"),
            Value::Null => write!(f, "Null"),
            Value::String(value) => write!(f, "String({value:?})"),
            Value::Array(elements) => f.debug_tuple("Array").field(elements).finish(),
            Value::Hash(pairs) => f.debug_tuple("Hash").field(pairs).finish(),
            // The captured environment is omitted: it can reach back to this
            // very function when the binding is recursive.
            Value::Function {
                parameters, body, ..
            } => {
                write!(f, "Function(fn({}) {body})", join(parameters))
            }
            Value::Builtin(builtin) => write!(f, "Builtin({})", builtin.name),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Hash(a), Value::Hash(b)) => a == b,
            (
                Value::Function {
                    parameters: p1,
                    body: b1,
                    env: e1,
                },
                Value::Function {
                    parameters: p2,
                    body: b2,
                    env: e2,
                },
            ) => p1 == p2 && b1 == b2 && e1 == e2,
            (Value::Builtin(a), Value::Builtin(b)) => std::ptr::eq(*a, *b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{value}"),
            Value::Boolean(value) => write!(f, "{value}"),
            Value::Null => write!(f, "null"),
            Value::String(value) => write!(f, "{value}"),
            Value::Array(elements) => write!(f, "[{}]", join(elements)),
            Value::Hash(pairs) => {
                let rendered: Vec<String> = pairs
                    .iter()
                    .map(|(key, value)| format!("{key}: {value}"))
                    .collect();
                write!(f, "{{{}}}", rendered.join(", "))
            }
            Value::Function {
                parameters, body, ..
            } => {
                write!(f, "fn({}) {{ {body} }}", join(parameters))
            }
            Value::Builtin(_) => write!(f, "builtin function"),
        }
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
