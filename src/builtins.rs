//! Built-in function registry.
//!
//! A fixed, process-wide table of host-implemented functions. Builtins are
//! not bound in any environment: identifier lookup falls back to this
//! registry after the environment chain misses, so user bindings shadow
//! builtins frame by frame without ever removing them.
//!
//! Every builtin receives its arguments fully evaluated, in call order.
//! Arity is validated by the evaluator against the registered [`Arity`]
//! before the host function runs, so implementations only have to dispatch
//! on argument types.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::RuntimeError;
use crate::value::Value;

/// Expected argument count for a builtin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments.
    Exact(usize),
    /// Any number of arguments, including zero.
    Any,
}

impl Arity {
    pub(crate) fn validate(self, got: usize) -> Result<(), RuntimeError> {
        match self {
            Arity::Exact(want) if got != want => {
                Err(RuntimeError::WrongNumberOfArguments { got, want })
            }
            _ => Ok(()),
        }
    }
}

/// Host signature shared by all builtins.
pub type BuiltinFn = fn(Vec<Value>) -> Result<Value, RuntimeError>;

/// A registered builtin. `Value::Builtin` holds a `&'static` reference into
/// the registry, so values stay `Clone` without reference counting.
pub struct Builtin {
    pub name: &'static str,
    pub arity: Arity,
    pub func: BuiltinFn,
}

impl std::fmt::Debug for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builtin")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

static BUILTINS: &[Builtin] = &[
    Builtin {
        name: "len",
        arity: Arity::Exact(1),
        func: builtin_len,
    },
    Builtin {
        name: "first",
        arity: Arity::Exact(1),
        func: builtin_first,
    },
    Builtin {
        name: "last",
        arity: Arity::Exact(1),
        func: builtin_last,
    },
    Builtin {
        name: "rest",
        arity: Arity::Exact(1),
        func: builtin_rest,
    },
    Builtin {
        name: "push",
        arity: Arity::Exact(2),
        func: builtin_push,
    },
    Builtin {
        name: "puts",
        arity: Arity::Any,
        func: builtin_puts,
    },
];

static BUILTIN_INDEX: LazyLock<HashMap<&'static str, &'static Builtin>> =
    LazyLock::new(|| BUILTINS.iter().map(|builtin| (builtin.name, builtin)).collect());

/// Find a builtin by its reserved name.
pub(crate) fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTIN_INDEX.get(name).copied()
}

/// Byte length of a string, or element count of an array.
fn builtin_len(args: Vec<Value>) -> Result<Value, RuntimeError> {
    match args.as_slice() {
        [Value::String(value)] => Ok(Value::Integer(value.len() as i64)),
        [Value::Array(elements)] => Ok(Value::Integer(elements.len() as i64)),
        [other] => Err(unsupported("len", other)),
        _ => Err(RuntimeError::WrongNumberOfArguments {
            got: args.len(),
            want: 1,
        }),
    }
}

/// First element of an array, or `null` when empty.
fn builtin_first(args: Vec<Value>) -> Result<Value, RuntimeError> {
    match args.as_slice() {
        [Value::Array(elements)] => Ok(elements.first().cloned().unwrap_or(Value::Null)),
        [other] => Err(unsupported("first", other)),
        _ => Err(RuntimeError::WrongNumberOfArguments {
            got: args.len(),
            want: 1,
        }),
    }
}

/// Last element of an array, or `null` when empty.
fn builtin_last(args: Vec<Value>) -> Result<Value, RuntimeError> {
    match args.as_slice() {
        [Value::Array(elements)] => Ok(elements.last().cloned().unwrap_or(Value::Null)),
        [other] => Err(unsupported("last", other)),
        _ => Err(RuntimeError::WrongNumberOfArguments {
            got: args.len(),
            want: 1,
        }),
    }
}

/// A new array holding everything but the first element, or `null` when the
/// input is empty.
fn builtin_rest(args: Vec<Value>) -> Result<Value, RuntimeError> {
    match args.as_slice() {
        [Value::Array(elements)] => match elements.split_first() {
            Some((_, rest)) => Ok(Value::Array(rest.to_vec())),
            None => Ok(Value::Null),
        },
        [other] => Err(unsupported("rest", other)),
        _ => Err(RuntimeError::WrongNumberOfArguments {
            got: args.len(),
            want: 1,
        }),
    }
}

/// A new array with the value appended; the input array is not mutated.
fn builtin_push(args: Vec<Value>) -> Result<Value, RuntimeError> {
    match args.as_slice() {
        [Value::Array(elements), value] => {
            let mut extended = elements.clone();
            extended.push(value.clone());
            Ok(Value::Array(extended))
        }
        [other, _] => Err(unsupported("push", other)),
        _ => Err(RuntimeError::WrongNumberOfArguments {
            got: args.len(),
            want: 2,
        }),
    }
}

/// Write each argument's inspect rendering to stdout, one per line.
fn builtin_puts(args: Vec<Value>) -> Result<Value, RuntimeError> {
    for arg in &args {
        println!("{arg}");
    }
    Ok(Value::Null)
}

fn unsupported(builtin: &'static str, value: &Value) -> RuntimeError {
    RuntimeError::UnsupportedArgument {
        builtin,
        kind: value.type_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invoke a builtin through the registry exactly the way the evaluator
    /// does: arity first, then the host function.
    fn call_builtin(name: &str, args: Vec<Value>) -> Result<Value, RuntimeError> {
        let builtin = lookup(name).expect("builtin not found");
        builtin.arity.validate(args.len())?;
        (builtin.func)(args)
    }

    fn int_array(values: &[i64]) -> Value {
        Value::Array(values.iter().copied().map(Value::Integer).collect())
    }

    #[test]
    fn registry_resolves_reserved_names_only() {
        for name in ["len", "first", "last", "rest", "push", "puts"] {
            assert!(lookup(name).is_some(), "missing builtin {name}");
        }
        assert!(lookup("map").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn builtin_behavior_table() {
        type Case = (&'static str, Vec<Value>, Result<Value, RuntimeError>);

        let cases: Vec<Case> = vec![
            // len over strings counts bytes, over arrays counts elements
            ("len", vec![Value::String(String::new())], Ok(Value::Integer(0))),
            (
                "len",
                vec![Value::String("four".into())],
                Ok(Value::Integer(4)),
            ),
            (
                "len",
                vec![Value::String("hello world".into())],
                Ok(Value::Integer(11)),
            ),
            ("len", vec![int_array(&[1, 2, 3])], Ok(Value::Integer(3))),
            ("len", vec![Value::Array(vec![])], Ok(Value::Integer(0))),
            (
                "len",
                vec![Value::Integer(1)],
                Err(RuntimeError::UnsupportedArgument {
                    builtin: "len",
                    kind: "INTEGER",
                }),
            ),
            (
                "len",
                vec![Value::String("one".into()), Value::String("two".into())],
                Err(RuntimeError::WrongNumberOfArguments { got: 2, want: 1 }),
            ),
            // first / last return null on empty arrays, never an error
            ("first", vec![int_array(&[7, 8])], Ok(Value::Integer(7))),
            ("first", vec![Value::Array(vec![])], Ok(Value::Null)),
            (
                "first",
                vec![Value::String("abc".into())],
                Err(RuntimeError::UnsupportedArgument {
                    builtin: "first",
                    kind: "STRING",
                }),
            ),
            ("last", vec![int_array(&[7, 8])], Ok(Value::Integer(8))),
            ("last", vec![Value::Array(vec![])], Ok(Value::Null)),
            (
                "last",
                vec![Value::Boolean(true)],
                Err(RuntimeError::UnsupportedArgument {
                    builtin: "last",
                    kind: "BOOLEAN",
                }),
            ),
            // rest is all-but-first as a fresh array
            ("rest", vec![int_array(&[1, 2, 3])], Ok(int_array(&[2, 3]))),
            ("rest", vec![int_array(&[1])], Ok(Value::Array(vec![]))),
            ("rest", vec![Value::Array(vec![])], Ok(Value::Null)),
            (
                "rest",
                vec![Value::Null],
                Err(RuntimeError::UnsupportedArgument {
                    builtin: "rest",
                    kind: "NULL",
                }),
            ),
            // push appends without mutating its input
            (
                "push",
                vec![int_array(&[1, 2]), Value::Integer(3)],
                Ok(int_array(&[1, 2, 3])),
            ),
            (
                "push",
                vec![Value::Array(vec![]), Value::String("x".into())],
                Ok(Value::Array(vec![Value::String("x".into())])),
            ),
            (
                "push",
                vec![Value::Integer(1), Value::Integer(2)],
                Err(RuntimeError::UnsupportedArgument {
                    builtin: "push",
                    kind: "INTEGER",
                }),
            ),
            (
                "push",
                vec![int_array(&[1])],
                Err(RuntimeError::WrongNumberOfArguments { got: 1, want: 2 }),
            ),
            // puts accepts anything and returns null
            ("puts", vec![], Ok(Value::Null)),
            (
                "puts",
                vec![Value::String("hello".into()), Value::Integer(1)],
                Ok(Value::Null),
            ),
        ];

        for (name, args, expected) in cases {
            let rendered = format!("{name}({args:?})");
            assert_eq!(call_builtin(name, args), expected, "case: {rendered}");
        }
    }

    #[test]
    fn push_leaves_the_original_untouched() {
        let original = int_array(&[1, 2]);
        let pushed = call_builtin("push", vec![original.clone(), Value::Integer(3)])
            .expect("push succeeds");

        assert_eq!(original, int_array(&[1, 2]));
        assert_eq!(pushed, int_array(&[1, 2, 3]));
    }
}
