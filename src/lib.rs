//! ScriptXP - tree-walking evaluator for a small scripting language
//!
//! This crate implements the runtime of a dynamically-typed scripting
//! language with integers, booleans, strings, arrays, hashes, and
//! first-class functions with lexical closures. Programs are reduced by a
//! recursive evaluator over an abstract syntax tree; a source-text front
//! end is available behind the `parser` feature (enabled by default).
//!
//! ```text
//! let newAdder = fn(x) { fn(y) { x + y } };
//! let addTwo = newAdder(2);
//! addTwo(3);                      // => 5
//!
//! let colors = push(["red", "green"], "blue");
//! len(colors);                    // => 3
//!
//! {"one": 1, "two": 2}["one"]     // => 1
//! ```
//!
//! ## Evaluation model
//!
//! The evaluator walks the tree depth-first and reduces every node to a
//! [`value::Value`]. Two kinds of non-local control flow are threaded
//! through the result channel: a `return` statement unwinds to the nearest
//! function (or program) boundary, and a runtime failure aborts the whole
//! evaluation with a [`RuntimeError`]. Errors are never caught inside the
//! language; the first failure produced, left-to-right and depth-first, is
//! the one reported.
//!
//! ## Strictness
//!
//! Operations never coerce between types:
//! - `5 + true` is `type mismatch: INTEGER + BOOLEAN`, not a number
//! - `"a" == "a"` is `unknown operator: STRING == STRING`, not a boolean
//! - arithmetic overflow and division by zero are reported, not wrapped
//!
//! ## Usage
//!
//! ```
//! use scriptxp::evaluator::{self, Environment};
//! use scriptxp::parser::parse_program;
//! use scriptxp::value::Value;
//!
//! let program = parse_program("let double = fn(x) { x * 2 }; double(21)")
//!     .expect("program parses");
//! let env = Environment::new();
//! assert_eq!(evaluator::eval(&program, &env), Ok(Value::Integer(42)));
//! ```
//!
//! ## Modules
//!
//! - `ast`: tree node types consumed by the evaluator
//! - `value`: the runtime value universe
//! - `builtins`: host-implemented functions (`len`, `push`, `puts`, ...)
//! - `evaluator`: environments and the evaluation engine
//! - `parser`: source text to AST (feature `parser`)

use std::fmt;

use crate::ast::{InfixOperator, PrefixOperator};

/// Maximum parsing depth for nested expressions and blocks.
/// Bounds parser recursion so hostile input cannot exhaust the host stack.
pub const MAX_PARSE_DEPTH: usize = 128;

/// Maximum evaluation depth for nested expressions and function calls.
/// Exceeding it surfaces a `stack overflow` runtime error instead of
/// aborting the host process. Set well above the parse limit so recursive
/// user functions have room to run.
pub const MAX_EVAL_DEPTH: usize = 512;

/// Categorizes the different kinds of parsing errors.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ParseErrorKind {
    /// Invalid or unexpected syntax (bad tokens, malformed expressions)
    InvalidSyntax,
    /// Input ended before the statement or expression was complete
    Incomplete,
    /// Nesting exceeded the maximum parse depth
    TooDeeplyNested,
}

/// A structured error describing a parsing failure.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    /// Snippet of the input around the failure point (max 80 chars)
    pub context: Option<String>,
}

impl ParseError {
    /// Create a ParseError with a kind and message but no context
    pub fn from_message(kind: ParseErrorKind, message: impl Into<String>) -> Self {
        ParseError {
            kind,
            message: message.into(),
            context: None,
        }
    }

    /// Create a ParseError with context extracted from the input at a given offset
    pub fn with_context(
        kind: ParseErrorKind,
        message: impl Into<String>,
        input: &str,
        error_offset: usize,
    ) -> Self {
        const MAX_CONTEXT: usize = 80;

        let context_start = error_offset.saturating_sub(20);
        let snippet: String = input.chars().skip(context_start).take(MAX_CONTEXT).collect();

        let mut context = String::new();
        if context_start > 0 {
            context.push_str("[...]");
        }
        context.push_str(&snippet);
        if context_start + snippet.len() < input.len() {
            context.push_str("[...]");
        }
        let context = context.replace('\n', "\\n").replace('\r', "");

        ParseError {
            kind,
            message: message.into(),
            context: Some(context),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(context) = &self.context {
            write!(f, "\n  near: {context}")?;
        }
        Ok(())
    }
}

/// A failure raised while evaluating a program.
///
/// The `Display` renderings are part of the language contract: embedding
/// hosts and tests match on them verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Infix operands of different types, e.g. `5 + true`
    TypeMismatch {
        left: &'static str,
        operator: InfixOperator,
        right: &'static str,
    },
    /// Prefix operator applied to an unsupported operand, e.g. `-true`
    UnknownPrefixOperator {
        operator: PrefixOperator,
        right: &'static str,
    },
    /// Infix operator undefined for same-typed operands, e.g. `"a" - "b"`
    UnknownInfixOperator {
        left: &'static str,
        operator: InfixOperator,
        right: &'static str,
    },
    /// Name bound neither in the environment chain nor the builtin registry
    IdentifierNotFound { name: String },
    /// Call target is not a function or builtin
    NotAFunction { kind: &'static str },
    /// Builtin invoked with the wrong number of arguments
    WrongNumberOfArguments { got: usize, want: usize },
    /// User function invoked with the wrong number of arguments
    ParameterCountMismatch { expected: usize, got: usize },
    /// Builtin invoked with an argument type it does not accept
    UnsupportedArgument {
        builtin: &'static str,
        kind: &'static str,
    },
    /// Hash key of a type that is not Integer, Boolean, or String
    UnusableHashKey { kind: &'static str },
    /// Index applied to a value that does not support it
    IndexNotSupported { kind: &'static str },
    /// Integer division by zero
    DivisionByZero,
    /// Checked arithmetic overflowed; `operation` renders the offending op
    IntegerOverflow { operation: String },
    /// Evaluation depth exceeded `MAX_EVAL_DEPTH`
    StackOverflow,
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::TypeMismatch {
                left,
                operator,
                right,
            } => {
                write!(f, "type mismatch: {left} {operator} {right}")
            }
            RuntimeError::UnknownPrefixOperator { operator, right } => {
                write!(f, "unknown operator: {operator}{right}")
            }
            RuntimeError::UnknownInfixOperator {
                left,
                operator,
                right,
            } => {
                write!(f, "unknown operator: {left} {operator} {right}")
            }
            RuntimeError::IdentifierNotFound { name } => {
                write!(f, "identifier not found: {name}")
            }
            RuntimeError::NotAFunction { kind } => write!(f, "not a function: {kind}"),
            RuntimeError::WrongNumberOfArguments { got, want } => {
                write!(f, "wrong number of arguments. got={got}, want={want}")
            }
            RuntimeError::ParameterCountMismatch { expected, got } => {
                write!(f, "wrong number of arguments: expected {expected}, got {got}")
            }
            RuntimeError::UnsupportedArgument { builtin, kind } => {
                write!(f, "argument to `{builtin}` not supported, got {kind}")
            }
            RuntimeError::UnusableHashKey { kind } => {
                write!(f, "unusable as hash key: {kind}")
            }
            RuntimeError::IndexNotSupported { kind } => {
                write!(f, "index operator not supported: {kind}")
            }
            RuntimeError::DivisionByZero => write!(f, "divide by zero"),
            RuntimeError::IntegerOverflow { operation } => {
                write!(f, "integer overflow: {operation}")
            }
            RuntimeError::StackOverflow => write!(f, "stack overflow"),
        }
    }
}

impl std::error::Error for RuntimeError {}

/// Any failure the crate can produce, for hosts that drive parsing and
/// evaluation through one channel.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Parse(ParseError),
    Runtime(RuntimeError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(e) => write!(f, "parse error: {e}"),
            Error::Runtime(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<ParseError> for Error {
    fn from(error: ParseError) -> Self {
        Error::Parse(error)
    }
}

impl From<RuntimeError> for Error {
    fn from(error: RuntimeError) -> Self {
        Error::Runtime(error)
    }
}

pub mod ast;
pub mod builtins;
pub mod evaluator;
pub mod value;

#[cfg(feature = "parser")]
pub mod parser;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_error_messages_are_exact() {
        let cases = vec![
            (
                RuntimeError::TypeMismatch {
                    left: "INTEGER",
                    operator: InfixOperator::Add,
                    right: "BOOLEAN",
                },
                "type mismatch: INTEGER + BOOLEAN",
            ),
            (
                RuntimeError::UnknownPrefixOperator {
                    operator: PrefixOperator::Negate,
                    right: "BOOLEAN",
                },
                "unknown operator: -BOOLEAN",
            ),
            (
                RuntimeError::UnknownInfixOperator {
                    left: "STRING",
                    operator: InfixOperator::Subtract,
                    right: "STRING",
                },
                "unknown operator: STRING - STRING",
            ),
            (
                RuntimeError::IdentifierNotFound {
                    name: "foobar".into(),
                },
                "identifier not found: foobar",
            ),
            (
                RuntimeError::NotAFunction { kind: "INTEGER" },
                "not a function: INTEGER",
            ),
            (
                RuntimeError::WrongNumberOfArguments { got: 2, want: 1 },
                "wrong number of arguments. got=2, want=1",
            ),
            (
                RuntimeError::ParameterCountMismatch { expected: 2, got: 3 },
                "wrong number of arguments: expected 2, got 3",
            ),
            (
                RuntimeError::UnsupportedArgument {
                    builtin: "len",
                    kind: "INTEGER",
                },
                "argument to `len` not supported, got INTEGER",
            ),
            (
                RuntimeError::UnusableHashKey { kind: "FUNCTION" },
                "unusable as hash key: FUNCTION",
            ),
            (
                RuntimeError::IndexNotSupported { kind: "INTEGER" },
                "index operator not supported: INTEGER",
            ),
            (RuntimeError::DivisionByZero, "divide by zero"),
            (
                RuntimeError::IntegerOverflow {
                    operation: "9223372036854775807 + 1".into(),
                },
                "integer overflow: 9223372036854775807 + 1",
            ),
            (RuntimeError::StackOverflow, "stack overflow"),
        ];

        for (error, expected) in cases {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn parse_error_context_is_bounded_and_marked() {
        let input = "x".repeat(200);
        let error = ParseError::with_context(
            ParseErrorKind::InvalidSyntax,
            "invalid syntax",
            &input,
            150,
        );

        let context = error.context.expect("context present");
        assert!(context.starts_with("[...]"));
        assert!(context.ends_with("[...]") || context.len() <= 80 + 2 * "[...]".len());
    }
}
