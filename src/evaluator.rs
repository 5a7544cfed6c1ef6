//! Environments and the evaluation engine.
//!
//! [`eval`] reduces a parsed [`Program`] to a single [`Value`] inside an
//! [`Environment`]. Evaluation is a plain depth-first recursion with two
//! non-local exits carried on the result's error channel: `return` unwinds
//! to the nearest function (or program) boundary, and a [`RuntimeError`]
//! aborts everything. Recursion depth is tracked explicitly so runaway
//! programs report `stack overflow` instead of taking the host down.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::MAX_EVAL_DEPTH;
use crate::RuntimeError;
use crate::ast::{
    BlockStatement, Expression, Identifier, InfixOperator, PrefixOperator, Program, Statement,
};
use crate::builtins;
use crate::value::{HashKey, Value};

/// Lexically scoped binding store.
///
/// An environment is a handle to a shared frame: cloning it is cheap and
/// yields the same underlying bindings. Closures hold such a handle to
/// their defining frame, which is why `let f = fn(n) { ... f(n) ... }`
/// works: the function observes the binding of `f` added to the frame
/// after the literal was evaluated.
#[derive(Clone, Default)]
pub struct Environment {
    frame: Rc<RefCell<Frame>>,
}

#[derive(Default)]
struct Frame {
    bindings: HashMap<String, Value>,
    parent: Option<Environment>,
}

impl Environment {
    /// A fresh, empty top-level environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// A child frame whose lookups fall back to `outer`. Used for every
    /// function call activation.
    pub fn new_enclosed(outer: &Environment) -> Self {
        Environment {
            frame: Rc::new(RefCell::new(Frame {
                bindings: HashMap::new(),
                parent: Some(outer.clone()),
            })),
        }
    }

    /// Look `name` up in this frame, then outward through the parent chain.
    pub fn get(&self, name: &str) -> Option<Value> {
        let frame = self.frame.borrow();
        frame
            .bindings
            .get(name)
            .cloned()
            .or_else(|| frame.parent.as_ref().and_then(|parent| parent.get(name)))
    }

    /// Bind `name` in this frame and hand the value back.
    pub fn set(&self, name: impl Into<String>, value: Value) -> Value {
        self.frame
            .borrow_mut()
            .bindings
            .insert(name.into(), value.clone());
        value
    }

    /// All bindings visible from this frame, with inner frames shadowing
    /// outer ones, sorted by name.
    pub fn bindings(&self) -> Vec<(String, Value)> {
        fn collect(env: &Environment, merged: &mut HashMap<String, Value>) {
            let frame = env.frame.borrow();
            if let Some(parent) = &frame.parent {
                collect(parent, merged);
            }
            for (name, value) in &frame.bindings {
                merged.insert(name.clone(), value.clone());
            }
        }

        let mut merged = HashMap::new();
        collect(self, &mut merged);
        let mut bindings: Vec<_> = merged.into_iter().collect();
        bindings.sort_by(|a, b| a.0.cmp(&b.0));
        bindings
    }
}

/// Two environments are equal when they are the same frame. Used by value
/// equality over functions; structural comparison would chase the cycle a
/// recursive binding creates.
impl PartialEq for Environment {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.frame, &other.frame)
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frame = self.frame.borrow();
        let mut names: Vec<&String> = frame.bindings.keys().collect();
        names.sort();
        f.debug_struct("Environment")
            .field("bindings", &names)
            .field("enclosed", &frame.parent.is_some())
            .finish()
    }
}

/// Non-local exits during evaluation.
///
/// Carried on the `Result` error channel so `?` supplies the required
/// "check after every sub-evaluation" propagation: blocks forward both
/// variants upward untouched, function application intercepts `Return`,
/// and `Error` travels all the way out of [`eval`].
enum Unwind {
    Return(Value),
    Error(RuntimeError),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Unwind::Error(error)
    }
}

type Evaluated = Result<Value, Unwind>;

/// Evaluate a program in `env` (public API).
///
/// The result is the last statement's value, the value of the first
/// top-level `return` reached, or the first runtime error produced.
pub fn eval(program: &Program, env: &Environment) -> Result<Value, RuntimeError> {
    let mut result = Value::Null;
    for statement in &program.statements {
        match eval_statement(statement, env, 0) {
            Ok(value) => result = value,
            Err(Unwind::Return(value)) => return Ok(value),
            Err(Unwind::Error(error)) => return Err(error),
        }
    }
    Ok(result)
}

fn eval_statement(statement: &Statement, env: &Environment, depth: usize) -> Evaluated {
    match statement {
        Statement::Let { name, value } => {
            let value = eval_expression(value, env, depth)?;
            env.set(name.as_str(), value);
            Ok(Value::Null)
        }
        Statement::Return { value } => {
            let value = eval_expression(value, env, depth)?;
            Err(Unwind::Return(value))
        }
        Statement::Expression { expression } => eval_expression(expression, env, depth),
    }
}

/// Evaluate a block without unwrapping `return`: the `?` in the loop
/// forwards an unwinding `return` (or error) to the enclosing block, which
/// is what lets `return` escape through nested conditionals.
fn eval_block(block: &BlockStatement, env: &Environment, depth: usize) -> Evaluated {
    let mut result = Value::Null;
    for statement in &block.statements {
        result = eval_statement(statement, env, depth)?;
    }
    Ok(result)
}

fn eval_expression(expression: &Expression, env: &Environment, depth: usize) -> Evaluated {
    if depth >= MAX_EVAL_DEPTH {
        return Err(RuntimeError::StackOverflow.into());
    }

    match expression {
        Expression::IntegerLiteral(value) => Ok(Value::Integer(*value)),
        Expression::BooleanLiteral(value) => Ok(Value::Boolean(*value)),
        Expression::StringLiteral(value) => Ok(Value::String(value.clone())),
        Expression::Identifier(identifier) => eval_identifier(identifier, env),
        Expression::ArrayLiteral(elements) => {
            let elements = eval_expressions(elements, env, depth)?;
            Ok(Value::Array(elements))
        }
        Expression::HashLiteral(pairs) => eval_hash_literal(pairs, env, depth),
        Expression::FunctionLiteral { parameters, body } => Ok(Value::Function {
            parameters: parameters.clone(),
            body: body.clone(),
            env: env.clone(),
        }),
        Expression::Prefix { operator, right } => {
            let right = eval_expression(right, env, depth + 1)?;
            Ok(eval_prefix(*operator, right)?)
        }
        Expression::Infix {
            operator,
            left,
            right,
        } => {
            let left = eval_expression(left, env, depth + 1)?;
            let right = eval_expression(right, env, depth + 1)?;
            Ok(eval_infix(*operator, left, right)?)
        }
        Expression::If {
            condition,
            consequence,
            alternative,
        } => {
            let condition = eval_expression(condition, env, depth + 1)?;
            if condition.is_truthy() {
                eval_block(consequence, env, depth + 1)
            } else if let Some(alternative) = alternative {
                eval_block(alternative, env, depth + 1)
            } else {
                Ok(Value::Null)
            }
        }
        Expression::Call {
            function,
            arguments,
        } => {
            let callee = eval_expression(function, env, depth + 1)?;
            let arguments = eval_expressions(arguments, env, depth)?;
            apply_function(callee, arguments, depth)
        }
        Expression::Index { left, index } => {
            let container = eval_expression(left, env, depth + 1)?;
            let index = eval_expression(index, env, depth + 1)?;
            Ok(eval_index(container, index)?)
        }
    }
}

fn eval_identifier(identifier: &Identifier, env: &Environment) -> Evaluated {
    if let Some(value) = env.get(identifier.as_str()) {
        return Ok(value);
    }
    if let Some(builtin) = builtins::lookup(identifier.as_str()) {
        return Ok(Value::Builtin(builtin));
    }
    Err(RuntimeError::IdentifierNotFound {
        name: identifier.as_str().to_owned(),
    }
    .into())
}

/// Evaluate expressions left to right, stopping at the first unwind.
fn eval_expressions(
    expressions: &[Expression],
    env: &Environment,
    depth: usize,
) -> Result<Vec<Value>, Unwind> {
    expressions
        .iter()
        .map(|expression| eval_expression(expression, env, depth + 1))
        .collect()
}

fn eval_hash_literal(
    pairs: &[(Expression, Expression)],
    env: &Environment,
    depth: usize,
) -> Evaluated {
    let mut entries: HashMap<HashKey, Value> = HashMap::with_capacity(pairs.len());
    for (key_expression, value_expression) in pairs {
        let key = eval_expression(key_expression, env, depth + 1)?;
        let Some(hash_key) = key.hash_key() else {
            return Err(RuntimeError::UnusableHashKey {
                kind: key.type_name(),
            }
            .into());
        };
        let value = eval_expression(value_expression, env, depth + 1)?;
        entries.insert(hash_key, value);
    }
    Ok(Value::Hash(entries))
}

fn eval_prefix(operator: PrefixOperator, right: Value) -> Result<Value, RuntimeError> {
    match operator {
        PrefixOperator::Not => Ok(Value::Boolean(!right.is_truthy())),
        PrefixOperator::Negate => match right {
            Value::Integer(value) => match value.checked_neg() {
                Some(negated) => Ok(Value::Integer(negated)),
                None => Err(RuntimeError::IntegerOverflow {
                    operation: format!("-({value})"),
                }),
            },
            other => Err(RuntimeError::UnknownPrefixOperator {
                operator,
                right: other.type_name(),
            }),
        },
    }
}

/// Infix dispatch, in contract order: integer pair, string concatenation,
/// identity equality over booleans/null, then the error rules (mismatched
/// tags before undefined operator).
fn eval_infix(operator: InfixOperator, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Integer(left), Value::Integer(right)) => {
            eval_integer_infix(operator, left, right)
        }
        (Value::String(left), Value::String(right)) if operator == InfixOperator::Add => {
            Ok(Value::String(left + &right))
        }
        (left, right) => {
            if matches!(operator, InfixOperator::Equal | InfixOperator::NotEqual)
                && let Some(equal) = identity_equality(&left, &right)
            {
                let result = if operator == InfixOperator::Equal {
                    equal
                } else {
                    !equal
                };
                return Ok(Value::Boolean(result));
            }

            if left.type_name() != right.type_name() {
                Err(RuntimeError::TypeMismatch {
                    left: left.type_name(),
                    operator,
                    right: right.type_name(),
                })
            } else {
                Err(RuntimeError::UnknownInfixOperator {
                    left: left.type_name(),
                    operator,
                    right: right.type_name(),
                })
            }
        }
    }
}

/// `==`/`!=` outside the integer fast path: booleans and null compare by
/// identity. Every other combination (strings, arrays, hashes, functions,
/// mixed types) returns `None` and falls through to the error rules.
fn identity_equality(left: &Value, right: &Value) -> Option<bool> {
    match (left, right) {
        (Value::Boolean(a), Value::Boolean(b)) => Some(a == b),
        (Value::Null, Value::Null) => Some(true),
        (Value::Boolean(_), Value::Null) | (Value::Null, Value::Boolean(_)) => Some(false),
        _ => None,
    }
}

fn eval_integer_infix(
    operator: InfixOperator,
    left: i64,
    right: i64,
) -> Result<Value, RuntimeError> {
    let overflow = || RuntimeError::IntegerOverflow {
        operation: format!("{left} {operator} {right}"),
    };

    match operator {
        InfixOperator::Add => left
            .checked_add(right)
            .map(Value::Integer)
            .ok_or_else(overflow),
        InfixOperator::Subtract => left
            .checked_sub(right)
            .map(Value::Integer)
            .ok_or_else(overflow),
        InfixOperator::Multiply => left
            .checked_mul(right)
            .map(Value::Integer)
            .ok_or_else(overflow),
        InfixOperator::Divide => {
            if right == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            // i64::MIN / -1 is the one remaining way division can overflow
            left.checked_div(right)
                .map(Value::Integer)
                .ok_or_else(overflow)
        }
        InfixOperator::LessThan => Ok(Value::Boolean(left < right)),
        InfixOperator::GreaterThan => Ok(Value::Boolean(left > right)),
        InfixOperator::Equal => Ok(Value::Boolean(left == right)),
        InfixOperator::NotEqual => Ok(Value::Boolean(left != right)),
    }
}

fn apply_function(callee: Value, arguments: Vec<Value>, depth: usize) -> Evaluated {
    match callee {
        Value::Function {
            parameters,
            body,
            env,
        } => {
            if parameters.len() != arguments.len() {
                return Err(RuntimeError::ParameterCountMismatch {
                    expected: parameters.len(),
                    got: arguments.len(),
                }
                .into());
            }

            let call_env = Environment::new_enclosed(&env);
            for (parameter, argument) in parameters.iter().zip(arguments) {
                call_env.set(parameter.as_str(), argument);
            }

            // The function boundary is where `return` stops unwinding.
            match eval_block(&body, &call_env, depth + 1) {
                Err(Unwind::Return(value)) => Ok(value),
                other => other,
            }
        }
        Value::Builtin(builtin) => {
            builtin.arity.validate(arguments.len())?;
            Ok((builtin.func)(arguments)?)
        }
        other => Err(RuntimeError::NotAFunction {
            kind: other.type_name(),
        }
        .into()),
    }
}

fn eval_index(container: Value, index: Value) -> Result<Value, RuntimeError> {
    match (container, index) {
        (Value::Array(elements), Value::Integer(index)) => {
            let element = usize::try_from(index)
                .ok()
                .and_then(|index| elements.get(index).cloned());
            // Out of range (including negative) is null, not an error
            Ok(element.unwrap_or(Value::Null))
        }
        (Value::Hash(pairs), key) => match key.hash_key() {
            Some(hash_key) => Ok(pairs.get(&hash_key).cloned().unwrap_or(Value::Null)),
            None => Err(RuntimeError::UnusableHashKey {
                kind: key.type_name(),
            }),
        },
        (other, _) => Err(RuntimeError::IndexNotSupported {
            kind: other.type_name(),
        }),
    }
}
