//! Abstract syntax tree consumed by the evaluator.
//!
//! The tree is produced by the `parser` module (or built programmatically by
//! an embedding host) and holds no source positions; every node type is a
//! closed enum so the evaluator can match exhaustively. `Display` renders
//! canonical source text, which is also what `Value::Function` uses to show
//! a function's parameters and body.

use std::fmt;

/// A complete parsed program: the root node handed to the evaluator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

/// A binding or expression name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier(pub String);

impl Identifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `let <name> = <value>;`
    Let { name: Identifier, value: Expression },
    /// `return <value>;`
    Return { value: Expression },
    /// A bare expression in statement position.
    Expression { expression: Expression },
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let { name, value } => write!(f, "let {name} = {value};"),
            Statement::Return { value } => write!(f, "return {value};"),
            Statement::Expression { expression } => write!(f, "{expression}"),
        }
    }
}

/// A brace-delimited statement sequence: the body of `if` arms and functions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOperator {
    /// `!` - logical negation over truthiness
    Not,
    /// `-` - integer negation
    Negate,
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PrefixOperator::Not => "!",
            PrefixOperator::Negate => "-",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    LessThan,
    GreaterThan,
    Equal,
    NotEqual,
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InfixOperator::Add => "+",
            InfixOperator::Subtract => "-",
            InfixOperator::Multiply => "*",
            InfixOperator::Divide => "/",
            InfixOperator::LessThan => "<",
            InfixOperator::GreaterThan => ">",
            InfixOperator::Equal => "==",
            InfixOperator::NotEqual => "!=",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    IntegerLiteral(i64),
    BooleanLiteral(bool),
    StringLiteral(String),
    /// `[e1, e2, ...]`
    ArrayLiteral(Vec<Expression>),
    /// `{k1: v1, k2: v2, ...}` - pairs kept in source order
    HashLiteral(Vec<(Expression, Expression)>),
    /// `fn(p1, p2) { ... }`
    FunctionLiteral {
        parameters: Vec<Identifier>,
        body: BlockStatement,
    },
    Prefix {
        operator: PrefixOperator,
        right: Box<Expression>,
    },
    Infix {
        operator: InfixOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    If {
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    Call {
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
    Index {
        left: Box<Expression>,
        index: Box<Expression>,
    },
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(identifier) => write!(f, "{identifier}"),
            Expression::IntegerLiteral(value) => write!(f, "{value}"),
            Expression::BooleanLiteral(value) => write!(f, "{value}"),
            Expression::StringLiteral(value) => write!(f, "{value}"),
            Expression::ArrayLiteral(elements) => {
                write!(f, "[{}]", join(elements))
            }
            Expression::HashLiteral(pairs) => {
                let rendered: Vec<String> = pairs
                    .iter()
                    .map(|(key, value)| format!("{key}: {value}"))
                    .collect();
                write!(f, "{{{}}}", rendered.join(", "))
            }
            Expression::FunctionLiteral { parameters, body } => {
                write!(f, "fn({}) {body}", join(parameters))
            }
            Expression::Prefix { operator, right } => write!(f, "({operator}{right})"),
            Expression::Infix {
                operator,
                left,
                right,
            } => write!(f, "({left} {operator} {right})"),
            Expression::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if{condition} {consequence}")?;
                if let Some(alternative) = alternative {
                    write!(f, "else {alternative}")?;
                }
                Ok(())
            }
            Expression::Call {
                function,
                arguments,
            } => write!(f, "{function}({})", join(arguments)),
            Expression::Index { left, index } => write!(f, "({left}[{index}])"),
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

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Identifier {
        Identifier(name.to_owned())
    }

    #[test]
    fn statements_render_as_source() {
        let program = Program {
            statements: vec![Statement::Let {
                name: ident("myVar"),
                value: Expression::Identifier(ident("anotherVar")),
            }],
        };

        assert_eq!(program.to_string(), "let myVar = anotherVar;");
    }

    #[test]
    fn expressions_render_with_explicit_grouping() {
        let cases = vec![
            (
                Expression::Infix {
                    operator: InfixOperator::Add,
                    left: Box::new(Expression::Identifier(ident("x"))),
                    right: Box::new(Expression::IntegerLiteral(2)),
                },
                "(x + 2)",
            ),
            (
                Expression::Prefix {
                    operator: PrefixOperator::Negate,
                    right: Box::new(Expression::IntegerLiteral(5)),
                },
                "(-5)",
            ),
            (
                Expression::Index {
                    left: Box::new(Expression::Identifier(ident("xs"))),
                    index: Box::new(Expression::IntegerLiteral(0)),
                },
                "(xs[0])",
            ),
            (
                Expression::Call {
                    function: Box::new(Expression::Identifier(ident("add"))),
                    arguments: vec![
                        Expression::IntegerLiteral(1),
                        Expression::IntegerLiteral(2),
                    ],
                },
                "add(1, 2)",
            ),
            (
                Expression::ArrayLiteral(vec![
                    Expression::IntegerLiteral(1),
                    Expression::StringLiteral("two".into()),
                ]),
                "[1, two]",
            ),
        ];

        for (expression, expected) in cases {
            assert_eq!(expression.to_string(), expected);
        }
    }

    #[test]
    fn function_literal_renders_parameters_and_body() {
        let function = Expression::FunctionLiteral {
            parameters: vec![ident("x")],
            body: BlockStatement {
                statements: vec![Statement::Expression {
                    expression: Expression::Infix {
                        operator: InfixOperator::Add,
                        left: Box::new(Expression::Identifier(ident("x"))),
                        right: Box::new(Expression::IntegerLiteral(2)),
                    },
                }],
            },
        };

        assert_eq!(function.to_string(), "fn(x) (x + 2)");
    }
}
