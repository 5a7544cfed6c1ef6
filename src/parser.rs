//! Source-text front end.
//!
//! Turns program text into the [`ast`](crate::ast) tree the evaluator
//! consumes. The grammar is statement-oriented with C-like expression
//! precedence:
//!
//! ```text
//! ==  !=          (weakest)
//! <   >
//! +   -
//! *   /
//! !x  -x          (prefix)
//! f(..)  xs[i]    (postfix, strongest)
//! ```
//!
//! Semicolons after statements are optional. Keywords (`let`, `fn`, `if`,
//! `else`, `return`, `true`, `false`) are reserved and never parse as
//! identifiers. Nesting depth is bounded by [`MAX_PARSE_DEPTH`] so hostile
//! input fails with a structured error instead of exhausting the host
//! stack.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{char, multispace0, satisfy},
    combinator::{cut, recognize, value},
    error::ErrorKind,
    multi::separated_list0,
    sequence::{pair, preceded},
};

use crate::MAX_PARSE_DEPTH;
use crate::ast::{
    BlockStatement, Expression, Identifier, InfixOperator, PrefixOperator, Program, Statement,
};
use crate::{ParseError, ParseErrorKind};

const KEYWORDS: &[&str] = &["let", "fn", "if", "else", "return", "true", "false"];

/// Parse a complete program from source text.
pub fn parse_program(input: &str) -> Result<Program, ParseError> {
    match parse_program_inner(input) {
        Ok((_, program)) => Ok(program),
        Err(error) => Err(convert_error(input, error)),
    }
}

fn parse_program_inner(input: &str) -> IResult<&str, Program> {
    let mut statements = Vec::new();
    let mut input = input;
    loop {
        let (rest, _) = multispace0(input)?;
        if rest.is_empty() {
            return Ok((rest, Program { statements }));
        }
        let (rest, statement) = parse_statement(rest, 0)?;
        statements.push(statement);
        input = rest;
    }
}

/// Convert nom's error plumbing into a structured [`ParseError`].
fn convert_error(input: &str, error: nom::Err<nom::error::Error<&str>>) -> ParseError {
    match error {
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            if e.code == ErrorKind::TooLarge {
                return ParseError::from_message(
                    ParseErrorKind::TooDeeplyNested,
                    format!("nesting exceeds the maximum depth of {MAX_PARSE_DEPTH}"),
                );
            }

            let offset = input.len().saturating_sub(e.input.len());
            if offset >= input.trim_end().len() {
                ParseError::with_context(
                    ParseErrorKind::Incomplete,
                    "unexpected end of input",
                    input,
                    offset,
                )
            } else {
                let found: String = input[offset..].chars().take(10).collect();
                ParseError::with_context(
                    ParseErrorKind::InvalidSyntax,
                    format!("invalid syntax near '{found}'"),
                    input,
                    offset,
                )
            }
        }
        nom::Err::Incomplete(_) => {
            ParseError::from_message(ParseErrorKind::Incomplete, "incomplete input")
        }
    }
}

fn depth_exceeded<T>(input: &str) -> IResult<&str, T> {
    Err(nom::Err::Failure(nom::error::Error::new(
        input,
        ErrorKind::TooLarge,
    )))
}

//
// Statements
//

fn parse_statement(input: &str, depth: usize) -> IResult<&str, Statement> {
    let (input, _) = multispace0(input)?;

    if let Ok((rest, _)) = keyword("let")(input) {
        return parse_let_tail(rest, depth);
    }
    if let Ok((rest, _)) = keyword("return")(input) {
        return parse_return_tail(rest, depth);
    }

    let (input, expression) = parse_expression(input, depth)?;
    let (input, _) = optional_semicolon(input)?;
    Ok((input, Statement::Expression { expression }))
}

fn parse_let_tail(input: &str, depth: usize) -> IResult<&str, Statement> {
    let (input, _) = multispace0(input)?;
    let (input, name) = parse_identifier(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char('=').parse(input)?;
    let (input, value) = parse_expression(input, depth)?;
    let (input, _) = optional_semicolon(input)?;
    Ok((input, Statement::Let { name, value }))
}

fn parse_return_tail(input: &str, depth: usize) -> IResult<&str, Statement> {
    let (input, value) = parse_expression(input, depth)?;
    let (input, _) = optional_semicolon(input)?;
    Ok((input, Statement::Return { value }))
}

fn optional_semicolon(input: &str) -> IResult<&str, ()> {
    let (input, _) = multispace0(input)?;
    match input.strip_prefix(';') {
        Some(rest) => Ok((rest, ())),
        None => Ok((input, ())),
    }
}

/// `{ statement* }`
fn parse_block(input: &str, depth: usize) -> IResult<&str, BlockStatement> {
    if depth >= MAX_PARSE_DEPTH {
        return depth_exceeded(input);
    }

    let (input, _) = char('{').parse(input)?;
    let mut statements = Vec::new();
    let mut input = input;
    loop {
        let (rest, _) = multispace0(input)?;
        if let Some(rest) = rest.strip_prefix('}') {
            return Ok((rest, BlockStatement { statements }));
        }
        let (rest, statement) = parse_statement(rest, depth + 1)?;
        statements.push(statement);
        input = rest;
    }
}

//
// Expressions, weakest binding first
//

fn parse_expression(input: &str, depth: usize) -> IResult<&str, Expression> {
    if depth >= MAX_PARSE_DEPTH {
        return depth_exceeded(input);
    }
    parse_equality(input, depth)
}

/// Left-associative chain of one precedence level: `operand (op operand)*`.
fn parse_infix_chain(
    input: &str,
    depth: usize,
    operand: fn(&str, usize) -> IResult<&str, Expression>,
    operator: fn(&str) -> IResult<&str, InfixOperator>,
) -> IResult<&str, Expression> {
    let (mut input, mut left) = operand(input, depth)?;
    loop {
        let Ok((rest, op)) = preceded(multispace0, operator).parse(input) else {
            return Ok((input, left));
        };
        let (rest, right) = operand(rest, depth)?;
        left = Expression::Infix {
            operator: op,
            left: Box::new(left),
            right: Box::new(right),
        };
        input = rest;
    }
}

fn parse_equality(input: &str, depth: usize) -> IResult<&str, Expression> {
    parse_infix_chain(input, depth, parse_comparison, equality_operator)
}

fn parse_comparison(input: &str, depth: usize) -> IResult<&str, Expression> {
    parse_infix_chain(input, depth, parse_additive, comparison_operator)
}

fn parse_additive(input: &str, depth: usize) -> IResult<&str, Expression> {
    parse_infix_chain(input, depth, parse_multiplicative, additive_operator)
}

fn parse_multiplicative(input: &str, depth: usize) -> IResult<&str, Expression> {
    parse_infix_chain(input, depth, parse_unary, multiplicative_operator)
}

fn equality_operator(input: &str) -> IResult<&str, InfixOperator> {
    alt((
        value(InfixOperator::Equal, tag("==")),
        value(InfixOperator::NotEqual, tag("!=")),
    ))
    .parse(input)
}

fn comparison_operator(input: &str) -> IResult<&str, InfixOperator> {
    alt((
        value(InfixOperator::LessThan, char('<')),
        value(InfixOperator::GreaterThan, char('>')),
    ))
    .parse(input)
}

fn additive_operator(input: &str) -> IResult<&str, InfixOperator> {
    alt((
        value(InfixOperator::Add, char('+')),
        value(InfixOperator::Subtract, char('-')),
    ))
    .parse(input)
}

fn multiplicative_operator(input: &str) -> IResult<&str, InfixOperator> {
    alt((
        value(InfixOperator::Multiply, char('*')),
        value(InfixOperator::Divide, char('/')),
    ))
    .parse(input)
}

fn parse_unary(input: &str, depth: usize) -> IResult<&str, Expression> {
    if depth >= MAX_PARSE_DEPTH {
        return depth_exceeded(input);
    }

    let (input, _) = multispace0(input)?;
    match prefix_operator(input) {
        Ok((rest, operator)) => {
            let (rest, right) = parse_unary(rest, depth + 1)?;
            Ok((
                rest,
                Expression::Prefix {
                    operator,
                    right: Box::new(right),
                },
            ))
        }
        Err(_) => parse_postfix(input, depth),
    }
}

fn prefix_operator(input: &str) -> IResult<&str, PrefixOperator> {
    alt((
        value(PrefixOperator::Not, char('!')),
        value(PrefixOperator::Negate, char('-')),
    ))
    .parse(input)
}

/// Calls and index accesses bind tightest and chain off any primary:
/// `newAdder(2)(3)`, `grid[0][1]`, `fn(x) { x }(5)`.
fn parse_postfix(input: &str, depth: usize) -> IResult<&str, Expression> {
    let (mut input, mut expression) = parse_primary(input, depth)?;
    loop {
        let (rest, _) = multispace0(input)?;
        match rest.chars().next() {
            Some('(') => {
                let (rest, arguments) = parse_call_arguments(rest, depth)?;
                expression = Expression::Call {
                    function: Box::new(expression),
                    arguments,
                };
                input = rest;
            }
            Some('[') => {
                let (rest, _) = char('[').parse(rest)?;
                let (rest, index) = cut(|i| parse_expression(i, depth + 1)).parse(rest)?;
                let (rest, _) = multispace0(rest)?;
                let (rest, _) = cut(char(']')).parse(rest)?;
                expression = Expression::Index {
                    left: Box::new(expression),
                    index: Box::new(index),
                };
                input = rest;
            }
            _ => return Ok((input, expression)),
        }
    }
}

fn parse_call_arguments(input: &str, depth: usize) -> IResult<&str, Vec<Expression>> {
    let (input, _) = char('(').parse(input)?;
    let (input, arguments) = separated_list0(preceded(multispace0, char(',')), |input| {
        parse_expression(input, depth + 1)
    })
    .parse(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = cut(char(')')).parse(input)?;
    Ok((input, arguments))
}

fn parse_primary(input: &str, depth: usize) -> IResult<&str, Expression> {
    let (input, _) = multispace0(input)?;
    alt((
        parse_integer,
        parse_string,
        parse_boolean,
        |input| parse_if(input, depth),
        |input| parse_function_literal(input, depth),
        |input| parse_array_literal(input, depth),
        |input| parse_hash_literal(input, depth),
        |input| parse_grouped(input, depth),
        parse_identifier_expression,
    ))
    .parse(input)
}

/// `( <expression> )` - once the parenthesis is open there is no
/// alternative reading, so errors inside commit (`cut`) instead of
/// backtracking to the primary dispatch.
fn parse_grouped(input: &str, depth: usize) -> IResult<&str, Expression> {
    let (input, _) = char('(').parse(input)?;
    let (input, expression) = cut(|i| parse_expression(i, depth + 1)).parse(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = cut(char(')')).parse(input)?;
    Ok((input, expression))
}

fn parse_integer(input: &str) -> IResult<&str, Expression> {
    let (rest, digits) = take_while(|c: char| c.is_ascii_digit()).parse(input)?;
    if digits.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            ErrorKind::Digit,
        )));
    }
    match digits.parse::<i64>() {
        Ok(number) => Ok((rest, Expression::IntegerLiteral(number))),
        // All-digit input that does not fit an i64
        Err(_) => Err(nom::Err::Error(nom::error::Error::new(
            input,
            ErrorKind::Digit,
        ))),
    }
}

/// `"..."` with `\n`, `\t`, `\r`, `\\`, and `\"` escapes. The opening quote
/// commits: a bad escape or missing close quote is a failure, not a reason
/// to try another primary form.
fn parse_string(input: &str) -> IResult<&str, Expression> {
    let (mut remaining, _) = char('"').parse(input)?;
    let mut chars = Vec::new();

    loop {
        let mut char_iter = remaining.chars();
        match char_iter.next() {
            Some('"') => {
                return Ok((
                    char_iter.as_str(),
                    Expression::StringLiteral(chars.into_iter().collect()),
                ));
            }
            Some('\\') => {
                match char_iter.next() {
                    Some('n') => chars.push('\n'),
                    Some('t') => chars.push('\t'),
                    Some('r') => chars.push('\r'),
                    Some('\\') => chars.push('\\'),
                    Some('"') => chars.push('"'),
                    // Unknown or dangling escape sequence
                    _ => {
                        return Err(nom::Err::Failure(nom::error::Error::new(
                            remaining,
                            ErrorKind::Char,
                        )));
                    }
                }
                remaining = char_iter.as_str();
            }
            Some(ch) => {
                chars.push(ch);
                remaining = char_iter.as_str();
            }
            // End of input without a closing quote
            None => {
                return Err(nom::Err::Failure(nom::error::Error::new(
                    remaining,
                    ErrorKind::Char,
                )));
            }
        }
    }
}

fn parse_boolean(input: &str) -> IResult<&str, Expression> {
    alt((
        value(Expression::BooleanLiteral(true), keyword("true")),
        value(Expression::BooleanLiteral(false), keyword("false")),
    ))
    .parse(input)
}

/// `if (<condition>) { ... }` with an optional `else { ... }`.
fn parse_if(input: &str, depth: usize) -> IResult<&str, Expression> {
    let (input, _) = keyword("if")(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = cut(char('(')).parse(input)?;
    let (input, condition) = cut(|i| parse_expression(i, depth + 1)).parse(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = cut(char(')')).parse(input)?;
    let (input, _) = multispace0(input)?;
    let (input, consequence) = cut(|i| parse_block(i, depth)).parse(input)?;

    let (input, alternative) = {
        let checkpoint = input;
        let (rest, _) = multispace0(input)?;
        match keyword("else")(rest) {
            Ok((rest, _)) => {
                let (rest, _) = multispace0(rest)?;
                let (rest, block) = cut(|i| parse_block(i, depth)).parse(rest)?;
                (rest, Some(block))
            }
            Err(_) => (checkpoint, None),
        }
    };

    Ok((
        input,
        Expression::If {
            condition: Box::new(condition),
            consequence,
            alternative,
        },
    ))
}

/// `fn(<params>) { ... }`
fn parse_function_literal(input: &str, depth: usize) -> IResult<&str, Expression> {
    let (input, _) = keyword("fn")(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = cut(char('(')).parse(input)?;
    let (input, parameters) = separated_list0(
        preceded(multispace0, char(',')),
        preceded(multispace0, parse_identifier),
    )
    .parse(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = cut(char(')')).parse(input)?;
    let (input, _) = multispace0(input)?;
    let (input, body) = cut(|i| parse_block(i, depth)).parse(input)?;
    Ok((input, Expression::FunctionLiteral { parameters, body }))
}

fn parse_array_literal(input: &str, depth: usize) -> IResult<&str, Expression> {
    let (input, _) = char('[').parse(input)?;
    let (input, elements) = separated_list0(preceded(multispace0, char(',')), |input| {
        parse_expression(input, depth + 1)
    })
    .parse(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = cut(char(']')).parse(input)?;
    Ok((input, Expression::ArrayLiteral(elements)))
}

fn parse_hash_literal(input: &str, depth: usize) -> IResult<&str, Expression> {
    let (input, _) = char('{').parse(input)?;
    let (input, pairs) = separated_list0(preceded(multispace0, char(',')), |input| {
        parse_hash_pair(input, depth)
    })
    .parse(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = cut(char('}')).parse(input)?;
    Ok((input, Expression::HashLiteral(pairs)))
}

fn parse_hash_pair(input: &str, depth: usize) -> IResult<&str, (Expression, Expression)> {
    let (input, key) = parse_expression(input, depth + 1)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char(':').parse(input)?;
    let (input, value) = parse_expression(input, depth + 1)?;
    Ok((input, (key, value)))
}

fn parse_identifier_expression(input: &str) -> IResult<&str, Expression> {
    let (rest, identifier) = parse_identifier(input)?;
    Ok((rest, Expression::Identifier(identifier)))
}

fn parse_identifier(input: &str) -> IResult<&str, Identifier> {
    let (rest, name) = identifier_name(input)?;
    if KEYWORDS.contains(&name) {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            ErrorKind::Tag,
        )));
    }
    Ok((rest, Identifier(name.to_owned())))
}

fn identifier_name(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(is_identifier_start),
        take_while(is_identifier_char),
    ))
    .parse(input)
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Match a reserved word, rejecting it when more identifier characters
/// follow (`lettuce` is an identifier, not `let` + `tuce`).
fn keyword<'a>(word: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    move |input: &'a str| {
        let (rest, matched) = tag(word).parse(input)?;
        if rest.chars().next().is_some_and(is_identifier_char) {
            Err(nom::Err::Error(nom::error::Error::new(
                input,
                ErrorKind::Tag,
            )))
        } else {
            Ok((rest, matched))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Program {
        parse_program(input)
            .unwrap_or_else(|error| panic!("unexpected parse error for '{input}': {error}"))
    }

    /// Parse and re-render: the AST `Display` impls make precedence and
    /// associativity visible through explicit grouping.
    fn canonical(input: &str) -> String {
        parse(input).to_string()
    }

    #[test]
    fn operator_precedence_canonicalization() {
        let cases = vec![
            ("-a * b", "((-a) * b)"),
            ("!-a", "(!(-a))"),
            ("a + b + c", "((a + b) + c)"),
            ("a + b - c", "((a + b) - c)"),
            ("a * b * c", "((a * b) * c)"),
            ("a * b / c", "((a * b) / c)"),
            ("a + b / c", "(a + (b / c))"),
            ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
            ("3 + 4; -5 * 5", "(3 + 4)((-5) * 5)"),
            ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
            ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
            (
                "3 + 4 * 5 == 3 * 1 + 4 * 5",
                "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
            ),
            ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
            ("(5 + 5) * 2", "((5 + 5) * 2)"),
            ("2 / (5 + 5)", "(2 / (5 + 5))"),
            ("-(5 + 5)", "(-(5 + 5))"),
            ("!(true == true)", "(!(true == true))"),
            ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
            (
                "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
                "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
            ),
            (
                "add(a + b + c * d / f + g)",
                "add((((a + b) + ((c * d) / f)) + g))",
            ),
            (
                "a * [1, 2, 3, 4][b * c] * d",
                "((a * ([1, 2, 3, 4][(b * c)])) * d)",
            ),
            (
                "add(a * b[2], b[1], 2 * [1, 2][1])",
                "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))",
            ),
        ];

        for (input, expected) in cases {
            assert_eq!(canonical(input), expected, "input: '{input}'");
        }
    }

    #[test]
    fn let_statements_bind_name_and_value() {
        let cases = vec![
            ("let x = 5;", "x", Expression::IntegerLiteral(5)),
            ("let y = true;", "y", Expression::BooleanLiteral(true)),
            (
                "let foobar = y",
                "foobar",
                Expression::Identifier(Identifier("y".into())),
            ),
        ];

        for (input, expected_name, expected_value) in cases {
            let program = parse(input);
            assert_eq!(program.statements.len(), 1, "input: '{input}'");
            match &program.statements[0] {
                Statement::Let { name, value } => {
                    assert_eq!(name.as_str(), expected_name);
                    assert_eq!(value, &expected_value);
                }
                other => panic!("expected let statement, got {other:?}"),
            }
        }
    }

    #[test]
    fn return_statements() {
        let program = parse("return 5; return 2 * 3;");
        assert_eq!(program.to_string(), "return 5;return (2 * 3);");
    }

    #[test]
    fn literal_expressions() {
        let cases = vec![
            ("5", Expression::IntegerLiteral(5)),
            ("9223372036854775807", Expression::IntegerLiteral(i64::MAX)),
            ("true", Expression::BooleanLiteral(true)),
            ("false", Expression::BooleanLiteral(false)),
            (
                "\"hello world\"",
                Expression::StringLiteral("hello world".into()),
            ),
            ("\"\"", Expression::StringLiteral(String::new())),
            (
                "\"tab\\tnewline\\nquote\\\"\"",
                Expression::StringLiteral("tab\tnewline\nquote\"".into()),
            ),
            (
                "foobar",
                Expression::Identifier(Identifier("foobar".into())),
            ),
            (
                "lettuce",
                Expression::Identifier(Identifier("lettuce".into())),
            ),
            ("[]", Expression::ArrayLiteral(vec![])),
            ("{}", Expression::HashLiteral(vec![])),
        ];

        for (input, expected) in cases {
            let program = parse(input);
            match &program.statements[..] {
                [Statement::Expression { expression }] => {
                    assert_eq!(expression, &expected, "input: '{input}'");
                }
                other => panic!("expected one expression statement, got {other:?}"),
            }
        }
    }

    #[test]
    fn if_expressions_with_and_without_else() {
        assert_eq!(canonical("if (x < y) { x }"), "if(x < y) x");
        assert_eq!(
            canonical("if (x < y) { x } else { y }"),
            "if(x < y) xelse y"
        );
    }

    #[test]
    fn function_literals_and_calls() {
        assert_eq!(canonical("fn(x, y) { x + y; }"), "fn(x, y) (x + y)");
        assert_eq!(canonical("fn() { 1 }"), "fn() 1");
        assert_eq!(canonical("fn(x) { x }(5)"), "fn(x) x(5)");
        assert_eq!(canonical("newAdder(2)(3)"), "newAdder(2)(3)");
    }

    #[test]
    fn hash_literals_keep_source_order() {
        let program = parse("{\"one\": 1, two: 2 * 2, 3: three}");
        assert_eq!(program.to_string(), "{one: 1, two: (2 * 2), 3: three}");
    }

    #[test]
    fn whitespace_and_semicolons_are_flexible() {
        let spread = "let add = fn(x, y) {\n    x + y\n};\nadd(1,\n    2)";
        let compact = "let add=fn(x,y){x+y};add(1,2)";

        assert_eq!(parse(spread), parse(compact));
    }

    #[test]
    fn parse_failures_are_structured() {
        let cases = vec![
            ("let 5 = 3;", ParseErrorKind::InvalidSyntax),
            ("5 @ 3", ParseErrorKind::InvalidSyntax),
            ("let let = 1;", ParseErrorKind::InvalidSyntax),
            ("[1 2]", ParseErrorKind::InvalidSyntax),
            ("(1 + 2", ParseErrorKind::Incomplete),
            ("\"unterminated", ParseErrorKind::Incomplete),
            ("fn(x) { x", ParseErrorKind::Incomplete),
            ("if (x", ParseErrorKind::Incomplete),
        ];

        for (input, expected_kind) in cases {
            let error =
                parse_program(input).expect_err(&format!("expected parse failure for '{input}'"));
            assert_eq!(error.kind, expected_kind, "input: '{input}'");
        }
    }

    #[test]
    fn nesting_depth_is_bounded() {
        let deep = format!("{}1{}", "(".repeat(300), ")".repeat(300));
        let error = parse_program(&deep).expect_err("expected depth failure");
        assert_eq!(error.kind, ParseErrorKind::TooDeeplyNested);

        let shallow = format!("{}1{}", "(".repeat(20), ")".repeat(20));
        assert!(parse_program(&shallow).is_ok());
    }

    #[test]
    fn integer_literals_that_overflow_are_rejected() {
        assert!(parse_program("9223372036854775808").is_err());
    }
}
