use std::iter::Peekable;

use crate::{
    ast::{Node, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            binary::parse_power,
            core::{ParseResult, parse_expression},
            utils::{
                exhausted, expect, nest, parse_comma_separated, peek, peek_kind, unexpected,
            },
        },
        value::core::Value,
    },
    util::num::parse_decimal,
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-` (numeric negation)
/// - `not` and `!` (logical not)
/// - `++` and `--` (pre-increment and pre-decrement)
///
/// Prefix operators are right-associative, so `not -x` is parsed as
/// `not (-x)`, and every prefix operator opens one nesting level. Without a
/// prefix operator the function delegates to [`parse_postfix`].
///
/// Grammar:
/// ```text
///     unary := ("-" | "not" | "!" | "++" | "--") unary
///            | postfix
/// ```
pub fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let Some(token) = peek(tokens) else {
        return Err(exhausted("an expression"));
    };

    let op = match token.kind {
        TokenKind::Minus => UnaryOperator::Negate,
        TokenKind::Not => UnaryOperator::Not,
        TokenKind::PlusPlus => UnaryOperator::PreIncrement,
        TokenKind::MinusMinus => UnaryOperator::PreDecrement,
        _ => return parse_postfix(tokens),
    };

    tokens.next();
    let _level = nest(tokens)?;
    let operand = parse_unary(tokens)?;

    Ok(Node::UnaryOp { op,
                       operand: Box::new(operand),
                       line: token.line })
}

/// Parses postfix increment and decrement.
///
/// Grammar: `postfix := power ("++" | "--")*`
pub fn parse_postfix<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut node = parse_power(tokens)?;

    while let Some(token) = peek(tokens) {
        let op = match token.kind {
            TokenKind::PlusPlus => UnaryOperator::PostIncrement,
            TokenKind::MinusMinus => UnaryOperator::PostDecrement,
            _ => break,
        };

        tokens.next();
        node = Node::UnaryOp { op,
                               operand: Box::new(node),
                               line: token.line };
    }

    Ok(node)
}

/// Parses a function call or a primary expression.
///
/// An identifier directly followed by `(` starts a call whose arguments are
/// comma-separated expressions.
///
/// Grammar: `call := identifier "(" (expression ("," expression)*)? ")" |
/// primary`
pub fn parse_call_or_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let primary = parse_primary(tokens)?;

    if matches!(primary, Node::Identifier { .. }) && peek_kind(tokens) == TokenKind::LParen {
        tokens.next();
        let line = primary.line();
        let arguments = parse_comma_separated(tokens, parse_expression, TokenKind::RParen, "')'")?;

        return Ok(Node::Call { callee: Box::new(primary),
                               arguments,
                               line });
    }

    Ok(primary)
}

/// Parses a primary expression.
///
/// Primary expressions are the atoms of the grammar:
/// - number, string and boolean literals
/// - identifiers
/// - parenthesized expressions
/// - conditional expressions `if (cond) expr else expr`
///
/// # Errors
/// - [`ParseError::InvalidNumber`] for malformed numbers such as `1.2.3`.
/// - [`ParseError::InvalidCharacter`] for characters the lexer did not know.
/// - [`ParseError::UnexpectedToken`] or
///   [`ParseError::UnexpectedEndOfInput`] when no expression starts here.
pub fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let Some(token) = peek(tokens) else {
        return Err(exhausted("an expression"));
    };
    let line = token.line;

    let value = match token.kind {
        TokenKind::Number => {
            let number =
                parse_decimal(&token.text).ok_or_else(|| ParseError::InvalidNumber { text:   token.text.clone(),
                                                                                     line,
                                                                                     column: token.column, })?;
            Value::Number(number)
        },
        TokenKind::String => Value::String(token.text.clone()),
        TokenKind::True => Value::Boolean(true),
        TokenKind::False => Value::Boolean(false),
        TokenKind::Identifier => {
            tokens.next();
            return Ok(Node::Identifier { name: token.text.clone(),
                                         line });
        },
        TokenKind::LParen => {
            tokens.next();
            let inner = parse_expression(tokens)?;
            expect(tokens, TokenKind::RParen, "')'")?;
            return Ok(inner);
        },
        TokenKind::If => {
            tokens.next();
            return parse_if_expression(tokens, line);
        },
        _ => return Err(unexpected(token, "an expression")),
    };

    tokens.next();
    Ok(Node::Literal { value, line })
}

/// Parses a conditional expression after its `if` keyword.
///
/// Unlike the `if` statement, the expression form requires an `else` branch
/// and both branches are expressions. Branches may themselves be
/// conditional expressions.
///
/// Grammar: `if_expr := "if" "(" expression ")" expression "else"
/// expression`
pub fn parse_if_expression<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    expect(tokens, TokenKind::LParen, "'(' after 'if'")?;
    let condition = parse_expression(tokens)?;
    expect(tokens, TokenKind::RParen, "')' after the condition")?;

    let then_branch = parse_expression(tokens)?;
    expect(tokens, TokenKind::Else, "'else' in conditional expression")?;
    let else_branch = parse_expression(tokens)?;

    Ok(Node::If { condition: Box::new(condition),
                  then_branch: Box::new(then_branch),
                  else_branch: Some(Box::new(else_branch)),
                  line })
}
