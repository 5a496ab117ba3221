use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Node},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, parse_expression},
            unary::{parse_call_or_primary, parse_unary},
            utils::{nest, peek},
        },
    },
};

/// Parses assignment expressions.
///
/// Assignment is right-associative, so `a = b = 1` assigns `1` to both. The
/// target must be a plain identifier. Each chained assignment opens one
/// nesting level.
///
/// The rule is: `assignment := logical_or (("=" | "+=" | "-=" | "*=" | "/=")
/// assignment)?`
///
/// # Errors
/// [`ParseError::InvalidAssignmentTarget`] when the left side is not an
/// identifier, positioned at the assignment operator.
pub fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let left = parse_logical_or(tokens)?;

    if let Some(token) = peek(tokens)
       && let Some(op) = token_to_binary_operator(token.kind)
       && op.is_assignment()
    {
        tokens.next();

        if !matches!(left, Node::Identifier { .. }) {
            return Err(ParseError::InvalidAssignmentTarget { line:   token.line,
                                                             column: token.column, });
        }

        let right = parse_expression(tokens)?;
        return Ok(Node::BinaryOp { left: Box::new(left),
                                   op,
                                   right: Box::new(right),
                                   line: token.line });
    }

    Ok(left)
}

/// Parses a left-associative chain of binary operators at one precedence
/// level.
///
/// `accepts` selects the operators of this level, `next` parses the operands
/// at the next higher level.
fn parse_left_assoc<'a, I>(tokens: &mut Peekable<I>,
                           accepts: fn(BinaryOperator) -> bool,
                           next: fn(&mut Peekable<I>) -> ParseResult<Node>)
                           -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut left = next(tokens)?;
    loop {
        if let Some(token) = peek(tokens)
           && let Some(op) = token_to_binary_operator(token.kind)
           && accepts(op)
        {
            tokens.next();
            let right = next(tokens)?;
            left = Node::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    line: token.line };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses logical OR expressions.
///
/// The rule is: `logical_or := logical_and ("or" logical_and)*`
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_left_assoc(tokens, |op| op == BinaryOperator::Or, parse_logical_and)
}

/// Parses logical AND expressions.
///
/// The rule is: `logical_and := equality ("and" equality)*`
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_left_assoc(tokens, |op| op == BinaryOperator::And, parse_equality)
}

/// Parses `==` and `!=`.
///
/// The rule is: `equality := relational (("==" | "!=") relational)*`
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_left_assoc(tokens,
                     |op| matches!(op, BinaryOperator::Equal | BinaryOperator::NotEqual),
                     parse_relational)
}

/// Parses ordering comparisons.
///
/// The rule is: `relational := additive (("<" | ">" | "<=" | ">=")
/// additive)*`
pub fn parse_relational<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_left_assoc(tokens,
                     |op| {
                         matches!(op,
                                  BinaryOperator::Less
                                  | BinaryOperator::Greater
                                  | BinaryOperator::LessEqual
                                  | BinaryOperator::GreaterEqual)
                     },
                     parse_additive)
}

/// Parses addition and subtraction expressions.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_left_assoc(tokens,
                     |op| matches!(op, BinaryOperator::Add | BinaryOperator::Subtract),
                     parse_multiplicative)
}

/// Parses multiplication-level expressions.
///
/// The rule is: `multiplicative := unary (("*" | "/" | "mod" | "div")
/// unary)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_left_assoc(tokens,
                     |op| {
                         matches!(op,
                                  BinaryOperator::Multiply
                                  | BinaryOperator::Divide
                                  | BinaryOperator::Modulo
                                  | BinaryOperator::IntDivide)
                     },
                     parse_unary)
}

/// Parses exponentiation expressions.
///
/// Exponentiation is right-associative: `a ** b ** c` parses as
/// `a ** (b ** c)`. The exponent is a full unary expression, so `2 ** -1`
/// works, while a minus in front of the base applies to the whole power:
/// `-2 ** 2` is `-(2 ** 2)`.
///
/// The rule is: `power := call (("**" | "^") unary)?`
pub fn parse_power<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let base = parse_call_or_primary(tokens)?;

    if let Some(token) = peek(tokens)
       && matches!(token.kind, TokenKind::StarStar | TokenKind::Caret)
    {
        tokens.next();
        let _level = nest(tokens)?;
        let exponent = parse_unary(tokens)?;
        return Ok(Node::BinaryOp { left:  Box::new(base),
                                   op:    BinaryOperator::Power,
                                   right: Box::new(exponent),
                                   line:  token.line, });
    }

    Ok(base)
}

/// Converts a token kind into its corresponding binary operator.
///
/// # Example
/// ```
/// use gloss::{
///     ast::BinaryOperator,
///     interpreter::{lexer::TokenKind, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(TokenKind::Div), Some(BinaryOperator::IntDivide));
/// assert_eq!(token_to_binary_operator(TokenKind::Comma), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Subtract),
        TokenKind::Star => Some(BinaryOperator::Multiply),
        TokenKind::Slash => Some(BinaryOperator::Divide),
        TokenKind::Mod => Some(BinaryOperator::Modulo),
        TokenKind::Div => Some(BinaryOperator::IntDivide),
        TokenKind::StarStar | TokenKind::Caret => Some(BinaryOperator::Power),
        TokenKind::EqualEqual => Some(BinaryOperator::Equal),
        TokenKind::BangEqual => Some(BinaryOperator::NotEqual),
        TokenKind::Less => Some(BinaryOperator::Less),
        TokenKind::Greater => Some(BinaryOperator::Greater),
        TokenKind::LessEqual => Some(BinaryOperator::LessEqual),
        TokenKind::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        TokenKind::And => Some(BinaryOperator::And),
        TokenKind::Or => Some(BinaryOperator::Or),
        TokenKind::Assign => Some(BinaryOperator::Assign),
        TokenKind::PlusAssign => Some(BinaryOperator::AddAssign),
        TokenKind::MinusAssign => Some(BinaryOperator::SubtractAssign),
        TokenKind::StarAssign => Some(BinaryOperator::MultiplyAssign),
        TokenKind::SlashAssign => Some(BinaryOperator::DivideAssign),
        _ => None,
    }
}
