use std::iter::Peekable;

use log::debug;

use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            binary::parse_assignment,
            statement::parse_statement,
            utils::{nest, peek, peek_kind, skip_semicolons, with_nesting_limit},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Default limit for nested parentheses, prefix operators, powers, calls and
/// statements.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Parses exactly one statement from a token sequence.
///
/// Trailing semicolons are accepted; any other token after the statement is
/// an error. No partial tree is returned on failure.
///
/// # Errors
/// Returns the first [`ParseError`] encountered, including
/// [`ParseError::TrailingTokens`] when input remains after the statement.
///
/// # Example
/// ```
/// use gloss::interpreter::{lexer::tokenize, parser::parse};
///
/// let node = parse(&tokenize("2 ** 3 ** 2;").unwrap()).unwrap();
/// assert_eq!(node.to_string(), "(2 ** (3 ** 2))");
///
/// assert!(parse(&tokenize("1 2").unwrap()).is_err());
/// ```
pub fn parse(tokens: &[Token]) -> ParseResult<Node> {
    parse_with_limit(tokens, MAX_NESTING_DEPTH)
}

/// Like [`parse`], with a custom nesting limit.
///
/// # Errors
/// As [`parse`], and [`ParseError::NestingTooDeep`] when the statement nests
/// deeper than `limit` levels.
///
/// # Example
/// ```
/// use gloss::{
///     error::ParseError,
///     interpreter::{lexer::tokenize, parser::parse_with_limit},
/// };
///
/// assert!(parse_with_limit(&tokenize("((1))").unwrap(), 8).is_ok());
///
/// let error = parse_with_limit(&tokenize("((((((((1))))))))").unwrap(), 8).unwrap_err();
/// assert!(matches!(error, ParseError::NestingTooDeep { limit: 8, .. }));
/// ```
pub fn parse_with_limit(tokens: &[Token], limit: usize) -> ParseResult<Node> {
    with_nesting_limit(limit, || parse_single(tokens))
}

fn parse_single(tokens: &[Token]) -> ParseResult<Node> {
    let mut tokens = tokens.iter().peekable();

    let node = parse_statement(&mut tokens)?;
    skip_semicolons(&mut tokens);

    match peek(&mut tokens) {
        Some(token) if token.kind != TokenKind::EndOfFile => {
            Err(ParseError::TrailingTokens { found:  token.describe(),
                                             line:   token.line,
                                             column: token.column, })
        },
        _ => Ok(node),
    }
}

/// Parses a whole program: any number of statements, optionally separated by
/// semicolons.
///
/// After an error the parser skips ahead to the next statement boundary and
/// keeps going, so every independent error in the input is reported.
///
/// # Errors
/// All collected errors, in source order, when at least one statement failed
/// to parse.
///
/// # Example
/// ```
/// use gloss::interpreter::{lexer::tokenize, parser::parse_program};
///
/// let program = parse_program(&tokenize("x = 1; y = x + 1\nprint y").unwrap()).unwrap();
/// assert_eq!(program.len(), 3);
///
/// let errors = parse_program(&tokenize("x = ; y = 2; z = )").unwrap()).unwrap_err();
/// assert_eq!(errors.len(), 2);
/// ```
pub fn parse_program(tokens: &[Token]) -> Result<Vec<Node>, Vec<ParseError>> {
    parse_program_with_limit(tokens, MAX_NESTING_DEPTH)
}

/// Like [`parse_program`], with a custom nesting limit.
///
/// # Errors
/// As [`parse_program`]; a statement nested too deeply contributes a
/// [`ParseError::NestingTooDeep`].
pub fn parse_program_with_limit(tokens: &[Token],
                                limit: usize)
                                -> Result<Vec<Node>, Vec<ParseError>> {
    with_nesting_limit(limit, || parse_statements(tokens))
}

fn parse_statements(tokens: &[Token]) -> Result<Vec<Node>, Vec<ParseError>> {
    let mut tokens = tokens.iter().peekable();
    let mut statements = Vec::new();
    let mut errors = Vec::new();

    loop {
        skip_semicolons(&mut tokens);
        if peek_kind(&mut tokens) == TokenKind::EndOfFile {
            break;
        }

        match parse_statement(&mut tokens) {
            Ok(statement) => statements.push(statement),
            Err(error) => {
                debug!("parse error, resynchronizing: {error}");
                errors.push(error);
                synchronize(&mut tokens);
            },
        }
    }

    if errors.is_empty() { Ok(statements) } else { Err(errors) }
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, assignment, and recursively descends through the
/// precedence hierarchy.
///
/// Every call opens one nesting level, so parenthesized and otherwise
/// nested expressions count against the nesting limit.
///
/// Grammar: `expression := assignment`
///
/// # Errors
/// [`ParseError::NestingTooDeep`] when the limit is reached, or any error
/// from the levels below.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let _level = nest(tokens)?;
    parse_assignment(tokens)
}

/// Skips tokens until a plausible statement start.
///
/// Stops after a `;` or before a statement keyword. At least one token is
/// consumed so that recovery always makes progress; the end-of-file token is
/// never consumed.
pub fn synchronize<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut first = true;

    while let Some(token) = peek(tokens) {
        match token.kind {
            TokenKind::EndOfFile => return,
            TokenKind::Semicolon => {
                tokens.next();
                return;
            },
            TokenKind::If
            | TokenKind::While
            | TokenKind::For
            | TokenKind::Function
            | TokenKind::Return
            | TokenKind::Print
                if !first =>
            {
                return;
            },
            _ => {
                tokens.next();
            },
        }
        first = false;
    }
}
