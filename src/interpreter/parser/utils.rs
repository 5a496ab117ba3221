use std::{cell::Cell, iter::Peekable};

use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{MAX_NESTING_DEPTH, ParseResult},
    },
};

thread_local! {
    static NESTING_DEPTH: Cell<usize> = const { Cell::new(0) };
    static NESTING_LIMIT: Cell<usize> = const { Cell::new(MAX_NESTING_DEPTH) };
}

/// Returns the next token without consuming it.
pub(in crate::interpreter::parser) fn peek<'a, I>(tokens: &mut Peekable<I>) -> Option<&'a Token>
    where I: Iterator<Item = &'a Token>
{
    tokens.peek().copied()
}

/// Returns the kind of the next token, treating an exhausted stream as the
/// end of input.
pub(in crate::interpreter::parser) fn peek_kind<'a, I>(tokens: &mut Peekable<I>) -> TokenKind
    where I: Iterator<Item = &'a Token>
{
    tokens.peek().map_or(TokenKind::EndOfFile, |token| token.kind)
}

/// Consumes the next token if it has the given kind.
pub(in crate::interpreter::parser) fn consume_if<'a, I>(tokens: &mut Peekable<I>,
                                                        kind: TokenKind)
                                                        -> Option<&'a Token>
    where I: Iterator<Item = &'a Token>
{
    tokens.next_if(|token| token.kind == kind)
}

/// Skips any number of `;` tokens.
pub(in crate::interpreter::parser) fn skip_semicolons<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a Token>
{
    while consume_if(tokens, TokenKind::Semicolon).is_some() {}
}

/// Consumes a token of the given kind or fails.
///
/// `what` names the expected token for the error message, e.g. `"')'"`.
///
/// # Errors
/// An error describing the token found instead; see [`unexpected`].
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    kind: TokenKind,
                                                    what: &str)
                                                    -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a Token>
{
    match peek(tokens) {
        Some(token) if token.kind == kind => {
            tokens.next();
            Ok(token)
        },
        Some(token) => Err(unexpected(token, what)),
        None => Err(exhausted(what)),
    }
}

/// Builds the error for finding `token` where `what` was expected.
///
/// The end-of-file token yields [`ParseError::UnexpectedEndOfInput`], an
/// invalid character [`ParseError::InvalidCharacter`], and anything else
/// [`ParseError::UnexpectedToken`].
pub(in crate::interpreter::parser) fn unexpected(token: &Token, what: &str) -> ParseError {
    match token.kind {
        TokenKind::EndOfFile => ParseError::UnexpectedEndOfInput { expected: format!("expected {what}"),
                                                                   line:     token.line,
                                                                   column:   token.column, },
        TokenKind::Invalid => ParseError::InvalidCharacter { character: token.text.clone(),
                                                             line:      token.line,
                                                             column:    token.column, },
        _ => ParseError::UnexpectedToken { expected: format!("Expected {what}"),
                                           found:    token.describe(),
                                           line:     token.line,
                                           column:   token.column, },
    }
}

/// Error for a token slice that ran out without an end-of-file marker.
pub(in crate::interpreter::parser) fn exhausted(what: &str) -> ParseError {
    ParseError::UnexpectedEndOfInput { expected: format!("expected {what}"),
                                       line:     0,
                                       column:   0, }
}

/// Parses a comma-separated list of items up to and including a closing
/// token.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := (item ("," item)*)? closing`
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse, or if something other
/// than `,` or the closing token follows an item.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: TokenKind,
    closing_text: &str)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut items = Vec::new();
    if consume_if(tokens, closing).is_some() {
        return Ok(items);
    }

    loop {
        items.push(parse_item(tokens)?);
        match peek(tokens) {
            Some(token) if token.kind == TokenKind::Comma => {
                tokens.next();
            },
            Some(token) if token.kind == closing => {
                tokens.next();
                break;
            },
            Some(token) => return Err(unexpected(token, &format!("',' or {closing_text}"))),
            None => return Err(exhausted(closing_text)),
        }
    }

    Ok(items)
}

/// Parses a plain identifier and returns its name.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>,
                                                              what: &str)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a Token> + Clone
{
    expect(tokens, TokenKind::Identifier, what).map(|token| token.text.clone())
}

/// Marks one open nesting level; dropping it closes the level again.
pub(in crate::interpreter::parser) struct NestingGuard;

impl Drop for NestingGuard {
    fn drop(&mut self) {
        NESTING_DEPTH.set(NESTING_DEPTH.get().saturating_sub(1));
    }
}

/// Opens one nesting level before the parser recurses into a nested
/// construct.
///
/// The level stays open for as long as the returned guard lives, so callers
/// bind it for the duration of the recursive call.
///
/// # Errors
/// [`ParseError::NestingTooDeep`] at the next token when the active limit is
/// already reached.
pub(in crate::interpreter::parser) fn nest<'a, I>(tokens: &mut Peekable<I>)
                                                  -> ParseResult<NestingGuard>
    where I: Iterator<Item = &'a Token>
{
    let depth = NESTING_DEPTH.get();
    let limit = NESTING_LIMIT.get();
    if depth >= limit {
        let (line, column) = peek(tokens).map_or((0, 0), |token| (token.line, token.column));
        return Err(ParseError::NestingTooDeep { limit, line, column });
    }

    NESTING_DEPTH.set(depth + 1);
    Ok(NestingGuard)
}

/// Runs `parse` with a fresh nesting count and the given limit, restoring the
/// previous state afterwards.
pub(in crate::interpreter::parser) fn with_nesting_limit<T>(limit: usize,
                                                            parse: impl FnOnce() -> T)
                                                            -> T {
    let previous_limit = NESTING_LIMIT.replace(limit);
    let previous_depth = NESTING_DEPTH.replace(0);

    let result = parse();

    NESTING_LIMIT.set(previous_limit);
    NESTING_DEPTH.set(previous_depth);
    result
}
