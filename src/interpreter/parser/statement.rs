use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::Node,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression},
            utils::{
                consume_if, exhausted, expect, nest, parse_comma_separated, parse_identifier,
                peek, peek_kind, skip_semicolons,
            },
        },
    },
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - an `if` statement (the `else` branch is optional here),
/// - a `while` or `for` loop,
/// - a function definition,
/// - `return` or `print`,
/// - a block,
/// - an expression used as a statement.
///
/// The keyword at the current position decides; anything else is parsed as
/// an expression. Every statement opens one nesting level, so deeply nested
/// blocks and loop bodies count against the nesting limit.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let _level = nest(tokens)?;
    let Some(token) = peek(tokens) else {
        return Err(exhausted("a statement"));
    };
    let line = token.line;

    match token.kind {
        TokenKind::If => {
            tokens.next();
            parse_if_statement(tokens, line)
        },
        TokenKind::While => {
            tokens.next();
            parse_while(tokens, line)
        },
        TokenKind::For => {
            tokens.next();
            parse_for(tokens, line)
        },
        TokenKind::Function => {
            tokens.next();
            parse_function_definition(tokens, line)
        },
        TokenKind::Return => {
            tokens.next();
            parse_return(tokens, line)
        },
        TokenKind::Print => {
            tokens.next();
            parse_print(tokens, line)
        },
        TokenKind::LBrace => parse_block(tokens),
        _ => parse_expression(tokens),
    }
}

/// Parses `if (cond) stmt [else stmt]` after the `if` keyword.
///
/// Semicolons between the then-branch and `else` are skipped, so
/// `if (x) a = 1; else a = 2` reads as one statement.
fn parse_if_statement<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    expect(tokens, TokenKind::LParen, "'(' after 'if'")?;
    let condition = parse_expression(tokens)?;
    expect(tokens, TokenKind::RParen, "')' after the condition")?;

    let then_branch = parse_statement(tokens)?;

    let mut lookahead = tokens.clone();
    skip_semicolons(&mut lookahead);
    let else_branch = if peek_kind(&mut lookahead) == TokenKind::Else {
        lookahead.next();
        *tokens = lookahead;
        Some(Box::new(parse_statement(tokens)?))
    } else {
        None
    };

    Ok(Node::If { condition: Box::new(condition),
                  then_branch: Box::new(then_branch),
                  else_branch,
                  line })
}

/// Parses `while (cond) stmt` after the `while` keyword.
fn parse_while<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    expect(tokens, TokenKind::LParen, "'(' after 'while'")?;
    let condition = parse_expression(tokens)?;
    expect(tokens, TokenKind::RParen, "')' after the condition")?;
    let body = parse_statement(tokens)?;

    Ok(Node::While { condition: Box::new(condition),
                     body: Box::new(body),
                     line })
}

/// Parses `for ([init]; [cond]; [update]) stmt` after the `for` keyword.
///
/// Each of the three header parts may be left empty.
fn parse_for<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    expect(tokens, TokenKind::LParen, "'(' after 'for'")?;

    let init = parse_optional_expression(tokens, TokenKind::Semicolon)?;
    expect(tokens, TokenKind::Semicolon, "';' after the loop initializer")?;
    let condition = parse_optional_expression(tokens, TokenKind::Semicolon)?;
    expect(tokens, TokenKind::Semicolon, "';' after the loop condition")?;
    let update = parse_optional_expression(tokens, TokenKind::RParen)?;
    expect(tokens, TokenKind::RParen, "')' after the loop header")?;

    let body = parse_statement(tokens)?;

    Ok(Node::For { init,
                   condition,
                   update,
                   body: Box::new(body),
                   line })
}

fn parse_optional_expression<'a, I>(tokens: &mut Peekable<I>,
                                    terminator: TokenKind)
                                    -> ParseResult<Option<Box<Node>>>
    where I: Iterator<Item = &'a Token> + Clone
{
    if peek_kind(tokens) == terminator {
        return Ok(None);
    }

    Ok(Some(Box::new(parse_expression(tokens)?)))
}

/// Parses a function definition after the `function` keyword.
///
/// Syntax:
/// ```text
///     function name(param1, param2, ...) statement
/// ```
/// The body is usually a block but any statement is accepted.
fn parse_function_definition<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let name = parse_identifier(tokens, "a function name")?;
    expect(tokens, TokenKind::LParen, "'(' after the function name")?;
    let params = parse_comma_separated(tokens,
                                       |tokens| parse_identifier(tokens, "a parameter name"),
                                       TokenKind::RParen,
                                       "')'")?;
    let body = parse_statement(tokens)?;

    Ok(Node::FunctionDef { name,
                           params,
                           body: Rc::new(body),
                           line })
}

/// Parses `return [expr]` after the `return` keyword.
///
/// The value is absent when the statement ends right after the keyword.
fn parse_return<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let value = if ends_statement(peek_kind(tokens)) {
        None
    } else {
        Some(Box::new(parse_expression(tokens)?))
    };

    Ok(Node::Return { value, line })
}

/// Parses `print expr, ...` or `print(expr, ...)` after the `print` keyword.
///
/// A parenthesized list directly after `print` is read as the argument list
/// when the statement ends right after it. Otherwise the parenthesis belongs
/// to the first expression, as in `print (1 + 2) * 3`.
fn parse_print<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    if peek_kind(tokens) == TokenKind::LParen {
        let mut attempt = tokens.clone();
        attempt.next();

        if let Ok(expressions) =
            parse_comma_separated(&mut attempt, parse_expression, TokenKind::RParen, "')'")
           && ends_statement(peek_kind(&mut attempt))
        {
            *tokens = attempt;
            return Ok(Node::Print { expressions, line });
        }
    }

    let mut expressions = vec![parse_expression(tokens)?];
    while consume_if(tokens, TokenKind::Comma).is_some() {
        expressions.push(parse_expression(tokens)?);
    }

    Ok(Node::Print { expressions, line })
}

const fn ends_statement(kind: TokenKind) -> bool {
    matches!(kind,
             TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Else | TokenKind::EndOfFile)
}
