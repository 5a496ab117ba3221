use std::iter::Peekable;

use crate::{
    ast::Node,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::ParseResult,
            statement::parse_statement,
            utils::{consume_if, exhausted, expect, peek, peek_kind, skip_semicolons, unexpected},
        },
    },
};

/// Parses a block statement delimited by braces.
///
/// A block consists of zero or more statements. Semicolons between
/// statements are tolerated but never required. Parsing continues until the
/// closing `}`.
///
/// Grammar: `block := "{" (statement ";"*)* "}"`
///
/// # Errors
/// Fails when the input ends before the closing brace, or when a contained
/// statement fails to parse.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let line = expect(tokens, TokenKind::LBrace, "'{'")?.line;
    let mut statements = Vec::new();

    loop {
        skip_semicolons(tokens);

        if consume_if(tokens, TokenKind::RBrace).is_some() {
            break;
        }

        if peek_kind(tokens) == TokenKind::EndOfFile {
            return Err(match peek(tokens) {
                Some(token) => unexpected(token, "'}'"),
                None => exhausted("'}'"),
            });
        }

        statements.push(parse_statement(tokens)?);
    }

    Ok(Node::Block { statements, line })
}
