use gloss::{
    error::LexError,
    interpreter::lexer::{Token, TokenKind, tokenize},
};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).unwrap_or_else(|e| panic!("{source}: {e}"))
                    .into_iter()
                    .map(|token| token.kind)
                    .collect()
}

fn positions(tokens: &[Token]) -> Vec<(usize, usize)> {
    tokens.iter().map(|token| (token.line, token.column)).collect()
}

#[test]
fn tracks_lines_and_columns() {
    let tokens = tokenize("x = 1\n  y").unwrap();

    assert_eq!(positions(&tokens), [(1, 1), (1, 3), (1, 5), (2, 3), (2, 4)]);
    assert_eq!(tokens[3].text, "y");
}

#[test]
fn longest_operator_wins() {
    use TokenKind::*;

    assert_eq!(kinds("a += b ** 2 != c"),
               [Identifier, PlusAssign, Identifier, StarStar, Number, BangEqual, Identifier,
                EndOfFile]);
    assert_eq!(kinds("i++ -- <= >= == ="),
               [Identifier, PlusPlus, MinusMinus, LessEqual, GreaterEqual, EqualEqual, Assign,
                EndOfFile]);
    assert_eq!(kinds("-= *= /= ^ !"),
               [MinusAssign, StarAssign, SlashAssign, Caret, Not, EndOfFile]);
}

#[test]
fn keywords_ignore_case() {
    use TokenKind::*;

    let tokens = tokenize("WHILE For iF function RETURN print and OR not MOD div").unwrap();
    let found: Vec<_> = tokens.iter().map(|token| token.kind).collect();

    assert_eq!(found,
               [While, For, If, Function, Return, Print, And, Or, Not, Mod, Div, EndOfFile]);
    assert_eq!(tokens[0].text, "WHILE");
}

#[test]
fn constants_become_numbers() {
    let tokens = tokenize("tau phi Tau").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].text, std::f64::consts::TAU.to_string());
    assert_eq!(tokens[1].kind, TokenKind::Number);
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
}

#[test]
fn non_finite_names_become_numbers() {
    let tokens = tokenize("-inf NaN Inf").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Minus);
    assert_eq!((tokens[1].kind, tokens[1].text.as_str()), (TokenKind::Number, "inf"));
    assert_eq!((tokens[2].kind, tokens[2].text.as_str()), (TokenKind::Number, "NaN"));
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
}

#[test]
fn strings_are_unescaped() {
    let tokens = tokenize(r#"s = "say \"hi\"\n""#).unwrap();

    assert_eq!(tokens[2].kind, TokenKind::String);
    assert_eq!(tokens[2].text, "say \"hi\"\n");
    assert_eq!(positions(&tokens)[2], (1, 5));
}

#[test]
fn multi_line_strings_advance_the_line() {
    let tokens = tokenize("\"a\nb\" c").unwrap();

    assert_eq!(tokens[0].text, "a\nb");
    assert_eq!(positions(&tokens), [(1, 1), (2, 4), (2, 5)]);
}

#[test]
fn comments_and_whitespace_are_skipped() {
    use TokenKind::*;

    let tokens = tokenize("1 # one\n\t3 # three").unwrap();

    assert_eq!(tokens.iter().map(|token| token.kind).collect::<Vec<_>>(),
               [Number, Number, EndOfFile]);
    assert_eq!(positions(&tokens)[1], (2, 2));
    assert_eq!(kinds("# only a comment"), [EndOfFile]);
    assert_eq!(kinds(""), [EndOfFile]);
}

#[test]
fn unknown_characters_become_invalid_tokens() {
    let tokens = tokenize("1 @ 2").unwrap();

    assert_eq!(tokens[1].kind, TokenKind::Invalid);
    assert_eq!(tokens[1].text, "@");
    assert_eq!(tokens[2].kind, TokenKind::Number);
}

#[test]
fn unterminated_string_is_error() {
    let error = tokenize("x = 1\ny = \"abc").unwrap_err();

    assert_eq!(error, LexError::UnterminatedString { line: 2, column: 5 });
    assert!(error.to_string().contains("Unterminated string"));
}
