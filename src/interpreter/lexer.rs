use logos::Logos;

use crate::{error::LexError, interpreter::value::constants::lookup_constant};

/// The kind of a lexical token.
///
/// Keywords and constants are not matched by the lexer rules directly: every
/// word is scanned as an identifier and then classified by [`tokenize`], which
/// lets keywords match case-insensitively while other names keep their case.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[logos(extras = LexerExtras)]
pub enum TokenKind {
    /// Numeric literal tokens, such as `3`, `3.14` or the malformed `1.2.3`.
    #[regex(r"[0-9][0-9.]*")]
    Number,
    /// String literal tokens, such as `"hello\n"`.
    #[token("\"", scan_string)]
    String,
    /// Identifier tokens; variable or function names such as `x` or `square`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,

    /// `true`
    True,
    /// `false`
    False,
    /// `if`
    If,
    /// `else`
    Else,
    /// `while`
    While,
    /// `for`
    For,
    /// `function`
    Function,
    /// `return`
    Return,
    /// `print`
    Print,
    /// `and`
    And,
    /// `or`
    Or,
    /// `not` or `!`
    #[token("!")]
    Not,
    /// `mod`
    Mod,
    /// `div`
    Div,

    /// `+`
    #[token("+")]
    Plus,
    /// `++`
    #[token("++")]
    PlusPlus,
    /// `+=`
    #[token("+=")]
    PlusAssign,
    /// `-`
    #[token("-")]
    Minus,
    /// `--`
    #[token("--")]
    MinusMinus,
    /// `-=`
    #[token("-=")]
    MinusAssign,
    /// `*`
    #[token("*")]
    Star,
    /// `**`
    #[token("**")]
    StarStar,
    /// `*=`
    #[token("*=")]
    StarAssign,
    /// `/`
    #[token("/")]
    Slash,
    /// `/=`
    #[token("/=")]
    SlashAssign,
    /// `^`
    #[token("^")]
    Caret,
    /// `=`
    #[token("=")]
    Assign,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,

    /// `# Comments.`
    #[regex(r"#[^\n]*", logos::skip)]
    Comment,
    /// Line breaks; advance the line counter.
    #[token("\n", newline)]
    NewLine,
    /// Spaces, tabs, carriage returns and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,

    /// A character the language does not know. The parser rejects it.
    Invalid,
    /// Marks the end of the token sequence.
    EndOfFile,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line and the byte offset at which it starts so every
/// token can be given a line and a column.
pub struct LexerExtras {
    /// The current line number in the source being tokenized (1-based).
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

/// A token together with its text and position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is.
    pub kind:   TokenKind,
    /// The token text. Unescaped contents for strings, the decimal value for
    /// named constants, the raw source text otherwise.
    pub text:   String,
    /// 1-based line of the first character.
    pub line:   usize,
    /// 1-based column of the first character.
    pub column: usize,
}

impl Token {
    /// Builds a token.
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Self { kind,
               text: text.into(),
               line,
               column }
    }

    /// How the token is named in diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::EndOfFile => "end of input".to_string(),
            TokenKind::String => format!("\"{}\"", self.text),
            _ => self.text.clone(),
        }
    }
}

/// Splits source text into tokens.
///
/// The returned sequence always ends with a single [`TokenKind::EndOfFile`]
/// token. Unknown characters become [`TokenKind::Invalid`] tokens so that the
/// parser can report them with a position.
///
/// # Errors
/// [`LexError::UnterminatedString`] when a string literal has no closing
/// quote.
///
/// # Example
/// ```
/// use gloss::interpreter::lexer::{TokenKind, tokenize};
///
/// let tokens = tokenize("x = PI + pi").unwrap();
/// let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
///
/// assert_eq!(kinds,
///            [TokenKind::Identifier,
///             TokenKind::Assign,
///             TokenKind::Identifier,
///             TokenKind::Plus,
///             TokenKind::Number,
///             TokenKind::EndOfFile]);
/// assert_eq!(tokens[2].text, "PI");
/// assert_eq!(tokens[4].text, std::f64::consts::PI.to_string());
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let slice = lexer.slice();
        let line = lexer.extras.line;
        let column = span.start.saturating_sub(lexer.extras.line_start) + 1;

        let token = match result {
            Ok(TokenKind::Identifier) => classify_word(slice, line, column),
            Ok(TokenKind::String) => {
                // The string callback may have moved the line counter past
                // embedded newlines; report the opening quote's position.
                let (line, column) = string_start(source, span.start);
                Token::new(TokenKind::String, unescape(&slice[1..slice.len() - 1]), line, column)
            },
            Ok(kind) => Token::new(kind, slice, line, column),
            Err(()) if slice.starts_with('"') => {
                return Err(LexError::UnterminatedString { line, column });
            },
            Err(()) => Token::new(TokenKind::Invalid, slice, line, column),
        };

        tokens.push(token);
    }

    let line = lexer.extras.line;
    let column = source.len().saturating_sub(lexer.extras.line_start) + 1;
    tokens.push(Token::new(TokenKind::EndOfFile, "", line, column));

    Ok(tokens)
}

/// Resolves escape sequences in the body of a string literal.
///
/// `\n`, `\t`, `\r`, `\\` and `\"` are translated; any other escaped
/// character is kept as is, without the backslash.
///
/// # Example
/// ```
/// use gloss::interpreter::lexer::unescape;
///
/// assert_eq!(unescape(r"a\tb\n"), "a\tb\n");
/// assert_eq!(unescape(r#"say \"hi\""#), "say \"hi\"");
/// assert_eq!(unescape(r"\q"), "q");
/// ```
#[must_use]
pub fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}

fn classify_word(word: &str, line: usize, column: usize) -> Token {
    if let Some(value) = lookup_constant(word) {
        return Token::new(TokenKind::Number, value.to_string(), line, column);
    }

    let kind = match word.to_ascii_lowercase().as_str() {
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "while" => TokenKind::While,
        "for" => TokenKind::For,
        "function" => TokenKind::Function,
        "return" => TokenKind::Return,
        "print" => TokenKind::Print,
        "and" => TokenKind::And,
        "or" => TokenKind::Or,
        "not" => TokenKind::Not,
        "mod" => TokenKind::Mod,
        "div" => TokenKind::Div,
        _ => TokenKind::Identifier,
    };

    Token::new(kind, word, line, column)
}

fn string_start(source: &str, offset: usize) -> (usize, usize) {
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);

    (line, offset - line_start + 1)
}

/// Consumes the rest of a string literal after its opening quote.
///
/// Returns `false` when the input ends before the closing quote; the lexer
/// then yields an error whose slice starts with the quote.
fn scan_string(lex: &mut logos::Lexer<TokenKind>) -> bool {
    let remainder = lex.remainder();
    let mut escaped = false;
    let mut newlines = 0;
    let mut last_newline = None;

    for (i, c) in remainder.char_indices() {
        match c {
            '\n' => {
                newlines += 1;
                last_newline = Some(i);
                escaped = false;
            },
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => {
                let base = lex.span().end;
                if let Some(at) = last_newline {
                    lex.extras.line += newlines;
                    lex.extras.line_start = base + at + 1;
                }
                lex.bump(i + 1);
                return true;
            },
            _ => {},
        }
    }

    lex.bump(remainder.len());
    false
}

fn newline(lex: &mut logos::Lexer<TokenKind>) -> logos::Skip {
    lex.extras.line += 1;
    lex.extras.line_start = lex.span().end;
    logos::Skip
}
