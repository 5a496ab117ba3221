use gloss::{
    ast::Node,
    error::ParseError,
    interpreter::{
        lexer::tokenize,
        parser::{
            MAX_NESTING_DEPTH, parse, parse_program, parse_program_with_limit, parse_with_limit,
        },
    },
};

fn tree(source: &str) -> String {
    let tokens = tokenize(source).unwrap_or_else(|e| panic!("{source}: {e}"));
    parse(&tokens).unwrap_or_else(|e| panic!("{source}: {e}"))
                  .to_string()
}

fn parse_error(source: &str) -> ParseError {
    let tokens = tokenize(source).unwrap_or_else(|e| panic!("{source}: {e}"));
    match parse(&tokens) {
        Ok(node) => panic!("{source} should not parse, got {node}"),
        Err(e) => e,
    }
}

#[test]
fn expression_precedence() {
    assert_eq!(tree("1 + 2 * 3 - 4"), "((1 + (2 * 3)) - 4)");
    assert_eq!(tree("a = b = 3"), "(a = (b = 3))");
    assert_eq!(tree("-x ** 2"), "(-(x ** 2))");
    assert_eq!(tree("2 ^ -1"), "(2 ** (-1))");
    assert_eq!(tree("x++ + 1"), "((x++) + 1)");
    assert_eq!(tree("not a and b or c"), "(((not a) and b) or c)");
    assert_eq!(tree("1 < 2 == true"), "((1 < 2) == true)");
    assert_eq!(tree("7 mod 3 div 2"), "((7 mod 3) div 2)");
    assert_eq!(tree("x += y *= 2"), "(x += (y *= 2))");
}

#[test]
fn calls_and_literals() {
    assert_eq!(tree("f(1, g(2), \"s\")"), "f(1, g(2), \"s\")");
    assert_eq!(tree("f()"), "f()");
    assert_eq!(tree("x = if (a) 1 else 2"), "(x = if (a) 1 else 2)");
}

#[test]
fn statements() {
    assert_eq!(tree("while (i < 3) i++"), "while ((i < 3)) (i++)");
    assert_eq!(tree("for (i = 0; i < 3; i++) { }"), "for ((i = 0); (i < 3); (i++)) { }");
    assert_eq!(tree("for (;;) x"), "for (; ; ) x");
    assert_eq!(tree("{ a = 1; b = 2 }"), "{ (a = 1); (b = 2) }");
    assert_eq!(tree("function f(a, b) return a"), "function f(a, b) return a");
    assert_eq!(tree("function g() { return }"), "function g() { return }");
    assert_eq!(tree("if (x) y = 1; else y = 2"), "if (x) (y = 1) else (y = 2)");
    assert_eq!(tree("if (x) { }"), "if (x) { }");
}

#[test]
fn print_forms() {
    assert_eq!(tree("print 1, 2"), "print 1, 2");
    assert_eq!(tree("print(1, 2)"), "print 1, 2");
    assert_eq!(tree("print (1) + 2"), "print (1 + 2)");
}

#[test]
fn statement_nodes_are_marked() {
    let tokens = tokenize("while (false) 1").unwrap();
    let node = parse(&tokens).unwrap();

    assert!(node.is_statement());
    assert!(matches!(node, Node::While { line: 1, .. }));

    let tokens = tokenize("1 + 1").unwrap();
    assert!(!parse(&tokens).unwrap().is_statement());
}

#[test]
fn nodes_remember_their_line() {
    let tokens = tokenize("\n\nx = 1").unwrap();
    assert_eq!(parse(&tokens).unwrap().line(), 3);
}

#[test]
fn missing_parenthesis_reports_end_of_input() {
    let error = parse_error("x = (1 + 2");

    assert!(matches!(error, ParseError::UnexpectedEndOfInput { line: 1, column: 11, .. }),
            "{error:?}");
}

#[test]
fn assignment_to_expression_is_rejected() {
    let error = parse_error("1 + 2 = 3");

    assert_eq!(error, ParseError::InvalidAssignmentTarget { line: 1, column: 7 });
    assert_eq!(error.message(), "Invalid assignment target.");
}

#[test]
fn unexpected_token_names_what_was_found() {
    let error = parse_error("f(1,)");

    assert!(matches!(&error, ParseError::UnexpectedToken { found, line: 1, column: 5, .. }
                                if found == ")"),
            "{error:?}");
}

#[test]
fn trailing_tokens_are_rejected() {
    let error = parse_error("1 2");

    assert!(matches!(error, ParseError::TrailingTokens { column: 3, .. }), "{error:?}");
}

#[test]
fn bad_literals_are_rejected() {
    assert!(matches!(parse_error("1.2.3"), ParseError::InvalidNumber { .. }));
    assert!(matches!(parse_error("x = #"), ParseError::UnexpectedEndOfInput { .. }));
    assert!(matches!(parse_error("x = ~"), ParseError::InvalidCharacter { .. }));
}

#[test]
fn program_collects_every_error() {
    let tokens = tokenize("a = 1;\nb = );\nc = 3;\nd = (").unwrap();
    let errors = parse_program(&tokens).unwrap_err();

    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].line(), 2);
    assert_eq!(errors[1].line(), 4);
}

#[test]
fn program_without_separators() {
    let tokens = tokenize("x = 1\ny = x + 1; print y\n").unwrap();
    let program = parse_program(&tokens).unwrap();

    assert_eq!(program.len(), 3);
    assert_eq!(program[2].to_string(), "print y");
}

#[test]
fn nesting_is_limited() {
    let deep = format!("{}1{}", "(".repeat(500), ")".repeat(500));
    let error = parse_error(&deep);

    assert!(matches!(error, ParseError::NestingTooDeep { limit: MAX_NESTING_DEPTH, line: 1, .. }),
            "{error:?}");
    assert_eq!(error.message(), "Expression nested more than 64 levels deep.");

    let tokens = tokenize("((1))").unwrap();
    assert!(parse_with_limit(&tokens, 4).is_ok());
    assert!(matches!(parse_with_limit(&tokens, 3),
                     Err(ParseError::NestingTooDeep { limit: 3, .. })));
    assert!(parse(&tokens).is_ok());
}

#[test]
fn flat_chains_do_not_count_as_nesting() {
    let sum = format!("1{}", " + 1".repeat(3000));
    let node = parse(&tokenize(&sum).unwrap()).unwrap();

    assert!(matches!(node, Node::BinaryOp { .. }));
    assert_eq!(tree("a = b = c = d = 1"), "(a = (b = (c = (d = 1))))");
}

#[test]
fn program_reports_deep_statements_and_recovers() {
    let tokens = tokenize("((1)); 2; (((3)))\nx = 4").unwrap();
    let errors = parse_program_with_limit(&tokens, 4).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], ParseError::NestingTooDeep { limit: 4, line: 1, .. }));
}
