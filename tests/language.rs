use std::fs::{self};

use gloss::{
    error::{Error, ParseError, RuntimeError},
    get_result,
    interpreter::{
        evaluator::core::{BufferSink, Config},
        session::Interpreter,
        value::core::Value,
    },
};
use walkdir::WalkDir;

/// Runs every `.gl` script under `tests/scripts` one line at a time.
///
/// A line may end with an annotation comment:
/// - `# => text` expects the rendered result to equal `text`,
/// - `# => error: text` expects an error whose message contains `text`,
/// - `# => prints: text` expects the line to print exactly `text`.
///
/// Lines without an annotation must simply succeed.
#[test]
fn script_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "gl"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        let sink = BufferSink::new();
        let mut interpreter = Interpreter::new().with_output(sink.clone());

        for (i, line) in content.lines().enumerate() {
            let (code, expected) = match line.rsplit_once("# =>") {
                Some((code, expected)) => (code, Some(expected.trim())),
                None => (line, None),
            };
            let result = interpreter.execute(code);
            let printed = sink.take();
            count += 1;

            let location = format!("{}:{}: {}", path.display(), i + 1, code.trim());
            match expected {
                None => {
                    if let Err(e) = result {
                        panic!("{location}\nunexpected error: {e}");
                    }
                },
                Some(expected) => {
                    if let Some(message) = expected.strip_prefix("error:") {
                        let e = match result {
                            Ok(rendered) => {
                                panic!("{location}\nexpected an error, got '{rendered}'")
                            },
                            Err(e) => e,
                        };
                        assert!(e.to_string().contains(message.trim()),
                                "{location}\nerror '{e}' does not mention '{}'",
                                message.trim());
                    } else if let Some(output) = expected.strip_prefix("prints:") {
                        assert!(result.is_ok(), "{location}\nunexpected error: {result:?}");
                        assert_eq!(printed, [output.trim()], "{location}");
                    } else {
                        match result {
                            Ok(rendered) => assert_eq!(rendered, expected, "{location}"),
                            Err(e) => panic!("{location}\nunexpected error: {e}"),
                        }
                    }
                },
            }
        }
    }

    assert!(count > 0, "No script lines found in tests/scripts");
}

fn assert_success(src: &str) -> Value {
    match get_result(src) {
        Ok(value) => value,
        Err(e) => panic!("Program failed:\n{src}\nError: {e}"),
    }
}

fn assert_failure(src: &str) -> String {
    match get_result(src) {
        Ok(value) => panic!("Program should have failed:\n{src}\nGot: {value}"),
        Err(e) => e.to_string(),
    }
}

fn assert_number(src: &str, expected: f64) {
    assert_eq!(assert_success(src), Value::Number(expected), "{src}");
}

#[test]
fn arithmetic_precedence() {
    assert_number("2 + 3 * 4", 14.0);
    assert_number("(2 + 3) * 4", 20.0);
    assert_number("10 - 4 - 3", 3.0);
    assert_number("2 * 3 ** 2", 18.0);
    assert_number("-3 ** 2", -9.0);
}

#[test]
fn power_is_right_associative() {
    assert_number("2 ** 3 ** 2", 512.0);
    assert_number("2 ^ 3 ^ 2", 512.0);
    assert_number("2 ** -1", 0.5);
}

#[test]
fn integer_division_and_modulo() {
    assert_number("17 div 5", 3.0);
    assert_number("-17 div 5", -3.0);
    assert_number("17 mod 5", 2.0);
    assert_number("-17 mod 5", -2.0);
    assert_number("7.5 mod 2", 1.5);
}

#[test]
fn keywords_are_case_insensitive() {
    assert_number("17 DIV 5", 3.0);
    assert_number("17 Mod 5", 2.0);
    assert_eq!(assert_success("TRUE AND NOT False"), Value::Boolean(true));
}

#[test]
fn division_by_zero_is_error() {
    assert!(assert_failure("1 / 0").contains("zero"));
    assert!(assert_failure("1 div 0").contains("zero"));
    assert!(assert_failure("1 mod 0").contains("zero"));
}

#[test]
fn errors_report_the_line() {
    let message = assert_failure("x = 1\ny = 2\nz = x / 0");
    assert!(message.starts_with("Error on line 3"), "{message}");

    let message = assert_failure("a = 1\n\nb = (2 +");
    assert!(message.starts_with("Error on line 3"), "{message}");
}

#[test]
fn comparison_and_logic() {
    assert_eq!(assert_success("1 < 2 and 2 <= 2"), Value::Boolean(true));
    assert_eq!(assert_success("3 != 3 or 4 >= 5"), Value::Boolean(false));
    assert_eq!(assert_success("!0"), Value::Boolean(true));
    assert_eq!(assert_success("\"abc\" == \"abc\""), Value::Boolean(true));
    assert_eq!(assert_success("\"b\" > \"a\""), Value::Boolean(true));
}

#[test]
fn logic_short_circuits() {
    assert_eq!(assert_success("false and undefined_name"), Value::Boolean(false));
    assert_eq!(assert_success("true or undefined_name"), Value::Boolean(true));
    assert_eq!(assert_success("false and (1 / 0)"), Value::Boolean(false));
    assert_eq!(assert_success("true or (1 / 0)"), Value::Boolean(true));
    assert_number("n = 0; false and (n = 1); true or (n = 2); n", 0.0);
    assert!(assert_failure("true and undefined_name").contains("Undefined variable"));
}

#[test]
fn strings_concatenate() {
    assert_eq!(assert_success("\"a\" + 1 + 2"), Value::from("a12"));
    assert_eq!(assert_success("1 + 2 + \"a\""), Value::from("3a"));
    assert_eq!(assert_success("\"line\\nbreak\""), Value::from("line\nbreak"));
}

#[test]
fn constants_resolve() {
    assert_number("pi", std::f64::consts::PI);
    assert_number("e", std::f64::consts::E);
    assert_number("tau / 2", std::f64::consts::PI);
    assert!(assert_failure("Pi").contains("Undefined variable"));
}

#[test]
fn assignment_forms() {
    assert_number("x = 5; x += 2; x", 7.0);
    assert_number("x = 5; x -= 2; x", 3.0);
    assert_number("x = 5; x *= 2; x", 10.0);
    assert_number("x = 5; x /= 2; x", 2.5);
    assert_number("a = b = 4; a + b", 8.0);
    assert!(assert_failure("q += 1").contains("Undefined variable"));
    assert!(assert_failure("(1 + 2) = 3").contains("Invalid assignment target"));
}

#[test]
fn increment_and_decrement() {
    assert_number("i = 1; j = i++; j * 10 + i", 12.0);
    assert_number("i = 1; j = ++i; j * 10 + i", 22.0);
    assert_number("i = 1; j = i--; j * 10 + i", 10.0);
    assert_number("i = 1; j = --i; j * 10 + i", 0.0);
    assert!(assert_failure("5++").contains("require a variable"));
    assert!(assert_failure("missing++").contains("Undefined variable"));
}

#[test]
fn blocks_scope_their_variables() {
    assert!(assert_failure("{ inner = 1 }\ninner").contains("Undefined variable"));
    assert_number("outer = 1; { outer = 2 }; outer", 1.0);
    assert_number("x = 1; { x = x + 1; x * 10 }", 20.0);
    assert_number("n = 5; { n++ }; { n += 3 }; n", 5.0);
    assert_number("{ a = 3; a * 2 }", 6.0);
}

#[test]
fn loops_update_outer_variables() {
    assert_number("i = 0; while (i < 10) i++; i", 10.0);
    assert_number("sum = 0; for (k = 1; k <= 100; k++) sum += k; sum", 5050.0);
    assert_number("n = 0; for (; n < 3;) n = n + 1; n", 3.0);
    assert_number("count = 0; while (false) count++; count", 0.0);
}

#[test]
fn if_expression_yields_a_branch() {
    assert_number("x = if (1 < 2) 10 else 20; x", 10.0);
    assert_number("x = if (0) 10 else 20; x", 20.0);
    assert_number("if (true) { 1 } else { 2 }", 1.0);
    assert_eq!(assert_success("if (false) 1"), Value::Null);
}

#[test]
fn functions_and_recursion() {
    assert_number("function square(x) return x * x\nsquare(7)", 49.0);
    assert_number(r"
        function fib(n) {
            if (n < 2) return n
            return fib(n - 1) + fib(n - 2)
        }
        fib(20)
    ",
                  6765.0);
    assert_number(r"
        function gcd(a, b) return if (b == 0) a else gcd(b, a mod b)
        gcd(1071, 462)
    ",
                  21.0);
}

#[test]
fn function_parameters_are_local() {
    assert_number("x = 1\nfunction f(x) return x * 2\nf(10) + x", 21.0);
    assert!(assert_failure("function f(p) return p\nf(1)\np").contains("Undefined variable"));
}

#[test]
fn function_without_return_yields_null() {
    assert_eq!(assert_success("function f() { 1 + 1 }\nf()"), Value::Null);
    assert_eq!(assert_success("function g() { return }\ng()"), Value::Null);
}

#[test]
fn redefining_a_user_function_replaces_it() {
    assert_number("function f() return 1\nfunction f() return 2\nf()", 2.0);
}

#[test]
fn redefinition_of_builtin_function_is_error() {
    assert!(assert_failure("function sin(x) return x").contains("built-in"));
}

#[test]
fn wrong_function_arity_is_error() {
    let message = assert_failure("function f(x, y) return x + y\nf(3)");
    assert!(message.contains("expects 2 argument(s), got 1"), "{message}");
    assert!(assert_failure("sqrt(1, 2)").contains("expects 1 argument(s), got 2"));
}

#[test]
fn unknown_function_is_error() {
    assert!(assert_failure("nothing(1)").contains("Undefined function"));
}

#[test]
fn builtin_math() {
    assert_number("sqrt(pow(3, 2) + pow(4, 2))", 5.0);
    assert_number("root(3, 27)", 3.0);
    assert_number("root(3, -27)", -3.0);
    assert_number("log(e)", 1.0);
    assert_number("ln(1)", 0.0);
    assert_number("log10(1000)", 3.0);
    assert_number("log2(1024)", 10.0);
    assert_number("abs(-4) + floor(2.7) + ceil(2.1) + round(2.5)", 4.0 + 2.0 + 3.0 + 3.0);
    assert_number("max(2, 8) - min(2, 8)", 6.0);
    assert_number("exp(0) + cos(0) + sin(0)", 2.0);
}

#[test]
fn builtin_domain_errors() {
    for src in ["sqrt(-1)", "log(-2)", "log10(0)", "asin(1.5)", "acos(-2)", "root(2, -4)"] {
        assert!(assert_failure(src).contains("Domain error"), "{src}");
    }
}

#[test]
fn call_depth_is_limited() {
    let mut interpreter = Interpreter::with_config(Config::default().with_max_call_depth(25));
    interpreter.execute("function down(n) return if (n == 0) 0 else down(n - 1)")
               .unwrap();

    assert_eq!(interpreter.execute("down(20)").unwrap(), "0");

    let error = interpreter.execute("down(30)").unwrap_err();
    assert!(error.to_string().contains("Maximum call depth of 25"), "{error}");

    assert_eq!(interpreter.execute("down(5)").unwrap(), "0");
}

#[test]
fn long_operator_chains_evaluate() {
    assert_number(&format!("1{}", " + 1".repeat(2000)), 2001.0);
    assert_number(&format!("100{}", " - 1 * 2".repeat(1500)), -2900.0);
    assert_eq!(assert_success(&format!("true{}", " and 1".repeat(2000))),
               Value::Boolean(true));
    assert_eq!(assert_success(&format!("false{}", " and 1 / 0".repeat(2000))),
               Value::Boolean(false));
    assert_eq!(assert_success(&format!("\"a\"{}", " + 1".repeat(3))), Value::from("a111"));
}

#[test]
fn deep_nesting_is_an_error() {
    let parens = format!("{}1{}", "(".repeat(500), ")".repeat(500));
    let error = get_result(&parens).unwrap_err();
    assert!(matches!(error, Error::Parse(ParseError::NestingTooDeep { limit: 64, .. })),
            "{error}");

    for source in [format!("{}1", "- ".repeat(500)),
                   format!("2{}", " ** 2".repeat(500)),
                   format!("{}1{}", "{ ".repeat(500), " }".repeat(500)),
                   format!("{}1{}", "f(".repeat(500), ")".repeat(500))]
    {
        let error = get_result(&source).unwrap_err();
        assert!(error.to_string().contains("nested more than 64 levels"), "{error}");
    }

    let mut interpreter = Interpreter::with_config(Config::default().with_max_nesting_depth(4));
    assert_eq!(interpreter.execute("((1))").unwrap(), "1");
    assert!(interpreter.execute("(((1)))").is_err());
    assert!(!interpreter.is_valid_syntax("(((1)))"));
}

#[test]
fn eval_depth_is_limited() {
    let mut interpreter = Interpreter::with_config(Config::default().with_max_eval_depth(10));

    assert_eq!(interpreter.execute("- - - 1").unwrap(), "-1");

    let error = interpreter.execute(&format!("{}1", "- ".repeat(20))).unwrap_err();
    assert!(matches!(error, Error::Runtime(RuntimeError::EvalDepthExceeded { limit: 10, .. })),
            "{error}");

    assert_eq!(interpreter.execute(&format!("1{}", " + 1".repeat(50))).unwrap(), "51");
}

#[test]
fn scopes_unwind_on_return_and_error() {
    let mut interpreter = Interpreter::new();

    interpreter.execute("function f(n) { { { while (1) { if (n) return 1 } } } }").unwrap();
    assert_eq!(interpreter.execute("f(1)").unwrap(), "1");
    assert_eq!(interpreter.context().scope_depth(), 1);

    assert!(interpreter.execute("{ { a = 1; 1 / 0 } }").is_err());
    assert_eq!(interpreter.context().scope_depth(), 1);
    assert!(!interpreter.context().has_variable("a"));

    interpreter.execute("function g() { { b = 2; missing } }").unwrap();
    assert!(interpreter.execute("g()").is_err());
    assert_eq!(interpreter.context().scope_depth(), 1);
    assert!(!interpreter.context().has_variable("b"));

    assert_eq!(interpreter.execute("f(1) + 1").unwrap(), "2");
}

#[test]
fn print_writes_to_the_sink() {
    let sink = BufferSink::new();
    let mut interpreter = Interpreter::new().with_output(sink.clone());

    interpreter.execute("print \"sum: \", 1 + 2").unwrap();
    interpreter.execute("print(\"x\")").unwrap();
    interpreter.execute("for (i = 0; i < 3; i++) print i").unwrap();

    assert_eq!(sink.lines(), ["sum: 3", "x", "0", "1", "2"]);
}

#[test]
fn numbers_render_round_trip() {
    let mut interpreter = Interpreter::new();

    for src in ["42",
                "0.1",
                "-2.5",
                "10 ** 21",
                "123456789.125",
                "1 / 3",
                "exp(1000)",
                "-exp(1000)",
                "exp(1000) - exp(1000)"]
    {
        let rendered = interpreter.execute(src).unwrap();
        let reparsed = interpreter.execute(&rendered).unwrap();
        assert_eq!(rendered, reparsed, "{src}");
    }

    assert_eq!(interpreter.execute("exp(1000)").unwrap(), "inf");
    assert_eq!(interpreter.execute("inf > 10 ** 300").unwrap(), "true");
    assert_eq!(interpreter.execute("NaN == NaN").unwrap(), "false");
}

#[test]
fn session_survives_errors() {
    let mut interpreter = Interpreter::new();

    assert_eq!(interpreter.execute("x = 10").unwrap(), "10");
    assert!(interpreter.execute("x / 0").is_err());
    assert!(interpreter.last_error().is_some());

    assert_eq!(interpreter.execute("x * 2").unwrap(), "20");
    assert!(interpreter.last_error().is_none());
}

#[test]
fn session_helpers() {
    let mut interpreter = Interpreter::new();
    interpreter.execute("alpha = 1").unwrap();
    interpreter.execute("function beta() return 2").unwrap();

    let names: Vec<String> = interpreter.available_identifiers().into_iter().collect();
    assert_eq!(names, ["alpha", "beta"]);

    assert!(interpreter.builtin_functions().contains(&"sqrt"));
    assert!(interpreter.is_valid_syntax("y = (1 + 2) * 3"));
    assert!(!interpreter.is_valid_syntax("y = (1 + 2"));
    assert!(!interpreter.context().has_variable("y"));

    interpreter.clear_context();
    assert!(interpreter.available_identifiers().is_empty());
    assert!(interpreter.execute("alpha").is_err());
}

#[test]
fn empty_input_renders_nothing() {
    let mut interpreter = Interpreter::new();
    assert_eq!(interpreter.execute("").unwrap(), "");
    assert_eq!(interpreter.execute("   # just a comment").unwrap(), "");
    assert_eq!(assert_success(""), Value::Null);
}
