use std::collections::BTreeSet;

use log::debug;

use crate::{
    error::Error,
    interpreter::{
        context::Context,
        evaluator::{
            core::{Config, Evaluator, OutputSink},
            function::core::BUILTIN_FUNCTIONS,
        },
        lexer::{TokenKind, tokenize},
        parser::{parse_program_with_limit, parse_with_limit},
        value::core::Value,
    },
};

/// An interpreter session.
///
/// Owns one [`Evaluator`] and one [`Context`], so variables and functions
/// defined by one call to [`Interpreter::execute`] are visible to the next.
/// A failed call leaves the session usable; its message is kept in
/// [`Interpreter::last_error`].
///
/// # Example
/// ```
/// use gloss::interpreter::session::Interpreter;
///
/// let mut interpreter = Interpreter::new();
///
/// assert_eq!(interpreter.execute("x = 5").unwrap(), "5");
/// assert_eq!(interpreter.execute("x + 3").unwrap(), "8");
/// assert_eq!(interpreter.execute("function add(a, b) return a + b").unwrap(), "");
/// assert_eq!(interpreter.execute("add(2, 3)").unwrap(), "5");
///
/// assert!(interpreter.execute("5 / 0").is_err());
/// assert!(interpreter.last_error().unwrap().contains("zero"));
/// ```
pub struct Interpreter {
    evaluator:  Evaluator,
    context:    Context,
    last_error: Option<String>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Creates a session with default settings that prints to standard
    /// output.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a session with the given evaluator settings.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self { evaluator:  Evaluator::with_config(config),
               context:    Context::new(),
               last_error: None, }
    }

    /// Sends the output of `print` to `output` instead of standard output.
    #[must_use]
    pub fn with_output(mut self, output: impl OutputSink + 'static) -> Self {
        self.evaluator = self.evaluator.with_output(output);
        self
    }

    /// Runs one statement and renders its value.
    ///
    /// Blocks, `if`, loops, `print` and function definitions render as the
    /// empty string, as does input holding only whitespace and comments.
    ///
    /// # Errors
    /// The first lexing, parsing or runtime error. Its message is also kept
    /// in [`Interpreter::last_error`].
    pub fn execute(&mut self, source: &str) -> Result<String, Error> {
        debug!("execute: {source}");
        let result = self.run_statement(source);
        self.record(result)
    }

    /// Runs a whole program, any number of statements, and returns the value
    /// of the last one (`null` for an empty program).
    ///
    /// Nothing runs when any statement fails to parse.
    ///
    /// # Errors
    /// The first lexing or parsing error in the program, or the first runtime
    /// error.
    ///
    /// # Example
    /// ```
    /// use gloss::interpreter::{session::Interpreter, value::core::Value};
    ///
    /// let mut interpreter = Interpreter::new();
    /// let source = "
    ///     function fact(n) {
    ///         if (n <= 1) return 1
    ///         return n * fact(n - 1)
    ///     }
    ///     fact(5)
    /// ";
    ///
    /// assert_eq!(interpreter.execute_program(source).unwrap(), Value::Number(120.0));
    /// ```
    pub fn execute_program(&mut self, source: &str) -> Result<Value, Error> {
        let result = self.run_program(source);
        self.record(result)
    }

    /// Runs each non-blank line as one statement, in order.
    ///
    /// Lines are trimmed first; blank lines are skipped and produce no
    /// result. A failing line does not stop the following ones.
    ///
    /// # Example
    /// ```
    /// use gloss::interpreter::session::Interpreter;
    ///
    /// let mut interpreter = Interpreter::new();
    /// let results = interpreter.execute_lines(["x = 2", "", "  x * 21  ", "y"]);
    ///
    /// assert_eq!(results.len(), 3);
    /// assert_eq!(results[1].as_deref(), Ok("42"));
    /// assert!(results[2].is_err());
    /// ```
    pub fn execute_lines<I, S>(&mut self, lines: I) -> Vec<Result<String, Error>>
        where I: IntoIterator<Item = S>,
              S: AsRef<str>
    {
        lines.into_iter()
             .filter_map(|line| {
                 let line = line.as_ref().trim();
                 (!line.is_empty()).then(|| self.execute(line))
             })
             .collect()
    }

    /// Returns `true` if `source` lexes and parses as one statement.
    ///
    /// Nothing is evaluated. The nesting limit of the session's [`Config`]
    /// applies.
    #[must_use]
    pub fn is_valid_syntax(&self, source: &str) -> bool {
        tokenize(source).is_ok_and(|tokens| {
                            parse_with_limit(&tokens, self.nesting_limit()).is_ok()
                        })
    }

    /// The message of the error from the most recent execution, if it failed.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Forgets every variable and function.
    pub fn clear_context(&mut self) {
        self.context.clear();
    }

    /// Names of all variables and user functions currently defined.
    #[must_use]
    pub fn available_identifiers(&self) -> BTreeSet<String> {
        self.context.list_identifiers()
    }

    /// Names of all built-in functions.
    #[must_use]
    pub fn builtin_functions(&self) -> &'static [&'static str] {
        BUILTIN_FUNCTIONS
    }

    /// The session's variables and functions.
    #[must_use]
    pub const fn context(&self) -> &Context {
        &self.context
    }

    /// Mutable access to the session's variables and functions.
    pub const fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    fn run_statement(&mut self, source: &str) -> Result<String, Error> {
        let tokens = tokenize(source)?;
        if tokens.iter().all(|token| token.kind == TokenKind::EndOfFile) {
            return Ok(String::new());
        }

        let node = parse_with_limit(&tokens, self.nesting_limit())?;
        let value = self.evaluator.evaluate(&node, &mut self.context)?;

        if node.is_statement() {
            Ok(String::new())
        } else {
            Ok(value.to_string())
        }
    }

    fn run_program(&mut self, source: &str) -> Result<Value, Error> {
        let tokens = tokenize(source)?;
        let program = match parse_program_with_limit(&tokens, self.nesting_limit()) {
            Ok(program) => program,
            Err(errors) => {
                let mut errors = errors.into_iter();
                let Some(first) = errors.next() else {
                    return Ok(Value::Null);
                };
                for error in errors {
                    debug!("further parse error: {error}");
                }
                return Err(first.into());
            },
        };

        let mut last = Value::Null;
        for statement in &program {
            debug!("execute: {statement}");
            last = self.evaluator.evaluate(statement, &mut self.context)?;
        }

        Ok(last)
    }

    const fn nesting_limit(&self) -> usize {
        self.evaluator.config().max_nesting_depth
    }

    fn record<T>(&mut self, result: Result<T, Error>) -> Result<T, Error> {
        match &result {
            Ok(_) => self.last_error = None,
            Err(error) => {
                debug!("recorded error: {error}");
                self.last_error = Some(error.to_string());
            },
        }
        result
    }
}
