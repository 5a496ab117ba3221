use std::{
    cell::RefCell,
    io::{self, Write},
    rc::Rc,
};

use log::debug;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        context::{Context, UserFunction},
        evaluator::function::core::is_builtin,
        parser::MAX_NESTING_DEPTH,
        value::{constants::lookup_constant, core::Value},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Default limit for nested user function calls.
pub const MAX_CALL_DEPTH: usize = 200;

/// Default limit for nested node evaluations, counted across function calls.
pub const MAX_EVAL_DEPTH: usize = 2000;

/// The outcome of evaluating one node.
///
/// `Return` carries the value of a `return` statement outward until a
/// function call, or the top of [`Evaluator::evaluate`], consumes it.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlFlow {
    /// Evaluation completed normally with a value.
    Value(Value),
    /// A `return` statement is unwinding with its value.
    Return(Value),
}

impl ControlFlow {
    /// The carried value, whichever way evaluation ended.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Value(value) | Self::Return(value) => value,
        }
    }
}

/// Unwraps a [`ControlFlow::Value`], or returns a [`ControlFlow::Return`]
/// from the enclosing function unchanged.
macro_rules! propagate {
    ($flow:expr) => {
        match $flow {
            $crate::interpreter::evaluator::core::ControlFlow::Value(value) => value,
            signal @ $crate::interpreter::evaluator::core::ControlFlow::Return(_) => {
                return Ok(signal)
            },
        }
    };
}
pub(crate) use propagate;

/// Evaluator settings.
///
/// # Example
/// ```
/// use gloss::interpreter::evaluator::core::Config;
///
/// let config = Config::default().with_max_call_depth(50)
///                                 .with_max_nesting_depth(16);
/// assert_eq!(config.max_call_depth, 50);
/// assert_eq!(config.max_nesting_depth, 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// How many user function calls may be active at once.
    pub max_call_depth:    usize,
    /// How deeply the parser lets expressions and blocks nest.
    pub max_nesting_depth: usize,
    /// How deeply node evaluations may nest, across function calls.
    pub max_eval_depth:    usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { max_call_depth:    MAX_CALL_DEPTH,
               max_nesting_depth: MAX_NESTING_DEPTH,
               max_eval_depth:    MAX_EVAL_DEPTH, }
    }
}

impl Config {
    /// Sets the maximum call depth.
    #[must_use]
    pub const fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }

    /// Sets the maximum parser nesting depth.
    #[must_use]
    pub const fn with_max_nesting_depth(mut self, max_nesting_depth: usize) -> Self {
        self.max_nesting_depth = max_nesting_depth;
        self
    }

    /// Sets the maximum evaluation depth.
    #[must_use]
    pub const fn with_max_eval_depth(mut self, max_eval_depth: usize) -> Self {
        self.max_eval_depth = max_eval_depth;
        self
    }
}

/// Destination for the text produced by `print`.
pub trait OutputSink {
    /// Receives the text of one `print` statement.
    fn write_line(&mut self, text: &str);
}

/// Writes printed lines to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write_line(&mut self, text: &str) {
        let mut stdout = io::stdout().lock();
        if let Err(error) = writeln!(stdout, "{text}") {
            debug!("failed to write output: {error}");
        }
    }
}

/// Collects printed lines in memory.
///
/// Clones share the same buffer, so a caller can hand one clone to an
/// interpreter and read the output through another.
///
/// # Example
/// ```
/// use gloss::interpreter::{evaluator::core::BufferSink, session::Interpreter};
///
/// let sink = BufferSink::new();
/// let mut interpreter = Interpreter::new().with_output(sink.clone());
///
/// interpreter.execute("print \"a\", 1 + 1").unwrap();
/// assert_eq!(sink.lines(), ["a2"]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct BufferSink {
    lines: Rc<RefCell<Vec<String>>>,
}

impl BufferSink {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of every line written so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// Removes and returns every line written so far.
    pub fn take(&self) -> Vec<String> {
        self.lines.borrow_mut().drain(..).collect()
    }
}

impl OutputSink for BufferSink {
    fn write_line(&mut self, text: &str) {
        self.lines.borrow_mut().push(text.to_string());
    }
}

/// Walks syntax trees against a [`Context`].
///
/// The evaluator itself holds no program state; variables and functions live
/// in the context passed to [`Evaluator::evaluate`]. It owns the settings, the
/// output sink, the active call and evaluation depths, and the message of the
/// last failure.
pub struct Evaluator {
    config:     Config,
    output:     Box<dyn OutputSink>,
    call_depth: usize,
    eval_depth: usize,
    last_error: Option<String>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Creates an evaluator with default settings that prints to standard
    /// output.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an evaluator with the given settings.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self { config,
               output: Box::new(StdoutSink),
               call_depth: 0,
               eval_depth: 0,
               last_error: None }
    }

    /// Replaces the destination of `print`.
    #[must_use]
    pub fn with_output(mut self, output: impl OutputSink + 'static) -> Self {
        self.output = Box::new(output);
        self
    }

    /// The active settings.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The message of the error raised by the most recent
    /// [`Evaluator::evaluate`] call, if it failed.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Evaluates a tree and returns its value.
    ///
    /// This is the main entry point for evaluation. A `return` reaching this
    /// level ends evaluation with its value.
    ///
    /// # Errors
    /// Any [`RuntimeError`] raised while evaluating. Its message is also kept
    /// in [`Evaluator::last_error`].
    ///
    /// # Example
    /// ```
    /// use gloss::interpreter::{
    ///     context::Context,
    ///     evaluator::core::Evaluator,
    ///     lexer::tokenize,
    ///     parser::parse,
    ///     value::core::Value,
    /// };
    ///
    /// let mut evaluator = Evaluator::new();
    /// let mut ctx = Context::new();
    ///
    /// let node = parse(&tokenize("x = 2 ** 10").unwrap()).unwrap();
    /// assert_eq!(evaluator.evaluate(&node, &mut ctx).unwrap(), Value::Number(1024.0));
    /// assert_eq!(ctx.get_variable("x"), Some(&Value::Number(1024.0)));
    ///
    /// let node = parse(&tokenize("y").unwrap()).unwrap();
    /// assert!(evaluator.evaluate(&node, &mut ctx).is_err());
    /// assert!(evaluator.last_error().unwrap().contains("Undefined variable"));
    /// ```
    pub fn evaluate(&mut self, node: &Node, ctx: &mut Context) -> EvalResult<Value> {
        self.last_error = None;
        self.call_depth = 0;
        self.eval_depth = 0;

        match self.eval(node, ctx) {
            Ok(flow) => Ok(flow.into_value()),
            Err(error) => {
                debug!("runtime error: {error}");
                self.last_error = Some(error.to_string());
                Err(error)
            },
        }
    }

    /// Evaluates one node.
    ///
    /// Children are evaluated through this same function, and a
    /// [`ControlFlow::Return`] from any of them is passed straight up.
    ///
    /// # Errors
    /// [`RuntimeError::EvalDepthExceeded`] once more than
    /// [`Config::max_eval_depth`] evaluations are nested, plus anything the
    /// node itself raises.
    pub(crate) fn eval(&mut self, node: &Node, ctx: &mut Context) -> EvalResult<ControlFlow> {
        let limit = self.config.max_eval_depth;
        if self.eval_depth >= limit {
            return Err(RuntimeError::EvalDepthExceeded { limit,
                                                         line: node.line() });
        }

        self.eval_depth += 1;
        let flow = self.eval_node(node, ctx);
        self.eval_depth -= 1;
        flow
    }

    /// Dispatches on the node variant.
    fn eval_node(&mut self, node: &Node, ctx: &mut Context) -> EvalResult<ControlFlow> {
        match node {
            Node::Literal { value, .. } => Ok(ControlFlow::Value(value.clone())),
            Node::Identifier { name, line } => {
                Self::eval_identifier(name, *line, ctx).map(ControlFlow::Value)
            },
            Node::BinaryOp { left,
                             op,
                             right,
                             line, } => self.eval_binary_op(left, *op, right, *line, ctx),
            Node::UnaryOp { op, operand, line } => self.eval_unary_op(*op, operand, *line, ctx),
            Node::Call { callee,
                         arguments,
                         line, } => self.eval_call(callee, arguments, *line, ctx),
            Node::If { condition,
                       then_branch,
                       else_branch,
                       .. } => self.eval_if(condition, then_branch, else_branch.as_deref(), ctx),
            Node::While { condition, body, .. } => self.eval_while(condition, body, ctx),
            Node::For { init,
                        condition,
                        update,
                        body,
                        .. } => self.eval_for(init.as_deref(),
                                              condition.as_deref(),
                                              update.as_deref(),
                                              body,
                                              ctx),
            Node::Block { statements, .. } => self.eval_block(statements, ctx),
            Node::FunctionDef { name,
                                params,
                                body,
                                line, } => Self::eval_function_def(name, params, body, *line, ctx),
            Node::Return { value, .. } => {
                let value = match value {
                    Some(value) => propagate!(self.eval(value, ctx)?),
                    None => Value::Null,
                };
                Ok(ControlFlow::Return(value))
            },
            Node::Print { expressions, .. } => self.eval_print(expressions, ctx),
        }
    }

    /// Looks up a variable by name.
    ///
    /// Named constants take precedence over variables.
    fn eval_identifier(name: &str, line: usize, ctx: &Context) -> EvalResult<Value> {
        if let Some(constant) = lookup_constant(name) {
            return Ok(Value::Number(constant));
        }

        ctx.get_variable(name)
           .cloned()
           .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string(),
                                                            line })
    }

    /// Registers a user function. The function table shares the body with
    /// the definition node.
    fn eval_function_def(name: &str,
                         params: &[String],
                         body: &Rc<Node>,
                         line: usize,
                         ctx: &mut Context)
                         -> EvalResult<ControlFlow> {
        if is_builtin(name) {
            return Err(RuntimeError::BuiltinRedefinition { name: name.to_string(),
                                                           line });
        }

        ctx.set_function(UserFunction { name:   name.to_string(),
                                        params: params.to_vec(),
                                        body:   Rc::clone(body), });

        Ok(ControlFlow::Value(Value::Null))
    }

    /// Evaluates every expression, concatenates their text without separator
    /// and sends it to the output sink.
    fn eval_print(&mut self, expressions: &[Node], ctx: &mut Context) -> EvalResult<ControlFlow> {
        let mut text = String::new();
        for expression in expressions {
            let value = propagate!(self.eval(expression, ctx)?);
            text.push_str(&value.to_string());
        }

        self.output.write_line(&text);
        Ok(ControlFlow::Value(Value::Null))
    }

    pub(crate) const fn call_depth(&self) -> usize {
        self.call_depth
    }

    pub(crate) const fn enter_call(&mut self) {
        self.call_depth += 1;
    }

    pub(crate) const fn leave_call(&mut self) {
        self.call_depth = self.call_depth.saturating_sub(1);
    }
}
