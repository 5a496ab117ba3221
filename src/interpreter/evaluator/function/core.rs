use ::log::trace;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        context::Context,
        evaluator::{
            core::{ControlFlow, EvalResult, Evaluator, propagate},
            function::{builtin, log, min_max, root},
        },
        value::core::Value,
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives a slice of evaluated argument values and the line
/// number, and returns the computed value.
type BuiltinFn = fn(&[Value], usize) -> EvalResult<Value>;

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - the number of arguments,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: usize,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of all built-in functions.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "sin"   => { arity: 1, func: builtin::sin },
    "cos"   => { arity: 1, func: builtin::cos },
    "tan"   => { arity: 1, func: builtin::tan },
    "asin"  => { arity: 1, func: builtin::asin },
    "acos"  => { arity: 1, func: builtin::acos },
    "atan"  => { arity: 1, func: builtin::atan },
    "sqrt"  => { arity: 1, func: builtin::sqrt },
    "cbrt"  => { arity: 1, func: builtin::cbrt },
    "root"  => { arity: 2, func: root::root },
    "log"   => { arity: 1, func: |args, line| log::log("log", args, line) },
    "ln"    => { arity: 1, func: |args, line| log::log("ln", args, line) },
    "log10" => { arity: 1, func: log::log10 },
    "log2"  => { arity: 1, func: log::log2 },
    "exp"   => { arity: 1, func: builtin::exp },
    "abs"   => { arity: 1, func: builtin::abs },
    "pow"   => { arity: 2, func: root::pow },
    "min"   => { arity: 2, func: |args, line| min_max::min_max("min", args, line) },
    "max"   => { arity: 2, func: |args, line| min_max::min_max("max", args, line) },
    "floor" => { arity: 1, func: builtin::floor },
    "ceil"  => { arity: 1, func: builtin::ceil },
    "round" => { arity: 1, func: builtin::round },
}

/// Returns `true` if `name` is a built-in function.
///
/// # Example
/// ```
/// use gloss::interpreter::evaluator::function::core::is_builtin;
///
/// assert!(is_builtin("sqrt"));
/// assert!(!is_builtin("square"));
/// ```
#[must_use]
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_TABLE.iter().any(|builtin| builtin.name == name)
}

/// Calls a built-in by name with already evaluated arguments.
///
/// Returns `None` when no built-in has that name.
///
/// # Example
/// ```
/// use gloss::interpreter::{evaluator::function::core::call_builtin, value::core::Value};
///
/// let v = call_builtin("max", &[Value::Number(2.0), Value::Number(7.0)], 1);
/// assert_eq!(v.unwrap().unwrap(), Value::Number(7.0));
/// assert!(call_builtin("max", &[Value::Number(2.0)], 1).unwrap().is_err());
/// assert!(call_builtin("nope", &[], 1).is_none());
/// ```
#[must_use]
pub fn call_builtin(name: &str, args: &[Value], line: usize) -> Option<EvalResult<Value>> {
    let builtin = BUILTIN_TABLE.iter().find(|builtin| builtin.name == name)?;

    if args.len() != builtin.arity {
        return Some(Err(RuntimeError::ArityError { name: name.to_string(),
                                                   expected: builtin.arity,
                                                   found: args.len(),
                                                   line }));
    }

    Some((builtin.func)(args, line))
}

/// Converts exactly `N` arguments to numbers.
///
/// Every builtin starts with this, so a builtin called directly with the
/// wrong number of arguments fails cleanly instead of indexing out of
/// bounds.
pub(crate) fn numeric_args<const N: usize>(name: &str,
                                           args: &[Value],
                                           line: usize)
                                           -> EvalResult<[f64; N]> {
    let args: &[Value; N] =
        args.try_into()
            .map_err(|_| RuntimeError::ArityError { name: name.to_string(),
                                                    expected: N,
                                                    found: args.len(),
                                                    line })?;

    Ok(args.each_ref().map(Value::to_number))
}

impl Evaluator {
    /// Evaluates a function call.
    ///
    /// The callee must be a plain name. Arguments are evaluated left to
    /// right. Built-ins are checked first, then user functions.
    ///
    /// # Errors
    /// - [`RuntimeError::InvalidCallee`] if the callee is not an identifier.
    /// - [`RuntimeError::ArityError`] on a wrong argument count.
    /// - [`RuntimeError::UndefinedFunction`] for an unknown name.
    pub(crate) fn eval_call(&mut self,
                            callee: &Node,
                            arguments: &[Node],
                            line: usize,
                            ctx: &mut Context)
                            -> EvalResult<ControlFlow> {
        let Node::Identifier { name, .. } = callee else {
            return Err(RuntimeError::InvalidCallee { line });
        };

        let mut values = Vec::with_capacity(arguments.len());
        for argument in arguments {
            values.push(propagate!(self.eval(argument, ctx)?));
        }

        if let Some(result) = call_builtin(name, &values, line) {
            return result.map(ControlFlow::Value);
        }

        self.call_user_function(name, values, line, ctx)
            .map(ControlFlow::Value)
    }

    /// Executes a user-defined function.
    ///
    /// Parameters are bound by position in a new scope, the body runs, and a
    /// `return` inside it becomes the call's value. A body that ends without
    /// `return` yields `null`.
    ///
    /// # Errors
    /// - Unknown function name.
    /// - Wrong number of arguments.
    /// - [`RuntimeError::CallDepthExceeded`] when too many calls are active.
    fn call_user_function(&mut self,
                          name: &str,
                          args: Vec<Value>,
                          line: usize,
                          ctx: &mut Context)
                          -> EvalResult<Value> {
        let function =
            ctx.get_function(name)
               .cloned()
               .ok_or_else(|| RuntimeError::UndefinedFunction { name: name.to_string(),
                                                                line })?;

        if args.len() != function.arity() {
            return Err(RuntimeError::ArityError { name: name.to_string(),
                                                  expected: function.arity(),
                                                  found: args.len(),
                                                  line });
        }

        let limit = self.config().max_call_depth;
        if self.call_depth() >= limit {
            return Err(RuntimeError::CallDepthExceeded { limit, line });
        }

        trace!("call {name} with {} argument(s), depth {}", args.len(), self.call_depth() + 1);

        self.enter_call();
        let result = ctx.scoped(|ctx| {
                            for (param, value) in function.params.iter().zip(args) {
                                ctx.set_variable(param, value);
                            }
                            self.eval(&function.body, ctx)
                        });
        self.leave_call();

        match result? {
            ControlFlow::Return(value) => Ok(value),
            ControlFlow::Value(_) => Ok(Value::Null),
        }
    }
}
