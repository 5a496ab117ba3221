use std::{
    collections::{BTreeSet, HashMap},
    rc::Rc,
};

use log::trace;

use crate::{ast::Node, interpreter::value::core::Value};

/// A function defined in source with `function`.
///
/// The body is shared with the definition node that produced it, so the
/// function stays callable after the tree it came from is dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct UserFunction {
    /// The name of the function.
    pub name:   String,
    /// The parameter names, bound by position on each call.
    pub params: Vec<String>,
    /// The body evaluated on each call.
    pub body:   Rc<Node>,
}

impl UserFunction {
    /// Number of parameters the function declares.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// Stores the runtime state a program runs against.
///
/// A `Context` holds a stack of variable scopes and the table of user
/// functions. The bottom scope is the global scope; it always exists and is
/// never popped. Functions are global regardless of where they are defined.
///
/// ## Usage
///
/// One `Context` is created per session and handed to the evaluator for every
/// statement, so variables and functions persist between statements.
///
/// # Example
/// ```
/// use gloss::interpreter::{context::Context, value::core::Value};
///
/// let mut ctx = Context::new();
/// ctx.set_variable("x", Value::Number(1.0));
///
/// ctx.push_scope();
/// ctx.set_variable("y", Value::Number(2.0));
/// assert!(ctx.has_variable("x"));
/// ctx.pop_scope();
///
/// assert!(!ctx.has_variable("y"));
/// ```
#[derive(Debug, Clone)]
pub struct Context {
    scopes:    Vec<HashMap<String, Value>>,
    functions: HashMap<String, UserFunction>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a context with one empty global scope and no functions.
    #[must_use]
    pub fn new() -> Self {
        Self { scopes:    vec![HashMap::new()],
               functions: HashMap::new(), }
    }

    /// Defines or overwrites a variable in the innermost scope.
    ///
    /// Shadows any variable of the same name in an outer scope; the outer
    /// value is untouched and visible again once the scope is popped.
    ///
    /// # Example
    /// ```
    /// use gloss::interpreter::{context::Context, value::core::Value};
    ///
    /// let mut ctx = Context::new();
    /// ctx.set_variable("count", Value::Number(0.0));
    ///
    /// ctx.push_scope();
    /// ctx.set_variable("count", Value::Number(1.0));
    /// assert_eq!(ctx.get_variable("count"), Some(&Value::Number(1.0)));
    /// ctx.pop_scope();
    ///
    /// assert_eq!(ctx.get_variable("count"), Some(&Value::Number(0.0)));
    /// ```
    pub fn set_variable(&mut self, name: &str, value: Value) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), value);
        }
    }

    /// Looks up a variable, innermost scope first.
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<&Value> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Returns `true` if any live scope defines `name`.
    #[must_use]
    pub fn has_variable(&self, name: &str) -> bool {
        self.get_variable(name).is_some()
    }

    /// Removes the innermost binding of `name` and returns its value.
    ///
    /// An outer binding that was shadowed becomes visible again.
    pub fn remove_variable(&mut self, name: &str) -> Option<Value> {
        self.scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.remove(name))
    }

    /// Pushes a new, empty innermost scope.
    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
        trace!("push scope, depth {}", self.scopes.len());
    }

    /// Pops the innermost scope and its variables.
    ///
    /// The global scope is never popped; returns `false` when only the global
    /// scope remains.
    pub fn pop_scope(&mut self) -> bool {
        if self.scopes.len() <= 1 {
            return false;
        }

        self.scopes.pop();
        trace!("pop scope, depth {}", self.scopes.len());
        true
    }

    /// Number of live scopes, including the global one.
    #[must_use]
    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    /// Runs `f` inside a fresh scope.
    ///
    /// The scope is pushed before `f` runs and popped after it returns,
    /// whatever the outcome, so a failing evaluation never leaks variables
    /// into the enclosing scope.
    ///
    /// # Example
    /// ```
    /// use gloss::interpreter::{context::Context, value::core::Value};
    ///
    /// let mut ctx = Context::new();
    /// let result: Result<(), &str> = ctx.scoped(|ctx| {
    ///                                       ctx.set_variable("tmp", Value::Null);
    ///                                       Err("failed")
    ///                                   });
    ///
    /// assert!(result.is_err());
    /// assert!(!ctx.has_variable("tmp"));
    /// assert_eq!(ctx.scope_depth(), 1);
    /// ```
    pub fn scoped<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.push_scope();
        let result = f(self);
        self.pop_scope();
        result
    }

    /// Registers a user function, replacing any previous definition of the
    /// same name.
    pub fn set_function(&mut self, function: UserFunction) {
        self.functions.insert(function.name.clone(), function);
    }

    /// Looks up a user function by name.
    #[must_use]
    pub fn get_function(&self, name: &str) -> Option<&UserFunction> {
        self.functions.get(name)
    }

    /// Returns `true` if a user function called `name` exists.
    #[must_use]
    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Removes a user function and returns it.
    pub fn remove_function(&mut self, name: &str) -> Option<UserFunction> {
        self.functions.remove(name)
    }

    /// Drops every variable and function, leaving one empty global scope.
    pub fn clear(&mut self) {
        self.scopes.clear();
        self.scopes.push(HashMap::new());
        self.functions.clear();
    }

    /// All variable names across live scopes plus all function names,
    /// deduplicated and sorted.
    ///
    /// # Example
    /// ```
    /// use gloss::interpreter::{context::Context, value::core::Value};
    ///
    /// let mut ctx = Context::new();
    /// ctx.set_variable("b", Value::Null);
    /// ctx.push_scope();
    /// ctx.set_variable("a", Value::Null);
    /// ctx.set_variable("b", Value::Null);
    ///
    /// let names: Vec<String> = ctx.list_identifiers().into_iter().collect();
    /// assert_eq!(names, ["a", "b"]);
    /// ```
    #[must_use]
    pub fn list_identifiers(&self) -> BTreeSet<String> {
        self.scopes
            .iter()
            .flat_map(HashMap::keys)
            .chain(self.functions.keys())
            .cloned()
            .collect()
    }
}
