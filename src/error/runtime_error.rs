use thiserror::Error;

/// Represents all errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Tried to read a variable that is not defined in any live scope.
    #[error("Error on line {line}: Undefined variable '{name}'.")]
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a name that is neither a built-in nor a user function.
    #[error("Error on line {line}: Undefined function '{name}'.")]
    UndefinedFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The wrong number of arguments was supplied to a function.
    #[error("Error on line {line}: Function '{name}' expects {expected} argument(s), got {found}.")]
    ArityError {
        /// The name of the function.
        name:     String,
        /// Number of parameters the function declares.
        expected: usize,
        /// Number of arguments supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Attempted division by zero (`/`, `div` or `/=`).
    #[error("Error on line {line}: Division by zero.")]
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted `mod` with a zero divisor.
    #[error("Error on line {line}: Modulo by zero.")]
    ModuloByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A math operation was applied outside of its domain.
    #[error("Error on line {line}: Domain error in {function}: {details}.")]
    DomainError {
        /// Name of the function or operator.
        function: String,
        /// What was wrong with the argument.
        details:  String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// The left side of an assignment is not an identifier.
    #[error("Error on line {line}: Invalid assignment target.")]
    InvalidAssignmentTarget {
        /// The source line where the error occurred.
        line: usize,
    },
    /// `++`/`--` applied to something other than an identifier.
    #[error("Error on line {line}: Increment and decrement require a variable.")]
    InvalidIncrementTarget {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A call whose callee is not a plain function name.
    #[error("Error on line {line}: Only named functions can be called.")]
    InvalidCallee {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted to define a user function with the name of a built-in.
    #[error("Error on line {line}: Cannot redefine built-in function '{name}'.")]
    BuiltinRedefinition {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// User function calls nested deeper than the configured maximum.
    #[error("Error on line {line}: Maximum call depth of {limit} exceeded.")]
    CallDepthExceeded {
        /// The configured maximum depth.
        limit: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The tree being evaluated is nested deeper than the configured
    /// maximum.
    #[error("Error on line {line}: Expression nested more than {limit} levels deep.")]
    EvalDepthExceeded {
        /// The configured maximum depth.
        limit: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
}

impl RuntimeError {
    /// Line where the error was detected.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UndefinedVariable { line, .. }
            | Self::UndefinedFunction { line, .. }
            | Self::ArityError { line, .. }
            | Self::DivisionByZero { line }
            | Self::ModuloByZero { line }
            | Self::DomainError { line, .. }
            | Self::InvalidAssignmentTarget { line }
            | Self::InvalidIncrementTarget { line }
            | Self::InvalidCallee { line }
            | Self::BuiltinRedefinition { line, .. }
            | Self::CallDepthExceeded { line, .. }
            | Self::EvalDepthExceeded { line, .. } => *line,
        }
    }

    pub(crate) fn domain(function: &str, details: impl Into<String>, line: usize) -> Self {
        Self::DomainError { function: function.to_string(),
                            details: details.into(),
                            line }
    }
}
