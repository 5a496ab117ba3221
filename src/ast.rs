use std::{fmt, rc::Rc};

use crate::interpreter::value::core::Value;

/// An abstract syntax tree (AST) node.
///
/// `Node` covers every construct of the language, from literals and variables
/// to loops, function definitions and `print`. Expressions and statements
/// share the one type: every node evaluates to a value, statements usually to
/// `null`. Each variant records the source line it started on.
///
/// Children are owned by their parent, except the body of a function
/// definition which is shared with the function table once the definition
/// runs.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A literal value (number, string or boolean).
    Literal {
        /// The constant value.
        value: Value,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a variable or named constant.
    Identifier {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A binary operation, including assignment and compound assignment.
    BinaryOp {
        /// Left operand. The target for assignment forms.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A unary operation (negation, `not`, increment and decrement).
    UnaryOp {
        /// The unary operator to apply.
        op:      UnaryOperator,
        /// The operand expression.
        operand: Box<Self>,
        /// Line number in the source code.
        line:    usize,
    },
    /// Function call expression (e.g. `sin(x)`).
    Call {
        /// The called expression. Only identifiers can be called.
        callee:    Box<Self>,
        /// Arguments to the function.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// Conditional, as a statement or as an expression.
    If {
        /// The condition.
        condition:   Box<Self>,
        /// Evaluated if the condition is truthy.
        then_branch: Box<Self>,
        /// Evaluated otherwise, when present.
        else_branch: Option<Box<Self>>,
        /// Line number in the source code.
        line:        usize,
    },
    /// `while (condition) body`
    While {
        /// The loop condition, checked before every iteration.
        condition: Box<Self>,
        /// The loop body.
        body:      Box<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `for (init; condition; update) body`, each header part optional.
    For {
        /// Runs once before the loop.
        init:      Option<Box<Self>>,
        /// Checked before every iteration. Absent means always true.
        condition: Option<Box<Self>>,
        /// Runs after every iteration.
        update:    Option<Box<Self>>,
        /// The loop body.
        body:      Box<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// A braced sequence of statements with its own scope.
    Block {
        /// Statements inside the block.
        statements: Vec<Self>,
        /// Line number in the source code.
        line:       usize,
    },
    /// A user-defined function declaration.
    FunctionDef {
        /// The name of the function.
        name:   String,
        /// The parameter names.
        params: Vec<String>,
        /// The body evaluated on each call.
        body:   Rc<Self>,
        /// Line number in the source code.
        line:   usize,
    },
    /// `return` with an optional value.
    Return {
        /// The returned expression. `null` when absent.
        value: Option<Box<Self>>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `print a, b, ...`
    Print {
        /// The printed expressions, concatenated without separator.
        expressions: Vec<Self>,
        /// Line number in the source code.
        line:        usize,
    },
}

impl Node {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use gloss::ast::Node;
    ///
    /// let node = Node::Identifier { name: "x".to_string(),
    ///                               line: 5, };
    ///
    /// assert_eq!(node.line(), 5);
    /// ```
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Identifier { line, .. }
            | Self::BinaryOp { line, .. }
            | Self::UnaryOp { line, .. }
            | Self::Call { line, .. }
            | Self::If { line, .. }
            | Self::While { line, .. }
            | Self::For { line, .. }
            | Self::Block { line, .. }
            | Self::FunctionDef { line, .. }
            | Self::Return { line, .. }
            | Self::Print { line, .. } => *line,
        }
    }

    /// Returns `true` for the statement-shaped nodes whose result an
    /// interactive session does not show.
    #[must_use]
    pub const fn is_statement(&self) -> bool {
        matches!(self,
                 Self::Block { .. }
                 | Self::If { .. }
                 | Self::While { .. }
                 | Self::For { .. }
                 | Self::Print { .. }
                 | Self::FunctionDef { .. })
    }
}

/// Represents a binary operator.
///
/// Binary operators include arithmetic, comparisons, logic and the
/// assignment family.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition or concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,
    /// Multiplication (`*`)
    Multiply,
    /// Division (`/`)
    Divide,
    /// Remainder (`mod`)
    Modulo,
    /// Truncating division (`div`)
    IntDivide,
    /// Exponentiation (`**` or `^`)
    Power,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Logical and (`and`)
    And,
    /// Logical or (`or`)
    Or,
    /// Assignment (`=`)
    Assign,
    /// `+=`
    AddAssign,
    /// `-=`
    SubtractAssign,
    /// `*=`
    MultiplyAssign,
    /// `/=`
    DivideAssign,
}

impl BinaryOperator {
    /// Returns `true` for `=` and the compound assignments.
    #[must_use]
    pub const fn is_assignment(self) -> bool {
        matches!(self,
                 Self::Assign
                 | Self::AddAssign
                 | Self::SubtractAssign
                 | Self::MultiplyAssign
                 | Self::DivideAssign)
    }

    /// The arithmetic operator a compound assignment applies.
    ///
    /// # Example
    /// ```
    /// use gloss::ast::BinaryOperator;
    ///
    /// assert_eq!(BinaryOperator::AddAssign.compound_base(), Some(BinaryOperator::Add));
    /// assert_eq!(BinaryOperator::Assign.compound_base(), None);
    /// ```
    #[must_use]
    pub const fn compound_base(self) -> Option<Self> {
        match self {
            Self::AddAssign => Some(Self::Add),
            Self::SubtractAssign => Some(Self::Subtract),
            Self::MultiplyAssign => Some(Self::Multiply),
            Self::DivideAssign => Some(Self::Divide),
            _ => None,
        }
    }
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `not x` or `!x`).
    Not,
    /// `++x`
    PreIncrement,
    /// `--x`
    PreDecrement,
    /// `x++`
    PostIncrement,
    /// `x--`
    PostDecrement,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOperator::{
            Add, AddAssign, And, Assign, Divide, DivideAssign, Equal, Greater, GreaterEqual,
            IntDivide, Less, LessEqual, Modulo, Multiply, MultiplyAssign, NotEqual, Or, Power,
            Subtract, SubtractAssign,
        };
        let operator = match self {
            Add => "+",
            Subtract => "-",
            Multiply => "*",
            Divide => "/",
            Modulo => "mod",
            IntDivide => "div",
            Power => "**",
            Equal => "==",
            NotEqual => "!=",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            And => "and",
            Or => "or",
            Assign => "=",
            AddAssign => "+=",
            SubtractAssign => "-=",
            MultiplyAssign => "*=",
            DivideAssign => "/=",
        };
        write!(f, "{operator}")
    }
}

fn write_separated(f: &mut fmt::Formatter<'_>, nodes: &[Node], separator: &str) -> fmt::Result {
    for (index, node) in nodes.iter().enumerate() {
        if index > 0 {
            write!(f, "{separator}")?;
        }

        write!(f, "{node}")?;
    }

    Ok(())
}

impl fmt::Display for Node {
    /// Renders the node in a fully parenthesized source-like form.
    ///
    /// # Example
    /// ```
    /// use gloss::interpreter::{lexer::tokenize, parser::parse};
    ///
    /// let node = parse(&tokenize("1 + 2 * x").unwrap()).unwrap();
    /// assert_eq!(node.to_string(), "(1 + (2 * x))");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal { value: Value::String(s), .. } => write!(f, "\"{s}\""),
            Self::Literal { value, .. } => write!(f, "{value}"),
            Self::Identifier { name, .. } => write!(f, "{name}"),
            Self::BinaryOp { left, op, right, .. } => write!(f, "({left} {op} {right})"),
            Self::UnaryOp { op, operand, .. } => match op {
                UnaryOperator::Negate => write!(f, "(-{operand})"),
                UnaryOperator::Not => write!(f, "(not {operand})"),
                UnaryOperator::PreIncrement => write!(f, "(++{operand})"),
                UnaryOperator::PreDecrement => write!(f, "(--{operand})"),
                UnaryOperator::PostIncrement => write!(f, "({operand}++)"),
                UnaryOperator::PostDecrement => write!(f, "({operand}--)"),
            },
            Self::Call { callee, arguments, .. } => {
                write!(f, "{callee}(")?;
                write_separated(f, arguments, ", ")?;
                write!(f, ")")
            },
            Self::If { condition,
                       then_branch,
                       else_branch,
                       .. } => {
                write!(f, "if ({condition}) {then_branch}")?;
                if let Some(else_branch) = else_branch {
                    write!(f, " else {else_branch}")?;
                }
                Ok(())
            },
            Self::While { condition, body, .. } => write!(f, "while ({condition}) {body}"),
            Self::For { init,
                        condition,
                        update,
                        body,
                        .. } => {
                write!(f, "for (")?;
                if let Some(init) = init {
                    write!(f, "{init}")?;
                }
                write!(f, "; ")?;
                if let Some(condition) = condition {
                    write!(f, "{condition}")?;
                }
                write!(f, "; ")?;
                if let Some(update) = update {
                    write!(f, "{update}")?;
                }
                write!(f, ") {body}")
            },
            Self::Block { statements, .. } => {
                if statements.is_empty() {
                    return write!(f, "{{ }}");
                }
                write!(f, "{{ ")?;
                write_separated(f, statements, "; ")?;
                write!(f, " }}")
            },
            Self::FunctionDef { name, params, body, .. } => {
                write!(f, "function {name}({}) {body}", params.join(", "))
            },
            Self::Return { value: Some(value), .. } => write!(f, "return {value}"),
            Self::Return { value: None, .. } => write!(f, "return"),
            Self::Print { expressions, .. } => {
                write!(f, "print ")?;
                write_separated(f, expressions, ", ")
            },
        }
    }
}
