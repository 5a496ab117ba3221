/// The context module holds the state a program runs against.
///
/// Variables live in a stack of scopes with a permanent global scope at the
/// bottom; user functions live in a single table and share their bodies with
/// the syntax tree they were defined in.
///
/// # Responsibilities
/// - Scoped variable lookup, definition and assignment.
/// - The user function table.
/// - Listing every name currently defined.
pub mod context;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, evaluates expressions and statements,
/// applies operators, calls built-in and user functions, and carries `return`
/// out of nested statements. It is the core execution engine of the
/// interpreter.
///
/// # Responsibilities
/// - Evaluates AST nodes against a [`context::Context`].
/// - Handles assignment, control flow and function calls.
/// - Reports runtime errors such as division by zero or undefined names.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a sequence of tokens,
/// each corresponding to a meaningful language element such as a number,
/// string, identifier, keyword or operator. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input text into tokens with kind, text and position.
/// - Resolves string escapes and named constants.
/// - Reports unterminated string literals.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token sequence produced by the lexer and
/// constructs the tree of statements and expressions that later phases
/// execute.
///
/// # Responsibilities
/// - Converts tokens into [`crate::ast::Node`] trees by recursive descent.
/// - Validates the grammar, reporting errors with line and column.
/// - Recovers after errors when parsing whole programs.
pub mod parser;
/// The session module ties the phases together.
///
/// An [`session::Interpreter`] owns an evaluator and a context and turns
/// source text into rendered results, one statement at a time.
pub mod session;
/// The value module defines the runtime data type for evaluation.
///
/// # Responsibilities
/// - Defines the `Value` enum: null, booleans, numbers and strings.
/// - Implements coercion, comparison and arithmetic rules.
/// - Provides the named mathematical constants.
pub mod value;
