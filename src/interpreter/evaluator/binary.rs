/// Binary operator dispatch and the value-level operator table.
pub mod core;

/// Short-circuit `and` and `or`.
pub mod logic;

/// Assignment and compound assignment.
pub mod assignment;
