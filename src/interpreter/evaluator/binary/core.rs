use std::cmp::Ordering;

use crate::{
    ast::{BinaryOperator, Node},
    interpreter::{
        context::Context,
        evaluator::core::{ControlFlow, EvalResult, Evaluator, propagate},
        value::core::Value,
    },
};

impl Evaluator {
    /// Evaluates a binary operation node.
    ///
    /// Assignment forms evaluate their own operands. Any other operator
    /// heads a left-leaning chain such as `1 + 2 - 3 * 4`: the chain is
    /// unrolled down its left spine and folded from the innermost operand
    /// outward, so long flat sums do not nest evaluation calls. Each step
    /// evaluates its right operand and applies [`apply_binary`], except
    /// `and`/`or`, which short-circuit.
    pub(crate) fn eval_binary_op(&mut self,
                                 left: &Node,
                                 op: BinaryOperator,
                                 right: &Node,
                                 line: usize,
                                 ctx: &mut Context)
                                 -> EvalResult<ControlFlow> {
        if op.is_assignment() {
            return self.eval_assignment(left, op, right, line, ctx);
        }

        let mut links = vec![(op, right, line)];
        let mut first = left;
        while let Node::BinaryOp { left, op, right, line } = first
              && !op.is_assignment()
        {
            links.push((*op, &**right, *line));
            first = &**left;
        }

        let mut acc = propagate!(self.eval(first, ctx)?);
        for (op, right, line) in links.into_iter().rev() {
            acc = match op {
                BinaryOperator::And | BinaryOperator::Or => {
                    propagate!(self.eval_logic(&acc, op, right, ctx)?)
                },
                _ => {
                    let right = propagate!(self.eval(right, ctx)?);
                    apply_binary(op, &acc, &right, line)?
                },
            };
        }

        Ok(ControlFlow::Value(acc))
    }
}

/// Applies a binary operator to two evaluated values.
///
/// Arithmetic follows the [`Value`] rules: `+` concatenates when either side
/// is a string, the other arithmetic operators coerce to numbers. Equality
/// requires matching variants; ordering compares strings lexicographically
/// and everything else numerically. `and`/`or` combine truthiness. A compound
/// assignment applies its arithmetic operator and plain `=` yields the right
/// value.
///
/// # Errors
/// Division and `div` by zero, `mod` by zero, and undefined powers.
///
/// # Example
/// ```
/// use gloss::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::core::apply_binary, value::core::Value},
/// };
///
/// let v = apply_binary(BinaryOperator::IntDivide, &Value::Number(-7.0), &Value::Number(2.0), 1);
/// assert_eq!(v.unwrap(), Value::Number(-3.0));
///
/// let v = apply_binary(BinaryOperator::Equal, &Value::Number(1.0), &Value::from("1"), 1);
/// assert_eq!(v.unwrap(), Value::Boolean(false));
///
/// assert!(apply_binary(BinaryOperator::Modulo, &Value::Number(5.0), &Value::Number(0.0), 1).is_err());
/// ```
pub fn apply_binary(op: BinaryOperator,
                    left: &Value,
                    right: &Value,
                    line: usize)
                    -> EvalResult<Value> {
    use BinaryOperator::{
        Add, AddAssign, And, Assign, Divide, DivideAssign, Equal, Greater, GreaterEqual,
        IntDivide, Less, LessEqual, Modulo, Multiply, MultiplyAssign, NotEqual, Or, Power,
        Subtract, SubtractAssign,
    };

    let ordering = || left.compare(right);

    match op {
        Add | AddAssign => Ok(left.sum(right)),
        Subtract | SubtractAssign => Ok(left.difference(right)),
        Multiply | MultiplyAssign => Ok(left.product(right)),
        Divide | DivideAssign => left.quotient(right, line),
        Modulo => left.remainder(right, line),
        IntDivide => left.truncated_quotient(right, line),
        Power => left.power(right, line),
        Equal => Ok(Value::Boolean(left == right)),
        NotEqual => Ok(Value::Boolean(left != right)),
        Less => Ok(Value::Boolean(ordering() == Some(Ordering::Less))),
        Greater => Ok(Value::Boolean(ordering() == Some(Ordering::Greater))),
        LessEqual => Ok(Value::Boolean(matches!(ordering(),
                                                Some(Ordering::Less | Ordering::Equal)))),
        GreaterEqual => Ok(Value::Boolean(matches!(ordering(),
                                                   Some(Ordering::Greater | Ordering::Equal)))),
        And => Ok(Value::Boolean(left.to_bool() && right.to_bool())),
        Or => Ok(Value::Boolean(left.to_bool() || right.to_bool())),
        Assign => Ok(right.clone()),
    }
}
