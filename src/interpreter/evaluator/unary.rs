use crate::{
    ast::{Node, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        context::Context,
        evaluator::core::{ControlFlow, EvalResult, Evaluator, propagate},
        value::core::Value,
    },
};

impl Evaluator {
    /// Evaluates a unary operation node.
    ///
    /// Supported operators:
    /// - `Negate`: negation of the numeric coercion.
    /// - `Not`: negation of the truthiness.
    /// - `PreIncrement` / `PreDecrement`: update the variable, yield the new
    ///   value.
    /// - `PostIncrement` / `PostDecrement`: update the variable, yield the old
    ///   value.
    ///
    /// # Errors
    /// Increment and decrement need a variable that exists:
    /// [`RuntimeError::InvalidIncrementTarget`] for any other operand,
    /// [`RuntimeError::UndefinedVariable`] for an unknown name.
    pub(crate) fn eval_unary_op(&mut self,
                                op: UnaryOperator,
                                operand: &Node,
                                line: usize,
                                ctx: &mut Context)
                                -> EvalResult<ControlFlow> {
        let (step, yield_new) = match op {
            UnaryOperator::Negate => {
                let value = propagate!(self.eval(operand, ctx)?);
                return Ok(ControlFlow::Value(Value::Number(-value.to_number())));
            },
            UnaryOperator::Not => {
                let value = propagate!(self.eval(operand, ctx)?);
                return Ok(ControlFlow::Value(Value::Boolean(!value.to_bool())));
            },
            UnaryOperator::PreIncrement => (1.0, true),
            UnaryOperator::PreDecrement => (-1.0, true),
            UnaryOperator::PostIncrement => (1.0, false),
            UnaryOperator::PostDecrement => (-1.0, false),
        };

        let Node::Identifier { name, .. } = operand else {
            return Err(RuntimeError::InvalidIncrementTarget { line });
        };

        let old = ctx.get_variable(name)
                     .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.clone(),
                                                                      line })?
                     .to_number();
        let new = old + step;

        ctx.set_variable(name, Value::Number(new));

        Ok(ControlFlow::Value(Value::Number(if yield_new { new } else { old })))
    }
}
