use crate::{
    ast::{BinaryOperator, Node},
    interpreter::{
        context::Context,
        evaluator::core::{ControlFlow, EvalResult, Evaluator, propagate},
        value::core::Value,
    },
};

impl Evaluator {
    /// Finishes `and` / `or` once the left operand is known.
    ///
    /// The right operand is only evaluated when the left one does not decide
    /// the result, so `false and (1 / 0)` is simply `false`. The result is
    /// always a boolean.
    pub(crate) fn eval_logic(&mut self,
                             left: &Value,
                             op: BinaryOperator,
                             right: &Node,
                             ctx: &mut Context)
                             -> EvalResult<ControlFlow> {
        let left = left.to_bool();

        let decided = match op {
            BinaryOperator::And => !left,
            _ => left,
        };
        if decided {
            return Ok(ControlFlow::Value(Value::Boolean(left)));
        }

        let right = propagate!(self.eval(right, ctx)?).to_bool();
        Ok(ControlFlow::Value(Value::Boolean(right)))
    }
}
