use crate::{
    ast::{BinaryOperator, Node},
    error::RuntimeError,
    interpreter::{
        context::Context,
        evaluator::{
            binary::core::apply_binary,
            core::{ControlFlow, EvalResult, Evaluator, propagate},
        },
    },
};

impl Evaluator {
    /// Evaluates `=` and the compound assignments `+= -= *= /=`.
    ///
    /// The right side is evaluated first. A compound assignment then combines
    /// the current value of the variable with it, read from whichever scope
    /// holds it. The result is always written to the innermost scope and is
    /// also the value of the expression.
    ///
    /// # Errors
    /// - [`RuntimeError::InvalidAssignmentTarget`] if the target is not an
    ///   identifier.
    /// - [`RuntimeError::UndefinedVariable`] for a compound assignment to a
    ///   variable that does not exist.
    pub(crate) fn eval_assignment(&mut self,
                                  target: &Node,
                                  op: BinaryOperator,
                                  value: &Node,
                                  line: usize,
                                  ctx: &mut Context)
                                  -> EvalResult<ControlFlow> {
        let Node::Identifier { name, .. } = target else {
            return Err(RuntimeError::InvalidAssignmentTarget { line });
        };

        let right = propagate!(self.eval(value, ctx)?);

        let result = match op.compound_base() {
            Some(base) => {
                let current =
                    ctx.get_variable(name)
                       .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.clone(),
                                                                        line })?;
                apply_binary(base, current, &right, line)?
            },
            None => right,
        };

        ctx.set_variable(name, result.clone());
        Ok(ControlFlow::Value(result))
    }
}
