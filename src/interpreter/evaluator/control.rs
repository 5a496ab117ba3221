use crate::{
    ast::Node,
    interpreter::{
        context::Context,
        evaluator::core::{ControlFlow, EvalResult, Evaluator, propagate},
        value::core::Value,
    },
};

impl Evaluator {
    /// Evaluates `if`, as a statement or as an expression.
    ///
    /// Exactly one branch runs, chosen by the truthiness of the condition. A
    /// false condition without an `else` branch yields `null`.
    pub(crate) fn eval_if(&mut self,
                          condition: &Node,
                          then_branch: &Node,
                          else_branch: Option<&Node>,
                          ctx: &mut Context)
                          -> EvalResult<ControlFlow> {
        let condition = propagate!(self.eval(condition, ctx)?);

        if condition.to_bool() {
            self.eval(then_branch, ctx)
        } else if let Some(else_branch) = else_branch {
            self.eval(else_branch, ctx)
        } else {
            Ok(ControlFlow::Value(Value::Null))
        }
    }

    /// Evaluates a `while` loop.
    ///
    /// The condition is checked before every iteration. The result is the
    /// value of the last iteration, or `null` if the body never ran. A
    /// `return` inside the body ends the loop and keeps unwinding.
    pub(crate) fn eval_while(&mut self,
                             condition: &Node,
                             body: &Node,
                             ctx: &mut Context)
                             -> EvalResult<ControlFlow> {
        let mut last = Value::Null;

        loop {
            let keep_going = propagate!(self.eval(condition, ctx)?).to_bool();
            if !keep_going {
                break;
            }

            last = propagate!(self.eval(body, ctx)?);
        }

        Ok(ControlFlow::Value(last))
    }

    /// Evaluates a `for` loop.
    ///
    /// The initializer runs once, in the current scope, so a loop variable it
    /// assigns outlives the loop. Then, while the condition holds (a missing
    /// condition always holds), the body runs followed by the update. The
    /// result follows the rules of [`Evaluator::eval_while`].
    pub(crate) fn eval_for(&mut self,
                           init: Option<&Node>,
                           condition: Option<&Node>,
                           update: Option<&Node>,
                           body: &Node,
                           ctx: &mut Context)
                           -> EvalResult<ControlFlow> {
        if let Some(init) = init {
            propagate!(self.eval(init, ctx)?);
        }

        let mut last = Value::Null;

        loop {
            if let Some(condition) = condition {
                let keep_going = propagate!(self.eval(condition, ctx)?).to_bool();
                if !keep_going {
                    break;
                }
            }

            last = propagate!(self.eval(body, ctx)?);

            if let Some(update) = update {
                propagate!(self.eval(update, ctx)?);
            }
        }

        Ok(ControlFlow::Value(last))
    }

    /// Evaluates a block in a new scope.
    ///
    /// Statements run in order; a `return` stops the block early. The scope
    /// is popped on every exit path, including errors. The result is the
    /// value of the last statement, or `null` for an empty block.
    pub(crate) fn eval_block(&mut self,
                             statements: &[Node],
                             ctx: &mut Context)
                             -> EvalResult<ControlFlow> {
        ctx.scoped(|ctx| {
               let mut last = Value::Null;
               for statement in statements {
                   last = propagate!(self.eval(statement, ctx)?);
               }
               Ok(ControlFlow::Value(last))
           })
    }
}
