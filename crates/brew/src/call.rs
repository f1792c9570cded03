//! Call machinery: argument binding, frame/alias-table/return-flag lifecycle,
//! reference-parameter writeback, and the closure continuation update
//! (`spec.md` §4.5, §5).
//!
//! Grounded on `run_func`/`run_lambda_func` in
//! `examples/original_source/Brewin/interpreterv4.py`. The recursion guard
//! (`enter_call`/`leave_call`) is ambient robustness grounded on the
//! teacher's `ResourceTracker` recursion check in
//! `examples/scostello-monty/crates/monty/src/namespace.rs`.

use std::rc::Rc;

use crate::alias::AliasTable;
use crate::ast::{Expr, Func, Param};
use crate::environment::Frame;
use crate::error::{InterpreterError, Result};
use crate::io::{InputSource, OutputSink, TraceSink};
use crate::value::{Closure, Value};
use crate::Interpreter;

impl<O: OutputSink, I: InputSource, T: TraceSink> Interpreter<O, I, T> {
    pub(crate) fn call_function(&mut self, func: &Rc<Func>, args: &[Expr]) -> Result<Value> {
        if func.arity() != args.len() {
            return Err(InterpreterError::name(format!(
                "'{}' expects {} argument(s), got {}",
                func.name,
                func.arity(),
                args.len()
            )));
        }
        self.enter_call()?;
        self.dump_vars(&format!("calling {}", func.name));

        let arg_values = self.eval_args(args)?;
        let ref_pairs = self.bind_params(&func.params, args, arg_values);
        self.aliases.push(AliasTable::from_pairs(ref_pairs.clone()));
        self.lambda_floors.push(None);
        self.return_flags.push(false);
        self.return_values.push(Value::Nil);

        let exec_result = self.exec_block(&func.statements);

        self.return_flags.pop();
        let ret_value = self.return_values.pop().expect("return stack underflow");
        self.lambda_floors.pop();
        self.aliases.pop();
        self.unbind_params(&ref_pairs, None);
        self.dump_vars(&format!("ending {}", func.name));
        self.leave_call();

        exec_result.map(|()| ret_value)
    }

    pub(crate) fn call_closure(&mut self, closure: &Closure, args: &[Expr]) -> Result<Value> {
        if closure.lambda.params.len() != args.len() {
            return Err(InterpreterError::name(format!(
                "lambda expects {} argument(s), got {}",
                closure.lambda.params.len(),
                args.len()
            )));
        }
        self.enter_call()?;
        self.dump_vars("calling lambda");

        let arg_values = self.eval_args(args)?;

        let pre = self.env.depth();
        for frame in closure.captured.borrow().iter() {
            self.env.push_frame(frame.clone());
        }
        let floor = self.env.depth();

        let ref_pairs = self.bind_params(&closure.lambda.params, args, arg_values);
        self.aliases.push(AliasTable::from_pairs(ref_pairs.clone()));
        self.lambda_floors.push(Some(floor));
        self.return_flags.push(false);
        self.return_values.push(Value::Nil);

        let exec_result = self.exec_block(&closure.lambda.statements);

        self.return_flags.pop();
        let ret_value = self.return_values.pop().expect("return stack underflow");
        self.lambda_floors.pop();
        self.aliases.pop();
        self.unbind_params(&ref_pairs, Some(floor));

        // Lambda continuation (`spec.md` §4.2): whatever the closure's own
        // captured frames now look like (after the param frame above them
        // was popped by `unbind_params`) becomes its updated capture.
        let updated_capture: Vec<Frame> = self.env.split_off(pre);
        *closure.captured.borrow_mut() = updated_capture;

        self.dump_vars("ending lambda");
        self.leave_call();
        exec_result.map(|()| ret_value)
    }

    fn eval_args(&mut self, args: &[Expr]) -> Result<Vec<Value>> {
        args.iter().map(|arg| self.eval_expr(arg)).collect()
    }

    /// Pushes a fresh frame and binds each (formal, actual) pair: reference
    /// parameters store the evaluated value directly, by-value parameters
    /// store a deep copy (`spec.md` §4.5 step 3). Returns the (formal,
    /// actual-name) pairs needed for the alias graph and call-exit writeback
    /// — only reference parameters bound to a plain variable actual
    /// participate (`spec.md` §4.3).
    fn bind_params(&mut self, params: &[Param], args: &[Expr], values: Vec<Value>) -> Vec<(String, String)> {
        self.env.push();
        let mut ref_pairs = Vec::new();
        for ((param, arg_expr), value) in params.iter().zip(args.iter()).zip(values) {
            match param {
                Param::ByReference(name) => {
                    self.env.define(name, value);
                    if let Expr::Var(target) = arg_expr {
                        if target.field.is_none() {
                            ref_pairs.push((name.clone(), target.head.clone()));
                        }
                    }
                }
                Param::ByValue(name) => {
                    self.env.define(name, value.deep_copy());
                }
            }
        }
        ref_pairs
    }

    /// Pops the call's parameter frame and writes each reference parameter's
    /// final value back to its caller-side actual, at the innermost frame
    /// below `floor` (or the whole remaining stack for a plain function
    /// call) that binds it (`spec.md` §4.5 step 6).
    fn unbind_params(&mut self, ref_pairs: &[(String, String)], floor: Option<usize>) {
        let frame = self.env.pop();
        for (formal, actual) in ref_pairs {
            if let Some(value) = frame.get(formal) {
                self.env.assign_in_scope(actual, value.clone(), floor);
            }
        }
    }

    fn enter_call(&mut self) -> Result<()> {
        if self.call_depth >= self.limits.max_call_depth {
            return Err(InterpreterError::RecursionLimit(self.call_depth));
        }
        self.call_depth += 1;
        Ok(())
    }

    fn leave_call(&mut self) {
        self.call_depth -= 1;
    }
}
