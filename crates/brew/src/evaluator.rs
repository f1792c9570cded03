//! Expression evaluation (`spec.md` §4.1).
//!
//! Grounded on `evaluate_expression`/`do_arithmetic`/`do_comparison`/
//! `do_logical`/`do_unary` in `examples/original_source/Brewin/interpreterv4.py`,
//! restructured into one dispatch method per `ast::Expr` variant in the style
//! of the teacher's node-kind-dispatch methods (e.g. `do_member_call`,
//! `do_func_call`).

use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::{BinOp, Expr, Target, UnOp};
use crate::error::{InterpreterError, Result};
use crate::io::{InputSource, OutputSink, TraceSink};
use crate::value::{floor_div, ClosureData, Object, Value};
use crate::Interpreter;

impl<O: OutputSink, I: InputSource, T: TraceSink> Interpreter<O, I, T> {
    pub(crate) fn eval_expr(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Nil => Ok(Value::Nil),
            Expr::Int(n) => Ok(Value::Int(*n)),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Str(s) => Ok(Value::str(s.clone())),
            Expr::Var(target) => self.eval_var(target),
            Expr::ObjectExpr => Ok(Value::new_object()),
            Expr::Lambda(lambda) => Ok(Value::Closure(Rc::new(ClosureData {
                lambda: Rc::clone(lambda),
                captured: RefCell::new(self.env.capture_primitives()),
            }))),
            Expr::Call { name, args } => self.eval_call(name, args),
            Expr::MethodCall { receiver, name, args } => self.eval_method_call(receiver, name, args),
            Expr::Unary(op, operand) => self.eval_unary(*op, operand),
            Expr::Binary(op, lhs, rhs) => self.eval_binary(*op, lhs, rhs),
        }
    }

    /// Resolves the head of a `Var`/dotted target through the Environment,
    /// falling back to the FunctionTable when no frame binds the name
    /// (`spec.md` §3 Environment: "If not found in any frame, the name is
    /// tried against the registered function table.").
    pub(crate) fn resolve_name(&mut self, name: &str) -> Result<Value> {
        if let Some(value) = self.env.lookup(name, self.current_floor()) {
            return Ok(value.clone());
        }
        let func = self.functions.resolve_unique(name)?;
        Ok(Value::FuncHandle(Rc::clone(func)))
    }

    /// `this` rewriting: substitutes the receiver's *name* for a literal
    /// `this` head, per the resolved semantics in `SPEC_FULL.md` §4.1
    /// (`curr_obj = stat.get('objref')` in `do_member_call`).
    pub(crate) fn rewrite_this(&self, name: &str) -> String {
        if name == "this" {
            if let Some(receiver) = self.receivers.last() {
                return receiver.clone();
            }
        }
        name.to_owned()
    }

    pub(crate) fn current_floor(&self) -> Option<usize> {
        self.lambda_floors.last().copied().flatten()
    }

    fn eval_var(&mut self, target: &Target) -> Result<Value> {
        let head = self.rewrite_this(&target.head);
        let value = self.resolve_name(&head)?;
        match &target.field {
            None => Ok(value),
            Some(field) => {
                let obj = value
                    .as_object()
                    .ok_or_else(|| {
                        InterpreterError::type_(format!("'.' applied to non-object '{head}'"))
                    })?
                    .clone();
                self.lookup_member(&obj, field)
            }
        }
    }

    /// Walks the `proto` chain searching for `field`, returning the first
    /// hit (`spec.md` §4.1 dotted `Var`).
    pub(crate) fn lookup_member(&self, obj: &Object, field: &str) -> Result<Value> {
        let mut current = Rc::clone(obj);
        loop {
            if let Some(value) = current.borrow().members.get(field) {
                return Ok(value.clone());
            }
            let next = current.borrow().proto.clone();
            match next {
                Some(proto) => current = proto,
                None => {
                    return Err(InterpreterError::name(format!("member '{field}' not found")));
                }
            }
        }
    }

    fn eval_call(&mut self, name: &str, args: &[Expr]) -> Result<Value> {
        match name {
            "print" => {
                self.call_print(args)?;
                Ok(Value::Nil)
            }
            "inputi" => self.call_inputi(args),
            "inputs" => self.call_inputs(args),
            _ => {
                let callee = self.resolve_callee(name, args.len())?;
                self.call_value(&callee, args)
            }
        }
    }

    /// Resolves a direct call's callee name. A call site always supplies an
    /// arity context, so — unlike a bare `Var` reference — an overloaded
    /// top-level function resolves by `(name, arity)` instead of requiring
    /// uniqueness (`spec.md` §3 "Overloading by arity is allowed"; §8
    /// scenario 1).
    fn resolve_callee(&mut self, name: &str, arity: usize) -> Result<Value> {
        if let Some(value) = self.env.lookup(name, self.current_floor()) {
            return Ok(value.clone());
        }
        let func = self.functions.get(name, arity).ok_or_else(|| {
            InterpreterError::name(format!("'{name}' with {arity} argument(s) is not defined"))
        })?;
        Ok(Value::FuncHandle(Rc::clone(func)))
    }

    pub(crate) fn call_value(&mut self, callee: &Value, args: &[Expr]) -> Result<Value> {
        match callee {
            Value::Closure(closure) => {
                let closure = Rc::clone(closure);
                self.call_closure(&closure, args)
            }
            Value::FuncHandle(func) => {
                let func = Rc::clone(func);
                self.call_function(&func, args)
            }
            other => Err(InterpreterError::type_(format!(
                "'{}' is not callable",
                other.type_name()
            ))),
        }
    }

    /// `spec.md` §4.6 step 5 asks for the lambda's updated continuation to
    /// be "extracted... and stored back under the member slot" after a
    /// method call so the method's closure state persists on the object.
    /// There is no separate store-back step here: `lookup_member` clones the
    /// `Rc<ClosureData>` out of the object's member map, and `call_closure`
    /// mutates that same `ClosureData`'s `RefCell` captured stack in place,
    /// so the object's member map observes the update without needing its
    /// own write.
    fn eval_method_call(&mut self, receiver: &str, name: &str, args: &[Expr]) -> Result<Value> {
        let receiver_head = self.rewrite_this(receiver);
        let recv_value = self.resolve_name(&receiver_head)?;
        let obj = recv_value
            .as_object()
            .ok_or_else(|| {
                InterpreterError::type_(format!("'.' applied to non-object '{receiver_head}'"))
            })?
            .clone();
        let member = self.lookup_member(&obj, name)?;
        if !matches!(member, Value::Closure(_) | Value::FuncHandle(_)) {
            return Err(InterpreterError::type_(format!(
                "'{receiver_head}.{name}' is not callable, got {}",
                member.type_name()
            )));
        }

        let update_this = receiver != "this";
        if update_this {
            self.receivers.push(receiver.to_owned());
        }
        let result = self.call_value(&member, args);
        if update_this {
            self.receivers.pop();
        }
        result
    }

    fn eval_unary(&mut self, op: UnOp, operand: &Expr) -> Result<Value> {
        let value = self.eval_expr(operand)?;
        match op {
            UnOp::Neg => Ok(Value::Int(-require_int(&value, "unary '-'")?)),
            UnOp::Not => Ok(Value::Bool(!value.coerce_bool("unary '!'")?)),
        }
    }

    fn eval_binary(&mut self, op: BinOp, lhs: &Expr, rhs: &Expr) -> Result<Value> {
        match op {
            BinOp::And | BinOp::Or => {
                // Both sides are always evaluated; `spec.md` §9 leaves
                // short-circuiting unspecified and §4.1 asks for Int→Bool
                // coercion on both operands.
                let l = self.eval_expr(lhs)?.coerce_bool("&&/||")?;
                let r = self.eval_expr(rhs)?.coerce_bool("&&/||")?;
                Ok(Value::Bool(match op {
                    BinOp::And => l && r,
                    BinOp::Or => l || r,
                    _ => unreachable!(),
                }))
            }
            BinOp::Eq | BinOp::Ne => {
                let l = self.eval_expr(lhs)?;
                let r = self.eval_expr(rhs)?;
                let eq = l.py_eq(&r);
                Ok(Value::Bool(if op == BinOp::Eq { eq } else { !eq }))
            }
            BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => {
                let l = self.eval_expr(lhs)?;
                let r = self.eval_expr(rhs)?;
                let a = require_int(&l, "comparison")?;
                let b = require_int(&r, "comparison")?;
                Ok(Value::Bool(match op {
                    BinOp::Lt => a < b,
                    BinOp::Le => a <= b,
                    BinOp::Gt => a > b,
                    BinOp::Ge => a >= b,
                    _ => unreachable!(),
                }))
            }
            BinOp::Add => {
                let l = self.eval_expr(lhs)?;
                let r = self.eval_expr(rhs)?;
                match (&l, &r) {
                    (Value::Str(a), Value::Str(b)) => Ok(Value::str(format!("{a}{b}"))),
                    (Value::Int(_) | Value::Bool(_), Value::Int(_) | Value::Bool(_)) => {
                        Ok(Value::Int(l.coerce_int("+")? + r.coerce_int("+")?))
                    }
                    _ => Err(InterpreterError::type_(format!(
                        "'+' requires two strings or two int/bool values, got {} and {}",
                        l.type_name(),
                        r.type_name()
                    ))),
                }
            }
            BinOp::Sub | BinOp::Mul | BinOp::Div => {
                let l = self.eval_expr(lhs)?;
                let r = self.eval_expr(rhs)?;
                let a = l.coerce_int(op_name(op))?;
                let b = r.coerce_int(op_name(op))?;
                Ok(Value::Int(match op {
                    BinOp::Sub => a - b,
                    BinOp::Mul => a * b,
                    BinOp::Div => floor_div(a, b)?,
                    _ => unreachable!(),
                }))
            }
        }
    }
}

fn require_int(value: &Value, context: &str) -> Result<i64> {
    match value {
        Value::Int(n) => Ok(*n),
        other => Err(InterpreterError::type_(format!(
            "expected int in {context}, got {}",
            other.type_name()
        ))),
    }
}

fn op_name(op: BinOp) -> &'static str {
    match op {
        BinOp::Sub => "'-'",
        BinOp::Mul => "'*'",
        BinOp::Div => "'/'",
        _ => "arithmetic",
    }
}
