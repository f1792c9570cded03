//! Statement execution (`spec.md` §4.4).
//!
//! Grounded on `run_statement`/`do_assignment`/`do_while`/`do_conditional`/
//! `handle_proto` in `examples/original_source/Brewin/interpreterv4.py`. The
//! "last object in the proto chain" wording in `spec.md` §4.4 is resolved
//! here against the original: non-proto member assignment always writes the
//! *head* object's own member map (`scope[target_var_name][-1][member_name]`
//! indexes the object's own `[proto, members]` pair, it does not walk the
//! chain), matching ordinary prototypal shadowing rather than a chain walk.
//!
//! Reference-parameter aliasing after a plain assignment (`spec.md` §4.3) is
//! implemented here via `propagate_alias`. The analogous "write the member
//! update back into every outer scope that also holds this object" loop in
//! the original (`do_assignment`'s final block) has no counterpart: this
//! crate's `Object` is an `Rc<RefCell<..>>`, so every binding that shares the
//! object already observes the mutation without any extra writeback.

use crate::ast::{Expr, Stmt, Target};
use crate::error::{InterpreterError, Result};
use crate::io::{InputSource, OutputSink, TraceSink};
use crate::value::Value;
use crate::Interpreter;

impl<O: OutputSink, I: InputSource, T: TraceSink> Interpreter<O, I, T> {
    /// Runs `statements` in the current frame, stopping as soon as the
    /// active call's return flag is set. Shared by function/closure bodies
    /// and by `if`/`while` branches, so a `return` inside a nested block
    /// unwinds immediately (`spec.md` §4.4).
    pub(crate) fn exec_block(&mut self, statements: &[Stmt]) -> Result<()> {
        for stmt in statements {
            self.exec_stmt(stmt)?;
            if self.returning() {
                break;
            }
        }
        Ok(())
    }

    pub(crate) fn returning(&self) -> bool {
        *self
            .return_flags
            .last()
            .expect("exec_block called with no active call")
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> Result<()> {
        match stmt {
            Stmt::Assign { target, expr } => self.exec_assign(target, expr),
            Stmt::If { condition, then_branch, else_branch } => {
                self.exec_if(condition, then_branch, else_branch)
            }
            Stmt::While { condition, body } => self.exec_while(condition, body),
            Stmt::Return(expr) => self.exec_return(expr.as_ref()),
            Stmt::Call(expr) => self.eval_expr(expr).map(|_| ()),
        }
    }

    fn exec_assign(&mut self, target: &Target, expr: &Expr) -> Result<()> {
        let head = self.rewrite_this(&target.head);
        match target.field.as_deref() {
            Some("proto") => self.exec_assign_proto(&head, expr),
            Some(field) => self.exec_assign_member(&head, field, expr),
            None => self.exec_assign_plain(&head, expr),
        }
    }

    fn exec_assign_plain(&mut self, head: &str, expr: &Expr) -> Result<()> {
        let value = self.eval_expr(expr)?;
        self.env.assign(head, value.clone());
        self.propagate_alias(head, value);
        Ok(())
    }

    fn exec_assign_member(&mut self, head: &str, field: &str, expr: &Expr) -> Result<()> {
        let obj = self.resolve_dotted_head(head)?;
        let value = self.eval_expr(expr)?;
        obj.borrow_mut().members.insert(field.to_owned(), value);
        Ok(())
    }

    fn exec_assign_proto(&mut self, head: &str, expr: &Expr) -> Result<()> {
        let obj = self.resolve_dotted_head(head)?;
        let rhs = self.eval_proto_rhs(expr)?;
        match rhs {
            Value::Nil => obj.borrow_mut().proto = None,
            Value::Object(proto_obj) => obj.borrow_mut().proto = Some(proto_obj),
            other => {
                return Err(InterpreterError::type_(format!(
                    "proto must be an object or nil, got {}",
                    other.type_name()
                )))
            }
        }
        Ok(())
    }

    /// Resolves the head of a dotted assignment target to its `Object`.
    /// Unlike a plain `Var` read, this never falls back to the
    /// FunctionTable: an undefined head is a NAME_ERROR (`spec.md` §7:
    /// "assignment to a dotted target whose head is undefined").
    fn resolve_dotted_head(&mut self, head: &str) -> Result<crate::value::Object> {
        let value = self
            .env
            .lookup(head, self.current_floor())
            .cloned()
            .ok_or_else(|| InterpreterError::name(format!("'{head}' is not defined")))?;
        value
            .as_object()
            .cloned()
            .ok_or_else(|| InterpreterError::type_(format!("'.' applied to non-object '{head}'")))
    }

    /// Evaluates the right-hand side of `head.proto = expr`. The raw proto
    /// slot is reachable only here, and only when the RHS is itself a
    /// dotted `x.proto` read (`spec.md` §4.1's `use_proto` flag, set solely
    /// by `handle_proto` in the original).
    fn eval_proto_rhs(&mut self, expr: &Expr) -> Result<Value> {
        if let Expr::Var(target) = expr {
            if target.field.as_deref() == Some("proto") {
                let head = self.rewrite_this(&target.head);
                let obj = self.resolve_dotted_head(&head)?;
                let proto = obj.borrow().proto.clone();
                return Ok(match proto {
                    Some(proto_obj) => Value::Object(proto_obj),
                    None => Value::Nil,
                });
            }
        }
        self.eval_expr(expr)
    }

    /// Writes `value` into every name reachable from `head` in the current
    /// call's alias graph, at the innermost frame (below the lambda floor,
    /// if any) that already binds it (`spec.md` §4.3).
    fn propagate_alias(&mut self, head: &str, value: Value) {
        let floor = self.current_floor();
        let Some(table) = self.aliases.last() else {
            return;
        };
        for linked in table.reachable(head) {
            self.env.assign_in_scope(&linked, value.clone(), floor);
        }
    }

    fn exec_if(&mut self, condition: &Expr, then_branch: &[Stmt], else_branch: &[Stmt]) -> Result<()> {
        let cond = self.eval_expr(condition)?.coerce_bool("if condition")?;
        self.env.push();
        let branch = if cond { then_branch } else { else_branch };
        let result = self.exec_block(branch);
        self.env.pop();
        result
    }

    fn exec_while(&mut self, condition: &Expr, body: &[Stmt]) -> Result<()> {
        self.env.push();
        let result = self.run_while_loop(condition, body);
        self.env.pop();
        result
    }

    fn run_while_loop(&mut self, condition: &Expr, body: &[Stmt]) -> Result<()> {
        loop {
            if !self.eval_expr(condition)?.coerce_bool("while condition")? {
                return Ok(());
            }
            self.exec_block(body)?;
            if self.returning() {
                return Ok(());
            }
        }
    }

    /// `return expr;`: a deep copy detaches the returned value from
    /// caller-mutable state (`spec.md` §4.4, §8 "Deep-copy on return").
    fn exec_return(&mut self, expr: Option<&Expr>) -> Result<()> {
        let value = match expr {
            Some(e) => self.eval_expr(e)?,
            None => Value::Nil,
        };
        let value = value.deep_copy();
        *self
            .return_flags
            .last_mut()
            .expect("exec_return with no active call") = true;
        *self
            .return_values
            .last_mut()
            .expect("exec_return with no active call") = value;
        Ok(())
    }
}
