//! `print`, `inputi`, `inputs` (`spec.md` §6).
//!
//! Grounded on `printValues`/`do_input` in
//! `examples/original_source/Brewin/interpreterv4.py`. Unlike user-defined
//! functions and methods, these three names are recognized before any
//! variable/FunctionTable lookup happens, matching `do_func_call`'s
//! name-string dispatch.

use crate::ast::Expr;
use crate::error::{InterpreterError, Result};
use crate::io::{InputSource, OutputSink, TraceSink};
use crate::value::Value;
use crate::Interpreter;

impl<O: OutputSink, I: InputSource, T: TraceSink> Interpreter<O, I, T> {
    /// `print(args...)`: concatenates the string form of each argument,
    /// booleans lowercase, with no trailing newline added beyond what the
    /// host facade appends (`spec.md` §6).
    pub(crate) fn call_print(&mut self, args: &[Expr]) -> Result<()> {
        let mut text = String::new();
        for arg in args {
            let value = self.eval_expr(arg)?;
            text.push_str(&value.display_string());
        }
        self.output.write(&text);
        Ok(())
    }

    /// `inputi(prompt?)`: prints the prompt if given, reads a line, parses
    /// it as an integer.
    pub(crate) fn call_inputi(&mut self, args: &[Expr]) -> Result<Value> {
        let line = self.read_input_line(args)?;
        line.trim().parse::<i64>().map(Value::Int).map_err(|_| {
            InterpreterError::type_(format!("inputi could not parse '{line}' as an integer"))
        })
    }

    /// `inputs(prompt?)`: same as `inputi` but returns the raw string.
    pub(crate) fn call_inputs(&mut self, args: &[Expr]) -> Result<Value> {
        let line = self.read_input_line(args)?;
        Ok(Value::str(line))
    }

    fn read_input_line(&mut self, args: &[Expr]) -> Result<String> {
        if args.len() > 1 {
            return Err(InterpreterError::name(
                "No input() function found that takes > 1 parameter",
            ));
        }
        if let Some(prompt) = args.first() {
            let value = self.eval_expr(prompt)?;
            self.output.write(&value.display_string());
        }
        self.input
            .as_mut()
            .and_then(I::read_line)
            .ok_or_else(|| InterpreterError::type_("read past end of input"))
    }
}
