//! Top-level interpreter: owns every piece of mutable execution state and
//! exposes the single public entry point, [`Interpreter::run`]. The actual
//! evaluation/execution/call logic lives in the sibling `evaluator`,
//! `executor`, `call`, and `builtins` modules as `impl Interpreter` blocks —
//! this file only has the struct, its constructors, and `run` itself.
//!
//! Grounded on the teacher's `Executor`/`RunSnapshot` pair in
//! `examples/scostello-monty/crates/monty/src/run.rs`: one struct owns the
//! whole execution and is constructed with a `PrintWriter`-shaped host
//! facade plus optional input/trace sinks.

use std::rc::Rc;

use crate::alias::AliasTable;
use crate::ast::Program;
use crate::config::Limits;
use crate::environment::Environment;
use crate::error::{InterpreterError, Result};
use crate::function_table::FunctionTable;
use crate::io::{InputSource, NullTrace, OutputSink, TraceSink};
use crate::value::Value;

/// Owns every piece of mutable interpreter state for one `run`.
///
/// `O`/`I`/`T` are the host facade channels (`spec.md` §6): `print` output,
/// `inputi`/`inputs` input, and the `trace_output` diagnostic dump (`SPEC_FULL.md`
/// §11). `T` defaults to [`NullTrace`] since most embedders run without
/// tracing.
pub struct Interpreter<O: OutputSink, I: InputSource, T: TraceSink = NullTrace> {
    pub(crate) functions: FunctionTable,
    pub(crate) env: Environment,
    pub(crate) aliases: Vec<AliasTable>,
    /// One entry per active call (function or closure), mirroring
    /// `return_flags`/`return_values`. `Some(floor)` for a closure call,
    /// `None` for a plain function call (`SPEC_FULL.md` §4.2).
    pub(crate) lambda_floors: Vec<Option<usize>>,
    /// The receiver-name stack backing `this` rewriting (`spec.md` §4.6).
    pub(crate) receivers: Vec<String>,
    pub(crate) return_flags: Vec<bool>,
    pub(crate) return_values: Vec<Value>,
    pub(crate) output: O,
    pub(crate) input: Option<I>,
    pub(crate) trace: T,
    pub(crate) trace_output: bool,
    pub(crate) limits: Limits,
    pub(crate) call_depth: usize,
}

impl<O: OutputSink, I: InputSource> Interpreter<O, I, NullTrace> {
    /// Builds an interpreter with tracing disabled, mirroring the original
    /// `Interpreter(console_output=True, inp=None, trace_output=False)`
    /// default.
    pub fn new(output: O, input: Option<I>) -> Self {
        Self::with_trace(output, input, NullTrace, false)
    }
}

impl<O: OutputSink, I: InputSource, T: TraceSink> Interpreter<O, I, T> {
    pub fn with_trace(output: O, input: Option<I>, trace: T, trace_output: bool) -> Self {
        Self {
            functions: FunctionTable::default(),
            env: Environment::new(),
            aliases: Vec::new(),
            lambda_floors: Vec::new(),
            receivers: Vec::new(),
            return_flags: Vec::new(),
            return_values: Vec::new(),
            output,
            input,
            trace,
            trace_output,
            limits: Limits::default(),
            call_depth: 0,
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Registers `program`'s functions and invokes `main/0` (`spec.md` §6:
    /// "a function named `main` with arity 0 must exist, else NAME").
    pub fn run(&mut self, program: &Program) -> Result<Value> {
        self.functions = FunctionTable::from_program(program);
        if !self.functions.contains_main() {
            return Err(InterpreterError::name("no main() function was found"));
        }
        let main = Rc::clone(self.functions.get("main", 0).expect("checked above"));
        self.call_function(&main, &[])
    }

    /// Emits a frame/return-flag/function-table dump through the trace sink,
    /// a no-op unless `trace_output` is set (`interpreterv4.py`'s
    /// `dump_vars`, see `SPEC_FULL.md` §11).
    pub(crate) fn dump_vars(&mut self, label: &str) {
        if !self.trace_output {
            return;
        }
        self.trace.trace(&format!("-- {label} --"));
        self.trace.trace(&format!("frames: {:#?}", self.env));
        self.trace.trace(&format!("return flags: {:?}", self.return_flags));
    }
}
