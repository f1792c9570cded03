//! The registered top-level functions: `(name, arity)` → function node,
//! with arity-based overload resolution (`spec.md` §3/§4.2).
//!
//! Grounded on the teacher's `(func.get("name"), len(func.get("args")))`
//! dict key in `examples/original_source/Brewin/interpreterv4.py`'s
//! `load_functions`/`get_variable_value`, generalized to a typed key.

use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::{Func, Program};
use crate::error::{InterpreterError, Result};

#[derive(Debug, Default)]
pub struct FunctionTable {
    functions: HashMap<(String, usize), Rc<Func>>,
}

impl FunctionTable {
    pub fn from_program(program: &Program) -> Self {
        let mut functions = HashMap::new();
        for func in &program.functions {
            functions.insert((func.name.clone(), func.arity()), Rc::clone(func));
        }
        Self { functions }
    }

    pub fn get(&self, name: &str, arity: usize) -> Option<&Rc<Func>> {
        self.functions.get(&(name.to_owned(), arity))
    }

    /// Resolves a bare name reference with no arity context. Fails
    /// NAME_ERROR ("unclear") if more than one overload shares the name;
    /// returns the unique one otherwise (`spec.md` §4.2).
    pub fn resolve_unique(&self, name: &str) -> Result<&Rc<Func>> {
        let mut matches = self.functions.iter().filter(|((n, _), _)| n == name);
        let first = matches.next();
        if matches.next().is_some() {
            return Err(InterpreterError::name(format!(
                "unclear which function '{name}' refers to"
            )));
        }
        first
            .map(|(_, func)| func)
            .ok_or_else(|| InterpreterError::name(format!("'{name}' is not defined")))
    }

    pub fn contains_main(&self) -> bool {
        self.get("main", 0).is_some()
    }
}
