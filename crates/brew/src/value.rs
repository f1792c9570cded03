//! The Brew runtime value model.
//!
//! `Value` is a tagged sum unifying primitives, shared mutable objects, and
//! callables (closures and named-function handles), per `spec.md` §3.
//! Unlike the teacher's `Value` (`examples/scostello-monty/crates/monty/src/value.rs`),
//! which splits immediate values from an arena of `HeapData` behind manual
//! reference counting, Brew values that need shared, mutable identity
//! (`Object`) are simply `Rc<RefCell<..>>` — `spec.md` §3/§9 hands memory
//! management to the host runtime and explicitly tolerates leaked cycles,
//! so there is no arena or GC to build here.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::ast::{Func, Lambda};
use crate::environment::Frame;
use crate::error::{InterpreterError, Result};

/// A mutable, identity-comparable object: a prototype link plus a member
/// map. Shared by reference; two `Value::Object`s are equal iff they point
/// at the same `ObjectData` (see `Value::identical`).
#[derive(Debug, Default)]
pub struct ObjectData {
    pub proto: Option<Object>,
    pub members: IndexMap<String, Value>,
}

pub type Object = Rc<RefCell<ObjectData>>;

/// A lambda expression together with its persistent captured state.
///
/// `captured` starts as a primitive-only snapshot of every frame visible at
/// creation time (`spec.md` §4.1/§4.2) and is overwritten after each call
/// with whatever frames the call pushed above its caller's frames — this is
/// the "lambda continuation" mechanism that lets a closure retain
/// per-instance state across invocations (`spec.md` §4.2).
#[derive(Debug)]
pub struct ClosureData {
    pub lambda: Rc<Lambda>,
    pub captured: RefCell<Vec<Frame>>,
}

pub type Closure = Rc<ClosureData>;

/// The runtime value of every Brew expression.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Int(i64),
    Bool(bool),
    Str(Rc<str>),
    Object(Object),
    Closure(Closure),
    /// A named top-level function referenced as a first-class value (e.g.
    /// assigned to a variable, stored in an object member, or used to back
    /// a method slot).
    FuncHandle(Rc<Func>),
}

impl Value {
    pub fn str(s: impl Into<Rc<str>>) -> Self {
        Value::Str(s.into())
    }

    pub fn new_object() -> Self {
        Value::Object(Rc::new(RefCell::new(ObjectData::default())))
    }

    /// Human-readable type name, used in TYPE_ERROR messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Int(_) => "int",
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
            Value::Object(_) => "object",
            Value::Closure(_) => "closure",
            Value::FuncHandle(_) => "function",
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// `spec.md` §3: "zero is false, non-zero is true" for `Int`; `Bool`
    /// passes through unchanged. Anything else is a TYPE_ERROR.
    pub fn coerce_bool(&self, context: &str) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            Value::Int(n) => Ok(*n != 0),
            other => Err(InterpreterError::type_(format!(
                "expected bool or int in {context}, got {}",
                other.type_name()
            ))),
        }
    }

    /// `spec.md` §3: "`Bool` participates in integer arithmetic (treated as
    /// 0/1)".
    pub fn coerce_int(&self, context: &str) -> Result<i64> {
        match self {
            Value::Int(n) => Ok(*n),
            Value::Bool(b) => Ok(i64::from(*b)),
            other => Err(InterpreterError::type_(format!(
                "expected int or bool in {context}, got {}",
                other.type_name()
            ))),
        }
    }

    /// Identity comparison for `Object`/`Closure` values, value comparison
    /// for primitives, with int↔bool coercion — `spec.md` §3: "Equality of
    /// Objects is by identity; equality of primitives is by value;
    /// int-vs-bool equality is done after coercing the int operand to
    /// bool."
    pub fn py_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Bool(b)) => (*a != 0) == *b,
            (Value::Bool(a), Value::Int(b)) => *a == (*b != 0),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            (Value::FuncHandle(a), Value::FuncHandle(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Detaches a value from any shared mutable state it does not own.
    /// Primitives clone trivially; `Object`s are shared intentionally
    /// (`spec.md` §9: "object references are shared intentionally") so this
    /// just bumps the `Rc`; a `Closure` gets a fresh `ClosureData` with its
    /// own cloned captured stack, so copies don't observe each other's
    /// future continuation updates (`spec.md` §4.5 step 3: "Closures are
    /// deep-copied by copying both the AST pointer and the captured
    /// stack.").
    pub fn deep_copy(&self) -> Value {
        match self {
            Value::Closure(closure) => Value::Closure(Rc::new(ClosureData {
                lambda: Rc::clone(&closure.lambda),
                captured: RefCell::new(closure.captured.borrow().clone()),
            })),
            other => other.clone(),
        }
    }

    /// The textual form `print` emits: booleans lowercase, nil rendered as
    /// the host's default representation (`spec.md` §6).
    pub fn display_string(&self) -> String {
        match self {
            Value::Nil => "nil".to_owned(),
            Value::Int(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Str(s) => s.to_string(),
            Value::Object(_) => "object".to_owned(),
            Value::Closure(_) => "closure".to_owned(),
            Value::FuncHandle(func) => format!("function {}", func.name),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_string())
    }
}

/// Python-style floor division: rounds toward negative infinity, unlike
/// Rust's `/` which truncates toward zero. Confirmed against
/// `examples/original_source/Brewin/interpreterv4.py`'s `do_arithmetic`,
/// which uses Python's `//` operator.
pub fn floor_div(a: i64, b: i64) -> Result<i64> {
    if b == 0 {
        return Err(InterpreterError::type_("division by zero"));
    }
    let q = a / b;
    let r = a % b;
    if r != 0 && (r < 0) != (b < 0) {
        Ok(q - 1)
    } else {
        Ok(q)
    }
}
