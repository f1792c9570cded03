//! The two fatal error kinds Brew programs can raise, and the Rust error
//! type that carries them to the host.
//!
//! Grounded on `ReplError` in the `ouros` sibling crate: a hand-written enum
//! with manual `Display`/`std::error::Error` impls rather than `thiserror`,
//! since nothing in this crate's lineage reaches for that dependency.

use std::fmt;

/// A fatal interpreter error. Brew has no exception handling, so every
/// variant here aborts execution the moment it is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterpreterError {
    /// Undefined variable/function, ambiguous overload without an arity
    /// hint, missing `main`, unknown member, or assignment through an
    /// undefined dotted head.
    Name(String),
    /// Operand type mismatch, calling a non-callable, `.` on a non-object,
    /// or a non-boolean/non-integer condition.
    Type(String),
    /// Call depth exceeded the configured recursion limit (see
    /// [`crate::config::Limits`]). Not a Brew-visible error kind in its own
    /// right, but surfaced the same way: fatal, no recovery.
    RecursionLimit(usize),
}

pub type Result<T> = std::result::Result<T, InterpreterError>;

impl InterpreterError {
    pub fn name(message: impl Into<String>) -> Self {
        Self::Name(message.into())
    }

    pub fn type_(message: impl Into<String>) -> Self {
        Self::Type(message.into())
    }
}

impl fmt::Display for InterpreterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(message) => write!(f, "NAME_ERROR: {message}"),
            Self::Type(message) => write!(f, "TYPE_ERROR: {message}"),
            Self::RecursionLimit(depth) => {
                write!(f, "recursion limit exceeded at call depth {depth}")
            }
        }
    }
}

impl std::error::Error for InterpreterError {}
