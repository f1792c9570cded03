//! The scope stack: frames, lookup, definition, and the primitive-only
//! capture used when a lambda is created.
//!
//! Grounded on the teacher's `Namespace`/`Namespaces` in
//! `examples/scostello-monty/crates/monty/src/namespace.rs`, generalized
//! from the teacher's slot-indexed `Vec<Value>` namespaces (resolved to
//! fixed slots at compile time) to the ordered name→value maps `spec.md`
//! §3/§4.2 describes, since this crate has no compile phase to assign
//! slots in.

use indexmap::IndexMap;

use crate::value::Value;

/// A single lexical scope's bindings, in insertion order.
pub type Frame = IndexMap<String, Value>;

/// The running stack of frames. Frame 0 is outermost (pushed first);
/// `frames.last()` is the innermost, active scope. Lookups scan
/// innermost-first.
#[derive(Debug, Default)]
pub struct Environment {
    frames: Vec<Frame>,
}

impl Environment {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    pub fn push(&mut self) {
        self.frames.push(Frame::new());
    }

    /// Pops and returns the innermost frame. Panics if empty — every push
    /// must be matched by a pop on all exit paths, including error
    /// propagation (`spec.md` §5).
    pub fn pop(&mut self) -> Frame {
        self.frames.pop().expect("Environment::pop on empty stack")
    }

    pub fn push_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Number of frames currently on the stack. Used as a "lambda floor"
    /// marker: the boundary between frames that existed before a closure
    /// call and the frames the call itself pushes (`spec.md` §4.2).
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Drops every frame above `floor`, returning them in stack order
    /// (outermost of the dropped frames first). Used to collect a
    /// closure's updated continuation after a call returns.
    pub fn split_off(&mut self, floor: usize) -> Vec<Frame> {
        self.frames.split_off(floor)
    }

    /// Looks up `name`, innermost-first.
    ///
    /// When `lambda_floor` is set, an initial reversed pass runs over the
    /// frames strictly below that index; on a miss, a full reversed pass
    /// over the entire stack follows (which reaches the floor itself and
    /// everything pushed above it — a closure's own captured-then-rebuilt
    /// frames and its active call frame). See `spec.md` §4.2 and the
    /// worked trace in `SPEC_FULL.md` §4.2.
    pub fn lookup(&self, name: &str, lambda_floor: Option<usize>) -> Option<&Value> {
        if let Some(floor) = lambda_floor {
            if floor > 0 {
                if let Some(value) = self.frames[..floor].iter().rev().find_map(|f| f.get(name)) {
                    return Some(value);
                }
            }
        }
        self.frames.iter().rev().find_map(|f| f.get(name))
    }

    /// Overwrites `name` in the innermost frame that already binds it, or
    /// defines it fresh in the innermost frame if no frame does
    /// (`spec.md` §4.2 `assign`).
    pub fn assign(&mut self, name: &str, value: Value) {
        for frame in self.frames.iter_mut().rev() {
            if frame.contains_key(name) {
                frame.insert(name.to_owned(), value);
                return;
            }
        }
        self.define(name, value);
    }

    /// Defines `name` in the innermost frame, unconditionally.
    pub fn define(&mut self, name: &str, value: Value) {
        self.frames
            .last_mut()
            .expect("Environment::define with no active frame")
            .insert(name.to_owned(), value);
    }

    /// Returns the innermost frame index (reversed order, 0 = innermost)
    /// that binds `name`, searching only frames strictly below `floor` if
    /// given, else the whole stack. Used by alias writeback (`spec.md`
    /// §4.3), which must target a specific frame rather than just read a
    /// value.
    pub fn assign_in_scope(&mut self, name: &str, value: Value, floor: Option<usize>) -> bool {
        let upper = floor.unwrap_or(self.frames.len());
        for frame in self.frames[..upper].iter_mut().rev() {
            if frame.contains_key(name) {
                frame.insert(name.to_owned(), value);
                return true;
            }
        }
        false
    }

    /// Takes a primitive-only snapshot of every frame currently visible,
    /// outermost first — the capture a `LambdaExpr` performs at creation
    /// time (`spec.md` §4.1/§4.2): "a frame contributes only those
    /// bindings whose value is Int, Bool, or Str. Objects and other
    /// closures are omitted."
    pub fn capture_primitives(&self) -> Vec<Frame> {
        self.frames
            .iter()
            .map(|frame| {
                frame
                    .iter()
                    .filter(|(_, value)| is_primitive(value))
                    .map(|(name, value)| (name.clone(), value.clone()))
                    .collect()
            })
            .collect()
    }
}

fn is_primitive(value: &Value) -> bool {
    matches!(value, Value::Int(_) | Value::Bool(_) | Value::Str(_))
}
