//! Host facade: the interpreter never touches stdio directly, it calls
//! through these traits instead.
//!
//! Grounded on the `PrintWriter`/`StdPrint`/`CollectStringPrint`/`NoPrint`
//! family in `examples/parcadei-ouros/crates/ouros/src/io.rs` (itself
//! re-exported from the teacher's own, unretrieved `crates/monty/src/io.rs`
//! per `crates/monty/src/lib.rs`'s public exports). Brew needs three
//! channels instead of Python's one (`print` output, `input()` input, and
//! the `trace_output` diagnostic dump from `spec.md` §6 / §11), so three
//! small traits replace the single `PrintWriter` trait, following the same
//! "one method to emit a chunk of text" shape.

use std::io::{self, BufRead, Write as _};

/// Where `print(...)` output goes.
pub trait OutputSink {
    /// Writes `text` with no separator or trailing newline added — callers
    /// are responsible for their own formatting, matching `spec.md` §6's
    /// "no trailing newline is added by the core beyond what the host
    /// facade appends".
    fn write(&mut self, text: &str);
}

/// Where `inputi`/`inputs` read a line from.
pub trait InputSource {
    /// Returns `None` at end of input.
    fn read_line(&mut self) -> Option<String>;
}

/// Where `trace_output` diagnostics go (see `spec.md` §6, §11).
pub trait TraceSink {
    fn trace(&mut self, text: &str);
}

/// Writes to real stdout.
#[derive(Debug, Default)]
pub struct StdOutput;

impl OutputSink for StdOutput {
    fn write(&mut self, text: &str) {
        print!("{text}");
        let _ = io::stdout().flush();
    }
}

/// Reads real stdin line-by-line.
#[derive(Debug, Default)]
pub struct StdInput;

impl InputSource for StdInput {
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line).ok()?;
        if read == 0 {
            return None;
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Some(line)
    }
}

/// Writes trace diagnostics to real stderr.
#[derive(Debug, Default)]
pub struct StdTrace;

impl TraceSink for StdTrace {
    fn trace(&mut self, text: &str) {
        eprintln!("{text}");
    }
}

/// Collects everything written to it into an owned `String`. Useful for
/// tests that want to assert on the exact text a Brew program produced.
#[derive(Debug, Default)]
pub struct CollectOutput(String);

impl CollectOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> &str {
        &self.0
    }

    pub fn into_output(self) -> String {
        self.0
    }
}

impl OutputSink for CollectOutput {
    fn write(&mut self, text: &str) {
        self.0.push_str(text);
    }
}

/// A fixed script of lines, handed out one at a time. Useful for tests of
/// `inputi`/`inputs`.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    lines: std::collections::VecDeque<String>,
}

impl ScriptedInput {
    pub fn new(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn read_line(&mut self) -> Option<String> {
        self.lines.pop_front()
    }
}

/// Discards everything written to it.
#[derive(Debug, Default)]
pub struct NullOutput;

impl OutputSink for NullOutput {
    fn write(&mut self, _text: &str) {}
}

/// Discards every trace line. The default when `trace_output` is off.
#[derive(Debug, Default)]
pub struct NullTrace;

impl TraceSink for NullTrace {
    fn trace(&mut self, _text: &str) {}
}
