//! Output sinks for `println`/`str`-family builtins.
//!
//! Simplified from `examples/parcadei-ouros/crates/ouros/src/io.rs`'s
//! `PrintWriter` trait — no stream redirection stack, since this
//! interpreter has no `contextlib`-style context managers, but the same
//! write/one-char-push split so tests can capture output instead of
//! writing to the process's real stdout.

use std::io::{self, Write as _};

use crate::error::RunResult;

/// Receives text written by `println`/`prn`-family builtins.
pub trait PrintWriter {
    /// Writes one already-formatted value's text, with no separator or
    /// trailing newline added.
    fn write_str(&mut self, text: &str) -> RunResult<()>;

    /// Writes a single separator or terminator character (space, newline).
    fn write_char(&mut self, ch: char) -> RunResult<()>;
}

/// Writes straight to the process's stdout.
#[derive(Debug, Default)]
pub struct StdPrint;

impl PrintWriter for StdPrint {
    fn write_str(&mut self, text: &str) -> RunResult<()> {
        let _ = io::stdout().write_all(text.as_bytes());
        Ok(())
    }

    fn write_char(&mut self, ch: char) -> RunResult<()> {
        let mut buf = [0u8; 4];
        let _ = io::stdout().write_all(ch.encode_utf8(&mut buf).as_bytes());
        Ok(())
    }
}

/// Collects everything written into an in-memory string — used by tests to
/// assert on `println`/`prn` output without touching the real stdout.
#[derive(Debug, Default)]
pub struct CollectStringPrint(String);

impl CollectStringPrint {
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

impl PrintWriter for CollectStringPrint {
    fn write_str(&mut self, text: &str) -> RunResult<()> {
        self.0.push_str(text);
        Ok(())
    }

    fn write_char(&mut self, ch: char) -> RunResult<()> {
        self.0.push(ch);
        Ok(())
    }
}

/// Discards all output — used when benchmarking evaluation without I/O noise.
#[derive(Debug, Default)]
pub struct NoPrint;

impl PrintWriter for NoPrint {
    fn write_str(&mut self, _text: &str) -> RunResult<()> {
        Ok(())
    }

    fn write_char(&mut self, _ch: char) -> RunResult<()> {
        Ok(())
    }
}
