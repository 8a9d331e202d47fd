//! The interpreter's single error channel.
//!
//! Every failure mode described in spec.md §7 — arity, type, lookup, syntax,
//! arithmetic, runtime, and user (`throw`) errors — is represented by one
//! [`WispError`] carrying a [`Value`] payload. `try*` does not distinguish
//! between categories; `category` exists purely so `Display` can render a
//! useful prefix for the REPL and for `Mal Error: <msg>`-style reporting.

use std::fmt;

use crate::value::Value;

/// Result alias used throughout the evaluator and builtins.
pub type RunResult<T> = Result<T, WispError>;

/// Coarse classification of a [`WispError`], used only for `Display`.
///
/// `try*` treats all categories identically (spec.md §7): this enum is not
/// inspected anywhere in the control-flow path, only in formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum ErrorCategory {
    /// Wrong number of arguments to a special form or builtin.
    Arity,
    /// A value's tag did not match what an operation required.
    Type,
    /// A symbol was not found in the current environment chain.
    Lookup,
    /// The reader rejected the source text.
    Syntax,
    /// Division/modulo by zero, or a similar numeric failure.
    Arithmetic,
    /// Recursion limit, file I/O, or library loading failures.
    Runtime,
    /// Raised explicitly by `(throw v)`.
    User,
}

/// A thrown error, carrying an arbitrary value payload.
///
/// Propagates across evaluator frames as an ordinary `Err` until a `try*`
/// handler catches it or it unwinds out of the interpreter entirely, where
/// the REPL driver prints it as `Mal Error: <msg>`.
#[derive(Debug, Clone)]
pub struct WispError {
    pub category: ErrorCategory,
    pub payload: Value,
}

impl WispError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self { category, payload: Value::string(message.into().into_bytes()) }
    }

    pub fn arity(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Arity, message)
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Type, message)
    }

    pub fn lookup(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Lookup, message)
    }

    pub fn syntax(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Syntax, message)
    }

    pub fn arithmetic(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Arithmetic, message)
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Runtime, message)
    }

    /// Wraps an arbitrary value as a user-thrown error (the `throw` builtin).
    pub fn thrown(payload: Value) -> Self {
        Self { category: ErrorCategory::User, payload }
    }

    /// Renders the payload the way the REPL driver does, independent of
    /// whether it happens to be a string.
    pub fn message(&self) -> String {
        crate::printer::print_raw(&self.payload)
    }
}

impl fmt::Display for WispError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for WispError {}
