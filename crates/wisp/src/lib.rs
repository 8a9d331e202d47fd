//! wisp: an interpreter for a small homoiconic Lisp dialect (spec.md §1).
//!
//! The pipeline is source text → [`reader`] → [`value::Value`] →
//! [`eval::Evaluator`] → `Value` → [`printer`]. This crate is the CORE
//! described in spec.md: the tokenizer/reader, the value model (persistent
//! lists, lazily-materialized hash-maps, atoms, functions, metadata), the
//! lexically chained environment, and the tail-call-optimized evaluator with
//! its special forms, quasiquotation, and macro system. The read-eval-print
//! loop driver lives in `src/bin/repl.rs`, outside this library.

pub mod builtins;
pub mod env;
pub mod error;
pub mod eval;
pub mod function;
pub mod intern;
pub mod io;
pub mod list;
pub mod map;
pub mod printer;
pub mod reader;
pub mod value;

use env::Env;
use error::RunResult;
use eval::Evaluator;
use value::Value;

/// Builds a fresh [`Evaluator`] with the global frame populated by every
/// core builtin (spec.md §4.5) and writing to the process's real stdout.
pub fn new_interpreter() -> Evaluator {
    let global = Env::new(None);
    builtins::install(&global);
    Evaluator::new(global)
}

/// Builds an interpreter whose `prn`/`println`-family output is captured
/// in-memory instead of going to stdout — the constructor tests and
/// embedders reach for.
pub fn new_interpreter_with_writer(writer: Box<dyn io::PrintWriter>) -> Evaluator {
    let global = Env::new(None);
    builtins::install(&global);
    Evaluator::with_writer(global, writer)
}

/// Reads and evaluates one form from `src` against `interp`'s global frame —
/// the `read` + `eval` half of the REPL's `rep` (spec.md §6), exposed for
/// embedding and for tests that only care about the resulting [`Value`].
pub fn rep_eval(interp: &mut Evaluator, src: &str) -> RunResult<Value> {
    let form = match &interp.interner {
        Some(pool) => reader::read_str_interned(src.as_bytes(), pool.clone())?,
        None => reader::read_str(src.as_bytes())?,
    };
    interp.eval_global(form)
}
