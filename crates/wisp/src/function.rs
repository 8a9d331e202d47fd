//! User-defined closures (spec.md §3 `Function`, §4.4 parameter binding).
//!
//! Grounded on `examples/original_source/src/malfunction.hpp` (`MalFunction`)
//! and `interpreter.cpp`'s `CreateFunction`/`PrepareFunctionCall`.

use crate::{
    env::Env,
    error::{RunResult, WispError},
    value::{Bytes, Value},
};

/// Whether a closure is an ordinary function or a macro. Macros receive
/// their arguments unevaluated and their result replaces the call site
/// (spec.md §4.4 "Macro expansion during apply").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FnKind {
    Function,
    Macro,
}

/// A user-defined closure: positional parameter names, an optional variadic
/// rest name, the environment captured at `fn`/`macro` time, and the body
/// expression.
pub struct Function {
    pub params: Vec<Bytes>,
    pub rest: Option<Bytes>,
    pub env: Env,
    pub body: Value,
    pub kind: FnKind,
}

impl Function {
    pub fn is_variadic(&self) -> bool {
        self.rest.is_some()
    }

    /// Binds `args` to a fresh child frame per spec.md §4.4's parameter
    /// binding rules: exact count for non-variadic functions, `>=`
    /// positional count with the remainder collected into a list for
    /// variadic ones. Mismatches are arity errors.
    pub fn bind(&self, args: Vec<Value>) -> RunResult<Env> {
        if self.is_variadic() {
            if args.len() < self.params.len() {
                return Err(WispError::arity(format!(
                    "function expects at least {} argument(s), got {}",
                    self.params.len(),
                    args.len()
                )));
            }
        } else if args.len() != self.params.len() {
            return Err(WispError::arity(format!(
                "function expects {} argument(s), got {}",
                self.params.len(),
                args.len()
            )));
        }

        let frame = Env::new(Some(self.env.clone()));
        let mut args = args.into_iter();
        for name in &self.params {
            // `args` was just length-checked above, so this always succeeds.
            frame.set(name.clone(), args.next().expect("parameter count checked above"));
        }
        if let Some(rest_name) = &self.rest {
            let rest_list = crate::list::from_vec(args.collect());
            frame.set(rest_name.clone(), Value::list(rest_list));
        }
        Ok(frame)
    }
}
