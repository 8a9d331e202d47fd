//! Evaluator re-entry builtins (spec.md §4.5).
//!
//! Grounded on `examples/original_source/src/core_lib.cpp`'s
//! `_Core_DoEval`/`_Core_DoThrow`/`_Core_Apply`.

use crate::{
    error::{RunResult, WispError},
    eval::Evaluator,
    list,
    value::Value,
};

pub fn eval(ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 1 {
        return Err(WispError::arity("eval takes 1 argument"));
    }
    ev.eval_global(args.into_iter().next().unwrap())
}

pub fn throw(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 1 {
        return Err(WispError::arity("throw takes 1 argument"));
    }
    Err(WispError::thrown(args.into_iter().next().unwrap()))
}

pub fn apply(ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 2 {
        return Err(WispError::arity("apply takes 2 arguments"));
    }
    let mut args = args.into_iter();
    let func = args.next().unwrap();
    let seq = args.next().unwrap();
    if !func.is_invokable() {
        return Err(WispError::type_error("First argument must be a function"));
    }
    let seq_list = seq.as_list().ok_or_else(|| WispError::type_error("Second argument must be an argument list"))?;
    ev.call(&func, list::to_vec(seq_list))
}
