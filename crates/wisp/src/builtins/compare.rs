//! Equality and ordering builtins (spec.md §4.5).
//!
//! Grounded on `examples/original_source/src/core_lib.cpp`'s
//! `_Core_IsEqual`/`_Core_EqList`/`_Core_CmpLT`/.../`_Core_CmpGE` and
//! `mal::compare`.

use crate::{
    error::{RunResult, WispError},
    eval::Evaluator,
    value::{self, Value},
};

pub fn eq(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 2 {
        return Err(WispError::arity("= takes 2 arguments"));
    }
    Ok(Value::bool_val(args[0] == args[1]))
}

pub fn list_equal(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 2 {
        return Err(WispError::arity("list-equal takes 2 arguments"));
    }
    Ok(Value::bool_val(value::list_equal(&args[0], &args[1])))
}

fn compare(a: &Value, b: &Value) -> RunResult<std::cmp::Ordering> {
    match (a.as_int(), b.as_int()) {
        (Some(a), Some(b)) => Ok(a.cmp(&b)),
        _ => Err(WispError::type_error("Cannot compare non-numbers")),
    }
}

pub fn lt(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 2 {
        return Err(WispError::arity("< takes 2 arguments"));
    }
    Ok(Value::bool_val(compare(&args[0], &args[1])?.is_lt()))
}

pub fn le(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 2 {
        return Err(WispError::arity("<= takes 2 arguments"));
    }
    Ok(Value::bool_val(compare(&args[0], &args[1])?.is_le()))
}

pub fn gt(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 2 {
        return Err(WispError::arity("> takes 2 arguments"));
    }
    Ok(Value::bool_val(compare(&args[0], &args[1])?.is_gt()))
}

pub fn ge(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 2 {
        return Err(WispError::arity(">= takes 2 arguments"));
    }
    Ok(Value::bool_val(compare(&args[0], &args[1])?.is_ge()))
}
