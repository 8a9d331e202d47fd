//! Type constructors and predicates (spec.md §4.5).
//!
//! Grounded on `examples/original_source/src/core_lib.cpp`'s
//! `_Core_NewList`/`_Core_IsList`/.../`_Core_IsKeyword`.

use crate::{
    error::{RunResult, WispError},
    eval::Evaluator,
    list,
    map::{MapCell, MapTable},
    value::Value,
};

/// A predicate that returns `false` rather than erroring when called with no
/// arguments — matches the original's tolerant zero-arg predicates.
fn predicate(args: &[Value], test: impl FnOnce(&Value) -> bool) -> Value {
    match args.first() {
        Some(v) => Value::bool_val(test(v)),
        None => Value::bool_val(false),
    }
}

pub fn list(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    Ok(Value::list(list::from_vec(args)))
}

pub fn is_list(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    Ok(predicate(&args, Value::is_list))
}

pub fn vector(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    Ok(Value::vector(list::from_vec(args)))
}

pub fn is_vector(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    Ok(predicate(&args, Value::is_vector))
}

pub fn hash_map(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() % 2 != 0 {
        return Err(WispError::arity("hash-map takes an even number of arguments"));
    }
    let mut table = MapTable::default();
    let mut it = args.into_iter();
    while let (Some(k), Some(v)) = (it.next(), it.next()) {
        table.insert(k, v);
    }
    Ok(Value::map(MapCell::from_table(table)))
}

pub fn is_map(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    Ok(predicate(&args, Value::is_map))
}

pub fn is_sequence(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    Ok(predicate(&args, Value::is_sequence))
}

pub fn is_number(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    Ok(predicate(&args, Value::is_number))
}

pub fn atom(_ev: &mut Evaluator, mut args: Vec<Value>) -> RunResult<Value> {
    Ok(Value::atom(if args.is_empty() { Value::nil() } else { args.remove(0) }))
}

pub fn is_atom(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    Ok(predicate(&args, Value::is_atom))
}

pub fn symbol(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 1 || !args[0].is_string() {
        return Err(WispError::type_error("symbol: first argument must be a string"));
    }
    Ok(Value::symbol(args[0].as_bytes().expect("checked is_string")))
}

pub fn is_symbol(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    Ok(predicate(&args, Value::is_symbol))
}

pub fn is_string(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    Ok(predicate(&args, Value::is_string))
}

pub fn keyword(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 1 || !args[0].is_string() {
        return Err(WispError::type_error("keyword: first argument must be a string"));
    }
    Ok(Value::keyword(args[0].as_bytes().expect("checked is_string")))
}

pub fn is_keyword(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    Ok(predicate(&args, Value::is_keyword))
}
