//! Hash-map operations (spec.md §4.5).
//!
//! Grounded on `examples/original_source/src/core_lib.cpp`'s
//! `_Core_MapAssoc`/`_Core_MapDissoc`/`_Core_MapGet`/`_Core_MapContains`/
//! `_Core_MapKeys`/`_Core_MapValues`.

use crate::{
    error::{RunResult, WispError},
    eval::Evaluator,
    list,
    value::{Value, ValueKind},
};

fn as_map(v: &Value) -> RunResult<&crate::map::MapCell> {
    match &v.kind {
        ValueKind::Map(m) => Ok(m),
        _ => Err(WispError::type_error("First argument must be a hash-map")),
    }
}

pub fn assoc(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 3 {
        return Err(WispError::arity("assoc takes 3 arguments"));
    }
    let map = as_map(&args[0])?;
    Ok(Value::map(map.assoc(args[1].clone(), args[2].clone())))
}

pub fn dissoc(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 2 {
        return Err(WispError::arity("dissoc takes 2 arguments"));
    }
    let map = as_map(&args[0])?;
    Ok(Value::map(map.dissoc(args[1].clone())))
}

pub fn get(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 2 {
        return Err(WispError::arity("get takes 2 arguments"));
    }
    let map = as_map(&args[0])?;
    Ok(map.get(&args[1]).unwrap_or(Value::nil()))
}

pub fn contains(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 2 {
        return Err(WispError::arity("contains? takes 2 arguments"));
    }
    match &args[0].kind {
        ValueKind::Map(m) => Ok(Value::bool_val(m.contains(&args[1]))),
        ValueKind::String(haystack) => match &args[1].kind {
            ValueKind::String(needle) => {
                let contains = haystack.windows(needle.len().max(1)).any(|w| w == &needle[..]) || needle.is_empty();
                Ok(Value::bool_val(contains))
            }
            _ => Err(WispError::type_error("All arguments must be strings for a string search")),
        },
        _ => Err(WispError::type_error("First argument must be a hash-map or a string")),
    }
}

pub fn keys(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 1 {
        return Err(WispError::arity("keys takes 1 argument"));
    }
    let map = as_map(&args[0])?;
    Ok(Value::list(list::from_vec(map.keys())))
}

pub fn vals(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 1 {
        return Err(WispError::arity("vals takes 1 argument"));
    }
    let map = as_map(&args[0])?;
    Ok(Value::list(list::from_vec(map.vals())))
}
