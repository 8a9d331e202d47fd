//! Atom, metadata, and reflection builtins (spec.md §4.5, §4.6).
//!
//! Grounded on `examples/original_source/src/core_lib.cpp`'s
//! `_Core_Deref`/`_Core_RefSet`/`_Core_GetMeta`/`_Core_WithMeta`/
//! `_Core_GetRefcount`/`_Core_Intern`/`_Core_GetSystem`.

use crate::{
    error::{RunResult, WispError},
    eval::Evaluator,
    map::{MapCell, MapTable},
    value::{Value, ValueKind},
};

pub fn deref(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 1 {
        return Err(WispError::arity("deref takes 1 argument"));
    }
    match &args[0].kind {
        ValueKind::Atom(cell) => Ok(cell.borrow().clone()),
        _ => Ok(Value::nil()),
    }
}

pub fn reset(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 2 {
        return Err(WispError::arity("reset! takes 2 arguments"));
    }
    let ValueKind::Atom(cell) = &args[0].kind else {
        return Err(WispError::type_error("First argument must be an atom"));
    };
    *cell.borrow_mut() = args[1].clone();
    Ok(args[1].clone())
}

pub fn meta(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 1 {
        return Err(WispError::arity("meta takes 1 argument"));
    }
    Ok(args[0].meta())
}

pub fn with_meta(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 2 {
        return Err(WispError::arity("with-meta takes 2 arguments"));
    }
    Ok(args[0].with_meta(args[1].clone()))
}

pub fn ref_count(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 1 {
        return Err(WispError::arity("ref-count takes 1 argument"));
    }
    Ok(args[0].ref_count().map(|n| Value::int(n as i64)).unwrap_or(Value::nil()))
}

/// Interns a string-like value's backing bytes through the evaluator's pool,
/// if one is configured; otherwise returns an equivalent value unchanged.
pub fn intern(ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 1 {
        return Err(WispError::arity("intern takes 1 argument"));
    }
    let bytes = match &args[0].kind {
        ValueKind::Symbol(b) | ValueKind::Keyword(b) | ValueKind::String(b) => b.clone(),
        _ => return Err(WispError::type_error("Only string-like values can be interned")),
    };
    let interned = match &ev.interner {
        Some(pool) => pool.borrow_mut().intern(&bytes),
        None => bytes,
    };
    Ok(Value { kind: rewrap(&args[0].kind, interned), meta: args[0].meta.clone() })
}

fn rewrap(kind: &ValueKind, bytes: crate::value::Bytes) -> ValueKind {
    match kind {
        ValueKind::Symbol(_) => ValueKind::Symbol(bytes),
        ValueKind::Keyword(_) => ValueKind::Keyword(bytes),
        ValueKind::String(_) => ValueKind::String(bytes),
        _ => unreachable!("intern only dispatches on string-like kinds"),
    }
}

pub fn get_system_info(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if !args.is_empty() {
        return Err(WispError::arity("get-system-info takes 0 arguments"));
    }
    let mut table = MapTable::default();
    table.insert(Value::string(&b"recursion_limit"[..]), Value::int(Evaluator::recursion_limit() as i64));
    table.insert(Value::string(&b"filesystem_enabled"[..]), Value::bool_val(true));
    table.insert(
        Value::string(&b"dylib_plugins_enabled"[..]),
        Value::bool_val(cfg!(feature = "dylib-plugins")),
    );
    Ok(Value::map(MapCell::from_table(table)))
}
