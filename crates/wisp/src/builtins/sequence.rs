//! Sequence operations over lists, vectors, and strings (spec.md §4.5).
//!
//! Grounded on `examples/original_source/src/core_lib.cpp`'s
//! `_Core_IsEmpty`/`_Core_ElementCount`/`_Core_First`/`_Core_Rest`/
//! `_Core_GetElement`/`_Core_Cons`/`_Core_Concat`. `rest` of an empty
//! sequence returning the empty list rather than `nil` is spec.md's
//! explicit departure from the original (which returns `nil` there too).

use crate::{
    error::{RunResult, WispError},
    eval::Evaluator,
    list,
    value::{Value, ValueKind},
};

pub fn is_empty(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    let Some(v) = args.first() else {
        return Ok(Value::bool_val(false));
    };
    match &v.kind {
        ValueKind::List(l) | ValueKind::Vector(l) => Ok(Value::bool_val(l.is_none())),
        ValueKind::String(b) => Ok(Value::bool_val(b.is_empty())),
        _ => Ok(Value::nil()),
    }
}

pub fn count(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    let Some(v) = args.first() else {
        return Ok(Value::nil());
    };
    match &v.kind {
        ValueKind::List(l) | ValueKind::Vector(l) => Ok(Value::int(list::len(l) as i64)),
        ValueKind::String(b) => Ok(Value::int(b.len() as i64)),
        _ => Ok(Value::nil()),
    }
}

pub fn first(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 1 {
        return Err(WispError::arity("first takes 1 argument"));
    }
    match args[0].as_list() {
        Some(Some(node)) => Ok(node.head.clone()),
        _ => Ok(Value::nil()),
    }
}

pub fn rest(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 1 {
        return Err(WispError::arity("rest takes 1 argument"));
    }
    match args[0].as_list() {
        Some(l) => Ok(Value::list(list::rest(l))),
        None => Ok(Value::nil()),
    }
}

pub fn nth(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 2 {
        return Err(WispError::arity("nth takes 2 arguments"));
    }
    let idx = args[1].as_int().ok_or_else(|| WispError::type_error("Second argument must be a valid index"))?;
    if let Some(l) = args[0].as_list() {
        if idx < 0 {
            return Ok(Value::nil());
        }
        return Ok(list::at(l, idx as usize).unwrap_or(Value::nil()));
    }
    if let ValueKind::String(b) = &args[0].kind {
        if idx < 0 || idx as usize >= b.len() {
            return Ok(Value::string(&b""[..]));
        }
        return Ok(Value::string(&b[idx as usize..idx as usize + 1]));
    }
    Ok(Value::nil())
}

pub fn cons(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 2 {
        return Err(WispError::arity("cons takes 2 arguments"));
    }
    let tail = match &args[1].kind {
        ValueKind::List(l) => l.clone(),
        ValueKind::Nil => None,
        _ => return Err(WispError::type_error("Second argument must be a list or nil")),
    };
    Ok(Value::list(list::cons(args[0].clone(), tail)))
}

pub fn concat(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    let mut out = Vec::new();
    for v in &args {
        let l = v.as_list().ok_or_else(|| WispError::type_error("All arguments must be lists or vectors"))?;
        out.extend(list::ListIter::new(l.clone()));
    }
    Ok(Value::list(list::from_vec(out)))
}
