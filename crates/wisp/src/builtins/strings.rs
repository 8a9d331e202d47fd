//! String/printing builtins (spec.md §4.5).
//!
//! Grounded on `examples/original_source/src/core_lib.cpp`'s
//! `_Core_PFormat`/`_Core_StrCat`/`_Core_PPrint`/`_Core_PrintLn`/
//! `_Core_ReadString`/`_Core_Substr`/`_Core_CharIdx`.

use crate::{
    error::{RunResult, WispError},
    eval::Evaluator,
    printer,
    reader,
    value::{Value, ValueKind},
};

pub fn pr_str(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    let rendered = args.iter().map(printer::print_readable).collect::<Vec<_>>().join(" ");
    Ok(Value::string(rendered.into_bytes()))
}

pub fn str(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    let rendered = args.iter().map(printer::print_raw).collect::<Vec<_>>().concat();
    Ok(Value::string(rendered.into_bytes()))
}

pub fn prn(ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    for (i, v) in args.iter().enumerate() {
        if i > 0 {
            ev.writer.write_char(' ')?;
        }
        ev.writer.write_str(&printer::print_readable(v))?;
    }
    ev.writer.write_char('\n')?;
    Ok(Value::nil())
}

pub fn println(ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    for (i, v) in args.iter().enumerate() {
        if i > 0 {
            ev.writer.write_char(' ')?;
        }
        ev.writer.write_str(&printer::print_raw(v))?;
    }
    ev.writer.write_char('\n')?;
    Ok(Value::nil())
}

pub fn read_string(ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 1 {
        return Err(WispError::arity("read-string takes 1 argument"));
    }
    let ValueKind::String(bytes) = &args[0].kind else {
        return Err(WispError::type_error("First argument must be a string"));
    };
    match &ev.interner {
        Some(pool) => reader::read_str_interned(bytes, pool.clone()),
        None => reader::read_str(bytes),
    }
}

pub fn substr(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 3 {
        return Err(WispError::arity("substr takes 3 arguments"));
    }
    let ValueKind::String(bytes) = &args[0].kind else {
        return Err(WispError::type_error("substr takes string, number, number"));
    };
    let start = args[1].as_int().ok_or_else(|| WispError::type_error("substr takes string, number, number"))?;
    let len = args[2].as_int().ok_or_else(|| WispError::type_error("substr takes string, number, number"))?;
    if start < 0 || len < 0 {
        return Err(WispError::type_error("Ranges must not be negative"));
    }
    let (start, len) = (start as usize, len as usize);
    if start > bytes.len() {
        return Err(WispError::type_error("Indexing past string end"));
    }
    let end = start.saturating_add(len).min(bytes.len());
    Ok(Value::string(&bytes[start..end]))
}

pub fn char_index(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 1 {
        return Err(WispError::arity("char-index takes 1 argument"));
    }
    let idx = args[0].as_int().ok_or_else(|| WispError::type_error("Index must be a number"))?;
    if !(0..0x100).contains(&idx) {
        return Err(WispError::type_error("Index must be in byte range"));
    }
    Ok(Value::string(vec![idx as u8]))
}
