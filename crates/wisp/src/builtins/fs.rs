//! File-system builtins (spec.md §4.6).
//!
//! Grounded on `examples/original_source/src/core_lib.cpp`'s
//! `_Core_Slurp`/`_Core_LoadLibrary`. `load-library` is a stub here: dynamic
//! loading of host-compiled native extensions is a separate, unsafe,
//! platform-specific capability gated behind the `dylib-plugins` feature,
//! off by default (see `get-system-info`'s `dylib_plugins_enabled` flag).

use crate::{
    error::{RunResult, WispError},
    eval::Evaluator,
    value::{Value, ValueKind},
};

pub fn slurp(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 1 {
        return Err(WispError::arity("slurp takes 1 argument"));
    }
    let ValueKind::String(path) = &args[0].kind else {
        return Err(WispError::type_error("First argument must be a string"));
    };
    let path = String::from_utf8_lossy(path).into_owned();
    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(Value::string(contents.into_bytes())),
        Err(e) => Err(WispError::runtime(format!("Could not open file {path}: {e}"))),
    }
}

#[cfg(feature = "dylib-plugins")]
pub fn load_library(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 1 {
        return Err(WispError::arity("load-library takes 1 argument"));
    }
    let ValueKind::String(_path) = &args[0].kind else {
        return Err(WispError::type_error("First argument must be a string"));
    };
    Err(WispError::runtime("load-library: dynamic plugin loading is not implemented"))
}

#[cfg(not(feature = "dylib-plugins"))]
pub fn load_library(_ev: &mut Evaluator, args: Vec<Value>) -> RunResult<Value> {
    if args.len() != 1 {
        return Err(WispError::arity("load-library takes 1 argument"));
    }
    Err(WispError::runtime("load-library: disabled (build without the dylib-plugins feature)"))
}
