//! Registers every builtin into a global frame (spec.md §4.5).
//!
//! Grounded on `examples/original_source/src/core_lib.cpp`'s
//! `Interpreter::InitEnv`, which lists `EXP_FUNC("name", Handler)` pairs one
//! per line; `install` is the same table, just built with a Rust macro
//! instead of a C preprocessor one.

mod arithmetic;
mod compare;
mod fs;
mod maps;
mod runtime;
mod sequence;
mod strings;
mod types;
mod values;

use crate::{
    env::Env,
    eval::BuiltinFn,
    value::{Builtin, Value},
};

fn def(env: &Env, name: &'static str, func: BuiltinFn) {
    env.set(name.as_bytes().into(), Value::builtin(Builtin::new(name, func)));
}

/// Populates `env` with every core builtin (spec.md §4.5).
pub fn install(env: &Env) {
    def(env, "+", arithmetic::plus);
    def(env, "-", arithmetic::minus);
    def(env, "*", arithmetic::times);
    def(env, "/", arithmetic::divide);
    def(env, "mod", arithmetic::modulo);

    def(env, "list", types::list);
    def(env, "list?", types::is_list);
    def(env, "vector", types::vector);
    def(env, "vector?", types::is_vector);
    def(env, "hash-map", types::hash_map);
    def(env, "map?", types::is_map);
    def(env, "sequence?", types::is_sequence);
    def(env, "number?", types::is_number);
    def(env, "atom", types::atom);
    def(env, "atom?", types::is_atom);
    def(env, "symbol", types::symbol);
    def(env, "symbol?", types::is_symbol);
    def(env, "string?", types::is_string);
    def(env, "keyword", types::keyword);
    def(env, "keyword?", types::is_keyword);

    def(env, "deref", values::deref);
    def(env, "reset!", values::reset);
    def(env, "meta", values::meta);
    def(env, "with-meta", values::with_meta);
    def(env, "ref-count", values::ref_count);
    def(env, "intern", values::intern);
    def(env, "get-system-info", values::get_system_info);

    def(env, "empty?", sequence::is_empty);
    def(env, "count", sequence::count);
    def(env, "first", sequence::first);
    def(env, "rest", sequence::rest);
    def(env, "nth", sequence::nth);
    def(env, "cons", sequence::cons);
    def(env, "concat", sequence::concat);

    def(env, "assoc", maps::assoc);
    def(env, "dissoc", maps::dissoc);
    def(env, "get", maps::get);
    def(env, "contains?", maps::contains);
    def(env, "keys", maps::keys);
    def(env, "vals", maps::vals);

    def(env, "=", compare::eq);
    def(env, "list-equal", compare::list_equal);
    def(env, "<", compare::lt);
    def(env, "<=", compare::le);
    def(env, ">", compare::gt);
    def(env, ">=", compare::ge);

    def(env, "pr-str", strings::pr_str);
    def(env, "str", strings::str);
    def(env, "prn", strings::prn);
    def(env, "println", strings::println);
    def(env, "read-string", strings::read_string);
    def(env, "substr", strings::substr);
    def(env, "char-index", strings::char_index);

    def(env, "eval", runtime::eval);
    def(env, "throw", runtime::throw);
    def(env, "apply", runtime::apply);

    def(env, "slurp", fs::slurp);
    def(env, "load-library", fs::load_library);
}
