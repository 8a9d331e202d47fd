//! Readable and raw value serialization (spec.md §4.2).
//!
//! Grounded on `examples/original_source/src/printer.cpp`'s `OstreamPrinter`
//! and `EscapeString`. The "print-begin" raw/readable flag there is a
//! per-invocation mode that does not reset for nested sub-values within one
//! call — here that's just a `raw: bool` threaded through the recursive
//! writer, which amounts to the same thing. TTY color output
//! (`TTYPrinter`/`TTYColors`) is not carried over: formatting escape codes
//! for a terminal has no counterpart in this crate's interfaces.

use std::fmt::Write as _;

use crate::value::{Value, ValueKind};

/// Renders `value` the readable way: strings are escaped and quoted. Used by
/// `pr-str`/`prn`.
pub fn print_readable(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, false);
    out
}

/// Renders `value` the raw way: strings are emitted verbatim. Used by
/// `str`/`println`, and by [`crate::error::WispError::message`].
pub fn print_raw(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, true);
    out
}

fn write_value(out: &mut String, value: &Value, raw: bool) {
    match &value.kind {
        ValueKind::Nil => out.push_str("nil"),
        ValueKind::True => out.push_str("true"),
        ValueKind::False => out.push_str("false"),
        ValueKind::Int(n) => {
            let _ = write!(out, "{n}");
        }
        ValueKind::Symbol(b) => out.push_str(&String::from_utf8_lossy(b)),
        ValueKind::Keyword(b) => {
            out.push(':');
            out.push_str(&String::from_utf8_lossy(b));
        }
        ValueKind::String(b) => {
            let text = String::from_utf8_lossy(b);
            if raw {
                out.push_str(&text);
            } else {
                escape_string(out, &text);
            }
        }
        ValueKind::List(list) => {
            out.push('(');
            write_sequence(out, list, raw);
            out.push(')');
        }
        ValueKind::Vector(list) => {
            out.push('[');
            write_sequence(out, list, raw);
            out.push(']');
        }
        ValueKind::Map(cell) => {
            out.push('{');
            let mut first = true;
            for (k, v) in cell.entries() {
                if !first {
                    out.push(' ');
                }
                write_value(out, &k, raw);
                out.push(' ');
                write_value(out, &v, raw);
                first = false;
            }
            out.push('}');
        }
        ValueKind::Builtin(_) => out.push_str("<builtin-function>"),
        ValueKind::Function(_) => out.push_str("<function>"),
        ValueKind::Atom(cell) => {
            out.push_str("<atom ");
            write_value(out, &cell.borrow(), raw);
            out.push('>');
        }
    }
}

fn write_sequence(out: &mut String, list: &crate::list::List, raw: bool) {
    let mut cur = list.clone();
    let mut first = true;
    while let Some(node) = cur {
        if !first {
            out.push(' ');
        }
        write_value(out, &node.head, raw);
        first = false;
        cur = node.tail.clone();
    }
}

/// Escapes `\`, newline, and `"`, wrapping the result in `"`.
fn escape_string(out: &mut String, text: &str) {
    out.push('"');
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '"' => out.push_str("\\\""),
            other => out.push(other),
        }
    }
    out.push('"');
}
