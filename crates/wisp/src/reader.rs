//! Tokenizer and recursive-descent parser (spec.md §4.1).
//!
//! Grounded on `examples/original_source/src/reader.cpp`/`.hpp` for
//! tokenization, list/vector parsing, and the `'`/`` ` ``/`~`/`~@`/`@` reader
//! macros. The `{` hash-map literal and the `^`/`^@` metadata macros are not
//! in the original reader — they're spec.md §4.1 additions, built the same
//! way as the macros the original already has.

use std::{cell::RefCell, rc::Rc};

use crate::{
    error::{RunResult, WispError},
    intern::InternPool,
    list::{self, List, ListBuilder},
    map::{MapCell, MapTable},
    value::{Bytes, Value, ValueKind},
};

const SINGLE_CHARS: &[u8] = b"[]{}()'`~^@";

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0B | 0x0C | b',')
}

fn is_delimiter(b: u8) -> bool {
    is_whitespace(b) || SINGLE_CHARS.contains(&b) || b == b';'
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Special,
    Symbol,
    Keyword,
    String,
    Number,
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    text: Vec<u8>,
}

fn tokenize(src: &[u8]) -> RunResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let n = src.len();
    let mut i = 0;
    while i < n {
        let ch = src[i];
        if is_whitespace(ch) {
            i += 1;
            continue;
        }
        if ch == b';' {
            while i < n && src[i] != b'\n' {
                i += 1;
            }
            continue;
        }
        if ch == b'~' && i + 1 < n && src[i + 1] == b'@' {
            tokens.push(Token { kind: TokenKind::Special, text: b"~@".to_vec() });
            i += 2;
            continue;
        }
        if ch == b'^' && i + 1 < n && src[i + 1] == b'@' {
            tokens.push(Token { kind: TokenKind::Special, text: b"^@".to_vec() });
            i += 2;
            continue;
        }
        if SINGLE_CHARS.contains(&ch) {
            tokens.push(Token { kind: TokenKind::Special, text: vec![ch] });
            i += 1;
            continue;
        }
        if ch == b'"' {
            i += 1;
            let mut buf = Vec::new();
            let mut finished = false;
            while i < n {
                let c = src[i];
                i += 1;
                if c == b'"' {
                    finished = true;
                    break;
                } else if c == b'\\' {
                    if i >= n {
                        break;
                    }
                    let esc = src[i];
                    i += 1;
                    match esc {
                        b'\\' => buf.push(b'\\'),
                        b'"' => buf.push(b'"'),
                        b'n' => buf.push(b'\n'),
                        b't' => buf.push(b'\t'),
                        other => buf.push(other),
                    }
                } else {
                    buf.push(c);
                }
            }
            if !finished {
                return Err(WispError::syntax("Incomplete string"));
            }
            tokens.push(Token { kind: TokenKind::String, text: buf });
            continue;
        }
        let starts_number = ch.is_ascii_digit() || ((ch == b'+' || ch == b'-') && i + 1 < n && src[i + 1].is_ascii_digit());
        if starts_number {
            let start = i;
            i += 1;
            while i < n {
                let c = src[i];
                if c.is_ascii_digit() || c == b'_' {
                    i += 1;
                } else if is_delimiter(c) {
                    break;
                } else {
                    return Err(WispError::syntax("Invalid number"));
                }
            }
            tokens.push(Token { kind: TokenKind::Number, text: src[start..i].to_vec() });
            continue;
        }
        let start = i;
        let is_keyword = ch == b':';
        if is_keyword {
            i += 1;
        }
        while i < n && !is_delimiter(src[i]) {
            i += 1;
        }
        let text_start = if is_keyword { start + 1 } else { start };
        if is_keyword && text_start >= i {
            return Err(WispError::syntax("Undefined token: :"));
        }
        tokens.push(Token {
            kind: if is_keyword { TokenKind::Keyword } else { TokenKind::Symbol },
            text: src[text_start..i].to_vec(),
        });
    }
    Ok(tokens)
}

fn parse_int(text: &[u8]) -> RunResult<i64> {
    let neg = text.first() == Some(&b'-');
    let body = if matches!(text.first(), Some(b'-') | Some(b'+')) { &text[1..] } else { text };
    let mut value: i64 = 0;
    let mut saw_digit = false;
    for &b in body {
        if b == b'_' {
            continue;
        }
        if !b.is_ascii_digit() {
            return Err(WispError::syntax("Invalid number"));
        }
        saw_digit = true;
        value = value.wrapping_mul(10).wrapping_add(i64::from(b - b'0'));
    }
    if !saw_digit {
        return Err(WispError::syntax("Invalid number"));
    }
    Ok(if neg { -value } else { value })
}

/// A token stream over one source buffer, with `peek`/`next`/`is_drained`
/// exposed for embedding a form-at-a-time reader (spec.md §4.1).
pub struct Reader {
    tokens: Vec<Token>,
    idx: usize,
    pool: Option<Rc<RefCell<InternPool>>>,
}

impl Reader {
    pub fn new(src: &[u8]) -> RunResult<Self> {
        Self::with_pool(src, None)
    }

    pub fn with_pool(src: &[u8], pool: Option<Rc<RefCell<InternPool>>>) -> RunResult<Self> {
        Ok(Self { tokens: tokenize(src)?, idx: 0, pool })
    }

    fn peek(&self) -> RunResult<&Token> {
        self.tokens.get(self.idx).ok_or_else(|| WispError::syntax("Unexpected end of token stream"))
    }

    fn next(&mut self) -> RunResult<Token> {
        let tok = self.peek()?.clone();
        self.idx += 1;
        Ok(tok)
    }

    pub fn skip(&mut self) {
        self.idx += 1;
    }

    pub fn is_drained(&self) -> bool {
        self.idx >= self.tokens.len()
    }

    fn intern(&mut self, bytes: &[u8]) -> Bytes {
        match &self.pool {
            Some(pool) => pool.borrow_mut().intern(bytes),
            None => Rc::from(bytes),
        }
    }

    /// Reads one form from the current position.
    pub fn read_form(&mut self) -> RunResult<Value> {
        let tok = self.next()?;
        if tok.kind != TokenKind::Special {
            return self.read_single(tok);
        }
        match tok.text.as_slice() {
            b"(" => Ok(Value::list(self.read_list(b")")?)),
            b")" => Err(WispError::syntax("Unexpected character while parsing: ')'")),
            b"[" => Ok(Value::vector(self.read_list(b"]")?)),
            b"]" => Err(WispError::syntax("Unexpected character while parsing: ']'")),
            b"{" => {
                let items = self.read_list(b"}")?;
                Ok(Value::list(list::cons(Value::symbol(&b"hash-map"[..]), items)))
            }
            b"}" => Err(WispError::syntax("Unexpected character while parsing: '}'")),
            b"@" => Ok(wrap_call("deref", self.read_form()?)),
            b"'" => Ok(wrap_call("quote", self.read_form()?)),
            b"`" => Ok(wrap_call("quasiquote", self.read_form()?)),
            b"~" => Ok(wrap_call("unquote", self.read_form()?)),
            b"~@" => Ok(wrap_call("splice-unquote", self.read_form()?)),
            b"^" => {
                let meta = self.read_form()?;
                let target = self.read_form()?;
                Ok(wrap_call2("with-meta", target, meta))
            }
            b"^@" => {
                let meta_form = self.read_form()?;
                let target = self.read_form()?;
                Ok(target.with_meta(materialize_meta_literal(&meta_form)))
            }
            other => Err(WispError::syntax(format!("Undefined token: {}", String::from_utf8_lossy(other)))),
        }
    }

    fn read_list(&mut self, end: &[u8]) -> RunResult<List> {
        let mut builder = ListBuilder::new();
        loop {
            let tok = self.peek()?;
            if tok.kind == TokenKind::Special && tok.text.as_slice() == end {
                self.skip();
                break;
            }
            builder.push(self.read_form()?);
        }
        Ok(builder.release())
    }

    fn read_single(&mut self, tok: Token) -> RunResult<Value> {
        match tok.kind {
            TokenKind::Symbol => match tok.text.as_slice() {
                b"nil" => Ok(Value::nil()),
                b"true" => Ok(Value::bool_val(true)),
                b"false" => Ok(Value::bool_val(false)),
                _ => Ok(Value::symbol(self.intern(&tok.text))),
            },
            TokenKind::Number => Ok(Value::int(parse_int(&tok.text)?)),
            TokenKind::Keyword => Ok(Value::keyword(self.intern(&tok.text))),
            TokenKind::String => Ok(Value::string(self.intern(&tok.text))),
            TokenKind::Special => unreachable!("special tokens are handled in read_form"),
        }
    }
}

fn wrap_call(name: &'static str, arg: Value) -> Value {
    Value::list(list::cons(Value::symbol(name.as_bytes()), list::cons(arg, None)))
}

fn wrap_call2(name: &'static str, first: Value, second: Value) -> Value {
    Value::list(list::cons(Value::symbol(name.as_bytes()), list::cons(first, list::cons(second, None))))
}

/// For the `^@` reader macro: if `form` is a literal `(hash-map …)` call,
/// builds the map directly from its (already-literal) key/value forms
/// instead of deferring to evaluation, since the reader has no environment
/// to evaluate against. Any other form is attached to `meta` as-is.
fn materialize_meta_literal(form: &Value) -> Value {
    if let ValueKind::List(Some(node)) = &form.kind {
        if node.head.is_symbol() && node.head.as_bytes() == Some(b"hash-map") {
            let mut table = MapTable::default();
            let mut items = list::to_vec(&node.tail).into_iter();
            while let (Some(k), Some(v)) = (items.next(), items.next()) {
                table.insert(k, v);
            }
            let mut result = Value::map(MapCell::from_table(table));
            result.meta = form.meta.clone();
            return result;
        }
    }
    form.clone()
}

/// Reads the first form out of `src`, with no intern pool.
pub fn read_str(src: &[u8]) -> RunResult<Value> {
    Reader::new(src)?.read_form()
}

/// Reads the first form out of `src`, interning symbols/keywords/strings
/// through `pool`.
pub fn read_str_interned(src: &[u8], pool: Rc<RefCell<InternPool>>) -> RunResult<Value> {
    Reader::with_pool(src, Some(pool))?.read_form()
}
