//! Lexical environment frames (spec.md §4.3).
//!
//! Grounded on `examples/original_source/src/invoke.hpp`'s `Environment`:
//! a name→value map plus an optional outer frame. Frames are shared —
//! closures capture the frame they were defined in, and a later `def`
//! through any holder of that frame is visible to all of them.

use std::{cell::RefCell, rc::Rc};

use ahash::AHashMap;

use crate::{
    error::{RunResult, WispError},
    value::{Bytes, Value},
};

struct Frame {
    vars: RefCell<AHashMap<Bytes, Value>>,
    outer: Option<Env>,
}

/// A shared handle to one lexical scope. Cheap to clone (just an `Rc` bump).
#[derive(Clone)]
pub struct Env(Rc<Frame>);

impl Env {
    pub fn new(outer: Option<Env>) -> Self {
        Self(Rc::new(Frame { vars: RefCell::new(AHashMap::default()), outer }))
    }

    /// Inserts or overwrites `name` in *this* frame only (spec.md §4.3 `set`).
    pub fn set(&self, name: Bytes, value: Value) {
        self.0.vars.borrow_mut().insert(name, value);
    }

    /// Walks outer frames until `name` is found.
    pub fn lookup(&self, name: &[u8]) -> RunResult<Value> {
        let mut frame = self.clone();
        loop {
            if let Some(v) = frame.0.vars.borrow().get(name) {
                return Ok(v.clone());
            }
            match frame.0.outer.clone() {
                Some(outer) => frame = outer,
                None => {
                    return Err(WispError::lookup(format!(
                        "Cannot find '{}' in current context",
                        String::from_utf8_lossy(name)
                    )));
                }
            }
        }
    }

    pub fn outer(&self) -> Option<Env> {
        self.0.outer.clone()
    }
}
