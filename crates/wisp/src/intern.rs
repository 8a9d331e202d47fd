//! String/symbol/keyword intern pool.
//!
//! Optional per spec.md §4.1: when a pool is supplied to the reader, equal
//! byte-strings it produces share one backing allocation, which speeds up
//! symbol lookup in the environment chain. Equality remains content-based
//! regardless of whether interning is in use — grounded on
//! `examples/original_source/src/malstring.hpp`'s `MalString::Make` plus
//! the original's `StringInternPool`/`intern` builtin.

use std::rc::Rc;

use ahash::AHashSet;

use crate::value::Bytes;

#[derive(Default)]
pub struct InternPool {
    strings: AHashSet<Bytes>,
}

impl InternPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the pool's shared copy of `bytes`, inserting it if this is
    /// the first time these exact bytes have been seen.
    pub fn intern(&mut self, bytes: &[u8]) -> Bytes {
        if let Some(existing) = self.strings.get(bytes) {
            return existing.clone();
        }
        let owned: Bytes = Rc::from(bytes);
        self.strings.insert(owned.clone());
        owned
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
