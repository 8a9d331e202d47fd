//! Hash-map values, with a lazy assoc/dissoc overlay (spec.md §3 "MapSpec").
//!
//! The spec describes `Map` and `MapSpec` as two distinct tagged-union
//! kinds that are semantically equivalent and materialize into one another.
//! Per spec.md §9's design note ("if the target language forbids in-place
//! tag rewrites, collapse once and cache the result behind an
//! interior-mutable slot"), this is collapsed into a single Rust type,
//! [`MapCell`], wrapping an `Rc<RefCell<MapRepr>>`. `MapRepr::Spec` models
//! the deferred overlay; observing a map's contents collapses the whole
//! chain down to `MapRepr::Realized`, rewriting every cell along the chain
//! in place so the collapse happens at most once per value and every
//! holder of the same `MapCell` sees the materialized table thereafter.
//!
//! Grounded on `examples/original_source/src/malmap.hpp`'s `MalMap`/`MapSpec`.

use std::{cell::RefCell, rc::Rc};

use indexmap::IndexMap;

use crate::value::Value;

/// Insertion-ordered table backing a realized map. Iteration order is
/// deterministic per map but otherwise unspecified (spec.md §4.2), which an
/// `IndexMap` gives for free.
pub type MapTable = IndexMap<Value, Value, ahash::RandomState>;

#[derive(Clone)]
enum AssocOp {
    Assoc(Value),
    Dissoc,
}

enum MapRepr {
    Realized(MapTable),
    Spec { base: MapCell, key: Value, op: AssocOp },
}

/// A map value: either fully realized, or a lazy `assoc`/`dissoc` overlay on
/// top of another `MapCell`.
#[derive(Clone)]
pub struct MapCell(Rc<RefCell<MapRepr>>);

impl MapCell {
    pub fn empty() -> Self {
        Self(Rc::new(RefCell::new(MapRepr::Realized(MapTable::default()))))
    }

    pub fn from_table(table: MapTable) -> Self {
        Self(Rc::new(RefCell::new(MapRepr::Realized(table))))
    }

    /// `assoc`: returns a new, lazy overlay — does not touch `self`, and
    /// does not materialize anything yet.
    pub fn assoc(&self, key: Value, value: Value) -> MapCell {
        MapCell(Rc::new(RefCell::new(MapRepr::Spec { base: self.clone(), key, op: AssocOp::Assoc(value) })))
    }

    /// `dissoc`: same as `assoc`, but erases `key` instead.
    pub fn dissoc(&self, key: Value) -> MapCell {
        MapCell(Rc::new(RefCell::new(MapRepr::Spec { base: self.clone(), key, op: AssocOp::Dissoc })))
    }

    pub fn strong_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    /// Collapses the overlay chain bottom-up into a concrete table,
    /// memoizing the result on every cell walked (including `self`), so a
    /// repeated observation is O(1). This is the sole permitted in-place
    /// mutation of a value's tag (spec.md §3).
    fn materialize(&self) -> MapTable {
        // Fast path: already realized, just clone the table.
        if let MapRepr::Realized(table) = &*self.0.borrow() {
            return table.clone();
        }
        let (base, key, op) = match &*self.0.borrow() {
            MapRepr::Realized(table) => return table.clone(),
            MapRepr::Spec { base, key, op } => (base.clone(), key.clone(), op.clone()),
        };
        let mut table = base.materialize();
        match op {
            AssocOp::Assoc(value) => {
                table.insert(key, value);
            }
            AssocOp::Dissoc => {
                table.shift_remove(&key);
            }
        }
        *self.0.borrow_mut() = MapRepr::Realized(table.clone());
        table
    }

    pub fn get(&self, key: &Value) -> Option<Value> {
        self.materialize().get(key).cloned()
    }

    pub fn contains(&self, key: &Value) -> bool {
        self.materialize().contains_key(key)
    }

    pub fn keys(&self) -> Vec<Value> {
        self.materialize().keys().cloned().collect()
    }

    pub fn vals(&self) -> Vec<Value> {
        self.materialize().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.materialize().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn entries(&self) -> Vec<(Value, Value)> {
        self.materialize().into_iter().collect()
    }
}

impl PartialEq for MapCell {
    fn eq(&self, other: &Self) -> bool {
        let a = self.materialize();
        let b = other.materialize();
        a.len() == b.len() && a.iter().all(|(k, v)| b.get(k).is_some_and(|bv| bv == v))
    }
}

impl Eq for MapCell {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn assoc_then_get_returns_the_value() {
        let m = MapCell::empty();
        let m = m.assoc(Value::keyword(&b"a"[..]), Value::int(1));
        assert_eq!(m.get(&Value::keyword(&b"a"[..])), Some(Value::int(1)));
    }

    #[test]
    fn dissoc_removes_the_key() {
        let m = MapCell::empty().assoc(Value::keyword(&b"a"[..]), Value::int(1));
        let m = m.dissoc(Value::keyword(&b"a"[..]));
        assert!(!m.contains(&Value::keyword(&b"a"[..])));
    }

    #[test]
    fn dissoc_of_assoc_matches_plain_dissoc_keyset() {
        let base = MapCell::empty().assoc(Value::keyword(&b"x"[..]), Value::int(0));
        let via_assoc = base.assoc(Value::keyword(&b"y"[..]), Value::int(1)).dissoc(Value::keyword(&b"y"[..]));
        let via_plain = base.dissoc(Value::keyword(&b"y"[..]));
        assert_eq!(via_assoc.keys().len(), via_plain.keys().len());
    }

    #[test]
    fn materialization_collapses_once_and_is_visible_to_clones() {
        let base = MapCell::empty().assoc(Value::keyword(&b"a"[..]), Value::int(1));
        let clone_of_base = base.clone();
        // Observe through one handle...
        assert_eq!(base.len(), 1);
        // ...and the collapse is visible through the other, since they share
        // the same underlying cell.
        assert_eq!(clone_of_base.get(&Value::keyword(&b"a"[..])), Some(Value::int(1)));
    }

    #[test]
    fn overlay_does_not_mutate_the_base() {
        let base = MapCell::empty().assoc(Value::keyword(&b"a"[..]), Value::int(1));
        let _overlay = base.assoc(Value::keyword(&b"b"[..]), Value::int(2));
        assert!(!base.contains(&Value::keyword(&b"b"[..])));
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a = MapCell::empty().assoc(Value::keyword(&b"x"[..]), Value::int(1)).assoc(Value::keyword(&b"y"[..]), Value::int(2));
        let b = MapCell::empty().assoc(Value::keyword(&b"y"[..]), Value::int(2)).assoc(Value::keyword(&b"x"[..]), Value::int(1));
        assert_eq!(a, b);
    }
}
