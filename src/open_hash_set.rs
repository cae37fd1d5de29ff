//! OpenHashSet: key-set facade over the probing engine.
//!
//! Elements are bare keys; key extraction is identity and `insert` is
//! idempotent.

use crate::raw_table::{self, EntryPolicy, RawTable};
use crate::DefaultHashBuilder;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::marker::PhantomData;

struct SetPolicy<T>(PhantomData<fn() -> T>);

impl<T> Default for SetPolicy<T> {
    fn default() -> Self {
        SetPolicy(PhantomData)
    }
}

impl<T> EntryPolicy for SetPolicy<T>
where
    T: Eq + Hash,
{
    type Element = T;
    type Key = T;

    #[inline]
    fn key_of<'a>(&self, element: &'a T) -> &'a T {
        element
    }
}

pub struct OpenHashSet<T, S = DefaultHashBuilder>
where
    T: Eq + Hash,
{
    table: RawTable<SetPolicy<T>, S>,
}

impl<T> OpenHashSet<T>
where
    T: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_capacity_hint(1)
    }

    /// Pre-size for roughly `hint` values.
    pub fn with_capacity_hint(hint: usize) -> Self {
        Self::with_capacity_hint_and_hasher(hint, DefaultHashBuilder::default())
    }
}

impl<T> Default for OpenHashSet<T>
where
    T: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> OpenHashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_hint_and_hasher(1, hasher)
    }

    pub fn with_capacity_hint_and_hasher(hint: usize, hasher: S) -> Self {
        Self {
            table: RawTable::new(hint, SetPolicy::default(), hasher),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Allocated slot count; always more than twice `len`.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.contains(value)
    }

    /// Idempotent insert: `true` when the value was newly added, `false`
    /// when it was already present (in which case the stored value is
    /// overwritten in place, a no-op for well-behaved `Eq` types).
    pub fn insert(&mut self, value: T) -> bool {
        self.table.insert(value).is_none()
    }

    /// Remove a value; `false` when it was absent (a no-op, not an error).
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.remove(value).is_some()
    }

    /// Iterate values in slot order (not insertion order).
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.iter(),
        }
    }
}

/// Iterator over set values in slot order.
pub struct Iter<'a, T> {
    inner: raw_table::Iter<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    /// Invariant: insert is idempotent; re-inserting a present value leaves
    /// the set unchanged and reports it as not newly added.
    #[test]
    fn insert_is_idempotent() {
        let mut s: OpenHashSet<String> = OpenHashSet::new();
        assert!(s.insert("hello".to_string()));
        assert!(!s.insert("hello".to_string()));
        assert_eq!(s.len(), 1);
        assert!(s.contains("hello"));
    }

    /// Invariant: contains reflects insert-then-not-removed, with borrowed
    /// lookups; removing an absent value is a no-op.
    #[test]
    fn contains_and_remove() {
        let mut s: OpenHashSet<String> = OpenHashSet::new();
        for v in ["hello", "world", "abc", "a", "b", "c"] {
            s.insert(v.to_string());
        }
        assert!(s.contains("hello"));
        assert!(!s.contains("wrold"));

        assert!(s.remove("hello"));
        assert!(!s.contains("hello"));
        assert!(!s.remove("hello"));
        assert_eq!(s.len(), 5);
    }

    /// Invariant: iteration yields each live value exactly once.
    #[test]
    fn iteration_yields_each_value_once() {
        let mut s: OpenHashSet<u32> = OpenHashSet::new();
        for v in 0..50 {
            s.insert(v);
        }
        for v in (0..50).step_by(2) {
            s.remove(&v);
        }
        let seen: BTreeSet<u32> = s.iter().copied().collect();
        let expected: BTreeSet<u32> = (0..50).filter(|v| v % 2 == 1).collect();
        assert_eq!(seen, expected);
        assert_eq!(s.iter().len(), s.len());
    }

    /// Invariant: reverse iteration yields the forward slot-order sequence
    /// mirrored, with the same exact size.
    #[test]
    fn reverse_iteration_mirrors_forward() {
        let mut s: OpenHashSet<u32> = OpenHashSet::new();
        for v in 0..20 {
            s.insert(v);
        }
        s.remove(&7);
        let forward: Vec<u32> = s.iter().copied().collect();
        let mut backward: Vec<u32> = s.iter().rev().copied().collect();
        backward.reverse();
        assert_eq!(forward, backward);
        assert_eq!(s.iter().rev().len(), s.len());
    }

    /// Invariant: `capacity >= 2 * len` after every operation.
    #[test]
    fn capacity_invariant_holds() {
        let mut s: OpenHashSet<u64> = OpenHashSet::new();
        for v in 0..300 {
            s.insert(v);
            assert!(s.capacity() >= 2 * s.len());
        }
    }
}
