//! OpenHashMultiset: key→multiplicity facade over the probing engine.
//!
//! Duplicate inserts fold into a single `(value, count)` slot instead of
//! occupying additional slots. Removal drops the whole slot, all
//! multiplicity at once; that matches the table's tombstone model, where a
//! slot is either live or deleted, and is deliberate (see `remove`).

use crate::raw_table::{self, EntryPolicy, RawTable};
use crate::DefaultHashBuilder;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::marker::PhantomData;

struct CountPolicy<T>(PhantomData<fn() -> T>);

impl<T> Default for CountPolicy<T> {
    fn default() -> Self {
        CountPolicy(PhantomData)
    }
}

impl<T> EntryPolicy for CountPolicy<T>
where
    T: Eq + Hash,
{
    type Element = (T, usize);
    type Key = T;

    #[inline]
    fn key_of<'a>(&self, element: &'a (T, usize)) -> &'a T {
        &element.0
    }
}

pub struct OpenHashMultiset<T, S = DefaultHashBuilder>
where
    T: Eq + Hash,
{
    table: RawTable<CountPolicy<T>, S>,
}

impl<T> OpenHashMultiset<T>
where
    T: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_capacity_hint(1)
    }

    /// Pre-size for roughly `hint` distinct values.
    pub fn with_capacity_hint(hint: usize) -> Self {
        Self::with_capacity_hint_and_hasher(hint, DefaultHashBuilder::default())
    }
}

impl<T> Default for OpenHashMultiset<T>
where
    T: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> OpenHashMultiset<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_hint_and_hasher(1, hasher)
    }

    pub fn with_capacity_hint_and_hasher(hint: usize, hasher: S) -> Self {
        Self {
            table: RawTable::new(hint, CountPolicy::default(), hasher),
        }
    }

    /// Number of distinct values, not total multiplicity.
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

    /// Multiplicity of `value`, 0 when absent.
    pub fn count<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.find(value).map_or(0, |e| e.1)
    }

    /// Insert one occurrence, returning the new multiplicity. A present
    /// value only bumps its stored counter; table occupancy is unchanged.
    pub fn insert(&mut self, value: T) -> usize {
        if let Some(entry) = self.table.find_mut(&value) {
            entry.1 += 1;
            return entry.1;
        }
        self.table.insert((value, 1));
        1
    }

    /// Remove the whole slot for `value`, all multiplicity at once, and
    /// return the multiplicity it had. One `remove` after three `insert`s of
    /// the same value leaves the value absent. Absent values are a no-op.
    pub fn remove<Q>(&mut self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.remove(value).map(|e| e.1)
    }

    /// Iterate `(&value, multiplicity)` per distinct value, in slot order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.iter(),
        }
    }
}

/// Iterator over `(value, multiplicity)` entries in slot order.
pub struct Iter<'a, T> {
    inner: raw_table::Iter<'a, (T, usize)>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (&'a T, usize);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| (&e.0, e.1))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|e| (&e.0, e.1))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: N inserts of one value yield count N in a single slot.
    #[test]
    fn repeated_insert_folds_into_counter() {
        let mut ms: OpenHashMultiset<String> = OpenHashMultiset::new();
        assert_eq!(ms.insert("a".to_string()), 1);
        assert_eq!(ms.insert("a".to_string()), 2);
        assert_eq!(ms.insert("a".to_string()), 3);
        assert_eq!(ms.count("a"), 3);
        assert_eq!(ms.len(), 1, "duplicates must share one slot");
    }

    /// Invariant: one remove drops the entire slot, not one occurrence.
    #[test]
    fn remove_drops_whole_slot() {
        let mut ms: OpenHashMultiset<String> = OpenHashMultiset::new();
        for _ in 0..3 {
            ms.insert("a".to_string());
        }
        assert_eq!(ms.remove("a"), Some(3));
        assert!(!ms.contains("a"), "one delete removes all multiplicity");
        assert_eq!(ms.count("a"), 0);
        assert_eq!(ms.remove("a"), None);
    }

    /// Invariant: count is 0 for absent values, exact for present ones, and
    /// independent across values.
    #[test]
    fn count_tracks_per_value_multiplicity() {
        let mut ms: OpenHashMultiset<u32> = OpenHashMultiset::new();
        for v in [1, 2, 2, 3, 3, 3] {
            ms.insert(v);
        }
        assert_eq!(ms.count(&1), 1);
        assert_eq!(ms.count(&2), 2);
        assert_eq!(ms.count(&3), 3);
        assert_eq!(ms.count(&4), 0);
        assert_eq!(ms.len(), 3);
    }

    /// Invariant: iteration yields each distinct value once with its
    /// multiplicity.
    #[test]
    fn iteration_yields_distinct_values_with_counts() {
        let mut ms: OpenHashMultiset<u32> = OpenHashMultiset::new();
        for v in [5, 5, 7, 9, 9, 9] {
            ms.insert(v);
        }
        let mut seen: Vec<(u32, usize)> = ms.iter().map(|(v, n)| (*v, n)).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![(5, 2), (7, 1), (9, 3)]);
    }

    /// Invariant: reverse iteration mirrors the forward slot-order walk,
    /// multiplicities included.
    #[test]
    fn reverse_iteration_mirrors_forward() {
        let mut ms: OpenHashMultiset<u32> = OpenHashMultiset::new();
        for v in [5, 5, 7, 9, 9, 9] {
            ms.insert(v);
        }
        let forward: Vec<(u32, usize)> = ms.iter().map(|(v, n)| (*v, n)).collect();
        let mut backward: Vec<(u32, usize)> = ms.iter().rev().map(|(v, n)| (*v, n)).collect();
        backward.reverse();
        assert_eq!(forward, backward);
    }

    /// Invariant: counters survive growth; only distinct values drive it.
    #[test]
    fn counters_survive_growth() {
        let mut ms: OpenHashMultiset<u32> = OpenHashMultiset::new();
        for v in 0..100 {
            for _ in 0..(v % 4 + 1) {
                ms.insert(v);
            }
            assert!(ms.capacity() >= 2 * ms.len());
        }
        for v in 0..100 {
            assert_eq!(ms.count(&v), (v % 4 + 1) as usize, "count wrong for {v}");
        }
    }
}
