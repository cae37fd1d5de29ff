//! OpenHashMap: key→value facade over the probing engine.
//!
//! Elements are `(K, V)` pairs; the policy hashes and compares on the key
//! half only. `insert` is always an upsert.

use crate::raw_table::{self, EntryPolicy, RawTable};
use crate::DefaultHashBuilder;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::marker::PhantomData;
use core::ops::{Index, IndexMut};

struct MapPolicy<K, V>(PhantomData<fn() -> (K, V)>);

impl<K, V> Default for MapPolicy<K, V> {
    fn default() -> Self {
        MapPolicy(PhantomData)
    }
}

impl<K, V> EntryPolicy for MapPolicy<K, V>
where
    K: Eq + Hash,
{
    type Element = (K, V);
    type Key = K;

    #[inline]
    fn key_of<'a>(&self, element: &'a (K, V)) -> &'a K {
        &element.0
    }
}

pub struct OpenHashMap<K, V, S = DefaultHashBuilder>
where
    K: Eq + Hash,
{
    table: RawTable<MapPolicy<K, V>, S>,
}

impl<K, V> OpenHashMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_capacity_hint(1)
    }

    /// Pre-size for roughly `hint` entries; the table allocates twice that
    /// many slots so the first growth is deferred past `hint` inserts.
    pub fn with_capacity_hint(hint: usize) -> Self {
        Self::with_capacity_hint_and_hasher(hint, DefaultHashBuilder::default())
    }
}

impl<K, V> Default for OpenHashMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> OpenHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_hint_and_hasher(1, hasher)
    }

    pub fn with_capacity_hint_and_hasher(hint: usize, hasher: S) -> Self {
        Self {
            table: RawTable::new(hint, MapPolicy::default(), hasher),
        }
    }

    /// Live-entry count.
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

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.contains(key)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.find(key).map(|e| &e.1)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.find_mut(key).map(|e| &mut e.1)
    }

    /// Upsert: overwrites in place when the key is present and returns the
    /// previous value. May grow the table.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.table.insert((key, value)).map(|(_k, v)| v)
    }

    /// Remove the entry for `key`, returning its value. Absent keys are a
    /// no-op.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.remove(key).map(|(_k, v)| v)
    }

    /// Iterate `(&K, &V)` in slot order (not insertion order).
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.table.iter_mut(),
        }
    }
}

impl<K, V, Q, S> Index<&Q> for OpenHashMap<K, V, S>
where
    K: Eq + Hash + Borrow<Q>,
    Q: ?Sized + Hash + Eq,
    S: BuildHasher,
{
    type Output = V;

    /// Panics if the key is absent; callers must insert or contains-check
    /// first.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K, V, Q, S> IndexMut<&Q> for OpenHashMap<K, V, S>
where
    K: Eq + Hash + Borrow<Q>,
    Q: ?Sized + Hash + Eq,
    S: BuildHasher,
{
    /// Panics if the key is absent; callers must insert or contains-check
    /// first.
    fn index_mut(&mut self, key: &Q) -> &mut V {
        self.get_mut(key).expect("no entry found for key")
    }
}

/// Iterator over map entries in slot order.
pub struct Iter<'a, K, V> {
    inner: raw_table::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| (&e.0, &e.1))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|e| (&e.0, &e.1))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

/// Iterator over map entries with mutable values.
pub struct IterMut<'a, K, V> {
    inner: raw_table::IterMut<'a, (K, V)>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| (&e.0, &mut e.1))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|e| (&e.0, &mut e.1))
    }
}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {}
