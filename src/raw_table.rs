//! RawTable: the probing engine shared by the map, set, and multiset facades.
//!
//! Open addressing with linear probing (stride +1, wraparound) over a
//! [`SlotStore`]. Deletion tombstones a slot instead of clearing it, so a
//! probe scan can continue past it; insertion reuses the first tombstone it
//! saw when the key turns out to be absent. Growth doubles the store and
//! reinserts every live element; the fresh store starts with no tombstones.
//!
//! Invariants:
//! - `len < capacity / 2` after every public operation. `insert` grows the
//!   store before returning once the live count reaches half capacity, so a
//!   probe scan always has free slots ahead of it.
//! - At most one occupied slot per distinct key.
//! - Probe scans are bounded to one full cycle of the store. A churn-heavy
//!   workload can tombstone every never-used slot while the live count stays
//!   below the growth trigger; a complete cycle without a never-used slot
//!   reports the key as absent.
//! - Growth replaces the store wholesale. Outstanding [`Cursor`]s are
//!   invalidated by an epoch bump and resolve to `None` afterwards, in the
//!   same way a stale handle resolves to `None` rather than aliasing a
//!   relocated entry.

use crate::slot::{Slot, SlotStore};
use crate::DefaultHashBuilder;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};

/// Per-facade strategy: what an element looks like and how to get its key
/// back out. Injected at construction and held as a table field; the engine
/// itself never assumes an element shape.
pub trait EntryPolicy {
    /// Stored element type: bare key for a set, `(K, V)` for a map,
    /// `(T, usize)` for a multiset.
    type Element;
    /// Key type elements are hashed and compared by.
    type Key: Eq + Hash;

    /// Extract the key from a stored element. Needed on every probe
    /// comparison and when re-bucketing elements during growth.
    fn key_of<'a>(&self, element: &'a Self::Element) -> &'a Self::Key;
}

/// Outcome of a probe scan.
enum Probe {
    /// Occupied slot whose element matches the key.
    Hit(usize),
    /// Key absent; `insert_at` is the first tombstone seen during the scan,
    /// or the never-used slot that terminated it.
    Miss { insert_at: usize },
}

/// A checked position in the table: a slot index plus the growth epoch the
/// cursor was minted in. After the table grows, stale cursors resolve to
/// `None` instead of pointing into relocated storage.
///
/// Comparisons consider only the slot index; the end sentinel is a cursor
/// whose index equals the capacity.
#[derive(Copy, Clone, Debug)]
pub struct Cursor {
    idx: usize,
    epoch: u64,
}

impl Cursor {
    /// Raw slot index. Equal to the capacity for the end sentinel.
    #[inline]
    pub fn index(&self) -> usize {
        self.idx
    }
}

impl PartialEq for Cursor {
    fn eq(&self, other: &Self) -> bool {
        self.idx == other.idx
    }
}
impl Eq for Cursor {}
impl PartialOrd for Cursor {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Cursor {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.idx.cmp(&other.idx)
    }
}

pub struct RawTable<P: EntryPolicy, S = DefaultHashBuilder> {
    store: SlotStore<P::Element>,
    len: usize,
    epoch: u64,
    policy: P,
    hasher: S,
}

impl<P, S> RawTable<P, S>
where
    P: EntryPolicy,
    S: BuildHasher,
{
    /// Build a table with capacity `2 × max(hint, 1)`, so the half-capacity
    /// growth trigger holds from the first insert and the modulus is never
    /// zero.
    pub fn new(capacity_hint: usize, policy: P, hasher: S) -> Self {
        let capacity = capacity_hint
            .max(1)
            .checked_mul(2)
            .expect("capacity hint overflows usize");
        Self {
            store: SlotStore::new(capacity),
            len: 0,
            epoch: 0,
            policy,
            hasher,
        }
    }

    /// Live-entry count.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated slot count. Always more than twice `len`.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    #[inline]
    fn home_slot<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        (self.hasher.hash_one(key) % self.store.capacity() as u64) as usize
    }

    /// Linear scan from the key's home slot. Stops at a matching occupied
    /// slot or the first never-used slot; tombstones are skipped, with the
    /// first one remembered as the preferred insertion point. Bounded to one
    /// full cycle: a cycle with no never-used slot means the key is absent.
    fn probe<Q>(&self, key: &Q) -> Probe
    where
        P::Key: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let capacity = self.store.capacity();
        let mut idx = self.home_slot(key);
        let mut tombstone: Option<usize> = None;
        for _ in 0..capacity {
            match self.store.get(idx) {
                Slot::NeverUsed => {
                    return Probe::Miss {
                        insert_at: tombstone.unwrap_or(idx),
                    }
                }
                Slot::Occupied(e) if self.policy.key_of(e).borrow() == key => {
                    return Probe::Hit(idx)
                }
                Slot::Tombstoned => {
                    if tombstone.is_none() {
                        tombstone = Some(idx);
                    }
                }
                Slot::Occupied(_) => {}
            }
            idx += 1;
            if idx == capacity {
                idx = 0;
            }
        }
        match tombstone {
            Some(insert_at) => Probe::Miss { insert_at },
            // A full cycle saw only occupied slots, i.e. len == capacity.
            // The growth trigger keeps len below capacity / 2.
            None => unreachable!("occupancy exceeded the growth trigger"),
        }
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        P::Key: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        matches!(self.probe(key), Probe::Hit(_))
    }

    pub fn find<Q>(&self, key: &Q) -> Option<&P::Element>
    where
        P::Key: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.probe(key) {
            Probe::Hit(idx) => self.store.get(idx).element(),
            Probe::Miss { .. } => None,
        }
    }

    pub fn find_mut<Q>(&mut self, key: &Q) -> Option<&mut P::Element>
    where
        P::Key: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.probe(key) {
            Probe::Hit(idx) => self.store.get_mut(idx).element_mut(),
            Probe::Miss { .. } => None,
        }
    }

    /// Upsert. A matching occupied slot is overwritten in place and the
    /// displaced element returned; otherwise the element goes into the first
    /// remembered tombstone (or the terminating never-used slot) and the
    /// table grows if the live count reached half capacity.
    pub fn insert(&mut self, element: P::Element) -> Option<P::Element> {
        match self.probe(self.policy.key_of(&element)) {
            Probe::Hit(idx) => match self.store.replace(idx, Slot::Occupied(element)) {
                Slot::Occupied(old) => Some(old),
                _ => unreachable!(),
            },
            Probe::Miss { insert_at } => {
                self.store.replace(insert_at, Slot::Occupied(element));
                self.len += 1;
                if self.len >= self.store.capacity() / 2 {
                    self.grow();
                }
                None
            }
        }
    }

    /// Remove the element matching `key`, leaving a tombstone. Absent keys
    /// are a no-op, never an error.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<P::Element>
    where
        P::Key: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.probe(key) {
            Probe::Hit(idx) => {
                let element = self.store.take(idx);
                debug_assert!(element.is_some());
                self.len -= 1;
                element
            }
            Probe::Miss { .. } => None,
        }
    }

    /// Double the store and migrate every live element. The new store is
    /// allocated before any element moves, so an allocation panic unwinds
    /// with the table still in its pre-growth state. The fresh store has no
    /// tombstones, so migration is a bare scan to the first free slot.
    fn grow(&mut self) {
        let new_capacity = self
            .store
            .capacity()
            .checked_mul(2)
            .expect("table capacity overflows usize");
        let old = core::mem::replace(&mut self.store, SlotStore::new(new_capacity));
        for element in old.drain() {
            let mut idx = self.home_slot(self.policy.key_of(&element));
            while self.store.get(idx).is_occupied() {
                idx += 1;
                if idx == new_capacity {
                    idx = 0;
                }
            }
            self.store.replace(idx, Slot::Occupied(element));
        }
        self.epoch += 1;
    }

    /// Cursor at the lowest occupied slot, or the end sentinel when empty.
    pub fn begin(&self) -> Cursor {
        let capacity = self.store.capacity();
        let mut idx = 0;
        while idx < capacity && !self.store.get(idx).is_occupied() {
            idx += 1;
        }
        Cursor {
            idx,
            epoch: self.epoch,
        }
    }

    /// End sentinel: index equal to the capacity.
    pub fn end(&self) -> Cursor {
        Cursor {
            idx: self.store.capacity(),
            epoch: self.epoch,
        }
    }

    #[inline]
    fn cursor_live(&self, cursor: Cursor) -> bool {
        cursor.epoch == self.epoch
    }

    /// Advance to the next occupied slot (or the end sentinel). `None` for a
    /// cursor minted before the last growth.
    pub fn next_cursor(&self, cursor: Cursor) -> Option<Cursor> {
        if !self.cursor_live(cursor) {
            return None;
        }
        let capacity = self.store.capacity();
        let mut idx = cursor.idx.min(capacity).saturating_add(1);
        while idx < capacity && !self.store.get(idx).is_occupied() {
            idx += 1;
        }
        Some(Cursor {
            idx: idx.min(capacity),
            epoch: self.epoch,
        })
    }

    /// Step back to the previous occupied slot. `None` for a stale cursor or
    /// when no occupied slot precedes this one.
    pub fn prev_cursor(&self, cursor: Cursor) -> Option<Cursor> {
        if !self.cursor_live(cursor) {
            return None;
        }
        let mut idx = cursor.idx.min(self.store.capacity());
        while idx > 0 {
            idx -= 1;
            if self.store.get(idx).is_occupied() {
                return Some(Cursor {
                    idx,
                    epoch: self.epoch,
                });
            }
        }
        None
    }

    /// Checked dereference: `None` for a stale cursor, the end sentinel, or
    /// a slot that is no longer occupied.
    pub fn element_at(&self, cursor: Cursor) -> Option<&P::Element> {
        if !self.cursor_live(cursor) || cursor.idx >= self.store.capacity() {
            return None;
        }
        self.store.get(cursor.idx).element()
    }

    pub fn element_at_mut(&mut self, cursor: Cursor) -> Option<&mut P::Element> {
        if !self.cursor_live(cursor) || cursor.idx >= self.store.capacity() {
            return None;
        }
        self.store.get_mut(cursor.idx).element_mut()
    }

    /// Iterate live elements in slot order. Slot order is not insertion
    /// order and is not stable across growth.
    pub fn iter(&self) -> Iter<'_, P::Element> {
        Iter {
            slots: self.store.as_slice().iter(),
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, P::Element> {
        IterMut {
            slots: self.store.as_mut_slice().iter_mut(),
            remaining: self.len,
        }
    }
}

/// Iterator over live elements in slot order.
pub struct Iter<'a, E> {
    slots: core::slice::Iter<'a, Slot<E>>,
    remaining: usize,
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Slot::Occupied(e) = slot {
                self.remaining -= 1;
                return Some(e);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, E> DoubleEndedIterator for Iter<'a, E> {
    fn next_back(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.next_back() {
            if let Slot::Occupied(e) = slot {
                self.remaining -= 1;
                return Some(e);
            }
        }
        None
    }
}

impl<'a, E> ExactSizeIterator for Iter<'a, E> {}

/// Mutable iterator over live elements in slot order.
pub struct IterMut<'a, E> {
    slots: core::slice::IterMut<'a, Slot<E>>,
    remaining: usize,
}

impl<'a, E> Iterator for IterMut<'a, E> {
    type Item = &'a mut E;

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Slot::Occupied(e) = slot {
                self.remaining -= 1;
                return Some(e);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, E> DoubleEndedIterator for IterMut<'a, E> {
    fn next_back(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.next_back() {
            if let Slot::Occupied(e) = slot {
                self.remaining -= 1;
                return Some(e);
            }
        }
        None
    }
}

impl<'a, E> ExactSizeIterator for IterMut<'a, E> {}
