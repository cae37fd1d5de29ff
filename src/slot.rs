//! SlotStore: fixed-capacity tri-state slot array underlying the probe engine.
//!
//! Pure storage. The store hands out indexed access to slots and knows
//! nothing about hashing or key comparison; those live in `raw_table`.

/// One slot of the table. A slot that has never held data terminates probe
/// scans; a tombstoned slot does not (a later entry may have been inserted
/// past it during a collision chain), but it is reusable for insertion.
#[derive(Debug, Clone)]
pub enum Slot<E> {
    /// Never held data since the store was allocated.
    NeverUsed,
    /// Held data that was deleted; free, but not a scan terminator.
    Tombstoned,
    /// Holds a live element.
    Occupied(E),
}

impl<E> Slot<E> {
    #[inline]
    pub fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied(_))
    }

    /// Borrow the element if the slot is occupied.
    #[inline]
    pub fn element(&self) -> Option<&E> {
        match self {
            Slot::Occupied(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn element_mut(&mut self) -> Option<&mut E> {
        match self {
            Slot::Occupied(e) => Some(e),
            _ => None,
        }
    }
}

/// Fixed-capacity slot array. Allocated once, all slots `NeverUsed`; never
/// grows in place. The table swaps in a fresh store when it rehashes.
#[derive(Debug)]
pub struct SlotStore<E> {
    slots: Box<[Slot<E>]>,
}

impl<E> SlotStore<E> {
    /// Allocate a store of exactly `capacity` never-used slots.
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || Slot::NeverUsed);
        Self {
            slots: slots.into_boxed_slice(),
        }
    }

    /// Number of slots, live or not.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn get(&self, idx: usize) -> &Slot<E> {
        &self.slots[idx]
    }

    #[inline]
    pub fn get_mut(&mut self, idx: usize) -> &mut Slot<E> {
        &mut self.slots[idx]
    }

    /// Overwrite a slot wholesale, returning the previous contents.
    #[inline]
    pub fn replace(&mut self, idx: usize, slot: Slot<E>) -> Slot<E> {
        core::mem::replace(&mut self.slots[idx], slot)
    }

    /// Take the element out of an occupied slot, leaving a tombstone.
    /// Returns `None` (and leaves the slot untouched) otherwise.
    pub fn take(&mut self, idx: usize) -> Option<E> {
        if !self.slots[idx].is_occupied() {
            return None;
        }
        match core::mem::replace(&mut self.slots[idx], Slot::Tombstoned) {
            Slot::Occupied(e) => Some(e),
            _ => unreachable!(),
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[Slot<E>] {
        &self.slots
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Slot<E>] {
        &mut self.slots
    }

    /// Consume the store, yielding its live elements in slot order.
    /// Used by the rehash path to migrate entries into a fresh store.
    pub fn drain(self) -> impl Iterator<Item = E> {
        self.slots.into_vec().into_iter().filter_map(|s| match s {
            Slot::Occupied(e) => Some(e),
            _ => None,
        })
    }
}
