//! open-hash: open-addressing hash containers — map, set, and multiset —
//! built on one linear-probing table engine with tombstone deletion.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: one probing engine with precise slot-state invariants, plus three
//!   thin facades that only choose an element shape; each layer can be
//!   reasoned about independently.
//! - Layers:
//!   - SlotStore<E>: fixed-capacity tri-state slot array (never-used /
//!     tombstoned / occupied). Pure storage; no hashing, no comparison.
//!   - RawTable<P, S>: the probe and growth engine. Linear probing with
//!     wraparound, first-tombstone reuse on insert, upsert semantics,
//!     doubling growth at half occupancy, epoch-checked cursors, and
//!     double-ended slot-order iteration.
//!   - OpenHashMap / OpenHashSet / OpenHashMultiset: facades supplying an
//!     `EntryPolicy` (element shape + key extraction) and delegating every
//!     operation to the engine.
//!
//! Constraints
//! - Single-threaded, synchronous: no atomics, no locking, no suspension
//!   points.
//! - The table exclusively owns its slot storage; growth swaps the store
//!   wholesale and a bumped epoch makes stale cursors resolve to `None`.
//! - `capacity >= 2 * len` after every operation, so a probe scan always has
//!   free slots ahead of it; scans are additionally bounded to one full
//!   cycle so tombstone-saturated tables still terminate.
//! - Deleting an absent key is a no-op, never an error. Absent-key lookups
//!   are checked (`Option`); only the map's index operator panics, as the
//!   loud rendering of its must-exist precondition.
//!
//! Non-goals
//! - No thread safety, no persistence, no ordered iteration.
//! - No shrinking: the engine only ever grows.
//! - Iteration order is slot order, not insertion order, and is not stable
//!   across growth.
//! - Multiset deletion drops a value's whole slot (all multiplicity), not a
//!   single occurrence.
//!
//! The default hasher is hashbrown's [`DefaultHashBuilder`]; every container
//! also accepts a caller-supplied `BuildHasher`.

mod open_hash_map;
mod open_hash_multiset;
mod open_hash_set;
pub mod raw_table;
mod raw_table_proptest;
mod slot;

pub use hashbrown::hash_map::DefaultHashBuilder;

// Public surface: the three facades, with the raw engine available as a
// documented module for callers that bring their own element shape.
pub use open_hash_map::OpenHashMap;
pub use open_hash_multiset::OpenHashMultiset;
pub use open_hash_set::OpenHashSet;
