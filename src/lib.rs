//! probe-table: a string-keyed hash table with selectable collision
//! resolution and capacity-sequenced growth.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: one table engine, three collision strategies, two views, and a
//!   growth policy layered on top so each piece has a small contract.
//! - Layers:
//!   - HashTable<V>: the engine. Holds the strategy tag, the hash
//!     coefficients, the capacity and one storage representation (buckets
//!     for chaining, optional slots for open addressing). Dispatches on the
//!     tag; there is one type, not one type per strategy.
//!   - HashSet / HashMap<V>: thin views. The set stores `()` and keeps the
//!     first copy of a key; the map overwrites on duplicate.
//!   - DynamicHashSet / DynamicHashMap: wrap a view and a `CapacitySource`;
//!     after each insert they rehash to the next capacity once the load
//!     reaches `MAX_LOAD`.
//!
//! Hashing
//! - Keys are polynomials over a 62-digit alphabet (`a-z`, `A-Z`, `0-9`),
//!   first character lowest order. The primary hash picks the bucket or the
//!   first slot; the secondary hash gives the double-hashing step.
//! - The secondary alphabet ignores digits. See `hashing`.
//!
//! Constraints
//! - Single-threaded; no deletion, so open addressing needs no tombstones.
//! - Probes visit at most `capacity` slots. A full table reports
//!   `TableError::TableFull` instead of spinning.
//! - Rehash plans every placement before moving any entry, so a replay
//!   that would fail leaves the table untouched.
//! - Only open addressing needs a capacity larger than its size; a chained
//!   table may rehash to fewer buckets than it has entries.
//!
//! Capacity sequencing
//! - Capacities come from an explicitly owned `CapacitySequencer` (a stack
//!   of sizes, usually primes from `CapacitySequencer::primes`). Tables
//!   that must share one sequence use `SharedSequencer`.
//! - An exhausted sequence is reported as `TableError::CapacityExhausted`;
//!   the triggering insert has already been applied and the table stays at
//!   its old capacity.
//!
//! Logging
//! - Placement is logged at `trace`, construction and rehash at `debug`,
//!   through the `log` facade. No logger is installed by this crate.

pub mod capacity;
pub mod error;
pub mod hash_map;
pub mod hash_set;
pub mod hash_table;
pub mod hashing;
pub mod strategy;

// Public surface
pub use capacity::{CapacitySequencer, CapacitySource, SharedSequencer};
pub use error::TableError;
pub use hash_map::{DynamicHashMap, HashMap, Value};
pub use hash_set::{DynamicHashSet, HashSet};
pub use hash_table::{HashTable, Insertion, OnDuplicate, Slot, MAX_LOAD};
pub use strategy::Strategy;
