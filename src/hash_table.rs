//! HashTable: strategy-tagged core shared by the set and map views.
//!
//! Storage is either a vector of insertion-ordered buckets (chaining) or a
//! fixed vector of optional slots (linear probing, double hashing). The
//! representation is chosen from the strategy at construction and rebuilt
//! at the new capacity on rehash.

use crate::capacity::CapacitySource;
use crate::error::TableError;
use crate::hashing;
use crate::strategy::{Params, Strategy};
use core::fmt;
use log::{debug, trace};

/// Load factor at which dynamic tables grow.
pub const MAX_LOAD: f64 = 0.5;

/// Rendering of an empty bucket or slot.
pub const EMPTY_MARKER: &str = "<EMPTY>";
/// Separator between entries sharing a bucket.
pub const ENTRY_SEPARATOR: &str = " ; ";
/// Separator between buckets or slots.
pub const FIELD_SEPARATOR: &str = " | ";

type Pair<V> = (String, V);

/// Strategy, coefficients and capacity: everything hashing depends on.
#[derive(Clone, Debug)]
struct Shape {
    strategy: Strategy,
    params: Params,
    capacity: usize,
}

impl Shape {
    fn home(&self, key: &str) -> usize {
        hashing::primary(key, self.params.z, self.capacity)
    }

    fn step(&self, key: &str) -> usize {
        match (self.strategy, self.params.secondary) {
            (Strategy::DoubleHashing, Some((z2, c2))) => hashing::step(key, z2, c2, self.capacity),
            _ => 1,
        }
    }
}

#[derive(Debug)]
enum Storage<V> {
    Chained(Vec<Vec<Pair<V>>>),
    Open(Vec<Option<Pair<V>>>),
}

impl<V> Storage<V> {
    fn allocate(strategy: Strategy, capacity: usize) -> Self {
        match strategy {
            Strategy::Chaining => Storage::Chained((0..capacity).map(|_| Vec::new()).collect()),
            Strategy::LinearProbing | Strategy::DoubleHashing => {
                Storage::Open((0..capacity).map(|_| None).collect())
            }
        }
    }

    fn place(
        &mut self,
        shape: &Shape,
        key: String,
        value: V,
        on_duplicate: OnDuplicate,
    ) -> Result<Insertion<V>, TableError> {
        let home = shape.home(&key);
        match self {
            Storage::Chained(buckets) => {
                let bucket = &mut buckets[home];
                if let Some((_, stored)) = bucket.iter_mut().find(|(k, _)| *k == key) {
                    return Ok(resolve(stored, value, on_duplicate));
                }
                trace!("chain {key:?} -> bucket {home} offset {}", bucket.len());
                bucket.push((key, value));
            }
            Storage::Open(slots) => {
                let step = shape.step(&key);
                let idx = probe(slots.len(), &key, home, step, |i| occupant(slots, i))
                    .ok_or(TableError::TableFull {
                        capacity: shape.capacity,
                    })?;
                match &mut slots[idx] {
                    Some((_, stored)) => return Ok(resolve(stored, value, on_duplicate)),
                    empty => {
                        trace!("place {key:?} -> slot {idx} (home {home}, step {step})");
                        *empty = Some((key, value));
                    }
                }
            }
        }
        Ok(Insertion::Added)
    }

    /// Move every entry, in storage order, to the matching index in `targets`
    /// within fresh storage shaped by `shape`.
    fn relocate(self, shape: &Shape, targets: &[usize]) -> Self {
        let entries: Vec<Pair<V>> = match self {
            Storage::Chained(buckets) => buckets.into_iter().flatten().collect(),
            Storage::Open(slots) => slots.into_iter().flatten().collect(),
        };
        let mut next = Storage::allocate(shape.strategy, shape.capacity);
        for (pair, &idx) in entries.into_iter().zip(targets) {
            match &mut next {
                Storage::Chained(buckets) => buckets[idx].push(pair),
                Storage::Open(slots) => slots[idx] = Some(pair),
            }
        }
        next
    }
}

/// Where a key lives, or would be placed.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Slot {
    /// Chaining: the key's bucket, and its position inside the bucket if present.
    Chained { bucket: usize, offset: Option<usize> },
    /// Open addressing: the slot holding the key, or the first empty slot
    /// on its probe sequence.
    Open(usize),
}

/// What `insert` does when the key is already present.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OnDuplicate {
    /// Leave the stored value; the offered value is handed back.
    Keep,
    /// Overwrite the stored value; the old value is handed back.
    Replace,
}

/// Outcome of a successful insert.
#[derive(Debug, Eq, PartialEq)]
pub enum Insertion<V> {
    Added,
    Replaced(V),
    Kept(V),
}

fn occupant<V>(slots: &[Option<Pair<V>>], idx: usize) -> Option<&str> {
    slots[idx].as_ref().map(|(k, _)| k.as_str())
}

/// First index on `key`'s probe sequence that either holds `key` or is empty,
/// where `at(i)` names the key in slot `i`. Visits at most `capacity`
/// positions; `None` means neither was reached.
fn probe<'k>(
    capacity: usize,
    key: &str,
    start: usize,
    step: usize,
    at: impl Fn(usize) -> Option<&'k str>,
) -> Option<usize> {
    let step = step % capacity;
    let mut idx = start;
    for _ in 0..capacity {
        match at(idx) {
            None => return Some(idx),
            Some(k) if k == key => return Some(idx),
            Some(_) => idx = (idx + step) % capacity,
        }
    }
    None
}

fn resolve<V>(stored: &mut V, value: V, on_duplicate: OnDuplicate) -> Insertion<V> {
    match on_duplicate {
        OnDuplicate::Keep => Insertion::Kept(value),
        OnDuplicate::Replace => Insertion::Replaced(core::mem::replace(stored, value)),
    }
}

#[derive(Debug)]
pub struct HashTable<V> {
    shape: Shape,
    size: usize,
    storage: Storage<V>,
}

impl<V> HashTable<V> {
    pub fn new(strategy: Strategy, coefficients: &[u64]) -> Result<Self, TableError> {
        let params = Params::parse(strategy, coefficients)?;
        let capacity = params.initial_capacity;
        debug!("new {strategy} table with capacity {capacity}");
        Ok(Self {
            shape: Shape {
                strategy,
                params,
                capacity,
            },
            size: 0,
            storage: Storage::allocate(strategy, capacity),
        })
    }

    /// Construct from a textual strategy tag (`"Chaining"`, `"Linear"`, `"Double"`).
    pub fn from_tag(tag: &str, coefficients: &[u64]) -> Result<Self, TableError> {
        Self::new(tag.parse()?, coefficients)
    }

    pub fn strategy(&self) -> Strategy {
        self.shape.strategy
    }
    pub fn size(&self) -> usize {
        self.size
    }
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
    pub fn capacity(&self) -> usize {
        self.shape.capacity
    }
    pub fn load(&self) -> f64 {
        self.size as f64 / self.shape.capacity as f64
    }

    pub fn insert(
        &mut self,
        key: String,
        value: V,
        on_duplicate: OnDuplicate,
    ) -> Result<Insertion<V>, TableError> {
        let outcome = self.storage.place(&self.shape, key, value, on_duplicate)?;
        if let Insertion::Added = outcome {
            self.size += 1;
        }
        Ok(outcome)
    }

    /// The stored key and value for `key`, if present.
    pub fn find(&self, key: &str) -> Option<(&str, &V)> {
        let home = self.shape.home(key);
        match &self.storage {
            Storage::Chained(buckets) => buckets[home]
                .iter()
                .find(|(k, _)| k == key)
                .map(|(k, v)| (k.as_str(), v)),
            Storage::Open(slots) => {
                let idx = probe(slots.len(), key, home, self.shape.step(key), |i| {
                    occupant(slots, i)
                })?;
                slots[idx].as_ref().map(|(k, v)| (k.as_str(), v))
            }
        }
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut V> {
        let home = self.shape.home(key);
        let step = self.shape.step(key);
        match &mut self.storage {
            Storage::Chained(buckets) => buckets[home]
                .iter_mut()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v),
            Storage::Open(slots) => {
                let idx = probe(slots.len(), key, home, step, |i| occupant(slots, i))?;
                slots[idx].as_mut().map(|(_, v)| v)
            }
        }
    }

    /// Location of `key`: its bucket and offset under chaining, its slot (or
    /// the first empty slot on its probe sequence) under open addressing.
    pub fn slot(&self, key: &str) -> Result<Slot, TableError> {
        let home = self.shape.home(key);
        match &self.storage {
            Storage::Chained(buckets) => Ok(Slot::Chained {
                bucket: home,
                offset: buckets[home].iter().position(|(k, _)| k == key),
            }),
            Storage::Open(slots) => probe(slots.len(), key, home, self.shape.step(key), |i| {
                occupant(slots, i)
            })
            .map(Slot::Open)
                .ok_or(TableError::TableFull {
                    capacity: self.shape.capacity,
                }),
        }
    }

    /// Rebuild storage at `capacity`, replaying every entry in storage order.
    ///
    /// Open addressing refuses a capacity that is not larger than the size.
    /// Chaining accepts any non-zero capacity, including a smaller one. The
    /// replay is planned before anything moves: if some entry would find no
    /// empty slot, `TableFull` is returned and the table is left as it was.
    pub fn rehash(&mut self, capacity: usize) -> Result<(), TableError> {
        let size = self.size;
        let open = self.shape.strategy.is_open_addressing();
        if capacity == 0 || (open && capacity <= size) {
            return Err(TableError::CapacityTooSmall { capacity, size });
        }
        let shape = Shape {
            capacity,
            ..self.shape.clone()
        };
        let targets = self.plan(&shape).map_err(|e| {
            debug!("rehash to capacity {capacity} refused: {e}");
            e
        })?;
        debug!(
            "rehash {} table: {size} entries, capacity {} -> {capacity}",
            shape.strategy, self.shape.capacity
        );
        let old = core::mem::replace(&mut self.storage, Storage::allocate(shape.strategy, 0));
        self.storage = old.relocate(&shape, &targets);
        self.shape = shape;
        Ok(())
    }

    /// Index each entry would take under `shape`, in storage order.
    fn plan(&self, shape: &Shape) -> Result<Vec<usize>, TableError> {
        if !shape.strategy.is_open_addressing() {
            return Ok(self.iter().map(|(key, _)| shape.home(key)).collect());
        }
        let mut taken: Vec<Option<&str>> = vec![None; shape.capacity];
        let mut targets = Vec::with_capacity(self.size);
        for (key, _) in self.iter() {
            let idx = probe(shape.capacity, key, shape.home(key), shape.step(key), |i| taken[i])
                .ok_or(TableError::TableFull {
                    capacity: shape.capacity,
                })?;
            trace!("replay {key:?} -> slot {idx}");
            taken[idx] = Some(key);
            targets.push(idx);
        }
        Ok(targets)
    }

    /// Grow once if the load factor has reached `MAX_LOAD`.
    ///
    /// Returns whether a rehash ran.
    pub fn grow_if_loaded<P>(&mut self, source: &mut P) -> Result<bool, TableError>
    where
        P: CapacitySource + ?Sized,
    {
        if self.load() < MAX_LOAD {
            return Ok(false);
        }
        let capacity = source.next_capacity().map_err(|e| {
            debug!("cannot grow past capacity {}: {e}", self.shape.capacity);
            e
        })?;
        self.rehash(capacity)?;
        Ok(true)
    }

    /// Entries in storage order.
    pub fn iter(&self) -> Iter<'_, V> {
        match &self.storage {
            Storage::Chained(buckets) => Iter::Chained(buckets.iter().flatten()),
            Storage::Open(slots) => Iter::Open(slots.iter().flatten()),
        }
    }

    /// Render one field per bucket or slot; `entry` writes a single entry.
    pub fn render<F>(&self, f: &mut fmt::Formatter<'_>, mut entry: F) -> fmt::Result
    where
        F: FnMut(&mut fmt::Formatter<'_>, &str, &V) -> fmt::Result,
    {
        match &self.storage {
            Storage::Chained(buckets) => {
                for (i, bucket) in buckets.iter().enumerate() {
                    if i > 0 {
                        f.write_str(FIELD_SEPARATOR)?;
                    }
                    if bucket.is_empty() {
                        f.write_str(EMPTY_MARKER)?;
                    }
                    for (j, (k, v)) in bucket.iter().enumerate() {
                        if j > 0 {
                            f.write_str(ENTRY_SEPARATOR)?;
                        }
                        entry(f, k, v)?;
                    }
                }
            }
            Storage::Open(slots) => {
                for (i, slot) in slots.iter().enumerate() {
                    if i > 0 {
                        f.write_str(FIELD_SEPARATOR)?;
                    }
                    match slot {
                        Some((k, v)) => entry(f, k, v)?,
                        None => f.write_str(EMPTY_MARKER)?,
                    }
                }
            }
        }
        Ok(())
    }
}

/// Iterator over `(key, value)` in storage order.
pub enum Iter<'a, V> {
    Chained(core::iter::Flatten<core::slice::Iter<'a, Vec<Pair<V>>>>),
    Open(core::iter::Flatten<core::slice::Iter<'a, Option<Pair<V>>>>),
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (k, v) = match self {
            Iter::Chained(it) => it.next()?,
            Iter::Open(it) => it.next()?,
        };
        Some((k.as_str(), v))
    }
}
