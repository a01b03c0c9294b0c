//! HashSet: membership view over `HashTable`, and its self-growing variant.

use crate::capacity::{CapacitySequencer, CapacitySource};
use crate::error::TableError;
use crate::hash_table::{HashTable, Insertion, OnDuplicate, Slot};
use crate::strategy::Strategy;
use core::fmt;

/// A set of string keys. Inserting a present key is a no-op.
#[derive(Debug)]
pub struct HashSet {
    table: HashTable<()>,
}

impl HashSet {
    pub fn new(strategy: Strategy, coefficients: &[u64]) -> Result<Self, TableError> {
        Ok(Self {
            table: HashTable::new(strategy, coefficients)?,
        })
    }

    pub fn from_tag(tag: &str, coefficients: &[u64]) -> Result<Self, TableError> {
        Self::new(tag.parse()?, coefficients)
    }

    /// Returns `true` if the key was newly added.
    pub fn insert(&mut self, key: impl Into<String>) -> Result<bool, TableError> {
        let outcome = self.table.insert(key.into(), (), OnDuplicate::Keep)?;
        Ok(matches!(outcome, Insertion::Added))
    }

    /// Echo of the stored key, if present.
    pub fn find(&self, key: &str) -> Option<&str> {
        self.table.find(key).map(|(k, _)| k)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.table.find(key).is_some()
    }

    pub fn slot(&self, key: &str) -> Result<Slot, TableError> {
        self.table.slot(key)
    }

    pub fn size(&self) -> usize {
        self.table.size()
    }
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }
    pub fn load(&self) -> f64 {
        self.table.load()
    }
    pub fn strategy(&self) -> Strategy {
        self.table.strategy()
    }

    /// Keys in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.table.iter().map(|(k, _)| k)
    }

    pub(crate) fn table_mut(&mut self) -> &mut HashTable<()> {
        &mut self.table
    }
}

impl fmt::Display for HashSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.table.render(f, |f, k, _| f.write_str(k))
    }
}

/// A `HashSet` that rehashes to the source's next capacity whenever an
/// insert leaves its load at or above [`MAX_LOAD`].
///
/// [`MAX_LOAD`]: crate::hash_table::MAX_LOAD
#[derive(Debug)]
pub struct DynamicHashSet<P = CapacitySequencer> {
    set: HashSet,
    source: P,
}

impl<P: CapacitySource> DynamicHashSet<P> {
    pub fn new(strategy: Strategy, coefficients: &[u64], source: P) -> Result<Self, TableError> {
        Ok(Self {
            set: HashSet::new(strategy, coefficients)?,
            source,
        })
    }

    pub fn from_tag(tag: &str, coefficients: &[u64], source: P) -> Result<Self, TableError> {
        Self::new(tag.parse()?, coefficients, source)
    }

    /// Insert, then grow if loaded. A growth failure is reported after the
    /// key itself has been stored.
    pub fn insert(&mut self, key: impl Into<String>) -> Result<bool, TableError> {
        let added = self.set.insert(key)?;
        self.set.table_mut().grow_if_loaded(&mut self.source)?;
        Ok(added)
    }

    pub fn find(&self, key: &str) -> Option<&str> {
        self.set.find(key)
    }
    pub fn contains(&self, key: &str) -> bool {
        self.set.contains(key)
    }
    pub fn slot(&self, key: &str) -> Result<Slot, TableError> {
        self.set.slot(key)
    }
    pub fn size(&self) -> usize {
        self.set.size()
    }
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
    pub fn capacity(&self) -> usize {
        self.set.capacity()
    }
    pub fn load(&self) -> f64 {
        self.set.load()
    }
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.set.iter()
    }

    pub fn source(&self) -> &P {
        &self.source
    }
}

impl<P> fmt::Display for DynamicHashSet<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.set, f)
    }
}
