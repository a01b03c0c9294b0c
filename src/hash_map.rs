//! HashMap: key -> value view over `HashTable`, its self-growing variant,
//! and the `Value` type used for nested tables.

use crate::capacity::{CapacitySequencer, CapacitySource, SharedSequencer};
use crate::error::TableError;
use crate::hash_set::DynamicHashSet;
use crate::hash_table::{HashTable, Insertion, OnDuplicate, Slot};
use crate::strategy::Strategy;
use core::fmt;

/// A map from string keys to `V`. Inserting a present key overwrites it.
#[derive(Debug)]
pub struct HashMap<V> {
    table: HashTable<V>,
}

impl<V> HashMap<V> {
    pub fn new(strategy: Strategy, coefficients: &[u64]) -> Result<Self, TableError> {
        Ok(Self {
            table: HashTable::new(strategy, coefficients)?,
        })
    }

    pub fn from_tag(tag: &str, coefficients: &[u64]) -> Result<Self, TableError> {
        Self::new(tag.parse()?, coefficients)
    }

    /// Returns the previous value if `key` was already present.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Result<Option<V>, TableError> {
        match self.table.insert(key.into(), value, OnDuplicate::Replace)? {
            Insertion::Replaced(old) => Ok(Some(old)),
            Insertion::Added | Insertion::Kept(_) => Ok(None),
        }
    }

    pub fn find(&self, key: &str) -> Option<&V> {
        self.table.find(key).map(|(_, v)| v)
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut V> {
        self.table.find_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
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

    /// `(key, value)` pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.table.iter()
    }

    pub(crate) fn table_mut(&mut self) -> &mut HashTable<V> {
        &mut self.table
    }
}

impl<V: fmt::Display> fmt::Display for HashMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.table.render(f, |f, k, v| write!(f, "({k},{v})"))
    }
}

/// A `HashMap` that grows like [`DynamicHashSet`].
#[derive(Debug)]
pub struct DynamicHashMap<V, P = CapacitySequencer> {
    map: HashMap<V>,
    source: P,
}

impl<V, P: CapacitySource> DynamicHashMap<V, P> {
    pub fn new(strategy: Strategy, coefficients: &[u64], source: P) -> Result<Self, TableError> {
        Ok(Self {
            map: HashMap::new(strategy, coefficients)?,
            source,
        })
    }

    pub fn from_tag(tag: &str, coefficients: &[u64], source: P) -> Result<Self, TableError> {
        Self::new(tag.parse()?, coefficients, source)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Result<Option<V>, TableError> {
        let old = self.map.insert(key, value)?;
        self.map.table_mut().grow_if_loaded(&mut self.source)?;
        Ok(old)
    }

    pub fn find(&self, key: &str) -> Option<&V> {
        self.map.find(key)
    }
    /// In-place access; never triggers growth.
    pub fn find_mut(&mut self, key: &str) -> Option<&mut V> {
        self.map.find_mut(key)
    }
    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }
    pub fn slot(&self, key: &str) -> Result<Slot, TableError> {
        self.map.slot(key)
    }
    pub fn size(&self) -> usize {
        self.map.size()
    }
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }
    pub fn load(&self) -> f64 {
        self.map.load()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.map.iter()
    }

    pub fn source(&self) -> &P {
        &self.source
    }
}

impl<V: fmt::Display, P> fmt::Display for DynamicHashMap<V, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.map, f)
    }
}

/// A map value: plain text, or a nested dynamic set drawing capacities from
/// a shared sequence.
#[derive(Debug)]
pub enum Value {
    Scalar(String),
    Nested(DynamicHashSet<SharedSequencer>),
}

impl Value {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s),
            Value::Nested(_) => None,
        }
    }

    pub fn as_nested(&self) -> Option<&DynamicHashSet<SharedSequencer>> {
        match self {
            Value::Nested(set) => Some(set),
            Value::Scalar(_) => None,
        }
    }

    pub fn as_nested_mut(&mut self) -> Option<&mut DynamicHashSet<SharedSequencer>> {
        match self {
            Value::Nested(set) => Some(set),
            Value::Scalar(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(s) => f.write_str(s),
            Value::Nested(set) => fmt::Display::fmt(set, f),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(s)
    }
}

impl From<DynamicHashSet<SharedSequencer>> for Value {
    fn from(set: DynamicHashSet<SharedSequencer>) -> Self {
        Value::Nested(set)
    }
}
