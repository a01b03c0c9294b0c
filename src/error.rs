//! Error kinds shared by every table layer.

use thiserror::Error;

/// Failures surfaced by table construction, insertion and resizing.
///
/// Absence of a key is never an error; lookups return `Option`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("invalid table configuration: {0}")]
    InvalidConfiguration(String),
    #[error("no empty slot reachable in a table of capacity {capacity}")]
    TableFull { capacity: usize },
    #[error("capacity sequence exhausted")]
    CapacityExhausted,
    #[error("capacity {capacity} cannot hold {size} entries")]
    CapacityTooSmall { capacity: usize, size: usize },
}

impl TableError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        TableError::InvalidConfiguration(msg.into())
    }
}
