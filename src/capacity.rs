//! Capacity sequencing for dynamic tables.
//!
//! A dynamic table asks its `CapacitySource` for the next capacity each time
//! it grows. The source is owned by the table (or shared through
//! `SharedSequencer`); there is no process-wide sequence.

use crate::error::TableError;
use core::cell::RefCell;
use std::rc::Rc;

/// Yields successive table capacities, consuming each one.
pub trait CapacitySource {
    fn next_capacity(&mut self) -> Result<usize, TableError>;
}

/// A mutable stack of candidate capacities; `next` pops from the back.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CapacitySequencer {
    sizes: Vec<usize>,
}

impl CapacitySequencer {
    pub fn new(sizes: Vec<usize>) -> Self {
        Self { sizes }
    }

    /// All primes in `[start, end]`, stored descending so that `next`
    /// yields them smallest first.
    pub fn primes(start: usize, end: usize) -> Self {
        if end < 2 {
            return Self::default();
        }
        let mut is_prime = vec![true; end + 1];
        is_prime[0] = false;
        is_prime[1] = false;
        let mut i = 2;
        while i * i <= end {
            if is_prime[i] {
                for j in (i * i..=end).step_by(i) {
                    is_prime[j] = false;
                }
            }
            i += 1;
        }
        let sizes = (start.max(2)..=end).rev().filter(|&n| is_prime[n]).collect();
        Self { sizes }
    }

    /// Replace the whole sequence.
    pub fn set(&mut self, sizes: Vec<usize>) {
        self.sizes = sizes;
    }

    /// Remove and return the last element.
    pub fn next(&mut self) -> Result<usize, TableError> {
        self.sizes.pop().ok_or(TableError::CapacityExhausted)
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Move this sequence behind a cloneable single-threaded handle.
    pub fn shared(self) -> SharedSequencer {
        SharedSequencer(Rc::new(RefCell::new(self)))
    }
}

impl CapacitySource for CapacitySequencer {
    fn next_capacity(&mut self) -> Result<usize, TableError> {
        self.next()
    }
}

/// Cloneable handle to one `CapacitySequencer`, for several tables that must
/// draw from the same sequence. Single-threaded (`!Send`, `!Sync`).
#[derive(Clone, Debug)]
pub struct SharedSequencer(Rc<RefCell<CapacitySequencer>>);

impl SharedSequencer {
    pub fn set(&self, sizes: Vec<usize>) {
        self.0.borrow_mut().set(sizes);
    }

    pub fn next(&self) -> Result<usize, TableError> {
        self.0.borrow_mut().next()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

impl CapacitySource for SharedSequencer {
    fn next_capacity(&mut self) -> Result<usize, TableError> {
        self.next()
    }
}

impl<S: CapacitySource + ?Sized> CapacitySource for &mut S {
    fn next_capacity(&mut self) -> Result<usize, TableError> {
        (**self).next_capacity()
    }
}
