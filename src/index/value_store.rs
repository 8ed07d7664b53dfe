//! Append-only value storage backing B+Tree leaves
//!
//! Leaves keep positions, not values. A position handed out by `write`
//! stays valid for the store's lifetime: nothing is ever removed or moved.

use crate::error::{GeoSearchError, Result};

/// Position of a value inside a [`ValueStore`]
pub type Position = usize;

pub trait ValueStore<V> {
    /// Append a value and return its position. Positions increase monotonically.
    fn write(&mut self, value: V) -> Position;

    /// Read the value at `position`; fails if it was never written.
    fn read(&self, position: Position) -> Result<&V>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory append log
#[derive(Clone, Debug)]
pub struct VecStore<V> {
    values: Vec<V>,
}

impl<V> VecStore<V> {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

}

impl<V> Default for VecStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ValueStore<V> for VecStore<V> {
    fn write(&mut self, value: V) -> Position {
        self.values.push(value);
        self.values.len() - 1
    }

    fn read(&self, position: Position) -> Result<&V> {
        self.values
            .get(position)
            .ok_or(GeoSearchError::StoreRead(position))
    }

    fn len(&self) -> usize {
        self.values.len()
    }
}
