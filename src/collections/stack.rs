//! LIFO work-list backed by a contiguous buffer.

use super::{check_bounds, grown_capacity, WorkList};
use crate::error::{CollectionError, Result};

/// Array-backed LIFO buffer with capacity doubling.
///
/// The logical capacity is tracked separately from the allocation so the
/// growth policy (and its `max_capacity` clamp) is deterministic regardless of
/// what the allocator hands back.
#[derive(Debug, Clone)]
pub struct GrowableStack<T> {
    items: Vec<T>,
    capacity: usize,
    max_capacity: usize,
}

impl<T> GrowableStack<T> {
    /// Create a stack with `initial_capacity` slots. `max_capacity == 0`
    /// leaves growth unbounded.
    pub fn new(initial_capacity: usize, max_capacity: usize) -> Result<Self> {
        check_bounds(initial_capacity, max_capacity)?;
        Ok(Self {
            items: Vec::with_capacity(initial_capacity),
            capacity: initial_capacity,
            max_capacity,
        })
    }

    /// Push onto the top, growing first when full.
    pub fn push(&mut self, item: T) -> Result<()> {
        if self.is_full() {
            self.grow()?;
        }
        self.items.push(item);
        Ok(())
    }

    /// Remove and return the top item.
    pub fn pop(&mut self) -> Result<T> {
        self.items.pop().ok_or(CollectionError::Empty)
    }

    /// The top item without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the next push has to grow the buffer.
    pub fn is_full(&self) -> bool {
        self.items.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Hard cap on growth, 0 when unbounded.
    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// Drop every item, keeping the current capacity.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    fn grow(&mut self) -> Result<()> {
        let new_capacity = grown_capacity(self.capacity, self.max_capacity)?;
        self.items.reserve_exact(new_capacity - self.items.len());
        self.capacity = new_capacity;
        Ok(())
    }
}

impl<T> WorkList<T> for GrowableStack<T> {
    fn put(&mut self, item: T) -> Result<()> {
        self.push(item)
    }

    fn take(&mut self) -> Result<T> {
        self.pop()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}
