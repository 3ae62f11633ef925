//! FIFO work-list backed by a circular buffer.

use super::{check_bounds, grown_capacity, WorkList};
use crate::error::{CollectionError, Result};

/// Circular-buffer FIFO with capacity doubling.
///
/// `front` indexes the oldest item, `rear` the next free slot. When the live
/// region wraps past the end of the buffer, growth copies the tail segment
/// and then the head segment so the new buffer starts unwrapped at index 0.
#[derive(Debug, Clone)]
pub struct GrowableQueue<T> {
    slots: Box<[Option<T>]>,
    front: usize,
    rear: usize,
    len: usize,
    max_capacity: usize,
}

impl<T> GrowableQueue<T> {
    /// Create a queue with `initial_capacity` slots. `max_capacity == 0`
    /// leaves growth unbounded.
    pub fn new(initial_capacity: usize, max_capacity: usize) -> Result<Self> {
        check_bounds(initial_capacity, max_capacity)?;
        Ok(Self {
            slots: empty_slots(initial_capacity),
            front: 0,
            rear: 0,
            len: 0,
            max_capacity,
        })
    }

    /// Enqueue at the rear, growing first when full.
    pub fn push(&mut self, item: T) -> Result<()> {
        if self.is_full() {
            self.grow()?;
        }
        self.slots[self.rear] = Some(item);
        self.rear = (self.rear + 1) % self.slots.len();
        self.len += 1;
        Ok(())
    }

    /// Dequeue from the front.
    pub fn pop(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(CollectionError::Empty);
        }
        let item = self.slots[self.front]
            .take()
            .ok_or(CollectionError::Empty)?;
        self.front = (self.front + 1) % self.slots.len();
        self.len -= 1;
        Ok(item)
    }

    /// The front item without removing it.
    pub fn peek(&self) -> Option<&T> {
        if self.len == 0 {
            return None;
        }
        self.slots[self.front].as_ref()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Hard cap on growth, 0 when unbounded.
    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// Whether the live region currently wraps past the end of the buffer.
    pub fn is_wrapped(&self) -> bool {
        self.len > 0 && self.rear <= self.front
    }

    fn grow(&mut self) -> Result<()> {
        let new_capacity = grown_capacity(self.slots.len(), self.max_capacity)?;
        let mut grown = empty_slots(new_capacity);

        if self.len > 0 {
            if self.is_wrapped() {
                let tail = self.slots.len() - self.front;
                move_segment(&mut self.slots[self.front..], &mut grown[..tail]);
                move_segment(&mut self.slots[..self.rear], &mut grown[tail..self.len]);
            } else {
                move_segment(&mut self.slots[self.front..self.rear], &mut grown[..self.len]);
            }
        }

        self.slots = grown;
        self.front = 0;
        self.rear = self.len % new_capacity;
        Ok(())
    }
}

impl<T> WorkList<T> for GrowableQueue<T> {
    fn put(&mut self, item: T) -> Result<()> {
        self.push(item)
    }

    fn take(&mut self) -> Result<T> {
        self.pop()
    }

    fn len(&self) -> usize {
        self.len
    }
}

fn empty_slots<T>(capacity: usize) -> Box<[Option<T>]> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

fn move_segment<T>(from: &mut [Option<T>], to: &mut [Option<T>]) {
    for (src, dst) in from.iter_mut().zip(to.iter_mut()) {
        *dst = src.take();
    }
}
