//! Growable array-backed work-lists.
//!
//! [`GrowableStack`] drives depth-first traversals and cycle probes,
//! [`GrowableQueue`] drives breadth-first traversals. Both double their
//! capacity on overflow, optionally clamped to a hard maximum, and never shrink.

pub mod queue;
pub mod stack;

pub use queue::GrowableQueue;
pub use stack::GrowableStack;

use crate::error::{CollectionError, Result};

/// Common interface of the traversal work-lists.
///
/// The traversal engine is generic over this trait so the same stepping code
/// serves stack (LIFO) and queue (FIFO) disciplines.
pub trait WorkList<T> {
    /// Insert an item, growing if needed.
    fn put(&mut self, item: T) -> Result<()>;

    /// Remove the next item according to the container's discipline.
    fn take(&mut self) -> Result<T>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Validate construction parameters shared by both containers.
pub(crate) fn check_bounds(initial_capacity: usize, max_capacity: usize) -> Result<()> {
    if initial_capacity == 0 {
        return Err(CollectionError::InvalidArgument(
            "initial capacity must be positive".into(),
        ));
    }
    if max_capacity != 0 && max_capacity < initial_capacity {
        return Err(CollectionError::InvalidArgument(format!(
            "max capacity {max_capacity} is smaller than initial capacity {initial_capacity}"
        )));
    }
    Ok(())
}

/// Next capacity under the doubling policy.
pub(crate) fn grown_capacity(capacity: usize, max_capacity: usize) -> Result<usize> {
    if max_capacity != 0 && capacity >= max_capacity {
        return Err(CollectionError::CapacityExceeded { max: max_capacity });
    }
    let doubled = capacity
        .checked_mul(2)
        .ok_or(CollectionError::Overflow { capacity })?;
    if max_capacity != 0 {
        Ok(doubled.min(max_capacity))
    } else {
        Ok(doubled)
    }
}
