//! Recycling pool for reusable object instances.
//!
//! Grabbing an object from the pool picks one that has been returned before, or if none of those
//! are available, creates a fresh one through the pool's factory.

use tracing::trace;

/// Manages a pool of reusable `T` instances.
///
/// Instances move into the pool on [`release`](ManagedPool::release) and out of it on
/// [`take`](ManagedPool::take), so an instance can never be both held and pooled at once.
pub struct ManagedPool<T, F = fn() -> T>
where
    F: FnMut() -> T,
{
    available: Vec<T>,
    factory: F,
}

impl<T: Default> ManagedPool<T> {
    /// Creates a pool that fabricates new instances with `T::default`.
    pub fn new(initial_capacity: usize) -> Self {
        Self::with_factory(initial_capacity, T::default)
    }
}

impl<T, F> ManagedPool<T, F>
where
    F: FnMut() -> T,
{
    /// Creates a pool that fabricates new instances with `factory` when no returned instance
    /// is available.
    pub fn with_factory(initial_capacity: usize, factory: F) -> Self {
        Self {
            available: Vec::with_capacity(initial_capacity),
            factory,
        }
    }

    /// Gets the number of previously returned objects waiting in the pool.
    #[inline(always)]
    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    /// Gets the number of returned objects the pool can hold without resizing.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.available.capacity()
    }

    /// Takes an object from the pool, creating one if none are waiting.
    #[inline(always)]
    pub fn take(&mut self) -> T {
        match self.available.pop() {
            Some(object) => object,
            None => (self.factory)(),
        }
    }

    /// Returns an object to the pool, doubling the available object storage if it is full.
    #[inline(always)]
    pub fn release(&mut self, object: T) {
        if self.available.len() == self.available.capacity() {
            let new_capacity = (self.available.len() * 2).max(1);
            trace!(
                old_capacity = self.available.capacity(),
                new_capacity,
                "growing object pool free list"
            );
            self.internal_resize(new_capacity);
        }
        self.release_unsafely(object);
    }

    /// Returns an object to the pool without checking if a resize is required.
    /// The caller must have guaranteed spare capacity, e.g. with [`ManagedPool::ensure_capacity`].
    #[inline(always)]
    pub fn release_unsafely(&mut self, object: T) {
        debug_assert!(
            self.available.len() < self.available.capacity(),
            "Returning without a capacity check requires room in the available object stack."
        );
        self.available.push(object);
    }

    /// Drops every waiting object. Objects currently held elsewhere are unaffected.
    pub fn clear(&mut self) {
        self.available.clear();
    }

    fn internal_resize(&mut self, new_size: usize) {
        debug_assert!(new_size >= self.available.len());
        if new_size > self.available.capacity() {
            self.available.reserve_exact(new_size - self.available.len());
        } else {
            self.available.shrink_to(new_size);
        }
    }

    /// Ensures that the underlying object stack can hold at least a certain number of objects.
    pub fn ensure_capacity(&mut self, count: usize) {
        if self.available.capacity() < count {
            self.internal_resize(count);
        }
    }

    /// Shrinks the available object stack to the smallest size that can fit the given count
    /// and the current available object count.
    pub fn compact(&mut self, minimum_count: usize) {
        let target_length = minimum_count.max(self.available.len());
        if self.available.capacity() > target_length {
            self.internal_resize(target_length);
        }
    }

    /// Resizes the available object stack to the smallest size required to hold the given count
    /// and the current available object count.
    pub fn resize(&mut self, count: usize) {
        let target_length = count.max(self.available.len());
        if self.available.capacity() != target_length {
            self.internal_resize(target_length);
        }
    }
}

impl<T, F> std::fmt::Debug for ManagedPool<T, F>
where
    F: FnMut() -> T,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagedPool")
            .field("available_count", &self.available.len())
            .field("capacity", &self.available.capacity())
            .finish()
    }
}
