//! Recycling allocator for small integer identifiers.

use tracing::trace;

/// Manages a pool of identifier values. Grabbing an id from the pool picks a number that has been
/// picked and returned before, or if none of those are available, the minimum value greater
/// than any existing id.
///
/// Returned ids are reused in LIFO order, so a given sequence of `take`/`release` calls always
/// produces the same ids.
///
/// Every id below the next fresh id carries a claimed flag, so returning an id twice or
/// returning an id the pool never issued panics in all build profiles.
#[derive(Debug, Clone)]
pub struct IdPool {
    next_index: usize,
    available_ids: Vec<usize>,
    claimed: Vec<bool>,
}

impl IdPool {
    /// Creates a new IdPool with room for `initial_capacity` returned ids.
    pub fn new(initial_capacity: usize) -> Self {
        IdPool {
            next_index: 0,
            available_ids: Vec::with_capacity(initial_capacity),
            claimed: Vec::new(),
        }
    }

    /// Gets the highest value which any index claimed thus far could possibly have.
    /// This is not necessarily the current highest claimed index; this value may represent
    /// an earlier claim that has already been released.
    /// `None` if nothing has ever been claimed.
    #[inline(always)]
    pub fn highest_possibly_claimed_id(&self) -> Option<usize> {
        self.next_index.checked_sub(1)
    }

    /// Gets the number of previously returned ids waiting in the pool.
    #[inline(always)]
    pub fn available_id_count(&self) -> usize {
        self.available_ids.len()
    }

    /// Gets the number of returned ids the pool can hold without resizing.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.available_ids.capacity()
    }

    /// Gets whether `id` is currently handed out by the pool.
    #[inline(always)]
    pub fn is_claimed(&self, id: usize) -> bool {
        self.claimed.get(id).copied().unwrap_or(false)
    }

    /// Takes an id from the pool.
    #[inline(always)]
    pub fn take(&mut self) -> usize {
        match self.available_ids.pop() {
            Some(id) => {
                self.claimed[id] = true;
                id
            }
            None => {
                let id = self.next_index;
                self.next_index += 1;
                self.claimed.push(true);
                id
            }
        }
    }

    /// Returns an id to the pool, doubling the available id storage if it is full.
    ///
    /// # Panics
    /// If `id` is not currently claimed from this pool.
    #[inline(always)]
    pub fn release(&mut self, id: usize) {
        if self.available_ids.len() == self.available_ids.capacity() {
            let new_capacity = (self.available_ids.len() * 2).max(1);
            trace!(
                old_capacity = self.available_ids.capacity(),
                new_capacity,
                "growing id pool free list"
            );
            self.internal_resize(new_capacity);
        }
        self.release_unsafely(id);
    }

    /// Returns an id to the pool without checking if a resize is required.
    /// The caller must have guaranteed spare capacity, e.g. with [`IdPool::ensure_capacity`].
    ///
    /// # Panics
    /// If `id` is not currently claimed from this pool.
    #[inline(always)]
    pub fn release_unsafely(&mut self, id: usize) {
        assert!(id < self.next_index, "Id {id} was never taken from this pool.");
        assert!(self.claimed[id], "Id {id} was returned to the pool twice.");
        debug_assert!(
            self.available_ids.len() < self.available_ids.capacity(),
            "Returning without a capacity check requires room in the available id stack."
        );
        self.claimed[id] = false;
        self.available_ids.push(id);
    }

    /// Resets the IdPool. Any ids still held elsewhere are no longer tracked and must not be
    /// returned.
    pub fn clear(&mut self) {
        self.next_index = 0;
        self.available_ids.clear();
        self.claimed.clear();
    }

    fn internal_resize(&mut self, new_size: usize) {
        debug_assert!(
            new_size >= self.available_ids.len(),
            "Resizing would discard returned ids."
        );
        if new_size > self.available_ids.capacity() {
            self.available_ids
                .reserve_exact(new_size - self.available_ids.len());
        } else {
            self.available_ids.shrink_to(new_size);
        }
    }

    /// Ensures that the underlying id queue can hold at least a certain number of ids.
    pub fn ensure_capacity(&mut self, count: usize) {
        if self.available_ids.capacity() < count {
            self.internal_resize(count);
        }
    }

    /// Shrinks the available ids queue to the smallest size that can fit the given count
    /// and the current available id count.
    pub fn compact(&mut self, minimum_count: usize) {
        let target_length = minimum_count.max(self.available_ids.len());
        if self.available_ids.capacity() > target_length {
            self.internal_resize(target_length);
        }
    }

    /// Resizes the underlying buffer to the smallest size required to hold the given count
    /// and the current available id count.
    pub fn resize(&mut self, count: usize) {
        let target_length = count.max(self.available_ids.len());
        if self.available_ids.capacity() != target_length {
            self.internal_resize(target_length);
        }
    }
}

impl Default for IdPool {
    fn default() -> Self {
        Self::new(0)
    }
}
