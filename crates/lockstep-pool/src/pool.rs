// SPDX-License-Identifier: Apache-2.0
use core::fmt;

use crate::PoolItem;

/// Free-list capacity reserved when a pool is created.
const INITIAL_CAPACITY: usize = 10;

/// Unbounded free list of `T` with an injected factory.
///
/// ```
/// use lockstep_pool::{Pool, PooledList};
///
/// let mut pool: Pool<PooledList<u32>> = Pool::new();
/// let mut list = pool.get_new();
/// list.push(7);
/// pool.give_back(list);
/// // Recycled objects come back clean.
/// assert!(pool.get_new().is_empty());
/// ```
pub struct Pool<T> {
    free: Vec<T>,
    factory: Box<dyn Fn() -> T>,
    fresh: bool,
}

impl<T: PoolItem + Default + 'static> Pool<T> {
    /// Creates a pool that builds new objects with `T::default`.
    pub fn new() -> Self {
        Self::with_factory(T::default)
    }
}

impl<T: PoolItem + Default + 'static> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PoolItem> Pool<T> {
    /// Creates a pool that builds new objects with `factory`.
    pub fn with_factory(factory: impl Fn() -> T + 'static) -> Self {
        Self {
            free: Vec::with_capacity(INITIAL_CAPACITY),
            factory: Box::new(factory),
            fresh: true,
        }
    }

    /// Hands out a clean object, constructing one only when the free list is empty.
    pub fn get_new(&mut self) -> T {
        self.fresh = false;
        let mut item = self.free.pop().unwrap_or_else(|| (self.factory)());
        item.cleanup();
        item
    }

    /// Returns an object to the free list. No validation is performed.
    pub fn give_back(&mut self, item: T) {
        self.free.push(item);
    }

    /// Number of objects waiting on the free list.
    pub fn len(&self) -> usize {
        self.free.len()
    }

    /// `true` when the free list is empty.
    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    /// `true` until the first `get_new` after creation or [`Pool::reset`].
    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    /// Drops every free object and marks the pool fresh again.
    pub fn reset(&mut self) {
        self.free.clear();
        self.fresh = true;
    }
}

impl<T> fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("type", &core::any::type_name::<T>())
            .field("free", &self.free.len())
            .field("fresh", &self.fresh)
            .finish()
    }
}
