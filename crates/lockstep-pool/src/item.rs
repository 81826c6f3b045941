// SPDX-License-Identifier: Apache-2.0
use core::ops::{Deref, DerefMut};

/// An object that can be recycled through a [`crate::Pool`].
///
/// `cleanup` resets the object to a fresh logical state. It does not need to
/// zero memory; retaining capacity is the point of pooling.
pub trait PoolItem {
    /// Resets `self` before it is handed out again.
    fn cleanup(&mut self);
}

/// Pooled growable list; `cleanup` clears the contents and keeps the capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PooledList<T> {
    items: Vec<T>,
}

impl<T> Default for PooledList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> PooledList<T> {
    /// Creates an empty list with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }
}

impl<T> Deref for PooledList<T> {
    type Target = Vec<T>;
    fn deref(&self) -> &Vec<T> {
        &self.items
    }
}

impl<T> DerefMut for PooledList<T> {
    fn deref_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
    }
}

impl<T> PoolItem for PooledList<T> {
    fn cleanup(&mut self) {
        self.items.clear();
    }
}

/// Pooled LIFO stack; `cleanup` clears the contents and keeps the capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PooledStack<T> {
    items: Vec<T>,
}

impl<T> Default for PooledStack<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> PooledStack<T> {
    /// Pushes an item on top of the stack.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Pops the top item.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Borrows the top item.
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    /// Number of items on the stack.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` when the stack holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Retained capacity.
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }
}

impl<T> PoolItem for PooledStack<T> {
    fn cleanup(&mut self) {
        self.items.clear();
    }
}
