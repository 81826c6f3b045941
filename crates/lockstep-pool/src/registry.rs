// SPDX-License-Identifier: Apache-2.0
use core::any::{type_name, Any, TypeId};

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

use crate::{Pool, PoolItem};

/// Errors produced by [`PoolRegistry`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// A factory was installed for a type whose pool already exists.
    #[error("pool for `{type_name}` already exists")]
    AlreadyRegistered {
        /// Rust type name of the pooled object.
        type_name: &'static str,
    },
    /// `try_get_new` was called for a type with no pool and no default factory.
    #[error("no pool registered for `{type_name}`")]
    NotRegistered {
        /// Rust type name of the pooled object.
        type_name: &'static str,
    },
}

trait ErasedPool {
    fn reset(&mut self);
    fn free_count(&self) -> usize;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: PoolItem + 'static> ErasedPool for Pool<T> {
    fn reset(&mut self) {
        Pool::reset(self);
    }

    fn free_count(&self) -> usize {
        self.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Owns one [`Pool`] per pooled type and tracks which pools are in use.
///
/// A pool becomes *registered* the first time it serves a `get_new` after
/// creation or after [`PoolRegistry::reset_all`]. Registration order is the
/// order of first use, which keeps resets deterministic.
#[derive(Default)]
pub struct PoolRegistry {
    index: FxHashMap<TypeId, usize>,
    pools: Vec<Box<dyn ErasedPool>>,
    registered: Vec<usize>,
}

impl PoolRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a custom factory for `T`.
    ///
    /// # Errors
    /// Returns [`PoolError::AlreadyRegistered`] if a pool for `T` exists.
    pub fn register_factory<T: PoolItem + 'static>(
        &mut self,
        factory: impl Fn() -> T + 'static,
    ) -> Result<(), PoolError> {
        let key = TypeId::of::<T>();
        if self.index.contains_key(&key) {
            return Err(PoolError::AlreadyRegistered {
                type_name: type_name::<T>(),
            });
        }
        self.insert(key, Pool::with_factory(factory));
        debug!(pool = type_name::<T>(), "installed custom pool factory");
        Ok(())
    }

    /// Hands out a clean `T`, creating a default-constructing pool on first use.
    pub fn get_new<T: PoolItem + Default + 'static>(&mut self) -> T {
        let key = TypeId::of::<T>();
        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => self.insert(key, Pool::<T>::new()),
        };
        self.serve::<T>(idx).unwrap_or_else(unreachable_pool::<T>)
    }

    /// Hands out a clean `T` from a pool previously created through
    /// [`PoolRegistry::register_factory`] or an earlier `get_new`.
    ///
    /// # Errors
    /// Returns [`PoolError::NotRegistered`] when no pool for `T` exists.
    pub fn try_get_new<T: PoolItem + 'static>(&mut self) -> Result<T, PoolError> {
        let not_registered = || PoolError::NotRegistered {
            type_name: type_name::<T>(),
        };
        let idx = *self.index.get(&TypeId::of::<T>()).ok_or_else(not_registered)?;
        self.serve::<T>(idx).ok_or_else(not_registered)
    }

    /// Returns an object to its pool. Objects of a type with no pool start a
    /// default pool that stays unregistered until it serves a `get_new`.
    pub fn give_back<T: PoolItem + Default + 'static>(&mut self, item: T) {
        let key = TypeId::of::<T>();
        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => self.insert(key, Pool::<T>::new()),
        };
        if let Some(pool) = self.pools[idx].as_any_mut().downcast_mut::<Pool<T>>() {
            pool.give_back(item);
        }
    }

    /// Number of free objects held by the pool for `T` (zero if it has none).
    pub fn free_count<T: PoolItem + 'static>(&self) -> usize {
        self.index
            .get(&TypeId::of::<T>())
            .map_or(0, |&idx| self.pools[idx].free_count())
    }

    /// `true` when the pool for `T` has served a `get_new` since the last reset.
    pub fn is_registered<T: PoolItem + 'static>(&self) -> bool {
        self.index
            .get(&TypeId::of::<T>())
            .is_some_and(|&idx| self.registered.contains(&idx))
    }

    /// Number of registered pools.
    pub fn registered_len(&self) -> usize {
        self.registered.len()
    }

    /// Borrows the pool for `T`, if one exists.
    pub fn pool<T: PoolItem + 'static>(&self) -> Option<&Pool<T>> {
        let idx = *self.index.get(&TypeId::of::<T>())?;
        self.pools[idx].as_any().downcast_ref::<Pool<T>>()
    }

    /// Drains every registered pool, marks each fresh, and forgets the
    /// registrations. Custom factories survive the reset.
    pub fn reset_all(&mut self) {
        debug!(pools = self.registered.len(), "resetting registered pools");
        for &idx in &self.registered {
            self.pools[idx].reset();
        }
        self.registered.clear();
    }

    fn insert<T: PoolItem + 'static>(&mut self, key: TypeId, pool: Pool<T>) -> usize {
        let idx = self.pools.len();
        self.pools.push(Box::new(pool));
        self.index.insert(key, idx);
        idx
    }

    fn serve<T: PoolItem + 'static>(&mut self, idx: usize) -> Option<T> {
        let pool = self.pools[idx].as_any_mut().downcast_mut::<Pool<T>>()?;
        let first_use = pool.is_fresh();
        let item = pool.get_new();
        if first_use {
            debug!(pool = type_name::<T>(), "registered pool");
            self.registered.push(idx);
        }
        Some(item)
    }
}

impl core::fmt::Debug for PoolRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PoolRegistry")
            .field("pools", &self.pools.len())
            .field("registered", &self.registered)
            .finish()
    }
}

#[cold]
fn unreachable_pool<T: PoolItem + Default>() -> T {
    // Unreachable: the index maps `TypeId::of::<T>()` only to a `Pool<T>`.
    let mut item = T::default();
    item.cleanup();
    item
}
