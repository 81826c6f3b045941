// SPDX-License-Identifier: Apache-2.0
//! lockstep-pool: reusable object pools for an allocation-free simulation loop.
//!
//! The simulation keeps its steady-state tick free of heap traffic by
//! recycling objects through [`Pool`]s. Every pool that has handed out at
//! least one object is tracked by a [`PoolRegistry`]; rolling the simulation
//! back to a confirmed tick calls [`PoolRegistry::reset_all`], which drains
//! every tracked pool so the rebuilt state starts from clean allocations.
//!
//! Invariant: an object returned by `get_new` has always had
//! [`PoolItem::cleanup`] invoked on it.
//!
//! The registry is an explicit context object owned by the simulation world,
//! so independent simulations (for example two worlds compared in a
//! determinism test) never share pooled objects.
#![forbid(unsafe_code)]

mod item;
mod pool;
mod registry;

pub use item::{PoolItem, PooledList, PooledStack};
pub use pool::Pool;
pub use registry::{PoolError, PoolRegistry};
