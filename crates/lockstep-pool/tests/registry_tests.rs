// SPDX-License-Identifier: Apache-2.0

#![allow(missing_docs)]
use lockstep_pool::{PoolError, PoolItem, PoolRegistry, PooledList, PooledStack};
use proptest::prelude::*;

#[derive(Debug, Default, PartialEq, Eq)]
struct Scratch {
    tag: u32,
    values: Vec<u32>,
}

impl PoolItem for Scratch {
    fn cleanup(&mut self) {
        self.values.clear();
    }
}

#[derive(Debug)]
struct NoDefault(u8);

impl PoolItem for NoDefault {
    fn cleanup(&mut self) {}
}

#[test]
fn first_get_new_registers_the_pool() {
    let mut reg = PoolRegistry::new();
    assert_eq!(reg.registered_len(), 0);
    let list: PooledList<u32> = reg.get_new();
    assert!(list.is_empty());
    assert!(reg.is_registered::<PooledList<u32>>());
    let _second: PooledList<u32> = reg.get_new();
    assert_eq!(reg.registered_len(), 1);
}

#[test]
fn give_back_recycles_and_cleans() {
    let mut reg = PoolRegistry::new();
    let mut s: Scratch = reg.get_new();
    s.tag = 9;
    s.values.extend([1, 2, 3]);
    reg.give_back(s);
    assert_eq!(reg.free_count::<Scratch>(), 1);
    let again: Scratch = reg.get_new();
    // The same allocation comes back with its contents cleared.
    assert_eq!(again.tag, 9);
    assert!(again.values.is_empty());
    assert_eq!(reg.free_count::<Scratch>(), 0);
}

#[test]
fn reset_all_drains_registered_pools() {
    let mut reg = PoolRegistry::new();
    let a: Scratch = reg.get_new();
    let b: PooledStack<i64> = reg.get_new();
    reg.give_back(a);
    reg.give_back(b);
    assert_eq!(reg.registered_len(), 2);

    reg.reset_all();
    assert_eq!(reg.registered_len(), 0);
    assert_eq!(reg.free_count::<Scratch>(), 0);
    assert_eq!(reg.free_count::<PooledStack<i64>>(), 0);
    assert!(reg.pool::<Scratch>().is_some_and(|p| p.is_fresh()));

    let _c: Scratch = reg.get_new();
    assert!(reg.is_registered::<Scratch>());
    assert!(!reg.is_registered::<PooledStack<i64>>());
}

#[test]
fn give_back_alone_does_not_register() {
    let mut reg = PoolRegistry::new();
    reg.give_back(Scratch::default());
    assert_eq!(reg.registered_len(), 0);
    assert_eq!(reg.free_count::<Scratch>(), 1);
}

#[test]
fn custom_factory_survives_reset() {
    let mut reg = PoolRegistry::new();
    reg.register_factory(|| NoDefault(42)).unwrap();
    assert_eq!(
        reg.register_factory(|| NoDefault(1)),
        Err(PoolError::AlreadyRegistered {
            type_name: core::any::type_name::<NoDefault>()
        })
    );
    assert_eq!(reg.try_get_new::<NoDefault>().unwrap().0, 42);
    reg.reset_all();
    assert_eq!(reg.try_get_new::<NoDefault>().unwrap().0, 42);
}

#[test]
fn try_get_new_reports_missing_pool() {
    let mut reg = PoolRegistry::new();
    let err = reg.try_get_new::<NoDefault>().unwrap_err();
    assert!(matches!(err, PoolError::NotRegistered { .. }));
    assert!(err.to_string().contains("NoDefault"));
}

#[test]
fn pooled_stack_keeps_capacity_across_cleanup() {
    let mut stack = PooledStack::default();
    for i in 0..32 {
        stack.push(i);
    }
    assert_eq!(stack.peek(), Some(&31));
    let cap = stack.capacity();
    stack.cleanup();
    assert!(stack.is_empty());
    assert_eq!(stack.pop(), None);
    assert_eq!(stack.capacity(), cap);
}

proptest! {
    #[test]
    fn free_count_tracks_give_back_and_get_new(ops in prop::collection::vec(any::<bool>(), 0..64)) {
        let mut reg = PoolRegistry::new();
        let mut held: Vec<Scratch> = Vec::new();
        let mut built = 0_usize;
        for take in ops {
            if take {
                if reg.free_count::<Scratch>() == 0 {
                    built += 1;
                }
                held.push(reg.get_new());
            } else if let Some(item) = held.pop() {
                reg.give_back(item);
            }
            // Every object ever built is either held or waiting on the free list.
            prop_assert_eq!(held.len() + reg.free_count::<Scratch>(), built);
            for item in &held {
                prop_assert!(item.values.is_empty());
            }
        }
    }
}
