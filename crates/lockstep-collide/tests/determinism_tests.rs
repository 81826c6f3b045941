// SPDX-License-Identifier: Apache-2.0

#![allow(missing_docs)]
use lockstep_collide::{
    BoxShape, Collision, Contact, ContactBuffer, NarrowPhase, Shape, ShapeKind, SphereShape,
    CONTACT_CAPACITY,
};
use lockstep_dry_tests::{box_stack, fx, pinned_runner, pose_strategy, sphere_row, TestBody};
use lockstep_math::{Fx, Vec3};
use lockstep_pool::PoolRegistry;
use proptest::prelude::*;

fn all_pairs(bodies: &[TestBody], np: &NarrowPhase) -> Vec<Option<Collision>> {
    let mut out = Vec::new();
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            out.push(np.collide(&a.shape, &a.pose, &b.shape, &b.pose));
        }
    }
    out
}

fn unit_length(v: Vec3) -> bool {
    (v.length_squared() - Fx::ONE).abs() <= fx(1, 1000)
}

#[test]
fn box_stack_is_reproducible() {
    let np = NarrowPhase::default();
    let bodies = box_stack(6, fx(1, 20), fx(1, 7));
    let first = all_pairs(&bodies, &np);
    let second = all_pairs(&box_stack(6, fx(1, 20), fx(1, 7)), &np);
    assert_eq!(first, second);

    // Neighbours touch, everything else is out of reach.
    for (index, hit) in first.iter().enumerate() {
        let adjacent = matches!(index, 0 | 5 | 9 | 12 | 14);
        assert_eq!(hit.is_some(), adjacent, "pair {index}");
    }
    for hit in first.iter().flatten() {
        assert!(unit_length(hit.normal()));
        assert!(hit.normal().y > Fx::ZERO);
        assert!(hit.as_manifold().is_some_and(|m| !m.contacts.is_empty()));
    }
}

#[test]
fn sphere_row_touches_only_neighbours() {
    let np = NarrowPhase::default();
    let hits = all_pairs(&sphere_row(4, Fx::ONE, fx(3, 2)), &np);
    // Pairs (0,1) (1,2) (2,3) sit at indices 0, 3 and 5.
    for (index, hit) in hits.iter().enumerate() {
        match hit {
            Some(hit) => {
                assert!(matches!(index, 0 | 3 | 5), "pair {index}");
                assert_eq!(hit.penetration(), Fx::HALF);
                assert_eq!(hit.normal(), Vec3::UNIT_X);
            }
            None => assert!(!matches!(index, 0 | 3 | 5), "pair {index}"),
        }
    }
}

#[test]
fn pooled_contact_buffers_come_back_empty() {
    let mut registry = PoolRegistry::new();
    let np = NarrowPhase::default();
    let bodies = box_stack(2, fx(1, 10), Fx::ZERO);

    let mut buffer: ContactBuffer = registry.get_new();
    let hit = np
        .collide(&bodies[0].shape, &bodies[0].pose, &bodies[1].shape, &bodies[1].pose)
        .unwrap();
    for record in hit.as_manifold().unwrap().contacts.iter() {
        buffer.push(*record).unwrap();
    }
    assert!(!buffer.is_empty());
    registry.give_back(buffer);
    assert_eq!(registry.free_count::<ContactBuffer>(), 1);

    let reused: ContactBuffer = registry.get_new();
    assert!(reused.is_empty());
    assert_eq!(reused.as_slice().len(), 0);
    assert!(!reused.is_full());
    assert_eq!(registry.free_count::<ContactBuffer>(), 0);

    registry.reset_all();
    assert!(!registry.is_registered::<ContactBuffer>());
    let mut fresh: ContactBuffer = registry.get_new();
    for _ in 0..CONTACT_CAPACITY {
        fresh.push(Default::default()).unwrap();
    }
    assert!(fresh.is_full());
}

#[test]
fn random_poses_keep_contact_invariants() {
    let np = NarrowPhase::default();
    let cube: Shape = BoxShape::new(Vec3::new(Fx::ONE, Fx::HALF, fx(3, 4))).into();
    let ball: Shape = SphereShape::new(fx(4, 5)).into();
    let shapes = [cube, ball];

    let mut runner = pinned_runner(128);
    let strategy = (pose_strategy(2), pose_strategy(2), 0..2_usize, 0..2_usize);
    runner
        .run(&strategy, |(pose_a, pose_b, ia, ib)| {
            let (shape_a, shape_b) = (&shapes[ia], &shapes[ib]);
            let ab = np.collide(shape_a, &pose_a, shape_b, &pose_b);
            prop_assert_eq!(ab, np.collide(shape_a, &pose_a, shape_b, &pose_b));
            let Some(hit) = ab else {
                return Ok(());
            };
            prop_assert!(unit_length(hit.normal()));
            prop_assert!(hit.penetration() >= Fx::ZERO);

            match (shape_a.kind(), shape_b.kind()) {
                (ShapeKind::Box, ShapeKind::Box) => {
                    let m = hit.as_manifold().unwrap();
                    prop_assert!(m.contacts.len() <= 4);
                    prop_assert!(m.contacts.iter().all(|r| r.depth <= Fx::ZERO));
                    prop_assert!(m.normal.dot(&(pose_b.position - pose_a.position)) >= Fx::ZERO);
                }
                _ => {
                    // Single-contact routines flip exactly when swapped.
                    let ba = np.collide(shape_b, &pose_b, shape_a, &pose_a);
                    if shape_a.kind() != shape_b.kind() {
                        let swapped = ba.and_then(|c| c.as_contact().copied());
                        prop_assert_eq!(swapped, hit.as_contact().map(Contact::flipped));
                    } else {
                        prop_assert!(ba.is_some());
                    }
                }
            }
            Ok(())
        })
        .unwrap();
}
