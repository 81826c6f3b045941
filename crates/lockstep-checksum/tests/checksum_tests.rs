// SPDX-License-Identifier: Apache-2.0

#![allow(missing_docs)]
use lockstep_checksum::{
    accumulate, compute_checksum, contact_digest, digest_hex, manifold_digest, ChecksumBody,
    ChecksumError, ChecksumLedger, WorldChecksumExtractor,
};
use lockstep_collide::{NarrowPhase, Pose};
use lockstep_dry_tests::{box_stack, fx, pinned_runner, pose_strategy, PoseBuilder, TestBody};
use lockstep_math::{Fx, Vec3};
use proptest::prelude::*;

fn poses(bodies: &[TestBody]) -> Vec<Pose> {
    bodies.iter().map(|b| b.pose).collect()
}

/// Manifold digests of every adjacent pair in a twisted stack.
fn stack_digests() -> Vec<String> {
    let np = NarrowPhase::default();
    let bodies = box_stack(5, fx(1, 16), fx(2, 9));
    bodies
        .windows(2)
        .map(|pair| {
            let hit = np
                .collide(&pair[0].shape, &pair[0].pose, &pair[1].shape, &pair[1].pose)
                .unwrap();
            let manifold = hit.as_manifold().unwrap();
            assert_eq!(manifold_digest(manifold), manifold_digest(manifold));
            digest_hex(&contact_digest(&manifold.contacts))
        })
        .collect()
}

#[test]
fn stack_checksum_is_stable_and_sensitive() {
    let stack = poses(&box_stack(8, fx(1, 20), fx(1, 9)));
    let first = compute_checksum(&stack);
    assert_eq!(first, compute_checksum(&poses(&box_stack(8, fx(1, 20), fx(1, 9)))));

    let mut nudged = stack.clone();
    nudged[3].position.y += Fx::from_raw(1);
    assert_ne!(compute_checksum(&nudged), first);
}

#[test]
fn two_participants_agree_then_detect_a_desync() {
    let stack = poses(&box_stack(4, fx(1, 20), Fx::ZERO));
    let mut local = WorldChecksumExtractor::new();
    let mut remote = WorldChecksumExtractor::new();
    let mut ledger = ChecksumLedger::new();

    for tick in 0..3 {
        ledger.record(tick, local.extract(&stack));
        assert!(ledger.verify(tick, remote.extract(&stack)).is_ok());
    }

    let mut drifted = stack.clone();
    drifted[0] = PoseBuilder::new().position(Vec3::new(Fx::ZERO, fx(1, 3), Fx::ZERO)).build();
    ledger.record(3, local.extract(&stack));
    let err = ledger.verify(3, remote.extract(&drifted)).unwrap_err();
    match err {
        ChecksumError::Mismatch { tick, local, remote } => {
            assert_eq!(tick, 3);
            assert_ne!(local, remote);
        }
        ChecksumError::UnknownTick { .. } => panic!("expected mismatch"),
    }

    ledger.prune_before(3);
    assert_eq!(ledger.len(), 1);
    assert!(matches!(
        ledger.verify(0, "0.000000000"),
        Err(ChecksumError::UnknownTick { tick: 0 })
    ));
}

#[test]
fn contact_sequences_replay_byte_identically() {
    let first = stack_digests();
    let second = stack_digests();
    assert_eq!(first.len(), 4);
    assert_eq!(first, second);
}

#[test]
fn checksum_is_additive_over_a_split_list() {
    let mut runner = pinned_runner(64);
    let strategy = prop::collection::vec(pose_strategy(50), 0..12);
    runner
        .run(&strategy, |list| {
            let whole = accumulate(&list);
            let split = list.len() / 2;
            let (head, tail) = list.split_at(split);
            prop_assert_eq!(whole, accumulate(head) + accumulate(tail));
            let by_body: Fx = list.iter().map(ChecksumBody::checksum).sum();
            prop_assert_eq!(whole, by_body);
            Ok(())
        })
        .unwrap();
}
