// SPDX-License-Identifier: Apache-2.0
//! Property-test runners with a pinned seed.
//!
//! Failures reproduce across machines and CI. To explore other cases
//! locally, edit [`SEED_BYTES`].

use lockstep_collide::Pose;
use lockstep_math::{Fx, Mat3, Vec3};
use proptest::prelude::*;
use proptest::test_runner::{Config as PropConfig, RngAlgorithm, TestRng, TestRunner};

/// Committed seed for [`pinned_runner`].
pub const SEED_BYTES: [u8; 32] = [
    0x42, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0,
];

/// Runner driven by a ChaCha RNG seeded with [`SEED_BYTES`].
pub fn pinned_runner(cases: u32) -> TestRunner {
    let rng = TestRng::from_seed(RngAlgorithm::ChaCha, &SEED_BYTES);
    TestRunner::new_with_rng(
        PropConfig {
            cases,
            ..PropConfig::default()
        },
        rng,
    )
}

/// Poses within `extent` metres of the origin with arbitrary rotations.
pub fn pose_strategy(extent: i32) -> impl Strategy<Value = Pose> {
    let coord = -extent * 1000..=extent * 1000;
    let angle = -3141_i32..=3141;
    (
        prop::array::uniform3(coord),
        prop::array::uniform3(angle),
    )
        .prop_map(|(p, [ax, ay, az])| {
            let milli = |v: i32| Fx::from_ratio(v, 1000);
            let orientation = Mat3::rotation_z(milli(az))
                * Mat3::rotation_y(milli(ay))
                * Mat3::rotation_x(milli(ax));
            Pose::new(orientation, Vec3::new(milli(p[0]), milli(p[1]), milli(p[2])))
        })
}
