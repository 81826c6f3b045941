// SPDX-License-Identifier: Apache-2.0
//! Body lists for determinism and checksum tests.

use lockstep_collide::{BoxShape, Pose, Shape, SphereShape};
use lockstep_math::{Fx, Mat3, Vec3};

/// Minimal rigid body: a shape and its pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestBody {
    /// Collision shape.
    pub shape: Shape,
    /// World placement.
    pub pose: Pose,
}

impl TestBody {
    /// Creates a body.
    pub fn new(shape: impl Into<Shape>, pose: Pose) -> Self {
        Self {
            shape: shape.into(),
            pose,
        }
    }
}

/// `count` unit cubes stacked along +Y, each sunk `overlap` into the one
/// below and twisted by `twist` radians about Y per level.
pub fn box_stack(count: i32, overlap: Fx, twist: Fx) -> Vec<TestBody> {
    let cube = BoxShape::new(Vec3::new(Fx::HALF, Fx::HALF, Fx::HALF));
    let mut height = Fx::HALF;
    let mut angle = Fx::ZERO;
    let mut bodies = Vec::new();
    for _ in 0..count {
        let pose = Pose::new(
            Mat3::rotation_y(angle),
            Vec3::new(Fx::ZERO, height, Fx::ZERO),
        );
        bodies.push(TestBody::new(cube, pose));
        height += Fx::ONE - overlap;
        angle += twist;
    }
    bodies
}

/// `count` spheres of `radius` on the X axis, `spacing` apart.
pub fn sphere_row(count: i32, radius: Fx, spacing: Fx) -> Vec<TestBody> {
    let mut x = Fx::ZERO;
    let mut bodies = Vec::new();
    for _ in 0..count {
        bodies.push(TestBody::new(
            SphereShape::new(radius),
            Pose::from_position(Vec3::new(x, Fx::ZERO, Fx::ZERO)),
        ));
        x += spacing;
    }
    bodies
}
