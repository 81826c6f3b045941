// SPDX-License-Identifier: Apache-2.0
use lockstep_math::{Mat3, Vec3};

use crate::SupportCenter;

/// Rigid placement of a shape: rotation followed by translation.
///
/// Poses are supplied by the body layer and never mutated by collision code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pose {
    /// Rotation from body-local to world space.
    pub orientation: Mat3,
    /// World-space position of the body origin.
    pub position: Vec3,
}

impl Pose {
    /// Identity pose at the world origin.
    pub const fn identity() -> Self {
        Self {
            orientation: Mat3::identity(),
            position: Vec3::ZERO,
        }
    }

    /// Creates a pose.
    pub const fn new(orientation: Mat3, position: Vec3) -> Self {
        Self {
            orientation,
            position,
        }
    }

    /// Unrotated pose at `position`.
    pub const fn from_position(position: Vec3) -> Self {
        Self::new(Mat3::identity(), position)
    }

    /// Maps a body-local point to world space.
    pub fn transform_point(&self, local: &Vec3) -> Vec3 {
        self.position + self.orientation.transform(local)
    }

    /// Maps a body-local direction to world space.
    pub fn transform_direction(&self, local: &Vec3) -> Vec3 {
        self.orientation.transform(local)
    }

    /// Maps a world point into body-local space.
    pub fn inverse_transform_point(&self, world: &Vec3) -> Vec3 {
        self.orientation.transpose_transform(&(*world - self.position))
    }

    /// Maps a world direction into body-local space.
    pub fn inverse_transform_direction(&self, world: &Vec3) -> Vec3 {
        self.orientation.transpose_transform(world)
    }

    /// World position of `shape`'s support center.
    pub fn world_center<S: SupportCenter + ?Sized>(&self, shape: &S) -> Vec3 {
        self.transform_point(&shape.support_center())
    }
}
