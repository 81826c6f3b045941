// SPDX-License-Identifier: Apache-2.0
//! Pose builders with exact fixed-point inputs.

use lockstep_collide::Pose;
use lockstep_math::{Fx, Mat3, Vec3};

/// `num / den` as a fixed-point value.
pub fn fx(num: i32, den: i32) -> Fx {
    Fx::from_ratio(num, den)
}

/// Builder for test poses.
///
/// # Example
///
/// ```
/// use lockstep_dry_tests::PoseBuilder;
/// use lockstep_math::Fx;
///
/// let pose = PoseBuilder::new().at(2, 0, 0).rotate_z(Fx::HALF_PI).build();
/// assert_eq!(pose.position.x, Fx::from_int(2));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PoseBuilder {
    orientation: Mat3,
    position: Vec3,
}

impl PoseBuilder {
    /// Identity pose at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an integer position.
    pub fn at(mut self, x: i32, y: i32, z: i32) -> Self {
        self.position = Vec3::from_ints(x, y, z);
        self
    }

    /// Sets an exact position.
    pub fn position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Applies a rotation about world X after the current one.
    pub fn rotate_x(self, angle: Fx) -> Self {
        self.rotate(Mat3::rotation_x(angle))
    }

    /// Applies a rotation about world Y after the current one.
    pub fn rotate_y(self, angle: Fx) -> Self {
        self.rotate(Mat3::rotation_y(angle))
    }

    /// Applies a rotation about world Z after the current one.
    pub fn rotate_z(self, angle: Fx) -> Self {
        self.rotate(Mat3::rotation_z(angle))
    }

    /// Applies `rotation` after the current orientation.
    pub fn rotate(mut self, rotation: Mat3) -> Self {
        self.orientation = rotation * self.orientation;
        self
    }

    /// Finishes the pose.
    pub fn build(self) -> Pose {
        Pose::new(self.orientation, self.position)
    }
}
