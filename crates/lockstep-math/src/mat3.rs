// SPDX-License-Identifier: Apache-2.0
use core::ops::Mul;

use crate::{Fx, Vec3};

/// Column-major 3×3 matrix used for rigid-body orientations.
///
/// Column `i` holds the world-space image of local axis `i`, so
/// [`Mat3::transform`] maps body-local directions to world space and
/// [`Mat3::transpose_transform`] maps world directions back (for a pure
/// rotation the transpose is the inverse).
///
/// # Examples
/// ```
/// use lockstep_math::{Fx, Mat3, Vec3};
/// let r = Mat3::rotation_z(Fx::HALF_PI);
/// let v = r.transform(&Vec3::UNIT_X);
/// assert!((v - Vec3::UNIT_Y).length() < Fx::EPSILON);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mat3 {
    cols: [Vec3; 3],
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat3 {
    /// The identity matrix.
    pub const fn identity() -> Self {
        Self {
            cols: [Vec3::UNIT_X, Vec3::UNIT_Y, Vec3::UNIT_Z],
        }
    }

    /// Builds a matrix from its three columns.
    pub const fn from_cols(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self { cols: [c0, c1, c2] }
    }

    /// Column `i` (the world image of local axis `i`).
    pub fn col(&self, i: usize) -> Vec3 {
        self.cols[i.min(2)]
    }

    /// Row `i`.
    pub fn row(&self, i: usize) -> Vec3 {
        Vec3::new(
            self.cols[0].component(i),
            self.cols[1].component(i),
            self.cols[2].component(i),
        )
    }

    /// Entry at `(row, col)`.
    pub fn at(&self, row: usize, col: usize) -> Fx {
        self.col(col).component(row)
    }

    /// Computes `M · v`.
    pub fn transform(&self, v: &Vec3) -> Vec3 {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z
    }

    /// Computes `Mᵀ · v` (the inverse transform for rotations).
    pub fn transpose_transform(&self, v: &Vec3) -> Vec3 {
        Vec3::new(self.cols[0].dot(v), self.cols[1].dot(v), self.cols[2].dot(v))
    }

    /// Computes `self · rhs`.
    pub fn multiply(&self, rhs: &Self) -> Self {
        Self::from_cols(
            self.transform(&rhs.cols[0]),
            self.transform(&rhs.cols[1]),
            self.transform(&rhs.cols[2]),
        )
    }

    /// Computes `selfᵀ · rhs`, i.e. `rhs` expressed in `self`'s frame.
    pub fn transpose_multiply(&self, rhs: &Self) -> Self {
        Self::from_cols(
            self.transpose_transform(&rhs.cols[0]),
            self.transpose_transform(&rhs.cols[1]),
            self.transpose_transform(&rhs.cols[2]),
        )
    }

    /// Transposed matrix.
    pub fn transpose(&self) -> Self {
        Self::from_cols(self.row(0), self.row(1), self.row(2))
    }

    /// Component-wise absolute value.
    pub fn abs(&self) -> Self {
        Self::from_cols(self.cols[0].abs(), self.cols[1].abs(), self.cols[2].abs())
    }

    /// Rotation about +X by `angle` radians.
    pub fn rotation_x(angle: Fx) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols(
            Vec3::UNIT_X,
            Vec3::new(Fx::ZERO, c, s),
            Vec3::new(Fx::ZERO, -s, c),
        )
    }

    /// Rotation about +Y by `angle` radians.
    pub fn rotation_y(angle: Fx) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols(
            Vec3::new(c, Fx::ZERO, -s),
            Vec3::UNIT_Y,
            Vec3::new(s, Fx::ZERO, c),
        )
    }

    /// Rotation about +Z by `angle` radians.
    pub fn rotation_z(angle: Fx) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols(
            Vec3::new(c, s, Fx::ZERO),
            Vec3::new(-s, c, Fx::ZERO),
            Vec3::UNIT_Z,
        )
    }

    /// Rotation about an arbitrary axis by `angle` radians (Rodrigues).
    ///
    /// The axis is normalised internally; a degenerate axis yields the
    /// identity so the result stays well defined.
    pub fn from_axis_angle(axis: Vec3, angle: Fx) -> Self {
        let k = axis.normalize();
        if k.is_zero() {
            return Self::identity();
        }
        let (s, c) = angle.sin_cos();
        let t = Fx::ONE - c;
        let column = |e: Vec3, kj: Fx| e * c + k.cross(&e) * s + k * (t * kj);
        Self::from_cols(
            column(Vec3::UNIT_X, k.x),
            column(Vec3::UNIT_Y, k.y),
            column(Vec3::UNIT_Z, k.z),
        )
    }
}

impl Mul for Mat3 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.transform(&rhs)
    }
}
