// SPDX-License-Identifier: Apache-2.0
use core::ops::{Add, AddAssign, Index, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::Fx;

/// Deterministic 3D vector over [`Fx`].
///
/// * Components encode world-space metres and may represent either points or
///   directions depending on the calling context.
/// * Every operation is integer arithmetic, so results are identical on all
///   participants of a lockstep session.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    /// X component.
    pub x: Fx,
    /// Y component.
    pub y: Fx,
    /// Z component.
    pub z: Fx,
}

impl Vec3 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(Fx::ZERO, Fx::ZERO, Fx::ZERO);

    /// `(1, 1, 1)`.
    pub const ONE: Self = Self::new(Fx::ONE, Fx::ONE, Fx::ONE);

    /// Unit vector pointing along the positive X axis.
    pub const UNIT_X: Self = Self::new(Fx::ONE, Fx::ZERO, Fx::ZERO);

    /// Unit vector pointing along the positive Y axis.
    pub const UNIT_Y: Self = Self::new(Fx::ZERO, Fx::ONE, Fx::ZERO);

    /// Unit vector pointing along the positive Z axis.
    pub const UNIT_Z: Self = Self::new(Fx::ZERO, Fx::ZERO, Fx::ONE);

    /// Creates a vector from components.
    pub const fn new(x: Fx, y: Fx, z: Fx) -> Self {
        Self { x, y, z }
    }

    /// Creates a vector from integer components.
    pub fn from_ints(x: i32, y: i32, z: i32) -> Self {
        Self::new(Fx::from_int(x), Fx::from_int(y), Fx::from_int(z))
    }

    /// Creates a vector from `f32` components (boundary use only).
    pub fn from_f32(x: f32, y: f32, z: f32) -> Self {
        Self::new(Fx::from_f32(x), Fx::from_f32(y), Fx::from_f32(z))
    }

    /// Returns the components as an array.
    pub const fn to_array(self) -> [Fx; 3] {
        [self.x, self.y, self.z]
    }

    /// Returns the components as `f32` for diagnostics.
    pub fn to_f32_array(self) -> [f32; 3] {
        [self.x.to_f32(), self.y.to_f32(), self.z.to_f32()]
    }

    /// Component by axis index (`0 = x`, `1 = y`, anything else `z`).
    pub fn component(&self, axis: usize) -> Fx {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Returns a copy with one component replaced.
    pub fn with_component(mut self, axis: usize, value: Fx) -> Self {
        match axis {
            0 => self.x = value,
            1 => self.y = value,
            _ => self.z = value,
        }
        self
    }

    /// Dot product.
    pub fn dot(&self, other: &Self) -> Fx {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product.
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Squared magnitude.
    pub fn length_squared(&self) -> Fx {
        self.dot(self)
    }

    /// Magnitude.
    pub fn length(&self) -> Fx {
        self.length_squared().sqrt()
    }

    /// Normalises the vector, returning the zero vector if length ≤ `Fx::EPSILON`.
    ///
    /// Degenerate vectors normalise to zero so callers can detect them
    /// deterministically instead of dividing by a near-zero length.
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len <= Fx::EPSILON {
            return Self::ZERO;
        }
        Self::new(self.x / len, self.y / len, self.z / len)
    }

    /// Component-wise absolute value.
    pub fn abs(&self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    /// Component-wise product.
    pub fn mul_elements(&self, other: &Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    /// Squared distance between two points.
    pub fn distance_squared(&self, other: &Self) -> Fx {
        (*self - *other).length_squared()
    }

    /// Index of the smallest component; ties resolve to the lowest index.
    pub fn min_component_axis(&self) -> usize {
        let mut best = 0;
        if self.y < self.component(best) {
            best = 1;
        }
        if self.z < self.component(best) {
            best = 2;
        }
        best
    }

    /// `true` when every component is exactly zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<Fx> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: Fx) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vec3> for Fx {
    type Output = Vec3;
    fn mul(self, rhs: Vec3) -> Vec3 {
        rhs * self
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign<Fx> for Vec3 {
    fn mul_assign(&mut self, rhs: Fx) {
        *self = *self * rhs;
    }
}

impl Index<usize> for Vec3 {
    type Output = Fx;
    fn index(&self, axis: usize) -> &Fx {
        match axis {
            0 => &self.x,
            1 => &self.y,
            _ => &self.z,
        }
    }
}

impl From<[Fx; 3]> for Vec3 {
    fn from(value: [Fx; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}
