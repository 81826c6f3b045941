// SPDX-License-Identifier: Apache-2.0
//! Convex primitive shapes.
//!
//! Shapes are immutable for the duration of a tick and are described in body
//! local space; a [`Pose`] places them in the world.

use lockstep_math::{Fx, Vec3};

use crate::{Pose, Segment};

/// Local-space centroid used to compute a shape's world center.
pub trait SupportCenter {
    /// Shape-local centroid.
    fn support_center(&self) -> Vec3;
}

/// Discriminant of [`Shape`]; its declaration order is the canonical pair order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShapeKind {
    /// Oriented box.
    Box,
    /// Sphere.
    Sphere,
    /// Capsule (segment swept by a sphere).
    Capsule,
    /// Single triangle.
    Triangle,
}

/// Oriented box described by its half-extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoxShape {
    /// Half of the box size along each local axis.
    pub half_extents: Vec3,
}

impl BoxShape {
    /// Creates a box from half-extents.
    pub const fn new(half_extents: Vec3) -> Self {
        Self { half_extents }
    }

    /// Local position of corner `id`. Bit `k` of `id` selects the positive
    /// side of local axis `k`.
    pub fn corner(&self, id: i32) -> Vec3 {
        let e = self.half_extents;
        let pick = |bit: i32, extent: Fx| if id & bit == 0 { -extent } else { extent };
        Vec3::new(pick(1, e.x), pick(2, e.y), pick(4, e.z))
    }
}

impl SupportCenter for BoxShape {
    fn support_center(&self) -> Vec3 {
        Vec3::ZERO
    }
}

/// Sphere centered on the body origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SphereShape {
    /// Radius.
    pub radius: Fx,
}

impl SphereShape {
    /// Creates a sphere.
    pub const fn new(radius: Fx) -> Self {
        Self { radius }
    }
}

impl SupportCenter for SphereShape {
    fn support_center(&self) -> Vec3 {
        Vec3::ZERO
    }
}

/// Capsule aligned with local +Y.
///
/// `length` is the distance between the two hemisphere centers; the total
/// height is `length + 2 * radius`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapsuleShape {
    /// Radius of the swept sphere.
    pub radius: Fx,
    /// Length of the core segment.
    pub length: Fx,
}

impl CapsuleShape {
    /// Creates a capsule.
    pub const fn new(radius: Fx, length: Fx) -> Self {
        Self { radius, length }
    }

    /// World-space core segment. `start` is the +Y end, `end` the -Y end.
    pub fn segment(&self, pose: &Pose) -> Segment {
        let center = pose.world_center(self);
        let half_axis = pose.transform_direction(&(Vec3::UNIT_Y * (self.length * Fx::HALF)));
        Segment::new(center + half_axis, center - half_axis)
    }
}

impl SupportCenter for CapsuleShape {
    fn support_center(&self) -> Vec3 {
        Vec3::ZERO
    }
}

/// Triangle given by three local-space vertices.
///
/// Counter-clockwise winding (seen from the front) defines the face normal
/// `(v1 - v0) × (v2 - v0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriangleShape {
    /// Vertices in winding order.
    pub vertices: [Vec3; 3],
}

impl TriangleShape {
    /// Creates a triangle.
    pub const fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Vertices transformed to world space.
    pub fn world_vertices(&self, pose: &Pose) -> [Vec3; 3] {
        self.vertices.map(|v| pose.transform_point(&v))
    }
}

impl SupportCenter for TriangleShape {
    fn support_center(&self) -> Vec3 {
        let [a, b, c] = self.vertices;
        (a + b + c) * Fx::from_ratio(1, 3)
    }
}

/// Tagged union over the supported primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// See [`BoxShape`].
    Box(BoxShape),
    /// See [`SphereShape`].
    Sphere(SphereShape),
    /// See [`CapsuleShape`].
    Capsule(CapsuleShape),
    /// See [`TriangleShape`].
    Triangle(TriangleShape),
}

impl Shape {
    /// Discriminant used for pair dispatch.
    pub const fn kind(&self) -> ShapeKind {
        match self {
            Self::Box(_) => ShapeKind::Box,
            Self::Sphere(_) => ShapeKind::Sphere,
            Self::Capsule(_) => ShapeKind::Capsule,
            Self::Triangle(_) => ShapeKind::Triangle,
        }
    }
}

impl SupportCenter for Shape {
    fn support_center(&self) -> Vec3 {
        match self {
            Self::Box(s) => s.support_center(),
            Self::Sphere(s) => s.support_center(),
            Self::Capsule(s) => s.support_center(),
            Self::Triangle(s) => s.support_center(),
        }
    }
}

impl From<BoxShape> for Shape {
    fn from(value: BoxShape) -> Self {
        Self::Box(value)
    }
}

impl From<SphereShape> for Shape {
    fn from(value: SphereShape) -> Self {
        Self::Sphere(value)
    }
}

impl From<CapsuleShape> for Shape {
    fn from(value: CapsuleShape) -> Self {
        Self::Capsule(value)
    }
}

impl From<TriangleShape> for Shape {
    fn from(value: TriangleShape) -> Self {
        Self::Triangle(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_bits_select_positive_sides() {
        let b = BoxShape::new(Vec3::from_ints(1, 2, 3));
        assert_eq!(b.corner(0), Vec3::from_ints(-1, -2, -3));
        assert_eq!(b.corner(0b101), Vec3::from_ints(1, -2, 3));
        assert_eq!(b.corner(7), Vec3::from_ints(1, 2, 3));
    }

    #[test]
    fn capsule_segment_follows_local_y() {
        let c = CapsuleShape::new(Fx::HALF, Fx::from_int(4));
        let seg = c.segment(&Pose::from_position(Vec3::from_ints(1, 0, 0)));
        assert_eq!(seg.start, Vec3::from_ints(1, 2, 0));
        assert_eq!(seg.end, Vec3::from_ints(1, -2, 0));
    }

    #[test]
    fn triangle_center_is_centroid() {
        let t = TriangleShape::new(
            Vec3::from_ints(3, 0, 0),
            Vec3::from_ints(0, 3, 0),
            Vec3::from_ints(0, 0, 3),
        );
        let c = t.support_center();
        assert!((c - Vec3::ONE).length() < Fx::EPSILON);
        assert_eq!(Shape::from(t).kind(), ShapeKind::Triangle);
    }
}
