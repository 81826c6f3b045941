// SPDX-License-Identifier: Apache-2.0
//! Pair selection and the narrow-phase entry point.

use lockstep_math::{Fx, Vec3};
use tracing::trace;

use crate::pairs::{
    box_box, box_sphere, capsule_capsule, capsule_sphere, sphere_sphere, sphere_triangle,
};
use crate::{Contact, Manifold, NarrowPhaseConfig, Pose, Shape, ShapeKind};

/// Supported unordered shape-kind pairs, named in argument order of their
/// routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairKind {
    /// [`box_box`].
    BoxBox,
    /// [`box_sphere`].
    BoxSphere,
    /// [`sphere_sphere`].
    SphereSphere,
    /// [`capsule_sphere`].
    CapsuleSphere,
    /// [`capsule_capsule`].
    CapsuleCapsule,
    /// [`sphere_triangle`].
    SphereTriangle,
}

impl PairKind {
    /// Routine for `(a, b)` and whether the caller's shapes must be swapped
    /// to match its argument order. `None` for unsupported pairs.
    pub const fn select(a: ShapeKind, b: ShapeKind) -> Option<(Self, bool)> {
        use ShapeKind::{Box, Capsule, Sphere, Triangle};
        match (a, b) {
            (Box, Box) => Some((Self::BoxBox, false)),
            (Box, Sphere) => Some((Self::BoxSphere, false)),
            (Sphere, Box) => Some((Self::BoxSphere, true)),
            (Sphere, Sphere) => Some((Self::SphereSphere, false)),
            (Capsule, Sphere) => Some((Self::CapsuleSphere, false)),
            (Sphere, Capsule) => Some((Self::CapsuleSphere, true)),
            (Capsule, Capsule) => Some((Self::CapsuleCapsule, false)),
            (Sphere, Triangle) => Some((Self::SphereTriangle, false)),
            (Triangle, Sphere) => Some((Self::SphereTriangle, true)),
            (Box, Capsule | Triangle)
            | (Capsule, Box | Triangle)
            | (Triangle, Box | Capsule | Triangle) => None,
        }
    }
}

/// Result of a colliding pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collision {
    /// Single contact point.
    Contact(Contact),
    /// Box-box manifold.
    Manifold(Manifold),
}

impl Collision {
    /// Unit normal from A toward B.
    pub const fn normal(&self) -> Vec3 {
        match self {
            Self::Contact(c) => c.normal,
            Self::Manifold(m) => m.normal,
        }
    }

    /// Deepest penetration as a positive distance.
    pub fn penetration(&self) -> Fx {
        match self {
            Self::Contact(c) => c.penetration,
            Self::Manifold(m) => m.penetration(),
        }
    }

    /// The single contact, if this is one.
    pub const fn as_contact(&self) -> Option<&Contact> {
        match self {
            Self::Contact(c) => Some(c),
            Self::Manifold(_) => None,
        }
    }

    /// The manifold, if this is one.
    pub const fn as_manifold(&self) -> Option<&Manifold> {
        match self {
            Self::Manifold(m) => Some(m),
            Self::Contact(_) => None,
        }
    }
}

/// Narrow-phase front end: picks the routine for each candidate pair.
///
/// ```
/// use lockstep_collide::{NarrowPhase, Pose, Shape, SphereShape};
/// use lockstep_math::{Fx, Vec3};
///
/// let ball = Shape::from(SphereShape::new(Fx::ONE));
/// let here = Pose::identity();
/// let there = Pose::from_position(Vec3::new(Fx::from_ratio(3, 2), Fx::ZERO, Fx::ZERO));
/// let hit = NarrowPhase::default().collide(&ball, &here, &ball, &there).unwrap();
/// assert_eq!(hit.penetration(), Fx::HALF);
/// assert_eq!(hit.normal(), Vec3::UNIT_X);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NarrowPhase {
    config: NarrowPhaseConfig,
}

impl NarrowPhase {
    /// Creates a narrow phase with `config`.
    pub const fn new(config: NarrowPhaseConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub const fn config(&self) -> &NarrowPhaseConfig {
        &self.config
    }

    /// Tests one pair. The returned normal always points from `shape_a`
    /// toward `shape_b`, whatever order the routine ran in.
    pub fn collide(
        &self,
        shape_a: &Shape,
        pose_a: &Pose,
        shape_b: &Shape,
        pose_b: &Pose,
    ) -> Option<Collision> {
        let Some((pair, swapped)) = PairKind::select(shape_a.kind(), shape_b.kind()) else {
            trace!(a = ?shape_a.kind(), b = ?shape_b.kind(), "unsupported shape pair");
            return None;
        };
        trace!(?pair, swapped, "narrow-phase pair");
        let (first, first_pose, second, second_pose) = if swapped {
            (shape_b, pose_b, shape_a, pose_a)
        } else {
            (shape_a, pose_a, shape_b, pose_b)
        };
        let hit = match (first, second) {
            (Shape::Box(a), Shape::Box(b)) => {
                box_box(a, first_pose, b, second_pose, &self.config).map(Collision::Manifold)
            }
            (Shape::Box(a), Shape::Sphere(b)) => {
                box_sphere(a, first_pose, b, second_pose).map(Collision::Contact)
            }
            (Shape::Sphere(a), Shape::Sphere(b)) => {
                sphere_sphere(a, first_pose, b, second_pose).map(Collision::Contact)
            }
            (Shape::Capsule(a), Shape::Sphere(b)) => {
                capsule_sphere(a, first_pose, b, second_pose).map(Collision::Contact)
            }
            (Shape::Capsule(a), Shape::Capsule(b)) => {
                capsule_capsule(a, first_pose, b, second_pose).map(Collision::Contact)
            }
            (Shape::Sphere(a), Shape::Triangle(b)) => sphere_triangle(
                a,
                first_pose,
                b,
                second_pose,
                self.config.sphere_triangle_mode,
            )
            .map(Collision::Contact),
            _ => None,
        };
        match hit {
            Some(Collision::Contact(c)) if swapped => Some(Collision::Contact(c.flipped())),
            other => other,
        }
    }
}
