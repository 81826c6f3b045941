// SPDX-License-Identifier: Apache-2.0
use lockstep_math::{Fx, Vec3};

use crate::{CapsuleShape, Contact, Pose};

use super::unit_or_fallback;

/// Capsule against capsule.
///
/// When the closest points of the two core segments land on an endpoint, the
/// test is repeated from the opposite endpoint of that segment. Nearly
/// parallel capsules then report a second support point instead of rattling
/// on one end; the alternate replaces the primary contact only when it also
/// overlaps. The normal is always the one from the primary closest points.
pub fn capsule_capsule(
    a: &CapsuleShape,
    pose_a: &Pose,
    b: &CapsuleShape,
    pose_b: &Pose,
) -> Option<Contact> {
    let seg_a = a.segment(pose_a);
    let seg_b = b.segment(pose_b);
    let radii = a.radius + b.radius;
    let limit = radii * radii;

    let cp = seg_a.closest_points(&seg_b);
    let dist_sq = cp.distance_squared();
    if dist_sq > limit {
        return None;
    }
    let normal = unit_or_fallback(cp.on_other - cp.on_self);
    let surface = |on_a: Vec3, on_b: Vec3, dist_sq: Fx| {
        Contact::new(
            on_a + normal * a.radius,
            on_b - normal * b.radius,
            normal,
            radii - dist_sq.sqrt(),
        )
    };

    let alternate = if is_endpoint(cp.s) {
        let from = if cp.s == Fx::ZERO { seg_a.end } else { seg_a.start };
        Some((from, seg_b.closest_point_to(&from).1))
    } else if is_endpoint(cp.t) {
        let from = if cp.t == Fx::ZERO { seg_b.end } else { seg_b.start };
        Some((seg_a.closest_point_to(&from).1, from))
    } else {
        None
    };

    if let Some((on_a, on_b)) = alternate {
        let alt_sq = on_a.distance_squared(&on_b);
        if alt_sq <= limit {
            return Some(surface(on_a, on_b, alt_sq));
        }
    }
    Some(surface(cp.on_self, cp.on_other, dist_sq))
}

fn is_endpoint(param: Fx) -> bool {
    param == Fx::ZERO || param == Fx::ONE
}
