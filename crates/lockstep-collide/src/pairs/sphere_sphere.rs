// SPDX-License-Identifier: Apache-2.0
use crate::{Contact, Pose, SphereShape};

use super::unit_or_fallback;

/// Sphere against sphere.
///
/// Touching spheres (distance equal to the radius sum) report a contact with
/// zero penetration.
pub fn sphere_sphere(
    a: &SphereShape,
    pose_a: &Pose,
    b: &SphereShape,
    pose_b: &Pose,
) -> Option<Contact> {
    let center_a = pose_a.world_center(a);
    let center_b = pose_b.world_center(b);
    let delta = center_b - center_a;
    let radii = a.radius + b.radius;
    let dist_sq = delta.length_squared();
    if dist_sq > radii * radii {
        return None;
    }
    let normal = unit_or_fallback(delta);
    Some(Contact::new(
        center_a + normal * a.radius,
        center_b - normal * b.radius,
        normal,
        radii - dist_sq.sqrt(),
    ))
}
