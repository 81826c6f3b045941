// SPDX-License-Identifier: Apache-2.0
use crate::{CapsuleShape, Contact, Pose, SphereShape};

use super::unit_or_fallback;

/// Capsule (A) against sphere (B): closest point on the capsule core segment
/// followed by a radius-sum test.
pub fn capsule_sphere(
    capsule: &CapsuleShape,
    pose_capsule: &Pose,
    sphere: &SphereShape,
    pose_sphere: &Pose,
) -> Option<Contact> {
    let segment = capsule.segment(pose_capsule);
    let center = pose_sphere.world_center(sphere);
    let (_, on_core) = segment.closest_point_to(&center);
    let delta = center - on_core;
    let radii = capsule.radius + sphere.radius;
    let dist_sq = delta.length_squared();
    if dist_sq > radii * radii {
        return None;
    }
    let normal = unit_or_fallback(delta);
    Some(Contact::new(
        on_core + normal * capsule.radius,
        center - normal * sphere.radius,
        normal,
        radii - dist_sq.sqrt(),
    ))
}
