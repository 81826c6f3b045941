// SPDX-License-Identifier: Apache-2.0
use lockstep_math::{Fx, Vec3};

use crate::{BoxShape, Contact, Pose, SphereShape};

/// Box (A) against sphere (B).
///
/// The sphere center is clamped to the box in box-local space. When the
/// center lies inside the box (or within `Fx::EPSILON` of its surface) the
/// clamp gives no direction, and the contact is pushed out through the
/// nearest face instead.
pub fn box_sphere(
    shape: &BoxShape,
    pose_box: &Pose,
    sphere: &SphereShape,
    pose_sphere: &Pose,
) -> Option<Contact> {
    let box_center = pose_box.world_center(shape);
    let center = pose_sphere.world_center(sphere);
    let radius = sphere.radius;
    let e = shape.half_extents;
    let local = pose_box
        .orientation
        .transpose_transform(&(center - box_center));
    let clamped = Vec3::new(
        local.x.clamp(-e.x, e.x),
        local.y.clamp(-e.y, e.y),
        local.z.clamp(-e.z, e.z),
    );

    if clamped != local {
        let delta = local - clamped;
        let dist_sq = delta.length_squared();
        if dist_sq > radius * radius {
            return None;
        }
        let local_normal = delta.normalize();
        if !local_normal.is_zero() {
            let normal = pose_box.orientation.transform(&local_normal);
            return Some(Contact::new(
                box_center + pose_box.orientation.transform(&clamped),
                center - normal * radius,
                normal,
                radius - dist_sq.sqrt(),
            ));
        }
    }

    // Deep penetration: leave through the face with the smallest gap.
    let gaps = e - local.abs();
    let axis = gaps.min_component_axis();
    let sign = if local.component(axis) >= Fx::ZERO {
        Fx::ONE
    } else {
        Fx::NEG_ONE
    };
    let normal = pose_box
        .orientation
        .transform(&Vec3::ZERO.with_component(axis, sign));
    let on_face = local.with_component(axis, sign * e.component(axis));
    Some(Contact::new(
        box_center + pose_box.orientation.transform(&on_face),
        center - normal * radius,
        normal,
        gaps.component(axis) + radius,
    ))
}
