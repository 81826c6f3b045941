// SPDX-License-Identifier: Apache-2.0
//! One narrow-phase routine per supported shape-kind pair.
//!
//! Every routine is a pure function of its shapes and poses. `None` means the
//! shapes do not touch.

use lockstep_math::Vec3;

use crate::contact::FALLBACK_NORMAL;

mod box_box;
mod box_sphere;
mod capsule_capsule;
mod capsule_sphere;
mod sphere_sphere;
mod sphere_triangle;

pub use box_box::{box_box, MAX_MANIFOLD_CONTACTS};
pub use box_sphere::box_sphere;
pub use capsule_capsule::capsule_capsule;
pub use capsule_sphere::capsule_sphere;
pub use sphere_sphere::sphere_sphere;
pub use sphere_triangle::{closest_point_on_triangle, sphere_triangle};

/// Unit vector along `v`, or [`FALLBACK_NORMAL`] when `v` is degenerate.
fn unit_or_fallback(v: Vec3) -> Vec3 {
    let n = v.normalize();
    if n.is_zero() {
        FALLBACK_NORMAL
    } else {
        n
    }
}
