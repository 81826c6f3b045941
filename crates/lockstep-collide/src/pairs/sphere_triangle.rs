// SPDX-License-Identifier: Apache-2.0
use lockstep_math::{Fx, Vec3};

use crate::{Contact, Pose, Segment, SphereShape, SphereTriangleMode, TriangleShape};

use super::unit_or_fallback;

/// Sphere (A) against triangle (B) using the routine selected by `mode`.
pub fn sphere_triangle(
    sphere: &SphereShape,
    pose_sphere: &Pose,
    triangle: &TriangleShape,
    pose_triangle: &Pose,
    mode: SphereTriangleMode,
) -> Option<Contact> {
    let center = pose_sphere.world_center(sphere);
    let vertices = triangle.world_vertices(pose_triangle);
    match mode {
        SphereTriangleMode::Closest => closest(center, sphere.radius, vertices),
        SphereTriangleMode::Defensive => defensive(center, sphere.radius, vertices),
    }
}

fn closest(center: Vec3, radius: Fx, [v0, v1, v2]: [Vec3; 3]) -> Option<Contact> {
    let on_triangle = closest_point_on_triangle(&center, &v0, &v1, &v2);
    let delta = on_triangle - center;
    let dist_sq = delta.length_squared();
    if dist_sq > radius * radius {
        return None;
    }
    let face = (v1 - v0).cross(&(v2 - v0)).normalize();
    let normal = if face.is_zero() {
        unit_or_fallback(delta)
    } else if face.dot(&(center - on_triangle)) < Fx::ZERO {
        // winding faces away from the sphere
        face
    } else {
        -face
    };
    Some(Contact::new(
        center + normal * radius,
        on_triangle,
        normal,
        radius - dist_sq.sqrt(),
    ))
}

fn defensive(center: Vec3, radius: Fx, vertices: [Vec3; 3]) -> Option<Contact> {
    let [v0, v1, v2] = vertices;
    let face = (v1 - v0).cross(&(v2 - v0)).normalize();
    if face.is_zero() {
        return closest(center, radius, vertices);
    }
    let height = (center - v0).dot(&face);
    if height.abs() > radius {
        return None;
    }
    // Two-sided: the plane normal on the sphere's side.
    let toward_sphere = if height < Fx::ZERO { -face } else { face };
    let projected = center - face * height;

    let edges = [(v0, v1), (v1, v2), (v2, v0)];
    let inside = edges
        .iter()
        .all(|&(from, to)| (to - from).cross(&face).dot(&(projected - from)) <= Fx::ZERO);
    if inside {
        let normal = -toward_sphere;
        return Some(Contact::new(
            center + normal * radius,
            projected,
            normal,
            radius - height.abs(),
        ));
    }

    // Outside the face region: the nearest edge contact capsule decides.
    let mut best: Option<(Fx, Vec3)> = None;
    for (from, to) in edges {
        let (_, on_edge) = Segment::new(from, to).closest_point_to(&center);
        let dist_sq = center.distance_squared(&on_edge);
        if best.is_none_or(|(d, _)| dist_sq < d) {
            best = Some((dist_sq, on_edge));
        }
    }
    let (dist_sq, on_edge) = best?;
    if dist_sq > radius * radius {
        return None;
    }
    let direction = (on_edge - center).normalize();
    let normal = if direction.is_zero() {
        -toward_sphere
    } else {
        direction
    };
    Some(Contact::new(
        center + normal * radius,
        on_edge,
        normal,
        radius - dist_sq.sqrt(),
    ))
}

/// Closest point on triangle `(a, b, c)` to `p` by Voronoi regions.
pub fn closest_point_on_triangle(p: &Vec3, a: &Vec3, b: &Vec3, c: &Vec3) -> Vec3 {
    let ab = *b - *a;
    let ac = *c - *a;

    let ap = *p - *a;
    let d1 = ab.dot(&ap);
    let d2 = ac.dot(&ap);
    if d1 <= Fx::ZERO && d2 <= Fx::ZERO {
        return *a;
    }

    let bp = *p - *b;
    let d3 = ab.dot(&bp);
    let d4 = ac.dot(&bp);
    if d3 >= Fx::ZERO && d4 <= d3 {
        return *b;
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= Fx::ZERO && d1 >= Fx::ZERO && d3 <= Fx::ZERO {
        return *a + ab * (d1 / (d1 - d3));
    }

    let cp = *p - *c;
    let d5 = ab.dot(&cp);
    let d6 = ac.dot(&cp);
    if d6 >= Fx::ZERO && d5 <= d6 {
        return *c;
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= Fx::ZERO && d2 >= Fx::ZERO && d6 <= Fx::ZERO {
        return *a + ac * (d2 / (d2 - d6));
    }

    let va = d3 * d6 - d5 * d4;
    let bc_start = d4 - d3;
    let bc_end = d5 - d6;
    if va <= Fx::ZERO && bc_start >= Fx::ZERO && bc_end >= Fx::ZERO {
        return *b + (*c - *b) * (bc_start / (bc_start + bc_end));
    }

    let denom = va + vb + vc;
    *a + ab * (vb / denom) + ac * (vc / denom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri() -> [Vec3; 3] {
        [
            Vec3::from_ints(0, 0, 0),
            Vec3::from_ints(4, 0, 0),
            Vec3::from_ints(0, 4, 0),
        ]
    }

    #[test]
    fn voronoi_regions() {
        let [a, b, c] = tri();
        let q = |p: Vec3| closest_point_on_triangle(&p, &a, &b, &c);
        assert_eq!(q(Vec3::from_ints(-1, -1, 3)), a);
        assert_eq!(q(Vec3::from_ints(6, -1, 0)), b);
        assert_eq!(q(Vec3::from_ints(-1, 6, 0)), c);
        assert_eq!(q(Vec3::from_ints(2, -3, 1)), Vec3::from_ints(2, 0, 0));
        assert_eq!(q(Vec3::from_ints(1, 1, 5)), Vec3::from_ints(1, 1, 0));
        assert_eq!(q(Vec3::from_ints(3, 3, 0)), Vec3::from_ints(2, 2, 0));
    }

    #[test]
    fn defensive_is_two_sided() {
        let r = Fx::ONE;
        let above = defensive(Vec3::new(Fx::ONE, Fx::ONE, Fx::HALF), r, tri()).unwrap();
        let below = defensive(Vec3::new(Fx::ONE, Fx::ONE, -Fx::HALF), r, tri()).unwrap();
        assert_eq!(above.normal, -Vec3::UNIT_Z);
        assert_eq!(below.normal, Vec3::UNIT_Z);
        assert_eq!(above.penetration, Fx::HALF);
        assert_eq!(below.penetration, Fx::HALF);
    }

    #[test]
    fn defensive_uses_edges_outside_face() {
        let c = Vec3::new(Fx::from_int(2), -Fx::HALF, Fx::ZERO);
        let contact = defensive(c, Fx::ONE, tri()).unwrap();
        assert_eq!(contact.point_b, Vec3::from_ints(2, 0, 0));
        assert_eq!(contact.normal, Vec3::UNIT_Y);
        assert_eq!(contact.penetration, Fx::HALF);
        assert!(defensive(Vec3::from_ints(2, -2, 0), Fx::ONE, tri()).is_none());
    }
}
