// SPDX-License-Identifier: Apache-2.0

#![allow(missing_docs)]
use lockstep_collide::Segment;
use lockstep_math::{Fx, Vec3};

fn seg(a: (i32, i32, i32), b: (i32, i32, i32)) -> Segment {
    Segment::new(Vec3::from_ints(a.0, a.1, a.2), Vec3::from_ints(b.0, b.1, b.2))
}

#[test]
fn parallel_overlap_reports_the_midpoint() {
    let a = seg((0, 0, 0), (4, 0, 0));
    let b = seg((2, 1, 0), (6, 1, 0));
    let cp = a.closest_points(&b);
    assert_eq!(cp.on_other, Vec3::from_ints(3, 1, 0));
    assert_eq!(cp.on_self, Vec3::from_ints(3, 0, 0));
    assert_eq!(cp.t, Fx::from_ratio(1, 4));
    assert_eq!(cp.s, Fx::from_ratio(3, 4));
    assert_eq!(cp.distance_squared(), Fx::ONE);
}

#[test]
fn parallel_disjoint_clamps_to_near_ends() {
    let a = seg((0, 0, 0), (1, 0, 0));
    let b = seg((3, 1, 0), (5, 1, 0));
    let cp = a.closest_points(&b);
    assert_eq!(cp.on_self, Vec3::from_ints(1, 0, 0));
    assert_eq!(cp.on_other, Vec3::from_ints(3, 1, 0));
}

#[test]
fn perpendicular_segments_cross() {
    let a = seg((-1, 0, 0), (1, 0, 0));
    let b = seg((0, -1, 1), (0, 1, 1));
    let cp = a.closest_points(&b);
    assert_eq!(cp.s, Fx::HALF);
    assert_eq!(cp.t, Fx::HALF);
    assert_eq!(cp.on_self, Vec3::ZERO);
    assert_eq!(cp.on_other, Vec3::UNIT_Z);
    assert!(a.intersect(&b).is_none());

    let touching = seg((0, -1, 0), (0, 1, 0));
    let hit = a.intersect(&touching).unwrap();
    assert_eq!(hit.on_self, Vec3::ZERO);
}

#[test]
fn parameters_are_clamped() {
    let a = seg((0, 0, 0), (1, 0, 0));
    let b = seg((3, -1, 0), (3, 1, 0));
    let cp = a.closest_points(&b);
    assert_eq!(cp.s, Fx::ONE);
    assert_eq!(cp.t, Fx::HALF);
    assert_eq!(cp.on_self, Vec3::from_ints(1, 0, 0));
    assert_eq!(cp.on_other, Vec3::from_ints(3, 0, 0));
}

#[test]
fn degenerate_segments_act_as_points() {
    let point = seg((2, 2, 0), (2, 2, 0));
    let line = seg((0, 0, 0), (4, 0, 0));
    let cp = point.closest_points(&line);
    assert_eq!(cp.on_self, Vec3::from_ints(2, 2, 0));
    assert_eq!(cp.on_other, Vec3::from_ints(2, 0, 0));
    assert_eq!(point.closest_point_to(&Vec3::ZERO), (Fx::ZERO, point.start));
    assert_eq!(line.distance_squared_to(&Vec3::from_ints(6, 0, 0)), Fx::from_int(4));
    assert_eq!(line.distance_squared_to(&Vec3::from_ints(1, 3, 0)), Fx::from_int(9));
}
