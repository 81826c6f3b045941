// SPDX-License-Identifier: Apache-2.0
//! Box-box separating-axis test with contact-manifold clipping.
//!
//! The fifteen candidate axes are the three face normals of each box and the
//! nine cross products of their edge directions. All projections run in A's
//! local frame:
//!
//! * `R = Aᵀ·B` is B's rotation seen from A, and `|R|` gets
//!   `parallel_bias` added so nearly parallel edges never cancel out.
//! * `t = Aᵀ·(c_B - c_A)` is the center offset in A's frame.
//!
//! The shallowest overlapping axis wins, biased toward face axes (A before
//! B) by [`NarrowPhaseConfig::anti_b_bias`] and
//! [`NarrowPhaseConfig::anti_edge_bias`].
//!
//! A face winner clips the incident face of the other box against the side
//! planes of the reference face. An edge winner takes closest points between
//! the best candidate edges of each box. More than
//! [`MAX_MANIFOLD_CONTACTS`] points are pruned to an approximately
//! maximal-area quadrilateral that always keeps the deepest point.

use lockstep_math::{Fx, Mat3, Vec3};
use tracing::trace;

use crate::{
    BoxShape, ContactBuffer, ContactRecord, FeatureId, Manifold, NarrowPhaseConfig, Pose,
    SatFeature, Segment,
};

/// Upper bound on contacts in a box-box manifold.
pub const MAX_MANIFOLD_CONTACTS: usize = 4;

/// A quad clipped by four planes gains at most one vertex per plane.
const CLIP_CAPACITY: usize = 8;

/// Feature-id namespaces, kept apart from the box vertex ids `0..8`.
const QUAD_EDGE_BASE: i32 = 8;
const SIDE_PLANE_BASE: i32 = 16;
const EDGE_OWNER: i32 = 2;
const AXIS_IDS: [i32; 3] = [0, 1, 2];

/// Box-box test. Returns `None` when a separating axis exists or when the
/// winning feature produces no penetrating point.
///
/// Swapping `a` and `b` always agrees on whether the boxes overlap, but the
/// bias toward A's faces can pick a different winning axis, so the reported
/// penetration may differ by roughly the larger of `anti_b_bias` and
/// `anti_edge_bias` between the two orders.
pub fn box_box(
    a: &BoxShape,
    pose_a: &Pose,
    b: &BoxShape,
    pose_b: &Pose,
    config: &NarrowPhaseConfig,
) -> Option<Manifold> {
    let frame_a = BoxFrame::new(a, pose_a);
    let frame_b = BoxFrame::new(b, pose_b);
    let axis = separating_axis(&frame_a, &frame_b, config)?;

    let mut contacts = match axis.feature {
        SatFeature::FaceA { .. } => clip_faces(&frame_a, &frame_b, 0, axis.normal),
        SatFeature::FaceB { .. } => clip_faces(&frame_b, &frame_a, 1, -axis.normal),
        SatFeature::Edge { a_axis, b_axis } => {
            edge_contacts(&frame_a, &frame_b, a_axis, b_axis, axis.normal)
        }
    };
    if contacts.len() > MAX_MANIFOLD_CONTACTS {
        contacts = prune(&contacts, axis.normal);
    }
    if contacts.is_empty() {
        return None;
    }
    Some(Manifold {
        normal: axis.normal,
        contacts,
        feature: axis.feature,
    })
}

struct BoxFrame {
    shape: BoxShape,
    center: Vec3,
    axes: Mat3,
    half: Vec3,
}

impl BoxFrame {
    fn new(shape: &BoxShape, pose: &Pose) -> Self {
        Self {
            shape: *shape,
            center: pose.world_center(shape),
            axes: pose.orientation,
            half: shape.half_extents,
        }
    }

    /// World position of corner `id` (see [`BoxShape::corner`]).
    fn corner(&self, id: i32) -> Vec3 {
        self.center + self.axes.transform(&self.shape.corner(id))
    }
}

#[derive(Debug, Clone, Copy)]
struct Axis {
    separation: Fx,
    normal: Vec3,
    feature: SatFeature,
}

fn keep_shallowest(best: &mut Option<Axis>, candidate: Axis) {
    if best.is_none_or(|b| candidate.separation > b.separation) {
        *best = Some(candidate);
    }
}

fn separating_axis(fa: &BoxFrame, fb: &BoxFrame, config: &NarrowPhaseConfig) -> Option<Axis> {
    let r = fa.axes.transpose_multiply(&fb.axes);
    let mut abs_r = [[Fx::ZERO; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            abs_r[i][j] = r.at(i, j).abs() + config.parallel_bias;
        }
    }
    let offset = fb.center - fa.center;
    let t = fa.axes.transpose_transform(&offset);
    let ea = fa.half;
    let eb = fb.half;

    let mut face_a = None;
    for i in 0..3 {
        let rb = eb.x * abs_r[i][0] + eb.y * abs_r[i][1] + eb.z * abs_r[i][2];
        let separation = t.component(i).abs() - (ea.component(i) + rb);
        if separation > Fx::ZERO {
            return None;
        }
        keep_shallowest(
            &mut face_a,
            Axis {
                separation,
                normal: fa.axes.col(i),
                feature: SatFeature::FaceA { axis: i },
            },
        );
    }

    let mut face_b = None;
    for j in 0..3 {
        let tb = t.x * r.at(0, j) + t.y * r.at(1, j) + t.z * r.at(2, j);
        let ra = ea.x * abs_r[0][j] + ea.y * abs_r[1][j] + ea.z * abs_r[2][j];
        let separation = tb.abs() - (ra + eb.component(j));
        if separation > Fx::ZERO {
            return None;
        }
        keep_shallowest(
            &mut face_b,
            Axis {
                separation,
                normal: fb.axes.col(j),
                feature: SatFeature::FaceB { axis: j },
            },
        );
    }

    let mut edge = None;
    for i in 0..3 {
        let (i1, i2) = ((i + 1) % 3, (i + 2) % 3);
        for j in 0..3 {
            let (j1, j2) = ((j + 1) % 3, (j + 2) % 3);
            // A's edge i crossed with B's edge j, in A's frame.
            let local = Vec3::ZERO
                .with_component(i1, -r.at(i2, j))
                .with_component(i2, r.at(i1, j));
            let len = local.length();
            if len < Fx::EPSILON {
                // Parallel edges span no axis; the face axes already cover them.
                continue;
            }
            let ra = ea.component(i1) * abs_r[i2][j] + ea.component(i2) * abs_r[i1][j];
            let rb = eb.component(j1) * abs_r[i][j2] + eb.component(j2) * abs_r[i][j1];
            let projected = t.component(i2) * r.at(i1, j) - t.component(i1) * r.at(i2, j);
            let separation = (projected.abs() - (ra + rb)) / len;
            if separation > Fx::ZERO {
                return None;
            }
            keep_shallowest(
                &mut edge,
                Axis {
                    separation,
                    normal: fa.axes.transform(&local).normalize(),
                    feature: SatFeature::Edge {
                        a_axis: i,
                        b_axis: j,
                    },
                },
            );
        }
    }

    let (Some(face_a), Some(face_b)) = (face_a, face_b) else {
        return None;
    };
    let mut best = if face_b.separation > face_a.separation + config.anti_b_bias {
        face_b
    } else {
        face_a
    };
    if let Some(edge) = edge {
        if edge.separation > best.separation + config.anti_edge_bias {
            best = edge;
        }
    }
    if best.normal.dot(&offset) < Fx::ZERO {
        best.normal = -best.normal;
    }
    Some(best)
}

#[derive(Debug, Clone, Copy, Default)]
struct ClipVertex {
    position: Vec3,
    feature: i32,
    /// Id of the polygon edge leaving this vertex.
    edge: i32,
}

#[derive(Debug, Clone, Copy, Default)]
struct ClipPolygon {
    vertices: [ClipVertex; CLIP_CAPACITY],
    len: usize,
}

impl ClipPolygon {
    fn push(&mut self, vertex: ClipVertex) {
        if let Some(slot) = self.vertices.get_mut(self.len) {
            *slot = vertex;
            self.len += 1;
        }
    }

    fn as_slice(&self) -> &[ClipVertex] {
        &self.vertices[..self.len]
    }
}

/// Builds contacts by clipping the incident face against `reference`'s face
/// most aligned with `n_ref` (which points from `reference` toward `incident`).
fn clip_faces(
    reference: &BoxFrame,
    incident: &BoxFrame,
    ref_owner: i32,
    n_ref: Vec3,
) -> ContactBuffer {
    let (ref_axis, ref_positive) = dominant_axis(&reference.axes.transpose_transform(&n_ref));
    let (inc_axis, aligned) = dominant_axis(&incident.axes.transpose_transform(&n_ref));
    let inc_positive = !aligned;

    let u = (inc_axis + 1) % 3;
    let v = (inc_axis + 2) % 3;
    let mut polygon = ClipPolygon::default();
    for (k, su, sv) in [(0, true, true), (1, false, true), (2, false, false), (3, true, false)] {
        let id = bit(inc_axis, inc_positive) | bit(u, su) | bit(v, sv);
        polygon.push(ClipVertex {
            position: incident.corner(id),
            feature: id,
            edge: QUAD_EDGE_BASE + k,
        });
    }

    let ru = (ref_axis + 1) % 3;
    let rv = (ref_axis + 2) % 3;
    for (axis, positive) in [(ru, true), (ru, false), (rv, true), (rv, false)] {
        let normal = reference.axes.col(axis) * signed(positive, Fx::ONE);
        let plane = SIDE_PLANE_BASE + face_id(axis, positive);
        polygon = clip(
            &polygon,
            normal,
            reference.center,
            reference.half.component(axis),
            plane,
        );
    }

    let face_center = reference.center
        + reference.axes.col(ref_axis) * signed(ref_positive, reference.half.component(ref_axis));
    let ref_face = face_id(ref_axis, ref_positive);
    let inc_face = face_id(inc_axis, inc_positive);
    let mut contacts = ContactBuffer::new();
    for vertex in polygon.as_slice() {
        let depth = n_ref.dot(&(vertex.position - face_center));
        if depth > Fx::ZERO {
            continue;
        }
        let record = ContactRecord::new(
            vertex.position - n_ref * depth,
            depth,
            FeatureId::from_parts(&[ref_owner, ref_face, inc_face, vertex.feature]),
        );
        if contacts.push(record).is_err() {
            break;
        }
    }
    contacts
}

/// One Sutherland-Hodgman pass keeping points with
/// `dot(p - origin, normal) <= limit`.
fn clip(input: &ClipPolygon, normal: Vec3, origin: Vec3, limit: Fx, plane: i32) -> ClipPolygon {
    let mut out = ClipPolygon::default();
    let points = input.as_slice();
    let Some(&last) = points.last() else {
        return out;
    };
    let distance = |p: &Vec3| normal.dot(&(*p - origin)) - limit;

    let mut prev = last;
    let mut prev_dist = distance(&prev.position);
    for &cur in points {
        let cur_dist = distance(&cur.position);
        let crossing = || {
            let s = prev_dist / (prev_dist - cur_dist);
            prev.position + (cur.position - prev.position) * s
        };
        match (prev_dist <= Fx::ZERO, cur_dist <= Fx::ZERO) {
            (true, true) => out.push(cur),
            (true, false) => out.push(ClipVertex {
                position: crossing(),
                feature: FeatureId::from_parts(&[prev.edge, plane]).raw(),
                edge: plane,
            }),
            (false, true) => {
                out.push(ClipVertex {
                    position: crossing(),
                    feature: FeatureId::from_parts(&[plane, prev.edge]).raw(),
                    edge: prev.edge,
                });
                out.push(cur);
            }
            (false, false) => {}
        }
        prev = cur;
        prev_dist = cur_dist;
    }
    out
}

#[derive(Debug, Clone, Copy)]
struct BoxEdge {
    segment: Segment,
    start: i32,
    end: i32,
}

fn edge_contacts(
    fa: &BoxFrame,
    fb: &BoxFrame,
    a_axis: usize,
    b_axis: usize,
    normal: Vec3,
) -> ContactBuffer {
    let a_edges = candidate_edges(fa, a_axis, &normal);
    let b_edges = candidate_edges(fb, b_axis, &-normal);
    let mut contacts = ContactBuffer::new();
    for ea in &a_edges {
        for eb in &b_edges {
            let cp = ea.segment.closest_points(&eb.segment);
            let depth = (cp.on_other - cp.on_self).dot(&normal);
            if depth > Fx::ZERO {
                continue;
            }
            let record = ContactRecord::new(
                (cp.on_self + cp.on_other) * Fx::HALF,
                depth,
                FeatureId::from_parts(&[EDGE_OWNER, ea.start, ea.end, eb.start, eb.end]),
            );
            if contacts.push(record).is_err() {
                return contacts;
            }
        }
    }
    contacts
}

/// The two edges parallel to local `axis` whose midpoints reach furthest
/// along `direction`.
fn candidate_edges(frame: &BoxFrame, axis: usize, direction: &Vec3) -> [BoxEdge; 2] {
    let local = frame.axes.transpose_transform(direction);
    let a1 = (axis + 1) % 3;
    let a2 = (axis + 2) % 3;
    let score = |k: usize| {
        signed(k & 1 != 0, frame.half.component(a1)) * local.component(a1)
            + signed(k & 2 != 0, frame.half.component(a2)) * local.component(a2)
    };
    let mut first = 0;
    for k in 1..4 {
        if score(k) > score(first) {
            first = k;
        }
    }
    let mut second = usize::from(first == 0);
    for k in 0..4 {
        if k != first && score(k) > score(second) {
            second = k;
        }
    }
    [first, second].map(|k| {
        let start = bit(a1, k & 1 != 0) | bit(a2, k & 2 != 0);
        let end = start | bit(axis, true);
        BoxEdge {
            segment: Segment::new(frame.corner(start), frame.corner(end)),
            start,
            end,
        }
    })
}

/// Reduces a manifold to four points: the deepest, the farthest from it, and
/// the two extremes along `normal × (farthest - deepest)`.
fn prune(contacts: &ContactBuffer, normal: Vec3) -> ContactBuffer {
    let points = contacts.as_slice();
    let mut chosen: [Option<usize>; MAX_MANIFOLD_CONTACTS] = [None; MAX_MANIFOLD_CONTACTS];

    chosen[0] = arg_max(points, &chosen, |r| -r.depth);
    let Some(p1) = chosen[0].map(|i| points[i].position) else {
        return *contacts;
    };
    chosen[1] = arg_max(points, &chosen, |r| r.position.distance_squared(&p1));
    let p2 = chosen[1].map_or(p1, |i| points[i].position);
    let axis2 = normal.cross(&(p2 - p1));
    chosen[2] = arg_max(points, &chosen, |r| -axis2.dot(&r.position));
    chosen[3] = arg_max(points, &chosen, |r| axis2.dot(&r.position));

    trace!(from = points.len(), "pruned box-box manifold");
    let mut kept = ContactBuffer::new();
    for i in chosen.into_iter().flatten() {
        if kept.push(points[i]).is_err() {
            break;
        }
    }
    kept
}

/// Index maximizing `key` among points not yet chosen; ties keep the lowest index.
fn arg_max(
    points: &[ContactRecord],
    chosen: &[Option<usize>],
    key: impl Fn(&ContactRecord) -> Fx,
) -> Option<usize> {
    let mut best: Option<(usize, Fx)> = None;
    for (i, record) in points.iter().enumerate() {
        if chosen.contains(&Some(i)) {
            continue;
        }
        let k = key(record);
        if best.is_none_or(|(_, b)| k > b) {
            best = Some((i, k));
        }
    }
    best.map(|(i, _)| i)
}

/// Axis with the largest magnitude (ties keep the lowest) and whether that
/// component is non-negative.
fn dominant_axis(v: &Vec3) -> (usize, bool) {
    let abs = v.abs();
    let mut axis = 0;
    for k in 1..3 {
        if abs.component(k) > abs.component(axis) {
            axis = k;
        }
    }
    (axis, v.component(axis) >= Fx::ZERO)
}

fn face_id(axis: usize, positive: bool) -> i32 {
    AXIS_IDS[axis] * 2 + i32::from(!positive)
}

fn bit(axis: usize, set: bool) -> i32 {
    i32::from(set) << axis
}

fn signed(positive: bool, value: Fx) -> Fx {
    if positive {
        value
    } else {
        -value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(x: i32, y: i32, depth: Fx, id: i32) -> ContactRecord {
        ContactRecord::new(Vec3::from_ints(x, y, 0), depth, FeatureId::from_raw(id))
    }

    #[test]
    fn prune_keeps_deepest_and_spread() {
        let mut buf = ContactBuffer::new();
        let shallow = Fx::from_ratio(-1, 10);
        buf.push(record(0, 0, shallow, 0)).unwrap();
        buf.push(record(2, 0, shallow, 1)).unwrap();
        buf.push(record(1, 1, shallow, 2)).unwrap();
        buf.push(record(-2, 0, Fx::from_ratio(-1, 2), 3)).unwrap();
        buf.push(record(0, 2, shallow, 4)).unwrap();
        buf.push(record(0, -2, shallow, 5)).unwrap();

        let kept = prune(&buf, Vec3::UNIT_Z);
        let ids: Vec<i32> = kept.iter().map(|r| r.id.raw()).collect();
        // deepest (-2,0), farthest (2,0), then the extremes along ±y.
        assert_eq!(ids, vec![3, 1, 5, 4]);
    }

    #[test]
    fn clip_records_crossing_features() {
        let mut square = ClipPolygon::default();
        for (k, x, y) in [(0, 1, 1), (1, -1, 1), (2, -1, -1), (3, 1, -1)] {
            square.push(ClipVertex {
                position: Vec3::from_ints(x, y, 0),
                feature: k,
                edge: QUAD_EDGE_BASE + k,
            });
        }
        let half = clip(&square, Vec3::UNIT_X, Vec3::ZERO, Fx::ZERO, 99);
        let xs: Vec<Fx> = half.as_slice().iter().map(|v| v.position.x).collect();
        assert_eq!(half.len, 4);
        assert!(xs.iter().all(|&x| x <= Fx::ZERO));
        assert!(half.as_slice().iter().any(|v| v.edge == 99));
    }

    #[test]
    fn pruned_octagon_keeps_its_deepest_point() {
        let cube = BoxShape::new(Vec3::from_ints(1, 1, 1));
        let tilt =
            Mat3::rotation_x(Fx::from_ratio(1, 20)) * Mat3::rotation_y(Fx::HALF_PI * Fx::HALF);
        let fa = BoxFrame::new(&cube, &Pose::identity());
        let fb = BoxFrame::new(
            &cube,
            &Pose::new(tilt, Vec3::new(Fx::ZERO, Fx::from_ratio(19, 10), Fx::ZERO)),
        );
        let raw = clip_faces(&fa, &fb, 0, Vec3::UNIT_Y);
        assert!(raw.len() > MAX_MANIFOLD_CONTACTS);
        let kept = prune(&raw, Vec3::UNIT_Y);
        assert_eq!(kept.len(), MAX_MANIFOLD_CONTACTS);
        assert_eq!(kept.deepest(), raw.deepest());
    }

    #[test]
    fn touching_edges_are_kept_at_zero_depth() {
        let cube = BoxShape::new(Vec3::from_ints(1, 1, 1));
        let fa = BoxFrame::new(&cube, &Pose::identity());
        let fb = BoxFrame::new(&cube, &Pose::from_position(Vec3::from_ints(0, 2, 0)));
        let contacts = edge_contacts(&fa, &fb, 0, 2, Vec3::UNIT_Y);
        assert_eq!(contacts.len(), 4);
        assert!(contacts.iter().all(|r| r.depth == Fx::ZERO));
        assert!(contacts.iter().all(|r| r.position.y == Fx::ONE));
    }

    #[test]
    fn dominant_axis_breaks_ties_low() {
        assert_eq!(dominant_axis(&Vec3::from_ints(1, -1, 1)), (0, true));
        assert_eq!(dominant_axis(&Vec3::from_ints(0, -3, 1)), (1, false));
    }
}
