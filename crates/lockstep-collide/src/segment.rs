// SPDX-License-Identifier: Apache-2.0
//! Finite line segments and closest-point queries.

use lockstep_math::{Fx, Vec3};

/// Segment between two endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Segment {
    /// Endpoint at parameter 0.
    pub start: Vec3,
    /// Endpoint at parameter 1.
    pub end: Vec3,
}

/// Result of [`Segment::closest_points`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosestPoints {
    /// Parameter in `[0, 1]` on the first segment.
    pub s: Fx,
    /// Parameter in `[0, 1]` on the second segment.
    pub t: Fx,
    /// Closest point on the first segment.
    pub on_self: Vec3,
    /// Closest point on the second segment.
    pub on_other: Vec3,
}

impl ClosestPoints {
    /// Squared distance between the two closest points.
    pub fn distance_squared(&self) -> Fx {
        self.on_self.distance_squared(&self.on_other)
    }
}

impl Segment {
    /// Creates a segment.
    pub const fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }

    /// `end - start`.
    pub fn direction(&self) -> Vec3 {
        self.end - self.start
    }

    /// Point at parameter `s` (unclamped).
    pub fn point_at(&self, s: Fx) -> Vec3 {
        self.start + self.direction() * s
    }

    /// Closest point on the segment to `p`, with its clamped parameter.
    pub fn closest_point_to(&self, p: &Vec3) -> (Fx, Vec3) {
        let dir = self.direction();
        let len_sq = dir.length_squared();
        if len_sq < Fx::EPSILON {
            return (Fx::ZERO, self.start);
        }
        let s = dir.dot(&(*p - self.start)) / len_sq;
        if s <= Fx::ZERO {
            (Fx::ZERO, self.start)
        } else if s >= Fx::ONE {
            (Fx::ONE, self.end)
        } else {
            (s, self.point_at(s))
        }
    }

    /// Squared distance from `p` to the segment.
    pub fn distance_squared_to(&self, p: &Vec3) -> Fx {
        let dir = self.direction();
        let from_start = *p - self.start;
        let e = from_start.dot(&dir);
        if e <= Fx::ZERO {
            return from_start.length_squared();
        }
        let f = dir.length_squared();
        if e >= f {
            return (*p - self.end).length_squared();
        }
        from_start.length_squared() - e * e / f
    }

    /// Closest points between `self` and `other`, parameters clamped to `[0, 1]`.
    ///
    /// Parallel segments that overlap along their shared direction report the
    /// midpoint of the overlapping range.
    pub fn closest_points(&self, other: &Self) -> ClosestPoints {
        let d1 = self.direction();
        let d2 = other.direction();
        let r = self.start - other.start;
        let a = d1.length_squared();
        let e = d2.length_squared();
        let f = d2.dot(&r);

        let (s, t) = if a < Fx::EPSILON && e < Fx::EPSILON {
            (Fx::ZERO, Fx::ZERO)
        } else if a < Fx::EPSILON {
            (Fx::ZERO, unit_clamp(f / e))
        } else {
            let c = d1.dot(&r);
            if e < Fx::EPSILON {
                (unit_clamp(-c / a), Fx::ZERO)
            } else {
                let b = d1.dot(&d2);
                let denom = a * e - b * b;
                if denom < Fx::EPSILON {
                    match self.parallel_params(other, &d2, e) {
                        Parallel::Clamped(s, t) => (s, t),
                        Parallel::Overlap(on_other, t) => {
                            let (s, on_self) = self.closest_point_to(&on_other);
                            return ClosestPoints {
                                s,
                                t,
                                on_self,
                                on_other,
                            };
                        }
                    }
                } else {
                    let mut s = unit_clamp((b * f - c * e) / denom);
                    let mut t = (b * s + f) / e;
                    if t < Fx::ZERO {
                        t = Fx::ZERO;
                        s = unit_clamp(-c / a);
                    } else if t > Fx::ONE {
                        t = Fx::ONE;
                        s = unit_clamp((b - c) / a);
                    }
                    (s, t)
                }
            }
        };

        ClosestPoints {
            s,
            t,
            on_self: self.point_at(s),
            on_other: other.point_at(t),
        }
    }

    /// Closest points when they lie within `Fx::EPSILON` of each other.
    pub fn intersect(&self, other: &Self) -> Option<ClosestPoints> {
        let cp = self.closest_points(other);
        (cp.distance_squared() < Fx::EPSILON).then_some(cp)
    }

    fn parallel_params(&self, other: &Self, d2: &Vec3, e: Fx) -> Parallel {
        let mut a1 = d2.dot(&self.start);
        let mut a2 = d2.dot(&self.end);
        let b1 = d2.dot(&other.start);
        let b2 = d2.dot(&other.end);
        if a1 <= b1 && a2 <= b1 {
            // self lies entirely before other
            let s = if a2 > a1 { Fx::ONE } else { Fx::ZERO };
            return Parallel::Clamped(s, Fx::ZERO);
        }
        if a1 >= b2 && a2 >= b2 {
            let s = if a2 > a1 { Fx::ZERO } else { Fx::ONE };
            return Parallel::Clamped(s, Fx::ONE);
        }
        if a1 > a2 {
            core::mem::swap(&mut a1, &mut a2);
        }
        let mid = (a2.min(b2) + a1.max(b1)) * Fx::HALF;
        let t = (mid - b1) / e;
        Parallel::Overlap(other.point_at(t), t)
    }
}

enum Parallel {
    Clamped(Fx, Fx),
    Overlap(Vec3, Fx),
}

fn unit_clamp(v: Fx) -> Fx {
    v.clamp(Fx::ZERO, Fx::ONE)
}
