// SPDX-License-Identifier: Apache-2.0
//! Deterministic sine/cosine over raw Q32.32 values.
//!
//! Arguments are reduced to `[-π/2, π/2]` and evaluated with a fixed-length
//! Taylor series in Horner form. The truncation error on the reduced range is
//! below `1e-7`, well under the collision epsilon, and the evaluation uses only
//! integer multiplies and divides so it is identical on every platform.

use crate::fixed_q32_32::{self as q, ONE_RAW};

pub(crate) const PI_RAW: i64 = 13_493_037_705;
pub(crate) const HALF_PI_RAW: i64 = 6_746_518_852;
pub(crate) const TWO_PI_RAW: i64 = 26_986_075_409;

/// Horner denominators `(2k)(2k+1)` for the sine series.
const SIN_STEPS: [i64; 6] = [156, 110, 72, 42, 20, 6];
/// Horner denominators `(2k-1)(2k)` for the cosine series.
const COS_STEPS: [i64; 7] = [182, 132, 90, 56, 30, 12, 2];

/// Reduces `angle` into `[-π/2, π/2]`, returning the reduced angle and whether
/// the cosine must be negated.
fn reduce(angle: i64) -> (i64, bool) {
    // Wrap to [-π, π] with a whole-turn count computed in i128.
    let turns = (i128::from(angle) + i128::from(PI_RAW)).div_euclid(i128::from(TWO_PI_RAW));
    let wrapped = q::saturate(i128::from(angle) - turns * i128::from(TWO_PI_RAW));
    if wrapped > HALF_PI_RAW {
        (PI_RAW - wrapped, true)
    } else if wrapped < -HALF_PI_RAW {
        (-PI_RAW - wrapped, true)
    } else {
        (wrapped, false)
    }
}

fn series(r2: i64, steps: &[i64]) -> i64 {
    let mut acc = ONE_RAW;
    for &d in steps {
        acc = ONE_RAW - q::div(q::mul(r2, acc), d * ONE_RAW);
    }
    acc
}

/// Returns `(sin(angle), cos(angle))` as raw Q32.32 values.
pub(crate) fn sin_cos(angle: i64) -> (i64, i64) {
    let (r, flip_cos) = reduce(angle);
    let r2 = q::mul(r, r);
    let s = q::mul(r, series(r2, &SIN_STEPS));
    let c = series(r2, &COS_STEPS);
    (s, if flip_cos { -c } else { c })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(raw: i64, expected: f64) -> bool {
        #[allow(clippy::cast_precision_loss)]
        let v = raw as f64 / 4_294_967_296.0;
        (v - expected).abs() < 1e-6
    }

    #[test]
    fn quadrant_values() {
        let (s, c) = sin_cos(0);
        assert_eq!(s, 0);
        assert_eq!(c, ONE_RAW);
        let (s, c) = sin_cos(HALF_PI_RAW);
        assert!(close(s, 1.0) && close(c, 0.0));
        let (s, c) = sin_cos(PI_RAW);
        assert!(close(s, 0.0) && close(c, -1.0));
        let (s, c) = sin_cos(-HALF_PI_RAW);
        assert!(close(s, -1.0) && close(c, 0.0));
    }

    #[test]
    fn reduction_handles_multiple_turns() {
        let (s0, c0) = sin_cos(ONE_RAW);
        let (s1, c1) = sin_cos(ONE_RAW + 3 * TWO_PI_RAW);
        assert!((s0 - s1).abs() < 64);
        assert!((c0 - c1).abs() < 64);
        assert!(close(s0, 1.0_f64.sin()));
        assert!(close(c0, 1.0_f64.cos()));
    }
}
