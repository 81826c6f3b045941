// SPDX-License-Identifier: Apache-2.0
use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::fixed_q32_32::{self as q, FRAC_BITS, ONE_RAW};
use crate::trig;

/// Deterministic fixed-point scalar with Q32.32 encoding stored in an `i64`.
///
/// ```text
/// real_value = raw / 2^32
/// ```
///
/// # Determinism contract
///
/// - Addition, subtraction, and negation saturate at `MIN`/`MAX`.
/// - Multiplication and division round to nearest, ties to even.
/// - Division by zero saturates toward the sign of the numerator; `0 / 0` is `0`.
/// - `sqrt` returns the exact floor of the true root at Q32.32 resolution.
///
/// # Examples
/// ```
/// use lockstep_math::Fx;
/// let a = Fx::from_int(3);
/// let b = Fx::from_ratio(1, 2);
/// assert_eq!(a * b, Fx::from_ratio(3, 2));
/// assert_eq!(Fx::from_int(9).sqrt(), a);
/// ```
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fx {
    raw: i64,
}

impl Fx {
    /// `0`.
    pub const ZERO: Self = Self { raw: 0 };
    /// `1`.
    pub const ONE: Self = Self { raw: ONE_RAW };
    /// `-1`.
    pub const NEG_ONE: Self = Self { raw: -ONE_RAW };
    /// `0.5`.
    pub const HALF: Self = Self { raw: ONE_RAW / 2 };
    /// `2`.
    pub const TWO: Self = Self { raw: ONE_RAW * 2 };
    /// Largest representable value.
    pub const MAX: Self = Self { raw: i64::MAX };
    /// Smallest representable value.
    pub const MIN: Self = Self { raw: i64::MIN };
    /// Degeneracy threshold (`≈ 0.001`) used by geometric routines.
    ///
    /// This is not numeric precision: quantities at or below it are treated
    /// as zero-length so degenerate configurations resolve deterministically.
    pub const EPSILON: Self = Self { raw: 4_294_967 };
    /// π.
    pub const PI: Self = Self { raw: trig::PI_RAW };
    /// π / 2.
    pub const HALF_PI: Self = Self { raw: trig::HALF_PI_RAW };
    /// 2π.
    pub const TWO_PI: Self = Self { raw: trig::TWO_PI_RAW };

    /// Constructs a value from its raw Q32.32 integer (exact, no scaling).
    pub const fn from_raw(raw: i64) -> Self {
        Self { raw }
    }

    /// Returns the raw Q32.32 storage value.
    pub const fn raw(self) -> i64 {
        self.raw
    }

    /// Constructs a value from an integer (exact for every `i32`).
    pub fn from_int(n: i32) -> Self {
        Self::from_raw(i64::from(n) << FRAC_BITS)
    }

    /// Constructs `num / den` with ties-to-even rounding.
    ///
    /// This is the preferred way to author non-integer constants because it
    /// never touches floating point.
    pub fn from_ratio(num: i32, den: i32) -> Self {
        Self::from_int(num) / Self::from_int(den)
    }

    /// Converts from `f32` (boundary use only: authoring data and tests).
    ///
    /// `NaN` maps to zero and infinities saturate.
    pub fn from_f32(value: f32) -> Self {
        Self::from_raw(q::from_f32(value))
    }

    /// Converts to the nearest `f32` for diagnostics and rendering.
    pub fn to_f32(self) -> f32 {
        q::to_f32(self.raw)
    }

    /// Absolute value (saturates `MIN` to `MAX`).
    pub fn abs(self) -> Self {
        Self::from_raw(self.raw.saturating_abs())
    }

    /// Returns `-1`, `0`, or `1` according to the sign of `self`.
    pub fn signum(self) -> Self {
        match self.raw.signum() {
            0 => Self::ZERO,
            1 => Self::ONE,
            _ => Self::NEG_ONE,
        }
    }

    /// Square root; negative inputs yield zero.
    pub fn sqrt(self) -> Self {
        Self::from_raw(q::sqrt(self.raw))
    }

    /// Smaller of two values.
    pub fn min(self, other: Self) -> Self {
        Ord::min(self, other)
    }

    /// Larger of two values.
    pub fn max(self, other: Self) -> Self {
        Ord::max(self, other)
    }

    /// Clamps to the range spanned by `lo` and `hi`; swapped bounds are
    /// reordered.
    pub fn clamp(self, lo: Self, hi: Self) -> Self {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        self.max(lo).min(hi)
    }

    /// Sine of `self` in radians.
    pub fn sin(self) -> Self {
        self.sin_cos().0
    }

    /// Cosine of `self` in radians.
    pub fn cos(self) -> Self {
        self.sin_cos().1
    }

    /// Sine and cosine of `self` in radians, sharing one range reduction.
    pub fn sin_cos(self) -> (Self, Self) {
        let (s, c) = trig::sin_cos(self.raw);
        (Self::from_raw(s), Self::from_raw(c))
    }
}

impl Add for Fx {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::from_raw(self.raw.saturating_add(rhs.raw))
    }
}

impl Sub for Fx {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::from_raw(self.raw.saturating_sub(rhs.raw))
    }
}

impl Mul for Fx {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::from_raw(q::mul(self.raw, rhs.raw))
    }
}

impl Div for Fx {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        Self::from_raw(q::div(self.raw, rhs.raw))
    }
}

impl Neg for Fx {
    type Output = Self;
    fn neg(self) -> Self {
        Self::from_raw(self.raw.saturating_neg())
    }
}

impl AddAssign for Fx {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Fx {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for Fx {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl DivAssign for Fx {
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl Sum for Fx {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<i32> for Fx {
    fn from(n: i32) -> Self {
        Self::from_int(n)
    }
}

/// Exact decimal rendering with nine fractional digits.
///
/// The digits are produced with integer arithmetic only, so two machines
/// holding the same raw value always print the same string. Checksums rely
/// on this.
impl fmt::Display for Fx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SCALE: u128 = 1_000_000_000;
        let abs = u128::from(self.raw.unsigned_abs());
        let int_part = abs >> FRAC_BITS;
        let frac_raw = abs & (u128::from(u32::MAX));
        let frac = q::round_shift_right(frac_raw * SCALE, FRAC_BITS);
        // Rounding the fraction may carry into the integer part.
        let (int_part, frac) = if frac >= SCALE {
            (int_part + 1, frac - SCALE)
        } else {
            (int_part, frac)
        };
        let sign = if self.raw < 0 { "-" } else { "" };
        write!(f, "{sign}{int_part}.{frac:09}")
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Fx {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.raw.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Fx {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        i64::deserialize(deserializer).map(Self::from_raw)
    }
}
