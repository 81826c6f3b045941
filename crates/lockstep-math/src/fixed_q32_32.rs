// SPDX-License-Identifier: Apache-2.0
//! Raw Q32.32 helpers shared by [`crate::Fx`].
//!
//! The representation is an `i64` storing an integer scaled by `2^32`:
//! `real_value = raw / 2^32`. Everything here operates on raw integers so the
//! scalar type stays a thin wrapper.

/// Number of fractional bits.
pub(crate) const FRAC_BITS: u32 = 32;

/// Raw value of `1.0`.
pub(crate) const ONE_RAW: i64 = 1_i64 << FRAC_BITS;

/// Shifts `value` right by `shift` bits, rounding to nearest with ties to even.
pub(crate) fn round_shift_right(value: u128, shift: u32) -> u128 {
    if shift == 0 {
        return value;
    }
    if shift >= 128 {
        return 0;
    }
    let q = value >> shift;
    let r = value & ((1_u128 << shift) - 1);
    let half = 1_u128 << (shift - 1);
    if r > half || (r == half && (q & 1) == 1) {
        q + 1
    } else {
        q
    }
}

/// Clamps an `i128` intermediate into the `i64` range.
pub(crate) fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value.is_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// Applies `negative` as a sign to an unsigned magnitude and saturates.
fn signed(magnitude: u128, negative: bool) -> i64 {
    let m = i128::try_from(magnitude).unwrap_or(i128::MAX);
    saturate(if negative { -m } else { m })
}

/// `a * b` in Q32.32 with ties-to-even rounding.
pub(crate) fn mul(a: i64, b: i64) -> i64 {
    let prod = i128::from(a) * i128::from(b);
    let rounded = round_shift_right(prod.unsigned_abs(), FRAC_BITS);
    signed(rounded, prod.is_negative())
}

/// `a / b` in Q32.32 with ties-to-even rounding.
///
/// Division by zero saturates toward the sign of `a`; `0 / 0` is `0`.
pub(crate) fn div(a: i64, b: i64) -> i64 {
    if b == 0 {
        return match a.signum() {
            0 => 0,
            1 => i64::MAX,
            _ => i64::MIN,
        };
    }
    let num = u128::from(a.unsigned_abs()) << FRAC_BITS;
    let den = u128::from(b.unsigned_abs());
    let q = num / den;
    let r = num % den;
    let twice_r = r.saturating_mul(2);
    let rounded = if twice_r > den || (twice_r == den && (q & 1) == 1) {
        q.saturating_add(1)
    } else {
        q
    };
    signed(rounded, (a < 0) ^ (b < 0))
}

/// Floor of the square root of a Q32.32 value (negative inputs map to `0`).
///
/// `sqrt(raw / 2^32) * 2^32 = sqrt(raw * 2^32)`, so the integer square root
/// of the widened value is the raw result.
pub(crate) fn sqrt(raw: i64) -> i64 {
    if raw <= 0 {
        return 0;
    }
    let n = u128::from(raw.unsigned_abs()) << FRAC_BITS;
    // Newton iteration from an upper bound converges monotonically downward.
    let bits = 128 - n.leading_zeros();
    let mut x = 1_u128 << bits.div_ceil(2);
    loop {
        let y = (x + n / x) >> 1;
        if y >= x {
            break;
        }
        x = y;
    }
    signed(x, false)
}

/// Deterministically converts an `f32` to raw Q32.32.
///
/// `NaN` maps to `0`; infinities saturate; rounding is ties-to-even.
pub(crate) fn from_f32(value: f32) -> i64 {
    if value.is_nan() {
        return 0;
    }
    if value.is_infinite() {
        return if value.is_sign_positive() {
            i64::MAX
        } else {
            i64::MIN
        };
    }
    let bits = value.to_bits();
    let negative = (bits >> 31) != 0;
    let exp_field = i32::try_from((bits >> 23) & 0xff).unwrap_or(0);
    let mant = bits & 0x007f_ffff;
    if exp_field == 0 && mant == 0 {
        return 0;
    }
    let (mantissa, unbiased) = if exp_field == 0 {
        (u128::from(mant), -126)
    } else {
        (u128::from((1_u32 << 23) | mant), exp_field - 127)
    };
    // value * 2^32 = mantissa * 2^(unbiased - 23 + 32)
    let shift = unbiased + 9;
    let magnitude = if shift >= 0 {
        let s = shift.unsigned_abs();
        if s > 103 {
            u128::MAX
        } else {
            mantissa << s
        }
    } else {
        round_shift_right(mantissa, shift.unsigned_abs())
    };
    signed(magnitude, negative)
}

/// Deterministically converts raw Q32.32 to the nearest `f32` (ties-to-even).
pub(crate) fn to_f32(raw: i64) -> f32 {
    let abs = raw.unsigned_abs();
    if abs == 0 {
        return 0.0;
    }
    let top = 63 - abs.leading_zeros();
    let mut exp = i32::try_from(top).unwrap_or(0) - 32;
    let mut sig = if top > 23 {
        round_shift_right(u128::from(abs), top - 23)
    } else {
        u128::from(abs) << (23 - top)
    };
    if sig >= (1_u128 << 24) {
        sig >>= 1;
        exp += 1;
    }
    let exp_bits = (exp + 127).unsigned_abs();
    let mantissa = u32::try_from(sig & ((1_u128 << 23) - 1)).unwrap_or(0);
    let sign_bit = u32::from(raw < 0) << 31;
    f32::from_bits(sign_bit | (exp_bits << 23) | mantissa)
}
