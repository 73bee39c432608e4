// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Provides [`Half`], an IEEE-754 binary16 storage type.
//!
//! The codec works on raw bit patterns with shifts, masks, and mask selects,
//! so conversion never branches on the value being converted. Rounding is to
//! nearest, ties to even. Arithmetic is not native: operands are widened to
//! `f32`, combined, and narrowed back.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

// The codec assumes IEEE-754 binary32 and 16/32-bit unsigned words.
const _: () = {
    assert!(f32::RADIX == 2);
    assert!(f32::MANTISSA_DIGITS == 24);
    assert!(f32::MAX_EXP == 128);
    assert!(std::mem::size_of::<u16>() == 2);
    assert!(std::mem::size_of::<u32>() == 4);
    assert!(std::mem::size_of::<Half>() == 2);
};

// --- Bit Codec ---

const F32_SIGN_MASK: u32 = 0x8000_0000;
const F32_ABS_MASK: u32 = 0x7fff_ffff;
const F32_EXP_MASK: u32 = 0x7f80_0000;
const F32_MAN_MASK: u32 = 0x007f_ffff;
const F32_HIDDEN_BIT: u32 = 0x0080_0000;

const HALF_SIGN_MASK: u16 = 0x8000;
const HALF_EXP_MASK: u16 = 0x7c00;
const HALF_MAN_MASK: u16 = 0x03ff;
const HALF_QUIET_NAN: u32 = 0x7e00;

/// `(127 - 15) << 23`: rebias an f32 exponent field to a binary16 one.
const EXP_REBIAS: u32 = 0x3800_0000;
/// Mantissa bits dropped when narrowing (23 - 10).
const MAN_SHIFT: u32 = 13;
/// Smallest f32 bit pattern that narrows to a normal binary16 (2^-14).
const HALF_NORMAL_MIN: u32 = 0x3880_0000;
/// Smallest f32 bit pattern that rounds up to binary16 infinity (65520.0).
const HALF_OVERFLOW: u32 = 0x477f_f000;

/// Picks `if_true` or `if_false` through a bit mask.
#[inline(always)]
const fn select(condition: bool, if_true: u32, if_false: u32) -> u32 {
    let mask = (condition as u32).wrapping_neg();
    (if_true & mask) | (if_false & !mask)
}

#[inline(always)]
const fn min_u32(a: u32, b: u32) -> u32 {
    select(a < b, a, b)
}

#[inline(always)]
const fn max_u32(a: u32, b: u32) -> u32 {
    select(a > b, a, b)
}

/// Narrows binary32 bits to binary16 bits.
pub const fn f32_bits_to_half_bits(bits: u32) -> u16 {
    let sign = (bits & F32_SIGN_MASK) >> 16;
    let abs = bits & F32_ABS_MASK;
    let exp = abs >> 23;
    let man = abs & F32_MAN_MASK;

    // NaN keeps its upper payload bits and is forced quiet so it never reads as infinity.
    let nan = HALF_QUIET_NAN | (man >> MAN_SHIFT);

    // Normal range: round the dropped bits to nearest even, then rebias.
    // A mantissa carry ripples into the exponent, which is the correct result.
    let odd = (abs >> MAN_SHIFT) & 1;
    let normal = (abs.wrapping_add(0x0fff + odd)).wrapping_sub(EXP_REBIAS) >> MAN_SHIFT;

    // Subnormal range: the value is `significand * 2^(exp - 150)`, expressed in
    // units of 2^-24 that is `significand >> (126 - exp)`. Shifts past 25 bits
    // leave nothing but a sub-half remainder, so they flush to zero.
    let significand = man | F32_HIDDEN_BIT;
    let shift = min_u32(max_u32(126u32.saturating_sub(exp), 14), 25);
    let truncated = significand >> shift;
    let remainder = significand & ((1 << shift) - 1);
    let halfway = 1 << (shift - 1);
    let round_up = (remainder > halfway) | ((remainder == halfway) & (truncated & 1 == 1));
    let subnormal = truncated + round_up as u32;

    let magnitude = select(
        abs > F32_EXP_MASK,
        nan,
        select(
            abs >= HALF_OVERFLOW,
            HALF_EXP_MASK as u32,
            select(abs >= HALF_NORMAL_MIN, normal, subnormal),
        ),
    );

    (sign | magnitude) as u16
}

/// Widens binary16 bits to binary32 bits. Every binary16 value is exact in binary32.
pub const fn half_bits_to_f32_bits(bits: u16) -> u32 {
    let sign = ((bits & HALF_SIGN_MASK) as u32) << 16;
    let exp = ((bits & HALF_EXP_MASK) >> 10) as u32;
    let man = (bits & HALF_MAN_MASK) as u32;

    let normal = ((exp + 112) << 23) | (man << MAN_SHIFT);
    let special = F32_EXP_MASK | (man << MAN_SHIFT);

    // Subnormals are renormalized: move the leading set bit into the hidden
    // position and lower the exponent by the distance travelled.
    let leading = man.leading_zeros();
    let subnormal = ((134 - leading) << 23) | ((man << (leading - 8)) & F32_MAN_MASK);

    let magnitude = select(
        exp == 0x1f,
        special,
        select(exp != 0, normal, select(man != 0, subnormal, 0)),
    );

    sign | magnitude
}

// --- Half ---

/// A 16-bit IEEE-754 binary16 floating-point value, stored as raw bits.
///
/// Use [`Half::from_f32`] and [`Half::to_f32`] to convert. Equality and ordering
/// follow the numeric value (`-0 == +0`, `NaN != NaN`), not the bit pattern.
#[derive(Clone, Copy, Default, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Half(u16);

impl Half {
    /// Positive zero.
    pub const ZERO: Self = Self(0x0000);
    /// Negative zero.
    pub const NEG_ZERO: Self = Self(0x8000);
    /// `1.0`.
    pub const ONE: Self = Self(0x3c00);
    /// `-1.0`.
    pub const NEG_ONE: Self = Self(0xbc00);
    /// Positive infinity.
    pub const INFINITY: Self = Self(0x7c00);
    /// Negative infinity.
    pub const NEG_INFINITY: Self = Self(0xfc00);
    /// A quiet NaN.
    pub const NAN: Self = Self(0x7e00);
    /// Largest finite value, `65504.0`.
    pub const MAX: Self = Self(0x7bff);
    /// Smallest finite value, `-65504.0`.
    pub const MIN: Self = Self(0xfbff);
    /// Smallest positive normal value, `2^-14`.
    pub const MIN_POSITIVE: Self = Self(0x0400);
    /// Smallest positive subnormal value, `2^-24`.
    pub const MIN_POSITIVE_SUBNORMAL: Self = Self(0x0001);
    /// Difference between `1.0` and the next representable value, `2^-10`.
    pub const EPSILON: Self = Self(0x1400);

    /// Reinterprets raw binary16 bits.
    #[inline]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Returns the raw binary16 bits.
    #[inline]
    pub const fn to_bits(self) -> u16 {
        self.0
    }

    /// Narrows an `f32`, rounding to nearest even.
    ///
    /// Magnitudes above [`Half::MAX`] saturate to infinity, magnitudes below
    /// half of [`Half::MIN_POSITIVE_SUBNORMAL`] flush to zero. The sign is kept
    /// in both cases.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_math::Half;
    /// assert_eq!(Half::from_f32(1.0).to_bits(), 0x3c00);
    /// assert_eq!(Half::from_f32(-2.0).to_bits(), 0xc000);
    /// ```
    #[inline]
    pub fn from_f32(value: f32) -> Self {
        Self(f32_bits_to_half_bits(value.to_bits()))
    }

    /// Narrows an `f64` by way of `f32`.
    #[inline]
    pub fn from_f64(value: f64) -> Self {
        Self::from_f32(value as f32)
    }

    /// Widens to `f32`. This is exact.
    #[inline]
    pub fn to_f32(self) -> f32 {
        f32::from_bits(half_bits_to_f32_bits(self.0))
    }

    /// Widens to `f64`. This is exact.
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.to_f32() as f64
    }

    /// Returns `true` if the value is NaN.
    #[inline]
    pub const fn is_nan(self) -> bool {
        self.0 & 0x7fff > 0x7c00
    }

    /// Returns `true` if the value is positive or negative infinity.
    #[inline]
    pub const fn is_infinite(self) -> bool {
        self.0 & 0x7fff == 0x7c00
    }

    /// Returns `true` if the value is neither infinite nor NaN.
    #[inline]
    pub const fn is_finite(self) -> bool {
        self.0 & HALF_EXP_MASK != HALF_EXP_MASK
    }

    /// Returns `true` if the value is neither zero, subnormal, infinite, nor NaN.
    #[inline]
    pub const fn is_normal(self) -> bool {
        let exp = self.0 & HALF_EXP_MASK;
        exp != 0 && exp != HALF_EXP_MASK
    }

    /// Returns `true` if the value is subnormal.
    #[inline]
    pub const fn is_subnormal(self) -> bool {
        self.0 & HALF_EXP_MASK == 0 && self.0 & HALF_MAN_MASK != 0
    }

    /// Returns `true` if the sign bit is set, including for `-0.0` and negative NaNs.
    #[inline]
    pub const fn is_sign_negative(self) -> bool {
        self.0 & HALF_SIGN_MASK != 0
    }

    /// Returns the absolute value by clearing the sign bit.
    #[inline]
    pub const fn abs(self) -> Self {
        Self(self.0 & !HALF_SIGN_MASK)
    }
}

/// Suffix-style constructor: `0.5_f32.half()`.
pub trait HalfLiteral {
    /// Narrows the number to a [`Half`].
    fn half(self) -> Half;
}

impl HalfLiteral for f32 {
    #[inline]
    fn half(self) -> Half {
        Half::from_f32(self)
    }
}

impl HalfLiteral for f64 {
    #[inline]
    fn half(self) -> Half {
        Half::from_f64(self)
    }
}

impl From<Half> for f32 {
    #[inline]
    fn from(value: Half) -> Self {
        value.to_f32()
    }
}

impl From<Half> for f64 {
    #[inline]
    fn from(value: Half) -> Self {
        value.to_f64()
    }
}

// --- Comparison ---

impl PartialEq for Half {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.to_f32() == other.to_f32()
    }
}

impl PartialOrd for Half {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.to_f32().partial_cmp(&other.to_f32())
    }
}

impl fmt::Debug for Half {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Half({:?})", self.to_f32())
    }
}

impl fmt::Display for Half {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f32(), f)
    }
}

// --- Operator Overloads ---

impl Neg for Half {
    type Output = Self;
    /// Flips the sign bit. This is exact, including for zero and NaN.
    #[inline]
    fn neg(self) -> Self::Output {
        Self(self.0 ^ HALF_SIGN_MASK)
    }
}

macro_rules! impl_promoted_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl $trait for Half {
            type Output = Half;
            #[inline]
            fn $method(self, rhs: Half) -> Half {
                Half::from_f32(self.to_f32() $op rhs.to_f32())
            }
        }

        impl $trait<f32> for Half {
            type Output = f32;
            #[inline]
            fn $method(self, rhs: f32) -> f32 {
                self.to_f32() $op rhs
            }
        }

        impl $trait<Half> for f32 {
            type Output = f32;
            #[inline]
            fn $method(self, rhs: Half) -> f32 {
                self $op rhs.to_f32()
            }
        }

        impl $assign_trait for Half {
            #[inline]
            fn $assign_method(&mut self, rhs: Half) {
                *self = *self $op rhs;
            }
        }

        impl $assign_trait<f32> for Half {
            #[inline]
            fn $assign_method(&mut self, rhs: f32) {
                *self = Half::from_f32(self.to_f32() $op rhs);
            }
        }
    };
}

impl_promoted_op!(Add, add, AddAssign, add_assign, +);
impl_promoted_op!(Sub, sub, SubAssign, sub_assign, -);
impl_promoted_op!(Mul, mul, MulAssign, mul_assign, *);
impl_promoted_op!(Div, div, DivAssign, div_assign, /);

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(value: f32) -> u16 {
        Half::from_f32(value).to_bits()
    }

    #[test]
    fn test_known_bit_patterns() {
        assert_eq!(bits(1.0), 0x3c00);
        assert_eq!(bits(-2.0), 0xc000);
        assert_eq!(bits(0.5), 0x3800);
        assert_eq!(bits(65504.0), 0x7bff);
        assert_eq!(bits(-65504.0), 0xfbff);
        assert_eq!(bits(6.103_515_6e-5), 0x0400);
        assert_eq!(bits(5.960_464_5e-8), 0x0001);
        assert_eq!(bits(0.333_333_34), 0x3555);
    }

    #[test]
    fn test_signed_zero() {
        assert_eq!(bits(0.0), 0x0000);
        assert_eq!(bits(-0.0), 0x8000);
        assert_eq!(Half::NEG_ZERO, Half::ZERO);
        assert!(Half::NEG_ZERO.to_f32().is_sign_negative());
    }

    #[test]
    fn test_underflow_flushes_to_signed_zero() {
        assert_eq!(bits(1e-10), 0x0000);
        assert_eq!(bits(-1e-10), 0x8000);
        assert_eq!(bits(f32::MIN_POSITIVE), 0x0000);
        // Exactly half of the smallest subnormal ties to even (zero).
        assert_eq!(bits(2.980_232_2e-8), 0x0000);
    }

    #[test]
    fn test_overflow_saturates_to_signed_infinity() {
        assert_eq!(bits(65520.0), 0x7c00);
        assert_eq!(bits(1e10), 0x7c00);
        assert_eq!(bits(-1e10), 0xfc00);
        assert_eq!(bits(f32::INFINITY), 0x7c00);
        assert_eq!(bits(f32::NEG_INFINITY), 0xfc00);
        assert_eq!(Half::from_f32(1e10).to_f32(), f32::INFINITY);
        assert_eq!(Half::from_f32(-1e10).to_f32(), f32::NEG_INFINITY);
        // Just below the rounding threshold stays finite.
        assert_eq!(bits(65519.0), 0x7bff);
    }

    #[test]
    fn test_nan_stays_nan() {
        let h = Half::from_f32(f32::NAN);
        assert!(h.is_nan());
        assert!(h.to_f32().is_nan());
        // A payload living only in the low mantissa bits must not collapse to infinity.
        let low_payload = f32::from_bits(0x7f80_0001);
        assert!(Half::from_f32(low_payload).is_nan());
        assert_ne!(Half::NAN, Half::NAN);
    }

    #[test]
    fn test_round_to_nearest_even() {
        // 1 + 2^-11 is halfway between 1.0 and the next half; the even side is 1.0.
        assert_eq!(bits(1.0 + 4.882_812_5e-4), 0x3c00);
        // 1 + 3 * 2^-11 is halfway between mantissas 1 and 2; the even side is 2.
        assert_eq!(bits(1.0 + 3.0 * 4.882_812_5e-4), 0x3c02);
        // Slightly above the halfway point rounds up.
        assert_eq!(bits(1.0 + 4.9e-4), 0x3c01);
    }

    #[test]
    fn test_subnormals_widen_exactly() {
        assert_eq!(Half::MIN_POSITIVE_SUBNORMAL.to_f32(), 5.960_464_5e-8);
        assert_eq!(Half::from_bits(0x03ff).to_f32(), 6.097_555_2e-5);
        assert_eq!(Half::from_bits(0x8200).to_f32(), -3.051_757_8e-5);
        assert!(Half::from_bits(0x0200).is_subnormal());
    }

    #[test]
    fn test_every_pattern_round_trips() {
        for raw in 0..=u16::MAX {
            let h = Half::from_bits(raw);
            if h.is_nan() {
                assert!(Half::from_f32(h.to_f32()).is_nan());
            } else {
                assert_eq!(Half::from_f32(h.to_f32()).to_bits(), raw, "pattern {raw:#06x}");
            }
        }
    }

    #[test]
    fn test_promoted_arithmetic() {
        let a = Half::from_f32(1.5);
        let b = Half::from_f32(2.25);
        assert_eq!((a + b).to_f32(), 3.75);
        assert_eq!((b - a).to_f32(), 0.75);
        assert_eq!((a * b).to_f32(), 3.375);
        assert_eq!((b / a).to_f32(), 1.5);
        assert_eq!(a * 2.0_f32, 3.0_f32);
        assert_eq!(2.0_f32 + a, 3.5_f32);

        let mut c = a;
        c += b;
        c *= 2.0_f32;
        assert_eq!(c.to_f32(), 7.5);
        c -= Half::ONE;
        c /= Half::from_f32(2.0);
        assert_eq!(c.to_f32(), 3.25);
    }

    #[test]
    fn test_negation_flips_sign_bit_only() {
        assert_eq!((-Half::ONE).to_bits(), Half::NEG_ONE.to_bits());
        assert_eq!((-Half::ZERO).to_bits(), 0x8000);
        assert!((-Half::NAN).is_nan());
    }

    #[test]
    fn test_ordering_follows_numeric_value() {
        let values = [-2.0_f32, -1.0, -0.5, 0.0, 0.5, 1.0, 2.0];
        for pair in values.windows(2) {
            let lo = Half::from_f32(pair[0]);
            let hi = Half::from_f32(pair[1]);
            assert!(lo < hi, "{lo} < {hi}");
        }
        assert!(Half::NEG_INFINITY < Half::MIN);
        assert!(Half::MAX < Half::INFINITY);
        assert_eq!(Half::NAN.partial_cmp(&Half::ONE), None);
    }

    #[test]
    fn test_classification_and_literals() {
        assert!(Half::ONE.is_normal());
        assert!(Half::INFINITY.is_infinite());
        assert!(!Half::INFINITY.is_finite());
        assert!(Half::MAX.is_finite());
        assert!(Half::NEG_ONE.is_sign_negative());
        assert_eq!(Half::NEG_ONE.abs(), Half::ONE);
        assert_eq!(0.5_f32.half(), Half::from_bits(0x3800));
        assert_eq!(0.25_f64.half().to_f64(), 0.25);
        assert_eq!(Half::EPSILON.to_f32(), 9.765_625e-4);
    }

    #[test]
    fn test_serde_and_bytes() {
        let h = Half::ONE;
        assert_eq!(serde_json::to_string(&h).unwrap(), "15360");
        let slice = [Half::ONE, Half::NEG_ZERO];
        let raw: &[u16] = bytemuck::cast_slice(&slice);
        assert_eq!(raw, &[0x3c00, 0x8000]);
    }
}
