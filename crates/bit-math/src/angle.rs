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

//! Provides unit-tagged angle types and the conversions between them.
//!
//! An angle is a single [`Real`] whose unit is carried by the type. Mixing
//! units is a compile error; crossing units goes through [`angle_cast`],
//! [`Angle::cast`], or the `From` conversions.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, Sub, SubAssign};

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

use crate::{Real, TAU};

// --- Units ---

/// A marker type naming the unit of an [`Angle`].
pub trait AngleUnit:
    Copy + Clone + fmt::Debug + Default + PartialEq + PartialOrd + Send + Sync + 'static
{
    /// The size of one full turn in this unit.
    const REVOLUTION: Real;
    /// The suffix used when formatting an angle of this unit.
    const SUFFIX: &'static str;
}

/// Radians: `2π` per revolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Eq, Hash)]
pub struct Rad;

/// Degrees: `360` per revolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Eq, Hash)]
pub struct Deg;

/// Gradians: `400` per revolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Eq, Hash)]
pub struct Grad;

impl AngleUnit for Rad {
    const REVOLUTION: Real = TAU;
    const SUFFIX: &'static str = "rad";
}

impl AngleUnit for Deg {
    const REVOLUTION: Real = 360.0;
    const SUFFIX: &'static str = "deg";
}

impl AngleUnit for Grad {
    const REVOLUTION: Real = 400.0;
    const SUFFIX: &'static str = "grad";
}

// --- Angle ---

/// An angle measured in the unit `U`.
///
/// The stored value is never wrapped implicitly: it may exceed a revolution in
/// either direction until [`Angle::constrained`] is called.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent, bound = "")]
#[repr(transparent)]
pub struct Angle<U: AngleUnit> {
    value: Real,
    #[serde(skip)]
    unit: PhantomData<U>,
}

/// An angle in radians.
pub type Radian = Angle<Rad>;
/// An angle in degrees.
pub type Degree = Angle<Deg>;
/// An angle in gradians.
pub type Gradian = Angle<Grad>;

impl<U: AngleUnit> Angle<U> {
    /// The zero angle.
    pub const ZERO: Self = Self::new(0.0);
    /// One full turn.
    pub const REVOLUTION: Self = Self::new(U::REVOLUTION);
    /// Half a turn.
    pub const HALF_REVOLUTION: Self = Self::new(U::REVOLUTION / 2.0);
    /// A quarter turn.
    pub const QUARTER_REVOLUTION: Self = Self::new(U::REVOLUTION / 4.0);
    /// One full turn, clockwise.
    pub const NEG_REVOLUTION: Self = Self::new(-U::REVOLUTION);
    /// Half a turn, clockwise.
    pub const NEG_HALF_REVOLUTION: Self = Self::new(-U::REVOLUTION / 2.0);
    /// A quarter turn, clockwise.
    pub const NEG_QUARTER_REVOLUTION: Self = Self::new(-U::REVOLUTION / 4.0);

    /// Creates an angle from a raw value expressed in `U`.
    #[inline]
    pub const fn new(value: Real) -> Self {
        Self {
            value,
            unit: PhantomData,
        }
    }

    /// Returns the raw value expressed in `U`.
    #[inline]
    pub const fn value(self) -> Real {
        self.value
    }

    /// Returns the angle as a number of full turns.
    #[inline]
    pub fn revolutions(self) -> Real {
        self.value / U::REVOLUTION
    }

    /// Converts the angle to another unit.
    #[inline]
    pub fn cast<V: AngleUnit>(self) -> Angle<V> {
        // Dividing first keeps the revolution constants exact: a half turn
        // in radians becomes exactly 180 degrees.
        Angle::new(self.value / U::REVOLUTION * V::REVOLUTION)
    }

    /// Returns the equivalent angle in `[0, revolution)`.
    pub fn constrained(self) -> Self {
        let wrapped = self.value.rem_euclid(U::REVOLUTION);
        // `rem_euclid` can round up to the modulus for tiny negative inputs.
        if wrapped >= U::REVOLUTION {
            Self::ZERO
        } else {
            Self::new(wrapped)
        }
    }

    /// Rounds the value to the nearest integer, half away from zero.
    #[inline]
    pub fn round(self) -> Self {
        Self::new(self.value.round())
    }

    /// Rounds the value up.
    #[inline]
    pub fn ceil(self) -> Self {
        Self::new(self.value.ceil())
    }

    /// Rounds the value down.
    #[inline]
    pub fn floor(self) -> Self {
        Self::new(self.value.floor())
    }

    /// Drops the fractional part of the value.
    #[inline]
    pub fn trunc(self) -> Self {
        Self::new(self.value.trunc())
    }

    /// Returns the absolute angle.
    #[inline]
    pub fn abs(self) -> Self {
        Self::new(self.value.abs())
    }

    /// Returns the floating-point remainder of `self / divisor`, with the sign of `self`.
    #[inline]
    pub fn modulo(self, divisor: Self) -> Self {
        Self::new(self.value % divisor.value)
    }

    /// Compares two angles for equality.
    ///
    /// The tolerance is `0`, so this is exact comparison. Use
    /// [`Angle::almost_equal_eps`] to allow for rounding.
    #[inline]
    pub fn almost_equal(self, other: Self) -> bool {
        self.almost_equal_eps(other, 0.0)
    }

    /// Compares two angles with an absolute tolerance expressed in `U`.
    #[inline]
    pub fn almost_equal_eps(self, other: Self, tolerance: Real) -> bool {
        (self.value - other.value).abs() <= tolerance
    }

    /// Returns the smaller of two angles.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.value.min(other.value))
    }

    /// Returns the larger of two angles.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.value.max(other.value))
    }

    /// Restricts the angle to `[min, max]`.
    #[inline]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        crate::clamp(self, min, max)
    }
}

/// Converts an angle between units.
///
/// # Examples
///
/// ```
/// use bit_math::angle::{Deg, Grad};
/// use bit_math::{angle_cast, Degree, Gradian};
///
/// let right = angle_cast::<Deg, Grad>(Gradian::QUARTER_REVOLUTION);
/// assert_eq!(right, Degree::new(90.0));
/// ```
#[inline]
pub fn angle_cast<To: AngleUnit, From: AngleUnit>(angle: Angle<From>) -> Angle<To> {
    angle.cast()
}

macro_rules! impl_unit_conversion {
    ($from:ty => $to:ty) => {
        impl From<Angle<$from>> for Angle<$to> {
            #[inline]
            fn from(angle: Angle<$from>) -> Self {
                angle.cast()
            }
        }
    };
}

impl_unit_conversion!(Rad => Deg);
impl_unit_conversion!(Rad => Grad);
impl_unit_conversion!(Deg => Rad);
impl_unit_conversion!(Deg => Grad);
impl_unit_conversion!(Grad => Rad);
impl_unit_conversion!(Grad => Deg);

// --- Radian Input ---

/// A value that can be fed to the trigonometric functions.
///
/// Angles of every unit convert through their revolution ratio. A bare
/// `f32` or `f64` is taken to already be in radians.
pub trait IntoRadians: Copy {
    /// Returns the value as a radian angle.
    fn into_radians(self) -> Radian;
}

impl<U: AngleUnit> IntoRadians for Angle<U> {
    #[inline]
    fn into_radians(self) -> Radian {
        self.cast()
    }
}

impl IntoRadians for f32 {
    #[inline]
    fn into_radians(self) -> Radian {
        Radian::new(self as Real)
    }
}

impl IntoRadians for f64 {
    #[inline]
    fn into_radians(self) -> Radian {
        Radian::new(self as Real)
    }
}

// --- Literals ---

/// Suffix-style constructors for angles: `90.0_f32.deg()`, `1.5_f64.rad()`, `100_i32.grad()`.
pub trait AngleLiteral {
    /// Interprets the number as radians.
    fn rad(self) -> Radian;
    /// Interprets the number as degrees.
    fn deg(self) -> Degree;
    /// Interprets the number as gradians.
    fn grad(self) -> Gradian;
}

macro_rules! impl_angle_literal {
    ($($t:ty),*) => {
        $(
            impl AngleLiteral for $t {
                #[inline]
                fn rad(self) -> Radian {
                    Radian::new(self as Real)
                }
                #[inline]
                fn deg(self) -> Degree {
                    Degree::new(self as Real)
                }
                #[inline]
                fn grad(self) -> Gradian {
                    Gradian::new(self as Real)
                }
            }
        )*
    };
}

impl_angle_literal!(f32, f64, i32);

// --- Operator Overloads ---

impl<U: AngleUnit> Add for Angle<U> {
    type Output = Self;
    /// Adds two angles of the same unit.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.value + rhs.value)
    }
}

impl<U: AngleUnit> Sub for Angle<U> {
    type Output = Self;
    /// Subtracts two angles of the same unit.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.value - rhs.value)
    }
}

impl<U: AngleUnit> Neg for Angle<U> {
    type Output = Self;
    /// Reverses the direction of the angle.
    #[inline]
    fn neg(self) -> Self::Output {
        Self::new(-self.value)
    }
}

impl<U: AngleUnit> Mul<Real> for Angle<U> {
    type Output = Self;
    /// Scales the angle.
    #[inline]
    fn mul(self, rhs: Real) -> Self::Output {
        Self::new(self.value * rhs)
    }
}

impl<U: AngleUnit> Mul<Angle<U>> for Real {
    type Output = Angle<U>;
    /// Scales the angle.
    #[inline]
    fn mul(self, rhs: Angle<U>) -> Self::Output {
        rhs * self
    }
}

impl<U: AngleUnit> Div<Real> for Angle<U> {
    type Output = Self;
    /// Divides the angle by a scalar.
    #[inline]
    fn div(self, rhs: Real) -> Self::Output {
        Self::new(self.value / rhs)
    }
}

impl<U: AngleUnit> Div for Angle<U> {
    type Output = Real;
    /// Returns the dimensionless ratio of two angles.
    #[inline]
    fn div(self, rhs: Self) -> Self::Output {
        self.value / rhs.value
    }
}

impl<U: AngleUnit> Rem for Angle<U> {
    type Output = Self;
    /// Same as [`Angle::modulo`].
    #[inline]
    fn rem(self, rhs: Self) -> Self::Output {
        self.modulo(rhs)
    }
}

impl<U: AngleUnit> AddAssign for Angle<U> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.value += rhs.value;
    }
}

impl<U: AngleUnit> SubAssign for Angle<U> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.value -= rhs.value;
    }
}

impl<U: AngleUnit> MulAssign<Real> for Angle<U> {
    #[inline]
    fn mul_assign(&mut self, rhs: Real) {
        self.value *= rhs;
    }
}

impl<U: AngleUnit> DivAssign<Real> for Angle<U> {
    #[inline]
    fn div_assign(&mut self, rhs: Real) {
        self.value /= rhs;
    }
}

impl<U: AngleUnit> fmt::Display for Angle<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, U::SUFFIX)
    }
}

// --- Approximate Comparison ---

impl<U: AngleUnit> AbsDiffEq for Angle<U> {
    type Epsilon = Real;

    /// Exact comparison by default, like [`Angle::almost_equal`].
    fn default_epsilon() -> Real {
        0.0
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Real) -> bool {
        self.value.abs_diff_eq(&other.value, epsilon)
    }
}

impl<U: AngleUnit> RelativeEq for Angle<U> {
    fn default_max_relative() -> Real {
        Real::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Real, max_relative: Real) -> bool {
        self.value.relative_eq(&other.value, epsilon, max_relative)
    }
}
