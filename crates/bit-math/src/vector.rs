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

//! Provides the 2D, 3D, and 4D vectors the rotation types operate on.
//!
//! These are plain component bags. The arithmetic shared by every dimension is
//! generated by `impl_vector_ops!`; the per-dimension blocks only hold what
//! differs (constants, `cross`, homogeneous conversions).

use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

use approx::{AbsDiffEq, RelativeEq};
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::angle::Radian;
use crate::error::{MathError, Result};
use crate::{trig, Real, EPSILON};

/// A 2-dimensional vector.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
    Encode,
    Decode,
)]
#[repr(C)]
pub struct Vec2 {
    /// The x component of the vector.
    pub x: Real,
    /// The y component of the vector.
    pub y: Real,
}

/// A 3-dimensional vector.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
    Encode,
    Decode,
)]
#[repr(C)]
pub struct Vec3 {
    /// The x component of the vector.
    pub x: Real,
    /// The y component of the vector.
    pub y: Real,
    /// The z component of the vector.
    pub z: Real,
}

/// A 4-dimensional vector, used for homogeneous coordinates.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
    Encode,
    Decode,
)]
#[repr(C)]
pub struct Vec4 {
    /// The x component of the vector.
    pub x: Real,
    /// The y component of the vector.
    pub y: Real,
    /// The z component of the vector.
    pub z: Real,
    /// The w component of the vector.
    pub w: Real,
}

macro_rules! impl_vector_ops {
    ($name:ident, $len:literal, $($field:ident => $idx:literal),+) => {
        impl $name {
            /// A vector with all components set to `0.0`.
            pub const ZERO: Self = Self { $($field: 0.0),+ };
            /// A vector with all components set to `1.0`.
            pub const ONE: Self = Self { $($field: 1.0),+ };

            /// Creates a new vector with the specified components.
            #[inline]
            pub const fn new($($field: Real),+) -> Self {
                Self { $($field),+ }
            }

            /// Creates a vector with every component set to `value`.
            #[inline]
            pub const fn splat(value: Real) -> Self {
                Self { $($field: value),+ }
            }

            /// Calculates the dot product of this vector and another.
            #[inline]
            pub fn dot(&self, rhs: Self) -> Real {
                0.0 $(+ self.$field * rhs.$field)+
            }

            /// Calculates the squared length of the vector.
            #[inline]
            pub fn length_squared(&self) -> Real {
                self.dot(*self)
            }

            /// Calculates the length of the vector.
            #[inline]
            pub fn length(&self) -> Real {
                self.length_squared().sqrt()
            }

            /// Returns the distance between two points.
            #[inline]
            pub fn distance(&self, other: Self) -> Real {
                (*self - other).length()
            }

            /// Returns a vector of length 1 pointing the same way.
            ///
            /// A vector whose length is near zero has no direction; it is
            /// returned as [`Self::ZERO`].
            #[inline]
            pub fn normalize(&self) -> Self {
                let len_sq = self.length_squared();
                if len_sq > EPSILON * EPSILON {
                    *self * (1.0 / len_sq.sqrt())
                } else {
                    Self::ZERO
                }
            }

            /// Returns the unsigned angle between two vectors, in `[0, π]`.
            ///
            /// If either vector has zero length the angle is [`Radian::ZERO`].
            pub fn angle_between(&self, other: Self) -> Radian {
                let lengths = (self.length_squared() * other.length_squared()).sqrt();
                if lengths == 0.0 {
                    return Radian::ZERO;
                }
                trig::arccos(crate::clamp(self.dot(other) / lengths, -1.0, 1.0))
            }

            /// Performs a linear interpolation between two vectors.
            ///
            /// The interpolation factor `t` is clamped to the `[0.0, 1.0]` range.
            #[inline]
            pub fn lerp(start: Self, end: Self, t: Real) -> Self {
                start + (end - start) * crate::saturate(t)
            }

            /// Returns the components as an array.
            #[inline]
            pub const fn to_array(self) -> [Real; $len] {
                [$(self.$field),+]
            }

            /// Returns a component, or an error if `index` is out of range.
            pub fn at(&self, index: usize) -> Result<Real> {
                match index {
                    $($idx => Ok(self.$field),)+
                    _ => Err(MathError::IndexOutOfRange { index, len: $len }),
                }
            }

            /// Returns a mutable component, or an error if `index` is out of range.
            pub fn at_mut(&mut self, index: usize) -> Result<&mut Real> {
                match index {
                    $($idx => Ok(&mut self.$field),)+
                    _ => Err(MathError::IndexOutOfRange { index, len: $len }),
                }
            }
        }

        // --- Operator Overloads ---

        impl Add for $name {
            type Output = Self;
            /// Adds two vectors component-wise.
            #[inline]
            fn add(self, rhs: Self) -> Self::Output {
                Self { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl Sub for $name {
            type Output = Self;
            /// Subtracts two vectors component-wise.
            #[inline]
            fn sub(self, rhs: Self) -> Self::Output {
                Self { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl Mul<Real> for $name {
            type Output = Self;
            /// Multiplies the vector by a scalar.
            #[inline]
            fn mul(self, rhs: Real) -> Self::Output {
                Self { $($field: self.$field * rhs),+ }
            }
        }

        impl Mul<$name> for Real {
            type Output = $name;
            /// Multiplies a scalar by a vector.
            #[inline]
            fn mul(self, rhs: $name) -> Self::Output {
                rhs * self
            }
        }

        impl Mul for $name {
            type Output = Self;
            /// Multiplies two vectors component-wise.
            #[inline]
            fn mul(self, rhs: Self) -> Self::Output {
                Self { $($field: self.$field * rhs.$field),+ }
            }
        }

        impl Div<Real> for $name {
            type Output = Self;
            /// Divides the vector by a scalar.
            #[inline]
            fn div(self, rhs: Real) -> Self::Output {
                let inv_rhs = 1.0 / rhs;
                Self { $($field: self.$field * inv_rhs),+ }
            }
        }

        impl Neg for $name {
            type Output = Self;
            /// Negates the vector.
            #[inline]
            fn neg(self) -> Self::Output {
                Self { $($field: -self.$field),+ }
            }
        }

        impl AddAssign for $name {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl SubAssign for $name {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl MulAssign<Real> for $name {
            #[inline]
            fn mul_assign(&mut self, rhs: Real) {
                *self = *self * rhs;
            }
        }

        impl Index<usize> for $name {
            type Output = Real;
            /// Accesses a component by index.
            ///
            /// # Panics
            /// Panics if `index` is out of range. Use `at` for a checked access.
            #[inline]
            fn index(&self, index: usize) -> &Self::Output {
                match index {
                    $($idx => &self.$field,)+
                    _ => panic!("Index {} out of bounds for {}", index, stringify!($name)),
                }
            }
        }

        impl IndexMut<usize> for $name {
            /// Mutably accesses a component by index.
            ///
            /// # Panics
            /// Panics if `index` is out of range. Use `at_mut` for a checked access.
            #[inline]
            fn index_mut(&mut self, index: usize) -> &mut Self::Output {
                match index {
                    $($idx => &mut self.$field,)+
                    _ => panic!("Index {} out of bounds for {}", index, stringify!($name)),
                }
            }
        }

        impl AbsDiffEq for $name {
            type Epsilon = Real;

            fn default_epsilon() -> Real {
                Real::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: Real) -> bool {
                $(self.$field.abs_diff_eq(&other.$field, epsilon))&&+
            }
        }

        impl RelativeEq for $name {
            fn default_max_relative() -> Real {
                Real::default_max_relative()
            }

            fn relative_eq(&self, other: &Self, epsilon: Real, max_relative: Real) -> bool {
                $(self.$field.relative_eq(&other.$field, epsilon, max_relative))&&+
            }
        }
    };
}

impl_vector_ops!(Vec2, 2, x => 0, y => 1);
impl_vector_ops!(Vec3, 3, x => 0, y => 1, z => 2);
impl_vector_ops!(Vec4, 4, x => 0, y => 1, z => 2, w => 3);

impl Vec2 {
    /// The unit vector pointing along the positive X-axis.
    pub const X: Self = Self::new(1.0, 0.0);
    /// The unit vector pointing along the positive Y-axis.
    pub const Y: Self = Self::new(0.0, 1.0);
}

impl Vec3 {
    /// The unit vector pointing along the positive X-axis.
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    /// The unit vector pointing along the positive Y-axis.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    /// The unit vector pointing along the positive Z-axis.
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);
    /// The unit vector pointing along the negative Z-axis (forward).
    pub const NEG_Z: Self = Self::new(0.0, 0.0, -1.0);

    /// Computes the cross product of this vector and another.
    #[inline]
    pub fn cross(&self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Returns a vector of length 1 for any non-zero input, however short.
    ///
    /// Unlike [`Vec3::normalize`] there is no length threshold: the vector is
    /// first rescaled by its largest component so short axes keep their
    /// direction. Only the zero vector stays [`Vec3::ZERO`].
    pub fn normalize_exact(&self) -> Self {
        let scale = self.x.abs().max(self.y.abs()).max(self.z.abs());
        if scale == 0.0 {
            return Self::ZERO;
        }
        let scaled = *self / scale;
        scaled / scaled.length()
    }

    /// Extends the vector to homogeneous coordinates with the given `w`.
    #[inline]
    pub const fn extend(self, w: Real) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, w)
    }
}

impl Vec4 {
    /// The unit vector pointing along the positive X-axis.
    pub const X: Self = Self::new(1.0, 0.0, 0.0, 0.0);
    /// The unit vector pointing along the positive Y-axis.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0, 0.0);
    /// The unit vector pointing along the positive Z-axis.
    pub const Z: Self = Self::new(0.0, 0.0, 1.0, 0.0);
    /// The unit vector pointing along the positive W-axis.
    pub const W: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Drops the `w` component.
    #[inline]
    pub const fn truncate(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}
