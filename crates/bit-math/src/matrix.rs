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

//! Defines the `Mat2`, `Mat3`, and `Mat4` square matrices.
//!
//! Matrices are stored row by row and addressed as `(row, column)`. Vectors are
//! columns multiplied on the right, so `m * v` (or [`Mat3::combine`]) yields
//! `Σ m[(r, c)] * v[c]` for each row `r`.
//!
//! Default construction gives the zero matrix. Zeroing costs a handful of
//! stores; build from [`Mat3::new`] or the `from_*` constructors in hot paths.

use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

use crate::angle::Radian;
use crate::error::{MathError, Result};
use crate::quaternion::Quaternion;
use crate::trig::runtime;
use crate::vector::{Vec2, Vec3, Vec4};
use crate::Real;

/// A 2x2 matrix.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize,
)]
#[repr(C)]
pub struct Mat2 {
    /// The rows of the matrix. `rows[0]` is the top row.
    pub rows: [Vec2; 2],
}

/// A 3x3 matrix, typically the rotation and scale part of a transform.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize,
)]
#[repr(C)]
pub struct Mat3 {
    /// The rows of the matrix. `rows[0]` is the top row.
    pub rows: [Vec3; 3],
}

/// A 4x4 matrix, typically a full affine transform in homogeneous coordinates.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize,
)]
#[repr(C)]
pub struct Mat4 {
    /// The rows of the matrix. `rows[0]` is the top row.
    pub rows: [Vec4; 4],
}

macro_rules! impl_matrix_common {
    ($name:ident, $vec:ident, $n:literal, $elements:literal) => {
        impl $name {
            /// The matrix with every element set to `0`.
            pub const ZERO: Self = Self {
                rows: [$vec::ZERO; $n],
            };

            /// The number of rows (and columns).
            pub const SIZE: usize = $n;

            /// Creates a matrix from its rows.
            #[inline]
            pub const fn from_rows(rows: [$vec; $n]) -> Self {
                Self { rows }
            }

            /// Creates a matrix from its columns.
            #[inline]
            pub fn from_cols(cols: [$vec; $n]) -> Self {
                Self::from_rows(cols).transposed()
            }

            /// Creates a matrix whose element `(row, column)` is `f(row, column)`.
            pub fn from_fn(mut f: impl FnMut(usize, usize) -> Real) -> Self {
                let mut m = Self::ZERO;
                for r in 0..$n {
                    for c in 0..$n {
                        m.rows[r][c] = f(r, c);
                    }
                }
                m
            }

            /// Returns a row.
            ///
            /// # Panics
            /// Panics if `index` is out of range.
            #[inline]
            pub fn row(&self, index: usize) -> $vec {
                self.rows[index]
            }

            /// Returns a column.
            ///
            /// # Panics
            /// Panics if `index` is out of range.
            #[inline]
            pub fn column(&self, index: usize) -> $vec {
                let mut column = $vec::ZERO;
                for r in 0..$n {
                    column[r] = self.rows[r][index];
                }
                column
            }

            /// Returns the element at `(row, column)`, or an error if either is out of range.
            pub fn at(&self, row: usize, column: usize) -> Result<Real> {
                self.check(row, column)?;
                Ok(self.rows[row][column])
            }

            /// Returns the element at `(row, column)` mutably, or an error if either is out of range.
            pub fn at_mut(&mut self, row: usize, column: usize) -> Result<&mut Real> {
                self.check(row, column)?;
                Ok(&mut self.rows[row][column])
            }

            fn check(&self, row: usize, column: usize) -> Result<()> {
                if row < $n && column < $n {
                    Ok(())
                } else {
                    Err(MathError::MatrixIndexOutOfRange {
                        row,
                        column,
                        size: $n,
                    })
                }
            }

            /// Returns the sum of the diagonal.
            #[inline]
            pub fn trace(&self) -> Real {
                (0..$n).map(|i| self.rows[i][i]).sum()
            }

            /// Returns a transposed copy.
            #[inline]
            pub fn transposed(&self) -> Self {
                Self::from_fn(|r, c| self.rows[c][r])
            }

            /// Transposes the matrix in place.
            #[inline]
            pub fn transpose(&mut self) -> &mut Self {
                *self = self.transposed();
                self
            }

            /// Returns the inverse matrix.
            ///
            /// A singular matrix (determinant exactly `0`) has no inverse; the
            /// identity is returned instead. Check [`Self::determinant`] first if
            /// that case matters to the caller.
            pub fn inverse(&self) -> Self {
                let det = self.determinant();
                if det == 0.0 {
                    log::trace!("{} is singular, inverse falls back to identity.", stringify!($name));
                    return Self::IDENTITY;
                }
                self.adjugate() * (1.0 / det)
            }

            /// Inverts the matrix in place. See [`Self::inverse`] for the singular case.
            #[inline]
            pub fn invert(&mut self) -> &mut Self {
                *self = self.inverse();
                self
            }

            /// Multiplies `vector`, as a column, by this matrix.
            #[inline]
            pub fn combine(&self, vector: $vec) -> $vec {
                let mut out = $vec::ZERO;
                for r in 0..$n {
                    out[r] = self.rows[r].dot(vector);
                }
                out
            }

            /// Views the elements in row order as a flat array.
            #[inline]
            pub fn as_array(&self) -> &[Real; $elements] {
                bytemuck::cast_ref(self)
            }
        }

        // --- Operator Overloads ---

        impl Index<(usize, usize)> for $name {
            type Output = Real;
            /// Accesses the element at `(row, column)`.
            ///
            /// # Panics
            /// Out-of-range indices are a precondition violation and panic.
            /// Use `at` for a checked access.
            #[inline]
            fn index(&self, (row, column): (usize, usize)) -> &Self::Output {
                &self.rows[row][column]
            }
        }

        impl IndexMut<(usize, usize)> for $name {
            /// Mutably accesses the element at `(row, column)`.
            ///
            /// # Panics
            /// Out-of-range indices are a precondition violation and panic.
            #[inline]
            fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut Self::Output {
                &mut self.rows[row][column]
            }
        }

        impl Mul for $name {
            type Output = Self;
            /// Composes two matrices: rows of `self` against columns of `rhs`.
            #[inline]
            fn mul(self, rhs: Self) -> Self::Output {
                let mut out = Self::ZERO;
                for c in 0..$n {
                    let column = rhs.column(c);
                    for r in 0..$n {
                        out.rows[r][c] = self.rows[r].dot(column);
                    }
                }
                out
            }
        }

        impl Mul<$vec> for $name {
            type Output = $vec;
            /// Same as [`Self::combine`].
            #[inline]
            fn mul(self, rhs: $vec) -> Self::Output {
                self.combine(rhs)
            }
        }

        impl Mul<Real> for $name {
            type Output = Self;
            /// Scales every element.
            #[inline]
            fn mul(self, rhs: Real) -> Self::Output {
                Self {
                    rows: self.rows.map(|row| row * rhs),
                }
            }
        }

        impl Mul<$name> for Real {
            type Output = $name;
            /// Scales every element.
            #[inline]
            fn mul(self, rhs: $name) -> Self::Output {
                rhs * self
            }
        }

        impl Div<Real> for $name {
            type Output = Self;
            /// Divides every element.
            #[inline]
            fn div(self, rhs: Real) -> Self::Output {
                self * (1.0 / rhs)
            }
        }

        impl Add for $name {
            type Output = Self;
            /// Adds two matrices element-wise.
            #[inline]
            fn add(self, rhs: Self) -> Self::Output {
                let mut out = self;
                out += rhs;
                out
            }
        }

        impl Sub for $name {
            type Output = Self;
            /// Subtracts two matrices element-wise.
            #[inline]
            fn sub(self, rhs: Self) -> Self::Output {
                let mut out = self;
                out -= rhs;
                out
            }
        }

        impl Neg for $name {
            type Output = Self;
            /// Negates every element.
            #[inline]
            fn neg(self) -> Self::Output {
                Self {
                    rows: self.rows.map(|row| -row),
                }
            }
        }

        impl AddAssign for $name {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                for (row, other) in self.rows.iter_mut().zip(rhs.rows) {
                    *row += other;
                }
            }
        }

        impl SubAssign for $name {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                for (row, other) in self.rows.iter_mut().zip(rhs.rows) {
                    *row -= other;
                }
            }
        }

        impl MulAssign for $name {
            #[inline]
            fn mul_assign(&mut self, rhs: Self) {
                *self = *self * rhs;
            }
        }

        impl MulAssign<Real> for $name {
            #[inline]
            fn mul_assign(&mut self, rhs: Real) {
                *self = *self * rhs;
            }
        }

        impl AbsDiffEq for $name {
            type Epsilon = Real;

            fn default_epsilon() -> Real {
                Real::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: Real) -> bool {
                self.rows
                    .iter()
                    .zip(other.rows.iter())
                    .all(|(a, b)| a.abs_diff_eq(b, epsilon))
            }
        }

        impl RelativeEq for $name {
            fn default_max_relative() -> Real {
                Real::default_max_relative()
            }

            fn relative_eq(&self, other: &Self, epsilon: Real, max_relative: Real) -> bool {
                self.rows
                    .iter()
                    .zip(other.rows.iter())
                    .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
            }
        }
    };
}

impl_matrix_common!(Mat2, Vec2, 2, 4);
impl_matrix_common!(Mat3, Vec3, 3, 9);
impl_matrix_common!(Mat4, Vec4, 4, 16);

// --- Mat2 ---

impl Mat2 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0);

    /// Creates a matrix from its elements, row by row.
    #[inline]
    pub const fn new(m00: Real, m01: Real, m10: Real, m11: Real) -> Self {
        Self {
            rows: [Vec2::new(m00, m01), Vec2::new(m10, m11)],
        }
    }

    /// Takes the upper-left 2x2 block of a [`Mat3`].
    #[inline]
    pub fn from_mat3(m: &Mat3) -> Self {
        Self::from_fn(|r, c| m.rows[r][c])
    }

    /// Computes the determinant.
    #[inline]
    pub fn determinant(&self) -> Real {
        let [a, b] = self.rows;
        a.x * b.y - a.y * b.x
    }

    fn adjugate(&self) -> Self {
        let [a, b] = self.rows;
        Self::new(b.y, -a.y, -b.x, a.x)
    }
}

// --- Mat3 ---

impl Mat3 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self::from_rows([Vec3::X, Vec3::Y, Vec3::Z]);

    /// Creates a matrix from its elements, row by row.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub const fn new(
        m00: Real,
        m01: Real,
        m02: Real,
        m10: Real,
        m11: Real,
        m12: Real,
        m20: Real,
        m21: Real,
        m22: Real,
    ) -> Self {
        Self {
            rows: [
                Vec3::new(m00, m01, m02),
                Vec3::new(m10, m11, m12),
                Vec3::new(m20, m21, m22),
            ],
        }
    }

    /// Embeds a [`Mat2`] in the upper-left block, with `1` in the last diagonal slot.
    #[inline]
    pub fn from_mat2(m: &Mat2) -> Self {
        let mut out = Self::IDENTITY;
        for r in 0..2 {
            for c in 0..2 {
                out.rows[r][c] = m.rows[r][c];
            }
        }
        out
    }

    /// Takes the upper-left 3x3 block of a [`Mat4`], discarding translation.
    #[inline]
    pub fn from_mat4(m: &Mat4) -> Self {
        let [r0, r1, r2, _] = m.rows;
        Self::from_rows([r0.truncate(), r1.truncate(), r2.truncate()])
    }

    /// Creates a scaling matrix.
    #[inline]
    pub fn from_scale(scale: Vec3) -> Self {
        Self::new(scale.x, 0.0, 0.0, 0.0, scale.y, 0.0, 0.0, 0.0, scale.z)
    }

    /// Creates a right-handed rotation around the X-axis.
    pub fn from_rotation_x(angle: Radian) -> Self {
        let (s, c) = (runtime::sin(angle), runtime::cos(angle));
        Self::new(1.0, 0.0, 0.0, 0.0, c, -s, 0.0, s, c)
    }

    /// Creates a right-handed rotation around the Y-axis.
    pub fn from_rotation_y(angle: Radian) -> Self {
        let (s, c) = (runtime::sin(angle), runtime::cos(angle));
        Self::new(c, 0.0, s, 0.0, 1.0, 0.0, -s, 0.0, c)
    }

    /// Creates a right-handed rotation around the Z-axis.
    pub fn from_rotation_z(angle: Radian) -> Self {
        let (s, c) = (runtime::sin(angle), runtime::cos(angle));
        Self::new(c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0)
    }

    /// Creates a rotation of `angle` around `axis` (Rodrigues' formula).
    ///
    /// The axis is normalized by its exact length, so any non-zero axis gives a rotation.
    pub fn from_angle_axis(angle: Radian, axis: Vec3) -> Self {
        let Vec3 { x, y, z } = axis.normalize_exact();
        let (s, c) = (runtime::sin(angle), runtime::cos(angle));
        let t = 1.0 - c;
        Self::new(
            t * x * x + c,
            t * x * y - s * z,
            t * x * z + s * y,
            t * x * y + s * z,
            t * y * y + c,
            t * y * z - s * x,
            t * x * z - s * y,
            t * y * z + s * x,
            t * z * z + c,
        )
    }

    /// Creates the rotation matrix of a quaternion.
    #[inline]
    pub fn from_quat(q: Quaternion) -> Self {
        q.rotation_matrix()
    }

    /// Computes the determinant by cofactor expansion along the first row.
    #[inline]
    pub fn determinant(&self) -> Real {
        let [r0, r1, r2] = self.rows;
        r0.x * (r1.y * r2.z - r1.z * r2.y) - r0.y * (r1.x * r2.z - r1.z * r2.x)
            + r0.z * (r1.x * r2.y - r1.y * r2.x)
    }

    /// The transposed cofactor matrix.
    fn adjugate(&self) -> Self {
        let [a, b, c] = self.rows[0].to_array();
        let [d, e, f] = self.rows[1].to_array();
        let [g, h, i] = self.rows[2].to_array();
        Self::new(
            e * i - f * h,
            c * h - b * i,
            b * f - c * e,
            f * g - d * i,
            a * i - c * g,
            c * d - a * f,
            d * h - e * g,
            b * g - a * h,
            a * e - b * d,
        )
    }
}

impl From<Quaternion> for Mat3 {
    #[inline]
    fn from(q: Quaternion) -> Self {
        q.rotation_matrix()
    }
}

// --- Mat4 ---

/// The 2x2 minors of a 4x4 matrix, shared by its determinant and adjugate.
///
/// `s*` are built from the top two rows, `c*` from the bottom two.
struct Minors {
    s: [Real; 6],
    c: [Real; 6],
}

impl Minors {
    fn of(m: &Mat4) -> Self {
        let [r0, r1, r2, r3] = m.rows;
        Self {
            s: [
                r0.x * r1.y - r1.x * r0.y,
                r0.x * r1.z - r1.x * r0.z,
                r0.x * r1.w - r1.x * r0.w,
                r0.y * r1.z - r1.y * r0.z,
                r0.y * r1.w - r1.y * r0.w,
                r0.z * r1.w - r1.z * r0.w,
            ],
            c: [
                r2.x * r3.y - r3.x * r2.y,
                r2.x * r3.z - r3.x * r2.z,
                r2.x * r3.w - r3.x * r2.w,
                r2.y * r3.z - r3.y * r2.z,
                r2.y * r3.w - r3.y * r2.w,
                r2.z * r3.w - r3.z * r2.w,
            ],
        }
    }

    fn determinant(&self) -> Real {
        let (s, c) = (&self.s, &self.c);
        s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
    }
}

impl Mat4 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self::from_rows([Vec4::X, Vec4::Y, Vec4::Z, Vec4::W]);

    /// Creates a matrix from its rows given as arrays.
    #[inline]
    pub const fn new(rows: [[Real; 4]; 4]) -> Self {
        let [r0, r1, r2, r3] = rows;
        Self {
            rows: [
                Vec4::new(r0[0], r0[1], r0[2], r0[3]),
                Vec4::new(r1[0], r1[1], r1[2], r1[3]),
                Vec4::new(r2[0], r2[1], r2[2], r2[3]),
                Vec4::new(r3[0], r3[1], r3[2], r3[3]),
            ],
        }
    }

    /// Embeds a [`Mat3`] in the upper-left block, with no translation.
    #[inline]
    pub fn from_mat3(m: &Mat3) -> Self {
        let [r0, r1, r2] = m.rows;
        Self::from_rows([r0.extend(0.0), r1.extend(0.0), r2.extend(0.0), Vec4::W])
    }

    /// Creates a translation matrix.
    #[inline]
    pub fn from_translation(translation: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.rows[0].w = translation.x;
        m.rows[1].w = translation.y;
        m.rows[2].w = translation.z;
        m
    }

    /// Creates a scaling matrix.
    #[inline]
    pub fn from_scale(scale: Vec3) -> Self {
        Self::from_mat3(&Mat3::from_scale(scale))
    }

    /// Creates the rotation matrix of a quaternion.
    #[inline]
    pub fn from_quat(q: Quaternion) -> Self {
        Self::from_mat3(&q.rotation_matrix())
    }

    /// Transforms a point (`w = 1`), applying translation.
    #[inline]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.combine(point.extend(1.0)).truncate()
    }

    /// Transforms a direction (`w = 0`), ignoring translation.
    #[inline]
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.combine(vector.extend(0.0)).truncate()
    }

    /// Computes the determinant by Laplace expansion over the top two rows.
    #[inline]
    pub fn determinant(&self) -> Real {
        Minors::of(self).determinant()
    }

    fn adjugate(&self) -> Self {
        let minors = Minors::of(self);
        let (s, c) = (&minors.s, &minors.c);
        let [r0, r1, r2, r3] = self.rows;
        let [m00, m01, m02, m03] = r0.to_array();
        let [m10, m11, m12, m13] = r1.to_array();
        let [m20, m21, m22, m23] = r2.to_array();
        let [m30, m31, m32, m33] = r3.to_array();
        Self::new([
            [
                m11 * c[5] - m12 * c[4] + m13 * c[3],
                -m01 * c[5] + m02 * c[4] - m03 * c[3],
                m31 * s[5] - m32 * s[4] + m33 * s[3],
                -m21 * s[5] + m22 * s[4] - m23 * s[3],
            ],
            [
                -m10 * c[5] + m12 * c[2] - m13 * c[1],
                m00 * c[5] - m02 * c[2] + m03 * c[1],
                -m30 * s[5] + m32 * s[2] - m33 * s[1],
                m20 * s[5] - m22 * s[2] + m23 * s[1],
            ],
            [
                m10 * c[4] - m11 * c[2] + m13 * c[0],
                -m00 * c[4] + m01 * c[2] - m03 * c[0],
                m30 * s[4] - m31 * s[2] + m33 * s[0],
                -m20 * s[4] + m21 * s[2] - m23 * s[0],
            ],
            [
                -m10 * c[3] + m11 * c[1] - m12 * c[0],
                m00 * c[3] - m01 * c[1] + m02 * c[0],
                -m30 * s[3] + m31 * s[1] - m32 * s[0],
                m20 * s[3] - m21 * s[1] + m22 * s[0],
            ],
        ])
    }
}

impl From<Quaternion> for Mat4 {
    #[inline]
    fn from(q: Quaternion) -> Self {
        Self::from_quat(q)
    }
}

impl From<Mat3> for Mat4 {
    #[inline]
    fn from(m: Mat3) -> Self {
        Self::from_mat3(&m)
    }
}

impl From<Mat4> for Mat3 {
    #[inline]
    fn from(m: Mat4) -> Self {
        Self::from_mat4(&m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FRAC_PI_2, EPSILON};
    use approx::assert_relative_eq;

    fn sample_mat3() -> Mat3 {
        Mat3::new(2.0, -1.0, 0.5, 1.0, 3.0, -2.0, 0.0, 4.0, 1.0)
    }

    fn sample_mat4() -> Mat4 {
        Mat4::new([
            [1.0, 2.0, 0.0, 1.0],
            [0.0, 1.0, 3.0, -1.0],
            [2.0, 0.0, 1.0, 0.5],
            [1.0, -1.0, 0.0, 2.0],
        ])
    }

    // --- Tests for Mat2 ---

    #[test]
    fn test_mat2_identity_and_determinant() {
        assert_eq!(Mat2::IDENTITY * Mat2::IDENTITY, Mat2::IDENTITY);
        assert_eq!(Mat2::new(1.0, 0.0, 0.0, 1.0).determinant(), 1.0);
        assert_eq!(Mat2::new(3.0, 8.0, 4.0, 6.0).determinant(), -14.0);
    }

    #[test]
    fn test_mat2_inverse() {
        let m = Mat2::new(4.0, 7.0, 2.0, 6.0);
        assert_relative_eq!(m * m.inverse(), Mat2::IDENTITY, epsilon = EPSILON);
        assert_eq!(Mat2::ZERO.inverse(), Mat2::IDENTITY);
    }

    // --- Tests for Mat3 ---

    #[test]
    fn test_mat3_default_is_zero() {
        assert_eq!(Mat3::default(), Mat3::ZERO);
        assert_eq!(Mat3::IDENTITY.trace(), 3.0);
    }

    #[test]
    fn test_mat3_row_column_access() {
        let m = sample_mat3();
        assert_eq!(m[(0, 1)], -1.0);
        assert_eq!(m[(2, 1)], 4.0);
        assert_eq!(m.row(1), Vec3::new(1.0, 3.0, -2.0));
        assert_eq!(m.column(2), Vec3::new(0.5, -2.0, 1.0));
        assert_eq!(m.at(1, 2), Ok(-2.0));
        assert_eq!(
            m.at(3, 0),
            Err(MathError::MatrixIndexOutOfRange {
                row: 3,
                column: 0,
                size: 3
            })
        );
        assert!(m.at(0, 3).is_err());
    }

    #[test]
    fn test_mat3_at_mut() {
        let mut m = Mat3::ZERO;
        *m.at_mut(2, 0).unwrap() = 5.0;
        m[(0, 2)] = 7.0;
        assert_eq!(m.as_array(), &[0.0, 0.0, 7.0, 0.0, 0.0, 0.0, 5.0, 0.0, 0.0]);
        assert!(m.at_mut(0, 9).is_err());
    }

    #[test]
    #[should_panic]
    fn test_mat3_unchecked_out_of_range_panics() {
        let m = Mat3::IDENTITY;
        let _ = m[(3, 0)];
    }

    #[test]
    fn test_mat3_determinant() {
        // 2(3 + 8) + 1(1 - 0) + 0.5(4 - 0)
        assert_relative_eq!(sample_mat3().determinant(), 25.0, epsilon = EPSILON);
        assert_eq!(Mat3::IDENTITY.determinant(), 1.0);
        assert_eq!(Mat3::from_scale(Vec3::new(2.0, 3.0, 4.0)).determinant(), 24.0);
    }

    #[test]
    fn test_mat3_inverse() {
        let m = sample_mat3();
        let inv = m.inverse();
        assert_relative_eq!(m * inv, Mat3::IDENTITY, epsilon = EPSILON);
        assert_relative_eq!(inv * m, Mat3::IDENTITY, epsilon = EPSILON);

        let mut in_place = m;
        in_place.invert();
        assert_eq!(in_place, inv);
    }

    #[test]
    fn test_mat3_singular_inverse_is_identity() {
        assert_eq!(Mat3::ZERO.inverse(), Mat3::IDENTITY);
        let rank_two = Mat3::new(1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 0.0, 1.0, 1.0);
        assert_eq!(rank_two.determinant(), 0.0);
        assert_eq!(rank_two.inverse(), Mat3::IDENTITY);
    }

    #[test]
    fn test_mat3_transpose() {
        let m = sample_mat3();
        let t = m.transposed();
        assert_eq!(t.row(0), m.column(0));
        assert_eq!(t[(2, 0)], m[(0, 2)]);
        let mut in_place = m;
        in_place.transpose();
        assert_eq!(in_place, t);
        assert_eq!(Mat3::from_cols(m.rows), t);
    }

    #[test]
    fn test_mat3_combine_and_product() {
        let m = sample_mat3();
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(m.combine(v), Vec3::new(1.5, 1.0, 11.0));
        assert_eq!(m * v, m.combine(v));
        assert_eq!(m * Mat3::IDENTITY, m);
        assert_eq!(Mat3::IDENTITY * m, m);

        let a = Mat3::from_rotation_z(Radian::new(FRAC_PI_2));
        let b = Mat3::from_scale(Vec3::new(2.0, 1.0, 1.0));
        // Scale first, then rotate.
        assert_relative_eq!((a * b) * Vec3::X, Vec3::new(0.0, 2.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_mat3_rotations() {
        let quarter = Radian::new(FRAC_PI_2);
        assert_relative_eq!(Mat3::from_rotation_x(quarter) * Vec3::Y, Vec3::Z, epsilon = EPSILON);
        assert_relative_eq!(Mat3::from_rotation_y(quarter) * Vec3::Z, Vec3::X, epsilon = EPSILON);
        assert_relative_eq!(Mat3::from_rotation_z(quarter) * Vec3::X, Vec3::Y, epsilon = EPSILON);
        assert_relative_eq!(
            Mat3::from_angle_axis(quarter, Vec3::new(0.0, 0.0, 2.0)),
            Mat3::from_rotation_z(quarter),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_mat3_angle_axis_short_axis() {
        let angle = Radian::new(0.7);
        let m = Mat3::from_angle_axis(angle, Vec3::new(0.0, 1e-6, 0.0));
        assert_relative_eq!(m, Mat3::from_rotation_y(angle), epsilon = EPSILON);
        assert_relative_eq!(m.determinant(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_mat3_arithmetic() {
        let m = sample_mat3();
        assert_eq!(m + Mat3::ZERO, m);
        assert_eq!(m - m, Mat3::ZERO);
        assert_eq!(2.0 * m, m + m);
        assert_eq!((m * 2.0) / 2.0, m);
        assert_eq!(-(-m), m);
        let mut acc = Mat3::IDENTITY;
        acc *= m;
        acc *= 1.0;
        assert_eq!(acc, m);
    }

    #[test]
    fn test_mat3_size_casts() {
        let m2 = Mat2::new(1.0, 2.0, 3.0, 4.0);
        let m3 = Mat3::from_mat2(&m2);
        assert_eq!(m3.row(2), Vec3::Z);
        assert_eq!(Mat2::from_mat3(&m3), m2);
        let m4 = Mat4::from(sample_mat3());
        assert_eq!(m4.row(3), Vec4::W);
        assert_eq!(Mat3::from(m4), sample_mat3());
    }

    // --- Tests for Mat4 ---

    #[test]
    fn test_mat4_determinant() {
        assert_eq!(Mat4::IDENTITY.determinant(), 1.0);
        assert_eq!(Mat4::from_scale(Vec3::new(2.0, 2.0, 2.0)).determinant(), 8.0);
        let m = sample_mat4();
        // Determinant through the block structure agrees with the transpose.
        assert_relative_eq!(m.determinant(), m.transposed().determinant(), epsilon = EPSILON);
        assert_relative_eq!(m.determinant(), 23.5, epsilon = 1e-4);
    }

    #[test]
    fn test_mat4_inverse() {
        let m = sample_mat4();
        assert_relative_eq!(m * m.inverse(), Mat4::IDENTITY, epsilon = 1e-4);
        assert_eq!(Mat4::ZERO.inverse(), Mat4::IDENTITY);
    }

    #[test]
    fn test_mat4_translation() {
        let t = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.transform_point(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.transform_vector(Vec3::X), Vec3::X);
        assert_eq!(
            t.inverse().transform_point(Vec3::new(1.0, 2.0, 3.0)),
            Vec3::ZERO
        );
        assert_eq!(t.trace(), 4.0);
    }

    #[test]
    fn test_mat4_as_array_is_row_order() {
        let m = Mat4::from_translation(Vec3::new(5.0, 6.0, 7.0));
        let flat = m.as_array();
        assert_eq!(flat[3], 5.0);
        assert_eq!(flat[7], 6.0);
        assert_eq!(flat[11], 7.0);
        assert_eq!(flat[15], 1.0);
    }
}
