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

//! Provides a Quaternion type for representing 3D rotations.

use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

use crate::angle::Radian;
use crate::error::{MathError, Result};
use crate::matrix::{Mat3, Mat4};
use crate::trig::{self, runtime};
use crate::vector::Vec3;
use crate::{Real, EPSILON};

/// Represents a quaternion for 3D rotations.
///
/// A quaternion is stored as `(x, y, z, w)`, where `[x, y, z]` is the vector part
/// and `w` is the scalar part. Rotations use unit quaternions; `q` and `-q`
/// describe the same rotation.
///
/// Orientation angles follow one convention throughout the crate: the rotation
/// is `yaw` around Y, then `pitch` around X, then `roll` around Z, composed as
/// `q = q_yaw * q_pitch * q_roll` and applied to column vectors.
#[derive(
    Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize,
)]
#[repr(C)]
pub struct Quaternion {
    /// The x component of the vector part.
    pub x: Real,
    /// The y component of the vector part.
    pub y: Real,
    /// The z component of the vector part.
    pub z: Real,
    /// The scalar (real) part.
    pub w: Real,
}

/// Applies the half-revolution correction used by the named angle extractors.
#[inline]
fn wrap_half_revolution(angle: Radian) -> Radian {
    if angle >= Radian::HALF_REVOLUTION {
        angle - Radian::HALF_REVOLUTION
    } else {
        angle
    }
}

impl Quaternion {
    /// The identity quaternion, representing no rotation.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// The quaternion with every component set to `0`.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a new quaternion from its raw components.
    ///
    /// This does not normalize. Prefer the rotation constructors for orientations.
    #[inline]
    pub const fn new(x: Real, y: Real, z: Real, w: Real) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a real quaternion `(0, 0, 0, w)`.
    #[inline]
    pub const fn from_scalar(w: Real) -> Self {
        Self::new(0.0, 0.0, 0.0, w)
    }

    /// Creates a rotation of `angle` around `axis`.
    ///
    /// The axis is normalized by its exact length, so any non-zero axis gives a
    /// unit quaternion. A zero axis yields a pure scalar quaternion.
    pub fn from_angle_axis(angle: Radian, axis: Vec3) -> Self {
        let axis = axis.normalize_exact();
        let half = angle * 0.5;
        let s = runtime::sin(half);
        Self::new(axis.x * s, axis.y * s, axis.z * s, runtime::cos(half))
    }

    /// Creates a rotation from yaw (around Y), pitch (around X), and roll (around Z).
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_math::{Quaternion, Radian, Vec3};
    ///
    /// let q = Quaternion::from_angles(Radian::QUARTER_REVOLUTION, Radian::ZERO, Radian::ZERO);
    /// let v = q * Vec3::Z;
    /// assert!((v.x - 1.0).abs() < 1e-6);
    /// ```
    pub fn from_angles(yaw: Radian, pitch: Radian, roll: Radian) -> Self {
        Self::from_angle_axis(yaw, Vec3::Y)
            * Self::from_angle_axis(pitch, Vec3::X)
            * Self::from_angle_axis(roll, Vec3::Z)
    }

    /// Creates a rotation whose rotated basis is `(x_axis, y_axis, z_axis)`.
    ///
    /// The axes must be orthonormal; they become the columns of the rotation matrix.
    pub fn from_axes(x_axis: Vec3, y_axis: Vec3, z_axis: Vec3) -> Self {
        Self::from_rotation_matrix(&Mat3::from_cols([x_axis, y_axis, z_axis]))
    }

    /// Creates a quaternion from a 3x3 rotation matrix (Shoemake).
    ///
    /// When the trace is positive the scalar part is recovered first. Otherwise
    /// the largest diagonal element picks which vector component to recover first,
    /// which avoids dividing by a tiny number near half-turn rotations.
    pub fn from_rotation_matrix(m: &Mat3) -> Self {
        let trace = m.trace();
        if trace > 0.0 {
            let root = (trace + 1.0).sqrt();
            let s = 0.5 / root;
            return Self::new(
                (m[(2, 1)] - m[(1, 2)]) * s,
                (m[(0, 2)] - m[(2, 0)]) * s,
                (m[(1, 0)] - m[(0, 1)]) * s,
                0.5 * root,
            );
        }

        const NEXT: [usize; 3] = [1, 2, 0];
        let mut i = 0;
        if m[(1, 1)] > m[(0, 0)] {
            i = 1;
        }
        if m[(2, 2)] > m[(i, i)] {
            i = 2;
        }
        let j = NEXT[i];
        let k = NEXT[j];

        let root = (m[(i, i)] - m[(j, j)] - m[(k, k)] + 1.0).sqrt();
        let s = 0.5 / root;
        let mut q = Self::ZERO;
        q[i] = 0.5 * root;
        q[j] = (m[(j, i)] + m[(i, j)]) * s;
        q[k] = (m[(k, i)] + m[(i, k)]) * s;
        q.w = (m[(k, j)] - m[(j, k)]) * s;
        q
    }

    /// Creates a quaternion from the rotation block of a 4x4 matrix.
    #[inline]
    pub fn from_rotation_mat4(m: &Mat4) -> Self {
        Self::from_rotation_matrix(&Mat3::from_mat4(m))
    }

    // --- Accessors ---

    /// Returns a component in `x, y, z, w` order, or an error if `index` is out of range.
    pub fn at(&self, index: usize) -> Result<Real> {
        self.as_array()
            .get(index)
            .copied()
            .ok_or(MathError::IndexOutOfRange { index, len: 4 })
    }

    /// Returns a mutable component, or an error if `index` is out of range.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut Real> {
        let components: &mut [Real; 4] = bytemuck::cast_mut(self);
        components
            .get_mut(index)
            .ok_or(MathError::IndexOutOfRange { index, len: 4 })
    }

    /// Views the components as `[x, y, z, w]`.
    #[inline]
    pub fn as_array(&self) -> &[Real; 4] {
        bytemuck::cast_ref(self)
    }

    // --- Extraction ---

    /// Returns the rotation matrix of this quaternion.
    ///
    /// Non-unit quaternions are scaled by `2 / |q|²`, so they produce the
    /// rotation of their normalized form. The zero quaternion yields the identity.
    pub fn rotation_matrix(&self) -> Mat3 {
        let n = self.magnitude_squared();
        if n == 0.0 {
            return Mat3::IDENTITY;
        }
        let s = 2.0 / n;
        let Self { x, y, z, w } = *self;
        let (xs, ys, zs) = (x * s, y * s, z * s);
        let (wx, wy, wz) = (w * xs, w * ys, w * zs);
        let (xx, xy, xz) = (x * xs, x * ys, x * zs);
        let (yy, yz, zz) = (y * ys, y * zs, z * zs);

        Mat3::new(
            1.0 - (yy + zz),
            xy - wz,
            xz + wy,
            xy + wz,
            1.0 - (xx + zz),
            yz - wx,
            xz - wy,
            yz + wx,
            1.0 - (xx + yy),
        )
    }

    /// Returns the rotation matrix of this quaternion, embedded in a 4x4 matrix.
    #[inline]
    pub fn rotation_mat4(&self) -> Mat4 {
        Mat4::from_mat3(&self.rotation_matrix())
    }

    /// Returns the rotation angle and unit axis.
    ///
    /// The angle is in `[0, 2π]`. A quaternion with no vector part has no
    /// defined axis: the result is then `(0, Vec3::X)`.
    pub fn angle_axis(&self) -> (Radian, Vec3) {
        let len_sq = self.x * self.x + self.y * self.y + self.z * self.z;
        if len_sq > 0.0 {
            let angle = trig::arccos(crate::clamp(self.w, -1.0, 1.0)) * 2.0;
            let inv_len = 1.0 / len_sq.sqrt();
            (
                angle,
                Vec3::new(self.x * inv_len, self.y * inv_len, self.z * inv_len),
            )
        } else {
            (Radian::ZERO, Vec3::X)
        }
    }

    /// The rotated X axis (first column of the rotation matrix).
    #[inline]
    pub fn x_axis(&self) -> Vec3 {
        self.rotation_matrix().column(0)
    }

    /// The rotated Y axis (second column of the rotation matrix).
    #[inline]
    pub fn y_axis(&self) -> Vec3 {
        self.rotation_matrix().column(1)
    }

    /// The rotated Z axis (third column of the rotation matrix).
    #[inline]
    pub fn z_axis(&self) -> Vec3 {
        self.rotation_matrix().column(2)
    }

    /// The three rotated axes `(x, y, z)`.
    #[inline]
    pub fn axes(&self) -> (Vec3, Vec3, Vec3) {
        let m = self.rotation_matrix();
        (m.column(0), m.column(1), m.column(2))
    }

    /// The roll angle (around Z) of the yaw-pitch-roll decomposition.
    ///
    /// A result of exactly half a revolution is shifted down by half a revolution.
    pub fn roll(&self) -> Radian {
        let Self { x, y, z, w } = *self;
        wrap_half_revolution(trig::arctan2(
            2.0 * (x * y + w * z),
            1.0 - 2.0 * (x * x + z * z),
        ))
    }

    /// The pitch angle (around X) of the yaw-pitch-roll decomposition, in `[-π/2, π/2]`.
    pub fn pitch(&self) -> Radian {
        let Self { x, y, z, w } = *self;
        wrap_half_revolution(trig::arcsin(crate::clamp(
            2.0 * (w * x - y * z),
            -1.0,
            1.0,
        )))
    }

    /// The yaw angle (around Y) of the yaw-pitch-roll decomposition.
    ///
    /// A result of exactly half a revolution is shifted down by half a revolution.
    pub fn yaw(&self) -> Radian {
        let Self { x, y, z, w } = *self;
        wrap_half_revolution(trig::arctan2(
            2.0 * (x * z + w * y),
            1.0 - 2.0 * (x * x + y * y),
        ))
    }

    /// The roll angle, reading the quaternion as a rotation around Z only.
    pub fn reprojected_roll(&self) -> Radian {
        let Self { x, y, z, w } = *self;
        trig::arctan2(2.0 * (x * y + w * z), 1.0 - 2.0 * (y * y + z * z))
    }

    /// The pitch angle, reading the quaternion as a rotation around X only.
    pub fn reprojected_pitch(&self) -> Radian {
        let Self { x, y, z, w } = *self;
        trig::arctan2(2.0 * (y * z + w * x), 1.0 - 2.0 * (x * x + z * z))
    }

    /// The yaw angle, reading the quaternion as a rotation around Y only.
    pub fn reprojected_yaw(&self) -> Radian {
        let Self { x, y, z, w } = *self;
        trig::arctan2(2.0 * (x * z + w * y), 1.0 - 2.0 * (x * x + y * y))
    }

    // --- Algebra ---

    /// Calculates the squared length (magnitude) of the quaternion.
    #[inline]
    pub fn magnitude_squared(&self) -> Real {
        self.dot(*self)
    }

    /// Calculates the length (magnitude) of the quaternion.
    #[inline]
    pub fn magnitude(&self) -> Real {
        self.magnitude_squared().sqrt()
    }

    /// Computes the dot product of two quaternions.
    #[inline]
    pub fn dot(&self, other: Self) -> Real {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Computes the conjugate of the quaternion, which negates the vector part.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Returns a copy with every component divided by the magnitude.
    ///
    /// Any non-zero quaternion keeps its orientation, however small. The
    /// components are rescaled by the largest one first so tiny magnitudes do
    /// not underflow. The zero quaternion has no orientation; it becomes the identity.
    pub fn normalized(&self) -> Self {
        let scale = self
            .as_array()
            .iter()
            .fold(0.0 as Real, |max, c| max.max(c.abs()));
        if scale == 0.0 {
            return Self::IDENTITY;
        }
        let scaled = *self / scale;
        scaled / scaled.magnitude()
    }

    /// Scales the quaternion to unit length in place. See [`Quaternion::normalized`].
    #[inline]
    pub fn normalize(&mut self) -> &mut Self {
        *self = self.normalized();
        self
    }

    /// Returns the multiplicative inverse, `conjugate / |q|²`.
    ///
    /// The zero quaternion has no inverse; the result is then all zeros.
    pub fn inverse(&self) -> Self {
        let mag_sq = self.magnitude_squared();
        if mag_sq == 0.0 {
            log::trace!("Inverting a zero quaternion, result is zero.");
            return Self::ZERO;
        }
        self.conjugate() * (1.0 / mag_sq)
    }

    /// Inverts the quaternion in place. See [`Quaternion::inverse`].
    #[inline]
    pub fn invert(&mut self) -> &mut Self {
        *self = self.inverse();
        self
    }

    /// Rotates a vector, assuming `self` is a unit quaternion.
    ///
    /// Uses `v + 2w(u × v) + 2u × (u × v)` with `u` the vector part, which
    /// needs two cross products instead of a full matrix.
    #[inline]
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        let u = Vec3::new(self.x, self.y, self.z);
        let t = u.cross(v) * 2.0;
        v + t * self.w + u.cross(t)
    }

    /// Performs a Spherical Linear Interpolation (Slerp) between two quaternions.
    ///
    /// Follows the shortest path: when the inputs lie in opposite hemispheres
    /// `end` is negated. `t` is clamped to `[0.0, 1.0]`.
    pub fn slerp(start: Self, end: Self, t: Real) -> Self {
        let t = crate::saturate(t);
        let mut cos_theta = start.dot(end);
        let mut end = end;
        if cos_theta < 0.0 {
            cos_theta = -cos_theta;
            end = -end;
        }

        if cos_theta > 1.0 - EPSILON {
            // Nearly parallel: fall back to a normalized lerp.
            return (start * (1.0 - t) + end * t).normalized();
        }

        let angle = cos_theta.acos();
        let inv_sin = 1.0 / angle.sin();
        start * (((1.0 - t) * angle).sin() * inv_sin) + end * ((t * angle).sin() * inv_sin)
    }
}

impl Default for Quaternion {
    /// Returns the identity quaternion.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Mat3> for Quaternion {
    #[inline]
    fn from(m: Mat3) -> Self {
        Self::from_rotation_matrix(&m)
    }
}

impl From<Mat4> for Quaternion {
    #[inline]
    fn from(m: Mat4) -> Self {
        Self::from_rotation_mat4(&m)
    }
}

// --- Operator Overloads ---

impl Mul for Quaternion {
    type Output = Self;
    /// Combines two rotations using the Hamilton product: `rhs` applies first.
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        }
    }
}

impl Mul<Vec3> for Quaternion {
    type Output = Vec3;
    /// Same as [`Quaternion::rotate`].
    #[inline]
    fn mul(self, rhs: Vec3) -> Self::Output {
        self.rotate(rhs)
    }
}

impl Div for Quaternion {
    type Output = Self;
    /// Multiplies by the inverse of `rhs`.
    #[inline]
    fn div(self, rhs: Self) -> Self::Output {
        self * rhs.inverse()
    }
}

impl Add for Quaternion {
    type Output = Self;
    /// Adds two quaternions component-wise.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl Sub for Quaternion {
    type Output = Self;
    /// Subtracts two quaternions component-wise.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w)
    }
}

impl Mul<Real> for Quaternion {
    type Output = Self;
    /// Scales all components.
    #[inline]
    fn mul(self, scalar: Real) -> Self::Output {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar, self.w * scalar)
    }
}

impl Mul<Quaternion> for Real {
    type Output = Quaternion;
    /// Scales all components.
    #[inline]
    fn mul(self, rhs: Quaternion) -> Self::Output {
        rhs * self
    }
}

impl Div<Real> for Quaternion {
    type Output = Self;
    /// Divides all components.
    #[inline]
    fn div(self, scalar: Real) -> Self::Output {
        self * (1.0 / scalar)
    }
}

impl Neg for Quaternion {
    type Output = Self;
    /// Negates all components. The result is the same rotation.
    #[inline]
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl MulAssign for Quaternion {
    /// Combines this rotation with another, applied first.
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl DivAssign for Quaternion {
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl AddAssign for Quaternion {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Quaternion {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign<Real> for Quaternion {
    #[inline]
    fn mul_assign(&mut self, rhs: Real) {
        *self = *self * rhs;
    }
}

impl DivAssign<Real> for Quaternion {
    #[inline]
    fn div_assign(&mut self, rhs: Real) {
        *self = *self / rhs;
    }
}

impl Index<usize> for Quaternion {
    type Output = Real;
    /// Accesses a component in `x, y, z, w` order.
    ///
    /// # Panics
    /// Panics if `index` is greater than 3. Use [`Quaternion::at`] for a checked access.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_array()[index]
    }
}

impl IndexMut<usize> for Quaternion {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        let components: &mut [Real; 4] = bytemuck::cast_mut(self);
        &mut components[index]
    }
}

impl AbsDiffEq for Quaternion {
    type Epsilon = Real;

    fn default_epsilon() -> Real {
        Real::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Real) -> bool {
        self.as_array()
            .iter()
            .zip(other.as_array())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Quaternion {
    fn default_max_relative() -> Real {
        Real::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Real, max_relative: Real) -> bool {
        self.as_array()
            .iter()
            .zip(other.as_array())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
