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

//! Euler angles: an orientation stored as roll, pitch, and yaw.
//!
//! The three angles use the same convention as [`Quaternion::from_angles`]:
//! yaw around Y, pitch around X, roll around Z, applied to column vectors as
//! `R = Ry(yaw) * Rx(pitch) * Rz(roll)`.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

use crate::angle::Radian;
use crate::matrix::{Mat3, Mat4};
use crate::quaternion::Quaternion;
use crate::trig::{self, runtime};
use crate::vector::Vec3;
use crate::Real;

/// An orientation expressed as three angles.
///
/// Values are stored as given. Call [`Euler::normalize`] to wrap them into
/// `(-π, π]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Euler {
    /// Rotation around the Z axis.
    pub roll: Radian,
    /// Rotation around the X axis.
    pub pitch: Radian,
    /// Rotation around the Y axis.
    pub yaw: Radian,
}

/// Wraps an angle into `(-π, π]`, for any number of revolutions.
fn wrap_angle(angle: Radian) -> Radian {
    if angle > Radian::NEG_HALF_REVOLUTION && angle <= Radian::HALF_REVOLUTION {
        return angle;
    }
    let wrapped = angle.constrained();
    if wrapped > Radian::HALF_REVOLUTION {
        wrapped - Radian::REVOLUTION
    } else {
        wrapped
    }
}

#[inline]
fn clamp_angle(angle: Radian, limit: Radian) -> Radian {
    angle.clamp(-limit, limit)
}

impl Euler {
    /// No rotation.
    pub const IDENTITY: Self = Self::new(Radian::ZERO, Radian::ZERO, Radian::ZERO);

    /// Creates a new set of Euler angles.
    #[inline]
    pub const fn new(roll: Radian, pitch: Radian, yaw: Radian) -> Self {
        Self { roll, pitch, yaw }
    }

    /// Returns the roll angle.
    #[inline]
    pub const fn roll(&self) -> Radian {
        self.roll
    }

    /// Returns the pitch angle.
    #[inline]
    pub const fn pitch(&self) -> Radian {
        self.pitch
    }

    /// Returns the yaw angle.
    #[inline]
    pub const fn yaw(&self) -> Radian {
        self.yaw
    }

    /// Decomposes the rotation of a quaternion.
    #[inline]
    pub fn from_quaternion(q: &Quaternion) -> Self {
        Self::from_rotation_matrix(&q.rotation_matrix())
    }

    /// Decomposes a 3x3 rotation matrix.
    ///
    /// Pitch is read from `-m[1][2]`. When it reaches a quarter revolution the
    /// matrix only determines `yaw - roll` (or `yaw + roll` facing down), so
    /// roll is pinned to zero and the whole rotation is assigned to yaw.
    pub fn from_rotation_matrix(m: &Mat3) -> Self {
        let pitch = trig::arcsin(crate::clamp(-m[(1, 2)], -1.0, 1.0));

        if pitch >= Radian::QUARTER_REVOLUTION {
            log::trace!("Gimbal lock at pitch {pitch}, roll pinned to zero.");
            let yaw = trig::arctan2(m[(0, 1)], m[(0, 0)]);
            return Self::new(Radian::ZERO, pitch, yaw);
        }
        if pitch <= Radian::NEG_QUARTER_REVOLUTION {
            log::trace!("Gimbal lock at pitch {pitch}, roll pinned to zero.");
            let yaw = trig::arctan2(-m[(0, 1)], m[(0, 0)]);
            return Self::new(Radian::ZERO, pitch, yaw);
        }

        let yaw = trig::arctan2(m[(0, 2)], m[(2, 2)]);
        let roll = trig::arctan2(m[(1, 0)], m[(1, 1)]);
        Self::new(roll, pitch, yaw)
    }

    /// Decomposes the rotation block of a 4x4 matrix.
    #[inline]
    pub fn from_rotation_mat4(m: &Mat4) -> Self {
        Self::from_rotation_matrix(&Mat3::from_mat4(m))
    }

    /// Builds the rotation matrix `Ry(yaw) * Rx(pitch) * Rz(roll)`.
    pub fn rotation_matrix(&self) -> Mat3 {
        let (sy, cy) = (runtime::sin(self.yaw), runtime::cos(self.yaw));
        let (sp, cp) = (runtime::sin(self.pitch), runtime::cos(self.pitch));
        let (sr, cr) = (runtime::sin(self.roll), runtime::cos(self.roll));

        Mat3::new(
            cy * cr + sy * sp * sr,
            -cy * sr + sy * sp * cr,
            sy * cp,
            cp * sr,
            cp * cr,
            -sp,
            -sy * cr + cy * sp * sr,
            sy * sr + cy * sp * cr,
            cy * cp,
        )
    }

    /// Builds the rotation matrix embedded in a 4x4 matrix.
    #[inline]
    pub fn rotation_mat4(&self) -> Mat4 {
        Mat4::from_mat3(&self.rotation_matrix())
    }

    /// Converts to a quaternion.
    #[inline]
    pub fn to_quaternion(&self) -> Quaternion {
        Quaternion::from_angles(self.yaw, self.pitch, self.roll)
    }

    /// The forward direction (`-Z`) after rotation.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.to_quaternion() * Vec3::NEG_Z
    }

    /// The rotated `(forward, right, up)` axes, i.e. `-Z`, `X`, and `Y`.
    pub fn axes(&self) -> (Vec3, Vec3, Vec3) {
        let q = self.to_quaternion();
        (q * Vec3::NEG_Z, q * Vec3::X, q * Vec3::Y)
    }

    /// Clamps each angle to `[-limit, limit]` for its own limit.
    pub fn clamp(&mut self, yaw: Radian, pitch: Radian, roll: Radian) -> &mut Self {
        self.yaw = clamp_angle(self.yaw, yaw);
        self.pitch = clamp_angle(self.pitch, pitch);
        self.roll = clamp_angle(self.roll, roll);
        self
    }

    /// Clamps yaw to `[-limit, limit]`.
    #[inline]
    pub fn clamp_yaw(&mut self, limit: Radian) -> &mut Self {
        self.yaw = clamp_angle(self.yaw, limit);
        self
    }

    /// Clamps pitch to `[-limit, limit]`.
    #[inline]
    pub fn clamp_pitch(&mut self, limit: Radian) -> &mut Self {
        self.pitch = clamp_angle(self.pitch, limit);
        self
    }

    /// Clamps roll to `[-limit, limit]`.
    #[inline]
    pub fn clamp_roll(&mut self, limit: Radian) -> &mut Self {
        self.roll = clamp_angle(self.roll, limit);
        self
    }

    /// Returns a copy with every angle wrapped into `(-π, π]`.
    pub fn normalized(&self) -> Self {
        Self::new(
            wrap_angle(self.roll),
            wrap_angle(self.pitch),
            wrap_angle(self.yaw),
        )
    }

    /// Wraps every angle into `(-π, π]` in place.
    #[inline]
    pub fn normalize(&mut self) -> &mut Self {
        *self = self.normalized();
        self
    }

    /// Adds to each angle.
    pub fn rotate(&mut self, roll: Radian, pitch: Radian, yaw: Radian) -> &mut Self {
        self.roll += roll;
        self.pitch += pitch;
        self.yaw += yaw;
        self
    }

    /// Exact comparison of every angle.
    #[inline]
    pub fn almost_equal(&self, other: &Self) -> bool {
        self.almost_equal_eps(other, 0.0)
    }

    /// Compares every angle with an absolute tolerance in radians.
    pub fn almost_equal_eps(&self, other: &Self, tolerance: Real) -> bool {
        self.roll.almost_equal_eps(other.roll, tolerance)
            && self.pitch.almost_equal_eps(other.pitch, tolerance)
            && self.yaw.almost_equal_eps(other.yaw, tolerance)
    }
}

impl From<Quaternion> for Euler {
    #[inline]
    fn from(q: Quaternion) -> Self {
        Self::from_quaternion(&q)
    }
}

impl From<Euler> for Quaternion {
    #[inline]
    fn from(e: Euler) -> Self {
        e.to_quaternion()
    }
}

impl From<Mat3> for Euler {
    #[inline]
    fn from(m: Mat3) -> Self {
        Self::from_rotation_matrix(&m)
    }
}

impl From<Mat4> for Euler {
    #[inline]
    fn from(m: Mat4) -> Self {
        Self::from_rotation_mat4(&m)
    }
}

impl From<Euler> for Mat3 {
    #[inline]
    fn from(e: Euler) -> Self {
        e.rotation_matrix()
    }
}

impl From<Euler> for Mat4 {
    #[inline]
    fn from(e: Euler) -> Self {
        e.rotation_mat4()
    }
}

// --- Operator Overloads ---

impl Add for Euler {
    type Output = Self;
    /// Adds the angles component-wise.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.roll + rhs.roll, self.pitch + rhs.pitch, self.yaw + rhs.yaw)
    }
}

impl Sub for Euler {
    type Output = Self;
    /// Subtracts the angles component-wise.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.roll - rhs.roll, self.pitch - rhs.pitch, self.yaw - rhs.yaw)
    }
}

impl Neg for Euler {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self::Output {
        Self::new(-self.roll, -self.pitch, -self.yaw)
    }
}

impl Mul<Real> for Euler {
    type Output = Self;
    /// Scales every angle.
    #[inline]
    fn mul(self, scalar: Real) -> Self::Output {
        Self::new(self.roll * scalar, self.pitch * scalar, self.yaw * scalar)
    }
}

impl Mul<Euler> for Real {
    type Output = Euler;
    #[inline]
    fn mul(self, rhs: Euler) -> Self::Output {
        rhs * self
    }
}

impl Div<Real> for Euler {
    type Output = Self;
    /// Divides every angle.
    #[inline]
    fn div(self, scalar: Real) -> Self::Output {
        Self::new(self.roll / scalar, self.pitch / scalar, self.yaw / scalar)
    }
}

impl Mul for Euler {
    type Output = Quaternion;
    /// Composes the two orientations as quaternions: `rhs` applies first.
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        self.to_quaternion() * rhs.to_quaternion()
    }
}

impl AddAssign for Euler {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.rotate(rhs.roll, rhs.pitch, rhs.yaw);
    }
}

impl SubAssign for Euler {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.rotate(-rhs.roll, -rhs.pitch, -rhs.yaw);
    }
}

impl MulAssign<Real> for Euler {
    #[inline]
    fn mul_assign(&mut self, rhs: Real) {
        *self = *self * rhs;
    }
}

impl DivAssign<Real> for Euler {
    #[inline]
    fn div_assign(&mut self, rhs: Real) {
        *self = *self / rhs;
    }
}

impl AbsDiffEq for Euler {
    type Epsilon = Real;

    fn default_epsilon() -> Real {
        Radian::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Real) -> bool {
        self.roll.abs_diff_eq(&other.roll, epsilon)
            && self.pitch.abs_diff_eq(&other.pitch, epsilon)
            && self.yaw.abs_diff_eq(&other.yaw, epsilon)
    }
}

impl RelativeEq for Euler {
    fn default_max_relative() -> Real {
        Radian::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Real, max_relative: Real) -> bool {
        self.roll.relative_eq(&other.roll, epsilon, max_relative)
            && self.pitch.relative_eq(&other.pitch, epsilon, max_relative)
            && self.yaw.relative_eq(&other.yaw, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FRAC_PI_2, PI, TAU};
    use approx::assert_relative_eq;

    const TOLERANCE: Real = 1e-5;

    fn euler(roll: Real, pitch: Real, yaw: Real) -> Euler {
        Euler::new(Radian::new(roll), Radian::new(pitch), Radian::new(yaw))
    }

    #[test]
    fn test_identity_conversions() {
        assert_eq!(Euler::default(), Euler::IDENTITY);
        assert_eq!(Euler::IDENTITY.to_quaternion(), Quaternion::IDENTITY);
        assert_eq!(Euler::IDENTITY.rotation_matrix(), Mat3::IDENTITY);
        assert_eq!(Euler::from_quaternion(&Quaternion::IDENTITY), Euler::IDENTITY);
    }

    #[test]
    fn test_matrix_matches_quaternion() {
        let e = euler(0.3, -0.6, 1.1);
        assert_relative_eq!(e.rotation_matrix(), e.to_quaternion().rotation_matrix(), epsilon = TOLERANCE);
        assert_relative_eq!(
            e.rotation_matrix(),
            Mat3::from_rotation_y(e.yaw) * Mat3::from_rotation_x(e.pitch) * Mat3::from_rotation_z(e.roll),
            epsilon = TOLERANCE
        );
        assert_eq!(Mat4::from(e), Mat4::from_mat3(&e.rotation_matrix()));
    }

    #[test]
    fn test_matrix_uses_full_precision_trig() {
        // Holds with or without the `cached-trig` feature.
        let e = euler(0.0, 0.4, 0.0);
        let m = e.rotation_matrix();
        assert_eq!(m[(1, 1)], runtime::cos(e.pitch));
        assert_eq!(m[(1, 2)], -runtime::sin(e.pitch));
    }

    #[test]
    fn test_round_trip_away_from_gimbal_lock() {
        let e = euler(0.3, -0.6, 1.1);
        assert_relative_eq!(Euler::from_rotation_matrix(&e.rotation_matrix()), e, epsilon = TOLERANCE);
        assert_relative_eq!(Euler::from_quaternion(&e.to_quaternion()), e, epsilon = TOLERANCE);
        assert_relative_eq!(Euler::from_rotation_mat4(&e.rotation_mat4()), e, epsilon = TOLERANCE);
    }

    #[test]
    fn test_gimbal_lock_pins_roll_to_zero() {
        let up = euler(0.3, FRAC_PI_2, 0.5);
        let decomposed = Euler::from_rotation_matrix(&up.rotation_matrix());
        assert_eq!(decomposed.roll, Radian::ZERO);
        assert_relative_eq!(decomposed.pitch.value(), FRAC_PI_2, epsilon = TOLERANCE);
        assert_relative_eq!(decomposed.yaw.value(), 0.2, epsilon = TOLERANCE);
        assert_relative_eq!(decomposed.rotation_matrix(), up.rotation_matrix(), epsilon = TOLERANCE);

        let down = euler(0.3, -FRAC_PI_2, 0.5);
        let decomposed = Euler::from_rotation_matrix(&down.rotation_matrix());
        assert_eq!(decomposed.roll, Radian::ZERO);
        assert_relative_eq!(decomposed.yaw.value(), 0.8, epsilon = TOLERANCE);
        assert_relative_eq!(decomposed.rotation_matrix(), down.rotation_matrix(), epsilon = TOLERANCE);
    }

    #[test]
    fn test_direction_and_axes() {
        let e = euler(0.0, 0.0, FRAC_PI_2);
        // A quarter yaw turns -Z toward -X.
        assert_relative_eq!(e.direction(), Vec3::new(-1.0, 0.0, 0.0), epsilon = TOLERANCE);
        let (forward, right, up) = e.axes();
        assert_relative_eq!(forward, e.direction(), epsilon = TOLERANCE);
        assert_relative_eq!(right, Vec3::new(0.0, 0.0, -1.0), epsilon = TOLERANCE);
        assert_relative_eq!(up, Vec3::Y, epsilon = TOLERANCE);
    }

    #[test]
    fn test_clamp() {
        let mut e = euler(-2.0, 0.5, 3.0);
        e.clamp(Radian::new(1.0), Radian::new(1.0), Radian::new(1.0));
        assert_eq!(e, euler(-1.0, 0.5, 1.0));

        let mut e = euler(-2.0, 2.0, 2.0);
        e.clamp_roll(Radian::new(0.5)).clamp_pitch(Radian::new(1.5));
        assert_eq!(e, euler(-0.5, 1.5, 2.0));
        e.clamp_yaw(Radian::new(0.25));
        assert_eq!(e.yaw, Radian::new(0.25));
    }

    #[test]
    fn test_normalize_wraps_into_half_open_range() {
        let mut e = euler(PI + 0.5, -PI - 0.5, 7.0 * TAU + 0.25);
        e.normalize();
        assert_relative_eq!(e.roll.value(), -PI + 0.5, epsilon = 1e-4);
        assert_relative_eq!(e.pitch.value(), PI - 0.5, epsilon = 1e-4);
        assert_relative_eq!(e.yaw.value(), 0.25, epsilon = 1e-4);

        // The upper bound is included, the lower bound maps to it.
        assert_eq!(euler(PI, 0.0, 0.0).normalized().roll.value(), PI);
        assert_relative_eq!(euler(-PI, 0.0, 0.0).normalized().roll.value(), PI, epsilon = 1e-5);
        // Values inside the range are untouched.
        assert_eq!(euler(0.1, -0.2, 3.0).normalized(), euler(0.1, -0.2, 3.0));
    }

    #[test]
    fn test_rotate_and_arithmetic() {
        let mut e = euler(0.1, 0.2, 0.3);
        e.rotate(Radian::new(1.0), Radian::new(1.0), Radian::new(1.0));
        assert_relative_eq!(e, euler(1.1, 1.2, 1.3), epsilon = TOLERANCE);

        let a = euler(1.0, 2.0, 3.0);
        let b = euler(0.5, 0.5, 0.5);
        assert_eq!(a + b, euler(1.5, 2.5, 3.5));
        assert_eq!(a - b, euler(0.5, 1.5, 2.5));
        assert_eq!(a * 2.0, euler(2.0, 4.0, 6.0));
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!(a / 2.0, euler(0.5, 1.0, 1.5));
        assert_eq!(-a, euler(-1.0, -2.0, -3.0));

        let mut c = a;
        c += b;
        c -= b;
        c *= 4.0;
        c /= 4.0;
        assert_eq!(c, a);
    }

    #[test]
    fn test_euler_product_is_quaternion_product() {
        let a = euler(0.1, 0.2, 0.3);
        let b = euler(-0.4, 0.5, 0.6);
        assert_eq!(a * b, a.to_quaternion() * b.to_quaternion());
    }

    #[test]
    fn test_almost_equal() {
        let a = euler(0.1, 0.2, 0.3);
        assert!(a.almost_equal(&a));
        let b = euler(0.1, 0.2, 0.3 + 1e-3);
        assert!(!a.almost_equal(&b));
        assert!(a.almost_equal_eps(&b, 1e-2));
    }

    #[test]
    fn test_serde_round_trip() {
        let e = euler(0.25, -0.5, 1.0);
        let json = serde_json::to_string(&e).unwrap();
        assert_eq!(json, r#"{"roll":0.25,"pitch":-0.5,"yaw":1.0}"#);
        let back: Euler = serde_json::from_str(&json).unwrap();
        assert_eq!(back, e);
    }
}
