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

//! Integration tests for the quaternion, matrix, and Euler conversion triangle.

use approx::{abs_diff_eq, assert_relative_eq};
use bit_math::{Euler, Mat3, Mat4, Quaternion, Radian, Real, Vec3, FRAC_PI_2, PI};
use proptest::prelude::*;

const TOLERANCE: Real = 1e-3;

fn same_rotation(a: Quaternion, b: Quaternion) -> bool {
    a.dot(b).abs() > 1.0 - TOLERANCE
}

fn euler(roll: Real, pitch: Real, yaw: Real) -> Euler {
    Euler::new(Radian::new(roll), Radian::new(pitch), Radian::new(yaw))
}

#[test]
fn test_identity_through_every_path() {
    let e = Euler::IDENTITY;
    assert_eq!(Quaternion::from(e), Quaternion::IDENTITY);
    assert_eq!(Mat3::from(e), Mat3::IDENTITY);
    assert_eq!(Mat4::from(e), Mat4::IDENTITY);
    assert_eq!(Quaternion::from(Mat3::IDENTITY), Quaternion::IDENTITY);
    assert_eq!(Euler::from(Mat4::IDENTITY), Euler::IDENTITY);
}

#[test]
fn test_matrix_rotation_is_orthonormal() {
    let m = Quaternion::from_angles(Radian::new(0.4), Radian::new(-1.2), Radian::new(2.9))
        .rotation_matrix();
    assert_relative_eq!(m * m.transposed(), Mat3::IDENTITY, epsilon = TOLERANCE);
    assert_relative_eq!(m.determinant(), 1.0, epsilon = TOLERANCE);
    assert_relative_eq!(m.inverse(), m.transposed(), epsilon = TOLERANCE);
}

#[test]
fn test_mat4_keeps_rotation_and_translation_apart() {
    let q = Quaternion::from_angle_axis(Radian::new(FRAC_PI_2), Vec3::Y);
    let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)) * q.rotation_mat4();
    let moved = m.transform_point(Vec3::Z);
    assert_relative_eq!(moved, Vec3::new(2.0, 2.0, 3.0), epsilon = TOLERANCE);
    assert!(same_rotation(Quaternion::from_rotation_mat4(&m), q));
}

#[test]
fn test_half_turn_around_diagonal_axis() {
    let axis = Vec3::new(1.0, 1.0, 1.0).normalize();
    let q = Quaternion::from_angle_axis(Radian::new(PI), axis);
    let back = Quaternion::from_rotation_matrix(&q.rotation_matrix());
    assert!(same_rotation(q, back));
    let (angle, out_axis) = back.angle_axis();
    assert_relative_eq!(angle.value(), PI, epsilon = TOLERANCE);
    assert_relative_eq!(out_axis.dot(axis).abs(), 1.0, epsilon = TOLERANCE);
}

/// Tolerance for `M * M.inverse()` against the identity.
const INVERSE_TOLERANCE: Real = 1e-4;

/// Off-diagonal entries stay below the diagonal magnitude, which keeps the
/// generated matrices diagonally dominant and therefore well conditioned.
fn diagonal_entry(flip: bool, size: usize) -> Real {
    let magnitude = 2.0 * size as Real;
    if flip {
        -magnitude
    } else {
        magnitude
    }
}

proptest! {
    #[test]
    fn mat3_times_inverse_is_identity(
        values in prop::array::uniform9(-1.0 as Real..1.0),
        flips in prop::array::uniform3(any::<bool>()),
    ) {
        let m = Mat3::from_fn(|r, c| {
            values[r * 3 + c] + if r == c { diagonal_entry(flips[r], 3) } else { 0.0 }
        });
        prop_assume!(m.determinant().abs() > 0.1);
        let inverse = m.inverse();
        prop_assert!(abs_diff_eq!(m * inverse, Mat3::IDENTITY, epsilon = INVERSE_TOLERANCE), "{m:?}");
        prop_assert!(abs_diff_eq!(inverse * m, Mat3::IDENTITY, epsilon = INVERSE_TOLERANCE), "{m:?}");
    }

    #[test]
    fn mat4_times_inverse_is_identity(
        values in prop::array::uniform16(-1.0 as Real..1.0),
        flips in prop::array::uniform4(any::<bool>()),
    ) {
        let m = Mat4::from_fn(|r, c| {
            values[r * 4 + c] + if r == c { diagonal_entry(flips[r], 4) } else { 0.0 }
        });
        prop_assume!(m.determinant().abs() > 0.1);
        let inverse = m.inverse();
        prop_assert!(abs_diff_eq!(m * inverse, Mat4::IDENTITY, epsilon = INVERSE_TOLERANCE), "{m:?}");
        prop_assert!(abs_diff_eq!(inverse * m, Mat4::IDENTITY, epsilon = INVERSE_TOLERANCE), "{m:?}");
    }

    #[test]
    fn euler_survives_every_representation(
        roll in -3.0 as Real..3.0,
        pitch in -1.5 as Real..1.5,
        yaw in -3.0 as Real..3.0,
    ) {
        let e = euler(roll, pitch, yaw);
        let via_quaternion = Euler::from(Quaternion::from(e));
        let via_matrix = Euler::from(Mat3::from(e));
        prop_assert!(via_quaternion.almost_equal_eps(&e, TOLERANCE), "{via_quaternion:?} vs {e:?}");
        prop_assert!(via_matrix.almost_equal_eps(&e, TOLERANCE), "{via_matrix:?} vs {e:?}");
    }

    #[test]
    fn quaternion_and_matrix_rotate_alike(
        yaw in -PI..PI,
        pitch in -PI..PI,
        roll in -PI..PI,
        x in -10.0 as Real..10.0,
        y in -10.0 as Real..10.0,
        z in -10.0 as Real..10.0,
    ) {
        let q = Quaternion::from_angles(Radian::new(yaw), Radian::new(pitch), Radian::new(roll));
        let v = Vec3::new(x, y, z);
        let by_quaternion = q * v;
        let by_matrix = q.rotation_matrix() * v;
        prop_assert!((by_quaternion - by_matrix).length() < 1e-2);
        prop_assert!((by_quaternion.length() - v.length()).abs() < 1e-2);

        let back = Quaternion::from_rotation_matrix(&q.rotation_matrix());
        prop_assert!(same_rotation(q, back), "{q:?} vs {back:?}");
    }

    #[test]
    fn angle_axis_round_trips(
        angle in 0.01 as Real..(PI - 0.01),
        x in -1.0 as Real..1.0,
        y in -1.0 as Real..1.0,
        z in -1.0 as Real..1.0,
    ) {
        let axis = Vec3::new(x, y, z);
        prop_assume!(axis.length() > 0.1);
        let axis = axis.normalize();

        let (out_angle, out_axis) = Quaternion::from_angle_axis(Radian::new(angle), axis).angle_axis();
        prop_assert!((out_angle.value() - angle).abs() < TOLERANCE);
        prop_assert!((out_axis - axis).length() < 1e-2);
    }
}
