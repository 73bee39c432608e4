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

//! Strongly-typed numeric primitives for rotation math.
//!
//! This crate provides unit-tagged angles ([`Radian`], [`Degree`], [`Gradian`]),
//! an IEEE-754 binary16 codec ([`Half`]), a trigonometry layer with a runtime and
//! a lookup-table backend, and the rotation conversion triangle formed by
//! [`Mat3`]/[`Mat4`], [`Quaternion`], and [`Euler`].
//!
//! # Build-time configuration
//!
//! * `double-precision` feature: [`Real`] becomes `f64` instead of `f32`.
//! * `cached-trig` feature: the top-level functions of [`trig`] read from a sine table.
//!   Rotation constructors keep full-precision trigonometry either way.
//! * `BIT_MATH_TRIG_TABLE_SIZE` environment variable: number of table entries
//!   (defaults to `1024`).
//!
//! # Examples
//!
//! ```
//! use bit_math::{angle_cast, Degree, Radian};
//!
//! let half_turn = angle_cast::<bit_math::angle::Deg, _>(Radian::HALF_REVOLUTION);
//! assert!(half_turn.almost_equal_eps(Degree::new(180.0), 1e-4));
//! ```

// --- Scalar Type ---

/// The scalar type used by every angle, vector, matrix, quaternion, and Euler triple.
#[cfg(not(feature = "double-precision"))]
pub type Real = f32;

/// The scalar type used by every angle, vector, matrix, quaternion, and Euler triple.
#[cfg(feature = "double-precision")]
pub type Real = f64;

// --- Fundamental Constants ---

#[cfg(not(feature = "double-precision"))]
pub use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};
#[cfg(feature = "double-precision")]
pub use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

/// A small constant for geometric comparisons (vector and quaternion normalization).
pub const EPSILON: Real = 1e-5;

/// The tolerance used by the scalar [`almost_equal`].
pub const DEFAULT_TOLERANCE: Real = 1e-6;

// --- Declare Sub-Modules ---

pub mod angle;
pub mod error;
pub mod euler;
pub mod half;
pub mod matrix;
pub mod quaternion;
pub mod trig;
pub mod vector;

// --- Re-export Principal Types ---

pub use self::angle::{angle_cast, Angle, AngleLiteral, Degree, Gradian, Radian};
pub use self::error::{MathError, Result};
pub use self::euler::Euler;
pub use self::half::{Half, HalfLiteral};
pub use self::matrix::{Mat2, Mat3, Mat4};
pub use self::quaternion::Quaternion;
pub use self::vector::{Vec2, Vec3, Vec4};

// --- Utility Functions ---

/// Compares two scalars using [`DEFAULT_TOLERANCE`] as the absolute tolerance.
///
/// # Examples
///
/// ```
/// use bit_math::almost_equal;
/// assert!(almost_equal(0.1 + 0.2, 0.3));
/// assert!(!almost_equal(1.0, 1.001));
/// ```
#[inline]
pub fn almost_equal(a: Real, b: Real) -> bool {
    almost_equal_eps(a, b, DEFAULT_TOLERANCE)
}

/// Compares two scalars with an explicit absolute tolerance (inclusive).
#[inline]
pub fn almost_equal_eps(a: Real, b: Real, tolerance: Real) -> bool {
    (a - b).abs() <= tolerance
}

/// Clamps a value to a specified minimum and maximum range.
///
/// # Examples
///
/// ```
/// use bit_math::clamp;
/// assert_eq!(clamp(1.5, 0.0, 1.0), 1.0);
/// assert_eq!(clamp(-1.0, 0.0, 1.0), 0.0);
/// ```
#[inline]
pub fn clamp<T: PartialOrd>(value: T, min_val: T, max_val: T) -> T {
    if value < min_val {
        min_val
    } else if value > max_val {
        max_val
    } else {
        value
    }
}

/// Clamps a scalar to the `[0.0, 1.0]` range.
#[inline]
pub fn saturate(value: Real) -> Real {
    clamp(value, 0.0, 1.0)
}

// --- Build Information ---

/// The floating-point width selected for [`Real`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    /// `Real` is `f32`.
    Single,
    /// `Real` is `f64`.
    Double,
}

/// The backend behind the top-level [`trig`] functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrigMode {
    /// Direct calls to the standard library.
    Runtime,
    /// Lookups into the process-wide sine table.
    Cached,
}

/// The compile-time configuration this crate was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct BuildInfo {
    /// Width of [`Real`].
    pub precision: Precision,
    /// Backend of the top-level trigonometric functions.
    pub trig: TrigMode,
    /// Number of entries in the cached sine table.
    pub trig_table_size: usize,
}

/// Returns the compile-time configuration of the crate.
pub const fn build_info() -> BuildInfo {
    BuildInfo {
        precision: if cfg!(feature = "double-precision") {
            Precision::Double
        } else {
            Precision::Single
        },
        trig: if cfg!(feature = "cached-trig") {
            TrigMode::Cached
        } else {
            TrigMode::Runtime
        },
        trig_table_size: trig::cached::TABLE_SIZE,
    }
}
