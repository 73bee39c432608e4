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

//! Trigonometric functions over angles.
//!
//! Two backends share one signature surface: [`runtime`] calls the standard
//! library directly, [`cached`] probes a process-wide sine table. The
//! `cached-trig` feature picks which one the top-level `sin`, `cos`, `tan`,
//! `sec`, `csc`, and `cot` re-export. Both stay reachable by path.
//!
//! The feature only moves those re-exports. Rotation builders inside the crate
//! ([`Quaternion::from_angle_axis`](crate::Quaternion::from_angle_axis),
//! [`Mat3::from_rotation_x`](crate::Mat3::from_rotation_x) and friends,
//! [`Euler::rotation_matrix`](crate::Euler::rotation_matrix)) always call
//! [`runtime`]: a table step of `2π / 1024` would break orthonormality and the
//! round trips between quaternions, matrices, and Euler angles.
//!
//! Every function accepts any [`Angle`](crate::Angle) or a bare float in radians.
//! Inverse functions always use the standard library and return a [`Radian`].

use crate::angle::Radian;
use crate::Real;

pub use crate::angle::IntoRadians;

#[cfg(feature = "cached-trig")]
pub use self::cached::{cos, cot, csc, sec, sin, tan};
#[cfg(not(feature = "cached-trig"))]
pub use self::runtime::{cos, cot, csc, sec, sin, tan};

/// Full-precision trigonometry through the standard library.
pub mod runtime {
    use super::IntoRadians;
    use crate::Real;

    /// Sine of `angle`.
    #[inline]
    pub fn sin<A: IntoRadians>(angle: A) -> Real {
        angle.into_radians().value().sin()
    }

    /// Cosine of `angle`.
    #[inline]
    pub fn cos<A: IntoRadians>(angle: A) -> Real {
        angle.into_radians().value().cos()
    }

    /// Tangent of `angle`.
    #[inline]
    pub fn tan<A: IntoRadians>(angle: A) -> Real {
        angle.into_radians().value().tan()
    }

    /// Secant of `angle`, `1 / cos`.
    #[inline]
    pub fn sec<A: IntoRadians>(angle: A) -> Real {
        1.0 / cos(angle)
    }

    /// Cosecant of `angle`, `1 / sin`.
    #[inline]
    pub fn csc<A: IntoRadians>(angle: A) -> Real {
        1.0 / sin(angle)
    }

    /// Cotangent of `angle`, `cos / sin`.
    #[inline]
    pub fn cot<A: IntoRadians>(angle: A) -> Real {
        let radians = angle.into_radians().value();
        radians.cos() / radians.sin()
    }
}

/// Table-driven trigonometry.
///
/// The table holds [`TABLE_SIZE`](cached::TABLE_SIZE) samples of one sine
/// period and is built once, on first use or through [`warm_up`](cached::warm_up).
/// It is never written afterwards, so any number of threads can read it.
///
/// Lookups truncate to the sample below the angle, which costs roughly three
/// decimal digits with the default size. Use this for per-frame code where a
/// table probe beats a libm call and sub-degree accuracy is irrelevant.
pub mod cached {
    use std::sync::LazyLock;
    use std::time::Instant;

    use super::IntoRadians;
    use crate::{Real, FRAC_PI_2, TAU};

    const DEFAULT_TABLE_SIZE: usize = 1024;

    /// Parses the table size given at build time.
    ///
    /// Malformed or zero sizes abort compilation.
    const fn parse_table_size(text: Option<&str>) -> usize {
        let bytes = match text {
            Some(text) => text.as_bytes(),
            None => return DEFAULT_TABLE_SIZE,
        };
        assert!(!bytes.is_empty(), "BIT_MATH_TRIG_TABLE_SIZE is empty");
        let mut size = 0usize;
        let mut i = 0;
        while i < bytes.len() {
            assert!(
                bytes[i].is_ascii_digit(),
                "BIT_MATH_TRIG_TABLE_SIZE must be a decimal integer"
            );
            size = size * 10 + (bytes[i] - b'0') as usize;
            i += 1;
        }
        assert!(size > 0, "BIT_MATH_TRIG_TABLE_SIZE must be positive");
        size
    }

    /// Number of sine samples covering one revolution.
    ///
    /// Set with the `BIT_MATH_TRIG_TABLE_SIZE` environment variable at build time.
    pub const TABLE_SIZE: usize = parse_table_size(option_env!("BIT_MATH_TRIG_TABLE_SIZE"));

    static SINE_TABLE: LazyLock<Box<[Real]>> = LazyLock::new(build_table);

    fn build_table() -> Box<[Real]> {
        let start = Instant::now();
        let step = TAU / TABLE_SIZE as Real;
        let table: Box<[Real]> = (0..TABLE_SIZE).map(|i| (i as Real * step).sin()).collect();
        log::debug!(
            "Built {}-entry sine table in {:?}.",
            TABLE_SIZE,
            start.elapsed()
        );
        table
    }

    /// Builds the table now instead of on the first lookup.
    pub fn warm_up() {
        LazyLock::force(&SINE_TABLE);
    }

    /// Returns the number of entries in the table.
    #[inline]
    pub const fn table_size() -> usize {
        TABLE_SIZE
    }

    /// Maps an angle in radians to its table slot.
    ///
    /// Negative angles are mirrored so the slot always lies in `[0, TABLE_SIZE)`.
    #[inline]
    pub(crate) fn index(radians: Real) -> usize {
        let factor = TABLE_SIZE as Real / TAU;
        if radians >= 0.0 {
            (radians * factor).floor() as usize % TABLE_SIZE
        } else {
            TABLE_SIZE - ((-radians * factor).floor() as usize % TABLE_SIZE) - 1
        }
    }

    #[inline]
    fn sin_lookup(radians: Real) -> Real {
        SINE_TABLE[index(radians)]
    }

    #[inline]
    fn cos_lookup(radians: Real) -> Real {
        sin_lookup(radians + FRAC_PI_2)
    }

    /// Sine of `angle`, read from the table.
    #[inline]
    pub fn sin<A: IntoRadians>(angle: A) -> Real {
        sin_lookup(angle.into_radians().value())
    }

    /// Cosine of `angle`, read from the table a quarter revolution ahead.
    #[inline]
    pub fn cos<A: IntoRadians>(angle: A) -> Real {
        cos_lookup(angle.into_radians().value())
    }

    /// Tangent of `angle`.
    #[inline]
    pub fn tan<A: IntoRadians>(angle: A) -> Real {
        let radians = angle.into_radians().value();
        sin_lookup(radians) / cos_lookup(radians)
    }

    /// Secant of `angle`.
    #[inline]
    pub fn sec<A: IntoRadians>(angle: A) -> Real {
        1.0 / cos(angle)
    }

    /// Cosecant of `angle`.
    #[inline]
    pub fn csc<A: IntoRadians>(angle: A) -> Real {
        1.0 / sin(angle)
    }

    /// Cotangent of `angle`.
    #[inline]
    pub fn cot<A: IntoRadians>(angle: A) -> Real {
        let radians = angle.into_radians().value();
        cos_lookup(radians) / sin_lookup(radians)
    }

}

// --- Inverse Functions ---

/// Arcsine of `value`, in `[-π/2, π/2]`.
#[inline]
pub fn arcsin(value: Real) -> Radian {
    Radian::new(value.asin())
}

/// Arccosine of `value`, in `[0, π]`.
#[inline]
pub fn arccos(value: Real) -> Radian {
    Radian::new(value.acos())
}

/// Arctangent of `value`, in `[-π/2, π/2]`.
#[inline]
pub fn arctan(value: Real) -> Radian {
    Radian::new(value.atan())
}

/// Four-quadrant arctangent of `y / x`, in `(-π, π]`.
#[inline]
pub fn arctan2(y: Real, x: Real) -> Radian {
    Radian::new(y.atan2(x))
}
