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

//! Defines the error type for bounds-checked element access.

use thiserror::Error;

/// An error raised by the checked accessors (`at`, `at_mut`) of the value types.
///
/// Numeric degenerate cases (singular matrices, zero-length vectors, zero
/// quaternions) are never reported through this type. They resolve to a
/// documented fallback value instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    /// A component index was outside of a vector or quaternion.
    #[error("index {index} is out of range for a value with {len} components")]
    IndexOutOfRange {
        /// The requested component index.
        index: usize,
        /// The number of components of the value.
        len: usize,
    },
    /// A `(row, column)` pair was outside of a square matrix.
    #[error("element ({row}, {column}) is out of range for a {size}x{size} matrix")]
    MatrixIndexOutOfRange {
        /// The requested row.
        row: usize,
        /// The requested column.
        column: usize,
        /// The dimension of the matrix.
        size: usize,
    },
}

/// A specialized `Result` type for checked math accessors.
pub type Result<T> = std::result::Result<T, MathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MathError::IndexOutOfRange { index: 4, len: 4 };
        assert_eq!(
            err.to_string(),
            "index 4 is out of range for a value with 4 components"
        );

        let err = MathError::MatrixIndexOutOfRange {
            row: 0,
            column: 3,
            size: 3,
        };
        assert_eq!(
            err.to_string(),
            "element (0, 3) is out of range for a 3x3 matrix"
        );
    }
}
