//! Quaternion to rotation-matrix conversion for placement orientations.

use serde::{Deserialize, Serialize};

/// Orientation quaternion in (w, x, y, z) order, as carried by placement
/// messages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quaternion {
    pub const IDENTITY: Self = Self {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Converts to a 3x3 rotation matrix, flattened row-major.
    ///
    /// Non-unit input is normalized. The all-zero quaternion maps to the
    /// identity matrix.
    pub fn rotation_matrix(&self) -> [f64; 9] {
        let Self { w, x, y, z } = *self;
        let n = w * w + x * x + y * y + z * z;
        let s = if n == 0.0 { 0.0 } else { 2.0 / n };

        [
            1.0 - s * (y * y + z * z),
            s * (x * y - z * w),
            s * (x * z + y * w),
            s * (x * y + z * w),
            1.0 - s * (x * x + z * z),
            s * (y * z - x * w),
            s * (x * z - y * w),
            s * (y * z + x * w),
            1.0 - s * (x * x + y * y),
        ]
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}
