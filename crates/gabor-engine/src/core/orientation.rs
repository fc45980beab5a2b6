use std::{f64::consts::PI, fmt};

use serde::{Deserialize, Serialize};

use crate::InvalidParameterError;

/// Tolerance (radians) under which two orientations count as the same.
pub const ORIENTATION_EPSILON: f64 = 0.001;

/// Grating orientation in radians, always normalized into `[0, π)`.
///
/// A grating rotated by π looks exactly like the unrotated one, so every
/// orientation is reduced modulo π on construction. Positive angles rotate
/// the grating clockwise on screen, since raster rows grow downward.
///
/// # Example
///
/// ```
/// use gabor_engine::Orientation;
///
/// let a = Orientation::from_degrees(30.0).unwrap();
/// let b = Orientation::from_degrees(210.0).unwrap();
///
/// assert!(a.approx_eq(b));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Orientation(f64);

impl Orientation {
    pub const ZERO: Self = Self(0.0);

    /// Creates an orientation from an angle in radians, reducing it modulo π.
    pub fn from_radians(radians: f64) -> Result<Self, InvalidParameterError> {
        if !radians.is_finite() {
            return Err(InvalidParameterError::Orientation { value: radians });
        }
        Ok(Self(wrap(radians)))
    }

    /// Creates an orientation from an angle in degrees, reducing it modulo 180°.
    pub fn from_degrees(degrees: f64) -> Result<Self, InvalidParameterError> {
        if !degrees.is_finite() {
            return Err(InvalidParameterError::Orientation { value: degrees });
        }
        Self::from_radians(degrees.to_radians())
    }

    #[must_use]
    pub const fn radians(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn degrees(self) -> f64 {
        self.0.to_degrees()
    }

    /// Returns this orientation rotated by a whole number of degrees.
    #[must_use]
    pub fn rotated_by_degrees(self, degrees: u32) -> Self {
        Self(wrap(self.0 + f64::from(degrees).to_radians()))
    }

    /// Returns the angle to rotate `self` by to reach `other`, in `[0, π)`.
    #[must_use]
    pub fn wrapped_difference(self, other: Self) -> f64 {
        wrap(other.0 - self.0)
    }

    /// Rotation-wrap equality with [`ORIENTATION_EPSILON`].
    #[must_use]
    pub fn approx_eq(self, other: Self) -> bool {
        orientations_equal(self.0, other.0, ORIENTATION_EPSILON)
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<f64> for Orientation {
    type Error = InvalidParameterError;

    fn try_from(radians: f64) -> Result<Self, Self::Error> {
        Self::from_radians(radians)
    }
}

impl From<Orientation> for f64 {
    fn from(orientation: Orientation) -> Self {
        orientation.0
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.degrees())
    }
}

/// Compares two angles (radians) under rotation-wrap equality.
///
/// The angles are equal when their difference modulo π lies within
/// `epsilon` of 0 or of π.
#[must_use]
pub fn orientations_equal(a: f64, b: f64, epsilon: f64) -> bool {
    let diff = (a - b).rem_euclid(PI);
    diff.min(PI - diff) < epsilon
}

fn wrap(radians: f64) -> f64 {
    let wrapped = radians.rem_euclid(PI);
    // rem_euclid may round tiny negative inputs up to exactly π
    if wrapped >= PI { 0.0 } else { wrapped }
}
