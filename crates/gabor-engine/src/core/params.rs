use serde::{Deserialize, Serialize};

use crate::{InvalidParameterError, Orientation};

/// Envelope width shared by both game modes.
pub const DEFAULT_SIGMA: f64 = 0.35;

/// Contrast shared by both game modes.
pub const DEFAULT_CONTRAST: f64 = 0.9;

/// Parameters of a single Gabor patch.
///
/// Values are validated on construction, so every `StimulusParams` in
/// existence can be handed to [`synthesize`](crate::synthesize):
///
/// - `size` is at least 1
/// - `frequency` and `sigma` are positive and finite
/// - `contrast` lies within `[0, 1]`
/// - `orientation` is normalized into `[0, π)`
///
/// # Example
///
/// ```
/// use gabor_engine::{Orientation, StimulusParams};
///
/// let params = StimulusParams::new(
///     64,
///     Orientation::from_degrees(45.0).unwrap(),
///     4.0,
///     0.35,
///     0.9,
/// )
/// .unwrap();
/// assert_eq!(params.size(), 64);
///
/// assert!(StimulusParams::new(0, Orientation::ZERO, 4.0, 0.35, 0.9).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStimulusParams")]
pub struct StimulusParams {
    size: u32,
    orientation: Orientation,
    frequency: f64,
    sigma: f64,
    contrast: f64,
}

#[derive(Deserialize)]
struct RawStimulusParams {
    size: u32,
    orientation: Orientation,
    frequency: f64,
    sigma: f64,
    contrast: f64,
}

impl TryFrom<RawStimulusParams> for StimulusParams {
    type Error = InvalidParameterError;

    fn try_from(raw: RawStimulusParams) -> Result<Self, Self::Error> {
        Self::new(
            raw.size,
            raw.orientation,
            raw.frequency,
            raw.sigma,
            raw.contrast,
        )
    }
}

impl StimulusParams {
    pub fn new(
        size: u32,
        orientation: Orientation,
        frequency: f64,
        sigma: f64,
        contrast: f64,
    ) -> Result<Self, InvalidParameterError> {
        if size == 0 {
            return Err(InvalidParameterError::ZeroSize);
        }
        if !(frequency.is_finite() && frequency > 0.0) {
            return Err(InvalidParameterError::Frequency { value: frequency });
        }
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(InvalidParameterError::Sigma { value: sigma });
        }
        if !(0.0..=1.0).contains(&contrast) {
            return Err(InvalidParameterError::Contrast { value: contrast });
        }
        Ok(Self {
            size,
            orientation,
            frequency,
            sigma,
            contrast,
        })
    }

    /// Side length of the square patch, in pixels.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Grating frequency, in cycles per normalized unit.
    #[must_use]
    pub const fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Width of the Gaussian envelope.
    #[must_use]
    pub const fn sigma(&self) -> f64 {
        self.sigma
    }

    #[must_use]
    pub const fn contrast(&self) -> f64 {
        self.contrast
    }

    /// Returns a copy with a different orientation; the rest is already valid.
    #[must_use]
    pub const fn with_orientation(self, orientation: Orientation) -> Self {
        Self {
            orientation,
            ..self
        }
    }
}
