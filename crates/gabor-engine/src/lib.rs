pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Rejected stimulus or round parameter.
///
/// Produced when constructing [`StimulusParams`] or requesting a round with
/// values outside their domain. It always points at a caller bug; nothing in
/// this crate retries or recovers from it.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum InvalidParameterError {
    #[display("patch size must be positive")]
    ZeroSize,
    #[display("orientation must be finite (got {value})")]
    Orientation { value: f64 },
    #[display("frequency must be positive and finite (got {value})")]
    Frequency { value: f64 },
    #[display("envelope sigma must be positive and finite (got {value})")]
    Sigma { value: f64 },
    #[display("contrast must be within [0, 1] (got {value})")]
    Contrast { value: f64 },
    #[display("round numbers start at 1")]
    ZeroRound,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid round seed: {reason}")]
pub struct SeedParseError {
    reason: String,
}

impl SeedParseError {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
