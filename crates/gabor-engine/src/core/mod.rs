//! Stimulus data types and the patch synthesizer.
//!
//! - [`Orientation`] - grating angle normalized into `[0, π)`
//! - [`StimulusParams`] - validated synthesis parameters
//! - [`RasterImage`] - immutable grayscale RGBA buffer
//! - [`synthesize`] - the parameters-to-pixels mapping

pub use self::{orientation::*, params::*, raster::*, synth::*};

mod orientation;
mod params;
mod raster;
mod synth;
