use std::path::PathBuf;

use gabor_engine::{DEFAULT_CONTRAST, DEFAULT_SIGMA, Orientation, StimulusParams, synthesize};

use crate::png;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RenderArg {
    /// Side length of the patch in pixels
    #[clap(long, default_value_t = 120)]
    size: u32,
    /// Grating orientation in degrees (clockwise on screen)
    #[clap(long, default_value_t = 45.0, allow_negative_numbers = true)]
    orientation: f64,
    /// Grating cycles across the patch
    #[clap(long, default_value_t = 4.0)]
    frequency: f64,
    /// Width of the Gaussian envelope
    #[clap(long, default_value_t = DEFAULT_SIGMA)]
    sigma: f64,
    /// Contrast between 0 and 1
    #[clap(long, default_value_t = DEFAULT_CONTRAST)]
    contrast: f64,
    /// PNG file to write
    #[clap(long, short, default_value = "gabor.png")]
    output: PathBuf,
}

pub(crate) fn run(arg: &RenderArg) -> anyhow::Result<()> {
    let RenderArg {
        size,
        orientation,
        frequency,
        sigma,
        contrast,
        output,
    } = arg;

    let orientation = Orientation::from_degrees(*orientation)?;
    let params = StimulusParams::new(*size, orientation, *frequency, *sigma, *contrast)?;
    let image = synthesize(&params);
    png::save_png(output, &image)?;

    tracing::info!(path = %output.display(), ?params, "patch written");
    Ok(())
}
