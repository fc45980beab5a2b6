use std::path::Path;

use gabor_engine::{RasterImage, Renderer};
use image::{ExtendedColorType, ImageEncoder as _, ImageError, codecs::png::PngEncoder};

use crate::util;

/// Renders patches into PNG file contents.
#[derive(Debug, Default, Clone, Copy)]
pub struct PngRenderer;

impl Renderer for PngRenderer {
    type Output = Result<Vec<u8>, ImageError>;

    fn render(&mut self, image: &RasterImage) -> Self::Output {
        encode_png(image)
    }
}

pub fn encode_png(image: &RasterImage) -> Result<Vec<u8>, ImageError> {
    let mut png_bytes = Vec::new();
    PngEncoder::new(&mut png_bytes).write_image(
        image.as_rgba_bytes(),
        image.size(),
        image.size(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(png_bytes)
}

pub fn save_png(path: &Path, image: &RasterImage) -> anyhow::Result<()> {
    let bytes = encode_png(image)?;
    util::write_file(path, &bytes)
}
