/// Square RGBA raster produced by the synthesizer.
///
/// Pixels are stored in row-major order, one `[r, g, b, a]` entry per pixel.
/// Patches are grayscale, so `r == g == b` and `a == 255` everywhere.
/// The buffer always holds exactly `size * size` pixels and cannot be
/// modified after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RasterImage {
    size: u32,
    pixels: Vec<[u8; 4]>,
}

impl RasterImage {
    /// Builds an image from per-pixel intensities in row-major order.
    pub(crate) fn from_intensities(size: u32, intensities: impl IntoIterator<Item = u8>) -> Self {
        let pixels: Vec<_> = intensities
            .into_iter()
            .map(|value| [value, value, value, u8::MAX])
            .collect();
        assert_eq!(pixels.len(), pixel_count(size));
        Self { size, pixels }
    }

    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Number of pixels (`size * size`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Returns the RGBA value at `(x, y)`, or `None` outside the image.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size || y >= self.size {
            return None;
        }
        let index = y as usize * self.size as usize + x as usize;
        self.pixels.get(index).copied()
    }

    /// Returns the gray level at `(x, y)`, or `None` outside the image.
    #[must_use]
    pub fn intensity(&self, x: u32, y: u32) -> Option<u8> {
        self.pixel(x, y).map(|[r, _, _, _]| r)
    }

    /// Iterates over gray levels in row-major order.
    pub fn intensities(&self) -> impl ExactSizeIterator<Item = u8> + '_ {
        self.pixels.iter().map(|[r, _, _, _]| *r)
    }

    #[must_use]
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Raw RGBA bytes, four per pixel, suitable for image encoders.
    #[must_use]
    pub fn as_rgba_bytes(&self) -> &[u8] {
        self.pixels.as_flattened()
    }
}

fn pixel_count(size: u32) -> usize {
    let side = size as usize;
    side * side
}
