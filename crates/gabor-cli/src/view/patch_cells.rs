use gabor_engine::{RasterImage, Renderer};
use ratatui::style::Color;

/// Grayscale pixels of a patch, ready to be drawn as terminal cells.
///
/// Each terminal cell shows two vertically stacked pixels using the upper
/// half block glyph, so a patch of side `n` needs `n` columns and `⌈n/2⌉`
/// rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchCells {
    size: u16,
    intensities: Vec<u8>,
}

impl PatchCells {
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.size
    }

    #[must_use]
    pub const fn height(&self) -> u16 {
        self.size.div_ceil(2)
    }

    /// Colors of the upper and lower pixel behind the cell at `(col, row)`.
    ///
    /// The lower pixel is `None` on the last row of an odd-sized patch.
    #[must_use]
    pub fn cell_colors(&self, col: u16, row: u16) -> Option<(Color, Option<Color>)> {
        let top = self.color(col, row * 2)?;
        Some((top, self.color(col, row * 2 + 1)))
    }

    fn color(&self, x: u16, y: u16) -> Option<Color> {
        if x >= self.size || y >= self.size {
            return None;
        }
        let index = usize::from(y) * usize::from(self.size) + usize::from(x);
        let value = self.intensities[index];
        Some(Color::Rgb(value, value, value))
    }
}

/// Converts rasterized patches into [`PatchCells`].
///
/// Panics on patches wider than `u16::MAX` pixels.
#[derive(Debug, Default, Clone, Copy)]
pub struct CellRenderer;

impl Renderer for CellRenderer {
    type Output = PatchCells;

    fn render(&mut self, image: &RasterImage) -> PatchCells {
        let size = u16::try_from(image.size()).expect("terminal patch size should fit in u16");
        PatchCells {
            size,
            intensities: image.intensities().collect(),
        }
    }
}
