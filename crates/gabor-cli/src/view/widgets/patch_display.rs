use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::Color,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::PatchCells;

/// Upper half block: the foreground paints the upper pixel of a cell and the
/// background the lower one.
const UPPER_HALF: &str = "\u{2580}";

/// Draws one patch with half-block cells, or leaves the space blank when
/// the patch is hidden.
#[derive(Debug)]
pub struct PatchDisplay<'a> {
    patch: Option<&'a PatchCells>,
    width: u16,
    height: u16,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PatchDisplay<'a> {
    pub fn new(patch: &'a PatchCells) -> Self {
        Self {
            patch: Some(patch),
            width: patch.width(),
            height: patch.height(),
            block: None,
        }
    }

    /// Takes up the space of `patch` without drawing it.
    pub fn hidden(self) -> Self {
        Self {
            patch: None,
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        self.width + super::block_margin(self.block.as_ref()).0
    }

    pub fn height(&self) -> u16 {
        self.height + super::block_margin(self.block.as_ref()).1
    }
}

impl Widget for PatchDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self
            .block
            .inner_if_some(area)
            .centered(Constraint::Length(self.width), Constraint::Length(self.height));
        let Some(patch) = self.patch else {
            return;
        };

        for row in 0..area.height {
            for col in 0..area.width {
                let Some((top, bottom)) = patch.cell_colors(col, row) else {
                    continue;
                };
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol(UPPER_HALF)
                        .set_fg(top)
                        .set_bg(bottom.unwrap_or(Color::Reset));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use gabor_engine::{Orientation, Renderer as _, StimulusParams, synthesize};

    use super::*;
    use crate::view::CellRenderer;

    fn patch(size: u32) -> PatchCells {
        let params = StimulusParams::new(size, Orientation::ZERO, 4.0, 0.35, 0.9).unwrap();
        CellRenderer.render(&synthesize(&params))
    }

    #[test]
    fn test_size_includes_block() {
        let patch = patch(8);
        let display = PatchDisplay::new(&patch);
        assert_eq!((display.width(), display.height()), (8, 4));

        let display = display.block(BlockWidget::bordered());
        assert_eq!((display.width(), display.height()), (10, 6));
    }

    #[test]
    fn test_render_half_blocks() {
        let patch = patch(4);
        let area = Rect::new(0, 0, 6, 4);
        let mut buf = Buffer::empty(area);
        PatchDisplay::new(&patch)
            .block(BlockWidget::bordered())
            .render(area, &mut buf);

        let (top, bottom) = patch.cell_colors(0, 0).unwrap();
        let cell = &buf[(1, 1)];
        assert_eq!(cell.symbol(), UPPER_HALF);
        assert_eq!(cell.fg, top);
        assert_eq!(Some(cell.bg), bottom);
        assert_eq!(buf[(4, 2)].symbol(), UPPER_HALF);
    }

    #[test]
    fn test_hidden_patch_leaves_cells_blank() {
        let patch = patch(4);
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        PatchDisplay::new(&patch).hidden().render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), " ");
    }
}
