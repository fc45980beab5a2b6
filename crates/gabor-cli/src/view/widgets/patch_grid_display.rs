use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, BorderType, Widget},
};

use super::{PatchDisplay, color};
use crate::view::PatchCells;

/// How a grid slot is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotLook {
    #[default]
    Normal,
    Selected,
    Wrong,
    Correct,
    /// Matched pair; the slot keeps its place but shows nothing.
    Hidden,
}

impl SlotLook {
    fn border_style(self, under_cursor: bool) -> Style {
        let color = match self {
            Self::Selected => color::SELECTED,
            Self::Wrong => color::WRONG,
            Self::Correct => color::CORRECT,
            Self::Normal | Self::Hidden if under_cursor => color::ACCENT,
            Self::Normal | Self::Hidden => color::DIM,
        };
        Style::new().fg(color)
    }
}

/// Grid of bordered patches, numbered from 1 in reading order.
#[derive(Debug)]
pub struct PatchGridDisplay<'a> {
    patches: &'a [PatchCells],
    looks: Vec<SlotLook>,
    columns: usize,
    cursor: Option<usize>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PatchGridDisplay<'a> {
    pub fn new(patches: &'a [PatchCells], columns: usize) -> Self {
        Self {
            patches,
            looks: vec![SlotLook::Normal; patches.len()],
            columns: columns.max(1),
            cursor: None,
            block: None,
        }
    }

    pub fn looks(self, looks: impl IntoIterator<Item = SlotLook>) -> Self {
        Self {
            looks: looks.into_iter().collect(),
            ..self
        }
    }

    pub fn cursor(self, cursor: usize) -> Self {
        Self {
            cursor: Some(cursor),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    fn rows(&self) -> usize {
        self.patches.len().div_ceil(self.columns)
    }

    fn slot_size(&self) -> (u16, u16) {
        self.patches.first().map_or((0, 0), |patch| {
            let display = PatchDisplay::new(patch).block(BlockWidget::bordered());
            (display.width(), display.height())
        })
    }

    pub fn width(&self) -> u16 {
        let columns = super::saturating_u16(self.columns);
        columns * self.slot_size().0 + super::block_margin(self.block.as_ref()).0
    }

    pub fn height(&self) -> u16 {
        let rows = super::saturating_u16(self.rows());
        rows * self.slot_size().1 + super::block_margin(self.block.as_ref()).1
    }
}

impl Widget for PatchGridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let (slot_width, slot_height) = self.slot_size();
        let rows = Layout::vertical((0..self.rows()).map(|_| Constraint::Length(slot_height)))
            .flex(Flex::Center)
            .split(area);
        let columns =
            Layout::horizontal((0..self.columns).map(|_| Constraint::Length(slot_width)))
                .flex(Flex::Center);

        for (row, row_area) in rows.iter().enumerate() {
            let cells = columns.split(*row_area);
            for (col, cell_area) in cells.iter().enumerate() {
                let slot = row * self.columns + col;
                let Some(patch) = self.patches.get(slot) else {
                    break;
                };
                let look = self.looks.get(slot).copied().unwrap_or_default();
                let under_cursor = self.cursor == Some(slot);

                let mut block = BlockWidget::bordered()
                    .border_style(look.border_style(under_cursor))
                    .border_type(if under_cursor {
                        BorderType::Thick
                    } else {
                        BorderType::Plain
                    });
                if slot < 9 {
                    block = block.title(Line::from(format!("{}", slot + 1)).centered());
                }

                let display = PatchDisplay::new(patch).block(block);
                if look == SlotLook::Hidden {
                    display.hidden().render(*cell_area, buf);
                } else {
                    display.render(*cell_area, buf);
                }
            }
        }
    }
}
