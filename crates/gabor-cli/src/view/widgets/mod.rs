use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    key_hints_display::*, patch_display::*, patch_grid_display::*, session_stats_display::*,
};

mod key_hints_display;
mod patch_display;
mod patch_grid_display;
mod session_stats_display;

pub mod color {
    use ratatui::style::Color;

    pub const TEXT: Color = Color::Rgb(230, 230, 230);
    pub const DIM: Color = Color::Rgb(110, 110, 110);
    pub const ACCENT: Color = Color::Rgb(255, 215, 0);
    pub const SELECTED: Color = Color::Rgb(0, 200, 255);
    pub const CORRECT: Color = Color::Rgb(85, 255, 85);
    pub const WRONG: Color = Color::Rgb(255, 85, 85);
}

/// Rows and columns a block's borders and padding take up.
fn block_margin(block: Option<&BlockWidget>) -> (u16, u16) {
    let outer = Rect::new(0, 0, 100, 100);
    let inner = block.map_or(outer, |block| block.inner(outer));
    (outer.width - inner.width, outer.height - inner.height)
}

fn saturating_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
