pub use self::patch_cells::{CellRenderer, PatchCells};

mod patch_cells;
pub mod screens;
pub mod widgets;
