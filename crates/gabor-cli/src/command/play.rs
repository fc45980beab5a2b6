use anyhow::ensure;
use gabor_engine::{GameConfig, RoundSeed};

use crate::{
    DEFAULT_FRAME_RATE,
    tui::{Runtime, ScreenStack},
    util,
    view::screens::{MenuScreen, PlaySettings},
};

const DEFAULT_TERMINAL_PATCH_SIZE: u32 = 14;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Patch side length in pixels; two pixels share one terminal row
    #[clap(long, default_value_t = DEFAULT_TERMINAL_PATCH_SIZE,
           value_parser = clap::value_parser!(u32).range(2..=64))]
    patch_size: u32,
    /// Ticks and redraws per second
    #[clap(long, default_value_t = DEFAULT_FRAME_RATE)]
    fps: u64,
    /// Seed of the first game as 32 hex characters; random when omitted
    #[clap(long)]
    seed: Option<RoundSeed>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            patch_size: DEFAULT_TERMINAL_PATCH_SIZE,
            fps: DEFAULT_FRAME_RATE,
            seed: None,
        }
    }
}

pub(crate) fn run(arg: &PlayArg, config: GameConfig) -> anyhow::Result<()> {
    let PlayArg {
        patch_size,
        fps,
        seed,
    } = arg;
    ensure!(*fps > 0, "--fps must be at least 1");

    let settings = PlaySettings {
        config: util::with_patch_size(config, Some(*patch_size)),
        fps: *fps,
        seed: *seed,
    };
    let mut stack = ScreenStack::new(Box::new(MenuScreen::new(settings)));
    Runtime::new().run(&mut stack)?;
    Ok(())
}
