mod command;
mod logging;
mod png;
mod tui;
mod util;
mod view;

/// Frame rate of the terminal UI when `--fps` is not given.
const DEFAULT_FRAME_RATE: u64 = 30;

fn main() -> anyhow::Result<()> {
    command::run()
}
