use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gabor_engine::GameMode;

use crate::{logging, util};

use self::{export::ExportArg, play::PlayArg, render::RenderArg, round::RoundArg};

mod export;
mod play;
mod render;
mod round;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Game settings file (JSON)
    #[clap(long, global = true)]
    config: Option<PathBuf>,
    /// Write logs to this file; the terminal UI logs nothing without it
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,
    /// What to run
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand, derive_more::IsVariant)]
enum Mode {
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Synthesize a single patch and save it as PNG
    Render(#[clap(flatten)] RenderArg),
    /// Generate a round and print it as JSON
    Round(#[clap(flatten)] RoundArg),
    /// Generate a round and save its patches as PNG files
    Export(#[clap(flatten)] ExportArg),
}

/// Game mode as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
enum ModeArg {
    /// Find the same pattern
    #[default]
    Target,
    /// Pair matching
    Pair,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Target => GameMode::TargetSelection,
            ModeArg::Pair => GameMode::PairMatching,
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let mode = args.mode.unwrap_or(Mode::Play(PlayArg::default()));

    logging::init(args.log_file.as_deref(), mode.is_play())?;
    let config = util::load_config(args.config.as_deref())?;

    match &mode {
        Mode::Play(arg) => play::run(arg, config)?,
        Mode::Render(arg) => render::run(arg)?,
        Mode::Round(arg) => round::run(arg, config)?,
        Mode::Export(arg) => export::run(arg, config)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_play() {
        let args = CommandArgs::try_parse_from(["gabor"]).unwrap();
        assert!(args.mode.is_none());
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args = CommandArgs::try_parse_from([
            "gabor",
            "round",
            "--mode",
            "pair",
            "--config",
            "game.json",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("game.json")));
        assert!(matches!(args.mode, Some(Mode::Round(_))));
    }

    #[test]
    fn test_mode_arg_conversion() {
        assert_eq!(GameMode::from(ModeArg::Target), GameMode::TargetSelection);
        assert_eq!(GameMode::from(ModeArg::Pair), GameMode::PairMatching);
    }
}
