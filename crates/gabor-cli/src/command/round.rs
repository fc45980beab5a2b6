use std::path::PathBuf;

use gabor_engine::{
    GameConfig, GameMode, PairRound, PairRoundGenerator, RoundSeed, StimulusParams, TargetRound,
    TargetRoundGenerator,
};
use rand::Rng as _;
use serde::Serialize;

use crate::{command::ModeArg, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RoundArg {
    #[clap(flatten)]
    request: RoundRequest,
    /// Write the JSON here instead of stdout
    #[clap(long, short)]
    output: Option<PathBuf>,
}

/// Options shared by the commands that generate a single round.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RoundRequest {
    /// Which game to generate a round for
    #[clap(long, value_enum, default_value_t)]
    mode: ModeArg,
    /// Round number (1 or above)
    #[clap(long, default_value_t = 1)]
    round: u32,
    /// Seed as 32 hex characters; random when omitted
    #[clap(long)]
    seed: Option<RoundSeed>,
    /// Patch side length in pixels, overriding the config file
    #[clap(long)]
    patch_size: Option<u32>,
}

/// A generated round together with what is needed to reproduce it.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct RoundReport {
    pub mode: GameMode,
    pub seed: RoundSeed,
    #[serde(flatten)]
    pub round: GeneratedRound,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub(crate) enum GeneratedRound {
    Target(TargetRound),
    Pair(PairRound),
}

impl GeneratedRound {
    /// Every patch of the round with a file-friendly name.
    pub fn named_patches(&self) -> Vec<(String, &StimulusParams)> {
        match self {
            Self::Target(round) => std::iter::once(("target".to_owned(), round.target()))
                .chain(
                    round
                        .slots()
                        .map(|(slot, params)| (format!("slot-{slot:02}"), params)),
                )
                .collect(),
            Self::Pair(round) => round
                .items()
                .iter()
                .enumerate()
                .map(|(slot, params)| (format!("slot-{slot:02}"), params))
                .collect(),
        }
    }
}

impl RoundRequest {
    pub fn generate(&self, config: GameConfig) -> anyhow::Result<RoundReport> {
        let mode = GameMode::from(self.mode);
        let config = util::with_patch_size(config, self.patch_size);
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = seed.rng();

        let round = match mode {
            GameMode::TargetSelection => GeneratedRound::Target(
                TargetRoundGenerator::new(config.target_patch_size).generate(self.round, &mut rng)?,
            ),
            GameMode::PairMatching => GeneratedRound::Pair(
                PairRoundGenerator::new(config.pair_patch_size).generate(self.round, &mut rng)?,
            ),
        };
        tracing::info!(%mode, %seed, round = self.round, "round generated");
        Ok(RoundReport { mode, seed, round })
    }
}

pub(crate) fn run(arg: &RoundArg, config: GameConfig) -> anyhow::Result<()> {
    let RoundArg { request, output } = arg;
    let report = request.generate(config)?;
    util::Output::save_json(&report, output.as_deref())
}
