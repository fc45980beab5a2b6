use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use gabor_engine::{GameConfig, Renderer as _, synthesize};
use serde::Serialize;

use crate::{
    command::round::{RoundReport, RoundRequest},
    png::PngRenderer,
    util,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ExportArg {
    #[clap(flatten)]
    request: RoundRequest,
    /// Directory for the PNG files and round.json [default: ./data/rounds/<timestamp>/]
    #[clap(long)]
    output_dir: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ExportManifest<'a> {
    exported_at: DateTime<Utc>,
    files: Vec<String>,
    #[serde(flatten)]
    report: &'a RoundReport,
}

pub(crate) fn run(arg: &ExportArg, config: GameConfig) -> anyhow::Result<()> {
    let ExportArg {
        request,
        output_dir,
    } = arg;

    let exported_at = Utc::now();
    let output_dir = output_dir.clone().unwrap_or_else(|| {
        Path::new("./data/rounds").join(exported_at.format("%Y%m%d_%H%M%S").to_string())
    });
    let report = request.generate(config)?;

    let files = export_round(&report, &output_dir, exported_at)?;
    tracing::info!(
        dir = %output_dir.display(),
        files = files.len(),
        "round exported"
    );
    Ok(())
}

/// Writes one PNG per patch plus `round.json` into `dir` and returns the
/// PNG file names.
fn export_round(
    report: &RoundReport,
    dir: &Path,
    exported_at: DateTime<Utc>,
) -> anyhow::Result<Vec<String>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;

    let mut renderer = PngRenderer;
    let mut files = vec![];
    for (name, params) in report.round.named_patches() {
        let file_name = format!("{name}.png");
        let bytes = renderer.render(&synthesize(params))?;
        util::write_file(&dir.join(&file_name), &bytes)?;
        files.push(file_name);
    }

    let manifest = ExportManifest {
        exported_at,
        files: files.clone(),
        report,
    };
    util::Output::save_json(&manifest, Some(&dir.join("round.json")))?;
    Ok(files)
}
