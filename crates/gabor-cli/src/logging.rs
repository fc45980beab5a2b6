use std::{
    fs::File,
    io::{self, IsTerminal as _},
    path::Path,
    sync::Mutex,
};

use anyhow::Context as _;
use tracing_subscriber::{
    EnvFilter, Registry, fmt::MakeWriter, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info";

/// Installs the global tracing subscriber.
///
/// Logs go to `log_file` when one is given. Otherwise they go to stderr,
/// except under the terminal UI, which owns the screen and therefore runs
/// without a subscriber.
pub fn init(log_file: Option<&Path>, terminal_ui: bool) -> anyhow::Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            install(Mutex::new(file), false)
        }
        None if terminal_ui => Ok(()),
        None => install(io::stderr, io::stderr().is_terminal()),
    }
}

fn install<W>(writer: W, ansi: bool) -> anyhow::Result<()>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(ansi)
        .with_writer(writer);
    Registry::default()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install tracing subscriber")
}
