use std::{
    fs::{self, File},
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use gabor_engine::GameConfig;

/// Destination of a JSON document: a file, or stdout when no path is given.
#[derive(Debug)]
pub enum Output {
    Stdout(StdoutLock<'static>),
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
    where
        T: serde::Serialize + ?Sized,
    {
        Self::create(path)?.write_json(value)
    }

    pub fn create(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::Stdout(io::stdout().lock()));
        };
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Self::File {
            writer: BufWriter::new(file),
            path: path.to_owned(),
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Self::Stdout(_) => "stdout".to_owned(),
            Self::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize + ?Sized,
    {
        let target = self.display_path();
        let writer: &mut dyn io::Write = match &mut self {
            Self::Stdout(writer) => writer,
            Self::File { writer, .. } => writer,
        };
        serde_json::to_writer_pretty(&mut *writer, value)
            .with_context(|| format!("Failed to write JSON to {target}"))?;
        writeln!(writer).with_context(|| format!("Failed to write to {target}"))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush output to {target}"))?;
        Ok(())
    }
}

pub fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}

/// Loads the game settings file, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = parse_config(&text)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    tracing::info!(path = %path.display(), ?config, "loaded game config");
    Ok(config)
}

fn parse_config(text: &str) -> serde_json::Result<GameConfig> {
    serde_json::from_str(text)
}

/// Overrides both patch sizes of `config` when `patch_size` is given.
pub fn with_patch_size(config: GameConfig, patch_size: Option<u32>) -> GameConfig {
    match patch_size {
        Some(size) => GameConfig {
            target_patch_size: size,
            pair_patch_size: size,
            ..config
        },
        None => config,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_path_gives_defaults() {
        assert_eq!(load_config(None).unwrap(), GameConfig::default());
    }

    #[test]
    fn test_parse_config() {
        let config = parse_config(r#"{ "compare_delay_ms": 200 }"#).unwrap();
        assert_eq!(config.compare_delay_ms, 200);
        assert_eq!(config.feedback_delay_ms, 1000);

        assert!(parse_config(r#"{ "compare_delay": 200 }"#).is_err());
        assert!(parse_config("not json").is_err());
    }

    #[test]
    fn test_unreadable_config_is_reported() {
        let err = load_config(Some(Path::new("/nonexistent/gabor/config.json"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_with_patch_size() {
        let config = with_patch_size(GameConfig::default(), Some(32));
        assert_eq!(config.target_patch_size, 32);
        assert_eq!(config.pair_patch_size, 32);
        assert_eq!(config.feedback_delay_ms, 1000);

        assert_eq!(
            with_patch_size(GameConfig::default(), None),
            GameConfig::default()
        );
    }
}
