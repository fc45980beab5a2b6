use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_PAIR_PATCH_SIZE, DEFAULT_TARGET_PATCH_SIZE};

/// Tunable game settings.
///
/// Every field has a default, so a JSON config only needs the keys it
/// changes:
///
/// ```
/// use gabor_engine::GameConfig;
///
/// let config: GameConfig = serde_json::from_str(r#"{ "pair_patch_size": 64 }"#).unwrap();
/// assert_eq!(config.pair_patch_size, 64);
/// assert_eq!(config.target_patch_size, 120);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Patch side length in the target-selection game.
    pub target_patch_size: u32,
    /// Patch side length in the pair-matching game.
    pub pair_patch_size: u32,
    /// Pause after a solved round before the next one starts.
    pub feedback_delay_ms: u64,
    /// Pause before two selected pair slots are compared.
    pub compare_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            target_patch_size: DEFAULT_TARGET_PATCH_SIZE,
            pair_patch_size: DEFAULT_PAIR_PATCH_SIZE,
            feedback_delay_ms: 1000,
            compare_delay_ms: 500,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub const fn feedback_delay(&self) -> Duration {
        Duration::from_millis(self.feedback_delay_ms)
    }

    #[must_use]
    pub const fn compare_delay(&self) -> Duration {
        Duration::from_millis(self.compare_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = GameConfig::default();
        assert_eq!(config.target_patch_size, 120);
        assert_eq!(config.pair_patch_size, 100);
        assert_eq!(config.feedback_delay(), Duration::from_secs(1));
        assert_eq!(config.compare_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_empty_json_is_default() {
        let config: GameConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_partial_json_overrides() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "feedback_delay_ms": 250, "target_patch_size": 32 }"#)
                .unwrap();
        assert_eq!(config.feedback_delay_ms, 250);
        assert_eq!(config.target_patch_size, 32);
        assert_eq!(config.compare_delay_ms, 500);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result = serde_json::from_str::<GameConfig>(r#"{ "speed": 3 }"#);
        assert!(result.is_err());
    }
}
