//! Runtime configuration read from `GENESIS_*` environment variables.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_SPRITES: &str = "res/sprites.png";
pub const DEFAULT_LEVEL: &str = "res/levels/ocean.png";
pub const DEFAULT_KEY_RELEASE_MS: u64 = 150;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// 256x256 sprite sheet.
    pub sprites: PathBuf,
    /// Level image; one pixel per tile.
    pub level: PathBuf,
    /// Fixed seed for a reproducible session. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Sleep briefly after very short frames.
    pub fps_cap: bool,
    /// Auto-release delay for terminals that never report key releases.
    pub key_release_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            sprites: PathBuf::from(DEFAULT_SPRITES),
            level: PathBuf::from(DEFAULT_LEVEL),
            seed: None,
            fps_cap: true,
            key_release_ms: DEFAULT_KEY_RELEASE_MS,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset, blank or unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };
        let defaults = Self::default();

        let sprites = var("GENESIS_SPRITES").map(PathBuf::from).unwrap_or(defaults.sprites);
        let level = var("GENESIS_LEVEL").map(PathBuf::from).unwrap_or(defaults.level);
        let seed = var("GENESIS_SEED").and_then(|s| s.parse().ok());
        let fps_cap = var("GENESIS_FPS_CAP")
            .map(|s| !matches!(s.to_ascii_lowercase().as_str(), "0" | "false" | "off" | "no"))
            .unwrap_or(defaults.fps_cap);
        let key_release_ms = var("GENESIS_KEY_RELEASE_MS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.key_release_ms);

        Self {
            sprites,
            level,
            seed,
            fps_cap,
            key_release_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(GameConfig::from_lookup(lookup(&[])), GameConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = GameConfig::from_lookup(lookup(&[
            ("GENESIS_SPRITES", "art/sheet.png"),
            ("GENESIS_LEVEL", " maps/island.png "),
            ("GENESIS_SEED", "42"),
            ("GENESIS_FPS_CAP", "off"),
            ("GENESIS_KEY_RELEASE_MS", "90"),
        ]));
        assert_eq!(config.sprites, PathBuf::from("art/sheet.png"));
        assert_eq!(config.level, PathBuf::from("maps/island.png"));
        assert_eq!(config.seed, Some(42));
        assert!(!config.fps_cap);
        assert_eq!(config.key_release_ms, 90);
    }

    #[test]
    fn bad_values_fall_back() {
        let config = GameConfig::from_lookup(lookup(&[
            ("GENESIS_SEED", "not-a-number"),
            ("GENESIS_KEY_RELEASE_MS", "-5"),
            ("GENESIS_SPRITES", "   "),
        ]));
        assert_eq!(config.seed, None);
        assert_eq!(config.key_release_ms, DEFAULT_KEY_RELEASE_MS);
        assert_eq!(config.sprites, PathBuf::from(DEFAULT_SPRITES));
    }
}
