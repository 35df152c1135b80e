use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const CONFIG_FILE: &str = "snake_config.json";

/// Where the stores live and how the game seeds itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub obstacles_path: PathBuf,
    pub user_scores_path: PathBuf,
    pub leaderboard_path: PathBuf,
    pub settings_path: PathBuf,
    pub default_player_name: String,
    /// Fixed food-placement seed; drawn from the OS when absent.
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            obstacles_path: "obstacles.txt".into(),
            user_scores_path: "user_scores.txt".into(),
            leaderboard_path: "scores.txt".into(),
            settings_path: "settings.txt".into(),
            default_player_name: "Player".to_string(),
            rng_seed: None,
        }
    }
}

impl GameConfig {
    /// Reads the config file. A missing file yields defaults; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(Error::Read { path: path.to_path_buf(), source }),
        };
        serde_json::from_str(&text).map_err(|source| Error::Config { path: path.to_path_buf(), source })
    }

    pub fn seed(&self) -> u64 {
        self.rng_seed.unwrap_or_else(rand::random)
    }

    /// Resolves the name typed at the prompt: trimmed, blank falls back to the
    /// default, inner whitespace becomes `_` so the name stays one store token.
    pub fn player_name(&self, input: &str) -> String {
        let typed = single_token(input);
        if !typed.is_empty() {
            return typed;
        }
        let fallback = single_token(&self.default_player_name);
        if fallback.is_empty() { FALLBACK_PLAYER_NAME.to_string() } else { fallback }
    }
}

const FALLBACK_PLAYER_NAME: &str = "Player";

fn single_token(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("_")
}
