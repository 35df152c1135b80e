//! Error types for the snake game core

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A store exists but could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    /// A store could not be rewritten
    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    /// The config file exists but is not valid JSON for `GameConfig`
    #[error("invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Reading the player name from stdin failed
    #[error("failed to read player name: {0}")]
    Prompt(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
