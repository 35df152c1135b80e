//! Personal bests and the leaderboard.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::store;

pub const MAX_LEADERBOARD_ENTRIES: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

impl ScoreEntry {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self { name: name.into(), score }
    }
}

/// Highest score first; equal scores in alphabetical order of name.
fn rank(a: &ScoreEntry, b: &ScoreEntry) -> Ordering {
    b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name))
}

/// Collapses raw records to one entry per name holding that name's maximum.
pub fn best_per_name(entries: impl IntoIterator<Item = ScoreEntry>) -> BTreeMap<String, u32> {
    let mut best: BTreeMap<String, u32> = BTreeMap::new();
    for entry in entries {
        let slot = best.entry(entry.name).or_insert(entry.score);
        *slot = (*slot).max(entry.score);
    }
    best
}

fn ranked(best: BTreeMap<String, u32>) -> Vec<ScoreEntry> {
    let mut entries: Vec<ScoreEntry> = best
        .into_iter()
        .map(|(name, score)| ScoreEntry { name, score })
        .collect();
    entries.sort_by(rank);
    entries.truncate(MAX_LEADERBOARD_ENTRIES);
    entries
}

/// Tracks the active player's best, the global best and the leaderboard, and keeps
/// the backing stores in step with them.
pub struct ScoreBook {
    player: String,
    user_scores_path: PathBuf,
    leaderboard_path: PathBuf,
    personal_best: u32,
    global_best: u32,
    leaderboard: Vec<ScoreEntry>,
}

impl ScoreBook {
    pub fn open(player: impl Into<String>, user_scores_path: PathBuf, leaderboard_path: PathBuf) -> Self {
        let mut book = Self {
            player: player.into(),
            user_scores_path,
            leaderboard_path,
            personal_best: 0,
            global_best: 0,
            leaderboard: Vec::new(),
        };
        book.load_personal_best();
        book.load_leaderboard();
        book
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn personal_best(&self) -> u32 {
        self.personal_best
    }

    pub fn global_best(&self) -> u32 {
        self.global_best
    }

    pub fn leaderboard(&self) -> &[ScoreEntry] {
        &self.leaderboard
    }

    fn read_user_scores(&self) -> Vec<ScoreEntry> {
        store::load_scores(&self.user_scores_path).unwrap_or_else(|e| {
            warn!("{}", e);
            Vec::new()
        })
    }

    /// Scans the best-score store; returns `(personal best, global best)`.
    pub fn load_personal_best(&mut self) -> (u32, u32) {
        let entries = self.read_user_scores();
        self.global_best = entries.iter().map(|e| e.score).max().unwrap_or(0);
        self.personal_best = entries
            .iter()
            .filter(|e| e.name == self.player)
            .map(|e| e.score)
            .max()
            .unwrap_or(0);
        (self.personal_best, self.global_best)
    }

    /// Stores `score` as the player's best if it beats the current one.
    /// Returns whether it did. The in-memory bests move even if the write fails.
    pub fn record_personal_best(&mut self, score: u32) -> bool {
        if score <= self.personal_best {
            return false;
        }
        let mut best = best_per_name(self.read_user_scores());
        let slot = best.entry(self.player.clone()).or_insert(score);
        *slot = (*slot).max(score);
        let stored = *slot;
        self.global_best = best.values().copied().fold(self.global_best, u32::max);
        self.write_user_scores(best);

        info!("new personal best for {}: {}", self.player, score);
        self.personal_best = stored;
        true
    }

    /// Rewrites the best-score store with one record per player.
    pub fn merge_session_best(&self) {
        let best = best_per_name(self.read_user_scores());
        self.write_user_scores(best);
    }

    fn write_user_scores(&self, best: BTreeMap<String, u32>) {
        let entries: Vec<ScoreEntry> = best
            .into_iter()
            .map(|(name, score)| ScoreEntry { name, score })
            .collect();
        if let Err(e) = store::save_scores(&self.user_scores_path, &entries) {
            warn!("{}", e);
        }
    }

    /// Rebuilds the leaderboard from its store.
    pub fn load_leaderboard(&mut self) -> &[ScoreEntry] {
        let raw = store::load_scores(&self.leaderboard_path).unwrap_or_else(|e| {
            warn!("{}", e);
            Vec::new()
        });
        self.leaderboard = ranked(best_per_name(raw));
        &self.leaderboard
    }

    /// Upserts the player's score, keeping the higher value, and rewrites the store.
    /// Zero scores are not recorded.
    pub fn record_to_leaderboard(&mut self, score: u32) {
        if score == 0 {
            return;
        }
        match self.leaderboard.iter_mut().find(|e| e.name == self.player) {
            Some(entry) => entry.score = entry.score.max(score),
            None => self.leaderboard.push(ScoreEntry::new(self.player.clone(), score)),
        }
        self.leaderboard.sort_by(rank);
        self.leaderboard.truncate(MAX_LEADERBOARD_ENTRIES);

        if let Err(e) = store::save_scores(&self.leaderboard_path, &self.leaderboard) {
            warn!("{}", e);
        }
    }
}
