//! Score-driven speed and difficulty.

pub const BASE_INTERVAL: f32 = 0.15;
pub const SPEED_DECREMENT: f32 = 0.02;
pub const SPEED_SCORE_STEP: u32 = 30;
pub const MIN_INTERVAL: f32 = 0.05;
pub const LEVEL_SCORE_STEP: u32 = 50;

/// Seconds between snake moves at the given cumulative score.
pub fn speed_interval(score: u32) -> f32 {
    let steps = (score / SPEED_SCORE_STEP) as f32;
    (BASE_INTERVAL - steps * SPEED_DECREMENT).max(MIN_INTERVAL)
}

pub fn difficulty_level(score: u32) -> u32 {
    score / LEVEL_SCORE_STEP + 1
}
