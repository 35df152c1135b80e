//! Top-level game controller: menu, play, pause, game over, leaderboard and settings.

use std::collections::VecDeque;

use tracing::{info, warn};

use crate::config::GameConfig;
use crate::difficulty::{difficulty_level, speed_interval};
use crate::grid::{Direction, Position};
use crate::scores::{ScoreBook, ScoreEntry};
use crate::snake::{SnakeSim, TickOutcome};
use crate::store::{self, Settings};

pub const MENU_ITEMS: [&str; 4] = ["Start Game", "Leaderboard", "Settings", "Exit"];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Menu,
    Playing,
    Paused,
    GameOver,
    Leaderboard,
    Settings,
}

/// Device-independent input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Move(Direction),
    Confirm,
    Back,
    TogglePause,
    Restart,
    OpenLeaderboard,
    Quit,
}

/// Everything the presentation layer needs to draw one frame.
pub struct Snapshot<'a> {
    pub state: GameState,
    pub player: &'a str,
    pub snake: &'a VecDeque<Position>,
    pub food: Position,
    pub obstacles: &'a [Position],
    pub score: u32,
    pub personal_best: u32,
    pub global_best: u32,
    pub difficulty_level: u32,
    pub leaderboard: &'a [ScoreEntry],
    pub selected_menu_item: usize,
    pub show_grid: bool,
    pub animation_time: f32,
    pub new_personal_best: bool,
    pub new_global_best: bool,
}

pub struct Game {
    state: GameState,
    sim: SnakeSim,
    scores: ScoreBook,
    settings: Settings,
    config: GameConfig,
    selected_menu_item: usize,
    move_timer: f32,
    animation_timer: f32,
    new_personal_best: bool,
    new_global_best: bool,
    running: bool,
    shut_down: bool,
}

impl Game {
    /// Loads settings, scores and obstacles from the configured stores and starts in the menu.
    pub fn new(player: impl Into<String>, config: GameConfig) -> Self {
        let settings = store::load_settings(&config.settings_path).unwrap_or_else(|e| {
            warn!("{}", e);
            Settings::default()
        });
        let obstacles = store::load_obstacles(&config.obstacles_path).unwrap_or_else(|e| {
            warn!("{}", e);
            Vec::new()
        });
        let scores = ScoreBook::open(player, config.user_scores_path.clone(), config.leaderboard_path.clone());
        info!(
            "loaded {} obstacles; {} best {}, overall best {}",
            obstacles.len(),
            scores.player(),
            scores.personal_best(),
            scores.global_best()
        );

        let mut game = Self {
            state: GameState::Menu,
            sim: SnakeSim::new(obstacles, config.seed()),
            scores,
            settings,
            config,
            selected_menu_item: 0,
            move_timer: 0.0,
            animation_timer: 0.0,
            new_personal_best: false,
            new_global_best: false,
            running: true,
            shut_down: false,
        };
        game.reset();
        game
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn sim(&self) -> &SnakeSim {
        &self.sim
    }

    fn reset(&mut self) {
        self.sim.reset();
        self.move_timer = 0.0;
        self.animation_timer = 0.0;
        self.new_personal_best = false;
        self.new_global_best = false;
    }

    fn change_state(&mut self, next: GameState) {
        if next != self.state {
            info!("state {:?} -> {:?}", self.state, next);
        }
        self.state = next;
        self.selected_menu_item = 0;
        if next == GameState::Leaderboard {
            self.scores.load_leaderboard();
        }
    }

    fn start_session(&mut self) {
        self.reset();
        info!("session started for {}", self.scores.player());
        self.change_state(GameState::Playing);
    }

    pub fn handle_intent(&mut self, intent: Intent) {
        match self.state {
            GameState::Menu => self.handle_menu(intent),
            GameState::Playing => match intent {
                Intent::TogglePause => self.change_state(GameState::Paused),
                Intent::Back => self.change_state(GameState::Menu),
                Intent::Move(direction) => self.sim.steer(direction),
                _ => {}
            },
            GameState::Paused => match intent {
                Intent::TogglePause => self.change_state(GameState::Playing),
                Intent::Back => self.change_state(GameState::Menu),
                _ => {}
            },
            GameState::GameOver => match intent {
                Intent::Restart => self.start_session(),
                Intent::Back => self.change_state(GameState::Menu),
                Intent::OpenLeaderboard => self.change_state(GameState::Leaderboard),
                _ => {}
            },
            GameState::Leaderboard => {
                if matches!(intent, Intent::Back | Intent::Confirm) {
                    self.change_state(GameState::Menu);
                }
            }
            GameState::Settings => match intent {
                Intent::Confirm => self.settings.show_grid = !self.settings.show_grid,
                Intent::Back => {
                    self.save_settings();
                    self.change_state(GameState::Menu);
                }
                _ => {}
            },
        }
    }

    fn handle_menu(&mut self, intent: Intent) {
        let count = MENU_ITEMS.len();
        match intent {
            Intent::Move(Direction::Down) => self.selected_menu_item = (self.selected_menu_item + 1) % count,
            Intent::Move(Direction::Up) => self.selected_menu_item = (self.selected_menu_item + count - 1) % count,
            Intent::Confirm => match self.selected_menu_item {
                0 => self.start_session(),
                1 => self.change_state(GameState::Leaderboard),
                2 => self.change_state(GameState::Settings),
                _ => self.quit(),
            },
            Intent::Quit => self.quit(),
            _ => {}
        }
    }

    fn quit(&mut self) {
        info!("quit requested");
        self.running = false;
        self.shutdown();
    }

    /// Advances timers by `dt` seconds; moves the snake when playing and its interval has elapsed.
    pub fn update(&mut self, dt: f32) {
        self.animation_timer += dt;
        if self.state != GameState::Playing {
            return;
        }
        self.move_timer += dt;
        if self.move_timer < speed_interval(self.sim.score()) {
            return;
        }
        self.move_timer = 0.0;
        if self.sim.tick() == TickOutcome::Collided {
            self.end_session();
        }
    }

    fn end_session(&mut self) {
        let score = self.sim.score();
        let previous_personal = self.scores.personal_best();
        let previous_global = self.scores.global_best();
        self.new_personal_best = score > previous_personal && previous_personal > 0;
        self.new_global_best = score > previous_global && previous_global > 0;
        info!("session over for {} with score {}", self.scores.player(), score);

        self.scores.record_to_leaderboard(score);
        self.scores.record_personal_best(score);
        self.change_state(GameState::GameOver);
    }

    fn save_settings(&self) {
        if let Err(e) = store::save_settings(&self.config.settings_path, self.settings) {
            warn!("{}", e);
        }
    }

    /// Flushes best scores and settings. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        self.scores.merge_session_best();
        self.save_settings();
        info!("shutdown complete");
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let score = self.sim.score();
        Snapshot {
            state: self.state,
            player: self.scores.player(),
            snake: self.sim.body(),
            food: self.sim.food(),
            obstacles: self.sim.obstacles(),
            score,
            personal_best: self.scores.personal_best(),
            global_best: self.scores.global_best(),
            difficulty_level: difficulty_level(score),
            leaderboard: self.scores.leaderboard(),
            selected_menu_item: self.selected_menu_item,
            show_grid: self.settings.show_grid,
            animation_time: self.animation_timer,
            new_personal_best: self.new_personal_best,
            new_global_best: self.new_global_best,
        }
    }
}

impl Drop for Game {
    fn drop(&mut self) {
        self.shutdown();
    }
}
