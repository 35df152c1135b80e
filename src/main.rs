use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

use macroquad::prelude::*;
use snake_modern::config::CONFIG_FILE;
use snake_modern::{Direction, Game, GameConfig, GameState, Intent, logging};
use tracing::info;

mod render;

const DIRECTION_KEYS: [([KeyCode; 2], Direction); 4] = [
    ([KeyCode::Up, KeyCode::W], Direction::Up),
    ([KeyCode::Down, KeyCode::S], Direction::Down),
    ([KeyCode::Left, KeyCode::A], Direction::Left),
    ([KeyCode::Right, KeyCode::D], Direction::Right),
];

fn any_pressed(keys: &[KeyCode]) -> bool {
    keys.iter().any(|k| is_key_pressed(*k))
}

/// Q/Escape leaves the program from the menu and returns to the menu elsewhere.
fn back_or_quit(state: GameState) -> Intent {
    if state == GameState::Menu { Intent::Quit } else { Intent::Back }
}

/// Translates this frame's key presses into intents. Space pauses during play
/// and confirms everywhere else.
fn frame_intents(state: GameState) -> Vec<Intent> {
    let in_play = matches!(state, GameState::Playing | GameState::Paused);
    let space = is_key_pressed(KeyCode::Space);
    let mut intents: Vec<Intent> = DIRECTION_KEYS
        .iter()
        .filter(|(keys, _)| any_pressed(keys))
        .map(|(_, direction)| Intent::Move(*direction))
        .collect();

    if any_pressed(&[KeyCode::P]) || (in_play && space) {
        intents.push(Intent::TogglePause);
    }
    if any_pressed(&[KeyCode::Enter, KeyCode::KpEnter]) || (!in_play && space) {
        intents.push(Intent::Confirm);
    }
    if any_pressed(&[KeyCode::Q, KeyCode::Escape]) {
        intents.push(back_or_quit(state));
    }
    if is_key_pressed(KeyCode::R) {
        intents.push(Intent::Restart);
    }
    if is_key_pressed(KeyCode::L) {
        intents.push(Intent::OpenLeaderboard);
    }
    intents
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Snake Game - Modern Edition".to_owned(),
        window_width: render::SCREEN_WIDTH,
        window_height: render::SCREEN_HEIGHT,
        window_resizable: false,
        high_dpi: true,
        ..Default::default()
    }
}

async fn run(player: String, config: GameConfig) {
    prevent_quit();
    let mut game = Game::new(player, config);

    while game.is_running() {
        if is_quit_requested() {
            info!("window closed");
            break;
        }

        let state = game.state();
        for intent in frame_intents(state) {
            game.handle_intent(intent);
            // one screen handles a frame's input
            if game.state() != state || !game.is_running() {
                break;
            }
        }

        game.update(get_frame_time());
        render::draw(&game.snapshot());
        next_frame().await;
    }
    game.shutdown();
}

fn prompt_player(config: &GameConfig) -> snake_modern::Result<String> {
    let mut stdout = io::stdout();
    println!("Welcome to Snake Game - Modern Edition!");
    print!("Enter your name: ");
    stdout.flush()?;
    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(config.player_name(&input))
}

fn setup() -> snake_modern::Result<(String, GameConfig)> {
    let config = GameConfig::load(Path::new(CONFIG_FILE))?;
    let player = prompt_player(&config)?;
    Ok((player, config))
}

fn main() -> ExitCode {
    logging::init();
    match setup() {
        Ok((player, config)) => {
            info!("starting as {}", player);
            macroquad::Window::from_config(window_conf(), run(player, config));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("An unhandled error occurred: {}", e);
            ExitCode::FAILURE
        }
    }
}
