use macroquad::prelude::*;
use snake_modern::{GRID_HEIGHT, GRID_WIDTH, GameState, MENU_ITEMS, Position, Snapshot};

// Layout
pub const CELL_SIZE: i32 = 20;
pub const PANEL_WIDTH: i32 = 250;
pub const SCREEN_WIDTH: i32 = GRID_WIDTH * CELL_SIZE + PANEL_WIDTH;
pub const SCREEN_HEIGHT: i32 = GRID_HEIGHT * CELL_SIZE + 150;

// Palette
const BACKGROUND: Color = Color::new(0.06, 0.06, 0.1, 1.0);
const SNAKE_HEAD: Color = Color::new(0.39, 1.0, 0.39, 1.0);
const SNAKE_BODY: Color = Color::new(0.2, 0.78, 0.2, 1.0);
const FOOD: Color = Color::new(1.0, 0.39, 0.39, 1.0);
const OBSTACLE: Color = Color::new(0.47, 0.47, 0.47, 1.0);
const GRID_LINE: Color = Color::new(0.12, 0.12, 0.16, 1.0);
const TEXT: Color = Color::new(0.78, 0.78, 0.78, 1.0);
const ACCENT: Color = Color::new(0.39, 0.59, 1.0, 1.0);
const WARNING: Color = Color::new(1.0, 0.78, 0.39, 1.0);
const SUCCESS: Color = Color::new(0.39, 1.0, 0.59, 1.0);

fn fade(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, alpha)
}

fn draw_centered(text: &str, y: f32, size: u16, color: Color) {
    let m = measure_text(text, None, size, 1.0);
    draw_text(text, (SCREEN_WIDTH as f32 - m.width) * 0.5, y, size as f32, color);
}

fn draw_cell(cell: Position, color: Color) {
    let size = (CELL_SIZE - 2) as f32;
    draw_rectangle((cell.x * CELL_SIZE) as f32, (cell.y * CELL_SIZE) as f32, size, size, color);
}

pub fn draw(snap: &Snapshot) {
    clear_background(BACKGROUND);
    match snap.state {
        GameState::Menu => draw_menu(snap),
        GameState::Playing => {
            draw_field(snap);
            draw_panel(snap);
        }
        GameState::Paused => {
            draw_field(snap);
            draw_panel(snap);
            draw_pause_overlay();
        }
        GameState::GameOver => {
            draw_field(snap);
            draw_panel(snap);
            draw_game_over(snap);
        }
        GameState::Leaderboard => draw_leaderboard(snap),
        GameState::Settings => draw_settings(snap),
    }
}

fn draw_field(snap: &Snapshot) {
    if snap.show_grid {
        let (w, h) = ((GRID_WIDTH * CELL_SIZE) as f32, (GRID_HEIGHT * CELL_SIZE) as f32);
        for x in 0..=GRID_WIDTH {
            let px = (x * CELL_SIZE) as f32;
            draw_line(px, 0.0, px, h, 1.0, GRID_LINE);
        }
        for y in 0..=GRID_HEIGHT {
            let py = (y * CELL_SIZE) as f32;
            draw_line(0.0, py, w, py, 1.0, GRID_LINE);
        }
    }

    for obstacle in snap.obstacles {
        draw_cell(*obstacle, OBSTACLE);
    }

    let len = snap.snake.len() as f32;
    // a fatal head can sit outside the grid
    for (i, segment) in snap.snake.iter().enumerate().filter(|(_, s)| s.in_bounds()) {
        let color = if i == 0 {
            SNAKE_HEAD
        } else {
            fade(SNAKE_BODY, (1.0 - i as f32 / len) * 0.8 + 0.2)
        };
        draw_cell(*segment, color);
    }

    let pulse = (snap.animation_time * 8.0).sin() * 0.3 + 0.7;
    let half = CELL_SIZE as f32 * 0.5;
    draw_circle(
        snap.food.x as f32 * CELL_SIZE as f32 + half,
        snap.food.y as f32 * CELL_SIZE as f32 + half,
        (half - 2.0) * pulse,
        fade(FOOD, pulse),
    );
}

fn draw_panel(snap: &Snapshot) {
    let x = (GRID_WIDTH * CELL_SIZE + 20) as f32;
    let mut y = 30.0;
    let mut line = |text: &str, size: f32, color: Color, gap: f32| {
        draw_text(text, x, y, size, color);
        y += gap;
    };

    line("SNAKE GAME", 26.0, ACCENT, 25.0);
    line("Modern Edition", 18.0, TEXT, 35.0);
    line(&format!("Player: {}", snap.player), 20.0, SUCCESS, 25.0);
    line(&format!("Score: {}", snap.score), 22.0, WHITE, 25.0);
    line(&format!("Your Best: {}", snap.personal_best), 18.0, WARNING, 25.0);
    line(&format!("Best Overall: {}", snap.global_best), 18.0, ACCENT, 35.0);
    line(&format!("Speed Level: {}", snap.difficulty_level), 18.0, WARNING, 35.0);
    line("Controls:", 20.0, ACCENT, 25.0);
    for hint in ["WASD/Arrows - Move", "P/Space - Pause", "Q/Esc - Menu", "L - Leaderboard"] {
        line(hint, 16.0, TEXT, 20.0);
    }
}

fn draw_menu(snap: &Snapshot) {
    let cy = SCREEN_HEIGHT as f32 * 0.5;
    draw_centered("SNAKE GAME", cy - 130.0, 44, ACCENT);
    draw_centered("Modern Edition", cy - 95.0, 22, TEXT);
    draw_centered(&format!("Welcome, {}!", snap.player), cy - 55.0, 20, SUCCESS);
    draw_centered(&format!("Highest Score: {}", snap.global_best), cy - 30.0, 16, WARNING);
    draw_centered(&format!("Your Best: {}", snap.personal_best), cy - 10.0, 16, TEXT);

    let cx = SCREEN_WIDTH as f32 * 0.5;
    for (i, item) in MENU_ITEMS.iter().enumerate() {
        let y = cy + 40.0 + i as f32 * 40.0;
        let selected = i == snap.selected_menu_item;
        if selected {
            draw_rectangle(cx - 100.0, y - 22.0, 200.0, 30.0, fade(ACCENT, 0.2));
            draw_text(">", cx - 80.0, y, 20.0, ACCENT);
        }
        draw_text(item, cx - 60.0, y, 20.0, if selected { ACCENT } else { TEXT });
    }

    draw_centered("Use W/S or Arrows to navigate, Enter to select", SCREEN_HEIGHT as f32 - 50.0, 16, TEXT);
    draw_centered("Speed increases automatically as you eat!", SCREEN_HEIGHT as f32 - 28.0, 14, WARNING);
}

fn draw_overlay_box(width: f32, height: f32, dim: f32) {
    let (sw, sh) = (SCREEN_WIDTH as f32, SCREEN_HEIGHT as f32);
    draw_rectangle(0.0, 0.0, sw, sh, fade(BLACK, dim));
    let (x, y) = ((sw - width) * 0.5, (sh - height) * 0.5);
    draw_rectangle(x, y, width, height, fade(BACKGROUND, 0.95));
    draw_rectangle_lines(x, y, width, height, 2.0, ACCENT);
}

fn draw_pause_overlay() {
    let cy = SCREEN_HEIGHT as f32 * 0.5;
    draw_overlay_box(220.0, 120.0, 0.5);
    draw_centered("PAUSED", cy - 25.0, 24, ACCENT);
    draw_centered("Press P to continue", cy + 5.0, 16, TEXT);
    draw_centered("Press Q for menu", cy + 28.0, 16, TEXT);
}

fn draw_game_over(snap: &Snapshot) {
    let cy = SCREEN_HEIGHT as f32 * 0.5;
    draw_overlay_box(400.0, 300.0, 0.7);
    draw_centered("GAME OVER", cy - 100.0, 32, WARNING);
    draw_centered(&format!("Final Score: {}", snap.score), cy - 60.0, 22, WHITE);
    if snap.new_personal_best {
        draw_centered("NEW PERSONAL BEST!", cy - 20.0, 20, SUCCESS);
    } else if snap.new_global_best {
        draw_centered("NEW HIGHEST SCORE!", cy - 20.0, 20, WARNING);
    }
    draw_centered("R - Restart Game", cy + 80.0, 18, ACCENT);
    draw_centered("L - View Leaderboard", cy + 102.0, 18, ACCENT);
    draw_centered("Q - Return to Menu", cy + 124.0, 18, ACCENT);
}

fn draw_leaderboard(snap: &Snapshot) {
    draw_centered("LEADERBOARD", 60.0, 36, ACCENT);
    let top = 110.0;
    if snap.leaderboard.is_empty() {
        draw_centered("No scores yet. Be the first!", top + 60.0, 22, TEXT);
    } else {
        draw_text("Rank", 50.0, top, 18.0, ACCENT);
        draw_text("Player", 150.0, top, 18.0, ACCENT);
        draw_text("Score", 350.0, top, 18.0, ACCENT);
        draw_line(50.0, top + 10.0, SCREEN_WIDTH as f32 - 50.0, top + 10.0, 1.0, GRID_LINE);

        for (i, entry) in snap.leaderboard.iter().enumerate() {
            let y = top + 40.0 + i as f32 * 30.0;
            let mine = entry.name == snap.player;
            if mine {
                draw_rectangle(40.0, y - 20.0, SCREEN_WIDTH as f32 - 80.0, 26.0, fade(ACCENT, 0.2));
            }
            let color = if mine { SUCCESS } else { TEXT };
            draw_text(&(i + 1).to_string(), 50.0, y, 18.0, TEXT);
            draw_text(&entry.name, 150.0, y, 18.0, color);
            draw_text(&entry.score.to_string(), 350.0, y, 18.0, color);
        }
    }
    draw_centered("Press Q or Escape to return to menu", SCREEN_HEIGHT as f32 - 40.0, 16, TEXT);
}

fn draw_settings(snap: &Snapshot) {
    let cx = SCREEN_WIDTH as f32 * 0.5;
    draw_centered("SETTINGS", 60.0, 36, ACCENT);
    draw_centered("Speed increases automatically with score!", 110.0, 16, WARNING);

    draw_text("Show Grid", cx - 100.0, 200.0, 20.0, ACCENT);
    let (label, color) = if snap.show_grid { ("ON", SUCCESS) } else { ("OFF", WARNING) };
    draw_text(label, cx + 50.0, 200.0, 20.0, color);
    draw_centered("Press Enter to toggle", 228.0, 14, TEXT);

    draw_centered("Q/Escape - Back to Menu", SCREEN_HEIGHT as f32 - 40.0, 16, TEXT);
}
