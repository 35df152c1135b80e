use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::grid::{Direction, GRID_HEIGHT, GRID_WIDTH, Position};

pub const INITIAL_LENGTH: usize = 3;
pub const FOOD_SCORE: u32 = 10;

/// What a single tick did to the snake.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Ate,
    Collided,
}

pub struct SnakeSim {
    snake: VecDeque<Position>,
    food: Position,
    obstacles: Vec<Position>,
    direction: Direction,
    next_direction: Direction,
    score: u32,
    rng: StdRng,
}

impl SnakeSim {
    /// Creates a simulation over a fixed obstacle set. Food placement draws from a
    /// generator seeded with `seed`.
    pub fn new(obstacles: Vec<Position>, seed: u64) -> Self {
        let mut sim = Self {
            snake: VecDeque::with_capacity(INITIAL_LENGTH),
            food: Position::new(0, 0),
            obstacles,
            direction: Direction::Up,
            next_direction: Direction::Up,
            score: 0,
            rng: StdRng::seed_from_u64(seed),
        };
        sim.reset();
        sim
    }

    /// Starts a new session: fresh snake, fresh food, zero score.
    pub fn reset(&mut self) {
        self.initialize();
        self.place_food();
        self.score = 0;
    }

    /// Vertical three-cell body centred on the grid, heading up.
    pub fn initialize(&mut self) {
        let (cx, cy) = (GRID_WIDTH / 2, GRID_HEIGHT / 2);
        self.snake.clear();
        self.snake.extend((0..INITIAL_LENGTH as i32).map(|i| Position::new(cx, cy + i)));
        self.direction = Direction::Up;
        self.next_direction = Direction::Up;
    }

    /// Picks a random free cell. Leaves food where it is when the board is full.
    pub fn place_food(&mut self) {
        let free: Vec<Position> = (0..GRID_WIDTH)
            .flat_map(|x| (0..GRID_HEIGHT).map(move |y| Position::new(x, y)))
            .filter(|p| !self.snake.contains(p) && !self.obstacles.contains(p))
            .collect();
        if free.is_empty() {
            debug!("no free cell for food");
            return;
        }
        self.food = free[self.rng.random_range(0..free.len())];
        debug!("food placed at ({}, {})", self.food.x, self.food.y);
    }

    /// Buffers a turn for the next tick. A reversal of the current heading is dropped.
    pub fn steer(&mut self, direction: Direction) {
        if !direction.is_opposite(self.direction) {
            self.next_direction = direction;
        }
    }

    /// Pushes a new head one cell along `direction`. The tail is left in place.
    pub fn step(&mut self, direction: Direction) {
        let head = self.head().offset(direction);
        self.snake.push_front(head);
    }

    pub fn check_collision(&self) -> bool {
        let head = self.head();
        !head.in_bounds()
            || self.snake.iter().skip(1).any(|segment| *segment == head)
            || self.obstacles.contains(&head)
    }

    /// Advances one logical move. On collision the new head is kept so the
    /// fatal position stays visible.
    pub fn tick(&mut self) -> TickOutcome {
        self.direction = self.next_direction;
        self.step(self.direction);

        if self.check_collision() {
            return TickOutcome::Collided;
        }
        if self.head() == self.food {
            self.score += FOOD_SCORE;
            self.place_food();
            TickOutcome::Ate
        } else {
            self.snake.pop_back();
            TickOutcome::Moved
        }
    }

    pub fn head(&self) -> Position {
        // initialize() always leaves at least one segment
        self.snake[0]
    }

    pub fn body(&self) -> &VecDeque<Position> {
        &self.snake
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn obstacles(&self) -> &[Position] {
        &self.obstacles
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, food: Position) {
        self.food = food;
    }

    #[cfg(test)]
    pub(crate) fn set_body(&mut self, body: &[Position], direction: Direction) {
        self.snake = body.iter().copied().collect();
        self.direction = direction;
        self.next_direction = direction;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    fn centre() -> Position {
        Position::new(GRID_WIDTH / 2, GRID_HEIGHT / 2)
    }

    fn far_food(sim: &mut SnakeSim) {
        sim.set_food(Position::new(0, GRID_HEIGHT - 1));
    }

    #[test]
    fn test_initial_snake() {
        let sim = SnakeSim::new(Vec::new(), 1);
        let c = centre();
        let body: Vec<Position> = sim.body().iter().copied().collect();
        assert_eq!(body, vec![c, Position::new(c.x, c.y + 1), Position::new(c.x, c.y + 2)]);
        assert_eq!(sim.direction(), Direction::Up);
        assert_eq!(sim.score(), 0);
        assert!(!body.contains(&sim.food()));
    }

    #[test]
    fn test_steer_commits_on_tick_unless_reversal() {
        for current in ALL {
            for wanted in ALL {
                let mut sim = SnakeSim::new(Vec::new(), 7);
                sim.set_body(&[centre()], current);
                far_food(&mut sim);
                sim.steer(wanted);
                assert_eq!(sim.direction(), current);
                sim.tick();
                let expected = if wanted == current.opposite() { current } else { wanted };
                assert_eq!(sim.direction(), expected, "current {:?} wanted {:?}", current, wanted);
            }
        }
    }

    #[test]
    fn test_reversal_does_not_overwrite_buffered_turn() {
        let mut sim = SnakeSim::new(Vec::new(), 3);
        sim.steer(Direction::Left);
        sim.steer(Direction::Down);
        assert_eq!(sim.next_direction(), Direction::Left);
    }

    #[test]
    fn test_length_constant_without_food() {
        let mut sim = SnakeSim::new(Vec::new(), 11);
        far_food(&mut sim);
        for _ in 0..5 {
            assert_eq!(sim.tick(), TickOutcome::Moved);
            assert_eq!(sim.len(), INITIAL_LENGTH);
        }
        assert_eq!(sim.head(), Position::new(centre().x, centre().y - 5));
    }

    #[test]
    fn test_eating_grows_and_replaces_food() {
        let obstacles = vec![Position::new(1, 1), Position::new(2, 2)];
        let mut sim = SnakeSim::new(obstacles.clone(), 5);
        let ahead = Position::new(centre().x, centre().y - 1);
        sim.set_food(ahead);

        assert_eq!(sim.tick(), TickOutcome::Ate);
        assert_eq!(sim.len(), INITIAL_LENGTH + 1);
        assert_eq!(sim.score(), FOOD_SCORE);
        assert_ne!(sim.food(), ahead);
        assert!(!sim.body().contains(&sim.food()));
        assert!(!obstacles.contains(&sim.food()));
    }

    #[test]
    fn test_food_avoids_snake_and_obstacles() {
        let obstacles: Vec<Position> = (0..GRID_WIDTH).map(|x| Position::new(x, 0)).collect();
        let mut sim = SnakeSim::new(obstacles.clone(), 99);
        for _ in 0..200 {
            sim.place_food();
            assert!(sim.food().in_bounds());
            assert!(!sim.body().contains(&sim.food()));
            assert!(!obstacles.contains(&sim.food()));
        }
    }

    #[test]
    fn test_food_unchanged_when_board_full() {
        let everything: Vec<Position> = (0..GRID_WIDTH)
            .flat_map(|x| (0..GRID_HEIGHT).map(move |y| Position::new(x, y)))
            .collect();
        let mut sim = SnakeSim::new(Vec::new(), 2);
        sim.set_food(Position::new(4, 4));
        sim.set_body(&everything, Direction::Up);
        sim.place_food();
        assert_eq!(sim.food(), Position::new(4, 4));
    }

    #[test]
    fn test_same_seed_same_food() {
        let a = SnakeSim::new(Vec::new(), 1234);
        let b = SnakeSim::new(Vec::new(), 1234);
        assert_eq!(a.food(), b.food());
    }

    #[test]
    fn test_collision_with_walls() {
        let mut sim = SnakeSim::new(Vec::new(), 1);
        sim.set_body(&[Position::new(0, 5)], Direction::Left);
        sim.step(Direction::Left);
        assert!(sim.check_collision());

        sim.set_body(&[Position::new(GRID_WIDTH - 1, 5)], Direction::Right);
        sim.step(Direction::Right);
        assert!(sim.check_collision());

        sim.set_body(&[Position::new(5, 0)], Direction::Up);
        sim.step(Direction::Up);
        assert!(sim.check_collision());

        sim.set_body(&[Position::new(5, GRID_HEIGHT - 1)], Direction::Down);
        sim.step(Direction::Down);
        assert!(sim.check_collision());

        sim.set_body(&[Position::new(5, 5)], Direction::Down);
        sim.step(Direction::Down);
        assert!(!sim.check_collision());
    }

    #[test]
    fn test_collision_with_body_and_obstacle() {
        let mut sim = SnakeSim::new(vec![Position::new(10, 9)], 1);
        // head (10,10) turning back into its own loop
        sim.set_body(
            &[
                Position::new(10, 10),
                Position::new(11, 10),
                Position::new(11, 11),
                Position::new(10, 11),
                Position::new(9, 11),
            ],
            Direction::Down,
        );
        sim.step(Direction::Down);
        assert!(sim.check_collision());

        sim.set_body(&[Position::new(10, 10), Position::new(10, 11)], Direction::Up);
        sim.step(Direction::Up);
        assert!(sim.check_collision());
    }

    #[test]
    fn test_moving_into_tail_cell_collides() {
        let mut sim = SnakeSim::new(Vec::new(), 1);
        sim.set_body(
            &[
                Position::new(5, 5),
                Position::new(6, 5),
                Position::new(6, 6),
                Position::new(5, 6),
            ],
            Direction::Left,
        );
        far_food(&mut sim);
        sim.steer(Direction::Down);
        assert_eq!(sim.tick(), TickOutcome::Collided);
    }
}
