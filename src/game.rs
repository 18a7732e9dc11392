use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{GameSettings, GridSize};
use crate::food::spawn_position;
use crate::input::{Direction, direction_change_is_valid};
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

/// Why the last game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    Wall,
    SelfCollision,
    /// The snake filled every cell, leaving nowhere to place food.
    BoardFull,
}

impl DeathReason {
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::Wall => "Hit the wall",
            Self::SelfCollision => "Bit yourself",
            Self::BoardFull => "Board full",
        }
    }
}

/// What a single call to [`GameState::tick`] did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// Not running, nothing changed.
    Idle,
    Moved,
    Ate { new_high_score: bool },
    Died(DeathReason),
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub direction: Option<Direction>,
    pub score: u32,
    pub high_score: u32,
    pub tick_interval_ms: u64,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    /// Set once the current game has beaten the previous high score.
    pub beat_high_score: bool,
    settings: GameSettings,
    rng: StdRng,
}

impl GameState {
    /// Creates a fresh game seeded from system entropy.
    #[must_use]
    pub fn new(settings: GameSettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(settings: GameSettings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: GameSettings, mut rng: StdRng) -> Self {
        let snake = Snake::new(start_position(settings.grid));
        // `GridSize` keeps at least 2x2 cells, so a one-cell snake leaves room.
        let food = spawn_position(&mut rng, settings.grid, &snake)
            .unwrap_or_else(|| snake.head());

        Self {
            snake,
            food,
            direction: None,
            score: 0,
            high_score: 0,
            tick_interval_ms: settings.base_tick_interval_ms,
            status: GameStatus::NotStarted,
            death_reason: None,
            beat_high_score: false,
            settings,
            rng,
        }
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.settings.grid
    }

    #[must_use]
    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    /// Seeds the high score loaded from storage.
    pub fn set_high_score(&mut self, high_score: u32) {
        self.high_score = self.high_score.max(high_score);
    }

    /// Requests a new heading.
    ///
    /// Ignored while paused or over, and when `direction` reverses the
    /// current heading. The first accepted request starts the game.
    /// Returns whether the request was accepted.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if matches!(self.status, GameStatus::Paused | GameStatus::GameOver) {
            return false;
        }

        if !direction_change_is_valid(self.direction, direction) {
            return false;
        }

        self.direction = Some(direction);

        if self.status == GameStatus::NotStarted {
            self.status = GameStatus::Running;
            info!("game started heading {direction:?}");
        }

        true
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Running {
            return TickOutcome::Idle;
        }
        let Some(direction) = self.direction else {
            return TickOutcome::Idle;
        };

        let next_head = self.snake.head().step(direction);

        if !next_head.is_within_bounds(self.settings.grid) {
            return self.end(DeathReason::Wall);
        }

        // Checked against the body before the tail moves away.
        if self.snake.occupies(next_head) {
            return self.end(DeathReason::SelfCollision);
        }

        let ate = next_head == self.food;
        self.snake.advance(next_head, ate);

        if !ate {
            return TickOutcome::Moved;
        }

        self.score += self.settings.food_points;
        let new_high_score = self.score > self.high_score;
        if new_high_score {
            self.high_score = self.score;
            self.beat_high_score = true;
        }
        self.speed_up();

        match spawn_position(&mut self.rng, self.settings.grid, &self.snake) {
            Some(food) => self.food = food,
            None => return self.end(DeathReason::BoardFull),
        }

        TickOutcome::Ate { new_high_score }
    }

    /// Switches between running and paused. No effect in other states.
    pub fn toggle_pause(&mut self) -> bool {
        self.status = match self.status {
            GameStatus::Running => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Running,
            _ => return false,
        };
        debug!("pause toggled, now {:?}", self.status);
        true
    }

    /// Resets the board for a new game, keeping the high score.
    pub fn restart(&mut self) {
        self.snake = Snake::new(start_position(self.settings.grid));
        self.direction = None;
        self.score = 0;
        self.tick_interval_ms = self.settings.base_tick_interval_ms;
        self.status = GameStatus::NotStarted;
        self.death_reason = None;
        self.beat_high_score = false;
        if let Some(food) = spawn_position(&mut self.rng, self.settings.grid, &self.snake) {
            self.food = food;
        }
        info!("game restarted");
    }

    fn end(&mut self, reason: DeathReason) -> TickOutcome {
        self.status = GameStatus::GameOver;
        self.death_reason = Some(reason);
        info!(
            "game over ({reason:?}) with score {} and length {}",
            self.score,
            self.snake.len()
        );
        TickOutcome::Died(reason)
    }

    fn speed_up(&mut self) {
        let next = self
            .tick_interval_ms
            .saturating_sub(self.settings.tick_interval_step_ms)
            .max(self.settings.min_tick_interval_ms);
        if next != self.tick_interval_ms {
            debug!("tick interval {} -> {next} ms", self.tick_interval_ms);
            self.tick_interval_ms = next;
        }
    }
}

/// Centre cell of the grid; (10, 10) on the default 20x20 board.
fn start_position(grid: GridSize) -> Position {
    let centre = i32::from(grid.count() / 2);
    Position::new(centre, centre)
}

#[cfg(test)]
mod tests {
    use crate::config::GameSettings;
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    use super::{DeathReason, GameState, GameStatus, TickOutcome};

    fn running_state(seed: u64) -> GameState {
        let mut state = GameState::new_with_seed(GameSettings::default(), seed);
        state.status = GameStatus::Running;
        state
    }

    fn segments(cells: &[(i32, i32)]) -> Snake {
        Snake::from_segments(cells.iter().map(|&(x, y)| Position::new(x, y)).collect())
            .expect("segments are non-empty")
    }

    #[test]
    fn new_game_waits_at_the_centre() {
        let state = GameState::new_with_seed(GameSettings::default(), 1);

        assert_eq!(state.status, GameStatus::NotStarted);
        assert_eq!(state.snake.head(), Position::new(10, 10));
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.direction, None);
        assert_eq!(state.tick_interval_ms, 200);
        assert!(!state.snake.occupies(state.food));
    }

    #[test]
    fn first_direction_starts_the_game() {
        let mut state = GameState::new_with_seed(GameSettings::default(), 1);

        assert!(state.request_direction(Direction::Left));

        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.direction, Some(Direction::Left));
    }

    #[test]
    fn reverse_direction_is_ignored() {
        let mut state = running_state(2);
        state.direction = Some(Direction::Right);

        assert!(!state.request_direction(Direction::Left));
        assert_eq!(state.direction, Some(Direction::Right));

        assert!(state.request_direction(Direction::Up));
        assert_eq!(state.direction, Some(Direction::Up));
    }

    #[test]
    fn direction_requests_ignored_while_paused_or_over() {
        let mut state = running_state(3);
        state.direction = Some(Direction::Right);

        state.status = GameStatus::Paused;
        assert!(!state.request_direction(Direction::Up));

        state.status = GameStatus::GameOver;
        assert!(!state.request_direction(Direction::Up));

        assert_eq!(state.direction, Some(Direction::Right));
    }

    #[test]
    fn eating_food_grows_scores_and_moves_food() {
        let mut state = running_state(4);
        state.snake = Snake::new(Position::new(10, 10));
        state.direction = Some(Direction::Right);
        state.food = Position::new(11, 10);

        let outcome = state.tick();

        assert_eq!(
            outcome,
            TickOutcome::Ate {
                new_high_score: true
            }
        );
        let cells: Vec<_> = state.snake.segments().copied().collect();
        assert_eq!(cells, vec![Position::new(11, 10), Position::new(10, 10)]);
        assert_eq!(state.score, 10);
        assert_ne!(state.food, Position::new(11, 10));
        assert_ne!(state.food, Position::new(10, 10));
        assert_eq!(state.tick_interval_ms, 199);
    }

    #[test]
    fn wall_collision_ends_game_and_keeps_snake() {
        let mut state = running_state(5);
        state.snake = segments(&[(0, 5), (1, 5)]);
        state.direction = Some(Direction::Left);
        let before = state.snake.clone();

        let outcome = state.tick();

        assert_eq!(outcome, TickOutcome::Died(DeathReason::Wall));
        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.death_reason, Some(DeathReason::Wall));
        assert_eq!(state.snake, before);
    }

    #[test]
    fn self_collision_ends_game() {
        let mut state = running_state(6);
        state.snake = segments(&[(2, 2), (1, 2), (1, 3), (2, 3), (3, 3), (3, 2)]);
        state.direction = Some(Direction::Down);
        state.food = Position::new(15, 15);
        let before = state.snake.clone();

        assert_eq!(state.tick(), TickOutcome::Died(DeathReason::SelfCollision));
        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.snake, before);
    }

    #[test]
    fn moving_into_the_current_tail_cell_collides() {
        let mut state = running_state(7);
        state.snake = segments(&[(2, 2), (3, 2), (3, 3), (2, 3)]);
        state.direction = Some(Direction::Down);
        state.food = Position::new(15, 15);

        assert_eq!(state.tick(), TickOutcome::Died(DeathReason::SelfCollision));
    }

    #[test]
    fn plain_move_drops_tail() {
        let mut state = running_state(8);
        state.snake = segments(&[(5, 5), (5, 6), (5, 7)]);
        state.direction = Some(Direction::Up);
        state.food = Position::new(15, 15);

        assert_eq!(state.tick(), TickOutcome::Moved);

        let cells: Vec<_> = state.snake.segments().copied().collect();
        assert_eq!(
            cells,
            vec![Position::new(5, 4), Position::new(5, 5), Position::new(5, 6)]
        );
        assert_eq!(state.score, 0);
    }

    #[test]
    fn tick_is_idle_unless_running() {
        let mut state = GameState::new_with_seed(GameSettings::default(), 9);
        let before = state.snake.clone();

        assert_eq!(state.tick(), TickOutcome::Idle);

        state.request_direction(Direction::Up);
        state.toggle_pause();
        assert_eq!(state.tick(), TickOutcome::Idle);
        assert_eq!(state.snake, before);
    }

    #[test]
    fn tick_interval_never_drops_below_floor() {
        let mut state = running_state(10);
        state.tick_interval_ms = 121;

        for _ in 0..3 {
            state.speed_up();
        }

        assert_eq!(state.tick_interval_ms, 120);
    }

    #[test]
    fn high_score_only_moves_when_strictly_beaten() {
        let mut state = running_state(11);
        state.set_high_score(10);
        state.snake = Snake::new(Position::new(10, 10));
        state.direction = Some(Direction::Right);
        state.food = Position::new(11, 10);

        assert_eq!(
            state.tick(),
            TickOutcome::Ate {
                new_high_score: false
            }
        );
        assert_eq!(state.high_score, 10);
        assert!(!state.beat_high_score);

        state.food = Position::new(12, 10);
        assert_eq!(
            state.tick(),
            TickOutcome::Ate {
                new_high_score: true
            }
        );
        assert_eq!(state.high_score, 20);
        assert!(state.beat_high_score);

        state.set_high_score(5);
        assert_eq!(state.high_score, 20);
    }

    #[test]
    fn pause_toggles_only_between_running_and_paused() {
        let mut state = GameState::new_with_seed(GameSettings::default(), 12);

        assert!(!state.toggle_pause());
        assert_eq!(state.status, GameStatus::NotStarted);

        state.request_direction(Direction::Down);
        assert!(state.toggle_pause());
        assert_eq!(state.status, GameStatus::Paused);
        assert!(state.toggle_pause());
        assert_eq!(state.status, GameStatus::Running);

        state.status = GameStatus::GameOver;
        assert!(!state.toggle_pause());
        assert_eq!(state.status, GameStatus::GameOver);
    }

    #[test]
    fn restart_resets_everything_but_high_score() {
        let mut state = running_state(13);
        state.snake = segments(&[(3, 3), (3, 4)]);
        state.direction = Some(Direction::Up);
        state.score = 50;
        state.high_score = 50;
        state.tick_interval_ms = 150;
        state.status = GameStatus::GameOver;
        state.death_reason = Some(DeathReason::Wall);

        state.restart();
        let once = (
            state.snake.clone(),
            state.direction,
            state.score,
            state.tick_interval_ms,
            state.status,
            state.death_reason,
        );
        state.restart();

        assert_eq!(
            once,
            (
                state.snake.clone(),
                state.direction,
                state.score,
                state.tick_interval_ms,
                state.status,
                state.death_reason,
            )
        );
        assert_eq!(state.snake, Snake::new(Position::new(10, 10)));
        assert_eq!(state.score, 0);
        assert_eq!(state.tick_interval_ms, 200);
        assert_eq!(state.status, GameStatus::NotStarted);
        assert_eq!(state.high_score, 50);
        assert!(!state.snake.occupies(state.food));
    }

    #[test]
    fn tiny_grid_still_starts_in_bounds_with_free_food() {
        let state = GameState::new_with_seed(GameSettings::with_grid(0), 15);

        assert!(state.snake.head().is_within_bounds(state.bounds()));
        assert!(state.food.is_within_bounds(state.bounds()));
        assert!(!state.snake.occupies(state.food));
    }

    #[test]
    fn filling_the_board_ends_the_game() {
        let mut state = GameState::new_with_seed(GameSettings::with_grid(2), 14);
        state.status = GameStatus::Running;
        state.snake = segments(&[(0, 1), (0, 0), (1, 0)]);
        state.direction = Some(Direction::Right);
        state.food = Position::new(1, 1);

        assert_eq!(state.tick(), TickOutcome::Died(DeathReason::BoardFull));
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.score, 10);
        assert_eq!(state.status, GameStatus::GameOver);
    }
}
