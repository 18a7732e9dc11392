use ratatui::style::Color;
use ratatui::symbols::border;

use crate::snake::Position;

/// Side length of the default square grid, in cells.
pub const GRID_COUNT: u16 = 20;

/// Pixel size of one cell on the reference canvas.
pub const CELL_PIXELS: u16 = 20;

/// Terminal columns used to draw one cell (keeps cells roughly square).
pub const TERMINAL_CELL_COLUMNS: u16 = 2;

/// Terminal rows used to draw one cell.
pub const TERMINAL_CELL_ROWS: u16 = 1;

/// Base tick interval in milliseconds.
pub const BASE_TICK_INTERVAL_MS: u64 = 200;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 120;

/// Tick interval reduction per food eaten.
pub const TICK_INTERVAL_STEP_MS: u64 = 1;

/// Score granted per food eaten.
pub const FOOD_POINTS: u32 = 10;

/// Minimum pointer displacement for a drag to count as a swipe.
pub const SWIPE_THRESHOLD: i32 = 30;

/// Swipe threshold for terminal mouse drags, measured in terminal cells.
pub const TERMINAL_SWIPE_THRESHOLD: i32 = 3;

/// Smallest supported grid side; leaves room for the snake and one food.
pub const MIN_GRID_COUNT: u16 = 2;

/// Logical grid dimensions of the square playing field.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    count: u16,
}

impl GridSize {
    /// Square grid of `count` cells per side, raised to [`MIN_GRID_COUNT`].
    #[must_use]
    pub fn new(count: u16) -> Self {
        Self {
            count: count.max(MIN_GRID_COUNT),
        }
    }

    /// Cells per side.
    #[must_use]
    pub fn count(self) -> u16 {
        self.count
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.count) * usize::from(self.count)
    }

    /// Iterates over every cell, row by row.
    pub fn cells(self) -> impl Iterator<Item = Position> {
        let count = i32::from(self.count);
        (0..count).flat_map(move |y| (0..count).map(move |x| Position::new(x, y)))
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::new(GRID_COUNT)
    }
}

/// Tunable rules for one game.
///
/// `Default` reproduces the classic rules: a 20x20 grid, 200 ms ticks
/// shrinking by 1 ms per food down to 120 ms, and 10 points per food.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameSettings {
    pub grid: GridSize,
    pub base_tick_interval_ms: u64,
    pub min_tick_interval_ms: u64,
    pub tick_interval_step_ms: u64,
    pub food_points: u32,
}

impl GameSettings {
    /// Default rules on a grid of a different size.
    #[must_use]
    pub fn with_grid(count: u16) -> Self {
        Self {
            grid: GridSize::new(count),
            ..Self::default()
        }
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            base_tick_interval_ms: BASE_TICK_INTERVAL_MS,
            min_tick_interval_ms: MIN_TICK_INTERVAL_MS,
            tick_interval_step_ms: TICK_INTERVAL_STEP_MS,
            food_points: FOOD_POINTS,
        }
    }
}

/// Colors applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_label: Color,
    pub hud_value: Color,
    pub hud_highlight: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Green snake, red food.
pub const THEME: Theme = Theme {
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    food: Color::Red,
    play_bg: Color::Black,
    border_fg: Color::Gray,
    hud_label: Color::DarkGray,
    hud_value: Color::White,
    hud_highlight: Color::Yellow,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Rounded border around the play field.
pub const PLAY_BORDER: border::Set = border::ROUNDED;

pub const GLYPH_SNAKE_HEAD: &str = "██";
pub const GLYPH_SNAKE_BODY: &str = "▓▓";
pub const GLYPH_FOOD: &str = "()";
