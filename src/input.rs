use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::config::TERMINAL_SWIPE_THRESHOLD;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit vector `(dx, dy)`; y grows downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// High-level input events consumed by the game session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    PauseToggle,
    Restart,
    Quit,
}

/// Result of one input poll.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Polled {
    Input(GameInput),
    /// The surface changed size and must be redrawn.
    Resize,
    Nothing,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Option<Direction>, next: Direction) -> bool {
    current.is_none_or(|current| next != current.opposite())
}

/// Classifies a drag from `start` to `end` as a swipe direction.
///
/// The axis with the larger absolute displacement wins, and the
/// displacement along it must exceed `threshold`.
#[must_use]
pub fn classify_swipe(start: (i32, i32), end: (i32, i32), threshold: i32) -> Option<Direction> {
    let diff_x = start.0 - end.0;
    let diff_y = start.1 - end.1;

    if diff_x.abs() > diff_y.abs() {
        if diff_x > threshold {
            Some(Direction::Left)
        } else if diff_x < -threshold {
            Some(Direction::Right)
        } else {
            None
        }
    } else if diff_y > threshold {
        Some(Direction::Up)
    } else if diff_y < -threshold {
        Some(Direction::Down)
    } else {
        None
    }
}

/// Maps a key press to a game input.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => GameInput::Direction(Direction::Right),
        KeyCode::Char(' ' | 'p' | 'P') => GameInput::PauseToggle,
        KeyCode::Enter | KeyCode::Char('r' | 'R') => GameInput::Restart,
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

/// Translates terminal events into game inputs.
///
/// Tracks the position where a left-button drag started so the release
/// can be classified as a swipe.
#[derive(Debug, Default)]
pub struct InputHandler {
    drag_start: Option<(i32, i32)>,
}

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits up to `timeout` for one terminal event.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Polled> {
        if !event::poll(timeout)? {
            return Ok(Polled::Nothing);
        }

        Ok(match event::read()? {
            Event::Key(key) => map_key(key).map_or(Polled::Nothing, Polled::Input),
            Event::Mouse(mouse) => self
                .handle_mouse(mouse)
                .map_or(Polled::Nothing, Polled::Input),
            Event::Resize(_, _) => Polled::Resize,
            _ => Polled::Nothing,
        })
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<GameInput> {
        let point = (i32::from(mouse.column), i32::from(mouse.row));
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag_start = Some(point);
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let start = self.drag_start.take()?;
                classify_swipe(start, point, TERMINAL_SWIPE_THRESHOLD).map(GameInput::Direction)
            }
            _ => None,
        }
    }
}
