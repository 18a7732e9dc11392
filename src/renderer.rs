use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD, PLAY_BORDER, Theme};
use crate::game::{GameState, GameStatus};
use crate::geometry::{CellMetrics, cell_region, surface_size};
use crate::snake::Position;
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, theme: &Theme) {
    let area = frame.area();
    let remaining = render_hud(frame, area, state, theme);
    let play_area = centered_field(remaining, state);

    let block = Block::bordered()
        .border_set(PLAY_BORDER)
        .border_style(Style::new().fg(theme.border_fg))
        .style(Style::new().bg(theme.play_bg));

    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_food(frame, inner, state, theme);
    render_snake(frame, inner, state, theme);

    match state.status {
        GameStatus::NotStarted => render_start_menu(frame, play_area, state.high_score, theme),
        GameStatus::Paused => render_pause_menu(frame, play_area),
        GameStatus::GameOver => render_game_over_menu(frame, play_area, state),
        GameStatus::Running => {}
    }
}

/// Bordered rectangle sized to the grid, centered in `area`.
fn centered_field(area: Rect, state: &GameState) -> Rect {
    let (width, height) = surface_size(state.bounds(), CellMetrics::TERMINAL);
    let [column] = Layout::horizontal([Constraint::Length(width.saturating_add(2))])
        .flex(Flex::Center)
        .areas(area);
    let [field] = Layout::vertical([Constraint::Length(height.saturating_add(2))])
        .flex(Flex::Center)
        .areas(column);
    field
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let Some((x, y)) = cell_to_terminal(inner, state, state.food) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_FOOD, Style::new().fg(theme.food).bg(theme.play_bg));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let head_style = Style::new()
        .fg(theme.snake_head)
        .bg(theme.play_bg)
        .add_modifier(Modifier::BOLD);
    let body_style = Style::new().fg(theme.snake_body).bg(theme.play_bg);

    let buffer = frame.buffer_mut();
    for (index, segment) in state.snake.segments().enumerate() {
        let Some((x, y)) = cell_to_terminal(inner, state, *segment) else {
            continue;
        };

        if index == 0 {
            buffer.set_string(x, y, GLYPH_SNAKE_HEAD, head_style);
        } else {
            buffer.set_string(x, y, GLYPH_SNAKE_BODY, body_style);
        }
    }
}

/// Terminal coordinates of `cell`, or `None` when it falls outside `inner`.
fn cell_to_terminal(inner: Rect, state: &GameState, cell: Position) -> Option<(u16, u16)> {
    let region = cell_region(state.bounds(), CellMetrics::TERMINAL, cell)?;

    let x = inner.x.saturating_add(region.x);
    let y = inner.y.saturating_add(region.y);
    if x.saturating_add(region.width) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
