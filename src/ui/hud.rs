use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;
use crate::game::{GameState, GameStatus};

const SEPARATOR: &str = " │ ";

/// Values shown on the HUD row, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
struct HudFields {
    length: String,
    speed: String,
    score: String,
    high_score: String,
}

impl HudFields {
    fn from_state(state: &GameState) -> Self {
        Self {
            length: state.snake.len().to_string(),
            speed: format!("{}ms", state.tick_interval_ms),
            score: state.score.to_string(),
            high_score: state.high_score.to_string(),
        }
    }

    fn labelled(&self, compact: bool) -> [(&'static str, &str); 4] {
        if compact {
            [
                ("L", self.length.as_str()),
                ("T", self.speed.as_str()),
                ("S", self.score.as_str()),
                ("H", self.high_score.as_str()),
            ]
        } else {
            [
                ("Length", self.length.as_str()),
                ("Tick", self.speed.as_str()),
                ("Score", self.score.as_str()),
                ("Hi", self.high_score.as_str()),
            ]
        }
    }

    /// Display width of the rendered row.
    fn width(&self, compact: bool) -> usize {
        let pairs = self.labelled(compact);
        let fields: usize = pairs
            .iter()
            .map(|(label, value)| label.width() + 2 + value.width())
            .sum();
        fields + SEPARATOR.width() * (pairs.len() - 1)
    }
}

/// Renders the one-line HUD below the play field and returns the area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState, theme: &Theme) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let fields = HudFields::from_state(state);
    let compact = fields.width(false) > usize::from(hud_area.width);
    let highlight_score = state.beat_high_score || state.status == GameStatus::GameOver;

    let mut spans = Vec::new();
    for (index, (label, value)) in fields.labelled(compact).into_iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(SEPARATOR, Style::default().fg(theme.hud_label)));
        }
        let value_color = if highlight_score && index >= 2 {
            theme.hud_highlight
        } else {
            theme.hud_value
        };
        spans.push(Span::styled(
            format!("{label}: "),
            Style::default().fg(theme.hud_label),
        ));
        spans.push(Span::styled(value.to_owned(), Style::default().fg(value_color)));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        hud_area,
    );

    play_area
}
