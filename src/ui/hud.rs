use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::game::{GameState, Snapshot};

const HUD_MARGIN_X: u16 = 1;

/// Prompt lines for the side panel, one word per line like the board screen.
#[must_use]
pub fn state_prompt(state: GameState) -> &'static [&'static str] {
    match state {
        GameState::Start => &["PRESS", "BUTTON", "TO", "START", "GAME!"],
        GameState::Running => &[],
        GameState::GameOver => &["GAME", "OVER"],
        GameState::Finished => &["YOU", "WON"],
    }
}

#[must_use]
pub fn score_label(score: u32) -> String {
    format!("PTS:{score}")
}

/// Columns the side panel needs for `score`, including margins.
#[must_use]
pub fn panel_width(score: u32) -> u16 {
    let widest_prompt = [
        GameState::Start,
        GameState::GameOver,
        GameState::Finished,
    ]
    .iter()
    .flat_map(|state| state_prompt(*state).iter())
    .map(|line| line.width())
    .max()
    .unwrap_or(0);

    let widest = widest_prompt.max(score_label(score).width());
    u16::try_from(widest).unwrap_or(u16::MAX) + 2 * HUD_MARGIN_X
}

/// Renders the score and state prompt into `area`.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot<'_>) {
    let inner = Rect {
        x: area.x.saturating_add(HUD_MARGIN_X),
        width: area.width.saturating_sub(2 * HUD_MARGIN_X),
        ..area
    };

    let [score_row, _, prompt_rows] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(Line::from(score_label(snapshot.score)))
            .style(Style::default().fg(Color::White)),
        score_row,
    );

    let prompt_style = match snapshot.state {
        GameState::GameOver => Style::default().fg(Color::Red),
        GameState::Finished => Style::default().fg(Color::Green),
        _ => Style::default(),
    }
    .add_modifier(Modifier::BOLD);

    let lines: Vec<Line<'_>> = state_prompt(snapshot.state)
        .iter()
        .map(|word| Line::from(*word))
        .collect();
    frame.render_widget(Paragraph::new(lines).style(prompt_style), prompt_rows);
}

#[cfg(test)]
mod tests {
    use super::{panel_width, score_label, state_prompt};
    use crate::game::GameState;

    #[test]
    fn running_has_no_prompt() {
        assert!(state_prompt(GameState::Running).is_empty());
        assert_eq!(state_prompt(GameState::GameOver), ["GAME", "OVER"]);
        assert_eq!(state_prompt(GameState::Finished), ["YOU", "WON"]);
    }

    #[test]
    fn panel_grows_with_long_scores() {
        assert_eq!(score_label(12), "PTS:12");
        assert_eq!(panel_width(0), 8);
        assert_eq!(panel_width(1_000_000), 13);
    }
}
