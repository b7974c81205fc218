use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use crate::config::{Difficulty, MapPreset};
use crate::input::{Direction, GameInput};
use crate::settings::{PersistedSettings, SETTINGS_ROWS, SOUND_OPTIONS};

const ROW_DIFFICULTY: usize = 0;
const ROW_MAP_SIZE: usize = 1;
const ROW_SOUND: usize = 2;
const ROW_START: usize = 3;

/// Result of feeding one key to the settings menu.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MenuAction {
    /// Cursor or a value changed; redraw.
    Changed,
    /// The player chose "Start Game".
    Start,
    Quit,
}

/// Settings menu: four rows, cyclic cursor, cyclic values.
#[derive(Debug, Clone, Copy)]
pub struct SettingsMenu {
    settings: PersistedSettings,
}

impl SettingsMenu {
    #[must_use]
    pub fn new(settings: PersistedSettings) -> Self {
        Self {
            settings: settings.sanitized(),
        }
    }

    #[must_use]
    pub fn settings(&self) -> PersistedSettings {
        self.settings
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.settings.selected_setting
    }

    pub fn handle(&mut self, input: GameInput) -> MenuAction {
        let direction = match input {
            GameInput::Quit => return MenuAction::Quit,
            GameInput::Confirm => return MenuAction::Start,
            GameInput::Direction(direction) => direction,
        };

        let cursor = self.settings.selected_setting;
        match direction {
            Direction::Up => {
                self.settings.selected_setting = (cursor + SETTINGS_ROWS - 1) % SETTINGS_ROWS;
            }
            Direction::Down => {
                self.settings.selected_setting = (cursor + 1) % SETTINGS_ROWS;
            }
            Direction::Left | Direction::Right if cursor == ROW_START => return MenuAction::Start,
            Direction::Left | Direction::Right => {
                let step = if direction == Direction::Right { 1 } else { -1 };
                self.cycle(cursor, step);
            }
        }

        MenuAction::Changed
    }

    fn cycle(&mut self, row: usize, step: isize) {
        let (value, len) = match row {
            ROW_DIFFICULTY => (&mut self.settings.selected_difficulty, Difficulty::ALL.len()),
            ROW_MAP_SIZE => (&mut self.settings.selected_map_size, MapPreset::ALL.len()),
            ROW_SOUND => (&mut self.settings.selected_sound, SOUND_OPTIONS.len()),
            _ => return,
        };

        *value = wrap_index(*value, step, len);
    }

    /// Label/value pairs in display order.
    #[must_use]
    pub fn rows(&self) -> [(&'static str, String); SETTINGS_ROWS] {
        [
            ("Diffic:", self.settings.difficulty().name().to_owned()),
            (
                "Map Size:",
                self.settings.map_preset().map_size().to_string(),
            ),
            (
                "Sound:",
                if self.settings.sound_enabled() { "Yes" } else { "No" }.to_owned(),
            ),
            ("Start Game", String::new()),
        ]
    }
}

fn wrap_index(value: usize, step: isize, len: usize) -> usize {
    let len = len.max(1);
    if step >= 0 {
        (value + step.unsigned_abs()) % len
    } else {
        (value + len - step.unsigned_abs() % len) % len
    }
}

/// Draws the boot banner shown before the settings menu.
pub fn render_title_screen(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered_popup(area, 60, 50);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("MICROSNAKE").style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from("IN THE TERMINAL"),
        Line::from(""),
        Line::from("PRESS BUTTON"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered()),
        popup,
    );
}

/// Draws the settings menu as a centered popup.
pub fn render_settings_menu(frame: &mut Frame<'_>, area: Rect, menu: &SettingsMenu) {
    let popup = centered_popup(area, 60, 50);
    frame.render_widget(Clear, popup);

    let [body_row, footer_row] =
        Layout::vertical([Constraint::Min(SETTINGS_ROWS as u16 + 2), Constraint::Length(2)])
            .areas(popup);

    let lines: Vec<Line<'_>> = menu
        .rows()
        .iter()
        .enumerate()
        .map(|(index, (label, value))| {
            if index == menu.cursor() {
                Line::from(format!("> {label}{value}"))
                    .style(Style::default().add_modifier(Modifier::BOLD))
            } else {
                Line::from(format!("  {label}{value}"))
            }
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title(" settings ")),
        body_row,
    );

    frame.render_widget(
        Paragraph::new(Line::from("Up/Down select, Left/Right change, Enter start"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        footer_row,
    );
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(height_percent)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(width_percent)])
        .flex(Flex::Center)
        .areas(row);

    popup
}
