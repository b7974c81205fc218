use std::io;

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::driver::Renderer;
use crate::game::Snapshot;
use crate::snake::Position;
use crate::terminal_runtime::TerminalSession;
use crate::ui::hud::{panel_width, render_hud};
use crate::ui::menu::{render_settings_menu, render_title_screen, SettingsMenu};

/// Terminal columns per grid cell, so cells look square.
pub const CELL_WIDTH: u16 = 2;

const GLYPH_SNAKE: &str = "██";
const GLYPH_FRUIT: &str = "[]";

/// Renders the full game frame from a snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot<'_>) {
    let area = frame.area();
    let [hud_area, board_area] =
        Layout::horizontal([Constraint::Length(panel_width(snapshot.score)), Constraint::Min(0)])
            .areas(area);

    render_hud(frame, hud_area, snapshot);
    render_board(frame, board_area, snapshot);
}

/// Draws the bordered map, fruit and snake inside `area`.
pub fn render_board(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot<'_>) {
    let wanted_width = snapshot.map_size.saturating_mul(CELL_WIDTH).saturating_add(2);
    let wanted_height = snapshot.map_size.saturating_add(2);

    if area.width < wanted_width || area.height < wanted_height {
        frame.render_widget(
            Paragraph::new(Line::from("terminal too small"))
                .style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return;
    }

    let [column] = Layout::horizontal([Constraint::Length(wanted_width)])
        .flex(Flex::End)
        .areas(area);
    let [board] = Layout::vertical([Constraint::Length(wanted_height)])
        .flex(Flex::Start)
        .areas(column);

    let block = Block::bordered().border_style(Style::default().fg(Color::White));
    let inner = block.inner(board);
    frame.render_widget(block, board);

    let buffer = frame.buffer_mut();
    if let Some(fruit) = snapshot.fruit {
        if let Some((x, y)) = cell_origin(inner, snapshot.map_size, fruit) {
            buffer.set_string(x, y, GLYPH_FRUIT, Style::default().fg(Color::Red));
        }
    }

    for (index, segment) in snapshot.body.iter().enumerate() {
        let Some((x, y)) = cell_origin(inner, snapshot.map_size, *segment) else {
            continue;
        };

        let color = if index == 0 {
            Color::LightGreen
        } else {
            Color::Green
        };
        buffer.set_string(x, y, GLYPH_SNAKE, Style::default().fg(color));
    }
}

fn cell_origin(inner: Rect, map_size: u16, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(map_size) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

/// Draws frames into the real terminal.
pub struct TerminalRenderer {
    session: TerminalSession,
}

impl TerminalRenderer {
    #[must_use]
    pub fn new(session: TerminalSession) -> Self {
        Self { session }
    }

    pub fn draw_title(&mut self) -> io::Result<()> {
        self.session
            .terminal_mut()
            .draw(|frame| {
                let area = frame.area();
                render_title_screen(frame, area);
            })?;
        Ok(())
    }

    pub fn draw_menu(&mut self, menu: &SettingsMenu) -> io::Result<()> {
        self.session
            .terminal_mut()
            .draw(|frame| {
                let area = frame.area();
                render_settings_menu(frame, area, menu);
            })?;
        Ok(())
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        self.session
            .terminal_mut()
            .draw(|frame| render(frame, snapshot))?;
        Ok(())
    }
}
