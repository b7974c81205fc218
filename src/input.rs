use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions, in button order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    /// All directions in button order.
    pub const ALL: [Self; 4] = [Self::Left, Self::Up, Self::Right, Self::Down];

    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
        }
    }

    /// Returns the `(dx, dy)` cell offset for one move. `y` grows downward.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Left => (-1, 0),
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
        }
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// High-level input events produced by the keyboard.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Confirm,
    Quit,
}

/// Per-tick input contract consumed by the game session.
///
/// Neither method may block. The session drains `poll_direction` until it
/// returns `None`, so a source must run dry within one tick.
pub trait InputSource {
    /// Returns the next direction observed since the last tick, oldest first.
    fn poll_direction(&mut self) -> Option<Direction>;

    /// Returns true when a start/restart command was observed since the last poll.
    fn poll_start_command(&mut self) -> bool;
}

/// Maps a terminal key event to a game input.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let input = match key.code {
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h') => GameInput::Direction(Direction::Left),
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k') => GameInput::Direction(Direction::Up),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l') => GameInput::Direction(Direction::Right),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j') => GameInput::Direction(Direction::Down),
        KeyCode::Enter | KeyCode::Char(' ') => GameInput::Confirm,
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

/// Keyboard collaborator that samples terminal events once per tick.
///
/// Every game key doubles as the start command, like a board where any
/// button starts the round.
#[derive(Debug, Default)]
pub struct KeyboardInput {
    directions: VecDeque<Direction>,
    start: bool,
    quit: bool,
}

impl KeyboardInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains all pending terminal events without blocking.
    ///
    /// Latches from the previous tick are dropped first, so only input seen
    /// during the current tick is reported.
    pub fn pump(&mut self) -> io::Result<()> {
        self.clear();

        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if let Some(input) = map_key(key) {
                    self.record(input);
                }
            }
        }

        Ok(())
    }

    /// Drops any direction or start latched this tick. Quit is kept.
    pub fn clear(&mut self) {
        self.directions.clear();
        self.start = false;
    }

    /// Returns true once a quit key has been seen.
    #[must_use]
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    fn record(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => {
                self.directions.push_back(direction);
                self.start = true;
            }
            GameInput::Confirm => self.start = true,
            GameInput::Quit => self.quit = true,
        }
    }
}

impl InputSource for KeyboardInput {
    fn poll_direction(&mut self) -> Option<Direction> {
        self.directions.pop_front()
    }

    fn poll_start_command(&mut self) -> bool {
        std::mem::take(&mut self.start)
    }
}

/// Blocks until the next mapped key press.
pub fn wait_for_input() -> io::Result<GameInput> {
    loop {
        if let Event::Key(key) = event::read()? {
            if let Some(input) = map_key(key) {
                return Ok(input);
            }
        }
    }
}
