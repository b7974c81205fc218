use crate::input::{direction_change_is_valid, Direction};

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside a square `map_size` grid.
    #[must_use]
    pub fn is_within_bounds(self, map_size: u16) -> bool {
        let size = i32::from(map_size);
        self.x >= 0 && self.y >= 0 && self.x < size && self.y < size
    }

    /// Returns the neighbouring cell one move away in `direction`.
    #[must_use]
    pub fn moved(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Result of one movement step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepOutcome {
    /// The head advanced; `grew` is true when the old tail was retained.
    Moved { grew: bool },
    /// The head would leave the grid or hit the body. Nothing moved.
    Collision,
}

/// Snake body stored in a fixed arena of `map_size²` cells.
///
/// Index 0 is the head. Only the first `length` slots are occupied; the arena
/// is allocated once and overwritten on every move and reset.
#[derive(Debug, Clone)]
pub struct Snake {
    segments: Vec<Position>,
    length: usize,
    direction: Direction,
    pending_direction: Direction,
    grow_pending: bool,
    map_size: u16,
}

impl Snake {
    /// Allocates the arena for `map_size` and lays out the starting body.
    #[must_use]
    pub fn new(map_size: u16, starting_length: usize) -> Self {
        let capacity = usize::from(map_size) * usize::from(map_size);
        let mut snake = Self {
            segments: vec![Position::default(); capacity],
            length: 0,
            direction: Direction::Right,
            pending_direction: Direction::Right,
            grow_pending: false,
            map_size,
        };
        snake.reset(starting_length);
        snake
    }

    /// Creates a snake from explicit body segments (first is head).
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty or longer than the arena.
    #[must_use]
    pub fn from_segments(map_size: u16, segments: &[Position], direction: Direction) -> Self {
        let capacity = usize::from(map_size) * usize::from(map_size);
        assert!(
            !segments.is_empty() && segments.len() <= capacity,
            "from_segments: {} segments do not fit a {map_size}x{map_size} grid",
            segments.len(),
        );

        let mut arena = vec![Position::default(); capacity];
        arena[..segments.len()].copy_from_slice(segments);

        Self {
            segments: arena,
            length: segments.len(),
            direction,
            pending_direction: direction,
            grow_pending: false,
            map_size,
        }
    }

    /// Restores the start-of-game body heading right, without reallocating.
    ///
    /// The head sits in the middle row at the centre column, moved right only
    /// as far as needed to keep the trailing segments on the board.
    pub fn reset(&mut self, starting_length: usize) {
        let length = starting_length.clamp(1, self.capacity());
        let middle = i32::from(self.map_size / 2);
        let last_index = i32::try_from(length - 1).unwrap_or(i32::MAX);
        let head_x = middle.max(last_index);

        for (index, slot) in self.segments.iter_mut().take(length).enumerate() {
            let offset = i32::try_from(index).unwrap_or(i32::MAX);
            *slot = Position::new(head_x - offset, middle);
        }

        self.length = length;
        self.direction = Direction::Right;
        self.pending_direction = Direction::Right;
        self.grow_pending = false;
    }

    /// Records `direction` as the next heading unless it reverses the current one.
    ///
    /// Later calls overwrite earlier ones until the heading is committed.
    pub fn set_direction(&mut self, direction: Direction) {
        if direction_change_is_valid(self.direction, direction) {
            self.pending_direction = direction;
        }
    }

    /// Latches the pending direction as the heading for the next step.
    pub fn commit_direction(&mut self) {
        self.direction = self.pending_direction;
    }

    /// Makes the next `step` keep its tail instead of vacating it.
    ///
    /// The session grows through [`Snake::grow`] instead; this deferred form
    /// keeps the retained-tail step rule reachable for callers and tests.
    pub fn grow_next(&mut self) {
        self.grow_pending = true;
    }

    /// Advances the head one cell along the committed direction.
    ///
    /// The vacate-or-retain decision for the tail is made before the
    /// self-collision test: a tail that is about to move away is not an
    /// obstacle, a tail that will be retained is.
    pub fn step(&mut self) -> StepOutcome {
        let next_head = self.head().moved(self.direction);
        if !next_head.is_within_bounds(self.map_size) {
            return StepOutcome::Collision;
        }

        let grow = self.grow_pending && self.length < self.capacity();
        let occupied_after_move = if grow { self.length } else { self.length - 1 };
        if self
            .segments
            .iter()
            .take(occupied_after_move)
            .skip(1)
            .any(|segment| *segment == next_head)
        {
            return StepOutcome::Collision;
        }

        // Shift one slot further than `length` when the arena allows, so the
        // vacated tail stays in the spare slot for `grow`.
        let last = self.length.min(self.capacity() - 1);
        self.segments.copy_within(0..last, 1);
        self.segments[0] = next_head;

        if grow {
            self.length += 1;
        }
        self.grow_pending = false;

        StepOutcome::Moved { grew: grow }
    }

    /// Extends the body by one cell, re-occupying the tail vacated by the
    /// last `step`. Returns false when the arena is already full.
    ///
    /// Only meaningful directly after a successful `step`.
    pub fn grow(&mut self) -> bool {
        if self.length >= self.capacity() {
            return false;
        }

        self.length += 1;
        true
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.segments[0]
    }

    /// Returns true if any occupied segment is at `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.segments().contains(&position)
    }

    /// Occupied segments from head to tail.
    #[must_use]
    pub fn segments(&self) -> &[Position] {
        &self.segments[..self.length]
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Maximum body length, one segment per grid cell.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn map_size(&self) -> u16 {
        self.map_size
    }

    /// Returns the committed movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the direction the next committed move will take.
    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }
}
