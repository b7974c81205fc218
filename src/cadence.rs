/// Counts ticks and fires once every `move_interval` of them.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Cadence {
    accumulator: u32,
    move_interval: u32,
}

impl Cadence {
    /// Creates a cadence firing every `move_interval` ticks (at least 1).
    #[must_use]
    pub fn new(move_interval: u32) -> Self {
        Self {
            accumulator: 0,
            move_interval: move_interval.max(1),
        }
    }

    /// Records one elapsed tick.
    pub fn tick(&mut self) {
        self.accumulator = self.accumulator.saturating_add(1);
    }

    /// Returns true and restarts the count when a move is due.
    pub fn is_due(&mut self) -> bool {
        if self.accumulator < self.move_interval {
            return false;
        }

        self.accumulator = 0;
        true
    }

    pub fn reset(&mut self) {
        self.accumulator = 0;
    }

    /// Changes the speed without touching the current count.
    pub fn set_move_interval(&mut self, move_interval: u32) {
        self.move_interval = move_interval.max(1);
    }

    #[must_use]
    pub fn move_interval(&self) -> u32 {
        self.move_interval
    }

    #[must_use]
    pub fn accumulator(&self) -> u32 {
        self.accumulator
    }
}
