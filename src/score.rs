use crate::snake::Snake;

/// Derives the score from body length; nothing is accumulated.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ScoreTracker {
    starting_length: usize,
}

impl ScoreTracker {
    #[must_use]
    pub fn new(starting_length: usize) -> Self {
        Self { starting_length }
    }

    /// Fruit eaten so far: current length minus starting length.
    #[must_use]
    pub fn score(&self, snake: &Snake) -> u32 {
        Self::score_for(snake.len(), self.starting_length)
    }

    #[must_use]
    pub fn score_for(length: usize, starting_length: usize) -> u32 {
        u32::try_from(length.saturating_sub(starting_length)).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::ScoreTracker;
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    #[test]
    fn fresh_snake_scores_zero() {
        let snake = Snake::new(10, 4);
        assert_eq!(ScoreTracker::new(4).score(&snake), 0);
    }

    #[test]
    fn score_follows_growth() {
        let mut snake = Snake::from_segments(
            5,
            &[Position::new(2, 2), Position::new(1, 2)],
            Direction::Right,
        );
        let tracker = ScoreTracker::new(2);

        snake.step();
        snake.grow();
        snake.step();
        snake.grow();

        assert_eq!(tracker.score(&snake), 2);
    }

    #[test]
    fn shorter_than_start_never_underflows() {
        assert_eq!(ScoreTracker::score_for(1, 3), 0);
    }
}
