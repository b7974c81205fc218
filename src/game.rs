use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cadence::Cadence;
use crate::config::{ConfigurationError, GameConfiguration};
use crate::food::FruitSpawner;
use crate::input::{Direction, InputSource};
use crate::score::ScoreTracker;
use crate::snake::{Position, Snake, StepOutcome};

/// High-level phase of a session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameState {
    Start,
    Running,
    GameOver,
    Finished,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickEvent {
    /// Nothing changed this tick.
    Idle,
    /// The start command moved the session from `Start` to `Running`.
    Started,
    /// The snake advanced one cell.
    Moved,
    /// The snake advanced onto the fruit and grew.
    FruitEaten,
    /// The move hit a wall or the body.
    Collision,
    /// The last fruit filled the board.
    Won,
    /// A finished session was reset to its start position.
    Reset,
}

/// Outcome of one tick, for collaborators to act on.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TickReport {
    pub event: TickEvent,
    pub state: GameState,
}

impl TickReport {
    /// True when fruit was consumed this tick, including the winning one.
    #[must_use]
    pub fn fruit_eaten(&self) -> bool {
        matches!(self.event, TickEvent::FruitEaten | TickEvent::Won)
    }
}

/// Borrowed view of everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub body: &'a [Position],
    pub fruit: Option<Position>,
    pub map_size: u16,
    pub score: u32,
    pub state: GameState,
    pub direction: Direction,
}

/// Complete mutable game state for one configuration.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub snake: Snake,
    /// Current fruit; `None` only once the board is full.
    pub fruit: Option<Position>,
    state: GameState,
    cadence: Cadence,
    score: ScoreTracker,
    config: GameConfiguration,
    rng: StdRng,
}

impl GameSession {
    /// Validates `config` and sets up a session waiting in `Start`.
    pub fn new(config: GameConfiguration, seed: u64) -> Result<Self, ConfigurationError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Like [`GameSession::new`] with a caller-provided random source.
    pub fn with_rng(config: GameConfiguration, mut rng: StdRng) -> Result<Self, ConfigurationError> {
        config.validate()?;

        let starting_length = usize::from(config.starting_length);
        let snake = Snake::new(config.map_size, starting_length);
        let fruit = FruitSpawner::generate(snake.segments(), config.map_size, &mut rng);

        tracing::debug!(
            map_size = config.map_size,
            move_interval = config.move_interval,
            starting_length,
            "session created"
        );

        Ok(Self {
            snake,
            fruit: Some(fruit),
            state: GameState::Start,
            cadence: Cadence::new(config.move_interval),
            score: ScoreTracker::new(starting_length),
            config,
            rng,
        })
    }

    /// Returns to start-of-game values, reusing the body arena.
    pub fn reset(&mut self) {
        self.snake.reset(usize::from(self.config.starting_length));
        self.cadence.reset();
        self.fruit = Some(FruitSpawner::generate(
            self.snake.segments(),
            self.config.map_size,
            &mut self.rng,
        ));
        self.state = GameState::Start;
        tracing::debug!("session reset");
    }

    /// Advances the session by one tick.
    ///
    /// In `Running` the order is fixed: sample directions, count the tick,
    /// and only when a move is due commit the direction, step, then handle
    /// fruit.
    pub fn tick<I: InputSource + ?Sized>(&mut self, input: &mut I) -> TickReport {
        let event = match self.state {
            GameState::Start => {
                if input.poll_start_command() {
                    self.state = GameState::Running;
                    tracing::debug!("game started");
                    TickEvent::Started
                } else {
                    TickEvent::Idle
                }
            }
            GameState::Running => self.advance(input),
            GameState::GameOver | GameState::Finished => {
                if input.poll_start_command() {
                    self.reset();
                    TickEvent::Reset
                } else {
                    TickEvent::Idle
                }
            }
        };

        TickReport {
            event,
            state: self.state,
        }
    }

    fn advance<I: InputSource + ?Sized>(&mut self, input: &mut I) -> TickEvent {
        while let Some(direction) = input.poll_direction() {
            self.snake.set_direction(direction);
        }

        self.cadence.tick();
        if !self.cadence.is_due() {
            return TickEvent::Idle;
        }

        self.snake.commit_direction();
        match self.snake.step() {
            StepOutcome::Collision => {
                self.state = GameState::GameOver;
                tracing::info!(score = self.score(), "game over");
                TickEvent::Collision
            }
            StepOutcome::Moved { .. } => {
                if self.fruit == Some(self.snake.head()) {
                    self.consume_fruit()
                } else {
                    TickEvent::Moved
                }
            }
        }
    }

    fn consume_fruit(&mut self) -> TickEvent {
        let grew = self.snake.grow();

        if !grew || self.snake.len() >= self.config.max_length() {
            self.fruit = None;
            self.state = GameState::Finished;
            tracing::info!(score = self.score(), "board filled");
            return TickEvent::Won;
        }

        self.fruit = Some(FruitSpawner::generate(
            self.snake.segments(),
            self.config.map_size,
            &mut self.rng,
        ));
        tracing::debug!(length = self.snake.len(), "fruit eaten");
        TickEvent::FruitEaten
    }

    /// Current score, derived from body length.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score.score(&self.snake)
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> &GameConfiguration {
        &self.config
    }

    /// Ticks counted towards the next move.
    #[must_use]
    pub fn pending_ticks(&self) -> u32 {
        self.cadence.accumulator()
    }

    /// Returns a render-ready view of the current session.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            body: self.snake.segments(),
            fruit: self.fruit,
            map_size: self.config.map_size,
            score: self.score(),
            state: self.state,
            direction: self.snake.direction(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::{GameSession, GameState, TickEvent};
    use crate::config::{ConfigurationError, GameConfiguration};
    use crate::input::{Direction, InputSource};
    use crate::snake::{Position, Snake};

    #[derive(Default)]
    struct Script {
        directions: VecDeque<Option<Direction>>,
        start: bool,
    }

    impl InputSource for Script {
        fn poll_direction(&mut self) -> Option<Direction> {
            self.directions.pop_front().flatten()
        }

        fn poll_start_command(&mut self) -> bool {
            std::mem::take(&mut self.start)
        }
    }

    fn config(map_size: u16, move_interval: u32, starting_length: u16) -> GameConfiguration {
        GameConfiguration {
            map_size,
            move_interval,
            starting_length,
            sound_enabled: false,
        }
    }

    fn running(config: GameConfiguration, seed: u64) -> GameSession {
        let mut session = GameSession::new(config, seed).expect("valid config");
        let mut input = Script {
            start: true,
            ..Script::default()
        };
        assert_eq!(session.tick(&mut input).event, TickEvent::Started);
        session
    }

    #[test]
    fn invalid_map_size_fails_construction() {
        let result = GameSession::new(config(1, 10, 1), 0);
        assert!(matches!(result, Err(ConfigurationError::MapTooSmall(1))));
    }

    #[test]
    fn waits_in_start_until_commanded() {
        let mut session = GameSession::new(config(5, 1, 2), 1).expect("valid config");
        let mut input = Script::default();

        for _ in 0..5 {
            let report = session.tick(&mut input);
            assert_eq!(report.event, TickEvent::Idle);
            assert_eq!(report.state, GameState::Start);
        }
        assert_eq!(session.snake.head(), Position::new(2, 2));
    }

    #[test]
    fn moves_only_when_cadence_is_due() {
        let mut session = running(config(10, 3, 2), 2);
        session.fruit = Some(Position::new(0, 0));
        let mut input = Script::default();

        assert_eq!(session.tick(&mut input).event, TickEvent::Idle);
        assert_eq!(session.tick(&mut input).event, TickEvent::Idle);
        assert_eq!(session.snake.head(), Position::new(5, 5));

        assert_eq!(session.tick(&mut input).event, TickEvent::Moved);
        assert_eq!(session.snake.head(), Position::new(6, 5));
        assert_eq!(session.pending_ticks(), 0);
    }

    #[test]
    fn direction_sampled_on_idle_ticks_applies_at_the_move() {
        let mut session = running(config(10, 2, 2), 3);
        session.fruit = Some(Position::new(0, 0));
        let mut input = Script {
            directions: VecDeque::from([Some(Direction::Up), None]),
            ..Script::default()
        };

        assert_eq!(session.tick(&mut input).event, TickEvent::Idle);
        assert_eq!(session.snake.direction(), Direction::Right);

        assert_eq!(session.tick(&mut input).event, TickEvent::Moved);
        assert_eq!(session.snake.head(), Position::new(5, 4));
    }

    #[test]
    fn reversal_after_a_turn_in_the_same_tick_keeps_the_turn() {
        let mut session = running(config(10, 1, 2), 9);
        session.fruit = Some(Position::new(0, 0));
        let mut input = Script {
            directions: VecDeque::from([Some(Direction::Up), Some(Direction::Left)]),
            ..Script::default()
        };

        assert_eq!(session.tick(&mut input).event, TickEvent::Moved);
        assert_eq!(session.snake.direction(), Direction::Up);
        assert_eq!(session.snake.head(), Position::new(5, 4));
    }

    #[test]
    fn wall_hit_ends_the_game() {
        let mut session = running(config(4, 1, 1), 4);
        session.snake = Snake::from_segments(4, &[Position::new(3, 1)], Direction::Right);
        session.fruit = Some(Position::new(0, 0));

        let report = session.tick(&mut Script::default());

        assert_eq!(report.event, TickEvent::Collision);
        assert_eq!(report.state, GameState::GameOver);
        assert_eq!(session.snake.head(), Position::new(3, 1));
    }

    #[test]
    fn eating_grows_immediately_and_respawns_fruit() {
        let mut session = running(config(5, 1, 2), 5);
        session.snake = Snake::from_segments(
            5,
            &[Position::new(2, 2), Position::new(1, 2)],
            Direction::Right,
        );
        session.fruit = Some(Position::new(3, 2));

        let report = session.tick(&mut Script::default());

        assert_eq!(report.event, TickEvent::FruitEaten);
        assert!(report.fruit_eaten());
        assert_eq!(
            session.snake.segments(),
            &[Position::new(3, 2), Position::new(2, 2), Position::new(1, 2)]
        );
        assert_eq!(session.score(), 1);
        let fruit = session.fruit.expect("fruit respawned");
        assert!(!session.snake.occupies(fruit));
    }

    #[test]
    fn restart_after_game_over_resets_everything() {
        let mut session = running(config(4, 1, 2), 6);
        session.snake = Snake::from_segments(
            4,
            &[Position::new(3, 1), Position::new(2, 1), Position::new(1, 1)],
            Direction::Right,
        );
        session.tick(&mut Script::default());
        assert_eq!(session.state(), GameState::GameOver);

        let idle = session.tick(&mut Script::default());
        assert_eq!(idle.state, GameState::GameOver);

        let mut restart = Script {
            start: true,
            ..Script::default()
        };
        let report = session.tick(&mut restart);

        assert_eq!(report.event, TickEvent::Reset);
        assert_eq!(report.state, GameState::Start);
        assert_eq!(session.snake.segments(), &[Position::new(2, 2), Position::new(1, 2)]);
        assert_eq!(session.snake.direction(), Direction::Right);
        assert_eq!(session.score(), 0);
        assert_eq!(session.pending_ticks(), 0);
        assert!(!session.snake.occupies(session.fruit.expect("fruit placed")));
    }

    #[test]
    fn snapshot_mirrors_session() {
        let session = GameSession::new(config(5, 20, 3), 8).expect("valid config");
        let snapshot = session.snapshot();

        assert_eq!(snapshot.body, session.snake.segments());
        assert_eq!(snapshot.fruit, session.fruit);
        assert_eq!(snapshot.map_size, 5);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.state, GameState::Start);
        assert_eq!(snapshot.direction, Direction::Right);
    }
}
