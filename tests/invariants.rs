use std::collections::HashSet;

use proptest::prelude::*;
use proptest::sample::select;
use snake::config::GameConfiguration;
use snake::game::{GameSession, GameState};
use snake::input::{Direction, InputSource};
use snake::snake::Snake;

struct Tick {
    direction: Option<Direction>,
    start: bool,
}

impl InputSource for Tick {
    fn poll_direction(&mut self) -> Option<Direction> {
        self.direction.take()
    }

    fn poll_start_command(&mut self) -> bool {
        std::mem::take(&mut self.start)
    }
}

fn direction() -> impl Strategy<Value = Direction> {
    select(Direction::ALL.to_vec())
}

fn assert_board_consistent(session: &GameSession) -> Result<(), TestCaseError> {
    let map_size = session.config().map_size;
    let body = session.snake.segments();

    for segment in body {
        prop_assert!(
            segment.is_within_bounds(map_size),
            "segment {segment:?} outside {map_size}x{map_size}"
        );
    }

    let distinct: HashSet<_> = body.iter().collect();
    prop_assert_eq!(distinct.len(), body.len(), "overlapping segments: {:?}", body);

    match session.fruit {
        Some(fruit) => {
            prop_assert!(fruit.is_within_bounds(map_size));
            prop_assert!(!session.snake.occupies(fruit), "fruit {fruit:?} on body");
        }
        None => prop_assert_eq!(session.state(), GameState::Finished),
    }

    let starting = usize::from(session.config().starting_length);
    prop_assert_eq!(
        session.score() as usize,
        session.snake.len().saturating_sub(starting)
    );

    Ok(())
}

proptest! {
    #[test]
    fn random_play_keeps_the_board_consistent(
        seed in 0u64..10_000,
        map_size in 2u16..7,
        move_interval in 1u32..4,
        inputs in proptest::collection::vec((proptest::option::of(direction()), any::<bool>()), 50..400)
    ) {
        let config = GameConfiguration {
            map_size,
            move_interval,
            starting_length: (map_size / 2).max(1),
            sound_enabled: false,
        };
        let mut session = GameSession::new(config, seed).expect("valid config");
        assert_board_consistent(&session)?;

        for (direction, start) in inputs {
            let length_before = session.snake.len();
            let state_before = session.state();

            let report = session.tick(&mut Tick { direction, start });
            assert_board_consistent(&session)?;

            if state_before == GameState::Running {
                let grown = session.snake.len() - length_before;
                prop_assert!(grown <= 1);
                prop_assert_eq!(grown == 1, report.fruit_eaten());
            } else {
                prop_assert!(
                    session.snake.len() == length_before
                        || session.state() == GameState::Start
                );
            }

            if report.state == GameState::Finished {
                prop_assert_eq!(session.snake.len(), config.max_length());
            }
        }
    }

    #[test]
    fn reversing_is_always_ignored(
        heading in direction(),
        repeats in 1usize..20
    ) {
        let mut snake = Snake::new(6, 3);
        snake.set_direction(heading);
        snake.commit_direction();
        let committed = snake.direction();

        for _ in 0..repeats {
            snake.set_direction(committed.opposite());
        }

        prop_assert_eq!(snake.pending_direction(), committed);
    }
}
