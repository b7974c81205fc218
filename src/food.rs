use rand::Rng;

use crate::snake::Position;

/// Places fruit by rejection sampling over the whole grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct FruitSpawner;

impl FruitSpawner {
    /// Draws uniform cells until one is not covered by `body`.
    ///
    /// At least one cell must be free; the game finishes before the board
    /// fills, so this always terminates in normal play.
    #[must_use]
    pub fn generate<R: Rng + ?Sized>(body: &[Position], map_size: u16, rng: &mut R) -> Position {
        debug_assert!(
            body.len() < usize::from(map_size) * usize::from(map_size),
            "generate: no free cells on a {map_size}x{map_size} grid",
        );

        let side = i32::from(map_size);
        loop {
            let candidate = Position::new(rng.gen_range(0..side), rng.gen_range(0..side));
            if !body.contains(&candidate) {
                tracing::trace!(x = candidate.x, y = candidate.y, "fruit placed");
                return candidate;
            }
        }
    }
}
