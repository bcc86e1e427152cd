//! Tiles and the generator that deals them.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::core::{Color, GameRng, PlayerId};

/// The piece the current player must place this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub value: u32,
    pub owner: PlayerId,
}

impl Tile {
    #[must_use]
    pub const fn new(value: u32, owner: PlayerId) -> Self {
        Self { value, owner }
    }

    #[must_use]
    pub const fn color(self) -> Color {
        self.owner.color()
    }
}

/// Deals tiles with uniformly random values.
///
/// Holds nothing but its randomness source and the value range.
#[derive(Clone, Debug)]
pub struct TileGenerator {
    rng: GameRng,
    values: RangeInclusive<u32>,
}

impl TileGenerator {
    #[must_use]
    pub fn new(rng: GameRng, values: RangeInclusive<u32>) -> Self {
        Self { rng, values }
    }

    /// Draw the next tile for `owner`.
    pub fn next(&mut self, owner: PlayerId) -> Tile {
        let value = self.rng.gen_range_inclusive(self.values.clone());
        Tile { value, owner }
    }

    #[must_use]
    pub fn values(&self) -> &RangeInclusive<u32> {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_within_range() {
        let mut generator = TileGenerator::new(GameRng::new(3), 1..=20);
        for _ in 0..500 {
            let tile = generator.next(PlayerId::FIRST);
            assert!((1..=20).contains(&tile.value));
            assert_eq!(tile.owner, PlayerId::FIRST);
        }
    }

    #[test]
    fn test_owner_follows_request() {
        let mut generator = TileGenerator::new(GameRng::new(3), 1..=20);
        let tile = generator.next(PlayerId::SECOND);
        assert_eq!(tile.owner, PlayerId::SECOND);
        assert_eq!(tile.color(), Color::Blue);
    }

    #[test]
    fn test_seeded_generators_agree() {
        let mut a = TileGenerator::new(GameRng::new(11), 1..=20);
        let mut b = TileGenerator::new(GameRng::new(11), 1..=20);
        for _ in 0..50 {
            assert_eq!(a.next(PlayerId::FIRST), b.next(PlayerId::FIRST));
        }
    }

    #[test]
    fn test_single_value_range() {
        let mut generator = TileGenerator::new(GameRng::new(0), 7..=7);
        assert_eq!(generator.next(PlayerId::SECOND).value, 7);
    }
}
