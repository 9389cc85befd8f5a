//! Food kinds, their point values and spawn odds.
//!
//! Point values and spawn thresholds are independent tables. Colours live in
//! `render::Palette`.

use rand::Rng;

use super::state::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodKind {
    White,
    Yellow,
    Orange,
    Red,
}

impl FoodKind {
    pub const ALL: [FoodKind; 4] = [
        FoodKind::White,
        FoodKind::Yellow,
        FoodKind::Orange,
        FoodKind::Red,
    ];

    /// Score awarded for eating this food
    pub fn points(&self) -> u32 {
        match self {
            FoodKind::White => 1,
            FoodKind::Yellow => 2,
            FoodKind::Orange => 3,
            FoodKind::Red => 4,
        }
    }
}

/// Upper bounds (inclusive, out of 100) of a roll for each weighted kind.
///
/// Thresholds are checked from rarest to most common; a roll above every
/// threshold yields white food.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnTable {
    pub red: f64,
    pub orange: f64,
    pub yellow: f64,
}

impl Default for SpawnTable {
    fn default() -> Self {
        Self {
            red: 20.0,
            orange: 40.0,
            yellow: 60.0,
        }
    }
}

impl SpawnTable {
    /// Map a roll in `[0, 100)` to a food kind
    pub fn classify(&self, roll: f64) -> FoodKind {
        if roll <= self.red {
            FoodKind::Red
        } else if roll <= self.orange {
            FoodKind::Orange
        } else if roll <= self.yellow {
            FoodKind::Yellow
        } else {
            FoodKind::White
        }
    }

    pub fn roll<R: Rng>(&self, rng: &mut R) -> FoodKind {
        self.classify(rng.gen_range(0.0..100.0))
    }
}

/// A food item on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
    pub kind: FoodKind,
}

impl Food {
    pub fn new(position: Position, kind: FoodKind) -> Self {
        Self { position, kind }
    }
}
