//! Data-driven game balance
//!
//! A `Tuning` describes one game variant: which operation combines pieces,
//! how big targets and pieces get, and how that grows with difficulty.
//! `Skin` bundles a tuning with the cosmetic name of its pieces.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_PIECES;
use crate::error::ConfigError;
use crate::puzzle::Operation;

/// Generator and session parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub operation: Operation,
    /// Target range at difficulty 0
    pub target_min: u32,
    pub target_max: u32,
    /// Added to both target bounds per difficulty level
    pub target_growth: u32,
    /// Piece value range at difficulty 0
    pub piece_min: u32,
    pub piece_max: u32,
    /// Levels per +1 on `piece_max` (0 disables growth)
    pub piece_max_growth_every: u32,
    pub piece_max_cap: u32,
    /// Pieces on screen at difficulty 0
    pub piece_count: usize,
    /// Levels per extra piece (0 disables growth)
    pub piece_count_growth_every: u32,
    pub piece_count_max: usize,
    /// Largest number of pieces the intended solution may use
    pub max_terms: usize,
    /// Overshoots allowed before game over
    pub lives: u8,
    /// Rounds cleared per difficulty level
    pub rounds_per_level: u32,
    pub base_points: u64,
    pub streak_bonus: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            operation: Operation::Add,
            target_min: 5,
            target_max: 12,
            target_growth: 1,
            piece_min: 1,
            piece_max: 9,
            piece_max_growth_every: 4,
            piece_max_cap: 15,
            piece_count: 5,
            piece_count_growth_every: 3,
            piece_count_max: 8,
            max_terms: 3,
            lives: 3,
            rounds_per_level: 2,
            base_points: 10,
            streak_bonus: 5,
        }
    }
}

/// Concrete parameters for one difficulty level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundParams {
    pub operation: Operation,
    pub target_range: RangeInclusive<u32>,
    pub piece_range: RangeInclusive<u32>,
    pub piece_count: usize,
    pub max_terms: usize,
}

impl Tuning {
    /// Parameters for `difficulty`; ranges grow monotonically with it
    pub fn params(&self, difficulty: u32) -> RoundParams {
        let shift = difficulty.saturating_mul(self.target_growth);
        let target_range =
            self.target_min.saturating_add(shift)..=self.target_max.saturating_add(shift);

        let piece_max = match self.piece_max_growth_every {
            0 => self.piece_max,
            every => self
                .piece_max
                .saturating_add(difficulty / every)
                .min(self.piece_max_cap.max(self.piece_max)),
        };

        let piece_count = match self.piece_count_growth_every {
            0 => self.piece_count,
            every => (self.piece_count.saturating_add((difficulty / every) as usize))
                .min(self.piece_count_max.max(self.piece_count)),
        };

        RoundParams {
            operation: self.operation,
            target_range,
            piece_range: self.piece_min..=piece_max,
            piece_count: piece_count.max(self.max_terms).min(MAX_PIECES),
            max_terms: self.max_terms,
        }
    }

    /// Difficulty reached after clearing `rounds_cleared` rounds
    pub fn difficulty_after(&self, start: u32, rounds_cleared: u32) -> u32 {
        start.saturating_add(rounds_cleared / self.rounds_per_level.max(1))
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.target_min == 0 || self.target_min > self.target_max {
            return invalid("target range must be non-empty and start at 1 or more");
        }
        if self.piece_min == 0 || self.piece_min > self.piece_max {
            return invalid("piece range must be non-empty and start at 1 or more");
        }
        if self.max_terms == 0 {
            return invalid("max_terms must be at least 1");
        }
        if self.piece_count < self.max_terms || self.piece_count > MAX_PIECES {
            return invalid("piece_count must fit the solution and at most 9 pieces");
        }
        if self.piece_count_max > MAX_PIECES {
            return invalid("piece_count_max must be at most 9");
        }
        if self.operation == Operation::Multiply && self.piece_max < 2 {
            return invalid("multiplication needs pieces of 2 or more");
        }
        if self.operation == Operation::Multiply && self.target_min < 2 {
            return invalid("multiplication targets must be 2 or more");
        }
        if self.lives == 0 {
            return invalid("lives must be at least 1");
        }
        Ok(())
    }

    /// Parse and validate a tuning from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }
}

/// Named game variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Skin {
    /// Gear train: add gears to match the machine's number
    #[default]
    Gears,
    /// Atom builder: bigger sums
    Electrons,
    /// Tile take-away: subtract down to the target
    Tiles,
    /// Battery pack: multiply voltages
    Batteries,
    /// Bubble pop: small sums for beginners
    Bubbles,
}

impl Skin {
    pub const ALL: [Skin; 5] = [
        Skin::Gears,
        Skin::Electrons,
        Skin::Tiles,
        Skin::Batteries,
        Skin::Bubbles,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Skin::Gears => "Gears",
            Skin::Electrons => "Electrons",
            Skin::Tiles => "Tiles",
            Skin::Batteries => "Batteries",
            Skin::Bubbles => "Bubbles",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gears" | "gear" => Some(Skin::Gears),
            "electrons" | "electron" => Some(Skin::Electrons),
            "tiles" | "tile" => Some(Skin::Tiles),
            "batteries" | "battery" => Some(Skin::Batteries),
            "bubbles" | "bubble" => Some(Skin::Bubbles),
            _ => None,
        }
    }

    /// Following skin in `ALL`, wrapping around
    pub fn next(&self) -> Self {
        let i = Self::ALL.iter().position(|s| s == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// What a single piece is called on screen
    pub fn piece_noun(&self) -> &'static str {
        match self {
            Skin::Gears => "gear",
            Skin::Electrons => "electron",
            Skin::Tiles => "tile",
            Skin::Batteries => "battery",
            Skin::Bubbles => "bubble",
        }
    }

    /// Piece fill colour (CSS)
    pub fn piece_color(&self) -> &'static str {
        match self {
            Skin::Gears => "#c0873f",
            Skin::Electrons => "#3fa7d6",
            Skin::Tiles => "#e07a5f",
            Skin::Batteries => "#81b29a",
            Skin::Bubbles => "#9b8cd9",
        }
    }

    pub fn tuning(&self) -> Tuning {
        let base = Tuning::default();
        match self {
            Skin::Gears => base,
            Skin::Electrons => Tuning {
                target_min: 10,
                target_max: 20,
                piece_count: 6,
                ..base
            },
            Skin::Tiles => Tuning {
                operation: Operation::Subtract,
                target_min: 1,
                target_max: 10,
                ..base
            },
            Skin::Batteries => Tuning {
                operation: Operation::Multiply,
                target_min: 4,
                target_max: 24,
                target_growth: 2,
                piece_max: 6,
                piece_max_cap: 9,
                max_terms: 2,
                ..base
            },
            Skin::Bubbles => Tuning {
                target_min: 2,
                target_max: 8,
                piece_max: 5,
                piece_max_cap: 9,
                piece_count: 4,
                piece_count_max: 6,
                max_terms: 2,
                ..base
            },
        }
    }
}
