//! Dice combat.
//!
//! An attack succeeds when a six-sided die shows at least the threshold
//! looked up for the (attacker, defender) pair. A threshold of 0 always
//! succeeds.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{EngineError, EngineResult};

pub const DIE_FACES: u8 = 6;

/// Roll thresholds indexed by `[6 - |attacker|][6 - |defender|]`.
/// Row and column order: king, queen, knight, bishop, rook, pawn.
pub const COMBAT_TABLE: [[u8; 6]; 6] = [
    [4, 4, 4, 4, 5, 0],
    [4, 4, 4, 4, 5, 1],
    [6, 6, 4, 4, 5, 1],
    [5, 5, 5, 4, 5, 2],
    [4, 4, 4, 5, 5, 1],
    [6, 6, 6, 5, 6, 3],
];

/// Minimum die roll the attacker needs. Takes signed piece codes or bare
/// magnitudes; only the magnitude matters.
pub fn roll_needed(attacker: i8, defender: i8) -> EngineResult<u8> {
    let a = strength_class(attacker)?;
    let d = strength_class(defender)?;
    Ok(COMBAT_TABLE[6 - a][6 - d])
}

fn strength_class(code: i8) -> EngineResult<usize> {
    let magnitude = code.unsigned_abs();
    if (1..=6).contains(&magnitude) {
        Ok(magnitude as usize)
    } else {
        Err(EngineError::OutOfRange {
            what: "strength class",
            value: i32::from(code),
        })
    }
}

pub fn attack_succeeds(threshold: u8, roll: u8) -> bool {
    roll >= threshold
}

/// Probability that a fair die meets `threshold`.
pub fn success_chance(threshold: u8) -> f64 {
    let hits = (DIE_FACES + 1).saturating_sub(threshold.max(1)).min(DIE_FACES);
    f64::from(hits) / f64::from(DIE_FACES)
}

/// Source of die rolls, 1..=6 inclusive.
pub trait Dice {
    fn roll(&mut self) -> u8;
}

/// Uniform die over a seedable RNG.
#[derive(Debug, Clone)]
pub struct RandDice {
    rng: StdRng,
}

impl RandDice {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Dice for RandDice {
    fn roll(&mut self) -> u8 {
        self.rng.gen_range(1..=DIE_FACES)
    }
}

/// Replays a fixed sequence of rolls, then keeps returning `fallback`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<u8>,
    fallback: u8,
}

impl ScriptedDice {
    pub fn new(rolls: impl IntoIterator<Item = u8>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            fallback: DIE_FACES,
        }
    }

    pub fn with_fallback(mut self, fallback: u8) -> Self {
        self.fallback = fallback;
        self
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self) -> u8 {
        self.rolls.pop_front().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
#[path = "combat_tests.rs"]
mod combat_tests;
