//! Scoring terms for the greedy agent.

use corps_core::{success_chance, Board, Square, NUM_SQUARES};
use serde::{Deserialize, Serialize};

/// Material values by piece magnitude (pawn first). The sixth slot is kept
/// exactly as configured rather than derived from chess convention.
pub const MATERIAL_VALUES: [f64; 6] = [1.0, 3.0, 5.0, 4.0, 6.0, 10.0];

/// How a combat threshold turns into the weight of an attack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackScoring {
    /// `threshold / 6 * value`.
    #[default]
    Threshold,
    /// Probability that the die meets the threshold, times value.
    SuccessChance,
}

pub fn material_value(values: &[f64; 6], code: i8) -> f64 {
    match code.unsigned_abs() {
        m @ 1..=6 => values[m as usize - 1],
        _ => 0.0,
    }
}

pub fn attack_value(scoring: AttackScoring, threshold: u8, defender_value: f64) -> f64 {
    let weight = match scoring {
        AttackScoring::Threshold => f64::from(threshold) / 6.0,
        AttackScoring::SuccessChance => success_chance(threshold),
    };
    weight * defender_value
}

/// `1 / distance` to `target` for every empty square; occupied squares score nothing.
pub fn distance_map(board: &Board, target: Square) -> [Option<f64>; NUM_SQUARES] {
    let mut map = [None; NUM_SQUARES];
    for sq in Square::all() {
        if !board.is_empty(sq) {
            continue;
        }
        let d = sq.distance(target);
        if d > 0.0 {
            map[sq.idx()] = Some(1.0 / d);
        }
    }
    map
}
