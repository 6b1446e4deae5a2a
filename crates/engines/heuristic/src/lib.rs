//! Heuristic Corps Agent
//!
//! Greedy single-ply decision maker. Each call it:
//! - scores every attack of an unmoved piece by dice expected value
//! - scores every move of an unmoved piece by closeness to the enemy king
//! - plays the better of the two best candidates, or ends the turn
//!
//! It never looks at replies, so it is cheap enough to call once per action.

mod eval;

use corps_core::{
    get_attackable, get_moves, roll_needed, Action, Actor, Board, Side, Square,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use eval::{attack_value, distance_map, material_value, AttackScoring, MATERIAL_VALUES};


#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    pub material_values: [f64; 6],
    pub attack_scoring: AttackScoring,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            material_values: MATERIAL_VALUES,
            attack_scoring: AttackScoring::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Candidate {
    from: Square,
    to: Square,
    score: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct MoveCandidate {
    candidate: Candidate,
    /// Enemies the piece could attack from its destination, for tie-breaks.
    threats: usize,
}

/// Greedy agent that trades capture expected value against king proximity.
#[derive(Debug, Clone, Default)]
pub struct HeuristicAgent {
    config: HeuristicConfig,
    /// Candidates scored during the last decision
    evaluated: u64,
}

impl HeuristicAgent {
    pub fn new() -> Self {
        Self::with_config(HeuristicConfig::default())
    }

    pub fn with_config(config: HeuristicConfig) -> Self {
        Self {
            config,
            evaluated: 0,
        }
    }

    pub fn config(&self) -> &HeuristicConfig {
        &self.config
    }

    pub fn evaluated(&self) -> u64 {
        self.evaluated
    }

    fn best_attack(&mut self, board: &Board, side: Side) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;
        for (from, attacker) in board.pieces_of(side).filter(|(_, p)| !p.has_moved) {
            for to in get_attackable(board, from) {
                let Some(defender) = board.piece_at(to) else {
                    continue;
                };
                let Ok(threshold) = roll_needed(attacker.code(), defender.code()) else {
                    continue;
                };
                self.evaluated += 1;
                let value = material_value(&self.config.material_values, defender.code());
                let score = attack_value(self.config.attack_scoring, threshold, value);
                if best.map_or(true, |b| score > b.score) {
                    best = Some(Candidate { from, to, score });
                }
            }
        }
        best
    }

    fn best_move(&mut self, board: &Board, side: Side) -> Option<MoveCandidate> {
        let target = board.king_square(side.other())?;
        let map = distance_map(board, target);
        let mut probe = board.virtual_copy();

        let mut best: Option<MoveCandidate> = None;
        for (from, piece) in board.pieces_of(side).filter(|(_, p)| !p.has_moved) {
            for to in get_moves(board, from, piece.move_budget) {
                let Some(score) = map[to.idx()] else {
                    continue;
                };
                self.evaluated += 1;
                let candidate = Candidate { from, to, score };
                best = match best {
                    None => Some(MoveCandidate {
                        candidate,
                        threats: threats_after(&mut probe, from, to),
                    }),
                    Some(b) if score > b.candidate.score => Some(MoveCandidate {
                        candidate,
                        threats: threats_after(&mut probe, from, to),
                    }),
                    Some(b) if score == b.candidate.score => {
                        let threats = threats_after(&mut probe, from, to);
                        if threats > b.threats {
                            Some(MoveCandidate { candidate, threats })
                        } else {
                            Some(b)
                        }
                    }
                    keep => keep,
                };
            }
        }
        best
    }
}

/// Dry-runs the move on the probe board and counts the enemies in reach afterwards.
fn threats_after(probe: &mut Board, from: Square, to: Square) -> usize {
    match probe.apply_move(from, to) {
        Ok(undo) => {
            let threats = get_attackable(probe, to).len();
            probe.undo_move(from, to, undo);
            threats
        }
        Err(_) => 0,
    }
}

impl Actor for HeuristicAgent {
    fn decide_next_action(&mut self, board: &Board, side: Side) -> Option<Action> {
        self.evaluated = 0;
        let attack = self.best_attack(board, side);
        let movement = self.best_move(board, side).map(|m| m.candidate);

        let action = match (movement, attack) {
            (Some(m), a) if a.map_or(true, |a| m.score > a.score) => Action::Move {
                from: m.from,
                to: m.to,
            },
            (_, Some(a)) => Action::Attack {
                from: a.from,
                to: a.to,
            },
            _ => Action::EndTurn,
        };
        debug!(
            %side,
            ?action,
            attack_score = attack.map(|a| a.score),
            move_score = movement.map(|m| m.score),
            evaluated = self.evaluated,
            "heuristic decision"
        );
        Some(action)
    }

    fn name(&self) -> &str {
        "Heuristic v1.0"
    }

    fn new_game(&mut self) {
        self.evaluated = 0;
    }
}
