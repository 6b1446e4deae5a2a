//! Random Corps Agent
//!
//! Picks uniformly among every move and attack open to the side's unmoved
//! pieces, and ends the turn once nothing is left. Useful as:
//! - a baseline any real agent should beat comfortably
//! - a stress driver for generation and the turn controller

use corps_core::{get_attackable, get_moves, Action, Actor, Board, Side};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;


/// An agent that plays random legal actions.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: StdRng,
    /// Options considered for the last decision
    options: usize,
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomAgent {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            options: 0,
        }
    }

    /// Reproducible agent for seeded matches and tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            options: 0,
        }
    }

    pub fn options(&self) -> usize {
        self.options
    }
}

/// Every move and attack available to `side` this action.
pub fn legal_actions(board: &Board, side: Side) -> Vec<Action> {
    let mut actions = Vec::with_capacity(64);
    for (from, piece) in board.pieces_of(side).filter(|(_, p)| !p.has_moved) {
        actions.extend(
            get_moves(board, from, piece.move_budget)
                .into_iter()
                .map(|to| Action::Move { from, to }),
        );
        actions.extend(
            get_attackable(board, from)
                .into_iter()
                .map(|to| Action::Attack { from, to }),
        );
    }
    actions
}

impl Actor for RandomAgent {
    fn decide_next_action(&mut self, board: &Board, side: Side) -> Option<Action> {
        let actions = legal_actions(board, side);
        self.options = actions.len();
        Some(
            actions
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(Action::EndTurn),
        )
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }

    fn new_game(&mut self) {
        self.options = 0;
    }
}
