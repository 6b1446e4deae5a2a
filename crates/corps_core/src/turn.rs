//! Turn sequencing.
//!
//! A side spends its action budget one action at a time; once the budget is
//! gone (or the side passes) the board is refreshed and play passes to the
//! other side. Killing an enemy commander costs the killer
//! `commander_loss_penalty` actions on its next turn.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::board::Board;
use crate::combat::{attack_succeeds, roll_needed, Dice};
use crate::config::GameConfig;
use crate::error::{EngineError, EngineResult};
use crate::movegen::get_attackable;
use crate::types::*;
use crate::Actor;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Move { from: Square, to: Square },
    Attack { from: Square, to: Square },
    EndTurn,
}

/// Where the controller stands. `TurnComplete` names the side that just
/// finished; `side_to_move` and `moves_left` already describe the next side,
/// and the phase catches up to `AwaitingAction` on the next step or action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingAction { side: Side, moves_left: u8 },
    TurnComplete { side: Side },
    GameOver { winner: Side },
}

#[derive(Clone, Debug, PartialEq)]
pub enum ActionOutcome {
    Moved,
    Captured(Piece),
    /// The die came up short; the attacker stays put but its action is spent.
    AttackFailed { roll: u8, needed: u8 },
    Passed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActionReport {
    pub side: Side,
    pub action: Action,
    pub cost: u8,
    pub outcome: ActionOutcome,
    pub turn_ended: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StepOutcome {
    /// The actor to move is waiting on external input; call `perform`.
    Awaiting(Side),
    Performed(ActionReport),
    /// The side had no actions left at the start of its turn.
    TurnSkipped(Side),
    GameOver(Side),
}

/// Actor that never decides on its own; the host feeds moves through
/// `TurnController::perform`.
#[derive(Debug, Clone)]
pub struct HumanActor {
    name: String,
}

impl HumanActor {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl Actor for HumanActor {
    fn decide_next_action(&mut self, _board: &Board, _side: Side) -> Option<Action> {
        None
    }

    fn name(&self) -> &str {
        &self.name
    }
}

pub struct TurnController {
    config: GameConfig,
    board: Board,
    actors: [Box<dyn Actor>; 2],
    phase: TurnPhase,
    side: Side,
    moves_left: u8,
    pending_penalty: [u8; 2],
    turn: u32,
}

impl TurnController {
    /// White moves first with a full budget.
    pub fn new(
        config: GameConfig,
        board: Board,
        white: Box<dyn Actor>,
        black: Box<dyn Actor>,
    ) -> Self {
        let moves_left = config.actions_per_turn;
        Self {
            config,
            board,
            actors: [white, black],
            phase: TurnPhase::AwaitingAction {
                side: Side::White,
                moves_left,
            },
            side: Side::White,
            moves_left,
            pending_penalty: [0; 2],
            turn: 1,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Lags `side_to_move` by one step right after a turn ends; see `TurnPhase`.
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn side_to_move(&self) -> Side {
        self.side
    }

    pub fn moves_left(&self) -> u8 {
        self.moves_left
    }

    pub fn turn_number(&self) -> u32 {
        self.turn
    }

    pub fn actor_name(&self, side: Side) -> &str {
        self.actors[side.idx()].name()
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            TurnPhase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    /// Asks the actor of the side to move for its next action and performs it.
    pub fn step(&mut self, dice: &mut dyn Dice) -> EngineResult<StepOutcome> {
        if let Some(winner) = self.winner() {
            return Ok(StepOutcome::GameOver(winner));
        }
        if self.moves_left == 0 {
            let side = self.side;
            self.end_turn();
            return Ok(StepOutcome::TurnSkipped(side));
        }
        let side = self.side;
        self.phase = TurnPhase::AwaitingAction {
            side,
            moves_left: self.moves_left,
        };
        let decision = self.actors[side.idx()].decide_next_action(&self.board, side);
        match decision {
            None => Ok(StepOutcome::Awaiting(side)),
            Some(action) => self.perform(action, dice).map(StepOutcome::Performed),
        }
    }

    /// Validates and performs one action for the side to move. Rejected
    /// actions leave the board and the budget untouched.
    pub fn perform(&mut self, action: Action, dice: &mut dyn Dice) -> EngineResult<ActionReport> {
        if self.winner().is_some() {
            return Err(EngineError::GameOver);
        }
        let side = self.side;
        let (cost, outcome) = match action {
            Action::EndTurn => (0, ActionOutcome::Passed),
            Action::Move { from, to } => {
                let piece = self.ready_piece(from, side).map_err(|err| match err {
                    EngineError::EmptySource(_) => err,
                    _ => EngineError::InvalidMove { from, to },
                })?;
                self.board.apply_move(from, to).inspect_err(|err| {
                    warn!(%side, %from, %to, %err, "move rejected");
                })?;
                (self.cost_of(&piece), ActionOutcome::Moved)
            }
            Action::Attack { from, to } => {
                let piece = self.ready_piece(from, side).map_err(|err| match err {
                    EngineError::EmptySource(_) => err,
                    _ => EngineError::InvalidAttack { from, to },
                })?;
                (self.cost_of(&piece), self.resolve_attack(&piece, from, to, dice)?)
            }
        };

        let turn_ended = if action == Action::EndTurn {
            self.end_turn();
            true
        } else if self.winner().is_some() {
            false
        } else {
            self.moves_left = self.moves_left.saturating_sub(cost);
            if self.moves_left == 0 {
                self.end_turn();
                true
            } else {
                self.phase = TurnPhase::AwaitingAction {
                    side,
                    moves_left: self.moves_left,
                };
                false
            }
        };

        Ok(ActionReport {
            side,
            action,
            cost,
            outcome,
            turn_ended,
        })
    }

    fn ready_piece(&self, from: Square, side: Side) -> EngineResult<Piece> {
        let piece = *self
            .board
            .piece_at(from)
            .ok_or(EngineError::EmptySource(from))?;
        if piece.side != side || piece.has_moved {
            return Err(EngineError::InvalidMove { from, to: from });
        }
        Ok(piece)
    }

    fn cost_of(&self, piece: &Piece) -> u8 {
        if piece.is_commander {
            self.config.command_cost
        } else {
            1
        }
    }

    fn resolve_attack(
        &mut self,
        attacker: &Piece,
        from: Square,
        to: Square,
        dice: &mut dyn Dice,
    ) -> EngineResult<ActionOutcome> {
        let defender = match self.board.piece_at(to) {
            Some(d) if d.is_enemy_of(attacker) => *d,
            _ => return Err(EngineError::InvalidAttack { from, to }),
        };
        if !get_attackable(&self.board, from).contains(&to) {
            return Err(EngineError::InvalidAttack { from, to });
        }

        let needed = roll_needed(attacker.code(), defender.code())?;
        let roll = dice.roll();
        if !attack_succeeds(needed, roll) {
            self.board.exhaust(from)?;
            debug!(%from, %to, roll, needed, "attack failed");
            return Ok(ActionOutcome::AttackFailed { roll, needed });
        }

        self.board.apply_attack(from, to)?;
        self.board.record_capture(&defender);
        info!(
            side = %attacker.side,
            %to,
            captured = defender.code(),
            roll,
            needed,
            "piece captured"
        );
        if defender.kind == PieceKind::King {
            self.phase = TurnPhase::GameOver {
                winner: attacker.side,
            };
            info!(winner = %attacker.side, turn = self.turn, "king captured, game over");
        } else if defender.is_commander {
            self.lose_commander(defender.side);
        }
        Ok(ActionOutcome::Captured(defender))
    }

    /// Penalises the side opposing the one that lost a commander, once per loss.
    fn lose_commander(&mut self, loser: Side) {
        let penalised = loser.other();
        let slot = &mut self.pending_penalty[penalised.idx()];
        *slot = slot.saturating_add(self.config.commander_loss_penalty);
        info!(%loser, %penalised, penalty = *slot, "commander lost");
    }

    /// Refreshes the board and hands play over. The phase stays `TurnComplete`
    /// until the next step or action.
    fn end_turn(&mut self) {
        let finished = self.side;
        self.phase = TurnPhase::TurnComplete { side: finished };
        self.board.refresh_turn_state();

        self.side = finished.other();
        self.turn += 1;
        let penalty = std::mem::take(&mut self.pending_penalty[self.side.idx()]);
        self.moves_left = self.config.actions_per_turn.saturating_sub(penalty);
        info!(
            finished = %finished,
            next = %self.side,
            moves_left = self.moves_left,
            turn = self.turn,
            "turn complete"
        );
    }
}

#[cfg(test)]
#[path = "turn_tests.rs"]
mod turn_tests;
