//! Reversible board mutations.
//!
//! Every apply returns a record holding exactly what it overwrote; the
//! matching undo takes the same `(from, to)` pair plus that record. Undoing
//! anything but the most recent apply is not supported unless the caller
//! keeps its own stack of records.

use tracing::debug;

use crate::board::Board;
use crate::error::{EngineError, EngineResult};
use crate::movegen::{get_attackable_range, reach};
use crate::types::*;

/// State overwritten by `apply_move` or `exhaust`.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveUndo {
    /// Prior has-moved flag of every locked piece, keyed by its pre-move square.
    locked: Vec<(Square, bool)>,
    prior_budget: u8,
}

/// State overwritten by `apply_attack`.
#[derive(Clone, Debug, PartialEq)]
pub struct AttackUndo {
    captured: Option<Piece>,
    locked: Vec<(Square, bool)>,
    prior_budget: u8,
    /// Survivors of a fallen commander's corp with their prior (corp, delegation).
    reassigned: Vec<(Square, i8, i8)>,
}

impl AttackUndo {
    pub fn captured(&self) -> Option<&Piece> {
        self.captured.as_ref()
    }
}

impl Board {
    /// Relocates the piece on `from` to the reachable empty square `to`.
    ///
    /// The mover is locked for the rest of the turn; a commander locks its
    /// whole corp and spends the hops it travelled from its budget.
    pub fn apply_move(&mut self, from: Square, to: Square) -> EngineResult<MoveUndo> {
        let piece = *self.piece_at(from).ok_or(EngineError::EmptySource(from))?;
        if !self.is_empty(to) {
            return Err(EngineError::InvalidMove { from, to });
        }
        let hops = reach(self, from, piece.move_budget)
            .into_iter()
            .find(|&(sq, _)| sq == to)
            .map(|(_, ring)| ring)
            .ok_or(EngineError::InvalidMove { from, to })?;

        let locked = self.lock_from(from);
        let prior_budget = piece.move_budget;
        self.relocate(from, to);
        if piece.is_commander {
            if let Some(pc) = self.piece_mut(to) {
                pc.move_budget = pc.move_budget.saturating_sub(hops);
            }
        }
        debug!(%from, %to, hops, commander = piece.is_commander, "move applied");
        Ok(MoveUndo {
            locked,
            prior_budget,
        })
    }

    pub fn undo_move(&mut self, from: Square, to: Square, undo: MoveUndo) {
        self.relocate(to, from);
        if let Some(pc) = self.piece_mut(from) {
            pc.move_budget = undo.prior_budget;
        }
        self.restore_locks(&undo.locked);
    }

    /// Resolves a successful attack: removes the defender on `to` and moves
    /// the attacker in. The die roll must already have been won.
    ///
    /// An empty `to` inside the attack box is a no-op capture: nothing is
    /// removed, the attacker stays on `from` and only its action is spent.
    pub fn apply_attack(&mut self, from: Square, to: Square) -> EngineResult<AttackUndo> {
        let attacker = *self.piece_at(from).ok_or(EngineError::EmptySource(from))?;
        if !get_attackable_range(self, from).contains(&to) {
            return Err(EngineError::InvalidAttack { from, to });
        }
        if let Some(defender) = self.piece_at(to) {
            if !defender.is_enemy_of(&attacker) {
                return Err(EngineError::InvalidAttack { from, to });
            }
        }

        let prior_budget = attacker.move_budget;
        let Some(captured) = self.squares[to.idx()].take() else {
            debug!(%from, %to, "attack on empty square");
            return Ok(AttackUndo {
                captured: None,
                locked: self.lock_from(from),
                prior_budget,
                reassigned: Vec::new(),
            });
        };
        self.rebuild_corps();
        let reassigned = self.reassign_orphans(&captured);
        let locked = self.lock_from(from);
        self.relocate(from, to);
        if attacker.is_commander {
            if let Some(pc) = self.piece_mut(to) {
                pc.move_budget = pc.move_budget.saturating_sub(1);
            }
        }
        debug!(
            %from,
            %to,
            captured = captured.code(),
            reassigned = reassigned.len(),
            "attack applied"
        );
        Ok(AttackUndo {
            captured: Some(captured),
            locked,
            prior_budget,
            reassigned,
        })
    }

    pub fn undo_attack(&mut self, from: Square, to: Square, undo: AttackUndo) {
        if undo.captured.is_some() {
            self.relocate(to, from);
        }
        if let Some(pc) = self.piece_mut(from) {
            pc.move_budget = undo.prior_budget;
        }
        for &(sq, corp_id, delegation_id) in &undo.reassigned {
            if let Some(pc) = self.piece_mut(sq) {
                pc.corp_id = corp_id;
                pc.delegation_id = delegation_id;
            }
        }
        if let Some(pc) = undo.captured {
            self.squares[to.idx()] = Some(pc);
        }
        self.rebuild_corps();
        self.restore_locks(&undo.locked);
    }

    /// Spends the action of the piece on `from` without moving it, as after a
    /// lost die roll.
    pub fn exhaust(&mut self, from: Square) -> EngineResult<MoveUndo> {
        let piece = *self.piece_at(from).ok_or(EngineError::EmptySource(from))?;
        let locked = self.lock_from(from);
        Ok(MoveUndo {
            locked,
            prior_budget: piece.move_budget,
        })
    }

    /// Clears every has-moved flag and restores commander budgets.
    pub fn refresh_turn_state(&mut self) {
        for pc in self.squares.iter_mut().flatten() {
            pc.has_moved = false;
            if pc.is_commander {
                pc.move_budget = pc.default_move_budget;
            }
        }
    }

    /// Hands the non-commander on `sq` to another corp of its side.
    pub fn delegate(&mut self, sq: Square, corp_id: i8) -> EngineResult<()> {
        let piece = *self.piece_at(sq).ok_or(EngineError::EmptySource(sq))?;
        if piece.is_commander {
            return Err(EngineError::InvalidDelegation(format!(
                "commander on {sq} cannot change corps"
            )));
        }
        if Side::from_sign(corp_id) != Some(piece.side) || corp_id == piece.corp_id {
            return Err(EngineError::InvalidDelegation(format!(
                "corp {corp_id} is not another corp of the piece on {sq}"
            )));
        }
        if self.commander_of(corp_id).is_none() {
            return Err(EngineError::InvalidDelegation(format!(
                "corp {corp_id} has no commander"
            )));
        }
        if let Some(pc) = self.piece_mut(sq) {
            if pc.delegation_id == 0 {
                pc.delegation_id = pc.corp_id;
            }
            pc.corp_id = corp_id;
        }
        self.rebuild_corps();
        debug!(%sq, corp_id, "piece delegated");
        Ok(())
    }

    /// Returns a delegated piece to the corp it came from.
    pub fn recall(&mut self, sq: Square) -> EngineResult<()> {
        let piece = *self.piece_at(sq).ok_or(EngineError::EmptySource(sq))?;
        if piece.delegation_id == 0 {
            return Err(EngineError::InvalidDelegation(format!(
                "piece on {sq} was never delegated"
            )));
        }
        if self.commander_of(piece.delegation_id).is_none() {
            return Err(EngineError::InvalidDelegation(format!(
                "corp {} has lost its commander",
                piece.delegation_id
            )));
        }
        if let Some(pc) = self.piece_mut(sq) {
            pc.corp_id = pc.delegation_id;
            pc.delegation_id = 0;
        }
        self.rebuild_corps();
        Ok(())
    }

    /// Locks the piece on `from`, or its whole corp when it is a commander.
    fn lock_from(&mut self, from: Square) -> Vec<(Square, bool)> {
        let (corp_id, is_commander) = match self.piece_at(from) {
            Some(pc) => (pc.corp_id, pc.is_commander),
            None => return Vec::new(),
        };
        let targets: Vec<Square> = if is_commander {
            self.corp_members(corp_id).to_vec()
        } else {
            vec![from]
        };
        let mut locked = Vec::with_capacity(targets.len());
        for sq in targets {
            if let Some(pc) = self.piece_mut(sq) {
                locked.push((sq, pc.has_moved));
                pc.has_moved = true;
            }
        }
        locked
    }

    fn restore_locks(&mut self, locked: &[(Square, bool)]) {
        for &(sq, was_moved) in locked {
            if let Some(pc) = self.piece_mut(sq) {
                pc.has_moved = was_moved;
            }
        }
    }

    /// Moves the survivors of a fallen non-king commander into their king's corp.
    fn reassign_orphans(&mut self, fallen: &Piece) -> Vec<(Square, i8, i8)> {
        if !fallen.is_commander || fallen.kind == PieceKind::King {
            return Vec::new();
        }
        let king_corp = match self.king_corp(fallen.side) {
            Some(c) if c != fallen.corp_id => c,
            _ => return Vec::new(),
        };
        let orphans = self.corp_members(fallen.corp_id).to_vec();
        let mut reassigned = Vec::with_capacity(orphans.len());
        for sq in orphans {
            if let Some(pc) = self.piece_mut(sq) {
                reassigned.push((sq, pc.corp_id, pc.delegation_id));
                if pc.delegation_id == 0 {
                    pc.delegation_id = pc.corp_id;
                }
                pc.corp_id = king_corp;
            }
        }
        self.rebuild_corps();
        reassigned
    }
}

#[cfg(test)]
#[path = "mutation_tests.rs"]
mod mutation_tests;
