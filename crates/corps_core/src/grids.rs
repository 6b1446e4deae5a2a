//! Flat grid form of a board, as exchanged with a persistence or rendering host.
//!
//! Every per-cell grid is 64 entries long in row-major order. Commander
//! budgets are listed in row-major order of the commanders on the board.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::config::MoveBudgets;
use crate::error::{EngineError, EngineResult};
use crate::types::*;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardGrids {
    pub pieces: Vec<i8>,
    pub corps: Vec<i8>,
    pub delegations: Vec<i8>,
    pub has_moved: Vec<bool>,
    pub commander_budgets: Vec<u8>,
    pub captured_white: Vec<i8>,
    pub captured_black: Vec<i8>,
}

fn check_len<T>(name: &str, grid: &[T]) -> EngineResult<()> {
    if grid.len() == NUM_SQUARES {
        Ok(())
    } else {
        Err(EngineError::InvalidGrid(format!(
            "{name} grid has {} cells, expected {NUM_SQUARES}",
            grid.len()
        )))
    }
}

fn check_captured(name: &str, codes: &[i8], side: Side) -> EngineResult<()> {
    for &code in codes {
        match decode_piece(code)? {
            Some((s, _)) if s == side => {}
            _ => {
                return Err(EngineError::InvalidGrid(format!(
                    "{name} holds code {code}"
                )))
            }
        }
    }
    Ok(())
}

impl Board {
    /// Rebuilds a board from host grids, validating codes and corp structure.
    pub fn from_grids(grids: &BoardGrids, budgets: &MoveBudgets) -> EngineResult<Board> {
        check_len("piece", &grids.pieces)?;
        check_len("corp", &grids.corps)?;
        check_len("delegation", &grids.delegations)?;
        check_len("has-moved", &grids.has_moved)?;
        check_captured("white captured list", &grids.captured_white, Side::White)?;
        check_captured("black captured list", &grids.captured_black, Side::Black)?;

        let mut board = Board::empty();
        let mut budgets_left = grids.commander_budgets.iter();
        for (i, &code) in grids.pieces.iter().enumerate() {
            let sq = Square::from_idx(i);
            let Some((side, kind)) = decode_piece(code)? else {
                continue;
            };
            let corp_id = grids.corps[i];
            if corp_id == 0 || Side::from_sign(corp_id) != Some(side) {
                return Err(EngineError::InvalidGrid(format!(
                    "piece {code} on {sq} has corp {corp_id}"
                )));
            }
            let mut piece = Piece::new(kind, side, 1, budgets.for_kind(kind));
            piece.corp_id = corp_id;
            piece.delegation_id = grids.delegations[i];
            piece.has_moved = grids.has_moved[i];
            if piece.is_commander {
                piece.move_budget = *budgets_left.next().ok_or_else(|| {
                    EngineError::InvalidGrid("too few commander budgets".to_string())
                })?;
            }
            board.squares[i] = Some(Piece {
                position: sq,
                ..piece
            });
        }
        if budgets_left.next().is_some() {
            return Err(EngineError::InvalidGrid(
                "too many commander budgets".to_string(),
            ));
        }
        board.rebuild_corps();

        let corp_ids: Vec<i8> = board.corps().corp_ids().collect();
        for corp_id in corp_ids {
            let commanders = board
                .corp_members(corp_id)
                .iter()
                .filter(|&&s| board.piece_at(s).is_some_and(|p| p.is_commander))
                .count();
            if commanders > 1 {
                return Err(EngineError::InvalidGrid(format!(
                    "corp {corp_id} has {commanders} commanders"
                )));
            }
        }

        board.captured = [grids.captured_white.clone(), grids.captured_black.clone()];
        Ok(board)
    }

    pub fn to_grids(&self) -> BoardGrids {
        let mut grids = BoardGrids {
            pieces: vec![0; NUM_SQUARES],
            corps: vec![0; NUM_SQUARES],
            delegations: vec![0; NUM_SQUARES],
            has_moved: vec![false; NUM_SQUARES],
            commander_budgets: Vec::new(),
            captured_white: self.captured(Side::White).to_vec(),
            captured_black: self.captured(Side::Black).to_vec(),
        };
        for (sq, pc) in self.pieces() {
            let i = sq.idx();
            grids.pieces[i] = pc.code();
            grids.corps[i] = pc.corp_id;
            grids.delegations[i] = pc.delegation_id;
            grids.has_moved[i] = pc.has_moved;
            if pc.is_commander {
                grids.commander_budgets.push(pc.move_budget);
            }
        }
        grids
    }
}

#[cfg(test)]
#[path = "grids_tests.rs"]
mod grids_tests;
