//! Move and attack generation.
//!
//! Movement is a flood fill in rings: each ring spends one unit of the move
//! budget and may only step onto empty squares, so a piece with budget `m`
//! reaches anything connected to it by at most `m` empty hops. Attacks use a
//! bounding-box scan around the piece instead.

use tracing::trace;

use crate::board::Board;
use crate::types::*;

const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

fn step_dirs(piece: &Piece) -> &'static [(i8, i8)] {
    match (piece.kind, piece.side) {
        (PieceKind::Pawn, Side::White) => &[(1, 0)],
        (PieceKind::Pawn, Side::Black) => &[(-1, 0)],
        _ => &ORTHOGONAL,
    }
}

/// Reachable empty squares paired with the ring (hop count) that first reached them.
pub fn reach(board: &Board, from: Square, move_budget: u8) -> Vec<(Square, u8)> {
    let mut out = Vec::new();
    let piece = match board.piece_at(from) {
        Some(p) => p,
        None => return out,
    };
    let dirs = step_dirs(piece);

    let mut visited = [false; NUM_SQUARES];
    visited[from.idx()] = true;
    let mut frontier = vec![from];

    for ring in 1..=move_budget {
        let mut next = Vec::new();
        for cell in &frontier {
            for &(dr, dc) in dirs {
                let Some(to) = cell.offset(dr, dc) else {
                    continue;
                };
                if visited[to.idx()] || !board.is_empty(to) {
                    continue;
                }
                visited[to.idx()] = true;
                out.push((to, ring));
                next.push(to);
            }
        }
        if next.is_empty() {
            break;
        }
        frontier = next;
    }

    trace!(%from, move_budget, reached = out.len(), "flood fill");
    out
}

/// Empty squares the piece on `from` can move to with `move_budget` steps.
pub fn get_moves(board: &Board, from: Square, move_budget: u8) -> Vec<Square> {
    reach(board, from, move_budget)
        .into_iter()
        .map(|(sq, _)| sq)
        .collect()
}

/// Inclusive row and column bounds of the attack box, clamped to the board.
fn attack_box(piece: &Piece, from: Square) -> (u8, u8, u8, u8) {
    let (r, c) = (from.row as i8, from.col as i8);
    let max = BOARD_SIZE as i8 - 1;
    let clamp = |v: i8| v.clamp(0, max) as u8;

    if piece.kind == PieceKind::Pawn {
        // Forward row only; a pawn on the far edge has an empty box.
        let row = r + piece.side.forward();
        if !(0..=max).contains(&row) {
            return (1, 0, 1, 0);
        }
        return (row as u8, row as u8, clamp(c - 1), clamp(c + 1));
    }

    let range = if piece.kind.is_ranged() {
        piece.move_budget.max(1) as i8
    } else {
        1
    };
    (
        clamp(r - range),
        clamp(r + range),
        clamp(c - range),
        clamp(c + range),
    )
}

/// Every square in the attack box of the piece on `from`, occupied or not.
pub fn get_attackable_range(board: &Board, from: Square) -> Vec<Square> {
    let piece = match board.piece_at(from) {
        Some(p) => p,
        None => return Vec::new(),
    };
    let (r0, r1, c0, c1) = attack_box(piece, from);
    let mut out = Vec::new();
    for row in r0..=r1 {
        for col in c0..=c1 {
            let sq = Square { row, col };
            if sq != from {
                out.push(sq);
            }
        }
    }
    out
}

/// Enemy-occupied squares inside the attack box of the piece on `from`.
pub fn get_attackable(board: &Board, from: Square) -> Vec<Square> {
    let piece = match board.piece_at(from) {
        Some(p) => *p,
        None => return Vec::new(),
    };
    get_attackable_range(board, from)
        .into_iter()
        .filter(|&sq| board.piece_at(sq).is_some_and(|t| t.is_enemy_of(&piece)))
        .collect()
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
