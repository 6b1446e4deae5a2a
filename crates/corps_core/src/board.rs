use std::collections::BTreeMap;

use crate::config::MoveBudgets;
use crate::movegen::{get_attackable, get_moves};
use crate::types::*;

/// Per-cell scratch markers for host highlighting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellFlags {
    pub visited: bool,
    pub movable: bool,
    pub attackable: bool,
}

/// Members of every corp, keyed by signed corp id.
///
/// Derived from the squares; member lists stay sorted so the index is a pure
/// function of the board.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CorpIndex {
    members: BTreeMap<i8, Vec<Square>>,
}

impl CorpIndex {
    pub fn build(squares: &[Option<Piece>; NUM_SQUARES]) -> Self {
        let mut members: BTreeMap<i8, Vec<Square>> = BTreeMap::new();
        for (i, slot) in squares.iter().enumerate() {
            if let Some(pc) = slot {
                members.entry(pc.corp_id).or_default().push(Square::from_idx(i));
            }
        }
        Self { members }
    }

    pub fn members(&self, corp_id: i8) -> &[Square] {
        self.members.get(&corp_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn corp_ids(&self) -> impl Iterator<Item = i8> + '_ {
        self.members.keys().copied()
    }

    fn relocate(&mut self, corp_id: i8, from: Square, to: Square) {
        if let Some(list) = self.members.get_mut(&corp_id) {
            if let Some(slot) = list.iter_mut().find(|s| **s == from) {
                *slot = to;
            }
            list.sort();
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    pub(crate) squares: [Option<Piece>; NUM_SQUARES],
    flags: [CellFlags; NUM_SQUARES],
    pub(crate) corps: CorpIndex,
    /// Codes of lost pieces, indexed by the side that lost them.
    pub(crate) captured: [Vec<i8>; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Board {
            squares: [None; NUM_SQUARES],
            flags: [CellFlags::default(); NUM_SQUARES],
            corps: CorpIndex::default(),
            captured: [Vec::new(), Vec::new()],
        }
    }

    pub fn standard() -> Self {
        Self::standard_with(&MoveBudgets::default())
    }

    /// Classical opening layout split into three corps per side:
    /// files a-c under the c-file bishop, d-e under the king, f-h under the
    /// f-file bishop.
    pub fn standard_with(budgets: &MoveBudgets) -> Self {
        let mut b = Board::empty();
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for side in Side::BOTH {
            let (home, pawns) = match side {
                Side::White => (0, 1),
                Side::Black => (7, 6),
            };
            for col in 0..BOARD_SIZE {
                let corp = corp_for_file(col);
                let kind = back[col as usize];
                b.put(
                    Square::at(home, col),
                    Piece::new(kind, side, corp, budgets.for_kind(kind)),
                );
                b.put(
                    Square::at(pawns, col),
                    Piece::new(PieceKind::Pawn, side, corp, budgets.pawn),
                );
            }
        }
        b.rebuild_corps();
        b
    }

    /// Independent deep copy for speculative probing. Never aliases `self`.
    pub fn virtual_copy(&self) -> Board {
        self.clone()
    }

    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.squares[sq.idx()].as_ref()
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.squares[sq.idx()].is_none()
    }

    /// Places `piece` on `sq`, returning whatever stood there.
    pub fn place(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        let prev = self.put(sq, piece);
        self.rebuild_corps();
        prev
    }

    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        let prev = self.squares[sq.idx()].take();
        if prev.is_some() {
            self.rebuild_corps();
        }
        prev
    }

    fn put(&mut self, sq: Square, mut piece: Piece) -> Option<Piece> {
        piece.position = sq;
        self.squares[sq.idx()].replace(piece)
    }

    /// Moves the record on `from` to the empty `to`, keeping the back-reference
    /// and the corp index in step.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) {
        if let Some(mut pc) = self.squares[from.idx()].take() {
            pc.position = to;
            self.corps.relocate(pc.corp_id, from, to);
            self.squares[to.idx()] = Some(pc);
        }
    }

    pub(crate) fn piece_mut(&mut self, sq: Square) -> Option<&mut Piece> {
        self.squares[sq.idx()].as_mut()
    }

    pub(crate) fn rebuild_corps(&mut self) {
        self.corps = CorpIndex::build(&self.squares);
    }

    pub fn corps(&self) -> &CorpIndex {
        &self.corps
    }

    pub fn corp_members(&self, corp_id: i8) -> &[Square] {
        self.corps.members(corp_id)
    }

    pub fn commander_of(&self, corp_id: i8) -> Option<Square> {
        self.corp_members(corp_id)
            .iter()
            .copied()
            .find(|&s| self.piece_at(s).is_some_and(|p| p.is_commander))
    }

    /// Occupied squares with their pieces, row-major.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, &Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|p| (Square::from_idx(i), p)))
    }

    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = (Square, &Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.side == side)
    }

    pub fn king_square(&self, side: Side) -> Option<Square> {
        self.pieces_of(side)
            .find(|(_, p)| p.kind == PieceKind::King)
            .map(|(s, _)| s)
    }

    /// Corp led by the side's king, if the king is alive.
    pub fn king_corp(&self, side: Side) -> Option<i8> {
        self.king_square(side)
            .and_then(|s| self.piece_at(s))
            .map(|p| p.corp_id)
    }

    pub fn captured(&self, side: Side) -> &[i8] {
        &self.captured[side.idx()]
    }

    /// Files a lost piece into its owner's captured list.
    pub fn record_capture(&mut self, piece: &Piece) {
        self.captured[piece.side.idx()].push(piece.code());
    }

    pub fn flags(&self, sq: Square) -> CellFlags {
        self.flags[sq.idx()]
    }

    pub fn clear_flags(&mut self) {
        self.flags = [CellFlags::default(); NUM_SQUARES];
    }

    /// Refreshes the flag grid with the options of the piece on `from`.
    pub fn mark_options(&mut self, from: Square) {
        self.clear_flags();
        let budget = match self.piece_at(from) {
            Some(pc) => pc.move_budget,
            None => return,
        };
        self.flags[from.idx()].visited = true;
        for to in get_moves(self, from, budget) {
            let cell = &mut self.flags[to.idx()];
            cell.visited = true;
            cell.movable = true;
        }
        for to in get_attackable(self, from) {
            self.flags[to.idx()].attackable = true;
        }
    }
}

/// Corp number of a file in the standard layout.
pub fn corp_for_file(col: u8) -> u8 {
    match col {
        0..=2 => 1,
        3 | 4 => 2,
        _ => 3,
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
