use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

pub const BOARD_SIZE: u8 = 8;
pub const NUM_SQUARES: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::White, Side::Black];

    pub fn other(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }
    /// Sign carried by piece codes and corp ids of this side.
    pub fn sign(self) -> i8 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }
    /// Row delta of a pawn step. White starts on rows 0-1 and advances upward.
    pub fn forward(self) -> i8 {
        self.sign()
    }
    pub fn from_sign(value: i8) -> Option<Side> {
        match value.signum() {
            1 => Some(Side::White),
            -1 => Some(Side::Black),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "white"),
            Side::Black => write!(f, "black"),
        }
    }
}

/// Piece kinds, numbered by their magnitude in signed piece codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn = 1,
    Rook = 2,
    Bishop = 3,
    Knight = 4,
    Queen = 5,
    King = 6,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Queen,
        PieceKind::King,
    ];

    pub fn magnitude(self) -> u8 {
        self as u8
    }

    /// Zero-based index in magnitude order (pawn = 0 .. king = 5).
    pub fn idx(self) -> usize {
        self as usize - 1
    }

    pub fn from_magnitude(magnitude: u8) -> Option<PieceKind> {
        match magnitude {
            1 => Some(PieceKind::Pawn),
            2 => Some(PieceKind::Rook),
            3 => Some(PieceKind::Bishop),
            4 => Some(PieceKind::Knight),
            5 => Some(PieceKind::Queen),
            6 => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Kinds that lead a corp.
    pub fn commands(self) -> bool {
        matches!(self, PieceKind::King | PieceKind::Bishop)
    }

    /// Kinds whose attack box grows with their move budget.
    pub fn is_ranged(self) -> bool {
        matches!(self, PieceKind::Rook | PieceKind::Knight)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    pub fn new(row: u8, col: u8) -> EngineResult<Square> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Ok(Square { row, col })
        } else {
            Err(EngineError::OutOfRange {
                what: "square",
                value: i32::from(row) * 8 + i32::from(col),
            })
        }
    }

    /// Literal square for setups and tests. Panics off the board.
    pub const fn at(row: u8, col: u8) -> Square {
        assert!(row < BOARD_SIZE && col < BOARD_SIZE, "square off the board");
        Square { row, col }
    }

    pub fn checked(row: i8, col: i8) -> Option<Square> {
        if (0..BOARD_SIZE as i8).contains(&row) && (0..BOARD_SIZE as i8).contains(&col) {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    pub fn idx(self) -> usize {
        self.row as usize * BOARD_SIZE as usize + self.col as usize
    }

    pub fn from_idx(idx: usize) -> Square {
        Square {
            row: (idx / BOARD_SIZE as usize) as u8,
            col: (idx % BOARD_SIZE as usize) as u8,
        }
    }

    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Square> {
        Square::checked(self.row as i8 + d_row, self.col as i8 + d_col)
    }

    pub fn distance(self, other: Square) -> f64 {
        let dr = f64::from(self.row) - f64::from(other.row);
        let dc = f64::from(self.col) - f64::from(other.col);
        (dr * dr + dc * dc).sqrt()
    }

    /// All 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..NUM_SQUARES).map(Square::from_idx)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col) as char;
        write!(f, "{}{}", file, self.row + 1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
    /// Steps this piece may still travel in one action.
    pub move_budget: u8,
    pub default_move_budget: u8,
    /// Signed corp id; the sign always matches `side`.
    pub corp_id: i8,
    pub is_commander: bool,
    /// Corp the piece was handed over from, 0 when it never changed hands.
    pub delegation_id: i8,
    pub has_moved: bool,
    /// Back-reference kept in sync by the board.
    pub position: Square,
}

impl Piece {
    /// A fresh piece. `corp` is the unsigned corp number; the side's sign is
    /// applied here. Numbers above `i8::MAX` are clamped.
    pub fn new(kind: PieceKind, side: Side, corp: u8, move_budget: u8) -> Self {
        Self {
            kind,
            side,
            move_budget,
            default_move_budget: move_budget,
            corp_id: side.sign() * corp.min(i8::MAX as u8) as i8,
            is_commander: kind.commands(),
            delegation_id: 0,
            has_moved: false,
            position: Square::at(0, 0),
        }
    }

    /// Signed piece code: magnitude is the kind, sign is the side.
    pub fn code(&self) -> i8 {
        self.side.sign() * self.kind.magnitude() as i8
    }

    pub fn is_enemy_of(&self, other: &Piece) -> bool {
        self.side != other.side
    }
}

/// Decodes a signed piece code into its side and kind. 0 is an empty square.
pub fn decode_piece(code: i8) -> EngineResult<Option<(Side, PieceKind)>> {
    if code == 0 {
        return Ok(None);
    }
    let kind = PieceKind::from_magnitude(code.unsigned_abs()).ok_or(EngineError::OutOfRange {
        what: "piece code",
        value: i32::from(code),
    })?;
    let side = if code > 0 { Side::White } else { Side::Black };
    Ok(Some((side, kind)))
}
