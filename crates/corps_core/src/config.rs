//! Game configuration handed to the turn controller at construction.

use serde::{Deserialize, Serialize};

use crate::types::{PieceKind, Side};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    Human,
    Heuristic,
    Random,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub name: String,
    pub kind: PlayerKind,
}

impl PlayerConfig {
    pub fn new(name: &str, kind: PlayerKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
        }
    }
}

/// Default step budget of each piece kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveBudgets {
    pub pawn: u8,
    pub rook: u8,
    pub bishop: u8,
    pub knight: u8,
    pub queen: u8,
    pub king: u8,
}

impl Default for MoveBudgets {
    fn default() -> Self {
        Self {
            pawn: 1,
            rook: 2,
            bishop: 2,
            knight: 4,
            queen: 3,
            king: 3,
        }
    }
}

impl MoveBudgets {
    pub fn for_kind(&self, kind: PieceKind) -> u8 {
        match kind {
            PieceKind::Pawn => self.pawn,
            PieceKind::Rook => self.rook,
            PieceKind::Bishop => self.bishop,
            PieceKind::Knight => self.knight,
            PieceKind::Queen => self.queen,
            PieceKind::King => self.king,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub white: PlayerConfig,
    pub black: PlayerConfig,
    /// Actions a side may spend per turn before play passes.
    pub actions_per_turn: u8,
    /// Cost of an action performed by a commander in person.
    pub command_cost: u8,
    /// Budget taken from the capturing side's next turn when it kills a commander.
    pub commander_loss_penalty: u8,
    pub budgets: MoveBudgets,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            white: PlayerConfig::new("White", PlayerKind::Human),
            black: PlayerConfig::new("Black", PlayerKind::Heuristic),
            actions_per_turn: 3,
            command_cost: 2,
            commander_loss_penalty: 2,
            budgets: MoveBudgets::default(),
        }
    }
}

impl GameConfig {
    pub fn player(&self, side: Side) -> &PlayerConfig {
        match side {
            Side::White => &self.white,
            Side::Black => &self.black,
        }
    }
}
