pub mod board;
pub mod combat;
pub mod config;
pub mod error;
pub mod grids;
pub mod movegen;
pub mod mutation;
pub mod turn;
pub mod types;

// Re-export the rules surface
pub use board::*;
pub use combat::*;
pub use config::*;
pub use error::*;
pub use grids::*;
pub use movegen::*;
pub use mutation::*;
pub use turn::*;
pub use types::*;

// =============================================================================
// Actor trait: implemented by every player, human adapter and agents alike
// =============================================================================

/// Capability every player offers the turn controller.
///
/// The controller does not care whether a person or an agent sits behind it:
/// agents answer immediately, the human adapter answers `None` and the host
/// supplies the action later through `TurnController::perform`.
pub trait Actor: Send {
    /// Picks the next action for `side` on `board`, or `None` while waiting
    /// on external input.
    ///
    /// The board is only borrowed for the call; implementations must not keep
    /// it. Probing has to happen on `Board::virtual_copy`.
    fn decide_next_action(&mut self, board: &Board, side: Side) -> Option<Action>;

    /// Display name for logs and results.
    fn name(&self) -> &str;

    /// Reset internal state for a new game.
    fn new_game(&mut self) {}
}
