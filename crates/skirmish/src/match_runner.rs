//! Match runner for playing games between agents

use std::path::{Path, PathBuf};

use corps_core::{
    Action, ActionOutcome, Actor, Board, GameConfig, PlayerConfig, PlayerKind, RandDice,
    StepOutcome, TurnController,
};
use heuristic_agent::{HeuristicAgent, HeuristicConfig};
use random_agent::RandomAgent;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{SkirmishError, SkirmishResult};
use crate::results::{GameRecord, MatchReport};

/// Keeps the black agent's random stream apart from the dice and the white agent.
const BLACK_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Configuration for a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Number of games to play
    pub games: u32,
    /// Turns per game before the game is scored a draw
    pub max_turns: u32,
    /// Base seed; game `n` plays with `seed + n`. Unset means fresh entropy.
    pub seed: Option<u64>,
    /// Whether the players swap colours every other game
    pub alternate_colors: bool,
    /// Print progress during the match
    pub verbose: bool,
    /// Where to write the JSON report
    pub results_path: Option<PathBuf>,
    /// Directory for per-game final positions
    pub snapshot_dir: Option<PathBuf>,
    /// Rules and seats; `game.white` is the first player
    pub game: GameConfig,
    pub heuristic: HeuristicConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            games: 10,
            max_turns: 200,
            seed: None,
            alternate_colors: true,
            verbose: true,
            results_path: None,
            snapshot_dir: None,
            game: GameConfig {
                white: PlayerConfig::new("heuristic", PlayerKind::Heuristic),
                black: PlayerConfig::new("random", PlayerKind::Random),
                ..GameConfig::default()
            },
            heuristic: HeuristicConfig::default(),
        }
    }
}

impl MatchConfig {
    pub fn from_toml_str(text: &str) -> SkirmishResult<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> SkirmishResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> SkirmishResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn game_seed(&self, index: u32) -> Option<u64> {
        self.seed.map(|s| s.wrapping_add(u64::from(index)))
    }
}

/// Builds the agent for a seat. Human seats cannot take part in a match.
pub fn create_actor(
    player: &PlayerConfig,
    heuristic: &HeuristicConfig,
    seed: Option<u64>,
) -> SkirmishResult<Box<dyn Actor>> {
    match player.kind {
        PlayerKind::Human => Err(SkirmishError::NeedsHumanInput(player.name.clone())),
        PlayerKind::Heuristic => Ok(Box::new(HeuristicAgent::with_config(heuristic.clone()))),
        PlayerKind::Random => Ok(Box::new(match seed {
            Some(s) => RandomAgent::with_seed(s),
            None => RandomAgent::new(),
        })),
    }
}

/// Runs matches between the two configured agents
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Run every game of the match, reporting from the first player's perspective
    pub fn run_match(&self) -> SkirmishResult<MatchReport> {
        let mut report = MatchReport::new(&self.config);
        info!(
            first = %report.first,
            second = %report.second,
            games = self.config.games,
            "match started"
        );

        for index in 0..self.config.games {
            let first_white = !self.config.alternate_colors || index % 2 == 0;
            let record = self.play_game(index, first_white)?;
            let (outcome, turns) = (record.outcome_str(), record.turns);
            report.add_game(record);

            if self.config.verbose {
                let color = if first_white { "W" } else { "B" };
                println!(
                    "Game {}/{}: {} ({}) after {} turns - Score: {}-{}-{}",
                    index + 1,
                    self.config.games,
                    outcome,
                    color,
                    turns,
                    report.result.wins,
                    report.result.losses,
                    report.result.draws
                );
            }
        }

        if let Some(path) = &self.config.results_path {
            report.save(path)?;
        }
        if let Some(dir) = &self.config.snapshot_dir {
            report.save_snapshots(dir)?;
        }
        Ok(report)
    }

    /// Play game `index` (0-based) of the match
    pub fn play_game(&self, index: u32, first_white: bool) -> SkirmishResult<GameRecord> {
        let mut game = self.config.game.clone();
        if !first_white {
            std::mem::swap(&mut game.white, &mut game.black);
        }
        let seed = self.config.game_seed(index);
        let white = create_actor(&game.white, &self.config.heuristic, seed)?;
        let black = create_actor(
            &game.black,
            &self.config.heuristic,
            seed.map(|s| s ^ BLACK_SEED_SALT),
        )?;
        let mut dice = match seed {
            Some(s) => RandDice::seeded(s),
            None => RandDice::from_entropy(),
        };

        let board = Board::standard_with(&game.budgets);
        let (white_name, black_name) = (game.white.name.clone(), game.black.name.clone());
        let mut controller = TurnController::new(game, board, white, black);
        let actions = drive(&mut controller, &mut dice, self.config.max_turns)?;

        let winner = controller.winner();
        info!(
            game = index + 1,
            winner = ?winner,
            turns = controller.turn_number(),
            actions,
            "game finished"
        );
        Ok(GameRecord {
            number: index + 1,
            white: white_name,
            black: black_name,
            first_player_white: first_white,
            winner,
            turns: controller.turn_number(),
            actions,
            seed,
            final_position: controller.board().to_grids(),
        })
    }
}

/// Steps the controller until a king falls or `max_turns` is exceeded.
/// Returns the number of actions performed.
fn drive(
    controller: &mut TurnController,
    dice: &mut RandDice,
    max_turns: u32,
) -> SkirmishResult<u32> {
    let mut actions = 0;
    while controller.turn_number() <= max_turns {
        match controller.step(dice) {
            Ok(StepOutcome::GameOver(_)) => break,
            Ok(StepOutcome::Performed(report)) => {
                if report.action != Action::EndTurn {
                    actions += 1;
                }
                if let ActionOutcome::Captured(piece) = report.outcome {
                    debug!(side = %report.side, captured = piece.code(), "capture");
                }
            }
            Ok(StepOutcome::TurnSkipped(side)) => debug!(%side, "turn skipped"),
            Ok(StepOutcome::Awaiting(side)) => {
                return Err(SkirmishError::NeedsHumanInput(
                    controller.actor_name(side).to_string(),
                ))
            }
            Err(err) => {
                // The agent proposed something illegal; it forfeits the rest of its turn.
                let side = controller.side_to_move();
                warn!(%side, %err, "agent action rejected");
                controller.perform(Action::EndTurn, dice)?;
            }
        }
    }
    Ok(actions)
}

/// Quick utility to run a seeded match without printing or saving
pub fn quick_match(
    first: PlayerKind,
    second: PlayerKind,
    games: u32,
    seed: u64,
) -> SkirmishResult<MatchReport> {
    let mut config = MatchConfig {
        games,
        seed: Some(seed),
        verbose: false,
        ..MatchConfig::default()
    };
    config.game.white = PlayerConfig::new(&format!("{first:?}").to_lowercase(), first);
    config.game.black = PlayerConfig::new(&format!("{second:?}").to_lowercase(), second);
    MatchRunner::new(config).run_match()
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
