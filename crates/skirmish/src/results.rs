//! Match results storage and reporting

use std::path::Path;

use corps_core::{BoardGrids, Side};
use serde::{Deserialize, Serialize};

use crate::error::SkirmishResult;
use crate::match_runner::MatchConfig;

/// Result of a single game from one player's point of view
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

impl GameResult {
    /// Result for `side` given the game's winner (`None` when the turn limit hit first).
    pub fn for_side(winner: Option<Side>, side: Side) -> Self {
        match winner {
            Some(w) if w == side => GameResult::Win,
            Some(_) => GameResult::Loss,
            None => GameResult::Draw,
        }
    }
}

/// Tally of a match from the first player's perspective
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: GameResult) {
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.draws += 1,
        }
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// 1 for a win, 0.5 for a draw, 0 for a loss
    pub fn score(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total
    }
}

/// One finished game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// 1-based game number within the match
    pub number: u32,
    pub white: String,
    pub black: String,
    /// Whether the match's first player had white this game
    pub first_player_white: bool,
    pub winner: Option<Side>,
    pub turns: u32,
    pub actions: u32,
    pub seed: Option<u64>,
    pub final_position: BoardGrids,
}

impl GameRecord {
    pub fn first_player_result(&self) -> GameResult {
        let side = if self.first_player_white {
            Side::White
        } else {
            Side::Black
        };
        GameResult::for_side(self.winner, side)
    }

    pub fn outcome_str(&self) -> &'static str {
        match self.winner {
            Some(Side::White) => "1-0",
            Some(Side::Black) => "0-1",
            None => "1/2",
        }
    }
}

/// Complete match report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub first: String,
    pub second: String,
    pub result: MatchResult,
    pub games: Vec<GameRecord>,
    /// Configuration used
    pub config: MatchConfig,
}

impl MatchReport {
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            first: config.game.white.name.clone(),
            second: config.game.black.name.clone(),
            result: MatchResult::new(),
            games: Vec::new(),
            config: config.clone(),
        }
    }

    pub fn add_game(&mut self, record: GameRecord) {
        self.result.record(record.first_player_result());
        self.games.push(record);
    }

    /// Save the report to a JSON file
    pub fn save(&self, path: &Path) -> SkirmishResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a report from a JSON file
    pub fn load(path: &Path) -> SkirmishResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Writes each game's final position to `dir/game_NNN.json`.
    pub fn save_snapshots(&self, dir: &Path) -> SkirmishResult<()> {
        std::fs::create_dir_all(dir)?;
        for game in &self.games {
            let json = serde_json::to_string_pretty(&game.final_position)?;
            std::fs::write(dir.join(format!("game_{:03}.json", game.number)), json)?;
        }
        Ok(())
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Match: {} vs {} ===\n\n", self.first, self.second));
        report.push_str(&format!(
            "Config: {} games, {} turns max, seed {}\n\n",
            self.config.games,
            self.config.max_turns,
            self.config
                .seed
                .map_or_else(|| "random".to_string(), |s| s.to_string())
        ));

        report.push_str(&format!(
            "{:>4}  {:<16} {:<16} {:>6} {:>6} {:>8}\n",
            "#", "White", "Black", "Result", "Turns", "Actions"
        ));
        report.push_str(&"-".repeat(62));
        report.push('\n');
        for game in &self.games {
            report.push_str(&format!(
                "{:>4}  {:<16} {:<16} {:>6} {:>6} {:>8}\n",
                game.number,
                game.white,
                game.black,
                game.outcome_str(),
                game.turns,
                game.actions
            ));
        }

        report.push_str(&format!(
            "\n{}: {} wins, {} losses, {} draws (score {:.1}%)\n",
            self.first,
            self.result.wins,
            self.result.losses,
            self.result.draws,
            self.result.score() * 100.0
        ));
        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod results_tests;
