//! Skirmish: match harness for corps chess agents
//!
//! This crate provides infrastructure for:
//! - Playing agent-vs-agent games through the turn controller with seeded dice
//! - Recording per-game results and final positions
//! - Loading match settings from TOML and saving reports as JSON
//!
//! # Usage
//!
//! ```bash
//! # Ten games, heuristic against random, reproducible
//! cargo run -p skirmish -- play --white heuristic --black random --games 10 --seed 7
//!
//! # Write a starter config, edit it, then play from it
//! cargo run -p skirmish -- config skirmish.toml
//! cargo run -p skirmish -- play --config skirmish.toml
//! ```

mod error;
mod match_runner;
mod results;

pub use error::*;
pub use match_runner::*;
pub use results::*;
