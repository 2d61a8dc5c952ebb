//! Puzzle core
//!
//! Everything that decides what the player sees and whether they got it
//! right. Pure and deterministic:
//! - Randomness only through an injected `Rng` (seeded `Pcg32` in sessions)
//! - No rendering, audio or platform dependencies
//! - No global state; a `GameSession` owns one game

pub mod attempt;
pub mod generator;
pub mod round;
pub mod session;
pub mod solver;

pub use attempt::{Attempt, Outcome, Pick};
pub use generator::{generate_round, generate_with_params, split_sum};
pub use round::{Operation, Round};
pub use session::{Command, GameSession, Phase, SessionEvent};
