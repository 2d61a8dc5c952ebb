//! Game session state and command handling
//!
//! One `GameSession` owns everything a running game needs: the seeded RNG,
//! the active round and attempt, score and lives. The presentation layer
//! feeds it `Command`s and reacts to the returned `SessionEvent`s.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::attempt::{Attempt, Outcome};
use super::generator::generate_round;
use super::round::Round;
use super::solver;
use crate::error::SelectError;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Round active, accepting selections
    Playing,
    /// Target reached; waiting for `NextRound`
    Solved,
    /// Out of lives
    GameOver,
}

/// Player intents, already mapped from raw input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Select(usize),
    Undo,
    Clear,
    Hint,
    NextRound,
    Restart(u64),
}

/// What happened in response to a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Picked { index: usize, total: i64 },
    Solved { points: u64, total_score: u64 },
    /// Went past the target; the attempt was cleared
    Overshot { total: i64, lives_left: u8 },
    GameOver { score: u64, rounds_cleared: u32 },
    Undone { index: usize, total: i64 },
    NothingToUndo,
    Cleared,
    Hinted { index: usize },
    NoHint,
    RoundStarted { round_index: u32, difficulty: u32 },
    /// Selection refused; nothing changed
    Rejected(SelectError),
    /// Command does not apply in the current phase
    Ignored,
}

/// A single player's game
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Seed of the current run
    pub seed: u64,
    rng: Pcg32,
    tuning: Tuning,
    start_difficulty: u32,
    round: Round,
    attempt: Attempt,
    /// Rounds started so far in this run (0-based index of the current one)
    pub round_index: u32,
    pub rounds_cleared: u32,
    pub difficulty: u32,
    pub score: u64,
    /// Consecutive rounds solved without an overshoot
    pub streak: u32,
    pub best_streak: u32,
    pub lives: u8,
    pub phase: Phase,
    hint_used: bool,
    overshot_this_round: bool,
}

impl GameSession {
    pub fn new(seed: u64, tuning: Tuning, start_difficulty: u32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let round = generate_round(&tuning, start_difficulty, &mut rng);
        let attempt = Attempt::new(&round);
        log::info!(
            "Session started: seed={} difficulty={} target={}",
            seed,
            start_difficulty,
            round.target
        );
        Self {
            seed,
            rng,
            lives: tuning.lives,
            tuning,
            start_difficulty,
            round,
            attempt,
            round_index: 0,
            rounds_cleared: 0,
            difficulty: start_difficulty,
            score: 0,
            streak: 0,
            best_streak: 0,
            phase: Phase::Playing,
            hint_used: false,
            overshot_this_round: false,
        }
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn attempt(&self) -> &Attempt {
        &self.attempt
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Apply one command and report what happened
    pub fn apply(&mut self, command: Command) -> SessionEvent {
        match command {
            Command::Restart(seed) => self.restart(seed),
            _ if self.phase == Phase::GameOver => SessionEvent::Ignored,
            Command::Select(index) => self.select(index),
            Command::Undo => self.undo(),
            Command::Clear => self.clear(),
            Command::Hint => self.hint(),
            Command::NextRound => self.next_round(),
        }
    }

    fn select(&mut self, index: usize) -> SessionEvent {
        if self.phase != Phase::Playing {
            return SessionEvent::Ignored;
        }

        match self.attempt.add_piece(&self.round, index) {
            Ok(Outcome::Continue) => SessionEvent::Picked {
                index,
                total: self.attempt.running_total(),
            },
            Ok(Outcome::Exact) => self.solve(),
            Ok(Outcome::Over) => self.overshoot(),
            Err(err) => {
                log::debug!("Selection ignored: {}", err);
                SessionEvent::Rejected(err)
            }
        }
    }

    fn solve(&mut self) -> SessionEvent {
        if !self.overshot_this_round {
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
        }

        let level_points = self
            .tuning
            .base_points
            .saturating_mul(self.difficulty as u64 + 1);
        let streak_points = self
            .tuning
            .streak_bonus
            .saturating_mul(self.streak.saturating_sub(1) as u64);
        let mut points = level_points.saturating_add(streak_points);
        if self.hint_used {
            points /= 2;
        }
        self.score = self.score.saturating_add(points);
        self.phase = Phase::Solved;

        log::info!(
            "Round {} solved with {} (+{} points, score {})",
            self.round_index + 1,
            self.attempt.equation(),
            points,
            self.score
        );
        SessionEvent::Solved {
            points,
            total_score: self.score,
        }
    }

    fn overshoot(&mut self) -> SessionEvent {
        let total = self.attempt.running_total();
        self.attempt.clear();
        self.streak = 0;
        self.overshot_this_round = true;
        self.lives = self.lives.saturating_sub(1);

        if self.lives == 0 {
            self.phase = Phase::GameOver;
            log::info!(
                "Game over: score={} rounds_cleared={}",
                self.score,
                self.rounds_cleared
            );
            return SessionEvent::GameOver {
                score: self.score,
                rounds_cleared: self.rounds_cleared,
            };
        }

        log::info!("Overshot to {} ({} lives left)", total, self.lives);
        SessionEvent::Overshot {
            total,
            lives_left: self.lives,
        }
    }

    fn undo(&mut self) -> SessionEvent {
        if self.phase != Phase::Playing {
            return SessionEvent::Ignored;
        }
        match self.attempt.remove_last() {
            Some(pick) => SessionEvent::Undone {
                index: pick.index,
                total: self.attempt.running_total(),
            },
            None => SessionEvent::NothingToUndo,
        }
    }

    fn clear(&mut self) -> SessionEvent {
        if self.phase != Phase::Playing {
            return SessionEvent::Ignored;
        }
        self.attempt.clear();
        SessionEvent::Cleared
    }

    fn hint(&mut self) -> SessionEvent {
        if self.phase != Phase::Playing {
            return SessionEvent::Ignored;
        }
        match solver::hint(&self.round, &self.attempt) {
            Some(index) => {
                self.hint_used = true;
                SessionEvent::Hinted { index }
            }
            None => SessionEvent::NoHint,
        }
    }

    fn next_round(&mut self) -> SessionEvent {
        if self.phase != Phase::Solved {
            return SessionEvent::Ignored;
        }
        self.rounds_cleared += 1;
        self.round_index += 1;
        self.difficulty = self
            .tuning
            .difficulty_after(self.start_difficulty, self.rounds_cleared);
        self.begin_round();
        SessionEvent::RoundStarted {
            round_index: self.round_index,
            difficulty: self.difficulty,
        }
    }

    fn restart(&mut self, seed: u64) -> SessionEvent {
        log::info!("Restarting with seed {}", seed);
        *self = Self::new(seed, self.tuning.clone(), self.start_difficulty);
        SessionEvent::RoundStarted {
            round_index: 0,
            difficulty: self.difficulty,
        }
    }

    fn begin_round(&mut self) {
        self.round = generate_round(&self.tuning, self.difficulty, &mut self.rng);
        self.attempt = Attempt::new(&self.round);
        self.phase = Phase::Playing;
        self.hint_used = false;
        self.overshot_this_round = false;
        log::info!(
            "Round {} (difficulty {}): {}",
            self.round_index + 1,
            self.difficulty,
            self.round.prompt()
        );
    }

    /// Play the current round to completion using the solver (demo/idle mode)
    pub fn autoplay_round(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while self.phase == Phase::Playing {
            let command = match solver::hint(&self.round, &self.attempt) {
                Some(index) => Command::Select(index),
                None if self.attempt.is_empty() => break,
                None => Command::Clear,
            };
            events.push(self.apply(command));
        }
        events
    }
}
