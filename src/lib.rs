//! Tally Tiles - a make-the-number arithmetic game
//!
//! Core modules:
//! - `puzzle`: Deterministic core (round generation, validation, sessions)
//! - `tuning`: Data-driven game balance and skin presets
//! - `renderer`: Canvas 2D drawing and HUD text
//! - `audio`: Oscillator sound effects
//! - `platform`: Browser/native input and storage abstraction

pub mod audio;
pub mod error;
pub mod highscores;
pub mod layout;
pub mod platform;
pub mod puzzle;
pub mod renderer;
pub mod settings;
pub mod tuning;

pub use error::{ConfigError, SelectError};
pub use highscores::HighScores;
pub use puzzle::{Attempt, GameSession, Outcome, Round, generate_round};
pub use settings::Settings;
pub use tuning::{Skin, Tuning};

/// Game configuration constants
pub mod consts {
    /// Canvas size in CSS pixels
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Pieces are selectable with keys 1-9
    pub const MAX_PIECES: usize = 9;

    /// Piece circle radius and spacing
    pub const PIECE_RADIUS: f32 = 48.0;
    pub const PIECE_GAP: f32 = 24.0;

    /// Pause after a solve before the next round appears
    pub const NEXT_ROUND_DELAY_MS: f64 = 1500.0;
    /// How long feedback messages stay on screen
    pub const FEEDBACK_MS: f64 = 2000.0;
}

/// Clamp a signed difficulty (e.g. from JS or a URL) to a valid level
#[inline]
pub fn clamp_difficulty(raw: i64) -> u32 {
    raw.clamp(0, u32::MAX as i64) as u32
}
