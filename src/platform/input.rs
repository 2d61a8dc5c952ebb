//! Keyboard and pointer mapping
//!
//! Raw browser input becomes a `Command` here so the session never sees
//! event objects.

use glam::Vec2;

use crate::consts::MAX_PIECES;
use crate::layout::PieceLayout;
use crate::puzzle::Command;

/// Map a `KeyboardEvent.key` value to a command.
///
/// Digits select pieces by their 1-based label. `Restart` carries seed 0;
/// the caller supplies a fresh seed before applying it.
pub fn map_key(key: &str) -> Option<Command> {
    match key {
        "Backspace" | "z" | "Z" => Some(Command::Undo),
        "Escape" | "c" | "C" => Some(Command::Clear),
        "h" | "H" | "?" => Some(Command::Hint),
        "Enter" | " " => Some(Command::NextRound),
        "r" | "R" => Some(Command::Restart(0)),
        _ => {
            let digit = key.parse::<usize>().ok()?;
            (1..=MAX_PIECES)
                .contains(&digit)
                .then(|| Command::Select(digit - 1))
        }
    }
}

/// Map a click at canvas coordinates to a piece selection
pub fn map_click(layout: &PieceLayout, pos: Vec2) -> Option<Command> {
    layout.hit_test(pos).map(Command::Select)
}
