//! Screen text and piece styling derived from the session

use crate::consts::FEEDBACK_MS;
use crate::puzzle::{GameSession, Phase, SessionEvent};
use crate::tuning::Skin;

/// How a piece should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceStyle {
    Available,
    /// Already in the attempt; drawn dimmed with its pick order
    Chosen { order: usize },
    /// Suggested by the last hint
    Hinted,
}

/// Color family of a feedback message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Good,
    Bad,
    Neutral,
}

impl Mood {
    pub fn color(&self, high_contrast: bool) -> &'static str {
        match (self, high_contrast) {
            (Mood::Good, false) => "#2a9d8f",
            (Mood::Bad, false) => "#e76f51",
            (Mood::Neutral, false) => "#264653",
            (Mood::Good, true) => "#006400",
            (Mood::Bad, true) => "#b00000",
            (Mood::Neutral, true) => "#000000",
        }
    }
}

/// A short message shown after an event
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub text: String,
    pub mood: Mood,
    /// Timestamp (ms) after which the message is hidden
    pub until: f64,
}

impl Feedback {
    /// Message for an event, if it deserves one
    pub fn for_event(event: &SessionEvent, skin: Skin, now: f64) -> Option<Self> {
        let (text, mood) = match event {
            SessionEvent::Solved { points, .. } => (format!("Great job! +{}", points), Mood::Good),
            SessionEvent::Overshot { total, lives_left } => (
                format!(
                    "Oops, {} is too far! {} {} left",
                    total,
                    lives_left,
                    if *lives_left == 1 { "try" } else { "tries" }
                ),
                Mood::Bad,
            ),
            SessionEvent::GameOver { score, .. } => {
                (format!("Game over! Score {} - press R", score), Mood::Bad)
            }
            SessionEvent::NothingToUndo => ("Nothing to undo".to_string(), Mood::Neutral),
            SessionEvent::NoHint => ("Try taking one back first".to_string(), Mood::Neutral),
            SessionEvent::Hinted { .. } => {
                (format!("Try the glowing {}", skin.piece_noun()), Mood::Neutral)
            }
            SessionEvent::RoundStarted { round_index, .. } => {
                (format!("Round {}", round_index + 1), Mood::Neutral)
            }
            _ => return None,
        };
        Some(Self {
            text,
            mood,
            until: now + FEEDBACK_MS,
        })
    }

    pub fn visible(&self, now: f64) -> bool {
        now < self.until
    }
}

/// Text lines for the heads-up display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub prompt: String,
    pub equation: String,
    pub score: String,
    pub lives: String,
    pub streak: Option<String>,
}

impl Hud {
    pub fn from_session(session: &GameSession) -> Self {
        let attempt = session.attempt();
        let equation = if attempt.is_empty() {
            match session.phase {
                Phase::GameOver => String::new(),
                _ => "Pick pieces with the mouse or keys 1-9".to_string(),
            }
        } else {
            attempt.equation()
        };
        Self {
            prompt: session.round().prompt(),
            equation,
            score: format!("Score {}", session.score),
            lives: format!("Tries {}", session.lives),
            streak: (session.streak > 1).then(|| format!("Streak x{}", session.streak)),
        }
    }

    /// Style of every piece in the current round
    pub fn piece_styles(session: &GameSession, hinted: Option<usize>) -> Vec<PieceStyle> {
        let attempt = session.attempt();
        (0..session.round().len())
            .map(|i| {
                if let Some(order) = attempt.picks().iter().position(|p| p.index == i) {
                    PieceStyle::Chosen { order }
                } else if hinted == Some(i) {
                    PieceStyle::Hinted
                } else {
                    PieceStyle::Available
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Command;
    use crate::tuning::Tuning;

    #[test]
    fn test_feedback_expires() {
        let fb = Feedback::for_event(&SessionEvent::NothingToUndo, Skin::Gears, 1000.0).unwrap();
        assert_eq!(fb.mood, Mood::Neutral);
        assert!(fb.visible(1000.0 + FEEDBACK_MS - 1.0));
        assert!(!fb.visible(1000.0 + FEEDBACK_MS));
        assert!(Feedback::for_event(&SessionEvent::Ignored, Skin::Gears, 0.0).is_none());
    }

    #[test]
    fn test_overshoot_message_pluralizes() {
        let fb = Feedback::for_event(
            &SessionEvent::Overshot {
                total: 13,
                lives_left: 1,
            },
            Skin::Gears,
            0.0,
        )
        .unwrap();
        assert_eq!(fb.text, "Oops, 13 is too far! 1 try left");
        assert_eq!(fb.mood, Mood::Bad);
    }

    #[test]
    fn test_hint_names_skin_piece() {
        let fb = Feedback::for_event(&SessionEvent::Hinted { index: 2 }, Skin::Bubbles, 0.0).unwrap();
        assert_eq!(fb.text, "Try the glowing bubble");
    }

    #[test]
    fn test_piece_styles_follow_attempt() {
        let mut session = GameSession::new(5, Tuning::default(), 0);
        let hint = match session.apply(Command::Hint) {
            SessionEvent::Hinted { index } => index,
            other => panic!("expected hint, got {:?}", other),
        };
        let styles = Hud::piece_styles(&session, Some(hint));
        assert_eq!(styles[hint], PieceStyle::Hinted);

        session.apply(Command::Select(hint));
        let styles = Hud::piece_styles(&session, None);
        assert_eq!(styles[hint], PieceStyle::Chosen { order: 0 });
        assert!(Hud::from_session(&session).equation.contains('='));
        assert_eq!(
            styles.iter().filter(|s| **s == PieceStyle::Hinted).count(),
            0
        );
    }
}
