//! Canvas 2D rendering module
//!
//! `hud` turns session state into what should be on screen; `canvas` draws
//! it with the browser's 2D context.

pub mod hud;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use hud::{Feedback, Hud, Mood, PieceStyle};
