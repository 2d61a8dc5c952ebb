//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key names to game commands)
//! - Storage (LocalStorage on web, nothing on native)

pub mod input;
pub mod storage;
