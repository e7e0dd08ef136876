//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events onto the four movement directions and tracks which
//! of them are held, including in terminals without key-release events.

pub mod handler;
pub mod map;

pub use genesis_types as types;

pub use handler::InputHandler;
pub use map::{direction_for, should_quit, Direction};
