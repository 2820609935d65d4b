//! Telegram wiring for the two bots.
//!
//! Everything here is transport: handlers decode updates, call into
//! `processors` / `game`, and turn the result into messages and keyboards.

pub mod game;
pub mod keyboards;
pub mod messages;
pub mod wind;
