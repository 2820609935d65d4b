pub mod rules;
pub mod session;

pub use rules::{determine_winner, Move, Outcome};
pub use session::{GameAction, GameReply, GameState, Menu};
