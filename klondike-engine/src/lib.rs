//! Rules engine for single-player Klondike.
//!
//! [`GameState`] is the entry point: it deals new games and turns player
//! commands (deal, move, undo, redo, hint) into new states. The pieces it is
//! built from are public too, so front-ends can ask what is legal without
//! going through a state transition.
mod deal;
mod error;
mod executor;
mod game;
mod hint;
mod history;
mod rules;

#[cfg(test)]
mod fixtures;

pub use crate::deal::deal;
pub use crate::error::{EngineError, InvalidMove, Result};
pub use crate::game::GameState;
pub use crate::hint::find_hint;
pub use crate::history::{History, MAX_RUN, MovedCards, Record};
pub use crate::rules::{
    can_stack_foundation, can_stack_tableau, is_legal, is_won, pick_up, validate_move,
};
