//! Error types returned by engine operations.
//!
//! Every failure is recoverable: the state the operation was called on is
//! left untouched and the caller decides how to surface the error.

use derive_more::{Display, Error};

/// Why a proposed move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum InvalidMove {
    /// The source or target names a pile that does not exist.
    #[display("no such pile")]
    UnknownPile,
    /// There is no card at the source position.
    #[display("no card at the source position")]
    EmptySource,
    /// The source card is still face-down.
    #[display("card is face-down")]
    FaceDownCard,
    /// Only the top card of the waste can be picked up.
    #[display("only the top card can be moved")]
    NotTopCard,
    /// Cards cannot be played from the stock or from a foundation.
    #[display("cards cannot be moved from this pile")]
    UnsupportedSource,
    /// Source and target are the same pile.
    #[display("source and target are the same pile")]
    SamePile,
    /// The target does not accept the moving cards.
    #[display("target does not accept these cards")]
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    #[display("invalid move: {_0}")]
    InvalidMove(InvalidMove),
    #[display("nothing to undo")]
    NothingToUndo,
    #[display("nothing to redo")]
    NothingToRedo,
    #[display("no hint available; try dealing from the stock")]
    NoHintAvailable,
    #[display("board does not hold a consistent deck")]
    InvalidBoard,
}

impl From<InvalidMove> for EngineError {
    fn from(reason: InvalidMove) -> Self {
        EngineError::InvalidMove(reason)
    }
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = EngineError::from(InvalidMove::FaceDownCard);
        assert_eq!(err.to_string(), "invalid move: card is face-down");
        assert_eq!(EngineError::NothingToUndo.to_string(), "nothing to undo");
    }
}
