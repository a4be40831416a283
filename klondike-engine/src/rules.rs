//! Move legality and the win condition. Nothing here mutates the board.

use crate::error::InvalidMove;

use klondike_common::{
    board::{Board, CardRef, FOUNDATION_SIZE, Pile, PileId},
    card::Card,
};
use tracing::trace;

/// Whether `card` (the bottom of the moving run) may be placed on a tableau
/// whose top card is `top`.
pub fn can_stack_tableau(top: Option<&Card>, card: &Card) -> bool {
    match top {
        None => card.is_king(),
        Some(top) => {
            top.is_face_up() && top.color() != card.color() && top.rank() == card.rank() + 1
        }
    }
}

pub fn can_stack_foundation(foundation: &Pile, card: &Card) -> bool {
    match (foundation.get(0), foundation.peek_top()) {
        (Some(base), Some(top)) => base.suit() == card.suit() && card.rank() == top.rank() + 1,
        _ => card.is_ace(),
    }
}

/// Whether `moving` may be dropped on `target`.
///
/// Assumes the caller only proposes cards that may be picked up together
/// (see [`pick_up`]). Foundations take single cards only; the stock and the
/// waste never accept a drop.
pub fn is_legal(board: &Board, moving: &[Card], target: PileId) -> bool {
    let Some(bottom) = moving.first() else {
        return false;
    };
    let legal = match target {
        PileId::Tableau(idx) => board
            .tableaus
            .get(idx)
            .is_some_and(|pile| can_stack_tableau(pile.peek_top(), bottom)),
        PileId::Foundation(idx) => {
            moving.len() == 1
                && board
                    .foundations
                    .get(idx)
                    .is_some_and(|pile| can_stack_foundation(pile, bottom))
        }
        PileId::Stock | PileId::Waste => false,
    };
    trace!(%bottom, count = moving.len(), %target, legal);
    legal
}

/// The cards a player lifts when grabbing `source`: a face-up tableau card and
/// everything above it, or the top card of the waste.
pub fn pick_up(board: &Board, source: CardRef) -> Result<&[Card], InvalidMove> {
    let pile = board.pile(source.pile).ok_or(InvalidMove::UnknownPile)?;
    match source.pile {
        PileId::Stock | PileId::Foundation(_) => Err(InvalidMove::UnsupportedSource),
        PileId::Waste => {
            pile.get(source.index).ok_or(InvalidMove::EmptySource)?;
            if source.index + 1 != pile.len() {
                return Err(InvalidMove::NotTopCard);
            }
            Ok(&pile.cards()[source.index..])
        }
        PileId::Tableau(_) => {
            pile.get(source.index).ok_or(InvalidMove::EmptySource)?;
            if source.index < pile.face_up_start() {
                return Err(InvalidMove::FaceDownCard);
            }
            Ok(&pile.cards()[source.index..])
        }
    }
}

/// Full check of a player move; returns how many cards would move.
pub fn validate_move(board: &Board, source: CardRef, target: PileId) -> Result<usize, InvalidMove> {
    if board.pile(target).is_none() {
        return Err(InvalidMove::UnknownPile);
    }
    let moving = pick_up(board, source)?;
    if source.pile == target {
        return Err(InvalidMove::SamePile);
    }
    if !is_legal(board, moving, target) {
        return Err(InvalidMove::Rejected);
    }
    Ok(moving.len())
}

/// A game is won once every foundation holds its suit from Ace to King.
pub fn is_won(board: &Board) -> bool {
    board
        .foundations
        .iter()
        .all(|pile| pile.len() == FOUNDATION_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use klondike_common::card::Suit;

    fn card(suit: Suit, rank: u8) -> Card {
        Card::new(suit, rank).unwrap().with_face_up(true)
    }

    fn board_with_tableau_top(top: Card) -> Board {
        let mut board = Board::new();
        board.tableaus[0].push(top);
        board
    }

    #[test]
    fn test_red_on_black_one_lower() {
        let board = board_with_tableau_top(card(Suit::Spades, 8));
        assert!(is_legal(&board, &[card(Suit::Diamonds, 7)], PileId::Tableau(0)));
        assert!(!is_legal(&board, &[card(Suit::Hearts, 6)], PileId::Tableau(0)));
        assert!(!is_legal(&board, &[card(Suit::Hearts, 8)], PileId::Tableau(0)));
    }

    #[test]
    fn test_same_color_rejected() {
        let board = board_with_tableau_top(card(Suit::Clubs, 8));
        assert!(!is_legal(&board, &[card(Suit::Spades, 7)], PileId::Tableau(0)));

        let board = board_with_tableau_top(card(Suit::Diamonds, 8));
        assert!(!is_legal(&board, &[card(Suit::Diamonds, 7)], PileId::Tableau(0)));
    }

    #[test]
    fn test_face_down_top_rejected() {
        let board = board_with_tableau_top(card(Suit::Spades, 8).with_face_up(false));
        assert!(!is_legal(&board, &[card(Suit::Diamonds, 7)], PileId::Tableau(0)));
    }

    #[test]
    fn test_empty_tableau_takes_king_only() {
        let board = Board::new();
        let run = [card(Suit::Hearts, 13), card(Suit::Spades, 12)];
        assert!(is_legal(&board, &run, PileId::Tableau(3)));
        assert!(!is_legal(&board, &[card(Suit::Hearts, 12)], PileId::Tableau(3)));
        assert!(!is_legal(&board, &[], PileId::Tableau(3)));
    }

    #[test]
    fn test_foundation_order() {
        let mut board = Board::new();
        let target = PileId::Foundation(2);
        assert!(!is_legal(&board, &[card(Suit::Hearts, 2)], target));
        assert!(is_legal(&board, &[card(Suit::Hearts, 1)], target));

        board.foundations[2].push(card(Suit::Hearts, 1));
        assert!(is_legal(&board, &[card(Suit::Hearts, 2)], target));
        assert!(!is_legal(&board, &[card(Suit::Hearts, 3)], target));
        assert!(!is_legal(&board, &[card(Suit::Diamonds, 2)], target));
        assert!(!is_legal(&board, &[card(Suit::Spades, 1)], target));
    }

    #[test]
    fn test_foundation_rejects_sequences() {
        let mut board = Board::new();
        board.foundations[0].push(card(Suit::Clubs, 1));
        let run = [card(Suit::Clubs, 2), card(Suit::Hearts, 1)];
        assert!(!is_legal(&board, &run, PileId::Foundation(0)));
    }

    #[test]
    fn test_other_targets_illegal() {
        let board = Board::new();
        let king = [card(Suit::Clubs, 13)];
        assert!(!is_legal(&board, &king, PileId::Stock));
        assert!(!is_legal(&board, &king, PileId::Waste));
        assert!(!is_legal(&board, &king, PileId::Tableau(7)));
        assert!(!is_legal(&board, &[card(Suit::Clubs, 1)], PileId::Foundation(4)));
    }

    #[test]
    fn test_is_won() {
        let mut board = Board::new();
        for (idx, suit) in Suit::ALL.into_iter().enumerate() {
            for rank in 1..=13 {
                board.foundations[idx].push(card(suit, rank));
            }
        }
        assert!(is_won(&board));

        board.foundations[3].pop();
        assert!(!is_won(&board));
        assert!(!is_won(&Board::new()));
    }

    #[test]
    fn test_pick_up() {
        let mut board = Board::new();
        board.tableaus[0].push(card(Suit::Clubs, 9).with_face_up(false));
        board.tableaus[0].push(card(Suit::Hearts, 8));
        board.tableaus[0].push(card(Suit::Spades, 7));
        board.waste.push(card(Suit::Hearts, 3));
        board.waste.push(card(Suit::Hearts, 4));
        board.foundations[0].push(card(Suit::Diamonds, 1));

        let t0 = |index| CardRef::new(PileId::Tableau(0), index);
        assert_eq!(pick_up(&board, t0(1)).map(<[Card]>::len), Ok(2));
        assert_eq!(pick_up(&board, t0(2)).map(<[Card]>::len), Ok(1));
        assert_eq!(pick_up(&board, t0(0)), Err(InvalidMove::FaceDownCard));
        assert_eq!(pick_up(&board, t0(3)), Err(InvalidMove::EmptySource));

        let waste = |index| CardRef::new(PileId::Waste, index);
        assert_eq!(pick_up(&board, waste(1)).map(<[Card]>::len), Ok(1));
        assert_eq!(pick_up(&board, waste(0)), Err(InvalidMove::NotTopCard));

        assert_eq!(
            pick_up(&board, CardRef::new(PileId::Foundation(0), 0)),
            Err(InvalidMove::UnsupportedSource)
        );
        assert_eq!(
            pick_up(&board, CardRef::new(PileId::Stock, 0)),
            Err(InvalidMove::UnsupportedSource)
        );
        assert_eq!(
            pick_up(&board, CardRef::new(PileId::Tableau(9), 0)),
            Err(InvalidMove::UnknownPile)
        );
        assert_eq!(
            pick_up(&board, CardRef::new(PileId::Tableau(1), 0)),
            Err(InvalidMove::EmptySource)
        );
    }

    #[test]
    fn test_validate_move() {
        let mut board = Board::new();
        board.tableaus[0].push(card(Suit::Spades, 8));
        board.tableaus[1].push(card(Suit::Diamonds, 7));

        let src = CardRef::new(PileId::Tableau(1), 0);
        assert_eq!(validate_move(&board, src, PileId::Tableau(0)), Ok(1));
        assert_eq!(
            validate_move(&board, src, PileId::Tableau(1)),
            Err(InvalidMove::SamePile)
        );
        assert_eq!(
            validate_move(&board, src, PileId::Tableau(2)),
            Err(InvalidMove::Rejected)
        );
        assert_eq!(
            validate_move(&board, src, PileId::Foundation(8)),
            Err(InvalidMove::UnknownPile)
        );
    }
}
