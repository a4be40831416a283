use crate::rules::is_legal;

use klondike_common::{
    board::{Board, PileId, TOTAL_FOUNDATIONS, TOTAL_TABLEAUS},
    card::CardId,
};
use tracing::trace;

/// Finds one legal move and returns the id of the card that would be picked up.
///
/// The search order is fixed so the same board always gives the same hint:
/// the waste top against each foundation then each tableau, followed by every
/// face-up tableau card (pile by pile, lowest card of the face-up run first)
/// against each other tableau and, for a pile's top card, each foundation.
pub fn find_hint(board: &Board) -> Option<CardId> {
    if let Some(card) = board.waste.peek_top() {
        let moving = std::slice::from_ref(card);
        let targets = (0..TOTAL_FOUNDATIONS)
            .map(PileId::Foundation)
            .chain((0..TOTAL_TABLEAUS).map(PileId::Tableau));
        for target in targets {
            if is_legal(board, moving, target) {
                trace!(%card, %target, "hint from waste");
                return Some(card.id());
            }
        }
    }

    for (src, pile) in board.tableaus.iter().enumerate() {
        for index in pile.face_up_start()..pile.len() {
            let moving = &pile.cards()[index..];
            let onto_tableau = (0..TOTAL_TABLEAUS)
                .filter(|&dst| dst != src)
                .map(PileId::Tableau)
                .find(|&target| is_legal(board, moving, target));
            let onto_foundation = || {
                if index + 1 != pile.len() {
                    return None;
                }
                (0..TOTAL_FOUNDATIONS)
                    .map(PileId::Foundation)
                    .find(|&target| is_legal(board, moving, target))
            };
            if let Some(target) = onto_tableau.or_else(onto_foundation) {
                trace!(card = %moving[0], %target, "hint from tableau");
                return Some(moving[0].id());
            }
        }
    }

    None
}
