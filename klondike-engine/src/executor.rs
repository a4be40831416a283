//! Board mutation. These functions trust their input: legality is checked in
//! [`crate::rules`] before anything here runs, and undo replays records that
//! were produced here.

use crate::history::Record;

use klondike_common::{
    board::{Board, Pile, PileId},
    card::Card,
};
use tracing::debug;

/// Moves the top `count` cards of `source` onto `target`, turning up a
/// tableau card left exposed. Returns `None` (and changes nothing) if either
/// pile does not exist.
pub fn execute(board: &mut Board, source: PileId, target: PileId, count: usize) -> Option<Record> {
    board.pile(target)?;
    let cards = board.pile_mut(source)?.drain_top(count);

    let mut flipped_source = false;
    if let PileId::Tableau(idx) = source
        && let Some(top) = board.tableaus.get_mut(idx).and_then(Pile::top_mut)
        && !top.is_face_up()
    {
        top.set_face_up(true);
        flipped_source = true;
    }

    let ids = cards.iter().map(Card::id).collect();
    board.pile_mut(target)?.extend(cards);
    debug!(%source, %target, count, flipped_source, "moved cards");

    Some(Record::CardMove {
        source,
        target,
        cards: ids,
        flipped_source,
    })
}

/// Turns the next stock card onto the waste, or turns the waste back over
/// into the stock once the stock has run out. Nothing happens when both are
/// empty.
pub fn deal_from_stock(board: &mut Board) -> Option<Record> {
    if let Some(card) = board.stock.pop() {
        let card = card.with_face_up(true);
        board.waste.push(card);
        debug!(%card, "dealt from stock");
        return Some(Record::DealFromStock { card: card.id() });
    }

    if board.waste.is_empty() {
        return None;
    }
    let waste = board.waste.take_all();
    let count = waste.len();
    board
        .stock
        .extend(waste.cards().iter().rev().map(|card| card.with_face_up(false)));
    debug!(count, "recycled waste into stock");
    Some(Record::Recycle { count })
}

/// Plays `record` backwards.
pub fn undo(board: &mut Board, record: &Record) {
    match record {
        Record::DealFromStock { card } => {
            if let Some(top) = board.waste.pop() {
                debug_assert_eq!(top.id(), *card);
                board.stock.push(top.with_face_up(false));
            }
        }
        Record::Recycle { count } => {
            let stock = board.stock.drain_top(*count);
            debug_assert!(board.stock.is_empty());
            board
                .waste
                .extend(stock.into_iter().rev().map(|card| card.with_face_up(true)));
        }
        Record::CardMove {
            source,
            target,
            cards,
            flipped_source,
        } => {
            let moved = board
                .pile_mut(*target)
                .map(|pile| pile.drain_top(cards.len()))
                .unwrap_or_default();
            debug_assert!(moved.iter().map(Card::id).eq(cards.iter().copied()));
            if let Some(pile) = board.pile_mut(*source) {
                if *flipped_source && let Some(top) = pile.top_mut() {
                    top.set_face_up(false);
                }
                pile.extend(moved);
            }
        }
    }
    debug!(?record, "undid record");
}

/// Plays `record` forwards again. Returns the record the replay produced,
/// which matches `record` when the board is where the record left it.
pub fn redo(board: &mut Board, record: &Record) -> Option<Record> {
    match record {
        Record::DealFromStock { .. } | Record::Recycle { .. } => deal_from_stock(board),
        Record::CardMove {
            source,
            target,
            cards,
            ..
        } => execute(board, *source, *target, cards.len()),
    }
}
