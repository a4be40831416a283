use klondike_common::{
    board::{Board, TOTAL_TABLEAUS},
    card::Card,
    deck::DECK_SIZE,
};

use tracing::debug;

/// Lays a shuffled deck out in the opening position.
///
/// Cards go round the tableau in a diagonal sweep: row `r` puts one card on
/// every pile from `r` to 6, and the card landing on pile `r` itself is the
/// only one turned face-up. The 24 cards left over become the stock.
pub fn deal(deck: [Card; DECK_SIZE]) -> Board {
    let mut board = Board::new();
    let mut cards = deck.into_iter();

    for row in 0..TOTAL_TABLEAUS {
        for (col, tableau) in board.tableaus.iter_mut().enumerate().skip(row) {
            if let Some(card) = cards.next() {
                tableau.push(card.with_face_up(col == row));
            }
        }
    }

    board.stock.extend(cards.map(|card| card.with_face_up(false)));
    debug!(stock = board.stock.len(), "dealt new board");

    board
}
