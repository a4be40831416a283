use crate::card::{Card, CardId, MAX_CARD};

use rand::{Rng, seq::SliceRandom};

pub const DECK_SIZE: usize = MAX_CARD as usize;

/// All 52 cards face-down, ordered by id (♠ A..K, ♥, ♣, ♦).
pub fn standard_deck() -> [Card; DECK_SIZE] {
    std::array::from_fn(|i| Card::from_id(CardId::from_index(i)))
}

/// A uniformly random permutation of the standard deck (Fisher–Yates).
pub fn shuffled_deck<R: Rng + ?Sized>(rng: &mut R) -> [Card; DECK_SIZE] {
    let mut deck = standard_deck();
    deck.shuffle(rng);
    deck
}
