use anyhow::{Context, Result};
use std::fmt;

pub const MAX_RANK: u8 = 13;
pub const MAX_SUIT: u8 = 4;
pub const MAX_CARD: u8 = MAX_SUIT * MAX_RANK;
pub const ACE: u8 = 1;
pub const KING: u8 = MAX_RANK;

const RANKS: [char; MAX_RANK as usize] = [
    'A', '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Spades,
    Hearts,
    Clubs,
    Diamonds,
}

impl Suit {
    pub const ALL: [Suit; MAX_SUIT as usize] =
        [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|suit| suit.symbol() == symbol)
    }

    pub fn color(self) -> Color {
        match self {
            Suit::Hearts | Suit::Diamonds => Color::Red,
            Suit::Spades | Suit::Clubs => Color::Black,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

/// Stable identifier of one of the 52 cards: `suit * 13 + rank - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(u8);

impl CardId {
    pub fn new(value: u8) -> Option<Self> {
        (value < MAX_CARD).then_some(Self(value))
    }

    /// Caller guarantees `index < 52`.
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < MAX_CARD as usize);
        Self(index as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn suit(self) -> Suit {
        Suit::ALL[(self.0 / MAX_RANK) as usize]
    }

    pub fn rank(self) -> u8 {
        self.0 % MAX_RANK + 1
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            RANKS[(self.rank() - 1) as usize],
            self.suit().symbol()
        )
    }
}

/// A playing card. Suit, rank and color are fixed when the card is built;
/// only the face-up flag ever changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    id: CardId,
    suit: Suit,
    rank: u8,
    color: Color,
    face_up: bool,
}

impl Card {
    pub fn new(suit: Suit, rank: u8) -> Option<Self> {
        if !(ACE..=KING).contains(&rank) {
            return None;
        }
        Some(Self::from_id(CardId(suit.index() * MAX_RANK + rank - 1)))
    }

    /// Builds the face-down card for `id`.
    pub fn from_id(id: CardId) -> Self {
        let suit = id.suit();
        Self {
            id,
            suit,
            rank: id.rank(),
            color: suit.color(),
            face_up: false,
        }
    }

    pub fn parse(rank: char, suit: char) -> Result<Self> {
        let rank_value = RANKS
            .iter()
            .position(|&r| r == rank)
            .with_context(|| format!("Invalid rank at card {rank}{suit}"))?;
        let suit = Suit::from_symbol(suit)
            .with_context(|| format!("Invalid suit at card {rank}{suit}"))?;
        Card::new(suit, rank_value as u8 + ACE)
            .with_context(|| format!("Invalid card {rank}{}", suit.symbol()))
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_face_up(&self) -> bool {
        self.face_up
    }

    pub fn set_face_up(&mut self, face_up: bool) {
        self.face_up = face_up;
    }

    pub fn with_face_up(mut self, face_up: bool) -> Self {
        self.face_up = face_up;
        self
    }

    pub fn is_ace(&self) -> bool {
        self.rank == ACE
    }

    pub fn is_king(&self) -> bool {
        self.rank == KING
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.id.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_attributes() {
        let card = Card::new(Suit::Diamonds, 7).unwrap();
        assert_eq!(card.color(), Color::Red);
        assert_eq!(card.rank(), 7);
        assert_eq!(card.suit(), Suit::Diamonds);
        assert!(!card.is_face_up());
        assert_eq!(card.to_string(), "7♦");

        let king = Card::new(Suit::Clubs, KING).unwrap();
        assert_eq!(king.color(), Color::Black);
        assert!(king.is_king());
        assert!(!king.is_ace());
    }

    #[test]
    fn test_ids_are_unique_and_stable() {
        let mut seen = [false; MAX_CARD as usize];
        for suit in Suit::ALL {
            for rank in ACE..=KING {
                let card = Card::new(suit, rank).unwrap();
                let id = card.id();
                assert_eq!(id.suit(), suit);
                assert_eq!(id.rank(), rank);
                assert!(!seen[id.value() as usize]);
                seen[id.value() as usize] = true;
                assert_eq!(Card::from_id(id), card);
            }
        }
        assert!(seen.iter().all(|&s| s));
        assert_eq!(CardId::new(MAX_CARD), None);
    }

    #[test]
    fn test_rejects_out_of_range_rank() {
        assert_eq!(Card::new(Suit::Spades, 0), None);
        assert_eq!(Card::new(Suit::Spades, 14), None);
    }

    #[test]
    fn test_parse() {
        let card = Card::parse('T', '♥').unwrap();
        assert_eq!(card.rank(), 10);
        assert_eq!(card.suit(), Suit::Hearts);
        assert_eq!(Card::parse('A', '♠').unwrap().rank(), ACE);
        assert!(Card::parse('1', '♠').is_err());
        assert!(Card::parse('A', 'x').is_err());
    }
}
