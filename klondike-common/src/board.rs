use crate::card::{Card, MAX_CARD, MAX_RANK, Suit};

use anyhow::{Context, Result, bail};
use smallvec::SmallVec;
use std::fmt;

pub const TOTAL_FOUNDATIONS: usize = 4;
pub const TOTAL_TABLEAUS: usize = 7;
pub const TALON_SIZE: usize = 24;
pub const FOUNDATION_SIZE: usize = MAX_RANK as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PileId {
    Stock,
    Waste,
    Foundation(usize),
    Tableau(usize),
}

impl fmt::Display for PileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PileId::Stock => write!(f, "Stock"),
            PileId::Waste => write!(f, "Waste"),
            PileId::Foundation(idx) => write!(f, "Foundation{}", idx + 1),
            PileId::Tableau(idx) => write!(f, "Tableau{}", idx + 1),
        }
    }
}

/// The bottom card of a pick-up: everything from `index` to the top of `pile` moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardRef {
    pub pile: PileId,
    pub index: usize,
}

impl CardRef {
    pub fn new(pile: PileId, index: usize) -> Self {
        Self { pile, index }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pile {
    cards: SmallVec<[Card; TALON_SIZE]>,
}

impl Pile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn peek_top(&self) -> Option<&Card> {
        self.cards.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Card> {
        self.cards.last_mut()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn extend<I: IntoIterator<Item = Card>>(&mut self, cards: I) {
        self.cards.extend(cards);
    }

    /// Removes up to `count` cards from the top, keeping their order.
    pub fn drain_top(&mut self, count: usize) -> Vec<Card> {
        let start = self.cards.len().saturating_sub(count);
        self.cards.drain(start..).collect()
    }

    pub fn take_all(&mut self) -> Pile {
        std::mem::take(self)
    }

    /// Index of the first card of the face-up run that ends at the top.
    /// Equals `len()` when the pile is empty or its top card is face-down.
    pub fn face_up_start(&self) -> usize {
        let face_up = self
            .cards
            .iter()
            .rev()
            .take_while(|card| card.is_face_up())
            .count();
        self.cards.len() - face_up
    }

    pub fn face_up_count(&self) -> usize {
        self.cards.len() - self.face_up_start()
    }
}

impl FromIterator<Card> for Pile {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Board {
    pub stock: Pile,
    pub waste: Pile,
    pub foundations: [Pile; TOTAL_FOUNDATIONS],
    pub tableaus: [Pile; TOTAL_TABLEAUS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pile(&self, id: PileId) -> Option<&Pile> {
        match id {
            PileId::Stock => Some(&self.stock),
            PileId::Waste => Some(&self.waste),
            PileId::Foundation(idx) => self.foundations.get(idx),
            PileId::Tableau(idx) => self.tableaus.get(idx),
        }
    }

    pub fn pile_mut(&mut self, id: PileId) -> Option<&mut Pile> {
        match id {
            PileId::Stock => Some(&mut self.stock),
            PileId::Waste => Some(&mut self.waste),
            PileId::Foundation(idx) => self.foundations.get_mut(idx),
            PileId::Tableau(idx) => self.tableaus.get_mut(idx),
        }
    }

    /// Suit a foundation is being built in, if it has started.
    pub fn foundation_suit(&self, idx: usize) -> Option<Suit> {
        self.foundations
            .get(idx)
            .and_then(|pile| pile.get(0))
            .map(|card| card.suit())
    }

    pub fn foundation_count(&self) -> usize {
        self.foundations.iter().map(Pile::len).sum()
    }

    /// Every card on the board, pile by pile.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        std::iter::once(&self.stock)
            .chain(std::iter::once(&self.waste))
            .chain(self.foundations.iter())
            .chain(self.tableaus.iter())
            .flat_map(|pile| pile.cards().iter())
    }

    /// Checks the full deck is present exactly once and every pile keeps its shape.
    pub fn is_valid(&self) -> bool {
        let mut seen = [false; MAX_CARD as usize];
        let mut count = 0;
        for card in self.cards() {
            let id = card.id().value() as usize;
            if seen[id] {
                return false;
            }
            seen[id] = true;
            count += 1;
        }
        if count != MAX_CARD as usize {
            return false;
        }

        if self.stock.cards().iter().any(|card| card.is_face_up()) {
            return false;
        }
        if self.waste.cards().iter().any(|card| !card.is_face_up()) {
            return false;
        }

        for pile in &self.foundations {
            let Some(suit) = pile.get(0).map(|card| card.suit()) else {
                continue;
            };
            let in_order = pile.cards().iter().enumerate().all(|(i, card)| {
                card.is_face_up() && card.suit() == suit && card.rank() as usize == i + 1
            });
            if !in_order {
                return false;
            }
        }

        self.tableaus.iter().all(is_valid_tableau)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut board = Self::new();

        for line in content
            .split('\n')
            .map(|v| v.trim())
            .filter(|l| !l.is_empty())
        {
            let line_context = || format!("Failed to parse at '{line}'");
            if let Some(rest) = line.strip_prefix("Stock:") {
                let cards = Self::parse_cards(rest.trim()).with_context(line_context)?;
                board
                    .stock
                    .extend(cards.into_iter().map(|c| c.with_face_up(false)));
            } else if let Some(rest) = line.strip_prefix("Waste:") {
                let cards = Self::parse_cards(rest.trim()).with_context(line_context)?;
                board
                    .waste
                    .extend(cards.into_iter().map(|c| c.with_face_up(true)));
            } else if let Some(rest) = line.strip_prefix("Foundation") {
                let (idx, cards_str) = Self::parse_indexed(rest, TOTAL_FOUNDATIONS)
                    .context("Invalid foundation index")
                    .with_context(line_context)?;
                let cards = Self::parse_cards(cards_str).with_context(line_context)?;
                if let Some(top_card) = cards.last() {
                    let suit = top_card.suit();
                    board.foundations[idx] = (1..=top_card.rank())
                        .filter_map(|rank| Card::new(suit, rank))
                        .map(|c| c.with_face_up(true))
                        .collect();
                }
            } else if let Some(rest) = line.strip_prefix("Tableau") {
                let (idx, cards_str) = Self::parse_indexed(rest, TOTAL_TABLEAUS)
                    .context("Invalid tableau index")
                    .with_context(line_context)?;
                let (before, after) = match cards_str.split_once('|') {
                    Some((b, a)) => (b, a),
                    None => (cards_str, ""),
                };
                let face_down = Self::parse_cards(before.trim()).with_context(line_context)?;
                let face_up = Self::parse_cards(after.trim()).with_context(line_context)?;
                let pile = &mut board.tableaus[idx];
                pile.extend(face_down.into_iter().map(|c| c.with_face_up(false)));
                pile.extend(face_up.into_iter().map(|c| c.with_face_up(true)));
            } else {
                bail!("Unknown line '{line}'");
            }
        }

        Ok(board)
    }

    /// Splits `N: rest` into a zero-based index below `limit` and the rest.
    fn parse_indexed(s: &str, limit: usize) -> Result<(usize, &str)> {
        let (num, rest) = s.split_once(':').context("Missing ':'")?;
        let idx = num.trim().parse::<usize>()?;
        if idx == 0 || idx > limit {
            bail!("Index {idx} out of range 1..={limit}");
        }
        Ok((idx - 1, rest.trim()))
    }

    fn parse_cards(s: &str) -> Result<Vec<Card>> {
        let mut cards = Vec::new();
        let mut chars = s.chars().peekable();
        while let Some(&c1) = chars.peek() {
            if c1.is_whitespace() || c1 == '|' {
                chars.next();
                continue;
            }
            let rank = c1;
            chars.next();
            let suit = match chars.next() {
                Some(s) => s,
                None => bail!("Missing suit after '{rank}'"),
            };
            cards.push(Card::parse(rank, suit)?);
        }
        Ok(cards)
    }
}

fn is_valid_tableau(pile: &Pile) -> bool {
    let start = pile.face_up_start();
    let cards = pile.cards();
    // nothing face-up below the face-down boundary, and an exposed top is always face-up
    if cards[..start].iter().any(|card| card.is_face_up()) {
        return false;
    }
    if !cards.is_empty() && start == cards.len() {
        return false;
    }
    cards[start..]
        .windows(2)
        .all(|w| w[0].color() != w[1].color() && w[0].rank() == w[1].rank() + 1)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = Vec::new();
        let join = |cards: &[Card]| cards.iter().map(Card::to_string).collect::<String>();

        if !self.stock.is_empty() {
            lines.push(format!("Stock: {}", join(self.stock.cards())));
        }

        if !self.waste.is_empty() {
            lines.push(format!("Waste: {}", join(self.waste.cards())));
        }

        for (i, pile) in self.foundations.iter().enumerate() {
            if let Some(card) = pile.peek_top() {
                lines.push(format!("Foundation{}: {card}", i + 1));
            }
        }

        for (i, pile) in self.tableaus.iter().enumerate() {
            if pile.is_empty() {
                continue;
            }
            let (face_down, face_up) = pile.cards().split_at(pile.face_up_start());
            lines.push(format!(
                "Tableau{}: {}|{}",
                i + 1,
                join(face_down),
                join(face_up)
            ));
        }

        write!(f, "{}", lines.join("\n"))
    }
}
