use klondike_common::{board::PileId, card::CardId};

use smallvec::SmallVec;

/// The longest run that can move at once: King down to Ace.
pub const MAX_RUN: usize = 13;

pub type MovedCards = SmallVec<[CardId; MAX_RUN]>;

/// One reversible operation, with everything needed to play it backwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// `card` went from the stock to the waste and was turned face-up.
    DealFromStock { card: CardId },
    /// The waste (`count` cards) was turned over to become the stock.
    Recycle { count: usize },
    /// `cards` moved from the top of `source` to the top of `target`.
    /// `flipped_source` is set when that exposed a face-down tableau card
    /// which was then turned face-up.
    CardMove {
        source: PileId,
        target: PileId,
        cards: MovedCards,
        flipped_source: bool,
    },
}

/// Move log, most recent last. Records are only added by executing an
/// operation and only removed by undoing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    records: Vec<Record>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&Record> {
        self.records.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub(crate) fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub(crate) fn pop(&mut self) -> Option<Record> {
        self.records.pop()
    }
}
