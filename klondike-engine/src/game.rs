use crate::{
    deal::deal,
    error::{EngineError, InvalidMove, Result},
    executor,
    hint::find_hint,
    history::{History, Record},
    rules::{is_legal, is_won, pick_up, validate_move},
};

use klondike_common::{
    board::{Board, CardRef, PileId, TOTAL_FOUNDATIONS, TOTAL_TABLEAUS},
    card::{Card, CardId},
    deck::shuffled_deck,
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info, instrument};

/// A game in progress: the board, its move history and the card currently
/// highlighted as a hint.
///
/// Operations never change a state in place. Each one borrows the current
/// state and hands back the next, so a rejected operation leaves the caller
/// holding exactly what it had.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    history: History,
    redo: Vec<Record>,
    hint_card: Option<CardId>,
}

impl GameState {
    /// Shuffles and deals a fresh game.
    pub fn new_game() -> Self {
        Self::with_rng(&mut rand::rng())
    }

    /// Same seed, same deal.
    pub fn new_with_seed(seed: u64) -> Self {
        Self::with_rng(&mut StdRng::seed_from_u64(seed))
    }

    pub fn with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_dealt(deal(shuffled_deck(rng)))
    }

    /// Starts from an arbitrary position, e.g. one parsed from the text notation.
    pub fn from_board(board: Board) -> Result<Self> {
        if !board.is_valid() {
            return Err(EngineError::InvalidBoard);
        }
        Ok(Self::from_dealt(board))
    }

    fn from_dealt(board: Board) -> Self {
        Self {
            board,
            history: History::new(),
            redo: Vec::new(),
            hint_card: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The card highlighted by the last [`GameState::show_hint`], cleared by
    /// any later operation.
    pub fn hint_card(&self) -> Option<CardId> {
        self.hint_card
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    #[instrument(level = "debug", skip(self))]
    pub fn deal_from_stock(&self) -> GameState {
        let mut next = self.clone();
        if let Some(record) = executor::deal_from_stock(&mut next.board) {
            next.commit(record);
        }
        next
    }

    #[instrument(level = "debug", skip(self))]
    pub fn propose_move(&self, source: CardRef, target: PileId) -> Result<GameState> {
        let count = validate_move(&self.board, source, target).inspect_err(|reason| {
            debug!(%reason, "move rejected");
        })?;
        let mut next = self.clone();
        let record = executor::execute(&mut next.board, source.pile, target, count)
            .ok_or(InvalidMove::UnknownPile)?;
        next.commit(record);
        Ok(next)
    }

    /// Sends the cards at `source` to the first pile that takes them,
    /// foundations before tableaus.
    #[instrument(level = "debug", skip(self))]
    pub fn quick_move(&self, source: CardRef) -> Result<GameState> {
        let moving = pick_up(&self.board, source)?;
        let target = (0..TOTAL_FOUNDATIONS)
            .map(PileId::Foundation)
            .chain((0..TOTAL_TABLEAUS).map(PileId::Tableau))
            .filter(|&target| target != source.pile)
            .find(|&target| is_legal(&self.board, moving, target))
            .ok_or(InvalidMove::Rejected)?;
        self.propose_move(source, target)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn undo(&self) -> Result<GameState> {
        let mut next = self.clone();
        let record = next.history.pop().ok_or(EngineError::NothingToUndo)?;
        executor::undo(&mut next.board, &record);
        next.redo.push(record);
        next.hint_card = None;
        Ok(next)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn redo(&self) -> Result<GameState> {
        let mut next = self.clone();
        let record = next.redo.pop().ok_or(EngineError::NothingToRedo)?;
        let replayed =
            executor::redo(&mut next.board, &record).ok_or(EngineError::NothingToRedo)?;
        debug_assert_eq!(replayed, record);
        next.history.push(replayed);
        next.hint_card = None;
        next.check_win();
        Ok(next)
    }

    pub fn hint(&self) -> Option<CardId> {
        find_hint(&self.board)
    }

    /// Looks for a hint and highlights its card.
    pub fn show_hint(&self) -> Result<GameState> {
        let card = self.hint().ok_or(EngineError::NoHintAvailable)?;
        let mut next = self.clone();
        next.hint_card = Some(card);
        Ok(next)
    }

    pub fn is_won(&self) -> bool {
        is_won(&self.board)
    }

    /// Whether the rest of the game is only a matter of moving cards up to
    /// the foundations: the stock is exhausted, at most one card is left on
    /// the waste and every tableau card is face-up.
    pub fn can_autofinish(&self) -> bool {
        self.board.stock.is_empty()
            && self.board.waste.len() <= 1
            && self
                .board
                .tableaus
                .iter()
                .all(|pile| pile.cards().iter().all(Card::is_face_up))
            && !self.is_won()
    }

    /// Plays every remaining card to the foundations, one recorded move each.
    #[instrument(level = "debug", skip(self))]
    pub fn autofinish(&self) -> Result<GameState> {
        if !self.can_autofinish() {
            return Err(InvalidMove::Rejected.into());
        }
        let mut state = self.clone();
        while !state.is_won() {
            let (source, target) = state.next_foundation_move().ok_or(InvalidMove::Rejected)?;
            state = state.propose_move(source, target)?;
        }
        Ok(state)
    }

    fn next_foundation_move(&self) -> Option<(CardRef, PileId)> {
        let waste = (!self.board.waste.is_empty())
            .then(|| CardRef::new(PileId::Waste, self.board.waste.len() - 1));
        let tableaus = self
            .board
            .tableaus
            .iter()
            .enumerate()
            .filter(|(_, pile)| !pile.is_empty())
            .map(|(idx, pile)| CardRef::new(PileId::Tableau(idx), pile.len() - 1));

        waste.into_iter().chain(tableaus).find_map(|source| {
            let moving = pick_up(&self.board, source).ok()?;
            (0..TOTAL_FOUNDATIONS)
                .map(PileId::Foundation)
                .find(|&target| is_legal(&self.board, moving, target))
                .map(|target| (source, target))
        })
    }

    fn commit(&mut self, record: Record) {
        self.history.push(record);
        self.redo.clear();
        self.hint_card = None;
        self.check_win();
    }

    fn check_win(&self) {
        if self.is_won() {
            info!(moves = self.history.len(), "game won");
        }
    }
}
