use klondike_common::board::Board;

/// A mid-game position holding the full deck.
pub const BOARD_STR: &str = r#"Stock: 5♦2♥8♦K♣7♥J♣
Waste: 7♦Q♥K♥T♦6♣9♥K♦J♠T♣Q♣3♣2♦Q♦8♥6♥7♠8♠
Foundation1: 2♣
Foundation3: A♠
Tableau1: |5♣
Tableau2: J♥|6♠
Tableau3: T♠5♥|Q♠
Tableau4: 9♠T♥2♠|9♣
Tableau5: 7♣4♥3♠|A♦
Tableau6: 3♥3♦4♣5♠4♦|8♣
Tableau7: 6♦4♠A♥9♦K♠|J♦"#;

pub fn board() -> Board {
    Board::parse(BOARD_STR).unwrap()
}
