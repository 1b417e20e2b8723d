use crate::state::{Bets, RoundStatus, Table};
use blackjack::{calculate_hand_value, Card, RoundResult, SideBetOutcome};
use serde::{Deserialize, Serialize};

/// One player hand as the player sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandView {
    pub cards: Vec<Card>,
    pub value: u8,
    pub bet: u64,
    pub doubled: bool,
    /// The hand currently being played.
    pub active: bool,
    /// Filled in once the round is settled.
    pub result: Option<RoundResult>,
}

/// Immutable view of the table handed to the presentation layer after every
/// transition. The dealer's hole card is `None` while the player is deciding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub round_id: u64,
    pub bankroll: u64,
    pub bets: Bets,
    pub player_hands: Vec<HandView>,
    pub dealer_cards: Vec<Option<Card>>,
    /// Value of the visible dealer cards only.
    pub dealer_value: Option<u8>,
    pub status: RoundStatus,
    pub message: String,
    pub commentary: String,
    pub side_bet_results: Option<SideBetOutcome>,
    pub result: Option<RoundResult>,
    pub can_double: bool,
    pub can_split: bool,
}

impl TableSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn hole_card_hidden(&self) -> bool {
        self.dealer_cards.iter().any(Option::is_none)
    }
}

impl Table {
    pub fn snapshot(&self) -> TableSnapshot {
        let hide_hole = self.status == RoundStatus::Playing;

        let (player_hands, dealer_cards, dealer_value) = match &self.game {
            Some(game) => {
                let hands = game
                    .seat
                    .hands
                    .iter()
                    .enumerate()
                    .map(|(i, hand)| HandView {
                        cards: hand.cards.clone(),
                        value: hand.value(),
                        bet: hand.bet,
                        doubled: hand.doubled,
                        active: self.status == RoundStatus::Playing
                            && i == game.seat.active_hand_index,
                        result: self.settlements.get(i).map(|s| s.result),
                    })
                    .collect();

                let dealer: Vec<Option<Card>> = game
                    .dealer_hand
                    .iter()
                    .enumerate()
                    .map(|(i, card)| (!(hide_hole && i == 1)).then_some(*card))
                    .collect();
                let visible: Vec<Card> = dealer.iter().flatten().copied().collect();
                let value = (!visible.is_empty()).then(|| calculate_hand_value(&visible));

                (hands, dealer, value)
            }
            None => (Vec::new(), Vec::new(), None),
        };

        TableSnapshot {
            round_id: self.round_id,
            bankroll: self.bankroll,
            bets: self.bets,
            player_hands,
            dealer_cards,
            dealer_value,
            status: self.status,
            message: self.message.clone(),
            commentary: self.commentary.clone(),
            side_bet_results: self.side_bet_results.clone(),
            result: self.headline_result(),
            can_double: self.can_double(),
            can_split: self.can_split(),
        }
    }
}
