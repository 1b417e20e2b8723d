use crate::{calculate_hand_value, Card, Hand, RoundResult, DEALER_STANDS_ON};
use serde::{Deserialize, Serialize};

/// Hard cap on player hands: the primary hand plus one split hand.
pub const MAX_HANDS: usize = 2;

/// The player's place at the table (holds two hands after a split)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub hands: Vec<Hand>,
    pub active_hand_index: usize,
}

impl Seat {
    pub fn new(bet: u64) -> Self {
        Self {
            hands: vec![Hand::with_bet(bet)],
            active_hand_index: 0,
        }
    }

    pub fn active_hand(&self) -> &Hand {
        &self.hands[self.active_hand_index]
    }

    pub fn active_hand_mut(&mut self) -> &mut Hand {
        &mut self.hands[self.active_hand_index]
    }

    pub fn is_split(&self) -> bool {
        self.hands.len() > 1
    }

    pub fn has_next_hand(&self) -> bool {
        self.active_hand_index + 1 < self.hands.len()
    }

    pub fn move_to_next_hand(&mut self) -> bool {
        if self.has_next_hand() {
            self.active_hand_index += 1;
            true
        } else {
            false
        }
    }

    /// Only an unsplit two-card pair of equal rank can be split, and only once.
    pub fn can_split(&self) -> bool {
        self.hands.len() < MAX_HANDS && self.active_hand().can_split()
    }

    /// Move the second card into a new hand carrying the same stake. Each
    /// resulting hand holds a single card until the caller deals to it.
    pub fn split(&mut self) -> Result<(), &'static str> {
        if !self.can_split() {
            return Err("Cannot split");
        }

        let hand = &mut self.hands[0];
        let second_card = hand.cards.pop().ok_or("No second card")?;

        let mut new_hand = Hand::with_bet(hand.bet);
        new_hand.add_card(second_card);
        self.hands.push(new_hand);

        Ok(())
    }

    pub fn all_hands_finished(&self) -> bool {
        self.hands.iter().all(Hand::is_finished)
    }

    /// True while at least one hand can still beat the dealer.
    pub fn has_live_hand(&self) -> bool {
        self.hands.iter().any(|h| !h.is_busted())
    }

    pub fn total_bet(&self) -> u64 {
        self.hands.iter().map(|h| h.bet).sum()
    }
}

impl Default for Seat {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Card-level state of one round: the player's seat and the dealer's hand.
/// The dealer's first card is the up-card, the second the hole card.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameState {
    pub seat: Seat,
    pub dealer_hand: Vec<Card>,
}

impl GameState {
    /// Lay out the opening deal, dealt in p1, d1, p2, d2 order.
    pub fn from_initial_deal(bet: u64, p1: Card, d1: Card, p2: Card, d2: Card) -> Self {
        let mut seat = Seat::new(bet);
        seat.active_hand_mut().add_card(p1);
        seat.active_hand_mut().add_card(p2);
        Self {
            seat,
            dealer_hand: vec![d1, d2],
        }
    }

    pub fn dealer_up_card(&self) -> Option<&Card> {
        self.dealer_hand.first()
    }

    pub fn dealer_value(&self) -> u8 {
        calculate_hand_value(&self.dealer_hand)
    }

    pub fn dealer_should_hit(&self) -> bool {
        dealer_should_hit(&self.dealer_hand)
    }

    pub fn can_double_current_hand(&self) -> bool {
        let hand = self.seat.active_hand();
        hand.cards.len() == 2 && !hand.doubled && !hand.stood
    }

    pub fn can_split_current_hand(&self) -> bool {
        self.seat.can_split()
    }

    /// Settle every player hand against the current dealer hand.
    pub fn results(&self) -> Vec<RoundResult> {
        self.seat
            .hands
            .iter()
            .map(|hand| determine_result(hand, &self.dealer_hand))
            .collect()
    }
}

/// Dealer draws below 17 and stands on every 17, soft ones included.
pub fn dealer_should_hit(dealer_cards: &[Card]) -> bool {
    calculate_hand_value(dealer_cards) < DEALER_STANDS_ON
}

/// Compare a finished player hand with the dealer. Checked in order: player
/// bust, two-card 21, dealer bust, then higher total.
pub fn determine_result(hand: &Hand, dealer_cards: &[Card]) -> RoundResult {
    let player = hand.value();
    let dealer = calculate_hand_value(dealer_cards);

    if player > 21 {
        RoundResult::Bust
    } else if player == 21 && hand.cards.len() == 2 {
        RoundResult::Blackjack
    } else if dealer > 21 {
        RoundResult::PlayerWin
    } else if dealer > player {
        RoundResult::DealerWin
    } else if dealer < player {
        RoundResult::PlayerWin
    } else {
        RoundResult::Push
    }
}
