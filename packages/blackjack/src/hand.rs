use crate::Card;
use serde::{Deserialize, Serialize};

/// Calculate the value of a blackjack hand
///
/// Aces start at 11 and are demoted to 1, one at a time, while the total is
/// over 21. The result is the best total not above 21 when one exists,
/// otherwise the lowest possible (busted) total.
pub fn calculate_hand_value(cards: &[Card]) -> u8 {
    let mut total: u16 = 0;
    let mut aces = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        total += card.value() as u16;
    }

    // Adjust for aces
    while total > 21 && aces > 0 {
        total -= 10; // Count ace as 1 instead of 11
        aces -= 1;
    }

    total.min(u8::MAX as u16) as u8
}

/// Check if a hand is soft (has an ace counted as 11)
pub fn is_soft_hand(cards: &[Card]) -> bool {
    let hard_total: u16 = cards
        .iter()
        .map(|c| if c.is_ace() { 1 } else { c.value() as u16 })
        .sum();
    cards.iter().any(Card::is_ace) && hard_total + 10 == calculate_hand_value(cards) as u16
}

/// Check if a hand is busted
pub fn is_busted(cards: &[Card]) -> bool {
    calculate_hand_value(cards) > 21
}

/// Check if a hand is blackjack (21 with 2 cards)
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && calculate_hand_value(cards) == 21
}

/// Check if two cards can be split (same rank)
pub fn can_split_cards(card1: &Card, card2: &Card) -> bool {
    card1.rank == card2.rank
}

/// One player hand together with the stake riding on it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Hand {
    pub cards: Vec<Card>,
    pub bet: u64,
    pub doubled: bool,
    pub stood: bool,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bet(bet: u64) -> Self {
        Self {
            bet,
            ..Self::default()
        }
    }

    pub fn value(&self) -> u8 {
        calculate_hand_value(&self.cards)
    }

    pub fn is_soft(&self) -> bool {
        is_soft_hand(&self.cards)
    }

    pub fn is_busted(&self) -> bool {
        is_busted(&self.cards)
    }

    pub fn is_blackjack(&self) -> bool {
        is_blackjack(&self.cards)
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn can_split(&self) -> bool {
        self.cards.len() == 2 && can_split_cards(&self.cards[0], &self.cards[1])
    }

    /// No more player decisions: stood, doubled, busted, or sitting on 21.
    pub fn is_finished(&self) -> bool {
        self.stood || self.doubled || self.value() >= 21
    }
}
