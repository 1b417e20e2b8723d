use crate::card::{Card, Rank, Suit};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A standalone draw replenishes the shoe when fewer cards than this remain.
pub const DRAW_RESHUFFLE_THRESHOLD: usize = 5;
/// The four-card initial deal replenishes when fewer cards than this remain.
pub const DEAL_RESHUFFLE_THRESHOLD: usize = 10;

pub const DECK_SIZE: usize = 52;

/// Every suit x rank combination exactly once, in suit-major order.
pub fn ordered_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(rank, suit)))
        .collect()
}

/// Fisher-Yates: walk from the last index down to 1, swapping with a
/// uniformly chosen index in `[0, i]`.
pub fn shuffle_cards<R: Rng + ?Sized>(rng: &mut R, cards: &mut [Card]) {
    for i in (1..cards.len()).rev() {
        let j = rng.gen_range(0..=i);
        cards.swap(i, j);
    }
}

pub fn new_shuffled_deck<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
    let mut cards = ordered_deck();
    shuffle_cards(rng, &mut cards);
    cards
}

/// The shoe. Cards are taken from the end of `cards`, so the last element is
/// the top card.
///
/// When a draw finds too few cards left the whole shoe is thrown away and
/// replaced by a fresh shuffled deck. Cards still in the old shoe are not
/// merged back in, so counting across a reshuffle is meaningless.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
    reshuffles: u32,
}

impl Deck {
    pub fn new_shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            cards: new_shuffled_deck(rng),
            reshuffles: 0,
        }
    }

    /// Build a shoe from an explicit card order. The last card is drawn first.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self {
            cards,
            reshuffles: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Number of times this shoe has been replaced by a fresh deck.
    pub fn reshuffles(&self) -> u32 {
        self.reshuffles
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    fn ensure_at_least<R: Rng + ?Sized>(&mut self, threshold: usize, rng: &mut R) {
        if self.cards.len() < threshold {
            log::debug!(
                "Shoe down to {} cards (need {threshold}), reshuffling a fresh deck",
                self.cards.len()
            );
            self.cards = new_shuffled_deck(rng);
            self.reshuffles += 1;
        }
    }

    fn pop(&mut self) -> Card {
        match self.cards.pop() {
            Some(card) => card,
            None => unreachable!("shoe replenished before every draw"),
        }
    }

    /// Take the top card, replenishing first when fewer than
    /// [`DRAW_RESHUFFLE_THRESHOLD`] cards remain.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Card {
        self.ensure_at_least(DRAW_RESHUFFLE_THRESHOLD, rng);
        self.pop()
    }

    /// Deal the opening four cards in the fixed order player, dealer, player,
    /// dealer. Returns `(p1, d1, p2, d2)`.
    pub fn draw_initial<R: Rng + ?Sized>(&mut self, rng: &mut R) -> (Card, Card, Card, Card) {
        self.ensure_at_least(DEAL_RESHUFFLE_THRESHOLD, rng);
        let p1 = self.pop();
        let d1 = self.pop();
        let p2 = self.pop();
        let d2 = self.pop();
        (p1, d1, p2, d2)
    }
}
