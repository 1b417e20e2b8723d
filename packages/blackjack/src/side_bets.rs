//! Perfect Pairs and 21+3 side bets.
//!
//! Both bets are settled once, right after the opening deal, from the
//! player's first two cards and the dealer's up-card. Multipliers are total
//! returns: they include the original stake.

use crate::Card;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerfectPairsOutcome {
    /// Same rank, same suit.
    PerfectPair,
    /// Same rank, same color, different suit.
    ColoredPair,
    /// Same rank, different color.
    MixedPair,
}

impl PerfectPairsOutcome {
    pub fn multiplier(&self) -> u64 {
        match self {
            PerfectPairsOutcome::PerfectPair => 26,
            PerfectPairsOutcome::ColoredPair => 13,
            PerfectPairsOutcome::MixedPair => 7,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PerfectPairsOutcome::PerfectPair => "Perfect Pair (25:1)",
            PerfectPairsOutcome::ColoredPair => "Colored Pair (12:1)",
            PerfectPairsOutcome::MixedPair => "Mixed Pair (6:1)",
        }
    }
}

pub fn evaluate_perfect_pairs(p1: &Card, p2: &Card) -> Option<PerfectPairsOutcome> {
    if p1.rank != p2.rank {
        return None;
    }
    if p1.suit == p2.suit {
        Some(PerfectPairsOutcome::PerfectPair)
    } else if p1.suit.is_red() == p2.suit.is_red() {
        Some(PerfectPairsOutcome::ColoredPair)
    } else {
        Some(PerfectPairsOutcome::MixedPair)
    }
}

/// 21+3 categories, highest precedence first. Only one pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TwentyOnePlusThreeOutcome {
    SuitedTrips,
    StraightFlush,
    ThreeOfAKind,
    Straight,
    Flush,
}

impl TwentyOnePlusThreeOutcome {
    pub fn multiplier(&self) -> u64 {
        match self {
            TwentyOnePlusThreeOutcome::SuitedTrips => 101,
            TwentyOnePlusThreeOutcome::StraightFlush => 41,
            TwentyOnePlusThreeOutcome::ThreeOfAKind => 31,
            TwentyOnePlusThreeOutcome::Straight => 11,
            TwentyOnePlusThreeOutcome::Flush => 6,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TwentyOnePlusThreeOutcome::SuitedTrips => "Suited Trips (100:1)",
            TwentyOnePlusThreeOutcome::StraightFlush => "Straight Flush (40:1)",
            TwentyOnePlusThreeOutcome::ThreeOfAKind => "Three of a Kind (30:1)",
            TwentyOnePlusThreeOutcome::Straight => "Straight (10:1)",
            TwentyOnePlusThreeOutcome::Flush => "Flush (5:1)",
        }
    }
}

/// Ace is low only. The single wrap allowed is the exact set A-Q-K.
fn is_straight(cards: [&Card; 3]) -> bool {
    let mut ranks = cards.map(|c| c.rank.index());
    ranks.sort_unstable();
    let is_run = ranks[1] == ranks[0] + 1 && ranks[2] == ranks[1] + 1;
    is_run || ranks == [0, 11, 12]
}

pub fn evaluate_twenty_one_plus_three(
    p1: &Card,
    p2: &Card,
    d1: &Card,
) -> Option<TwentyOnePlusThreeOutcome> {
    let is_flush = p1.suit == p2.suit && p2.suit == d1.suit;
    let is_trips = p1.rank == p2.rank && p2.rank == d1.rank;
    let is_straight = is_straight([p1, p2, d1]);

    if is_flush && is_trips {
        Some(TwentyOnePlusThreeOutcome::SuitedTrips)
    } else if is_flush && is_straight {
        Some(TwentyOnePlusThreeOutcome::StraightFlush)
    } else if is_trips {
        Some(TwentyOnePlusThreeOutcome::ThreeOfAKind)
    } else if is_straight {
        Some(TwentyOnePlusThreeOutcome::Straight)
    } else if is_flush {
        Some(TwentyOnePlusThreeOutcome::Flush)
    } else {
        None
    }
}

/// Stakes on the two side bets, escrowed before the deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SideBetStakes {
    pub perfect_pairs: u64,
    pub plus_three: u64,
}

/// Settled side bets for one round. Labels are present whenever the cards
/// qualified, even with a zero stake, so the table can still announce them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SideBetOutcome {
    pub perfect_pairs_label: Option<String>,
    pub perfect_pairs_payout: u64,
    pub plus_three_label: Option<String>,
    pub plus_three_payout: u64,
}

impl SideBetOutcome {
    pub fn evaluate(p1: &Card, p2: &Card, d1: &Card, stakes: SideBetStakes) -> Self {
        let pairs = evaluate_perfect_pairs(p1, p2);
        let plus_three = evaluate_twenty_one_plus_three(p1, p2, d1);

        Self {
            perfect_pairs_label: pairs.map(|o| o.label().to_string()),
            perfect_pairs_payout: pairs
                .map_or(0, |o| stakes.perfect_pairs.saturating_mul(o.multiplier())),
            plus_three_label: plus_three.map(|o| o.label().to_string()),
            plus_three_payout: plus_three
                .map_or(0, |o| stakes.plus_three.saturating_mul(o.multiplier())),
        }
    }

    pub fn total_payout(&self) -> u64 {
        self.perfect_pairs_payout.saturating_add(self.plus_three_payout)
    }
}
