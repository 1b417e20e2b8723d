use crate::config::TableConfig;
use crate::msg::BetTarget;
use blackjack::{Deck, GameState, RoundResult, SideBetOutcome, SideBetStakes};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const WELCOME_COMMENTARY: &str = "Welcome. Do you dare to sit at the Midnight Ace table?";
pub const PLACE_YOUR_BETS: &str = "Place your bets";

/// Where the round is. The loop is
/// BETTING -> PLAYING -> DEALER_TURN -> GAME_OVER -> BETTING.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundStatus {
    Betting,
    Playing,
    DealerTurn,
    GameOver,
}

impl RoundStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundStatus::Betting => "BETTING",
            RoundStatus::Playing => "PLAYING",
            RoundStatus::DealerTurn => "DEALER_TURN",
            RoundStatus::GameOver => "GAME_OVER",
        }
    }
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stakes escrowed from the bankroll. `main` grows when the player doubles or
/// splits, so it is always the total riding on the player's hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bets {
    pub main: u64,
    pub perfect_pairs: u64,
    pub plus_three: u64,
}

impl Bets {
    pub fn staked_total(&self) -> u64 {
        self.main
            .saturating_add(self.perfect_pairs)
            .saturating_add(self.plus_three)
    }

    pub fn side_stakes(&self) -> SideBetStakes {
        SideBetStakes {
            perfect_pairs: self.perfect_pairs,
            plus_three: self.plus_three,
        }
    }

    pub fn get(&self, target: BetTarget) -> u64 {
        match target {
            BetTarget::Main => self.main,
            BetTarget::PerfectPairs => self.perfect_pairs,
            BetTarget::PlusThree => self.plus_three,
        }
    }

    pub(crate) fn add(&mut self, target: BetTarget, amount: u64) {
        match target {
            BetTarget::Main => self.main = self.main.saturating_add(amount),
            BetTarget::PerfectPairs => {
                self.perfect_pairs = self.perfect_pairs.saturating_add(amount)
            }
            BetTarget::PlusThree => self.plus_three = self.plus_three.saturating_add(amount),
        }
    }
}

/// How one player hand was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandSettlement {
    pub result: RoundResult,
    pub bet: u64,
    pub payout: u64,
}

/// The whole table: the bankroll, which outlives rounds, plus the current
/// round (shoe, hands, bets, status).
///
/// Tables are only changed through [`Table::execute`](crate::Table::execute),
/// which hands back a new table and leaves the old one untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub config: TableConfig,
    pub deck: Deck,
    /// `None` while betting; set by the deal.
    pub game: Option<GameState>,
    pub bankroll: u64,
    pub bets: Bets,
    pub status: RoundStatus,
    pub message: String,
    pub commentary: String,
    pub side_bet_results: Option<SideBetOutcome>,
    /// One entry per player hand, filled in at settlement.
    pub settlements: Vec<HandSettlement>,
    /// Incremented by every deal. Commentary asked about an older round, or
    /// an earlier phase of this one, is stale.
    pub round_id: u64,
    pub has_doubled: bool,
    pub has_split: bool,
}

impl Table {
    /// Result of the best-paid hand, the first hand winning ties. `None`
    /// until the round is settled.
    pub fn headline_result(&self) -> Option<RoundResult> {
        self.settlements
            .iter()
            .rev()
            .max_by_key(|s| s.payout)
            .map(|s| s.result)
    }

    pub fn total_payout(&self) -> u64 {
        self.settlements
            .iter()
            .fold(0u64, |total, s| total.saturating_add(s.payout))
    }

    pub fn active_hand_value(&self) -> Option<u8> {
        self.game.as_ref().map(|g| g.seat.active_hand().value())
    }
}
