use serde::{Deserialize, Serialize};

/// The dealer draws below this total and stands on anything at or above it,
/// soft or hard.
pub const DEALER_STANDS_ON: u8 = 17;

/// Total return on a stake as a ratio (stake included)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutRatio {
    pub numerator: u16,
    pub denominator: u16,
}

impl PayoutRatio {
    /// Even-money win: stake back plus the same again.
    pub const TWO_TO_ONE: Self = Self {
        numerator: 2,
        denominator: 1,
    };
    /// Blackjack: stake back plus 3:2.
    pub const FIVE_TO_TWO: Self = Self {
        numerator: 5,
        denominator: 2,
    };
    /// Push: stake back.
    pub const ONE_TO_ONE: Self = Self {
        numerator: 1,
        denominator: 1,
    };
    pub const NOTHING: Self = Self {
        numerator: 0,
        denominator: 1,
    };

    pub fn new(numerator: u16, denominator: u16) -> Result<Self, &'static str> {
        if denominator == 0 {
            return Err("Denominator cannot be zero");
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Integer payout, fractions of a chip are rounded down. Saturates at
    /// `u64::MAX`.
    pub fn calculate_payout(&self, bet: u64) -> u64 {
        let payout = bet as u128 * self.numerator as u128 / self.denominator as u128;
        u64::try_from(payout).unwrap_or(u64::MAX)
    }
}

/// How a player hand finished against the dealer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundResult {
    PlayerWin,
    DealerWin,
    Push,
    Blackjack,
    Bust,
}

impl RoundResult {
    pub fn return_ratio(&self) -> PayoutRatio {
        match self {
            RoundResult::PlayerWin => PayoutRatio::TWO_TO_ONE,
            RoundResult::Blackjack => PayoutRatio::FIVE_TO_TWO,
            RoundResult::Push => PayoutRatio::ONE_TO_ONE,
            RoundResult::DealerWin | RoundResult::Bust => PayoutRatio::NOTHING,
        }
    }

    pub fn payout(&self, bet: u64) -> u64 {
        self.return_ratio().calculate_payout(bet)
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            RoundResult::PlayerWin => "PLAYER_WIN",
            RoundResult::DealerWin => "DEALER_WIN",
            RoundResult::Push => "PUSH",
            RoundResult::Blackjack => "BLACKJACK",
            RoundResult::Bust => "BUST",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "PLAYER_WIN" => Some(RoundResult::PlayerWin),
            "DEALER_WIN" => Some(RoundResult::DealerWin),
            "PUSH" => Some(RoundResult::Push),
            "BLACKJACK" => Some(RoundResult::Blackjack),
            "BUST" => Some(RoundResult::Bust),
            _ => None,
        }
    }

    /// Banner shown at the table once the round is over.
    pub fn message(&self) -> &'static str {
        match self {
            RoundResult::PlayerWin => "You Win!",
            RoundResult::DealerWin => "You Lose",
            RoundResult::Push => "PUSH",
            RoundResult::Blackjack => "BLACKJACK!",
            RoundResult::Bust => "Busted!",
        }
    }
}
