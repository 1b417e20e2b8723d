use serde::{Deserialize, Serialize};

/// Which betting circle a chip goes into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BetTarget {
    Main,
    PerfectPairs,
    PlusThree,
}

impl BetTarget {
    pub fn label(&self) -> &'static str {
        match self {
            BetTarget::Main => "Main",
            BetTarget::PerfectPairs => "Perfect Pairs",
            BetTarget::PlusThree => "21+3",
        }
    }
}

/// Everything the player can ask the table to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    PlaceBet { target: BetTarget, amount: u64 },
    ClearBets,
    Deal,
    Hit,
    Stand,
    Double,
    Split,
    NewRound,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::PlaceBet { .. } => "place_bet",
            Intent::ClearBets => "clear_bets",
            Intent::Deal => "deal",
            Intent::Hit => "hit",
            Intent::Stand => "stand",
            Intent::Double => "double",
            Intent::Split => "split",
            Intent::NewRound => "new_round",
        }
    }
}
