use crate::state::RoundStatus;
use thiserror::Error;

/// Why an intent was refused. Refusals never end the session: the table is
/// left as it was and the message is shown to the player.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Not now: the table is {actual}, this needs {expected}")]
    WrongStatus {
        expected: RoundStatus,
        actual: RoundStatus,
    },

    #[error("Insufficient bankroll: need {needed}, have {available}")]
    InsufficientBankroll { needed: u64, available: u64 },

    #[error("You must place a main bet first!")]
    NoMainBet,

    #[error("Bet amount must be greater than zero")]
    ZeroStake,

    #[error("{0}")]
    IllegalAction(&'static str),

    #[error("Invalid table config: {0}")]
    InvalidConfig(String),
}
