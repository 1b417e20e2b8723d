use crate::TableError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_STARTING_BANKROLL: u64 = 1000;
pub const DEFAULT_CHIP_VALUES: [u64; 5] = [10, 25, 50, 100, 500];
/// Keeps payouts (up to 101x a stake) far from `u64` overflow.
pub const MAX_STARTING_BANKROLL: u64 = 1_000_000_000;

/// Session settings. House rules (dealer stands on 17, 3:2 blackjack, one
/// split, one double) are fixed and deliberately not part of this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Bankroll at session start, and what the house stakes a broke player
    /// back to when a new round begins.
    pub starting_bankroll: u64,
    /// Chip denominations offered by the presentation layer, ascending.
    pub chip_values: Vec<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            starting_bankroll: DEFAULT_STARTING_BANKROLL,
            chip_values: DEFAULT_CHIP_VALUES.to_vec(),
        }
    }
}

impl TableConfig {
    pub fn with_starting_bankroll(starting_bankroll: u64) -> Self {
        Self {
            starting_bankroll,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), TableError> {
        if self.starting_bankroll == 0 {
            return Err(TableError::InvalidConfig(
                "starting bankroll must be positive".to_string(),
            ));
        }
        if self.starting_bankroll > MAX_STARTING_BANKROLL {
            return Err(TableError::InvalidConfig(format!(
                "starting bankroll above {MAX_STARTING_BANKROLL}"
            )));
        }
        if self.chip_values.is_empty() {
            return Err(TableError::InvalidConfig("no chip values".to_string()));
        }
        if self.chip_values.contains(&0) {
            return Err(TableError::InvalidConfig("zero chip value".to_string()));
        }
        if self.chip_values.windows(2).any(|w| w[0] >= w[1]) {
            return Err(TableError::InvalidConfig(
                "chip values must be strictly ascending".to_string(),
            ));
        }
        Ok(())
    }

    /// The chip for a 1-based key press, if there is one.
    pub fn chip(&self, position: usize) -> Option<u64> {
        position
            .checked_sub(1)
            .and_then(|i| self.chip_values.get(i))
            .copied()
    }
}
