use clap::Parser;
use log::LevelFilter;
use midnight_ace::config::{TableConfig, DEFAULT_STARTING_BANKROLL};

#[derive(Parser, Debug)]
#[command(
    name = "midnight-ace",
    about = "Single-player blackjack at the Midnight Ace table"
)]
pub struct Cli {
    /// Seed for the shoe and the dealer's phrases (random when omitted)
    #[arg(long, env = "MIDNIGHT_ACE_SEED")]
    pub seed: Option<u64>,

    /// Starting bankroll, also what the house stakes you back to when broke
    #[arg(long, env = "MIDNIGHT_ACE_BANKROLL", default_value_t = DEFAULT_STARTING_BANKROLL)]
    pub bankroll: u64,

    /// Delay between dealer draws in milliseconds (0 shows the result at once)
    #[arg(long, env = "MIDNIGHT_ACE_PACE_MS", default_value_t = 500)]
    pub pace_ms: u64,

    /// Level for the game log panel: error, warn, info, debug, trace
    #[arg(long, env = "MIDNIGHT_ACE_LOG", default_value = "info")]
    pub log_level: LevelFilter,
}

impl Cli {
    pub fn table_config(&self) -> TableConfig {
        TableConfig::with_starting_bankroll(self.bankroll)
    }
}
