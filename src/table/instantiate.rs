use crate::config::TableConfig;
use crate::state::{Bets, RoundStatus, Table, PLACE_YOUR_BETS, WELCOME_COMMENTARY};
use crate::TableError;
use blackjack::Deck;
use rand::Rng;

impl Table {
    /// Open a table with a freshly shuffled shoe.
    pub fn new<R: Rng + ?Sized>(config: TableConfig, rng: &mut R) -> Result<Self, TableError> {
        Self::with_deck(config, Deck::new_shuffled(rng))
    }

    /// Open a table on a given shoe, e.g. a stacked one for replays.
    pub fn with_deck(config: TableConfig, deck: Deck) -> Result<Self, TableError> {
        config.validate()?;
        log::info!(
            "Opening table with bankroll {} and chips {:?}",
            config.starting_bankroll,
            config.chip_values
        );

        Ok(Self {
            bankroll: config.starting_bankroll,
            config,
            deck,
            game: None,
            bets: Bets::default(),
            status: RoundStatus::Betting,
            message: PLACE_YOUR_BETS.to_string(),
            commentary: WELCOME_COMMENTARY.to_string(),
            side_bet_results: None,
            settlements: Vec::new(),
            round_id: 0,
            has_doubled: false,
            has_split: false,
        })
    }
}
