//! Dealer banter.
//!
//! The state machine only emits [`CommentaryRequest`]s. Whoever drives the
//! table decides when to answer them; an answer for an older round is
//! dropped, and a slow or missing answer never holds up play.

use crate::state::RoundStatus;
use blackjack::RoundResult;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PHRASE: &str = "The cards await your decision.";

const BETTING_PHRASES: &[&str] = &[
    "Place your bets wisely, player.",
    "Feeling lucky today?",
    "The cards await your decision.",
    "Ready to test your fortune?",
];

const PLAYING_PHRASES: &[&str] = &[
    "Interesting choice...",
    "The tension builds.",
    "What will you do next?",
    "Think carefully now.",
    "The odds are watching.",
];

const PLAYER_WIN_PHRASES: &[&str] = &[
    "Well played! Fortune smiles upon you.",
    "A worthy victory indeed.",
    "The cards favored you this time.",
    "Impressive play!",
];

const DEALER_WIN_PHRASES: &[&str] = &[
    "Better luck next time, friend.",
    "The house prevails... for now.",
    "Sometimes the cards just don't cooperate.",
    "A close game, but not quite.",
];

const BLACKJACK_PHRASES: &[&str] = &[
    "BLACKJACK! Magnificent!",
    "A perfect 21! Well done!",
    "The cards have blessed you!",
];

const BUST_PHRASES: &[&str] = &[
    "Oh no, you've gone over!",
    "Busted! Perhaps a bit too bold?",
    "The house thanks you for your enthusiasm.",
];

const PUSH_PHRASES: &[&str] = &[
    "A tie! The cards show mercy.",
    "Neither wins, neither loses.",
    "An honorable draw.",
];

/// What the dealer is asked to comment on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentaryRequest {
    pub round_id: u64,
    /// e.g. `"A♠, 10♥"`; split hands are separated by `" | "`.
    pub player_cards: String,
    /// Only the cards the player can see.
    pub dealer_cards: String,
    pub status: RoundStatus,
    /// A result tag such as `"PLAYER_WIN"`, or free text for other events.
    pub result: Option<String>,
}

/// Produces a line of dealer commentary. Implementations must always return
/// something, falling back to a default phrase rather than failing.
pub trait Commentator {
    fn comment(&mut self, request: &CommentaryRequest) -> String;
}

/// Canned phrases picked at random.
#[derive(Debug, Clone)]
pub struct PhraseBook<R: Rng> {
    rng: R,
}

impl<R: Rng> PhraseBook<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    fn pick(&mut self, phrases: &[&'static str]) -> &'static str {
        if phrases.is_empty() {
            return DEFAULT_PHRASE;
        }
        phrases[self.rng.gen_range(0..phrases.len())]
    }

    fn phrases_for(request: &CommentaryRequest) -> &'static [&'static str] {
        match request.status {
            RoundStatus::Betting => BETTING_PHRASES,
            RoundStatus::Playing | RoundStatus::DealerTurn => PLAYING_PHRASES,
            RoundStatus::GameOver => match request.result.as_deref().and_then(RoundResult::from_tag) {
                Some(RoundResult::PlayerWin) => PLAYER_WIN_PHRASES,
                Some(RoundResult::DealerWin) => DEALER_WIN_PHRASES,
                Some(RoundResult::Blackjack) => BLACKJACK_PHRASES,
                Some(RoundResult::Bust) => BUST_PHRASES,
                Some(RoundResult::Push) => PUSH_PHRASES,
                None => PLAYING_PHRASES,
            },
        }
    }
}

impl<R: Rng> Commentator for PhraseBook<R> {
    fn comment(&mut self, request: &CommentaryRequest) -> String {
        let phrases = Self::phrases_for(request);
        self.pick(phrases).to_string()
    }
}

/// A response is stale once the table has moved on from the moment it was
/// asked about: a newer deal, or a later phase of the same round.
pub fn is_stale(request: &CommentaryRequest, current_round: u64, current_status: RoundStatus) -> bool {
    request.round_id != current_round || request.status != current_status
}
