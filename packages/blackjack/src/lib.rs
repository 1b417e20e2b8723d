mod card;
mod deck;
mod game_state;
mod hand;
mod rules;
mod side_bets;

pub use card::{describe_cards, Card, Rank, Suit};
pub use deck::{
    new_shuffled_deck, ordered_deck, shuffle_cards, Deck, DEAL_RESHUFFLE_THRESHOLD, DECK_SIZE,
    DRAW_RESHUFFLE_THRESHOLD,
};
pub use game_state::{dealer_should_hit, determine_result, GameState, Seat, MAX_HANDS};
pub use hand::{calculate_hand_value, can_split_cards, is_blackjack, is_busted, is_soft_hand, Hand};
pub use rules::{PayoutRatio, RoundResult, DEALER_STANDS_ON};
pub use side_bets::{
    evaluate_perfect_pairs, evaluate_twenty_one_plus_three, PerfectPairsOutcome, SideBetOutcome,
    SideBetStakes, TwentyOnePlusThreeOutcome,
};
