use super::*;
use crate::config::TableConfig;
use crate::msg::BetTarget;
use crate::state::{Bets, WELCOME_COMMENTARY};
use blackjack::{Card, Deck, Rank, RoundResult, Suit};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn c(rank: Rank, suit: Suit) -> Card {
    Card::new(rank, suit)
}

/// A shoe that deals `script` in order, on top of enough filler that no
/// reshuffle kicks in.
fn stacked(script: &[Card]) -> Deck {
    let mut cards = vec![c(Rank::Two, Suit::Clubs); 30];
    cards.extend(script.iter().rev());
    Deck::from_cards(cards)
}

fn table_with(bankroll: u64, script: &[Card]) -> Table {
    Table::with_deck(TableConfig::with_starting_bankroll(bankroll), stacked(script)).unwrap()
}

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(7)
}

fn run(table: &Table, intent: Intent) -> Transition {
    table.execute(intent, &mut rng())
}

fn ok(table: &Table, intent: Intent) -> Table {
    let transition = run(table, intent);
    assert!(
        transition.rejection.is_none(),
        "{} refused: {:?}",
        intent.name(),
        transition.rejection
    );
    transition.table
}

fn bet_main(table: &Table, amount: u64) -> Table {
    ok(
        table,
        Intent::PlaceBet {
            target: BetTarget::Main,
            amount,
        },
    )
}

#[test]
fn test_new_table() {
    let table = table_with(1000, &[]);
    assert_eq!(table.status, RoundStatus::Betting);
    assert_eq!(table.bankroll, 1000);
    assert_eq!(table.message, "Place your bets");
    assert_eq!(table.commentary, WELCOME_COMMENTARY);
    assert_eq!(table.round_id, 0);
}

#[test]
fn test_new_table_rejects_bad_config() {
    let config = TableConfig::with_starting_bankroll(0);
    let err = Table::with_deck(config, stacked(&[])).unwrap_err();
    assert!(matches!(err, TableError::InvalidConfig(_)));
}

#[test]
fn test_place_bet_escrows_stake() {
    let table = table_with(1000, &[]);
    let table = bet_main(&table, 25);
    let table = bet_main(&table, 10);
    let table = ok(
        &table,
        Intent::PlaceBet {
            target: BetTarget::PlusThree,
            amount: 50,
        },
    );

    assert_eq!(table.bets.main, 35);
    assert_eq!(table.bets.plus_three, 50);
    assert_eq!(table.bankroll, 1000 - 85);
}

#[test]
fn test_place_bet_beyond_bankroll_is_refused() {
    let table = table_with(100, &[]);
    let table = bet_main(&table, 60);

    let transition = run(
        &table,
        Intent::PlaceBet {
            target: BetTarget::Main,
            amount: 50,
        },
    );
    assert_eq!(
        transition.rejection,
        Some(TableError::InsufficientBankroll {
            needed: 50,
            available: 40
        })
    );
    assert_eq!(transition.table.bankroll, 40);
    assert_eq!(transition.table.bets.main, 60);
    assert_eq!(transition.frames.len(), 1);
}

#[test]
fn test_zero_stake_is_refused() {
    let table = table_with(100, &[]);
    let transition = run(
        &table,
        Intent::PlaceBet {
            target: BetTarget::PerfectPairs,
            amount: 0,
        },
    );
    assert_eq!(transition.rejection, Some(TableError::ZeroStake));
}

#[test]
fn test_clear_bets_refunds_everything() {
    let table = table_with(1000, &[]);
    let table = bet_main(&table, 100);
    let table = ok(
        &table,
        Intent::PlaceBet {
            target: BetTarget::PerfectPairs,
            amount: 25,
        },
    );
    let table = ok(&table, Intent::ClearBets);
    assert_eq!(table.bankroll, 1000);
    assert_eq!(table.bets.staked_total(), 0);

    // Nothing staged: still fine, nothing moves
    let again = ok(&table, Intent::ClearBets);
    assert_eq!(again.bankroll, 1000);
}

#[test]
fn test_deal_needs_main_bet() {
    let table = table_with(1000, &[]);
    let table = ok(
        &table,
        Intent::PlaceBet {
            target: BetTarget::PlusThree,
            amount: 10,
        },
    );
    let transition = run(&table, Intent::Deal);
    assert_eq!(transition.rejection, Some(TableError::NoMainBet));
    assert_eq!(transition.table.message, "You must place a main bet first!");
    assert_eq!(transition.table.status, RoundStatus::Betting);
    assert_eq!(transition.table.bankroll, 990);
}

#[test]
fn test_actions_out_of_turn_are_refused() {
    let table = table_with(1000, &[]);
    for intent in [Intent::Hit, Intent::Stand, Intent::Double, Intent::Split, Intent::NewRound] {
        let transition = run(&table, intent);
        assert!(matches!(
            transition.rejection,
            Some(TableError::WrongStatus { .. })
        ));
        let mut expected = table.clone();
        expected.message = transition.table.message.clone();
        assert_eq!(transition.table, expected);
    }
}

#[test]
fn test_natural_pays_three_to_two() {
    let table = table_with(
        1000,
        &[
            c(Rank::Ace, Suit::Spades),
            c(Rank::Nine, Suit::Clubs),
            c(Rank::King, Suit::Hearts),
            c(Rank::Seven, Suit::Diamonds),
        ],
    );
    let table = bet_main(&table, 50);
    let transition = run(&table, Intent::Deal);
    let table = transition.table;

    assert_eq!(table.status, RoundStatus::GameOver);
    assert_eq!(table.bankroll, 1075);
    assert_eq!(table.headline_result(), Some(RoundResult::Blackjack));
    assert_eq!(table.message, "BLACKJACK!");
    assert_eq!(table.game.as_ref().unwrap().dealer_hand.len(), 2);

    assert_eq!(transition.frames.len(), 2);
    assert_eq!(transition.frames[0].status, RoundStatus::DealerTurn);
    assert_eq!(transition.frames[0].message, "Blackjack!");
    assert_eq!(transition.frames[1].result, Some(RoundResult::Blackjack));

    let request = transition.commentary.unwrap();
    assert_eq!(request.status, RoundStatus::GameOver);
    assert_eq!(request.result.as_deref(), Some("BLACKJACK"));
    assert_eq!(request.player_cards, "A♠, K♥");
}

#[test]
fn test_stand_on_18_loses_to_dealer_19() {
    let table = table_with(
        1000,
        &[
            c(Rank::Ten, Suit::Hearts),
            c(Rank::Ten, Suit::Clubs),
            c(Rank::Eight, Suit::Spades),
            c(Rank::Two, Suit::Diamonds),
            c(Rank::Seven, Suit::Clubs),
        ],
    );
    let table = bet_main(&table, 50);
    let table = ok(&table, Intent::Deal);
    assert_eq!(table.status, RoundStatus::Playing);
    assert_eq!(table.message, "Your turn");

    let snapshot = table.snapshot();
    assert_eq!(snapshot.dealer_cards, vec![Some(c(Rank::Ten, Suit::Clubs)), None]);
    assert_eq!(snapshot.dealer_value, Some(10));
    assert!(snapshot.hole_card_hidden());

    let transition = run(&table, Intent::Stand);
    let table = &transition.table;
    assert_eq!(table.status, RoundStatus::GameOver);
    assert_eq!(table.game.as_ref().unwrap().dealer_value(), 19);
    assert_eq!(table.headline_result(), Some(RoundResult::DealerWin));
    assert_eq!(table.total_payout(), 0);
    assert_eq!(table.bankroll, 950);
    assert_eq!(table.message, "You Lose");

    // Dealer turn, one draw, settlement
    assert_eq!(transition.frames.len(), 3);
    assert_eq!(transition.frames[0].status, RoundStatus::DealerTurn);
    assert_eq!(transition.frames[0].dealer_cards.len(), 2);
    assert!(!transition.frames[0].hole_card_hidden());
    assert_eq!(transition.frames[1].dealer_cards.len(), 3);
    assert_eq!(transition.frames[2].status, RoundStatus::GameOver);
}

#[test]
fn test_hit_to_21_ends_player_turn() {
    let table = table_with(
        1000,
        &[
            c(Rank::Ten, Suit::Hearts),
            c(Rank::Nine, Suit::Clubs),
            c(Rank::Five, Suit::Spades),
            c(Rank::Eight, Suit::Diamonds),
            c(Rank::Six, Suit::Hearts),
        ],
    );
    let table = bet_main(&table, 50);
    let table = ok(&table, Intent::Deal);
    let table = ok(&table, Intent::Hit);

    assert_eq!(table.status, RoundStatus::GameOver);
    assert_eq!(table.headline_result(), Some(RoundResult::PlayerWin));
    assert_eq!(table.bankroll, 1050);
    // Dealer already had 17
    assert_eq!(table.game.as_ref().unwrap().dealer_hand.len(), 2);
}

#[test]
fn test_hit_below_21_keeps_playing() {
    let table = table_with(
        1000,
        &[
            c(Rank::Two, Suit::Hearts),
            c(Rank::Nine, Suit::Clubs),
            c(Rank::Five, Suit::Spades),
            c(Rank::Eight, Suit::Diamonds),
            c(Rank::Three, Suit::Hearts),
        ],
    );
    let table = bet_main(&table, 50);
    let table = ok(&table, Intent::Deal);
    let transition = run(&table, Intent::Hit);

    assert_eq!(transition.table.status, RoundStatus::Playing);
    assert_eq!(transition.table.active_hand_value(), Some(10));
    let request = transition.commentary.unwrap();
    assert_eq!(request.status, RoundStatus::Playing);
    assert_eq!(request.dealer_cards, "9♣");
    assert_eq!(request.round_id, 1);
}

#[test]
fn test_bust_skips_dealer_draws() {
    let table = table_with(
        1000,
        &[
            c(Rank::Ten, Suit::Hearts),
            c(Rank::Six, Suit::Clubs),
            c(Rank::Five, Suit::Spades),
            c(Rank::Two, Suit::Diamonds),
            c(Rank::King, Suit::Spades),
        ],
    );
    let table = bet_main(&table, 50);
    let table = ok(&table, Intent::Deal);
    let table = ok(&table, Intent::Hit);

    assert_eq!(table.status, RoundStatus::GameOver);
    assert_eq!(table.headline_result(), Some(RoundResult::Bust));
    assert_eq!(table.message, "Busted!");
    assert_eq!(table.bankroll, 950);
    assert_eq!(table.game.as_ref().unwrap().dealer_hand.len(), 2);
}

#[test]
fn test_double_down() {
    let table = table_with(
        1000,
        &[
            c(Rank::Five, Suit::Hearts),
            c(Rank::Nine, Suit::Clubs),
            c(Rank::Six, Suit::Spades),
            c(Rank::Eight, Suit::Diamonds),
            c(Rank::Ten, Suit::Clubs),
        ],
    );
    let table = bet_main(&table, 50);
    let table = ok(&table, Intent::Deal);
    assert!(table.can_double());

    let table = ok(&table, Intent::Double);
    assert!(table.has_doubled);
    assert_eq!(table.bets.main, 100);
    let hand = &table.game.as_ref().unwrap().seat.hands[0];
    assert_eq!(hand.bet, 100);
    assert_eq!(hand.cards.len(), 3);
    assert_eq!(table.headline_result(), Some(RoundResult::PlayerWin));
    assert_eq!(table.bankroll, 1000 - 100 + 200);
}

#[test]
fn test_double_after_hit_is_refused() {
    let table = table_with(
        1000,
        &[
            c(Rank::Two, Suit::Hearts),
            c(Rank::Nine, Suit::Clubs),
            c(Rank::Three, Suit::Spades),
            c(Rank::Eight, Suit::Diamonds),
            c(Rank::Four, Suit::Clubs),
        ],
    );
    let table = bet_main(&table, 50);
    let table = ok(&table, Intent::Deal);
    let table = ok(&table, Intent::Hit);
    assert!(!table.can_double());

    let transition = run(&table, Intent::Double);
    assert!(matches!(transition.rejection, Some(TableError::IllegalAction(_))));
    assert_eq!(transition.table.bankroll, 950);
    assert_eq!(transition.table.bets.main, 50);
}

#[test]
fn test_double_needs_bankroll() {
    let table = table_with(
        100,
        &[
            c(Rank::Five, Suit::Hearts),
            c(Rank::Nine, Suit::Clubs),
            c(Rank::Six, Suit::Spades),
            c(Rank::Eight, Suit::Diamonds),
        ],
    );
    let table = bet_main(&table, 100);
    let table = ok(&table, Intent::Deal);
    assert!(!table.can_double());

    let transition = run(&table, Intent::Double);
    assert_eq!(
        transition.rejection,
        Some(TableError::InsufficientBankroll {
            needed: 100,
            available: 0
        })
    );
}

#[test]
fn test_split_plays_both_hands() {
    let table = table_with(
        1000,
        &[
            c(Rank::Eight, Suit::Hearts),
            c(Rank::Ten, Suit::Clubs),
            c(Rank::Eight, Suit::Spades),
            c(Rank::Seven, Suit::Diamonds),
            // one card to each split hand
            c(Rank::Three, Suit::Clubs),
            c(Rank::King, Suit::Diamonds),
            // hit on hand 1
            c(Rank::Ten, Suit::Spades),
        ],
    );
    let table = bet_main(&table, 100);
    let table = ok(&table, Intent::Deal);
    assert!(table.can_split());

    let table = ok(&table, Intent::Split);
    assert_eq!(table.status, RoundStatus::Playing);
    assert_eq!(table.message, "Hand 1 - Your turn");
    assert_eq!(table.bankroll, 800);
    assert_eq!(table.bets.main, 200);
    assert!(table.has_split);
    assert!(!table.can_split());
    {
        let seat = &table.game.as_ref().unwrap().seat;
        assert_eq!(seat.hands[0].value(), 11);
        assert_eq!(seat.hands[1].value(), 18);
        assert_eq!(seat.active_hand_index, 0);
    }

    let table = ok(&table, Intent::Hit);
    assert_eq!(table.status, RoundStatus::Playing);
    assert_eq!(table.message, "Hand 2 - Your turn");
    assert_eq!(table.game.as_ref().unwrap().seat.active_hand_index, 1);

    let transition = run(&table, Intent::Stand);
    let table = &transition.table;
    assert_eq!(table.status, RoundStatus::GameOver);
    assert_eq!(
        table.settlements.iter().map(|s| s.result).collect::<Vec<_>>(),
        vec![RoundResult::PlayerWin, RoundResult::PlayerWin]
    );
    assert_eq!(table.bankroll, 800 + 400);
    assert_eq!(
        transition.commentary.unwrap().player_cards,
        "8♥, 3♣, 10♠ | 8♠, K♦"
    );
}

#[test]
fn test_split_hands_settle_independently() {
    let table = table_with(
        1000,
        &[
            c(Rank::Nine, Suit::Hearts),
            c(Rank::Ten, Suit::Clubs),
            c(Rank::Nine, Suit::Spades),
            c(Rank::Eight, Suit::Diamonds),
            c(Rank::King, Suit::Clubs),
            c(Rank::Seven, Suit::Diamonds),
        ],
    );
    let table = bet_main(&table, 10);
    let table = ok(&table, Intent::Deal);
    let table = ok(&table, Intent::Split);
    let table = ok(&table, Intent::Stand); // 19
    let table = ok(&table, Intent::Stand); // 16

    let results: Vec<_> = table.settlements.iter().map(|s| s.result).collect();
    assert_eq!(results, vec![RoundResult::PlayerWin, RoundResult::DealerWin]);
    assert_eq!(table.headline_result(), Some(RoundResult::PlayerWin));
    assert_eq!(table.message, "You Win!");
    assert_eq!(table.bankroll, 1000 - 20 + 20);
}

#[test]
fn test_split_aces_to_21_moves_on() {
    let table = table_with(
        1000,
        &[
            c(Rank::Ace, Suit::Hearts),
            c(Rank::Ten, Suit::Clubs),
            c(Rank::Ace, Suit::Spades),
            c(Rank::Nine, Suit::Diamonds),
            c(Rank::King, Suit::Clubs),
            c(Rank::Five, Suit::Diamonds),
        ],
    );
    let table = bet_main(&table, 10);
    let table = ok(&table, Intent::Deal);
    let table = ok(&table, Intent::Split);

    assert_eq!(table.message, "Hand 2 - Your turn");
    assert_eq!(table.game.as_ref().unwrap().seat.active_hand_index, 1);

    let table = ok(&table, Intent::Stand);
    assert_eq!(table.settlements[0].result, RoundResult::Blackjack);
    assert_eq!(table.settlements[0].payout, 25);
    assert_eq!(table.settlements[1].result, RoundResult::DealerWin);
    assert_eq!(table.headline_result(), Some(RoundResult::Blackjack));
}

#[test]
fn test_split_needs_a_pair() {
    let table = table_with(
        1000,
        &[
            c(Rank::King, Suit::Hearts),
            c(Rank::Ten, Suit::Clubs),
            c(Rank::Queen, Suit::Spades),
            c(Rank::Seven, Suit::Diamonds),
        ],
    );
    let table = bet_main(&table, 10);
    let table = ok(&table, Intent::Deal);
    assert!(!table.can_split());

    let transition = run(&table, Intent::Split);
    assert_eq!(
        transition.rejection,
        Some(TableError::IllegalAction("You can only split a pair"))
    );
    assert_eq!(transition.table.game, table.game);
}

#[test]
fn test_side_bets_pay_at_deal() {
    let table = table_with(
        1000,
        &[
            c(Rank::Eight, Suit::Hearts),
            c(Rank::Ten, Suit::Clubs),
            c(Rank::Eight, Suit::Diamonds),
            c(Rank::Seven, Suit::Diamonds),
        ],
    );
    let table = bet_main(&table, 50);
    let table = ok(
        &table,
        Intent::PlaceBet {
            target: BetTarget::PerfectPairs,
            amount: 10,
        },
    );
    let transition = run(&table, Intent::Deal);
    let table = &transition.table;

    assert_eq!(table.bankroll, 1000 - 60 + 130);
    assert_eq!(table.message, "Side Bet Win!");
    let outcome = table.side_bet_results.as_ref().unwrap();
    assert_eq!(outcome.perfect_pairs_label.as_deref(), Some("Colored Pair (12:1)"));
    assert_eq!(outcome.plus_three_payout, 0);
    assert_eq!(
        transition.commentary.as_ref().unwrap().result.as_deref(),
        Some("Side Bet Win: Colored Pair (12:1)")
    );
}

#[test]
fn test_new_round_resets_and_restakes() {
    let table = table_with(
        100,
        &[
            c(Rank::Ten, Suit::Hearts),
            c(Rank::Ten, Suit::Clubs),
            c(Rank::Seven, Suit::Spades),
            c(Rank::Nine, Suit::Diamonds),
        ],
    );
    let table = bet_main(&table, 100);
    let table = ok(&table, Intent::Deal);
    let table = ok(&table, Intent::Stand);
    assert_eq!(table.bankroll, 0);

    let transition = run(&table, Intent::NewRound);
    let table = &transition.table;
    assert_eq!(table.status, RoundStatus::Betting);
    assert_eq!(table.bankroll, 100);
    assert_eq!(table.bets, Bets::default());
    assert!(table.game.is_none());
    assert!(table.side_bet_results.is_none());
    assert!(table.settlements.is_empty());
    assert_eq!(table.message, "Place your bets");
    assert_eq!(
        transition.commentary.unwrap().status,
        RoundStatus::Betting
    );
}

#[test]
fn test_new_round_keeps_positive_bankroll() {
    let table = table_with(
        1000,
        &[
            c(Rank::Ten, Suit::Hearts),
            c(Rank::Ten, Suit::Clubs),
            c(Rank::Seven, Suit::Spades),
            c(Rank::Nine, Suit::Diamonds),
        ],
    );
    let table = bet_main(&table, 100);
    let table = ok(&table, Intent::Deal);
    let table = ok(&table, Intent::Stand);
    let table = ok(&table, Intent::NewRound);
    assert_eq!(table.bankroll, 900);
    assert!(!table.has_doubled);
    assert!(!table.has_split);
}

#[test]
fn test_stale_commentary_is_dropped() {
    let table = bet_main(&table_with(1000, &[]), 10);
    let table = ok(&table, Intent::Deal);
    let settled = run(&table, Intent::Stand);
    let settle_request = settled.commentary.clone().unwrap();
    assert_eq!(settle_request.status, RoundStatus::GameOver);

    let reopened = run(&settled.table, Intent::NewRound);
    let betting_request = reopened.commentary.clone().unwrap();
    let mut table = reopened.table;
    assert_eq!(table.round_id, settle_request.round_id);

    // Same round id, but the table has already reopened betting
    assert!(!table.accept_commentary(&settle_request, "late".to_string()));
    assert_eq!(table.commentary, WELCOME_COMMENTARY);
    assert!(table.accept_commentary(&betting_request, "fresh".to_string()));
    assert_eq!(table.commentary, "fresh");
}

#[test]
fn test_snapshot_to_json() {
    let table = table_with(1000, &[]);
    let json = table.snapshot().to_json().unwrap();
    assert!(json.contains("\"bankroll\":1000"));
    assert!(json.contains("\"status\":\"Betting\""));
}
