use super::TableSnapshot;
use crate::commentary::CommentaryRequest;
use crate::msg::BetTarget;
use crate::state::{Bets, HandSettlement, RoundStatus, Table, PLACE_YOUR_BETS};
use crate::TableError;
use blackjack::{describe_cards, Card, Deck, GameState, SideBetOutcome};
use rand::Rng;

/// Scratch space for one transition: the random source plus whatever the
/// step wants to hand back besides the final table.
pub(super) struct StepContext<'a, R: Rng + ?Sized> {
    rng: &'a mut R,
    frames: Vec<TableSnapshot>,
    commentary: Option<CommentaryRequest>,
}

impl<'a, R: Rng + ?Sized> StepContext<'a, R> {
    pub(super) fn new(rng: &'a mut R) -> Self {
        Self {
            rng,
            frames: Vec::new(),
            commentary: None,
        }
    }

    fn draw(&mut self, deck: &mut Deck) -> Card {
        deck.draw(&mut *self.rng)
    }

    /// Keep an intermediate state the player should get to see.
    fn record(&mut self, table: &Table) {
        self.frames.push(table.snapshot());
    }

    fn request_commentary(&mut self, table: &Table, result: Option<String>) {
        let Some(game) = table.game.as_ref() else {
            self.commentary = Some(CommentaryRequest {
                round_id: table.round_id,
                player_cards: String::new(),
                dealer_cards: String::new(),
                status: table.status,
                result,
            });
            return;
        };

        // Only what the player can see
        let dealer_cards = if table.status == RoundStatus::Playing {
            game.dealer_up_card()
                .map(|c| c.to_display())
                .unwrap_or_default()
        } else {
            describe_cards(&game.dealer_hand)
        };

        self.commentary = Some(CommentaryRequest {
            round_id: table.round_id,
            player_cards: describe_seat(game),
            dealer_cards,
            status: table.status,
            result,
        });
    }

    pub(super) fn finish(self) -> (Vec<TableSnapshot>, Option<CommentaryRequest>) {
        (self.frames, self.commentary)
    }
}

fn describe_seat(game: &GameState) -> String {
    game.seat
        .hands
        .iter()
        .map(|hand| describe_cards(&hand.cards))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn require_status(table: &Table, expected: RoundStatus) -> Result<(), TableError> {
    if table.status != expected {
        return Err(TableError::WrongStatus {
            expected,
            actual: table.status,
        });
    }
    Ok(())
}

fn game_mut(table: &mut Table) -> Result<&mut GameState, TableError> {
    table
        .game
        .as_mut()
        .ok_or(TableError::IllegalAction("No round in progress"))
}

fn ensure_funds(table: &Table, needed: u64) -> Result<(), TableError> {
    if table.bankroll < needed {
        return Err(TableError::InsufficientBankroll {
            needed,
            available: table.bankroll,
        });
    }
    Ok(())
}

pub(super) fn place_bet(table: &mut Table, target: BetTarget, amount: u64) -> Result<(), TableError> {
    require_status(table, RoundStatus::Betting)?;
    if amount == 0 {
        return Err(TableError::ZeroStake);
    }
    ensure_funds(table, amount)?;

    table.bankroll -= amount;
    table.bets.add(target, amount);
    table.message = PLACE_YOUR_BETS.to_string();
    Ok(())
}

pub(super) fn clear_bets(table: &mut Table) -> Result<(), TableError> {
    require_status(table, RoundStatus::Betting)?;

    table.bankroll = table.bankroll.saturating_add(table.bets.staked_total());
    table.bets = Bets::default();
    table.message = PLACE_YOUR_BETS.to_string();
    Ok(())
}

pub(super) fn deal<R: Rng + ?Sized>(table: &mut Table, ctx: &mut StepContext<R>) -> Result<(), TableError> {
    require_status(table, RoundStatus::Betting)?;
    if table.bets.main == 0 {
        return Err(TableError::NoMainBet);
    }

    table.round_id += 1;
    let (p1, d1, p2, d2) = table.deck.draw_initial(&mut *ctx.rng);
    let game = GameState::from_initial_deal(table.bets.main, p1, d1, p2, d2);

    let side_bets = SideBetOutcome::evaluate(&p1, &p2, &d1, table.bets.side_stakes());
    let side_win = side_bets.total_payout();
    table.bankroll = table.bankroll.saturating_add(side_win);
    if side_win > 0 {
        log::info!("round {}: side bets paid {side_win}", table.round_id);
    }

    let natural = game.seat.active_hand().is_blackjack();
    let side_win_text = (side_win > 0).then(|| {
        let labels: Vec<&str> = [&side_bets.perfect_pairs_label, &side_bets.plus_three_label]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect();
        format!("Side Bet Win: {}", labels.join(" "))
    });
    table.side_bet_results = Some(side_bets);
    table.game = Some(game);

    if natural {
        table.status = RoundStatus::DealerTurn;
        table.message = "Blackjack!".to_string();
        ctx.record(table);
        return settle(table, ctx);
    }

    table.status = RoundStatus::Playing;
    table.message = if side_win > 0 { "Side Bet Win!" } else { "Your turn" }.to_string();
    ctx.request_commentary(table, side_win_text);
    Ok(())
}

pub(super) fn hit<R: Rng + ?Sized>(table: &mut Table, ctx: &mut StepContext<R>) -> Result<(), TableError> {
    require_status(table, RoundStatus::Playing)?;

    let card = ctx.draw(&mut table.deck);
    let hand = game_mut(table)?.seat.active_hand_mut();
    hand.add_card(card);
    let value = hand.value();

    if value == 21 {
        table.message = "21! Dealer's turn...".to_string();
        advance(table, ctx)
    } else if value > 21 {
        table.message = "Busted!".to_string();
        advance(table, ctx)
    } else {
        ctx.request_commentary(table, None);
        Ok(())
    }
}

pub(super) fn stand<R: Rng + ?Sized>(table: &mut Table, ctx: &mut StepContext<R>) -> Result<(), TableError> {
    require_status(table, RoundStatus::Playing)?;

    game_mut(table)?.seat.active_hand_mut().stood = true;
    table.message = "Dealer's turn...".to_string();
    advance(table, ctx)
}

pub(super) fn double<R: Rng + ?Sized>(table: &mut Table, ctx: &mut StepContext<R>) -> Result<(), TableError> {
    require_status(table, RoundStatus::Playing)?;
    if table.has_doubled {
        return Err(TableError::IllegalAction("Already doubled this round"));
    }
    let bet = {
        let game = game_mut(table)?;
        if !game.can_double_current_hand() {
            return Err(TableError::IllegalAction("You can only double on your first two cards"));
        }
        game.seat.active_hand().bet
    };
    ensure_funds(table, bet)?;

    table.bankroll -= bet;
    table.bets.main += bet;
    table.has_doubled = true;

    let card = ctx.draw(&mut table.deck);
    let hand = game_mut(table)?.seat.active_hand_mut();
    hand.bet += bet;
    hand.doubled = true;
    hand.add_card(card);
    let busted = hand.is_busted();

    table.message = if busted {
        "Doubled & Busted!"
    } else {
        "Doubled! Dealer's turn..."
    }
    .to_string();
    advance(table, ctx)
}

pub(super) fn split<R: Rng + ?Sized>(table: &mut Table, ctx: &mut StepContext<R>) -> Result<(), TableError> {
    require_status(table, RoundStatus::Playing)?;
    if table.has_split {
        return Err(TableError::IllegalAction("Already split this round"));
    }
    let bet = {
        let game = game_mut(table)?;
        if !game.can_split_current_hand() {
            return Err(TableError::IllegalAction("You can only split a pair"));
        }
        game.seat.active_hand().bet
    };
    ensure_funds(table, bet)?;

    table.bankroll -= bet;
    table.bets.main += bet;
    table.has_split = true;

    let first = ctx.draw(&mut table.deck);
    let second = ctx.draw(&mut table.deck);
    let game = game_mut(table)?;
    game.seat.split().map_err(TableError::IllegalAction)?;
    game.seat.hands[0].add_card(first);
    game.seat.hands[1].add_card(second);

    table.message = "Hand 1 - Your turn".to_string();
    advance(table, ctx)
}

/// Skip past finished hands. Once none is left to play, the dealer goes.
fn advance<R: Rng + ?Sized>(table: &mut Table, ctx: &mut StepContext<R>) -> Result<(), TableError> {
    let game = table
        .game
        .as_mut()
        .ok_or(TableError::IllegalAction("No round in progress"))?;
    while game.seat.active_hand().is_finished() && game.seat.move_to_next_hand() {
        table.message = format!("Hand {} - Your turn", game.seat.active_hand_index + 1);
    }

    if game.seat.all_hands_finished() {
        play_dealer(table, ctx)
    } else {
        Ok(())
    }
}

fn play_dealer<R: Rng + ?Sized>(table: &mut Table, ctx: &mut StepContext<R>) -> Result<(), TableError> {
    table.status = RoundStatus::DealerTurn;
    ctx.record(table);

    while table
        .game
        .as_ref()
        .is_some_and(|g| g.seat.has_live_hand() && g.dealer_should_hit())
    {
        let card = ctx.draw(&mut table.deck);
        game_mut(table)?.dealer_hand.push(card);
        ctx.record(table);
    }

    settle(table, ctx)
}

fn settle<R: Rng + ?Sized>(table: &mut Table, ctx: &mut StepContext<R>) -> Result<(), TableError> {
    let game = game_mut(table)?;
    let settlements: Vec<HandSettlement> = game
        .seat
        .hands
        .iter()
        .zip(game.results())
        .map(|(hand, result)| HandSettlement {
            result,
            bet: hand.bet,
            payout: result.payout(hand.bet),
        })
        .collect();

    table.settlements = settlements;
    table.bankroll = table.bankroll.saturating_add(table.total_payout());
    table.status = RoundStatus::GameOver;

    let headline = table
        .headline_result()
        .ok_or(TableError::IllegalAction("Nothing to settle"))?;
    table.message = headline.message().to_string();
    log::info!(
        "round {} settled {}: paid {} on {} staked",
        table.round_id,
        headline.as_tag(),
        table.total_payout(),
        table.bets.main
    );

    ctx.request_commentary(table, Some(headline.as_tag().to_string()));
    Ok(())
}

pub(super) fn new_round<R: Rng + ?Sized>(table: &mut Table, ctx: &mut StepContext<R>) -> Result<(), TableError> {
    require_status(table, RoundStatus::GameOver)?;

    table.game = None;
    table.bets = Bets::default();
    table.side_bet_results = None;
    table.settlements.clear();
    table.has_doubled = false;
    table.has_split = false;
    if table.bankroll == 0 {
        log::info!(
            "Bankroll empty, the house stakes you {}",
            table.config.starting_bankroll
        );
        table.bankroll = table.config.starting_bankroll;
    }
    table.status = RoundStatus::Betting;
    table.message = PLACE_YOUR_BETS.to_string();

    ctx.request_commentary(table, None);
    Ok(())
}
