//! The round state machine.
//!
//! Every player intent goes through [`Table::execute`], which copies the
//! table, applies exactly one transition and returns the result together
//! with the snapshots a presentation layer should show, in order. Intents
//! that are not legal right now leave the table untouched apart from the
//! message.

mod execute;
mod instantiate;
mod query;

pub use query::{HandView, TableSnapshot};

use crate::commentary::{is_stale, CommentaryRequest};
use crate::msg::Intent;
use crate::state::{RoundStatus, Table};
use crate::TableError;
use rand::Rng;

/// Outcome of one [`Table::execute`] call
#[derive(Debug, Clone)]
pub struct Transition {
    pub table: Table,
    /// Observable states in order. The last one always matches `table`.
    /// Dealer draws get a frame each so they can be paced by the caller.
    pub frames: Vec<TableSnapshot>,
    /// Fire-and-forget request for dealer banter, if this step warrants one.
    pub commentary: Option<CommentaryRequest>,
    /// Set when the intent was refused.
    pub rejection: Option<TableError>,
}

impl Transition {
    pub fn is_rejected(&self) -> bool {
        self.rejection.is_some()
    }
}

impl Table {
    pub fn execute<R: Rng + ?Sized>(&self, intent: Intent, rng: &mut R) -> Transition {
        let mut next = self.clone();
        let mut ctx = execute::StepContext::new(rng);

        let applied = match intent {
            Intent::PlaceBet { target, amount } => execute::place_bet(&mut next, target, amount),
            Intent::ClearBets => execute::clear_bets(&mut next),
            Intent::Deal => execute::deal(&mut next, &mut ctx),
            Intent::Hit => execute::hit(&mut next, &mut ctx),
            Intent::Stand => execute::stand(&mut next, &mut ctx),
            Intent::Double => execute::double(&mut next, &mut ctx),
            Intent::Split => execute::split(&mut next, &mut ctx),
            Intent::NewRound => execute::new_round(&mut next, &mut ctx),
        };

        match applied {
            Ok(()) => {
                log::info!(
                    "round {}: {} -> {} (bankroll {})",
                    next.round_id,
                    intent.name(),
                    next.status,
                    next.bankroll
                );
                let (mut frames, commentary) = ctx.finish();
                frames.push(next.snapshot());
                Transition {
                    table: next,
                    frames,
                    commentary,
                    rejection: None,
                }
            }
            Err(err) => {
                log::debug!("round {}: {} refused: {err}", self.round_id, intent.name());
                let mut unchanged = self.clone();
                unchanged.message = err.to_string();
                Transition {
                    frames: vec![unchanged.snapshot()],
                    table: unchanged,
                    commentary: None,
                    rejection: Some(err),
                }
            }
        }
    }

    /// Double is offered on a two-card hand, once per round, when the
    /// bankroll covers the hand's stake again.
    pub fn can_double(&self) -> bool {
        self.status == RoundStatus::Playing
            && !self.has_doubled
            && self.game.as_ref().is_some_and(|g| {
                g.can_double_current_hand() && self.bankroll >= g.seat.active_hand().bet
            })
    }

    /// Split is offered once, on an unsplit pair, when the bankroll covers a
    /// second stake.
    pub fn can_split(&self) -> bool {
        self.status == RoundStatus::Playing
            && !self.has_split
            && self.game.as_ref().is_some_and(|g| {
                g.can_split_current_hand() && self.bankroll >= g.seat.active_hand().bet
            })
    }

    /// Store an answer to a commentary request unless the table has moved on
    /// since it was asked. Returns whether it was kept.
    pub fn accept_commentary(&mut self, request: &CommentaryRequest, text: String) -> bool {
        if is_stale(request, self.round_id, self.status) {
            log::debug!(
                "Dropping commentary for round {} ({}), table is on {} ({})",
                request.round_id,
                request.status,
                self.round_id,
                self.status
            );
            return false;
        }
        self.commentary = text;
        true
    }
}

#[cfg(test)]
mod tests;
