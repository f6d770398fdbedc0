mod adjusted;
mod simple;

pub use adjusted::ClaimAdjustedEv;
pub use simple::SimpleEv;

use crate::catalog::Game;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Why a game has no meaningful expected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UndefinedEv {
    #[error("no tickets printed")]
    NoTicketsPrinted,
    #[error("no winning tickets in any prize tier")]
    NoWinningTickets,
    #[error("every prize already claimed")]
    NoTicketsRemaining,
    #[error("non-finite result")]
    NonFinite,
    #[error("prize totals overflow")]
    Overflow,
}

/// Expected net return per ticket in dollars, or why there isn't one.
pub type EvResult = Result<f64, UndefinedEv>;

/// A way of computing expected value per ticket.
pub trait EvPolicy {
    fn expected_value(&self, game: &Game) -> EvResult;
}

/// Per-game tier totals. Integer sums, so tier order never matters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct TierTotals {
    remaining_cents: i64,
    claimed: i64,
    winning: i64,
}

impl TierTotals {
    fn of(game: &Game) -> Result<Self, UndefinedEv> {
        game.prize_tiers
            .iter()
            .try_fold(Self::default(), |acc, tier| {
                let remaining_cents = tier
                    .remaining_cents()
                    .and_then(|cents| acc.remaining_cents.checked_add(cents));
                let claimed = acc.claimed.checked_add(tier.claimed_tickets);
                let winning = acc.winning.checked_add(tier.winning_tickets);
                match (remaining_cents, claimed, winning) {
                    (Some(remaining_cents), Some(claimed), Some(winning)) => Ok(Self {
                        remaining_cents,
                        claimed,
                        winning,
                    }),
                    _ => Err(UndefinedEv::Overflow),
                }
            })
    }

    /// Share of prizes still unclaimed, standing in for the share of tickets unsold.
    fn percent_remaining(&self) -> Result<f64, UndefinedEv> {
        if self.winning == 0 {
            return Err(UndefinedEv::NoWinningTickets);
        }
        Ok(1.0 - self.claimed as f64 / self.winning as f64)
    }
}

/// Shared tail of both formulas: remaining prize dollars per remaining ticket,
/// minus the ticket price.
fn net_value(remaining_cents: i64, remaining_tickets: f64, ticket_price: i64) -> EvResult {
    let ev = remaining_cents as f64 / (100.0 * remaining_tickets) - ticket_price as f64 / 100.0;
    if ev.is_finite() {
        Ok(ev)
    } else {
        Err(UndefinedEv::NonFinite)
    }
}

/// Configurable choice between the two formulas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    Simple,
    #[default]
    #[serde(alias = "claim-adjusted", alias = "adjusted")]
    ClaimAdjusted,
}

impl EvPolicy for Policy {
    fn expected_value(&self, game: &Game) -> EvResult {
        match self {
            Policy::Simple => SimpleEv.expected_value(game),
            Policy::ClaimAdjusted => ClaimAdjustedEv.expected_value(game),
        }
    }
}

impl FromStr for Policy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(Policy::Simple),
            "claim_adjusted" | "claim-adjusted" | "adjusted" => Ok(Policy::ClaimAdjusted),
            other => Err(anyhow::anyhow!("unknown EV policy: {}", other)),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Simple => write!(f, "simple"),
            Policy::ClaimAdjusted => write!(f, "claim_adjusted"),
        }
    }
}
