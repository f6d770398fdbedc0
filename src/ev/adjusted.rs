use super::{net_value, EvPolicy, EvResult, TierTotals, UndefinedEv};
use crate::catalog::Game;

/// Unclaimed prize money spread over an estimate of the tickets still unsold.
///
/// Assumes the share of prizes claimed equals the share of tickets sold:
///   remaining = (1 - claimed / winning) * printed
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaimAdjustedEv;

impl ClaimAdjustedEv {
    /// Fraction of the print run estimated to still be unsold.
    pub fn percent_remaining(game: &Game) -> Result<f64, UndefinedEv> {
        TierTotals::of(game)?.percent_remaining()
    }
}

impl EvPolicy for ClaimAdjustedEv {
    fn expected_value(&self, game: &Game) -> EvResult {
        if game.total_tickets_printed == 0 {
            return Err(UndefinedEv::NoTicketsPrinted);
        }

        let totals = TierTotals::of(game)?;
        let estimated_remaining = totals.percent_remaining()? * game.total_tickets_printed as f64;
        if estimated_remaining == 0.0 {
            return Err(UndefinedEv::NoTicketsRemaining);
        }

        net_value(totals.remaining_cents, estimated_remaining, game.ticket_price)
    }
}
