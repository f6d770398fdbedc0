use super::{net_value, EvPolicy, EvResult, TierTotals, UndefinedEv};
use crate::catalog::Game;

/// Unclaimed prize money spread over every ticket ever printed.
///
/// Ignores tickets already sold, so it understates EV for games that
/// are far into their run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleEv;

impl EvPolicy for SimpleEv {
    fn expected_value(&self, game: &Game) -> EvResult {
        if game.total_tickets_printed == 0 {
            return Err(UndefinedEv::NoTicketsPrinted);
        }

        let totals = TierTotals::of(game)?;
        net_value(
            totals.remaining_cents,
            game.total_tickets_printed as f64,
            game.ticket_price,
        )
    }
}
