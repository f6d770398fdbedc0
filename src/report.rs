use crate::catalog::Catalog;
use crate::ev::{EvPolicy, EvResult};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use tracing::{debug, warn};

/// What to print.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportMode {
    /// One line per active game
    #[default]
    All,
    /// Only the active game with the highest EV
    Best,
}

impl FromStr for ReportMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(ReportMode::All),
            "best" => Ok(ReportMode::Best),
            other => Err(anyhow::anyhow!("unknown report mode: {}", other)),
        }
    }
}

/// EV of one active game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameReport {
    pub name: String,
    pub ticket_price: Decimal,
    pub ev: EvResult,
}

impl GameReport {
    /// `name;price;ev`, with `undefined` when there is no EV.
    pub fn line(&self) -> String {
        match self.ev {
            Ok(ev) => format!("{};{:.2};{:.2}", self.name, self.ticket_price, ev),
            Err(_) => format!("{};{:.2};undefined", self.name, self.ticket_price),
        }
    }

    /// Contest block used when only the best game is printed.
    pub fn block(&self) -> String {
        let ev = match self.ev {
            Ok(ev) => format!("{:.2}", ev),
            Err(_) => "undefined".to_string(),
        };
        format!(
            "Contest: {}\nTicket Price ($): {:.2}\nExpected Value ($): {}\n\n",
            self.name, self.ticket_price, ev
        )
    }
}

/// Compute EV for every active game, in listing order.
pub fn evaluate<P: EvPolicy>(catalog: &Catalog, policy: &P) -> Vec<GameReport> {
    catalog
        .active_games()
        .map(|game| {
            let ev = policy.expected_value(game);
            debug!(
                game = %game.game_name,
                id = ?game.game_id,
                tiers = game.prize_tiers.len(),
                ends = ?game.end_distribution(),
                ?ev,
                "Evaluated game"
            );
            if let Err(reason) = ev {
                warn!("No expected value for {}: {}", game.game_name, reason);
            }
            GameReport {
                name: game.game_name.clone(),
                ticket_price: game.ticket_price_dollars(),
                ev,
            }
        })
        .collect()
}

/// Highest defined EV. Ties keep the earlier game.
pub fn best_game(reports: &[GameReport]) -> Option<&GameReport> {
    let mut best: Option<(&GameReport, f64)> = None;
    for report in reports {
        let Ok(ev) = report.ev else { continue };
        if best.map_or(true, |(_, best_ev)| best_ev < ev) {
            best = Some((report, ev));
        }
    }
    best.map(|(report, _)| report)
}

/// Full stdout text for a mode.
pub fn render(reports: &[GameReport], mode: ReportMode) -> String {
    match mode {
        ReportMode::All => reports
            .iter()
            .map(|report| report.line() + "\n")
            .collect(),
        ReportMode::Best => match best_game(reports) {
            Some(report) => report.block(),
            None => {
                warn!("No active game with a defined expected value");
                String::new()
            }
        },
    }
}
