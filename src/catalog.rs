use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Validation status the listing endpoint uses for games currently on sale.
pub const ACTIVE_STATUS: &str = "ACTIVE";

/// One payout bracket of a scratch-off game.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrizeTier {
    pub winning_tickets: i64,
    pub claimed_tickets: i64,
    /// Payout in cents
    pub prize_amount: i64,

    #[serde(default)]
    pub tier_number: Option<i64>,
    #[serde(default)]
    pub prize_description: Option<String>,
}

impl PrizeTier {
    pub fn new(winning_tickets: i64, claimed_tickets: i64, prize_amount: i64) -> Self {
        Self {
            winning_tickets,
            claimed_tickets,
            prize_amount,
            tier_number: None,
            prize_description: None,
        }
    }

    /// Winning tickets not yet claimed. None on overflow.
    pub fn remaining_tickets(&self) -> Option<i64> {
        self.winning_tickets.checked_sub(self.claimed_tickets)
    }

    /// Cents still sitting in unclaimed prizes for this tier. None on overflow.
    pub fn remaining_cents(&self) -> Option<i64> {
        self.remaining_tickets()?.checked_mul(self.prize_amount)
    }
}

/// Instant game as listed by the catalog endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub game_name: String,
    /// Price in cents
    pub ticket_price: i64,
    pub total_tickets_printed: i64,
    pub prize_tiers: Vec<PrizeTier>,
    pub validation_status: String,

    #[serde(default)]
    pub game_id: Option<String>,
    /// Epoch milliseconds
    #[serde(default)]
    pub start_distribution_date: Option<i64>,
    /// Epoch milliseconds
    #[serde(default)]
    pub end_distribution_date: Option<i64>,
    /// Epoch milliseconds
    #[serde(default)]
    pub disable_date: Option<i64>,
}

impl Game {
    pub fn is_active(&self) -> bool {
        self.validation_status == ACTIVE_STATUS
    }

    /// Ticket price in dollars, exact.
    pub fn ticket_price_dollars(&self) -> Decimal {
        Decimal::new(self.ticket_price, 2)
    }

    /// Last day the game is distributed to retailers, if the listing has one.
    pub fn end_distribution(&self) -> Option<DateTime<Utc>> {
        self.end_distribution_date
            .and_then(DateTime::<Utc>::from_timestamp_millis)
    }
}

/// Top-level listing payload. Paging fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Catalog {
    pub games: Vec<Game>,
}

impl Catalog {
    /// Games currently on sale, in listing order.
    pub fn active_games(&self) -> impl Iterator<Item = &Game> {
        self.games.iter().filter(|g| g.is_active())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    /// Build a game without the optional listing fields.
    pub(crate) fn game(
        name: &str,
        status: &str,
        ticket_price: i64,
        total_tickets_printed: i64,
        prize_tiers: Vec<PrizeTier>,
    ) -> Game {
        Game {
            game_name: name.to_string(),
            ticket_price,
            total_tickets_printed,
            prize_tiers,
            validation_status: status.to_string(),
            game_id: None,
            start_distribution_date: None,
            end_distribution_date: None,
            disable_date: None,
        }
    }

    #[test]
    fn test_decode_listing() {
        let json = r#"{
            "games": [
                {
                    "gameId": "1234",
                    "gameName": "Lucky 7s",
                    "ticketPrice": 200,
                    "totalTicketsPrinted": 100,
                    "validationStatus": "ACTIVE",
                    "endDistributionDate": 1700000000000,
                    "prizeTiers": [
                        {
                            "winningTickets": 10,
                            "claimedTickets": 2,
                            "paidTickets": 2,
                            "prizeAmount": 1000,
                            "prizeDescription": "$10",
                            "tierNumber": 1,
                            "tierType": 0
                        }
                    ]
                }
            ],
            "nextItems": [],
            "nextPageUrl": "",
            "pageUrls": []
        }"#;

        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.games.len(), 1);

        let g = &catalog.games[0];
        assert_eq!(g.game_name, "Lucky 7s");
        assert_eq!(g.game_id.as_deref(), Some("1234"));
        assert_eq!(g.ticket_price, 200);
        assert!(g.is_active());
        assert_eq!(g.prize_tiers[0].tier_number, Some(1));
        assert_eq!(g.prize_tiers[0].remaining_tickets(), Some(8));
        assert_eq!(g.prize_tiers[0].remaining_cents(), Some(8000));
        assert_eq!(g.start_distribution_date, None);
    }

    #[test]
    fn test_decode_rejects_missing_price() {
        let json = r#"{"games":[{"gameName":"X","totalTicketsPrinted":1,"validationStatus":"ACTIVE","prizeTiers":[]}]}"#;
        assert!(serde_json::from_str::<Catalog>(json).is_err());
    }

    #[test]
    fn test_remaining_cents_overflow() {
        let tier = PrizeTier::new(10_000_000_000, 0, 1_000_000_000_000);
        assert_eq!(tier.remaining_tickets(), Some(10_000_000_000));
        assert_eq!(tier.remaining_cents(), None);

        let tier = PrizeTier::new(i64::MAX, -1, 1);
        assert_eq!(tier.remaining_tickets(), None);
        assert_eq!(tier.remaining_cents(), None);
    }

    #[test]
    fn test_ticket_price_dollars() {
        let g = game("A", ACTIVE_STATUS, 200, 100, vec![]);
        assert_eq!(g.ticket_price_dollars(), dec!(2.00));
        assert_eq!(g.ticket_price_dollars().to_string(), "2.00");

        let g = game("B", ACTIVE_STATUS, 3050, 100, vec![]);
        assert_eq!(g.ticket_price_dollars(), dec!(30.50));
    }

    #[test]
    fn test_end_distribution() {
        let mut g = game("A", ACTIVE_STATUS, 200, 100, vec![]);
        assert_eq!(g.end_distribution(), None);

        g.end_distribution_date = Some(1_700_000_000_000);
        let end = g.end_distribution().unwrap();
        assert_eq!(end.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_active_games_filter() {
        let catalog = Catalog {
            games: vec![
                game("A", "ACTIVE", 100, 10, vec![]),
                game("B", "DISABLED", 100, 10, vec![]),
                game("C", "ACTIVE", 100, 10, vec![]),
                game("D", "active", 100, 10, vec![]),
            ],
        };

        let names: Vec<&str> = catalog
            .active_games()
            .map(|g| g.game_name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "C"]);
    }
}
