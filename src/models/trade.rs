//! Trade quote types.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Direction of a trade against the curve.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TradeSide {
    /// Pay reserve currency, receive tokens.
    Buy,
    /// Return tokens, receive reserve currency.
    Sell,
}

/// Result of quoting a single trade.
///
/// Amounts of reserve currency are in display units. For a buy,
/// `amount_in` is reserve currency and `amount_out` is tokens; for a sell
/// it is the other way around. `fee` is always charged in reserve currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeQuote {
    pub side: TradeSide,
    pub amount_in: f64,
    pub fee: f64,
    pub amount_out: f64,
    pub reserve_before: f64,
    pub reserve_after: f64,
    pub tokens_sold_before: f64,
    pub tokens_sold_after: f64,
    /// Spot price before the trade, display units per token.
    pub price_before: f64,
    /// Spot price after the trade, display units per token.
    pub price_after: f64,
    pub price_impact_percent: f64,
    /// Whether the trade takes the reserve to the curve target.
    pub completes_curve: bool,
}

impl TradeQuote {
    /// Average execution price in display units per token.
    ///
    /// Fees are included on the side the trader sees them.
    pub fn average_price(&self) -> f64 {
        let (reserve_leg, token_leg) = match self.side {
            TradeSide::Buy => (self.amount_in, self.amount_out),
            TradeSide::Sell => (self.amount_out, self.amount_in),
        };
        if token_leg > 0.0 {
            reserve_leg / token_leg
        } else {
            0.0
        }
    }
}
