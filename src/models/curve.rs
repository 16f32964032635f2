//! Curve inputs and derived per-point values.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_QUOTE_PRICE, INITIAL_RESERVE_DIVISOR, LAMPORTS_PER_SOL,
};

/// Inputs of a constant-reserve-ratio bonding curve.
///
/// Reserves are expressed in display units of the reserve currency
/// (SOL, not lamports).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveParameters {
    /// Reserve held by the curve before any token is sold.
    pub initial_reserve: f64,
    /// Reserve at which the curve completes.
    pub target_reserve: f64,
    /// Constant reserve ratio, strictly between 0 and 1.
    pub reserve_ratio: f64,
    /// Tokens allocated to the curve.
    pub total_supply: u64,
}

impl CurveParameters {
    pub fn new(
        initial_reserve: f64,
        target_reserve: f64,
        reserve_ratio: f64,
        total_supply: u64,
    ) -> Self {
        Self {
            initial_reserve,
            target_reserve,
            reserve_ratio,
            total_supply,
        }
    }

    /// Plan a curve from its completion target alone.
    ///
    /// The initial reserve is a quarter of the target, which keeps the
    /// early price low without making the first buys free.
    pub fn from_target(target_reserve: f64, reserve_ratio: f64, total_supply: u64) -> Self {
        Self::new(
            target_reserve / INITIAL_RESERVE_DIVISOR,
            target_reserve,
            reserve_ratio,
            total_supply,
        )
    }

    /// Total supply as a float, for the curve math.
    #[inline]
    pub fn supply(&self) -> f64 {
        self.total_supply as f64
    }
}

/// How reserve amounts map to base units and to fiat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    /// Base units per display unit (lamports per SOL).
    pub base_unit_scale: f64,
    /// Fiat value of one display unit of reserve currency.
    pub quote_price: f64,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            base_unit_scale: LAMPORTS_PER_SOL,
            quote_price: DEFAULT_QUOTE_PRICE,
        }
    }
}

/// The curve evaluated at one sweep fraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveSample {
    /// Position in the sweep, in `[0, 1]`.
    pub fraction: f64,
    /// Reserve at this point, in display units.
    pub reserve_at_point: f64,
    /// `(reserve / initial_reserve) ^ reserve_ratio`.
    pub price_ratio: f64,
    pub tokens_sold: f64,
    /// Spot price in base units per token.
    pub price_at_point: f64,
    /// Spot price in display units per token.
    pub price_quote: f64,
    /// Spot price in fiat per token.
    pub price_fiat: f64,
    pub percent_of_supply_sold: f64,
    pub percent_price_increase: f64,
    /// Fiat market cap of the full supply at this price.
    pub market_cap: f64,
}

/// Headline numbers of a curve between its initial and target reserves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveSummary {
    /// Initial price in display units per token.
    pub initial_price: f64,
    /// Final price in display units per token.
    pub final_price: f64,
    pub initial_price_fiat: f64,
    pub final_price_fiat: f64,
    /// Price ratio at the target reserve.
    pub price_ratio: f64,
    /// Tokens sold once the target reserve is reached.
    pub tokens_sold: f64,
    pub percent_sold: f64,
    pub final_market_cap: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_target_derives_quarter_initial_reserve() {
        let params = CurveParameters::from_target(100.0, 0.5, 1_000);
        assert_eq!(params.initial_reserve, 25.0);
        assert_eq!(params.target_reserve, 100.0);
        assert_eq!(params.reserve_ratio, 0.5);
        assert_eq!(params.total_supply, 1_000);
    }

    #[test]
    fn default_pricing_uses_lamports() {
        let pricing = Pricing::default();
        assert_eq!(pricing.base_unit_scale, 1e9);
        assert_eq!(pricing.quote_price, 210.0);
    }
}
