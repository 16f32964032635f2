//! Buy and sell quotes against the curve.
//!
//! Fees are a percentage of the reserve-currency leg: taken from the
//! input on a buy and from the proceeds on a sell.

use tracing::debug;

use super::{BondingCurveAnalyzer, CurveError};
use crate::models::{TradeQuote, TradeSide};

impl BondingCurveAnalyzer {
    /// Quote spending `amount_in` of reserve currency at `reserve`.
    pub fn quote_buy(
        &self,
        reserve: f64,
        amount_in: f64,
        fee_percentage: f64,
    ) -> Result<TradeQuote, CurveError> {
        self.check_reserve(reserve)?;
        check_amount(amount_in)?;
        check_fee(fee_percentage)?;

        let fee = amount_in * fee_percentage / 100.0;
        let reserve_after = reserve + (amount_in - fee);
        super::ensure_in_base_units("amount", reserve_after, &self.pricing)?;

        let tokens_before = self.tokens_sold_at(reserve);
        let tokens_after = self.tokens_sold_at(reserve_after);

        let quote = self.build_quote(
            TradeSide::Buy,
            amount_in,
            fee,
            tokens_after - tokens_before,
            (reserve, reserve_after),
            (tokens_before, tokens_after),
        );
        debug!(?quote, "buy quoted");
        Ok(quote)
    }

    /// Quote returning `tokens_in` to the curve at `reserve`.
    pub fn quote_sell(
        &self,
        reserve: f64,
        tokens_in: f64,
        fee_percentage: f64,
    ) -> Result<TradeQuote, CurveError> {
        self.check_reserve(reserve)?;
        check_amount(tokens_in)?;
        check_fee(fee_percentage)?;

        let tokens_before = self.tokens_sold_at(reserve);
        if tokens_in > tokens_before {
            return Err(CurveError::invalid(
                "amount",
                format!("cannot sell {tokens_in} tokens, only {tokens_before:.0} sold at this reserve"),
            ));
        }

        let tokens_after = tokens_before - tokens_in;
        let reserve_after = self.reserve_for_tokens_sold(tokens_after)?.min(reserve);
        let gross = reserve - reserve_after;
        let fee = gross * fee_percentage / 100.0;

        let quote = self.build_quote(
            TradeSide::Sell,
            tokens_in,
            fee,
            gross - fee,
            (reserve, reserve_after),
            (tokens_before, tokens_after),
        );
        debug!(?quote, "sell quoted");
        Ok(quote)
    }

    /// Dispatch on `side`.
    pub fn quote(
        &self,
        side: TradeSide,
        reserve: f64,
        amount: f64,
        fee_percentage: f64,
    ) -> Result<TradeQuote, CurveError> {
        match side {
            TradeSide::Buy => self.quote_buy(reserve, amount, fee_percentage),
            TradeSide::Sell => self.quote_sell(reserve, amount, fee_percentage),
        }
    }

    /// Quote a trade and reject it when it pays out less than `min_amount_out`.
    pub fn quote_with_min_out(
        &self,
        side: TradeSide,
        reserve: f64,
        amount: f64,
        fee_percentage: f64,
        min_amount_out: f64,
    ) -> Result<TradeQuote, CurveError> {
        if !min_amount_out.is_finite() || min_amount_out < 0.0 {
            return Err(CurveError::invalid(
                "min_amount_out",
                format!("must be a finite, non-negative value, got {min_amount_out}"),
            ));
        }

        let quote = self.quote(side, reserve, amount, fee_percentage)?;
        if quote.amount_out < min_amount_out {
            return Err(CurveError::invalid(
                "min_amount_out",
                format!(
                    "trade pays out {} but at least {min_amount_out} was required",
                    quote.amount_out
                ),
            ));
        }
        Ok(quote)
    }

    fn build_quote(
        &self,
        side: TradeSide,
        amount_in: f64,
        fee: f64,
        amount_out: f64,
        (reserve_before, reserve_after): (f64, f64),
        (tokens_sold_before, tokens_sold_after): (f64, f64),
    ) -> TradeQuote {
        let price_before = self.to_display_units(self.price_at(reserve_before));
        let price_after = self.to_display_units(self.price_at(reserve_after));

        TradeQuote {
            side,
            amount_in,
            fee,
            amount_out,
            reserve_before,
            reserve_after,
            tokens_sold_before,
            tokens_sold_after,
            price_before,
            price_after,
            price_impact_percent: (price_after - price_before) / price_before * 100.0,
            completes_curve: reserve_after >= self.params.target_reserve,
        }
    }

    fn check_reserve(&self, reserve: f64) -> Result<(), CurveError> {
        if !reserve.is_finite() || reserve < self.params.initial_reserve {
            return Err(CurveError::invalid(
                "reserve",
                format!(
                    "must be a finite value no lower than the initial reserve {}, got {reserve}",
                    self.params.initial_reserve
                ),
            ));
        }
        super::ensure_in_base_units("reserve", reserve, &self.pricing)
    }
}

fn check_amount(amount: f64) -> Result<(), CurveError> {
    super::error::ensure_positive("amount", amount).map(|_| ())
}

fn check_fee(fee_percentage: f64) -> Result<(), CurveError> {
    if !fee_percentage.is_finite() || !(0.0..100.0).contains(&fee_percentage) {
        return Err(CurveError::invalid(
            "fee_percentage",
            format!("must be within [0, 100), got {fee_percentage}"),
        ));
    }
    Ok(())
}
