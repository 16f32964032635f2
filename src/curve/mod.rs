//! Constant-reserve-ratio bonding curve math.
//!
//! For a curve with initial reserve `R0`, reserve ratio `c` and supply `S`,
//! the state at reserve `R` is:
//!
//! ```text
//! price_ratio = (R / R0) ^ c
//! tokens_sold = S * (1 - 1 / price_ratio)
//! price       = R / (S * c)            (base units per token)
//! ```
//!
//! Reserves are converted to base units (lamports) before the price is
//! taken, so prices come out in base units per token and are scaled back
//! down for display.

pub mod error;
pub mod quote;
pub mod sweep;

pub use error::CurveError;
pub use sweep::Sweep;

use tracing::debug;

use crate::models::{
    CurveParameters, CurveReport, CurveSample, CurveSummary, Pricing, ReportLabels,
};
use error::ensure_positive;

/// Evaluates a validated curve at arbitrary points.
///
/// Construction is the only fallible step for sweep evaluation: once an
/// analyzer exists its parameters are known to be well-formed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondingCurveAnalyzer {
    params: CurveParameters,
    pricing: Pricing,
}

impl BondingCurveAnalyzer {
    /// Validate the inputs and build an analyzer.
    pub fn new(params: CurveParameters, pricing: Pricing) -> Result<Self, CurveError> {
        validate_parameters(&params)?;
        ensure_positive("base_unit_scale", pricing.base_unit_scale)?;
        ensure_positive("quote_price", pricing.quote_price)?;
        ensure_in_base_units("target_reserve", params.target_reserve, &pricing)?;

        debug!(
            initial_reserve = params.initial_reserve,
            target_reserve = params.target_reserve,
            reserve_ratio = params.reserve_ratio,
            total_supply = params.total_supply,
            "curve parameters accepted"
        );

        Ok(Self { params, pricing })
    }

    pub fn parameters(&self) -> &CurveParameters {
        &self.params
    }

    pub fn pricing(&self) -> &Pricing {
        &self.pricing
    }

    /// Reserve (display units) at a sweep fraction.
    ///
    /// The last point lands exactly on the target reserve.
    pub fn reserve_at(&self, fraction: f64) -> f64 {
        let p = &self.params;
        if fraction >= 1.0 {
            return p.target_reserve;
        }
        p.initial_reserve + (p.target_reserve - p.initial_reserve) * fraction
    }

    /// `(reserve / initial_reserve) ^ reserve_ratio`.
    ///
    /// The base-unit scale cancels, so the ratio is taken in display units.
    pub fn price_ratio_at(&self, reserve: f64) -> f64 {
        (reserve / self.params.initial_reserve).powf(self.params.reserve_ratio)
    }

    /// Tokens sold once the curve holds `reserve`.
    pub fn tokens_sold_at(&self, reserve: f64) -> f64 {
        self.params.supply() * (1.0 - 1.0 / self.price_ratio_at(reserve))
    }

    /// Spot price in base units per token at `reserve`.
    pub fn price_at(&self, reserve: f64) -> f64 {
        self.to_base_units(reserve) / (self.params.supply() * self.params.reserve_ratio)
    }

    /// Spot price in base units per token at the initial reserve.
    pub fn initial_price(&self) -> f64 {
        self.price_at(self.params.initial_reserve)
    }

    /// Evaluate the curve at a sweep fraction in `[0, 1]`.
    pub fn sample_at(&self, fraction: f64) -> Result<CurveSample, CurveError> {
        if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
            return Err(CurveError::invalid(
                "fraction",
                format!("must be within [0, 1], got {fraction}"),
            ));
        }
        Ok(self.sample_unchecked(fraction))
    }

    /// Lazily evaluate `points` evenly spaced fractions from 0 to 1.
    pub fn sweep(&self, points: usize) -> Result<Sweep, CurveError> {
        Sweep::new(*self, points)
    }

    /// Headline numbers between the initial and target reserves.
    pub fn summary(&self) -> CurveSummary {
        let p = &self.params;
        let initial_price = self.to_display_units(self.initial_price());
        let final_price = self.to_display_units(self.price_at(p.target_reserve));
        let tokens_sold = self.tokens_sold_at(p.target_reserve);

        CurveSummary {
            initial_price,
            final_price,
            initial_price_fiat: initial_price * self.pricing.quote_price,
            final_price_fiat: final_price * self.pricing.quote_price,
            price_ratio: self.price_ratio_at(p.target_reserve),
            tokens_sold,
            percent_sold: tokens_sold / p.supply() * 100.0,
            final_market_cap: final_price * self.pricing.quote_price * p.supply(),
        }
    }

    /// Run a full analysis with the given sweep granularity.
    pub fn report(&self, points: usize, labels: ReportLabels) -> Result<CurveReport, CurveError> {
        let samples: Vec<CurveSample> = self.sweep(points)?.collect();
        debug!(points = samples.len(), "sweep evaluated");

        Ok(CurveReport {
            parameters: self.params,
            pricing: self.pricing,
            labels,
            summary: self.summary(),
            samples,
        })
    }

    /// Reserve (display units) at which `tokens` have been sold.
    ///
    /// Inverse of [`tokens_sold_at`](Self::tokens_sold_at); `tokens` must
    /// lie in `[0, total_supply)`.
    pub fn reserve_for_tokens_sold(&self, tokens: f64) -> Result<f64, CurveError> {
        let supply = self.params.supply();
        if !tokens.is_finite() || tokens < 0.0 || tokens >= supply {
            return Err(CurveError::invalid(
                "tokens_sold",
                format!("must be within [0, {supply}), got {tokens}"),
            ));
        }

        let price_ratio = 1.0 / (1.0 - tokens / supply);
        Ok(self.params.initial_reserve * price_ratio.powf(1.0 / self.params.reserve_ratio))
    }

    /// Spot price in base units per token once `tokens` have been sold.
    pub fn price_for_tokens_sold(&self, tokens: f64) -> Result<f64, CurveError> {
        Ok(self.price_at(self.reserve_for_tokens_sold(tokens)?))
    }

    pub(crate) fn sample_unchecked(&self, fraction: f64) -> CurveSample {
        let supply = self.params.supply();
        let reserve = self.reserve_at(fraction);
        let price_ratio = self.price_ratio_at(reserve);
        let tokens_sold = supply * (1.0 - 1.0 / price_ratio);
        let price = self.price_at(reserve);
        let price_quote = self.to_display_units(price);
        let price_fiat = price_quote * self.pricing.quote_price;

        let initial_price = self.initial_price();
        let percent_price_increase = if initial_price > 0.0 {
            (price - initial_price) / initial_price * 100.0
        } else {
            0.0
        };

        CurveSample {
            fraction,
            reserve_at_point: reserve,
            price_ratio,
            tokens_sold,
            price_at_point: price,
            price_quote,
            price_fiat,
            percent_of_supply_sold: tokens_sold / supply * 100.0,
            percent_price_increase,
            market_cap: price_fiat * supply,
        }
    }

    #[inline]
    fn to_base_units(&self, amount: f64) -> f64 {
        amount * self.pricing.base_unit_scale
    }

    #[inline]
    pub(crate) fn to_display_units(&self, amount: f64) -> f64 {
        amount / self.pricing.base_unit_scale
    }
}

/// Require `reserve` to stay finite once converted to base units.
pub(crate) fn ensure_in_base_units(
    field: &'static str,
    reserve: f64,
    pricing: &Pricing,
) -> Result<(), CurveError> {
    let base = reserve * pricing.base_unit_scale;
    if !base.is_finite() {
        return Err(CurveError::invalid(
            field,
            format!(
                "{reserve} overflows at {} base units per unit",
                pricing.base_unit_scale
            ),
        ));
    }
    Ok(())
}

/// Check the curve invariants before any math runs.
pub fn validate_parameters(params: &CurveParameters) -> Result<(), CurveError> {
    ensure_positive("initial_reserve", params.initial_reserve)?;
    ensure_positive("target_reserve", params.target_reserve)?;

    let ratio = params.reserve_ratio;
    if !ratio.is_finite() || ratio <= 0.0 || ratio >= 1.0 {
        return Err(CurveError::invalid(
            "reserve_ratio",
            format!("must be in (0, 1), got {ratio}"),
        ));
    }

    if params.total_supply == 0 {
        return Err(CurveError::invalid("total_supply", "must be positive, got 0"));
    }

    if params.target_reserve < params.initial_reserve {
        return Err(CurveError::invalid(
            "target_reserve",
            format!(
                "must not be below initial_reserve ({} < {})",
                params.target_reserve, params.initial_reserve
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launch_curve() -> BondingCurveAnalyzer {
        BondingCurveAnalyzer::new(
            CurveParameters::new(3.675, 42.0, 0.66, 1_000_000_000),
            Pricing::default(),
        )
        .unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = 1e-9 * expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn first_sample_sells_nothing() {
        let sample = launch_curve().sample_at(0.0).unwrap();
        assert_eq!(sample.reserve_at_point, 3.675);
        assert_eq!(sample.price_ratio, 1.0);
        assert_eq!(sample.tokens_sold, 0.0);
        assert_eq!(sample.percent_of_supply_sold, 0.0);
        assert_eq!(sample.percent_price_increase, 0.0);
    }

    #[test]
    fn final_sample_matches_closed_form() {
        let curve = launch_curve();
        let sample = curve.sample_at(1.0).unwrap();

        let ratio = (42.0_f64 / 3.675).powf(0.66);
        assert_eq!(sample.reserve_at_point, 42.0);
        assert_close(sample.price_ratio, ratio);
        assert_close(sample.tokens_sold, 1e9 * (1.0 - 1.0 / ratio));
        assert!(sample.tokens_sold > 790_000_000.0 && sample.tokens_sold < 810_000_000.0);
        assert_close(sample.price_at_point, 42.0 * 1e9 / (1e9 * 0.66));
    }

    #[test]
    fn price_increase_tracks_reserve_growth() {
        let curve = launch_curve();
        let sample = curve.sample_at(0.5).unwrap();
        let reserve = 3.675 + (42.0 - 3.675) * 0.5;
        assert_close(sample.reserve_at_point, reserve);
        assert_close(sample.percent_price_increase, (reserve - 3.675) / 3.675 * 100.0);
    }

    #[test]
    fn market_cap_uses_quote_price() {
        let curve = launch_curve();
        let sample = curve.sample_at(1.0).unwrap();
        let price_sol = 42.0 / (1e9 * 0.66);
        assert_close(sample.price_quote, price_sol);
        assert_close(sample.price_fiat, price_sol * 210.0);
        assert_close(sample.market_cap, price_sol * 210.0 * 1e9);
    }

    #[test]
    fn summary_reports_initial_and_final_prices() {
        let summary = launch_curve().summary();
        assert_close(summary.initial_price, 3.675 / (1e9 * 0.66));
        assert_close(summary.final_price, 42.0 / (1e9 * 0.66));
        assert_close(summary.price_ratio, (42.0_f64 / 3.675).powf(0.66));
        assert_close(summary.percent_sold, summary.tokens_sold / 1e9 * 100.0);
    }

    #[test]
    fn sample_at_rejects_out_of_range_fraction() {
        let curve = launch_curve();
        for fraction in [-0.1, 1.5, f64::NAN] {
            let err = curve.sample_at(fraction).unwrap_err();
            assert_eq!(err.field(), "fraction");
        }
    }

    #[test]
    fn rejects_reserve_ratio_outside_unit_interval() {
        for ratio in [0.0, 1.0, -0.5, 1.2, f64::NAN] {
            let err = BondingCurveAnalyzer::new(
                CurveParameters::new(1.0, 2.0, ratio, 100),
                Pricing::default(),
            )
            .unwrap_err();
            assert_eq!(err.field(), "reserve_ratio");
        }
    }

    #[test]
    fn rejects_non_positive_reserves_and_supply() {
        let cases = [
            (CurveParameters::new(0.0, 2.0, 0.5, 100), "initial_reserve"),
            (CurveParameters::new(-1.0, 2.0, 0.5, 100), "initial_reserve"),
            (CurveParameters::new(1.0, 0.0, 0.5, 100), "target_reserve"),
            (CurveParameters::new(1.0, 2.0, 0.5, 0), "total_supply"),
            (CurveParameters::new(3.0, 2.0, 0.5, 100), "target_reserve"),
        ];
        for (params, field) in cases {
            let err = BondingCurveAnalyzer::new(params, Pricing::default()).unwrap_err();
            assert_eq!(err.field(), field, "params: {params:?}");
        }
    }

    #[test]
    fn rejects_bad_pricing() {
        let params = CurveParameters::new(1.0, 2.0, 0.5, 100);
        let err = BondingCurveAnalyzer::new(
            params,
            Pricing {
                base_unit_scale: 0.0,
                quote_price: 1.0,
            },
        )
        .unwrap_err();
        assert_eq!(err.field(), "base_unit_scale");

        let err = BondingCurveAnalyzer::new(
            params,
            Pricing {
                base_unit_scale: 1e9,
                quote_price: -3.0,
            },
        )
        .unwrap_err();
        assert_eq!(err.field(), "quote_price");
    }

    #[test]
    fn inverse_reproduces_reserve_and_price() {
        let curve = launch_curve();
        for sample in curve.sweep(11).unwrap() {
            let reserve = curve.reserve_for_tokens_sold(sample.tokens_sold).unwrap();
            assert_close(reserve, sample.reserve_at_point);
            let price = curve.price_for_tokens_sold(sample.tokens_sold).unwrap();
            assert_close(price, sample.price_at_point);
        }
    }

    #[test]
    fn inverse_rejects_full_supply() {
        let curve = launch_curve();
        assert!(curve.reserve_for_tokens_sold(1e9).is_err());
        assert!(curve.reserve_for_tokens_sold(-1.0).is_err());
        assert_eq!(curve.reserve_for_tokens_sold(0.0).unwrap(), 3.675);
    }

    #[test]
    fn degenerate_curve_has_identical_samples() {
        let curve = BondingCurveAnalyzer::new(
            CurveParameters::new(5.0, 5.0, 0.5, 1_000),
            Pricing::default(),
        )
        .unwrap();
        let samples: Vec<_> = curve.sweep(5).unwrap().collect();
        assert_eq!(samples.len(), 5);
        for sample in &samples {
            assert_eq!(sample.reserve_at_point, 5.0);
            assert_eq!(sample.price_ratio, 1.0);
            assert_eq!(sample.tokens_sold, 0.0);
            assert_eq!(sample.percent_price_increase, 0.0);
        }
    }

    #[test]
    fn report_collects_samples_and_summary() {
        let curve = launch_curve();
        let report = curve.report(5, ReportLabels::default()).unwrap();
        assert_eq!(report.samples.len(), 5);
        assert_eq!(report.summary, curve.summary());
        assert_eq!(report.parameters.total_supply, 1_000_000_000);
        assert_eq!(report.samples[2].fraction, 0.5);
    }

    #[test]
    fn rejects_target_overflowing_base_units() {
        let err = BondingCurveAnalyzer::new(
            CurveParameters::new(1e300, 2e300, 0.5, 1_000),
            Pricing::default(),
        )
        .unwrap_err();
        assert_eq!(err.field(), "target_reserve");
    }

    #[test]
    fn huge_reserves_stay_finite_at_unit_scale() {
        let pricing = Pricing {
            base_unit_scale: 1.0,
            quote_price: 1.0,
        };
        let curve =
            BondingCurveAnalyzer::new(CurveParameters::new(1e300, 2e300, 0.5, 1_000), pricing)
                .unwrap();
        let sample = curve.sample_at(1.0).unwrap();

        assert_close(sample.price_ratio, 2.0_f64.sqrt());
        assert!(sample.tokens_sold.is_finite());
        assert!(sample.price_at_point.is_finite());
    }
}
