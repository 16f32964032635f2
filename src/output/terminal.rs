//! Terminal renderer: sectioned report with a fixed-width sweep table.

use colored::Colorize;

use super::{OutputRenderer, plain_number, with_thousands};
use crate::keypair::DerivedKeypair;
use crate::models::{CurveReport, ReportLabels, TradeQuote, TradeSide};

const RULE_WIDTH: usize = 50;
const TABLE_WIDTH: usize = 98;

/// Terminal output renderer with colored headings.
pub struct TerminalRenderer;

impl OutputRenderer for TerminalRenderer {
    fn render_report(&self, report: &CurveReport) -> String {
        let p = &report.parameters;
        let s = &report.summary;
        let quote = &report.labels.quote_symbol;
        let fiat = &report.labels.fiat_symbol;
        let quote_price = plain_number(report.pricing.quote_price);

        let mut output = String::new();

        output.push_str(&format!("\n{}\n", "Bonding Curve Analysis:".bold()));
        output.push_str(&format!("{}\n", "=".repeat(RULE_WIDTH).dimmed()));
        output.push_str(&format!("{}\n", "Parameters:".cyan()));
        output.push_str(&format!(
            "Initial reserve: {} {quote}\n",
            plain_number(p.initial_reserve)
        ));
        output.push_str(&format!(
            "Target reserve: {} {quote}\n",
            plain_number(p.target_reserve)
        ));
        output.push_str(&format!("Reserve ratio: {}\n", plain_number(p.reserve_ratio)));
        output.push_str(&format!(
            "Total tokens allocated: {}\n",
            with_thousands(p.total_supply as f64, 0)
        ));

        output.push_str(&format!("\n{}\n", "Price Analysis:".bold()));
        output.push_str(&format!("{}\n", "-".repeat(RULE_WIDTH).dimmed()));
        output.push_str(&format!(
            "Initial price: {:.10} {quote} per token ({fiat}{:.8} @ {fiat}{quote_price}/{quote})\n",
            s.initial_price, s.initial_price_fiat
        ));
        output.push_str(&format!(
            "Final price: {:.10} {quote} per token ({fiat}{:.8} @ {fiat}{quote_price}/{quote})\n",
            s.final_price, s.final_price_fiat
        ));
        output.push_str(&format!(
            "Price increase ratio: {}\n",
            format!("{:.4}x", s.price_ratio).green().bold()
        ));

        output.push_str(&format!("\n{}\n", "Token Distribution Results:".bold()));
        output.push_str(&format!("{}\n", "-".repeat(RULE_WIDTH).dimmed()));
        output.push_str(&format!(
            "Tokens that would be sold: {}\n",
            with_thousands(s.tokens_sold, 0).bold()
        ));
        output.push_str(&format!(
            "Percentage of allocation sold: {:.2}%\n",
            s.percent_sold
        ));
        output.push_str(&format!(
            "Final market cap: {fiat}{}\n",
            with_thousands(s.final_market_cap, 2)
        ));

        output.push_str(&format!("\n{}\n", "Detailed Price and Distribution Analysis:".bold()));
        output.push_str(&format!("{}\n", "-".repeat(TABLE_WIDTH).dimmed()));
        let header = format!(
            "{:>12} | {:>15} | {:>8} | {:>14} | {:>12} | {:>9} | {:>14}",
            format!("{quote} Amount"),
            "Tokens Sold",
            "% Total",
            format!("Price ({quote})"),
            format!("Price ({fiat})"),
            "% Incr.",
            format!("Mkt Cap ({fiat})"),
        );
        output.push_str(&format!("{}\n", header.cyan()));
        output.push_str(&format!("{}\n", "-".repeat(TABLE_WIDTH).dimmed()));

        for sample in &report.samples {
            output.push_str(&format!(
                "{:>12.4} | {:>15} | {:>7.2}% | {:>14.10} | {:>12.8} | {:>8.1}% | {:>14}\n",
                sample.reserve_at_point,
                with_thousands(sample.tokens_sold, 0),
                sample.percent_of_supply_sold,
                sample.price_quote,
                sample.price_fiat,
                sample.percent_price_increase,
                with_thousands(sample.market_cap, 2),
            ));
        }

        output
    }

    fn render_quote(&self, quote: &TradeQuote, labels: &ReportLabels) -> String {
        let symbol = &labels.quote_symbol;
        let mut output = String::new();

        let title = match quote.side {
            TradeSide::Buy => "Buy quote",
            TradeSide::Sell => "Sell quote",
        };
        output.push_str(&format!("\n {}\n", title.bold()));
        output.push_str(&format!(" {}\n", "─".repeat(RULE_WIDTH).dimmed()));

        let (paid, received) = match quote.side {
            TradeSide::Buy => (
                format!("{:.6} {symbol}", quote.amount_in),
                format!("{} tokens", with_thousands(quote.amount_out, 0)),
            ),
            TradeSide::Sell => (
                format!("{} tokens", with_thousands(quote.amount_in, 0)),
                format!("{:.6} {symbol}", quote.amount_out),
            ),
        };

        output.push_str(&format!("   {}  {paid}\n", "You pay:       ".cyan()));
        output.push_str(&format!("   {}  {}\n", "You receive:   ".cyan(), received.bold()));
        output.push_str(&format!(
            "   {}  {:.6} {symbol}\n",
            "Fee:           ".cyan(),
            quote.fee
        ));
        output.push_str(&format!(
            "   {}  {:.10} {symbol} per token\n",
            "Average price: ".cyan(),
            quote.average_price()
        ));
        output.push_str(&format!(
            "   {}  {:.10} → {:.10} {symbol} ({:+.2}%)\n",
            "Spot price:    ".cyan(),
            quote.price_before,
            quote.price_after,
            quote.price_impact_percent
        ));
        output.push_str(&format!(
            "   {}  {:.4} → {:.4} {symbol}\n",
            "Reserve:       ".cyan(),
            quote.reserve_before,
            quote.reserve_after
        ));
        output.push_str(&format!(
            "   {}  {} → {}\n",
            "Tokens sold:   ".cyan(),
            with_thousands(quote.tokens_sold_before, 0),
            with_thousands(quote.tokens_sold_after, 0)
        ));

        if quote.completes_curve {
            output.push_str(&format!(
                "\n {} {}\n",
                "✔".green().bold(),
                "This trade reaches the curve target.".green()
            ));
        }

        output
    }

    fn render_keypair(&self, keypair: &DerivedKeypair) -> String {
        format!(
            "{}  {}\n{}  {}\n",
            "Public key:  ".cyan(),
            keypair.public_key.bold(),
            "Secret (hex):".cyan(),
            keypair.secret_hex,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::BondingCurveAnalyzer;
    use crate::models::{CurveParameters, Pricing};

    fn analyzer() -> BondingCurveAnalyzer {
        BondingCurveAnalyzer::new(
            CurveParameters::new(3.675, 42.0, 0.66, 1_000_000_000),
            Pricing::default(),
        )
        .unwrap()
    }

    #[test]
    fn render_report_sections_and_rows() {
        let report = analyzer().report(11, ReportLabels::default()).unwrap();
        let output = TerminalRenderer.render_report(&report);

        assert!(output.contains("Bonding Curve Analysis:"));
        assert!(output.contains("Initial reserve: 3.675 SOL"));
        assert!(output.contains("Total tokens allocated: 1,000,000,000"));
        assert!(output.contains("799,679,537"));
        assert!(output.contains("79.97%"));
        assert!(output.contains("42.0000"));
        // One row per sample
        assert_eq!(output.matches(" | ").count() / 6, 11 + 1);
    }

    #[test]
    fn render_buy_quote() {
        let quote = analyzer().quote_buy(40.0, 5.0, 1.0).unwrap();
        let output = TerminalRenderer.render_quote(&quote, &ReportLabels::default());
        assert!(output.contains("Buy quote"));
        assert!(output.contains("5.000000 SOL"));
        assert!(output.contains("0.050000 SOL"));
        assert!(output.contains("reaches the curve target"));
    }

    #[test]
    fn render_sell_quote_has_no_completion_note() {
        let curve = analyzer();
        let sold = curve.tokens_sold_at(20.0);
        let quote = curve.quote_sell(20.0, sold / 4.0, 1.0).unwrap();
        let output = TerminalRenderer.render_quote(&quote, &ReportLabels::default());
        assert!(output.contains("Sell quote"));
        assert!(!output.contains("reaches the curve target"));
    }
}
