//! Markdown renderer for pasting analyses into docs and PR descriptions.
//!
//! Plain text only, no ANSI styling.

use super::{OutputRenderer, plain_number, with_thousands};
use crate::keypair::DerivedKeypair;
use crate::models::{CurveReport, ReportLabels, TradeQuote, TradeSide};

/// GitHub-flavored Markdown renderer.
pub struct MarkdownRenderer;

impl OutputRenderer for MarkdownRenderer {
    fn render_report(&self, report: &CurveReport) -> String {
        let p = &report.parameters;
        let s = &report.summary;
        let quote = &report.labels.quote_symbol;
        let fiat = &report.labels.fiat_symbol;

        let mut output = String::new();
        output.push_str("## Bonding Curve Analysis\n\n");

        output.push_str("| Parameter | Value |\n|---|---|\n");
        output.push_str(&format!(
            "| Initial reserve | {} {quote} |\n",
            plain_number(p.initial_reserve)
        ));
        output.push_str(&format!(
            "| Target reserve | {} {quote} |\n",
            plain_number(p.target_reserve)
        ));
        output.push_str(&format!("| Reserve ratio | {} |\n", plain_number(p.reserve_ratio)));
        output.push_str(&format!(
            "| Total supply | {} |\n",
            with_thousands(p.total_supply as f64, 0)
        ));
        output.push_str(&format!(
            "| Quote price | {fiat}{} / {quote} |\n",
            plain_number(report.pricing.quote_price)
        ));

        output.push_str("\n### Summary\n\n");
        output.push_str(&format!(
            "- Initial price: {:.10} {quote} ({fiat}{:.8})\n",
            s.initial_price, s.initial_price_fiat
        ));
        output.push_str(&format!(
            "- Final price: {:.10} {quote} ({fiat}{:.8})\n",
            s.final_price, s.final_price_fiat
        ));
        output.push_str(&format!("- Price increase ratio: {:.4}x\n", s.price_ratio));
        output.push_str(&format!("- Tokens sold: {}\n", with_thousands(s.tokens_sold, 0)));
        output.push_str(&format!("- Supply sold: {:.2}%\n", s.percent_sold));
        output.push_str(&format!(
            "- Final market cap: {fiat}{}\n",
            with_thousands(s.final_market_cap, 2)
        ));

        output.push_str("\n### Sweep\n\n");
        output.push_str(&format!(
            "| Reserve ({quote}) | Tokens Sold | % of Supply | Price ({quote}) | Price ({fiat}) | % Price Incr. | Market Cap ({fiat}) |\n"
        ));
        output.push_str("|---:|---:|---:|---:|---:|---:|---:|\n");
        for sample in &report.samples {
            output.push_str(&format!(
                "| {:.4} | {} | {:.2}% | {:.10} | {:.8} | {:.2}% | {} |\n",
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
        let (title, paid, received) = match quote.side {
            TradeSide::Buy => (
                "Buy",
                format!("{:.6} {symbol}", quote.amount_in),
                format!("{} tokens", with_thousands(quote.amount_out, 0)),
            ),
            TradeSide::Sell => (
                "Sell",
                format!("{} tokens", with_thousands(quote.amount_in, 0)),
                format!("{:.6} {symbol}", quote.amount_out),
            ),
        };

        let mut output = format!("## {title} quote\n\n| | |\n|---|---|\n");
        output.push_str(&format!("| Pay | {paid} |\n"));
        output.push_str(&format!("| Receive | {received} |\n"));
        output.push_str(&format!("| Fee | {:.6} {symbol} |\n", quote.fee));
        output.push_str(&format!(
            "| Spot price | {:.10} → {:.10} {symbol} ({:+.2}%) |\n",
            quote.price_before, quote.price_after, quote.price_impact_percent
        ));
        output.push_str(&format!(
            "| Reserve | {:.4} → {:.4} {symbol} |\n",
            quote.reserve_before, quote.reserve_after
        ));
        output.push_str(&format!(
            "| Completes curve | {} |\n",
            if quote.completes_curve { "yes" } else { "no" }
        ));
        output
    }

    fn render_keypair(&self, keypair: &DerivedKeypair) -> String {
        format!(
            "| Field | Value |\n|---|---|\n| Public key | `{}` |\n| Secret (hex) | `{}` |\n",
            keypair.public_key, keypair.secret_hex
        )
    }
}
