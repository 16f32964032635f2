//! JSON output renderer.
//!
//! Reports serialize as `{"parameters", "pricing", "labels", "summary", "samples"}`.

use serde::Serialize;

use crate::keypair::DerivedKeypair;
use crate::models::{CurveReport, ReportLabels, TradeQuote};
use crate::output::OutputRenderer;

/// JSON output renderer.
pub struct JsonRenderer;

impl OutputRenderer for JsonRenderer {
    fn render_report(&self, report: &CurveReport) -> String {
        to_pretty(report)
    }

    fn render_quote(&self, quote: &TradeQuote, labels: &ReportLabels) -> String {
        let output = serde_json::json!({
            "quote": quote,
            "average_price": quote.average_price(),
            "quote_symbol": labels.quote_symbol,
        });
        to_pretty(&output)
    }

    fn render_keypair(&self, keypair: &DerivedKeypair) -> String {
        to_pretty(keypair)
    }
}

fn to_pretty<T: Serialize + ?Sized>(value: &T) -> String {
    let mut rendered = serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string());
    rendered.push('\n');
    rendered
}
