//! Output renderers: terminal, JSON, Markdown.

pub mod json;
pub mod markdown;
pub mod terminal;

use crate::keypair::DerivedKeypair;
use crate::models::{CurveReport, ReportLabels, TradeQuote};

/// Trait for rendering analysis results to an output format.
pub trait OutputRenderer {
    /// Render a full curve analysis.
    fn render_report(&self, report: &CurveReport) -> String;

    /// Render a single trade quote.
    fn render_quote(&self, quote: &TradeQuote, labels: &ReportLabels) -> String;

    /// Render a derived keypair.
    fn render_keypair(&self, keypair: &DerivedKeypair) -> String;
}

/// Format `value` with `decimals` places and `,` thousands separators.
pub fn with_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(formatted.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
    if value.is_sign_negative() && !is_zero {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Shortest round-trip `Display` of a float; whole values print without `.0`.
pub fn plain_number(value: f64) -> String {
    format!("{value}")
}
