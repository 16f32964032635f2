//! The analysis handed to output renderers.

use serde::{Deserialize, Serialize};

use super::curve::{CurveParameters, CurveSample, CurveSummary, Pricing};

/// Currency labels used when rendering a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLabels {
    /// Ticker of the reserve currency (e.g. `SOL`).
    pub quote_symbol: String,
    /// Prefix for fiat amounts (e.g. `$`).
    pub fiat_symbol: String,
}

impl Default for ReportLabels {
    fn default() -> Self {
        Self {
            quote_symbol: "SOL".to_string(),
            fiat_symbol: "$".to_string(),
        }
    }
}

/// A complete curve analysis: inputs, headline numbers and the sweep table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveReport {
    pub parameters: CurveParameters,
    pub pricing: Pricing,
    pub labels: ReportLabels,
    pub summary: CurveSummary,
    pub samples: Vec<CurveSample>,
}
