//! Shared types used across all modules.
//!
//! Curve inputs, derived samples and the report handed to renderers live
//! here. Other modules import from here rather than reaching into each
//! other's internals.

pub mod curve;
pub mod report;
pub mod trade;

pub use curve::{CurveParameters, CurveSample, CurveSummary, Pricing};
pub use report::{CurveReport, ReportLabels};
pub use trade::{TradeQuote, TradeSide};
