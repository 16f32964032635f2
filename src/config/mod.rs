//! Configuration loading and layering.
//!
//! Handles `.bondcurve.toml` loading, environment variable resolution,
//! and the defaults that CLI flags override.

pub mod loader;

pub use loader::{Config, ConfigError, CurveConfig, DisplayConfig, FeeConfig, PricingConfig, SweepConfig};
