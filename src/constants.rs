//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names
//! and the curve defaults so a rename only requires changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "bondcurve";

/// Crate version, as reported by `bondcurve version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compilation target triple (set by `build.rs`).
pub const TARGET: &str = env!("TARGET");

/// Local config filename (e.g. `.bondcurve.toml` in the working directory).
pub const CONFIG_FILENAME: &str = ".bondcurve.toml";

/// Directory name under `~/.config/` for the global config.
pub const CONFIG_DIR: &str = "bondcurve";

// ── Curve defaults ──────────────────────────────────────────────────

/// Base units per display unit of the reserve currency (lamports per SOL).
pub const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;

/// Fiat value of one display unit of reserve currency.
pub const DEFAULT_QUOTE_PRICE: f64 = 210.0;

pub const DEFAULT_INITIAL_RESERVE: f64 = 3.675;
pub const DEFAULT_TARGET_RESERVE: f64 = 42.0;
pub const DEFAULT_RESERVE_RATIO: f64 = 0.66;
pub const DEFAULT_TOTAL_SUPPLY: u64 = 1_000_000_000;

/// Number of evenly spaced sweep points (0%, 10%, ..., 100%).
pub const DEFAULT_SWEEP_POINTS: usize = 11;

/// Divisor used when deriving the initial reserve from a target reserve.
pub const INITIAL_RESERVE_DIVISOR: f64 = 4.0;

pub const DEFAULT_BUY_FEE_PERCENTAGE: f64 = 1.0;
pub const DEFAULT_SELL_FEE_PERCENTAGE: f64 = 1.0;

// ── Environment variable names ──────────────────────────────────────

pub const ENV_QUOTE_PRICE: &str = "BONDCURVE_QUOTE_PRICE";
pub const ENV_SWEEP_POINTS: &str = "BONDCURVE_SWEEP_POINTS";
pub const ENV_BUY_FEE: &str = "BONDCURVE_BUY_FEE";
pub const ENV_SELL_FEE: &str = "BONDCURVE_SELL_FEE";
pub const ENV_LOG: &str = "BONDCURVE_LOG";
