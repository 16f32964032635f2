//! Clap argument types, validation, and config fallbacks.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use bondcurve::config::{CurveConfig, FeeConfig, PricingConfig};
use bondcurve::keypair::KeypairSource;
use bondcurve::models::{CurveParameters, Pricing, TradeSide};
use bondcurve::output::OutputRenderer;

/// Constant-reserve-ratio bonding curve analyzer.
#[derive(Parser, Debug)]
#[command(
    name = "bondcurve",
    version = bondcurve::constants::VERSION,
    about = "Tabulate bonding curve pricing, quote trades, and inspect keypairs"
)]
pub struct Cli {
    /// Enable debug logging on stderr.
    #[arg(long, short = 'v', global = true, default_value_t = false)]
    pub verbose: bool,

    /// Config file to layer over the global and local config.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Tabulate price and supply sold across the reserve range.
    Analyze(AnalyzeArgs),

    /// Quote a buy or sell against the curve.
    Quote(QuoteArgs),

    /// Derive the public key and hex encoding of a 64-byte keypair.
    Keypair(KeypairArgs),

    /// Inspect the effective configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Print version and build information.
    Version,
}

/// Config inspection subcommands.
#[derive(clap::Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the merged configuration as TOML.
    Show,
    /// Print the config file locations that are consulted.
    Path,
}

/// Curve inputs; anything omitted falls back to the config.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct CurveArgs {
    /// Reserve held before any token is sold (display units, e.g. SOL).
    #[arg(long)]
    pub initial_reserve: Option<f64>,

    /// Reserve at which the curve completes.
    #[arg(long)]
    pub target_reserve: Option<f64>,

    /// Constant reserve ratio, strictly between 0 and 1.
    #[arg(long)]
    pub reserve_ratio: Option<f64>,

    /// Tokens allocated to the curve.
    #[arg(long)]
    pub total_supply: Option<u64>,

    /// Derive the initial reserve as a quarter of the target reserve.
    #[arg(long, default_value_t = false, conflicts_with = "initial_reserve")]
    pub derive_initial: bool,

    /// Fiat value of one unit of reserve currency.
    #[arg(long)]
    pub quote_price: Option<f64>,
}

impl CurveArgs {
    /// Resolve curve parameters, CLI flags first.
    pub fn parameters(&self, config: &CurveConfig) -> CurveParameters {
        let target = self.target_reserve.unwrap_or(config.target_reserve);
        let ratio = self.reserve_ratio.unwrap_or(config.reserve_ratio);
        let supply = self.total_supply.unwrap_or(config.total_supply);

        if self.derive_initial {
            CurveParameters::from_target(target, ratio, supply)
        } else {
            CurveParameters::new(
                self.initial_reserve.unwrap_or(config.initial_reserve),
                target,
                ratio,
                supply,
            )
        }
    }

    /// Resolve pricing, CLI flags first.
    pub fn pricing(&self, config: &PricingConfig) -> Pricing {
        let mut pricing = config.pricing();
        if let Some(price) = self.quote_price {
            pricing.quote_price = price;
        }
        pricing
    }
}

/// Arguments for the `analyze` subcommand.
#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub curve: CurveArgs,

    /// Number of evenly spaced sweep points (11 = every 10%, 5 = every 25%).
    #[arg(long)]
    pub points: Option<usize>,

    /// Output format.
    #[arg(long, default_value = "terminal")]
    pub format: OutputFormat,
}

/// Arguments for the `quote` subcommand.
#[derive(Parser, Debug)]
pub struct QuoteArgs {
    /// Trade direction.
    pub side: TradeSide,

    /// Reserve currency to spend (buy) or tokens to return (sell).
    #[arg(long)]
    pub amount: f64,

    /// Current curve reserve (default: the initial reserve).
    #[arg(long)]
    pub reserve: Option<f64>,

    /// Fee percentage (default: the configured fee for this side).
    #[arg(long)]
    pub fee: Option<f64>,

    /// Reject the quote if it pays out less than this (tokens for a buy,
    /// reserve currency for a sell).
    #[arg(long)]
    pub min_out: Option<f64>,

    #[command(flatten)]
    pub curve: CurveArgs,

    /// Output format.
    #[arg(long, default_value = "terminal")]
    pub format: OutputFormat,
}

impl QuoteArgs {
    /// Fee for this trade, CLI flag first.
    pub fn fee_percentage(&self, fees: &FeeConfig) -> f64 {
        self.fee.unwrap_or(match self.side {
            TradeSide::Buy => fees.buy_fee_percentage,
            TradeSide::Sell => fees.sell_fee_percentage,
        })
    }
}

/// Arguments for the `keypair` subcommand.
#[derive(Parser, Debug)]
pub struct KeypairArgs {
    /// Solana CLI keypair file (JSON array of 64 bytes).
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Keypair bytes inline, as a JSON array or comma-separated list.
    #[arg(long)]
    pub bytes: Option<String>,

    /// Read keypair bytes from stdin.
    #[arg(long, default_value_t = false)]
    pub stdin: bool,

    /// Output format.
    #[arg(long, default_value = "terminal")]
    pub format: OutputFormat,
}

impl KeypairArgs {
    /// Validate that exactly one input source is provided.
    pub fn validate_input(&self) -> Result<KeypairSource, String> {
        let sources = [self.file.is_some(), self.bytes.is_some(), self.stdin];
        let count = sources.iter().filter(|&&x| x).count();

        if count == 0 {
            return Err("one input source is required: --file, --bytes, or --stdin".to_string());
        }
        if count > 1 {
            return Err("only one input source allowed: --file, --bytes, or --stdin".to_string());
        }

        if let Some(ref path) = self.file {
            Ok(KeypairSource::File(path.clone()))
        } else if let Some(ref bytes) = self.bytes {
            Ok(KeypairSource::Inline(bytes.clone()))
        } else {
            Ok(KeypairSource::Stdin)
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Terminal,
    Json,
    Markdown,
}

impl OutputFormat {
    /// The renderer for this format.
    pub fn renderer(&self) -> Box<dyn OutputRenderer> {
        match self {
            OutputFormat::Terminal => Box::new(bondcurve::output::terminal::TerminalRenderer),
            OutputFormat::Json => Box::new(bondcurve::output::json::JsonRenderer),
            OutputFormat::Markdown => Box::new(bondcurve::output::markdown::MarkdownRenderer),
        }
    }
}
