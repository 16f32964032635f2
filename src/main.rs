//! bondcurve — bonding curve analyzer CLI.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use bondcurve::config;
use bondcurve::constants;
use bondcurve::curve;
use bondcurve::env;
use bondcurve::keypair;

use std::path::Path;
use std::process;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::{debug, info};

use cli::args::{AnalyzeArgs, Cli, Command, ConfigAction, KeypairArgs, QuoteArgs};
use config::Config;
use curve::BondingCurveAnalyzer;
use env::Env;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let env = Env::real();

    cli::init_logging(&cli::log_filter(
        cli.verbose,
        env.var(constants::ENV_LOG).ok(),
    ));

    let config_path = cli.config;

    match cli.command {
        Command::Analyze(args) => run_analyze(args, config_path.as_deref(), &env),
        Command::Quote(args) => run_quote(args, config_path.as_deref(), &env),
        Command::Keypair(args) => run_keypair(args),
        Command::Config { action } => run_config(action, config_path.as_deref(), &env),
        Command::Version => run_version(),
    }
}

/// Load the layered config rooted at the working directory.
fn load_config(explicit: Option<&Path>, env: &Env) -> Result<Config> {
    let cwd = std::env::current_dir().ok();
    Config::load(cwd.as_deref(), explicit, env).context("failed to load configuration")
}

/// Tabulate the curve across the configured sweep.
fn run_analyze(args: AnalyzeArgs, explicit: Option<&Path>, env: &Env) -> Result<()> {
    let config = load_config(explicit, env)?;

    let params = args.curve.parameters(&config.curve);
    let pricing = args.curve.pricing(&config.pricing);
    let points = args.points.unwrap_or(config.sweep.points);

    let analyzer =
        BondingCurveAnalyzer::new(params, pricing).context("invalid curve parameters")?;
    let report = analyzer
        .report(points, config.display.labels())
        .context("failed to evaluate the curve")?;

    info!(points, "curve analysis complete");
    print!("{}", args.format.renderer().render_report(&report));
    Ok(())
}

/// Quote a single trade against the curve.
fn run_quote(args: QuoteArgs, explicit: Option<&Path>, env: &Env) -> Result<()> {
    let config = load_config(explicit, env)?;

    let params = args.curve.parameters(&config.curve);
    let pricing = args.curve.pricing(&config.pricing);
    let reserve = args.reserve.unwrap_or(params.initial_reserve);
    let fee = args.fee_percentage(&config.fees);

    let analyzer =
        BondingCurveAnalyzer::new(params, pricing).context("invalid curve parameters")?;
    let quote = match args.min_out {
        Some(min_out) => {
            analyzer.quote_with_min_out(args.side, reserve, args.amount, fee, min_out)
        }
        None => analyzer.quote(args.side, reserve, args.amount, fee),
    }
    .with_context(|| format!("cannot quote {} of {}", args.side, args.amount))?;

    debug!(side = %args.side, reserve, fee, "quote computed");
    print!(
        "{}",
        args.format
            .renderer()
            .render_quote(&quote, &config.display.labels())
    );
    Ok(())
}

/// Derive the public key and hex secret from keypair bytes.
fn run_keypair(args: KeypairArgs) -> Result<()> {
    let source = args.validate_input().map_err(|e| anyhow!(e))?;
    let bytes = source.load().context("failed to read keypair bytes")?;
    let derived = keypair::derive_keypair(&bytes).context("invalid keypair")?;

    print!("{}", args.format.renderer().render_keypair(&derived));
    Ok(())
}

/// Show the merged config or where it is read from.
fn run_config(action: ConfigAction, explicit: Option<&Path>, env: &Env) -> Result<()> {
    use colored::Colorize;

    match action {
        ConfigAction::Show => {
            let config = load_config(explicit, env)?;
            let rendered = config.to_toml().context("failed to serialize config")?;
            print!("{rendered}");
        }
        ConfigAction::Path => {
            let global = Config::global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(no config directory)".to_string());
            let local = std::env::current_dir()
                .context("failed to read working directory")?
                .join(constants::CONFIG_FILENAME);

            println!("{}  {global}", "global:".dimmed());
            println!("{}   {}", "local:".dimmed(), local.display());
            if let Some(path) = explicit {
                println!("{}  {}", "--config:".dimmed(), path.display());
            }
        }
    }
    Ok(())
}

/// Print version and build information.
fn run_version() -> Result<()> {
    use colored::Colorize;

    println!(
        "{} {}",
        constants::APP_NAME.bold(),
        constants::VERSION.green().bold()
    );
    println!("{}     {}", "target:".dimmed(), constants::TARGET);
    Ok(())
}
