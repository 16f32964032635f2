//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags (applied by the binary)
//! 2. Environment variables
//! 3. `--config <path>` if given
//! 4. `.bondcurve.toml` in the working directory
//! 5. `~/.config/bondcurve/config.toml` (global defaults)
//! 6. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::constants::{
    self, DEFAULT_BUY_FEE_PERCENTAGE, DEFAULT_INITIAL_RESERVE, DEFAULT_QUOTE_PRICE,
    DEFAULT_RESERVE_RATIO, DEFAULT_SELL_FEE_PERCENTAGE, DEFAULT_SWEEP_POINTS,
    DEFAULT_TARGET_RESERVE, DEFAULT_TOTAL_SUPPLY, LAMPORTS_PER_SOL,
};
use crate::env::{Env, EnvValue};
use crate::models::{CurveParameters, Pricing, ReportLabels};

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub curve: CurveConfig,
    pub sweep: SweepConfig,
    pub pricing: PricingConfig,
    pub display: DisplayConfig,
    pub fees: FeeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            curve: CurveConfig::default(),
            sweep: SweepConfig::default(),
            pricing: PricingConfig::default(),
            display: DisplayConfig::default(),
            fees: FeeConfig::default(),
        }
    }
}

/// Default curve inputs used when the CLI does not pass them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    pub initial_reserve: f64,
    pub target_reserve: f64,
    pub reserve_ratio: f64,
    pub total_supply: u64,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            initial_reserve: DEFAULT_INITIAL_RESERVE,
            target_reserve: DEFAULT_TARGET_RESERVE,
            reserve_ratio: DEFAULT_RESERVE_RATIO,
            total_supply: DEFAULT_TOTAL_SUPPLY,
        }
    }
}

impl CurveConfig {
    pub fn parameters(&self) -> CurveParameters {
        CurveParameters::new(
            self.initial_reserve,
            self.target_reserve,
            self.reserve_ratio,
            self.total_supply,
        )
    }
}

/// Sweep granularity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub points: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            points: DEFAULT_SWEEP_POINTS,
        }
    }
}

/// Unit conversion and fiat valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Fiat value of one display unit of reserve currency.
    pub quote_price: f64,
    /// Base units per display unit.
    pub base_unit_scale: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            quote_price: DEFAULT_QUOTE_PRICE,
            base_unit_scale: LAMPORTS_PER_SOL,
        }
    }
}

impl PricingConfig {
    pub fn pricing(&self) -> Pricing {
        Pricing {
            base_unit_scale: self.base_unit_scale,
            quote_price: self.quote_price,
        }
    }
}

/// Currency labels in rendered output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub quote_symbol: String,
    pub fiat_symbol: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        let labels = ReportLabels::default();
        Self {
            quote_symbol: labels.quote_symbol,
            fiat_symbol: labels.fiat_symbol,
        }
    }
}

impl DisplayConfig {
    pub fn labels(&self) -> ReportLabels {
        ReportLabels {
            quote_symbol: self.quote_symbol.clone(),
            fiat_symbol: self.fiat_symbol.clone(),
        }
    }
}

/// Trade fees, as percentages of the reserve-currency leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeConfig {
    pub buy_fee_percentage: f64,
    pub sell_fee_percentage: f64,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            buy_fee_percentage: DEFAULT_BUY_FEE_PERCENTAGE,
            sell_fee_percentage: DEFAULT_SELL_FEE_PERCENTAGE,
        }
    }
}

/// One config file as written: only the keys it actually sets.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigLayer {
    curve: CurveLayer,
    sweep: SweepLayer,
    pricing: PricingLayer,
    display: DisplayLayer,
    fees: FeeLayer,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CurveLayer {
    initial_reserve: Option<f64>,
    target_reserve: Option<f64>,
    reserve_ratio: Option<f64>,
    total_supply: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SweepLayer {
    points: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PricingLayer {
    quote_price: Option<f64>,
    base_unit_scale: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DisplayLayer {
    quote_symbol: Option<String>,
    fiat_symbol: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FeeLayer {
    buy_fee_percentage: Option<f64>,
    sell_fee_percentage: Option<f64>,
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// Reads the global config, the local config in `local_dir`, then the
    /// explicit file (which must exist), then applies environment overrides.
    pub fn load(
        local_dir: Option<&Path>,
        explicit: Option<&Path>,
        env: &Env,
    ) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config.merge(Self::load_file(&global_path)?);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = dir.join(constants::CONFIG_FILENAME);
            if local_path.exists() {
                config.merge(Self::load_file(&local_path)?);
            }
        }

        if let Some(path) = explicit {
            config.merge(Self::load_file(path)?);
        }

        config.apply_env_vars(env);

        Ok(config)
    }

    /// Read one config file as a layer of explicitly set values.
    fn load_file(path: &Path) -> Result<ConfigLayer, ConfigError> {
        debug!(path = %path.display(), "loading config file");
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join("config.toml"))
    }

    /// Override every field the layer sets, whatever its value.
    fn merge(&mut self, layer: ConfigLayer) {
        let curve = layer.curve;
        override_with(&mut self.curve.initial_reserve, curve.initial_reserve);
        override_with(&mut self.curve.target_reserve, curve.target_reserve);
        override_with(&mut self.curve.reserve_ratio, curve.reserve_ratio);
        override_with(&mut self.curve.total_supply, curve.total_supply);

        override_with(&mut self.sweep.points, layer.sweep.points);

        override_with(&mut self.pricing.quote_price, layer.pricing.quote_price);
        override_with(&mut self.pricing.base_unit_scale, layer.pricing.base_unit_scale);

        override_with(&mut self.display.quote_symbol, layer.display.quote_symbol);
        override_with(&mut self.display.fiat_symbol, layer.display.fiat_symbol);

        override_with(&mut self.fees.buy_fee_percentage, layer.fees.buy_fee_percentage);
        override_with(&mut self.fees.sell_fee_percentage, layer.fees.sell_fee_percentage);
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(val) = read_env(env, constants::ENV_QUOTE_PRICE) {
            self.pricing.quote_price = val;
        }
        if let Some(val) = read_env(env, constants::ENV_SWEEP_POINTS) {
            self.sweep.points = val;
        }
        if let Some(val) = read_env(env, constants::ENV_BUY_FEE) {
            self.fees.buy_fee_percentage = val;
        }
        if let Some(val) = read_env(env, constants::ENV_SELL_FEE) {
            self.fees.sell_fee_percentage = val;
        }
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

fn override_with<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn read_env<T: std::str::FromStr>(env: &Env, name: &str) -> Option<T> {
    match env.parsed::<T>(name) {
        EnvValue::Parsed(value) => Some(value),
        EnvValue::Invalid(raw) => {
            warn!("ignoring invalid {name} value: {raw}");
            None
        }
        EnvValue::Missing => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.curve.initial_reserve, 3.675);
        assert_eq!(config.curve.target_reserve, 42.0);
        assert_eq!(config.curve.reserve_ratio, 0.66);
        assert_eq!(config.curve.total_supply, 1_000_000_000);
        assert_eq!(config.sweep.points, 11);
        assert_eq!(config.pricing.quote_price, 210.0);
        assert_eq!(config.display.quote_symbol, "SOL");
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[curve]
initial_reserve = 5.0
reserve_ratio = 0.9

[sweep]
points = 5

[pricing]
quote_price = 150.5

[display]
quote_symbol = "ETH"

[fees]
sell_fee_percentage = 2.5
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.curve.initial_reserve, 5.0);
        assert_eq!(config.curve.target_reserve, 42.0);
        assert_eq!(config.curve.reserve_ratio, 0.9);
        assert_eq!(config.sweep.points, 5);
        assert_eq!(config.pricing.quote_price, 150.5);
        assert_eq!(config.display.quote_symbol, "ETH");
        assert_eq!(config.display.fiat_symbol, "$");
        assert_eq!(config.fees.sell_fee_percentage, 2.5);
        assert_eq!(config.fees.buy_fee_percentage, 1.0);
    }

    #[test]
    fn merge_overrides_every_set_field() {
        let layer: ConfigLayer = toml::from_str(
            r#"
[curve]
initial_reserve = 1.0
target_reserve = 10.0
reserve_ratio = 0.5
total_supply = 500

[sweep]
points = 5

[pricing]
quote_price = 100.0
base_unit_scale = 1e6

[display]
quote_symbol = "USDC"
fiat_symbol = "€"

[fees]
buy_fee_percentage = 0.5
sell_fee_percentage = 0.75
"#,
        )
        .unwrap();

        let mut config = Config::default();
        config.merge(layer);

        assert_eq!(config.curve.parameters(), CurveParameters::new(1.0, 10.0, 0.5, 500));
        assert_eq!(config.sweep.points, 5);
        assert_eq!(config.pricing.quote_price, 100.0);
        assert_eq!(config.pricing.base_unit_scale, 1e6);
        assert_eq!(config.display.quote_symbol, "USDC");
        assert_eq!(config.display.fiat_symbol, "€");
        assert_eq!(config.fees.buy_fee_percentage, 0.5);
        assert_eq!(config.fees.sell_fee_percentage, 0.75);
    }

    #[test]
    fn merge_keeps_fields_the_layer_omits() {
        let mut config = Config::default();
        config.curve.reserve_ratio = 0.5;
        config.sweep.points = 5;

        config.merge(toml::from_str("[pricing]\nquote_price = 99.0\n").unwrap());

        assert_eq!(config.curve.reserve_ratio, 0.5);
        assert_eq!(config.sweep.points, 5);
        assert_eq!(config.pricing.quote_price, 99.0);
    }

    #[test]
    fn merge_can_restore_a_default_value() {
        let mut config = Config::default();
        config.curve.reserve_ratio = 0.5;

        config.merge(toml::from_str("[curve]\nreserve_ratio = 0.66\n").unwrap());

        assert_eq!(config.curve.reserve_ratio, DEFAULT_RESERVE_RATIO);
    }

    #[test]
    fn load_file_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "not valid {{ toml").unwrap();

        let result = Config::load_file(&path);
        assert!(result.unwrap_err().to_string().contains("parse"));
    }

    #[test]
    fn load_file_not_found() {
        let result = Config::load_file(Path::new("/tmp/bondcurve_not_exist_config.toml"));
        assert!(result.unwrap_err().to_string().contains("read"));
    }

    #[test]
    fn load_from_local_dir() {
        let env = Env::mock(Vec::<(&str, &str)>::new());
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".bondcurve.toml"),
            "[curve]\ntarget_reserve = 85.0\n",
        )
        .unwrap();

        let config = Config::load(Some(dir.path()), None, &env).unwrap();
        assert_eq!(config.curve.target_reserve, 85.0);
    }

    #[test]
    fn explicit_file_wins_over_local() {
        let env = Env::mock(Vec::<(&str, &str)>::new());
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".bondcurve.toml"),
            "[sweep]\npoints = 5\n",
        )
        .unwrap();
        let explicit = dir.path().join("other.toml");
        std::fs::write(&explicit, "[sweep]\npoints = 21\n").unwrap();

        let config = Config::load(Some(dir.path()), Some(&explicit), &env).unwrap();
        assert_eq!(config.sweep.points, 21);
    }

    #[test]
    fn explicit_file_can_reset_local_value_to_default() {
        let env = Env::mock(Vec::<(&str, &str)>::new());
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".bondcurve.toml"),
            "[sweep]\npoints = 5\n[fees]\nbuy_fee_percentage = 2.0\n",
        )
        .unwrap();
        let explicit = dir.path().join("other.toml");
        std::fs::write(&explicit, "[sweep]\npoints = 11\n").unwrap();

        let config = Config::load(Some(dir.path()), Some(&explicit), &env).unwrap();
        assert_eq!(config.sweep.points, 11);
        assert_eq!(config.fees.buy_fee_percentage, 2.0);
    }

    #[test]
    fn explicit_file_must_exist() {
        let env = Env::mock(Vec::<(&str, &str)>::new());
        let missing = Path::new("/tmp/bondcurve_missing_explicit.toml");
        assert!(Config::load(None, Some(missing), &env).is_err());
    }

    #[test]
    fn apply_env_vars_overrides_values() {
        let env = Env::mock([
            ("BONDCURVE_QUOTE_PRICE", "180.25"),
            ("BONDCURVE_SWEEP_POINTS", "5"),
            ("BONDCURVE_BUY_FEE", "0.3"),
            ("BONDCURVE_SELL_FEE", "0.4"),
        ]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert_eq!(config.pricing.quote_price, 180.25);
        assert_eq!(config.sweep.points, 5);
        assert_eq!(config.fees.buy_fee_percentage, 0.3);
        assert_eq!(config.fees.sell_fee_percentage, 0.4);
    }

    #[test]
    fn apply_env_vars_ignores_invalid_values() {
        let env = Env::mock([
            ("BONDCURVE_QUOTE_PRICE", "cheap"),
            ("BONDCURVE_SWEEP_POINTS", "-3"),
        ]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert_eq!(config.pricing.quote_price, 210.0);
        assert_eq!(config.sweep.points, 11);
    }

    #[test]
    fn to_toml_round_trips() {
        let mut config = Config::default();
        config.curve.total_supply = 42;
        let text = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn sections_convert_to_curve_types() {
        let config = Config::default();
        let params = config.curve.parameters();
        assert_eq!(params.total_supply, 1_000_000_000);
        assert_eq!(config.pricing.pricing(), Pricing::default());
        assert_eq!(config.display.labels(), ReportLabels::default());
    }
}
