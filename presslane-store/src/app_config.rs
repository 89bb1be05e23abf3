use serde::Deserialize;
use std::env;

use presslane_catalog::PricingConfig;
use presslane_quote::BusinessRules;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub business_rules: BusinessRulesConfig,
    pub pricing: PricingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRulesConfig {
    #[serde(default)]
    pub tax_rate: f64,
    #[serde(default = "default_quote_ttl")]
    pub quote_ttl_seconds: u64,
}

fn default_quote_ttl() -> u64 {
    900
}

#[derive(Debug, Deserialize, Clone)]
pub struct PricingSettings {
    #[serde(default = "default_rounding_increment")]
    pub rounding_increment_cents: i64,
    #[serde(default = "default_min_multiplier")]
    pub min_multiplier: f64,
    #[serde(default = "default_max_multiplier")]
    pub max_multiplier: f64,
    #[serde(default)]
    pub default_markup: f64,
}

fn default_rounding_increment() -> i64 {
    1
}
fn default_min_multiplier() -> f64 {
    1.0
}
fn default_max_multiplier() -> f64 {
    5.0
}

impl BusinessRulesConfig {
    pub fn to_rules(&self) -> BusinessRules {
        BusinessRules {
            tax_rate: self.tax_rate,
            quote_ttl_seconds: self.quote_ttl_seconds,
        }
    }
}

impl PricingSettings {
    pub fn to_pricing_config(&self) -> PricingConfig {
        PricingConfig {
            rounding_increment_cents: self.rounding_increment_cents,
            min_multiplier: self.min_multiplier,
            max_multiplier: self.max_multiplier,
            default_markup: self.default_markup,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file (optional)
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `PRESSLANE__SERVER__PORT=9000` overrides `server.port`
            .add_source(config::Environment::with_prefix("PRESSLANE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
