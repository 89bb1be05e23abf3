use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres, Row};
use std::time::Duration;
use tracing::info;

use crate::app_config::{BusinessRulesConfig, PricingSettings};

#[derive(Clone)]
pub struct DbClient {
    pub pool: Pool<Postgres>,
}

impl DbClient {
    pub async fn new(connection_string: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(connection_string)
            .await?;

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Running database migrations...");
        sqlx::migrate!("../migrations").run(&self.pool).await?;
        info!("Migrations completed successfully.");
        Ok(())
    }

    /// Overlay business-rule and pricing overrides stored in the
    /// `business_rules` key/value table onto the file-based defaults.
    pub async fn fetch_rule_overrides(
        &self,
        mut rules: BusinessRulesConfig,
        mut pricing: PricingSettings,
    ) -> Result<(BusinessRulesConfig, PricingSettings), sqlx::Error> {
        let rows = sqlx::query("SELECT rule_key, rule_value FROM business_rules")
            .fetch_all(&self.pool)
            .await?;

        for row in rows {
            let key: String = row.get("rule_key");
            let val: serde_json::Value = row.get("rule_value");

            // Expected format: {"value": <number>}
            let Some(v) = val.get("value") else { continue };

            match key.as_str() {
                "tax_rate" => {
                    if let Some(f) = v.as_f64() {
                        rules.tax_rate = f;
                    }
                }
                "quote_ttl_seconds" => {
                    if let Some(u) = v.as_u64() {
                        rules.quote_ttl_seconds = u;
                    }
                }
                "default_markup" => {
                    if let Some(f) = v.as_f64() {
                        pricing.default_markup = f;
                    }
                }
                "rounding_increment_cents" => {
                    if let Some(i) = v.as_i64() {
                        pricing.rounding_increment_cents = i;
                    }
                }
                "min_multiplier" => {
                    if let Some(f) = v.as_f64() {
                        pricing.min_multiplier = f;
                    }
                }
                "max_multiplier" => {
                    if let Some(f) = v.as_f64() {
                        pricing.max_multiplier = f;
                    }
                }
                _ => {}
            }
        }

        Ok((rules, pricing))
    }
}
