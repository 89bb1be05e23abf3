use std::net::SocketAddr;
use std::sync::Arc;

use presslane_api::{app, state::AppState};
use presslane_catalog::PricingEngine;
use presslane_quote::{validation::default_rules, ConstraintEngine, QuoteCalculator};
use presslane_store::{DbClient, PgCatalogRepository, PgQuoteRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "presslane_api=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config =
        presslane_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Presslane API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    // Rules stored in the database win over file configuration.
    let (rules_cfg, pricing_cfg) = db
        .fetch_rule_overrides(config.business_rules.clone(), config.pricing.clone())
        .await
        .expect("Failed to load business rule overrides");

    let calculator = QuoteCalculator::new(
        PricingEngine::new(pricing_cfg.to_pricing_config()),
        ConstraintEngine::new(default_rules()),
    );

    let app_state = AppState {
        catalog: Arc::new(PgCatalogRepository::new(db.pool.clone())),
        quotes: Arc::new(PgQuoteRepository::new(db.pool.clone())),
        calculator: Arc::new(calculator),
        business_rules: rules_cfg.to_rules(),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
