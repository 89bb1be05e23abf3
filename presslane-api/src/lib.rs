use axum::{
    http::Method,
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod admin;
pub mod catalog;
pub mod error;
pub mod quotes;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    Router::new()
        .route("/health", get(health))
        .route("/v1/quotes/calculate", axum::routing::post(quotes::calculate_quote))
        .route("/v1/quotes/{id}", get(quotes::get_quote))
        .route("/v1/products/{id}/options", get(catalog::product_options))
        .merge(admin_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/admin/paper-stocks",
            get(admin::list_paper_stocks).post(admin::create_paper_stock),
        )
        .route(
            "/v1/admin/paper-stocks/{id}",
            get(admin::get_paper_stock)
                .put(admin::update_paper_stock)
                .delete(admin::delete_paper_stock),
        )
        .route(
            "/v1/admin/addons",
            get(admin::list_addons).post(admin::create_addon),
        )
        .route(
            "/v1/admin/addons/{id}",
            get(admin::get_addon)
                .put(admin::update_addon)
                .delete(admin::delete_addon),
        )
        .route(
            "/v1/admin/quantity-groups",
            get(admin::list_quantity_groups).post(admin::create_quantity_group),
        )
        .route(
            "/v1/admin/quantity-groups/{id}",
            get(admin::get_quantity_group)
                .put(admin::update_quantity_group)
                .delete(admin::delete_quantity_group),
        )
        .route(
            "/v1/admin/size-groups",
            get(admin::list_size_groups).post(admin::create_size_group),
        )
        .route(
            "/v1/admin/size-groups/{id}",
            get(admin::get_size_group)
                .put(admin::update_size_group)
                .delete(admin::delete_size_group),
        )
        .route(
            "/v1/admin/turnarounds",
            get(admin::list_turnarounds).post(admin::create_turnaround),
        )
        .route(
            "/v1/admin/turnarounds/{id}",
            get(admin::get_turnaround)
                .put(admin::update_turnaround)
                .delete(admin::delete_turnaround),
        )
        .route(
            "/v1/admin/products",
            get(admin::list_products).post(admin::create_product),
        )
        .route(
            "/v1/admin/products/{id}",
            get(admin::get_product)
                .put(admin::update_product)
                .delete(admin::delete_product),
        )
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
