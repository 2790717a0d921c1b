use axum::http::HeaderValue;
use axum::{middleware as layers, routing::get, routing::post, Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;

use middleware::{current_user_middleware, jwt_auth_middleware};

/// Build the full application router: public tier plus the JWT-protected
/// `/api` tier.
pub fn app() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_public_routes())
        .merge(api_routes())
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

fn auth_public_routes() -> Router {
    use handlers::public::auth;

    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
}

/// Everything under /api runs behind two layers: bearer-token validation,
/// then resolution of the claims to a live user row.
fn api_routes() -> Router {
    use handlers::protected::{auth, billboards, categories, colors, orders, products, sizes, stores};

    Router::new()
        .route("/api/auth/whoami", get(auth::whoami))
        // Stores: the tenant root, scoped directly to the session user
        .route("/api/stores", post(stores::create).get(stores::list))
        .route(
            "/api/stores/:store_id",
            get(stores::get).patch(stores::update).delete(stores::delete),
        )
        // Store-scoped children: every handler re-checks store ownership
        .route(
            "/api/:store_id/billboards",
            get(billboards::list).post(billboards::create),
        )
        .route(
            "/api/:store_id/billboards/:billboard_id",
            get(billboards::get).patch(billboards::update).delete(billboards::delete),
        )
        .route(
            "/api/:store_id/categories",
            get(categories::list).post(categories::create),
        )
        .route(
            "/api/:store_id/categories/:category_id",
            get(categories::get).patch(categories::update).delete(categories::delete),
        )
        .route("/api/:store_id/sizes", get(sizes::list).post(sizes::create))
        .route(
            "/api/:store_id/sizes/:size_id",
            get(sizes::get).patch(sizes::update).delete(sizes::delete),
        )
        .route("/api/:store_id/colors", get(colors::list).post(colors::create))
        .route(
            "/api/:store_id/colors/:color_id",
            get(colors::get).patch(colors::update).delete(colors::delete),
        )
        .route(
            "/api/:store_id/products",
            get(products::list).post(products::create),
        )
        .route(
            "/api/:store_id/products/:product_id",
            get(products::get).patch(products::update).delete(products::delete),
        )
        .route("/api/:store_id/orders", get(orders::list))
        .layer(layers::from_fn(current_user_middleware))
        .layer(layers::from_fn(jwt_auth_middleware))
}

fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = config::config()
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "shopkeep-api",
            "version": version,
            "description": "Multi-tenant e-commerce back-office API",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "auth": "/auth/register, /auth/login (public - token acquisition)",
                "whoami": "/api/auth/whoami (protected)",
                "stores": "/api/stores[/:store_id] (protected)",
                "billboards": "/api/:store_id/billboards[/:billboard_id] (protected)",
                "categories": "/api/:store_id/categories[/:category_id] (protected)",
                "sizes": "/api/:store_id/sizes[/:size_id] (protected)",
                "colors": "/api/:store_id/colors[/:color_id] (protected)",
                "products": "/api/:store_id/products[/:product_id] (protected)",
                "orders": "/api/:store_id/orders (protected, read-only)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match database::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
