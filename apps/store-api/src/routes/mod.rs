//! HTTP routing.
//!
//! One consistent route set per resource:
//! - reads are public (`/categories`, `/subcategories`, `/subgroups`,
//!   `/products`, `/orders`), plus public order placement
//! - every mutation lives under `/admin/*` behind the bearer-token gate
//!   (login excepted)

use axum::http::{HeaderValue, Method};
use axum::routing::{get, post, put};
use axum::{middleware, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::auth::require_admin;
use crate::SharedState;

pub mod admin;
pub mod category;
pub mod order;
pub mod product;
pub mod subcategory;
pub mod subgroup;

/// Builds the full application router.
pub fn router(state: SharedState) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/categories", get(category::list))
        .route("/categories/tree", get(category::tree))
        .route("/categories/:id", get(category::get_one))
        .route("/subcategories", get(subcategory::list))
        .route("/subcategories/:id", get(subcategory::get_one))
        .route("/subgroups", get(subgroup::list))
        .route("/subgroups/:id", get(subgroup::get_one))
        .route("/products", get(product::list))
        .route("/products/main/:id", get(product::by_main_category))
        .route("/products/sub/:id", get(product::by_sub_category))
        .route("/products/group/:id", get(product::by_sub_group))
        .route("/products/:id", get(product::get_one))
        .route("/orders", post(order::place).get(order::list))
        .route("/orders/:id", get(order::get_one));

    // Every route added here sits behind the bearer gate
    let admin_protected = Router::new()
        .route("/admins", post(admin::create_admin))
        .route("/categories", post(category::create))
        .route(
            "/categories/:id",
            put(category::update).delete(category::delete),
        )
        .route("/subcategories", post(subcategory::create))
        .route(
            "/subcategories/:id",
            put(subcategory::update).delete(subcategory::delete),
        )
        .route("/subgroups", post(subgroup::create))
        .route(
            "/subgroups/:id",
            put(subgroup::update).delete(subgroup::delete),
        )
        .route("/products", post(product::create))
        .route(
            "/products/:id",
            put(product::update).delete(product::delete),
        )
        .route("/orders", get(order::admin_list))
        .route("/orders/:id", axum::routing::delete(order::delete))
        .route("/orders/:id/status", put(order::update_status))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin,
        ));

    let admin = Router::new()
        .route("/login", post(admin::login))
        .merge(admin_protected);

    Router::new()
        .merge(public)
        .nest("/admin", admin)
        .layer(cors_layer(state.config.cors_allow_origin.as_deref()))
        .with_state(state)
}

/// CORS for the browser frontends. A configured origin restricts; no
/// configuration allows any origin (development).
fn cors_layer(allow_origin: Option<&str>) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    match allow_origin.map(HeaderValue::from_str) {
        Some(Ok(origin)) => cors.allow_origin(origin),
        Some(Err(_)) => {
            warn!("invalid CORS_ALLOW_ORIGIN value, falling back to any origin");
            cors.allow_origin(Any)
        }
        None => cors.allow_origin(Any),
    }
}

/// Liveness probe.
async fn health() -> &'static str {
    "ok"
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ApiConfig, AppState};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;
    use velora_db::{Database, DbConfig};

    async fn app() -> (Router, SharedState) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let state = Arc::new(AppState::new(db, ApiConfig::default()));
        (router(state.clone()), state)
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let (app, _state) = app().await;

        let res = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_admin_mutations_require_bearer_token() {
        let (app, state) = app().await;

        // No token: the gate fails closed
        let res = app
            .clone()
            .oneshot(json_post("/admin/categories", r#"{"name":"Men"}"#))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        // Garbage token: still closed
        let mut req = json_post("/admin/categories", r#"{"name":"Men"}"#);
        req.headers_mut().insert(
            header::AUTHORIZATION,
            "Bearer not.a.token".parse().unwrap(),
        );
        let res = app.clone().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        // Valid token: the mutation goes through
        let token = state.tokens.issue("admin@example.com").unwrap();
        let mut req = json_post("/admin/categories", r#"{"name":"Men"}"#);
        req.headers_mut().insert(
            header::AUTHORIZATION,
            format!("Bearer {}", token).parse().unwrap(),
        );
        let res = app.clone().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        // Public read needs no token
        let res = app
            .oneshot(
                Request::builder()
                    .uri("/categories")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_login_rejects_unknown_account() {
        let (app, _state) = app().await;

        let res = app
            .oneshot(json_post(
                "/admin/login",
                r#"{"email":"ghost@example.com","password":"hunter2hunter2"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_duplicate_category_maps_to_400() {
        let (app, state) = app().await;
        let token = state.tokens.issue("admin@example.com").unwrap();

        for expected in [StatusCode::OK, StatusCode::BAD_REQUEST] {
            let mut req = json_post("/admin/categories", r#"{"name":"Men"}"#);
            req.headers_mut().insert(
                header::AUTHORIZATION,
                format!("Bearer {}", token).parse().unwrap(),
            );
            let res = app.clone().oneshot(req).await.unwrap();
            assert_eq!(res.status(), expected);
        }
    }
}
