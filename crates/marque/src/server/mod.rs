mod admin;
mod assets;
mod auth;
mod error;
mod labels;
mod operators;
mod views;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{any, delete, get, post};
use axum::{Json, Router};
use tokio::sync::RwLock;
use tower_http::cors::{AllowOrigin, CorsLayer};

use marque_core::provider::AssetProvider;
use marque_core::store::MemoryEngine;
use marque_core::Registry;

// ==============================================================================
// Application State
// ==============================================================================

pub struct AppState {
    pub registry: Arc<RwLock<Registry<MemoryEngine>>>,
    pub provider: Arc<dyn AssetProvider>,
    pub api_token: String,
}

type SharedState = Arc<AppState>;

// ==============================================================================
// Router
// ==============================================================================

pub fn build_router(state: AppState, origin: &str) -> Router {
    // Only reflect the allowed origin when the request's Origin header
    // actually matches. Otherwise, omit the header entirely so browsers
    // get a clean CORS rejection instead of a mismatched origin value.
    let allowed: axum::http::HeaderValue = origin.parse().expect("valid origin header value");
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate({
            let allowed = allowed.clone();
            move |request_origin: &axum::http::HeaderValue, _| *request_origin == allowed
        }))
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::HeaderName::from_static("x-api-token"),
            axum::http::header::HeaderName::from_static("x-caller-id"),
        ]);

    let shared = Arc::new(state);

    let public_api = Router::new().route("/api/v1/health", get(health));

    // Batch routes get a 1 MB body limit to prevent abuse via oversized
    // payloads. Single-record routes use Axum's default.
    const BATCH_BODY_LIMIT: usize = 1024 * 1024;

    let batch_routes = Router::new()
        .route("/api/v1/labels", post(labels::get_labels_batch))
        .route("/api/v1/label/{id}/assets", post(assets::attach_label_batch))
        .route("/api/v1/assets/labels", post(assets::list_assets_labels_batch))
        .route("/api/v1/assets/view/{kind}", post(views::get_assets_view_batch))
        .layer(DefaultBodyLimit::max(BATCH_BODY_LIMIT));

    let registry_api = Router::new()
        .route("/api/v1/admin", get(admin::get_admin).post(admin::change_admin))
        .route("/api/v1/label", post(labels::create_label))
        .route(
            "/api/v1/label/{id}",
            get(labels::get_label).delete(labels::remove_label),
        )
        .route(
            "/api/v1/label/{id}/operator",
            post(operators::grant_operator),
        )
        .route(
            "/api/v1/label/{id}/operator/{operator}",
            delete(operators::revoke_operator),
        )
        .route(
            "/api/v1/operator/{operator}/labels",
            get(operators::list_operator_labels),
        )
        .route("/api/v1/label/{id}/asset", post(assets::attach_label))
        .route(
            "/api/v1/label/{id}/asset/{asset}",
            delete(assets::detach_label),
        )
        .route("/api/v1/asset/{asset}/labels", get(assets::list_asset_labels))
        .route(
            "/api/v1/asset/{asset}/view/{kind}",
            get(views::get_asset_view),
        )
        .merge(batch_routes);

    Router::new()
        .merge(public_api)
        .merge(registry_api)
        .route("/api", any(api_not_found))
        .route("/api/{*path}", any(api_not_found))
        .layer(cors)
        .with_state(shared)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn api_not_found() -> error::AppError {
    error::AppError::NotFound("API route not found".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use marque_core::error::ProviderError;
    use marque_core::provider::AssetInfo;
    use marque_core::{AccountId, AssetId, RegistryLimits};
    use tower::ServiceExt;

    const TOKEN: &str = "test-token";
    const ADMIN: &str = "admin";
    const OPERATOR: &str = "operator-1";

    #[derive(Clone, Copy)]
    enum FakeProviderMode {
        Ok,
        NotFound,
        BackendFailure,
    }

    struct FakeProvider {
        mode: FakeProviderMode,
    }

    #[async_trait]
    impl AssetProvider for FakeProvider {
        async fn asset_info(&self, asset: AssetId) -> Result<AssetInfo, ProviderError> {
            match self.mode {
                FakeProviderMode::Ok => Ok(sample_info(asset)),
                FakeProviderMode::NotFound => Err(ProviderError::AssetNotFound(asset)),
                FakeProviderMode::BackendFailure => {
                    Err(ProviderError::Backend("metadata service is down".to_string()))
                }
            }
        }
    }

    fn sample_info(asset: AssetId) -> AssetInfo {
        AssetInfo {
            name: format!("Asset {asset}"),
            unit_name: "UNIT".to_string(),
            decimals: 6,
            url: format!("https://assets.example/{asset}"),
            total: 1_000_000,
            creator: None,
            manager: None,
            freeze: Some(AccountId::new("freezer").expect("valid account")),
            clawback: None,
            reserve: None,
            default_frozen: false,
            reserve_balance: 0,
            metadata_hash: None,
        }
    }

    fn test_router(mode: FakeProviderMode) -> Router {
        let registry = Registry::create(
            MemoryEngine::new(),
            AccountId::new(ADMIN).expect("valid admin id"),
            RegistryLimits::default(),
        )
        .expect("registry must initialize");

        let state = AppState {
            registry: Arc::new(RwLock::new(registry)),
            provider: Arc::new(FakeProvider { mode }),
            api_token: TOKEN.to_string(),
        };
        build_router(state, "http://127.0.0.1:3180")
    }

    fn request(
        method: &str,
        uri: &str,
        caller: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("x-api-token", TOKEN);
        if let Some(caller) = caller {
            builder = builder.header("x-caller-id", caller);
        }
        match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .expect("request must build"),
            None => builder.body(Body::empty()).expect("request must build"),
        }
    }

    async fn response_body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), 1024 * 1024)
            .await
            .expect("response body must be readable");
        serde_json::from_slice(&bytes).expect("response body must be valid JSON")
    }

    /// Drive `router` with one request and return (status, body).
    async fn send(
        router: &Router,
        method: &str,
        uri: &str,
        caller: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let response = router
            .clone()
            .oneshot(request(method, uri, caller, body))
            .await
            .expect("router should serve request");
        let status = response.status();
        (status, response_body_json(response).await)
    }

    // --------------------------------------------------------------------------
    // Routing & auth
    // --------------------------------------------------------------------------

    #[tokio::test]
    async fn unknown_api_route_returns_json_404() {
        let router = test_router(FakeProviderMode::Ok);
        let (status, json) = send(&router, "GET", "/api/v1/does-not-exist", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            json.get("error").and_then(serde_json::Value::as_str),
            Some("API route not found")
        );
    }

    #[tokio::test]
    async fn health_needs_no_token() {
        let router = test_router(FakeProviderMode::Ok);
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .expect("request must build"),
            )
            .await
            .expect("router should serve request");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_token_is_rejected_with_401() {
        let router = test_router(FakeProviderMode::Ok);
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/v1/label/US")
                    .body(Body::empty())
                    .expect("request must build"),
            )
            .await
            .expect("router should serve request");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn mutation_without_caller_identity_is_rejected_with_401() {
        let router = test_router(FakeProviderMode::Ok);
        let (status, _) = send(
            &router,
            "POST",
            "/api/v1/label",
            None,
            Some(serde_json::json!({ "id": "US", "name": "United States" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn non_admin_create_label_maps_to_403() {
        let router = test_router(FakeProviderMode::Ok);
        let (status, _) = send(
            &router,
            "POST",
            "/api/v1/label",
            Some("mallory"),
            Some(serde_json::json!({ "id": "US", "name": "United States" })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    // --------------------------------------------------------------------------
    // Label lifecycle over HTTP
    // --------------------------------------------------------------------------

    async fn create_us_label(router: &Router) {
        let (status, json) = send(
            router,
            "POST",
            "/api/v1/label",
            Some(ADMIN),
            Some(serde_json::json!({ "id": "US", "name": "United States" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["num_assets"], serde_json::json!(0));
        assert_eq!(json["num_operators"], serde_json::json!(0));
    }

    async fn grant_us_operator(router: &Router) {
        let (status, _) = send(
            router,
            "POST",
            "/api/v1/label/US/operator",
            Some(ADMIN),
            Some(serde_json::json!({ "operator": OPERATOR })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_label_id_maps_to_400() {
        let router = test_router(FakeProviderMode::Ok);
        let (status, _) = send(
            &router,
            "POST",
            "/api/v1/label",
            Some(ADMIN),
            Some(serde_json::json!({ "id": "USA", "name": "too long" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn duplicate_label_maps_to_409() {
        let router = test_router(FakeProviderMode::Ok);
        create_us_label(&router).await;
        let (status, _) = send(
            &router,
            "POST",
            "/api/v1/label",
            Some(ADMIN),
            Some(serde_json::json!({ "id": "US", "name": "again" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn unknown_label_read_maps_to_404() {
        let router = test_router(FakeProviderMode::Ok);
        let (status, _) = send(&router, "GET", "/api/v1/label/ZZ", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn full_label_lifecycle_over_http() {
        let router = test_router(FakeProviderMode::Ok);
        create_us_label(&router).await;
        grant_us_operator(&router).await;

        // Operator attaches the label to asset 12345.
        let (status, _) = send(
            &router,
            "POST",
            "/api/v1/label/US/asset",
            Some(OPERATOR),
            Some(serde_json::json!({ "asset": 12345 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, json) = send(&router, "GET", "/api/v1/asset/12345/labels", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!(["US"]));

        let (_, json) = send(&router, "GET", "/api/v1/label/US", None, None).await;
        assert_eq!(json["num_assets"], serde_json::json!(1));
        assert_eq!(json["num_operators"], serde_json::json!(1));

        // Revoking the last operator while the label carries an asset: 409.
        let (status, _) = send(
            &router,
            "DELETE",
            &format!("/api/v1/label/US/operator/{OPERATOR}"),
            Some(ADMIN),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        // Detach, then the revoke goes through, then the label can go.
        let (status, _) = send(
            &router,
            "DELETE",
            "/api/v1/label/US/asset/12345",
            Some(OPERATOR),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(
            &router,
            "DELETE",
            &format!("/api/v1/label/US/operator/{OPERATOR}"),
            Some(ADMIN),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&router, "DELETE", "/api/v1/label/US", Some(ADMIN), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&router, "GET", "/api/v1/label/US", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn admin_cannot_attach_labels_directly() {
        let router = test_router(FakeProviderMode::Ok);
        create_us_label(&router).await;
        grant_us_operator(&router).await;

        let (status, _) = send(
            &router,
            "POST",
            "/api/v1/label/US/asset",
            Some(ADMIN),
            Some(serde_json::json!({ "asset": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn batch_attach_failure_leaves_no_partial_state() {
        let router = test_router(FakeProviderMode::Ok);
        create_us_label(&router).await;
        grant_us_operator(&router).await;

        let (status, _) = send(
            &router,
            "POST",
            "/api/v1/label/US/asset",
            Some(OPERATOR),
            Some(serde_json::json!({ "asset": 2 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        // Asset 2 is already attached: the whole batch must be discarded.
        let (status, _) = send(
            &router,
            "POST",
            "/api/v1/label/US/assets",
            Some(OPERATOR),
            Some(serde_json::json!({ "assets": [1, 2, 3] })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (_, json) = send(
            &router,
            "POST",
            "/api/v1/assets/labels",
            None,
            Some(serde_json::json!({ "assets": [1, 2, 3] })),
        )
        .await;
        assert_eq!(json, serde_json::json!([[], ["US"], []]));

        let (_, json) = send(&router, "GET", "/api/v1/label/US", None, None).await;
        assert_eq!(json["num_assets"], serde_json::json!(1));
    }

    #[tokio::test]
    async fn change_admin_over_http() {
        let router = test_router(FakeProviderMode::Ok);
        let (status, json) = send(
            &router,
            "POST",
            "/api/v1/admin",
            Some(ADMIN),
            Some(serde_json::json!({ "new_admin": "successor" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["admin"], serde_json::json!("successor"));

        let (_, json) = send(&router, "GET", "/api/v1/admin", None, None).await;
        assert_eq!(json["admin"], serde_json::json!("successor"));
    }

    // --------------------------------------------------------------------------
    // View endpoints
    // --------------------------------------------------------------------------

    #[tokio::test]
    async fn micro_view_returns_provider_fields() {
        let router = test_router(FakeProviderMode::Ok);
        let (status, json) = send(&router, "GET", "/api/v1/asset/5/view/micro", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!({ "unit_name": "UNIT", "decimals": 6 })
        );
    }

    #[tokio::test]
    async fn labelled_view_includes_current_labels() {
        let router = test_router(FakeProviderMode::Ok);
        create_us_label(&router).await;
        grant_us_operator(&router).await;
        let (status, _) = send(
            &router,
            "POST",
            "/api/v1/label/US/asset",
            Some(OPERATOR),
            Some(serde_json::json!({ "asset": 5 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, json) = send(&router, "GET", "/api/v1/asset/5/view/small", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["labels"], serde_json::json!(["US"]));
        assert_eq!(json["has_freeze"], serde_json::json!(true));
        assert_eq!(json["has_clawback"], serde_json::json!(false));
    }

    #[tokio::test]
    async fn batch_views_parallel_the_request_order() {
        let router = test_router(FakeProviderMode::Ok);
        let (status, json) = send(
            &router,
            "POST",
            "/api/v1/assets/view/tiny",
            None,
            Some(serde_json::json!({ "assets": [9, 4] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json[0]["name"], serde_json::json!("Asset 9"));
        assert_eq!(json[1]["name"], serde_json::json!("Asset 4"));
    }

    #[tokio::test]
    async fn unknown_view_kind_maps_to_400() {
        let router = test_router(FakeProviderMode::Ok);
        let (status, _) = send(&router, "GET", "/api/v1/asset/5/view/medium", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn provider_miss_maps_to_404() {
        let router = test_router(FakeProviderMode::NotFound);
        let (status, _) = send(&router, "GET", "/api/v1/asset/5/view/full", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn provider_failure_maps_to_502() {
        let router = test_router(FakeProviderMode::BackendFailure);
        let (status, _) = send(&router, "GET", "/api/v1/asset/5/view/full", None, None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
