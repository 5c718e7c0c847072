//! HTTP API
//!
//! Client routes are forwarded to `HostState::handle_request`, which runs
//! mod hooks before the built-in handlers. Images are served straight from
//! the image router.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::IntoResponse,
    routing::{any, get},
    Json, Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tracing::{error, warn};

use crate::host::{HostState, ImageRouter, RouteRequest};

/// Header carrying the player session, passed through to route hooks
pub const SESSION_HEADER: &str = "x-session-id";

#[derive(Clone)]
pub struct AppState {
    pub host: Arc<RwLock<HostState>>,
    pub images: ImageRouter,
}

impl AppState {
    pub fn new(host: HostState) -> Self {
        let images = host.images.clone();
        Self {
            host: Arc::new(RwLock::new(host)),
            images,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/client/*path", any(client_request))
        .route("/files/*path", get(serve_image))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().timestamp_millis()
    }))
}

async fn client_request(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let request = RouteRequest {
        url: uri.path().to_string(),
        body: String::from_utf8_lossy(&body).into_owned(),
        session_id: headers
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string(),
    };

    let mut host = state.host.write().await;
    match host.handle_request(&request) {
        Ok(Some(output)) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            output,
        )
            .into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            error!("Request {} failed: {}", request.url, e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn serve_image(State(state): State<AppState>, Path(path): Path<String>) -> impl IntoResponse {
    let url = format!("/files/{}", path);
    let Some(file) = state.images.resolve(&url) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match tokio::fs::read(&file).await {
        Ok(bytes) => {
            let content_type = match file.extension().and_then(|e| e.to_str()) {
                Some("png") => "image/png",
                _ => "image/jpeg",
            };
            ([(header::CONTENT_TYPE, content_type)], bytes).into_response()
        }
        Err(e) => {
            warn!("Failed to read image {:?}: {}", file, e);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tempfile::TempDir;
    use tower::ServiceExt;

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = router(AppState::new(HostState::new()));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("\"ok\""));
    }

    #[tokio::test]
    async fn test_unknown_client_route_is_404() {
        let app = router(AppState::new(HostState::new()));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/client/nothing/here")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_assort_request_runs_trader_hook() {
        use crate::config::ModConfig;
        use crate::data::{base_class, ItemTemplate};
        use crate::trader::helpers::create_glock;
        use crate::trader_mod::TraderMod;
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut host = HostState::new();
        host.tables.templates.items.insert(ItemTemplate::node(base_class::AMMO, "Ammo", ""));
        host.tables.templates.items.insert(ItemTemplate::item("ammo", "Ammo", base_class::AMMO));
        for part in create_glock() {
            host.tables.templates.items.insert(ItemTemplate::item(&part.tpl, "Part", ""));
        }

        let config = ModConfig {
            randomize_stock_available: true,
            out_of_stock_chance: 0,
            ..Default::default()
        };
        let mut trader_mod = TraderMod::new(
            Arc::new(config),
            std::path::PathBuf::from("."),
            StdRng::seed_from_u64(11),
        )
        .unwrap();
        trader_mod.pre_load(&mut host).unwrap();
        trader_mod.post_db_load(&mut host).unwrap();

        let app = router(AppState::new(host));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/client/trading/api/getTraderAssort/{}", trader_mod.trader_id()))
                    .header(SESSION_HEADER, "session-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let assort: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        let roots: Vec<_> = assort["items"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|item| item["parentId"] == "hideout")
            .collect();
        assert_eq!(roots.len(), 2);
        for item in roots {
            let count = item["upd"]["StackObjectsCount"].as_u64().unwrap();
            assert!((1..=25).contains(&count));
            assert_eq!(item["upd"]["UnlimitedCount"], false);
        }
    }

    #[tokio::test]
    async fn test_serves_registered_image() {
        let temp_dir = TempDir::new().unwrap();
        let image = temp_dir.path().join("K.jpg");
        std::fs::write(&image, b"jpeg-bytes").unwrap();

        let host = HostState::new();
        host.images.add_route("/files/trader/avatar/k", image);
        let app = router(AppState::new(host));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/files/trader/avatar/k.jpg")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/jpeg");
        assert_eq!(body_string(response).await, "jpeg-bytes");

        let missing = app
            .oneshot(
                Request::builder()
                    .uri("/files/trader/avatar/nope.jpg")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}
