//! HTTP 路由与处理函数
//!
//! - `GET /`                页面（可选 `?class=` 样式钩子）
//! - `GET /api/build-info`  构建元数据 JSON
//! - `GET /health`          健康检查

use crate::model::{BuildInfoResponse, BuildProvenance, HealthStatus};
use crate::render::PageShell;
use crate::util::middleware::request_logging_middleware;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::Html,
    routing::get,
    Json, Router,
};
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;

/// 页面查询参数的样式类键名
pub const CLASS_PARAM: &str = "class";

/// 取第一个 `class` 参数；重复出现时忽略其余值
fn first_class(params: &[(String, String)]) -> Option<&str> {
    params
        .iter()
        .find(|(key, _)| key == CLASS_PARAM)
        .map(|(_, value)| value.as_str())
}

pub fn routes(app_state: AppState) -> Router {
    let api = &app_state.config.api;
    let timeout = Duration::from_secs(api.request_timeout_secs.max(1));

    let mut api_routes = Router::new().route("/build-info", get(build_info));
    if api.cors_allow_any {
        api_routes = api_routes.layer(CorsLayer::permissive());
    }

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .nest("/api", api_routes)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(middleware::from_fn(request_logging_middleware))
        .with_state(app_state)
}

/// GET /
pub async fn index(
    State(app_state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Html<String> {
    let info = app_state.resolver.resolve();
    Html(PageShell::render_with_class(&info, first_class(&params)))
}

/// GET /api/build-info
pub async fn build_info(State(app_state): State<AppState>) -> Json<BuildInfoResponse> {
    Json(BuildInfoResponse {
        success: true,
        data: app_state.resolver.resolve(),
        provenance: BuildProvenance::current(),
    })
}

/// GET /health
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
