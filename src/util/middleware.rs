use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};
use std::time::Instant;

fn extract_client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .or_else(|| headers.get("x-real-ip"))
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
}

fn extract_user_agent(headers: &HeaderMap) -> &str {
    headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

fn is_quiet_path(path: &str) -> bool {
    matches!(path, "/health" | "/favicon.ico")
}

// 统一请求日志中间件
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let client_ip = extract_client_ip(request.headers());
    let user_agent = extract_user_agent(request.headers()).to_string();

    let response = next.run(request).await;

    let elapsed_ms = start_time.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    if is_quiet_path(uri.path()) {
        tracing::debug!(
            target: "http.server",
            event = "http.request",
            method = %method,
            path = %uri.path(),
            status,
            elapsed_ms
        );
    } else {
        tracing::info!(
            target: "http.server",
            event = "http.request",
            method = %method,
            path = %uri.path(),
            status,
            elapsed_ms,
            client_ip = client_ip.as_deref().unwrap_or("-"),
            user_agent = %user_agent
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn client_ip_prefers_first_forwarded_entry() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("10.0.0.1, 10.0.0.2"));
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.9"));
        assert_eq!(extract_client_ip(&headers).as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn user_agent_defaults_to_unknown() {
        assert_eq!(extract_user_agent(&HeaderMap::new()), "unknown");
    }
}
