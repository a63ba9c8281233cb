//! HTTP 中间件
//! 请求追踪、IP 白名单

use crate::{auth::JwtService, config::AppConfig, error::AppError, services::AccessService};
use axum::{
    extract::{ConnectInfo, MatchedPath, Request, State},
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub jwt_service: Arc<JwtService>,
    pub access_service: Arc<AccessService>,
}

tokio::task_local! {
    static REQUEST_ID: String;
}

/// 当前请求的 request id；不在请求处理流程中时返回 None
pub fn current_request_id() -> Option<String> {
    REQUEST_ID.try_with(Clone::clone).ok()
}

const TRACE_HEADER: &str = "x-trace-id";
const REQUEST_HEADER: &str = "x-request-id";

/// 请求追踪中间件
///
/// 沿用调用方的 trace id（没有则生成），每个请求另分配 request id，
/// 两者都写回响应头。request id 在处理期间可通过 [`current_request_id`] 读取，
/// 错误响应体使用同一个值。指标按路由模板而非原始 URI 打标签。
pub async fn request_tracking_middleware(req: Request, next: Next) -> Response {
    let trace_id = trace_id_from(req.headers());
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let span = tracing::info_span!(
        "http_request",
        trace_id = %trace_id,
        request_id = %request_id,
        method = %method,
        route = %route,
    );

    async move {
        let start = Instant::now();
        let mut response = REQUEST_ID.scope(request_id.clone(), next.run(req)).await;
        let elapsed = start.elapsed();
        let status = response.status();

        metrics::counter!(
            "portal_http_requests_total",
            "route" => route.clone(),
            "status" => status_class(status.as_u16())
        )
        .increment(1);
        metrics::histogram!("portal_http_request_duration_seconds", "route" => route)
            .record(elapsed.as_secs_f64());

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), elapsed_ms = elapsed.as_millis() as u64, "Request failed");
        } else {
            tracing::info!(status = status.as_u16(), elapsed_ms = elapsed.as_millis() as u64, "Request completed");
        }

        for (name, value) in [(TRACE_HEADER, &trace_id), (REQUEST_HEADER, &request_id)] {
            if let Ok(value) = HeaderValue::from_str(value) {
                response.headers_mut().insert(name, value);
            }
        }

        response
    }
    .instrument(span)
    .await
}

fn trace_id_from(headers: &HeaderMap) -> String {
    headers
        .get(TRACE_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

fn status_class(status: u16) -> &'static str {
    match status / 100 {
        2 => "2xx",
        3 => "3xx",
        4 => "4xx",
        5 => "5xx",
        _ => "other",
    }
}

/// IP 白名单中间件
///
/// 配置了白名单时，无法确定来源地址的请求一律拒绝。
pub async fn ip_whitelist_middleware(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let security = &state.config.security;

    if let Some(allowed_ips) = &security.allowed_ips {
        let peer = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());
        let client_ip = client_ip(req.headers(), peer, security.trust_proxy);
        let allowed = client_ip.is_some_and(|ip| {
            allowed_ips
                .iter()
                .filter_map(|entry| entry.trim().parse::<IpAddr>().ok())
                .any(|entry| entry == ip)
        });

        if !allowed {
            tracing::warn!(client_ip = ?client_ip, "Client IP not in whitelist");
            return Err(AppError::Forbidden);
        }
    }

    Ok(next.run(req).await)
}

/// 客户端地址
///
/// 信任代理时优先取转发头，否则（或没有转发头时）使用对端地址。
fn client_ip(headers: &HeaderMap, peer: Option<IpAddr>, trust_proxy: bool) -> Option<IpAddr> {
    if !trust_proxy {
        return peer;
    }

    // X-Forwarded-For 取最左侧的原始客户端
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next());

    match forwarded.or_else(|| headers.get("x-real-ip").and_then(|v| v.to_str().ok())) {
        Some(value) => value.trim().parse().ok(),
        None => peer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_id_reused_or_generated() {
        let mut headers = HeaderMap::new();
        headers.insert(TRACE_HEADER, "test-trace-123".parse().unwrap());
        assert_eq!(trace_id_from(&headers), "test-trace-123");

        let generated = trace_id_from(&HeaderMap::new());
        assert!(Uuid::parse_str(&generated).is_ok());
    }

    #[tokio::test]
    async fn test_request_id_scoped_to_request() {
        assert_eq!(current_request_id(), None);

        let seen = REQUEST_ID
            .scope("req-42".to_string(), async { current_request_id() })
            .await;
        assert_eq!(seen.as_deref(), Some("req-42"));
    }

    #[test]
    fn test_status_class() {
        assert_eq!(status_class(200), "2xx");
        assert_eq!(status_class(204), "2xx");
        assert_eq!(status_class(403), "4xx");
        assert_eq!(status_class(503), "5xx");
        assert_eq!(status_class(101), "other");
    }

    #[test]
    fn test_client_ip_from_proxy_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "10.0.0.1, 10.0.0.2".parse().unwrap());
        headers.insert("x-real-ip", "10.0.0.9".parse().unwrap());

        assert_eq!(client_ip(&headers, None, true), Some("10.0.0.1".parse().unwrap()));

        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", "::1".parse().unwrap());
        assert_eq!(client_ip(&headers, None, true), Some("::1".parse().unwrap()));

        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "garbage".parse().unwrap());
        assert_eq!(client_ip(&headers, None, true), None);
    }

    #[test]
    fn test_client_ip_from_peer() {
        let peer: IpAddr = "192.168.1.20".parse().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "10.0.0.1".parse().unwrap());

        // 不信任代理时忽略转发头
        assert_eq!(client_ip(&headers, Some(peer), false), Some(peer));
        assert_eq!(client_ip(&HeaderMap::new(), Some(peer), true), Some(peer));
        assert_eq!(client_ip(&HeaderMap::new(), None, false), None);
    }
}
