//! 路由组装
//!
//! 把各 API 模块的路由合并成完整应用，并挂载中间件。

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::api;
use crate::core::ServerState;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Order intake and lifecycle
        .merge(api::orders::router())
        // Check-in and pod confirmation
        .merge(api::checkin::router())
        // Pod cleaning and service state
        .merge(api::pods::router())
        // Public queue board
        .merge(api::board::router())
        // Ordering window
        .merge(api::hours::router())
        // Health - public route
        .merge(api::health::router())
}

/// Build a fully configured application with all middleware and state
///
/// Used by both the HTTP server and in-process test calls
pub fn build_app(state: ServerState) -> Router {
    build_router()
        // CORS - 看板轮询来自大屏和手机浏览器
        .layer(CorsLayer::permissive())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Request ID - Generate unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        .with_state(state)
}
