use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use http::{header, HeaderValue, Method, StatusCode};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::config::Config;

/// API routes, with the static asset directory behind them at `/`, limited
/// to the one allowed cross-origin caller.
pub fn app(router: Router, config: &Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(config.allowed_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::ORIGIN]);

    router
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn_with_state(config.allowed_origin.clone(), reject_foreign_origin))
                .layer(cors),
        )
}

// Requests without an `Origin`, or from the server's own host, go through.
// Any other origin than the allowed one never reaches a handler.
async fn reject_foreign_origin(State(allowed): State<HeaderValue>, request: Request, next: Next) -> Response {
    let headers = request.headers();
    let Some(origin) = headers.get(header::ORIGIN) else { return next.run(request).await };
    if *origin == allowed || is_same_origin(origin, headers.get(header::HOST)) {
        return next.run(request).await;
    }
    tracing::warn!(origin = ?origin, method = %request.method(), uri = %request.uri(), "rejected cross-origin request");
    StatusCode::FORBIDDEN.into_response()
}

fn is_same_origin(origin: &HeaderValue, host: Option<&HeaderValue>) -> bool {
    let (Ok(origin), Some(Ok(host))) = (origin.to_str(), host.map(HeaderValue::to_str)) else { return false };
    origin.strip_prefix("http://").or_else(|| origin.strip_prefix("https://")) == Some(host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_origin_compares_scheme_stripped_origin_with_host() {
        let host = HeaderValue::from_static("localhost:8000");
        assert!(is_same_origin(&HeaderValue::from_static("http://localhost:8000"), Some(&host)));
        assert!(is_same_origin(&HeaderValue::from_static("https://localhost:8000"), Some(&host)));
        assert!(!is_same_origin(&HeaderValue::from_static("http://evil.example"), Some(&host)));
        assert!(!is_same_origin(&HeaderValue::from_static("http://localhost:8000"), None));
    }
}
