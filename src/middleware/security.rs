// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Security headers middleware.
//!
//! JSON API responses load nothing and are never cached, since a user's log
//! changes with every append. The landing page may load its own stylesheet
//! and script from `/public`.

use axum::{
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};

const API_PREFIX: &str = "/api/";

const API_CONTENT_SECURITY_POLICY: &str = "default-src 'none'; frame-ancestors 'none'";

const SITE_CONTENT_SECURITY_POLICY: &str = "default-src 'self'; frame-ancestors 'none'";

/// Add security headers to all responses.
pub async fn add_security_headers(req: Request, next: Next) -> Response {
    let is_api = req.uri().path().starts_with(API_PREFIX);
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("no-referrer"),
    );

    if is_api {
        headers.insert(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(API_CONTENT_SECURITY_POLICY),
        );
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    } else {
        headers.insert(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(SITE_CONTENT_SECURITY_POLICY),
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::{routing::get, Router};
    use tower::ServiceExt; // for oneshot

    fn app() -> Router {
        Router::new()
            .route("/", get(|| async { "<html></html>" }))
            .route("/api/hello", get(|| async { "{}" }))
            .layer(axum::middleware::from_fn(add_security_headers))
    }

    async fn headers_for(uri: &str) -> axum::http::HeaderMap {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        response.headers().clone()
    }

    #[tokio::test]
    async fn test_common_headers() {
        for uri in ["/", "/api/hello"] {
            let headers = headers_for(uri).await;
            assert_eq!(headers.get("X-Content-Type-Options").unwrap(), "nosniff");
            assert_eq!(headers.get("X-Frame-Options").unwrap(), "DENY");
            assert_eq!(headers.get("Referrer-Policy").unwrap(), "no-referrer");
        }
    }

    #[tokio::test]
    async fn test_api_responses_are_locked_down_and_uncached() {
        let headers = headers_for("/api/hello").await;

        assert_eq!(
            headers.get("Content-Security-Policy").unwrap(),
            API_CONTENT_SECURITY_POLICY
        );
        assert_eq!(headers.get(header::CACHE_CONTROL).unwrap(), "no-store");
    }

    #[tokio::test]
    async fn test_site_may_load_same_origin_assets() {
        let headers = headers_for("/").await;

        assert_eq!(
            headers.get("Content-Security-Policy").unwrap(),
            SITE_CONTENT_SECURITY_POLICY
        );
        assert!(headers.get(header::CACHE_CONTROL).is_none());
    }
}
