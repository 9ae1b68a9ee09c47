//! CORS headers for browser clients.
//!
//! Policy:
//! - Any origin, WITHOUT credentials. The proxy is public and carries no auth.
//! - Only GET (the lookup) and OPTIONS (preflight) are advertised.
//! - `Access-Control-Allow-Origin` / `Access-Control-Allow-Methods` are present on
//!   every response: validation errors, gateway errors, router 404s and timeouts.
//!
//! `CorsLayer` answers preflight requests; the two `SetResponseHeaderLayer`s
//! cover responses where it would not emit `Access-Control-Allow-Methods`.

use axum::Router;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ACCEPT, CONTENT_TYPE, HeaderName,
    HeaderValue,
};
use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

pub const ALLOWED_METHODS: &str = "GET, OPTIONS";

/// Apply the CORS policy to the given Router.
///
/// Must be the outermost layer so responses produced by inner middleware
/// (timeouts) still carry the headers.
pub fn apply(router: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT, CONTENT_TYPE, HeaderName::from_static("x-request-id")])
        .expose_headers([HeaderName::from_static("x-request-id")])
        .max_age(std::time::Duration::from_secs(60 * 10));

    router
        .layer(cors)
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
}
