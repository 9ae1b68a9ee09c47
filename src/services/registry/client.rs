//! Registry client interface used by the lookup service.
use async_trait::async_trait;
use axum::body::Bytes;
use thiserror::Error;

use crate::services::cnpj::Cnpj;

/// Errors raised while *building* a registry client (startup only).
///
/// Per-request failures are not errors here; they are reported as
/// `UpstreamResult` variants so the lookup service decides the HTTP mapping.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("registry base url cannot carry a path: {0}")]
    InvalidBaseUrl(String),
    #[error("registry http client error: {0}")]
    Build(String),
}

/// Outcome of one outbound lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpstreamResult {
    // 2xx; the body is not inspected yet.
    Success {
        status: u16,
        body: Bytes,
    },
    // Connected, but the registry answered with a non-2xx status.
    UpstreamError {
        status: u16,
        message: String,
        retry_after: Option<u64>,
    },
    // Timeout, DNS, refused/reset connection, truncated body.
    NetworkFailure {
        message: String,
    },
}

/// The one capability the proxy needs from the registry: GET a CNPJ.
///
/// Implementations must not retry; a single call per lookup.
#[async_trait]
pub trait RegistryClient: Send + Sync + 'static {
    // Backend name (for logging).
    fn backend_name(&self) -> &'static str;

    async fn fetch(&self, cnpj: &Cnpj) -> UpstreamResult;
}
