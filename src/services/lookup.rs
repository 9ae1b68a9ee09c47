/*
 * Responsibility
 * - The lookup flow: validate → one upstream GET (bounded) → map the outcome
 * - Owns the deadline, so any RegistryClient implementation is bounded
 * - 2xx bodies are relayed byte-for-byte after a JSON well-formedness check
 */
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::de::IgnoredAny;
use serde_json::Value;

use crate::error::AppError;
use crate::services::cnpj::Cnpj;
use crate::services::registry::{RegistryClient, UpstreamResult};

#[derive(Clone)]
pub struct LookupService {
    registry: Arc<dyn RegistryClient>,
    timeout: Duration,
}

impl std::fmt::Debug for LookupService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupService")
            .field("registry", &self.registry.backend_name())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl LookupService {
    pub fn new(registry: Arc<dyn RegistryClient>, timeout: Duration) -> Self {
        Self { registry, timeout }
    }

    /// Look up the raw `cnpj` query value and produce the response to relay.
    pub async fn lookup(&self, raw: Option<&str>) -> Result<Response, AppError> {
        let cnpj = Cnpj::parse(raw.ok_or(AppError::MissingParameter)?)?;

        let started = Instant::now();
        let outcome = match tokio::time::timeout(self.timeout, self.registry.fetch(&cnpj)).await {
            Ok(outcome) => outcome,
            Err(_) => UpstreamResult::NetworkFailure {
                message: format!(
                    "upstream did not respond within {}ms",
                    self.timeout.as_millis()
                ),
            },
        };
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &outcome {
            UpstreamResult::Success { status, .. } => tracing::info!(
                %cnpj,
                backend = self.registry.backend_name(),
                status,
                elapsed_ms,
                "registry lookup succeeded"
            ),
            UpstreamResult::UpstreamError { status, .. } => tracing::warn!(
                %cnpj,
                backend = self.registry.backend_name(),
                status,
                elapsed_ms,
                "registry answered with an error status"
            ),
            UpstreamResult::NetworkFailure { message } => tracing::warn!(
                %cnpj,
                backend = self.registry.backend_name(),
                error = %message,
                elapsed_ms,
                "registry unreachable"
            ),
        }

        relay(outcome)
    }
}

fn relay(outcome: UpstreamResult) -> Result<Response, AppError> {
    match outcome {
        UpstreamResult::Success { body, .. } => {
            serde_json::from_slice::<IgnoredAny>(&body)
                .map_err(|e| AppError::malformed(e.to_string()))?;

            Ok((
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                body,
            )
                .into_response())
        }
        UpstreamResult::UpstreamError {
            status,
            message,
            retry_after,
        } => {
            let upstream = serde_json::from_str::<Value>(&message).ok();
            Err(match status {
                // The registry rejected or does not know the identifier.
                400 | 404 | 422 => AppError::UpstreamNotFound { upstream },
                429 => AppError::UpstreamRateLimited {
                    retry_after,
                    upstream,
                },
                _ => AppError::UpstreamServer { status, upstream },
            })
        }
        UpstreamResult::NetworkFailure { message } => Err(AppError::network(message)),
    }
}
