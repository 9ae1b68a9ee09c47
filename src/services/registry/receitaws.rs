use std::error::Error as _;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, RETRY_AFTER};
use url::Url;

use crate::services::cnpj::Cnpj;
use crate::services::registry::client::{RegistryClient, RegistryError, UpstreamResult};

const USER_AGENT: &str = concat!("cnpj-proxy/", env!("CARGO_PKG_VERSION"));

/// ReceitaWS-backed registry client (`GET {base}/v1/cnpj/{cnpj}`).
///
/// `reqwest::Client` pools connections internally, so one instance is shared
/// across all requests.
#[derive(Clone, Debug)]
pub struct ReceitaWsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ReceitaWsClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, RegistryError> {
        if base_url.cannot_be_a_base() {
            return Err(RegistryError::InvalidBaseUrl(base_url.to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RegistryError::Build(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    fn endpoint(&self, cnpj: &Cnpj) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base can always take path segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v1", "cnpj", cnpj.as_str()]);
        }
        url
    }
}

// reqwest's top-level message hides the cause ("error sending request for url ...");
// the source chain carries the part worth reporting.
fn describe(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        return "upstream request timed out".to_string();
    }

    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[async_trait]
impl RegistryClient for ReceitaWsClient {
    fn backend_name(&self) -> &'static str {
        "receitaws"
    }

    async fn fetch(&self, cnpj: &Cnpj) -> UpstreamResult {
        let url = self.endpoint(cnpj);

        let response = match self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                return UpstreamResult::NetworkFailure {
                    message: describe(&e),
                };
            }
        };

        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok());

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                return UpstreamResult::NetworkFailure {
                    message: describe(&e),
                };
            }
        };

        if status.is_success() {
            UpstreamResult::Success {
                status: status.as_u16(),
                body,
            }
        } else {
            UpstreamResult::UpstreamError {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&body).into_owned(),
                retry_after,
            }
        }
    }
}
