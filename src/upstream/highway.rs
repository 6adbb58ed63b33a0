//! HTTP client for the Highway carrier API.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::UpstreamConfig;
use crate::domain::{CarrierRecord, PhoneStatus};
use crate::upstream::{Lookup, UpstreamError, VettingProvider};

/// Path of the carrier API below the host.
const API_ROOT: &str = "/core/connect/external_api/v1/carriers";

#[derive(Debug, Serialize)]
struct PhoneSearchRequest<'a> {
    phone_e164: &'a str,
}

/// Vetting provider backed by the Highway REST API.
///
/// The base address is fixed at construction. The inner `reqwest::Client`
/// pools connections across calls.
#[derive(Clone)]
pub struct HighwayClient {
    client: Client,
    token: String,
    api_root: Url,
}

impl HighwayClient {
    /// Create a client for the host selected by `config`.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let raw = format!("{}{}", config.host(), API_ROOT);
        let api_root =
            Url::parse(&raw).map_err(|e| UpstreamError::InvalidUrl(format!("{raw}: {e}")))?;
        if api_root.cannot_be_a_base() {
            return Err(UpstreamError::InvalidUrl(raw));
        }

        let client = Client::builder()
            .user_agent(concat!("carrier-vetting-proxy/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            token: config.api_token.clone(),
            api_root,
        })
    }

    /// Base URL every lookup is resolved against.
    pub fn api_root(&self) -> &Url {
        &self.api_root
    }

    /// Append path segments to the API root, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, UpstreamError> {
        let mut url = self.api_root.clone();
        url.path_segments_mut()
            .map_err(|_| UpstreamError::InvalidUrl(self.api_root.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request and map the provider's status codes.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        lookup: &'static str,
    ) -> Result<Lookup<T>, UpstreamError> {
        let response = request.bearer_auth(&self.token).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            tracing::debug!(lookup, "Vetting provider returned not found");
            return Ok(Lookup::NotFound);
        }

        let body = response.text().await?;

        if status == StatusCode::UNAUTHORIZED {
            return Err(UpstreamError::Unauthorized { body });
        }
        if !status.is_success() {
            tracing::warn!(lookup, status = %status, "Vetting provider returned an error");
            return Err(UpstreamError::Status { status, body });
        }

        let record = serde_json::from_str(&body)?;
        Ok(Lookup::Found(record))
    }
}

#[async_trait]
impl VettingProvider for HighwayClient {
    async fn lookup_by_phone(
        &self,
        phone_e164: &str,
    ) -> Result<Lookup<PhoneStatus>, UpstreamError> {
        let url = self.endpoint(&["phone_search_rapid_check"])?;
        let request = self
            .client
            .post(url)
            .json(&PhoneSearchRequest { phone_e164 });
        self.execute(request, "phone").await
    }

    async fn lookup_by_mc(&self, mc_number: &str) -> Result<Lookup<CarrierRecord>, UpstreamError> {
        let url = self.endpoint(&["mc", mc_number, "by_identifier"])?;
        self.execute(self.client.get(url), "mc").await
    }

    async fn lookup_by_dot(
        &self,
        dot_number: &str,
    ) -> Result<Lookup<CarrierRecord>, UpstreamError> {
        let url = self.endpoint(&["DOT", dot_number, "by_identifier"])?;
        self.execute(self.client.get(url), "dot").await
    }
}
