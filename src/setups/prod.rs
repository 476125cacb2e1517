//! Production server setup code

use crate::{
    models::session::{Session, SessionCreated, SessionRequest, VerificationResult},
    settings,
    setups::{ProviderError, ServerSetup, VerificationClient},
};
use anyhow::{Context as _, Result};
use async_trait::async_trait;
use http::{header, StatusCode};
use url::Url;

/// Header carrying the SDK id on every provider call.
const SDK_ID_HEADER: &str = "Yoti-SDK-Id";

/// Production implementation of `ServerSetup`.
/// Actually calls out to the hosted provider configured in `settings.toml`.
#[derive(Clone, Debug, Default)]
pub struct ProdSetup;

impl ServerSetup for ProdSetup {
    type VerificationClient = YotiClient;
}

/// Client for the hosted Yoti AVS REST API.
#[derive(Clone, Debug)]
pub struct YotiClient {
    settings: settings::Yoti,
    api_base: Url,
    client: reqwest::Client,
}

impl YotiClient {
    /// Build a client from provider settings. The underlying reqwest
    /// client only carries a request timeout if one is configured.
    pub fn new(settings: settings::Yoti, http: &settings::HttpClient) -> Result<Self> {
        let api_base = Url::parse(&settings.api_url).context("invalid yoti.api_url")?;

        let mut builder =
            reqwest::Client::builder().pool_idle_timeout(http.pool_idle_timeout());
        if let Some(timeout) = http.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            settings,
            api_base,
            client: builder.build()?,
        })
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.api_base.clone();
        let joined = format!("{}/{}", url.path().trim_end_matches('/'), path);
        url.set_path(&joined);
        url
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.settings.bearer_token),
            )
            .header(SDK_ID_HEADER, &self.settings.client_sdk_id)
    }
}

#[async_trait]
impl VerificationClient for YotiClient {
    async fn create_session(
        &self,
        request: &SessionRequest,
    ) -> Result<Session, ProviderError> {
        let url = self.endpoint("sessions");
        tracing::info!(%url, reference_id = %request.reference_id, "opening verification session");

        let response = self
            .authorized(self.client.post(url))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            tracing::error!(%status, %body, "provider rejected session creation");
            return Err(ProviderError::UpstreamHttp { status, body });
        }

        let created: SessionCreated = response.json().await?;
        let id = created.id.ok_or(ProviderError::MissingField("id"))?;

        tracing::debug!(session_id = %id, "verification session open");
        Ok(Session { id })
    }

    async fn fetch_result(
        &self,
        session_id: &str,
    ) -> Result<VerificationResult, ProviderError> {
        let url = self.endpoint(&format!("sessions/{session_id}/result"));
        tracing::info!(%url, "polling verification result");

        let response = self.authorized(self.client.get(url)).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await?;
            tracing::error!(%status, %body, "provider rejected result poll");
            return Err(ProviderError::UpstreamHttp { status, body });
        }

        Ok(response.json().await?)
    }
}
