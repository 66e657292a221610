//! Request pipeline for the accounts API.
//!
//! # Design
//! `AccountsClient` holds only configuration and a transport; it keeps no
//! state between calls and is safe to share between tasks. Each operation is
//! split into a `build_*` method that produces an `HttpRequest` and a
//! `parse_*` method that consumes an `HttpResponse`. The async `create`,
//! `fetch` and `delete` glue the two together through one `send` routine,
//! which is the only place the transport is touched.
//!
//! Version conflicts are the service's business: `delete` forwards the version
//! it is given and never inspects it.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{classify, Error, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{CancelSignal, ReqwestTransport, Transport};
use crate::types::{Account, RequestEnvelope, ResponseEnvelope};

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Client for the `/v1/organisation/accounts` resource.
#[derive(Debug, Clone)]
pub struct AccountsClient<T = ReqwestTransport> {
    config: ClientConfig,
    transport: T,
}

impl AccountsClient<ReqwestTransport> {
    /// Client for `base_url` using the default endpoint and a reqwest transport.
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(ClientConfig::new(base_url), ReqwestTransport::new())
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl Default for AccountsClient<ReqwestTransport> {
    fn default() -> Self {
        Self::from_config(ClientConfig::default())
    }
}

impl<T> AccountsClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn build_create(&self, account: &Account) -> Result<HttpRequest> {
        let body = serde_json::to_string(&RequestEnvelope { data: account }).map_err(Error::Encode)?;
        Ok(request(HttpMethod::Post, self.config.collection_url(), Some(body)))
    }

    pub fn build_fetch(&self, id: &str) -> HttpRequest {
        request(HttpMethod::Get, self.config.resource_url(id), None)
    }

    pub fn build_delete(&self, id: &str, version: i64) -> HttpRequest {
        let url = format!("{}?version={version}", self.config.resource_url(id));
        request(HttpMethod::Delete, url, None)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<Account> {
        decode_envelope(&classify(response)?)
    }

    pub fn parse_fetch(&self, response: HttpResponse) -> Result<Account> {
        decode_envelope(&classify(response)?)
    }

    /// Any success status is accepted and the body, if any, is ignored.
    pub fn parse_delete(&self, response: HttpResponse) -> Result<()> {
        classify(response)?;
        Ok(())
    }
}

impl<T: Transport> AccountsClient<T> {
    /// Create `account`. The returned account carries the server-assigned
    /// version.
    ///
    /// Nothing is validated locally; an account without attributes is sent
    /// as-is and rejected by the service with a 400.
    pub async fn create(&self, account: &Account, cancel: &CancelSignal) -> Result<Account> {
        let request = self.build_create(account)?;
        let response = self.send(request, cancel).await?;
        self.parse_create(response)
    }

    pub async fn fetch(&self, id: &str, cancel: &CancelSignal) -> Result<Account> {
        let response = self.send(self.build_fetch(id), cancel).await?;
        self.parse_fetch(response)
    }

    /// Delete account `id` at `version`. Deleting an unknown id yields a 404
    /// `ApiError` with no message.
    pub async fn delete(&self, id: &str, version: i64, cancel: &CancelSignal) -> Result<()> {
        let response = self.send(self.build_delete(id, version), cancel).await?;
        self.parse_delete(response)
    }

    async fn send(&self, request: HttpRequest, cancel: &CancelSignal) -> Result<HttpResponse> {
        let method = request.method.as_str();
        let url = request.url.clone();
        debug!(method, %url, "sending request");
        let response = self.transport.execute(request, cancel).await?;
        debug!(method, %url, status = response.status, "received response");
        Ok(response)
    }
}

fn request(method: HttpMethod, url: String, body: Option<String>) -> HttpRequest {
    HttpRequest {
        method,
        url,
        headers: vec![
            ("content-type".to_string(), JSON_CONTENT_TYPE.to_string()),
            ("accept".to_string(), JSON_CONTENT_TYPE.to_string()),
        ],
        body,
    }
}

fn decode_envelope<D: DeserializeOwned>(response: &HttpResponse) -> Result<D> {
    let envelope: ResponseEnvelope<D> = serde_json::from_str(&response.body).map_err(Error::Decode)?;
    Ok(envelope.data)
}
