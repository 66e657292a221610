//! Executing `HttpRequest`s.
//!
//! # Design
//! `Transport` is the seam between the deterministic core and real I/O. The
//! pipeline hands it a fully built request plus a `CancelSignal`; whatever
//! comes back, any status included, is returned as an `HttpResponse` for the
//! classifier to judge. Only failures that prevent a response from existing
//! surface as `TransportError`.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one HTTP round-trip.
pub trait Transport {
    fn execute(
        &self,
        request: HttpRequest,
        cancel: &CancelSignal,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// Cooperative cancellation for in-flight calls.
///
/// Clones share state: cancelling any clone cancels them all. Once cancelled a
/// signal stays cancelled.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once `cancel` has been called on any clone.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        if rx.wait_for(|cancelled| *cancelled).await.is_err() {
            // The sender lives as long as `self`, so this never happens.
            std::future::pending::<()>().await;
        }
    }
}

/// Default transport backed by an async `reqwest::Client`.
///
/// Cancelling drops the in-flight request future, which closes its
/// connection instead of returning it to the pool.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client (timeouts, proxy, TLS).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let method = match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self.client.request(method, &url);
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }
        let response = builder.send().await?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        // Not every server answers in UTF-8; the classifier and decoder judge
        // the text, not the transport.
        let body = response.bytes().await?;

        Ok(HttpResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }
}

impl Transport for ReqwestTransport {
    async fn execute(
        &self,
        request: HttpRequest,
        cancel: &CancelSignal,
    ) -> Result<HttpResponse, TransportError> {
        if cancel.is_cancelled() {
            return Err(TransportError::Cancelled);
        }
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(TransportError::Cancelled),
            result = self.round_trip(request) => result,
        }
    }
}
