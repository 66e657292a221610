//! Client core for the accounts API.
//!
//! # Overview
//! Creates, fetches and deletes `/v1/organisation/accounts` resources. The
//! request-building and response-parsing halves are pure functions over
//! `HttpRequest` / `HttpResponse`; a `Transport` executes the round-trip in
//! between (reqwest by default).
//!
//! # Design
//! - `AccountsClient` is stateless: configuration plus a transport.
//! - Every response outside `[200, 400)` becomes an `ApiError` carrying the raw
//!   response and the service's `error_message`, if any.
//! - Transport failures and cancellation are a separate `Error` variant and
//!   are never retried.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::AccountsClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_ENDPOINT};
pub use error::{classify, ApiError, Error, Result, TransportError};
pub use crate::http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{CancelSignal, ReqwestTransport, Transport};
pub use types::{Account, AccountAttributes, ACCOUNT_TYPE};
