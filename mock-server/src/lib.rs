//! In-memory stand-in for the accounts API.
//!
//! # Design
//! Every request lands in one fallback handler that walks an ordered chain of
//! method-specific handlers (POST, DELETE, GET). The first handler that
//! recognises the request answers it; a request nobody recognises is a bug in
//! the test that sent it and panics.
//!
//! State lives in a caller-owned `Store`, so each test can run against its own
//! accounts without serialising against other tests.

use std::{
    collections::HashMap,
    future::Future,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::net::TcpListener;
use tracing::info;
use uuid::Uuid;

/// Collection path served when no prefix is given.
pub const DEFAULT_PREFIX: &str = "/v1/organisation/accounts";

/// Message returned when an account is posted without `attributes`.
pub const MISSING_ATTRIBUTES: &str =
    "validation failure list:\nvalidation failure list:\nattributes in body is required";

/// An account as the mock stores it.
///
/// Only the fields the mock reasons about are typed; everything else is kept
/// verbatim and echoed back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Deserialize)]
struct DataEnvelope {
    data: AccountRecord,
}

#[derive(Serialize)]
struct DataResponse<'a> {
    data: &'a AccountRecord,
}

#[derive(Serialize)]
struct ErrorResponse {
    error_message: String,
}

/// Accounts held by the mock, shared by every clone of the handle.
#[derive(Clone, Debug, Default)]
pub struct Store {
    accounts: Arc<Mutex<HashMap<String, AccountRecord>>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, AccountRecord>> {
        self.accounts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn insert(&self, record: AccountRecord) {
        self.lock().insert(record.id.clone(), record);
    }

    pub fn get(&self, id: &str) -> Option<AccountRecord> {
        self.lock().get(id).cloned()
    }

    pub fn remove(&self, id: &str) -> Option<AccountRecord> {
        self.lock().remove(id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[derive(Clone)]
struct MockState {
    store: Store,
    prefix: Arc<str>,
}

/// A request as the handler chain sees it.
struct MockRequest {
    method: Method,
    path: String,
    body: Bytes,
}

impl MockRequest {
    /// The `<id>` of a `<prefix>/<id>` path.
    fn resource_id<'a>(&'a self, prefix: &str) -> Option<&'a str> {
        let id = self.path.strip_prefix(prefix)?.strip_prefix('/')?;
        if id.is_empty() || id.contains('/') {
            None
        } else {
            Some(id)
        }
    }
}

type Handler = fn(&MockState, &MockRequest) -> Option<Response>;

const HANDLERS: [Handler; 3] = [handle_post, handle_delete, handle_get];

pub fn app(store: Store) -> Router {
    app_with_prefix(store, DEFAULT_PREFIX)
}

pub fn app_with_prefix(store: Store, prefix: &str) -> Router {
    let state = MockState {
        store,
        prefix: Arc::from(prefix.trim_end_matches('/')),
    };
    Router::new().fallback(dispatch).with_state(state)
}

pub async fn run(listener: TcpListener, store: Store) -> Result<(), std::io::Error> {
    run_with_prefix(listener, store, DEFAULT_PREFIX).await
}

/// The router is built up front, so the returned future does not borrow
/// `prefix`.
pub fn run_with_prefix(
    listener: TcpListener,
    store: Store,
    prefix: &str,
) -> impl Future<Output = Result<(), std::io::Error>> + Send + 'static {
    let router = app_with_prefix(store, prefix);
    async move { axum::serve(listener, router).await }
}

async fn dispatch(State(state): State<MockState>, method: Method, uri: Uri, body: Bytes) -> Response {
    let request = MockRequest {
        method,
        path: uri.path().to_string(),
        body,
    };
    for handler in HANDLERS {
        if let Some(response) = handler(&state, &request) {
            return response;
        }
    }
    panic!("mock request not handled: {} {}", request.method, request.path);
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorResponse { error_message: message })).into_response()
}

fn handle_post(state: &MockState, request: &MockRequest) -> Option<Response> {
    if request.method != Method::POST || request.path != *state.prefix {
        return None;
    }

    let envelope: DataEnvelope = match serde_json::from_slice(&request.body) {
        Ok(envelope) => envelope,
        Err(err) => return Some(error_response(StatusCode::BAD_REQUEST, err.to_string())),
    };
    let mut record = envelope.data;

    if record.attributes.is_none() {
        return Some(error_response(StatusCode::BAD_REQUEST, MISSING_ATTRIBUTES.to_string()));
    }
    if Uuid::parse_str(&record.id).is_err() {
        let message = format!(
            "validation failure list:\nvalidation failure list:\nid in body must be of type uuid: \"{}\"",
            record.id
        );
        return Some(error_response(StatusCode::BAD_REQUEST, message));
    }

    record.version = Some(0);
    info!(id = %record.id, "account created");
    state.store.insert(record.clone());
    Some((StatusCode::CREATED, Json(DataResponse { data: &record })).into_response())
}

fn handle_delete(state: &MockState, request: &MockRequest) -> Option<Response> {
    if request.method != Method::DELETE {
        return None;
    }
    let id = request.resource_id(&state.prefix)?;

    match state.store.remove(id) {
        Some(_) => {
            info!(id, "account deleted");
            Some(StatusCode::NO_CONTENT.into_response())
        }
        None => Some(StatusCode::NOT_FOUND.into_response()),
    }
}

fn handle_get(state: &MockState, request: &MockRequest) -> Option<Response> {
    if request.method != Method::GET {
        return None;
    }
    let id = request.resource_id(&state.prefix)?;

    match state.store.get(id) {
        Some(record) => Some(Json(DataResponse { data: &record }).into_response()),
        None => Some(error_response(
            StatusCode::NOT_FOUND,
            format!("record {id} does not exist"),
        )),
    }
}
