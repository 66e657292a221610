//! Domain DTOs for the accounts API.
//!
//! # Design
//! Every field that may be left unset is either an `Option` or an empty
//! `String`/`Vec`, and both are skipped on serialization. The service treats
//! a missing key differently from an explicit `null`, so nothing here is ever
//! written as `null`.
//!
//! These types are defined independently from the mock-server crate; the
//! integration tests catch schema drift between the two.

use serde::{Deserialize, Serialize};

/// Resource discriminator carried in the `type` field of every account.
pub const ACCOUNT_TYPE: &str = "accounts";

/// A single account resource.
///
/// `version` is assigned by the server (0 on creation) and must be echoed back
/// when deleting. `attributes` is required by the service; leaving it unset
/// produces a validation failure on create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<AccountAttributes>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub organisation_id: String,
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

impl Account {
    /// An account of type `accounts` with no attributes and no version.
    pub fn new(id: impl Into<String>, organisation_id: impl Into<String>) -> Self {
        Self {
            attributes: None,
            id: id.into(),
            organisation_id: organisation_id.into(),
            kind: ACCOUNT_TYPE.to_string(),
            version: None,
        }
    }

    pub fn with_attributes(mut self, attributes: AccountAttributes) -> Self {
        self.attributes = Some(attributes);
        self
    }
}

/// Optional account details. No field depends on another; the service does
/// all validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_classification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_matching_opt_out: Option<bool>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub account_number: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_names: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bank_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bank_id_code: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub base_currency: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub iban: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joint_account: Option<bool>,
    /// Display names, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub secondary_identification: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub switched: Option<bool>,
}

/// Request body wrapper: `{"data": <account>}`.
#[derive(Debug, Serialize)]
pub(crate) struct RequestEnvelope<'a> {
    pub data: &'a Account,
}

/// Success body wrapper: `{"data": <payload>}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ResponseEnvelope<T> {
    pub data: T,
}

/// Error body: `{"error_message": "..."}`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error_message: String,
}
