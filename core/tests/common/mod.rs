//! Scenarios shared by the mock-backed and live-service test suites.

use accounts_core::{Account, AccountsClient, CancelSignal};
use serde::Deserialize;

pub const FIXTURES: [&str; 4] = ["full_account", "minimal_account", "mutated_version", "lots_of_names"];

/// An account to send and the account the service should hand back.
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub input: Account,
    pub expected: Account,
}

pub fn load_fixture(name: &str) -> Fixture {
    let raw = match name {
        "full_account" => include_str!("../fixtures/full_account.json"),
        "minimal_account" => include_str!("../fixtures/minimal_account.json"),
        "mutated_version" => include_str!("../fixtures/mutated_version.json"),
        "lots_of_names" => include_str!("../fixtures/lots_of_names.json"),
        other => panic!("unknown fixture: {other}"),
    };
    serde_json::from_str(raw).unwrap_or_else(|e| panic!("{name}: bad fixture: {e}"))
}

pub async fn create(client: &AccountsClient, fixture: &Fixture, name: &str) {
    let cancel = CancelSignal::new();
    let id = &fixture.input.id;

    let got = client.create(&fixture.input, &cancel).await.unwrap();
    assert_eq!(got, fixture.expected, "{name}: created account");

    client.delete(id, got.version.unwrap(), &cancel).await.unwrap();
}

pub async fn delete(client: &AccountsClient, fixture: &Fixture, name: &str) {
    let cancel = CancelSignal::new();
    let id = &fixture.input.id;

    let account = client.create(&fixture.input, &cancel).await.unwrap();
    client.delete(id, account.version.unwrap(), &cancel).await.unwrap();

    let err = client.fetch(id, &cancel).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("404 Not Found - record {id} does not exist"),
        "{name}: fetch after delete"
    );
}

pub async fn fetch(client: &AccountsClient, fixture: &Fixture, name: &str) {
    let cancel = CancelSignal::new();
    let id = &fixture.input.id;

    client.create(&fixture.input, &cancel).await.unwrap();
    let got = client.fetch(id, &cancel).await.unwrap();
    assert_eq!(got, fixture.expected, "{name}: fetched account");

    client.delete(id, got.version.unwrap(), &cancel).await.unwrap();
}

pub async fn create_without_attributes(client: &AccountsClient) {
    let account = Account::new(
        "3de43a70-1e5a-4e03-942d-96fb6f345ffa",
        "654a4fe5-766f-452c-b7e3-8c7c5030668b",
    );
    let err = client.create(&account, &CancelSignal::new()).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "400 Bad Request - validation failure list:\nvalidation failure list:\nattributes in body is required"
    );
}

pub async fn fetch_unknown(client: &AccountsClient) {
    let err = client
        .fetch("00000000-0000-0000-0000-deadbeefcafe", &CancelSignal::new())
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "404 Not Found - record 00000000-0000-0000-0000-deadbeefcafe does not exist"
    );
}

pub async fn delete_unknown(client: &AccountsClient) {
    let err = client
        .delete("00000000-0000-0000-0000-deadbeefcafe", 0, &CancelSignal::new())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "404 Not Found");
}

/// Every fixture through every scenario, then the error cases.
pub async fn run_all(client: &AccountsClient) {
    for name in FIXTURES {
        let fixture = load_fixture(name);
        create(client, &fixture, name).await;
        delete(client, &fixture, name).await;
        fetch(client, &fixture, name).await;
    }
    create_without_attributes(client).await;
    fetch_unknown(client).await;
    delete_unknown(client).await;
}
