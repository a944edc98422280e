// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! End-to-end tests against a server listening on a real socket

use std::{net::TcpListener, time::Duration};

use acct_rest_api_contract::{Account, ErrorResponse};
use acct_rest_server::{Server, ServerConfig};
use reqwest::{Client, StatusCode};
use serde_json::json;
use tokio::task::JoinHandle;

async fn spawn_server(database_path: String) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind to ephemeral port");
    let addr = listener.local_addr().expect("port");
    drop(listener);

    let config = ServerConfig {
        bind_addr: addr,
        database_path,
        ..Default::default()
    };
    let server = Server::new(config).await.expect("server");
    let base_url = format!("http://{}", addr);

    let handle = tokio::spawn(async move {
        server.run().await.expect("server run");
    });

    wait_for_health(&base_url).await;
    (base_url, handle)
}

async fn wait_for_health(base_url: &str) {
    let client = Client::new();
    let health = format!("{}/health", base_url);
    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    loop {
        if let Ok(response) = client.get(&health).send().await {
            if response.status().is_success() {
                return;
            }
        }
        if tokio::time::Instant::now() > deadline {
            panic!("server did not become healthy at {}", health);
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}

async fn create_account(client: &Client, base_url: &str, name: &str) -> Account {
    let response = client
        .post(format!("{}/accounts", base_url))
        .json(&json!({
            "name": name,
            "email": "someone@example.com",
            "address": "1 Infinite Loop",
            "phone_number": "555-0199",
        }))
        .send()
        .await
        .expect("create request");
    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("account body")
}

#[tokio::test]
async fn account_lifecycle_over_http() {
    let (base_url, handle) = spawn_server(":memory:".to_string()).await;
    let client = Client::new();

    let created = create_account(&client, &base_url, "Margaret").await;
    let account_url = format!("{}/accounts/{}", base_url, created.id);

    let fetched: Account = client
        .get(&account_url)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, created);

    let updated: Account = client
        .put(&account_url)
        .json(&json!({"address": "2 Infinite Loop", "phone_number": null}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated.address, "2 Infinite Loop");
    assert_eq!(updated.name, "Margaret");
    assert_eq!(created.phone_number.as_deref(), Some("555-0199"));
    assert_eq!(updated.phone_number, None);

    let response = client.delete(&account_url).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = client.get(&account_url).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = response.json().await.unwrap();
    assert_eq!(error.error, "Account not found");

    handle.abort();
}

#[tokio::test]
async fn accounts_persist_across_restarts() {
    let dir = tempfile::tempdir().expect("temp dir");
    let db_path = dir.path().join("accounts.db").to_string_lossy().into_owned();
    let client = Client::new();

    let (base_url, handle) = spawn_server(db_path.clone()).await;
    let created = create_account(&client, &base_url, "Persistent").await;
    handle.abort();
    let _ = handle.await;

    let (base_url, handle) = spawn_server(db_path).await;
    let accounts: Vec<Account> = client
        .get(format!("{}/accounts", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(accounts, vec![created]);

    handle.abort();
}
