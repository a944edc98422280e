// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Request spans are visible at the default `info` level

use std::io;
use std::sync::{Arc, Mutex};

use acct_logging::{init_with_writer, Level, LogFormat};
use acct_rest_server::{dependencies::InMemoryServerDependencies, Server, ServerConfig};
use axum::{body::Body, http::Request};
use tower::ServiceExt;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn completed_requests_are_logged_at_info() {
    std::env::remove_var("RUST_LOG");
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    init_with_writer("acct-rest-server", Level::INFO, LogFormat::Json, move || {
        writer.clone()
    })
    .expect("logging initialised");

    let config = ServerConfig::default();
    let state = InMemoryServerDependencies::new(config.clone()).into_state();
    let app = Server::with_state(config, state).router();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.status().is_success());

    let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
    let finished: Vec<serde_json::Value> = output
        .lines()
        .filter_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
        .filter(|line| line["fields"]["message"] == "finished processing request")
        .collect();
    assert_eq!(finished.len(), 1, "{output}");
    assert_eq!(finished[0]["level"], "INFO");
    assert!(finished[0].to_string().contains("/health"), "{output}");
}
