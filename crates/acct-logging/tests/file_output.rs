// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Runs in its own process because it installs the global subscriber.

use acct_logging::{CliLogLevel, CliLoggingArgs, LogFormat};
use tempfile::TempDir;

#[test]
fn json_logs_are_written_to_the_resolved_file() {
    std::env::remove_var("RUST_LOG");
    let dir = TempDir::new().expect("temp dir");
    let args = CliLoggingArgs {
        log_level: Some(CliLogLevel::Info),
        log_format: Some(LogFormat::Json),
        log_dir: Some(dir.path().join("nested").to_string_lossy().into_owned()),
        log_file: None,
    };

    args.init("file-output").expect("init logging");
    tracing::info!(account_id = 17, "Account created");
    tracing::debug!("filtered out at info");

    let path = args.resolve_log_path("file-output");
    let contents = std::fs::read_to_string(&path).expect("log file written");
    let line = contents
        .lines()
        .find(|line| line.contains("Account created"))
        .expect("info line present");
    let value: serde_json::Value = serde_json::from_str(line).expect("json line");
    assert_eq!(value["fields"]["account_id"], 17);
    assert!(!contents.contains("filtered out at info"));

    assert!(args.init("file-output").is_err(), "global subscriber is set once");
}
