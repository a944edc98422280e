// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Account REST API server binary

use acct_logging::CliLoggingArgs;
use acct_rest_server::{Server, ServerConfig};
use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Bind address for the server (default: 127.0.0.1:8080)
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Database path (SQLite), or `:memory:`
    #[arg(short, long)]
    database: Option<String>,

    /// Allow requests from any origin
    #[arg(long)]
    cors: bool,

    /// Number of runtime worker threads
    #[arg(short, long)]
    workers: Option<usize>,

    /// Configuration file to load (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    logging: CliLoggingArgs,
}

impl Args {
    fn apply_overrides(&self, config: &mut ServerConfig) {
        if let Some(bind) = self.bind {
            config.bind_addr = bind;
        }
        if let Some(database) = &self.database {
            config.database_path = database.clone();
        }
        if self.cors {
            config.enable_cors = true;
        }
        if self.workers.is_some() {
            config.workers = self.workers;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    args.logging.init("acct-rest-server")?;

    let mut config = ServerConfig::load(args.config.as_deref())?;
    args.apply_overrides(&mut config);
    config.validate()?;

    let mut runtime = tokio::runtime::Builder::new_multi_thread();
    runtime.enable_all();
    if let Some(workers) = config.workers {
        runtime.worker_threads(workers);
    }
    let runtime = runtime.build().context("failed to build tokio runtime")?;

    tracing::info!(
        bind = %config.bind_addr,
        database = %config.database_path,
        workers = ?config.workers,
        "Starting account REST API server"
    );

    runtime.block_on(async {
        let server = Server::new(config).await?;
        server.run().await?;
        Ok::<(), anyhow::Error>(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_loaded_config() {
        let args = Args::parse_from([
            "acct-rest-server",
            "--bind",
            "0.0.0.0:8080",
            "--database",
            "/app/data/accounts.db",
            "--workers",
            "4",
            "--log-level",
            "info",
        ]);
        let mut config = ServerConfig::default();
        args.apply_overrides(&mut config);

        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.database_path, "/app/data/accounts.db");
        assert_eq!(config.workers, Some(4));
        assert!(!config.enable_cors);
    }

    #[test]
    fn absent_flags_keep_loaded_values() {
        let args = Args::parse_from(["acct-rest-server"]);
        let mut config = ServerConfig {
            enable_cors: true,
            workers: Some(2),
            ..Default::default()
        };
        args.apply_overrides(&mut config);

        assert!(config.enable_cors);
        assert_eq!(config.workers, Some(2));
        assert!(config.uses_in_memory_database());
    }
}
